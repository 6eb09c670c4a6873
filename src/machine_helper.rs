use crate::utils::trace_log;
use crate::State;

/// Every state the tokenizer can be suspended in between two calls to
/// [`crate::Tokenizer::feed`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum MachineState {
    Data,
    TagOpen,
    EndTagOpen,
    TagName,
    BeforeAttributeName,
    AttributeName,
    AfterAttributeName,
    BeforeAttributeValue,
    AttributeValueDoubleQuoted,
    AttributeValueSingleQuoted,
    AttributeValueUnquoted,
    AfterAttributeValueQuoted,
    SelfClosingStartTag,
    MarkupDeclarationOpen,
    MarkupDeclarationDash,
    CommentStart,
    Comment,
    CommentEndDash,
    CommentEnd,
    BogusComment,
    RawText,
    RawTextLessThanSign,
    RawTextEndTagOpen,
    RawTextEndTagName,
}

impl From<State> for MachineState {
    fn from(state: State) -> Self {
        match state {
            State::Data => MachineState::Data,
            State::RawText => MachineState::RawText,
        }
    }
}

#[derive(Debug)]
pub(crate) struct MachineHelper {
    /// Characters of a candidate end tag inside raw text, replayed as text if the end tag turns
    /// out not to be the appropriate one.
    pub(crate) temporary_buffer: String,
    pub(crate) state: MachineState,
}

impl Default for MachineHelper {
    fn default() -> Self {
        MachineHelper {
            temporary_buffer: String::new(),
            state: MachineState::Data,
        }
    }
}

impl MachineHelper {
    pub(crate) fn switch_to(&mut self, state: MachineState) {
        trace_log!("switch_to: {:?} -> {:?}", self.state, state);
        self.state = state;
    }
}
