use crate::machine;
use crate::machine_helper::{MachineHelper, MachineState};
use crate::{DefaultEmitter, Emitter, State};

/// A push-based HTML tokenizer. See crate-level docs for basic usage.
///
/// Input is handed over in chunks through [`Tokenizer::feed`]. Chunks do not need to be aligned
/// to anything: a tag, comment or attribute value that is cut off at the end of a chunk is
/// remembered and resumed by the next call. Call [`Tokenizer::finish`] once the input is
/// exhausted.
#[derive(Debug)]
pub struct Tokenizer<E: Emitter = DefaultEmitter> {
    pub(crate) emitter: E,
    pub(crate) machine_helper: MachineHelper,
}

impl Tokenizer {
    /// Create a new tokenizer using the [`DefaultEmitter`].
    #[must_use]
    pub fn new() -> Self {
        Tokenizer::new_with_emitter(DefaultEmitter::default())
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Tokenizer::new()
    }
}

impl<E: Emitter> Tokenizer<E> {
    /// Construct a new tokenizer with a custom emitter.
    ///
    /// Use this method over [`Tokenizer::new`] when you want to consume tags and text without
    /// allocating a token for each of them.
    pub fn new_with_emitter(emitter: E) -> Self {
        Tokenizer {
            emitter,
            machine_helper: MachineHelper::default(),
        }
    }

    /// Override internal state, e.g. to treat the following input as the contents of a
    /// `<script>` tag.
    pub fn set_state(&mut self, state: State) {
        self.machine_helper.switch_to(state.into());
    }

    /// Tokenize another chunk of input.
    ///
    /// All complete markup in `input` is dispatched to the emitter before this method returns.
    /// Incomplete trailing markup is kept in the tokenizer's state.
    pub fn feed(&mut self, input: &str) {
        let mut rest = input;
        while !rest.is_empty() {
            rest = machine::consume(self, rest);
        }
    }

    /// Signal the end of input.
    ///
    /// A dangling `<` or `</` is emitted as text, an unterminated comment is emitted as is, and
    /// an unterminated tag is dropped. Afterwards [`Emitter::emit_eof`] is called and the
    /// tokenizer is back in the data state, ready to be fed a new document.
    pub fn finish(&mut self) {
        machine::consume_eof(self);
        self.emitter.emit_eof();
        self.machine_helper.temporary_buffer.clear();
        self.machine_helper.switch_to(MachineState::Data);
    }

    /// Drain all tokens the emitter has queued so far.
    ///
    /// ```
    /// use html2csv::{Token, Tokenizer};
    ///
    /// let mut tokenizer = Tokenizer::new();
    /// tokenizer.feed("<td>hel");
    /// tokenizer.feed("lo</t");
    /// let tokens: Vec<Token> = tokenizer.tokens().collect();
    /// assert_eq!(tokens.len(), 1);
    ///
    /// tokenizer.feed("d>");
    /// let tokens: Vec<Token> = tokenizer.tokens().collect();
    /// assert_eq!(tokens[0], Token::String("hello".to_owned()));
    /// ```
    pub fn tokens(&mut self) -> impl Iterator<Item = E::Token> + '_ {
        std::iter::from_fn(move || self.emitter.pop_token())
    }

    /// Get a reference to the emitter.
    pub fn emitter(&self) -> &E {
        &self.emitter
    }

    /// Get a mutable reference to the emitter.
    pub fn emitter_mut(&mut self) -> &mut E {
        &mut self.emitter
    }

    /// Consume the tokenizer and return its emitter.
    pub fn into_emitter(self) -> E {
        self.emitter
    }
}
