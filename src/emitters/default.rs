//! The default emitter is what powers the simple token API of [crate::Tokenizer].
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, VecDeque};
use std::mem::take;

use crate::utils::trace_log;
use crate::{naive_next_state, Emitter, State};

/// A HTML start tag, such as `<td colspan=2>`.
#[derive(Debug, Default, Eq, PartialEq, Clone)]
pub struct StartTag {
    /// Whether this tag is self-closing. If it is self-closing, no following [`EndTag`] should be
    /// expected.
    pub self_closing: bool,

    /// The tag name, ASCII-lowercased.
    pub name: String,

    /// A mapping for any HTML attributes this start tag may have.
    ///
    /// Duplicate attributes are ignored after the first one, as browsers do.
    pub attributes: BTreeMap<String, String>,
}

impl StartTag {
    /// Return the state the tokenizer continues in after this tag, following
    /// [`naive_next_state`].
    #[must_use]
    pub fn next_state(&self) -> State {
        naive_next_state(&self.name).unwrap_or(State::Data)
    }
}

/// A HTML end tag, such as `</tr>`.
#[derive(Debug, Default, Eq, PartialEq, Clone)]
pub struct EndTag {
    /// The ending tag's name, ASCII-lowercased.
    pub name: String,
}

/// The token type used by default. You can define your own token type by implementing your own
/// [`Emitter`].
#[derive(Debug, Eq, PartialEq, Clone)]
pub enum Token {
    /// A HTML start tag.
    StartTag(StartTag),
    /// A HTML end tag.
    EndTag(EndTag),
    /// A literal string. Consecutive text is always folded into one token, no matter how the
    /// input was chunked.
    String(String),
    /// A HTML comment. Doctypes and processing instructions show up as comments too.
    Comment(String),
}

#[derive(Debug)]
enum CurrentToken {
    StartTag(StartTag),
    EndTag(EndTag),
    Comment(String),
}

/// This is the emitter you implicitly use with [crate::Tokenizer::new].
///
/// Tokens are queued and can be drained with [crate::Tokenizer::tokens] after each call to
/// [crate::Tokenizer::feed].
#[derive(Debug)]
pub struct DefaultEmitter {
    current_characters: String,
    current_token: Option<CurrentToken>,
    last_start_tag: String,
    current_attribute: Option<(String, String)>,
    emitted_tokens: VecDeque<Token>,
    naively_switch_states: bool,
}

impl Default for DefaultEmitter {
    fn default() -> Self {
        DefaultEmitter {
            current_characters: String::new(),
            current_token: None,
            last_start_tag: String::new(),
            current_attribute: None,
            emitted_tokens: VecDeque::new(),
            naively_switch_states: true,
        }
    }
}

impl DefaultEmitter {
    /// Whether to use [`naive_next_state`] to switch states automatically.
    ///
    /// The default is on, because a push-based tokenizer gives its caller no chance to switch
    /// states in between tags.
    pub fn naively_switch_states(&mut self, yes: bool) {
        self.naively_switch_states = yes;
    }

    fn emit_token(&mut self, token: Token) {
        self.flush_current_characters();
        self.emitted_tokens.push_front(token);
    }

    fn flush_current_characters(&mut self) {
        if self.current_characters.is_empty() {
            return;
        }

        let s = take(&mut self.current_characters);
        self.emitted_tokens.push_front(Token::String(s));
    }

    fn flush_current_attribute(&mut self) {
        if let Some((name, value)) = self.current_attribute.take() {
            if let Some(CurrentToken::StartTag(ref mut tag)) = self.current_token {
                match tag.attributes.entry(name) {
                    Entry::Vacant(vacant) => {
                        vacant.insert(value);
                    }
                    Entry::Occupied(_) => {
                        trace_log!("default emitter: dropping duplicate attribute");
                    }
                }
            }
        }
    }
}

impl Emitter for DefaultEmitter {
    type Token = Token;

    fn emit_eof(&mut self) {
        self.flush_current_characters();
        self.current_token = None;
        self.current_attribute = None;
    }

    fn pop_token(&mut self) -> Option<Self::Token> {
        self.emitted_tokens.pop_back()
    }

    fn emit_string(&mut self, s: &str) {
        self.current_characters.push_str(s);
    }

    fn init_start_tag(&mut self) {
        self.current_token = Some(CurrentToken::StartTag(StartTag::default()));
    }

    fn init_end_tag(&mut self) {
        self.current_token = Some(CurrentToken::EndTag(EndTag::default()));
    }

    fn init_comment(&mut self) {
        self.current_token = Some(CurrentToken::Comment(String::new()));
    }

    fn emit_current_tag(&mut self) -> Option<State> {
        self.flush_current_attribute();
        let mut next_state = None;
        match self.current_token.take() {
            Some(CurrentToken::StartTag(tag)) => {
                self.last_start_tag.clear();
                self.last_start_tag.push_str(&tag.name);
                if self.naively_switch_states {
                    next_state = naive_next_state(&tag.name);
                }
                self.emit_token(Token::StartTag(tag));
            }
            Some(CurrentToken::EndTag(tag)) => {
                self.last_start_tag.clear();
                self.emit_token(Token::EndTag(tag));
            }
            _ => debug_assert!(false, "emit_current_tag without a current tag"),
        }
        next_state
    }

    fn emit_current_comment(&mut self) {
        if let Some(CurrentToken::Comment(comment)) = self.current_token.take() {
            self.emit_token(Token::Comment(comment));
        }
    }

    fn set_self_closing(&mut self) {
        if let Some(CurrentToken::StartTag(ref mut tag)) = self.current_token {
            tag.self_closing = true;
        }
    }

    fn push_tag_name(&mut self, s: &str) {
        match self.current_token {
            Some(CurrentToken::StartTag(StartTag { ref mut name, .. }))
            | Some(CurrentToken::EndTag(EndTag { ref mut name, .. })) => {
                name.push_str(s);
            }
            _ => debug_assert!(false, "push_tag_name without a current tag"),
        }
    }

    fn push_comment(&mut self, s: &str) {
        if let Some(CurrentToken::Comment(ref mut data)) = self.current_token {
            data.push_str(s);
        }
    }

    fn init_attribute(&mut self) {
        self.flush_current_attribute();
        self.current_attribute = Some((String::new(), String::new()));
    }

    fn push_attribute_name(&mut self, s: &str) {
        if let Some((ref mut name, _)) = self.current_attribute {
            name.push_str(s);
        }
    }

    fn push_attribute_value(&mut self, s: &str) {
        if let Some((_, ref mut value)) = self.current_attribute {
            value.push_str(s);
        }
    }

    fn current_is_appropriate_end_tag_token(&mut self) -> bool {
        match self.current_token {
            Some(CurrentToken::EndTag(ref tag)) => {
                !self.last_start_tag.is_empty() && self.last_start_tag == tag.name
            }
            _ => false,
        }
    }
}
