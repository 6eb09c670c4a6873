use crate::State;

/// An emitter is an object providing methods to the tokenizer to produce tokens.
///
/// Domain-specific applications of the tokenizer can implement this trait to avoid per-token
/// allocations altogether, which is what the table-to-CSV converter does.
///
/// An emitter is assumed to have these internal states:
///
/// * _last start tag_: The most recently emitted start tag's name
/// * _current token_: Can be a tag or a comment. There's only one current token.
/// * _current attribute_: The currently processed HTML attribute, consisting of two strings for
///   name and value.
///
/// Tag and attribute names are always passed in ASCII-lowercase. Strings passed to
/// [`Emitter::emit_string`] may be split at arbitrary points, in particular at the boundaries of
/// the chunks given to [`crate::Tokenizer::feed`]. Emitters that care about whole text runs
/// should fold consecutive strings until the next tag, comment or end of input.
///
/// If you don't care about attributes or comments at all, the related methods can be noops. The
/// state machine needs a functional implementation of `current_is_appropriate_end_tag_token` to
/// leave raw text states, however.
pub trait Emitter {
    /// The token type emitted by this emitter. This controls what type of values
    /// [`crate::Tokenizer::tokens`] yields.
    type Token;

    /// The input has ended. Pending text should be flushed now.
    fn emit_eof(&mut self);

    /// After every call to [`crate::Tokenizer::feed`], the caller may repeatedly call this method
    /// to take queued tokens.
    fn pop_token(&mut self) -> Option<Self::Token>;

    /// Emit a bunch of plain characters as character tokens.
    fn emit_string(&mut self, s: &str);

    /// Set the _current token_ to a start tag.
    fn init_start_tag(&mut self);

    /// Set the _current token_ to an end tag.
    fn init_end_tag(&mut self);

    /// Set the _current token_ to a comment.
    fn init_comment(&mut self);

    /// Emit the _current token_, assuming it is a tag.
    ///
    /// Also get the current attribute and append it to the to-be-emitted tag. If the name of the
    /// attribute is already present, do not add it.
    ///
    /// If a start tag is emitted, update the _last start tag_.
    ///
    /// The return value is the state the tokenizer should continue in. `None` means
    /// [`State::Data`]. A start tag like `<script>` should usually return [`State::RawText`], which
    /// is what [`naive_next_state`] approximates.
    #[must_use]
    fn emit_current_tag(&mut self) -> Option<State>;

    /// Emit the _current token_, assuming it is a comment.
    fn emit_current_comment(&mut self);

    /// Assuming the _current token_ is a start tag, set the self-closing flag.
    fn set_self_closing(&mut self);

    /// Assuming the _current token_ is a start/end tag, append a string to the current tag's name.
    fn push_tag_name(&mut self, s: &str);

    /// Assuming the _current token_ is a comment, append a string to the comment's contents.
    fn push_comment(&mut self, s: &str);

    /// Set the _current attribute_ to a new one, starting with empty name and value strings.
    fn init_attribute(&mut self);

    /// Append a string to the current attribute's name.
    fn push_attribute_name(&mut self, s: &str);

    /// Append a string to the current attribute's value.
    fn push_attribute_value(&mut self, s: &str);

    /// Return true if all of these hold:
    ///
    /// * the _current token_ is an end tag
    /// * the _last start tag_ exists
    /// * the current end tag token's name equals to the last start tag's name.
    fn current_is_appropriate_end_tag_token(&mut self) -> bool;
}

/// Take an educated guess at the next state using the name of the last start tag.
///
/// The real answer depends on the tree construction stage, which this crate does not have.
/// Guessing from the tag name alone is what every tag soup scraper does, and is good enough to
/// keep the contents of `<script>` and `<style>` from being parsed as markup.
#[must_use]
pub fn naive_next_state(tag_name: &str) -> Option<State> {
    match tag_name {
        "script" | "style" | "textarea" | "title" | "xmp" | "iframe" | "noembed" | "noframes"
        | "noscript" => Some(State::RawText),
        _ => None,
    }
}
