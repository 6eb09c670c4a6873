/// Content model an [`crate::Emitter`] can switch the tokenizer to after a start tag.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum State {
    /// The data state. Markup is interpreted.
    Data,
    /// The raw text state, used for the contents of `<script>`, `<style>` and friends. Markup is
    /// not interpreted until the end tag matching the last start tag.
    RawText,
}
