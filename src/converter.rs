use std::convert::Infallible;
use std::mem::swap;

use crate::table::{CellKind, TableEvent, TableState};
use crate::utils::trace_log;
use crate::{Emitter, State, Tokenizer};

/// Emitter translating tags and text into [`TableEvent`]s.
///
/// Attributes and comments are ignored. Consecutive text is folded into one event that is only
/// dispatched once the next tag, comment or the end of input is seen, which makes the event
/// stream independent of how the input was chunked.
#[derive(Debug, Default)]
struct TableEmitter {
    table: TableState,
    current_characters: String,
    current_tag_name: String,
    current_tag_is_end: bool,
    last_start_tag: String,
}

impl TableEmitter {
    fn flush_current_characters(&mut self) {
        if self.current_characters.is_empty() {
            return;
        }

        self.table.handle(TableEvent::Text(&self.current_characters));
        self.current_characters.clear();
    }

    fn current_table_event(&self) -> Option<TableEvent<'static>> {
        let event = match (self.current_tag_is_end, self.current_tag_name.as_str()) {
            (false, "tr") => TableEvent::RowStart,
            (true, "tr") => TableEvent::RowEnd,
            (false, "th") => TableEvent::CellStart(CellKind::Header),
            (true, "th") => TableEvent::CellEnd(CellKind::Header),
            (false, "td") => TableEvent::CellStart(CellKind::Data),
            (true, "td") => TableEvent::CellEnd(CellKind::Data),
            _ => return None,
        };
        Some(event)
    }
}

impl Emitter for TableEmitter {
    type Token = Infallible;

    fn emit_eof(&mut self) {
        self.flush_current_characters();
    }

    fn pop_token(&mut self) -> Option<Self::Token> {
        None
    }

    fn emit_string(&mut self, s: &str) {
        self.current_characters.push_str(s);
    }

    fn init_start_tag(&mut self) {
        self.current_tag_name.clear();
        self.current_tag_is_end = false;
    }

    fn init_end_tag(&mut self) {
        self.current_tag_name.clear();
        self.current_tag_is_end = true;
    }

    fn init_comment(&mut self) {
        self.flush_current_characters();
    }

    fn emit_current_tag(&mut self) -> Option<State> {
        self.flush_current_characters();
        if let Some(event) = self.current_table_event() {
            self.table.handle(event);
        }

        if self.current_tag_is_end {
            self.last_start_tag.clear();
            None
        } else {
            trace_log!("table emitter: start tag {}", self.current_tag_name);
            swap(&mut self.last_start_tag, &mut self.current_tag_name);
            raw_text_state(&self.last_start_tag)
        }
    }

    fn emit_current_comment(&mut self) {}

    fn set_self_closing(&mut self) {}

    fn push_tag_name(&mut self, s: &str) {
        self.current_tag_name.push_str(s);
    }

    fn push_comment(&mut self, _: &str) {}

    fn init_attribute(&mut self) {}

    fn push_attribute_name(&mut self, _: &str) {}

    fn push_attribute_value(&mut self, _: &str) {}

    fn current_is_appropriate_end_tag_token(&mut self) -> bool {
        self.current_tag_is_end
            && !self.last_start_tag.is_empty()
            && self.last_start_tag == self.current_tag_name
    }
}

/// Only `<script>` and `<style>` hide their contents from the table machine. Tables inside
/// `<noscript>`, `<title>`, `<textarea>` and the like are still converted, so an unclosed one
/// cannot swallow the rest of the document.
fn raw_text_state(tag_name: &str) -> Option<State> {
    match tag_name {
        "script" | "style" => Some(State::RawText),
        _ => None,
    }
}

/// Incremental converter from HTML tables to CSV.
///
/// Feed HTML with [`Html2Csv::feed`], take CSV with [`Html2Csv::pull_output`]. All tables of the
/// document end up in the output, in document order, one record per `<tr>`. Large documents can
/// be converted in bounded memory by alternating the two calls.
///
/// Badly formatted HTML (missing `<tr>`, `</tr>`, `</td>`, extraneous `</td>`, ...) is handled as
/// described on [`TableState`].
///
/// ```
/// use html2csv::Html2Csv;
///
/// let mut converter = Html2Csv::new();
/// converter.feed("<table><tr><th>Name<th>Age</tr><tr><td>Ada</td><t");
/// assert_eq!(converter.pull_output(false), "\"Name\",\"Age\"\n");
///
/// converter.feed("d>36");
/// assert_eq!(converter.pull_output(false), "");
/// assert_eq!(converter.pull_output(true), "\"Ada\",\"36\"\n");
/// assert_eq!(converter.row_count(), 2);
/// ```
#[derive(Debug)]
pub struct Html2Csv {
    tokenizer: Tokenizer<TableEmitter>,
}

impl Html2Csv {
    /// Create a converter for a new document.
    #[must_use]
    pub fn new() -> Self {
        Html2Csv {
            tokenizer: Tokenizer::new_with_emitter(TableEmitter::default()),
        }
    }

    /// Feed another chunk of HTML.
    ///
    /// Chunks may split tags, attribute values and comments anywhere. The produced CSV does not
    /// depend on where the input was split.
    pub fn feed(&mut self, chunk: &str) {
        self.tokenizer.feed(chunk);
    }

    /// Return all CSV produced and not yet returned.
    ///
    /// If `finalize_open` is true, the input is considered to end here: pending text is flushed
    /// and an open row is closed as if `</tr>` had been seen. Call this exactly once with `true`
    /// after the last [`Html2Csv::feed`], otherwise an unterminated last row is lost.
    pub fn pull_output(&mut self, finalize_open: bool) -> String {
        if finalize_open {
            self.tokenizer.finish();
            self.tokenizer.emitter_mut().table.finalize_open_row();
        }
        self.tokenizer.emitter_mut().table.take_output()
    }

    /// Number of CSV records (rows) closed so far.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.tokenizer.emitter().table.row_count()
    }
}

impl Default for Html2Csv {
    fn default() -> Self {
        Html2Csv::new()
    }
}

/// Convert a complete HTML document to CSV in one go.
///
/// ```
/// assert_eq!(
///     html2csv::convert("<table><tr><td>He said \"hi\"</table>"),
///     "\"He said \"\"hi\"\"\"\n"
/// );
/// ```
#[must_use]
pub fn convert(html: &str) -> String {
    let mut converter = Html2Csv::new();
    converter.feed(html);
    converter.pull_output(true)
}
