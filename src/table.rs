//! The table extraction state machine.
//!
//! [`TableState`] knows nothing about HTML syntax. It consumes [`TableEvent`]s, which the
//! tokenizer-facing emitter in [`crate::Html2Csv`] derives from `<tr>`, `<th>` and `<td>` tags
//! and from text, and turns them into CSV records.
use std::mem::take;

use crate::csv::{self, DELIMITER, TERMINATOR};
use crate::utils::trace_log;

/// The two kinds of table cells.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CellKind {
    /// A header cell, `<th>`.
    Header,
    /// A data cell, `<td>`.
    Data,
}

/// Input of the [`TableState`] machine.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TableEvent<'a> {
    /// `<tr>`
    RowStart,
    /// `</tr>`
    RowEnd,
    /// `<th>` or `<td>`
    CellStart(CellKind),
    /// `</th>` or `</td>`
    CellEnd(CellKind),
    /// Text between tags.
    Text(&'a str),
}

/// Row and cell state of a table being converted to CSV.
///
/// Malformed markup never causes an error. Missing end tags are implied:
///
/// * a row start while a row is open ends that row first,
/// * a cell start outside of a row starts a row first,
/// * a cell start while a cell is open ends that cell first,
/// * a row end while a cell is open ends that cell first.
///
/// End tags that don't match what is open are ignored. Text outside of cells is discarded.
#[derive(Debug, Default)]
pub struct TableState {
    open_cell: Option<CellKind>,
    in_row: bool,
    /// Text of the open cell, whitespace-collapsed but not yet quoted.
    cell: String,
    /// Finalized fields of the open row, each followed by a delimiter.
    row: String,
    output: String,
    row_count: usize,
}

impl TableState {
    /// Create a machine that is outside of any row.
    #[must_use]
    pub fn new() -> Self {
        TableState::default()
    }

    /// Advance the machine by one event.
    pub fn handle(&mut self, event: TableEvent<'_>) {
        trace_log!("table: {:?}", event);
        match event {
            TableEvent::RowStart => self.start_row(),
            TableEvent::RowEnd => self.end_row(),
            TableEvent::CellStart(kind) => self.start_cell(kind),
            TableEvent::CellEnd(kind) => self.end_cell(kind),
            TableEvent::Text(text) => self.push_text(text),
        }
    }

    /// End the open row, if any, exactly as a `</tr>` would.
    pub fn finalize_open_row(&mut self) {
        if self.in_row {
            self.end_row();
        }
    }

    /// Return all CSV written since the last call, leaving the output buffer empty.
    pub fn take_output(&mut self) -> String {
        take(&mut self.output)
    }

    /// Number of rows closed so far.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Whether a row is currently open.
    #[must_use]
    pub fn is_in_row(&self) -> bool {
        self.in_row
    }

    /// The kind of the currently open cell.
    #[must_use]
    pub fn open_cell(&self) -> Option<CellKind> {
        self.open_cell
    }

    fn start_row(&mut self) {
        if self.in_row {
            // <tr> implies </tr>
            self.end_row();
        }
        self.in_row = true;
    }

    fn end_row(&mut self) {
        if let Some(kind) = self.open_cell {
            // </tr> implies </td> or </th>
            self.end_cell(kind);
        }
        self.in_row = false;

        if !self.row.is_empty() {
            let record = self.row.strip_suffix(DELIMITER).unwrap_or(&self.row);
            self.output.push_str(record);
            self.row.clear();
        }
        self.output.push(TERMINATOR);
        self.row_count += 1;
    }

    fn start_cell(&mut self, kind: CellKind) {
        if !self.in_row {
            // <td> implies <tr>
            self.start_row();
        }
        if let Some(open) = self.open_cell {
            // <td> implies </td>
            self.end_cell(open);
        }
        self.cell.clear();
        self.open_cell = Some(kind);
    }

    fn end_cell(&mut self, kind: CellKind) {
        if self.open_cell != Some(kind) {
            trace_log!("table: ignoring stray end of {:?} cell", kind);
            return;
        }
        csv::encode_field(&self.cell, &mut self.row);
        self.row.push(DELIMITER);
        self.cell.clear();
        self.open_cell = None;
    }

    fn push_text(&mut self, text: &str) {
        if self.open_cell.is_some() {
            csv::push_collapsed_whitespace(text, &mut self.cell);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    use CellKind::{Data, Header};
    use TableEvent::{CellEnd, CellStart, RowEnd, RowStart, Text};

    fn run(events: &[TableEvent<'_>]) -> TableState {
        let mut state = TableState::new();
        for &event in events {
            state.handle(event);
        }
        state
    }

    #[test]
    fn test_well_formed_row() {
        let mut state = run(&[
            RowStart,
            CellStart(Header),
            Text("Name"),
            CellEnd(Header),
            CellStart(Data),
            Text("42"),
            CellEnd(Data),
            RowEnd,
        ]);
        assert_eq!(state.take_output(), "\"Name\",\"42\"\n");
        assert_eq!(state.row_count(), 1);
        assert!(!state.is_in_row());
    }

    #[test]
    fn test_empty_row_is_blank_line() {
        let mut state = run(&[RowStart, RowEnd]);
        assert_eq!(state.take_output(), "\n");
        assert_eq!(state.row_count(), 1);
    }

    #[test]
    fn test_empty_cell() {
        let mut state = run(&[RowStart, CellStart(Data), CellEnd(Data), RowEnd]);
        assert_eq!(state.take_output(), "\"\"\n");
    }

    #[test]
    fn test_stray_end_tags_are_ignored() {
        let mut state = run(&[
            CellEnd(Data),
            RowStart,
            CellStart(Data),
            Text("a"),
            CellEnd(Header),
            Text("b"),
            CellEnd(Data),
            CellEnd(Data),
            RowEnd,
        ]);
        assert_eq!(state.take_output(), "\"ab\"\n");
    }

    #[test]
    fn test_stray_row_end_outside_row_still_counts() {
        let mut state = run(&[RowEnd]);
        assert_eq!(state.take_output(), "\n");
        assert_eq!(state.row_count(), 1);
    }

    #[test]
    fn test_cell_start_implies_row_start() {
        let state = run(&[CellStart(Data)]);
        assert!(state.is_in_row());
        assert_eq!(state.open_cell(), Some(Data));
    }

    #[test]
    fn test_cell_start_closes_other_kind() {
        let mut state = run(&[
            CellStart(Data),
            Text("a"),
            CellStart(Header),
            Text("b"),
            RowEnd,
        ]);
        assert_eq!(state.take_output(), "\"a\",\"b\"\n");
    }

    #[test]
    fn test_row_start_closes_open_row() {
        let mut state = run(&[
            RowStart,
            CellStart(Data),
            Text("A"),
            RowStart,
            CellStart(Data),
            Text("B"),
            RowEnd,
        ]);
        assert_eq!(state.take_output(), "\"A\"\n\"B\"\n");
        assert_eq!(state.row_count(), 2);
    }

    #[test]
    fn test_text_outside_cells_is_discarded() {
        let mut state = run(&[Text("caption"), RowStart, Text("\n  "), RowEnd]);
        assert_eq!(state.take_output(), "\n");
    }

    #[test]
    fn test_text_events_are_normalized_independently() {
        let mut state = run(&[
            CellStart(Data),
            Text("A \n"),
            Text("\t B \"x\""),
            RowEnd,
        ]);
        assert_eq!(state.take_output(), "\"A  B \"\"x\"\"\"\n");
    }

    #[test]
    fn test_finalize_open_row() {
        let mut state = run(&[RowStart, CellStart(Data), Text("X")]);
        assert_eq!(state.take_output(), "");
        state.finalize_open_row();
        assert_eq!(state.take_output(), "\"X\"\n");
        assert_eq!(state.row_count(), 1);

        state.finalize_open_row();
        assert_eq!(state.take_output(), "");
        assert_eq!(state.row_count(), 1);
    }
}
