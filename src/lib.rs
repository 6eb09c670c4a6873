#![deny(missing_docs)]
// This is an HTML parser. HTML can be untrusted input from the internet.
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

pub mod batch;
mod converter;
pub mod csv;
pub mod emitters;
mod error;
mod machine;
mod machine_helper;
mod state;
pub mod table;
mod tokenizer;
mod utils;

#[cfg(debug_assertions)]
#[doc(hidden)]
pub mod testutils;

pub use converter::{convert, Html2Csv};
pub use emitters::default::{DefaultEmitter, EndTag, StartTag, Token};
pub use emitters::{naive_next_state, Emitter};
pub use error::Error;
pub use state::State;
pub use table::{CellKind, TableEvent, TableState};
pub use tokenizer::Tokenizer;
