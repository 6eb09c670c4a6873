//! [Emitter] is a "visitor" on the underlying token stream.
//!
//! When html2csv tokenizes HTML, the [crate::Tokenizer] calls into an emitter to keep track of
//! state and to produce output. Two implementations ship with this crate:
//!
//! * [default::DefaultEmitter], which queues owned [default::Token]s that can be drained through
//!   [crate::Tokenizer::tokens]. Convenient, but allocates per token.
//! * The table emitter behind [crate::Html2Csv], which never yields tokens and instead maps tags
//!   straight onto [crate::TableEvent]s.
pub mod default;

mod emitter;

pub use emitter::{naive_next_state, Emitter};
