//! Question-answering pipeline.
//!
//! `matcher` selects documents whose content overlaps a query's tokens,
//! `synthesizer` extracts a short answer from them, and `engine` wires both
//! to the question store as a single "ask" operation.

pub mod matcher;
pub mod synthesizer;
pub mod engine;

pub use engine::QaEngine;
pub use matcher::find_relevant;
pub use synthesizer::{generate_answer, NO_ANSWER_MESSAGE, NO_DOCUMENTS_MESSAGE};
