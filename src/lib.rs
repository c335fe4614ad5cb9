// Pedantic lint configuration for the crate.
// - cast_possible_truncation / cast_sign_loss / cast_precision_loss: completeness
//   percentages are computed in f64 and always fit in u8
// - missing_errors_doc: Error handling is self-evident from Result types
// - missing_panics_doc: Only static regex construction can panic
// - module_name_repetitions: Output types are named after the file they describe
// - similar_names: Variable naming is contextually clear
// - option_if_let_else: if-let is often clearer
// - manual_let_else: if-let with early return is often clearer in context
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::option_if_let_else,
    clippy::manual_let_else
)]

pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod ingest;
pub mod models;
pub mod output;
pub mod pipeline;
pub mod reference;
