//! Report generation for analysis results
//!
//! Two generators are provided:
//! - **Console**: Terminal output with ANSI colors and wrapped values, one
//!   layout for a single repository and one for a portfolio
//! - **JSON**: Pretty-printed serialization of the full analysis payload
//!
//! All generators write into a [`core::fmt::Write`] so callers decide whether
//! the text goes to a terminal, a file, or a test buffer.

mod console;
mod json;

pub use console::{generate_portfolio as generate_portfolio_console, generate_repository as generate_repository_console};
pub use json::generate as generate_json;
