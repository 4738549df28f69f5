//! Command-line interface and orchestration for reposcope
//!
//! This module implements the CLI commands and wires the analysis pipeline to
//! the GitHub fetcher, the configuration file, and the report generators.
//!
//! # Commands
//!
//! - **repo**: Analyze a single repository, compare it against similar projects,
//!   and report basic scores, enhanced scores, and recommendations
//! - **portfolio**: Analyze the repositories owned by an account with bounded
//!   concurrency and report the portfolio rollup, including which repositories
//!   could not be analyzed
//! - **init**: Generate a default configuration file
//!
//! The `common` module provides shared functionality like logging setup,
//! color mode handling, and report emission for console and JSON output.

mod common;
mod config;
mod host;
mod init;
mod portfolio;
mod progress_reporter;
mod repo;
mod run;

pub use host::Host;
pub use init::{InitArgs, init_config};
pub use portfolio::{PortfolioArgs, process_portfolio};
pub use progress_reporter::ProgressReporter;
pub use repo::{RepoArgs, process_repository};
pub use run::run;
