#![doc(hidden)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for reposcope
//!
//! This library consolidates all functionality for the reposcope tool, which scores
//! GitHub repositories from their own signals, compares them against similar
//! projects, and rolls an account's repositories up into a portfolio view.
//!
//! # Module Organization
//!
//! - [`facts`]: Repository data collection from the hosting service
//! - [`scoring`]: Basic technical, quality and activity scores
//! - [`comparison`]: Similarity search and comparison-set aggregation
//! - [`enhancement`]: Recommendations and enhanced scores
//! - [`pipeline`]: End-to-end single-repository and portfolio analysis
//! - [`portfolio`]: Portfolio-wide rollups
//! - [`reports`]: Console and JSON report generation
//! - [`commands`]: Command-line interface and orchestration

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

pub type HashMap<K, V> = rustc_hash::FxHashMap<K, V>;

#[cfg(any(debug_assertions, test))]
pub mod commands;
#[cfg(not(any(debug_assertions, test)))]
mod commands;

pub mod comparison;
pub mod enhancement;
pub mod facts;
pub mod pipeline;
pub mod portfolio;
pub mod reports;
pub mod scoring;

pub use crate::commands::{Host, run};
