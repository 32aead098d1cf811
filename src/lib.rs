//! Sentiscope: classify free-form text, keep the verdicts, show recent history.
//!
//! A request flows through three pieces:
//! - [`classifier`]: turns text into a label and confidence score
//! - [`db`]: append-only history of every analyzed text
//! - [`web`]: HTML page and JSON API on top of [`analysis::Analyzer`]

pub mod analysis;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod history;
pub mod observability;
pub mod web;

pub use config::Config;
pub use error::{Error, Result};
