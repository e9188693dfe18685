//! Terminal helpers for Citra tools
//!
//! Provides shared CLI functionality:
//! - Status messages
//! - Histogram bar charts and analysis summaries
//! - Spinners for remote requests

#![warn(missing_docs)]

pub mod output;
pub mod progress;
