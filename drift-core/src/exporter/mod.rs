//! Changelog exporters.
//!
//! - `markdown`: the human-readable changelog sections
//! - `json`: machine-readable reports

pub mod json;
pub mod markdown;
