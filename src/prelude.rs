//! Convenience re-exports of commonly used types.
//!
//! `use typo_weight::prelude::*;` brings in the analyzer, its options and
//! the result types.

pub use crate::options::{AnalyzerOptions, AnalyzerOptionsBuilder};
pub use crate::*;
pub use std::sync::Arc;
