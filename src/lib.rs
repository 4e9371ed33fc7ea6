//! typo-weight scores how well a short typed query matches candidate strings.
//!
//! It tolerates typos (swapped, doubled or slipped characters), reordering and
//! token structure, and assigns every accepted candidate a float weight used
//! to rank candidates against one query. Lower weights are better.
//!
//! # Examples
//!
//! ```no_run
//! use typo_weight::prelude::*;
//!
//! let options = AnalyzerOptionsBuilder::default()
//!     .separators(" -_/".to_string())
//!     .build()
//!     .unwrap();
//! let analyzer = Analyzer::new(options);
//!
//! let candidates = ["frobnicate", "fornicate", "focaccia", "fabricate"];
//! for output in analyzer.analyze_all("frobincate", &candidates).unwrap() {
//!     println!("{} {:.3}", output.text(), output.weight());
//! }
//! ```

#![warn(missing_docs)]

#[macro_use]
extern crate log;

pub use crate::analysis::policy::{DefaultPolicy, ScoringPolicy};
pub use crate::analysis::{Analyzer, AnalyzerBuilder};
pub use crate::error::{AnalysisError, Result};
pub use crate::log_category::{LogCategories, LogCategory};
pub use crate::match_type::MatchType;
pub use crate::options::{AnalyzerOptions, AnalyzerOptionsBuilder};
pub use crate::output::{Output, rank};
pub use crate::pool::Resources;

pub mod analysis;
mod error;
pub mod log_category;
mod match_type;
pub mod options;
mod output;
pub mod pool;
pub mod prelude;
