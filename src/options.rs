//! Configuration options for the analyzer.
//!
//! This module provides the `AnalyzerOptions` struct and its builder. Scoring
//! policies and shared resources are not options: they are injected through
//! [`crate::AnalyzerBuilder`].

use derive_builder::Builder;

use crate::log_category::{LogCategories, LogCategory};

/// Characters treated as token separators when none are configured
pub const DEFAULT_SEPARATORS: &str = " -_./\\";

/// Analyzer settings
#[derive(Builder, Debug, Clone, PartialEq)]
#[builder(default)]
#[cfg_attr(feature = "cli", derive(clap::Args))]
pub struct AnalyzerOptions {
    /// Match characters case sensitively
    ///
    /// By default both the pattern and the variant are lowercased before analysis.
    #[cfg_attr(feature = "cli", arg(long, help_heading = "Analysis"))]
    pub case_sensitive: bool,

    /// Characters that separate tokens inside a variant
    ///
    /// Clusters starting right after (or ending right before) one of these
    /// characters are preferred when two clusters compete.
    #[cfg_attr(
        feature = "cli",
        arg(long, default_value = DEFAULT_SEPARATORS, help_heading = "Analysis")
    )]
    pub separators: String,

    /// Value that fills every array handed out by the array cache
    #[cfg_attr(
        feature = "cli",
        arg(long, default_value_t = -1, allow_hyphen_values = true, help_heading = "Analysis")
    )]
    pub array_sentinel: i32,

    /// Shortest run of pattern characters reported as a cluster
    #[cfg_attr(feature = "cli", arg(long, default_value_t = 2, help_heading = "Analysis"))]
    pub min_cluster_len: usize,

    /// Comma-separated list of diagnostic categories to log
    ///
    /// Records are emitted at debug level, target `typo_weight::<category>`.
    #[cfg_attr(
        feature = "cli",
        arg(long, value_enum, value_delimiter = ',', help_heading = "Diagnostics")
    )]
    pub log: Vec<LogCategory>,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self {
            case_sensitive: false,
            separators: DEFAULT_SEPARATORS.to_string(),
            array_sentinel: -1,
            min_cluster_len: 2,
            log: Vec::new(),
        }
    }
}

impl AnalyzerOptions {
    /// Enabled diagnostic categories as a set
    pub fn log_categories(&self) -> LogCategories {
        self.log.iter().copied().collect()
    }
}

#[cfg(test)]
#[cfg_attr(coverage, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let options = AnalyzerOptionsBuilder::default().build().unwrap();
        assert_eq!(options, AnalyzerOptions::default());
        assert_eq!(options.separators, DEFAULT_SEPARATORS);
        assert_eq!(options.min_cluster_len, 2);
        assert!(options.log_categories().is_empty());
    }

    #[test]
    fn builder_overrides() {
        let options = AnalyzerOptionsBuilder::default()
            .case_sensitive(true)
            .log(vec![LogCategory::Weight])
            .build()
            .unwrap();
        assert!(options.case_sensitive);
        assert_eq!(options.log_categories(), LogCategories::WEIGHT);
    }
}
