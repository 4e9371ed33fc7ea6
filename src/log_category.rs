//! Diagnostic log categories.
//!
//! Every category can be switched on independently through
//! [`crate::options::AnalyzerOptions::log`]; all of them are off by default.
//! Enabled categories emit `debug!` records with the target
//! `typo_weight::<category>`, so they can also be filtered with `RUST_LOG`.

use bitflags::bitflags;

/// A closed set of diagnostic categories
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[cfg_attr(feature = "cli", clap(rename_all = "snake_case"))]
pub enum LogCategory {
    /// Step 1: run scanning over the variant
    PositionsSearch,
    /// Cluster conflicts and commits
    PositionsClusters,
    /// Step 2: typo recovery of unmatched pattern chars
    TypoLoop,
    /// Order quality estimation
    Orders,
    /// Final weight assembly
    Weight,
}

bitflags! {
    /// Set of enabled [`LogCategory`] values
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
    pub struct LogCategories: u8 {
        /// See [`LogCategory::PositionsSearch`]
        const POSITIONS_SEARCH = 0b0000_0001;
        /// See [`LogCategory::PositionsClusters`]
        const POSITIONS_CLUSTERS = 0b0000_0010;
        /// See [`LogCategory::TypoLoop`]
        const TYPO_LOOP = 0b0000_0100;
        /// See [`LogCategory::Orders`]
        const ORDERS = 0b0000_1000;
        /// See [`LogCategory::Weight`]
        const WEIGHT = 0b0001_0000;
    }
}

impl From<LogCategory> for LogCategories {
    fn from(category: LogCategory) -> Self {
        match category {
            LogCategory::PositionsSearch => LogCategories::POSITIONS_SEARCH,
            LogCategory::PositionsClusters => LogCategories::POSITIONS_CLUSTERS,
            LogCategory::TypoLoop => LogCategories::TYPO_LOOP,
            LogCategory::Orders => LogCategories::ORDERS,
            LogCategory::Weight => LogCategories::WEIGHT,
        }
    }
}

impl FromIterator<LogCategory> for LogCategories {
    fn from_iter<I: IntoIterator<Item = LogCategory>>(iter: I) -> Self {
        iter.into_iter()
            .fold(LogCategories::empty(), |acc, category| acc | category.into())
    }
}

/// Emits a `debug!` record when the given category is enabled.
///
/// ```ignore
/// analysis_log!(unit.log, POSITIONS_SEARCH, "run found at {}", start);
/// ```
macro_rules! analysis_log {
    (@emit $categories:expr, $flag:ident, $target:literal, $($arg:tt)+) => {
        if $categories.contains($crate::log_category::LogCategories::$flag) {
            ::log::debug!(target: $target, $($arg)+);
        }
    };
    ($categories:expr, POSITIONS_SEARCH, $($arg:tt)+) => {
        $crate::log_category::analysis_log!(@emit $categories, POSITIONS_SEARCH, "typo_weight::positions_search", $($arg)+)
    };
    ($categories:expr, POSITIONS_CLUSTERS, $($arg:tt)+) => {
        $crate::log_category::analysis_log!(@emit $categories, POSITIONS_CLUSTERS, "typo_weight::positions_clusters", $($arg)+)
    };
    ($categories:expr, TYPO_LOOP, $($arg:tt)+) => {
        $crate::log_category::analysis_log!(@emit $categories, TYPO_LOOP, "typo_weight::typo_loop", $($arg)+)
    };
    ($categories:expr, ORDERS, $($arg:tt)+) => {
        $crate::log_category::analysis_log!(@emit $categories, ORDERS, "typo_weight::orders", $($arg)+)
    };
    ($categories:expr, WEIGHT, $($arg:tt)+) => {
        $crate::log_category::analysis_log!(@emit $categories, WEIGHT, "typo_weight::weight", $($arg)+)
    };
}

pub(crate) use analysis_log;

#[cfg(test)]
#[cfg_attr(coverage, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn collect_categories() {
        let set: LogCategories = [LogCategory::Orders, LogCategory::TypoLoop].into_iter().collect();
        assert!(set.contains(LogCategories::ORDERS));
        assert!(set.contains(LogCategories::TYPO_LOOP));
        assert!(!set.contains(LogCategories::WEIGHT));
        assert_eq!(LogCategories::default(), LogCategories::empty());
    }
}
