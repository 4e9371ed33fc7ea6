//! Pluggable scoring policies.
//!
//! Both hooks take part in the scoring formula directly, so they are kept
//! pure and replaceable: the rest of the pipeline only depends on their
//! signatures.

use crate::analysis::cluster::Cluster;

/// How far outside a cluster the default policy looks for slipped characters
const TYPO_WINDOW: usize = 3;

/// Externally supplied scoring functions
pub trait ScoringPolicy: Send + Sync {
    /// Secondary typo evidence for a cluster, used to break ties between
    /// clusters with the same number of possible typo matches.
    fn additional_possible_typo_matches(&self, cluster: &Cluster, pattern: &[char], variant: &[char]) -> usize;

    /// Mean of the nonzero values of a distribution that also contained
    /// `zeros` neutral entries.
    fn mean_considering_zeros(&self, sum: i64, nonzero: usize, zeros: usize) -> i32;
}

/// The policy used when none is injected.
///
/// - `additional_possible_typo_matches` counts the sides of the cluster where
///   the neighbouring pattern character shows up among the three variant
///   characters just outside the cluster.
/// - `mean_considering_zeros` is `round(sum / (nonzero + zeros / 2))`, and 0
///   when there is no nonzero value.
#[derive(Debug, Default, Copy, Clone)]
pub struct DefaultPolicy;

impl ScoringPolicy for DefaultPolicy {
    fn additional_possible_typo_matches(&self, cluster: &Cluster, pattern: &[char], variant: &[char]) -> usize {
        let mut count = 0;
        if cluster.pattern_start() > 0 {
            let ch = pattern[cluster.pattern_start() - 1];
            let from = cluster.variant_start().saturating_sub(TYPO_WINDOW);
            if variant[from..cluster.variant_start()].contains(&ch) {
                count += 1;
            }
        }
        if cluster.pattern_end() + 1 < pattern.len() {
            let ch = pattern[cluster.pattern_end() + 1];
            let from = (cluster.variant_end() + 1).min(variant.len());
            let to = (cluster.variant_end() + 1 + TYPO_WINDOW).min(variant.len());
            if variant[from..to].contains(&ch) {
                count += 1;
            }
        }
        count
    }

    #[allow(clippy::cast_possible_truncation)]
    fn mean_considering_zeros(&self, sum: i64, nonzero: usize, zeros: usize) -> i32 {
        if nonzero == 0 {
            return 0;
        }
        let divisor = (nonzero + zeros / 2) as f64;
        (sum as f64 / divisor).round() as i32
    }
}
