//! Final weight of an accepted match. Lower is better.
//!
//! ```text
//! weight = 2 * (1 - strength / (10 * n))          match kinds
//!        + 1 / (1 + max(0, quality - threshold))  order quality
//!        + 0.1 * smart_mean(variant gaps)         spacing
//!        + 0.5 * unmatched / m                    variant coverage
//!        - 0.05 * token-start clusters            boundary bonus
//! ```
//!
//! `n` is the pattern length and `m` the variant length.

use crate::analysis::cluster::Cluster;
use crate::analysis::orders::OrdersEstimator;
use crate::analysis::policy::ScoringPolicy;
use crate::analysis::smart_mean::smart_mean;
use crate::analysis::typo::Typo;
use crate::analysis::unit::Assignment;
use crate::error::{AnalysisError, Result};
use crate::log_category::{LogCategories, analysis_log};
use crate::match_type::MatchType;

const KIND_FACTOR: f32 = 2.0;
const GAP_FACTOR: f32 = 0.1;
const COVERAGE_FACTOR: f32 = 0.5;
const BOUNDARY_BONUS: f32 = 0.05;

/// Everything the weight is computed from
pub struct WeightInput<'a> {
    /// Pattern length in characters
    pub pattern_len: usize,
    /// Variant length in characters
    pub variant_len: usize,
    /// Final pattern to variant mapping
    pub assignment: &'a Assignment,
    /// Typo records of the typo matches
    pub typos: &'a [Typo],
    /// Matched variant positions, ascending
    pub positions: &'a [usize],
    /// Committed clusters
    pub clusters: &'a [Cluster],
    /// Estimator fed with the matched pairs
    pub orders: &'a OrdersEstimator,
}

impl WeightInput<'_> {
    /// Compute the weight; `gaps` is scratch space
    #[allow(clippy::cast_precision_loss)]
    pub fn compute(&self, policy: &dyn ScoringPolicy, gaps: &mut Vec<i32>, log: LogCategories) -> Result<f32> {
        let strength = self.strength()?;
        let kinds = KIND_FACTOR * (1.0 - strength as f32 / (MatchType::MAX_STRENGTH as f32 * self.pattern_len as f32));

        let distance = (self.orders.quality_total() - self.orders.quality_threshold()).max(0);
        let order = 1.0 / (1.0 + distance as f32);

        gaps.clear();
        gaps.extend(self.positions.windows(2).map(|w| (w[1] - w[0] - 1) as i32));
        let spacing = GAP_FACTOR * smart_mean(gaps, policy)? as f32;

        let unmatched = self.variant_len.saturating_sub(self.positions.len());
        let coverage = COVERAGE_FACTOR * unmatched as f32 / self.variant_len as f32;

        let boundaries = self.clusters.iter().filter(|c| c.is_token_start()).count();
        let bonus = BOUNDARY_BONUS * boundaries as f32;

        let weight = (kinds + order + spacing + coverage - bonus).max(0.0);
        analysis_log!(
            log,
            WEIGHT,
            "kinds {kinds:.3} order {order:.3} spacing {spacing:.3} coverage {coverage:.3} bonus {bonus:.3} => {weight:.4}"
        );
        Ok(weight)
    }

    /// Sum of the strengths of every matched pattern character
    fn strength(&self) -> Result<u32> {
        let direct = self
            .assignment
            .pairs()
            .filter(|&(_, _, kind)| kind == MatchType::Direct)
            .count() as u32;
        let mut total = direct * MatchType::Direct.strength();
        for typo in self.typos {
            let p = typo.pattern_index()?;
            let kind = self.assignment.kind(p).ok_or_else(|| {
                AnalysisError::Invariant(format!("typo recorded for unmatched pattern character {p}"))
            })?;
            if self.assignment.variant(p) != Some(typo.variant_index()?) {
                return Err(AnalysisError::Invariant(format!(
                    "typo for pattern character {p} disagrees with its assignment"
                )));
            }
            total += kind.strength();
        }
        Ok(total)
    }
}
