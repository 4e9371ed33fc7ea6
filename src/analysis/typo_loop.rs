//! Step 2: recover pattern characters left unmatched by the clusters.
//!
//! Unmatched pattern characters are visited in pattern order. Every unclaimed
//! occurrence of the character in the variant becomes a pooled
//! [`CandidatePosition`], classified by how it sits relative to the closest
//! matched pattern neighbours; the best candidate is claimed.

use crate::analysis::clustered_positions::ClusteredPositions;
use crate::analysis::single_positions::SinglePositions;
use crate::analysis::typo::CandidatePosition;
use crate::analysis::unit::Assignment;
use crate::error::Result;
use crate::log_category::{LogCategories, analysis_log};
use crate::match_type::MatchType;
use crate::pool::Pool;

/// Recovers unmatched pattern characters through typo rules
pub struct TypoLoopMatcher<'a> {
    pattern: &'a [char],
    variant: &'a [char],
    log: LogCategories,
}

impl<'a> TypoLoopMatcher<'a> {
    /// Create a matcher over already normalized strings
    pub fn new(pattern: &'a [char], variant: &'a [char], log: LogCategories) -> Self {
        Self { pattern, variant, log }
    }

    /// Visit every unmatched pattern character, claiming the best candidate.
    ///
    /// Each claim is recorded in `positions`, `assignment` and `single`;
    /// each failure is a miss in `single`.
    pub fn recover(
        &self,
        assignment: &mut Assignment,
        positions: &mut ClusteredPositions,
        single: &mut SinglePositions,
        pool: &Pool<CandidatePosition>,
    ) -> Result<()> {
        for p in 0..self.pattern.len() {
            if assignment.kind(p).is_some() {
                continue;
            }
            let previous = assignment.previous_matched(p);
            let next = assignment.next_matched(p);
            let expected = match (previous, next) {
                (Some((q, v)), _) => v + (p - q),
                (None, Some((q, v))) => v.saturating_sub(q - p),
                (None, None) => p,
            };

            let mut best: Option<CandidatePosition> = None;
            for (v, &ch) in self.variant.iter().enumerate() {
                if ch != self.pattern[p] || positions.contains(v) {
                    continue;
                }
                let mut candidate = pool.take();
                candidate.set(v, classify(v, previous, next), v.abs_diff(expected));
                let better = match &best {
                    Some(current) => candidate.is_better_than(current)?,
                    None => true,
                };
                if better {
                    if let Some(replaced) = best.replace(candidate) {
                        pool.give_back(replaced);
                    }
                } else {
                    pool.give_back(candidate);
                }
            }

            match best {
                Some(candidate) => {
                    let v = candidate.variant_index()?;
                    let kind = candidate.match_type()?;
                    pool.give_back(candidate);
                    analysis_log!(self.log, TYPO_LOOP, "p[{p}] '{}' recovered at v[{v}] as {kind}", self.pattern[p]);
                    assignment.assign(p, v, kind);
                    positions.add(v);
                    single.add(v);
                }
                None => {
                    analysis_log!(self.log, TYPO_LOOP, "p[{p}] '{}' missed", self.pattern[p]);
                    single.miss();
                }
            }
        }
        Ok(())
    }
}

fn classify(v: usize, previous: Option<(usize, usize)>, next: Option<(usize, usize)>) -> MatchType {
    let after_previous = previous.map(|(_, pv)| v > pv);
    let before_next = next.map(|(_, nv)| v < nv);
    if previous.is_some_and(|(_, pv)| v == pv + 1) {
        MatchType::Typo3_1
    } else if next.is_some_and(|(_, nv)| v + 1 == nv) {
        MatchType::Typo3_2
    } else if (previous.is_some() || next.is_some()) && after_previous != Some(false) && before_next != Some(false) {
        MatchType::Typo3_3
    } else {
        MatchType::TypoLoop
    }
}
