//! Order quality of a matched position sequence.
//!
//! The sequence is a list of `(pattern, variant)` pairs; the first pair set
//! through [`OrdersEstimator::set`] is the anchor, the following ones are
//! committed with [`OrdersEstimator::add`]. Every step between consecutive
//! pairs contributes gaps (characters skipped on either axis) and may be
//! backward (the pattern index decreases). Contiguous forward steps raise the
//! quality, gaps and reversals lower it.

use crate::error::{AnalysisError, Result};

/// Running sums over the steps of the sequence
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Accumulators {
    pattern_gap_sum: i32,
    pattern_gap_count: i32,
    pattern_backward_sum: i32,
    variant_gap_sum: i32,
    variant_gap_count: i32,
    variant_backward_sum: i32,
    quality: i32,
    penalty: i32,
    previous_backward: bool,
}

/// Scores how well ordered and contiguous a match is
#[derive(Debug, Default, Clone)]
pub struct OrdersEstimator {
    patterns: Vec<i32>,
    variants: Vec<i32>,
    acc: Accumulators,
    bonus: i32,
}

/// Size of a step on one axis, in skipped characters.
///
/// A backward step of one position counts as a gap of one.
fn gap(delta: i32, backward: bool) -> i32 {
    let magnitude = delta.abs();
    if magnitude <= 1 {
        i32::from(backward)
    } else {
        magnitude - 1
    }
}

impl OrdersEstimator {
    /// Start a new sequence anchored at `(pattern, variant)`
    pub fn set(&mut self, pattern: i32, variant: i32) {
        self.clear();
        self.patterns.push(pattern);
        self.variants.push(variant);
    }

    /// Commit the next pair of the sequence
    pub fn add(&mut self, pattern: i32, variant: i32) -> Result<()> {
        let (Some(&from_pattern), Some(&from_variant)) = (self.patterns.last(), self.variants.last()) else {
            return Err(AnalysisError::Invariant(
                "orders: pair added before the anchor was set".to_string(),
            ));
        };
        let step = self.patterns.len() - 1;
        self.step(step, (from_pattern, from_variant), (pattern, variant));
        self.patterns.push(pattern);
        self.variants.push(variant);
        Ok(())
    }

    /// Replace the pair `(old_pattern, old_variant)` by `(new_pattern, new_variant)`.
    ///
    /// The old pair is looked up on both axes; finding it at different
    /// indices means the sequence is corrupted.
    pub fn change(&mut self, old_pattern: i32, old_variant: i32, new_pattern: i32, new_variant: i32) -> Result<()> {
        let by_pattern = self.patterns.iter().position(|&p| p == old_pattern);
        let by_variant = self.variants.iter().position(|&v| v == old_variant);
        let index = match (by_pattern, by_variant) {
            (Some(p), Some(v)) if p == v => p,
            _ => {
                return Err(AnalysisError::Invariant(format!(
                    "orders: pair ({old_pattern}, {old_variant}) found at pattern index {by_pattern:?} \
                     and variant index {by_variant:?}"
                )));
            }
        };
        self.patterns[index] = new_pattern;
        self.variants[index] = new_variant;
        self.replay();
        Ok(())
    }

    /// Add an external bonus to the final score
    pub fn correlate_quality(&mut self, bonus: i32) {
        self.bonus += bonus;
    }

    /// Number of pairs, anchor included
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether no anchor was set
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Lowest acceptable score: minus the number of pairs, anchor included.
    ///
    /// The step rules of [`OrdersEstimator::quality_total`] count steps
    /// instead, one less than the pairs.
    pub fn quality_threshold(&self) -> i32 {
        -(self.patterns.len() as i32)
    }

    /// Final score of the sequence
    pub fn quality_total(&self) -> i32 {
        let acc = &self.acc;
        let steps = self.patterns.len().saturating_sub(1) as i32;
        let trivial = steps == 0
            || (steps == 1
                && (acc.variant_gap_sum == 0 || acc.pattern_gap_sum == 0)
                && acc.variant_backward_sum == 0);
        if trivial {
            return 1;
        }

        let mut quality = acc.quality;
        let mut penalty = acc.penalty;
        if acc.pattern_gap_sum == 0 {
            quality += 1 + (steps - 1) / 2;
        }
        let periodic = (steps + 1) / 3;
        if quality > 0
            && acc.variant_gap_count == acc.pattern_gap_count
            && acc.pattern_gap_count == periodic
            && acc.variant_gap_sum.max(acc.pattern_gap_sum) < periodic + 2
        {
            quality += 1;
            penalty -= 1;
        }
        let penalty = penalty.max(0);

        let mut total = quality
            - acc.variant_gap_sum
            - acc.variant_backward_sum
            - acc.pattern_backward_sum
            - acc.pattern_gap_sum
            - 2 * penalty
            + self.bonus;
        if acc.variant_backward_sum == 0 && acc.pattern_backward_sum == 0 {
            total += 1;
        }
        total
    }

    /// Whether the score reaches the threshold
    pub fn is_ok(&self) -> bool {
        self.quality_total() >= self.quality_threshold()
    }

    /// Sum of the gaps on the pattern axis
    pub fn pattern_gap_sum(&self) -> i32 {
        self.acc.pattern_gap_sum
    }

    /// Sum of the gaps on the variant axis
    pub fn variant_gap_sum(&self) -> i32 {
        self.acc.variant_gap_sum
    }

    /// Whether any step went backward
    pub fn has_backward_steps(&self) -> bool {
        self.acc.pattern_backward_sum != 0 || self.acc.variant_backward_sum != 0
    }

    /// Forget the sequence, the accumulators and the bonus
    pub fn clear(&mut self) {
        self.patterns.clear();
        self.variants.clear();
        self.acc = Accumulators::default();
        self.bonus = 0;
    }

    fn replay(&mut self) {
        self.acc = Accumulators::default();
        for i in 1..self.patterns.len() {
            let from = (self.patterns[i - 1], self.variants[i - 1]);
            let to = (self.patterns[i], self.variants[i]);
            self.step(i - 1, from, to);
        }
    }

    fn step(&mut self, index: usize, from: (i32, i32), to: (i32, i32)) {
        let pattern_delta = to.0 - from.0;
        let variant_delta = to.1 - from.1;
        let pattern_backward = pattern_delta < 0;
        let variant_backward = pattern_backward || variant_delta < 0;
        let pattern_gap = gap(pattern_delta, pattern_backward);
        let variant_gap = gap(variant_delta, variant_backward);

        let acc = &mut self.acc;
        if pattern_gap != 0 {
            acc.pattern_gap_sum += pattern_gap;
            acc.pattern_gap_count += 1;
            if pattern_backward {
                acc.pattern_backward_sum += pattern_gap;
            }
        }
        if variant_gap != 0 {
            acc.variant_gap_sum += variant_gap;
            acc.variant_gap_count += 1;
            if variant_backward {
                acc.variant_backward_sum += variant_gap;
            }
        }

        if pattern_gap == 0 && variant_gap == 0 {
            acc.quality += 1;
            if index == 0 {
                acc.quality += 1;
            }
        } else if pattern_gap == 0 && variant_gap == 1 {
            acc.quality += 1;
        } else if index == 0 {
            if pattern_gap == 0 && variant_gap < 3 {
                acc.penalty += 1;
            } else if pattern_gap > 1 && variant_gap > 1 {
                acc.penalty += 2;
            } else if pattern_gap > 1 || variant_gap > 1 {
                acc.penalty += 1;
            }
        }

        if pattern_gap == variant_gap && pattern_gap < 3 {
            acc.quality += 1;
        }

        if variant_backward && acc.previous_backward {
            acc.quality -= 1;
            acc.penalty += 1;
        }
        acc.previous_backward = variant_backward;
    }
}

#[cfg(test)]
#[cfg_attr(coverage, coverage(off))]
mod tests {
    use super::*;

    fn estimate(pairs: &[(i32, i32)]) -> OrdersEstimator {
        let mut orders = OrdersEstimator::default();
        let (first, rest) = pairs.split_first().unwrap();
        orders.set(first.0, first.1);
        for &(p, v) in rest {
            orders.add(p, v).unwrap();
        }
        orders
    }

    #[test]
    fn contiguous_forward_is_always_ok() {
        for len in 1..12 {
            let pairs: Vec<(i32, i32)> = (0..len).map(|i| (i, i + 3)).collect();
            let orders = estimate(&pairs);
            assert!(orders.is_ok(), "len {len}: {}", orders.quality_total());
            assert_eq!(orders.quality_threshold(), -len);
        }
        assert_eq!(estimate(&[(0, 0)]).quality_total(), 1);
        assert_eq!(estimate(&[(0, 0), (1, 1)]).quality_total(), 1);
        assert_eq!(estimate(&[(0, 0), (1, 1), (2, 2)]).quality_total(), 7);
    }

    #[test]
    fn threshold_counts_pairs_and_bonus_counts_steps() {
        let orders = estimate(&[(0, 0), (1, 1), (2, 2), (3, 3), (4, 4)]);
        assert_eq!(orders.len(), 5);
        assert_eq!(orders.quality_threshold(), -5);
        // 3 + 2 + 2 + 2 per step, 1 + (4 - 1) / 2 for no pattern gap, 1 for no backward step
        assert_eq!(orders.quality_total(), 12);
    }

    #[test]
    fn consecutive_backward_steps_cost_more() {
        let backward = estimate(&[(2, 0), (1, 1), (0, 2)]);
        let forward = estimate(&[(0, 0), (1, 1), (2, 2)]);
        assert_eq!(backward.quality_total(), -9);
        assert!(backward.quality_total() < forward.quality_total());
        assert!(!backward.is_ok());
        assert!(backward.has_backward_steps());
    }

    #[test]
    fn gap_on_first_step_is_penalized() {
        assert_eq!(estimate(&[(0, 0), (1, 3), (2, 4)]).quality_total(), 0);
        assert_eq!(estimate(&[(0, 0), (1, 1), (2, 4)]).quality_total(), 3);
    }

    #[test]
    fn single_insertion_is_tolerated() {
        assert_eq!(estimate(&[(0, 0), (1, 2), (2, 3)]).quality_total(), 4);
    }

    #[test]
    fn regular_deviation_is_rewarded() {
        let orders = estimate(&[(0, 0), (1, 1), (3, 3)]);
        assert_eq!(orders.pattern_gap_sum(), 1);
        assert_eq!(orders.variant_gap_sum(), 1);
        assert_eq!(orders.quality_total(), 4);
    }

    #[test]
    fn bonus_is_added() {
        let mut orders = estimate(&[(0, 0), (1, 1), (2, 2)]);
        orders.correlate_quality(3);
        assert_eq!(orders.quality_total(), 10);
    }

    #[test]
    fn change_replaces_and_rescores() {
        let mut orders = estimate(&[(0, 0), (2, 1), (1, 2)]);
        orders.change(1, 2, 2, 2).unwrap();
        orders.change(2, 1, 1, 1).unwrap();
        assert_eq!(orders.quality_total(), 7);
    }

    #[test]
    fn change_with_mismatched_indices_is_an_invariant_error() {
        let mut orders = estimate(&[(0, 0), (1, 1), (2, 2)]);
        assert!(matches!(orders.change(1, 2, 5, 5), Err(AnalysisError::Invariant(_))));
        assert!(matches!(orders.change(9, 9, 5, 5), Err(AnalysisError::Invariant(_))));
        assert_eq!(orders.quality_total(), 7);
    }

    #[test]
    fn add_before_set_is_an_invariant_error() {
        let mut orders = OrdersEstimator::default();
        assert!(orders.add(1, 1).is_err());
        assert!(orders.is_empty());
    }
}
