//! A mode-first summary of integer distributions.
//!
//! Zero is a neutral marker: it takes part in the frequency table but not in
//! sums or means.

use indexmap::IndexMap;

use crate::analysis::policy::ScoringPolicy;
use crate::error::{AnalysisError, Result};

/// Representative value of `values`.
///
/// - When every value is distinct, the policy's mean-considering-zeros decides.
/// - A single most frequent value wins outright.
/// - Tied modes are broken toward the mean of the remaining nonzero values,
///   the first encountered mode winning equal distances. With nothing
///   remaining the rounded plain mean is returned.
#[allow(clippy::cast_possible_truncation)]
pub fn smart_mean(values: &[i32], policy: &dyn ScoringPolicy) -> Result<i32> {
    let mut sum: i64 = 0;
    let mut nonzero = 0usize;
    let mut frequencies: IndexMap<i32, usize> = IndexMap::new();
    for &value in values {
        if value != 0 {
            sum += i64::from(value);
            nonzero += 1;
        }
        *frequencies.entry(value).or_default() += 1;
    }

    let max_count = frequencies.values().copied().max().unwrap_or(0);
    if max_count <= 1 {
        return Ok(policy.mean_considering_zeros(sum, nonzero, values.len() - nonzero));
    }

    let modes: Vec<i32> = frequencies
        .iter()
        .filter(|&(_, &count)| count == max_count)
        .map(|(&value, _)| value)
        .collect();
    if let [mode] = modes.as_slice() {
        return Ok(*mode);
    }

    let modes_sum: i64 = modes.iter().map(|&m| i64::from(m) * max_count as i64).sum();
    let nonzero_modes = modes.iter().filter(|&&m| m != 0).count();
    let rest_count = nonzero - nonzero_modes * max_count;
    if rest_count == 0 {
        return Ok((sum as f64 / values.len() as f64).round() as i32);
    }

    let rest_mean = (sum - modes_sum) as f64 / rest_count as f64;
    let mut best: Option<(i32, f64)> = None;
    for &mode in &modes {
        let distance = (f64::from(mode) - rest_mean).abs();
        match best {
            Some((_, best_distance)) if best_distance <= distance => {}
            _ => best = Some((mode, distance)),
        }
    }
    best.map(|(mode, _)| mode)
        .ok_or_else(|| AnalysisError::Invariant(format!("no best mode among {modes:?}")))
}
