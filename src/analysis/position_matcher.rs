//! Step 1: scan the variant for runs of pattern characters.
//!
//! A run starts at a left-maximal pair of equal characters (or at a swapped
//! pair) and extends diagonally while one of these rules applies:
//!
//! - the next characters are equal: [`MatchType::Direct`]
//! - the next two characters are swapped: [`MatchType::Typo1`] on both
//! - the variant has one extra character before the next two pattern
//!   characters: [`MatchType::Typo2`]
//!
//! Runs covering at least `min_cluster_len` pattern characters become
//! candidate clusters.

use crate::analysis::cluster::Cluster;
use crate::log_category::{LogCategories, analysis_log};
use crate::match_type::MatchType;
use crate::pool::Pool;

/// Finds candidate clusters for one pattern/variant pair
pub struct PositionMatcher<'a> {
    pattern: &'a [char],
    variant: &'a [char],
    separators: &'a [char],
    min_cluster_len: usize,
    log: LogCategories,
}

impl<'a> PositionMatcher<'a> {
    /// Create a matcher over already normalized strings
    pub fn new(pattern: &'a [char], variant: &'a [char], separators: &'a [char]) -> Self {
        Self {
            pattern,
            variant,
            separators,
            min_cluster_len: 2,
            log: LogCategories::empty(),
        }
    }

    /// Shortest run reported as a cluster
    pub fn min_cluster_len(mut self, min_cluster_len: usize) -> Self {
        self.min_cluster_len = min_cluster_len.max(1);
        self
    }

    /// Diagnostic categories to log
    pub fn log(mut self, log: LogCategories) -> Self {
        self.log = log;
        self
    }

    /// Push every candidate cluster into `found`, borrowing them from `pool`
    pub fn find(&self, pool: &Pool<Cluster>, found: &mut Vec<Cluster>) {
        let (pattern, variant) = (self.pattern, self.variant);
        for ps in 0..pattern.len() {
            for vs in 0..variant.len() {
                if ps > 0 && vs > 0 && pattern[ps - 1] == variant[vs - 1] {
                    continue;
                }
                let direct = pattern[ps] == variant[vs];
                let swapped = !direct
                    && ps + 1 < pattern.len()
                    && vs + 1 < variant.len()
                    && pattern[ps] == variant[vs + 1]
                    && pattern[ps + 1] == variant[vs]
                    && pattern[ps] != pattern[ps + 1];
                if !direct && !swapped {
                    continue;
                }

                let mut cluster = pool.take();
                cluster.begin(pattern.len(), variant.len());
                let (p, v) = if direct {
                    cluster.push(ps, vs, MatchType::Direct);
                    (ps, vs)
                } else {
                    cluster.push(ps, vs + 1, MatchType::Typo1);
                    cluster.push(ps + 1, vs, MatchType::Typo1);
                    (ps + 1, vs + 1)
                };
                self.extend(&mut cluster, p, v);

                if cluster.len() < self.min_cluster_len {
                    pool.give_back(cluster);
                    continue;
                }
                self.describe(&mut cluster);
                analysis_log!(
                    self.log,
                    POSITIONS_SEARCH,
                    "run p[{}..={}] -> v[{}..={}], typos {}, possible typos {}",
                    cluster.pattern_start(),
                    cluster.pattern_end(),
                    cluster.variant_start(),
                    cluster.variant_end(),
                    cluster.typo_count(),
                    cluster.possible_typo_matches()
                );
                found.push(cluster);
            }
        }
    }

    fn extend(&self, cluster: &mut Cluster, mut p: usize, mut v: usize) {
        let (pattern, variant) = (self.pattern, self.variant);
        let (n, m) = (pattern.len(), variant.len());
        loop {
            if p + 1 < n && v + 1 < m && pattern[p + 1] == variant[v + 1] {
                cluster.push(p + 1, v + 1, MatchType::Direct);
                p += 1;
                v += 1;
            } else if p + 2 < n
                && v + 2 < m
                && pattern[p + 1] == variant[v + 2]
                && pattern[p + 2] == variant[v + 1]
                && pattern[p + 1] != pattern[p + 2]
            {
                cluster.push(p + 1, v + 2, MatchType::Typo1);
                cluster.push(p + 2, v + 1, MatchType::Typo1);
                p += 2;
                v += 2;
            } else if p + 2 < n && v + 3 < m && pattern[p + 1] == variant[v + 2] && pattern[p + 2] == variant[v + 3] {
                cluster.push(p + 1, v + 2, MatchType::Typo2);
                p += 1;
                v += 2;
            } else {
                break;
            }
        }
    }

    fn describe(&self, cluster: &mut Cluster) {
        let (pattern, variant) = (self.pattern, self.variant);
        let (ps, pe) = (cluster.pattern_start(), cluster.pattern_end());
        let (vs, ve) = (cluster.variant_start(), cluster.variant_end());

        let after_separator = vs > 0 && self.is_separator(variant[vs - 1]);
        let before_separator = ve + 1 < variant.len() && self.is_separator(variant[ve + 1]);

        let mut possible = 0;
        if ps > 0 {
            let slipped_in_variant = vs >= 2 && variant[vs - 2] == pattern[ps - 1];
            let skipped_in_pattern = ps >= 2 && vs >= 1 && variant[vs - 1] == pattern[ps - 2];
            if slipped_in_variant || skipped_in_pattern {
                possible += 1;
            }
        }
        if pe + 1 < pattern.len() {
            let slipped_in_variant = ve + 2 < variant.len() && variant[ve + 2] == pattern[pe + 1];
            let skipped_in_pattern = pe + 2 < pattern.len() && ve + 1 < variant.len() && variant[ve + 1] == pattern[pe + 2];
            if slipped_in_variant || skipped_in_pattern {
                possible += 1;
            }
        }
        cluster.set_surroundings(after_separator, before_separator, possible);
    }

    fn is_separator(&self, ch: char) -> bool {
        self.separators.contains(&ch)
    }
}
