//! Per-call analysis state.
//!
//! An [`AnalysisUnit`] holds every buffer one pattern/variant scoring needs.
//! Units are reused across calls on the same thread; [`AnalysisUnit::clear`]
//! returns every pooled object and leaves the unit as if freshly created.

use crate::analysis::cluster::{Cluster, ClusterResolver, Preference};
use crate::analysis::clustered_positions::ClusteredPositions;
use crate::analysis::orders::OrdersEstimator;
use crate::analysis::policy::ScoringPolicy;
use crate::analysis::position_matcher::PositionMatcher;
use crate::analysis::single_positions::SinglePositions;
use crate::analysis::typo::Typo;
use crate::analysis::typo_loop::TypoLoopMatcher;
use crate::analysis::weight::WeightInput;
use crate::error::{AnalysisError, Result};
use crate::log_category::{LogCategories, analysis_log};
use crate::match_type::MatchType;
use crate::pool::Resources;

/// Shared, read-only settings for one call
pub(crate) struct Context<'a> {
    pub case_sensitive: bool,
    pub separators: &'a [char],
    pub min_cluster_len: usize,
    pub log: LogCategories,
    pub policy: &'a dyn ScoringPolicy,
    pub resources: &'a Resources,
}

//------------------------------------------------------------------------------
/// Which variant position, if any, each pattern character is matched to.
///
/// The variant index of pattern character `p` lives in a pooled `i32` array
/// holding the cache sentinel for unmatched characters; the match kind is
/// kept alongside it.
#[derive(Debug, Default)]
pub struct Assignment {
    map: Option<Box<[i32]>>,
    kinds: Vec<Option<MatchType>>,
    sentinel: i32,
    matched: usize,
}

impl Assignment {
    /// Start over with a sentinel-filled array, one slot per pattern character
    pub fn reset(&mut self, map: Box<[i32]>, sentinel: i32) {
        self.kinds.clear();
        self.kinds.resize(map.len(), None);
        self.map = Some(map);
        self.sentinel = sentinel;
        self.matched = 0;
    }

    /// Give the array back for returning to its cache
    pub fn take_map(&mut self) -> Option<Box<[i32]>> {
        self.kinds.clear();
        self.matched = 0;
        self.map.take()
    }

    /// Match pattern character `p` to variant position `v`
    pub fn assign(&mut self, p: usize, v: usize, kind: MatchType) {
        let Some(map) = self.map.as_mut() else { return };
        if self.kinds[p].is_none() {
            self.matched += 1;
        }
        map[p] = v as i32;
        self.kinds[p] = Some(kind);
    }

    /// Forget the match of pattern character `p`
    pub fn unassign(&mut self, p: usize) {
        let Some(map) = self.map.as_mut() else { return };
        if self.kinds[p].take().is_some() {
            self.matched -= 1;
        }
        map[p] = self.sentinel;
    }

    /// Variant position of pattern character `p`
    pub fn variant(&self, p: usize) -> Option<usize> {
        self.kind(p)?;
        let v = *self.map.as_ref()?.get(p)?;
        usize::try_from(v).ok()
    }

    /// Match kind of pattern character `p`
    pub fn kind(&self, p: usize) -> Option<MatchType> {
        self.kinds.get(p).copied().flatten()
    }

    /// Closest matched pattern character before `p`, with its variant position
    pub fn previous_matched(&self, p: usize) -> Option<(usize, usize)> {
        (0..p).rev().find_map(|q| self.variant(q).map(|v| (q, v)))
    }

    /// Closest matched pattern character after `p`, with its variant position
    pub fn next_matched(&self, p: usize) -> Option<(usize, usize)> {
        (p + 1..self.kinds.len()).find_map(|q| self.variant(q).map(|v| (q, v)))
    }

    /// Number of matched pattern characters
    pub fn matched(&self) -> usize {
        self.matched
    }

    /// Matched `(pattern, variant, kind)` triples in pattern order
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize, MatchType)> + '_ {
        (0..self.kinds.len()).filter_map(|p| Some((p, self.variant(p)?, self.kind(p)?)))
    }
}

//------------------------------------------------------------------------------
/// Every buffer used while scoring one pattern against one variant
#[derive(Debug, Default)]
pub struct AnalysisUnit {
    pattern: Vec<char>,
    variant: Vec<char>,
    candidates: Vec<Cluster>,
    clusters: Vec<Cluster>,
    positions: ClusteredPositions,
    assignment: Assignment,
    typos: Vec<Typo>,
    single: SinglePositions,
    orders: OrdersEstimator,
    gaps: Vec<i32>,
}

impl AnalysisUnit {
    /// Score `variant` against `pattern`; `None` when the variant is rejected.
    ///
    /// The unit keeps its state afterwards so it can be inspected; call
    /// [`AnalysisUnit::clear`] before the next run.
    pub(crate) fn run(&mut self, pattern: &str, variant: &str, ctx: &Context<'_>) -> Result<Option<f32>> {
        normalize(&mut self.pattern, pattern, ctx.case_sensitive);
        normalize(&mut self.variant, variant, ctx.case_sensitive);
        let n = self.pattern.len();
        if n == 0 || self.variant.is_empty() {
            return Ok(None);
        }

        let arrays = &ctx.resources.arrays;
        self.assignment.reset(arrays.get(n), arrays.sentinel());

        PositionMatcher::new(&self.pattern, &self.variant, ctx.separators)
            .min_cluster_len(ctx.min_cluster_len)
            .log(ctx.log)
            .find(&ctx.resources.clusters, &mut self.candidates);
        self.commit_clusters(ctx)?;

        TypoLoopMatcher::new(&self.pattern, &self.variant, ctx.log).recover(
            &mut self.assignment,
            &mut self.positions,
            &mut self.single,
            &ctx.resources.candidates,
        )?;
        self.record_typos(ctx);

        let matched = self.assignment.matched();
        if matched * 2 < n {
            analysis_log!(ctx.log, WEIGHT, "rejected: {matched} of {n} pattern characters matched");
            return Ok(None);
        }

        if !self.estimate_orders(ctx)? {
            return Ok(None);
        }

        let weight = WeightInput {
            pattern_len: n,
            variant_len: self.variant.len(),
            assignment: &self.assignment,
            typos: &self.typos,
            positions: self.positions.positions(),
            clusters: &self.clusters,
            orders: &self.orders,
        }
        .compute(ctx.policy, &mut self.gaps, ctx.log)?;
        Ok(Some(weight))
    }

    /// Return every pooled object and reset all buffers
    pub(crate) fn clear(&mut self, resources: &Resources) {
        if let Some(map) = self.assignment.take_map() {
            resources.arrays.put(map);
        }
        resources.clusters.give_back_all(&mut self.candidates);
        resources.clusters.give_back_all(&mut self.clusters);
        resources.typos.give_back_all(&mut self.typos);
        self.pattern.clear();
        self.variant.clear();
        self.positions.clear();
        self.single.clear();
        self.orders.clear();
        self.gaps.clear();
    }

    /// Committed clusters
    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    /// Committed variant positions, ascending
    pub fn positions(&self) -> &[usize] {
        self.positions.positions()
    }

    /// Typo matches recorded for the last run
    pub fn typos(&self) -> &[Typo] {
        &self.typos
    }

    /// Longest-first, conflict-free selection of the Step 1 candidates
    fn commit_clusters(&mut self, ctx: &Context<'_>) -> Result<()> {
        let pool = &ctx.resources.clusters;
        let resolver = ClusterResolver::new(ctx.policy, &self.pattern, &self.variant);

        self.candidates.sort_by(|a, b| {
            b.len()
                .cmp(&a.len())
                .then(a.pattern_start().cmp(&b.pattern_start()))
                .then(a.variant_start().cmp(&b.variant_start()))
        });

        for candidate in self.candidates.drain(..) {
            let Some(index) = self.clusters.iter().position(|c| c.conflicts_with(&candidate)) else {
                analysis_log!(
                    ctx.log,
                    POSITIONS_CLUSTERS,
                    "commit p[{}..={}] -> v[{}..={}]",
                    candidate.pattern_start(),
                    candidate.pattern_end(),
                    candidate.variant_start(),
                    candidate.variant_end()
                );
                for m in candidate.matches() {
                    self.assignment.assign(m.pattern, m.variant, m.kind);
                    self.positions.add(m.variant);
                }
                self.clusters.push(candidate);
                continue;
            };

            let outranked = self
                .clusters
                .iter()
                .any(|c| c.len() > candidate.len() && c.conflicts_with(&candidate));
            if outranked || resolver.compare(&self.clusters[index], &candidate) == Preference::PreferLeft {
                pool.give_back(candidate);
                continue;
            }

            let committed = &self.clusters[index];
            let stored = self.positions.positions().len();
            let adjustment = self.positions.adjust_to(stored - committed.len() + candidate.len());
            let blocked = self
                .clusters
                .iter()
                .enumerate()
                .any(|(other, c)| other != index && c.conflicts_with(&candidate));
            if blocked {
                analysis_log!(
                    ctx.log,
                    POSITIONS_CLUSTERS,
                    "keep v[{}..={}]: v[{}..={}] overlaps another cluster",
                    committed.variant_start(),
                    committed.variant_end(),
                    candidate.variant_start(),
                    candidate.variant_end()
                );
                self.positions.teardown(adjustment);
                pool.give_back(candidate);
                continue;
            }

            let removed = self.positions.remove_cluster(committed.variant_start(), committed.len());
            if removed != committed.len() {
                self.positions.teardown(adjustment);
                return Err(AnalysisError::Invariant(format!(
                    "removed {removed} positions of a {}-long cluster at v[{}]",
                    committed.len(),
                    committed.variant_start()
                )));
            }
            for m in committed.matches() {
                self.assignment.unassign(m.pattern);
            }
            for m in candidate.matches() {
                self.assignment.assign(m.pattern, m.variant, m.kind);
                self.positions.add(m.variant);
            }
            self.positions.commit(adjustment)?;

            analysis_log!(
                ctx.log,
                POSITIONS_CLUSTERS,
                "replace v[{}..={}] by v[{}..={}]",
                committed.variant_start(),
                committed.variant_end(),
                candidate.variant_start(),
                candidate.variant_end()
            );
            let replaced = std::mem::replace(&mut self.clusters[index], candidate);
            pool.give_back(replaced);
        }
        Ok(())
    }

    fn record_typos(&mut self, ctx: &Context<'_>) {
        for (p, v, kind) in self.assignment.pairs() {
            if kind.is_typo() {
                let mut typo = ctx.resources.typos.take();
                typo.set(v, p, self.pattern[p]);
                self.typos.push(typo);
            }
        }
    }

    /// Feed the matched pairs to the estimator; returns whether it accepts them
    fn estimate_orders(&mut self, ctx: &Context<'_>) -> Result<bool> {
        let mut pairs = self.assignment.pairs();
        let Some((p, v, _)) = pairs.next() else {
            return Ok(false);
        };
        self.orders.set(p as i32, v as i32);
        for (p, v, _) in pairs {
            self.orders.add(p as i32, v as i32)?;
        }

        let bonus = row_bonus(self.single.uninterrupted_row(), &self.assignment);
        self.orders.correlate_quality(bonus);

        let (total, threshold) = (self.orders.quality_total(), self.orders.quality_threshold());
        analysis_log!(
            ctx.log,
            ORDERS,
            "{} pairs, gaps p={} v={}, quality {total} (threshold {threshold})",
            self.orders.len(),
            self.orders.pattern_gap_sum(),
            self.orders.variant_gap_sum()
        );
        Ok(self.orders.is_ok())
    }
}

/// Length of the captured Step 2 row minus one, when the row is a straight
/// diagonal: consecutive in the variant and in the pattern.
fn row_bonus(row: &[usize], assignment: &Assignment) -> i32 {
    let pattern_of = |v: usize| assignment.pairs().find(|&(_, pv, _)| pv == v).map(|(p, _, _)| p);
    let diagonal = row.windows(2).all(|w| {
        w[0] + 1 == w[1] && matches!((pattern_of(w[0]), pattern_of(w[1])), (Some(a), Some(b)) if a + 1 == b)
    });
    if diagonal {
        row.len().saturating_sub(1) as i32
    } else {
        0
    }
}

fn normalize(into: &mut Vec<char>, text: &str, case_sensitive: bool) {
    into.clear();
    if case_sensitive {
        into.extend(text.chars());
    } else {
        into.extend(text.chars().flat_map(char::to_lowercase));
    }
}
