//! The matching and scoring pipeline.
//!
//! Scoring one pattern against one variant runs these stages in order:
//!
//! 1. [`position_matcher`] finds candidate clusters of consecutive matches.
//! 2. Conflicting clusters are arbitrated by [`cluster::ClusterResolver`] and
//!    the survivors committed to [`clustered_positions::ClusteredPositions`].
//! 3. [`typo_loop`] recovers the pattern characters still unmatched.
//! 4. [`orders::OrdersEstimator`] accepts or rejects the match.
//! 5. [`weight`] assembles the final weight.
//!
//! The [`Analyzer`] drives the stages. It keeps one [`unit::AnalysisUnit`] per
//! worker thread so repeated calls allocate nothing once warmed up.

pub mod cluster;
pub mod clustered_positions;
pub mod orders;
pub mod policy;
pub mod position_matcher;
pub mod single_positions;
pub mod smart_mean;
pub mod typo;
pub mod typo_loop;
pub mod unit;
pub mod weight;

use std::cell::RefCell;
use std::sync::Arc;

use rayon::prelude::*;
use thread_local::ThreadLocal;

use self::policy::{DefaultPolicy, ScoringPolicy};
use self::unit::{AnalysisUnit, Context};
use crate::error::Result;
use crate::log_category::LogCategories;
use crate::options::AnalyzerOptions;
use crate::output::{Output, rank};
use crate::pool::Resources;

//------------------------------------------------------------------------------
/// Builder for [`Analyzer`]
#[derive(Default)]
pub struct AnalyzerBuilder {
    options: AnalyzerOptions,
    policy: Option<Arc<dyn ScoringPolicy>>,
    resources: Option<Arc<Resources>>,
}

impl AnalyzerBuilder {
    /// Analyzer settings
    pub fn options(mut self, options: AnalyzerOptions) -> Self {
        self.options = options;
        self
    }

    /// Scoring policy, [`DefaultPolicy`] when unset
    pub fn policy(mut self, policy: Arc<dyn ScoringPolicy>) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Pools to borrow scratch objects from.
    ///
    /// Analyzers built with the same resources share their pools. When unset,
    /// a private set is created with the configured array sentinel.
    pub fn resources(mut self, resources: Arc<Resources>) -> Self {
        self.resources = Some(resources);
        self
    }

    /// Build the analyzer
    pub fn build(self) -> Analyzer {
        let options = self.options;
        let resources = self
            .resources
            .unwrap_or_else(|| Arc::new(Resources::with_sentinel(options.array_sentinel)));
        if resources.arrays.sentinel() != options.array_sentinel {
            warn!(
                "shared array cache uses sentinel {}, ignoring configured {}",
                resources.arrays.sentinel(),
                options.array_sentinel
            );
        }
        let policy = self.policy.unwrap_or_else(|| Arc::new(DefaultPolicy));
        debug!("analyzer built with {options:?}");

        Analyzer {
            separators: options.separators.chars().collect(),
            log: options.log_categories(),
            options,
            policy,
            resources,
            units: ThreadLocal::new(),
        }
    }
}

//------------------------------------------------------------------------------
/// Scores variants against patterns.
///
/// An analyzer is `Send + Sync` and meant to be shared between worker
/// threads; each thread gets its own scratch [`AnalysisUnit`].
pub struct Analyzer {
    options: AnalyzerOptions,
    separators: Vec<char>,
    log: LogCategories,
    policy: Arc<dyn ScoringPolicy>,
    resources: Arc<Resources>,
    units: ThreadLocal<RefCell<AnalysisUnit>>,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Analyzer {
    /// Returns a default builder for chaining
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::default()
    }

    /// Analyzer with the given options, the default policy and private pools
    pub fn new(options: AnalyzerOptions) -> Self {
        Self::builder().options(options).build()
    }

    /// Settings the analyzer was built with
    pub fn options(&self) -> &AnalyzerOptions {
        &self.options
    }

    /// Pools shared by every unit of this analyzer
    pub fn resources(&self) -> &Arc<Resources> {
        &self.resources
    }

    /// Weight of `variant` against `pattern`, `None` when it does not qualify
    pub fn weight(&self, pattern: &str, variant: &str) -> Result<Option<f32>> {
        let ctx = Context {
            case_sensitive: self.options.case_sensitive,
            separators: &self.separators,
            min_cluster_len: self.options.min_cluster_len,
            log: self.log,
            policy: self.policy.as_ref(),
            resources: &self.resources,
        };
        let mut unit = self.units.get_or(|| RefCell::new(AnalysisUnit::default())).borrow_mut();
        let result = unit.run(pattern, variant, &ctx);
        unit.clear(&self.resources);
        if let Err(err) = &result {
            error!("analysis of {variant:?} against {pattern:?} failed: {err}");
        }
        result
    }

    /// Score a single variant
    pub fn analyze(&self, pattern: &str, variant: &str) -> Result<Option<Output>> {
        self.analyze_item(pattern, variant, 0, None)
    }

    /// Score a variant carrying its input position and caller metadata
    pub fn analyze_item<M>(
        &self,
        pattern: &str,
        variant: &str,
        original_index: usize,
        metadata: Option<M>,
    ) -> Result<Option<Output<M>>> {
        Ok(self
            .weight(pattern, variant)?
            .map(|weight| Output::new(variant, original_index, weight, metadata)))
    }

    /// Score every variant in parallel and return the accepted ones, ranked
    pub fn analyze_all<S>(&self, pattern: &str, variants: &[S]) -> Result<Vec<Output>>
    where
        S: AsRef<str> + Sync,
    {
        trace!("analyze_all start, total: {}", variants.len());
        let mut outputs = variants
            .par_iter()
            .enumerate()
            .filter_map(|(index, variant)| {
                self.analyze_item(pattern, variant.as_ref(), index, None)
                    .transpose()
            })
            .collect::<Result<Vec<_>>>()?;
        rank(&mut outputs);
        trace!("analyze_all stop, total accepted: {}", outputs.len());
        Ok(outputs)
    }
}
