//! Scored, rankable results.

use std::cmp::Ordering;
use std::sync::Arc;

/// One accepted variant with its weight.
///
/// Outputs order by weight (lower first), then by original input position.
/// The weight never changes after creation; only the rank `index` is
/// assigned by [`rank`].
#[derive(Debug, Clone)]
pub struct Output<M = ()> {
    text: Arc<str>,
    original_index: usize,
    index: usize,
    weight: f32,
    metadata: Option<M>,
}

impl<M> Output<M> {
    /// Create an unranked output
    pub fn new(text: impl Into<Arc<str>>, original_index: usize, weight: f32, metadata: Option<M>) -> Self {
        Self {
            text: text.into(),
            original_index,
            index: original_index,
            weight,
            metadata,
        }
    }

    /// The variant as given to the analyzer
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Position of the variant in the input
    pub fn original_index(&self) -> usize {
        self.original_index
    }

    /// Rank after [`rank`]; equal to the original index before ranking
    pub fn index(&self) -> usize {
        self.index
    }

    /// Match weight, lower is better
    pub fn weight(&self) -> f32 {
        self.weight
    }

    /// Caller data attached to the variant
    pub fn metadata(&self) -> Option<&M> {
        self.metadata.as_ref()
    }

    /// Take the attached caller data
    pub fn into_metadata(self) -> Option<M> {
        self.metadata
    }
}

impl<M> PartialEq for Output<M> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<M> Eq for Output<M> {}

impl<M> PartialOrd for Output<M> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<M> Ord for Output<M> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight
            .total_cmp(&other.weight)
            .then(self.original_index.cmp(&other.original_index))
    }
}

/// Sort `outputs` best first and number them from 0
pub fn rank<M>(outputs: &mut [Output<M>]) {
    outputs.sort_unstable();
    for (index, output) in outputs.iter_mut().enumerate() {
        output.index = index;
    }
}
