//! Sorted set of committed variant positions with previewable size changes.

use crate::error::{AnalysisError, Result};

/// A previewed size change, created by [`ClusteredPositions::adjust_to`].
///
/// The token must be consumed exactly once, either by
/// [`ClusteredPositions::teardown`] to roll the preview back or by
/// [`ClusteredPositions::commit`] once the storage really changed.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a size preview must be torn down or committed"]
pub struct Adjustment {
    delta: isize,
    target: usize,
}

impl Adjustment {
    /// Signed size change recorded by the preview
    pub fn delta(&self) -> isize {
        self.delta
    }
}

/// Variant positions of the current best match, always ascending.
#[derive(Debug, Default, Clone)]
pub struct ClusteredPositions {
    positions: Vec<usize>,
    pending: isize,
}

impl ClusteredPositions {
    /// Insert a position, keeping the storage sorted
    pub fn add(&mut self, position: usize) {
        self.positions.push(position);
        self.positions.sort_unstable();
    }

    /// Whether `position` is stored
    pub fn contains(&self, position: usize) -> bool {
        self.positions.binary_search(&position).is_ok()
    }

    /// Remove one occurrence of `position`; returns whether it was stored
    pub fn remove_position(&mut self, position: usize) -> bool {
        match self.positions.binary_search(&position) {
            Ok(index) => {
                self.positions.remove(index);
                true
            }
            Err(_) => false,
        }
    }

    /// Remove every given position; returns how many were stored
    pub fn remove_positions(&mut self, positions: &[usize]) -> usize {
        positions.iter().filter(|&&p| self.remove_position(p)).count()
    }

    /// Remove the `length` smallest stored positions that are `>= first`.
    ///
    /// Returns how many positions were removed, which is
    /// `min(length, number of stored positions >= first)`.
    pub fn remove_cluster(&mut self, first: usize, length: usize) -> usize {
        let start = self.positions.partition_point(|&p| p < first);
        let end = (start + length).min(self.positions.len());
        self.positions.drain(start..end);
        end - start
    }

    /// Preview the set having `size` positions without touching the storage
    pub fn adjust_to(&mut self, size: usize) -> Adjustment {
        let delta = size as isize - self.positions.len() as isize;
        self.pending += delta;
        Adjustment { delta, target: size }
    }

    /// Roll back a preview
    pub fn teardown(&mut self, adjustment: Adjustment) {
        self.pending -= adjustment.delta;
    }

    /// Settle a preview after the storage was changed to the previewed size
    pub fn commit(&mut self, adjustment: Adjustment) -> Result<()> {
        self.pending -= adjustment.delta;
        if self.positions.len() != adjustment.target {
            return Err(AnalysisError::Invariant(format!(
                "committed {} positions, previewed {}",
                self.positions.len(),
                adjustment.target
            )));
        }
        Ok(())
    }

    /// Stored size plus any pending preview
    pub fn count(&self) -> usize {
        (self.positions.len() as isize + self.pending).max(0) as usize
    }

    /// The stored positions, ascending
    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    /// Drop every position and any pending preview
    pub fn clear(&mut self) {
        self.positions.clear();
        self.pending = 0;
    }
}
