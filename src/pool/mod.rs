//! Reusable scratch storage shared by analysis units.
//!
//! Two kinds of pools live here:
//! - [`ArraysCache`]: sentinel-filled `i32` arrays keyed by length.
//! - [`Pool`]: free-lists of [`Reusable`] records.
//!
//! Borrowing moves the value out of the pool, so the borrower holds the only
//! handle to it; returning moves it back in. There is no lifetime tracking: a
//! value that is never returned is simply lost to the pool.

mod arrays;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

pub use self::arrays::ArraysCache;
use crate::analysis::cluster::Cluster;
use crate::analysis::typo::{CandidatePosition, Typo};

/// A record that can be reset and handed out again
pub trait Reusable: Default + Send {
    /// Reset every field to its initial state
    fn clear(&mut self);
}

/// Free-list of reusable records
#[derive(Debug)]
pub struct Pool<T: Reusable> {
    free: Mutex<Vec<T>>,
    created: AtomicUsize,
}

impl<T: Reusable> Default for Pool<T> {
    fn default() -> Self {
        Self {
            free: Mutex::new(Vec::new()),
            created: AtomicUsize::new(0),
        }
    }
}

impl<T: Reusable> Pool<T> {
    /// Borrow a cleared record, creating one if the pool is empty
    pub fn take(&self) -> T {
        let reused = self.free.lock().unwrap_or_else(PoisonError::into_inner).pop();
        reused.unwrap_or_else(|| {
            self.created.fetch_add(1, Ordering::Relaxed);
            T::default()
        })
    }

    /// Clear a record and make it available again
    pub fn give_back(&self, mut value: T) {
        value.clear();
        self.free.lock().unwrap_or_else(PoisonError::into_inner).push(value);
    }

    /// Return every record of `values`, leaving it empty
    pub fn give_back_all(&self, values: &mut Vec<T>) {
        if values.is_empty() {
            return;
        }
        let mut free = self.free.lock().unwrap_or_else(PoisonError::into_inner);
        for mut value in values.drain(..) {
            value.clear();
            free.push(value);
        }
    }

    /// Number of records currently available
    pub fn free(&self) -> usize {
        self.free.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Number of records ever allocated by this pool
    pub fn created(&self) -> usize {
        self.created.load(Ordering::Relaxed)
    }
}

/// Every shared resource an analysis unit borrows from
#[derive(Debug, Default)]
pub struct Resources {
    /// Array cache for per-call lookup tables
    pub arrays: ArraysCache,
    /// Typo records
    pub typos: Pool<Typo>,
    /// Step 2 candidate records
    pub candidates: Pool<CandidatePosition>,
    /// Step 1 clusters
    pub clusters: Pool<Cluster>,
}

impl Resources {
    /// Create resources whose arrays are filled with `sentinel`
    pub fn with_sentinel(sentinel: i32) -> Self {
        Self {
            arrays: ArraysCache::new(sentinel),
            ..Default::default()
        }
    }
}
