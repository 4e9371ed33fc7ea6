//! Cache of fixed-size `i32` arrays keyed by length.
//!
//! Arrays are handed out already filled with the configured sentinel. The
//! bucket map is guarded by a shared `RwLock`, and each bucket by its own
//! `Mutex`, so concurrent borrowers of different sizes never contend on a
//! single lock.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

type Bucket = Arc<Mutex<Vec<Box<[i32]>>>>;

/// Length-keyed array cache
#[derive(Debug)]
pub struct ArraysCache {
    sentinel: i32,
    buckets: RwLock<HashMap<usize, Bucket>>,
}

impl Default for ArraysCache {
    fn default() -> Self {
        Self::new(-1)
    }
}

impl ArraysCache {
    /// Create an empty cache whose arrays are filled with `sentinel`
    pub fn new(sentinel: i32) -> Self {
        Self {
            sentinel,
            buckets: RwLock::new(HashMap::new()),
        }
    }

    /// The value every free array is filled with
    pub fn sentinel(&self) -> i32 {
        self.sentinel
    }

    /// Borrow an array of `size` elements, all equal to the sentinel.
    ///
    /// The array must be handed back through [`ArraysCache::put`] once the
    /// caller is done with it, otherwise the cache allocates a new one next time.
    pub fn get(&self, size: usize) -> Box<[i32]> {
        let bucket = self
            .buckets
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&size)
            .cloned();

        let reused = bucket.and_then(|bucket| bucket.lock().unwrap_or_else(PoisonError::into_inner).pop());
        match reused {
            Some(array) => array,
            None => {
                trace!("allocating array of size {size}");
                vec![self.sentinel; size].into_boxed_slice()
            }
        }
    }

    /// Return an array to its size bucket, resetting it to the sentinel.
    pub fn put(&self, mut array: Box<[i32]>) {
        array.fill(self.sentinel);
        let bucket = self.bucket(array.len());
        bucket.lock().unwrap_or_else(PoisonError::into_inner).push(array);
    }

    /// Number of free arrays of the given size
    pub fn free(&self, size: usize) -> usize {
        self.buckets
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&size)
            .map_or(0, |bucket| bucket.lock().unwrap_or_else(PoisonError::into_inner).len())
    }

    fn bucket(&self, size: usize) -> Bucket {
        if let Some(bucket) = self
            .buckets
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&size)
        {
            return bucket.clone();
        }
        self.buckets
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(size)
            .or_default()
            .clone()
    }
}
