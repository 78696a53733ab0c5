//! Counter-based identifier allocation.

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashSet;

use crate::infrastructure::persistence::StoreError;

/// One identifier space: a wrapping counter over `1..=max` plus the set of
/// values handed out but not yet written to the backing map.
///
/// A candidate is skipped if it is still outstanding or if the backing map
/// already holds it. Zero is never handed out.
#[derive(Debug)]
pub struct UidSpace {
    name: &'static str,
    max: u64,
    attempts: usize,
    cursor: AtomicU64,
    outstanding: DashSet<u64>,
}

impl UidSpace {
    /// `resume_after` is the highest value already in use, so allocation
    /// continues above it.
    pub fn new(name: &'static str, max: u64, resume_after: u64, attempts: usize) -> Self {
        Self {
            name,
            max,
            attempts,
            cursor: AtomicU64::new(resume_after.min(max)),
            outstanding: DashSet::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    fn next_candidate(&self) -> u64 {
        let step = |current: u64| if current >= self.max { 1 } else { current + 1 };
        // fetch_update only fails when the closure returns None
        match self
            .cursor
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |c| Some(step(c)))
        {
            Ok(previous) | Err(previous) => step(previous),
        }
    }

    /// Find a value that is neither outstanding nor `in_use`.
    pub fn allocate<F>(&self, mut in_use: F) -> Result<u64, StoreError>
    where
        F: FnMut(u64) -> Result<bool, StoreError>,
    {
        for attempt in 0..self.attempts {
            let candidate = self.next_candidate();
            if self.outstanding.contains(&candidate) || in_use(candidate)? {
                tracing::debug!(space = self.name, candidate, attempt, "Identifier taken, retrying");
                continue;
            }
            if self.outstanding.insert(candidate) {
                return Ok(candidate);
            }
        }
        tracing::error!(space = self.name, attempts = self.attempts, "Identifier space exhausted");
        Err(StoreError::exhausted(self.name, self.attempts))
    }

    /// The value now lives in the backing map, which guards it from here on.
    pub fn settle(&self, value: u64) {
        self.outstanding.remove(&value);
    }

    pub fn outstanding(&self) -> usize {
        self.outstanding.len()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn values_are_distinct_and_skip_zero() {
        let space = UidSpace::new("test", 5, 0, 16);
        let values: Vec<u64> = (0..5).map(|_| space.allocate(|_| Ok(false)).unwrap()).collect();
        assert_eq!(values, vec![1, 2, 3, 4, 5]);
        assert!(space.allocate(|_| Ok(false)).unwrap_err().is_exhausted());
    }

    #[test]
    fn counter_wraps_past_settled_values() {
        let space = UidSpace::new("test", 3, 2, 8);
        assert_eq!(space.allocate(|_| Ok(false)).unwrap(), 3);
        space.settle(3);
        assert_eq!(space.allocate(|_| Ok(false)).unwrap(), 1);
    }

    #[test]
    fn persisted_values_are_skipped() {
        let taken: HashSet<u64> = [1, 2, 4].into();
        let space = UidSpace::new("test", 10, 0, 10);
        let first = space.allocate(|v| Ok(taken.contains(&v))).unwrap();
        let second = space.allocate(|v| Ok(taken.contains(&v))).unwrap();
        assert_eq!((first, second), (3, 5));
    }

    #[test]
    fn lookup_errors_propagate() {
        let space = UidSpace::new("test", 10, 0, 10);
        let err = space
            .allocate(|_| Err(StoreError::Closed))
            .unwrap_err();
        assert!(err.is_closed());
        assert_eq!(space.outstanding(), 0);
    }
}
