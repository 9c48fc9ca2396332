use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::layout::connections::{Connection, LayoutPass};

/// Memoized layout passes keyed by pass parameters and row sizes.
///
/// A pass is a pure function of its key, so a cached entry is always
/// identical to a fresh computation.
#[derive(Debug, Default)]
pub struct LayoutCache {
    entries: HashMap<(LayoutPass, Vec<usize>), Arc<Vec<Connection>>>,
}

impl LayoutCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_compute(&mut self, pass: LayoutPass, rows: &[usize]) -> Arc<Vec<Connection>> {
        self.entries
            .entry((pass, rows.to_vec()))
            .or_insert_with(|| {
                debug!(seed = pass.seed, ?rows, "computing connection layout");
                Arc::new(pass.compute(rows))
            })
            .clone()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::connections::SeedPolicy;

    #[test]
    fn cached_equals_recomputed() {
        let mut cache = LayoutCache::new();
        let pass = LayoutPass::new(42);
        let rows = [10, 25, 25];

        let first = cache.get_or_compute(pass, &rows);
        let second = cache.get_or_compute(pass, &rows);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(*first, pass.compute(&rows));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn keys_include_policy_and_sizes() {
        let mut cache = LayoutCache::new();
        cache.get_or_compute(LayoutPass::new(42), &[10, 25, 25]);
        cache.get_or_compute(LayoutPass::new(42).with_policy(SeedPolicy::PerPair), &[10, 25, 25]);
        cache.get_or_compute(LayoutPass::new(42), &[10, 25]);
        cache.get_or_compute(LayoutPass::new(7), &[10, 25, 25]);
        assert_eq!(cache.len(), 4);
    }
}
