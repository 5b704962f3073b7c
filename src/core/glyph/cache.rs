//! Per-glyph resolution cache with compute-once population.

use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use fxhash::FxHashMap;

/// Outcome of resolving one glyph against the asset tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    /// Sanitized SVG text ready for encoding
    Fragment(String),
    /// No usable asset; the glyph passes through unchanged
    Unresolved,
}

/// Write-once-per-key, read-many cache.
///
/// Reads of populated entries take a shared lock on the map and a wait-free
/// `OnceLock` read. First population of a key is serialized per key through
/// `OnceLock::get_or_init`, so two concurrent conversions never traverse the
/// asset tree twice for the same glyph, and unrelated glyphs never wait on
/// each other. The cache lives exactly as long as its engine.
#[derive(Debug, Default)]
pub struct SubstitutionCache {
    entries: RwLock<FxHashMap<String, Arc<OnceLock<Resolved>>>>,
}

impl SubstitutionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a glyph, resolving it at most once across all callers.
    pub fn get_or_resolve<F>(&self, glyph: &str, resolve: F) -> Resolved
    where
        F: FnOnce() -> Resolved,
    {
        let slot = self.slot_for(glyph);
        slot.get_or_init(resolve).clone()
    }

    fn slot_for(&self, glyph: &str) -> Arc<OnceLock<Resolved>> {
        {
            let entries = self
                .entries
                .read()
                .unwrap_or_else(PoisonError::into_inner);
            if let Some(slot) = entries.get(glyph) {
                return slot.clone();
            }
        }
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        entries
            .entry(glyph.to_string())
            .or_insert_with(|| Arc::new(OnceLock::new()))
            .clone()
    }

    /// Glyphs that resolved to nothing, sorted for stable reporting.
    pub fn unresolved(&self) -> Vec<String> {
        let entries = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        let mut misses: Vec<String> = entries
            .iter()
            .filter(|(_, slot)| matches!(slot.get(), Some(Resolved::Unresolved)))
            .map(|(glyph, _)| glyph.clone())
            .collect();
        misses.sort();
        misses
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Barrier;

    #[test]
    fn test_resolves_once_per_key() {
        let cache = SubstitutionCache::new();
        let calls = AtomicUsize::new(0);

        for _ in 0..5 {
            let outcome = cache.get_or_resolve("\u{2b50}", || {
                calls.fetch_add(1, Ordering::SeqCst);
                Resolved::Unresolved
            });
            assert_eq!(outcome, Resolved::Unresolved);
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_distinct_keys_resolve_independently() {
        let cache = SubstitutionCache::new();
        cache.get_or_resolve("a", || Resolved::Fragment("<svg/>".into()));
        cache.get_or_resolve("b", || Resolved::Unresolved);

        assert_eq!(
            cache.get_or_resolve("a", || Resolved::Unresolved),
            Resolved::Fragment("<svg/>".into())
        );
        assert_eq!(cache.unresolved(), vec!["b".to_string()]);
    }

    #[test]
    fn test_concurrent_population_is_single_flight() {
        let cache = Arc::new(SubstitutionCache::new());
        let calls = Arc::new(AtomicUsize::new(0));
        let barrier = Arc::new(Barrier::new(8));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = cache.clone();
                let calls = calls.clone();
                let barrier = barrier.clone();
                std::thread::spawn(move || {
                    barrier.wait();
                    cache.get_or_resolve("\u{1f527}", || {
                        calls.fetch_add(1, Ordering::SeqCst);
                        Resolved::Fragment("<svg/>".into())
                    })
                })
            })
            .collect();

        for handle in handles {
            let outcome = handle.join().expect("thread joins");
            assert_eq!(outcome, Resolved::Fragment("<svg/>".into()));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
