use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::models::invoice::InvoicePage;

/// Path of the invoice list view; every invoice mutation revalidates it.
pub const INVOICES_PATH: &str = "/dashboard/invoices";

/// Variants kept per path. Fills beyond this are skipped until the next
/// revalidation.
pub const MAX_VARIANTS_PER_PATH: usize = 256;

/// Cached pages of the invoice list, one variant per query and page.
pub type InvoiceListCache = RouteCache<Arc<InvoicePage>>;

/// In-process cache of view data keyed by route path.
///
/// Each path holds any number of variants (for the invoice list: one per
/// search query and page). `revalidate_path` drops every variant of a path at
/// once, so the next request recomputes it from the store.
///
/// Readers that fill the cache take a [`generation`](Self::generation) before
/// reading the store and hand it back to [`put_if_fresh`](Self::put_if_fresh);
/// a revalidation in between discards the fill.
pub struct RouteCache<V> {
    inner: Arc<Mutex<CacheState<V>>>,
    max_variants: usize,
}

struct CacheState<V> {
    entries: HashMap<String, HashMap<String, V>>,
    invalidations: HashMap<String, u64>,
}

impl<V> Clone for RouteCache<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            max_variants: self.max_variants,
        }
    }
}

impl<V: Clone> Default for RouteCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone> RouteCache<V> {
    pub fn new() -> Self {
        Self::with_max_variants(MAX_VARIANTS_PER_PATH)
    }

    pub fn with_max_variants(max_variants: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(CacheState {
                entries: HashMap::new(),
                invalidations: HashMap::new(),
            })),
            max_variants,
        }
    }

    pub fn get(&self, path: &str, variant: &str) -> Option<V> {
        let state = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        state.entries.get(path).and_then(|v| v.get(variant)).cloned()
    }

    /// Current generation of `path`; changes on every revalidation.
    pub fn generation(&self, path: &str) -> u64 {
        self.invalidation_count(path)
    }

    /// Store `value` unless `path` was revalidated since `generation` was
    /// taken, or the path already holds the maximum number of variants.
    /// Returns whether the value was stored.
    pub fn put_if_fresh(&self, path: &str, variant: &str, generation: u64, value: V) -> bool {
        let mut state = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        let current = state.invalidations.get(path).copied().unwrap_or(0);
        if current != generation {
            log::debug!("Skipped stale fill of {path} ({variant})");
            return false;
        }

        let variants = state.entries.entry(path.to_string()).or_default();
        if variants.len() >= self.max_variants && !variants.contains_key(variant) {
            return false;
        }
        variants.insert(variant.to_string(), value);
        true
    }

    /// Unconditional fill, still bounded per path.
    pub fn put(&self, path: &str, variant: &str, value: V) {
        let generation = self.generation(path);
        self.put_if_fresh(path, variant, generation, value);
    }

    /// Mark everything cached for `path` stale.
    pub fn revalidate_path(&self, path: &str) {
        let mut state = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        state.entries.remove(path);
        *state.invalidations.entry(path.to_string()).or_insert(0) += 1;
        log::debug!("Revalidated {path}");
    }

    /// How many times `path` has been revalidated since startup.
    pub fn invalidation_count(&self, path: &str) -> u64 {
        let state = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        state.invalidations.get(path).copied().unwrap_or(0)
    }

    pub fn variant_count(&self, path: &str) -> usize {
        let state = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        state.entries.get(path).map_or(0, HashMap::len)
    }
}
