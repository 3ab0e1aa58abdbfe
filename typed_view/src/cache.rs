use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use parking_lot::Mutex;
use tracing::debug;

use crate::ViewError;
use crate::layout::{SwapLayout, TypeLayout, compute_layout};

/// Per-type layout cache.
///
/// One mutex guards lookup-then-insert, so each layout is computed at most
/// once per cache even under concurrent use. Entries are never evicted.
#[derive(Debug, Default)]
pub struct LayoutCache {
    entries: Mutex<HashMap<TypeId, Arc<TypeLayout>>>,
}

impl LayoutCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide cache used by [`SwapLayout::swap_bytes`].
    pub fn global() -> &'static LayoutCache {
        static GLOBAL: OnceLock<LayoutCache> = OnceLock::new();
        GLOBAL.get_or_init(LayoutCache::new)
    }

    /// Returns the cached layout of `T`, computing it on first use.
    ///
    /// Invalid layouts are reported every time and never cached.
    pub fn get_or_compute<T: SwapLayout>(&self) -> Result<Arc<TypeLayout>, ViewError> {
        let mut entries = self.entries.lock();
        if let Some(layout) = entries.get(&TypeId::of::<T>()) {
            return Ok(Arc::clone(layout));
        }

        let layout = Arc::new(compute_layout::<T>()?);
        debug!(
            type_name = layout.type_name(),
            spans = layout.widths().len(),
            "layout cache miss"
        );
        entries.insert(TypeId::of::<T>(), Arc::clone(&layout));
        Ok(layout)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn computes_once_per_type() {
        let cache = LayoutCache::new();
        assert!(cache.is_empty());

        let a = cache.get_or_compute::<[u32; 2]>().unwrap();
        let b = cache.get_or_compute::<[u32; 2]>().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 1);

        cache.get_or_compute::<u16>().unwrap();
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn shared_across_threads() {
        let cache = Arc::new(LayoutCache::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || cache.get_or_compute::<[u64; 4]>().unwrap())
            })
            .collect();

        let layouts: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(layouts.iter().all(|l| Arc::ptr_eq(l, &layouts[0])));
        assert_eq!(cache.len(), 1);
    }
}
