//! Render cache keyed by node identity and content fingerprint.
//!
//! Purely a performance layer: a miss is always answered by materializing
//! again, so cold and warm caches render the same frame.

use super::RenderedNode;
use std::collections::HashMap;
use std::ops::Range;
use std::sync::Arc;
use virtdoc_core::text::truncate_chars;
use virtdoc_core::{Node, NodeId};

/// Cheap content key: node id plus a hash of the leading content chars.
///
/// Edits past the truncation bound leave the fingerprint unchanged, which is
/// why content updates also call [`RenderCache::invalidate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    id: NodeId,
    prefix: blake3::Hash,
}

impl Fingerprint {
    /// Fingerprint of `node` over its first `chars` chars.
    pub fn of(node: &Node, chars: usize) -> Self {
        Self {
            id: node.id(),
            prefix: blake3::hash(truncate_chars(node.content(), chars).as_bytes()),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }
}

#[derive(Debug)]
struct CachedRender {
    fingerprint: Fingerprint,
    rendered: Arc<RenderedNode>,
    last_index: usize,
}

/// Hit/miss counters since the last [`RenderCache::take_stats`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// Memoized node renderings.
///
/// Holds at most one entry per node id: storing a new fingerprint for an id
/// replaces the stale one, so lookups by `(id, fingerprint)` and
/// invalidation by id stay O(1).
#[derive(Debug)]
pub struct RenderCache {
    entries: HashMap<NodeId, CachedRender>,
    fingerprint_chars: usize,
    max_entries: usize,
    hot: Range<usize>,
    stats: CacheStats,
}

impl RenderCache {
    pub fn new(fingerprint_chars: usize, max_entries: usize) -> Self {
        Self {
            entries: HashMap::new(),
            fingerprint_chars: fingerprint_chars.max(1),
            max_entries: max_entries.max(1),
            hot: 0..0,
            stats: CacheStats::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fingerprint of `node` under this cache's truncation bound.
    pub fn fingerprint(&self, node: &Node) -> Fingerprint {
        Fingerprint::of(node, self.fingerprint_chars)
    }

    /// Look up the rendering of `node`, now sitting at `index`.
    ///
    /// A hit re-anchors the entry to `index`; the caller derives the pixel
    /// offset from it.
    pub fn get(&mut self, node: &Node, index: usize) -> Option<Arc<RenderedNode>> {
        let fingerprint = self.fingerprint(node);
        match self.entries.get_mut(&node.id()) {
            Some(entry) if entry.fingerprint == fingerprint => {
                entry.last_index = index;
                self.stats.hits = self.stats.hits.saturating_add(1);
                Some(Arc::clone(&entry.rendered))
            }
            _ => {
                self.stats.misses = self.stats.misses.saturating_add(1);
                None
            }
        }
    }

    /// Store the rendering of `node` at `index`.
    pub fn put(&mut self, node: &Node, index: usize, rendered: Arc<RenderedNode>) {
        if !self.entries.contains_key(&node.id()) {
            self.evict_if_full();
        }
        let fingerprint = self.fingerprint(node);
        self.entries.insert(
            node.id(),
            CachedRender {
                fingerprint,
                rendered,
                last_index: index,
            },
        );
    }

    /// Drop any entry for `id`, whatever its fingerprint.
    pub fn invalidate(&mut self, id: NodeId) {
        self.entries.remove(&id);
    }

    /// Drop entries for nodes that left the document.
    pub fn evict<'a>(&mut self, ids: impl IntoIterator<Item = &'a NodeId>) {
        for id in ids {
            self.entries.remove(id);
        }
    }

    /// Keep only entries whose id passes `keep`.
    pub fn retain_ids<F>(&mut self, mut keep: F)
    where
        F: FnMut(NodeId) -> bool,
    {
        self.entries.retain(|id, _| keep(*id));
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Index range whose entries survive capacity eviction first.
    pub fn set_hot_range(&mut self, hot: Range<usize>) {
        self.hot = hot;
    }

    /// Index an entry was last anchored at.
    pub fn last_index(&self, id: NodeId) -> Option<usize> {
        self.entries.get(&id).map(|entry| entry.last_index)
    }

    /// Returns and resets the hit/miss counters.
    pub fn take_stats(&mut self) -> CacheStats {
        std::mem::take(&mut self.stats)
    }

    fn evict_if_full(&mut self) {
        if self.entries.len() < self.max_entries {
            return;
        }
        let hot = self.hot.clone();
        self.entries
            .retain(|_, entry| hot.contains(&entry.last_index));
        if self.entries.len() >= self.max_entries {
            let remove_count = (self.max_entries / 5).max(1);
            let keys_to_remove: Vec<NodeId> =
                self.entries.keys().take(remove_count).copied().collect();
            for key in keys_to_remove {
                self.entries.remove(&key);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::render_node;
    use virtdoc_core::{Document, NodeSpec};

    fn rendered(node: &Node) -> Arc<RenderedNode> {
        Arc::new(render_node(node, 30.0))
    }

    #[test]
    fn get_misses_then_hits_after_put() {
        let doc = Document::new(vec![NodeSpec::text("alpha"), NodeSpec::formula("x")]);
        let mut cache = RenderCache::new(50, 16);
        let node = &doc.nodes()[0];

        assert!(cache.get(node, 0).is_none());
        cache.put(node, 0, rendered(node));
        let hit = cache.get(node, 3).expect("hit");
        assert_eq!(hit.label, "alpha");
        assert_eq!(cache.last_index(node.id()), Some(3));
        assert_eq!(cache.take_stats(), CacheStats { hits: 1, misses: 1 });
        assert_eq!(cache.take_stats(), CacheStats::default());
    }

    #[test]
    fn fingerprint_detects_prefix_edits_but_not_tail_edits() {
        let mut doc = Document::new(vec![NodeSpec::text("0123456789")]);
        let id = doc.nodes()[0].id();
        let mut cache = RenderCache::new(4, 16);
        let node = &doc.nodes()[0];
        cache.put(node, 0, rendered(node));

        doc.update_node(id, "0123-changed-tail").expect("update");
        assert!(cache.get(&doc.nodes()[0], 0).is_some());

        doc.update_node(id, "X123").expect("update");
        assert!(cache.get(&doc.nodes()[0], 0).is_none());
    }

    #[test]
    fn invalidate_drops_entry_regardless_of_fingerprint() {
        let doc = Document::new(vec![NodeSpec::text("a"), NodeSpec::text("b")]);
        let mut cache = RenderCache::new(50, 16);
        for (index, node) in doc.nodes().iter().enumerate() {
            cache.put(node, index, rendered(node));
        }
        cache.invalidate(doc.nodes()[0].id());
        assert_eq!(cache.len(), 1);
        assert!(cache.get(&doc.nodes()[0], 0).is_none());
        assert!(cache.get(&doc.nodes()[1], 1).is_some());
    }

    #[test]
    fn capacity_eviction_prefers_entries_outside_hot_range() {
        let specs = (0..10).map(|i| NodeSpec::text(format!("n{i}"))).collect();
        let doc = Document::new(specs);
        let mut cache = RenderCache::new(50, 5);
        cache.set_hot_range(3..5);
        for (index, node) in doc.nodes().iter().enumerate().take(5) {
            cache.put(node, index, rendered(node));
        }
        assert_eq!(cache.len(), 5);

        let extra = &doc.nodes()[9];
        cache.put(extra, 9, rendered(extra));

        assert_eq!(cache.len(), 3);
        assert!(cache.last_index(doc.nodes()[3].id()).is_some());
        assert!(cache.last_index(doc.nodes()[4].id()).is_some());
        assert!(cache.last_index(extra.id()).is_some());
    }

    #[test]
    fn debug_output_lists_cached_entries() {
        let doc = Document::new(vec![NodeSpec::formula("E = mc^2")]);
        let mut cache = RenderCache::new(50, 16);
        let node = &doc.nodes()[0];
        cache.put(node, 0, rendered(node));

        let debug = format!("{cache:?}");
        assert!(debug.starts_with("RenderCache"), "{debug}");
        assert!(debug.contains("CachedRender"), "{debug}");
        assert!(debug.contains("Formula: E = mc^2"), "{debug}");
    }

    #[test]
    fn full_hot_cache_still_makes_room() {
        let specs = (0..4).map(|i| NodeSpec::text(format!("n{i}"))).collect();
        let doc = Document::new(specs);
        let mut cache = RenderCache::new(50, 3);
        cache.set_hot_range(0..4);
        for (index, node) in doc.nodes().iter().enumerate() {
            cache.put(node, index, rendered(node));
        }
        assert!(cache.len() <= 3);
        assert!(cache.last_index(doc.nodes()[3].id()).is_some());
    }
}
