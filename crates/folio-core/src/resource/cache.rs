//! Bounded cache of decoded image resources.

use std::num::NonZeroUsize;
use std::sync::Mutex;

use lru::LruCache;

use crate::types::ImageResource;

/// Default number of decoded resources kept in memory.
pub const DEFAULT_CAPACITY: usize = 32;

/// LRU cache from resolved absolute reference to its decoded resource.
///
/// Only successfully decoded resources belong here; failures are never
/// inserted, so a hit always carries an image and failed references are
/// retried on every request.
///
/// LRU operations require mutable access, so the map sits behind a coarse
/// mutex; critical sections are short (a lookup or an insert). That makes
/// concurrent `get`/`insert` safe when a loader is shared across threads,
/// but there is no cross-request deduplication: two concurrent misses for
/// the same reference may both fetch and decode, and the last insert wins.
#[derive(Debug)]
pub struct ResourceCache {
    inner: Mutex<LruCache<String, ImageResource>>,
}

impl ResourceCache {
    /// Create a cache holding at most `capacity` resources.
    pub fn new(capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity.max(1)).unwrap();
        Self {
            inner: Mutex::new(LruCache::new(cap)),
        }
    }

    /// Look up a resource, marking it most-recently-used on a hit.
    pub fn get(&self, key: &str) -> Option<ImageResource> {
        self.inner.lock().unwrap().get(key).cloned()
    }

    /// Insert a resource, evicting the least-recently-used entry when at
    /// capacity.
    pub fn insert(&self, key: String, resource: ImageResource) {
        debug_assert!(resource.has_image(), "only decoded resources are cached");
        self.inner.lock().unwrap().put(key, resource);
    }

    /// Number of cached resources.
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether a key is present, without touching recency order.
    #[cfg(test)]
    fn contains(&self, key: &str) -> bool {
        self.inner.lock().unwrap().peek(key).is_some()
    }
}

impl Default for ResourceCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RasterImage;
    use image::DynamicImage;
    use std::sync::Arc;

    fn resource(name: &str) -> ImageResource {
        ImageResource::resolved(
            name.to_string(),
            Arc::new(RasterImage::new(DynamicImage::new_rgb8(1, 1))),
        )
    }

    #[test]
    fn test_get_returns_inserted_resource() {
        let cache = ResourceCache::new(4);
        assert!(cache.is_empty());
        cache.insert("a".into(), resource("a"));
        let hit = cache.get("a").unwrap();
        assert_eq!(hit.source.as_deref(), Some("a"));
        assert!(cache.get("b").is_none());
    }

    #[test]
    fn test_eviction_drops_least_recently_used() {
        let cache = ResourceCache::new(2);
        cache.insert("a".into(), resource("a"));
        cache.insert("b".into(), resource("b"));
        cache.insert("c".into(), resource("c"));
        assert_eq!(cache.len(), 2);
        assert!(!cache.contains("a"));
        assert!(cache.contains("b"));
        assert!(cache.contains("c"));
    }

    #[test]
    fn test_get_refreshes_recency() {
        let cache = ResourceCache::new(2);
        cache.insert("a".into(), resource("a"));
        cache.insert("b".into(), resource("b"));
        // Touch "a" so "b" becomes the eviction victim
        cache.get("a");
        cache.insert("c".into(), resource("c"));
        assert!(cache.contains("a"));
        assert!(!cache.contains("b"));
    }

    #[test]
    fn test_hits_share_the_decoded_object() {
        let cache = ResourceCache::new(2);
        cache.insert("a".into(), resource("a"));
        let first = cache.get("a").unwrap();
        let second = cache.get("a").unwrap();
        assert!(Arc::ptr_eq(
            first.image.as_ref().unwrap(),
            second.image.as_ref().unwrap()
        ));
    }
}
