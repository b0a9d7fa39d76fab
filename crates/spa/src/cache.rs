use std::collections::{HashMap, VecDeque};

/// Speculatively fetched pages keyed by absolute URL.
///
/// Eviction is strict FIFO by insertion: reads never refresh an entry, and re-putting a key
/// that is already present keeps its original slot.
#[derive(Debug)]
pub struct PrefetchCache {
    capacity: usize,
    order: VecDeque<String>,
    entries: HashMap<String, String>,
}

impl PrefetchCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            order: VecDeque::with_capacity(capacity),
            entries: HashMap::with_capacity(capacity),
        }
    }

    pub fn has(&self, url: &str) -> bool {
        self.entries.contains_key(url)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consumes the entry: a page is served from cache at most once.
    pub fn take(&mut self, url: &str) -> Option<String> {
        let html = self.entries.remove(url)?;
        self.order.retain(|k| k != url);
        Some(html)
    }

    pub fn put(&mut self, url: String, html: String) {
        if let Some(slot) = self.entries.get_mut(&url) {
            *slot = html;
            return;
        }
        self.order.push_back(url.clone());
        self.entries.insert(url, html);
        while self.entries.len() > self.capacity {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            self.entries.remove(&oldest);
            log::debug!("prefetch cache: evicted {oldest}");
        }
    }

    pub fn urls(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(i: usize) -> String {
        format!("http://docs.local/md/p/page-{i}")
    }

    #[test]
    fn eleventh_insert_evicts_the_first() {
        let mut cache = PrefetchCache::new(10);
        for i in 0..11 {
            cache.put(url(i), format!("<p>{i}</p>"));
            assert!(cache.len() <= 10);
        }
        assert_eq!(cache.len(), 10);
        assert!(!cache.has(&url(0)));
        assert!((1..11).all(|i| cache.has(&url(i))));
    }

    #[test]
    fn eviction_ignores_access_order() {
        let mut cache = PrefetchCache::new(2);
        cache.put(url(0), "a".into());
        cache.put(url(1), "b".into());
        assert!(cache.has(&url(0)));
        cache.put(url(2), "c".into());
        assert!(!cache.has(&url(0)));
        assert_eq!(cache.urls().collect::<Vec<_>>(), [url(1), url(2)]);
    }

    #[test]
    fn take_removes_the_entry() {
        let mut cache = PrefetchCache::new(10);
        cache.put(url(1), "<p>1</p>".into());
        assert_eq!(cache.take(&url(1)).as_deref(), Some("<p>1</p>"));
        assert_eq!(cache.take(&url(1)), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn evicts_oldest_still_present_after_takes() {
        let mut cache = PrefetchCache::new(3);
        for i in 0..3 {
            cache.put(url(i), String::new());
        }
        cache.take(&url(0));
        cache.put(url(3), String::new());
        cache.put(url(4), String::new());
        assert!(!cache.has(&url(1)));
        assert_eq!(cache.urls().collect::<Vec<_>>(), [url(2), url(3), url(4)]);
    }

    #[test]
    fn re_put_keeps_insertion_slot() {
        let mut cache = PrefetchCache::new(2);
        cache.put(url(0), "old".into());
        cache.put(url(1), "b".into());
        cache.put(url(0), "new".into());
        cache.put(url(2), "c".into());
        assert!(!cache.has(&url(0)));
        assert!(cache.has(&url(1)) && cache.has(&url(2)));
    }
}
