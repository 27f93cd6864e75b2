use std::collections::HashMap;

use super::Response;

/// One named cache: request keys to stored responses.
#[derive(Debug, Clone, Default)]
pub struct Cache {
    entries: HashMap<String, Response>,
}

impl Cache {
    pub fn put(&mut self, key: impl Into<String>, response: Response) {
        self.entries.insert(key.into(), response);
    }

    pub fn lookup(&self, key: &str) -> Option<&Response> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// All caches owned by the worker, in creation order.
#[derive(Debug, Clone, Default)]
pub struct CacheStorage {
    caches: Vec<(String, Cache)>,
}

impl CacheStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the named cache, creating it empty if needed.
    pub fn open(&mut self, name: &str) -> &mut Cache {
        let idx = match self.caches.iter().position(|(n, _)| n == name) {
            Some(idx) => idx,
            None => {
                self.caches.push((name.to_string(), Cache::default()));
                self.caches.len() - 1
            }
        };
        &mut self.caches[idx].1
    }

    pub fn get(&self, name: &str) -> Option<&Cache> {
        self.caches.iter().find(|(n, _)| n == name).map(|(_, c)| c)
    }

    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn keys(&self) -> Vec<String> {
        self.caches.iter().map(|(n, _)| n.clone()).collect()
    }

    pub fn delete(&mut self, name: &str) -> bool {
        let before = self.caches.len();
        self.caches.retain(|(n, _)| n != name);
        self.caches.len() != before
    }

    /// First match for `key` across every cache, oldest cache first.
    pub fn lookup(&self, key: &str) -> Option<&Response> {
        self.caches.iter().find_map(|(_, c)| c.lookup(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_creates_once() {
        let mut storage = CacheStorage::new();
        storage.open("a").put("/x", Response::ok("1"));
        storage.open("a").put("/y", Response::ok("2"));
        assert_eq!(storage.keys(), vec!["a".to_string()]);
        assert_eq!(storage.get("a").map(Cache::len), Some(2));
    }

    #[test]
    fn lookup_prefers_older_cache() {
        let mut storage = CacheStorage::new();
        storage.open("old").put("/x", Response::ok("old"));
        storage.open("new").put("/x", Response::ok("new"));
        assert_eq!(storage.lookup("/x"), Some(&Response::ok("old")));
        assert!(storage.delete("old"));
        assert!(!storage.delete("old"));
        assert_eq!(storage.lookup("/x"), Some(&Response::ok("new")));
        assert_eq!(storage.lookup("/missing"), None);
    }
}
