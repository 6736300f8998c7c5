//! Bounded, time-expiring tile cache
//!
//! Sits in front of a lazy tile renderer so repeated map-client requests for
//! the same `(zoom, x, y)` stay cheap. One explicit instance per serving
//! endpoint; instances never share eviction state.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::tiles::grid::TileCoordinate;

const DEFAULT_MAX_ENTRIES: usize = 512;
const DEFAULT_TTL: Duration = Duration::from_secs(15 * 60);

struct CacheEntry {
    payload: Arc<Vec<u8>>,
    created_at: Instant,
}

struct CacheInner {
    entries: HashMap<TileCoordinate, CacheEntry>,
    /// Insertion order for FIFO eviction; holds exactly the keys in `entries`
    order: VecDeque<TileCoordinate>,
}

/// Bounded tile cache with FIFO eviction and per-entry TTL
///
/// Reads and writes are serialized per instance. Eviction follows insertion
/// order, not access order; an entry older than the TTL is a miss regardless
/// of capacity pressure and is removed on lookup.
pub struct TileCache {
    inner: Mutex<CacheInner>,
    max_entries: usize,
    ttl: Duration,
}

impl TileCache {
    /// Creates a cache holding at most `max_entries` tiles, each for `ttl`
    pub fn new(max_entries: usize, ttl: Duration) -> Self {
        Self {
            inner: Mutex::new(CacheInner {
                entries: HashMap::new(),
                order: VecDeque::new(),
            }),
            max_entries: max_entries.max(1),
            ttl,
        }
    }

    /// Looks up a tile payload; expired entries are removed and miss
    pub fn get(&self, coord: &TileCoordinate) -> Option<Arc<Vec<u8>>> {
        let mut inner = self.inner.lock().unwrap();

        let expired = match inner.entries.get(coord) {
            Some(entry) => entry.created_at.elapsed() > self.ttl,
            None => return None,
        };

        if expired {
            inner.entries.remove(coord);
            inner.order.retain(|c| c != coord);
            return None;
        }

        inner.entries.get(coord).map(|e| Arc::clone(&e.payload))
    }

    /// Inserts a tile payload, evicting the oldest-inserted entries when
    /// the cache is full
    pub fn put(&self, coord: TileCoordinate, payload: Vec<u8>) {
        let mut inner = self.inner.lock().unwrap();

        if inner.entries.remove(&coord).is_some() {
            inner.order.retain(|c| c != &coord);
        }

        while inner.entries.len() >= self.max_entries {
            match inner.order.pop_front() {
                Some(oldest) => {
                    inner.entries.remove(&oldest);
                }
                None => break,
            }
        }

        inner.entries.insert(
            coord,
            CacheEntry {
                payload: Arc::new(payload),
                created_at: Instant::now(),
            },
        );
        inner.order.push_back(coord);
    }

    /// Removes all entries
    pub fn clear(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.entries.clear();
        inner.order.clear();
    }

    /// Returns the current number of cached tiles
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().entries.len()
    }

    /// Returns whether the cache is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns cache statistics
    pub fn stats(&self) -> CacheStats {
        let inner = self.inner.lock().unwrap();
        let total_bytes = inner.entries.values().map(|e| e.payload.len()).sum();

        CacheStats {
            tile_count: inner.entries.len(),
            total_bytes,
            max_entries: self.max_entries,
        }
    }
}

impl Default for TileCache {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ENTRIES, DEFAULT_TTL)
    }
}

/// Cache statistics
#[derive(Debug, Clone)]
pub struct CacheStats {
    /// Number of tiles currently in cache
    pub tile_count: usize,
    /// Total payload bytes held
    pub total_bytes: usize,
    /// Maximum number of entries
    pub max_entries: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn coord(x: u32) -> TileCoordinate {
        TileCoordinate::new(14, x, 0)
    }

    #[test]
    fn test_cache_basic() {
        let cache = TileCache::new(4, Duration::from_secs(60));

        cache.put(coord(0), vec![1, 2, 3]);
        assert_eq!(cache.len(), 1);
        assert_eq!(*cache.get(&coord(0)).unwrap(), vec![1, 2, 3]);
        assert!(cache.get(&coord(1)).is_none());
    }

    #[test]
    fn test_fifo_eviction_order() {
        let cache = TileCache::new(2, Duration::from_secs(60));

        cache.put(coord(0), vec![0]);
        cache.put(coord(1), vec![1]);

        // Touch the oldest entry; FIFO must still evict it, not the
        // least-recently-used one.
        assert!(cache.get(&coord(0)).is_some());
        cache.put(coord(2), vec![2]);

        assert!(cache.get(&coord(0)).is_none());
        assert!(cache.get(&coord(1)).is_some());
        assert!(cache.get(&coord(2)).is_some());
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_reinsert_refreshes_position() {
        let cache = TileCache::new(2, Duration::from_secs(60));

        cache.put(coord(0), vec![0]);
        cache.put(coord(1), vec![1]);
        cache.put(coord(0), vec![9]);
        cache.put(coord(2), vec![2]);

        // coord(1) became the oldest insertion after the re-put of coord(0).
        assert!(cache.get(&coord(1)).is_none());
        assert_eq!(*cache.get(&coord(0)).unwrap(), vec![9]);
    }

    #[test]
    fn test_ttl_expiry() {
        let cache = TileCache::new(4, Duration::from_millis(20));

        cache.put(coord(0), vec![1]);
        assert!(cache.get(&coord(0)).is_some());

        thread::sleep(Duration::from_millis(40));
        assert!(cache.get(&coord(0)).is_none());
        // The expired entry was removed by the lookup.
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_expired_key_does_not_poison_eviction_order() {
        let cache = TileCache::new(2, Duration::from_millis(20));

        cache.put(coord(0), vec![0]);
        thread::sleep(Duration::from_millis(40));
        assert!(cache.get(&coord(0)).is_none());

        // After the expiry removal, a reinsert of the same key must count as
        // a fresh insertion; coord(1) is now the oldest and gets evicted.
        cache.put(coord(1), vec![1]);
        cache.put(coord(0), vec![9]);
        cache.put(coord(2), vec![2]);

        assert!(cache.get(&coord(1)).is_none());
        assert_eq!(*cache.get(&coord(0)).unwrap(), vec![9]);
        assert!(cache.get(&coord(2)).is_some());
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_concurrent_access() {
        let cache = Arc::new(TileCache::new(64, Duration::from_secs(60)));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    for j in 0..100 {
                        let c = coord(i * 100 + j);
                        cache.put(c, vec![i as u8, j as u8]);
                        let _ = cache.get(&c);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert!(cache.len() <= 64);
    }

    #[test]
    fn test_cache_stats() {
        let cache = TileCache::new(10, Duration::from_secs(60));

        cache.put(coord(0), vec![1, 2, 3]);
        cache.put(coord(1), vec![4, 5]);

        let stats = cache.stats();
        assert_eq!(stats.tile_count, 2);
        assert_eq!(stats.total_bytes, 5);
        assert_eq!(stats.max_entries, 10);
    }
}
