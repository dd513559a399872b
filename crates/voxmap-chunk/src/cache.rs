use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};

use hashbrown::HashMap;

use crate::chunk::Chunk;
use crate::coord::ChunkCoord;

/// What the cache holds for a coordinate.
#[derive(Clone, Debug)]
pub enum ChunkSlot {
    Present(Box<Chunk>),
    /// Loaded and found empty; kept so the load is not retried.
    NoSections,
}

impl ChunkSlot {
    #[inline]
    pub fn chunk(&self) -> Option<&Chunk> {
        match self {
            ChunkSlot::Present(c) => Some(c),
            ChunkSlot::NoSections => None,
        }
    }

    #[inline]
    pub fn chunk_mut(&mut self) -> Option<&mut Chunk> {
        match self {
            ChunkSlot::Present(c) => Some(c),
            ChunkSlot::NoSections => None,
        }
    }
}

/// Storage for loaded chunks, keyed by chunk coordinate.
pub trait ChunkCache {
    fn find(&self, coord: ChunkCoord) -> Option<&ChunkSlot>;
    fn find_mut(&mut self, coord: ChunkCoord) -> Option<&mut ChunkSlot>;
    fn add(&mut self, coord: ChunkCoord, slot: ChunkSlot);
    fn clear(&mut self);
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChunkCacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub entries: usize,
}

/// Bounded cache evicting the least recently stored or touched chunk.
pub struct LruChunkCache {
    entries: HashMap<ChunkCoord, ChunkSlot>,
    order: VecDeque<ChunkCoord>,
    capacity: usize,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

impl LruChunkCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            capacity: capacity.max(1),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn snapshot(&self) -> ChunkCacheStats {
        ChunkCacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            entries: self.entries.len(),
        }
    }

    /// Forget every cached tile while keeping the chunk data.
    pub fn invalidate_renders(&mut self) {
        for slot in self.entries.values_mut() {
            if let Some(chunk) = slot.chunk_mut() {
                chunk.invalidate_render();
            }
        }
    }

    fn record(&self, found: bool) {
        if found {
            self.hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn touch(&mut self, coord: ChunkCoord) {
        if let Some(pos) = self.order.iter().position(|c| *c == coord) {
            if let Some(entry) = self.order.remove(pos) {
                self.order.push_back(entry);
            }
        }
    }

    fn remove_from_order(&mut self, coord: ChunkCoord) {
        if let Some(pos) = self.order.iter().position(|c| *c == coord) {
            self.order.remove(pos);
        }
    }

    fn enforce_capacity(&mut self) {
        while self.order.len() > self.capacity {
            let Some(old) = self.order.pop_front() else {
                break;
            };
            if self.entries.remove(&old).is_some() {
                self.evictions.fetch_add(1, Ordering::Relaxed);
                log::trace!("evicted chunk ({}, {})", old.cx, old.cz);
            }
        }
    }
}

impl ChunkCache for LruChunkCache {
    fn find(&self, coord: ChunkCoord) -> Option<&ChunkSlot> {
        let slot = self.entries.get(&coord);
        self.record(slot.is_some());
        slot
    }

    fn find_mut(&mut self, coord: ChunkCoord) -> Option<&mut ChunkSlot> {
        let found = self.entries.contains_key(&coord);
        self.record(found);
        if !found {
            return None;
        }
        self.touch(coord);
        self.entries.get_mut(&coord)
    }

    fn add(&mut self, coord: ChunkCoord, slot: ChunkSlot) {
        self.entries.insert(coord, slot);
        self.remove_from_order(coord);
        self.order.push_back(coord);
        self.enforce_capacity();
    }

    fn clear(&mut self) {
        let removed = self.entries.len() as u64;
        self.entries.clear();
        self.order.clear();
        if removed > 0 {
            self.evictions.fetch_add(removed, Ordering::Relaxed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::WorldExtent;

    fn present(cx: i32, cz: i32) -> ChunkSlot {
        ChunkSlot::Present(Box::new(Chunk::new(
            ChunkCoord::new(cx, cz),
            WorldExtent::new(0, 16),
        )))
    }

    #[test]
    fn evicts_least_recently_used() {
        let mut cache = LruChunkCache::new(2);
        cache.add(ChunkCoord::new(0, 0), present(0, 0));
        cache.add(ChunkCoord::new(1, 0), ChunkSlot::NoSections);
        assert!(cache.find_mut(ChunkCoord::new(0, 0)).is_some());
        cache.add(ChunkCoord::new(2, 0), present(2, 0));
        assert!(cache.find(ChunkCoord::new(1, 0)).is_none());
        assert!(cache.find(ChunkCoord::new(0, 0)).is_some());
        let stats = cache.snapshot();
        assert_eq!(stats.evictions, 1);
        assert_eq!(stats.entries, 2);
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.misses, 1);
    }

    #[test]
    fn clear_counts_evictions() {
        let mut cache = LruChunkCache::new(8);
        cache.add(ChunkCoord::new(0, 0), present(0, 0));
        cache.add(ChunkCoord::new(0, 1), present(0, 1));
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.snapshot().evictions, 2);
    }

    #[test]
    fn readding_a_coordinate_replaces_it() {
        let mut cache = LruChunkCache::new(4);
        cache.add(ChunkCoord::new(5, 5), ChunkSlot::NoSections);
        cache.add(ChunkCoord::new(5, 5), present(5, 5));
        assert_eq!(cache.len(), 1);
        assert!(cache.find(ChunkCoord::new(5, 5)).and_then(ChunkSlot::chunk).is_some());
    }
}
