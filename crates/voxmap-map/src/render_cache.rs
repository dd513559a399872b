//! Decides per chunk whether the cached tile is still good.

use voxmap_chunk::{ChunkCache, ChunkCoord, RenderStamp};

use crate::composite::{Compositor, WestEdge};
use crate::highlight::{DirtyRect, HighlightHits};
use crate::options::RenderOptions;

/// Settings of the draw in progress that a cached tile must match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderKey {
    pub at_height: u16,
    pub options: RenderOptions,
    pub colormap: u64,
    pub highlight_generation: u64,
}

impl RenderKey {
    /// Whether a tile stamped with `stamp` can be reused.
    ///
    /// `inside_dirty` is whether the chunk overlaps the highlight dirty rect;
    /// `west_usable` whether the west neighbor is now resident and drawn under
    /// the same height and options.
    pub fn is_fresh(&self, stamp: &RenderStamp, inside_dirty: bool, west_usable: bool) -> bool {
        if stamp.at_height != self.at_height
            || stamp.options != self.options.bits()
            || stamp.colormap != self.colormap
        {
            return false;
        }
        if stamp.missing_west && west_usable {
            return false;
        }
        match stamp.highlight {
            Some(generation) => inside_dirty && generation == self.highlight_generation,
            None => !inside_dirty,
        }
    }

    pub fn stamp(&self, inside_dirty: bool, missing_west: bool) -> RenderStamp {
        RenderStamp {
            at_height: self.at_height,
            options: self.options.bits(),
            colormap: self.colormap,
            highlight: inside_dirty.then_some(self.highlight_generation),
            missing_west,
        }
    }

    #[inline]
    fn matches_shape(&self, stamp: &RenderStamp) -> bool {
        stamp.at_height == self.at_height && stamp.options == self.options.bits()
    }
}

/// How a resident chunk's tile was obtained.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TileState {
    Reused,
    Rendered(HighlightHits),
    /// Slot holds no sections; draw a blank tile.
    Blank,
}

/// One draw's worth of compositor plus cache key.
pub struct RenderPass<'a> {
    pub compositor: Compositor<'a>,
    pub key: RenderKey,
    pub dirty: DirtyRect,
}

impl<'a> RenderPass<'a> {
    pub fn new(compositor: Compositor<'a>, key: RenderKey, dirty: DirtyRect) -> Self {
        Self {
            compositor,
            key,
            dirty,
        }
    }

    /// Bring the tile of the chunk at `coord` up to date.
    ///
    /// Returns `None` when the cache holds nothing for `coord`.
    pub fn refresh<C>(&self, cache: &mut C, coord: ChunkCoord) -> Option<TileState>
    where
        C: ChunkCache + ?Sized,
    {
        let west = cache
            .find(coord.west())
            .and_then(|slot| slot.chunk())
            .filter(|w| w.stamp.is_some_and(|s| self.key.matches_shape(&s)))
            .map(WestEdge::of);
        let inside_dirty = self.dirty.overlaps_chunk(coord);

        let chunk = match cache.find_mut(coord)?.chunk_mut() {
            Some(chunk) => chunk,
            None => return Some(TileState::Blank),
        };
        if let Some(stamp) = chunk.stamp {
            if self.key.is_fresh(&stamp, inside_dirty, west.is_some()) {
                return Some(TileState::Reused);
            }
        }
        let hits = self.compositor.composite(chunk, west.as_ref());
        chunk.stamp = Some(self.key.stamp(inside_dirty, west.is_none()));
        log::trace!(
            "composited chunk ({}, {}) missing_west={}",
            coord.cx,
            coord.cz,
            west.is_none()
        );
        Some(TileState::Rendered(hits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biome::StandardBiomes;
    use crate::color::{ColorResolver, ColorTable};
    use crate::highlight::{ColumnRect, HighlightBox};
    use voxmap_blocks::BlockTable;
    use voxmap_blocks::ids;
    use voxmap_chunk::{Chunk, ChunkSlot, LruChunkCache, WorldExtent};

    fn key() -> RenderKey {
        RenderKey {
            at_height: 100,
            options: RenderOptions::empty(),
            colormap: 3,
            highlight_generation: 7,
        }
    }

    #[test]
    fn freshness_requires_matching_settings() {
        let k = key();
        let stamp = k.stamp(false, false);
        assert!(k.is_fresh(&stamp, false, true));
        let taller = RenderKey { at_height: 101, ..k };
        assert!(!taller.is_fresh(&stamp, false, false));
        let palette = RenderKey { colormap: 4, ..k };
        assert!(!palette.is_fresh(&stamp, false, false));
        let opts = RenderKey {
            options: RenderOptions::GRID,
            ..k
        };
        assert!(!opts.is_fresh(&stamp, false, false));
    }

    #[test]
    fn freshness_follows_highlight_generation_inside_dirty_rect() {
        let k = key();
        let plain = k.stamp(false, false);
        assert!(!k.is_fresh(&plain, true, false));
        let lit = k.stamp(true, false);
        assert!(k.is_fresh(&lit, true, false));
        assert!(!k.is_fresh(&lit, false, false));
        let newer = RenderKey {
            highlight_generation: 8,
            ..k
        };
        assert!(!newer.is_fresh(&lit, true, false));
    }

    #[test]
    fn missing_west_rerenders_once_neighbor_is_usable() {
        let k = key();
        let stamp = k.stamp(false, true);
        assert!(k.is_fresh(&stamp, false, false));
        assert!(!k.is_fresh(&stamp, false, true));
    }

    fn stone_chunk(cx: i32, cz: i32) -> ChunkSlot {
        let mut c = Chunk::new(ChunkCoord::new(cx, cz), WorldExtent::LEGACY);
        for z in 0..16 {
            for x in 0..16 {
                c.set(x, 64, z, ids::STONE, 0);
            }
        }
        ChunkSlot::Present(Box::new(c))
    }

    #[test]
    fn refresh_reuses_until_west_arrives() {
        let blocks = BlockTable::standard();
        let colors = ColorTable::build(&blocks);
        let biomes = StandardBiomes::new();
        let hbox = HighlightBox::default();
        let resolver = ColorResolver::new(&blocks, &colors, &biomes);
        let pass = RenderPass::new(
            Compositor::new(resolver, 100, RenderOptions::empty(), &hbox),
            key(),
            DirtyRect::EMPTY,
        );
        let mut cache = LruChunkCache::new(8);
        let here = ChunkCoord::new(1, 0);
        cache.add(here, stone_chunk(1, 0));
        assert!(matches!(pass.refresh(&mut cache, here), Some(TileState::Rendered(_))));
        assert_eq!(pass.refresh(&mut cache, here), Some(TileState::Reused));

        cache.add(here.west(), stone_chunk(0, 0));
        // west is resident but not yet drawn at these settings
        assert_eq!(pass.refresh(&mut cache, here), Some(TileState::Reused));
        assert!(matches!(pass.refresh(&mut cache, here.west()), Some(TileState::Rendered(_))));
        assert!(matches!(pass.refresh(&mut cache, here), Some(TileState::Rendered(_))));
        assert_eq!(pass.refresh(&mut cache, here), Some(TileState::Reused));

        cache.add(ChunkCoord::new(5, 5), ChunkSlot::NoSections);
        assert_eq!(pass.refresh(&mut cache, ChunkCoord::new(5, 5)), Some(TileState::Blank));
        assert_eq!(pass.refresh(&mut cache, ChunkCoord::new(9, 9)), None);
    }

    #[test]
    fn dirty_rect_forces_highlight_redraw() {
        let blocks = BlockTable::standard();
        let colors = ColorTable::build(&blocks);
        let biomes = StandardBiomes::new();
        let hbox = HighlightBox::default();
        let resolver = ColorResolver::new(&blocks, &colors, &biomes);
        let mut cache = LruChunkCache::new(8);
        let here = ChunkCoord::new(0, 0);
        cache.add(here, stone_chunk(0, 0));
        let clean = RenderPass::new(
            Compositor::new(resolver, 100, RenderOptions::empty(), &hbox),
            key(),
            DirtyRect::EMPTY,
        );
        clean.refresh(&mut cache, here);
        let mut dirty = DirtyRect::EMPTY;
        dirty.extend(ColumnRect {
            min_x: 2,
            min_z: 2,
            max_x: 4,
            max_z: 4,
        });
        let lit = RenderPass::new(
            Compositor::new(resolver, 100, RenderOptions::empty(), &hbox),
            key(),
            dirty,
        );
        assert!(matches!(lit.refresh(&mut cache, here), Some(TileState::Rendered(_))));
        assert_eq!(lit.refresh(&mut cache, here), Some(TileState::Reused));
        assert!(matches!(clean.refresh(&mut cache, here), Some(TileState::Rendered(_))));
    }
}
