use voxmap_blocks::ids::{self, BlockId};
use voxmap_blocks::{BlockFlags, BlockTable};
use voxmap_chunk::{
    CHUNK_SIZE, Chunk, ChunkCoord, ChunkLoader, LoadOutcome, LoadWarnings, WorldExtent,
};

pub const BEDROCK_Y: i32 = 60;
pub const GRASS_Y: i32 = 62;
pub const SHOWCASE_Y: i32 = 63;
/// Showcase blocks per row along +x.
pub const SHOWCASE_ROW: i32 = 16;
/// Gap between showcase columns.
pub const SHOWCASE_SPACING: i32 = 2;

/// Flat test world: bedrock, dirt and grass with one column per catalogue
/// block laid out in rows starting at the origin.
#[derive(Clone, Debug)]
pub struct FlatWorld {
    extent: WorldExtent,
    showcase: Vec<BlockId>,
    radius_chunks: Option<i32>,
}

impl FlatWorld {
    pub fn new(extent: WorldExtent, blocks: &BlockTable) -> Self {
        let showcase = blocks
            .iter()
            .filter(|(id, def)| *id != ids::AIR && *id != ids::UNKNOWN && def.flags.intersects(BlockFlags::VISIBLE))
            .map(|(id, _)| id)
            .collect();
        Self {
            extent,
            showcase,
            radius_chunks: None,
        }
    }

    /// Chunks farther than `radius` from the origin load as empty.
    pub fn with_radius(mut self, radius: i32) -> Self {
        self.radius_chunks = Some(radius);
        self
    }

    #[inline]
    pub fn extent(&self) -> WorldExtent {
        self.extent
    }

    /// Block shown at world column `(wx, wz)` on the showcase layer.
    pub fn showcase_at(&self, wx: i32, wz: i32) -> Option<BlockId> {
        if wx < 0 || wz < 0 || wx % SHOWCASE_SPACING != 0 || wz % SHOWCASE_SPACING != 0 {
            return None;
        }
        let col = wx / SHOWCASE_SPACING;
        let row = wz / SHOWCASE_SPACING;
        if col >= SHOWCASE_ROW {
            return None;
        }
        self.showcase.get((row * SHOWCASE_ROW + col) as usize).copied()
    }

    pub fn generate(&self, coord: ChunkCoord) -> Chunk {
        let mut chunk = Chunk::new(coord, self.extent);
        let Some(bedrock) = self.extent.to_storage_y(BEDROCK_Y) else {
            return chunk;
        };
        let grass = self.extent.clamp_to_storage(GRASS_Y) as usize;
        let showcase = self.extent.to_storage_y(SHOWCASE_Y);
        for z in 0..CHUNK_SIZE {
            for x in 0..CHUNK_SIZE {
                chunk.set(x, bedrock as usize, z, ids::BEDROCK, 0);
                for y in bedrock as usize + 1..grass {
                    chunk.set(x, y, z, ids::DIRT, 0);
                }
                chunk.set(x, grass, z, ids::GRASS_BLOCK, 0);
                let wx = coord.min_x() + x as i32;
                let wz = coord.min_z() + z as i32;
                if let (Some(y), Some(id)) = (showcase, self.showcase_at(wx, wz)) {
                    chunk.set(x, y as usize, z, id, 0);
                }
            }
        }
        chunk.fill_biome(1);
        chunk
    }
}

impl ChunkLoader for FlatWorld {
    fn load(&self, coord: ChunkCoord) -> LoadOutcome {
        if self
            .radius_chunks
            .is_some_and(|r| coord.cx.abs() > r || coord.cz.abs() > r)
        {
            return LoadOutcome::NoSections(LoadWarnings::empty());
        }
        LoadOutcome::Loaded(Box::new(self.generate(coord)), LoadWarnings::empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> FlatWorld {
        FlatWorld::new(WorldExtent::LEGACY, &BlockTable::standard())
    }

    #[test]
    fn layers_are_in_place() {
        let c = world().generate(ChunkCoord::new(-3, 5));
        assert_eq!(c.get(4, 60, 4), Some((ids::BEDROCK, 0)));
        assert_eq!(c.get(4, 61, 4), Some((ids::DIRT, 0)));
        assert_eq!(c.get(4, 62, 4), Some((ids::GRASS_BLOCK, 0)));
        assert_eq!(c.get(4, 63, 4), Some((ids::AIR, 0)));
        assert_eq!(c.max_filled_height(), Some(62));
    }

    #[test]
    fn showcase_starts_at_origin() {
        let w = world();
        let c = w.generate(ChunkCoord::new(0, 0));
        let first = w.showcase_at(0, 0).unwrap();
        assert_eq!(c.get(0, 63, 0), Some((first, 0)));
        assert_eq!(c.get(1, 63, 0), Some((ids::AIR, 0)));
        assert_ne!(w.showcase_at(2, 0), Some(first));
        assert_eq!(w.showcase_at(-2, 0), None);
        assert_eq!(w.showcase_at(SHOWCASE_ROW * SHOWCASE_SPACING, 0), None);
    }

    #[test]
    fn modern_extent_shifts_storage() {
        let w = FlatWorld::new(WorldExtent::MODERN, &BlockTable::standard());
        let c = w.generate(ChunkCoord::new(2, 2));
        assert_eq!(c.get(0, 124, 0), Some((ids::BEDROCK, 0)));
        assert_eq!(c.get(0, 126, 0), Some((ids::GRASS_BLOCK, 0)));
    }

    #[test]
    fn radius_limits_loading() {
        let w = world().with_radius(1);
        assert!(matches!(w.load(ChunkCoord::new(1, -1)), LoadOutcome::Loaded(..)));
        assert!(matches!(w.load(ChunkCoord::new(2, 0)), LoadOutcome::NoSections(_)));
    }
}
