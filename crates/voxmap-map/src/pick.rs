//! Screen pixel to block lookup over already drawn chunks.

use voxmap_blocks::ids::BlockId;
use voxmap_blocks::subtype_name;
use voxmap_chunk::{Chunk, ChunkCache, ChunkCoord, column_index};

use crate::error::MapError;
use crate::renderer::MapRenderer;
use crate::viewport::{ViewTransform, Viewport};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PickedBlock {
    pub x: i32,
    /// World-space y.
    pub y: i32,
    pub z: i32,
    pub id: BlockId,
    pub data: u8,
    pub biome: u8,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BlockLookup {
    Found(PickedBlock),
    /// Column was drawn with nothing visible.
    Empty { x: i32, z: i32 },
    /// Chunk is not resident or holds no sections.
    Unknown { x: i32, z: i32 },
    /// Pixel lies outside the output.
    OffMap,
}

impl MapRenderer {
    /// Identify the block drawn at output pixel `(px, py)` of a
    /// `width` x `height` image of `view`. Never loads chunks.
    pub fn pick<C>(
        &self,
        cache: &C,
        view: &Viewport,
        width: usize,
        height: usize,
        px: i32,
        py: i32,
    ) -> Result<BlockLookup, MapError>
    where
        C: ChunkCache + ?Sized,
    {
        let xf = ViewTransform::new(view, width, height)?;
        if px < 0 || py < 0 || px >= width as i32 || py >= height as i32 {
            return Ok(BlockLookup::OffMap);
        }
        let (x, z) = xf.world_column(px, py);
        let coord = ChunkCoord::containing(x, z);
        let Some(chunk) = cache.find(coord).and_then(|slot| slot.chunk()) else {
            return Ok(BlockLookup::Unknown { x, z });
        };
        let lx = (x - coord.min_x()) as usize;
        let lz = (z - coord.min_z()) as usize;
        Ok(self.lookup(chunk, lx, lz))
    }

    fn lookup(&self, chunk: &Chunk, lx: usize, lz: usize) -> BlockLookup {
        let x = chunk.coord.min_x() + lx as i32;
        let z = chunk.coord.min_z() + lz as i32;
        let Some(height) = chunk.heightmap[column_index(lx, lz)] else {
            return BlockLookup::Empty { x, z };
        };
        let Some((id, data)) = chunk.get(lx, height as usize, lz) else {
            return BlockLookup::OffMap;
        };
        BlockLookup::Found(PickedBlock {
            x,
            y: chunk.extent.to_world_y(height),
            z,
            id,
            data,
            biome: chunk.biome(lx, lz),
            name: subtype_name(self.blocks(), id, data),
        })
    }
}
