use voxmap_blocks::ids::{self, BlockId};
use voxmap_blocks::{BlockTable, fold_high_bit};

use crate::coord::{ChunkCoord, WorldExtent};
use crate::unknown::UnknownBlockMonitor;

pub const CHUNK_SIZE: usize = 16;
pub const COLUMNS: usize = CHUNK_SIZE * CHUNK_SIZE;
pub const TILE_BYTES: usize = COLUMNS * 4;
pub const FULL_LIGHT: u8 = 15;

/// Settings a cached tile was produced under.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderStamp {
    pub at_height: u16,
    pub options: u32,
    pub colormap: u64,
    /// Highlight generation baked into the tile, `None` when drawn without one.
    pub highlight: Option<u64>,
    /// West neighbor was absent or mismatched when the tile was drawn.
    pub missing_west: bool,
}

/// One 16x16 column region of the world.
///
/// Voxels are stored at `(y * 16 + z) * 16 + x` with y zero-based.
#[derive(Clone, Debug)]
pub struct Chunk {
    pub coord: ChunkCoord,
    pub extent: WorldExtent,
    types: Vec<BlockId>,
    data: Vec<u8>,
    /// Two voxels per byte, even index in the low nibble. May cover fewer
    /// layers than the chunk holds.
    light: Vec<u8>,
    biomes: [u8; COLUMNS],
    pub heightmap: [Option<u16>; COLUMNS],
    max_filled: Option<u16>,
    pub stamp: Option<RenderStamp>,
    pub tile: [u8; TILE_BYTES],
}

#[inline]
pub const fn column_index(x: usize, z: usize) -> usize {
    z * CHUNK_SIZE + x
}

impl Chunk {
    /// All-air chunk with full light.
    pub fn new(coord: ChunkCoord, extent: WorldExtent) -> Self {
        let voxels = COLUMNS * extent.height as usize;
        Self {
            coord,
            extent,
            types: vec![ids::AIR; voxels],
            data: vec![0; voxels],
            light: vec![0xff; voxels.div_ceil(2)],
            biomes: [0; COLUMNS],
            heightmap: [None; COLUMNS],
            max_filled: None,
            stamp: None,
            tile: [0; TILE_BYTES],
        }
    }

    /// Build from raw type and data bytes, folding the high data bit into the
    /// id and replacing ids the catalogue does not know.
    ///
    /// Short inputs are padded with air. Returns the chunk and the number of
    /// voxels that were substituted.
    pub fn from_raw(
        coord: ChunkCoord,
        extent: WorldExtent,
        raw_types: &[u8],
        raw_data: &[u8],
        table: &BlockTable,
        monitor: &UnknownBlockMonitor,
    ) -> (Self, usize) {
        let mut chunk = Self::new(coord, extent);
        let mut substituted = 0;
        let n = chunk.types.len().min(raw_types.len());
        for i in 0..n {
            let data = raw_data.get(i).copied().unwrap_or(0);
            let (mut id, data) = fold_high_bit(raw_types[i], data);
            if !table.is_known(id) {
                id = ids::UNKNOWN;
                substituted += 1;
                monitor.report();
            }
            chunk.types[i] = id;
            chunk.data[i] = data;
        }
        chunk.recompute_max_filled();
        (chunk, substituted)
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.extent.height
    }

    #[inline]
    pub fn voxel_count(&self) -> usize {
        self.types.len()
    }

    #[inline]
    pub fn idx(x: usize, y: usize, z: usize) -> usize {
        (y * CHUNK_SIZE + z) * CHUNK_SIZE + x
    }

    #[inline]
    pub fn type_at(&self, index: usize) -> BlockId {
        self.types[index]
    }

    #[inline]
    pub fn data_at(&self, index: usize) -> u8 {
        self.data[index]
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize, z: usize) -> Option<(BlockId, u8)> {
        let i = Self::idx(x, y, z);
        Some((*self.types.get(i)?, self.data[i]))
    }

    /// Set a voxel; out-of-range positions are ignored.
    pub fn set(&mut self, x: usize, y: usize, z: usize, id: BlockId, data: u8) {
        if x >= CHUNK_SIZE || z >= CHUNK_SIZE || y >= self.extent.height as usize {
            return;
        }
        let i = Self::idx(x, y, z);
        self.types[i] = id;
        self.data[i] = data;
        let y = y as u16;
        if id != ids::AIR {
            if self.max_filled.is_none_or(|m| y > m) {
                self.max_filled = Some(y);
            }
        } else if self.max_filled == Some(y) {
            self.recompute_max_filled();
        }
    }

    /// Fill `y0..=y1` of one column with a single block.
    pub fn fill_column(&mut self, x: usize, z: usize, y0: usize, y1: usize, id: BlockId, data: u8) {
        for y in y0..=y1 {
            self.set(x, y, z, id, data);
        }
    }

    #[inline]
    pub fn max_filled_height(&self) -> Option<u16> {
        self.max_filled
    }

    pub fn recompute_max_filled(&mut self) {
        self.max_filled = self
            .types
            .iter()
            .rposition(|&t| t != ids::AIR)
            .map(|i| (i / COLUMNS) as u16);
    }

    /// Topmost non-air storage y of a column.
    pub fn column_top(&self, x: usize, z: usize) -> Option<u16> {
        let top = self.max_filled?;
        (0..=top as usize)
            .rev()
            .find(|&y| self.types[Self::idx(x, y, z)] != ids::AIR)
            .map(|y| y as u16)
    }

    /// Light level at a voxel, `None` above the lit range.
    #[inline]
    pub fn light_at(&self, index: usize) -> Option<u8> {
        let byte = *self.light.get(index / 2)?;
        Some(if index & 1 == 1 { byte >> 4 } else { byte & 0xf })
    }

    pub fn set_light(&mut self, x: usize, y: usize, z: usize, level: u8) {
        let i = Self::idx(x, y, z);
        let Some(byte) = self.light.get_mut(i / 2) else {
            return;
        };
        let level = level.min(FULL_LIGHT);
        *byte = if i & 1 == 1 {
            (*byte & 0x0f) | (level << 4)
        } else {
            (*byte & 0xf0) | level
        };
    }

    pub fn fill_light(&mut self, level: u8) {
        let level = level.min(FULL_LIGHT);
        self.light.fill(level | (level << 4));
    }

    /// Number of layers that carry light data.
    #[inline]
    pub fn lit_layers(&self) -> u16 {
        (self.light.len() * 2 / COLUMNS) as u16
    }

    /// Restrict light data to the lowest `layers` layers.
    pub fn set_lit_layers(&mut self, layers: u16) {
        let layers = layers.min(self.extent.height) as usize;
        self.light.resize(layers * COLUMNS / 2, 0xff);
    }

    #[inline]
    pub fn biome(&self, x: usize, z: usize) -> u8 {
        self.biomes[column_index(x, z)]
    }

    #[inline]
    pub fn biome_at_column(&self, column: usize) -> u8 {
        self.biomes[column]
    }

    #[inline]
    pub fn set_biome(&mut self, x: usize, z: usize, biome: u8) {
        self.biomes[column_index(x, z)] = biome;
    }

    pub fn fill_biome(&mut self, biome: u8) {
        self.biomes.fill(biome);
    }

    #[inline]
    pub fn has_non_air(&self) -> bool {
        self.max_filled.is_some()
    }

    /// Drop any cached tile so the next draw re-renders.
    pub fn invalidate_render(&mut self) {
        self.stamp = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk() -> Chunk {
        Chunk::new(ChunkCoord::new(0, 0), WorldExtent::new(0, 32))
    }

    #[test]
    fn max_filled_tracks_sets_and_clears() {
        let mut c = chunk();
        assert_eq!(c.max_filled_height(), None);
        c.set(3, 10, 4, ids::STONE, 0);
        c.set(0, 5, 0, ids::DIRT, 0);
        assert_eq!(c.max_filled_height(), Some(10));
        c.set(3, 10, 4, ids::AIR, 0);
        assert_eq!(c.max_filled_height(), Some(5));
        assert_eq!(c.column_top(0, 0), Some(5));
        assert_eq!(c.column_top(3, 4), None);
    }

    #[test]
    fn light_nibbles_are_independent() {
        let mut c = chunk();
        c.fill_light(0);
        c.set_light(0, 0, 0, 7);
        c.set_light(1, 0, 0, 12);
        assert_eq!(c.light_at(Chunk::idx(0, 0, 0)), Some(7));
        assert_eq!(c.light_at(Chunk::idx(1, 0, 0)), Some(12));
        assert_eq!(c.light_at(Chunk::idx(2, 0, 0)), Some(0));
    }

    #[test]
    fn light_above_lit_layers_is_absent() {
        let mut c = chunk();
        c.set_lit_layers(4);
        assert_eq!(c.lit_layers(), 4);
        assert_eq!(c.light_at(Chunk::idx(15, 3, 15)), Some(15));
        assert_eq!(c.light_at(Chunk::idx(0, 4, 0)), None);
    }

    #[test]
    fn raw_ingestion_folds_and_substitutes() {
        let table = BlockTable::standard();
        let monitor = UnknownBlockMonitor::new(true);
        let extent = WorldExtent::new(0, 2);
        let mut types = vec![0u8; COLUMNS * 2];
        let mut data = vec![0u8; COLUMNS * 2];
        types[0] = 59;
        data[0] = 0x81;
        types[1] = 230;
        types[COLUMNS] = ids::HEAD as u8;
        data[COLUMNS] = 0x80;
        let (c, substituted) =
            Chunk::from_raw(ChunkCoord::new(2, 3), extent, &types, &data, &table, &monitor);
        assert_eq!(c.get(0, 0, 0), Some((ids::CORAL_BLOCK, 0x01)));
        assert_eq!(c.get(1, 0, 0), Some((ids::UNKNOWN, 0)));
        assert_eq!(c.get(0, 1, 0), Some((ids::HEAD, 0x80)));
        assert_eq!(substituted, 1);
        assert!(monitor.seen());
        assert_eq!(c.max_filled_height(), Some(1));
    }

    #[test]
    fn unchecked_monitor_stays_clear() {
        let table = BlockTable::standard();
        let monitor = UnknownBlockMonitor::new(false);
        let types = [230u8; 4];
        let (_, substituted) = Chunk::from_raw(
            ChunkCoord::default(),
            WorldExtent::new(0, 1),
            &types,
            &[],
            &table,
            &monitor,
        );
        assert_eq!(substituted, 4);
        assert!(!monitor.seen());
    }
}
