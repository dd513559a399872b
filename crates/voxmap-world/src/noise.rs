use fastnoise_lite::{FastNoiseLite, NoiseType};
use voxmap_blocks::ids::{self, BlockId};
use voxmap_chunk::{
    CHUNK_SIZE, Chunk, ChunkCoord, ChunkLoader, FULL_LIGHT, LoadOutcome, LoadWarnings,
    WorldExtent,
};

use crate::config::WorldConfig;

pub mod biome_ids {
    pub const PLAINS: u8 = 1;
    pub const DESERT: u8 = 2;
    pub const FOREST: u8 = 4;
    pub const TAIGA: u8 = 5;
    pub const SWAMP: u8 = 6;
    pub const SNOWY_PLAINS: u8 = 12;
    pub const JUNGLE: u8 = 21;
    pub const BADLANDS: u8 = 37;
    pub const CHERRY_GROVE: u8 = 55;
}

const TRUNK_HEIGHT: i32 = 4;
/// Orange stained clay data value.
const BADLANDS_CLAY: u8 = 1;

/// Heightmap terrain with water, beaches, snow, trees and biome ids.
pub struct NoiseWorld {
    config: WorldConfig,
    extent: WorldExtent,
    terrain: FastNoiseLite,
    temperature: FastNoiseLite,
    moisture: FastNoiseLite,
}

/// What generation decided for one world column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnPlan {
    /// World y of the top solid block.
    pub surface: i32,
    pub biome: u8,
    pub tree: bool,
}

impl NoiseWorld {
    pub fn new(config: WorldConfig, extent: WorldExtent) -> Self {
        let seed = config.terrain.seed;
        let mut terrain = FastNoiseLite::with_seed(seed);
        terrain.set_noise_type(Some(NoiseType::OpenSimplex2));
        terrain.set_frequency(Some(config.terrain.frequency));
        let mut temperature = FastNoiseLite::with_seed(seed ^ 0x1203_5F31);
        temperature.set_noise_type(Some(NoiseType::OpenSimplex2));
        temperature.set_frequency(Some(config.biomes.frequency));
        let mut moisture = FastNoiseLite::with_seed(((seed as u32) ^ 0x92E3_A1B2u32) as i32);
        moisture.set_noise_type(Some(NoiseType::OpenSimplex2));
        moisture.set_frequency(Some(config.biomes.frequency));
        Self {
            config,
            extent,
            terrain,
            temperature,
            moisture,
        }
    }

    #[inline]
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    #[inline]
    pub fn extent(&self) -> WorldExtent {
        self.extent
    }

    pub fn surface_height(&self, wx: i32, wz: i32) -> i32 {
        let t = &self.config.terrain;
        let n = self.terrain.get_noise_2d(wx as f32, wz as f32).clamp(-1.0, 1.0);
        let h = t.base + (n * t.amplitude as f32).round() as i32;
        h.clamp(self.extent.min_y + 1, self.extent.max_world_y() - TRUNK_HEIGHT - 3)
    }

    fn climate(&self, wx: i32, wz: i32) -> (f32, f32) {
        let t = ((self.temperature.get_noise_2d(wx as f32, wz as f32) + 1.0) * 0.5).clamp(0.0, 1.0);
        let m = ((self.moisture.get_noise_2d(wx as f32, wz as f32) + 1.0) * 0.5).clamp(0.0, 1.0);
        (t, m)
    }

    pub fn plan(&self, wx: i32, wz: i32) -> ColumnPlan {
        use biome_ids::*;
        let surface = self.surface_height(wx, wz);
        let (t, m) = self.climate(wx, wz);
        let biome = if surface >= self.config.terrain.snow_line || t < 0.15 {
            SNOWY_PLAINS
        } else if t > 0.75 && m < 0.3 {
            DESERT
        } else if t > 0.7 && m < 0.45 {
            BADLANDS
        } else if t > 0.7 && m > 0.7 {
            JUNGLE
        } else if m > 0.75 {
            SWAMP
        } else if t < 0.3 {
            TAIGA
        } else if m > 0.55 {
            FOREST
        } else if t > 0.6 && m > 0.45 {
            CHERRY_GROVE
        } else {
            PLAINS
        };
        let dry = matches!(biome, DESERT | BADLANDS);
        let above_water = !self.config.water.enable || surface > self.config.water.level + 1;
        let density = match biome {
            FOREST | JUNGLE | TAIGA => self.config.trees.density * 4.0,
            PLAINS | SNOWY_PLAINS => self.config.trees.density * 0.5,
            _ => self.config.trees.density,
        };
        let tree = !dry && above_water && hash01(wx, wz, self.config.terrain.seed) < density;
        ColumnPlan {
            surface,
            biome,
            tree,
        }
    }

    fn surface_block(&self, plan: &ColumnPlan) -> (BlockId, u8) {
        let water = &self.config.water;
        if water.enable && plan.surface <= water.level + 1 {
            return (ids::SAND, 0);
        }
        match plan.biome {
            biome_ids::DESERT => (ids::SAND, 0),
            biome_ids::BADLANDS => (ids::STAINED_CLAY, BADLANDS_CLAY),
            biome_ids::SNOWY_PLAINS => (ids::SNOW_BLOCK, 0),
            _ => (ids::GRASS_BLOCK, 0),
        }
    }

    pub fn generate(&self, coord: ChunkCoord) -> Chunk {
        let mut chunk = Chunk::new(coord, self.extent);
        let extent = self.extent;
        let water = &self.config.water;
        for z in 0..CHUNK_SIZE {
            for x in 0..CHUNK_SIZE {
                let wx = coord.min_x() + x as i32;
                let wz = coord.min_z() + z as i32;
                let plan = self.plan(wx, wz);
                let top = extent.clamp_to_storage(plan.surface) as usize;
                chunk.set(x, 0, z, ids::BEDROCK, 0);
                for y in 1..top.saturating_sub(3) {
                    chunk.set(x, y, z, ids::STONE, 0);
                }
                let filler = if plan.biome == biome_ids::DESERT { ids::SANDSTONE } else { ids::DIRT };
                for y in top.saturating_sub(3).max(1)..top {
                    chunk.set(x, y, z, filler, 0);
                }
                let (block, data) = self.surface_block(&plan);
                chunk.set(x, top, z, block, data);
                chunk.set_biome(x, z, plan.biome);

                if water.enable && plan.surface < water.level {
                    let level = extent.clamp_to_storage(water.level) as usize;
                    for y in top + 1..=level {
                        chunk.set(x, y, z, ids::STATIONARY_WATER, 0);
                    }
                    // light fades with depth under water
                    let depth = (level - top) as u8;
                    chunk.set_light(x, top, z, FULL_LIGHT.saturating_sub(depth / 2));
                } else if plan.tree {
                    let log = if plan.biome == biome_ids::TAIGA { ids::AD_LOG } else { ids::LOG };
                    for y in top + 1..=top + TRUNK_HEIGHT as usize {
                        chunk.set(x, y, z, log, 0);
                    }
                } else if plan.biome == biome_ids::DESERT
                    && hash01(wx, wz, self.config.terrain.seed.wrapping_add(1))
                        < self.config.trees.density * 0.5
                {
                    chunk.fill_column(x, z, top + 1, top + 3, ids::CACTUS, 0);
                }
            }
        }
        self.place_canopies(&mut chunk);
        chunk
    }

    /// Leaves around every trunk top, clipped to the chunk.
    fn place_canopies(&self, chunk: &mut Chunk) {
        let coord = chunk.coord;
        let mut tops = Vec::new();
        for z in 0..CHUNK_SIZE {
            for x in 0..CHUNK_SIZE {
                let plan = self.plan(coord.min_x() + x as i32, coord.min_z() + z as i32);
                let water_covered = self.config.water.enable && plan.surface < self.config.water.level;
                if plan.tree && !water_covered {
                    let top = self.extent.clamp_to_storage(plan.surface) as usize + TRUNK_HEIGHT as usize;
                    tops.push((x as i32, top, z as i32, plan.biome));
                }
            }
        }
        for (tx, top, tz, biome) in tops {
            let leaves = if biome == biome_ids::TAIGA { ids::AD_LEAVES } else { ids::LEAVES };
            for dy in 0..=1usize {
                let r = if dy == 0 { 2 } else { 1 };
                for dz in -r..=r {
                    for dx in -r..=r {
                        let (x, z) = (tx + dx, tz + dz);
                        if !(0..CHUNK_SIZE as i32).contains(&x) || !(0..CHUNK_SIZE as i32).contains(&z) {
                            continue;
                        }
                        let (x, z, y) = (x as usize, z as usize, top + dy);
                        if chunk.get(x, y, z).is_some_and(|(id, _)| id == ids::AIR) {
                            chunk.set(x, y, z, leaves, 0);
                        }
                    }
                }
            }
        }
    }
}

impl ChunkLoader for NoiseWorld {
    fn load(&self, coord: ChunkCoord) -> LoadOutcome {
        log::trace!("generating chunk ({}, {})", coord.cx, coord.cz);
        LoadOutcome::Loaded(Box::new(self.generate(coord)), LoadWarnings::empty())
    }
}

/// Deterministic value in `[0, 1)` for a column.
fn hash01(x: i32, z: i32, seed: i32) -> f32 {
    let mut h = (x as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
        ^ (z as u64).wrapping_mul(0xC2B2_AE3D_27D4_EB4F)
        ^ (seed as u64);
    h ^= h >> 33;
    h = h.wrapping_mul(0xFF51_AFD7_ED55_8CCD);
    h ^= h >> 33;
    (h >> 40) as f32 / (1u64 << 24) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> NoiseWorld {
        NoiseWorld::new(WorldConfig::default(), WorldExtent::MODERN)
    }

    #[test]
    fn generation_is_deterministic() {
        let w = world();
        let a = w.generate(ChunkCoord::new(3, -7));
        let b = w.generate(ChunkCoord::new(3, -7));
        for z in 0..CHUNK_SIZE {
            for x in 0..CHUNK_SIZE {
                assert_eq!(a.column_top(x, z), b.column_top(x, z));
                assert_eq!(a.biome(x, z), b.biome(x, z));
            }
        }
    }

    #[test]
    fn low_columns_fill_with_water() {
        let mut cfg = WorldConfig::default();
        cfg.water.level = cfg.terrain.base + cfg.terrain.amplitude + 1;
        let w = NoiseWorld::new(cfg, WorldExtent::MODERN);
        let c = w.generate(ChunkCoord::new(0, 0));
        let level = WorldExtent::MODERN.clamp_to_storage(w.config().water.level) as usize;
        for z in 0..CHUNK_SIZE {
            for x in 0..CHUNK_SIZE {
                assert_eq!(c.get(x, level, z), Some((ids::STATIONARY_WATER, 0)));
                assert_eq!(c.column_top(x, z), Some(level as u16));
            }
        }
    }

    #[test]
    fn hash_is_in_unit_range() {
        for i in -50..50 {
            let v = hash01(i * 31, i * -17, 9);
            assert!((0.0..1.0).contains(&v));
        }
    }
}
