//! Voxel color resolution.

use voxmap_blocks::ids::{self, BlockId};
use voxmap_blocks::{BlockTable, premultiply};
use voxmap_chunk::{COLUMNS, Chunk, FULL_LIGHT};

use crate::biome::{BiomeColors, swamp_water_tint};
use crate::special::{BaseColor, Tint, classify};

/// World height the biome elevation falloff is measured from.
pub const ELEVATION_REFERENCE: i32 = 64;

#[inline]
pub const fn pack(r: u8, g: u8, b: u8) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

#[inline]
pub const fn unpack(color: u32) -> [u8; 3] {
    [(color >> 16) as u8, (color >> 8) as u8, color as u8]
}

/// Darken `color` to `light`/15 by scaling luma and keeping chroma.
pub fn shade(color: u32, light: u8) -> u32 {
    if light >= FULL_LIGHT {
        return color;
    }
    let [r, g, b] = unpack(color).map(f64::from);
    let y = 0.299 * r + 0.587 * g + 0.114 * b;
    let u = (b - y) * 0.565;
    let v = (r - y) * 0.713;
    let y = y * f64::from(light) / 15.0;
    let to_u8 = |c: f64| c.clamp(0.0, 255.0) as u8;
    pack(
        to_u8(y + 1.403 * v),
        to_u8(y - 0.344 * u - 0.714 * v),
        to_u8(y + 1.770 * u),
    )
}

/// Premultiplied, light-scaled color per block type and light level.
#[derive(Clone, Debug)]
pub struct ColorTable {
    shades: Vec<[u32; 16]>,
}

impl ColorTable {
    pub fn build(blocks: &BlockTable) -> Self {
        let shades = (0..blocks.len())
            .map(|id| {
                let pc = blocks.premultiplied(id as BlockId);
                std::array::from_fn(|light| shade(pc, light as u8))
            })
            .collect();
        Self { shades }
    }

    #[inline]
    pub fn get(&self, id: BlockId, light: u8) -> u32 {
        let row = self
            .shades
            .get(id as usize)
            .or_else(|| self.shades.get(ids::UNKNOWN as usize));
        row.map_or(0, |r| r[light.min(FULL_LIGHT) as usize])
    }
}

/// Everything color resolution reads besides the voxel itself.
#[derive(Clone, Copy)]
pub struct ColorResolver<'a> {
    pub blocks: &'a BlockTable,
    pub colors: &'a ColorTable,
    pub biomes: &'a dyn BiomeColors,
}

impl<'a> ColorResolver<'a> {
    pub fn new(blocks: &'a BlockTable, colors: &'a ColorTable, biomes: &'a dyn BiomeColors) -> Self {
        Self {
            blocks,
            colors,
            biomes,
        }
    }

    /// Premultiplied 0xRRGGBB for one voxel at light level `light`.
    #[allow(clippy::too_many_arguments)]
    pub fn resolve(
        &self,
        chunk: &Chunk,
        voxel: usize,
        id: BlockId,
        data: u8,
        light: u8,
        use_biome: bool,
        use_elevation: bool,
    ) -> u32 {
        let data_below = (id == ids::DOUBLE_FLOWER && voxel >= COLUMNS)
            .then(|| chunk.data_at(voxel - COLUMNS));
        let special = classify(self.blocks, id, data, data_below);

        let (mut color, mut light_computed, mut alpha_computed) = match special.base {
            BaseColor::Table => (self.colors.get(id, light), true, false),
            BaseColor::Literal(c) => (c, false, false),
            BaseColor::Premultiplied(c) => (c, false, true),
        };

        if use_biome && special.tint != Tint::None {
            let biome = chunk.biome_at_column(voxel % COLUMNS);
            let elevation = if use_elevation {
                let y = chunk.extent.to_world_y((voxel / COLUMNS) as u16);
                (y - ELEVATION_REFERENCE).max(0)
            } else {
                0
            };
            match special.tint {
                Tint::Grass => {
                    color = self.biomes.grass(biome, elevation);
                    light_computed = false;
                    alpha_computed = false;
                }
                Tint::Foliage => {
                    color = self.biomes.foliage(biome, elevation);
                    light_computed = false;
                    alpha_computed = false;
                }
                Tint::SwampWater if self.biomes.tints_water(biome) => {
                    color = swamp_water_tint(self.blocks.color(id));
                    light_computed = false;
                    alpha_computed = false;
                }
                Tint::SwampWater => {
                    color = self.colors.get(id, light);
                    light_computed = true;
                }
                Tint::None => {}
            }
        }

        if light_computed {
            return color;
        }
        let alpha = self.blocks.alpha(id);
        if !alpha_computed && alpha != 1.0 {
            color = premultiply(color, alpha);
        }
        shade(color, light)
    }
}
