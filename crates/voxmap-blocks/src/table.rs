use std::fmt;

use crate::flags::BlockFlags;
use crate::ids::{self, BlockId};

#[derive(Clone, Debug, PartialEq)]
pub struct BlockDef {
    pub name: String,
    /// Active color as 0xRRGGBB.
    pub color: u32,
    /// Color the catalogue shipped with, used to detect palette overrides.
    pub default_color: u32,
    pub alpha: f32,
    pub flags: BlockFlags,
}

impl BlockDef {
    fn new(name: &str, color: u32, alpha: f32, flags: BlockFlags) -> Self {
        Self {
            name: name.to_string(),
            color,
            default_color: color,
            alpha,
            flags,
        }
    }

    /// Color scaled by alpha, each channel truncated.
    #[inline]
    pub fn premultiplied(&self) -> u32 {
        premultiply(self.color, self.alpha)
    }
}

#[inline]
pub fn premultiply(color: u32, alpha: f32) -> u32 {
    let r = (((color >> 16) & 0xff) as f32 * alpha) as u32;
    let g = (((color >> 8) & 0xff) as f32 * alpha) as u32;
    let b = ((color & 0xff) as f32 * alpha) as u32;
    (r << 16) | (g << 8) | b
}

#[derive(Debug, Clone, PartialEq)]
pub enum PaletteError {
    UnknownBlock(BlockId),
    UnknownName(String),
    BadColor(String),
    BadAlpha { id: BlockId, alpha: f32 },
}

impl fmt::Display for PaletteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaletteError::UnknownBlock(id) => write!(f, "no block with id {id}"),
            PaletteError::UnknownName(name) => write!(f, "no block named '{name}'"),
            PaletteError::BadColor(s) => write!(f, "invalid color '{s}'"),
            PaletteError::BadAlpha { id, alpha } => {
                write!(f, "alpha {alpha} for block {id} is outside 0..=1")
            }
        }
    }
}

impl std::error::Error for PaletteError {}

/// Dense catalogue of block definitions indexed by [`BlockId`].
#[derive(Clone, Debug)]
pub struct BlockTable {
    defs: Vec<Option<BlockDef>>,
    placeholder: BlockDef,
}

impl BlockTable {
    pub fn standard() -> Self {
        let mut defs: Vec<Option<BlockDef>> = vec![None; ids::MAX_BLOCK_ID as usize + 1];
        for &(id, name, color, alpha, flags) in STANDARD_BLOCKS {
            defs[id as usize] = Some(BlockDef::new(name, color, alpha, flags));
        }
        let placeholder = BlockDef::new("Unknown Block", 0x565656, 1.0, BlockFlags::WHOLE);
        Self { defs, placeholder }
    }

    /// Number of id slots, defined or not.
    #[inline]
    pub fn len(&self) -> usize {
        self.defs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    #[inline]
    pub fn get(&self, id: BlockId) -> Option<&BlockDef> {
        self.defs.get(id as usize).and_then(|d| d.as_ref())
    }

    #[inline]
    pub fn is_known(&self, id: BlockId) -> bool {
        self.get(id).is_some()
    }

    /// Definition for `id`, or the placeholder definition when undefined.
    #[inline]
    pub fn def(&self, id: BlockId) -> &BlockDef {
        match self.get(id) {
            Some(def) => def,
            None => self.get(ids::UNKNOWN).unwrap_or(&self.placeholder),
        }
    }

    #[inline]
    pub fn color(&self, id: BlockId) -> u32 {
        self.def(id).color
    }

    #[inline]
    pub fn alpha(&self, id: BlockId) -> f32 {
        self.def(id).alpha
    }

    #[inline]
    pub fn flags(&self, id: BlockId) -> BlockFlags {
        self.def(id).flags
    }

    #[inline]
    pub fn name(&self, id: BlockId) -> &str {
        &self.def(id).name
    }

    #[inline]
    pub fn premultiplied(&self, id: BlockId) -> u32 {
        self.def(id).premultiplied()
    }

    #[inline]
    pub fn is_default_color(&self, id: BlockId) -> bool {
        let def = self.def(id);
        def.color == def.default_color
    }

    pub fn id_by_name(&self, name: &str) -> Option<BlockId> {
        self.iter()
            .find(|(_, def)| def.name.eq_ignore_ascii_case(name))
            .map(|(id, _)| id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (BlockId, &BlockDef)> {
        self.defs
            .iter()
            .enumerate()
            .filter_map(|(i, d)| d.as_ref().map(|d| (i as BlockId, d)))
    }

    pub fn set_color(&mut self, id: BlockId, color: u32, alpha: f32) -> Result<(), PaletteError> {
        if !(0.0..=1.0).contains(&alpha) {
            return Err(PaletteError::BadAlpha { id, alpha });
        }
        let def = self
            .defs
            .get_mut(id as usize)
            .and_then(|d| d.as_mut())
            .ok_or(PaletteError::UnknownBlock(id))?;
        def.color = color & 0xff_ffff;
        def.alpha = alpha;
        Ok(())
    }

    /// Apply an RGBA palette (0xRRGGBBAA per entry) to ids `0..colors.len()`.
    ///
    /// Undefined ids are skipped. Returns the number of definitions touched.
    pub fn apply_rgba(&mut self, colors: &[u32]) -> usize {
        let mut touched = 0;
        for (i, &rgba) in colors.iter().enumerate() {
            let Some(Some(def)) = self.defs.get_mut(i) else {
                continue;
            };
            def.color = rgba >> 8;
            def.alpha = (rgba & 0xff) as f32 / 255.0;
            touched += 1;
        }
        touched
    }

    /// Export the active colors in the same RGBA layout `apply_rgba` reads.
    pub fn to_rgba(&self) -> Vec<u32> {
        self.defs
            .iter()
            .map(|d| match d {
                Some(def) => (def.color << 8) | ((def.alpha * 255.0).round() as u32 & 0xff),
                None => 0,
            })
            .collect()
    }
}

impl Default for BlockTable {
    fn default() -> Self {
        Self::standard()
    }
}

const fn f(bits: u32) -> BlockFlags {
    BlockFlags::from_bits_truncate(bits)
}

const WHOLE: BlockFlags = BlockFlags::WHOLE;
const PLANT: BlockFlags = f(BlockFlags::FLATTOP.bits()
    | BlockFlags::SMALL_BILLBOARD.bits()
    | BlockFlags::CUTOUTS.bits());
const STAIRS: BlockFlags = BlockFlags::STAIRS;
const FLUID: BlockFlags = f(BlockFlags::ALMOST_WHOLE.bits() | BlockFlags::TRANSPARENT.bits());

#[rustfmt::skip]
static STANDARD_BLOCKS: &[(BlockId, &str, u32, f32, BlockFlags)] = &[
    (ids::AIR, "Air", 0x000000, 0.0, BlockFlags::empty()),
    (ids::STONE, "Stone", 0x7C7C7C, 1.0, WHOLE),
    (ids::GRASS_BLOCK, "Grass Block", 0x8CBD57, 1.0, WHOLE),
    (ids::DIRT, "Dirt", 0x8C6344, 1.0, WHOLE),
    (ids::COBBLESTONE, "Cobblestone", 0x828282, 1.0, WHOLE),
    (ids::PLANKS, "Oak Planks", 0x9C8149, 1.0, WHOLE),
    (ids::SAPLING, "Oak Sapling", 0x7B9A29, 1.0, PLANT),
    (ids::BEDROCK, "Bedrock", 0x565656, 1.0, WHOLE),
    (ids::WATER, "Water", 0x295DFE, 0.535, FLUID),
    (ids::STATIONARY_WATER, "Stationary Water", 0x295DFE, 0.535, FLUID),
    (ids::LAVA, "Lava", 0xF56D00, 1.0, BlockFlags::ALMOST_WHOLE),
    (ids::STATIONARY_LAVA, "Stationary Lava", 0xF56D00, 1.0, BlockFlags::ALMOST_WHOLE),
    (ids::SAND, "Sand", 0xDCD0A6, 1.0, WHOLE),
    (ids::GRAVEL, "Gravel", 0x857B7B, 1.0, WHOLE),
    (ids::GOLD_ORE, "Gold Ore", 0xFCEE4B, 1.0, WHOLE),
    (ids::IRON_ORE, "Iron Ore", 0xBC9980, 1.0, WHOLE),
    (ids::COAL_ORE, "Coal Ore", 0x343434, 1.0, WHOLE),
    (ids::LOG, "Oak Log", 0x695333, 1.0, f(0x1 | 0x2000)),
    (ids::LEAVES, "Oak Leaves", 0x6FAC2C, 1.0, f(0x1 | 0x1000 | 0x4000)),
    (ids::SPONGE, "Sponge", 0xD1D24E, 1.0, WHOLE),
    (ids::GLASS, "Glass", 0xC0F6FE, 0.5, f(0x1 | 0x1000)),
    (ids::SANDSTONE, "Sandstone", 0xE0D8A6, 1.0, WHOLE),
    (ids::TALL_GRASS, "Short Grass", 0x8CBD57, 1.0, PLANT),
    (ids::DEAD_BUSH, "Dead Bush", 0x946428, 1.0, PLANT),
    (ids::WOOL, "Wool", 0xEEEEEE, 1.0, WHOLE),
    (ids::DANDELION, "Dandelion", 0xD3DD05, 1.0, PLANT),
    (ids::POPPY, "Poppy", 0xCE1A05, 1.0, PLANT),
    (ids::DOUBLE_STONE_SLAB, "Double Stone Slab", 0xA6A6A6, 1.0, WHOLE),
    (ids::STONE_SLAB, "Stone Slab", 0xA5A5A5, 1.0, BlockFlags::HALF),
    (ids::BRICK, "Bricks", 0x985542, 1.0, WHOLE),
    (ids::MOSSY_COBBLESTONE, "Mossy Cobblestone", 0x627162, 1.0, WHOLE),
    (ids::OBSIDIAN, "Obsidian", 0x1B1729, 1.0, WHOLE),
    (ids::TORCH, "Torch", 0xFCFC00, 1.0, f(0x10 | 0x80 | 0x400 | 0x1000)),
    (ids::OAK_STAIRS, "Oak Stairs", 0x9E804F, 1.0, STAIRS),
    (ids::CRAFTING_TABLE, "Crafting Table", 0x825432, 1.0, WHOLE),
    (ids::FURNACE, "Furnace", 0x767677, 1.0, WHOLE),
    (ids::BURNING_FURNACE, "Burning Furnace", 0x777676, 1.0, WHOLE),
    (ids::COBBLESTONE_STAIRS, "Cobblestone Stairs", 0x818181, 1.0, STAIRS),
    (ids::SNOW, "Snow", 0xF0FAFA, 1.0, BlockFlags::FLATTOP),
    (ids::ICE, "Ice", 0x7DACFE, 0.613, f(0x1 | 0x800)),
    (ids::SNOW_BLOCK, "Snow Block", 0xF1FAFA, 1.0, WHOLE),
    (ids::CACTUS, "Cactus", 0x0D6118, 1.0, f(0x2 | 0x20 | 0x1000)),
    (ids::CLAY, "Clay", 0xA2A7B4, 1.0, WHOLE),
    (ids::STAINED_GLASS, "Stained Glass", 0xEFEFEF, 0.5, f(0x1 | 0x800)),
    (ids::STONE_BRICKS, "Stone Bricks", 0x797979, 1.0, WHOLE),
    (ids::GLASS_PANE, "Glass Pane", 0xC0F6FE, 0.5, f(0x40 | 0x1000)),
    (ids::VINES, "Vines", 0x76AB2F, 1.0, f(0x20 | 0x40 | 0x100 | 0x1000)),
    (ids::BRICK_STAIRS, "Brick Stairs", 0xA0807B, 1.0, STAIRS),
    (ids::STONE_BRICK_STAIRS, "Stone Brick Stairs", 0x797979, 1.0, STAIRS),
    (ids::LILY_PAD, "Lily Pad", 0x217F30, 1.0, f(0x80 | 0x1000)),
    (ids::NETHER_BRICK, "Nether Brick", 0x32171C, 1.0, WHOLE),
    (ids::NETHER_BRICK_STAIRS, "Nether Brick Stairs", 0x32171C, 1.0, STAIRS),
    (ids::WOODEN_DOUBLE_SLAB, "Double Oak Slab", 0x9F8150, 1.0, WHOLE),
    (ids::WOODEN_SLAB, "Oak Slab", 0x9F8150, 1.0, BlockFlags::HALF),
    (ids::SANDSTONE_STAIRS, "Sandstone Stairs", 0xE0D8A6, 1.0, STAIRS),
    (ids::COBBLESTONE_WALL, "Cobblestone Wall", 0x828282, 1.0, BlockFlags::MIDDLER),
    (ids::FLOWER_POT, "Flower Pot", 0x7C4536, 1.0, BlockFlags::SMALL_MIDDLER),
    (ids::HEAD, "Mob Head", 0xCACACA, 1.0, BlockFlags::ALMOST_WHOLE),
    (ids::QUARTZ_BLOCK, "Block of Quartz", 0xE0DDD7, 1.0, WHOLE),
    (ids::STAINED_CLAY, "Colored Terracotta", 0xCEAE9E, 1.0, WHOLE),
    (ids::STAINED_GLASS_PANE, "Stained Glass Pane", 0xEFEFEF, 0.5, f(0x40 | 0x800)),
    (ids::AD_LEAVES, "Acacia Leaves", 0x6FAC2C, 1.0, f(0x1 | 0x1000 | 0x4000)),
    (ids::AD_LOG, "Acacia Log", 0x766F64, 1.0, f(0x1 | 0x2000)),
    (ids::PRISMARINE, "Prismarine", 0x66ADA1, 1.0, WHOLE),
    (ids::CARPET, "Carpet", 0xEAEDED, 1.0, BlockFlags::FLATTOP),
    (ids::HARDENED_CLAY, "Terracotta", 0x945A41, 1.0, WHOLE),
    (ids::PACKED_ICE, "Packed Ice", 0x7DACFE, 1.0, WHOLE),
    (ids::DOUBLE_FLOWER, "Sunflower", 0x8CBD57, 1.0, f(0x80 | 0x20 | 0x1000)),
    (ids::RED_SANDSTONE, "Red Sandstone", 0x964C19, 1.0, WHOLE),
    (ids::PURPUR_BLOCK, "Purpur Block", 0xA77BA7, 1.0, WHOLE),
    (ids::CONCRETE, "Concrete", 0xCFD5D6, 1.0, WHOLE),
    (ids::CONCRETE_POWDER, "Concrete Powder", 0xE2E4E4, 1.0, WHOLE),
    (ids::UNKNOWN, "Unknown Block", 0x565656, 1.0, WHOLE),
    (ids::PRISMARINE_STAIRS, "Prismarine Stairs", 0x66ADA1, 1.0, STAIRS),
    (ids::PRISMARINE_BRICK_STAIRS, "Prismarine Brick Stairs", 0x63AB9E, 1.0, STAIRS),
    (ids::DARK_PRISMARINE_STAIRS, "Dark Prismarine Stairs", 0x355F4E, 1.0, STAIRS),
    (ids::SMOOTH_STONE, "Smooth Stone", 0xA0A0A0, 1.0, WHOLE),
    (ids::CORAL_BLOCK, "Coral Block", 0x3257CA, 1.0, WHOLE),
    (ids::DEAD_CORAL_BLOCK, "Dead Coral Block", 0x857E79, 1.0, WHOLE),
    (ids::CORAL, "Coral", 0x3257CA, 1.0, PLANT),
    (ids::CORAL_FAN, "Coral Fan", 0x3257CA, 1.0, PLANT),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undefined_ids_fall_back_to_placeholder() {
        let table = BlockTable::standard();
        assert!(!table.is_known(300));
        assert_eq!(table.name(300), "Unknown Block");
        assert_eq!(table.name(ids::UNKNOWN), "Unknown Block");
    }

    #[test]
    fn premultiply_truncates_each_channel() {
        let table = BlockTable::standard();
        // 0x29 * 0.535 = 21.9, 0x5d * 0.535 = 49.7, 0xfe * 0.535 = 135.9
        assert_eq!(table.premultiplied(ids::WATER), (21 << 16) | (49 << 8) | 135);
        assert_eq!(table.premultiplied(ids::STONE), 0x7C7C7C);
    }

    #[test]
    fn rgba_palette_round_trips_through_table() {
        let mut table = BlockTable::standard();
        let mut rgba = table.to_rgba();
        rgba[ids::STONE as usize] = 0x112233ff;
        rgba[ids::GLASS as usize] = 0xffffff80;
        let touched = table.apply_rgba(&rgba);
        assert_eq!(touched, table.iter().count());
        assert_eq!(table.color(ids::STONE), 0x112233);
        assert!(!table.is_default_color(ids::STONE));
        assert!(table.is_default_color(ids::DIRT));
        assert!((table.alpha(ids::GLASS) - 128.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn set_color_rejects_bad_input() {
        let mut table = BlockTable::standard();
        assert_eq!(
            table.set_color(300, 0, 1.0),
            Err(PaletteError::UnknownBlock(300))
        );
        assert!(matches!(
            table.set_color(ids::STONE, 0, 1.5),
            Err(PaletteError::BadAlpha { .. })
        ));
    }

    #[test]
    fn names_resolve_case_insensitively() {
        let table = BlockTable::standard();
        assert_eq!(table.id_by_name("oak leaves"), Some(ids::LEAVES));
        assert_eq!(table.id_by_name("nope"), None);
    }
}
