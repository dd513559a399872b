//! Numeric block identities.
//!
//! Ids below 256 follow the legacy numbering. Ids at 256 and above can only be
//! produced by folding the reserved high data bit into the type byte, which is
//! done once when a chunk is ingested (see [`fold_high_bit`]).

pub type BlockId = u16;

pub const AIR: BlockId = 0;
pub const STONE: BlockId = 1;
pub const GRASS_BLOCK: BlockId = 2;
pub const DIRT: BlockId = 3;
pub const COBBLESTONE: BlockId = 4;
pub const PLANKS: BlockId = 5;
pub const SAPLING: BlockId = 6;
pub const BEDROCK: BlockId = 7;
pub const WATER: BlockId = 8;
pub const STATIONARY_WATER: BlockId = 9;
pub const LAVA: BlockId = 10;
pub const STATIONARY_LAVA: BlockId = 11;
pub const SAND: BlockId = 12;
pub const GRAVEL: BlockId = 13;
pub const GOLD_ORE: BlockId = 14;
pub const IRON_ORE: BlockId = 15;
pub const COAL_ORE: BlockId = 16;
pub const LOG: BlockId = 17;
pub const LEAVES: BlockId = 18;
pub const SPONGE: BlockId = 19;
pub const GLASS: BlockId = 20;
pub const SANDSTONE: BlockId = 24;
pub const TALL_GRASS: BlockId = 31;
pub const DEAD_BUSH: BlockId = 32;
pub const WOOL: BlockId = 35;
pub const DANDELION: BlockId = 37;
pub const POPPY: BlockId = 38;
pub const DOUBLE_STONE_SLAB: BlockId = 43;
pub const STONE_SLAB: BlockId = 44;
pub const BRICK: BlockId = 45;
pub const MOSSY_COBBLESTONE: BlockId = 48;
pub const OBSIDIAN: BlockId = 49;
pub const TORCH: BlockId = 50;
pub const OAK_STAIRS: BlockId = 53;
pub const CRAFTING_TABLE: BlockId = 58;
pub const FURNACE: BlockId = 61;
pub const BURNING_FURNACE: BlockId = 62;
pub const COBBLESTONE_STAIRS: BlockId = 67;
pub const SNOW: BlockId = 78;
pub const ICE: BlockId = 79;
pub const SNOW_BLOCK: BlockId = 80;
pub const CACTUS: BlockId = 81;
pub const CLAY: BlockId = 82;
pub const STAINED_GLASS: BlockId = 95;
pub const STONE_BRICKS: BlockId = 98;
pub const GLASS_PANE: BlockId = 102;
pub const VINES: BlockId = 106;
pub const BRICK_STAIRS: BlockId = 108;
pub const STONE_BRICK_STAIRS: BlockId = 109;
pub const LILY_PAD: BlockId = 111;
pub const NETHER_BRICK: BlockId = 112;
pub const NETHER_BRICK_STAIRS: BlockId = 114;
pub const WOODEN_DOUBLE_SLAB: BlockId = 125;
pub const WOODEN_SLAB: BlockId = 126;
pub const SANDSTONE_STAIRS: BlockId = 128;
pub const COBBLESTONE_WALL: BlockId = 139;
pub const FLOWER_POT: BlockId = 140;
pub const HEAD: BlockId = 144;
pub const QUARTZ_BLOCK: BlockId = 155;
pub const STAINED_CLAY: BlockId = 159;
pub const STAINED_GLASS_PANE: BlockId = 160;
pub const AD_LEAVES: BlockId = 161;
pub const AD_LOG: BlockId = 162;
pub const PRISMARINE: BlockId = 168;
pub const CARPET: BlockId = 171;
pub const HARDENED_CLAY: BlockId = 172;
pub const PACKED_ICE: BlockId = 174;
pub const DOUBLE_FLOWER: BlockId = 175;
pub const RED_SANDSTONE: BlockId = 179;
pub const PURPUR_BLOCK: BlockId = 201;
pub const CONCRETE: BlockId = 251;
pub const CONCRETE_POWDER: BlockId = 252;
pub const UNKNOWN: BlockId = 253;
pub const PRISMARINE_STAIRS: BlockId = 257;
pub const PRISMARINE_BRICK_STAIRS: BlockId = 258;
pub const DARK_PRISMARINE_STAIRS: BlockId = 259;
pub const SMOOTH_STONE: BlockId = 311;
pub const CORAL_BLOCK: BlockId = 315;
pub const DEAD_CORAL_BLOCK: BlockId = 316;
pub const CORAL: BlockId = 317;
pub const CORAL_FAN: BlockId = 318;

/// Highest id the standard catalogue defines.
pub const MAX_BLOCK_ID: BlockId = CORAL_FAN;

/// Data bit that extends the type byte into the 256..512 range.
pub const DATA_HIGH_BIT: u8 = 0x80;
pub const BIT_16: u8 = 0x10;
pub const BIT_32: u8 = 0x20;

/// Types that keep the high data bit for their own state.
#[inline]
pub fn owns_high_bit(type_lo: u8) -> bool {
    let id = BlockId::from(type_lo);
    id == HEAD || id == FLOWER_POT
}

/// Combine a raw type byte and its data byte into a full block id.
///
/// The consumed high bit is cleared from the returned data value.
#[inline]
pub fn fold_high_bit(type_lo: u8, data: u8) -> (BlockId, u8) {
    if data & DATA_HIGH_BIT != 0 && !owns_high_bit(type_lo) {
        (BlockId::from(type_lo) | 0x100, data & !DATA_HIGH_BIT)
    } else {
        (BlockId::from(type_lo), data)
    }
}
