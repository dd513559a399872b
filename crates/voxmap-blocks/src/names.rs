//! Display names for data-dependent block subtypes.

use crate::ids::{self, BIT_16, BIT_32, BlockId};
use crate::table::BlockTable;

pub const COLOR_NAMES: [&str; 16] = [
    "White", "Orange", "Magenta", "Light Blue", "Yellow", "Lime", "Pink", "Gray",
    "Light Gray", "Cyan", "Purple", "Blue", "Brown", "Green", "Red", "Black",
];

const WOOD_NAMES: [&str; 6] = ["Oak", "Spruce", "Birch", "Jungle", "Acacia", "Dark Oak"];

const STONE_NAMES: [&str; 7] = [
    "Stone",
    "Granite",
    "Polished Granite",
    "Diorite",
    "Polished Diorite",
    "Andesite",
    "Polished Andesite",
];

const SLAB_NAMES: [&str; 8] = [
    "Smooth Stone",
    "Sandstone",
    "Petrified Oak",
    "Cobblestone",
    "Brick",
    "Stone Brick",
    "Nether Brick",
    "Quartz",
];

const FLOWER_NAMES: [&str; 12] = [
    "Poppy",
    "Blue Orchid",
    "Allium",
    "Azure Bluet",
    "Red Tulip",
    "Orange Tulip",
    "White Tulip",
    "Pink Tulip",
    "Oxeye Daisy",
    "Cornflower",
    "Lily of the Valley",
    "Wither Rose",
];

const DOUBLE_FLOWER_NAMES: [&str; 6] = [
    "Sunflower",
    "Lilac",
    "Tall Grass",
    "Large Fern",
    "Rose Bush",
    "Peony",
];

const WALL_NAMES: [&str; 14] = [
    "Cobblestone",
    "Mossy Cobblestone",
    "Brick",
    "Granite",
    "Diorite",
    "Andesite",
    "Prismarine",
    "Stone Brick",
    "Mossy Stone Brick",
    "End Stone Brick",
    "Nether Brick",
    "Red Nether Brick",
    "Sandstone",
    "Red Sandstone",
];

const CORAL_NAMES: [&str; 5] = ["Tube", "Brain", "Bubble", "Fire", "Horn"];

fn colored(data: u8, suffix: &str) -> String {
    format!("{} {}", COLOR_NAMES[(data & 0xf) as usize], suffix)
}

fn pick<'a>(table: &'a [&'a str], idx: u8) -> Option<&'a str> {
    table.get(idx as usize).copied()
}

fn stair_variant(id: BlockId, data: u8) -> Option<&'static str> {
    let variants: [&str; 3] = match id {
        ids::COBBLESTONE_STAIRS => ["Stone Stairs", "Granite Stairs", "Polished Granite Stairs"],
        ids::BRICK_STAIRS => ["Smooth Quartz Stairs", "Diorite Stairs", "Polished Diorite Stairs"],
        ids::STONE_BRICK_STAIRS => [
            "End Stone Brick Stairs",
            "Andesite Stairs",
            "Polished Andesite Stairs",
        ],
        ids::NETHER_BRICK_STAIRS => [
            "Red Nether Brick Stairs",
            "Mossy Stone Brick Stairs",
            "Mossy Cobblestone Stairs",
        ],
        ids::SANDSTONE_STAIRS => [
            "Smooth Sandstone Stairs",
            "Smooth Red Sandstone Stairs",
            "Sandstone Stairs",
        ],
        _ => return None,
    };
    match (data & BIT_16 != 0, data & BIT_32 != 0) {
        (false, false) => None,
        (true, false) => Some(variants[0]),
        (false, true) => Some(variants[1]),
        (true, true) => Some(variants[2]),
    }
}

/// Human readable name for `id` with data value `data`.
///
/// Falls back to the catalogue name when the data value carries no subtype.
pub fn subtype_name(table: &BlockTable, id: BlockId, data: u8) -> String {
    let named = match id {
        ids::STONE => pick(&STONE_NAMES, data).map(str::to_string),
        ids::DIRT => match data {
            1 => Some("Coarse Dirt".to_string()),
            2 => Some("Podzol".to_string()),
            _ => None,
        },
        ids::PLANKS => pick(&WOOD_NAMES, data & 0x7).map(|w| format!("{w} Planks")),
        ids::WOODEN_SLAB => pick(&WOOD_NAMES, data & 0x7).map(|w| format!("{w} Slab")),
        ids::WOODEN_DOUBLE_SLAB => pick(&WOOD_NAMES, data & 0x7).map(|w| format!("Double {w} Slab")),
        ids::SAND if data == 1 => Some("Red Sand".to_string()),
        ids::LOG => pick(&WOOD_NAMES, data & 0x3).map(|w| format!("{w} Log")),
        ids::LEAVES => pick(&WOOD_NAMES, data & 0x3).map(|w| format!("{w} Leaves")),
        ids::AD_LOG => pick(&WOOD_NAMES, 4 + (data & 0x1)).map(|w| format!("{w} Log")),
        ids::AD_LEAVES => pick(&WOOD_NAMES, 4 + (data & 0x1)).map(|w| format!("{w} Leaves")),
        ids::SPONGE if data == 1 => Some("Wet Sponge".to_string()),
        ids::TALL_GRASS => match data & 0x3 {
            0 => Some("Dead Bush".to_string()),
            2 => Some("Fern".to_string()),
            _ => Some("Tall Grass".to_string()),
        },
        ids::WOOL => Some(colored(data, "Wool")),
        ids::CARPET => Some(colored(data, "Carpet")),
        ids::STAINED_CLAY => Some(colored(data, "Terracotta")),
        ids::STAINED_GLASS => Some(colored(data, "Stained Glass")),
        ids::STAINED_GLASS_PANE => Some(colored(data, "Stained Glass Pane")),
        ids::CONCRETE => Some(colored(data, "Concrete")),
        ids::CONCRETE_POWDER => Some(colored(data, "Concrete Powder")),
        ids::POPPY => pick(&FLOWER_NAMES, data).map(str::to_string),
        ids::DOUBLE_FLOWER => pick(&DOUBLE_FLOWER_NAMES, data & 0x7).map(str::to_string),
        ids::STONE_SLAB => pick(&SLAB_NAMES, data & 0x7).map(|m| format!("{m} Slab")),
        ids::DOUBLE_STONE_SLAB => {
            pick(&SLAB_NAMES, data & 0x7).map(|m| format!("Double {m} Slab"))
        }
        ids::COBBLESTONE_WALL => pick(&WALL_NAMES, data).map(|m| format!("{m} Wall")),
        ids::FURNACE | ids::BURNING_FURNACE => match (data & BIT_16 != 0, data & BIT_32 != 0) {
            (true, false) => Some("Loom".to_string()),
            (false, true) => Some("Smoker".to_string()),
            (true, true) => Some("Blast Furnace".to_string()),
            (false, false) => None,
        },
        ids::COBBLESTONE_STAIRS
        | ids::BRICK_STAIRS
        | ids::STONE_BRICK_STAIRS
        | ids::NETHER_BRICK_STAIRS
        | ids::SANDSTONE_STAIRS => stair_variant(id, data).map(str::to_string),
        ids::CRAFTING_TABLE => match data & 0xf {
            1 => Some("Cartography Table".to_string()),
            2 => Some("Fletching Table".to_string()),
            3 => Some("Smithing Table".to_string()),
            _ => None,
        },
        ids::PRISMARINE => match data {
            1 => Some("Prismarine Bricks".to_string()),
            2 => Some("Dark Prismarine".to_string()),
            _ => None,
        },
        ids::SMOOTH_STONE => match data & 0x3 {
            1 => Some("Smooth Sandstone".to_string()),
            2 => Some("Smooth Red Sandstone".to_string()),
            3 => Some("Smooth Quartz".to_string()),
            _ => None,
        },
        ids::CORAL_BLOCK => pick(&CORAL_NAMES, data & 0x7).map(|c| format!("{c} Coral Block")),
        ids::CORAL => pick(&CORAL_NAMES, data & 0x7).map(|c| format!("{c} Coral")),
        ids::CORAL_FAN => pick(&CORAL_NAMES, data & 0x7).map(|c| format!("{c} Coral Fan")),
        _ => None,
    };
    named.unwrap_or_else(|| table.name(id).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_selects_subtype() {
        let t = BlockTable::standard();
        assert_eq!(subtype_name(&t, ids::LEAVES, 2), "Birch Leaves");
        assert_eq!(subtype_name(&t, ids::LEAVES, 0x6), "Birch Leaves");
        assert_eq!(subtype_name(&t, ids::TALL_GRASS, 0), "Dead Bush");
        assert_eq!(subtype_name(&t, ids::WOOL, 14), "Red Wool");
        assert_eq!(subtype_name(&t, ids::FURNACE, BIT_16 | BIT_32), "Blast Furnace");
        assert_eq!(subtype_name(&t, ids::CRAFTING_TABLE, 3), "Smithing Table");
        assert_eq!(subtype_name(&t, ids::CORAL_BLOCK, 4), "Horn Coral Block");
        assert_eq!(subtype_name(&t, ids::COBBLESTONE_STAIRS, BIT_32 | 0x3), "Granite Stairs");
    }

    #[test]
    fn plain_data_falls_back_to_catalogue_name() {
        let t = BlockTable::standard();
        assert_eq!(subtype_name(&t, ids::FURNACE, 2), "Furnace");
        assert_eq!(subtype_name(&t, ids::GRASS_BLOCK, 0), "Grass Block");
        assert_eq!(subtype_name(&t, ids::POPPY, 40), "Poppy");
        assert_eq!(subtype_name(&t, 299, 0), "Unknown Block");
    }
}
