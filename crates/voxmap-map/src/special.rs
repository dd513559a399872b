//! Block types whose map color depends on their data value.

use voxmap_blocks::ids::{self, BIT_16, BIT_32, BlockId};
use voxmap_blocks::{BlockTable, premultiply};

/// Where a voxel's color comes from before light is applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BaseColor {
    /// Light-scaled table entry for the type; light and alpha are already in.
    Table,
    /// Literal color that still needs alpha and light applied.
    Literal(u32),
    /// Color with alpha already folded in; still needs light.
    Premultiplied(u32),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tint {
    None,
    Grass,
    Foliage,
    SwampWater,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpecialColor {
    pub base: BaseColor,
    pub tint: Tint,
}

impl SpecialColor {
    const TABLE: SpecialColor = SpecialColor {
        base: BaseColor::Table,
        tint: Tint::None,
    };

    fn literal(color: u32) -> Self {
        Self {
            base: BaseColor::Literal(color),
            tint: Tint::None,
        }
    }

    fn premultiplied(color: u32) -> Self {
        Self {
            base: BaseColor::Premultiplied(color),
            tint: Tint::None,
        }
    }

    fn tinted(self, tint: Tint) -> Self {
        Self { tint, ..self }
    }
}

#[rustfmt::skip]
const WOOL: [u32; 16] = [
    0, 0xDA8248, 0xBA5EC2, 0x7B96CD, 0xC1B52A, 0x46BA3A, 0xD597A7, 0x434343,
    0xA6ACAC, 0x307592, 0x8643BF, 0x2E3B97, 0x53351F, 0x384B1B, 0xA23732, 0x1D1818,
];

#[rustfmt::skip]
const TERRACOTTA: [u32; 16] = [
    0, 0x9D5021, 0x925469, 0x6D6987, 0xB6801F, 0x647230, 0x9D4A4B, 0x362621,
    0x84665D, 0x535758, 0x734253, 0x473858, 0x4A2F21, 0x484F27, 0x8B392B, 0x21120D,
];

#[rustfmt::skip]
const STAINED_GLASS: [u32; 16] = [
    0, 0xDFBB9D, 0xCFA7DF, 0xB1C5DF, 0xE3E39D, 0xBBD995, 0xE9BBCB, 0xA7A7A7,
    0xC5C5C5, 0xA7BBC5, 0xBBA1CF, 0x9DA7CF, 0xB1A79D, 0xB1BB9D, 0xC59D9D, 0x959595,
];

#[rustfmt::skip]
const CONCRETE: [u32; 16] = [
    0, 0xE06101, 0xA9309F, 0x2489C7, 0xF1AF15, 0x5EA919, 0xD6658F, 0x373A3E,
    0x7D7D73, 0x157788, 0x64209C, 0x2D2F8F, 0x603C20, 0x495B24, 0x8E2121, 0x080A0F,
];

#[rustfmt::skip]
const CONCRETE_POWDER: [u32; 16] = [
    0, 0xE38423, 0xC155B9, 0x4BB5D6, 0xE9C739, 0x7EBD2B, 0xE59AB6, 0x4D5155,
    0x9B9B95, 0x25959D, 0x8438B2, 0x474AA7, 0x7E5536, 0x61782D, 0xA93633, 0x1B1C21,
];

#[rustfmt::skip]
const FLOWERS: [u32; 12] = [
    0, 0x26ABF8, 0xB562F8, 0xE1E7EF, 0xC02905, 0xDE6E20, 0xE4E4E4, 0xE7BBE7,
    0xE7D941, 0x547CAB, 0x93B588, 0x2D3119,
];

const WOOD: [u32; 6] = [0, 0x634C2B, 0xC5B477, 0x9C6E47, 0xAA5A2F, 0x3B260F];
const STONE: [u32; 7] = [0, 0xA77562, 0x946251, 0x9B9B9E, 0xC9C9CD, 0x7F7F83, 0x7F7F84];
const LOGS: [u32; 4] = [0, 0x291806, 0xE2E8DF, 0x584419];
const CORALS: [u32; 5] = [0, 0xC85D9B, 0xA61EA2, 0xAC282F, 0xD2BE40];
const SMOOTH: [u32; 4] = [0, 0xE0D6AB, 0xB66220, 0xECE6DF];

const RED_NETHER_BRICK: u32 = 0x4A0B0D;
const MOSSY_STONE_BRICK: u32 = 0x767B6E;
const END_STONE_BRICK: u32 = 0xDBE2A4;

/// Indexed literal, with index 0 (or out of range) meaning the table color.
fn indexed(table: &[u32], idx: u8) -> SpecialColor {
    match table.get(idx as usize) {
        Some(&color) if idx != 0 => SpecialColor::literal(color),
        _ => SpecialColor::TABLE,
    }
}

/// Stair variants keyed by the BIT_16/BIT_32 pair.
#[derive(Clone, Copy)]
enum Variant {
    Literal(u32),
    Other(BlockId),
}

fn stair_variant(blocks: &BlockTable, data: u8, variants: [Variant; 3]) -> SpecialColor {
    let slot = match (data & BIT_16 != 0, data & BIT_32 != 0) {
        (false, false) => return SpecialColor::TABLE,
        (true, false) => 0,
        (false, true) => 1,
        (true, true) => 2,
    };
    match variants[slot] {
        Variant::Literal(c) => SpecialColor::literal(c),
        Variant::Other(id) => SpecialColor::premultiplied(blocks.premultiplied(id)),
    }
}

/// Classify how a voxel's color is produced.
///
/// `data_below` is the data value one layer down, used by two-block plants
/// whose subtype lives in their lower half.
pub fn classify(blocks: &BlockTable, id: BlockId, data: u8, data_below: Option<u8>) -> SpecialColor {
    use Variant::{Literal, Other};

    match id {
        ids::WOOL | ids::CARPET => indexed(&WOOL, data & 0xf),
        ids::STAINED_CLAY => indexed(&TERRACOTTA, data & 0xf),
        ids::STAINED_GLASS | ids::STAINED_GLASS_PANE => match indexed(&STAINED_GLASS, data & 0xf) {
            SpecialColor {
                base: BaseColor::Literal(c),
                ..
            } => SpecialColor::premultiplied(premultiply(c, blocks.alpha(id))),
            other => other,
        },
        ids::PLANKS | ids::WOODEN_SLAB | ids::WOODEN_DOUBLE_SLAB => indexed(&WOOD, data & 0x7),
        ids::STONE => indexed(&STONE, data),
        ids::SAND => indexed(&[0, 0xA85420], data),
        ids::SPONGE => indexed(&[0, 0x999829], data),
        ids::LOG => indexed(&LOGS, data & 0x3),
        ids::AD_LOG => indexed(&[0, 0x342816], data & 0x3),
        ids::LEAVES => match data & 0x3 {
            1 => SpecialColor::literal(0x3D623D),
            2 => SpecialColor::literal(0x6B8D46),
            species => {
                let base = if blocks.is_default_color(id) {
                    SpecialColor::literal(if species == 3 { 0x46AD19 } else { 0x3A7F1B })
                } else {
                    SpecialColor::TABLE
                };
                base.tinted(Tint::Foliage)
            }
        },
        ids::AD_LEAVES => {
            let base = if blocks.is_default_color(id) {
                SpecialColor::literal(if data & 0x1 != 0 { 0x2C6F0F } else { 0x3D9A14 })
            } else {
                SpecialColor::TABLE
            };
            base.tinted(Tint::Foliage)
        }
        ids::TALL_GRASS => match data & 0x3 {
            0 => SpecialColor::literal(0x946428),
            _ => SpecialColor::TABLE.tinted(Tint::Grass),
        },
        ids::GRASS_BLOCK | ids::VINES => SpecialColor::TABLE.tinted(Tint::Grass),
        ids::STONE_SLAB | ids::DOUBLE_STONE_SLAB => {
            let other = match data {
                1 | 9 => Some(ids::SANDSTONE),
                2 => Some(ids::PLANKS),
                3 | 11 => Some(ids::COBBLESTONE),
                4 | 12 => Some(ids::BRICK),
                5 | 13 => Some(ids::STONE_BRICKS),
                6 | 14 => Some(ids::NETHER_BRICK),
                7 | 15 => Some(ids::QUARTZ_BLOCK),
                10 if id == ids::DOUBLE_STONE_SLAB => Some(ids::QUARTZ_BLOCK),
                10 => Some(ids::PLANKS),
                _ => None,
            };
            match other {
                Some(other) => SpecialColor::premultiplied(blocks.premultiplied(other)),
                None => SpecialColor::TABLE,
            }
        }
        ids::POPPY => indexed(&FLOWERS, data),
        ids::DOUBLE_FLOWER => match data_below.unwrap_or(data) & 0x7 {
            1 => SpecialColor::literal(0xB79ABB),
            2 | 3 => SpecialColor::TABLE.tinted(Tint::Grass),
            4 => SpecialColor::literal(0xF4210B),
            5 => SpecialColor::literal(0xE3BCF4),
            _ => SpecialColor::literal(0xEAD31F),
        },
        ids::WATER | ids::STATIONARY_WATER => {
            SpecialColor::literal(blocks.color(id)).tinted(Tint::SwampWater)
        }
        ids::CONCRETE => indexed(&CONCRETE, data & 0xf),
        ids::CONCRETE_POWDER => indexed(&CONCRETE_POWDER, data & 0xf),
        ids::CORAL_BLOCK | ids::CORAL | ids::CORAL_FAN => indexed(&CORALS, data & 0x7),
        ids::SMOOTH_STONE => indexed(&SMOOTH, data & 0x3),
        ids::COBBLESTONE_STAIRS => stair_variant(
            blocks,
            data,
            [Other(ids::STONE), Literal(0xA77562), Literal(0x946251)],
        ),
        ids::BRICK_STAIRS => stair_variant(
            blocks,
            data,
            [Other(ids::QUARTZ_BLOCK), Literal(0x9B9B9E), Literal(0xC9C9CD)],
        ),
        ids::STONE_BRICK_STAIRS => stair_variant(
            blocks,
            data,
            [Literal(END_STONE_BRICK), Literal(0x7F7F83), Literal(0x7F7F84)],
        ),
        ids::NETHER_BRICK_STAIRS => stair_variant(
            blocks,
            data,
            [
                Literal(RED_NETHER_BRICK),
                Literal(MOSSY_STONE_BRICK),
                Other(ids::MOSSY_COBBLESTONE),
            ],
        ),
        ids::SANDSTONE_STAIRS => match data & (BIT_16 | BIT_32) {
            BIT_16 => SpecialColor::literal(0xE0D6AB),
            BIT_32 => SpecialColor::literal(0xB66220),
            _ => SpecialColor::TABLE,
        },
        ids::COBBLESTONE_WALL => match data & 0xf {
            1 => SpecialColor::premultiplied(blocks.premultiplied(ids::MOSSY_COBBLESTONE)),
            2 => SpecialColor::premultiplied(blocks.premultiplied(ids::BRICK)),
            3 => SpecialColor::literal(0xA77562),
            4 => SpecialColor::literal(0x9B9B9E),
            5 => SpecialColor::literal(0x7F7F83),
            6 => SpecialColor::premultiplied(blocks.premultiplied(ids::PRISMARINE)),
            7 => SpecialColor::premultiplied(blocks.premultiplied(ids::STONE_BRICKS)),
            8 => SpecialColor::literal(MOSSY_STONE_BRICK),
            9 => SpecialColor::literal(END_STONE_BRICK),
            10 => SpecialColor::premultiplied(blocks.premultiplied(ids::NETHER_BRICK)),
            11 => SpecialColor::literal(RED_NETHER_BRICK),
            12 => SpecialColor::literal(0xD9CC9E),
            13 => SpecialColor::literal(0xBC6420),
            _ => SpecialColor::TABLE,
        },
        ids::PRISMARINE => match data & 0xf {
            1 => SpecialColor::premultiplied(blocks.premultiplied(ids::PRISMARINE_BRICK_STAIRS)),
            2 => SpecialColor::premultiplied(blocks.premultiplied(ids::DARK_PRISMARINE_STAIRS)),
            _ => SpecialColor::TABLE,
        },
        ids::FURNACE | ids::BURNING_FURNACE => match data & (BIT_16 | BIT_32) {
            BIT_16 => SpecialColor::literal(0x9A836C),
            BIT_32 => SpecialColor::literal(0x5C5A59),
            0 => SpecialColor::TABLE,
            _ => SpecialColor::literal(0x535253),
        },
        ids::CRAFTING_TABLE => indexed(&[0, 0x81756D, 0xC8B78C, 0x3B3C49], data & 0xf),
        _ => SpecialColor::TABLE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_types_use_the_table() {
        let b = BlockTable::standard();
        assert_eq!(classify(&b, ids::DIRT, 0, None), SpecialColor::TABLE);
        assert_eq!(classify(&b, ids::WOOL, 0, None), SpecialColor::TABLE);
        assert_eq!(classify(&b, ids::POPPY, 30, None), SpecialColor::TABLE);
    }

    #[test]
    fn stained_glass_literal_is_premultiplied_once() {
        let b = BlockTable::standard();
        let got = classify(&b, ids::STAINED_GLASS, 15, None);
        assert_eq!(got.base, BaseColor::Premultiplied(premultiply(0x959595, 0.5)));
    }

    #[test]
    fn double_flower_reads_lower_half() {
        let b = BlockTable::standard();
        assert_eq!(
            classify(&b, ids::DOUBLE_FLOWER, 0x8, Some(4)).base,
            BaseColor::Literal(0xF4210B)
        );
        assert_eq!(
            classify(&b, ids::DOUBLE_FLOWER, 0x8, Some(3)),
            SpecialColor::TABLE.tinted(Tint::Grass)
        );
    }

    #[test]
    fn leaves_switch_to_table_once_recolored() {
        let mut b = BlockTable::standard();
        assert_eq!(
            classify(&b, ids::LEAVES, 3, None),
            SpecialColor::literal(0x46AD19).tinted(Tint::Foliage)
        );
        b.set_color(ids::LEAVES, 0x123456, 1.0).unwrap();
        assert_eq!(
            classify(&b, ids::LEAVES, 0, None),
            SpecialColor::TABLE.tinted(Tint::Foliage)
        );
        assert_eq!(classify(&b, ids::LEAVES, 1, None), SpecialColor::literal(0x3D623D));
    }

    #[test]
    fn slabs_borrow_other_materials() {
        let b = BlockTable::standard();
        assert_eq!(
            classify(&b, ids::STONE_SLAB, 4, None).base,
            BaseColor::Premultiplied(b.premultiplied(ids::BRICK))
        );
        assert_eq!(classify(&b, ids::STONE_SLAB, 8, None), SpecialColor::TABLE);
    }

    #[test]
    fn stair_and_furnace_variants_use_data_bits() {
        let b = BlockTable::standard();
        assert_eq!(
            classify(&b, ids::COBBLESTONE_STAIRS, BIT_16 | 0x2, None).base,
            BaseColor::Premultiplied(b.premultiplied(ids::STONE))
        );
        assert_eq!(
            classify(&b, ids::BURNING_FURNACE, BIT_16 | BIT_32, None).base,
            BaseColor::Literal(0x535253)
        );
    }
}
