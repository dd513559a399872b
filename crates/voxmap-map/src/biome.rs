//! Biome tints for grass, foliage and swamp water.

pub const SWAMP: u8 = 6;
pub const DARK_FOREST: u8 = 29;
pub const BADLANDS: u8 = 37;
pub const WOODED_BADLANDS_PLATEAU: u8 = 38;
pub const BADLANDS_PLATEAU: u8 = 39;
pub const PALE_GARDEN: u8 = 51;
pub const WOODED_BADLANDS: u8 = 52;
pub const MANGROVE_SWAMP: u8 = 53;
pub const CHERRY_GROVE: u8 = 55;

/// Source of biome tint colors (0xRRGGBB).
///
/// `elevation` is blocks above the reference height and is never negative;
/// zero means "use the precomputed color".
pub trait BiomeColors {
    fn grass(&self, biome: u8, elevation: i32) -> u32;
    fn foliage(&self, biome: u8, elevation: i32) -> u32;
    /// Whether water in this biome takes the swamp modifier.
    fn tints_water(&self, biome: u8) -> bool {
        matches!(biome & 0x7f, SWAMP | MANGROVE_SWAMP)
    }
}

/// Swamp water modifier 0xE0FFAE applied to a base water color.
pub fn swamp_water_tint(color: u32) -> u32 {
    let r = ((color >> 16) & 0xff) * 0xE0 / 255;
    let g = (color >> 8) & 0xff;
    let b = (color & 0xff) * 0xAE / 255;
    (r << 16) | (g << 8) | b
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Climate {
    pub temperature: f32,
    pub rainfall: f32,
}

const fn c(temperature: f32, rainfall: f32) -> Climate {
    Climate {
        temperature,
        rainfall,
    }
}

const DEFAULT_CLIMATE: Climate = c(0.8, 0.4);

#[rustfmt::skip]
static CLIMATES: [Climate; 56] = [
    c(0.5, 0.5), c(0.8, 0.4), c(2.0, 0.0), c(0.2, 0.3), c(0.7, 0.8), c(0.25, 0.8), c(0.8, 0.9), c(0.5, 0.5),
    c(2.0, 0.0), c(0.5, 0.5), c(0.0, 0.5), c(0.0, 0.5), c(0.0, 0.5), c(0.0, 0.5), c(0.9, 1.0), c(0.9, 1.0),
    c(0.8, 0.4), c(2.0, 0.0), c(0.7, 0.8), c(0.25, 0.8), c(0.2, 0.3), c(0.95, 0.9), c(0.95, 0.9), c(0.95, 0.8),
    c(0.5, 0.5), c(0.2, 0.3), c(0.05, 0.3), c(0.6, 0.6), c(0.6, 0.6), c(0.7, 0.8), c(-0.5, 0.4), c(-0.5, 0.4),
    c(0.3, 0.8), c(0.3, 0.8), c(0.2, 0.3), c(1.2, 0.0), c(1.0, 0.0), c(2.0, 0.0), c(2.0, 0.0), c(2.0, 0.0),
    c(0.5, 0.5), c(0.5, 0.5), c(0.5, 0.5), c(0.5, 0.5), c(0.5, 0.5), c(0.5, 0.5), c(0.5, 0.5), c(0.5, 0.5),
    c(0.5, 0.5), c(0.5, 0.5), c(0.5, 0.5), c(0.7, 0.8), c(2.0, 0.0), c(0.8, 0.9), c(0.8, 0.4), c(0.5, 0.8),
];

type Corners = [[f32; 3]; 3];

// Lower left, lower right and upper left of the temperature/rainfall triangle.
const GRASS_CORNERS: Corners = [[191.0, 183.0, 85.0], [128.0, 180.0, 151.0], [71.0, 205.0, 51.0]];
const FOLIAGE_CORNERS: Corners = [[174.0, 164.0, 42.0], [96.0, 161.0, 123.0], [26.0, 191.0, 0.0]];

fn triangle_color(climate: Climate, elevation: i32, corners: &Corners) -> u32 {
    let temperature = (climate.temperature - elevation as f32 * 0.001_666_67).clamp(0.0, 1.0);
    let rainfall = climate.rainfall.clamp(0.0, 1.0) * temperature;
    let lambda = [temperature - rainfall, 1.0 - temperature, rainfall];
    let mut rgb = [0.0f32; 3];
    for (l, corner) in lambda.iter().zip(corners) {
        for (acc, ch) in rgb.iter_mut().zip(corner) {
            *acc += l * ch;
        }
    }
    let [r, g, b] = rgb.map(|v| v.clamp(0.0, 255.0) as u32);
    (r << 16) | (g << 8) | b
}

/// Biome colors for the common biome ids, computed from each biome's
/// temperature and rainfall with a few hard-wired exceptions.
#[derive(Clone, Debug)]
pub struct StandardBiomes {
    grass: [u32; 256],
    foliage: [u32; 256],
}

impl StandardBiomes {
    pub fn new() -> Self {
        let mut grass = [0u32; 256];
        let mut foliage = [0u32; 256];
        for biome in 0..=255u8 {
            grass[biome as usize] = Self::compute(biome, 0, true);
            foliage[biome as usize] = Self::compute(biome, 0, false);
        }
        Self { grass, foliage }
    }

    pub fn climate(biome: u8) -> Climate {
        CLIMATES
            .get((biome & 0x7f) as usize)
            .copied()
            .unwrap_or(DEFAULT_CLIMATE)
    }

    fn compute(biome: u8, elevation: i32, is_grass: bool) -> u32 {
        let climate = Self::climate(biome);
        let corners = if is_grass {
            &GRASS_CORNERS
        } else {
            &FOLIAGE_CORNERS
        };
        match biome & 0x7f {
            SWAMP => 0x6a7039,
            MANGROVE_SWAMP => {
                if is_grass {
                    0x6a7039
                } else {
                    0x8db127
                }
            }
            DARK_FOREST if is_grass => {
                let color = triangle_color(climate, elevation, corners);
                ((color & 0xfefefe) + 0x28340a) / 2
            }
            BADLANDS | WOODED_BADLANDS_PLATEAU | BADLANDS_PLATEAU | WOODED_BADLANDS => {
                if is_grass {
                    0x90814d
                } else {
                    0x9e814d
                }
            }
            PALE_GARDEN => {
                if is_grass {
                    0x778272
                } else {
                    0x878d76
                }
            }
            CHERRY_GROVE => 0xb6db61,
            _ => triangle_color(climate, elevation, corners),
        }
    }
}

impl Default for StandardBiomes {
    fn default() -> Self {
        Self::new()
    }
}

impl BiomeColors for StandardBiomes {
    fn grass(&self, biome: u8, elevation: i32) -> u32 {
        if elevation > 0 {
            Self::compute(biome, elevation, true)
        } else {
            self.grass[biome as usize]
        }
    }

    fn foliage(&self, biome: u8, elevation: i32) -> u32 {
        if elevation > 0 {
            Self::compute(biome, elevation, false)
        } else {
            self.foliage[biome as usize]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swamp_tint_scales_red_and_blue() {
        assert_eq!(swamp_water_tint(0xffffff), 0xe0ffae);
        assert_eq!(swamp_water_tint(0x000000), 0);
    }

    #[test]
    fn hard_wired_biomes() {
        let b = StandardBiomes::new();
        assert_eq!(b.foliage(SWAMP, 0), 0x6a7039);
        assert_eq!(b.grass(MANGROVE_SWAMP, 0), 0x6a7039);
        assert_eq!(b.foliage(MANGROVE_SWAMP, 0), 0x8db127);
        assert_eq!(b.grass(BADLANDS, 0), 0x90814d);
        assert_eq!(b.foliage(CHERRY_GROVE, 40), 0xb6db61);
        assert!(b.tints_water(SWAMP | 0x80));
        assert!(b.tints_water(MANGROVE_SWAMP));
        assert!(!b.tints_water(1));
        // variant ids take the same hard-wired colors as their base biome
        assert_eq!(b.grass(SWAMP | 0x80, 0), 0x6a7039);
        assert_eq!(b.grass(BADLANDS | 0x80, 0), 0x90814d);
    }

    #[test]
    fn desert_grass_is_the_hot_corner() {
        // temperature clamps to 1 and rainfall is 0, so only the first corner contributes
        let b = StandardBiomes::new();
        assert_eq!(b.grass(2, 0), (191 << 16) | (183 << 8) | 85);
    }

    #[test]
    fn elevation_cools_the_tint() {
        let b = StandardBiomes::new();
        let plains = b.grass(1, 0);
        let high = b.grass(1, 200);
        assert_ne!(plains, high);
        // cooler means more weight on the lower-right corner's blue channel
        assert!((high & 0xff) > (plains & 0xff));
    }
}
