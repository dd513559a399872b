use serde::Deserialize;
use std::error::Error;
use std::fs;
use std::path::Path;

/// Settings for [`NoiseWorld`](crate::NoiseWorld), read from TOML.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct WorldConfig {
    #[serde(default)]
    pub terrain: Terrain,
    #[serde(default)]
    pub water: Water,
    #[serde(default)]
    pub trees: Trees,
    #[serde(default)]
    pub biomes: Biomes,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Terrain {
    #[serde(default = "default_seed")]
    pub seed: i32,
    #[serde(default = "default_terrain_freq")]
    pub frequency: f32,
    /// Mean surface height, world y.
    #[serde(default = "default_base")]
    pub base: i32,
    /// Maximum deviation from `base`.
    #[serde(default = "default_amplitude")]
    pub amplitude: i32,
    /// Surfaces at or above this world y are snow covered.
    #[serde(default = "default_snow_line")]
    pub snow_line: i32,
}
fn default_seed() -> i32 {
    1337
}
fn default_terrain_freq() -> f32 {
    0.008
}
fn default_base() -> i32 {
    70
}
fn default_amplitude() -> i32 {
    28
}
fn default_snow_line() -> i32 {
    92
}
impl Default for Terrain {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            frequency: default_terrain_freq(),
            base: default_base(),
            amplitude: default_amplitude(),
            snow_line: default_snow_line(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Water {
    #[serde(default = "default_water_enable")]
    pub enable: bool,
    #[serde(default = "default_water_level")]
    pub level: i32,
}
fn default_water_enable() -> bool {
    true
}
fn default_water_level() -> i32 {
    62
}
impl Default for Water {
    fn default() -> Self {
        Self {
            enable: default_water_enable(),
            level: default_water_level(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Trees {
    /// Chance per grass column of a tree trunk.
    #[serde(default = "default_tree_density")]
    pub density: f32,
}
fn default_tree_density() -> f32 {
    0.02
}
impl Default for Trees {
    fn default() -> Self {
        Self {
            density: default_tree_density(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Biomes {
    #[serde(default = "default_biome_freq")]
    pub frequency: f32,
}
fn default_biome_freq() -> f32 {
    0.002
}
impl Default for Biomes {
    fn default() -> Self {
        Self {
            frequency: default_biome_freq(),
        }
    }
}

impl WorldConfig {
    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: WorldConfig = toml::from_str(toml_str)?;
        Ok(cfg)
    }
}

pub fn load_config_from_path(path: &Path) -> Result<WorldConfig, Box<dyn Error>> {
    let s = fs::read_to_string(path)?;
    WorldConfig::from_toml_str(&s)
}
