use serde::Deserialize;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use voxmap_chunk::WorldExtent;
use voxmap_map::RenderOptions;

/// Contents of `voxmap.toml`. Every value can be overridden on the command line.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct MapConfig {
    #[serde(default)]
    pub view: ViewConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub world: WorldSection,
    #[serde(default)]
    pub palette: Option<PathBuf>,
    #[serde(default)]
    pub log_level: Option<String>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ViewConfig {
    #[serde(default)]
    pub center: [f64; 2],
    #[serde(default = "default_zoom")]
    pub zoom: f64,
    #[serde(default = "default_size")]
    pub width: usize,
    #[serde(default = "default_size")]
    pub height: usize,
    /// Highest world y drawn; the top of the world when absent.
    #[serde(default)]
    pub top_y: Option<i32>,
}
fn default_zoom() -> f64 {
    2.0
}
fn default_size() -> usize {
    512
}
impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            center: [0.0, 0.0],
            zoom: default_zoom(),
            width: default_size(),
            height: default_size(),
            top_y: None,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct RenderConfig {
    /// Option names, e.g. `["depth-shading", "lighting"]`.
    #[serde(default = "default_options")]
    pub options: Vec<String>,
    #[serde(default)]
    pub exact: bool,
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,
}
fn default_options() -> Vec<String> {
    vec!["depth-shading".into(), "lighting".into(), "biomes".into()]
}
fn default_cache_capacity() -> usize {
    4096
}
impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            options: default_options(),
            exact: false,
            cache_capacity: default_cache_capacity(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum WorldKind {
    Flat,
    #[default]
    Noise,
    /// Per-chunk files in `world.dir`.
    Raw,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExtentKind {
    /// y 0..256
    Legacy,
    /// y -64..320
    #[default]
    Modern,
}

impl ExtentKind {
    pub fn extent(self) -> WorldExtent {
        match self {
            ExtentKind::Legacy => WorldExtent::LEGACY,
            ExtentKind::Modern => WorldExtent::MODERN,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct WorldSection {
    #[serde(default)]
    pub kind: WorldKind,
    #[serde(default)]
    pub extent: ExtentKind,
    /// TOML file for the noise generator.
    #[serde(default)]
    pub config: Option<PathBuf>,
    /// Directory of chunk files for the raw world.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

impl MapConfig {
    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: MapConfig = toml::from_str(toml_str)?;
        Ok(cfg)
    }
}

pub fn load_config_from_path(path: &Path) -> Result<MapConfig, Box<dyn Error>> {
    let s = fs::read_to_string(path)?;
    MapConfig::from_toml_str(&s)
}

/// Combine option names into flags, rejecting unknown names.
pub fn parse_options<S: AsRef<str>>(names: &[S]) -> Result<RenderOptions, String> {
    names.iter().try_fold(RenderOptions::empty(), |acc, name| {
        let name = name.as_ref();
        RenderOptions::parse_name(name)
            .map(|o| acc | o)
            .ok_or_else(|| format!("unknown render option '{name}'"))
    })
}
