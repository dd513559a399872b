//! Palette overrides loaded from TOML.
//!
//! ```toml
//! [[block]]
//! name = "Oak Leaves"
//! color = "#2f8a1c"
//!
//! [[block]]
//! id = 9
//! color = "3060ff"
//! alpha = 0.4
//! ```

use std::error::Error;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::ids::BlockId;
use crate::table::{BlockTable, PaletteError};

#[derive(Clone, Debug, Default, Deserialize)]
pub struct PaletteConfig {
    #[serde(default, rename = "block")]
    pub blocks: Vec<PaletteEntry>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct PaletteEntry {
    #[serde(default)]
    pub id: Option<BlockId>,
    #[serde(default)]
    pub name: Option<String>,
    pub color: String,
    #[serde(default)]
    pub alpha: Option<f32>,
}

pub fn parse_hex_color(s: &str) -> Result<u32, PaletteError> {
    let trimmed = s.trim();
    let digits = trimmed
        .strip_prefix('#')
        .or_else(|| trimmed.strip_prefix("0x"))
        .unwrap_or(trimmed);
    if digits.len() != 6 {
        return Err(PaletteError::BadColor(s.to_string()));
    }
    u32::from_str_radix(digits, 16).map_err(|_| PaletteError::BadColor(s.to_string()))
}

impl PaletteConfig {
    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: PaletteConfig = toml::from_str(toml_str)?;
        Ok(cfg)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    /// Apply every entry to `table`; returns how many entries were applied.
    pub fn apply(&self, table: &mut BlockTable) -> Result<usize, PaletteError> {
        for entry in &self.blocks {
            let id = match (entry.id, entry.name.as_deref()) {
                (Some(id), _) => id,
                (None, Some(name)) => table
                    .id_by_name(name)
                    .ok_or_else(|| PaletteError::UnknownName(name.to_string()))?,
                (None, None) => return Err(PaletteError::UnknownName(String::new())),
            };
            let color = parse_hex_color(&entry.color)?;
            let alpha = entry.alpha.unwrap_or_else(|| table.alpha(id));
            table.set_color(id, color, alpha)?;
        }
        Ok(self.blocks.len())
    }
}
