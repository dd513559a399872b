use bitflags::bitflags;

bitflags! {
    /// Draw settings. The raw bits are part of every tile's cache key.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct RenderOptions: u32 {
        const CAVE_MODE = 0x1;
        const HIDE_OBSCURED = 0x2;
        const DEPTH_SHADING = 0x4;
        const LIGHTING = 0x8;
        const SHOW_ALL = 0x80;
        const BIOMES = 0x100;
        const TRANSPARENT_WATER = 0x200;
        const GRID = 0x400;
    }
}

impl RenderOptions {
    #[inline]
    pub fn show_obscured(self) -> bool {
        !self.contains(RenderOptions::HIDE_OBSCURED)
    }

    /// Parse a single option name as written in config files and on the
    /// command line, e.g. `cave-mode` or `depth_shading`.
    pub fn parse_name(name: &str) -> Option<RenderOptions> {
        let key = name.trim().to_ascii_lowercase().replace('-', "_");
        let opt = match key.as_str() {
            "cave_mode" | "cave" => RenderOptions::CAVE_MODE,
            "hide_obscured" => RenderOptions::HIDE_OBSCURED,
            "depth_shading" | "depth" => RenderOptions::DEPTH_SHADING,
            "lighting" => RenderOptions::LIGHTING,
            "show_all" => RenderOptions::SHOW_ALL,
            "biomes" => RenderOptions::BIOMES,
            "transparent_water" => RenderOptions::TRANSPARENT_WATER,
            "grid" => RenderOptions::GRID,
            _ => return None,
        };
        Some(opt)
    }
}
