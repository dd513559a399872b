//! The map renderer context: palette, color table, biome source and
//! highlight state shared by every draw and pick.

use voxmap_blocks::{BlockTable, PaletteConfig};
use voxmap_chunk::WorldExtent;

use crate::biome::{BiomeColors, StandardBiomes};
use crate::color::{ColorResolver, ColorTable};
use crate::composite::Compositor;
use crate::error::MapError;
use crate::highlight::{BlankTiles, HighlightState, UndoMode};
use crate::options::RenderOptions;
use crate::render_cache::{RenderKey, RenderPass};

pub struct MapRenderer {
    extent: WorldExtent,
    blocks: BlockTable,
    colors: ColorTable,
    colormap_version: u64,
    biomes: Box<dyn BiomeColors>,
    highlight: HighlightState,
    blank: BlankTiles,
}

impl MapRenderer {
    pub fn new(extent: WorldExtent) -> Self {
        Self::with_blocks(extent, BlockTable::standard())
    }

    pub fn with_blocks(extent: WorldExtent, blocks: BlockTable) -> Self {
        let colors = ColorTable::build(&blocks);
        Self {
            extent,
            blocks,
            colors,
            colormap_version: 0,
            biomes: Box::new(StandardBiomes::new()),
            highlight: HighlightState::new(extent),
            blank: BlankTiles::new(),
        }
    }

    pub fn with_biomes(mut self, biomes: Box<dyn BiomeColors>) -> Self {
        self.biomes = biomes;
        self.bump_colormap();
        self
    }

    #[inline]
    pub fn extent(&self) -> WorldExtent {
        self.extent
    }

    #[inline]
    pub fn blocks(&self) -> &BlockTable {
        &self.blocks
    }

    #[inline]
    pub fn colors(&self) -> &ColorTable {
        &self.colors
    }

    #[inline]
    pub fn colormap_version(&self) -> u64 {
        self.colormap_version
    }

    #[inline]
    pub fn highlight(&self) -> &HighlightState {
        &self.highlight
    }

    #[inline]
    pub(crate) fn blank_tiles(&self) -> &BlankTiles {
        &self.blank
    }

    pub fn resolver(&self) -> ColorResolver<'_> {
        ColorResolver::new(&self.blocks, &self.colors, self.biomes.as_ref())
    }

    /// Replace block colors from packed 0xRRGGBBAA entries, indexed by id.
    ///
    /// Returns how many entries were applied.
    pub fn set_palette(&mut self, rgba: &[u32]) -> usize {
        let applied = self.blocks.apply_rgba(rgba);
        self.bump_colormap();
        applied
    }

    /// Apply a parsed palette file on top of the current colors.
    pub fn apply_palette(&mut self, palette: &PaletteConfig) -> Result<usize, MapError> {
        let applied = palette.apply(&mut self.blocks)?;
        self.bump_colormap();
        Ok(applied)
    }

    fn bump_colormap(&mut self) {
        self.colors = ColorTable::build(&self.blocks);
        self.colormap_version += 1;
        log::debug!("colormap version {}", self.colormap_version);
    }

    /// Set or clear the selection box; corners are world coordinates.
    pub fn set_highlight(&mut self, on: bool, corners: [i32; 6], mode: UndoMode) -> bool {
        self.highlight.set(on, corners, mode)
    }

    pub fn undo_highlight(&mut self) -> bool {
        self.highlight.undo()
    }

    /// Back to the standard palette with no selection.
    pub fn reset(&mut self) {
        self.blocks = BlockTable::standard();
        self.highlight = HighlightState::new(self.extent);
        self.bump_colormap();
    }

    /// Storage height for a world-space draw height.
    #[inline]
    pub fn storage_top(&self, world_y: i32) -> u16 {
        self.extent.clamp_to_storage(world_y)
    }

    pub(crate) fn render_pass(&self, top_y: u16, options: RenderOptions) -> RenderPass<'_> {
        let key = RenderKey {
            at_height: top_y,
            options,
            colormap: self.colormap_version,
            highlight_generation: self.highlight.generation(),
        };
        let compositor = Compositor::new(self.resolver(), top_y, options, self.highlight.current());
        RenderPass::new(compositor, key, self.highlight.dirty())
    }

    pub(crate) fn finish_draw(&mut self) {
        self.highlight.reset_dirty();
    }
}
