//! Top-down column compositor: one chunk in, one 16x16 RGBA tile out.

use voxmap_blocks::BlockFlags;
use voxmap_blocks::ids::{self, BlockId};
use voxmap_chunk::{CHUNK_SIZE, COLUMNS, Chunk, TILE_BYTES, column_index};

use crate::color::{ColorResolver, unpack};
use crate::highlight::{
    BORDER_BLEND, EDGE_BRIGHTEN, EDGE_DIM, HighlightBox, HighlightHits, INTERIOR_BLEND,
    blank_pixel, blend_highlight,
};
use crate::options::RenderOptions;

/// Light used when lighting is off or the voxel has no light data.
pub const DEFAULT_LIGHT: u8 = 12;
pub const SUNLIT_BONUS: i32 = 2;
pub const SHADOW_PENALTY: i32 = 5;
pub const GRID_COLOR: [u8; 3] = [0, 160, 160];
pub const REGION_GRID_COLOR: [u8; 3] = [0, 255, 255];
/// Chunks per region edge for the bright grid lines.
pub const REGION_CHUNKS: i32 = 32;

/// Heights of the east-most column of the chunk to the west, one per z row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WestEdge {
    heights: [Option<u16>; CHUNK_SIZE],
}

impl WestEdge {
    pub fn of(chunk: &Chunk) -> Self {
        let mut heights = [None; CHUNK_SIZE];
        for (z, h) in heights.iter_mut().enumerate() {
            *h = chunk.heightmap[column_index(CHUNK_SIZE - 1, z)];
        }
        Self { heights }
    }

    #[inline]
    pub fn height(&self, z: usize) -> Option<u16> {
        self.heights[z]
    }
}

/// Result of scanning one column, before depth, cave, grid and highlight
/// effects are applied.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColumnSample {
    pub rgb: [u8; 3],
    pub alpha: f64,
    /// Number of voxels blended into `rgb`.
    pub layers: u32,
    pub first_hit: Option<u16>,
    pub last_hit: Option<u16>,
    /// Voxel that made the column opaque, if any.
    pub stop: Option<u16>,
    /// Topmost voxel a selection at this column would land on.
    pub selectable: Option<u16>,
}

impl ColumnSample {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.layers == 0
    }
}

#[inline]
fn is_water(id: BlockId) -> bool {
    id == ids::WATER || id == ids::STATIONARY_WATER
}

#[inline]
fn is_surface_tree(id: BlockId) -> bool {
    matches!(id, ids::LEAVES | ids::LOG | ids::AD_LEAVES | ids::AD_LOG)
}

#[inline]
fn scale(rgb: &mut [u8; 3], num: i32, denom: i32) {
    for c in rgb.iter_mut() {
        *c = (i32::from(*c) * num / denom).clamp(0, 255) as u8;
    }
}

pub struct Compositor<'a> {
    resolver: ColorResolver<'a>,
    top_y: u16,
    options: RenderOptions,
    highlight: &'a HighlightBox,
}

impl<'a> Compositor<'a> {
    /// `top_y` is a storage height; it is clamped to each chunk's extent.
    pub fn new(
        resolver: ColorResolver<'a>,
        top_y: u16,
        options: RenderOptions,
        highlight: &'a HighlightBox,
    ) -> Self {
        Self {
            resolver,
            top_y,
            options,
            highlight,
        }
    }

    /// Redraw `chunk.tile` and `chunk.heightmap`.
    ///
    /// `west` supplies the neighbor heights used for sun/shadow shading; pass
    /// `None` when that chunk is absent or was drawn under other settings.
    pub fn composite(&self, chunk: &mut Chunk, west: Option<&WestEdge>) -> HighlightHits {
        let mut tile = [0u8; TILE_BYTES];
        let mut heights = [None; COLUMNS];
        let mut hits = HighlightHits::default();
        let view = &*chunk;
        for z in 0..CHUNK_SIZE {
            let mut prev_y = west.and_then(|w| w.height(z)).map_or(-1, i32::from);
            for x in 0..CHUNK_SIZE {
                let sample = self.sample(view, x, z, &mut prev_y);
                let resolved = if self.options.contains(RenderOptions::SHOW_ALL) {
                    sample.first_hit
                } else {
                    sample.last_hit
                };
                prev_y = resolved.map_or(-1, i32::from);

                let mut rgb = sample.rgb;
                if let Some(h) = resolved {
                    self.shade_depth(&mut rgb, h, view);
                    self.shade_cave(&mut rgb, view, x, z, sample.stop);
                } else {
                    rgb = blank_pixel(x, z);
                }
                self.draw_grid(&mut rgb, view, x, z);
                self.apply_highlight(&mut rgb, view, x, z, sample.selectable, &mut hits);

                let column = column_index(x, z);
                heights[column] = resolved;
                let o = column * 4;
                tile[o..o + 3].copy_from_slice(&rgb);
                tile[o + 3] = 0xff;
            }
        }
        chunk.tile = tile;
        chunk.heightmap = heights;
        hits
    }

    /// Scan one column from the clipped top down, blending every visible
    /// voxel under the ones above it.
    ///
    /// `prev_y` is the resolved height of the column to the west (or -1) and
    /// is seeded with the first visible height when unknown.
    pub fn sample(&self, chunk: &Chunk, x: usize, z: usize, prev_y: &mut i32) -> ColumnSample {
        let blocks = self.resolver.blocks;
        let extent_top = chunk.extent.top();
        let top_y = self.top_y.min(extent_top);
        let clipped = chunk.max_filled_height().map(|m| m.min(top_y));
        let show_all = self.options.contains(RenderOptions::SHOW_ALL);
        let show_obscured = self.options.show_obscured();
        let skip_water = self.options.contains(RenderOptions::TRANSPARENT_WATER);
        let lighting = self.options.contains(RenderOptions::LIGHTING);
        let use_biome = self.options.contains(RenderOptions::BIOMES);
        let view = BlockFlags::view_filter(show_all);

        let mut out = ColumnSample {
            rgb: [0; 3],
            alpha: 0.0,
            layers: 0,
            first_hit: None,
            last_hit: None,
            stop: None,
            selectable: None,
        };
        let Some(clipped) = clipped else {
            return out;
        };
        // Starting at the world top, or below a run of air, counts as having
        // seen open space above.
        let mut seen_empty = top_y >= extent_top || clipped < top_y;

        for y in (0..=clipped).rev() {
            let voxel = Chunk::idx(x, y as usize, z);
            let id = chunk.type_at(voxel);
            if id == ids::AIR || !blocks.flags(id).intersects(view) || (skip_water && is_water(id)) {
                seen_empty = true;
                continue;
            }
            let a = blocks.alpha(id);
            let solid = a != 0.0;
            if out.selectable.is_none() && solid && (show_obscured || seen_empty) {
                out.selectable = Some(y);
            }
            // still water never hides what lies beneath it
            if id == ids::STATIONARY_WATER {
                seen_empty = true;
            }
            if !(solid && (show_obscured || seen_empty)) {
                continue;
            }

            let mut light = if lighting {
                i32::from(chunk.light_at(voxel).unwrap_or(DEFAULT_LIGHT))
            } else {
                i32::from(DEFAULT_LIGHT)
            };
            let yi = i32::from(y);
            if *prev_y == -1 {
                *prev_y = yi;
            } else if *prev_y < yi {
                light += SUNLIT_BONUS;
            } else if *prev_y > yi {
                light -= SHADOW_PENALTY;
            }
            let light = light.clamp(1, 15) as u8;
            let color = self.resolver.resolve(
                chunk,
                voxel,
                id,
                chunk.data_at(voxel),
                light,
                use_biome,
                true,
            );
            let c = unpack(color);
            if out.layers == 0 {
                out.first_hit = Some(y);
                out.alpha = f64::from(a);
                out.rgb = c;
            } else {
                let cover = 1.0 - out.alpha;
                for (dst, src) in out.rgb.iter_mut().zip(c) {
                    *dst = dst.saturating_add((cover * f64::from(src)) as u8);
                }
                out.alpha += f64::from(a) * cover;
            }
            out.layers += 1;
            out.last_hit = Some(y);
            if a == 1.0 {
                out.stop = Some(y);
                break;
            }
        }
        out
    }

    fn shade_depth(&self, rgb: &mut [u8; 3], height: u16, chunk: &Chunk) {
        if !self.options.contains(RenderOptions::DEPTH_SHADING) {
            return;
        }
        let top = i32::from(self.top_y.min(chunk.extent.top()));
        let k = (256 - top) / 5;
        let num = (i32::from(height) + 50 - k).max(0);
        let denom = top + 50 - k;
        if denom > 0 {
            scale(rgb, num, denom);
        }
    }

    fn shade_cave(
        &self,
        rgb: &mut [u8; 3],
        chunk: &Chunk,
        x: usize,
        z: usize,
        stop: Option<u16>,
    ) {
        if !self.options.contains(RenderOptions::CAVE_MODE) {
            return;
        }
        let Some(stop) = stop else {
            return;
        };
        let blocks = self.resolver.blocks;
        let at = |y: i32| chunk.type_at(Chunk::idx(x, y as usize, z));
        let mut y = i32::from(stop);
        if is_surface_tree(at(y)) {
            while y >= 1 {
                let id = at(y);
                if !(is_surface_tree(id) || id == ids::AIR) {
                    break;
                }
                y -= 1;
            }
        }
        let mut seen_empty = false;
        while y >= 1 {
            let id = at(y);
            if id == ids::AIR {
                seen_empty = true;
            } else if seen_empty && blocks.alpha(id) != 0.0 {
                scale(rgb, i32::from(stop) - y + 10, 138);
                break;
            }
            y -= 1;
        }
    }

    fn draw_grid(&self, rgb: &mut [u8; 3], chunk: &Chunk, x: usize, z: usize) {
        if !self.options.contains(RenderOptions::GRID) {
            return;
        }
        let region_x = x == 0 && chunk.coord.cx.rem_euclid(REGION_CHUNKS) == 0;
        let region_z = z == 0 && chunk.coord.cz.rem_euclid(REGION_CHUNKS) == 0;
        if region_x || region_z {
            *rgb = REGION_GRID_COLOR;
        } else if x == 0 || z == 0 {
            *rgb = GRID_COLOR;
        }
    }

    fn apply_highlight(
        &self,
        rgb: &mut [u8; 3],
        chunk: &Chunk,
        x: usize,
        z: usize,
        selectable: Option<u16>,
        hits: &mut HighlightHits,
    ) {
        let hbox = self.highlight;
        let wx = chunk.coord.min_x() + x as i32;
        let wz = chunk.coord.min_z() + z as i32;
        if !hbox.contains_column(wx, wz) {
            return;
        }
        if let Some(s) = selectable {
            hits.min_height = Some(hits.min_height.map_or(s, |m| m.min(s)));
        }
        let edge = hbox.on_edge_column(wx, wz);
        match selectable.map(i32::from) {
            Some(s) if s < hbox.min_y => {
                hits.below = true;
                if edge {
                    for c in rgb.iter_mut() {
                        *c = (f64::from(*c) * EDGE_DIM) as u8;
                    }
                }
            }
            Some(s) if s > hbox.max_y => {
                // Callers normally cap top_y at the box top, so nothing above
                // the box is drawn.
                hits.above = true;
                if edge {
                    for c in rgb.iter_mut() {
                        *c = (f64::from(*c) * (1.0 - EDGE_BRIGHTEN) + EDGE_BRIGHTEN * 255.0) as u8;
                    }
                }
            }
            sel => {
                // empty columns are blended but select nothing
                hits.within |= sel.is_some();
                let border = edge || sel == Some(hbox.min_y) || sel == Some(hbox.max_y);
                let blend = if border { BORDER_BLEND } else { INTERIOR_BLEND };
                *rgb = blend_highlight(*rgb, blend);
            }
        }
    }
}
