//! Selection box, its undo slot and the dirty rectangle it drives.

use voxmap_chunk::{CHUNK_SIZE, ChunkCoord, TILE_BYTES, WorldExtent};

pub const HIGHLIGHT_COLOR: [u8; 3] = [205, 50, 255];
pub const INTERIOR_BLEND: f64 = 0.3;
pub const BORDER_BLEND: f64 = 0.8;
pub const EDGE_DIM: f64 = 0.5;
pub const EDGE_BRIGHTEN: f64 = 0.5;

#[inline]
pub fn blend_highlight(rgb: [u8; 3], blend: f64) -> [u8; 3] {
    let mut out = [0u8; 3];
    for i in 0..3 {
        out[i] = (f64::from(rgb[i]) * (1.0 - blend) + blend * f64::from(HIGHLIGHT_COLOR[i])) as u8;
    }
    out
}

/// Axis-aligned selection. X/Z are world columns, Y is zero-based storage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HighlightBox {
    pub enabled: bool,
    pub min_x: i32,
    pub min_y: i32,
    pub min_z: i32,
    pub max_x: i32,
    pub max_y: i32,
    pub max_z: i32,
}

impl HighlightBox {
    #[inline]
    pub fn contains_column(&self, wx: i32, wz: i32) -> bool {
        self.enabled
            && wx >= self.min_x
            && wx <= self.max_x
            && wz >= self.min_z
            && wz <= self.max_z
    }

    #[inline]
    pub fn on_edge_column(&self, wx: i32, wz: i32) -> bool {
        wx == self.min_x || wx == self.max_x || wz == self.min_z || wz == self.max_z
    }

    #[inline]
    pub fn overlaps_chunk(&self, coord: ChunkCoord) -> bool {
        self.enabled
            && coord.max_x() >= self.min_x
            && coord.min_x() <= self.max_x
            && coord.max_z() >= self.min_z
            && coord.min_z() <= self.max_z
    }

    /// Chunk lies inside the box without touching its edge columns.
    #[inline]
    pub fn strictly_covers_chunk(&self, coord: ChunkCoord) -> bool {
        self.enabled
            && coord.min_x() > self.min_x
            && coord.max_x() < self.max_x
            && coord.min_z() > self.min_z
            && coord.max_z() < self.max_z
    }

    fn column_rect(&self) -> ColumnRect {
        ColumnRect {
            min_x: self.min_x,
            min_z: self.min_z,
            max_x: self.max_x,
            max_z: self.max_z,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnRect {
    pub min_x: i32,
    pub min_z: i32,
    pub max_x: i32,
    pub max_z: i32,
}

/// Union of column areas whose tiles are highlight-stale.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DirtyRect(Option<ColumnRect>);

impl DirtyRect {
    pub const EMPTY: DirtyRect = DirtyRect(None);

    #[inline]
    pub fn rect(&self) -> Option<ColumnRect> {
        self.0
    }

    pub fn extend(&mut self, r: ColumnRect) {
        self.0 = Some(match self.0 {
            None => r,
            Some(cur) => ColumnRect {
                min_x: cur.min_x.min(r.min_x),
                min_z: cur.min_z.min(r.min_z),
                max_x: cur.max_x.max(r.max_x),
                max_z: cur.max_z.max(r.max_z),
            },
        });
    }

    #[inline]
    pub fn overlaps_chunk(&self, coord: ChunkCoord) -> bool {
        self.0.is_some_and(|r| {
            coord.max_x() >= r.min_x
                && coord.min_x() <= r.max_x
                && coord.max_z() >= r.min_z
                && coord.min_z() <= r.max_z
        })
    }
}

/// Where visible surfaces sat relative to the box during a draw.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HighlightHits {
    pub below: bool,
    pub within: bool,
    pub above: bool,
    /// Lowest selectable surface seen inside the box footprint (storage y).
    pub min_height: Option<u16>,
}

impl HighlightHits {
    pub fn merge(&mut self, other: HighlightHits) {
        self.below |= other.below;
        self.within |= other.within;
        self.above |= other.above;
        self.min_height = match (self.min_height, other.min_height) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
    }

    #[inline]
    pub fn any(&self) -> bool {
        self.below || self.within || self.above
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UndoMode {
    /// Keep the current box so `undo` can restore it.
    Push,
    /// Drop any pending undo.
    Discard,
}

#[derive(Clone, Debug)]
pub struct HighlightState {
    extent: WorldExtent,
    current: HighlightBox,
    previous: HighlightBox,
    undo_available: bool,
    generation: u64,
    dirty: DirtyRect,
}

impl HighlightState {
    pub fn new(extent: WorldExtent) -> Self {
        Self {
            extent,
            current: HighlightBox::default(),
            previous: HighlightBox::default(),
            undo_available: false,
            generation: 0,
            dirty: DirtyRect::EMPTY,
        }
    }

    #[inline]
    pub fn current(&self) -> &HighlightBox {
        &self.current
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[inline]
    pub fn dirty(&self) -> DirtyRect {
        self.dirty
    }

    #[inline]
    pub fn undo_available(&self) -> bool {
        self.undo_available
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.current.enabled
    }

    /// Box bounds in world coordinates: `[min_x, min_y, min_z, max_x, max_y, max_z]`.
    pub fn bounds(&self) -> [i32; 6] {
        let b = &self.current;
        [
            b.min_x,
            b.min_y + self.extent.min_y,
            b.min_z,
            b.max_x,
            b.max_y + self.extent.min_y,
            b.max_z,
        ]
    }

    /// Set the selection from world-space corners in any order.
    ///
    /// Returns true when the effective box changed.
    pub fn set(&mut self, on: bool, corners: [i32; 6], mode: UndoMode) -> bool {
        match mode {
            UndoMode::Push => {
                self.previous = self.current;
                self.undo_available = true;
            }
            UndoMode::Discard => self.undo_available = false,
        }
        let [x0, y0, z0, x1, y1, z1] = corners;
        let next = HighlightBox {
            enabled: on,
            min_x: x0.min(x1),
            max_x: x0.max(x1),
            min_y: i32::from(self.extent.clamp_to_storage(y0.min(y1))),
            max_y: i32::from(self.extent.clamp_to_storage(y0.max(y1))),
            min_z: z0.min(z1),
            max_z: z0.max(z1),
        };
        if next == self.current {
            return false;
        }
        self.current = next;
        self.generation += 1;
        if on {
            self.dirty.extend(next.column_rect());
        }
        log::debug!(
            "highlight {} gen {} x {}..={} z {}..={}",
            if on { "on" } else { "off" },
            self.generation,
            next.min_x,
            next.max_x,
            next.min_z,
            next.max_z
        );
        true
    }

    /// Restore the box saved by the last `UndoMode::Push`. Single level.
    pub fn undo(&mut self) -> bool {
        if !self.undo_available {
            return false;
        }
        std::mem::swap(&mut self.current, &mut self.previous);
        self.undo_available = false;
        self.generation += 1;
        if self.current.enabled {
            self.dirty.extend(self.current.column_rect());
        }
        true
    }

    /// Collapse the dirty rect to the current box once a full draw is done.
    ///
    /// A box scrolled out of view and back can leave stale tiles outside this
    /// area; the next box change repairs them.
    pub fn reset_dirty(&mut self) {
        self.dirty = if self.current.enabled {
            DirtyRect(Some(self.current.column_rect()))
        } else {
            DirtyRect::EMPTY
        };
    }
}

/// Background color of an empty column.
#[inline]
pub fn blank_pixel(x: usize, z: usize) -> [u8; 3] {
    if ((x / 4) % 2) ^ ((z / 4) % 2) == 1 {
        [140, 140, 140]
    } else {
        [150, 150, 150]
    }
}

/// Checkerboard tiles for chunks that have nothing to draw.
#[derive(Clone, Debug)]
pub struct BlankTiles {
    plain: [u8; TILE_BYTES],
    highlit: [u8; TILE_BYTES],
}

impl BlankTiles {
    pub fn new() -> Self {
        let mut plain = [0u8; TILE_BYTES];
        let mut highlit = [0u8; TILE_BYTES];
        for z in 0..CHUNK_SIZE {
            for x in 0..CHUNK_SIZE {
                let o = (z * CHUNK_SIZE + x) * 4;
                let rgb = blank_pixel(x, z);
                plain[o..o + 3].copy_from_slice(&rgb);
                plain[o + 3] = 0xff;
                highlit[o..o + 3].copy_from_slice(&blend_highlight(rgb, INTERIOR_BLEND));
                highlit[o + 3] = 0xff;
            }
        }
        Self { plain, highlit }
    }

    #[inline]
    pub fn plain(&self) -> &[u8; TILE_BYTES] {
        &self.plain
    }

    /// Tile for an absent chunk at `coord` under `hbox`.
    pub fn for_chunk(&self, coord: ChunkCoord, hbox: &HighlightBox) -> [u8; TILE_BYTES] {
        if !hbox.overlaps_chunk(coord) {
            return self.plain;
        }
        if hbox.strictly_covers_chunk(coord) {
            return self.highlit;
        }
        let mut tile = self.plain;
        for z in 0..CHUNK_SIZE {
            for x in 0..CHUNK_SIZE {
                let wx = coord.min_x() + x as i32;
                let wz = coord.min_z() + z as i32;
                if !hbox.contains_column(wx, wz) {
                    continue;
                }
                let blend = if hbox.on_edge_column(wx, wz) {
                    BORDER_BLEND
                } else {
                    INTERIOR_BLEND
                };
                let o = (z * CHUNK_SIZE + x) * 4;
                let rgb = blend_highlight([tile[o], tile[o + 1], tile[o + 2]], blend);
                tile[o..o + 3].copy_from_slice(&rgb);
            }
        }
        tile
    }
}

impl Default for BlankTiles {
    fn default() -> Self {
        Self::new()
    }
}
