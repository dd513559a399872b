//! Screen-to-world transform and the viewport draw loop.

use voxmap_chunk::{
    CHUNK_SIZE, ChunkCache, ChunkCoord, ChunkLoader, ChunkSlot, LOAD_OK, LoadError, LoadOutcome,
    LoadWarnings,
};

use crate::error::MapError;
use crate::highlight::HighlightHits;
use crate::image::MapImage;
use crate::options::RenderOptions;
use crate::render_cache::{RenderPass, TileState};
use crate::renderer::MapRenderer;

const CHUNK: i32 = CHUNK_SIZE as i32;

/// Where the viewport looks, in world blocks, and at what magnification.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub center_x: f64,
    pub center_z: f64,
    /// Output pixels per block.
    pub zoom: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawRequest {
    pub view: Viewport,
    /// Highest world y drawn.
    pub top_y: i32,
    pub options: RenderOptions,
}

/// Mapping from output pixels to chunk slots, shared by drawing and picking.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
    pub zoom: f64,
    /// Output pixels per chunk edge.
    pub block_scale: i32,
    pub start_cx: i32,
    pub start_cz: i32,
    /// Pixels of the first chunk hidden past the left and top edges.
    pub shift_x: i32,
    pub shift_z: i32,
    pub h_blocks: i32,
    pub v_blocks: i32,
}

impl ViewTransform {
    pub fn new(view: &Viewport, width: usize, height: usize) -> Result<Self, MapError> {
        let zoom = view.zoom;
        let block_scale = (CHUNK_SIZE as f64 * zoom) as i32;
        if !zoom.is_finite() || block_scale <= 0 {
            return Err(MapError::InvalidZoom(zoom));
        }
        if width == 0 || height == 0 {
            return Err(MapError::EmptyImage);
        }
        let start_x = view.center_x - width as f64 / (2.0 * zoom);
        let start_z = view.center_z - height as f64 / (2.0 * zoom);
        let start_cx = (start_x / CHUNK_SIZE as f64).floor() as i32;
        let start_cz = (start_z / CHUNK_SIZE as f64).floor() as i32;
        let shift_x = ((start_x - f64::from(start_cx * CHUNK)) * zoom) as i32;
        let shift_z = ((start_z - f64::from(start_cz * CHUNK)) * zoom) as i32;
        Ok(Self {
            zoom,
            block_scale,
            start_cx,
            start_cz,
            shift_x,
            shift_z,
            h_blocks: (width as i32 + block_scale * 2) / block_scale,
            v_blocks: (height as i32 + block_scale * 2) / block_scale,
        })
    }

    /// Chunk drawn in slot `(x, z)`, counted from the top-left.
    #[inline]
    pub fn slot_chunk(&self, x: i32, z: i32) -> ChunkCoord {
        ChunkCoord::new(self.start_cx + x, self.start_cz + z)
    }

    /// Output pixel of the top-left corner of slot `(x, z)`.
    #[inline]
    pub fn slot_origin(&self, x: i32, z: i32) -> (i32, i32) {
        (
            x * self.block_scale - self.shift_x,
            z * self.block_scale - self.shift_z,
        )
    }

    /// World column under output pixel `(px, py)`; both must be non-negative.
    pub fn world_column(&self, px: i32, py: i32) -> (i32, i32) {
        let x = (px + self.shift_x) / self.block_scale;
        let z = (py + self.shift_z) / self.block_scale;
        let (ox, oz) = self.slot_origin(x, z);
        let xoff = (f64::from(px - ox) / self.zoom) as i32;
        let zoff = (f64::from(py - oz) / self.zoom) as i32;
        (
            (self.start_cx + x) * CHUNK + xoff.min(CHUNK - 1),
            (self.start_cz + z) * CHUNK + zoff.min(CHUNK - 1),
        )
    }

    /// Fraction of slots visited when slot `(x, z)` is reached.
    #[inline]
    fn progress(&self, x: i32, z: i32) -> f32 {
        let total = (self.v_blocks * self.h_blocks).max(1);
        ((z * self.h_blocks + x) as f32 / total as f32).min(1.0)
    }
}

/// Outcome of one draw call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DrawReport {
    /// OR of every load warning met while drawing.
    pub warnings: LoadWarnings,
    /// First hard load error; its chunk was drawn blank.
    pub error: Option<LoadError>,
    pub hits: HighlightHits,
    pub loaded: usize,
    pub rendered: usize,
    pub reused: usize,
    pub blank: usize,
}

impl DrawReport {
    /// Negative error code if any load failed, else `LOAD_OK` with warning
    /// bits.
    pub fn status_code(&self) -> i32 {
        match &self.error {
            Some(e) => e.code(),
            None => LOAD_OK | self.warnings.bits() as i32,
        }
    }

    #[inline]
    pub fn tiles(&self) -> usize {
        self.rendered + self.reused + self.blank
    }
}

/// One draw's cache, loader and running report.
struct Frame<'a, 'r, C: ?Sized, L: ?Sized> {
    renderer: &'r MapRenderer,
    pass: RenderPass<'r>,
    cache: &'a mut C,
    loader: &'a L,
    report: DrawReport,
}

impl<C, L> Frame<'_, '_, C, L>
where
    C: ChunkCache + ?Sized,
    L: ChunkLoader + ?Sized,
{
    /// Make sure the cache holds `coord`, loading it if needed. Returns false
    /// on a hard load error.
    fn ensure_loaded(&mut self, coord: ChunkCoord, on_load: impl FnOnce()) -> bool {
        if self.cache.find(coord).is_some() {
            return true;
        }
        on_load();
        match self.loader.load(coord) {
            LoadOutcome::Loaded(chunk, warnings) => {
                self.report.warnings |= warnings;
                self.report.loaded += 1;
                self.cache.add(coord, ChunkSlot::Present(chunk));
                true
            }
            LoadOutcome::NoSections(warnings) => {
                self.report.warnings |= warnings;
                self.cache.add(coord, ChunkSlot::NoSections);
                true
            }
            LoadOutcome::Failed(err) => {
                log::warn!("chunk ({}, {}) failed to load: {err}", coord.cx, coord.cz);
                if self.report.error.is_none() {
                    self.report.error = Some(err);
                }
                false
            }
        }
    }

    fn place(&mut self, coord: ChunkCoord, image: &mut MapImage, px: i32, py: i32, zoom: f64) {
        let state = self.pass.refresh(&mut *self.cache, coord);
        match state {
            Some(TileState::Reused) => self.report.reused += 1,
            Some(TileState::Rendered(hits)) => {
                self.report.rendered += 1;
                self.report.hits.merge(hits);
            }
            Some(TileState::Blank) | None => self.report.blank += 1,
        }
        match self.cache.find(coord).and_then(ChunkSlot::chunk) {
            Some(chunk) if matches!(state, Some(TileState::Reused | TileState::Rendered(_))) => {
                image.blit(&chunk.tile, px, py, zoom);
            }
            _ => self.place_blank(coord, image, px, py, zoom),
        }
    }

    fn place_blank(&mut self, coord: ChunkCoord, image: &mut MapImage, px: i32, py: i32, zoom: f64) {
        let tile = self
            .renderer
            .blank_tiles()
            .for_chunk(coord, self.renderer.highlight().current());
        image.blit(&tile, px, py, zoom);
    }
}

impl MapRenderer {
    fn frame<'a, 'r, C, L>(
        &'r self,
        cache: &'a mut C,
        loader: &'a L,
        top_y: i32,
        options: RenderOptions,
    ) -> Frame<'a, 'r, C, L>
    where
        C: ChunkCache + ?Sized,
        L: ChunkLoader + ?Sized,
    {
        Frame {
            renderer: self,
            pass: self.render_pass(self.storage_top(top_y), options),
            cache,
            loader,
            report: DrawReport::default(),
        }
    }

    /// Draw the area around `request.view` into `image`, loading chunks as
    /// needed. `progress` receives the fraction of chunk slots visited each
    /// time a load is attempted.
    ///
    /// Afterwards the highlight dirty area shrinks to the current box.
    pub fn draw_viewport<C, L>(
        &mut self,
        cache: &mut C,
        loader: &L,
        request: &DrawRequest,
        image: &mut MapImage,
        progress: &mut dyn FnMut(f32),
    ) -> Result<DrawReport, MapError>
    where
        C: ChunkCache + ?Sized,
        L: ChunkLoader + ?Sized,
    {
        let xf = ViewTransform::new(&request.view, image.width, image.height)?;
        let report = {
            let mut frame = self.frame(cache, loader, request.top_y, request.options);
            for z in 0..=xf.v_blocks {
                for x in 0..=xf.h_blocks {
                    let coord = xf.slot_chunk(x, z);
                    let (px, py) = xf.slot_origin(x, z);
                    if frame.ensure_loaded(coord, || progress(xf.progress(x, z))) {
                        frame.place(coord, image, px, py, xf.zoom);
                    } else {
                        frame.report.blank += 1;
                        frame.place_blank(coord, image, px, py, xf.zoom);
                    }
                }
            }
            frame.report
        };
        self.finish_draw();
        log::debug!(
            "viewport {}x{} at ({:.1}, {:.1}) zoom {}: {} rendered, {} reused, {} blank, status {}",
            image.width,
            image.height,
            request.view.center_x,
            request.view.center_z,
            xf.zoom,
            report.rendered,
            report.reused,
            report.blank,
            report.status_code()
        );
        Ok(report)
    }

    /// Byte-exact variant: the image's top-left pixel is world column
    /// `(origin_x, origin_z)` and every block covers `zoom` x `zoom` pixels.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_region<C, L>(
        &self,
        cache: &mut C,
        loader: &L,
        origin_x: i32,
        origin_z: i32,
        zoom: u32,
        top_y: i32,
        options: RenderOptions,
        image: &mut MapImage,
    ) -> Result<DrawReport, MapError>
    where
        C: ChunkCache + ?Sized,
        L: ChunkLoader + ?Sized,
    {
        if zoom == 0 {
            return Err(MapError::InvalidExactZoom(zoom));
        }
        if image.width == 0 || image.height == 0 {
            return Err(MapError::EmptyImage);
        }
        let z = zoom as i32;
        let blocks_w = (image.width as i32 + z - 1) / z;
        let blocks_h = (image.height as i32 + z - 1) / z;
        let first = ChunkCoord::containing(origin_x, origin_z);
        let last = ChunkCoord::containing(origin_x + blocks_w - 1, origin_z + blocks_h - 1);
        let mut frame = self.frame(cache, loader, top_y, options);
        for cz in first.cz..=last.cz {
            for cx in first.cx..=last.cx {
                let coord = ChunkCoord::new(cx, cz);
                let px = (coord.min_x() - origin_x) * z;
                let py = (coord.min_z() - origin_z) * z;
                if frame.ensure_loaded(coord, || {}) {
                    frame.place(coord, image, px, py, f64::from(zoom));
                } else {
                    frame.report.blank += 1;
                    frame.place_blank(coord, image, px, py, f64::from(zoom));
                }
            }
        }
        Ok(frame.report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(cx: f64, cz: f64, zoom: f64) -> Viewport {
        Viewport {
            center_x: cx,
            center_z: cz,
            zoom,
        }
    }

    #[test]
    fn transform_floors_negative_starts() {
        let xf = ViewTransform::new(&view(0.0, 0.0, 1.0), 40, 40).expect("transform");
        // start is -20: chunk -2 with 12 pixels hidden
        assert_eq!((xf.start_cx, xf.shift_x), (-2, 12));
        assert_eq!(xf.slot_origin(0, 0), (-12, -12));
        assert_eq!(xf.world_column(0, 0), (-20, -20));
        assert_eq!(xf.world_column(20, 39), (0, 19));
    }

    #[test]
    fn transform_handles_zoom() {
        let xf = ViewTransform::new(&view(100.0, 50.0, 2.0), 64, 32).expect("transform");
        assert_eq!(xf.block_scale, 32);
        assert_eq!(xf.world_column(0, 0), (84, 42));
        assert_eq!(xf.world_column(1, 1), (84, 42));
        assert_eq!(xf.world_column(2, 2), (85, 43));
    }

    #[test]
    fn rejects_bad_zoom() {
        assert_eq!(
            ViewTransform::new(&view(0.0, 0.0, 0.0), 8, 8),
            Err(MapError::InvalidZoom(0.0))
        );
        assert!(ViewTransform::new(&view(0.0, 0.0, f64::NAN), 8, 8).is_err());
        assert_eq!(
            ViewTransform::new(&view(0.0, 0.0, 1.0), 0, 8),
            Err(MapError::EmptyImage)
        );
    }

    #[test]
    fn report_status_prefers_errors() {
        let mut r = DrawReport {
            warnings: LoadWarnings::PARTIAL_DATA,
            ..Default::default()
        };
        assert_eq!(r.status_code(), 1 | 0x4);
        r.error = Some(LoadError::Corrupt("bad".into()));
        assert_eq!(r.status_code(), -2);
    }
}
