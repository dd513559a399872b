//! Drives the renderer for one CLI invocation.

use std::error::Error;
use std::path::Path;
use std::sync::Arc;

use log::{info, warn};
use voxmap_blocks::PaletteConfig;
use voxmap_chunk::{ChunkLoader, LruChunkCache, UnknownBlockMonitor};
use voxmap_map::{
    BlockLookup, DrawReport, DrawRequest, MapImage, MapRenderer, PixelFormat, UndoMode, Viewport,
};
use voxmap_world::{FlatWorld, NoiseWorld, RawWorld, WorldConfig, load_config_from_path};

use crate::config::{MapConfig, WorldKind, parse_options};

/// Renderer, chunk cache and chunk source for one view.
pub struct Session {
    pub renderer: MapRenderer,
    pub cache: LruChunkCache,
    loader: Box<dyn ChunkLoader>,
    unknown: Arc<UnknownBlockMonitor>,
    request: DrawRequest,
    width: usize,
    height: usize,
    exact: bool,
}

impl Session {
    pub fn new(config: &MapConfig, highlight: Option<[i32; 6]>) -> Result<Self, Box<dyn Error>> {
        let extent = config.world.extent.extent();
        let mut renderer = MapRenderer::new(extent);
        if let Some(ref path) = config.palette {
            let palette = PaletteConfig::from_path(path)?;
            let applied = renderer.apply_palette(&palette)?;
            info!("applied {applied} palette entries from {}", path.display());
        }
        if let Some(corners) = highlight {
            renderer.set_highlight(true, corners, UndoMode::Discard);
        }
        let unknown = Arc::new(UnknownBlockMonitor::new(true));
        let loader: Box<dyn ChunkLoader> = match config.world.kind {
            WorldKind::Flat => Box::new(FlatWorld::new(extent, renderer.blocks())),
            WorldKind::Noise => {
                let world_config = match config.world.config {
                    Some(ref path) => load_config_from_path(path)?,
                    None => WorldConfig::default(),
                };
                Box::new(NoiseWorld::new(world_config, extent))
            }
            WorldKind::Raw => {
                let dir = config
                    .world
                    .dir
                    .clone()
                    .ok_or("the raw world needs a chunk directory (--world-dir)")?;
                Box::new(RawWorld::new(dir, extent, renderer.blocks().clone(), Arc::clone(&unknown)))
            }
        };
        let options = parse_options(&config.render.options)?;
        let top_y = config.view.top_y.unwrap_or(extent.max_world_y());
        let request = DrawRequest {
            view: Viewport {
                center_x: config.view.center[0],
                center_z: config.view.center[1],
                zoom: config.view.zoom,
            },
            top_y,
            options,
        };
        Ok(Self {
            renderer,
            cache: LruChunkCache::new(config.render.cache_capacity),
            loader,
            unknown,
            request,
            width: config.view.width,
            height: config.view.height,
            exact: config.render.exact,
        })
    }

    /// Whether any load so far met a block id outside the catalogue.
    pub fn unknown_blocks_seen(&self) -> bool {
        self.unknown.seen()
    }

    pub fn clear_unknown_blocks(&self) {
        self.unknown.reset();
    }

    pub fn set_exact(&mut self, exact: bool) {
        self.exact |= exact;
    }

    pub fn draw(&mut self) -> Result<(MapImage, DrawReport), Box<dyn Error>> {
        let mut image = MapImage::new(self.width, self.height, PixelFormat::Rgba);
        let report = if self.exact {
            let zoom = self.request.view.zoom;
            if zoom.fract() != 0.0 || zoom < 1.0 {
                return Err(format!("exact rendering needs a whole zoom, got {zoom}").into());
            }
            let z = zoom as u32;
            let blocks_w = self.width.div_ceil(z as usize) as i32;
            let blocks_h = self.height.div_ceil(z as usize) as i32;
            let origin_x = self.request.view.center_x.floor() as i32 - blocks_w / 2;
            let origin_z = self.request.view.center_z.floor() as i32 - blocks_h / 2;
            self.renderer.draw_region(
                &mut self.cache,
                &*self.loader,
                origin_x,
                origin_z,
                z,
                self.request.top_y,
                self.request.options,
                &mut image,
            )?
        } else {
            let mut reported = 0;
            let mut progress = |fraction: f32| {
                let step = (fraction * 10.0) as i32;
                if step > reported {
                    reported = step;
                    info!("loading chunks: {:.0}%", fraction * 100.0);
                }
            };
            self.renderer.draw_viewport(
                &mut self.cache,
                &*self.loader,
                &self.request,
                &mut image,
                &mut progress,
            )?
        };
        log_report(&report);
        if self.unknown.seen() {
            warn!("map contains block ids this catalogue does not know; they are drawn as unknown blocks");
        }
        Ok((image, report))
    }

    pub fn pick(&self, px: i32, py: i32) -> Result<BlockLookup, Box<dyn Error>> {
        let lookup = self.renderer.pick(
            &self.cache,
            &self.request.view,
            self.width,
            self.height,
            px,
            py,
        )?;
        Ok(lookup)
    }
}

fn log_report(report: &DrawReport) {
    info!(
        "{} tiles: {} rendered, {} reused, {} blank; status {}",
        report.tiles(),
        report.rendered,
        report.reused,
        report.blank,
        report.status_code()
    );
    if let Some(ref e) = report.error {
        warn!("some chunks failed to load: {e}");
    }
    if !report.warnings.is_empty() {
        warn!("load warnings: {:?}", report.warnings);
    }
    if report.hits.any() {
        info!(
            "selection: below {} within {} above {}",
            report.hits.below, report.hits.within, report.hits.above
        );
    }
}

pub fn write_png(image: &MapImage, path: &Path) -> Result<(), Box<dyn Error>> {
    let (w, h) = (image.width as u32, image.height as u32);
    match image.format {
        PixelFormat::Rgba => image::RgbaImage::from_raw(w, h, image.data.clone())
            .ok_or("image buffer size mismatch")?
            .save(path)?,
        PixelFormat::Rgb => image::RgbImage::from_raw(w, h, image.data.clone())
            .ok_or("image buffer size mismatch")?
            .save(path)?,
    }
    info!("wrote {}x{} map to {}", w, h, path.display());
    Ok(())
}

pub fn describe(lookup: &BlockLookup) -> String {
    match lookup {
        BlockLookup::Found(b) => format!(
            "{} (id {}:{}) at {}, {}, {} in biome {}",
            b.name, b.id, b.data, b.x, b.y, b.z, b.biome
        ),
        BlockLookup::Empty { x, z } => format!("nothing drawn at column {x}, {z}"),
        BlockLookup::Unknown { x, z } => format!("no chunk loaded at column {x}, {z}"),
        BlockLookup::OffMap => "position is outside the image".to_string(),
    }
}
