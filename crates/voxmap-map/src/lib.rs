//! Top-down map rendering over cached voxel chunks.
//!
//! [`MapRenderer`] owns the palette, color table and highlight state. A draw
//! walks the chunks under a [`Viewport`], reuses each chunk's cached tile when
//! its [`RenderStamp`](voxmap_chunk::RenderStamp) still matches, and otherwise
//! re-runs the column [`Compositor`].
#![forbid(unsafe_code)]

pub mod biome;
pub mod color;
pub mod composite;
pub mod error;
pub mod highlight;
pub mod image;
pub mod options;
pub mod pick;
pub mod render_cache;
pub mod renderer;
pub mod special;
pub mod viewport;

pub use biome::{BiomeColors, StandardBiomes};
pub use color::{ColorResolver, ColorTable, shade};
pub use composite::{ColumnSample, Compositor, WestEdge};
pub use error::MapError;
pub use highlight::{BlankTiles, DirtyRect, HighlightBox, HighlightHits, HighlightState, UndoMode};
pub use image::{MapImage, PixelFormat};
pub use options::RenderOptions;
pub use pick::{BlockLookup, PickedBlock};
pub use render_cache::{RenderKey, RenderPass, TileState};
pub use renderer::MapRenderer;
pub use viewport::{DrawReport, DrawRequest, ViewTransform, Viewport};
