//! Chunk data, loader and cache seams for the map renderer.
#![forbid(unsafe_code)]

pub mod cache;
pub mod chunk;
pub mod coord;
pub mod loader;
pub mod unknown;

pub use cache::{ChunkCache, ChunkCacheStats, ChunkSlot, LruChunkCache};
pub use chunk::{CHUNK_SIZE, COLUMNS, Chunk, FULL_LIGHT, RenderStamp, TILE_BYTES, column_index};
pub use coord::{ChunkCoord, WorldExtent};
pub use loader::{ChunkLoader, LOAD_OK, LoadError, LoadOutcome, LoadWarnings, load_raw};
pub use unknown::UnknownBlockMonitor;
