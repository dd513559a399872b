//! Chunk providers: a flat block showcase, noise-driven terrain and raw
//! per-chunk files.
#![forbid(unsafe_code)]

pub mod config;
pub mod flat;
pub mod noise;
pub mod raw;

pub use config::{WorldConfig, load_config_from_path};
pub use flat::FlatWorld;
pub use noise::{ColumnPlan, NoiseWorld};
pub use raw::{RawWorld, encode_chunk, write_chunk};
