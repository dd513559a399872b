use std::fmt;

use bitflags::bitflags;
use voxmap_blocks::BlockTable;

use crate::chunk::{COLUMNS, Chunk};
use crate::coord::{ChunkCoord, WorldExtent};
use crate::unknown::UnknownBlockMonitor;

/// Status code a successful load reports in its low bits.
pub const LOAD_OK: i32 = 1;

bitflags! {
    /// Non-fatal load conditions, kept above the two low status bits.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct LoadWarnings: u32 {
        /// Some sections could not be decoded and were left as air.
        const PARTIAL_DATA = 0x4;
        /// Block ids outside the catalogue were replaced.
        const UNKNOWN_BLOCKS = 0x8;
        /// Data predates the supported format and was upgraded on read.
        const OLD_FORMAT = 0x10;
        /// Biome data was missing and defaulted.
        const MISSING_BIOMES = 0x20;
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadError {
    Io(String),
    Corrupt(String),
    Decompress(String),
    Unsupported(String),
}

impl LoadError {
    /// Negative status code for this error.
    pub fn code(&self) -> i32 {
        match self {
            LoadError::Io(_) => -1,
            LoadError::Corrupt(_) => -2,
            LoadError::Decompress(_) => -3,
            LoadError::Unsupported(_) => -4,
        }
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(msg) => write!(f, "chunk read failed: {msg}"),
            LoadError::Corrupt(msg) => write!(f, "chunk data corrupt: {msg}"),
            LoadError::Decompress(msg) => write!(f, "chunk decompression failed: {msg}"),
            LoadError::Unsupported(msg) => write!(f, "unsupported chunk format: {msg}"),
        }
    }
}

impl std::error::Error for LoadError {}

#[derive(Debug)]
pub enum LoadOutcome {
    Loaded(Box<Chunk>, LoadWarnings),
    /// The chunk exists in name only or not at all.
    NoSections(LoadWarnings),
    Failed(LoadError),
}

impl LoadOutcome {
    /// Combined status: negative on error, else `LOAD_OK` with warning bits.
    pub fn status_code(&self) -> i32 {
        match self {
            LoadOutcome::Loaded(_, w) | LoadOutcome::NoSections(w) => LOAD_OK | w.bits() as i32,
            LoadOutcome::Failed(e) => e.code(),
        }
    }

    pub fn warnings(&self) -> LoadWarnings {
        match self {
            LoadOutcome::Loaded(_, w) | LoadOutcome::NoSections(w) => *w,
            LoadOutcome::Failed(_) => LoadWarnings::empty(),
        }
    }
}

/// Ingest raw type and data layers (y-major, `COLUMNS` bytes per layer).
///
/// Short type data loads what is present and warns `PARTIAL_DATA`; ids the
/// catalogue does not know become `UNKNOWN` and warn `UNKNOWN_BLOCKS`.
pub fn load_raw(
    coord: ChunkCoord,
    extent: WorldExtent,
    raw_types: &[u8],
    raw_data: &[u8],
    table: &BlockTable,
    monitor: &UnknownBlockMonitor,
) -> LoadOutcome {
    if raw_types.is_empty() {
        return LoadOutcome::NoSections(LoadWarnings::empty());
    }
    let mut warnings = LoadWarnings::empty();
    if raw_types.len() < COLUMNS * extent.height as usize {
        warnings |= LoadWarnings::PARTIAL_DATA;
    }
    let (chunk, substituted) = Chunk::from_raw(coord, extent, raw_types, raw_data, table, monitor);
    if substituted > 0 {
        log::warn!(
            "chunk ({}, {}): {} voxels with unknown block ids",
            coord.cx,
            coord.cz,
            substituted
        );
        warnings |= LoadWarnings::UNKNOWN_BLOCKS;
    }
    LoadOutcome::Loaded(Box::new(chunk), warnings)
}

/// Source of chunk data.
pub trait ChunkLoader {
    fn load(&self, coord: ChunkCoord) -> LoadOutcome;
}

impl<F> ChunkLoader for F
where
    F: Fn(ChunkCoord) -> LoadOutcome,
{
    fn load(&self, coord: ChunkCoord) -> LoadOutcome {
        self(coord)
    }
}
