use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use voxmap_blocks::BlockTable;
use voxmap_chunk::{
    COLUMNS, Chunk, ChunkCoord, ChunkLoader, LoadError, LoadOutcome, LoadWarnings,
    UnknownBlockMonitor, WorldExtent, load_raw,
};

/// Chunks stored as one file each: every type byte, then every data byte,
/// in storage order (`y` major, then `z`, then `x`).
///
/// Type bytes use the catalogue's low eight bits; ids above 255 set the high
/// bit of the data byte.
pub struct RawWorld {
    dir: PathBuf,
    extent: WorldExtent,
    blocks: BlockTable,
    monitor: Arc<UnknownBlockMonitor>,
}

impl RawWorld {
    pub fn new(
        dir: impl Into<PathBuf>,
        extent: WorldExtent,
        blocks: BlockTable,
        monitor: Arc<UnknownBlockMonitor>,
    ) -> Self {
        Self {
            dir: dir.into(),
            extent,
            blocks,
            monitor,
        }
    }

    pub fn chunk_path(&self, coord: ChunkCoord) -> PathBuf {
        chunk_file(&self.dir, coord)
    }

    #[inline]
    pub fn monitor(&self) -> &UnknownBlockMonitor {
        &self.monitor
    }
}

fn chunk_file(dir: &Path, coord: ChunkCoord) -> PathBuf {
    dir.join(format!("c.{}.{}.raw", coord.cx, coord.cz))
}

/// Serialize `chunk` in the layout [`RawWorld`] reads.
pub fn encode_chunk(chunk: &Chunk) -> Vec<u8> {
    let n = COLUMNS * chunk.height() as usize;
    let mut out = Vec::with_capacity(n * 2);
    let mut data = Vec::with_capacity(n);
    for i in 0..n {
        let id = chunk.type_at(i);
        let mut d = chunk.data_at(i);
        if id > 0xff {
            d |= 0x80;
        }
        out.push(id as u8);
        data.push(d);
    }
    out.extend_from_slice(&data);
    out
}

/// Write `chunk` into `dir` under its coordinate's file name.
pub fn write_chunk(dir: &Path, chunk: &Chunk) -> std::io::Result<PathBuf> {
    let path = chunk_file(dir, chunk.coord);
    fs::write(&path, encode_chunk(chunk))?;
    Ok(path)
}

impl ChunkLoader for RawWorld {
    fn load(&self, coord: ChunkCoord) -> LoadOutcome {
        let path = self.chunk_path(coord);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return LoadOutcome::NoSections(LoadWarnings::empty());
            }
            Err(e) => return LoadOutcome::Failed(LoadError::Io(format!("{}: {e}", path.display()))),
        };
        let n = COLUMNS * self.extent.height as usize;
        if bytes.len() > n * 2 {
            return LoadOutcome::Failed(LoadError::Corrupt(format!(
                "{}: {} bytes, expected at most {}",
                path.display(),
                bytes.len(),
                n * 2
            )));
        }
        let (types, data) = bytes.split_at(bytes.len().min(n));
        load_raw(coord, self.extent, types, data, &self.blocks, &self.monitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxmap_blocks::ids;

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("voxmap-raw-{}-{name}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn world(dir: &Path) -> RawWorld {
        RawWorld::new(
            dir,
            WorldExtent::new(0, 8),
            BlockTable::standard(),
            Arc::new(UnknownBlockMonitor::new(true)),
        )
    }

    #[test]
    fn written_chunks_load_back() {
        let dir = scratch("roundtrip");
        let mut c = Chunk::new(ChunkCoord::new(-2, 5), WorldExtent::new(0, 8));
        c.fill_column(3, 4, 0, 5, ids::STONE, 0);
        c.set(3, 6, 4, ids::CORAL_BLOCK, 2);
        write_chunk(&dir, &c).unwrap();
        let w = world(&dir);
        let LoadOutcome::Loaded(got, warnings) = w.load(ChunkCoord::new(-2, 5)) else {
            panic!("expected a chunk");
        };
        assert!(warnings.is_empty());
        assert_eq!(got.get(3, 6, 4), Some((ids::CORAL_BLOCK, 2)));
        assert_eq!(got.column_top(3, 4), Some(6));
        assert!(!w.monitor().seen());
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_and_oversized_files() {
        let dir = scratch("errors");
        let w = world(&dir);
        assert!(matches!(w.load(ChunkCoord::new(0, 0)), LoadOutcome::NoSections(_)));
        fs::write(w.chunk_path(ChunkCoord::new(1, 0)), vec![0u8; COLUMNS * 8 * 2 + 1]).unwrap();
        let out = w.load(ChunkCoord::new(1, 0));
        assert_eq!(out.status_code(), -2);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn unknown_ids_warn_and_trip_the_monitor() {
        let dir = scratch("unknown");
        let w = world(&dir);
        let mut bytes = vec![ids::STONE as u8; COLUMNS];
        bytes[0] = 230;
        fs::write(w.chunk_path(ChunkCoord::new(0, 0)), bytes).unwrap();
        let out = w.load(ChunkCoord::new(0, 0));
        assert!(out.warnings().contains(LoadWarnings::UNKNOWN_BLOCKS | LoadWarnings::PARTIAL_DATA));
        assert!(w.monitor().seen());
        fs::remove_dir_all(&dir).unwrap();
    }
}
