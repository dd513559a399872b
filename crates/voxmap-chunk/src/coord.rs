#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ChunkCoord {
    pub cx: i32,
    pub cz: i32,
}

impl ChunkCoord {
    #[inline]
    pub const fn new(cx: i32, cz: i32) -> Self {
        Self { cx, cz }
    }

    /// Chunk containing world column (`wx`, `wz`).
    #[inline]
    pub fn containing(wx: i32, wz: i32) -> Self {
        Self::new(wx.div_euclid(16), wz.div_euclid(16))
    }

    #[inline]
    pub fn offset(self, dx: i32, dz: i32) -> Self {
        Self {
            cx: self.cx + dx,
            cz: self.cz + dz,
        }
    }

    /// Neighbor toward negative X.
    #[inline]
    pub fn west(self) -> Self {
        self.offset(-1, 0)
    }

    #[inline]
    pub fn min_x(self) -> i32 {
        self.cx * 16
    }

    #[inline]
    pub fn min_z(self) -> i32 {
        self.cz * 16
    }

    #[inline]
    pub fn max_x(self) -> i32 {
        self.cx * 16 + 15
    }

    #[inline]
    pub fn max_z(self) -> i32 {
        self.cz * 16 + 15
    }
}

impl From<(i32, i32)> for ChunkCoord {
    fn from(value: (i32, i32)) -> Self {
        Self::new(value.0, value.1)
    }
}

impl From<ChunkCoord> for (i32, i32) {
    fn from(value: ChunkCoord) -> Self {
        (value.cx, value.cz)
    }
}

/// Vertical range of a world. Voxels are stored zero-based: storage index 0
/// is world Y `min_y`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WorldExtent {
    pub min_y: i32,
    pub height: u16,
}

impl WorldExtent {
    pub const LEGACY: WorldExtent = WorldExtent {
        min_y: 0,
        height: 256,
    };
    pub const MODERN: WorldExtent = WorldExtent {
        min_y: -64,
        height: 384,
    };

    #[inline]
    pub const fn new(min_y: i32, height: u16) -> Self {
        Self { min_y, height }
    }

    /// Highest storage index.
    #[inline]
    pub fn top(&self) -> u16 {
        self.height.saturating_sub(1)
    }

    #[inline]
    pub fn max_world_y(&self) -> i32 {
        self.min_y + i32::from(self.height) - 1
    }

    #[inline]
    pub fn to_world_y(&self, y: u16) -> i32 {
        i32::from(y) + self.min_y
    }

    /// Storage index for world `y`, clamped into range.
    #[inline]
    pub fn clamp_to_storage(&self, y: i32) -> u16 {
        (y - self.min_y).clamp(0, i32::from(self.top())) as u16
    }

    #[inline]
    pub fn to_storage_y(&self, y: i32) -> Option<u16> {
        let rel = y - self.min_y;
        (0..i32::from(self.height)).contains(&rel).then_some(rel as u16)
    }
}

impl Default for WorldExtent {
    fn default() -> Self {
        Self::MODERN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn containing_floors_negative_columns() {
        assert_eq!(ChunkCoord::containing(-1, 15), ChunkCoord::new(-1, 0));
        assert_eq!(ChunkCoord::containing(-16, -17), ChunkCoord::new(-1, -2));
        assert_eq!(ChunkCoord::containing(16, 0), ChunkCoord::new(1, 0));
    }

    #[test]
    fn extent_converts_between_world_and_storage() {
        let e = WorldExtent::MODERN;
        assert_eq!(e.to_storage_y(-64), Some(0));
        assert_eq!(e.to_storage_y(319), Some(383));
        assert_eq!(e.to_storage_y(320), None);
        assert_eq!(e.clamp_to_storage(-100), 0);
        assert_eq!(e.clamp_to_storage(1000), 383);
        assert_eq!(e.to_world_y(70), 6);
        assert_eq!(e.max_world_y(), 319);
    }
}
