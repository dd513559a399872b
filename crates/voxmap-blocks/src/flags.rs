use bitflags::bitflags;

bitflags! {
    /// Geometry and rendering classes of a block type.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct BlockFlags: u32 {
        const WHOLE = 0x1;
        const ALMOST_WHOLE = 0x2;
        const STAIRS = 0x4;
        const HALF = 0x8;
        const MIDDLER = 0x10;
        const BILLBOARD = 0x20;
        const PANE = 0x40;
        const FLATTOP = 0x80;
        const FLATSIDE = 0x100;
        const SMALL_MIDDLER = 0x200;
        const SMALL_BILLBOARD = 0x400;
        const TRANSPARENT = 0x800;
        const CUTOUTS = 0x1000;
        const TRUNK_PART = 0x2000;
        const LEAF_PART = 0x4000;
    }
}

impl BlockFlags {
    /// Classes that are visible from above on a normal map.
    pub const VISIBLE: BlockFlags = BlockFlags::WHOLE
        .union(BlockFlags::ALMOST_WHOLE)
        .union(BlockFlags::STAIRS)
        .union(BlockFlags::HALF)
        .union(BlockFlags::MIDDLER)
        .union(BlockFlags::BILLBOARD)
        .union(BlockFlags::PANE)
        .union(BlockFlags::FLATTOP);

    /// Small geometry that only shows when every object is drawn.
    pub const SMALL: BlockFlags = BlockFlags::FLATSIDE
        .union(BlockFlags::SMALL_MIDDLER)
        .union(BlockFlags::SMALL_BILLBOARD);

    /// Visibility mask for a draw.
    #[inline]
    pub fn view_filter(show_all: bool) -> BlockFlags {
        if show_all {
            Self::VISIBLE | Self::SMALL
        } else {
            Self::VISIBLE
        }
    }
}
