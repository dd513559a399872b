use proptest::prelude::*;
use voxmap_blocks::ids::{self, BlockId};
use voxmap_chunk::{Chunk, ChunkCoord, WorldExtent, column_index};
use voxmap_map::color::unpack;
use voxmap_map::{
    Compositor, HighlightBox, HighlightState, MapRenderer, RenderOptions, UndoMode,
};

fn opaque_id() -> impl Strategy<Value = BlockId> {
    prop::sample::select(vec![
        ids::STONE,
        ids::DIRT,
        ids::COBBLESTONE,
        ids::BEDROCK,
        ids::SAND,
        ids::BRICK,
        ids::OBSIDIAN,
        ids::SNOW_BLOCK,
    ])
}

fn translucent_id() -> impl Strategy<Value = BlockId> {
    prop::sample::select(vec![ids::ICE, ids::GLASS, ids::STATIONARY_WATER])
}

fn local() -> impl Strategy<Value = usize> {
    0usize..16
}

fn corners() -> impl Strategy<Value = [i32; 6]> {
    (
        -200i32..200,
        -80i32..340,
        -200i32..200,
        -200i32..200,
        -80i32..340,
        -200i32..200,
    )
        .prop_map(|(a, b, c, d, e, f)| [a, b, c, d, e, f])
}

fn chunk() -> Chunk {
    Chunk::new(ChunkCoord::new(0, 0), WorldExtent::LEGACY)
}

proptest! {
    // a lone opaque voxel shows exactly its resolved color
    #[test]
    fn opaque_column_shows_resolved_color(
        id in opaque_id(),
        h in 1u16..200,
        extra in 0u16..55,
        x in local(),
        z in local(),
    ) {
        let renderer = MapRenderer::new(WorldExtent::LEGACY);
        let mut c = chunk();
        c.set(x, h as usize, z, id, 0);
        let hbox = HighlightBox::default();
        let top = h + extra;
        Compositor::new(renderer.resolver(), top, RenderOptions::empty(), &hbox).composite(&mut c, None);
        let voxel = Chunk::idx(x, h as usize, z);
        let want = unpack(renderer.resolver().resolve(&c, voxel, id, 0, 12, false, true));
        let o = column_index(x, z) * 4;
        prop_assert_eq!(&c.tile[o..o + 3], &want[..]);
        prop_assert_eq!(c.tile[o + 3], 0xff);
        prop_assert_eq!(c.heightmap[column_index(x, z)], Some(h));
    }

    // k layers of alpha a accumulate to 1 - (1 - a)^k
    #[test]
    fn translucent_layers_accumulate_alpha(id in translucent_id(), k in 1usize..8, base in 1usize..100) {
        let renderer = MapRenderer::new(WorldExtent::LEGACY);
        let mut c = chunk();
        c.fill_column(0, 0, base, base + k - 1, id, 0);
        let hbox = HighlightBox::default();
        let comp = Compositor::new(renderer.resolver(), 255, RenderOptions::empty(), &hbox);
        let mut prev = -1;
        let sample = comp.sample(&c, 0, 0, &mut prev);
        let a = f64::from(renderer.blocks().alpha(id));
        prop_assert_eq!(sample.layers as usize, k);
        prop_assert!((sample.alpha - (1.0 - (1.0 - a).powi(k as i32))).abs() < 1e-6);
    }

    // show-all records the top of the stack, otherwise the deepest blended voxel
    #[test]
    fn heightmap_follows_show_all(
        glass in translucent_id(),
        k in 1usize..6,
        floor in prop::option::of(opaque_id()),
        base in 2usize..100,
    ) {
        let renderer = MapRenderer::new(WorldExtent::LEGACY);
        let mut c = chunk();
        if let Some(id) = floor {
            c.set(3, base - 1, 3, id, 0);
        }
        c.fill_column(3, 3, base, base + k - 1, glass, 0);
        let hbox = HighlightBox::default();
        let top = (base + k - 1) as u16;
        let deepest = (if floor.is_some() { base - 1 } else { base }) as u16;

        Compositor::new(renderer.resolver(), 255, RenderOptions::SHOW_ALL, &hbox).composite(&mut c, None);
        prop_assert_eq!(c.heightmap[column_index(3, 3)], Some(top));
        Compositor::new(renderer.resolver(), 255, RenderOptions::empty(), &hbox).composite(&mut c, None);
        prop_assert_eq!(c.heightmap[column_index(3, 3)], Some(deepest));
    }

    // a second undo without a new selection changes nothing
    #[test]
    fn undo_is_consumed(a in corners(), b in corners()) {
        let mut h = HighlightState::new(WorldExtent::MODERN);
        h.set(true, a, UndoMode::Discard);
        h.set(true, b, UndoMode::Push);
        let undone = h.undo();
        let bounds = h.bounds();
        let generation = h.generation();
        prop_assert!(undone);
        prop_assert!(!h.undo());
        prop_assert_eq!(h.bounds(), bounds);
        prop_assert_eq!(h.generation(), generation);
    }

    // re-setting the same effective box keeps the generation
    #[test]
    fn same_box_keeps_generation(a in corners(), on in prop::bool::ANY) {
        let mut h = HighlightState::new(WorldExtent::MODERN);
        h.set(on, a, UndoMode::Discard);
        let generation = h.generation();
        let [x0, y0, z0, x1, y1, z1] = a;
        prop_assert!(!h.set(on, [x1, y1, z1, x0, y0, z0], UndoMode::Discard));
        prop_assert!(!h.set(on, h.bounds(), UndoMode::Push));
        prop_assert_eq!(h.generation(), generation);
    }
}
