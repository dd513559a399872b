use proptest::prelude::*;
use voxmap_blocks::ids;
use voxmap_chunk::{CHUNK_SIZE, ChunkCoord, ChunkLoader, LoadOutcome, WorldExtent};
use voxmap_world::{NoiseWorld, WorldConfig};

fn coord() -> impl Strategy<Value = ChunkCoord> {
    (-2_000i32..2_000, -2_000i32..2_000).prop_map(|(cx, cz)| ChunkCoord::new(cx, cz))
}

fn seed() -> impl Strategy<Value = i32> {
    any::<i32>()
}

fn world(seed: i32) -> NoiseWorld {
    let mut cfg = WorldConfig::default();
    cfg.terrain.seed = seed;
    NoiseWorld::new(cfg, WorldExtent::MODERN)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    // the plan for a column does not depend on which chunk asks for it
    #[test]
    fn plan_matches_generated_surface(s in seed(), c in coord()) {
        let w = world(s);
        let chunk = w.generate(c);
        let extent = w.extent();
        for z in 0..CHUNK_SIZE { for x in 0..CHUNK_SIZE {
            let plan = w.plan(c.min_x() + x as i32, c.min_z() + z as i32);
            prop_assert_eq!(chunk.biome(x, z), plan.biome);
            let top = extent.clamp_to_storage(plan.surface) as usize;
            let (id, _) = chunk.get(x, top, z).unwrap();
            prop_assert!(id != ids::AIR);
            prop_assert_eq!(chunk.get(x, 0, z), Some((ids::BEDROCK, 0)));
        }}
    }

    // surfaces stay within the configured amplitude around the base height
    #[test]
    fn surface_within_amplitude(s in seed(), wx in -100_000i32..100_000, wz in -100_000i32..100_000) {
        let w = world(s);
        let t = &w.config().terrain;
        let h = w.surface_height(wx, wz);
        prop_assert!(h >= t.base - t.amplitude && h <= t.base + t.amplitude);
    }

    // no column below the water level is left open to the sky
    #[test]
    fn water_fills_to_level(s in seed(), c in coord()) {
        let w = world(s);
        let chunk = w.generate(c);
        let level = w.config().water.level;
        let storage_level = w.extent().clamp_to_storage(level) as usize;
        for z in 0..CHUNK_SIZE { for x in 0..CHUNK_SIZE {
            let plan = w.plan(c.min_x() + x as i32, c.min_z() + z as i32);
            if plan.surface < level {
                prop_assert_eq!(chunk.get(x, storage_level, z), Some((ids::STATIONARY_WATER, 0)));
            }
        }}
    }

    // the loader never reports failures or missing sections
    #[test]
    fn loader_always_loads(c in coord()) {
        let w = world(1337);
        let loaded = matches!(w.load(c), LoadOutcome::Loaded(_, warnings) if warnings.is_empty());
        prop_assert!(loaded);
    }
}
