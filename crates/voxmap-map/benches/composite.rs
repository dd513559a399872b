use std::hint::black_box;
use std::time::Duration;

use criterion::{Criterion, criterion_group, criterion_main};
use voxmap_blocks::ids;
use voxmap_chunk::{
    Chunk, ChunkCache, ChunkCoord, LoadOutcome, LoadWarnings, LruChunkCache, WorldExtent,
};
use voxmap_map::{
    Compositor, DrawRequest, HighlightBox, MapImage, MapRenderer, PixelFormat, RenderOptions,
    Viewport,
};

fn terrain(coord: ChunkCoord) -> Chunk {
    let mut c = Chunk::new(coord, WorldExtent::MODERN);
    for z in 0..16 {
        for x in 0..16 {
            let h = 120 + ((x * 7 + z * 13) % 24);
            c.fill_column(x, z, 0, h - 4, ids::STONE, 0);
            c.fill_column(x, z, h - 3, h - 1, ids::DIRT, 0);
            c.set(x, h, z, ids::GRASS_BLOCK, 0);
            if (x + z) % 5 == 0 {
                c.fill_column(x, z, h + 1, h + 4, ids::LEAVES, 0);
            }
            c.set_biome(x, z, ((x + z) % 40) as u8);
        }
    }
    c
}

fn lake(coord: ChunkCoord) -> Chunk {
    let mut c = Chunk::new(coord, WorldExtent::MODERN);
    for z in 0..16 {
        for x in 0..16 {
            c.fill_column(x, z, 0, 100, ids::SAND, 0);
            c.fill_column(x, z, 101, 126, ids::STATIONARY_WATER, 0);
        }
    }
    c
}

fn bench_composite(c: &mut Criterion) {
    let mut group = c.benchmark_group("composite_chunk");
    let renderer = MapRenderer::new(WorldExtent::MODERN);
    let hbox = HighlightBox::default();
    let cases = [
        ("terrain_plain", terrain(ChunkCoord::new(0, 0)), RenderOptions::empty()),
        (
            "terrain_all_effects",
            terrain(ChunkCoord::new(0, 0)),
            RenderOptions::LIGHTING
                | RenderOptions::DEPTH_SHADING
                | RenderOptions::BIOMES
                | RenderOptions::CAVE_MODE,
        ),
        ("lake_blend", lake(ChunkCoord::new(0, 0)), RenderOptions::BIOMES),
    ];
    for (name, chunk, options) in cases {
        let compositor = Compositor::new(renderer.resolver(), 383, options, &hbox);
        let mut chunk = chunk;
        group.bench_function(name, |b| {
            b.iter(|| {
                let hits = compositor.composite(&mut chunk, None);
                black_box((&chunk.tile, hits));
            })
        });
    }
    group.finish();
}

fn bench_viewport(c: &mut Criterion) {
    let mut group = c.benchmark_group("draw_viewport");
    let loader = |coord: ChunkCoord| LoadOutcome::Loaded(Box::new(terrain(coord)), LoadWarnings::empty());
    let request = DrawRequest {
        view: Viewport {
            center_x: 0.0,
            center_z: 0.0,
            zoom: 2.0,
        },
        top_y: 319,
        options: RenderOptions::LIGHTING | RenderOptions::BIOMES,
    };
    group.bench_function("cached_512x512", |b| {
        let mut renderer = MapRenderer::new(WorldExtent::MODERN);
        let mut cache = LruChunkCache::new(1024);
        let mut image = MapImage::new(512, 512, PixelFormat::Rgba);
        b.iter(|| {
            let report = renderer
                .draw_viewport(&mut cache, &loader, &request, &mut image, &mut |_| {})
                .unwrap();
            black_box(report);
        })
    });
    group.bench_function("cold_512x512", |b| {
        let mut renderer = MapRenderer::new(WorldExtent::MODERN);
        let mut cache = LruChunkCache::new(1024);
        let mut image = MapImage::new(512, 512, PixelFormat::Rgba);
        b.iter(|| {
            cache.clear();
            let report = renderer
                .draw_viewport(&mut cache, &loader, &request, &mut image, &mut |_| {})
                .unwrap();
            black_box(report);
        })
    });
    group.finish();
}

fn short_config() -> Criterion {
    Criterion::default()
        .measurement_time(Duration::from_secs(10))
        .warm_up_time(Duration::from_secs(3))
        .sample_size(20)
}

criterion_group! {
    name = benches;
    config = short_config();
    targets = bench_composite, bench_viewport
}
criterion_main!(benches);
