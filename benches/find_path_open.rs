//! Measure a search across an open 64x64 map from the top left corner to the bottom right
//!

use bevy_autowalk_tiles_plugin::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// Search corner to corner, reusing the node pools of `search`
fn open_search(search: &mut PathSearch, map: &TileMap) -> Option<WalkPath> {
	let context = StepContext {
		ignore_characters: true,
		..Default::default()
	};
	search.find_path(map, context, (0, 0, 0), (63, 63), 0, PATHFINDER_MAX_NODES)
}

pub fn criterion_benchmark(c: &mut Criterion) {
	let mut group = c.benchmark_group("algorithm_use");
	group.significance_level(0.05).sample_size(100);
	let map = TileMap::open_grid(64, 64, 0);
	let mut search = PathSearch::new();
	group.bench_function("find_path_open", |b| {
		b.iter(|| open_search(black_box(&mut search), black_box(&map)))
	});
	group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
