//! Occlusion query benchmark.
//!
//! Measures the per-frame cost of composing the full occlusion grid a
//! rendering sink consumes: one `full_occlusion` per screen column.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use chroma_maze::{Coord, Labyrinth};

/// A dense 8x8x6x6 grid with a checkerboard of blocks.
fn dense_grid() -> Labyrinth {
    let size = vec![8, 8, 6, 6];
    let mut blocks = Vec::new();
    for x in 1..=8 {
        for y in 1..=8 {
            for c in 1..=6 {
                for d in 1..=6 {
                    if (x + y + c + d) % 2 == 0 && (x, y, c, d) != (8, 8, 6, 6) {
                        blocks.push(Coord::from([x, y, c, d]));
                    }
                }
            }
        }
    }
    Labyrinth::new(size, blocks, Coord::from([8, 8, 6, 6])).unwrap()
}

fn bench_full_occlusion(c: &mut Criterion) {
    let lab = dense_grid();
    let observer = Coord::from([1, 1, 3, 4]);

    c.bench_function("full_occlusion_8x8", |b| {
        b.iter(|| {
            let mut visible = 0;
            for y in 1..=8 {
                for x in 1..=8 {
                    let top = lab.full_occlusion(black_box(x), black_box(y), &observer);
                    visible += top.component(2) + top.component(3);
                }
            }
            black_box(visible)
        })
    });

    c.bench_function("occlusion_height_solid_column", |b| {
        b.iter(|| lab.occlusion_height(black_box(2), black_box(1), &observer, 2))
    });
}

criterion_group!(benches, bench_full_occlusion);
criterion_main!(benches);
