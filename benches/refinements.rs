// Magellan: A solver laboratory for the symmetric Euclidean TSP
// Copyright (C) 2023 Tibor Schneider <sctibor@ethz.ch>
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use rand::prelude::*;

use magellan::refinements::{twoopt_pick, twoopt_refinement};
use tspcore::prelude::*;

fn bench_refinements(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0);
    let inst = Instance::random_uniform("bench100", 100, 1000.0, &mut rng).unwrap();
    // build the matrix outside the measurement
    inst.distances();

    c.bench_function("twoopt_pick_100", |b| {
        let tour = Tour::random(100, &mut rng);
        b.iter(|| black_box(twoopt_pick(&inst, &tour)))
    });

    c.bench_function("twoopt_refinement_60", |b| {
        let mut rng = StdRng::seed_from_u64(1);
        let inst = Instance::random_uniform("bench60", 60, 1000.0, &mut rng).unwrap();
        inst.distances();
        b.iter_batched(
            || Tour::random(60, &mut rng),
            |mut tour| {
                black_box(twoopt_refinement(&inst, &mut tour, &Stopwatch::unlimited()))
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_refinements);
criterion_main!(benches);
