// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use binstretch_model::{generator::generate_instance, item::Item};
use binstretch_oracle::{
    backend::{FeasibilityBackend, search::SearchBackend},
    model::PackingModel,
    oracle::FeasibilityOracle,
};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::hint::black_box;

const CAPACITY: i64 = 20;

fn instances(num_bins: usize, count: usize) -> Vec<Vec<Item<i64>>> {
    let mut rng = ChaCha8Rng::seed_from_u64(num_bins as u64);
    (0..count)
        .map(|_| generate_instance(num_bins, CAPACITY, true, &mut rng).items)
        .collect()
}

fn bench_oracle(c: &mut Criterion) {
    let mut group = c.benchmark_group("oracle");

    for num_bins in [3usize, 4, 5] {
        let batch = instances(num_bins, 64);
        let total_items: usize = batch.iter().map(Vec::len).sum();
        group.throughput(Throughput::Elements(batch.len() as u64));

        // Fresh oracle per iteration, so the cache never answers.
        group.bench_with_input(
            BenchmarkId::new("uncached", num_bins),
            &batch,
            |b, batch| {
                b.iter(|| {
                    let mut oracle = FeasibilityOracle::new(SearchBackend::new());
                    for items in batch {
                        let ok = oracle
                            .is_feasible(black_box(items), num_bins, CAPACITY)
                            .unwrap_or(false);
                        if !ok {
                            panic!("Benchmark configuration error: generated instance reported infeasible.");
                        }
                    }
                })
            },
        );

        let models: Vec<PackingModel<i64>> = batch
            .iter()
            .filter_map(|items| {
                let mut sizes: Vec<i64> = items.iter().map(Item::size).collect();
                sizes.sort_unstable_by(|a, b| b.cmp(a));
                PackingModel::build(&sizes, num_bins, CAPACITY)
            })
            .collect();

        group.bench_with_input(
            BenchmarkId::new("exact_search", format!("{}x{}", num_bins, total_items)),
            &models,
            |b, models| {
                let mut backend = SearchBackend::new();
                b.iter(|| {
                    for model in models {
                        let _ = black_box(backend.solve(black_box(model)));
                    }
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_oracle);
criterion_main!(benches);
