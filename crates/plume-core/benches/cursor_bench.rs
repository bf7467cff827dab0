// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use criterion::{criterion_group, criterion_main, Criterion};
use plume_core::container::{Array, BinaryHeap, HashMap, Iterable, List};
use std::hint::black_box;

fn bench_cursors(c: &mut Criterion) {
    let array: Array<u32> = (0..10_000).collect();
    let list: List<u32> = (0..10_000).collect();
    let mut map = HashMap::new();
    let mut heap = BinaryHeap::new();
    for i in 0..10_000u32 {
        map.add(i, i);
        heap.add(i.wrapping_mul(2_654_435_761), i);
    }

    let mut group = c.benchmark_group("Cursor Walks");

    group.bench_function("Array forward", |b| {
        b.iter(|| {
            let mut sum = 0u64;
            for value in array.cursor(0) {
                sum += u64::from(*value);
            }
            black_box(sum);
        });
    });

    group.bench_function("List forward", |b| {
        b.iter(|| {
            let mut sum = 0u64;
            for value in list.cursor(0) {
                sum += u64::from(*value);
            }
            black_box(sum);
        });
    });

    group.bench_function("List backward", |b| {
        b.iter(|| {
            let mut sum = 0u64;
            for value in list.end_cursor().backward() {
                sum += u64::from(*value);
            }
            black_box(sum);
        });
    });

    group.bench_function("HashMap values", |b| {
        b.iter(|| {
            let mut sum = 0u64;
            for value in map.cursor(0) {
                sum += u64::from(*value);
            }
            black_box(sum);
        });
    });

    group.bench_function("BinaryHeap values", |b| {
        b.iter(|| {
            let mut sum = 0u64;
            for value in heap.cursor(0) {
                sum += u64::from(*value);
            }
            black_box(sum);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_cursors);
criterion_main!(benches);
