// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use bjpeg_transforms::{BLOCK_DIM, BLOCK_SIZE, idct8x8, idct8x8_butterfly};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn dense_block() -> [i32; BLOCK_SIZE] {
    std::array::from_fn(|i| ((i as i32 * 37) % 61) - 30)
}

fn dc_block() -> [i32; BLOCK_SIZE] {
    let mut block = [0; BLOCK_SIZE];
    block[0] = 312;
    block
}

fn bench_idct(c: &mut Criterion) {
    let mut group = c.benchmark_group("idct8x8");
    let mut out = [0u8; BLOCK_SIZE];

    for (name, block) in [("dense", dense_block()), ("dc_only", dc_block())] {
        group.bench_function(BenchmarkId::new("dispatch", name), |b| {
            b.iter(|| {
                let mut scratch = black_box(block);
                idct8x8(&mut scratch, &mut out, BLOCK_DIM);
            })
        });
        group.bench_function(BenchmarkId::new("butterfly", name), |b| {
            b.iter(|| {
                let mut scratch = black_box(block);
                idct8x8_butterfly(&mut scratch, &mut out, BLOCK_DIM);
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_idct);
criterion_main!(benches);
