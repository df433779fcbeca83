// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::Size;
use understory_flow::{FlowConfig, FlowLayout, PageAdvance};

const CONTAINER: Size = Size::new(1_280.0, 720.0);

#[derive(Clone)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u32(&mut self) -> u32 {
        // Numerical Recipes LCG parameters.
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 32) as u32
    }

    fn gen_extent(&mut self, min: u32, max: u32) -> f64 {
        f64::from(min + self.next_u32() % (max - min + 1))
    }
}

fn random_sizes(n: u32, seed: u64) -> Vec<Size> {
    let mut rng = Lcg::new(seed);
    (0..n)
        .map(|_| Size::new(rng.gen_extent(50, 150), rng.gen_extent(50, 150)))
        .collect()
}

fn run_pass(layout: &mut FlowLayout<u32>, sizes: &[Size], container: Size) -> f64 {
    let mut acc = 0.0;
    for (key, size) in (0_u32..).zip(sizes) {
        let attrs = layout
            .place(key, *size, container)
            .expect("benchmark sizes are valid");
        acc += attrs.x() + attrs.y();
    }
    acc
}

fn warm_layout(sizes: &[Size], config: FlowConfig) -> FlowLayout<u32> {
    let mut layout = FlowLayout::with_config(config);
    run_pass(&mut layout, sizes, CONTAINER);
    layout
}

fn bench_flow(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_flow");
    group.sample_size(50);

    for &n in &[256_u32, 4_096_u32] {
        let sizes = random_sizes(n, 0xF10A_0000_0000_0001);

        for (label, advance) in [
            ("vertical", PageAdvance::WhenVerticalSpaceExhausted),
            ("horizontal", PageAdvance::WhenHorizontalSpaceExhausted),
        ] {
            let config = FlowConfig::new().with_page_advance(advance);
            group.bench_function(format!("cold_pass(n={n},advance={label})"), |b| {
                b.iter_batched(
                    || FlowLayout::with_config(config),
                    |mut layout| black_box(run_pass(&mut layout, &sizes, CONTAINER)),
                    BatchSize::LargeInput,
                );
            });
        }

        group.bench_function(format!("warm_pass(n={n})"), |b| {
            b.iter_batched(
                || warm_layout(&sizes, FlowConfig::new()),
                |mut layout| black_box(run_pass(&mut layout, &sizes, CONTAINER)),
                BatchSize::LargeInput,
            );
        });

        group.bench_function(format!("resized_pass(n={n})"), |b| {
            let resized = Size::new(CONTAINER.width * 0.75, CONTAINER.height);
            b.iter_batched(
                || warm_layout(&sizes, FlowConfig::new()),
                |mut layout| black_box(run_pass(&mut layout, &sizes, resized)),
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_flow);
criterion_main!(benches);
