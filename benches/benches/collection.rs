// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::Size;
use understory_collection::{CollectionView, Identified, ItemViewProvider, VecSource};
use understory_flow::FlowLayout;

const CONTAINER: Size = Size::new(1_280.0, 720.0);

#[derive(Clone)]
struct Card {
    id: u32,
    size: Size,
}

impl Identified for Card {
    type Id = u32;

    fn id(&self) -> u32 {
        self.id
    }
}

struct Frames;

impl ItemViewProvider for Frames {
    type Item = Card;
    type Content = Size;

    fn content(&mut self, item: &Card) -> Size {
        item.size
    }
}

fn cards(n: u32) -> VecSource<Card> {
    (0..n)
        .map(|id| Card {
            id,
            size: Size::new(50.0 + f64::from(id % 11) * 10.0, 50.0 + f64::from(id % 7) * 15.0),
        })
        .collect()
}

type Cards = CollectionView<VecSource<Card>, Frames, FlowLayout<u32>>;

fn warm_view(n: u32) -> Cards {
    let mut view = CollectionView::new(cards(n), Frames, FlowLayout::new());
    view.layout_pass(CONTAINER, |frame| *frame)
        .expect("benchmark sizes are valid");
    view
}

fn bench_collection(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_collection");
    group.sample_size(50);

    for &n in &[256_u32, 4_096_u32] {
        group.bench_function(format!("steady_pass(n={n})"), |b| {
            b.iter_batched(
                || warm_view(n),
                |mut view| {
                    let pass = view.layout_pass(CONTAINER, |frame| *frame);
                    black_box(pass.map(|pass| pass.len()))
                },
                BatchSize::LargeInput,
            );
        });

        group.bench_function(format!("pass_after_insert(n={n})"), |b| {
            b.iter_batched(
                || warm_view(n),
                |mut view| {
                    view.update_source(|source| {
                        source.insert(0, Card {
                            id: u32::MAX,
                            size: Size::new(80.0, 80.0),
                        });
                    });
                    let pass = view.layout_pass(CONTAINER, |frame| *frame);
                    black_box(pass.map(|pass| pass.content_size()))
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_collection);
criterion_main!(benches);
