// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `understory_collection` crate.
//!
//! These drive a `CollectionView` over a `FlowLayout` through several passes,
//! checking that source changes, explicit notifications, and container resizes
//! all lead to a fresh layout, and that unchanged passes reuse the cache.

use kurbo::{Point, Rect, Size};
use understory_collection::{
    CollectionLayout, CollectionView, Identified, ItemViewProvider, LayoutPass, ScrollAxis,
    VecSource,
};
use understory_flow::{FlowConfig, FlowLayout, MeasurementChange, PlaceError};

#[derive(Clone, Debug, PartialEq)]
struct Tile {
    id: u32,
    width: f64,
    height: f64,
}

impl Tile {
    fn new(id: u32, width: f64, height: f64) -> Self {
        Self { id, width, height }
    }
}

impl Identified for Tile {
    type Id = u32;

    fn id(&self) -> u32 {
        self.id
    }
}

/// Produces a frame per tile and counts how often it was asked.
#[derive(Default)]
struct Frames {
    produced: usize,
}

impl ItemViewProvider for Frames {
    type Item = Tile;
    type Content = Size;

    fn content(&mut self, item: &Tile) -> Size {
        self.produced += 1;
        Size::new(item.width, item.height)
    }
}

const CONTAINER: Size = Size::new(300.0, 100.0);

fn measure(frame: &Size) -> Size {
    *frame
}

fn tiles() -> VecSource<Tile> {
    [
        Tile::new(1, 100.0, 50.0),
        Tile::new(2, 100.0, 50.0),
        Tile::new(3, 150.0, 50.0),
        Tile::new(4, 200.0, 50.0),
    ]
    .into_iter()
    .collect()
}

fn collection() -> CollectionView<VecSource<Tile>, Frames, FlowLayout<u32>> {
    CollectionView::new(tiles(), Frames::default(), FlowLayout::new())
}

fn origins(
    view: &mut CollectionView<VecSource<Tile>, Frames, FlowLayout<u32>>,
    container: Size,
) -> Vec<(u32, Point, usize)> {
    view.layout_pass(container, measure)
        .unwrap()
        .iter()
        .map(|item| (item.id, item.attributes.origin, item.attributes.page))
        .collect()
}

#[test]
fn pass_places_items_in_source_order() {
    let mut view = collection();
    let pass = view.layout_pass(CONTAINER, measure).unwrap();

    assert_eq!(pass.len(), 4);
    assert_eq!(pass.scroll_axis(), ScrollAxis::Horizontal);
    assert_eq!(pass.container(), CONTAINER);
    let ids: Vec<u32> = pass.iter().map(|item| item.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);

    assert_eq!(pass.get(&3).unwrap().attributes.origin, Point::new(0.0, 50.0));
    // Tile 4 overflows the second row and page 0 has no room for a third.
    let four = pass.get(&4).unwrap();
    assert_eq!((four.attributes.origin, four.attributes.page), (Point::new(300.0, 0.0), 1));
    assert_eq!(four.content, Size::new(200.0, 50.0));
    assert_eq!(pass.content_size(), Size::new(600.0, 100.0));
    assert_eq!(pass.on_page(0).count(), 3);
}

#[test]
fn unchanged_source_reuses_cached_positions() {
    let mut view = collection();
    let first = origins(&mut view, CONTAINER);
    let generation = view.layout().generation();
    let second = origins(&mut view, CONTAINER);

    assert_eq!(first, second);
    assert_eq!(view.layout().generation(), generation);
    assert_eq!(view.provider().produced, 8);
}

#[test]
fn source_changes_invalidate_before_the_next_pass() {
    let mut view = collection();
    origins(&mut view, CONTAINER);

    // Mutating through `update_source` invalidates immediately.
    let removed = view.update_source(|source| source.remove(0));
    assert_eq!(removed.map(|tile| tile.id), Some(1));
    assert!(view.layout().is_empty());

    let placed = origins(&mut view, CONTAINER);
    assert_eq!(placed[0], (2, Point::ORIGIN, 0));
    assert_eq!(placed[1], (3, Point::new(100.0, 0.0), 0));
}

#[test]
fn sync_detects_revision_changes_once() {
    let mut source = tiles();
    source.push(Tile::new(5, 10.0, 10.0));
    let mut view = CollectionView::new(source, Frames::default(), FlowLayout::new());

    assert!(view.sync(), "first sync always invalidates");
    assert!(!view.sync());
    origins(&mut view, CONTAINER);
    assert!(!view.sync());
    assert_eq!(view.layout().len(), 5);
}

#[test]
fn notify_changed_forces_relayout() {
    let mut view = collection();
    origins(&mut view, CONTAINER);
    assert_eq!(view.layout().len(), 4);

    view.notify_changed();
    assert!(view.layout().is_empty());
    assert_eq!(view.layout().generation(), 1);
    assert!(!view.sync(), "notify_changed already recorded the revision");
}

#[test]
fn reordering_moves_items() {
    let mut view = collection();
    origins(&mut view, CONTAINER);

    view.update_source(|source| source.move_item(3, 0));
    let placed = origins(&mut view, CONTAINER);
    assert_eq!(placed[0], (4, Point::ORIGIN, 0));
    assert_eq!(placed[1], (1, Point::new(200.0, 0.0), 0));
}

#[test]
fn container_resize_relayouts_everything() {
    let mut view = collection();
    origins(&mut view, CONTAINER);

    let wide = Size::new(600.0, 100.0);
    let placed = origins(&mut view, wide);
    assert!(placed.iter().all(|(_, _, page)| *page == 0));
    assert_eq!(placed[3], (4, Point::new(350.0, 0.0), 0));
    assert_eq!(view.layout().container_size(), Some(wide));
}

#[test]
fn empty_source_yields_an_empty_pass() {
    let mut view = CollectionView::new(
        VecSource::<Tile>::new(),
        Frames::default(),
        FlowLayout::new(),
    );
    let pass = view.layout_pass(CONTAINER, measure).unwrap();
    assert!(pass.is_empty());
    assert_eq!(pass.content_size(), Size::ZERO);
    assert!(view.layout().is_empty());
}

#[test]
fn layout_errors_are_propagated() {
    let mut view = collection();
    view.update_source(|source| source.insert(2, Tile::new(9, 0.0, 10.0)));

    let err = view.layout_pass(CONTAINER, measure).unwrap_err();
    assert_eq!(
        err,
        PlaceError::InvalidItemSize {
            size: Size::new(0.0, 10.0)
        }
    );
    // Items before the rejected one were placed.
    assert_eq!(view.layout().len(), 2);
}

#[test]
fn visible_culls_by_viewport() {
    let mut view = collection();
    let pass = view.layout_pass(CONTAINER, measure).unwrap();

    let first_page = Rect::from_origin_size(Point::ORIGIN, CONTAINER);
    let mut ids: Vec<u32> = pass.visible(first_page).map(|item| item.id).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec![1, 2, 3]);

    let second_page = first_page + kurbo::Vec2::new(CONTAINER.width, 0.0);
    let ids: Vec<u32> = pass.visible(second_page).map(|item| item.id).collect();
    assert_eq!(ids, vec![4]);
}

fn assert_no_overlaps(pass: &LayoutPass<u32, Size>) {
    for (i, a) in pass.iter().enumerate() {
        for b in &pass.items()[i + 1..] {
            let shared = a.attributes.rect().intersect(b.attributes.rect()).area();
            assert!(shared <= 0.0, "items {} and {} overlap", a.id, b.id);
        }
    }
}

#[test]
fn remeasured_item_mid_pass_restarts_the_pass() {
    let source: VecSource<Tile> = [
        Tile::new(1, 100.0, 50.0),
        Tile::new(2, 101.0, 50.0),
        Tile::new(3, 50.0, 50.0),
    ]
    .into_iter()
    .collect();
    let config = FlowConfig::new().with_measurement_change(MeasurementChange::Relayout);
    let mut view = CollectionView::new(source, Frames::default(), FlowLayout::with_config(config));
    view.layout_pass(CONTAINER, measure).unwrap();

    // Tile 2 now measures wider without any change to the source.
    let grown = |frame: &Size| {
        if frame.width > 100.0 {
            Size::new(120.0, frame.height)
        } else {
            *frame
        }
    };
    let second = view.layout_pass(CONTAINER, grown).unwrap();
    assert_no_overlaps(&second);
    let placed: Vec<(u32, Point)> = second
        .iter()
        .map(|item| (item.id, item.attributes.origin))
        .collect();
    assert_eq!(
        placed,
        vec![
            (1, Point::ORIGIN),
            (2, Point::new(100.0, 0.0)),
            (3, Point::new(220.0, 0.0)),
        ]
    );
    assert_eq!(second.get(&2).unwrap().attributes.size.width, 120.0);

    let generation = view.layout().generation();
    let third = view.layout_pass(CONTAINER, grown).unwrap();
    assert_eq!(third.items(), second.items());
    assert_eq!(view.layout().generation(), generation);
}

#[test]
fn duplicate_ids_are_skipped() {
    let source: VecSource<Tile> = [
        Tile::new(1, 100.0, 50.0),
        Tile::new(2, 100.0, 50.0),
        Tile::new(1, 80.0, 50.0),
        Tile::new(3, 50.0, 50.0),
    ]
    .into_iter()
    .collect();
    let mut view = CollectionView::new(source, Frames::default(), FlowLayout::new());
    let pass = view.layout_pass(CONTAINER, measure).unwrap();

    assert_eq!(pass.len(), 3);
    assert_eq!(pass.skipped_duplicates(), 1);
    assert_eq!(pass.get(&1).unwrap().content, Size::new(100.0, 50.0));
    assert_eq!(pass.get(&3).unwrap().attributes.origin, Point::new(200.0, 0.0));
    assert_no_overlaps(&pass);
    // The skipped copy never reaches the provider or the layout.
    assert_eq!(view.provider().produced, 3);
    assert_eq!(view.layout().len(), 3);
}

#[test]
fn custom_layouts_plug_into_the_same_driver() {
    /// Stacks items vertically, ignoring the container width.
    #[derive(Default)]
    struct Column {
        next_y: f64,
        invalidations: usize,
    }

    impl CollectionLayout for Column {
        type Key = u32;

        fn scroll_axis(&self) -> ScrollAxis {
            ScrollAxis::Vertical
        }

        fn place(
            &mut self,
            _key: u32,
            measured: Size,
            container: Size,
        ) -> Result<understory_flow::LayoutAttributes, PlaceError> {
            let mut attributes = understory_flow::LayoutAttributes::first(measured, container);
            attributes.origin.y = self.next_y;
            self.next_y += measured.height;
            Ok(attributes)
        }

        fn invalidate(&mut self) {
            self.next_y = 0.0;
            self.invalidations += 1;
        }

        fn content_size(&self) -> Size {
            Size::new(0.0, self.next_y)
        }
    }

    let mut view = CollectionView::new(tiles(), Frames::default(), Column::default());
    let pass = view.layout_pass(CONTAINER, measure).unwrap();
    assert_eq!(pass.scroll_axis(), ScrollAxis::Vertical);
    assert_eq!(pass.get(&4).unwrap().attributes.origin, Point::new(0.0, 150.0));
    assert_eq!(pass.content_size(), Size::new(0.0, 200.0));
    assert_eq!(view.layout().invalidations, 1);
}
