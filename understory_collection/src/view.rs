// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Size;
use understory_flow::PlaceError;

use crate::pass::{LayoutPass, PlacedItem};
use crate::{CollectionLayout, Identified, ItemSource};

/// Maps items to the content a host renders for them.
///
/// The content is opaque to this crate; it is only handed back to the host's
/// measurement callback and stored in the resulting [`LayoutPass`].
pub trait ItemViewProvider {
    /// The item type this provider understands.
    type Item;
    /// The produced content (a widget handle, a display list, a label...).
    type Content;

    /// Produces content for `item`.
    fn content(&mut self, item: &Self::Item) -> Self::Content;
}

/// A collection: an item source, a view provider, and a layout, kept in sync.
///
/// `CollectionView` is the glue a host drives once per render pass through
/// [`CollectionView::layout_pass`]. It owns the layout state exclusively and
/// watches the source's revision, so a changed item sequence always reaches
/// the layout as a full invalidation before any item is placed.
///
/// The item and identity types of the three parts are tied together by the
/// bounds on the `impl` block: the provider must accept the source's items and
/// the layout must be keyed by their ids.
#[derive(Clone, Debug)]
pub struct CollectionView<S, P, L> {
    source: S,
    provider: P,
    layout: L,
    seen_revision: Option<u64>,
}

impl<S, P, L> CollectionView<S, P, L>
where
    S: ItemSource,
    P: ItemViewProvider<Item = S::Item>,
    L: CollectionLayout<Key = <S::Item as Identified>::Id>,
{
    /// Creates a collection from its parts.
    ///
    /// Whatever the layout had cached is dropped on the first pass.
    #[must_use]
    pub fn new(source: S, provider: P, layout: L) -> Self {
        Self {
            source,
            provider,
            layout,
            seen_revision: None,
        }
    }

    /// Returns the item source.
    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Returns the view provider.
    #[must_use]
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Returns the view provider mutably.
    ///
    /// Content changes that alter measured sizes are not detected; call
    /// [`CollectionView::notify_changed`] afterwards if they should.
    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    /// Returns the layout.
    #[must_use]
    pub fn layout(&self) -> &L {
        &self.layout
    }

    /// Returns the layout mutably.
    pub fn layout_mut(&mut self) -> &mut L {
        &mut self.layout
    }

    /// Splits the collection back into its parts.
    pub fn into_parts(self) -> (S, P, L) {
        (self.source, self.provider, self.layout)
    }

    /// Mutates the source, invalidating the layout right away if its revision
    /// changed.
    pub fn update_source<R>(&mut self, f: impl FnOnce(&mut S) -> R) -> R {
        let result = f(&mut self.source);
        self.sync();
        result
    }

    /// Invalidates the layout unconditionally.
    ///
    /// This is the hook for upstream "about to change" signals that carry no
    /// detail about what changed.
    pub fn notify_changed(&mut self) {
        log::debug!("CollectionView: change notified, invalidating layout");
        self.layout.invalidate();
        self.seen_revision = Some(self.source.revision());
    }

    /// Invalidates the layout if the source changed since the last sync.
    ///
    /// Returns `true` if it did.
    pub fn sync(&mut self) -> bool {
        let revision = self.source.revision();
        if self.seen_revision == Some(revision) {
            return false;
        }
        log::debug!(
            "CollectionView: source revision {:?} -> {revision}, invalidating layout",
            self.seen_revision
        );
        self.layout.invalidate();
        self.seen_revision = Some(revision);
        true
    }

    /// Runs one layout pass for a container of size `container`.
    ///
    /// Items are visited in presentation order: each one gets content from the
    /// provider, is measured by `measure`, and is placed by the layout.
    ///
    /// If the layout drops its cache while placing an item (see
    /// [`CollectionLayout::generation`]), the positions already collected are
    /// stale, so the layout is invalidated and the pass starts over from the
    /// first item. This happens at most once per pass.
    ///
    /// Items whose id repeats an earlier one are skipped with a warning and
    /// counted in [`LayoutPass::skipped_duplicates`].
    ///
    /// # Errors
    ///
    /// Stops at the first item the layout rejects and returns its
    /// [`PlaceError`]. Items placed before it stay cached.
    pub fn layout_pass(
        &mut self,
        container: Size,
        mut measure: impl FnMut(&P::Content) -> Size,
    ) -> Result<LayoutPass<<S::Item as Identified>::Id, P::Content>, PlaceError> {
        self.sync();

        let mut restarted = false;
        'pass: loop {
            let items = self.source.items();
            let mut pass = LayoutPass::new(container, self.layout.scroll_axis(), items.len());
            for (position, item) in items.iter().enumerate() {
                let id = item.id();
                if pass.contains(&id) {
                    log::warn!("CollectionView: skipping item {position}, its id is already placed");
                    pass.skip_duplicate();
                    continue;
                }
                let content = self.provider.content(item);
                let measured = measure(&content);
                let generation = self.layout.generation();
                let attributes = self.layout.place(id.clone(), measured, container)?;
                if self.layout.generation() != generation && !pass.is_empty() {
                    if !restarted {
                        log::debug!(
                            "CollectionView: layout dropped its cache at item {position}, restarting pass"
                        );
                        self.layout.invalidate();
                        restarted = true;
                        continue 'pass;
                    }
                    log::warn!(
                        "CollectionView: layout dropped its cache again at item {position}, positions may overlap"
                    );
                }
                pass.push(PlacedItem {
                    id,
                    content,
                    attributes,
                });
            }
            pass.set_content_size(self.layout.content_size());
            return Ok(pass);
        }
    }
}
