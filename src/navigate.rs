//! Circular previous/next navigation over ordered query results.
//!
//! Single-collection pages link to their neighbors in the front-page order,
//! wrapping at the ends so the last collection's "next" is the first one.
//! The lookups work over any slice of items that can name their identifier,
//! so the same functions drive collection navigation and in-gallery image
//! navigation.
//!
//! The list is always a fresh query result. Nothing here caches; the
//! collection wrappers re-query the store on every call so navigation
//! reflects edits immediately.

use crate::query::{CollectionQuery, Viewer};
use crate::store::{Collection, ContentStore, ItemId};

/// Anything with a stable identifier, navigable by [`next_in`] / [`prev_in`].
pub trait Identified {
    type Id: Copy + PartialEq;

    fn id(&self) -> Self::Id;
}

impl Identified for Collection {
    type Id = ItemId;

    fn id(&self) -> ItemId {
        self.id
    }
}

/// The element after the one identified by `current`, wrapping to the front.
///
/// When `current` is not in the list the last element comes back. That
/// fallback is load-bearing: a draft collection navigates "next" into the
/// public sequence instead of rendering a dead link.
pub fn next_in<T: Identified>(items: &[T], current: T::Id) -> Option<&T> {
    if items.is_empty() {
        return None;
    }
    match items.iter().position(|item| item.id() == current) {
        Some(idx) => items.get(idx + 1).or_else(|| items.first()),
        None => items.last(),
    }
}

/// The element before the one identified by `current`, wrapping to the back.
///
/// When `current` is not in the list the first element comes back, mirroring
/// the [`next_in`] fallback.
pub fn prev_in<T: Identified>(items: &[T], current: T::Id) -> Option<&T> {
    if items.is_empty() {
        return None;
    }
    match items.iter().position(|item| item.id() == current) {
        Some(0) => items.last(),
        Some(idx) => items.get(idx - 1),
        None => items.first(),
    }
}

/// The collection after `current` in the standard front-page order for
/// `viewer`. Queries fresh on every call.
pub fn next_collection(
    store: &dyn ContentStore,
    current: ItemId,
    viewer: Viewer,
) -> Option<Collection> {
    let collections = store.collections(&CollectionQuery::for_viewer(viewer));
    next_in(&collections, current).cloned()
}

/// The collection before `current` in the standard front-page order for
/// `viewer`.
pub fn prev_collection(
    store: &dyn ContentStore,
    current: ItemId,
    viewer: Viewer,
) -> Option<Collection> {
    let collections = store.collections(&CollectionQuery::for_viewer(viewer));
    prev_in(&collections, current).cloned()
}
