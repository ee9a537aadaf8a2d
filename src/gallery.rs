//! Image aggregation: resolving a collection's image references into flat
//! id lists.
//!
//! Two storage shapes coexist across site versions and both are supported,
//! deliberately kept as separate entry points rather than unified behind a
//! guess:
//!
//! - **Direct**: the collection carries a relationship field listing
//!   attachment ids in display order ([`collection_image_ids`]).
//! - **Flexible content**: the collection carries layout rows, and rows of
//!   the `gallery` layout each hold a list of images with an `added_at`
//!   date ([`all_attachment_ids`], [`newest_attachment_ids`]).
//!
//! Aggregation never fails: missing fields and empty rows yield empty lists.
//! The one sharp edge is the newest-images filter, which stops at the first
//! unparseable date and returns what it has collected so far. That
//! fail-closed policy is kept on purpose so that a bad date entered in the
//! admin cannot quietly promote stale images as "new"; a warning is logged
//! when it triggers.

use std::collections::HashSet;

use chrono::{Local, NaiveDate};
use rand::seq::IndexedRandom;

use crate::fields::{self, BACKGROUND_IMAGES_FIELD, FLEXIBLE_CONTENT_FIELD, IMAGES_FIELD};
use crate::store::{AttachmentId, ContentStore, FlexRow, ItemId};

/// Attachment ids from a collection's direct relationship field, in stored
/// order. Ids are passed through as-is; resolution (and dropping of ids
/// that no longer resolve) happens at presentation time.
pub fn collection_image_ids(store: &dyn ContentStore, collection: ItemId) -> Vec<AttachmentId> {
    fields::relationship_ids(store, collection, IMAGES_FIELD)
}

/// Every attachment id in a collection's flexible-content gallery rows.
///
/// Non-gallery rows are skipped. The result keeps first-seen order, with
/// duplicates and placeholder (zero) ids removed.
pub fn all_attachment_ids(store: &dyn ContentStore, collection: ItemId) -> Vec<AttachmentId> {
    let mut ids = Vec::new();
    for row in fields::flexible_rows(store, collection, FLEXIBLE_CONTENT_FIELD) {
        let FlexRow::Gallery { images } = row else {
            continue;
        };
        ids.extend(images.into_iter().map(|image| image.attachment_id));
    }
    dedup_nonzero(ids)
}

/// Gallery attachment ids added within `days` of today.
///
/// Convenience wrapper over [`newest_attachment_ids_as_of`] using the local
/// calendar date.
pub fn newest_attachment_ids(
    store: &dyn ContentStore,
    collection: ItemId,
    days: i64,
) -> Vec<AttachmentId> {
    newest_attachment_ids_as_of(store, collection, days, Local::now().date_naive())
}

/// Gallery attachment ids whose `added_at` date lies within `days` of
/// `today`, boundary inclusive. The window is symmetric: a date `days`
/// ahead of `today` also qualifies, since only the absolute distance in
/// days is compared.
///
/// Fail-closed: on the first image whose `added_at` is missing or does not
/// parse, traversal stops and the ids collected up to that point are
/// returned verbatim (no dedup pass). A complete traversal returns the
/// deduplicated list with placeholder ids dropped.
pub fn newest_attachment_ids_as_of(
    store: &dyn ContentStore,
    collection: ItemId,
    days: i64,
    today: NaiveDate,
) -> Vec<AttachmentId> {
    let mut ids = Vec::new();
    for row in fields::flexible_rows(store, collection, FLEXIBLE_CONTENT_FIELD) {
        let FlexRow::Gallery { images } = row else {
            continue;
        };
        for image in images {
            let Some(added) = image.added_at.as_deref().and_then(parse_added_at) else {
                tracing::warn!(
                    collection = %collection,
                    attachment = %image.attachment_id,
                    added_at = image.added_at.as_deref().unwrap_or(""),
                    "unparseable added_at date, returning partial newest-images result"
                );
                return ids;
            };
            let days_old = (today - added).num_days().abs();
            if days_old <= days {
                ids.push(image.attachment_id);
            }
        }
    }
    dedup_nonzero(ids)
}

/// Number of distinct images in a collection's gallery rows.
pub fn image_count(store: &dyn ContentStore, collection: ItemId) -> usize {
    all_attachment_ids(store, collection).len()
}

/// Background image candidates from the front page's repeater field:
/// deduplicated, placeholder rows skipped.
///
/// The front page is located through the `front_page` site option; an
/// unset or non-numeric option value yields an empty list.
pub fn background_image_ids(store: &dyn ContentStore) -> Vec<AttachmentId> {
    let Ok(front_page) = fields::option_text(store, fields::FRONT_PAGE_OPTION).parse::<u64>()
    else {
        return Vec::new();
    };
    let ids = fields::image_rows(store, ItemId(front_page), BACKGROUND_IMAGES_FIELD)
        .into_iter()
        .filter_map(|row| row.image)
        .collect();
    dedup_nonzero(ids)
}

/// URL of one randomly chosen background image at the requested size.
///
/// `None` when the front page has no candidates, or when the drawn
/// candidate no longer resolves to an attachment with a URL (no second
/// draw is attempted).
pub fn background_image_url(store: &dyn ContentStore, size: &str) -> Option<String> {
    let ids = background_image_ids(store);
    let mut rng = rand::rng();
    let id = *ids.choose(&mut rng)?;
    let attachment = store.attachment(id)?;
    attachment.url_for(size).map(str::to_string)
}

/// `added_at` values come from a date field whose admin default is stamped
/// in compact form, while manually edited rows tend to carry the dashed
/// form. Both parse; anything else is a failure.
pub(crate) fn parse_added_at(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y%m%d"))
        .ok()
}

fn dedup_nonzero(ids: Vec<AttachmentId>) -> Vec<AttachmentId> {
    let mut seen = HashSet::new();
    ids.into_iter()
        .filter(|id| !id.is_placeholder() && seen.insert(*id))
        .collect()
}
