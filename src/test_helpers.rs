//! Shared test utilities for the vernissage test suite.
//!
//! Provides the standard portfolio fixture store, lookup helpers that panic
//! with context on a miss, and small builders for per-test stores.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let store = portfolio_store();
//! let dusk = find_collection(&store, "Dusk");
//! assert_eq!(gallery::collection_image_ids(&store, dusk.id).len(), 3);
//! ```

use std::collections::BTreeMap;

use crate::query::{CollectionQuery, StatusFilter};
use crate::store::{
    Attachment, AttachmentId, Collection, ContentStore, FieldValue, FlexRow, GalleryImage,
    ImageVariant, ItemId, ItemKind, ItemRecord, MemoryStore,
};

// =========================================================================
// Fixture store
// =========================================================================

/// The standard fixture: a small portfolio site snapshot.
///
/// Three published collections plus one draft, in modified order (newest
/// first): Dusk, Headlands, (Darkroom Tests), Tidelines.
///
/// - **Dusk** uses the direct relationship field (`images` 71, 72, 73) and
///   carries a `blurb` text field.
/// - **Headlands** uses flexible content: a text row plus two gallery rows
///   whose images dedup to 71, 74, 75 (one placeholder, one duplicate).
/// - **Tidelines** has no image fields at all.
/// - **Darkroom Tests** is a draft, visible only to authenticated viewers.
///
/// The front page (item 9, named by the `front_page` option) holds
/// background image rows for 71 and 74. Attachment orientations: 71 and 74
/// landscape, 72 and 75 portrait, 73 square; 73 has only its original
/// upload, the others also carry a `2048x2048` rendition.
pub fn portfolio_store() -> MemoryStore {
    MemoryStore::from_json(
        r#"{
        "options": {
            "contact_email": "studio@example.com",
            "front_page": "9"
        },
        "items": [
            {
                "id": 9, "kind": "page", "title": "Home",
                "fields": {
                    "background_images": {
                        "type": "image_rows",
                        "rows": [
                            { "image": 71 },
                            { },
                            { "image": 74 },
                            { "image": 71 }
                        ]
                    }
                }
            },
            {
                "id": 31, "kind": "collection", "title": "Dusk",
                "status": "published",
                "created": "2024-03-01T09:00:00",
                "modified": "2024-05-11T10:03:00",
                "fields": {
                    "images": { "type": "relationship", "ids": [71, 72, 73] },
                    "blurb": { "type": "text", "value": "Evening light studies" }
                }
            },
            {
                "id": 32, "kind": "collection", "title": "Headlands",
                "status": "published",
                "created": "2024-01-10T08:00:00",
                "modified": "2024-04-20T09:00:00",
                "fields": {
                    "flexible_content": {
                        "type": "flexible",
                        "rows": [
                            { "layout": "text", "body": "Coastal bluffs at first light" },
                            { "layout": "gallery", "images": [
                                { "attachment_id": 71, "added_at": "2024-04-01" },
                                { "attachment_id": 74, "added_at": "2024-04-02" }
                            ] },
                            { "layout": "gallery", "images": [
                                { "attachment_id": 75, "added_at": "2024-04-03" },
                                { "attachment_id": 0 },
                                { "attachment_id": 71, "added_at": "2024-04-01" }
                            ] }
                        ]
                    }
                }
            },
            {
                "id": 33, "kind": "collection", "title": "Tidelines",
                "status": "published",
                "created": "2023-11-05T12:00:00",
                "modified": "2024-02-01T16:30:00"
            },
            {
                "id": 34, "kind": "collection", "title": "Darkroom Tests",
                "status": "draft",
                "created": "2024-03-10T10:00:00",
                "modified": "2024-03-15T10:00:00"
            }
        ],
        "attachments": [
            {
                "id": 71, "title": "Dawn over the bay", "width": 2048, "height": 1365,
                "variants": {
                    "full": { "url": "/media/dawn.jpg", "width": 2048, "height": 1365 },
                    "2048x2048": { "url": "/media/dawn-2048.jpg", "width": 2048, "height": 1365 },
                    "medium": { "url": "/media/dawn-300.jpg", "width": 300, "height": 200 },
                    "thumbnail": { "url": "/media/dawn-150.jpg", "width": 150, "height": 100 }
                }
            },
            {
                "id": 72, "title": "Pier at night", "width": 1365, "height": 2048,
                "variants": {
                    "full": { "url": "/media/pier.jpg", "width": 1365, "height": 2048 },
                    "2048x2048": { "url": "/media/pier-2048.jpg", "width": 1365, "height": 2048 }
                }
            },
            {
                "id": 73, "title": "Shore stones", "width": 1500, "height": 1500,
                "variants": {
                    "full": { "url": "/media/shore.jpg", "width": 1500, "height": 1500 }
                }
            },
            {
                "id": 74, "title": "Ridge line", "width": 2048, "height": 1365,
                "variants": {
                    "full": { "url": "/media/ridge.jpg", "width": 2048, "height": 1365 },
                    "2048x2048": { "url": "/media/ridge-2048.jpg", "width": 2048, "height": 1365 }
                }
            },
            {
                "id": 75, "title": "Fog bank", "width": 1365, "height": 2048,
                "variants": {
                    "full": { "url": "/media/fog.jpg", "width": 1365, "height": 2048 },
                    "2048x2048": { "url": "/media/fog-2048.jpg", "width": 1365, "height": 2048 }
                }
            }
        ]
    }"#,
    )
    .expect("fixture snapshot should parse")
}

/// A store holding nothing but one site option.
pub fn store_with_option(name: &str, value: &str) -> MemoryStore {
    MemoryStore {
        options: BTreeMap::from([(name.to_string(), value.to_string())]),
        ..MemoryStore::default()
    }
}

/// A store holding one collection whose `flexible_content` field is exactly
/// `rows`, with no attachments. Returns the store and the collection id.
pub fn gallery_collection(rows: Vec<FlexRow>) -> (MemoryStore, ItemId) {
    let id = ItemId(50);
    let store = MemoryStore {
        items: vec![ItemRecord {
            id,
            kind: ItemKind::Collection,
            title: "Fixture".to_string(),
            status: Default::default(),
            created: Default::default(),
            modified: Default::default(),
            fields: BTreeMap::from([(
                "flexible_content".to_string(),
                FieldValue::Flexible { rows },
            )]),
        }],
        ..MemoryStore::default()
    };
    (store, id)
}

// =========================================================================
// Row and attachment builders
// =========================================================================

/// A gallery row from `(attachment_id, added_at)` pairs.
pub fn gallery_row(images: &[(u64, Option<&str>)]) -> FlexRow {
    FlexRow::Gallery {
        images: images
            .iter()
            .map(|&(id, added_at)| GalleryImage {
                attachment_id: AttachmentId(id),
                added_at: added_at.map(str::to_string),
            })
            .collect(),
    }
}

/// A non-gallery text row.
pub fn text_row(body: &str) -> FlexRow {
    FlexRow::Text {
        body: body.to_string(),
    }
}

/// Attachment ids from bare numbers.
pub fn attachment_ids(ids: &[u64]) -> Vec<AttachmentId> {
    ids.iter().map(|&id| AttachmentId(id)).collect()
}

/// An attachment with the given `(size, url, width, height)` renditions.
///
/// The attachment's own dimensions come from the first rendition (or
/// 1000x1000 when none are given); the title is `Attachment {id}`.
pub fn attachment_with_sizes(id: u64, sizes: &[(&str, &str, u32, u32)]) -> Attachment {
    let (width, height) = sizes
        .first()
        .map(|&(_, _, w, h)| (w, h))
        .unwrap_or((1000, 1000));
    Attachment {
        id: AttachmentId(id),
        title: format!("Attachment {id}"),
        width,
        height,
        variants: sizes
            .iter()
            .map(|&(name, url, w, h)| {
                (
                    name.to_string(),
                    ImageVariant {
                        url: url.to_string(),
                        width: w,
                        height: h,
                    },
                )
            })
            .collect(),
    }
}

// =========================================================================
// Store lookups — panics with a clear message on miss
// =========================================================================

/// Find a collection by title across all statuses. Panics if not found.
pub fn find_collection(store: &MemoryStore, title: &str) -> Collection {
    let query = CollectionQuery {
        status: StatusFilter::Any,
        ..CollectionQuery::default()
    };
    let collections = store.collections(&query);
    collections
        .iter()
        .find(|c| c.title == title)
        .cloned()
        .unwrap_or_else(|| {
            let titles: Vec<&str> = collections.iter().map(|c| c.title.as_str()).collect();
            panic!("collection '{title}' not found. Available: {titles:?}")
        })
}
