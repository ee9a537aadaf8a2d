//! Content store: the typed boundary between this crate and whatever CMS
//! actually persists collections, attachments, and site options.
//!
//! Everything above this module is written against the [`ContentStore`]
//! trait, so the assembly and presentation logic never knows whether it is
//! talking to a live CMS bridge or to a JSON snapshot loaded from disk.
//! [`MemoryStore`] is the bundled implementation: it deserializes a full
//! site snapshot and answers queries from memory, which is also what every
//! test in the crate runs against.
//!
//! A snapshot looks like this:
//!
//! ```json
//! {
//!   "options": { "contact_email": "hello@example.com", "front_page": "9" },
//!   "items": [
//!     {
//!       "id": 31,
//!       "kind": "collection",
//!       "title": "Dusk",
//!       "status": "published",
//!       "created": "2024-03-01T09:00:00",
//!       "modified": "2024-05-11T10:03:00",
//!       "fields": {
//!         "flexible_content": {
//!           "type": "flexible",
//!           "rows": [
//!             {
//!               "layout": "gallery",
//!               "images": [ { "attachment_id": 71, "added_at": "2024-05-01" } ]
//!             }
//!           ]
//!         }
//!       }
//!     }
//!   ],
//!   "attachments": [
//!     {
//!       "id": 71,
//!       "title": "Dawn over the bay",
//!       "width": 2048,
//!       "height": 1365,
//!       "variants": {
//!         "full": { "url": "/media/dawn.jpg", "width": 2048, "height": 1365 }
//!       }
//!     }
//!   ]
//! }
//! ```
//!
//! Lookups degrade instead of failing: a missing item, field, attachment, or
//! option comes back as `None` and the callers above turn that into empty
//! output. The only hard errors in this module are snapshot errors (I/O and
//! malformed JSON), reported through [`SnapshotError`].

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::query::CollectionQuery;

/// Canonical rendition name every attachment carries: the original upload.
pub const SIZE_FULL: &str = "full";

/// Small admin-preview rendition, used by the relationship-field preview.
pub const SIZE_THUMBNAIL: &str = "thumbnail";

/// Mid-size rendition, used to replace thumbnails in admin previews.
pub const SIZE_MEDIUM: &str = "medium";

/// Errors raised while loading a site snapshot.
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("IO error reading snapshot: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Identifier of a content item (collection or page).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a media attachment.
///
/// Zero is not a real identifier: field storage represents "no image
/// selected" as id 0, and the aggregation layer drops such entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttachmentId(pub u64);

impl AttachmentId {
    pub fn is_placeholder(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for AttachmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What kind of content item an identifier refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Collection,
    Page,
    Attachment,
}

/// Publication state of a content item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    Published,
    Draft,
    Pending,
    Private,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Published => "published",
            Status::Draft => "draft",
            Status::Pending => "pending",
            Status::Private => "private",
        }
    }
}

/// A collection as returned by queries: the item header without its fields.
///
/// Field values stay in the store and are fetched per name through
/// [`ContentStore::field`], mirroring how the assembly layer actually
/// consumes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub id: ItemId,
    pub title: String,
    pub status: Status,
    pub created: NaiveDateTime,
    pub modified: NaiveDateTime,
}

/// One rendition of an attachment at a named size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImageVariant {
    pub url: String,
    pub width: u32,
    pub height: u32,
}

/// A media attachment with its renditions, keyed by size name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Attachment {
    pub id: AttachmentId,
    pub title: String,
    /// Pixel dimensions of the original upload.
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub variants: BTreeMap<String, ImageVariant>,
}

impl Attachment {
    /// Rendition at `size`, falling back to the original upload when the
    /// requested size was never generated.
    pub fn variant(&self, size: &str) -> Option<&ImageVariant> {
        self.variants
            .get(size)
            .or_else(|| self.variants.get(SIZE_FULL))
    }

    /// URL of the rendition at `size`, with the same fallback as
    /// [`Attachment::variant`].
    pub fn url_for(&self, size: &str) -> Option<&str> {
        self.variant(size).map(|v| v.url.as_str())
    }
}

/// One image entry inside a gallery row of a flexible-content field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GalleryImage {
    pub attachment_id: AttachmentId,
    /// Date the image was added to the gallery, as entered in the admin
    /// (nominally `YYYY-MM-DD`). Kept as the raw string; parsing and the
    /// fail-closed policy around it live in the aggregation layer.
    #[serde(default)]
    pub added_at: Option<String>,
}

/// One row of a repeater-style image field: a single optional image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImageRow {
    #[serde(default)]
    pub image: Option<AttachmentId>,
}

/// One row of a flexible-content field, tagged by its layout name.
///
/// Only `gallery` rows carry images this crate cares about; every other
/// layout deserializes to [`FlexRow::Other`] and is skipped by the
/// aggregation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "layout", rename_all = "snake_case")]
pub enum FlexRow {
    Gallery {
        #[serde(default)]
        images: Vec<GalleryImage>,
    },
    Text {
        body: String,
    },
    #[serde(other)]
    Other,
}

/// A typed field value, tagged by shape rather than by field name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldValue {
    /// Free text or a scalar rendered as text.
    Text { value: String },
    /// A relationship field: ordered attachment references.
    Relationship {
        #[serde(default)]
        ids: Vec<AttachmentId>,
    },
    /// A repeater of single-image rows.
    ImageRows {
        #[serde(default)]
        rows: Vec<ImageRow>,
    },
    /// A flexible-content field: ordered layout rows.
    Flexible {
        #[serde(default)]
        rows: Vec<FlexRow>,
    },
}

/// Read access to site content.
///
/// All lookups are total: absent data is `None`, never an error. That keeps
/// the assembly layer free of failure paths for the everyday case of a
/// half-filled site.
pub trait ContentStore {
    /// Collections matching `query`, already filtered, ordered, and capped.
    fn collections(&self, query: &CollectionQuery) -> Vec<Collection>;

    /// Value of the named field on an item.
    fn field(&self, item: ItemId, name: &str) -> Option<FieldValue>;

    /// Attachment metadata by id.
    fn attachment(&self, id: AttachmentId) -> Option<Attachment>;

    /// Kind of the item behind an identifier.
    fn item_kind(&self, item: ItemId) -> Option<ItemKind>;

    /// Site-wide option by name.
    fn option(&self, name: &str) -> Option<String>;
}

/// A content item as stored in a snapshot: header plus named fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ItemRecord {
    pub id: ItemId,
    pub kind: ItemKind,
    pub title: String,
    #[serde(default)]
    pub status: Status,
    #[serde(default = "epoch")]
    pub created: NaiveDateTime,
    #[serde(default = "epoch")]
    pub modified: NaiveDateTime,
    #[serde(default)]
    pub fields: BTreeMap<String, FieldValue>,
}

fn epoch() -> NaiveDateTime {
    NaiveDateTime::default()
}

impl ItemRecord {
    fn summary(&self) -> Collection {
        Collection {
            id: self.id,
            title: self.title.clone(),
            status: self.status,
            created: self.created,
            modified: self.modified,
        }
    }
}

/// In-memory [`ContentStore`] backed by a JSON site snapshot.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MemoryStore {
    pub options: BTreeMap<String, String>,
    pub items: Vec<ItemRecord>,
    pub attachments: Vec<Attachment>,
}

impl MemoryStore {
    /// Parses a snapshot from a JSON string.
    ///
    /// Unknown keys anywhere in the snapshot are rejected so that typos in
    /// hand-written fixtures surface as errors instead of silently missing
    /// data.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a snapshot from a JSON file on disk.
    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    fn item(&self, id: ItemId) -> Option<&ItemRecord> {
        self.items.iter().find(|record| record.id == id)
    }
}

impl ContentStore for MemoryStore {
    fn collections(&self, query: &CollectionQuery) -> Vec<Collection> {
        let summaries = self
            .items
            .iter()
            .filter(|record| record.kind == ItemKind::Collection)
            .map(ItemRecord::summary)
            .collect();
        query.apply(summaries)
    }

    fn field(&self, item: ItemId, name: &str) -> Option<FieldValue> {
        self.item(item)?.fields.get(name).cloned()
    }

    fn attachment(&self, id: AttachmentId) -> Option<Attachment> {
        self.attachments.iter().find(|att| att.id == id).cloned()
    }

    fn item_kind(&self, item: ItemId) -> Option<ItemKind> {
        if let Some(record) = self.item(item) {
            return Some(record.kind);
        }
        self.attachments
            .iter()
            .any(|att| att.id.0 == item.0)
            .then_some(ItemKind::Attachment)
    }

    fn option(&self, name: &str) -> Option<String> {
        self.options.get(name).cloned()
    }
}
