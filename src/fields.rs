//! Tolerant field accessors over a [`ContentStore`].
//!
//! Templates call these with whatever item happens to be in front of them.
//! A field that is absent, or present with a shape other than the one asked
//! for, yields an empty value rather than an error: a half-filled site
//! renders as empty sections, never as a crash. Shape mismatches are logged
//! at warn level since they usually mean a snapshot and a template disagree
//! about the site schema.

use crate::store::{AttachmentId, ContentStore, FieldValue, FlexRow, ImageRow, ItemId};

/// Relationship field holding a collection's directly attached images.
pub const IMAGES_FIELD: &str = "images";

/// Flexible-content field holding a collection's layout rows.
pub const FLEXIBLE_CONTENT_FIELD: &str = "flexible_content";

/// Repeater field on the front page holding background image candidates.
pub const BACKGROUND_IMAGES_FIELD: &str = "background_images";

/// Sub-field inside gallery rows recording when an image was added.
pub const ADDED_AT_FIELD: &str = "added_at";

/// Site option naming the public contact address.
pub const CONTACT_EMAIL_OPTION: &str = "contact_email";

/// Site option naming the front page item id.
pub const FRONT_PAGE_OPTION: &str = "front_page";

/// Text value of a field, or the empty string.
pub fn text(store: &dyn ContentStore, item: ItemId, name: &str) -> String {
    match store.field(item, name) {
        Some(FieldValue::Text { value }) => value,
        Some(_) => {
            tracing::warn!(item = %item, field = name, "expected text field, got another shape");
            String::new()
        }
        None => String::new(),
    }
}

/// Attachment ids of a relationship field, or an empty list.
pub fn relationship_ids(store: &dyn ContentStore, item: ItemId, name: &str) -> Vec<AttachmentId> {
    match store.field(item, name) {
        Some(FieldValue::Relationship { ids }) => ids,
        Some(_) => {
            tracing::warn!(item = %item, field = name, "expected relationship field, got another shape");
            Vec::new()
        }
        None => Vec::new(),
    }
}

/// Rows of a single-image repeater field, or an empty list.
pub fn image_rows(store: &dyn ContentStore, item: ItemId, name: &str) -> Vec<ImageRow> {
    match store.field(item, name) {
        Some(FieldValue::ImageRows { rows }) => rows,
        Some(_) => {
            tracing::warn!(item = %item, field = name, "expected image rows, got another shape");
            Vec::new()
        }
        None => Vec::new(),
    }
}

/// Rows of a flexible-content field, or an empty list.
pub fn flexible_rows(store: &dyn ContentStore, item: ItemId, name: &str) -> Vec<FlexRow> {
    match store.field(item, name) {
        Some(FieldValue::Flexible { rows }) => rows,
        Some(_) => {
            tracing::warn!(item = %item, field = name, "expected flexible content, got another shape");
            Vec::new()
        }
        None => Vec::new(),
    }
}

/// Trimmed site option, or the empty string.
pub fn option_text(store: &dyn ContentStore, name: &str) -> String {
    store
        .option(name)
        .map(|value| value.trim().to_string())
        .unwrap_or_default()
}
