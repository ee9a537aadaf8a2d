//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not markup-centric**. The primary
//! display for every entity (collection, image) is its semantic identity —
//! positional index and title — with derived data (orientation, renditions,
//! URLs) shown as indented context lines. Raw markup is shown only where it
//! is the answer (the `email` command).
//!
//! # Output Format
//!
//! ## Collections
//!
//! ```text
//! Collections
//! 001 Dusk (3 images)
//!     Status: published
//!     Modified: 2024-05-11 10:03
//! ```
//!
//! ## Gallery
//!
//! ```text
//! Gallery: Dusk (3 images)
//! 001 Dawn over the bay (landscape, first)
//!     Lightbox: /media/dawn-2048.jpg
//!     Prev: square  Next: portrait
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.

use crate::gallery;
use crate::present::PresentedImage;
use crate::store::{Collection, ContentStore, FieldValue, FlexRow, MemoryStore};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

// ============================================================================
// Collections listing
// ============================================================================

/// Format the collection listing: index, title, image count, then status and
/// modification time as context lines.
pub fn format_collections(store: &dyn ContentStore, collections: &[Collection]) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push("Collections".to_string());

    if collections.is_empty() {
        lines.push("    (none)".to_string());
        return lines;
    }

    for (i, collection) in collections.iter().enumerate() {
        let count = display_image_count(store, collection);
        lines.push(format!(
            "{} {} ({} images)",
            format_index(i + 1),
            collection.title,
            count
        ));
        lines.push(format!("    Status: {}", collection.status.as_str()));
        lines.push(format!(
            "    Modified: {}",
            collection.modified.format("%Y-%m-%d %H:%M")
        ));
    }
    lines
}

/// Image count across both storage shapes, for display.
///
/// Sites use exactly one shape per version, so at most one of these is
/// non-zero.
fn display_image_count(store: &dyn ContentStore, collection: &Collection) -> usize {
    let direct = gallery::collection_image_ids(store, collection.id).len();
    if direct > 0 {
        direct
    } else {
        gallery::image_count(store, collection.id)
    }
}

pub fn print_collections(store: &dyn ContentStore, collections: &[Collection]) {
    for line in format_collections(store, collections) {
        println!("{}", line);
    }
}

// ============================================================================
// Gallery display
// ============================================================================

/// Format one presented gallery: each image with its orientation, position
/// flags, lightbox URL, and neighbor orientations.
pub fn format_gallery(title: &str, images: &[PresentedImage]) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(format!("Gallery: {} ({} images)", title, images.len()));

    for (i, image) in images.iter().enumerate() {
        let mut flags = vec![image.orientation.as_str().to_string()];
        if image.first {
            flags.push("first".to_string());
        }
        if image.last {
            flags.push("last".to_string());
        }
        lines.push(format!(
            "{} {} ({})",
            format_index(i + 1),
            image.attachment.title,
            flags.join(", ")
        ));
        if let Some(ref url) = image.lightbox_url {
            lines.push(format!("    Lightbox: {}", url));
        }
        lines.push(format!(
            "    Prev: {}  Next: {}",
            image.prev_orientation, image.next_orientation
        ));
    }
    lines
}

pub fn print_gallery(title: &str, images: &[PresentedImage]) {
    for line in format_gallery(title, images) {
        println!("{}", line);
    }
}

// ============================================================================
// Email shortcode display
// ============================================================================

/// Format the rendered email element, or a note when nothing rendered.
pub fn format_email(element: &str) -> Vec<String> {
    if element.is_empty() {
        vec!["(no address configured - nothing rendered)".to_string()]
    } else {
        vec![element.to_string()]
    }
}

pub fn print_email(element: &str) {
    for line in format_email(element) {
        println!("{}", line);
    }
}

// ============================================================================
// Snapshot check
// ============================================================================

/// Problems found while checking a snapshot for internal consistency.
///
/// These are the degradations the library otherwise hides: attachment
/// references that no longer resolve, and `added_at` dates the newest-images
/// filter would choke on.
pub fn snapshot_issues(store: &MemoryStore) -> Vec<String> {
    let mut issues = Vec::new();

    for item in &store.items {
        for (field_name, value) in &item.fields {
            match value {
                FieldValue::Relationship { ids } => {
                    for id in ids {
                        if !id.is_placeholder() && store.attachment(*id).is_none() {
                            issues.push(format!(
                                "item {} ('{}') field '{}': attachment {} does not resolve",
                                item.id, item.title, field_name, id
                            ));
                        }
                    }
                }
                FieldValue::ImageRows { rows } => {
                    for row in rows {
                        if let Some(id) = row.image
                            && !id.is_placeholder()
                            && store.attachment(id).is_none()
                        {
                            issues.push(format!(
                                "item {} ('{}') field '{}': attachment {} does not resolve",
                                item.id, item.title, field_name, id
                            ));
                        }
                    }
                }
                FieldValue::Flexible { rows } => {
                    for row in rows {
                        let FlexRow::Gallery { images } = row else {
                            continue;
                        };
                        for image in images {
                            // Placeholder rows carry no image and no date.
                            if image.attachment_id.is_placeholder() {
                                continue;
                            }
                            if store.attachment(image.attachment_id).is_none() {
                                issues.push(format!(
                                    "item {} ('{}') field '{}': attachment {} does not resolve",
                                    item.id, item.title, field_name, image.attachment_id
                                ));
                            }
                            let parseable = image
                                .added_at
                                .as_deref()
                                .and_then(gallery::parse_added_at)
                                .is_some();
                            if !parseable {
                                issues.push(format!(
                                    "item {} ('{}') field '{}': attachment {} has unusable added_at '{}'",
                                    item.id,
                                    item.title,
                                    field_name,
                                    image.attachment_id,
                                    image.added_at.as_deref().unwrap_or("")
                                ));
                            }
                        }
                    }
                }
                FieldValue::Text { .. } => {}
            }
        }
    }
    issues
}

/// Format the check report: snapshot totals, then any issues.
pub fn format_check(store: &MemoryStore) -> Vec<String> {
    let collections = store
        .items
        .iter()
        .filter(|item| item.kind == crate::store::ItemKind::Collection)
        .count();
    let mut lines = vec![format!(
        "Snapshot: {} collections, {} items, {} attachments, {} options",
        collections,
        store.items.len(),
        store.attachments.len(),
        store.options.len()
    )];

    let issues = snapshot_issues(store);
    if issues.is_empty() {
        lines.push("No issues found".to_string());
    } else {
        lines.push(format!("{} issue(s) found:", issues.len()));
        for issue in &issues {
            lines.push(format!("    {}", issue));
        }
    }
    lines
}

pub fn print_check(store: &MemoryStore) {
    for line in format_check(store) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GalleryConfig;
    use crate::present::{ImageAttrs, present};
    use crate::query::{Viewer, collections_for};
    use crate::test_helpers::*;

    // =========================================================================
    // Collections listing
    // =========================================================================

    #[test]
    fn collections_listing_shows_index_title_and_count() {
        let store = portfolio_store();
        let collections = collections_for(&store, Viewer::Anonymous);
        let lines = format_collections(&store, &collections);
        assert_eq!(lines[0], "Collections");
        assert_eq!(lines[1], "001 Dusk (3 images)");
        assert!(lines.contains(&"    Status: published".to_string()));
    }

    #[test]
    fn collections_listing_counts_flexible_galleries() {
        let store = portfolio_store();
        let collections = collections_for(&store, Viewer::Anonymous);
        let lines = format_collections(&store, &collections);
        assert!(lines.contains(&"002 Headlands (3 images)".to_string()));
        assert!(lines.contains(&"003 Tidelines (0 images)".to_string()));
    }

    #[test]
    fn empty_listing_says_none() {
        let store = store_with_option("front_page", "9");
        let lines = format_collections(&store, &[]);
        assert_eq!(lines, vec!["Collections", "    (none)"]);
    }

    // =========================================================================
    // Gallery display
    // =========================================================================

    #[test]
    fn gallery_lines_show_orientation_and_flags() {
        let store = portfolio_store();
        let images = present(
            &store,
            &attachment_ids(&[71, 72, 73]),
            &GalleryConfig::default(),
            &ImageAttrs::default(),
        );
        let lines = format_gallery("Dusk", &images);
        assert_eq!(lines[0], "Gallery: Dusk (3 images)");
        assert_eq!(lines[1], "001 Dawn over the bay (landscape, first)");
        assert!(lines.contains(&"    Prev: square  Next: portrait".to_string()));
        assert!(lines.iter().any(|l| l.ends_with("(square, last)")));
    }

    #[test]
    fn gallery_lines_include_lightbox_urls() {
        let store = portfolio_store();
        let images = present(
            &store,
            &attachment_ids(&[71]),
            &GalleryConfig::default(),
            &ImageAttrs::default(),
        );
        let lines = format_gallery("Dusk", &images);
        assert!(lines.contains(&"    Lightbox: /media/dawn-2048.jpg".to_string()));
    }

    // =========================================================================
    // Email display
    // =========================================================================

    #[test]
    fn empty_email_element_is_explained() {
        let lines = format_email("");
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("no address"));
    }

    // =========================================================================
    // Snapshot check
    // =========================================================================

    #[test]
    fn clean_snapshot_has_no_issues() {
        let store = portfolio_store();
        assert_eq!(snapshot_issues(&store), Vec::<String>::new());
        let lines = format_check(&store);
        assert!(lines[0].starts_with("Snapshot: 4 collections"));
        assert_eq!(lines[1], "No issues found");
    }

    #[test]
    fn unresolvable_relationship_reference_is_reported() {
        let mut store = portfolio_store();
        store.attachments.retain(|att| att.id.0 != 72);
        let issues = snapshot_issues(&store);
        assert!(
            issues
                .iter()
                .any(|i| i.contains("attachment 72 does not resolve")),
            "got: {issues:?}"
        );
    }

    #[test]
    fn bad_added_at_is_reported() {
        let (store, _) = gallery_collection(vec![gallery_row(&[(71, Some("soon"))])]);
        let issues = snapshot_issues(&store);
        assert!(issues.iter().any(|i| i.contains("unusable added_at")));
        // 71 is not in this store, so the dangling reference shows up too.
        assert!(issues.iter().any(|i| i.contains("does not resolve")));
    }

    #[test]
    fn missing_added_at_is_reported() {
        let (store, _) = gallery_collection(vec![gallery_row(&[(71, None)])]);
        let issues = snapshot_issues(&store);
        assert!(issues.iter().any(|i| i.contains("unusable added_at ''")));
    }

    #[test]
    fn placeholder_rows_are_not_issues() {
        let (store, _) = gallery_collection(vec![gallery_row(&[(0, None)])]);
        assert!(snapshot_issues(&store).is_empty());
    }
}
