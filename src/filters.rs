//! Host filter hooks, expressed as pure value-in/value-out functions.
//!
//! The host CMS owns the hook machinery; it calls these at the matching
//! extension points. Keeping them pure (no clock reads except through the
//! `_as_of` variants, no store writes) makes every rule testable without a
//! host.

use chrono::{Local, NaiveDate};

use crate::fields::ADDED_AT_FIELD;
use crate::query::Viewer;
use crate::store::{Attachment, ItemKind, SIZE_MEDIUM, SIZE_THUMBNAIL};

/// Date format stamped into `added_at` defaults: compact `YYYYMMDD`.
pub const ADDED_AT_FORMAT: &str = "%Y%m%d";

/// Admin field definition passing through the field-default filter.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSettings {
    pub name: String,
    pub default_value: Option<String>,
}

/// Stamps today's date as the default value of the `added_at` field.
///
/// Editors add gallery images in batches and rarely touch the date, so the
/// field pre-fills with the day the row was created. Every other field
/// passes through untouched.
pub fn apply_field_default(field: FieldSettings) -> FieldSettings {
    apply_field_default_as_of(field, Local::now().date_naive())
}

/// [`apply_field_default`] with an explicit "today".
pub fn apply_field_default_as_of(mut field: FieldSettings, today: NaiveDate) -> FieldSettings {
    if field.name == ADDED_AT_FIELD {
        field.default_value = Some(today.format(ADDED_AT_FORMAT).to_string());
    }
    field
}

/// Rewrites relationship-field preview markup for collection editing.
///
/// The stock preview shows a thumbnail rendition and the bare title. On
/// collection edit screens the preview list is the primary curation surface,
/// so the thumbnail URL is swapped for the medium rendition and the trailing
/// title (after the closing image `</div>`) is wrapped in a `<span>` for
/// styling. Previews on every other item kind pass through untouched, as do
/// previews of attachments lacking the needed renditions.
pub fn relationship_preview(markup: &str, attachment: &Attachment, edited: ItemKind) -> String {
    if edited != ItemKind::Collection {
        return markup.to_string();
    }

    let mut rewritten = markup.to_string();
    if let (Some(thumb), Some(medium)) = (
        attachment.url_for(SIZE_THUMBNAIL),
        attachment.url_for(SIZE_MEDIUM),
    ) && thumb != medium
    {
        rewritten = rewritten.replace(thumb, medium);
    }
    let plain_title = format!("</div>{}", attachment.title);
    let wrapped_title = format!("</div><span>{}</span>", attachment.title);
    rewritten.replace(&plain_title, &wrapped_title)
}

/// Whether the admin toolbar should show on the current page.
///
/// Anonymous viewers keep whatever the host decided (they have no toolbar
/// anyway). Authenticated viewers lose it exactly on the front page, where
/// it would sit on top of the full-bleed background image.
pub fn show_admin_bar(host_default: bool, viewer: Viewer, front_page: bool) -> bool {
    if !viewer.is_authenticated() {
        return host_default;
    }
    !front_page
}

/// Admin stylesheet enlarging the collection-images relationship list.
///
/// The stock list is too short and its thumbnails too small to curate a
/// gallery from; this trades vertical space for 75px previews laid out as
/// flex rows.
pub fn admin_relationship_css() -> String {
    let css = "\
#collection-images .relationship .list { height: 850px; }
#collection-images .relationship .list .rel-item { display: flex; }
#collection-images .relationship .list .rel-item .thumbnail { width: 75px; height: 75px; background: white; }
#collection-images .relationship .list .rel-item .thumbnail img { max-width: 75px; max-height: 75px; }
";
    css.to_string()
}
