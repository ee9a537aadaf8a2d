//! Image presentation: turning resolved attachment ids into records a
//! template can render without further lookups.
//!
//! [`present`] resolves each id, renders an `<img>` tag with a srcset built
//! from the attachment's renditions, classifies orientation from pixel
//! dimensions, flags the first and last element, and links every element to
//! the orientation of its circular neighbors (templates alternate layout
//! based on what comes before and after, wrapping at the ends).
//!
//! All fields are derived from the input set; presenting the same ids twice
//! yields identical output.

use maud::{Markup, html};
use std::fmt;

use crate::config::GalleryConfig;
use crate::navigate::Identified;
use crate::store::{Attachment, AttachmentId, ContentStore, ItemId};

/// Marker class on lazily loaded images; the client-side loader selects
/// on it.
pub const LAZY_CLASS: &str = "lazy";

/// Orientation of an image, derived from its pixel dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Landscape,
    Portrait,
    Square,
}

impl Orientation {
    /// Landscape when wider than tall, portrait when taller than wide,
    /// square otherwise.
    pub fn classify(width: u32, height: u32) -> Self {
        if width > height {
            Orientation::Landscape
        } else if height > width {
            Orientation::Portrait
        } else {
            Orientation::Square
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Landscape => "landscape",
            Orientation::Portrait => "portrait",
            Orientation::Square => "square",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pass-through attributes for the rendered `<img>` tag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageAttrs {
    /// Extra CSS classes, space separated.
    pub class: Option<String>,
    /// Alt text; the attachment title is used when absent.
    pub alt: Option<String>,
    /// `sizes` attribute; a width-based default is used when absent.
    pub sizes: Option<String>,
    /// Render for lazy loading: the URL attributes move to `data-src` /
    /// `data-srcset` and the marker class is added, matching what the
    /// client-side loader expects.
    pub lazy: bool,
}

/// An attachment decorated with everything a gallery template needs.
#[derive(Debug, Clone, PartialEq)]
pub struct PresentedImage {
    pub attachment: Attachment,
    /// Rendered `<img>` markup.
    pub markup: String,
    pub orientation: Orientation,
    /// True on the element at index 0; for a single image, `first` and
    /// `last` are both true.
    pub first: bool,
    pub last: bool,
    /// URL at the configured lightbox size, when the attachment has any
    /// rendition at all.
    pub lightbox_url: Option<String>,
    /// Orientation of the previous element, wrapping to the last.
    pub prev_orientation: Orientation,
    /// Orientation of the next element, wrapping to the first.
    pub next_orientation: Orientation,
}

impl Identified for PresentedImage {
    type Id = AttachmentId;

    fn id(&self) -> AttachmentId {
        self.attachment.id
    }
}

/// Resolves `ids` in order and decorates each for template use.
///
/// Ids that no longer resolve to an attachment are skipped; position flags
/// and neighbor orientations are computed over the resolved set.
pub fn present(
    store: &dyn ContentStore,
    ids: &[AttachmentId],
    gallery: &GalleryConfig,
    attrs: &ImageAttrs,
) -> Vec<PresentedImage> {
    let attachments: Vec<Attachment> = ids.iter().filter_map(|id| store.attachment(*id)).collect();
    let total = attachments.len();
    let orientations: Vec<Orientation> = attachments
        .iter()
        .map(|att| Orientation::classify(att.width, att.height))
        .collect();

    attachments
        .into_iter()
        .enumerate()
        .map(|(idx, attachment)| {
            let prev = if idx == 0 { total - 1 } else { idx - 1 };
            let next = if idx + 1 < total { idx + 1 } else { 0 };
            PresentedImage {
                markup: render_image(&attachment, &gallery.display_size, attrs).into_string(),
                orientation: orientations[idx],
                first: idx == 0,
                last: idx + 1 == total,
                lightbox_url: attachment
                    .url_for(&gallery.lightbox_size)
                    .map(str::to_string),
                prev_orientation: orientations[prev],
                next_orientation: orientations[next],
                attachment,
            }
        })
        .collect()
}

/// Direct-mode convenience: present a collection's relationship-field
/// images.
pub fn present_collection_images(
    store: &dyn ContentStore,
    collection: ItemId,
    gallery: &GalleryConfig,
    attrs: &ImageAttrs,
) -> Vec<PresentedImage> {
    let ids = crate::gallery::collection_image_ids(store, collection);
    present(store, &ids, gallery, attrs)
}

/// Renders the `<img>` tag for one attachment at the requested size.
///
/// The srcset lists every rendition the attachment has; `src`, `width`,
/// and `height` come from the requested rendition (falling back to the
/// original upload). In lazy mode the URLs move to `data-*` attributes so
/// the browser defers fetching until the loader swaps them in.
pub fn render_image(attachment: &Attachment, size: &str, attrs: &ImageAttrs) -> Markup {
    let variant = attachment.variant(size);
    let src = variant.map(|v| v.url.as_str()).unwrap_or_default();
    let (width, height) = variant
        .map(|v| (v.width, v.height))
        .unwrap_or((attachment.width, attachment.height));

    let srcset: Option<String> = (!attachment.variants.is_empty()).then(|| {
        attachment
            .variants
            .values()
            .map(|v| format!("{} {}w", v.url, v.width))
            .collect::<Vec<_>>()
            .join(", ")
    });

    let sizes = attrs
        .sizes
        .clone()
        .unwrap_or_else(|| format!("(max-width: {width}px) 100vw, {width}px"));
    let alt = attrs.alt.as_deref().unwrap_or(&attachment.title);

    let mut classes: Vec<&str> = Vec::new();
    if let Some(class) = attrs.class.as_deref()
        && !class.is_empty()
    {
        classes.push(class);
    }
    if attrs.lazy {
        classes.push(LAZY_CLASS);
    }
    let class = (!classes.is_empty()).then(|| classes.join(" "));

    if attrs.lazy {
        html! {
            img class=[class] data-src=(src) data-srcset=[srcset] sizes=(sizes)
                width=(width) height=(height) alt=(alt);
        }
    } else {
        html! {
            img class=[class] src=(src) srcset=[srcset] sizes=(sizes)
                width=(width) height=(height) alt=(alt);
        }
    }
}
