//! The `[email]` shortcode: an obfuscated contact link or text element.
//!
//! Hosts parse the shortcode tag themselves and hand the attributes over as
//! an [`EmailAttrs`]; rendering produces a single `<a>` or `<span>` element
//! string. The visible address goes through the obfuscator, and the element
//! carries the marker class plus a `data-eml` URL so the client-side reveal
//! script can rewrite it into a real `mailto:` link once a browser is
//! involved.
//!
//! Enclosed shortcode content is passed through verbatim, unescaped. That is
//! the one place this crate emits caller markup untouched: the shortcode
//! author is trusted to supply well-formed HTML (an icon, a styled label),
//! and escaping it would break exactly those uses.

use maud::{Markup, PreEscaped, html};

use crate::config::ShortcodeConfig;
use crate::fields::{self, CONTACT_EMAIL_OPTION};
use crate::obfuscate::{email_to_url, obfuscate_email_markup};
use crate::store::ContentStore;

/// Attributes of one `[email]` shortcode invocation.
///
/// Defaults mirror an attribute-less `[email]`: a link to the site's
/// `contact_email` option, showing the obfuscated address itself.
#[derive(Debug, Clone, PartialEq)]
pub struct EmailAttrs {
    /// Address to render; the `contact_email` site option when absent.
    pub address: Option<String>,
    /// Render `<a>` (true) or `<span>` (false).
    pub link: bool,
    /// Custom display text, escaped. The obfuscated address when empty.
    pub text: String,
    /// Extra CSS classes, appended after the marker class.
    pub class: String,
    /// `title` attribute; the configured default when absent, omitted when
    /// explicitly empty.
    pub title: Option<String>,
    /// `target` attribute, omitted when empty.
    pub target: String,
    /// `rel` attribute, omitted when empty.
    pub rel: String,
    /// Enclosed shortcode content, emitted verbatim as the anchor body.
    pub content: Option<String>,
}

impl Default for EmailAttrs {
    fn default() -> Self {
        EmailAttrs {
            address: None,
            link: true,
            text: String::new(),
            class: String::new(),
            title: None,
            target: String::new(),
            rel: "nofollow noindex".to_string(),
            content: None,
        }
    }
}

/// Renders the `[email]` shortcode to an element string.
///
/// An invocation without a usable address (no `address` attribute and no
/// `contact_email` option) renders to the empty string: a missing contact
/// address is a site-setup gap, not something to surface to visitors.
pub fn email_shortcode(
    store: &dyn ContentStore,
    config: &ShortcodeConfig,
    attrs: &EmailAttrs,
) -> String {
    let address = match &attrs.address {
        Some(address) => address.trim().to_string(),
        None => fields::option_text(store, CONTACT_EMAIL_OPTION),
    };
    if address.is_empty() {
        tracing::debug!("email shortcode without an address, rendering nothing");
        return String::new();
    }

    let obfuscated = PreEscaped(obfuscate_email_markup(&address));
    let anchor: Markup = if attrs.link {
        match (&attrs.content, attrs.text.trim()) {
            (Some(content), _) => PreEscaped(content.clone()),
            (None, text) if !text.is_empty() => html! { (text) },
            _ => obfuscated,
        }
    } else {
        obfuscated
    };

    let class = match attrs.class.trim() {
        "" => config.email_marker_class.clone(),
        extra => format!("{} {}", config.email_marker_class, extra),
    };
    let title = attrs
        .title
        .clone()
        .unwrap_or_else(|| config.default_email_title.clone());
    let title = (!title.trim().is_empty()).then_some(title);
    let target = (!attrs.target.trim().is_empty()).then(|| attrs.target.trim());
    let rel = (!attrs.rel.trim().is_empty()).then(|| attrs.rel.trim());
    let data_eml = email_to_url(&address);

    let markup = if attrs.link {
        html! {
            a class=(class) title=[title] target=[target] rel=[rel] data-eml=[data_eml] {
                (anchor)
            }
        }
    } else {
        html! {
            span class=(class) title=[title] target=[target] rel=[rel] data-eml=[data_eml] {
                (anchor)
            }
        }
    };
    markup.into_string()
}
