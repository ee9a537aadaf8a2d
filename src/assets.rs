//! Front-end script registration.
//!
//! Four bundles ship with the site: the lightbox library, the glue that
//! wires gallery links into it, the email reveal script, and the lazy image
//! loader. The host serves the files; [`render_script_tags`] emits the
//! `<script>` tags with cache-busting `?ver=` query strings, ordered so a
//! bundle always loads after its dependencies.
//!
//! The three first-party scripts are embedded at compile time so a host (or
//! the CLI `check` command) can write them out next to the site without a
//! separate asset pipeline. The lightbox library itself is third-party and
//! host-provided.

use maud::{Markup, html};

use crate::config::SiteConfig;

/// The embedded email reveal script.
pub const EMAIL_REVEAL_JS: &str = include_str!("../static/email-reveal.js");

/// The embedded lazy image loader.
pub const LAZY_LOAD_JS: &str = include_str!("../static/lazy-load.js");

/// The embedded lightbox wiring script.
pub const LIGHTBOX_INIT_JS: &str = include_str!("../static/lightbox-init.js");

/// One registered front-end script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptBundle {
    /// Registration handle, unique per bundle.
    pub handle: &'static str,
    /// Path under the configured base URL.
    pub src: &'static str,
    /// Handles this bundle must load after.
    pub deps: &'static [&'static str],
    /// Whether the tag belongs at the end of `<body>`.
    pub in_footer: bool,
    /// Embedded source for first-party bundles; `None` for host-provided
    /// libraries.
    pub source: Option<&'static str>,
}

/// Every script bundle the site registers.
pub fn script_bundles() -> &'static [ScriptBundle] {
    &[
        ScriptBundle {
            handle: "lightbox",
            src: "js/fslightbox.js",
            deps: &[],
            in_footer: true,
            source: None,
        },
        ScriptBundle {
            handle: "lightbox-init",
            src: "js/lightbox-init.js",
            deps: &["lightbox"],
            in_footer: true,
            source: Some(LIGHTBOX_INIT_JS),
        },
        ScriptBundle {
            handle: "email-reveal",
            src: "js/email-reveal.js",
            deps: &[],
            in_footer: true,
            source: Some(EMAIL_REVEAL_JS),
        },
        ScriptBundle {
            handle: "lazy-load",
            src: "js/lazy-load.js",
            deps: &[],
            in_footer: true,
            source: Some(LAZY_LOAD_JS),
        },
    ]
}

/// Embedded source of a first-party bundle, by handle.
pub fn bundle_source(handle: &str) -> Option<&'static str> {
    script_bundles()
        .iter()
        .find(|bundle| bundle.handle == handle)
        .and_then(|bundle| bundle.source)
}

/// Versioned URL of one bundle under the configured base.
pub fn bundle_url(config: &SiteConfig, bundle: &ScriptBundle) -> String {
    format!("{}{}?ver={}", config.base_url, bundle.src, config.version)
}

/// `<script>` tags for every bundle, in dependency order.
///
/// The registration list already lists dependencies first, but the order is
/// recomputed here rather than trusted, so reordering [`script_bundles`]
/// can never silently break load order.
pub fn render_script_tags(config: &SiteConfig) -> Markup {
    let bundles = script_bundles();
    let mut emitted: Vec<&str> = Vec::new();
    let mut ordered: Vec<&ScriptBundle> = Vec::new();

    while ordered.len() < bundles.len() {
        let before = ordered.len();
        for bundle in bundles {
            if emitted.contains(&bundle.handle) {
                continue;
            }
            if bundle.deps.iter().all(|dep| emitted.contains(dep)) {
                emitted.push(bundle.handle);
                ordered.push(bundle);
            }
        }
        if ordered.len() == before {
            // A dependency cycle or a dep on an unregistered handle; emit
            // the remainder in registration order rather than loop forever.
            for bundle in bundles {
                if !emitted.contains(&bundle.handle) {
                    emitted.push(bundle.handle);
                    ordered.push(bundle);
                }
            }
        }
    }

    html! {
        @for bundle in ordered {
            script src=(bundle_url(config, bundle)) {}
        }
    }
}
