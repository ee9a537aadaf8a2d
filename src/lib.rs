//! # Vernissage
//!
//! Template-data assembly for fine art photography portfolio sites built
//! around a "Collection" content type. The content itself lives in an
//! external store; this crate reads it per request and turns it into the
//! records and HTML fragments a template renders — ordered collection lists,
//! decorated gallery images, circular prev/next navigation, and an
//! obfuscated contact element.
//!
//! # Architecture: Read, Assemble, Decorate
//!
//! Every request flows through three small layers, each a pure function of
//! what the store returns:
//!
//! ```text
//! 1. Query      store        →  Vec<Collection>      (filtered, ordered, capped)
//! 2. Aggregate  collection   →  Vec<AttachmentId>    (both field shapes, deduped)
//! 3. Present    id list      →  Vec<PresentedImage>  (markup, orientation, neighbors)
//! ```
//!
//! Nothing is cached and nothing is written back (the one exception: the
//! host asks [`filters::apply_field_default`] for a date default when an
//! editor adds a gallery row). A failed lookup degrades to an empty result
//! rather than an error — a half-filled site renders as empty sections,
//! never as a crash.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`store`] | The [`store::ContentStore`] trait and the JSON-snapshot [`store::MemoryStore`] |
//! | [`fields`] | Tolerant typed field accessors (relationship, repeater, flexible content, text) |
//! | [`query`] | Collection queries: ordering, limit, viewer-gated status defaults |
//! | [`gallery`] | Image aggregation: direct and flexible-content shapes, newest filter, backgrounds |
//! | [`present`] | Gallery decoration: `<img>` markup, orientation, first/last, circular neighbors |
//! | [`navigate`] | Circular previous/next over any identified sequence |
//! | [`shortcodes`] | The `[email]` shortcode renderer |
//! | [`obfuscate`] | Randomized HTML-entity encoding of addresses |
//! | [`filters`] | Host filter hooks as pure functions (previews, admin bar, field defaults) |
//! | [`assets`] | Script-bundle registration and versioned tag rendering |
//! | [`config`] | `config.toml` loading, validation, stock-config generation |
//! | [`output`] | CLI output formatting — information-first display of assembly results |
//!
//! # Design Decisions
//!
//! ## Two Image Shapes, Two Code Paths
//!
//! Collections store their images either as a flat relationship field or as
//! flexible-content gallery rows, depending on which site version persisted
//! them. The two shapes stay separate entry points
//! ([`gallery::collection_image_ids`] vs [`gallery::all_attachment_ids`])
//! because which one is authoritative depends on content already in the
//! store — unifying them behind a guess would silently pick wrong for one
//! version or the other.
//!
//! ## Fail-Closed Newest Filter
//!
//! The "newest images" traversal stops at the first unparseable `added_at`
//! date and returns what it has. A bad date entered in the admin therefore
//! hides images instead of promoting stale ones as new. The truncation is
//! logged at warn level; see [`gallery::newest_attachment_ids_as_of`].
//!
//! ## Maud Over Template Engines
//!
//! HTML fragments (image tags, the email element, script tags) are built
//! with [Maud](https://maud.lambda.xyz/): malformed markup is a compile
//! error, interpolation is escaped by default, and the one deliberate
//! unescaped pass-through (enclosed shortcode content) is explicit
//! `PreEscaped` at a single call site.
//!
//! ## The Store Is a Trait
//!
//! All assembly code takes `&dyn` [`store::ContentStore`]. Hosts bridge it
//! to their CMS; tests and the CLI run against [`store::MemoryStore`], a
//! serde-loaded site snapshot. The contract is total: missing data is
//! `None`/empty, never an error, which keeps every layer above free of
//! failure plumbing.
//!
//! ## Derived, Never Mutated
//!
//! Presentation ([`present::present`]) and navigation ([`navigate`]) are
//! pure functions of fresh query results. Calling them twice on the same
//! input yields identical output, and no call leaves state behind — the
//! request-scoped model of the hosting environment, kept on purpose.

pub mod assets;
pub mod config;
pub mod fields;
pub mod filters;
pub mod gallery;
pub mod navigate;
pub mod obfuscate;
pub mod output;
pub mod present;
pub mod query;
pub mod shortcodes;
pub mod store;

#[cfg(test)]
pub(crate) mod test_helpers;
