//! Email obfuscation for the `[email]` shortcode.
//!
//! Harvesters scrape pages for things that look like email addresses;
//! browsers decode HTML character references before rendering. So the
//! address is emitted as a mix of literal characters and numeric character
//! references, freshly randomized per render, and the `@` that every scraper
//! keys on is never emitted literally.
//!
//! [`obfuscate_email`] is non-deterministic on purpose. Tests assert
//! structure (token count, decodability, the `@` rule), never exact output.

use rand::Rng;

/// Obfuscates an address into per-character tokens for concatenation.
///
/// Each character independently becomes, with even odds, either itself or
/// its `&#<code>;` reference. `@` is always `&#64;` regardless of the draw.
pub fn obfuscate_email(address: &str) -> Vec<String> {
    let mut rng = rand::rng();
    address
        .chars()
        .map(|ch| {
            if ch == '@' || rng.random_bool(0.5) {
                format!("&#{};", ch as u32)
            } else {
                ch.to_string()
            }
        })
        .collect()
}

/// Obfuscated address as a single markup fragment.
pub fn obfuscate_email_markup(address: &str) -> String {
    obfuscate_email(address).concat()
}

/// Encodes `user@domain` as `https://domain/user`.
///
/// This is the `data-eml` wire form the client-side reveal script decodes
/// back into a `mailto:` link; the page itself never carries the address in
/// plain text. An address without `@` has no domain to encode and yields
/// `None`.
pub fn email_to_url(address: &str) -> Option<String> {
    let (user, domain) = address.split_once('@')?;
    Some(format!("https://{domain}/{user}"))
}
