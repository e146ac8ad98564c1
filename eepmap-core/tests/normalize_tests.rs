// Tests for URL normalization and address-helper derivation

use eepmap_core::normalize::{normalize_url, resolve_and_normalize};
use url::Url;

// base64("example destination key material for tests 0123456789")
const HELPER: &str = "ZXhhbXBsZSBkZXN0aW5hdGlvbiBrZXkgbWF0ZXJpYWwgZm9yIHRlc3RzIDAxMjM0NTY3ODk=";
// base32(sha256(decoded blob)), lowercase, unpadded
const DERIVED_HOST: &str = "q7hrpx3a7pijmcikq6z74tqmu6rr2wvgw3htrn5kz3zld3smnn7q.b32.i2p";

fn base(url: &str) -> Url {
    Url::parse(url).unwrap()
}

// ============================================================================
// Relative resolution and fragment stripping
// ============================================================================

#[test]
fn test_resolves_relative_href_against_base() {
    let page = base("http://sitea.i2p/dir/page.html");
    assert_eq!(
        resolve_and_normalize(&page, "../other.html").unwrap(),
        "http://sitea.i2p/other.html"
    );
    assert_eq!(
        resolve_and_normalize(&page, "sub/page2.html").unwrap(),
        "http://sitea.i2p/dir/sub/page2.html"
    );
}

#[test]
fn test_strips_fragment() {
    let page = base("http://sitea.i2p/");
    assert_eq!(
        resolve_and_normalize(&page, "page.html#section").unwrap(),
        "http://sitea.i2p/page.html"
    );
    assert_eq!(
        resolve_and_normalize(&page, "http://example.com/doc#top").unwrap(),
        "http://example.com/doc"
    );
}

#[test]
fn test_skips_non_navigable_hrefs() {
    let page = base("http://sitea.i2p/");
    assert!(resolve_and_normalize(&page, "").is_none());
    assert!(resolve_and_normalize(&page, "#top").is_none());
    assert!(resolve_and_normalize(&page, "javascript:void(0)").is_none());
    assert!(resolve_and_normalize(&page, "mailto:op@sitea.i2p").is_none());
    assert!(resolve_and_normalize(&page, "tel:+15551234").is_none());
}

#[test]
fn test_clearweb_query_is_preserved() {
    let page = base("http://example.com/");
    assert_eq!(
        resolve_and_normalize(&page, "https://example.org/search?q=i2p#results").unwrap(),
        "https://example.org/search?q=i2p"
    );
}

#[test]
fn test_eepsite_query_without_helper_is_preserved() {
    let url = base("http://forum.i2p/thread?id=42");
    assert_eq!(normalize_url(url), "http://forum.i2p/thread?id=42");
}

// ============================================================================
// Address-helper derivation
// ============================================================================

#[test]
fn test_address_helper_derives_b32_host_and_drops_query() {
    let url = base(&format!("http://xyz.i2p/?i2paddresshelper={}", HELPER));
    assert_eq!(normalize_url(url), format!("http://{}/", DERIVED_HOST));
}

#[test]
fn test_same_destination_normalizes_to_identical_host() {
    // two ephemeral hostnames bootstrapping the same destination blob
    let first = base(&format!("http://xyz.i2p/?i2paddresshelper={}", HELPER));
    let second = base(&format!("http://abc.i2p/?i2paddresshelper={}", HELPER));
    assert_eq!(normalize_url(first), normalize_url(second));
}

#[test]
fn test_helper_derivation_keeps_path() {
    let url = base(&format!("http://xyz.i2p/some/page?i2paddresshelper={}", HELPER));
    assert_eq!(
        normalize_url(url),
        format!("http://{}/some/page", DERIVED_HOST)
    );
}

#[test]
fn test_helper_on_clearweb_host_is_ignored() {
    let url = base(&format!("http://example.com/?i2paddresshelper={}", HELPER));
    assert_eq!(
        normalize_url(url),
        format!("http://example.com/?i2paddresshelper={}", HELPER)
    );
}

#[test]
fn test_malformed_helper_degrades_to_fragment_stripped_form() {
    let url = base("http://xyz.i2p/?i2paddresshelper=!!!#frag");
    assert_eq!(normalize_url(url), "http://xyz.i2p/?i2paddresshelper=!!!");
}

// ============================================================================
// Idempotence
// ============================================================================

#[test]
fn test_normalization_is_idempotent() {
    let inputs = [
        format!("http://xyz.i2p/?i2paddresshelper={}", HELPER),
        "http://sitea.i2p/page.html#frag".to_string(),
        "http://example.com/search?q=1".to_string(),
    ];
    for input in inputs {
        let once = normalize_url(Url::parse(&input).unwrap());
        let twice = normalize_url(Url::parse(&once).unwrap());
        assert_eq!(once, twice, "normalize({}) is not a fixed point", input);
    }
}
