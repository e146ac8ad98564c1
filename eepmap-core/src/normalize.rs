use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use sha2::{Digest, Sha256};
use tracing::{debug, warn};
use url::Url;

/// Query parameter carrying a base64 destination blob used to bootstrap
/// a human-readable eepsite name to its cryptographic address.
pub const ADDRESS_HELPER_PARAM: &str = "i2paddresshelper";

const I2P_SUFFIX: &str = ".i2p";
const B32_SUFFIX: &str = ".b32.i2p";

/// Resolves an href against the page it was found on and normalizes the
/// result. Returns `None` for non-navigable hrefs (javascript:, mailto:,
/// bare fragments) and for hrefs that do not resolve to a valid URL.
pub fn resolve_and_normalize(base: &Url, href: &str) -> Option<String> {
    if href.is_empty()
        || href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with('#')
    {
        return None;
    }

    let resolved = base.join(href).ok()?;
    Some(normalize_url(resolved))
}

/// Normalizes an absolute URL into its stable comparable form: the
/// fragment is stripped, and an eepsite URL carrying an address-helper
/// parameter has its host replaced by the b32 address derived from the
/// destination blob (with the query dropped entirely).
///
/// Two URLs referencing the same destination through different ephemeral
/// helper tokens compare equal after this. I2P hosts are content-addressed
/// by their destination key, not by a stable human name, so this is what
/// makes the visited set and the frontier dedup mean anything.
pub fn normalize_url(mut url: Url) -> String {
    url.set_fragment(None);

    let is_eepsite = url
        .host_str()
        .map(|host| host.to_ascii_lowercase().ends_with(I2P_SUFFIX))
        .unwrap_or(false);
    if !is_eepsite {
        return url.to_string();
    }

    let helper = url
        .query_pairs()
        .find(|(key, _)| key == ADDRESS_HELPER_PARAM)
        .map(|(_, value)| value.into_owned());

    if let Some(helper) = helper {
        match derive_b32_host(&helper) {
            Some(host) => {
                let original = url.to_string();
                // http(s) URLs always have a host, so set_host cannot fail here
                if url.set_host(Some(&host)).is_ok() {
                    url.set_query(None);
                    debug!("normalized address-helper URL {} -> {}", original, url);
                } else {
                    warn!("could not rewrite host for {}, keeping original", original);
                }
            }
            // Non-fatal degradation: fall back to the fragment-stripped form
            None => warn!("malformed address helper on {}, keeping original host", url),
        }
    }

    url.to_string()
}

/// Derives the canonical `<b32>.b32.i2p` hostname from an address-helper
/// destination blob: base64-decode, sha256, base32-encode the digest.
fn derive_b32_host(helper: &str) -> Option<String> {
    let dest = BASE64.decode(helper.as_bytes()).ok()?;
    let digest = Sha256::digest(&dest);
    let mut host = base32_encode(&digest);
    host.push_str(B32_SUFFIX);
    Some(host)
}

/// RFC 4648 base32, lowercase, unpadded - the alphabet I2P uses for b32
/// addresses.
fn base32_encode(bytes: &[u8]) -> String {
    const ALPHABET: &[u8; 32] = b"abcdefghijklmnopqrstuvwxyz234567";

    let mut out = String::with_capacity(bytes.len().div_ceil(5) * 8);
    for chunk in bytes.chunks(5) {
        let mut quantum = [0u8; 5];
        quantum[..chunk.len()].copy_from_slice(chunk);

        let bits = u64::from(quantum[0]) << 32
            | u64::from(quantum[1]) << 24
            | u64::from(quantum[2]) << 16
            | u64::from(quantum[3]) << 8
            | u64::from(quantum[4]);

        let emitted = match chunk.len() {
            1 => 2,
            2 => 4,
            3 => 5,
            4 => 7,
            _ => 8,
        };
        for i in 0..emitted {
            let index = ((bits >> (35 - 5 * i)) & 0x1f) as usize;
            out.push(ALPHABET[index] as char);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base32_rfc4648_vectors() {
        assert_eq!(base32_encode(b""), "");
        assert_eq!(base32_encode(b"f"), "my");
        assert_eq!(base32_encode(b"fo"), "mzxq");
        assert_eq!(base32_encode(b"foo"), "mzxw6");
        assert_eq!(base32_encode(b"foob"), "mzxw6yq");
        assert_eq!(base32_encode(b"fooba"), "mzxw6ytb");
        assert_eq!(base32_encode(b"foobar"), "mzxw6ytboi");
    }

    #[test]
    fn test_derive_b32_host_rejects_invalid_base64() {
        assert!(derive_b32_host("not-valid-base64!!!").is_none());
    }
}
