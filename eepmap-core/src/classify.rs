use url::Url;

/// The namespace a normalized link target belongs to. Exactly one of the
/// three applies to any URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// An I2P eepsite - the only kind that is ever queued for crawling.
    Eepsite,
    /// A Tor hidden service - recorded as a sink, never fetched.
    Onion,
    /// The open web (and anything without a recognized suffix) - recorded
    /// as a sink, never fetched.
    Clearweb,
}

impl LinkKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkKind::Eepsite => "eepsite",
            LinkKind::Onion => "onion",
            LinkKind::Clearweb => "clearweb",
        }
    }
}

/// Partitions a normalized URL by host suffix, case-insensitively.
/// URLs without a parseable host fall through to `Clearweb`.
pub fn classify(url: &str) -> LinkKind {
    let host = match Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(|host| host.to_ascii_lowercase()))
    {
        Some(host) => host,
        None => return LinkKind::Clearweb,
    };

    if host.ends_with(".i2p") {
        LinkKind::Eepsite
    } else if host.ends_with(".onion") {
        LinkKind::Onion
    } else {
        LinkKind::Clearweb
    }
}
