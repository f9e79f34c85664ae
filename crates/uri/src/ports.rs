//! Default port registry for well-known URI schemes.
//!
//! Built once into the binary and read-only thereafter; used by the
//! document codec to elide an explicit port that merely restates the
//! scheme default.

/// Scheme to well-known-port pairs, seeded from IANA registrations.
/// Kept sorted by scheme so the table doubles as documentation.
static DEFAULT_PORTS: &[(&str, u16)] = &[
    ("acap", 674),
    ("dict", 2628),
    ("dns", 53),
    ("ftp", 21),
    ("git", 9418),
    ("gopher", 70),
    ("http", 80),
    ("https", 443),
    ("imap", 143),
    ("ipp", 631),
    ("ldap", 389),
    ("ldaps", 636),
    ("mqtt", 1883),
    ("nfs", 2049),
    ("nntp", 119),
    ("pop", 110),
    ("redis", 6379),
    ("rsync", 873),
    ("rtsp", 554),
    ("sftp", 22),
    ("smtp", 25),
    ("snmp", 161),
    ("ssh", 22),
    ("telnet", 23),
    ("tftp", 69),
    ("ws", 80),
    ("wss", 443),
];

/// Returns the well-known port for `scheme`, if one is registered.
/// Lookup is case-insensitive.
#[must_use]
pub fn default_port(scheme: &str) -> Option<u16> {
    let lower = scheme.to_ascii_lowercase();
    DEFAULT_PORTS
        .binary_search_by(|(candidate, _)| candidate.cmp(&lower.as_str()))
        .ok()
        .map(|idx| DEFAULT_PORTS[idx].1)
}

/// Returns true iff `port` is the registered default for `scheme`.
#[must_use]
pub fn is_default_port(scheme: &str, port: u16) -> bool {
    default_port(scheme) == Some(port)
}
