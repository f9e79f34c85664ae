//! URI authority component.
//!
//! An authority is either server-based (`user:password@host:port`) or
//! registry-based: an opaque name that does not decompose into host and
//! port. Host comparison is case-insensitive; the host is emitted lowercase.

use std::fmt;

use crate::error::UriSyntaxError;
use crate::percent;
use crate::ports;

/// Parsed authority component.
#[derive(Clone, Debug, Eq)]
pub enum Authority {
    /// An authority with no identifiable host, kept verbatim.
    Registry(String),
    /// A server-based authority.
    Server {
        host: String,
        port: Option<u16>,
        user: Option<String>,
        password: Option<String>,
    },
}

impl Authority {
    /// Parses the raw authority text (the span between `//` and the next
    /// `/`, `?` or end of input).
    ///
    /// User-info splits from the host at the first `@` and into
    /// user/password at its first `:`; user-info and host are
    /// percent-decoded, case preserved. An authority whose host/port portion
    /// does not validate as server form falls back to the registry variant
    /// rather than failing.
    ///
    /// # Errors
    ///
    /// Returns [`UriSyntaxError::MalformedEscape`] when user-info carries a
    /// bad percent escape.
    pub fn parse(raw: &str) -> Result<Self, UriSyntaxError> {
        let (user_info, host_port) = match raw.split_once('@') {
            Some((user_info, host_port)) => (Some(user_info), host_port),
            None => (None, raw),
        };

        let Some((host, port)) = split_host_port(host_port) else {
            return Ok(Authority::Registry(raw.to_string()));
        };

        let Ok(host) = percent::decode(host) else {
            return Ok(Authority::Registry(raw.to_string()));
        };

        let (user, password) = match user_info {
            Some(info) => match info.split_once(':') {
                Some((user, password)) => {
                    (Some(percent::decode(user)?), Some(percent::decode(password)?))
                }
                None => (Some(percent::decode(info)?), None),
            },
            None => (None, None),
        };

        Ok(Authority::Server {
            host,
            port,
            user,
            password,
        })
    }

    /// Serializes the authority. For server authorities the host is
    /// lowercased, user-info is omitted when the user is empty, and the port
    /// is omitted when it equals the default for `scheme`.
    #[must_use]
    pub fn encode(&self, scheme: Option<&str>) -> String {
        match self {
            Authority::Registry(name) => name.clone(),
            Authority::Server {
                host,
                port,
                user,
                password,
            } => {
                let mut out = String::new();

                if let Some(user) = user {
                    if !user.is_empty() {
                        out.push_str(&percent::encode_with(user, is_user_info_safe, encoding_rs::UTF_8));
                        if let Some(password) = password {
                            out.push(':');
                            out.push_str(&percent::encode_with(
                                password,
                                is_user_info_safe,
                                encoding_rs::UTF_8,
                            ));
                        }
                        out.push('@');
                    }
                }

                let lowered = host.to_ascii_lowercase();
                if lowered.starts_with('[') {
                    // IPv6 literal, brackets and colons stay verbatim
                    out.push_str(&lowered);
                } else {
                    out.push_str(&percent::encode_with(
                        &lowered,
                        is_host_safe,
                        encoding_rs::UTF_8,
                    ));
                }

                if let Some(port) = port {
                    let is_default = scheme
                        .map(|scheme| ports::is_default_port(scheme, *port))
                        .unwrap_or(false);
                    if !is_default {
                        out.push(':');
                        out.push_str(&port.to_string());
                    }
                }

                out
            }
        }
    }

    /// Returns the host for server authorities.
    #[must_use]
    pub fn host(&self) -> Option<&str> {
        match self {
            Authority::Server { host, .. } => Some(host),
            Authority::Registry(_) => None,
        }
    }

    /// Returns the explicit port for server authorities.
    #[must_use]
    pub fn port(&self) -> Option<u16> {
        match self {
            Authority::Server { port, .. } => *port,
            Authority::Registry(_) => None,
        }
    }

    /// Returns the decoded user for server authorities.
    #[must_use]
    pub fn user(&self) -> Option<&str> {
        match self {
            Authority::Server { user, .. } => user.as_deref(),
            Authority::Registry(_) => None,
        }
    }

    /// Returns the decoded password for server authorities.
    #[must_use]
    pub fn password(&self) -> Option<&str> {
        match self {
            Authority::Server { password, .. } => password.as_deref(),
            Authority::Registry(_) => None,
        }
    }
}

impl PartialEq for Authority {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Authority::Registry(left), Authority::Registry(right)) => left == right,
            (
                Authority::Server {
                    host: left_host,
                    port: left_port,
                    user: left_user,
                    password: left_password,
                },
                Authority::Server {
                    host: right_host,
                    port: right_port,
                    user: right_user,
                    password: right_password,
                },
            ) => {
                left_host.eq_ignore_ascii_case(right_host)
                    && left_port == right_port
                    && left_user == right_user
                    && left_password == right_password
            }
            _ => false,
        }
    }
}

impl fmt::Display for Authority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.encode(None))
    }
}

/// Splits `host[:port]`, honoring IPv6 bracket notation. Returns `None` when
/// the text does not validate as server form.
fn split_host_port(raw: &str) -> Option<(&str, Option<u16>)> {
    if raw.is_empty() {
        return None;
    }

    if raw.starts_with('[') {
        let close = raw.find(']')?;
        let host = &raw[..=close];
        let rest = &raw[close + 1..];
        return match rest.strip_prefix(':') {
            Some(port) => Some((host, Some(port.parse().ok()?))),
            None if rest.is_empty() => Some((host, None)),
            None => None,
        };
    }

    match raw.rsplit_once(':') {
        Some((host, port)) => {
            if host.is_empty() || host.contains(':') || !is_valid_host(host) {
                return None;
            }
            Some((host, Some(port.parse().ok()?)))
        }
        None => is_valid_host(raw).then_some((raw, None)),
    }
}

/// Validates a reg-name host: unreserved, pct-encoded and sub-delims bytes.
fn is_valid_host(host: &str) -> bool {
    host.bytes().all(|byte| {
        percent::is_unreserved(byte)
            || matches!(
                byte,
                b'!' | b'$' | b'&' | b'\'' | b'(' | b')' | b'*' | b'+' | b',' | b';' | b'=' | b'%'
            )
    })
}

/// Reg-name host safe set: unreserved plus sub-delims.
fn is_host_safe(byte: u8) -> bool {
    percent::is_unreserved(byte)
        || matches!(
            byte,
            b'!' | b'$' | b'&' | b'\'' | b'(' | b')' | b'*' | b'+' | b',' | b';' | b'='
        )
}

/// User-info safe set: unreserved plus sub-delims.
fn is_user_info_safe(byte: u8) -> bool {
    percent::is_unreserved(byte)
        || matches!(
            byte,
            b'!' | b'$' | b'&' | b'\'' | b'(' | b')' | b'*' | b'+' | b',' | b';' | b'='
        )
}
