use std::convert::Infallible;
use std::net::{IpAddr, SocketAddr};

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::request::Parts;
use axum::http::HeaderMap;

const FORWARDED_FOR: &str = "x-forwarded-for";
const UNKNOWN_ADDRESS: &str = "unknown";

/// Network address of the client that sent the request.
///
/// A loopback peer is taken to be the local reverse proxy. `X-Forwarded-For`
/// is then read from the right, skipping loopback hops, and the first other
/// address is used. Entries left of it are client-supplied and ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientAddress(pub String);

impl<S: Send + Sync> FromRequestParts<S> for ClientAddress {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip());
        Ok(ClientAddress(client_address(peer, &parts.headers)))
    }
}

fn client_address(peer: Option<IpAddr>, headers: &HeaderMap) -> String {
    match peer {
        Some(ip) if ip.is_loopback() => forwarded_client(headers).unwrap_or(ip).to_string(),
        Some(ip) => ip.to_string(),
        None => UNKNOWN_ADDRESS.to_string(),
    }
}

/// The nearest non-loopback hop recorded by the proxy chain.
///
/// Stops at the first entry that is not an IP address.
fn forwarded_client(headers: &HeaderMap) -> Option<IpAddr> {
    let entries = headers
        .get_all(FORWARDED_FOR)
        .iter()
        .rev()
        .map_while(|value| value.to_str().ok())
        .flat_map(|value| value.rsplit(','));

    for entry in entries {
        match entry.trim().parse::<IpAddr>() {
            Ok(ip) if ip.is_loopback() => continue,
            Ok(ip) => return Some(ip),
            Err(_) => return None,
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(forwarded: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(FORWARDED_FOR, HeaderValue::from_str(forwarded).unwrap());
        headers
    }

    fn ip(s: &str) -> Option<IpAddr> {
        s.parse().ok()
    }

    #[test]
    fn remote_peer_is_used_as_is() {
        assert_eq!(
            client_address(ip("203.0.113.7"), &headers("198.51.100.1")),
            "203.0.113.7"
        );
    }

    #[test]
    fn loopback_peer_uses_nearest_forwarded_hop() {
        assert_eq!(
            client_address(ip("127.0.0.1"), &headers("198.51.100.1")),
            "198.51.100.1"
        );
    }

    #[test]
    fn client_supplied_entries_are_ignored() {
        assert_eq!(
            client_address(ip("127.0.0.1"), &headers("6.6.6.6, 203.0.113.9")),
            "203.0.113.9"
        );
    }

    #[test]
    fn loopback_hops_are_skipped() {
        assert_eq!(
            client_address(
                ip("127.0.0.1"),
                &headers("6.6.6.6, 203.0.113.9, 127.0.0.1, ::1")
            ),
            "203.0.113.9"
        );
    }

    #[test]
    fn later_header_lines_are_nearer() {
        let mut headers = HeaderMap::new();
        headers.append(FORWARDED_FOR, HeaderValue::from_static("6.6.6.6"));
        headers.append(FORWARDED_FOR, HeaderValue::from_static("203.0.113.9"));
        assert_eq!(client_address(ip("127.0.0.1"), &headers), "203.0.113.9");
    }

    #[test]
    fn unparseable_entry_falls_back_to_peer() {
        let oversized = "x".repeat(100);
        assert_eq!(
            client_address(ip("127.0.0.1"), &headers(&format!("6.6.6.6, {oversized}"))),
            "127.0.0.1"
        );
        assert_eq!(
            client_address(ip("127.0.0.1"), &headers("unknown")),
            "127.0.0.1"
        );
    }

    #[test]
    fn loopback_peer_without_header_is_loopback() {
        assert_eq!(client_address(ip("::1"), &HeaderMap::new()), "::1");
    }

    #[test]
    fn missing_peer_is_unknown() {
        assert_eq!(client_address(None, &headers("198.51.100.1")), "unknown");
    }
}
