use axum::{
    extract::{ConnectInfo, Request},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use std::net::{IpAddr, SocketAddr};

/// Client IP address, stored in request extensions
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClientIp(pub IpAddr);

/// Resolve the client address for a request
///
/// Priority:
/// 1. X-Forwarded-For header (first entry, for requests through proxies)
/// 2. X-Real-IP header (for Nginx)
/// 3. Socket address (direct connection)
///
/// A present but malformed header does not fall through.
pub fn client_ip(headers: &HeaderMap, peer: SocketAddr) -> Option<IpAddr> {
    if let Some(forwarded) = headers.get("x-forwarded-for") {
        forwarded
            .to_str()
            .ok()
            .and_then(|s| s.split(',').next())
            .and_then(|s| s.trim().parse::<IpAddr>().ok())
    } else if let Some(real_ip) = headers.get("x-real-ip") {
        real_ip.to_str().ok().and_then(|s| s.trim().parse::<IpAddr>().ok())
    } else {
        Some(peer.ip())
    }
}

/// Middleware storing the resolved ClientIp for handlers and logs
pub async fn extract_client_ip(
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(ip) = client_ip(request.headers(), addr) {
        request.extensions_mut().insert(ClientIp(ip));
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn peer() -> SocketAddr {
        "10.0.0.9:51000".parse().unwrap()
    }

    #[test]
    fn forwarded_for_takes_first_entry() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.7, 10.0.0.1"),
        );
        headers.insert("x-real-ip", HeaderValue::from_static("198.51.100.2"));

        assert_eq!(
            client_ip(&headers, peer()),
            Some("203.0.113.7".parse().unwrap())
        );
    }

    #[test]
    fn real_ip_used_without_forwarded_for() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", HeaderValue::from_static("198.51.100.2"));

        assert_eq!(
            client_ip(&headers, peer()),
            Some("198.51.100.2".parse().unwrap())
        );
    }

    #[test]
    fn falls_back_to_socket_address() {
        assert_eq!(
            client_ip(&HeaderMap::new(), peer()),
            Some("10.0.0.9".parse().unwrap())
        );
    }

    #[test]
    fn malformed_forwarded_for_yields_none() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("not-an-ip"));

        assert_eq!(client_ip(&headers, peer()), None);
    }
}
