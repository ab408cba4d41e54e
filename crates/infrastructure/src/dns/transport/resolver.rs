use edgedig_domain::{DnsServer, DomainError};
use std::net::SocketAddr;
use std::time::Duration;

/// Turns a `host:port` server into a socket address.
///
/// IP literals are used as-is; host names go through the system resolver and
/// the first address returned wins.
pub async fn resolve_server(
    server: &DnsServer,
    timeout: Duration,
) -> Result<SocketAddr, DomainError> {
    if let Ok(ip) = server.host.parse::<std::net::IpAddr>() {
        return Ok(SocketAddr::new(ip, server.port));
    }

    let target = server.to_string();

    let mut addrs = tokio::time::timeout(timeout, tokio::net::lookup_host(target.clone()))
        .await
        .map_err(|_| DomainError::TransportTimeout {
            server: target.clone(),
        })?
        .map_err(|e| DomainError::Transport {
            server: target.clone(),
            message: format!("address lookup failed: {}", e),
        })?;

    addrs.next().ok_or_else(|| DomainError::Transport {
        server: target,
        message: "no addresses found".to_string(),
    })
}
