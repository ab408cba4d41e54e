//! UDP Transport for DNS queries (RFC 1035 §4.2.1)
//!
//! Messages are sent as-is (no framing) over a connected socket, so the
//! kernel drops datagrams from any other source. Replies whose message ID
//! differs from the query's are discarded and reading continues until the
//! deadline. If the response has the TC (truncated) bit set, the caller
//! retries via TCP.

use super::{DnsTransport, TransportResponse};
use async_trait::async_trait;
use edgedig_domain::DomainError;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::debug;

/// Maximum UDP DNS response size with EDNS(0)
const MAX_UDP_RESPONSE_SIZE: usize = 4096;

/// DNS over UDP transport
pub struct UdpTransport {
    server_addr: SocketAddr,
}

impl UdpTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self { server_addr }
    }

    fn transport_error(&self, message: String) -> DomainError {
        DomainError::Transport {
            server: self.server_addr.to_string(),
            message,
        }
    }

    fn timeout_error(&self) -> DomainError {
        DomainError::TransportTimeout {
            server: self.server_addr.to_string(),
        }
    }

    /// Reads datagrams until one carries `expected_id`.
    async fn recv_matching(
        &self,
        socket: &UdpSocket,
        expected_id: Option<[u8; 2]>,
    ) -> Result<Vec<u8>, DomainError> {
        let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];
        loop {
            let bytes_received = socket.recv(&mut recv_buf).await.map_err(|e| {
                self.transport_error(format!("Failed to receive UDP response: {}", e))
            })?;

            let received = &recv_buf[..bytes_received];
            match expected_id {
                Some(id) if received.len() >= 2 && received[..2] != id => {
                    debug!(
                        server = %self.server_addr,
                        expected = u16::from_be_bytes(id),
                        received = u16::from_be_bytes([received[0], received[1]]),
                        "Discarding UDP response with mismatched id"
                    );
                }
                _ => return Ok(received.to_vec()),
            }
        }
    }
}

#[async_trait]
impl DnsTransport for UdpTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        // Bind to ephemeral port (0 = OS assigns)
        let bind_addr: SocketAddr = if self.server_addr.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };

        let socket = UdpSocket::bind(bind_addr)
            .await
            .map_err(|e| self.transport_error(format!("Failed to bind UDP socket: {}", e)))?;

        socket
            .connect(self.server_addr)
            .await
            .map_err(|e| self.transport_error(format!("Failed to connect UDP socket: {}", e)))?;

        let bytes_sent = tokio::time::timeout(timeout, socket.send(message_bytes))
            .await
            .map_err(|_| self.timeout_error())?
            .map_err(|e| self.transport_error(format!("Failed to send UDP query: {}", e)))?;

        debug!(
            server = %self.server_addr,
            bytes_sent = bytes_sent,
            "UDP query sent"
        );

        let expected_id = message_bytes.get(..2).map(|id| [id[0], id[1]]);
        let response_bytes =
            tokio::time::timeout(timeout, self.recv_matching(&socket, expected_id))
                .await
                .map_err(|_| self.timeout_error())??;

        debug!(
            server = %self.server_addr,
            bytes_received = response_bytes.len(),
            "UDP response received"
        );

        Ok(TransportResponse {
            bytes: response_bytes,
            protocol_used: "UDP",
        })
    }

    fn protocol_name(&self) -> &'static str {
        "UDP"
    }
}
