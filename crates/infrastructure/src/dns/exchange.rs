use crate::dns::forwarding::{MessageBuilder, ResponseParser};
use crate::dns::transport::resolver::resolve_server;
use crate::dns::transport::tcp::TcpTransport;
use crate::dns::transport::udp::UdpTransport;
use crate::dns::transport::DnsTransport;
use async_trait::async_trait;
use edgedig_application::ports::DnsExchangePort;
use edgedig_domain::{DnsAnswer, DnsQuery, DnsServer, DomainError, RecordType};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_millis(2000);

/// Exchanges queries with one server at a time over UDP, retrying over TCP
/// when the UDP answer comes back truncated. A failed TCP retry still
/// yields the truncated UDP answer.
pub struct HickoryDnsExchange {
    timeout: Duration,
}

impl HickoryDnsExchange {
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_QUERY_TIMEOUT,
        }
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn check_id(
        expected: u16,
        answer: DnsAnswer,
        server: &DnsServer,
    ) -> Result<DnsAnswer, DomainError> {
        if answer.id != expected {
            return Err(DomainError::InvalidDnsResponse(format!(
                "id mismatch from {}: sent {}, received {}",
                server, expected, answer.id
            )));
        }
        Ok(answer)
    }
}

impl Default for HickoryDnsExchange {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DnsExchangePort for HickoryDnsExchange {
    fn build_query(&self, name: &str, record_type: RecordType) -> Result<DnsQuery, DomainError> {
        MessageBuilder::parse_name(name)?;
        Ok(DnsQuery::new(name, record_type))
    }

    async fn exchange(
        &self,
        query: &DnsQuery,
        server: &DnsServer,
    ) -> Result<DnsAnswer, DomainError> {
        let start = Instant::now();
        let (id, query_bytes) = MessageBuilder::build_query(&query.name, &query.record_type)?;
        let server_addr = resolve_server(server, self.timeout).await?;

        let udp = UdpTransport::new(server_addr);
        let response = udp.send(&query_bytes, self.timeout).await?;
        let answer = Self::check_id(id, ResponseParser::parse(&response.bytes)?, server)?;

        if !answer.truncated {
            debug!(
                server = %server,
                query = %query,
                protocol = response.protocol_used,
                latency_ms = start.elapsed().as_millis() as u64,
                "Exchange completed"
            );
            return Ok(answer);
        }

        debug!(server = %server, "Response truncated (TC bit), retrying via TCP");

        let remaining = self
            .timeout
            .checked_sub(start.elapsed())
            .unwrap_or(Duration::from_millis(500));

        let tcp = TcpTransport::new(server_addr);
        let tcp_answer = tcp
            .send(&query_bytes, remaining)
            .await
            .and_then(|tcp_response| ResponseParser::parse(&tcp_response.bytes))
            .and_then(|parsed| Self::check_id(id, parsed, server));

        match tcp_answer {
            Ok(tcp_answer) => {
                debug!(
                    server = %server,
                    query = %query,
                    protocol = tcp.protocol_name(),
                    latency_ms = start.elapsed().as_millis() as u64,
                    "Exchange completed"
                );
                Ok(tcp_answer)
            }
            Err(e) => {
                warn!(
                    server = %server,
                    query = %query,
                    error = %e,
                    "TCP retry failed, keeping truncated UDP answer"
                );
                Ok(answer)
            }
        }
    }
}
