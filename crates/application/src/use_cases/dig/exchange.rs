use crate::ports::DnsExchangePort;
use edgedig_domain::{render_servers, DnsAnswer, DnsQuery, DnsServer, DomainError};
use std::sync::Arc;
use tracing::{debug, warn};

/// Sends one query to the edge servers in priority order and returns the
/// first reply. Later servers are never contacted once one has answered.
pub struct ExchangeUseCase {
    port: Arc<dyn DnsExchangePort>,
}

impl ExchangeUseCase {
    pub fn new(port: Arc<dyn DnsExchangePort>) -> Self {
        Self { port }
    }

    pub fn port(&self) -> &Arc<dyn DnsExchangePort> {
        &self.port
    }

    pub async fn execute(
        &self,
        query: &DnsQuery,
        servers: &[DnsServer],
    ) -> Result<DnsAnswer, DomainError> {
        if servers.is_empty() {
            return Err(DomainError::EmptyServerList);
        }
        debug!(strategy = "failover", servers = servers.len(), query = %query, "Trying sequentially");

        let mut last_error = None;
        for (index, server) in servers.iter().enumerate() {
            if !server.has_host() {
                return Err(DomainError::EmptyServerHost);
            }

            match self.port.exchange(query, server).await {
                Ok(answer) => {
                    debug!(server = %server, position = index, answers = answer.answers.len(), "Server responded");
                    return Ok(answer);
                }
                Err(e) => {
                    warn!(server = %server, error = %e, position = index, "Failing over");
                    last_error = Some(e);
                }
            }
        }

        // Non-empty list and no early return: every server produced an error.
        let source = last_error.unwrap_or(DomainError::EmptyServerList);
        Err(DomainError::ExchangeFailed {
            servers: render_servers(servers),
            source: Box::new(source),
        })
    }
}
