use async_trait::async_trait;
use edgedig_domain::{DnsAnswer, DnsQuery, DnsServer, DomainError, RecordType};

/// Wire protocol and transport, injected so the failover and CNAME logic
/// never touches sockets directly.
#[async_trait]
pub trait DnsExchangePort: Send + Sync {
    /// Build a single-question query. `name` is already fully qualified.
    fn build_query(&self, name: &str, record_type: RecordType) -> Result<DnsQuery, DomainError> {
        Ok(DnsQuery::new(name, record_type))
    }

    /// One request/response round trip against one server.
    async fn exchange(&self, query: &DnsQuery, server: &DnsServer)
        -> Result<DnsAnswer, DomainError>;
}
