use anyhow::Context;
use edgedig_application::ports::DnsExchangePort;
use edgedig_application::use_cases::{DigUseCase, ExchangeUseCase};
use edgedig_domain::{fully_qualified, DnsAnswer, DnsServer, RecordType};
use std::sync::Arc;

/// Failures are returned, not logged; `main` reports them once.
pub async fn dig(
    port: Arc<dyn DnsExchangePort>,
    max_cname_depth: usize,
    name: &str,
    servers: &[DnsServer],
) -> anyhow::Result<Vec<String>> {
    DigUseCase::new(port)
        .with_max_cname_depth(max_cname_depth)
        .execute(name, servers)
        .await
        .with_context(|| format!("Lookup of {} failed", name))
}

pub async fn exchange(
    port: Arc<dyn DnsExchangePort>,
    name: &str,
    record_type: RecordType,
    servers: &[DnsServer],
) -> anyhow::Result<DnsAnswer> {
    let query = port.build_query(&fully_qualified(name), record_type)?;
    ExchangeUseCase::new(port)
        .execute(&query, servers)
        .await
        .with_context(|| format!("Exchange of {} failed", query))
}
