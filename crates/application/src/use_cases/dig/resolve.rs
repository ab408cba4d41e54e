use super::ExchangeUseCase;
use crate::ports::DnsExchangePort;
use edgedig_domain::config::resolver::default_max_cname_depth;
use edgedig_domain::{fully_qualified, AnswerRecord, DnsAnswer, DnsServer, DomainError, RecordType};
use futures::future::{BoxFuture, FutureExt};
use std::sync::Arc;
use tracing::debug;

/// Resolves a name to its IPv4 addresses through the edge servers, chasing
/// CNAMEs the servers did not flatten themselves.
///
/// Every call queries live; nothing is cached between calls. The result is
/// sorted as strings (so `10.0.0.1` sorts before `2.0.0.1`) and is not
/// deduplicated: the same address reached through two CNAME branches is
/// returned twice.
pub struct DigUseCase {
    exchange: ExchangeUseCase,
    max_cname_depth: usize,
}

/// Split of one response: addresses it answered directly, and the CNAME
/// targets it left unresolved.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct AnswerSet {
    pub addresses: Vec<String>,
    pub unresolved: Vec<String>,
}

impl AnswerSet {
    /// A CNAME counts as resolved when its target equals the address text of
    /// an A record from the same response. The owner names of the A records
    /// are not consulted.
    pub(crate) fn classify(answer: &DnsAnswer) -> Self {
        let mut addresses = Vec::new();
        let mut cnames = Vec::new();

        for record in &answer.answers {
            match record {
                AnswerRecord::A { address, .. } => addresses.push(address.to_string()),
                AnswerRecord::Cname { name, target } => cnames.push((name, target)),
                AnswerRecord::Other { .. } => {}
            }
        }

        let mut unresolved = Vec::new();
        for (name, target) in cnames {
            if addresses.iter().any(|a| a == target) {
                debug!(cname = %name, target = %target, "CNAME resolved in the same answer");
            } else {
                unresolved.push(target.clone());
            }
        }

        Self {
            addresses,
            unresolved,
        }
    }
}

impl DigUseCase {
    pub fn new(port: Arc<dyn DnsExchangePort>) -> Self {
        Self {
            exchange: ExchangeUseCase::new(port),
            max_cname_depth: default_max_cname_depth(),
        }
    }

    /// Bound on CNAME indirection levels. A cyclic chain fails with
    /// `DomainError::CyclicResolution` once it is exceeded.
    pub fn with_max_cname_depth(mut self, max_cname_depth: usize) -> Self {
        self.max_cname_depth = max_cname_depth;
        self
    }

    pub fn max_cname_depth(&self) -> usize {
        self.max_cname_depth
    }

    /// The failover primitive this resolver sends its queries through.
    pub fn exchanger(&self) -> &ExchangeUseCase {
        &self.exchange
    }

    pub async fn execute(
        &self,
        name: &str,
        servers: &[DnsServer],
    ) -> Result<Vec<String>, DomainError> {
        self.dig(name, servers, 0).await
    }

    fn dig<'a>(
        &'a self,
        name: &'a str,
        servers: &'a [DnsServer],
        depth: usize,
    ) -> BoxFuture<'a, Result<Vec<String>, DomainError>> {
        async move {
            if servers.is_empty() {
                return Err(DomainError::EmptyServerList);
            }
            if name.is_empty() {
                return Ok(Vec::new());
            }

            let fqdn = fully_qualified(name);
            let answer = self.query_a(&fqdn, servers).await.map_err(|e| {
                DomainError::ResolutionFailed {
                    name: fqdn.clone(),
                    source: Box::new(e),
                }
            })?;

            let AnswerSet {
                mut addresses,
                unresolved,
            } = AnswerSet::classify(&answer);

            debug!(
                name = %fqdn,
                depth = depth,
                addresses = addresses.len(),
                unresolved_cnames = unresolved.len(),
                "Answer classified"
            );

            for target in &unresolved {
                if depth >= self.max_cname_depth {
                    return Err(DomainError::CyclicResolution {
                        name: fqdn,
                        depth: self.max_cname_depth,
                    });
                }
                debug!(name = %fqdn, target = %target, "Chasing CNAME");
                let nested = self.dig(target, servers, depth + 1).await?;
                addresses.extend(nested);
            }

            addresses.sort();
            Ok(addresses)
        }
        .boxed()
    }

    async fn query_a(&self, fqdn: &str, servers: &[DnsServer]) -> Result<DnsAnswer, DomainError> {
        let query = self.exchange.port().build_query(fqdn, RecordType::A)?;
        self.exchange.execute(&query, servers).await
    }
}
