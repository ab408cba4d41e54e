use serde::{Deserialize, Serialize};

use crate::{DnsServer, DnsServerList, DomainError};

/// Edge servers and per-lookup limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverConfig {
    /// Edge DNS servers as `host:port`, tried in order.
    #[serde(default)]
    pub servers: Vec<String>,

    /// Per-exchange timeout in milliseconds.
    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,

    /// Maximum CNAME indirection levels followed before giving up.
    #[serde(default = "default_max_cname_depth")]
    pub max_cname_depth: usize,
}

impl ResolverConfig {
    pub fn server_list(&self) -> Result<DnsServerList, DomainError> {
        self.servers
            .iter()
            .map(|s| s.parse::<DnsServer>())
            .collect::<Result<Vec<_>, _>>()
            .map(DnsServerList::from)
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            servers: Vec::new(),
            query_timeout_ms: default_query_timeout_ms(),
            max_cname_depth: default_max_cname_depth(),
        }
    }
}

fn default_query_timeout_ms() -> u64 {
    2000
}

pub fn default_max_cname_depth() -> usize {
    16
}
