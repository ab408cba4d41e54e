mod dns_exchange;

pub use dns_exchange::DnsExchangePort;

// Re-export for convenience
pub use edgedig_domain::{DnsAnswer, DnsQuery, DnsServer};
