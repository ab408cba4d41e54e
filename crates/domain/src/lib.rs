//! edgedig domain layer
pub mod config;
pub mod dns_query;
pub mod dns_record;
pub mod dns_server;
pub mod errors;

pub use config::{CliOverrides, Config, ConfigError};
pub use dns_query::{fully_qualified, DnsQuery};
pub use dns_record::{AnswerRecord, DnsAnswer, RecordType};
pub use dns_server::{render_servers, DnsServer, DnsServerList, DEFAULT_DNS_PORT};
pub use errors::DomainError;
