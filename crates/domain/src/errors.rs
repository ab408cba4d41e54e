use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum DomainError {
    #[error("empty DNS server list, provide at least one")]
    EmptyServerList,

    #[error("empty DNS server host in the list")]
    EmptyServerHost,

    #[error("Invalid server address: {0}")]
    InvalidServerAddress(String),

    #[error("Unsupported record type: {0}")]
    InvalidRecordType(String),

    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("Transport timeout talking to {server}")]
    TransportTimeout { server: String },

    #[error("Transport error talking to {server}: {message}")]
    Transport { server: String, message: String },

    #[error("exchange error: all dns servers [{servers}] were tried and none of them were able to resolve, err: {source}")]
    ExchangeFailed {
        servers: String,
        #[source]
        source: Box<DomainError>,
    },

    #[error("dig error for {name}: {source}")]
    ResolutionFailed {
        name: String,
        #[source]
        source: Box<DomainError>,
    },

    #[error("CNAME chain for {name} exceeds {depth} levels of indirection")]
    CyclicResolution { name: String, depth: usize },
}

impl DomainError {
    /// Caller-fixable misconfiguration, never retried internally.
    pub fn is_configuration_error(&self) -> bool {
        match self {
            Self::EmptyServerList | Self::EmptyServerHost | Self::InvalidServerAddress(_) => true,
            Self::ResolutionFailed { source, .. } => source.is_configuration_error(),
            _ => false,
        }
    }

    /// Every configured server was tried and all of them failed.
    pub fn is_exchange_failure(&self) -> bool {
        match self {
            Self::ExchangeFailed { .. } => true,
            Self::ResolutionFailed { source, .. } => source.is_exchange_failure(),
            _ => false,
        }
    }
}
