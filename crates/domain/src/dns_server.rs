use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use super::DomainError;

pub const DEFAULT_DNS_PORT: u16 = 53;

/// One candidate edge DNS server.
///
/// Nothing is validated at construction. An empty host is rejected when the
/// server is used for an exchange.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DnsServer {
    pub host: String,
    pub port: u16,
}

impl DnsServer {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    pub fn has_host(&self) -> bool {
        !self.host.is_empty()
    }
}

impl fmt::Display for DnsServer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

fn parse_host_port(s: &str) -> Result<(&str, u16), DomainError> {
    let invalid = || DomainError::InvalidServerAddress(format!("Invalid address '{}'", s));

    if let Some(rest) = s.strip_prefix('[') {
        let end = rest.find(']').ok_or_else(invalid)?;
        let host = &rest[..end];
        return match rest[end + 1..].strip_prefix(':') {
            Some(port_str) => Ok((host, port_str.parse::<u16>().map_err(|_| invalid())?)),
            None if rest.len() == end + 1 => Ok((host, DEFAULT_DNS_PORT)),
            None => Err(invalid()),
        };
    }

    match s.rsplit_once(':') {
        // A second colon means a bare IPv6 literal without brackets.
        Some((host, _)) if host.contains(':') => Ok((s, DEFAULT_DNS_PORT)),
        Some((host, port_str)) => Ok((host, port_str.parse::<u16>().map_err(|_| invalid())?)),
        None => Ok((s, DEFAULT_DNS_PORT)),
    }
}

impl FromStr for DnsServer {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (host, port) = parse_host_port(s.trim())?;
        Ok(Self::new(host, port))
    }
}

/// Ordered edge servers; the first entry is the most preferred.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DnsServerList(Vec<DnsServer>);

impl DnsServerList {
    pub fn new(servers: Vec<DnsServer>) -> Self {
        Self(servers)
    }

    pub fn as_slice(&self) -> &[DnsServer] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<DnsServer> {
        self.0
    }
}

impl Deref for DnsServerList {
    type Target = [DnsServer];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<DnsServer>> for DnsServerList {
    fn from(servers: Vec<DnsServer>) -> Self {
        Self(servers)
    }
}

impl FromIterator<DnsServer> for DnsServerList {
    fn from_iter<I: IntoIterator<Item = DnsServer>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a DnsServerList {
    type Item = &'a DnsServer;
    type IntoIter = std::slice::Iter<'a, DnsServer>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for DnsServerList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_servers(&self.0))
    }
}

/// Comma-joined rendering used in diagnostics.
pub fn render_servers(servers: &[DnsServer]) -> String {
    servers
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}
