use std::fmt;
use std::net::Ipv4Addr;

/// One answer-section record, reduced to what resolution cares about.
///
/// Names keep the protocol library's textual form, trailing dot included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerRecord {
    A { name: String, address: Ipv4Addr },
    Cname { name: String, target: String },
    Other { name: String, record_type: String },
}

impl AnswerRecord {
    pub fn a(name: impl Into<String>, address: Ipv4Addr) -> Self {
        Self::A {
            name: name.into(),
            address,
        }
    }

    pub fn cname(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self::Cname {
            name: name.into(),
            target: target.into(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::A { name, .. } | Self::Cname { name, .. } | Self::Other { name, .. } => name,
        }
    }
}

impl fmt::Display for AnswerRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A { name, address } => write!(f, "{}\tA\t{}", name, address),
            Self::Cname { name, target } => write!(f, "{}\tCNAME\t{}", name, target),
            Self::Other { name, record_type } => write!(f, "{}\t{}", name, record_type),
        }
    }
}

/// Decoded reply to a single exchange.
///
/// Any decoded reply counts as a successful exchange, whatever its rcode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsAnswer {
    pub id: u16,
    pub rcode: String,
    pub truncated: bool,
    pub answers: Vec<AnswerRecord>,
}

impl DnsAnswer {
    pub fn new(answers: Vec<AnswerRecord>) -> Self {
        Self {
            id: 0,
            rcode: "NOERROR".to_string(),
            truncated: false,
            answers,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}
