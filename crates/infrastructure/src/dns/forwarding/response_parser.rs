use edgedig_domain::{AnswerRecord, DnsAnswer, DomainError};
use hickory_proto::op::{Message, ResponseCode};
use hickory_proto::rr::RData;
use tracing::debug;

pub struct ResponseParser;

impl ResponseParser {
    /// Decode a reply into the answer-section records resolution needs.
    pub fn parse(response_bytes: &[u8]) -> Result<DnsAnswer, DomainError> {
        let id = Self::wire_id(response_bytes)?;

        let message = Message::from_vec(response_bytes).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to parse DNS response: {}", e))
        })?;

        let rcode = message.response_code();
        let truncated = message.truncated();

        let mut answers = Vec::with_capacity(message.answers().len());
        for record in message.answers() {
            let name = record.name().to_utf8();
            match record.data() {
                RData::A(a) => answers.push(AnswerRecord::A { name, address: a.0 }),
                RData::CNAME(canonical) => {
                    debug!(name = %name, cname = %canonical.to_utf8(), "CNAME record found");
                    answers.push(AnswerRecord::Cname {
                        name,
                        target: canonical.to_utf8(),
                    });
                }
                _ => answers.push(AnswerRecord::Other {
                    name,
                    record_type: record.record_type().to_string(),
                }),
            }
        }

        debug!(
            id = id,
            rcode = ?rcode,
            answers = answers.len(),
            truncated = truncated,
            "DNS response parsed"
        );

        Ok(DnsAnswer {
            id,
            rcode: Self::rcode_to_status(rcode).to_string(),
            truncated,
            answers,
        })
    }

    /// Message ID from the first two header bytes.
    pub fn wire_id(bytes: &[u8]) -> Result<u16, DomainError> {
        if bytes.len() < 12 {
            return Err(DomainError::InvalidDnsResponse(format!(
                "Response too short: {} bytes",
                bytes.len()
            )));
        }
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    pub fn rcode_to_status(rcode: ResponseCode) -> &'static str {
        match rcode {
            ResponseCode::NoError => "NOERROR",
            ResponseCode::NXDomain => "NXDOMAIN",
            ResponseCode::ServFail => "SERVFAIL",
            ResponseCode::Refused => "REFUSED",
            ResponseCode::NotImp => "NOTIMP",
            ResponseCode::FormErr => "FORMERR",
            _ => "UNKNOWN",
        }
    }
}
