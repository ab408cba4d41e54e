pub mod answer;
pub mod record_type;

pub use answer::{AnswerRecord, DnsAnswer};
pub use record_type::RecordType;
