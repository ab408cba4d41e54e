//! edgedig infrastructure: the hickory-proto backed exchange adapter.
pub mod dns;
