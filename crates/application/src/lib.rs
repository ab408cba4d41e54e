//! edgedig application layer: the exchange port and the lookup use cases.
pub mod ports;
pub mod use_cases;
