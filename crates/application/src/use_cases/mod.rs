pub mod dig;

pub use dig::{DigUseCase, ExchangeUseCase};
