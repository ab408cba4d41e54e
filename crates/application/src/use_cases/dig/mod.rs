mod exchange;
mod resolve;

pub use exchange::ExchangeUseCase;
pub use resolve::DigUseCase;
