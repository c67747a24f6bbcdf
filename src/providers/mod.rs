pub mod exchange_api;

pub use exchange_api::ExchangeApiClient;
