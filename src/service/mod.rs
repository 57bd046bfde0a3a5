pub mod exchange_rate;
pub use exchange_rate::ExchangeRateService;
