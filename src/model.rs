mod api_error;
pub use api_error::ApiError;
mod error;
pub use error::Error;
mod exchange_rate;
pub use exchange_rate::{null_as_default, ExchangeRate};
#[cfg(test)]
pub use exchange_rate::StoredExchangeRate;
