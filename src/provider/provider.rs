use crate::model::{Error, ExchangeRate};

#[rocket::async_trait]
pub trait Provider {
    fn name(&self) -> String;

    async fn fetch(&self) -> Result<ExchangeRate, Error>;
}
