use crate::{
    http,
    model::{null_as_default, Error, ExchangeRate},
    provider::Provider,
};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::info;

pub struct AwesomeApi {
    conf: AwesomeApiConf,
    client: Client,
}

#[derive(Clone, Debug, Deserialize)]
pub struct AwesomeApiConf {
    pub url: String,
    pub timeout_ms: u64,
}

impl AwesomeApiConf {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AwesomeApiQuote {
    #[serde(rename = "USDBRL", deserialize_with = "null_as_default")]
    pub usd_brl: ExchangeRate,
}

impl AwesomeApiQuote {
    /// Decodes `{"USDBRL": {"bid": "..."}}`, defaulting whatever is missing.
    pub fn from_json(body: &[u8]) -> Result<AwesomeApiQuote, Error> {
        Ok(serde_json::from_slice(body)?)
    }
}

impl AwesomeApi {
    pub fn new(conf: AwesomeApiConf) -> AwesomeApi {
        AwesomeApi {
            conf,
            client: Client::new(),
        }
    }
}

#[rocket::async_trait]
impl Provider for AwesomeApi {
    fn name(&self) -> String {
        "awesome_api".into()
    }

    async fn fetch(&self) -> Result<ExchangeRate, Error> {
        info!(provider = %self.name(), "Fetching exchange rate");
        let body = http::get(&self.client, &self.conf.url, self.conf.timeout()).await?;
        let rate = AwesomeApiQuote::from_json(&body)?.usd_brl;
        info!(provider = %self.name(), bid = %rate.bid, "Got exchange rate");
        Ok(rate)
    }
}
