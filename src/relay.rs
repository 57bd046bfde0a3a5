use crate::{
    http,
    model::{Error, ExchangeRate},
};
use reqwest::Client;
use serde::Deserialize;
use std::{path::PathBuf, time::Duration};
use tracing::info;

/// Asks the server for the current rate and saves it to a local file.
pub struct Relay {
    conf: RelayConf,
    client: Client,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RelayConf {
    pub url: String,
    pub timeout_ms: u64,
    pub file: String,
}

impl RelayConf {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

pub fn render(rate: &ExchangeRate) -> String {
    format!("Dólar:{}", rate.bid)
}

impl Relay {
    pub fn new(conf: RelayConf) -> Relay {
        Relay {
            conf,
            client: Client::new(),
        }
    }

    pub async fn run(&self) -> Result<PathBuf, Error> {
        let rate = self.fetch().await?;
        self.write(&rate).await
    }

    pub async fn fetch(&self) -> Result<ExchangeRate, Error> {
        info!(url = %self.conf.url, "Getting exchange rate");
        let body = http::get(&self.client, &self.conf.url, self.conf.timeout()).await?;
        let rate = ExchangeRate::from_json(&body)?;
        info!(bid = %rate.bid, "Got exchange rate");
        Ok(rate)
    }

    /// Replaces the file contents with the rendered rate.
    pub async fn write(&self, rate: &ExchangeRate) -> Result<PathBuf, Error> {
        let path = PathBuf::from(&self.conf.file);
        info!(path = %path.display(), "Writing file");
        tokio::fs::write(&path, render(rate)).await?;
        Ok(path)
    }
}

#[cfg(test)]
mod test {
    use super::{render, Relay, RelayConf};
    use crate::model::{Error, ExchangeRate};
    use std::{fs, time::Duration};
    use tempfile::TempDir;
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    fn relay(url: String, dir: &TempDir) -> Relay {
        Relay::new(RelayConf {
            url,
            timeout_ms: 300,
            file: dir.path().join("cotacao.txt").to_string_lossy().into(),
        })
    }

    #[test]
    fn render_template() {
        let rate = ExchangeRate { bid: "5.43".into() };
        assert_eq!("Dólar:5.43", render(&rate));
    }

    #[tokio::test]
    async fn run() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cotacao"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"bid":"5.00"}"#))
            .expect(1)
            .mount(&server)
            .await;
        let dir = TempDir::new().unwrap();
        let relay = relay(format!("{}/cotacao", server.uri()), &dir);

        let file = relay.run().await.unwrap();
        assert_eq!("Dólar:5.00", fs::read_to_string(file).unwrap());
    }

    #[tokio::test]
    async fn run_truncates_previous_file() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"bid":"5.1"}"#))
            .mount(&server)
            .await;
        let dir = TempDir::new().unwrap();
        let relay = relay(server.uri(), &dir);
        fs::write(dir.path().join("cotacao.txt"), "Dólar:123456789").unwrap();

        let file = relay.run().await.unwrap();
        assert_eq!("Dólar:5.1", fs::read_to_string(file).unwrap());
    }

    #[tokio::test]
    async fn run_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{"bid":"5.00"}"#)
                    .set_delay(Duration::from_secs(1)),
            )
            .mount(&server)
            .await;
        let dir = TempDir::new().unwrap();
        let relay = relay(server.uri(), &dir);

        let res = relay.run().await;
        assert!(matches!(res, Err(Error::TimeoutExceeded { .. })));
        assert!(!dir.path().join("cotacao.txt").exists());
    }

    #[tokio::test]
    async fn run_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(504).set_body_string(
                r#"{"code":504,"message":"Gateway Timeout"}"#,
            ))
            .mount(&server)
            .await;
        let dir = TempDir::new().unwrap();
        let relay = relay(server.uri(), &dir);

        let res = relay.run().await;
        assert!(matches!(res, Err(Error::NonOkStatus(504))));
        assert!(!dir.path().join("cotacao.txt").exists());
    }

    #[tokio::test]
    async fn write_to_missing_directory() {
        let dir = TempDir::new().unwrap();
        let relay = Relay::new(RelayConf {
            url: "http://127.0.0.1:1/".into(),
            timeout_ms: 300,
            file: dir
                .path()
                .join("missing")
                .join("cotacao.txt")
                .to_string_lossy()
                .into(),
        });

        let res = relay.write(&ExchangeRate { bid: "5.00".into() }).await;
        assert!(matches!(res, Err(Error::FileIoFailure(_))));
    }
}
