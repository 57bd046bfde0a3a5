use crate::{provider::AwesomeApiConf, relay::RelayConf};
use anyhow::{bail, Result};
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;
use std::{env, path::PathBuf, time::Duration};

#[derive(Clone, Debug, Deserialize)]
pub struct Conf {
    pub server: ServerConf,
    pub db: DbConf,
    pub providers: ProvidersConf,
    pub relay: RelayConf,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ServerConf {
    pub address: String,
    pub port: u16,
}

#[derive(Clone, Debug, Deserialize)]
pub struct DbConf {
    pub url: String,
    pub insert_timeout_ms: u64,
}

impl DbConf {
    pub fn insert_timeout(&self) -> Duration {
        Duration::from_millis(self.insert_timeout_ms)
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct ProvidersConf {
    pub awesome_api: AwesomeApiConf,
}

static DEFAULT_CONF: &str = include_str!("../cotacao.conf");

impl Conf {
    /// Embedded defaults, overridden by `$DATA_DIR/cotacao.conf` and `COTACAO_*` env vars.
    pub fn new() -> Result<Conf> {
        let conf: Conf = Figment::new()
            .merge(Toml::string(DEFAULT_CONF))
            .merge(Toml::file(custom_conf_path()))
            .merge(Env::prefixed("COTACAO_").split("__"))
            .extract()?;

        conf.validate()?;
        Ok(conf)
    }

    #[cfg(test)]
    pub fn defaults() -> Result<Conf> {
        let conf: Conf = Figment::new().merge(Toml::string(DEFAULT_CONF)).extract()?;
        conf.validate()?;
        Ok(conf)
    }

    fn validate(&self) -> Result<()> {
        let timeouts = [
            ("db.insert_timeout_ms", self.db.insert_timeout_ms),
            (
                "providers.awesome_api.timeout_ms",
                self.providers.awesome_api.timeout_ms,
            ),
            ("relay.timeout_ms", self.relay.timeout_ms),
        ];

        for (key, value) in timeouts {
            if value == 0 {
                bail!("{} must be greater than zero", key);
            }
        }

        Ok(())
    }
}

fn custom_conf_path() -> PathBuf {
    let data_dir = match env::var("DATA_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => dirs::data_dir()
            .map(|dir| dir.join("cotacao"))
            .unwrap_or_default(),
    };

    data_dir.join("cotacao.conf")
}
