use crate::{
    model::{Error, ExchangeRate},
    provider::Provider,
    repository::{Cancel, ExchangeRateRepository},
};
use chrono::Utc;
use std::time::Duration;
use tokio::{task::spawn_blocking, time::timeout};
use tracing::{info, warn};

pub struct ExchangeRateService {
    provider: Box<dyn Provider + Send + Sync>,
    repo: ExchangeRateRepository,
    insert_timeout: Duration,
}

impl ExchangeRateService {
    pub fn new(
        provider: Box<dyn Provider + Send + Sync>,
        repo: ExchangeRateRepository,
        insert_timeout: Duration,
    ) -> ExchangeRateService {
        ExchangeRateService {
            provider,
            repo,
            insert_timeout,
        }
    }

    /// Fetches the latest rate from the provider and records it before handing it back.
    pub async fn fetch_and_store(&self) -> Result<ExchangeRate, Error> {
        let rate = self.provider.fetch().await?;
        self.store(&rate).await?;
        Ok(rate)
    }

    // On deadline the insert is interrupted and awaited, so a timeout means nothing was stored.
    async fn store(&self, rate: &ExchangeRate) -> Result<(), Error> {
        info!(bid = %rate.bid, "Saving exchange rate");
        let repo = self.repo.clone();
        let bid = rate.bid.clone();
        let deadline = self.insert_timeout;
        let cancel = Cancel::default();
        let task_cancel = cancel.clone();
        let mut insert =
            spawn_blocking(move || repo.insert(&bid, Utc::now(), deadline, &task_cancel));

        let id = match timeout(deadline, &mut insert).await {
            Ok(res) => res??,
            Err(_) => {
                cancel.cancel();
                match insert.await? {
                    Ok(id) => {
                        warn!(id, timeout = ?deadline, "Exchange rate saved past the deadline");
                        id
                    }
                    Err(e) => {
                        warn!(timeout = ?deadline, error = %e, "Timed out saving exchange rate");
                        return Err(Error::timeout("storage insert", deadline));
                    }
                }
            }
        };

        info!(id, "Saved exchange rate");
        Ok(())
    }
}
