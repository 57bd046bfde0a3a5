use crate::{
    model::{ApiError, ExchangeRate},
    service::ExchangeRateService,
};
use rocket::{get, serde::json::Json, State};

#[get("/cotacao")]
pub async fn get(service: &State<ExchangeRateService>) -> Result<Json<ExchangeRate>, ApiError> {
    Ok(Json(service.fetch_and_store().await?))
}
