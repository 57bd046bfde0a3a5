pub mod exchange_rate;

use crate::model::ApiError;
use rocket::{catch, http::Status, Request};

#[catch(default)]
pub fn default(status: Status, _req: &Request) -> ApiError {
    status.into()
}
