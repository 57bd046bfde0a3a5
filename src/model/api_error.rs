use super::Error;
use rocket::{
    http::{ContentType, Status},
    request::Request,
    response::{self, Responder, Response},
};
use serde::Serialize;
use std::io::Cursor;
use tracing::error;

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing)]
    pub error: Option<Error>,
}

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        let status = match e {
            Error::TimeoutExceeded { .. } => Status::GatewayTimeout,
            Error::TransportFailure(_) | Error::NonOkStatus(_) | Error::DecodeFailure(_) => {
                Status::BadGateway
            }
            _ => Status::InternalServerError,
        };

        ApiError {
            code: status.code,
            message: status.reason().unwrap_or("").to_string(),
            error: Some(e),
        }
    }
}

impl From<Status> for ApiError {
    fn from(s: Status) -> Self {
        ApiError {
            code: s.code,
            message: s.reason().unwrap_or("").to_string(),
            error: None,
        }
    }
}

impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        if let Some(error) = &self.error {
            error!(%error, code = self.code, "Error from controller");
        }

        let body = serde_json::to_string(&self).map_err(|_| Status::InternalServerError)?;

        Response::build()
            .header(ContentType::JSON)
            .status(Status::new(self.code))
            .sized_body(body.len(), Cursor::new(body))
            .ok()
    }
}

#[cfg(test)]
mod test {
    use super::ApiError;
    use crate::model::Error;
    use std::time::Duration;

    #[test]
    fn timeout_is_gateway_timeout() {
        let e: ApiError = Error::timeout("fetch", Duration::from_millis(200)).into();
        assert_eq!(504, e.code);
        assert_eq!("Gateway Timeout", e.message);
    }

    #[test]
    fn upstream_failures_are_bad_gateway() {
        let e: ApiError = Error::NonOkStatus(429).into();
        assert_eq!(502, e.code);
        let decode = serde_json::from_str::<u8>("x").unwrap_err();
        let e: ApiError = Error::DecodeFailure(decode).into();
        assert_eq!(502, e.code);
    }

    #[test]
    fn storage_failure_is_internal() {
        let e: ApiError = Error::from(rusqlite::Error::QueryReturnedNoRows).into();
        assert_eq!(500, e.code);
    }

    #[test]
    fn serializes_without_source() {
        let e: ApiError = Error::InvalidTimeout.into();
        assert_eq!(
            r#"{"code":500,"message":"Internal Server Error"}"#,
            serde_json::to_string(&e).unwrap()
        );
    }
}
