use super::Error;
#[cfg(test)]
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExchangeRate {
    #[serde(deserialize_with = "null_as_default")]
    pub bid: String,
}

/// Reads `null` the same way as a missing field.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl ExchangeRate {
    /// Decodes `{"bid": "..."}`. A missing `bid` decodes to an empty string.
    pub fn from_json(body: &[u8]) -> Result<ExchangeRate, Error> {
        Ok(serde_json::from_slice(body)?)
    }
}

#[cfg(test)]
#[derive(Debug, PartialEq)]
pub struct StoredExchangeRate {
    pub id: i64,
    pub bid: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod test {
    use super::ExchangeRate;
    use crate::model::Error;

    #[test]
    fn from_json() {
        let rate = ExchangeRate::from_json(br#"{"bid": "5.4312"}"#).unwrap();
        assert_eq!("5.4312", rate.bid);
    }

    #[test]
    fn from_json_ignores_unknown_fields() {
        let rate = ExchangeRate::from_json(br#"{"bid": "5.43", "ask": "5.44"}"#).unwrap();
        assert_eq!("5.43", rate.bid);
    }

    #[test]
    fn from_json_empty_object() {
        let rate = ExchangeRate::from_json(b"{}").unwrap();
        assert_eq!("", rate.bid);
    }

    #[test]
    fn from_json_null_bid() {
        let rate = ExchangeRate::from_json(br#"{"bid": null}"#).unwrap();
        assert_eq!("", rate.bid);
    }

    #[test]
    fn from_json_non_string_bid() {
        let res = ExchangeRate::from_json(br#"{"bid": 5.43}"#);
        assert!(matches!(res, Err(Error::DecodeFailure(_))));
    }

    #[test]
    fn from_json_malformed() {
        let res = ExchangeRate::from_json(b"not json");
        assert!(matches!(res, Err(Error::DecodeFailure(_))));
    }

    #[test]
    fn to_json() {
        let rate = ExchangeRate { bid: "5.00".into() };
        assert_eq!(r#"{"bid":"5.00"}"#, serde_json::to_string(&rate).unwrap());
    }
}
