//! Monetary amounts as the payment API represents them on the wire.
//!
//! An amount is a pair of a decimal value and a 3-letter ISO 4217 currency
//! code, serialized as `{"value": "100.00", "currency": "RUB"}`. The value is
//! always a non-negative decimal string with a `.` separator and at least two
//! fractional digits.

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::fmt::Display;
use std::str::FromStr;

/// A validated 3-letter uppercase ISO 4217 currency code, e.g. `RUB` or `EUR`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CurrencyCode(String);

#[derive(Debug, thiserror::Error)]
#[error("Invalid currency code {0:?}: must be 3 uppercase letters")]
pub struct CurrencyCodeError(pub String);

impl FromStr for CurrencyCode {
    type Err = CurrencyCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        static CODE_REGEX: Lazy<Regex> =
            Lazy::new(|| Regex::new(r"^[A-Z]{3}$").expect("Invalid currency code regex"));

        if CODE_REGEX.is_match(s) {
            Ok(CurrencyCode(s.to_owned()))
        } else {
            Err(CurrencyCodeError(s.to_owned()))
        }
    }
}

impl TryFrom<&str> for CurrencyCode {
    type Error = CurrencyCodeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::from_str(value)
    }
}

impl CurrencyCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for CurrencyCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for CurrencyCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A non-negative decimal money value.
///
/// Serialized as a decimal string with a `.` separator and at least two
/// fractional digits: `100` becomes `"100.00"`, `"99.95"` stays `"99.95"`.
/// Negative values are rejected both at construction and on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MonetaryValue(Decimal);

#[derive(Debug, thiserror::Error)]
pub enum MonetaryValueError {
    #[error("Invalid decimal format")]
    InvalidFormat,
    #[error("Negative value is not allowed")]
    Negative,
}

impl MonetaryValue {
    pub fn parse(input: &str) -> Result<Self, MonetaryValueError> {
        let parsed = Decimal::from_str(input).map_err(|_| MonetaryValueError::InvalidFormat)?;
        Self::try_from(parsed)
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for MonetaryValue {
    type Error = MonetaryValueError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        if value.is_sign_negative() {
            return Err(MonetaryValueError::Negative);
        }
        Ok(MonetaryValue(value))
    }
}

impl From<u64> for MonetaryValue {
    fn from(value: u64) -> Self {
        MonetaryValue(Decimal::from(value))
    }
}

impl FromStr for MonetaryValue {
    type Err = MonetaryValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MonetaryValue::parse(s)
    }
}

impl Display for MonetaryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut value = self.0;
        if value.scale() < 2 {
            value.rescale(2);
        }
        write!(f, "{}", value)
    }
}

impl Serialize for MonetaryValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for MonetaryValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        MonetaryValue::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// A money value paired with its currency, as sent to and returned by the
/// payment API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonetaryAmount {
    pub value: MonetaryValue,
    pub currency: CurrencyCode,
}

impl MonetaryAmount {
    pub fn new(value: MonetaryValue, currency: CurrencyCode) -> Self {
        Self { value, currency }
    }
}

impl Display for MonetaryAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rub() -> CurrencyCode {
        "RUB".parse().unwrap()
    }

    #[test]
    fn value_serializes_with_two_fraction_digits() {
        let amount = MonetaryAmount::new(MonetaryValue::from(100), rub());
        let encoded = serde_json::to_value(&amount).unwrap();
        assert_eq!(encoded, json!({"value": "100.00", "currency": "RUB"}));
    }

    #[test]
    fn value_keeps_caller_precision() {
        let value = MonetaryValue::parse("99.95").unwrap();
        assert_eq!(value.to_string(), "99.95");
        let value = MonetaryValue::parse("10.5").unwrap();
        assert_eq!(value.to_string(), "10.50");
    }

    #[test]
    fn negative_value_is_rejected() {
        assert!(matches!(
            MonetaryValue::parse("-1.00"),
            Err(MonetaryValueError::Negative)
        ));
        let result: Result<MonetaryValue, _> = serde_json::from_value(json!("-0.01"));
        assert!(result.is_err());
    }

    #[test]
    fn garbage_value_is_rejected() {
        assert!(matches!(
            MonetaryValue::parse("ten rubles"),
            Err(MonetaryValueError::InvalidFormat)
        ));
    }

    #[test]
    fn currency_code_must_be_three_uppercase_letters() {
        assert!("USD".parse::<CurrencyCode>().is_ok());
        assert!("usd".parse::<CurrencyCode>().is_err());
        assert!("USDT".parse::<CurrencyCode>().is_err());
        assert!("U1D".parse::<CurrencyCode>().is_err());
    }

    #[test]
    fn amount_round_trips() {
        let amount: MonetaryAmount =
            serde_json::from_value(json!({"value": "250.00", "currency": "EUR"})).unwrap();
        assert_eq!(amount.value, MonetaryValue::from(250));
        assert_eq!(amount.currency.as_str(), "EUR");
        let encoded = serde_json::to_value(&amount).unwrap();
        assert_eq!(encoded, json!({"value": "250.00", "currency": "EUR"}));
    }
}
