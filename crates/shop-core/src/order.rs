//! Order Model
//!
//! The fixed demo product, the buyer's details and the editable form state
//! that feeds a client session request.

use std::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{CheckoutError, Result};
use crate::metadata::{Metadata, parse_metadata};

/// A product on sale
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Product {
    pub item_id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub image: &'static str,
}

impl Product {
    /// The only thing this shop sells
    pub const T_SHIRT: Self = Self {
        item_id: "t-shirt",
        name: "T-Shirt",
        description: "Off-white T-Shirt",
        image: "/tshirt.svg",
    };
}

// ============================================================================
// Amount & Currency
// ============================================================================

/// Order amount with exactly two decimal places.
///
/// Input with more precision is rounded half away from zero, so `10.5`
/// becomes `10.50` and `1000` becomes `1000.00`. Negative amounts are
/// rejected. On the wire the amount is a JSON number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OrderAmount(Decimal);

impl OrderAmount {
    pub const SCALE: u32 = 2;

    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(value: Decimal) -> Result<Self> {
        if value < Decimal::ZERO {
            return Err(CheckoutError::InvalidAmount(format!("{value} is negative")));
        }

        let mut rounded =
            value.round_dp_with_strategy(Self::SCALE, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(Self::SCALE);

        // rescale saturates when the mantissa has no room for the cents
        if rounded.scale() != Self::SCALE {
            return Err(CheckoutError::InvalidAmount(format!("{value} is too large")));
        }

        Ok(Self(rounded))
    }

    pub const fn value(&self) -> Decimal {
        self.0
    }
}

impl Default for OrderAmount {
    fn default() -> Self {
        Self(dec!(1000.00))
    }
}

impl FromStr for OrderAmount {
    type Err = CheckoutError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let value = Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map_err(|_| CheckoutError::InvalidAmount(format!("'{trimmed}' is not a number")))?;

        Self::new(value)
    }
}

impl fmt::Display for OrderAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for OrderAmount {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for OrderAmount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = rust_decimal::serde::float::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}

/// ISO-4217-ish currency code. Not validated, only trimmed.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self("EUR".into())
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Customer & Order Details
// ============================================================================

/// Buyer details, reused for both billing and shipping
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerInfo {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
}

impl Default for CustomerInfo {
    fn default() -> Self {
        Self {
            first_name: "John".into(),
            last_name: "Smith".into(),
            address: "Real address 33".into(),
        }
    }
}

/// Snapshot of the form sent to the session endpoint
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderDetails {
    pub currency_code: CurrencyCode,
    pub amount: OrderAmount,
    pub customer: CustomerInfo,
    #[serde(default)]
    pub metadata: Metadata,
}

// ============================================================================
// Form State
// ============================================================================

/// Editable storefront form.
///
/// Owned by one view and only changed through the setters below. Metadata
/// and the currency are kept as raw text and only cleaned up when a snapshot
/// is taken.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderForm {
    amount: OrderAmount,
    currency: String,
    customer: CustomerInfo,
    metadata_text: String,
}

impl Default for OrderForm {
    fn default() -> Self {
        Self {
            amount: OrderAmount::default(),
            currency: CurrencyCode::default().to_string(),
            customer: CustomerInfo::default(),
            metadata_text: String::new(),
        }
    }
}

impl OrderForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn amount(&self) -> OrderAmount {
        self.amount
    }

    /// Currency text as typed
    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub const fn customer(&self) -> &CustomerInfo {
        &self.customer
    }

    pub fn metadata_text(&self) -> &str {
        &self.metadata_text
    }

    /// Apply raw text from the amount input.
    ///
    /// An empty field means zero. Text that is not a valid amount leaves the
    /// current amount untouched and returns `false`.
    pub fn set_amount_input(&mut self, input: &str) -> bool {
        if input.trim().is_empty() {
            self.amount = OrderAmount::ZERO;
            return true;
        }

        match input.parse() {
            Ok(amount) => {
                self.amount = amount;
                true
            }
            Err(e) => {
                tracing::debug!(input, error = %e, "Ignoring amount input");
                false
            }
        }
    }

    pub fn set_currency(&mut self, code: impl Into<String>) {
        self.currency = code.into();
    }

    pub fn set_first_name(&mut self, first_name: impl Into<String>) {
        self.customer.first_name = first_name.into();
    }

    pub fn set_last_name(&mut self, last_name: impl Into<String>) {
        self.customer.last_name = last_name.into();
    }

    pub fn set_address(&mut self, address: impl Into<String>) {
        self.customer.address = address.into();
    }

    pub fn set_metadata_text(&mut self, text: impl Into<String>) {
        self.metadata_text = text.into();
    }

    /// Snapshot the current values for a session request
    pub fn details(&self) -> OrderDetails {
        OrderDetails {
            currency_code: CurrencyCode::new(&self.currency),
            amount: self.amount,
            customer: self.customer.clone(),
            metadata: parse_metadata(&self.metadata_text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_gets_two_decimal_places() {
        assert_eq!(OrderAmount::default().to_string(), "1000.00");
        assert_eq!("1000".parse::<OrderAmount>().unwrap().to_string(), "1000.00");
        assert_eq!("10.5".parse::<OrderAmount>().unwrap().to_string(), "10.50");
        assert_eq!("10.555".parse::<OrderAmount>().unwrap().to_string(), "10.56");
        assert_eq!("1e2".parse::<OrderAmount>().unwrap().to_string(), "100.00");
    }

    #[test]
    fn test_amount_rejects_bad_input() {
        assert!("-1".parse::<OrderAmount>().is_err());
        assert!("ten".parse::<OrderAmount>().is_err());
        assert!("10.5.00".parse::<OrderAmount>().is_err());
    }

    #[test]
    fn test_amount_rejects_values_without_room_for_cents() {
        assert!("79228162514264337593543950335".parse::<OrderAmount>().is_err());
        assert!("1000000000000000000000000000".parse::<OrderAmount>().is_err());
        assert!(OrderAmount::new(Decimal::MAX).is_err());

        let big: OrderAmount = "10000000000000000000000000".parse().unwrap();
        assert_eq!(big.value().scale(), OrderAmount::SCALE);
    }

    #[test]
    fn test_amount_serializes_as_number() {
        let amount: OrderAmount = "1000".parse().unwrap();
        assert_eq!(serde_json::to_value(amount).unwrap(), serde_json::json!(1000.00));

        let back: OrderAmount = serde_json::from_str("10.5").unwrap();
        assert_eq!(back.to_string(), "10.50");

        assert!(serde_json::from_str::<OrderAmount>("-3").is_err());
    }

    #[test]
    fn test_form_defaults() {
        let details = OrderForm::new().details();

        assert_eq!(details.amount.to_string(), "1000.00");
        assert_eq!(details.currency_code.as_str(), "EUR");
        assert_eq!(details.customer.first_name, "John");
        assert_eq!(details.customer.last_name, "Smith");
        assert_eq!(details.customer.address, "Real address 33");
        assert!(details.metadata.is_empty());
    }

    #[test]
    fn test_amount_input_handling() {
        let mut form = OrderForm::new();

        assert!(form.set_amount_input("25"));
        assert_eq!(form.amount().to_string(), "25.00");

        assert!(!form.set_amount_input("abc"));
        assert_eq!(form.amount().to_string(), "25.00");

        assert!(form.set_amount_input(""));
        assert_eq!(form.amount(), OrderAmount::ZERO);
    }

    #[test]
    fn test_details_reflect_live_values() {
        let mut form = OrderForm::new();
        form.set_currency(" gbp ");
        form.set_first_name("Ada");
        form.set_last_name("Lovelace");
        form.set_address("12 Analytical Row");
        form.set_metadata_text("scenario=PAYPAL\ncount=3");

        assert_eq!(form.currency(), " gbp ");

        let details = form.details();
        assert_eq!(details.currency_code.as_str(), "gbp");
        assert_eq!(details.customer.first_name, "Ada");
        assert_eq!(details.customer.address, "12 Analytical Row");
        assert_eq!(details.metadata.len(), 2);
    }

    #[test]
    fn test_details_wire_format() {
        let json = serde_json::to_value(OrderForm::new().details()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "currency_code": "EUR",
                "amount": 1000.0,
                "customer": {
                    "first_name": "John",
                    "last_name": "Smith",
                    "address": "Real address 33"
                },
                "metadata": {}
            })
        );
    }
}
