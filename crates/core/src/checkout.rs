//! Checkout form validation and order receipts.
//!
//! Placing an order does not contact anything: the cart is emptied and the
//! customer gets a receipt summarising what they "bought".

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::basket::CartEntry;
use crate::error::BasketError;
use crate::types::{Email, EmailError, Price};

/// Maximum length accepted for free-text form fields.
pub const MAX_FIELD_LENGTH: usize = 500;

/// Why an order could not be placed.
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("Your cart is empty!")]
    EmptyCart,

    #[error("Please enter your name")]
    MissingName,

    #[error("Please enter a shipping address")]
    MissingAddress,

    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error(transparent)]
    Email(#[from] EmailError),

    #[error(transparent)]
    Basket(#[from] BasketError),
}

impl CheckoutError {
    /// Whether the error is caused by what the customer entered.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingName | Self::MissingAddress | Self::TooLong { .. } | Self::Email(_)
        )
    }
}

/// Validated contact and shipping details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutDetails {
    pub name: String,
    pub email: Email,
    pub address: String,
}

impl CheckoutDetails {
    /// Validate raw form input.
    ///
    /// # Errors
    ///
    /// Returns the first validation problem found, checking name, email and
    /// address in form order.
    pub fn parse(name: &str, email: &str, address: &str) -> Result<Self, CheckoutError> {
        let name = required(name, "Name", CheckoutError::MissingName)?;
        let email = Email::parse(email)?;
        let address = required(address, "Address", CheckoutError::MissingAddress)?;

        Ok(Self {
            name,
            email,
            address,
        })
    }
}

fn required(value: &str, field: &'static str, missing: CheckoutError) -> Result<String, CheckoutError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(missing);
    }
    if value.len() > MAX_FIELD_LENGTH {
        return Err(CheckoutError::TooLong {
            field,
            max: MAX_FIELD_LENGTH,
        });
    }
    Ok(value.to_owned())
}

/// Summary of a placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderReceipt {
    pub customer: CheckoutDetails,
    pub lines: Vec<CartEntry>,
    pub item_count: u32,
    pub total: Price,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_fields() {
        let details =
            CheckoutDetails::parse("  Ada  ", " ada@example.com ", " 1 Crooked Lane ").unwrap();
        assert_eq!(details.name, "Ada");
        assert_eq!(details.email.as_str(), "ada@example.com");
        assert_eq!(details.address, "1 Crooked Lane");
    }

    #[test]
    fn test_parse_reports_first_problem() {
        assert!(matches!(
            CheckoutDetails::parse("", "bad", ""),
            Err(CheckoutError::MissingName)
        ));
        assert!(matches!(
            CheckoutDetails::parse("Ada", "bad", ""),
            Err(CheckoutError::Email(EmailError::Malformed))
        ));
        assert!(matches!(
            CheckoutDetails::parse("Ada", "ada@example.com", "  "),
            Err(CheckoutError::MissingAddress)
        ));
    }

    #[test]
    fn test_parse_rejects_long_fields() {
        let long = "x".repeat(MAX_FIELD_LENGTH + 1);
        let err = CheckoutDetails::parse(&long, "ada@example.com", "here").unwrap_err();
        assert!(matches!(err, CheckoutError::TooLong { field: "Name", .. }));
        assert!(err.is_validation());
    }

    #[test]
    fn test_validation_classification() {
        assert!(!CheckoutError::EmptyCart.is_validation());
        assert!(CheckoutError::MissingName.is_validation());
        assert_eq!(CheckoutError::EmptyCart.to_string(), "Your cart is empty!");
    }
}
