//! Pre-order submission model and validation.
//!
//! The constraints here are the single source of truth for what a valid
//! submission looks like: the rendered form mirrors them as HTML constraint
//! attributes for UX, and the API handler re-validates every payload against
//! them before any mail is sent.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum length for first and last name, in characters.
const MIN_NAME_CHARS: usize = 2;
/// Minimum length for the phone number, in characters.
const MIN_PHONE_CHARS: usize = 10;
/// Minimum length for the address, in characters.
const MIN_ADDRESS_CHARS: usize = 10;

/// Where the customer intends to use the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UsageType {
    Home,
    Business,
}

impl UsageType {
    /// Parse the wire value ("home" / "business").
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "home" => Some(Self::Home),
            "business" => Some(Self::Business),
            _ => None,
        }
    }

    /// The wire value for this usage type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Business => "business",
        }
    }
}

impl fmt::Display for UsageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Number of units requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Quantity {
    #[serde(rename = "1")]
    One,
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "4")]
    Four,
    #[serde(rename = "5+")]
    FivePlus,
}

impl Quantity {
    /// All quantities in display order.
    pub const ALL: [Self; 5] = [Self::One, Self::Two, Self::Three, Self::Four, Self::FivePlus];

    /// Parse the wire value ("1" through "5+").
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "1" => Some(Self::One),
            "2" => Some(Self::Two),
            "3" => Some(Self::Three),
            "4" => Some(Self::Four),
            "5+" => Some(Self::FivePlus),
            _ => None,
        }
    }

    /// The wire value for this quantity.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::One => "1",
            Self::Two => "2",
            Self::Three => "3",
            Self::Four => "4",
            Self::FivePlus => "5+",
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single field constraint violation.
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    /// Payload field name (camelCase, as submitted).
    pub field: &'static str,
    /// Human-readable message shown next to the field.
    pub message: &'static str,
}

/// All constraint violations found in one submission.
///
/// Validation never stops at the first violation; every failing field is
/// reported so the form can mark them simultaneously.
#[derive(Debug, Error)]
#[error("{} field(s) failed validation", .0.len())]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    /// The individual field violations.
    #[must_use]
    pub fn fields(&self) -> &[FieldError] {
        &self.0
    }
}

/// Raw pre-order form payload, as posted by the client.
///
/// Every field defaults so a missing JSON key surfaces as a field-level
/// validation error instead of a deserialization rejection.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PreorderForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub usage: String,
    pub quantity: String,
    pub message: Option<String>,
}

/// A validated pre-order submission.
///
/// Exists only for the duration of one request; its sole destination is the
/// operator notification email.
#[derive(Debug, Clone)]
pub struct PreorderSubmission {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub usage: UsageType,
    pub quantity: Quantity,
    /// Normalized optional message; empty or whitespace-only input becomes `None`.
    pub message: Option<String>,
}

impl PreorderSubmission {
    /// Customer's full name for display in the notification email.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl PreorderForm {
    /// Validate the raw payload into a `PreorderSubmission`.
    ///
    /// # Errors
    ///
    /// Returns `ValidationErrors` listing every violated field, not only the
    /// first one found.
    pub fn validate(self) -> Result<PreorderSubmission, ValidationErrors> {
        let mut errors = Vec::new();

        let first_name = self.first_name.trim();
        if first_name.chars().count() < MIN_NAME_CHARS {
            errors.push(FieldError {
                field: "firstName",
                message: "First name must be at least 2 characters",
            });
        }

        let last_name = self.last_name.trim();
        if last_name.chars().count() < MIN_NAME_CHARS {
            errors.push(FieldError {
                field: "lastName",
                message: "Last name must be at least 2 characters",
            });
        }

        let email = self.email.trim().to_lowercase();
        if !is_valid_email(&email) {
            errors.push(FieldError {
                field: "email",
                message: "Please enter a valid email address",
            });
        }

        let phone = self.phone.trim();
        if phone.chars().count() < MIN_PHONE_CHARS {
            errors.push(FieldError {
                field: "phone",
                message: "Please enter a valid phone number",
            });
        }

        let address = self.address.trim();
        if address.chars().count() < MIN_ADDRESS_CHARS {
            errors.push(FieldError {
                field: "address",
                message: "Please enter your full address",
            });
        }

        let usage = UsageType::parse(self.usage.trim());
        if usage.is_none() {
            errors.push(FieldError {
                field: "usage",
                message: "Please select your usage type",
            });
        }

        let quantity = Quantity::parse(self.quantity.trim());
        if quantity.is_none() {
            errors.push(FieldError {
                field: "quantity",
                message: "Please select quantity",
            });
        }

        // Empty-after-trim messages behave identically to absent ones.
        let message = self
            .message
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(String::from);

        if let (Some(usage), Some(quantity)) = (usage, quantity) {
            if errors.is_empty() {
                return Ok(PreorderSubmission {
                    first_name: first_name.to_string(),
                    last_name: last_name.to_string(),
                    email,
                    phone: phone.to_string(),
                    address: address.to_string(),
                    usage,
                    quantity,
                    message,
                });
            }
        }

        Err(ValidationErrors(errors))
    }
}

/// Basic email validation.
fn is_valid_email(email: &str) -> bool {
    // Simple validation: contains @, has content before and after @
    let mut parts = email.splitn(2, '@');
    let Some(local) = parts.next() else {
        return false;
    };
    let Some(domain) = parts.next() else {
        return false;
    };
    !local.is_empty() && !domain.is_empty() && domain.contains('.')
}
