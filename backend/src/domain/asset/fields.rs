//! Validated asset attributes.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::ids::AssetTypeId;

/// Maximum length of an asset name, in characters.
pub const ASSET_NAME_MAX: usize = 150;
/// Maximum length of a serial number, in characters.
pub const SERIAL_NUMBER_MAX: usize = 80;
/// Maximum number of fractional digits in an asset value.
pub const ASSET_VALUE_SCALE: u32 = 2;

/// Upper bound (exclusive) for asset values: `numeric(18,2)` leaves sixteen
/// integer digits.
fn asset_value_limit() -> Decimal {
    Decimal::new(10_000_000_000_000_000, 0)
}

/// Field-level validation failures for asset attributes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssetFieldError {
    /// Name was empty after trimming.
    #[error("asset name must not be empty")]
    EmptyName,
    /// Name exceeds [`ASSET_NAME_MAX`].
    #[error("asset name must be at most {max} characters")]
    NameTooLong {
        /// Permitted maximum.
        max: usize,
    },
    /// Serial number was empty after trimming.
    #[error("serial number must not be empty")]
    EmptySerialNumber,
    /// Serial number exceeds [`SERIAL_NUMBER_MAX`].
    #[error("serial number must be at most {max} characters")]
    SerialNumberTooLong {
        /// Permitted maximum.
        max: usize,
    },
    /// Serial number contains characters other than ASCII letters and digits.
    #[error("serial number may only contain ASCII letters and digits")]
    SerialNumberInvalidCharacters,
    /// Value was below zero.
    #[error("asset value must be zero or greater")]
    NegativeValue,
    /// Value has more fractional digits than storage keeps.
    #[error("asset value must have at most {scale} decimal places")]
    ValueTooPrecise {
        /// Permitted fractional digits.
        scale: u32,
    },
    /// Value does not fit the storage column.
    #[error("asset value is too large")]
    ValueTooLarge,
}

/// Human-readable asset name, trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AssetName(String);

impl AssetName {
    /// Trim and validate a raw name.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, AssetFieldError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(AssetFieldError::EmptyName);
        }
        if trimmed.chars().count() > ASSET_NAME_MAX {
            return Err(AssetFieldError::NameTooLong {
                max: ASSET_NAME_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

/// Manufacturer serial number.
///
/// Normalisation only trims surrounding whitespace; case is preserved, so
/// `sn1` and `SN1` are different serials.
///
/// # Examples
/// ```
/// use asset_ledger::domain::SerialNumber;
///
/// let padded = SerialNumber::new(" SN1 ").expect("valid serial");
/// assert_eq!(padded, SerialNumber::new("SN1").expect("valid serial"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SerialNumber(String);

impl SerialNumber {
    /// Trim and validate a raw serial number.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, AssetFieldError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(AssetFieldError::EmptySerialNumber);
        }
        if trimmed.chars().count() > SERIAL_NUMBER_MAX {
            return Err(AssetFieldError::SerialNumberTooLong {
                max: SERIAL_NUMBER_MAX,
            });
        }
        if !trimmed.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(AssetFieldError::SerialNumberInvalidCharacters);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

macro_rules! string_field_impls {
    ($name:ident) => {
        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.0.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = AssetFieldError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

string_field_impls!(AssetName);
string_field_impls!(SerialNumber);

/// Monetary value of an asset; non-negative with cent precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct AssetValue(Decimal);

impl AssetValue {
    /// Validate a raw decimal value.
    pub fn new(value: Decimal) -> Result<Self, AssetFieldError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(AssetFieldError::NegativeValue);
        }
        if value.normalize().scale() > ASSET_VALUE_SCALE {
            return Err(AssetFieldError::ValueTooPrecise {
                scale: ASSET_VALUE_SCALE,
            });
        }
        if value >= asset_value_limit() {
            return Err(AssetFieldError::ValueTooLarge);
        }
        Ok(Self(value))
    }

    /// Underlying decimal.
    #[must_use]
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for AssetValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<Decimal> for AssetValue {
    type Error = AssetFieldError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AssetValue> for Decimal {
    fn from(value: AssetValue) -> Self {
        value.0
    }
}

/// Validated input for registering an asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAsset {
    /// Display name.
    pub name: AssetName,
    /// Unique serial number.
    pub serial_number: SerialNumber,
    /// Classification.
    pub asset_type_id: AssetTypeId,
    /// Monetary value.
    pub value: AssetValue,
}
