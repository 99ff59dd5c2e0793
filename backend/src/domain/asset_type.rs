//! Asset type reference data.
//!
//! Asset types classify assets (notebook, monitor, peripherals). Names are
//! canonicalised to uppercase so uniqueness is case-insensitive.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ids::AssetTypeId;

/// Maximum length of a normalised asset type name, in characters.
pub const ASSET_TYPE_NAME_MAX: usize = 60;

/// Validation errors for asset type names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssetTypeValidationError {
    /// Name was empty after trimming.
    #[error("asset type name must not be empty")]
    EmptyName,
    /// Name exceeds [`ASSET_TYPE_NAME_MAX`].
    #[error("asset type name must be at most {max} characters")]
    NameTooLong {
        /// Permitted maximum.
        max: usize,
    },
    /// Name contains something other than letters and single spaces.
    #[error("asset type name may only contain letters separated by single spaces")]
    InvalidCharacters,
}

/// Canonical asset type name: trimmed and uppercased.
///
/// # Examples
/// ```
/// use asset_ledger::domain::AssetTypeName;
///
/// let name = AssetTypeName::new(" periférico ").expect("valid name");
/// assert_eq!(name.as_ref(), "PERIFÉRICO");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AssetTypeName(String);

impl AssetTypeName {
    /// Normalise and validate a raw name.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, AssetTypeValidationError> {
        let normalised = raw.as_ref().trim().to_uppercase();
        if normalised.is_empty() {
            return Err(AssetTypeValidationError::EmptyName);
        }
        if normalised.chars().count() > ASSET_TYPE_NAME_MAX {
            return Err(AssetTypeValidationError::NameTooLong {
                max: ASSET_TYPE_NAME_MAX,
            });
        }
        let letters_and_spaces = normalised
            .chars()
            .all(|c| c.is_alphabetic() || c == ' ');
        if !letters_and_spaces || normalised.contains("  ") {
            return Err(AssetTypeValidationError::InvalidCharacters);
        }
        Ok(Self(normalised))
    }
}

impl AsRef<str> for AssetTypeName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for AssetTypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for AssetTypeName {
    type Error = AssetTypeValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AssetTypeName> for String {
    fn from(value: AssetTypeName) -> Self {
        value.0
    }
}

/// Persisted asset type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetType {
    id: AssetTypeId,
    name: AssetTypeName,
}

impl AssetType {
    /// Assemble an asset type from its parts.
    #[must_use]
    pub fn new(id: AssetTypeId, name: AssetTypeName) -> Self {
        Self { id, name }
    }

    /// Identifier.
    #[must_use]
    pub fn id(&self) -> AssetTypeId {
        self.id
    }

    /// Canonical name.
    #[must_use]
    pub fn name(&self) -> &AssetTypeName {
        &self.name
    }

    /// Replace the name. Uniqueness is checked by the caller.
    pub fn rename(&mut self, name: AssetTypeName) {
        self.name = name;
    }
}
