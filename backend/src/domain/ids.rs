//! Surrogate identifiers for inventory entities.
//!
//! Identifiers are database-assigned positive integers. Wrapping them in
//! distinct types keeps an asset id from being passed where a user id is
//! expected.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Raised when an identifier is zero or negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{entity} id must be a positive integer, got {value}")]
pub struct InvalidEntityId {
    /// Entity kind the identifier was meant for.
    pub entity: &'static str,
    /// Rejected raw value.
    pub value: i64,
}

macro_rules! define_entity_id {
    ($(#[$meta:meta])* $name:ident, $entity:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "i64", into = "i64")]
        pub struct $name(i64);

        impl $name {
            /// Validate and wrap a raw identifier.
            pub fn new(value: i64) -> Result<Self, InvalidEntityId> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(InvalidEntityId {
                        entity: $entity,
                        value,
                    })
                }
            }

            /// Raw integer value.
            #[must_use]
            pub fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i64> for $name {
            type Error = InvalidEntityId;

            fn try_from(value: i64) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i64 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

define_entity_id!(
    /// Identifier of an asset type.
    AssetTypeId,
    "asset type"
);
define_entity_id!(
    /// Identifier of a user.
    UserId,
    "user"
);
define_entity_id!(
    /// Identifier of an asset.
    AssetId,
    "asset"
);
define_entity_id!(
    /// Identifier of an allocation ledger entry.
    AllocationLogId,
    "allocation log"
);

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0)]
    #[case(-4)]
    fn rejects_non_positive_values(#[case] raw: i64) {
        let err = AssetId::new(raw).expect_err("non-positive ids are rejected");
        assert_eq!(err.entity, "asset");
        assert_eq!(err.value, raw);
    }

    #[rstest]
    fn accepts_positive_values() {
        let id = UserId::new(42).expect("positive id");
        assert_eq!(id.get(), 42);
        assert_eq!(id.to_string(), "42");
    }

    #[rstest]
    fn deserialising_validates() {
        assert!(serde_json::from_str::<AssetTypeId>("0").is_err());
        let id: AssetTypeId = serde_json::from_str("9").expect("valid id");
        assert_eq!(id.get(), 9);
    }
}
