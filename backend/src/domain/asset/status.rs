//! Lifecycle status of an asset.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lifecycle status.
///
/// `Available` is the initial state. `InUse` is the only state with an
/// assignee. `Irrecoverable` is reached when maintenance fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetStatus {
    /// Ready to be allocated.
    Available,
    /// Allocated to a user.
    InUse,
    /// Out of circulation for repair or inspection.
    Maintenance,
    /// Written off after failed maintenance.
    Irrecoverable,
}

/// Error returned when parsing an unknown status string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown asset status: {0}")]
pub struct ParseAssetStatusError(pub String);

impl AssetStatus {
    /// Stable storage and wire representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::InUse => "in_use",
            Self::Maintenance => "maintenance",
            Self::Irrecoverable => "irrecoverable",
        }
    }
}

impl fmt::Display for AssetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetStatus {
    type Err = ParseAssetStatusError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "available" => Ok(Self::Available),
            "in_use" => Ok(Self::InUse),
            "maintenance" => Ok(Self::Maintenance),
            "irrecoverable" => Ok(Self::Irrecoverable),
            other => Err(ParseAssetStatusError(other.to_owned())),
        }
    }
}

/// Lifecycle operation attempted on an asset, used in error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetAction {
    /// Allocate to a user.
    Allocate,
    /// Return from a user.
    Return,
    /// Send to maintenance.
    MarkMaintenance,
    /// Finish maintenance.
    CompleteMaintenance,
}

impl fmt::Display for AssetAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Allocate => "allocate",
            Self::Return => "return",
            Self::MarkMaintenance => "send to maintenance",
            Self::CompleteMaintenance => "complete maintenance on",
        })
    }
}
