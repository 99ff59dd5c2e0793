//! Append-only allocation ledger.
//!
//! Entries record allocate and return events. They are written in the same
//! unit of work as the asset mutation they describe and are never updated or
//! deleted afterwards. Maintenance transitions are not ledger events.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{AllocationLogId, AssetId, UserId};

/// Ledger event kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationAction {
    /// Asset handed to a user.
    Allocated,
    /// Asset handed back by a user.
    Returned,
}

/// Error returned when parsing an unknown action string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown allocation action: {0}")]
pub struct ParseAllocationActionError(pub String);

impl AllocationAction {
    /// Stable storage and wire representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Allocated => "allocated",
            Self::Returned => "returned",
        }
    }
}

impl fmt::Display for AllocationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AllocationAction {
    type Err = ParseAllocationActionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "allocated" => Ok(Self::Allocated),
            "returned" => Ok(Self::Returned),
            other => Err(ParseAllocationActionError(other.to_owned())),
        }
    }
}

/// Ledger entry awaiting persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewAllocationLogEntry {
    /// Asset the event concerns.
    pub asset_id: AssetId,
    /// User receiving or returning the asset.
    pub user_id: UserId,
    /// Event kind.
    pub action: AllocationAction,
    /// Event timestamp, taken from the injected clock.
    pub at: DateTime<Utc>,
}

impl NewAllocationLogEntry {
    /// Entry for an allocation.
    #[must_use]
    pub fn allocated(asset_id: AssetId, user_id: UserId, at: DateTime<Utc>) -> Self {
        Self {
            asset_id,
            user_id,
            action: AllocationAction::Allocated,
            at,
        }
    }

    /// Entry for a return.
    #[must_use]
    pub fn returned(asset_id: AssetId, user_id: UserId, at: DateTime<Utc>) -> Self {
        Self {
            asset_id,
            user_id,
            action: AllocationAction::Returned,
            at,
        }
    }
}

/// Ledger entry projected for history queries.
///
/// Asset and user names are read at query time, so they reflect the current
/// names rather than the names at the time of the event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationHistoryEntry {
    /// Entry identifier.
    pub id: AllocationLogId,
    /// Asset the event concerns.
    pub asset_id: AssetId,
    /// Current asset name.
    pub asset_name: String,
    /// User the event concerns.
    pub user_id: UserId,
    /// Current user name.
    pub user_name: String,
    /// Event kind.
    pub action: AllocationAction,
    /// Event timestamp.
    pub at: DateTime<Utc>,
}

/// Optional filters for history queries. Both filters combine with AND.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HistoryFilter {
    /// Restrict to one asset.
    pub asset_id: Option<AssetId>,
    /// Restrict to one user.
    pub user_id: Option<UserId>,
}

impl HistoryFilter {
    /// Filter for a single asset.
    #[must_use]
    pub fn for_asset(asset_id: AssetId) -> Self {
        Self {
            asset_id: Some(asset_id),
            user_id: None,
        }
    }

    /// Filter for a single user.
    #[must_use]
    pub fn for_user(user_id: UserId) -> Self {
        Self {
            asset_id: None,
            user_id: Some(user_id),
        }
    }

    /// Whether an entry with the given keys passes the filter.
    #[must_use]
    pub fn matches(&self, asset_id: AssetId, user_id: UserId) -> bool {
        self.asset_id.is_none_or(|wanted| wanted == asset_id)
            && self.user_id.is_none_or(|wanted| wanted == user_id)
    }
}
