//! Asset entity and its lifecycle state machine.
//!
//! ```text
//! Available --allocate--> InUse --return--> Available
//! Available | Maintenance | Irrecoverable --mark maintenance--> Maintenance
//! Maintenance --complete(operational)--> Available
//! Maintenance --complete(failed)--> Irrecoverable
//! ```
//!
//! Every transition re-checks the structural invariant
//! `status == InUse <=> assignment is present` before returning, so a broken
//! transition surfaces as [`AssetError::Inconsistent`] instead of being
//! persisted.

mod fields;
mod status;

use chrono::{DateTime, Utc};
use serde::Serialize;

pub use fields::{
    ASSET_NAME_MAX, ASSET_VALUE_SCALE, AssetFieldError, AssetName, AssetValue, NewAsset,
    SERIAL_NUMBER_MAX, SerialNumber,
};
pub use status::{AssetAction, AssetStatus, ParseAssetStatusError};

use super::ids::{AssetId, AssetTypeId, UserId};

/// Errors raised by asset transitions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssetError {
    /// A field failed validation.
    #[error(transparent)]
    InvalidArgument(#[from] AssetFieldError),
    /// The transition is not allowed from the current status.
    #[error("cannot {action} asset {asset_id} while it is {status}")]
    InvalidState {
        /// Asset being transitioned.
        asset_id: AssetId,
        /// Status at the time of the attempt.
        status: AssetStatus,
        /// Attempted operation.
        action: AssetAction,
    },
    /// The asset already carries an assignee.
    #[error("asset {asset_id} is already assigned to user {user_id}")]
    AlreadyAssigned {
        /// Asset being allocated.
        asset_id: AssetId,
        /// Current assignee.
        user_id: UserId,
    },
    /// Status and assignment disagree; indicates a programming or data error.
    #[error("asset {asset_id} is inconsistent: {detail}")]
    Inconsistent {
        /// Offending asset.
        asset_id: AssetId,
        /// Description of the violation.
        detail: &'static str,
    },
}

/// Current holder of an in-use asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    /// User holding the asset.
    pub user_id: UserId,
    /// Moment of allocation.
    pub assigned_at: DateTime<Utc>,
}

/// Raw persisted columns used to rebuild an [`Asset`].
#[derive(Debug, Clone)]
pub struct AssetParts {
    /// Identifier.
    pub id: AssetId,
    /// Display name.
    pub name: AssetName,
    /// Serial number.
    pub serial_number: SerialNumber,
    /// Classification.
    pub asset_type_id: AssetTypeId,
    /// Monetary value.
    pub value: AssetValue,
    /// Stored status.
    pub status: AssetStatus,
    /// Stored assignee column.
    pub assigned_to_user_id: Option<UserId>,
    /// Stored assignment timestamp column.
    pub assigned_at: Option<DateTime<Utc>>,
}

/// Physical asset tracked by the ledger.
///
/// ## Invariants
/// - `status == InUse` if and only if `assignment` is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    id: AssetId,
    name: AssetName,
    serial_number: SerialNumber,
    asset_type_id: AssetTypeId,
    value: AssetValue,
    status: AssetStatus,
    assignment: Option<Assignment>,
}

impl Asset {
    /// A freshly registered asset: `Available` and unassigned.
    #[must_use]
    pub fn register(id: AssetId, new_asset: NewAsset) -> Self {
        let NewAsset {
            name,
            serial_number,
            asset_type_id,
            value,
        } = new_asset;
        Self {
            id,
            name,
            serial_number,
            asset_type_id,
            value,
            status: AssetStatus::Available,
            assignment: None,
        }
    }

    /// Rebuild an asset from stored columns, rejecting inconsistent rows.
    pub fn restore(parts: AssetParts) -> Result<Self, AssetError> {
        let AssetParts {
            id,
            name,
            serial_number,
            asset_type_id,
            value,
            status,
            assigned_to_user_id,
            assigned_at,
        } = parts;
        let assignment = match (assigned_to_user_id, assigned_at) {
            (Some(user_id), Some(assigned_at)) => Some(Assignment {
                user_id,
                assigned_at,
            }),
            (None, None) => None,
            _ => {
                return Err(AssetError::Inconsistent {
                    asset_id: id,
                    detail: "assignment columns must be set together",
                });
            }
        };
        let asset = Self {
            id,
            name,
            serial_number,
            asset_type_id,
            value,
            status,
            assignment,
        };
        asset.ensure_consistent()?;
        Ok(asset)
    }

    /// Identifier.
    #[must_use]
    pub fn id(&self) -> AssetId {
        self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &AssetName {
        &self.name
    }

    /// Serial number.
    #[must_use]
    pub fn serial_number(&self) -> &SerialNumber {
        &self.serial_number
    }

    /// Classification.
    #[must_use]
    pub fn asset_type_id(&self) -> AssetTypeId {
        self.asset_type_id
    }

    /// Monetary value.
    #[must_use]
    pub fn value(&self) -> AssetValue {
        self.value
    }

    /// Lifecycle status.
    #[must_use]
    pub fn status(&self) -> AssetStatus {
        self.status
    }

    /// Current assignment, present only while in use.
    #[must_use]
    pub fn assignment(&self) -> Option<Assignment> {
        self.assignment
    }

    /// Assignee, if any.
    #[must_use]
    pub fn assigned_to(&self) -> Option<UserId> {
        self.assignment.map(|assignment| assignment.user_id)
    }

    /// Replace the display name.
    pub fn rename(&mut self, name: AssetName) {
        self.name = name;
    }

    /// Replace the serial number. Uniqueness is checked by the caller.
    pub fn update_serial_number(&mut self, serial_number: SerialNumber) {
        self.serial_number = serial_number;
    }

    /// Reclassify the asset.
    pub fn change_type(&mut self, asset_type_id: AssetTypeId) {
        self.asset_type_id = asset_type_id;
    }

    /// Replace the monetary value.
    pub fn revalue(&mut self, value: AssetValue) {
        self.value = value;
    }

    /// Allocate an available asset to `user_id` at `at`.
    ///
    /// # Errors
    /// [`AssetError::InvalidState`] unless the asset is `Available`;
    /// [`AssetError::AlreadyAssigned`] if an assignee is somehow present.
    pub fn allocate_to(&mut self, user_id: UserId, at: DateTime<Utc>) -> Result<(), AssetError> {
        self.require_status(AssetStatus::Available, AssetAction::Allocate)?;
        if let Some(current) = self.assignment {
            return Err(AssetError::AlreadyAssigned {
                asset_id: self.id,
                user_id: current.user_id,
            });
        }
        self.assignment = Some(Assignment {
            user_id,
            assigned_at: at,
        });
        self.status = AssetStatus::InUse;
        self.ensure_consistent()
    }

    /// Return an in-use asset, yielding the assignment that was cleared.
    ///
    /// # Errors
    /// [`AssetError::InvalidState`] unless the asset is `InUse`;
    /// [`AssetError::Inconsistent`] if it is `InUse` without an assignee.
    pub fn release(&mut self) -> Result<Assignment, AssetError> {
        self.require_status(AssetStatus::InUse, AssetAction::Return)?;
        let previous = self.assignment.take().ok_or(AssetError::Inconsistent {
            asset_id: self.id,
            detail: "in use without an assignee",
        })?;
        self.status = AssetStatus::Available;
        self.ensure_consistent()?;
        Ok(previous)
    }

    /// Take the asset out of circulation.
    ///
    /// # Errors
    /// [`AssetError::InvalidState`] while the asset is `InUse`; it must be
    /// returned first.
    pub fn mark_maintenance(&mut self) -> Result<(), AssetError> {
        if self.status == AssetStatus::InUse {
            return Err(self.invalid_state(AssetAction::MarkMaintenance));
        }
        self.assignment = None;
        self.status = AssetStatus::Maintenance;
        self.ensure_consistent()
    }

    /// Finish maintenance: operational assets become `Available`, failed
    /// ones `Irrecoverable`.
    ///
    /// # Errors
    /// [`AssetError::InvalidState`] unless the asset is in `Maintenance`.
    pub fn complete_maintenance(&mut self, is_operational: bool) -> Result<(), AssetError> {
        self.require_status(AssetStatus::Maintenance, AssetAction::CompleteMaintenance)?;
        self.assignment = None;
        self.status = if is_operational {
            AssetStatus::Available
        } else {
            AssetStatus::Irrecoverable
        };
        self.ensure_consistent()
    }

    /// Check the status/assignment invariant.
    ///
    /// # Errors
    /// [`AssetError::Inconsistent`] when the invariant does not hold.
    pub fn ensure_consistent(&self) -> Result<(), AssetError> {
        match (self.status == AssetStatus::InUse, self.assignment.is_some()) {
            (true, false) => Err(AssetError::Inconsistent {
                asset_id: self.id,
                detail: "in use without an assignee",
            }),
            (false, true) => Err(AssetError::Inconsistent {
                asset_id: self.id,
                detail: "assignee present while not in use",
            }),
            _ => Ok(()),
        }
    }

    fn require_status(&self, expected: AssetStatus, action: AssetAction) -> Result<(), AssetError> {
        if self.status == expected {
            Ok(())
        } else {
            Err(self.invalid_state(action))
        }
    }

    fn invalid_state(&self, action: AssetAction) -> AssetError {
        AssetError::InvalidState {
            asset_id: self.id,
            status: self.status,
            action,
        }
    }
}
