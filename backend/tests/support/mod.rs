//! Shared wiring for the service-level integration suites.
#![allow(dead_code)]

use std::sync::Arc;

use asset_ledger::domain::{AssetId, AssetService, AssetTypeService, UserId, UserService};
use asset_ledger::test_support::{InMemoryInventory, MutableClock};

pub type Assets = AssetService<InMemoryInventory, InMemoryInventory, InMemoryInventory, InMemoryInventory>;
pub type AssetTypes = AssetTypeService<InMemoryInventory>;
pub type Users = UserService<InMemoryInventory, InMemoryInventory>;

/// Services sharing one in-memory inventory and one controllable clock.
pub struct Ledger {
    pub inventory: Arc<InMemoryInventory>,
    pub clock: Arc<MutableClock>,
    pub assets: Assets,
    pub asset_types: AssetTypes,
    pub users: Users,
}

impl Ledger {
    pub fn over(inventory: InMemoryInventory) -> Self {
        let inventory = Arc::new(inventory);
        let clock = Arc::new(MutableClock::default());
        let assets = AssetService::new(
            inventory.clone(),
            inventory.clone(),
            inventory.clone(),
            inventory.clone(),
            clock.clone(),
        );
        let asset_types = AssetTypeService::new(inventory.clone());
        let users = UserService::new(inventory.clone(), inventory.clone());
        Self {
            inventory,
            clock,
            assets,
            asset_types,
            users,
        }
    }

    pub fn seeded() -> Self {
        Self::over(InMemoryInventory::seeded())
    }
}

pub fn asset_id(raw: i64) -> AssetId {
    AssetId::new(raw).expect("valid asset id")
}

pub fn user_id(raw: i64) -> UserId {
    UserId::new(raw).expect("valid user id")
}
