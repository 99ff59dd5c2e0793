//! Test doubles shared by unit and integration tests.
//!
//! Compiled only with the `test-support` feature. [`InMemoryInventory`]
//! implements every driven port over one mutex-guarded store and mirrors the
//! storage rules the PostgreSQL adapters rely on: unique names, emails and
//! serial numbers, restrict-on-delete references, the guarded status update
//! and newest-first history ordering.

use std::collections::BTreeMap;
use std::fmt::Display;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;
use rust_decimal::Decimal;

use crate::domain::ports::{
    AllocationLogRepository, AllocationLogRepositoryError, AssetRecord, AssetRepository,
    AssetRepositoryError, AssetTransition, AssetTypeRepository, AssetTypeRepositoryError,
    UserRepository, UserRepositoryError,
};
use crate::domain::{
    AllocationHistoryEntry, AllocationLogId, Asset, AssetId, AssetName, AssetType, AssetTypeId,
    AssetTypeName, AssetValue, EmailAddress, HistoryFilter, NewAllocationLogEntry, NewAsset,
    NewUser, SerialNumber, User, UserId, UserName,
};

const SEED_ASSET_TYPES: [&str; 4] = ["NOTEBOOK", "MONITOR", "DESKTOP", "PERIFÉRICOS"];
const SEED_USERS: [(&str, &str); 3] = [
    ("Ana", "ana@mail.com"),
    ("Luís", "luis@mail.com"),
    ("José", "jose@mail.com"),
];
/// (name, serial, type id, value in cents, in maintenance)
const SEED_ASSETS: [(&str, &str, i64, i64, bool); 6] = [
    ("MacBook Pro M3", "SN123", 1, 1_500_000, false),
    ("Acer Aspire 5", "SN456", 2, 350_000, false),
    ("Dell UltraSharp 27", "SN789", 2, 350_000, true),
    ("Dell Tower Plus Intel Core Ultra 5", "SN987", 3, 999_999, false),
    ("Mouse Logitech", "SN654", 4, 3_000, false),
    ("Multifuncional HP", "SN321", 4, 150_000, true),
];

fn seed_value<T, E: Display>(result: Result<T, E>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("invalid seed data: {err}"),
    }
}

/// Clock whose current instant tests can move forward.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    /// Start the clock at `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    /// Move the clock forward.
    pub fn advance_seconds(&self, seconds: i64) {
        *self.lock_clock() += TimeDelta::seconds(seconds);
    }

    fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Default for MutableClock {
    /// Starts at 2026-01-01T00:00:00Z.
    fn default() -> Self {
        Self::new(Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).single().unwrap_or_default())
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

#[derive(Default)]
struct Store {
    asset_types: BTreeMap<AssetTypeId, AssetType>,
    users: BTreeMap<UserId, User>,
    assets: BTreeMap<AssetId, Asset>,
    ledger: Vec<(AllocationLogId, NewAllocationLogEntry)>,
    sequences: Sequences,
}

/// Per-table identity sequences, mirroring PostgreSQL identity columns.
#[derive(Default)]
struct Sequences {
    asset_types: i64,
    users: i64,
    assets: i64,
    ledger: i64,
}

fn next_in(sequence: &mut i64) -> i64 {
    *sequence += 1;
    *sequence
}

impl Store {
    fn record(&self, asset: &Asset) -> AssetRecord {
        let asset_type_name = self
            .asset_types
            .get(&asset.asset_type_id())
            .map(|asset_type| asset_type.name().to_string())
            .unwrap_or_default();
        let assigned_user_name = asset
            .assigned_to()
            .and_then(|user_id| self.users.get(&user_id))
            .map(|user| user.name().to_string());
        AssetRecord {
            asset: asset.clone(),
            asset_type_name,
            assigned_user_name,
        }
    }

    fn sorted_records<'a>(&self, assets: impl Iterator<Item = &'a Asset>) -> Vec<AssetRecord> {
        let mut records: Vec<AssetRecord> = assets.map(|asset| self.record(asset)).collect();
        records.sort_by(|a, b| {
            a.asset
                .name()
                .as_ref()
                .cmp(b.asset.name().as_ref())
                .then(a.asset.id().cmp(&b.asset.id()))
        });
        records
    }

    fn serial_taken(&self, serial_number: &SerialNumber, except: Option<AssetId>) -> bool {
        self.assets
            .values()
            .any(|asset| asset.serial_number() == serial_number && Some(asset.id()) != except)
    }
}

/// In-memory implementation of all driven ports.
#[derive(Default)]
pub struct InMemoryInventory {
    store: Mutex<Store>,
}

impl InMemoryInventory {
    /// An empty inventory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inventory preloaded with the reference data the seed migration
    /// installs: four asset types, three users and six assets, two of them in
    /// maintenance. Ids match the migration.
    #[must_use]
    pub fn seeded() -> Self {
        let inventory = Self::new();
        {
            let mut store = inventory.lock();
            for name in SEED_ASSET_TYPES {
                let id = seed_value(AssetTypeId::new(next_in(&mut store.sequences.asset_types)));
                let name = seed_value(AssetTypeName::new(name));
                store.asset_types.insert(id, AssetType::new(id, name));
            }
            for (name, email) in SEED_USERS {
                let id = seed_value(UserId::new(next_in(&mut store.sequences.users)));
                let user = User::new(
                    id,
                    seed_value(UserName::new(name)),
                    seed_value(EmailAddress::new(email)),
                );
                store.users.insert(id, user);
            }
            for (name, serial, type_id, cents, in_maintenance) in SEED_ASSETS {
                let id = seed_value(AssetId::new(next_in(&mut store.sequences.assets)));
                let mut asset = Asset::register(
                    id,
                    NewAsset {
                        name: seed_value(AssetName::new(name)),
                        serial_number: seed_value(SerialNumber::new(serial)),
                        asset_type_id: seed_value(AssetTypeId::new(type_id)),
                        value: seed_value(AssetValue::new(Decimal::new(cents, 2))),
                    },
                );
                if in_maintenance {
                    seed_value(asset.mark_maintenance());
                }
                store.assets.insert(id, asset);
            }
        }
        inventory
    }

    fn lock(&self) -> MutexGuard<'_, Store> {
        match self.store.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("inventory mutex"),
        }
    }

    /// Number of ledger entries written so far.
    pub fn ledger_len(&self) -> usize {
        self.lock().ledger.len()
    }

    /// Overwrite an asset directly, bypassing the guarded update. Used to
    /// simulate a concurrent writer.
    pub fn overwrite_asset(&self, asset: Asset) {
        self.lock().assets.insert(asset.id(), asset);
    }
}

#[async_trait]
impl AssetTypeRepository for InMemoryInventory {
    async fn list(&self) -> Result<Vec<AssetType>, AssetTypeRepositoryError> {
        let mut types: Vec<AssetType> = self.lock().asset_types.values().cloned().collect();
        types.sort_by(|a, b| a.name().as_ref().cmp(b.name().as_ref()));
        Ok(types)
    }

    async fn find_by_id(
        &self,
        id: AssetTypeId,
    ) -> Result<Option<AssetType>, AssetTypeRepositoryError> {
        Ok(self.lock().asset_types.get(&id).cloned())
    }

    async fn find_by_name(
        &self,
        name: &AssetTypeName,
    ) -> Result<Option<AssetType>, AssetTypeRepositoryError> {
        Ok(self
            .lock()
            .asset_types
            .values()
            .find(|asset_type| asset_type.name() == name)
            .cloned())
    }

    async fn insert(&self, name: &AssetTypeName) -> Result<AssetType, AssetTypeRepositoryError> {
        let mut store = self.lock();
        if store.asset_types.values().any(|t| t.name() == name) {
            return Err(AssetTypeRepositoryError::duplicate(name.as_ref()));
        }
        let id = AssetTypeId::new(next_in(&mut store.sequences.asset_types))
            .map_err(|err| AssetTypeRepositoryError::query(err.to_string()))?;
        let asset_type = AssetType::new(id, name.clone());
        store.asset_types.insert(id, asset_type.clone());
        Ok(asset_type)
    }

    async fn rename(
        &self,
        id: AssetTypeId,
        name: &AssetTypeName,
    ) -> Result<bool, AssetTypeRepositoryError> {
        let mut store = self.lock();
        if store
            .asset_types
            .values()
            .any(|t| t.name() == name && t.id() != id)
        {
            return Err(AssetTypeRepositoryError::duplicate(name.as_ref()));
        }
        Ok(match store.asset_types.get_mut(&id) {
            Some(asset_type) => {
                asset_type.rename(name.clone());
                true
            }
            None => false,
        })
    }

    async fn delete(&self, id: AssetTypeId) -> Result<bool, AssetTypeRepositoryError> {
        let mut store = self.lock();
        if store.assets.values().any(|a| a.asset_type_id() == id) {
            return Err(AssetTypeRepositoryError::referenced(format!(
                "asset type {id} is referenced by assets"
            )));
        }
        Ok(store.asset_types.remove(&id).is_some())
    }

    async fn is_referenced(&self, id: AssetTypeId) -> Result<bool, AssetTypeRepositoryError> {
        Ok(self.lock().assets.values().any(|a| a.asset_type_id() == id))
    }
}

#[async_trait]
impl UserRepository for InMemoryInventory {
    async fn list(&self) -> Result<Vec<User>, UserRepositoryError> {
        let mut users: Vec<User> = self.lock().users.values().cloned().collect();
        users.sort_by(|a, b| {
            a.name()
                .as_ref()
                .cmp(b.name().as_ref())
                .then(a.id().cmp(&b.id()))
        });
        Ok(users)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserRepositoryError> {
        Ok(self.lock().users.get(&id).cloned())
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserRepositoryError> {
        Ok(self
            .lock()
            .users
            .values()
            .find(|user| user.email() == email)
            .cloned())
    }

    async fn insert(&self, user: &NewUser) -> Result<User, UserRepositoryError> {
        let mut store = self.lock();
        if store.users.values().any(|u| u.email() == &user.email) {
            return Err(UserRepositoryError::duplicate(user.email.as_ref()));
        }
        let id = UserId::new(next_in(&mut store.sequences.users))
            .map_err(|err| UserRepositoryError::query(err.to_string()))?;
        let created = User::new(id, user.name.clone(), user.email.clone());
        store.users.insert(id, created.clone());
        Ok(created)
    }

    async fn update(&self, user: &User) -> Result<bool, UserRepositoryError> {
        let mut store = self.lock();
        if store
            .users
            .values()
            .any(|u| u.email() == user.email() && u.id() != user.id())
        {
            return Err(UserRepositoryError::duplicate(user.email().as_ref()));
        }
        Ok(match store.users.get_mut(&user.id()) {
            Some(stored) => {
                *stored = user.clone();
                true
            }
            None => false,
        })
    }
}

#[async_trait]
impl AssetRepository for InMemoryInventory {
    async fn list(&self) -> Result<Vec<AssetRecord>, AssetRepositoryError> {
        let store = self.lock();
        Ok(store.sorted_records(store.assets.values()))
    }

    async fn list_by_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<AssetRecord>, AssetRepositoryError> {
        let store = self.lock();
        Ok(store.sorted_records(
            store
                .assets
                .values()
                .filter(|asset| asset.assigned_to() == Some(user_id)),
        ))
    }

    async fn find_by_id(&self, id: AssetId) -> Result<Option<AssetRecord>, AssetRepositoryError> {
        let store = self.lock();
        Ok(store.assets.get(&id).map(|asset| store.record(asset)))
    }

    async fn find_by_serial(
        &self,
        serial_number: &SerialNumber,
    ) -> Result<Option<AssetRecord>, AssetRepositoryError> {
        let store = self.lock();
        Ok(store
            .assets
            .values()
            .find(|asset| asset.serial_number() == serial_number)
            .map(|asset| store.record(asset)))
    }

    async fn insert(&self, asset: &NewAsset) -> Result<AssetRecord, AssetRepositoryError> {
        let mut store = self.lock();
        if store.serial_taken(&asset.serial_number, None) {
            return Err(AssetRepositoryError::duplicate(asset.serial_number.as_ref()));
        }
        if !store.asset_types.contains_key(&asset.asset_type_id) {
            return Err(AssetRepositoryError::referenced(format!(
                "asset type {} does not exist",
                asset.asset_type_id
            )));
        }
        let id = AssetId::new(next_in(&mut store.sequences.assets))
            .map_err(|err| AssetRepositoryError::query(err.to_string()))?;
        let created = Asset::register(id, asset.clone());
        let record = store.record(&created);
        store.assets.insert(id, created);
        Ok(record)
    }

    async fn update_details(&self, asset: &Asset) -> Result<bool, AssetRepositoryError> {
        let mut store = self.lock();
        if store.serial_taken(asset.serial_number(), Some(asset.id())) {
            return Err(AssetRepositoryError::duplicate(asset.serial_number().as_ref()));
        }
        if !store.asset_types.contains_key(&asset.asset_type_id()) {
            return Err(AssetRepositoryError::referenced(format!(
                "asset type {} does not exist",
                asset.asset_type_id()
            )));
        }
        Ok(match store.assets.get_mut(&asset.id()) {
            Some(stored) => {
                stored.rename(asset.name().clone());
                stored.update_serial_number(asset.serial_number().clone());
                stored.change_type(asset.asset_type_id());
                stored.revalue(asset.value());
                true
            }
            None => false,
        })
    }

    async fn apply_transition(
        &self,
        transition: &AssetTransition,
    ) -> Result<(), AssetRepositoryError> {
        let mut store = self.lock();
        let asset_id = transition.asset.id();
        let current = store
            .assets
            .get(&asset_id)
            .map(Asset::status)
            .ok_or_else(|| AssetRepositoryError::stale_state(asset_id))?;
        if current != transition.expected_status {
            return Err(AssetRepositoryError::stale_state(asset_id));
        }
        transition
            .asset
            .ensure_consistent()
            .map_err(|err| AssetRepositoryError::query(err.to_string()))?;
        if let Some(entry) = transition.ledger_entry {
            let id = AllocationLogId::new(next_in(&mut store.sequences.ledger))
                .map_err(|err| AssetRepositoryError::query(err.to_string()))?;
            store.ledger.push((id, entry));
        }
        store.assets.insert(asset_id, transition.asset.clone());
        Ok(())
    }
}

#[async_trait]
impl AllocationLogRepository for InMemoryInventory {
    async fn history(
        &self,
        filter: HistoryFilter,
    ) -> Result<Vec<AllocationHistoryEntry>, AllocationLogRepositoryError> {
        let store = self.lock();
        let mut entries: Vec<AllocationHistoryEntry> = store
            .ledger
            .iter()
            .filter(|(_, entry)| filter.matches(entry.asset_id, entry.user_id))
            .map(|(id, entry)| AllocationHistoryEntry {
                id: *id,
                asset_id: entry.asset_id,
                asset_name: store
                    .assets
                    .get(&entry.asset_id)
                    .map(|asset| asset.name().to_string())
                    .unwrap_or_default(),
                user_id: entry.user_id,
                user_name: store
                    .users
                    .get(&entry.user_id)
                    .map(|user| user.name().to_string())
                    .unwrap_or_default(),
                action: entry.action,
                at: entry.at,
            })
            .collect();
        entries.sort_by(|a, b| b.at.cmp(&a.at).then(b.id.cmp(&a.id)));
        Ok(entries)
    }
}
