//! Builders wiring repositories and services into handler state.

use std::sync::Arc;

use actix_web::web;
use async_trait::async_trait;
use mockable::Clock;

use asset_ledger::domain::ports::{
    AllocationLogRepository, AssetRepository, AssetTypeRepository, UserRepository,
};
use asset_ledger::domain::{AssetService, AssetTypeService, UserService};
use asset_ledger::inbound::http::health::DependencyProbe;
use asset_ledger::inbound::http::state::{HttpState, HttpStatePorts};
use asset_ledger::outbound::persistence::{
    DbPool, DieselAllocationLogRepository, DieselAssetRepository, DieselAssetTypeRepository,
    DieselUserRepository,
};

/// Driven adapters the services are built from.
pub(crate) struct Repositories<A, T, U, L> {
    pub(crate) assets: Arc<A>,
    pub(crate) asset_types: Arc<T>,
    pub(crate) users: Arc<U>,
    pub(crate) ledger: Arc<L>,
}

impl
    Repositories<
        DieselAssetRepository,
        DieselAssetTypeRepository,
        DieselUserRepository,
        DieselAllocationLogRepository,
    >
{
    fn diesel(pool: &DbPool) -> Self {
        Self {
            assets: Arc::new(DieselAssetRepository::new(pool.clone())),
            asset_types: Arc::new(DieselAssetTypeRepository::new(pool.clone())),
            users: Arc::new(DieselUserRepository::new(pool.clone())),
            ledger: Arc::new(DieselAllocationLogRepository::new(pool.clone())),
        }
    }
}

/// Build handler state from any set of repositories.
pub(crate) fn build_http_state_with<A, T, U, L>(
    repos: Repositories<A, T, U, L>,
    clock: Arc<dyn Clock>,
) -> HttpState
where
    A: AssetRepository + 'static,
    T: AssetTypeRepository + 'static,
    U: UserRepository + 'static,
    L: AllocationLogRepository + 'static,
{
    let Repositories {
        assets,
        asset_types,
        users,
        ledger,
    } = repos;
    let asset_type_service = Arc::new(AssetTypeService::new(asset_types.clone()));
    let user_service = Arc::new(UserService::new(users.clone(), ledger.clone()));
    let asset_service = Arc::new(AssetService::new(assets, asset_types, users, ledger, clock));

    HttpState::new(HttpStatePorts {
        asset_types: asset_type_service.clone(),
        asset_types_query: asset_type_service,
        users: user_service.clone(),
        users_query: user_service,
        assets: asset_service.clone(),
        assets_query: asset_service,
    })
}

/// Build the shared HTTP state backed by PostgreSQL.
pub(super) fn build_http_state(pool: &DbPool) -> web::Data<HttpState> {
    web::Data::new(build_http_state_with(
        Repositories::diesel(pool),
        Arc::new(mockable::DefaultClock),
    ))
}

/// Readiness probe that checks out a pooled connection and runs `SELECT 1`.
pub(super) struct DbPoolProbe {
    pool: DbPool,
}

impl DbPoolProbe {
    pub(super) fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DependencyProbe for DbPoolProbe {
    async fn check(&self) -> Result<(), String> {
        self.pool
            .ping()
            .await
            .map_err(|err| err.message().to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use asset_ledger::domain::ports::{AssetTypeCommand, AssetTypeQuery, UserCommand, UserQuery};
    use asset_ledger::domain::{AssetTypeName, EmailAddress, NewUser, UserName};
    use asset_ledger::test_support::{InMemoryInventory, MutableClock};
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn state_shares_one_inventory_across_services() {
        let inventory = Arc::new(InMemoryInventory::default());
        let state = build_http_state_with(
            Repositories {
                assets: inventory.clone(),
                asset_types: inventory.clone(),
                users: inventory.clone(),
                ledger: inventory,
            },
            Arc::new(MutableClock::default()),
        );

        state
            .asset_types
            .create(AssetTypeName::new("notebook").expect("name"))
            .await
            .expect("create type");
        state
            .users
            .create(NewUser {
                name: UserName::new("Ana").expect("name"),
                email: EmailAddress::new("ana@mail.com").expect("email"),
            })
            .await
            .expect("create user");

        let types = state.asset_types_query.list().await.expect("list types");
        let users = state.users_query.list().await.expect("list users");
        assert_eq!(types.len(), 1);
        assert_eq!(users.len(), 1);
    }
}
