//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AssetCommand, AssetQuery, AssetTypeCommand, AssetTypeQuery, UserCommand, UserQuery,
};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub asset_types: Arc<dyn AssetTypeCommand>,
    pub asset_types_query: Arc<dyn AssetTypeQuery>,
    pub users: Arc<dyn UserCommand>,
    pub users_query: Arc<dyn UserQuery>,
    pub assets: Arc<dyn AssetCommand>,
    pub assets_query: Arc<dyn AssetQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub asset_types: Arc<dyn AssetTypeCommand>,
    pub asset_types_query: Arc<dyn AssetTypeQuery>,
    pub users: Arc<dyn UserCommand>,
    pub users_query: Arc<dyn UserQuery>,
    pub assets: Arc<dyn AssetCommand>,
    pub assets_query: Arc<dyn AssetQuery>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// A service implementing both halves of a port pair is usually shared:
    ///
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use asset_ledger::domain::{AssetService, AssetTypeService, UserService};
    /// use asset_ledger::inbound::http::state::{HttpState, HttpStatePorts};
    /// use asset_ledger::outbound::persistence::{
    ///     DbPool, DieselAllocationLogRepository, DieselAssetRepository,
    ///     DieselAssetTypeRepository, DieselUserRepository,
    /// };
    ///
    /// fn wire(pool: DbPool) -> HttpState {
    ///     let asset_type_repo = Arc::new(DieselAssetTypeRepository::new(pool.clone()));
    ///     let user_repo = Arc::new(DieselUserRepository::new(pool.clone()));
    ///     let ledger = Arc::new(DieselAllocationLogRepository::new(pool.clone()));
    ///     let asset_types = Arc::new(AssetTypeService::new(asset_type_repo.clone()));
    ///     let users = Arc::new(UserService::new(user_repo.clone(), ledger.clone()));
    ///     let assets = Arc::new(AssetService::new(
    ///         Arc::new(DieselAssetRepository::new(pool)),
    ///         asset_type_repo,
    ///         user_repo,
    ///         ledger,
    ///         Arc::new(mockable::DefaultClock),
    ///     ));
    ///     HttpState::new(HttpStatePorts {
    ///         asset_types: asset_types.clone(),
    ///         asset_types_query: asset_types,
    ///         users: users.clone(),
    ///         users_query: users,
    ///         assets: assets.clone(),
    ///         assets_query: assets,
    ///     })
    /// }
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            asset_types,
            asset_types_query,
            users,
            users_query,
            assets,
            assets_query,
        } = ports;
        Self {
            asset_types,
            asset_types_query,
            users,
            users_query,
            assets,
            assets_query,
        }
    }
}
