//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;

pub mod allocation_history;
pub mod asset_types;
pub mod assets;
pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::ApiResult;

/// Build the `/api/v1` scope with every inventory endpoint.
///
/// Extractor failures (malformed JSON or query strings) are reported with
/// the standard error envelope. Handlers read
/// [`state::HttpState`] from application data, which the caller registers.
pub fn api_scope() -> actix_web::Scope {
    web::scope("/api/v1")
        .app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(error::query_error_handler))
        .service(asset_types::list_asset_types)
        .service(asset_types::get_asset_type)
        .service(asset_types::create_asset_type)
        .service(asset_types::update_asset_type)
        .service(asset_types::delete_asset_type)
        .service(users::list_users)
        .service(users::get_user)
        .service(users::create_user)
        .service(users::update_user)
        .service(users::list_user_assets)
        .service(users::user_allocation_history)
        .service(assets::list_assets)
        .service(assets::get_asset_by_serial)
        .service(assets::get_asset)
        .service(assets::create_asset)
        .service(assets::update_asset)
        .service(assets::allocate_asset)
        .service(assets::return_asset)
        .service(assets::mark_asset_maintenance)
        .service(assets::complete_asset_maintenance)
        .service(assets::asset_history)
        .service(allocation_history::list_allocation_history)
}
