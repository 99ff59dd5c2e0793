//! Asset lifecycle and allocation ledger service.
//!
//! The crate follows a hexagonal layout: [`domain`] holds entities, services
//! and ports; [`outbound`] adapts the ports to PostgreSQL; [`inbound`] exposes
//! the driving ports over HTTP.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(feature = "test-support")]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
