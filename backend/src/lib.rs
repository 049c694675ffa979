//! Daily diet backend library.
//!
//! Layout follows ports and adapters: [`domain`] holds entities, services
//! and port traits; [`inbound`] adapts HTTP onto the driving ports;
//! [`outbound`] implements the driven ports with Diesel.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
