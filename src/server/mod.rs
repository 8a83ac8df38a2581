//! Server module for building the product inventory HTTP server
//!
//! `ServerBuilder` wires a product store into a `ServerHost`, and
//! `RestExposure` turns the host into an axum `Router` with:
//! - the health check at `/`
//! - CRUD and balance routes under `/products`
//! - permissive CORS and request tracing

pub mod builder;
pub mod exposure;
pub mod host;
pub mod router;

pub use builder::ServerBuilder;
pub use exposure::RestExposure;
pub use host::ServerHost;
pub use router::build_product_routes;
