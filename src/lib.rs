//! Gateway request context for services behind the SOAJS-style API gateway.
//!
//! The gateway authenticates callers, resolves their tenant, and injects a
//! JSON object into each proxied request. This crate decodes that object
//! into a [`GatewayContext`] stored in the request extensions, and compiles
//! addresses for calling back through the gateway.

pub mod config;
pub mod context;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod registry;

pub use config::ServiceConfig;
pub use context::{GatewayContext, GatewayContextExt, GatewayContextLayer};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use registry::{Host, Registry, ServicePath};
