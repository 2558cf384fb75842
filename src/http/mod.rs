//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → context layer (attach GatewayContext when the gateway sent one)
//!     → handlers.rs (health, context echo, service paths)
//! ```

pub mod handlers;
pub mod server;

pub use server::{AppState, HttpServer, build_router};
