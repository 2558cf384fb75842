//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! context layer, server, config reload
//!     → logging.rs (structured log events)
//!     → metrics.rs (outcome counters)
//!
//! Consumers:
//!     → stdout (fmt or JSON)
//!     → Prometheus scrape endpoint (optional)
//! ```

pub mod logging;
pub mod metrics;
