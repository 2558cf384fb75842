//! Gateway context subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound request (soajsinjectobj header)
//!     → layer.rs (read header, decode, count outcome)
//!     → payload.rs (gateway-owned wire schema)
//!     → data.rs (reshape into GatewayContext, attach registry snapshot)
//!     → request extensions
//!     → extract.rs (handlers read Option<GatewayContext>)
//! ```
//!
//! # Design Decisions
//! - The context type is the extension key; there is no string lookup
//! - Missing and malformed headers are indistinguishable downstream
//! - The gateway is trusted; nothing here authenticates or validates

pub mod data;
pub mod extract;
pub mod layer;
pub mod payload;

pub use data::{ContextTenant, GatewayContext};
pub use extract::GatewayContextExt;
pub use layer::{DecodeError, GatewayContextLayer, GatewayContextService, HEADER_NAME, decode_header};
pub use payload::HeaderPayload;
