//! Header adapter middleware.
//!
//! # Responsibilities
//! - Read the gateway header from each inbound request
//! - Decode it and reshape it into a [`GatewayContext`]
//! - Store the context in the request extensions
//! - Always call the inner service exactly once
//!
//! # Design Decisions
//! - Fail open: a malformed header looks exactly like a missing one to the
//!   inner service, so the service stays reachable without the gateway
//! - Synchronous: the inner future is returned untouched
//! - Decode failures are logged at debug and counted, never surfaced

use std::sync::Arc;
use std::task::{Context, Poll};

use arc_swap::ArcSwap;
use axum::http::{HeaderMap, Request};
use tower::{Layer, Service};

use crate::context::data::GatewayContext;
use crate::context::payload::HeaderPayload;
use crate::observability::metrics;
use crate::registry::Registry;

/// Header the gateway injects into each proxied request.
pub const HEADER_NAME: &str = "soajsinjectobj";

/// A present header that could not be decoded.
///
/// serde_json reports the reason, invalid UTF-8 included.
#[derive(Debug, thiserror::Error)]
#[error("unable to parse gateway header: {0}")]
pub struct DecodeError(#[from] serde_json::Error);

/// Outcome of adapting one request, used for logging and metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Attached,
    Absent,
    Malformed,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Attached => "attached",
            Outcome::Absent => "absent",
            Outcome::Malformed => "malformed",
        }
    }
}

/// Decode the gateway header.
///
/// Returns `Ok(None)` when the header is missing, empty, or JSON `null`.
pub fn decode_header(headers: &HeaderMap) -> Result<Option<HeaderPayload>, DecodeError> {
    let raw = match headers.get(HEADER_NAME) {
        Some(value) if !value.is_empty() => value,
        _ => return Ok(None),
    };

    // Header values may carry any UTF-8, not only visible ASCII.
    Ok(serde_json::from_slice::<Option<HeaderPayload>>(raw.as_bytes())?)
}

/// Attach a [`GatewayContext`] to `req` if it carries a usable header.
pub fn adapt<B>(req: &mut Request<B>, registry: &ArcSwap<Registry>) -> Outcome {
    match decode_header(req.headers()) {
        Ok(Some(payload)) => {
            let ctx = GatewayContext::from_payload(payload, registry.load_full());
            tracing::trace!(
                tenant = %ctx.tenant.code,
                product = %ctx.tenant.application.product,
                gateway = ?ctx.awareness.host(),
                "Gateway context attached"
            );
            req.extensions_mut().insert(ctx);
            Outcome::Attached
        }
        Ok(None) => Outcome::Absent,
        Err(e) => {
            tracing::debug!(error = %e, "Ignoring malformed gateway header");
            Outcome::Malformed
        }
    }
}

/// Layer that installs [`GatewayContextService`].
#[derive(Debug, Clone)]
pub struct GatewayContextLayer {
    registry: Arc<ArcSwap<Registry>>,
}

impl GatewayContextLayer {
    /// Create a layer that reads the registry through a swappable handle.
    pub fn new(registry: Arc<ArcSwap<Registry>>) -> Self {
        Self { registry }
    }

    /// Create a layer over a fixed registry.
    pub fn with_registry(registry: Registry) -> Self {
        Self::new(Arc::new(ArcSwap::from_pointee(registry)))
    }
}

impl<S> Layer<S> for GatewayContextLayer {
    type Service = GatewayContextService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        GatewayContextService {
            inner,
            registry: self.registry.clone(),
        }
    }
}

/// Middleware service adapting the gateway header.
#[derive(Debug, Clone)]
pub struct GatewayContextService<S> {
    inner: S,
    registry: Arc<ArcSwap<Registry>>,
}

impl<S, B> Service<Request<B>> for GatewayContextService<S>
where
    S: Service<Request<B>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<B>) -> Self::Future {
        let outcome = adapt(&mut req, &self.registry);
        metrics::record_outcome(outcome);
        self.inner.call(req)
    }
}
