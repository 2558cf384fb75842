//! Reading the context back out of a request.

use std::convert::Infallible;

use axum::extract::OptionalFromRequestParts;
use axum::http::{Extensions, Request, request::Parts};

use crate::context::data::GatewayContext;

/// Access to the [`GatewayContext`] stored by the adapter.
///
/// `None` means the request did not come through the gateway (or the
/// header was unusable). Callers must treat that as a normal case.
pub trait GatewayContextExt {
    fn gateway_context(&self) -> Option<&GatewayContext>;
}

impl GatewayContextExt for Extensions {
    fn gateway_context(&self) -> Option<&GatewayContext> {
        self.get::<GatewayContext>()
    }
}

impl GatewayContextExt for Parts {
    fn gateway_context(&self) -> Option<&GatewayContext> {
        self.extensions.gateway_context()
    }
}

impl<B> GatewayContextExt for Request<B> {
    fn gateway_context(&self) -> Option<&GatewayContext> {
        self.extensions().gateway_context()
    }
}

/// Lets handlers take `Option<GatewayContext>` directly.
impl<S> OptionalFromRequestParts<S> for GatewayContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(parts.gateway_context().cloned())
    }
}
