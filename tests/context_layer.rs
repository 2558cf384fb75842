//! Behaviour of the context layer around an arbitrary downstream service.

use std::convert::Infallible;
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{Request, Response};
use serde_json::json;
use tower::{Layer, ServiceExt, service_fn};

use gateway_context::context::{GatewayContext, GatewayContextExt, GatewayContextLayer};

mod common;

/// What the downstream service saw.
#[derive(Default)]
struct Seen {
    calls: usize,
    context: Option<GatewayContext>,
    uri: String,
    header: Option<String>,
}

async fn run(header: Option<&str>) -> Seen {
    let seen = Arc::new(Mutex::new(Seen::default()));
    let sink = seen.clone();

    let downstream = service_fn(move |req: Request<Body>| {
        let sink = sink.clone();
        async move {
            let mut seen = sink.lock().unwrap();
            seen.calls += 1;
            seen.context = req.gateway_context().cloned();
            seen.uri = req.uri().to_string();
            seen.header = req
                .headers()
                .get("soajsinjectobj")
                .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned());
            Ok::<_, Infallible>(Response::new(Body::empty()))
        }
    });

    let svc = GatewayContextLayer::with_registry(common::controller_registry()).layer(downstream);
    svc.oneshot(common::request("/orders?page=2", header)).await.unwrap();

    Arc::try_unwrap(seen).ok().unwrap().into_inner().unwrap()
}

#[tokio::test]
async fn test_missing_header_passes_through() {
    let seen = run(None).await;

    assert_eq!(seen.calls, 1);
    assert!(seen.context.is_none());
    assert_eq!(seen.uri, "/orders?page=2");
    assert!(seen.header.is_none());
}

#[tokio::test]
async fn test_empty_header_passes_through() {
    let seen = run(Some("")).await;

    assert_eq!(seen.calls, 1);
    assert!(seen.context.is_none());
}

#[tokio::test]
async fn test_malformed_header_looks_like_missing() {
    for raw in ["{", "not json", "[true]", "\"a string\"", "{\"tenant\": 5}"] {
        let seen = run(Some(raw)).await;

        assert_eq!(seen.calls, 1, "downstream must run for {raw:?}");
        assert!(seen.context.is_none(), "no context for {raw:?}");
        assert_eq!(seen.header.as_deref(), Some(raw), "request left untouched");
        assert_eq!(seen.uri, "/orders?page=2");
    }
}

#[tokio::test]
async fn test_null_header_passes_through() {
    let seen = run(Some("null")).await;
    assert_eq!(seen.calls, 1);
    assert!(seen.context.is_none());
}

#[tokio::test]
async fn test_valid_header_attaches_context() {
    let payload = common::sample_payload();
    let seen = run(Some(&payload.to_string())).await;

    assert_eq!(seen.calls, 1);
    let ctx = seen.context.expect("context attached");

    assert_eq!(ctx.tenant.id, "5c0e74ba9acc3c5a84a51259");
    assert_eq!(ctx.tenant.code, "TES0");
    assert_eq!(ctx.i_key(), payload["key"]["iKey"]);
    assert_eq!(ctx.e_key(), payload["key"]["eKey"]);
    assert_eq!(ctx.services_config, payload["key"]["config"]);

    let app = &ctx.tenant.application;
    assert_eq!(app.product, "TPROD");
    assert_eq!(app.package_acl, payload["package"]["acl"]);
    assert_eq!(app.package_acl_all_env, payload["package"]["acl_all_env"]);

    assert_eq!(ctx.device, payload["device"]);
    assert_eq!(ctx.geo, payload["geo"]);
    assert_eq!(ctx.awareness.port, 4000);
    assert_eq!(
        serde_json::to_value(ctx.urac.as_ref().unwrap()).unwrap()["email"],
        json!("me@localhost.com")
    );
}

#[tokio::test]
async fn test_context_carries_registry() {
    let seen = run(Some("{}")).await;
    let ctx = seen.context.expect("empty object still yields a context");

    assert_eq!(
        ctx.service_path(&gateway_context::ServicePath::versioned("controller", "1")),
        Some("192.168.1.1:4000/controller/v1/".to_string())
    );
}

#[tokio::test]
async fn test_non_ascii_header_attaches_context() {
    let mut payload = common::sample_payload();
    payload["urac"]["firstName"] = json!("José");
    payload["tenant"]["code"] = json!("ÉCOLE");

    let seen = run(Some(&payload.to_string())).await;
    let ctx = seen.context.expect("UTF-8 payload yields a context");

    assert_eq!(ctx.tenant.code, "ÉCOLE");
    assert_eq!(ctx.urac.unwrap().first_name, "José");
}

#[tokio::test]
async fn test_null_fields_still_attach_context() {
    let seen = run(Some(
        r#"{"tenant":{"id":"t1","locked":null},"awareness":{"interConnect":null}}"#,
    ))
    .await;
    let ctx = seen.context.expect("nulls read as defaults");

    assert_eq!(ctx.tenant.id, "t1");
    assert!(!ctx.tenant.locked);
    assert!(ctx.awareness.inter_connect.is_empty());
}
