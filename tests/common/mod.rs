//! Shared fixtures for integration tests.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{HeaderValue, Request};
use serde_json::{Value, json};

use gateway_context::config::ServiceConfig;
use gateway_context::context::HEADER_NAME;
use gateway_context::registry::{Host, Registry};

/// A header payload shaped like the gateway sends it.
pub fn sample_payload() -> Value {
    json!({
        "tenant": {
            "id": "5c0e74ba9acc3c5a84a51259",
            "code": "TES0",
            "locked": false,
            "key": {"iKey": "old-ikey", "eKey": "old-ekey"}
        },
        "key": {
            "iKey": "38145c67717c73d3febd16df38abf311",
            "eKey": "d44dfaaf1a3ba93adc6b3368816188f9",
            "config": {"urac": {"hashIterations": 1024}}
        },
        "application": {
            "product": "TPROD",
            "package": "TPROD_TEST",
            "appId": "30d2cb5fc04ce51e06000003",
            "acl": {"urac": {}}
        },
        "package": {
            "acl": {"dev": {"urac": {"access": false}}},
            "acl_all_env": {"dev": {"urac": {"access": true}}}
        },
        "urac": {
            "_id": "5c8d0c505653de3985aa0ffd",
            "username": "owner",
            "firstName": "owner",
            "lastName": "owner",
            "email": "me@localhost.com",
            "groups": ["owner"],
            "tenant": {"id": "5c0e74ba9acc3c5a84a51259", "code": "TES0"}
        },
        "device": {"os": "linux", "agent": "curl"},
        "geo": {"ip": "127.0.0.1"},
        "awareness": {"host": "127.0.0.1", "port": 4000, "interConnect": []}
    })
}

pub fn controller_registry() -> Registry {
    Registry::default().with_host("controller", Host::new("192.168.1.1", 4000))
}

pub fn test_config() -> ServiceConfig {
    ServiceConfig {
        registry: controller_registry(),
        ..ServiceConfig::default()
    }
}

/// GET request carrying `header` as the gateway header, if any.
pub fn request(uri: &str, header: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(value) = header {
        builder = builder.header(HEADER_NAME, HeaderValue::from_bytes(value.as_bytes()).unwrap());
    }
    builder.body(Body::empty()).unwrap()
}
