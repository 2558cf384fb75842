//! Service-facing request context.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::context::payload::{Application, Awareness, HeaderPayload, TenantKey, Urac};
use crate::registry::{Registry, ServicePath};

/// Gateway context attached to a request.
///
/// Stored in the request extensions; the type itself is the lookup key, so
/// there is exactly one slot per request and no string key to collide on.
#[derive(Debug, Clone, Serialize)]
pub struct GatewayContext {
    pub tenant: ContextTenant,
    pub urac: Option<Urac>,
    pub services_config: Value,
    pub device: Value,
    pub geo: Value,
    pub awareness: Awareness,
    #[serde(skip)]
    pub registry: Arc<Registry>,
}

/// Tenant block of the context.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ContextTenant {
    pub id: String,
    pub code: String,
    pub locked: bool,
    pub key: TenantKey,
    pub application: Application,
}

impl GatewayContext {
    /// Reshape a decoded payload.
    ///
    /// Access keys come from the payload's key group, the application
    /// descriptor from its application group with the package ACLs lifted
    /// onto it.
    pub fn from_payload(payload: HeaderPayload, registry: Arc<Registry>) -> Self {
        let HeaderPayload {
            tenant,
            key,
            application,
            package,
            urac,
            device,
            geo,
            awareness,
        } = payload;

        let application = Application {
            package_acl: package.acl,
            package_acl_all_env: package.acl_all_env,
            ..application
        };

        Self {
            tenant: ContextTenant {
                id: tenant.id,
                code: tenant.code,
                locked: tenant.locked,
                key: TenantKey {
                    i_key: key.i_key,
                    e_key: key.e_key,
                },
                application,
            },
            urac,
            services_config: key.config,
            device,
            geo,
            awareness,
            registry,
        }
    }

    /// Compile `target` against the registry's controller entry.
    pub fn service_path(&self, target: &ServicePath) -> Option<String> {
        self.registry.service_path(target)
    }

    /// Internal tenant key.
    pub fn i_key(&self) -> &str {
        &self.tenant.key.i_key
    }

    /// External tenant key.
    pub fn e_key(&self) -> &str {
        &self.tenant.key.e_key
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Host;
    use serde_json::json;

    fn payload() -> HeaderPayload {
        serde_json::from_value(json!({
            "tenant": {
                "id": "t1",
                "code": "TES1",
                "locked": true,
                "key": {"iKey": "stale", "eKey": "stale"},
                "application": {"product": "ignored"}
            },
            "key": {"iKey": "ik", "eKey": "ek", "config": {"svc": {"limit": 5}}},
            "application": {"product": "PROD", "package": "PROD_BASIC", "appId": "a1", "acl": {"x": 1}},
            "package": {"acl": {"svc": {"access": true}}, "acl_all_env": {"dev": {}}},
            "urac": {"_id": "u1", "username": "ada", "groups": ["owner"]},
            "device": "Mozilla/5.0",
            "geo": {"ip": "10.0.0.9"},
            "awareness": {"host": "gw", "port": 4000}
        }))
        .unwrap()
    }

    fn registry() -> Arc<Registry> {
        Arc::new(Registry::default().with_host("controller", Host::new("gw", 4000)))
    }

    #[test]
    fn test_keys_come_from_key_group() {
        let ctx = GatewayContext::from_payload(payload(), registry());
        assert_eq!(ctx.i_key(), "ik");
        assert_eq!(ctx.e_key(), "ek");
        assert_eq!(ctx.services_config, json!({"svc": {"limit": 5}}));
    }

    #[test]
    fn test_application_replaced_and_package_acl_lifted() {
        let ctx = GatewayContext::from_payload(payload(), registry());
        let app = &ctx.tenant.application;

        assert_eq!(app.product, "PROD");
        assert_eq!(app.package, "PROD_BASIC");
        assert_eq!(app.app_id, "a1");
        assert_eq!(app.acl, json!({"x": 1}));
        assert_eq!(app.package_acl, json!({"svc": {"access": true}}));
        assert_eq!(app.package_acl_all_env, json!({"dev": {}}));
    }

    #[test]
    fn test_blocks_copied_verbatim() {
        let source = payload();
        let ctx = GatewayContext::from_payload(source.clone(), registry());

        assert_eq!(ctx.tenant.id, "t1");
        assert_eq!(ctx.tenant.code, "TES1");
        assert!(ctx.tenant.locked);
        assert_eq!(ctx.urac, source.urac);
        assert_eq!(ctx.device, source.device);
        assert_eq!(ctx.geo, source.geo);
        assert_eq!(ctx.awareness, source.awareness);
    }

    #[test]
    fn test_registry_back_reference() {
        let registry = registry();
        let ctx = GatewayContext::from_payload(payload(), registry.clone());

        assert!(Arc::ptr_eq(&ctx.registry, &registry));
        assert_eq!(
            ctx.service_path(&ServicePath::versioned("controller", "2")),
            Some("gw:4000/controller/v2/".to_string())
        );
    }

    #[test]
    fn test_serialized_without_registry() {
        let ctx = GatewayContext::from_payload(payload(), registry());
        let value = serde_json::to_value(&ctx).unwrap();

        assert!(value.get("registry").is_none());
        assert_eq!(value["tenant"]["key"]["iKey"], "ik");
    }
}
