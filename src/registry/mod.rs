//! Service registry.
//!
//! # Data Flow
//! ```text
//! config file [registry] section
//!     → Registry (immutable snapshot)
//!     → shared via Arc<ArcSwap<Registry>>
//!     → each request captures the current Arc<Registry>
//!     → host.rs compiles addresses against registry entries
//! ```
//!
//! # Design Decisions
//! - Registry snapshots are immutable; a reload swaps the whole snapshot
//! - In-flight requests keep the snapshot they started with

pub mod host;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub use host::{CONTROLLER, Host, ServicePath};

/// The set of named upstreams this service talks to through the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Registry {
    /// Registry name as known by the gateway.
    pub name: String,

    /// Deployment environment code (e.g. "dev").
    pub environment: String,

    /// Registry entries keyed by upstream name.
    pub hosts: BTreeMap<String, Host>,
}

impl Default for Registry {
    fn default() -> Self {
        Self {
            name: "dev".to_string(),
            environment: "dev".to_string(),
            hosts: BTreeMap::new(),
        }
    }
}

impl Registry {
    /// Registry entry for `name`.
    pub fn host(&self, name: &str) -> Option<&Host> {
        self.hosts.get(name)
    }

    /// The gateway front door, if configured.
    pub fn controller(&self) -> Option<&Host> {
        self.host(CONTROLLER)
    }

    /// Compile `target` against the controller entry.
    pub fn service_path(&self, target: &ServicePath) -> Option<String> {
        self.controller().map(|host| host.path(target))
    }

    /// Add or replace an entry.
    pub fn with_host(mut self, name: impl Into<String>, host: Host) -> Self {
        self.hosts.insert(name.into(), host);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_path_uses_controller() {
        let registry = Registry::default().with_host(CONTROLLER, Host::new("gw.local", 4000));

        assert_eq!(
            registry.service_path(&ServicePath::versioned("controller", "1")),
            Some("gw.local:4000/controller/v1/".to_string())
        );
    }

    #[test]
    fn test_service_path_without_controller() {
        let registry = Registry::default().with_host("mailer", Host::new("10.0.0.1", 80));

        assert!(registry.controller().is_none());
        assert_eq!(registry.service_path(&ServicePath::named("controller")), None);
    }

    #[test]
    fn test_deserialize_from_toml() {
        let registry: Registry = toml::from_str(
            r#"
            name = "prod"
            environment = "prod"

            [hosts.controller]
            host = "192.168.1.1"
            port = 4000
            "#,
        )
        .unwrap();

        assert_eq!(registry.environment, "prod");
        assert_eq!(registry.controller(), Some(&Host::new("192.168.1.1", 4000)));
    }
}
