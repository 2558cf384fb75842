//! Inbound header payload.
//!
//! The schema is owned by the gateway. Every group defaults when missing and
//! unknown fields are ignored so newer gateways keep decoding. Blocks this
//! service never inspects (ACLs, configuration, device, geo) stay as raw
//! JSON values. A `null` anywhere a typed field is expected reads as that
//! field's default rather than failing the whole header.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::registry::Host;

/// Deserialize `T`, treating JSON `null` as `T::default()`.
fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Object injected by the gateway into each proxied request.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct HeaderPayload {
    #[serde(deserialize_with = "or_default")]
    pub tenant: Tenant,
    #[serde(deserialize_with = "or_default")]
    pub key: Key,
    #[serde(deserialize_with = "or_default")]
    pub application: Application,
    #[serde(deserialize_with = "or_default")]
    pub package: Package,
    pub urac: Option<Urac>,
    pub device: Value,
    pub geo: Value,
    #[serde(deserialize_with = "or_default")]
    pub awareness: Awareness,
}

/// Tenant the caller belongs to.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Tenant {
    #[serde(deserialize_with = "or_default")]
    pub id: String,
    #[serde(deserialize_with = "or_default")]
    pub code: String,
    #[serde(deserialize_with = "or_default")]
    pub locked: bool,
    #[serde(deserialize_with = "or_default")]
    pub key: TenantKey,
    #[serde(deserialize_with = "or_default")]
    pub application: Application,
}

/// Tenant access keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TenantKey {
    #[serde(rename = "iKey", deserialize_with = "or_default")]
    pub i_key: String,
    #[serde(rename = "eKey", deserialize_with = "or_default")]
    pub e_key: String,
}

/// Key group of the payload: access keys plus per-tenant service config.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Key {
    #[serde(rename = "iKey", deserialize_with = "or_default")]
    pub i_key: String,
    #[serde(rename = "eKey", deserialize_with = "or_default")]
    pub e_key: String,
    pub config: Value,
}

/// Application descriptor.
///
/// The two `package_acl*` fields are not sent inside the application group;
/// they are lifted from [`Package`] when the request context is built.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Application {
    #[serde(deserialize_with = "or_default")]
    pub product: String,
    #[serde(deserialize_with = "or_default")]
    pub package: String,
    #[serde(rename = "appId", deserialize_with = "or_default")]
    pub app_id: String,
    pub acl: Value,
    pub acl_all_env: Value,
    pub package_acl: Value,
    pub package_acl_all_env: Value,
}

/// Package access-control lists.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Package {
    pub acl: Value,
    pub acl_all_env: Value,
}

/// Authenticated user record.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Urac {
    #[serde(rename = "_id", deserialize_with = "or_default")]
    pub id: String,
    #[serde(deserialize_with = "or_default")]
    pub username: String,
    #[serde(rename = "firstName", deserialize_with = "or_default")]
    pub first_name: String,
    #[serde(rename = "lastName", deserialize_with = "or_default")]
    pub last_name: String,
    #[serde(deserialize_with = "or_default")]
    pub email: String,
    #[serde(deserialize_with = "or_default")]
    pub groups: Vec<String>,
    #[serde(rename = "socialLogin")]
    pub social_login: Value,
    #[serde(deserialize_with = "or_default")]
    pub tenant: UracTenant,
    pub profile: Value,
    #[serde(rename = "ACL")]
    pub acl: Value,
    #[serde(rename = "ACL_AllEnv")]
    pub acl_all_env: Value,
    pub config: Value,
}

/// Tenant the user record was issued under.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct UracTenant {
    #[serde(deserialize_with = "or_default")]
    pub id: String,
    #[serde(deserialize_with = "or_default")]
    pub code: String,
}

/// Gateway topology as seen by the gateway for this request.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Awareness {
    #[serde(deserialize_with = "or_default")]
    pub host: String,
    #[serde(deserialize_with = "or_default")]
    pub port: i64,
    #[serde(rename = "interConnect", deserialize_with = "or_default")]
    pub inter_connect: Vec<Value>,
}

impl Awareness {
    /// Gateway front door reported by the gateway itself.
    ///
    /// `None` unless the host is set and the port is a usable TCP port.
    pub fn host(&self) -> Option<Host> {
        let port = u16::try_from(self.port).ok().filter(|p| *p != 0)?;
        if self.host.is_empty() {
            return None;
        }
        Some(Host::new(self.host.clone(), port))
    }
}
