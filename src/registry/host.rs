//! Service address compilation.
//!
//! # Responsibilities
//! - Represent a registry entry (host + port of a named upstream)
//! - Turn a logical service name/version into the address to call
//!
//! # Design Decisions
//! - Only the literal service `controller` receives path segments; every
//!   other service is resolved through the gateway's own discovery, so the
//!   compiled address stays at the host:port root
//! - Bad input degrades to a shorter address, never an error
//! - Version text is appended verbatim once it parses as an integer

use serde::{Deserialize, Serialize};

/// Name of the gateway front door service.
pub const CONTROLLER: &str = "controller";

/// A registry entry: where a named upstream listens.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Host {
    /// Host name or IP address.
    pub host: String,

    /// TCP port.
    pub port: u16,
}

impl Host {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Compile the address a caller should use to reach `target`.
    ///
    /// ```
    /// use gateway_context::registry::{Host, ServicePath};
    ///
    /// let host = Host::new("192.168.1.1", 4000);
    /// assert_eq!(
    ///     host.path(&ServicePath::versioned("controller", "1")),
    ///     "192.168.1.1:4000/controller/v1/"
    /// );
    /// assert_eq!(host.path(&ServicePath::named("mailer")), "192.168.1.1:4000/");
    /// ```
    pub fn path(&self, target: &ServicePath) -> String {
        let mut out = format!("{}:{}/", self.host, self.port);

        if target.name.eq_ignore_ascii_case(CONTROLLER) {
            out.push_str(&target.name);
            out.push('/');

            if let Some(version) = target.numeric_version() {
                out.push('v');
                out.push_str(version);
                out.push('/');
            }
        }

        out
    }

    /// Compile from positional arguments, see [`ServicePath::from_args`].
    pub fn path_from_args(&self, args: &[&str]) -> String {
        self.path(&ServicePath::from_args(args))
    }
}

/// Target of a service path compilation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServicePath {
    pub name: String,
    pub version: Option<String>,
    /// Legacy third slot. Accepted, never rendered.
    pub reserved: Option<String>,
}

impl ServicePath {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn versioned(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: Some(version.into()),
            reserved: None,
        }
    }

    /// Build from positional arguments.
    ///
    /// One argument is the name, two add the version, three add the
    /// reserved slot. Any other count yields an empty target, which
    /// compiles to the bare host root.
    pub fn from_args(args: &[&str]) -> Self {
        match *args {
            [name] => Self::named(name),
            [name, version] => Self::versioned(name, version),
            [name, version, reserved] => Self {
                name: name.to_string(),
                version: Some(version.to_string()),
                reserved: Some(reserved.to_string()),
            },
            _ => Self::default(),
        }
    }

    /// The version text, if it is a base-10 integer.
    fn numeric_version(&self) -> Option<&str> {
        self.version
            .as_deref()
            .filter(|v| v.parse::<i64>().is_ok())
    }
}
