//! Registry hot reload.
//!
//! # Design Decisions
//! - Watches the config file's directory, not the file, so editors and
//!   deploy tools that replace the file by rename are still seen
//! - Only the registry is forwarded, and only when it actually changed
//! - A file that fails to load is logged and skipped; the last good
//!   registry stays in effect

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::load_config;
use crate::registry::Registry;

/// Watches the configuration file and emits changed registries.
pub struct RegistryWatcher {
    path: PathBuf,
    current: Registry,
    update_tx: mpsc::UnboundedSender<Registry>,
}

impl RegistryWatcher {
    /// `current` is the registry already in effect; reloads equal to it are
    /// not forwarded.
    pub fn new(path: &Path, current: Registry) -> (Self, mpsc::UnboundedReceiver<Registry>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: path.to_path_buf(),
                current,
                update_tx,
            },
            update_rx,
        )
    }

    /// Start watching. The returned watcher must be kept alive.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let file_name = self.path.file_name().map(OsStr::to_os_string);

        let path = self.path.clone();
        let tx = self.update_tx;
        let mut last = self.current;

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) if touches(&event, file_name.as_deref()) => match load_config(&path) {
                    Ok(config) if config.registry != last => {
                        tracing::info!(
                            registry = %config.registry.name,
                            hosts = config.registry.hosts.len(),
                            "Registry change detected"
                        );
                        last = config.registry.clone();
                        let _ = tx.send(config.registry);
                    }
                    Ok(_) => tracing::debug!("Config changed, registry unchanged"),
                    Err(e) => tracing::warn!(
                        error = %e,
                        "Failed to reload config. Keeping current registry."
                    ),
                },
                Ok(_) => {}
                Err(e) => tracing::error!(error = ?e, "Watch error"),
            },
            Config::default(),
        )?;

        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, "Registry watcher started");
        Ok(watcher)
    }
}

/// Whether `event` creates or modifies the watched file.
fn touches(event: &Event, file_name: Option<&OsStr>) -> bool {
    (event.kind.is_create() || event.kind.is_modify())
        && file_name.is_some()
        && event.paths.iter().any(|p| p.file_name() == file_name)
}
