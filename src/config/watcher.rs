//! Configuration file watcher for hot reload.
//!
//! # Responsibilities
//! - Watch the configuration file for writes
//! - Collapse the burst of events a single save produces into one reload
//! - Skip saves that leave the file content unchanged
//! - Forward only configurations that load and validate
//!
//! # Design Decisions
//! - The notify callback only pings; loading happens on a dedicated thread
//! - The last applied content is remembered, never the last attempted one

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc as std_mpsc;
use std::thread;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::config::loader::{parse_config, ConfigError};
use crate::config::schema::ResolverConfig;

/// Quiet period after the last event before a reload is attempted.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(250);

/// A watcher that monitors the configuration file for changes.
pub struct ConfigWatcher {
    path: PathBuf,
    debounce: Duration,
    update_tx: mpsc::UnboundedSender<ResolverConfig>,
}

impl ConfigWatcher {
    /// Create a new ConfigWatcher.
    ///
    /// Returns the watcher and a receiver for validated configuration updates.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<ResolverConfig>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: path.to_path_buf(),
                debounce: DEFAULT_DEBOUNCE,
                update_tx,
            },
            update_rx,
        )
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Start watching the file. The returned watcher must be kept alive;
    /// dropping it stops the reload thread.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let (ping_tx, ping_rx) = std_mpsc::channel::<()>();
        let watched = self.path.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) if is_relevant(&event, &watched) => {
                    let _ = ping_tx.send(());
                }
                Ok(_) => {}
                Err(e) => tracing::error!(error = ?e, "Watch error"),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;
        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;

        let mut last_applied = fs::read_to_string(&self.path).ok();
        let path = self.path.clone();
        let debounce = self.debounce;
        let tx = self.update_tx;

        thread::Builder::new()
            .name("config-reload".to_string())
            .spawn(move || {
                // Ends once the watcher, and with it the ping sender, is dropped.
                while ping_rx.recv().is_ok() {
                    let mut coalesced = 1usize;
                    while ping_rx.recv_timeout(debounce).is_ok() {
                        coalesced += 1;
                    }

                    match reload_if_changed(&path, &mut last_applied) {
                        None => tracing::debug!(
                            path = %path.display(),
                            events = coalesced,
                            "Config file unchanged, skipping reload"
                        ),
                        Some(Ok(config)) => {
                            tracing::info!(
                                path = %path.display(),
                                events = coalesced,
                                "Config file changed, reloading"
                            );
                            if tx.send(config).is_err() {
                                break;
                            }
                        }
                        Some(Err(e)) => tracing::error!(
                            path = %path.display(),
                            error = %e,
                            "Failed to reload config, keeping current configuration"
                        ),
                    }
                }
                tracing::debug!("Config reload thread stopped");
            })
            .map_err(notify::Error::io)?;

        tracing::info!(
            path = %self.path.display(),
            debounce_ms = debounce.as_millis() as u64,
            "Config watcher started"
        );
        Ok(watcher)
    }
}

/// True for writes or creations touching the watched file.
pub fn is_relevant(event: &Event, path: &Path) -> bool {
    if !(event.kind.is_modify() || event.kind.is_create()) {
        return false;
    }
    // Some backends report events without paths.
    event.paths.is_empty()
        || event
            .paths
            .iter()
            .any(|p| p.file_name().is_some() && p.file_name() == path.file_name())
}

/// Load `path` if its content differs from `last_applied`.
///
/// Returns None when nothing changed. `last_applied` is only updated when
/// the new content loads and validates.
pub fn reload_if_changed(
    path: &Path,
    last_applied: &mut Option<String>,
) -> Option<Result<ResolverConfig, ConfigError>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => return Some(Err(ConfigError::Io(e))),
    };
    if last_applied.as_deref() == Some(content.as_str()) {
        return None;
    }

    let result = parse_config(&content);
    if result.is_ok() {
        *last_applied = Some(content);
    }
    Some(result)
}
