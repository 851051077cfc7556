//! Startup: resolve the machine, connect, and run the pipeline.
//!
//! # Components
//!
//! - [`config`] - Machine config, remote target and sync settings
//! - [`connect`] - SSH/SFTP session setup
//! - [`logging`] - Tracing subscriber
//!
//! # Usage
//!
//! ```ignore
//! use machine_sync::startup::{run, StartupConfig, SyncConfig};
//!
//! let startup = StartupConfig::new("dev", "/home/me/.docker/machines", "root",
//!     SyncConfig::new("/src", "/dest"));
//! let summary = run(startup).await?;
//! ```

pub mod config;
pub mod connect;
pub mod logging;

use std::path::PathBuf;

pub use config::{
    ConfigError, DriverConfig, MachineConfig, MachineStore, RemoteTarget, SyncConfig,
    DEFAULT_HOST, DEFAULT_MAX_IN_FLIGHT, DEFAULT_SSH_PORT,
};
pub use connect::{connect, ConnectError};
pub use logging::init_logging;

use tracing::{debug, info, warn};

use crate::auth::PrivateKey;
use crate::error::SyncResult;
use crate::sync::{Pipeline, PipelineSummary};

/// Everything needed to start syncing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupConfig {
    /// Machine name under the store.
    pub machine: String,
    /// Machine store directory.
    pub machine_path: PathBuf,
    /// Remote login user.
    pub user: String,
    pub sync: SyncConfig,
}

impl StartupConfig {
    pub fn new(
        machine: impl Into<String>,
        machine_path: impl Into<PathBuf>,
        user: impl Into<String>,
        sync: SyncConfig,
    ) -> Self {
        Self {
            machine: machine.into(),
            machine_path: machine_path.into(),
            user: user.into(),
            sync,
        }
    }

    pub fn store(&self) -> MachineStore {
        MachineStore::new(&self.machine_path)
    }
}

/// Resolve the machine, connect, and sync until Ctrl-C.
///
/// Every failure before the watch loop starts is fatal. Once running, only
/// a failed Ctrl-C handler or a panicked task ends the run early.
pub async fn run(startup: StartupConfig) -> SyncResult<PipelineSummary> {
    startup.sync.validate()?;

    let store = startup.store();
    let machine_config = store.load_config(&startup.machine)?;
    let target = RemoteTarget::resolve(
        &machine_config,
        &startup.user,
        &startup.sync.remote_base_path,
    )?;
    let key = PrivateKey::load(&store.key_path(&startup.machine))?;
    debug!("loaded {} key for machine {}", key.format(), startup.machine);

    let session = tokio::task::spawn_blocking(move || connect(&target, &key)).await??;

    info!(
        "machine sync: src={} dest={} machine={} config-dir={}",
        startup.sync.local_root.display(),
        startup.sync.remote_base_path,
        startup.machine,
        store.root().display()
    );

    let pipeline = Pipeline::start(&startup.sync, session)?;
    pipeline
        .run(async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                warn!("failed to listen for Ctrl-C: {}", err);
                std::future::pending::<()>().await;
            }
        })
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MachineSyncError;
    use tempfile::TempDir;

    #[test]
    fn test_startup_config_store() {
        let startup = StartupConfig::new(
            "dev",
            "/machines",
            "root",
            SyncConfig::new("/src", "/dest"),
        );
        assert_eq!(
            startup.store().key_path("dev"),
            PathBuf::from("/machines/dev/id_rsa")
        );
    }

    #[tokio::test]
    async fn test_run_fails_on_missing_machine_config() {
        let dir = TempDir::new().unwrap();
        let startup = StartupConfig::new(
            "ghost",
            dir.path(),
            "root",
            SyncConfig::new(dir.path(), "/dest"),
        );

        let err = run(startup).await.unwrap_err();
        assert!(matches!(
            err,
            MachineSyncError::Config(ConfigError::Read { .. })
        ));
    }

    #[tokio::test]
    async fn test_run_fails_on_missing_key() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("dev")).unwrap();
        std::fs::write(dir.path().join("dev").join("config.json"), "{}").unwrap();

        let startup = StartupConfig::new(
            "dev",
            dir.path(),
            "root",
            SyncConfig::new(dir.path(), "/dest"),
        );

        let err = run(startup).await.unwrap_err();
        assert!(matches!(err, MachineSyncError::Key(_)));
    }
}
