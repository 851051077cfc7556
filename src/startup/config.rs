//! Startup configuration types.
//!
//! Machines are described the way docker-machine stores them: one directory
//! per machine under a common store, holding a `config.json` with the
//! driver's address and SSH port, and the `id_rsa` key used to log in.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Host used when the machine config carries no address.
pub const DEFAULT_HOST: &str = "127.0.0.1";
/// SSH port used when the machine config carries none.
pub const DEFAULT_SSH_PORT: u16 = 22;
/// Default cap on concurrently running handling units.
pub const DEFAULT_MAX_IN_FLIGHT: usize = 64;

const CONFIG_FILE: &str = "config.json";
const KEY_FILE: &str = "id_rsa";

/// Configuration errors. All fatal.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read machine config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse machine config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("remote {0} must not be empty")]
    EmptyField(&'static str),

    #[error("max in-flight must be at least 1")]
    NoConcurrency,
}

/// Driver section of a machine's `config.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverConfig {
    #[serde(rename = "IPAddress", default)]
    pub ip_address: String,
    #[serde(rename = "SSHPort", default)]
    pub ssh_port: u16,
}

/// A machine's `config.json`. Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineConfig {
    #[serde(rename = "Driver", default)]
    pub driver: DriverConfig,
}

impl MachineConfig {
    /// Load `config.json` from a machine directory.
    pub fn load(machine_dir: &Path) -> Result<Self, ConfigError> {
        let path = machine_dir.join(CONFIG_FILE);
        let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse { path, source })
    }

    /// Address to connect to, falling back to [`DEFAULT_HOST`].
    pub fn host(&self) -> &str {
        if self.driver.ip_address.is_empty() {
            DEFAULT_HOST
        } else {
            &self.driver.ip_address
        }
    }

    /// SSH port, falling back to [`DEFAULT_SSH_PORT`] when unset or zero.
    pub fn ssh_port(&self) -> u16 {
        if self.driver.ssh_port == 0 {
            DEFAULT_SSH_PORT
        } else {
            self.driver.ssh_port
        }
    }
}

/// Directory holding one subdirectory per machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineStore {
    root: PathBuf,
}

impl MachineStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `~/.docker/machines`, if a home directory can be found.
    pub fn default_root() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".docker").join("machines"))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn machine_dir(&self, machine: &str) -> PathBuf {
        self.root.join(machine)
    }

    pub fn key_path(&self, machine: &str) -> PathBuf {
        self.machine_dir(machine).join(KEY_FILE)
    }

    pub fn load_config(&self, machine: &str) -> Result<MachineConfig, ConfigError> {
        MachineConfig::load(&self.machine_dir(machine))
    }
}

/// Where to connect and where to write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteTarget {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub remote_base_path: String,
}

impl RemoteTarget {
    /// Resolve from a machine config plus the user and destination given on
    /// the command line. Host, user and base path must all be non-empty.
    pub fn resolve(
        config: &MachineConfig,
        user: &str,
        remote_base_path: &str,
    ) -> Result<Self, ConfigError> {
        let target = Self {
            host: config.host().to_string(),
            port: config.ssh_port(),
            user: user.to_string(),
            remote_base_path: remote_base_path.to_string(),
        };
        target.validate()?;
        Ok(target)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::EmptyField("host"));
        }
        if self.user.trim().is_empty() {
            return Err(ConfigError::EmptyField("user"));
        }
        if self.remote_base_path.trim().is_empty() {
            return Err(ConfigError::EmptyField("destination"));
        }
        Ok(())
    }

    /// `host:port`, with IPv6 literals bracketed.
    pub fn address(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

/// Runtime settings for the sync pipeline.
///
/// # Example
///
/// ```ignore
/// use machine_sync::startup::SyncConfig;
///
/// let config = SyncConfig::new("/src", "/dest")
///     .with_max_in_flight(8)
///     .with_verbose(true);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    /// Local directory being watched.
    pub local_root: PathBuf,
    /// Remote directory mirrored into.
    pub remote_base_path: String,
    /// Cap on handling units doing work at once (default: 64).
    pub max_in_flight: usize,
    /// Log failure details.
    pub verbose: bool,
}

impl SyncConfig {
    pub fn new(local_root: impl Into<PathBuf>, remote_base_path: impl Into<String>) -> Self {
        Self {
            local_root: local_root.into(),
            remote_base_path: remote_base_path.into(),
            max_in_flight: DEFAULT_MAX_IN_FLIGHT,
            verbose: false,
        }
    }

    pub fn with_local_root(mut self, local_root: impl Into<PathBuf>) -> Self {
        self.local_root = local_root.into();
        self
    }

    pub fn with_max_in_flight(mut self, max_in_flight: usize) -> Self {
        self.max_in_flight = max_in_flight;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.remote_base_path.trim().is_empty() {
            return Err(ConfigError::EmptyField("destination"));
        }
        if self.max_in_flight == 0 {
            return Err(ConfigError::NoConcurrency);
        }
        Ok(())
    }
}
