//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;

use crate::startup::{MachineStore, StartupConfig, SyncConfig, DEFAULT_MAX_IN_FLIGHT};

/// Invalid or missing command-line input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArgsError {
    #[error("you must specify a {0}")]
    Missing(&'static str),

    #[error("no home directory found; pass --machine-path")]
    NoHomeDirectory,
}

/// Mirror a local directory onto a docker-machine host over SFTP.
#[derive(Debug, Clone, Parser)]
#[command(name = "machine-sync", version, about)]
pub struct Args {
    /// Local directory to watch
    #[arg(short = 'd', long)]
    pub directory: Option<PathBuf>,

    /// Machine name
    #[arg(short = 'm', long)]
    pub machine: Option<String>,

    /// Machine config store [default: ~/.docker/machines]
    #[arg(short = 'c', long)]
    pub machine_path: Option<PathBuf>,

    /// Remote directory to write into
    #[arg(short = 'p', long)]
    pub destination: Option<String>,

    /// Remote user
    #[arg(short = 'u', long, default_value = "root")]
    pub user: String,

    /// Enable debug logging
    #[arg(short = 'D', long)]
    pub debug: bool,

    /// Maximum events handled at once
    #[arg(long, default_value_t = DEFAULT_MAX_IN_FLIGHT)]
    pub max_in_flight: usize,
}

impl Args {
    /// Validate the flags and build the startup configuration.
    pub fn into_startup_config(self) -> Result<StartupConfig, ArgsError> {
        let directory = self
            .directory
            .filter(|dir| !dir.as_os_str().is_empty())
            .ok_or(ArgsError::Missing("directory"))?;
        let machine = non_empty(self.machine).ok_or(ArgsError::Missing("machine"))?;
        let destination = non_empty(self.destination).ok_or(ArgsError::Missing("destination"))?;
        let user = non_empty(Some(self.user)).ok_or(ArgsError::Missing("user"))?;

        let machine_path = match self.machine_path {
            Some(path) => path,
            None => MachineStore::default_root().ok_or(ArgsError::NoHomeDirectory)?,
        };

        let sync = SyncConfig::new(directory, destination)
            .with_max_in_flight(self.max_in_flight)
            .with_verbose(self.debug);

        Ok(StartupConfig::new(machine, machine_path, user, sync))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("machine-sync").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_short_flags() {
        let args = parse(&["-d", "/src", "-m", "dev", "-c", "/machines", "-p", "/dest"]);
        let startup = args.into_startup_config().unwrap();

        assert_eq!(startup.machine, "dev");
        assert_eq!(startup.machine_path, PathBuf::from("/machines"));
        assert_eq!(startup.user, "root");
        assert_eq!(startup.sync.local_root, PathBuf::from("/src"));
        assert_eq!(startup.sync.remote_base_path, "/dest");
        assert_eq!(startup.sync.max_in_flight, DEFAULT_MAX_IN_FLIGHT);
        assert!(!startup.sync.verbose);
    }

    #[test]
    fn test_long_flags() {
        let args = parse(&[
            "--directory",
            "/src",
            "--machine",
            "dev",
            "--machine-path",
            "/machines",
            "--destination",
            "/dest",
            "--user",
            "docker",
            "--debug",
            "--max-in-flight",
            "8",
        ]);
        assert!(args.debug);

        let startup = args.into_startup_config().unwrap();
        assert_eq!(startup.user, "docker");
        assert_eq!(startup.sync.max_in_flight, 8);
        assert!(startup.sync.verbose);
    }

    #[test]
    fn test_missing_directory() {
        let args = parse(&["-m", "dev", "-p", "/dest", "-c", "/machines"]);
        assert_eq!(
            args.into_startup_config().unwrap_err(),
            ArgsError::Missing("directory")
        );
    }

    #[test]
    fn test_empty_values_are_missing() {
        let args = parse(&["-d", "/src", "-m", "", "-p", "/dest", "-c", "/machines"]);
        assert_eq!(
            args.into_startup_config().unwrap_err(),
            ArgsError::Missing("machine")
        );

        let args = parse(&["-d", "/src", "-m", "dev", "-p", " ", "-c", "/machines"]);
        assert_eq!(
            args.into_startup_config().unwrap_err(),
            ArgsError::Missing("destination")
        );

        let args = parse(&["-d", "/src", "-m", "dev", "-p", "/dest", "-u", "", "-c", "/m"]);
        assert_eq!(
            args.into_startup_config().unwrap_err(),
            ArgsError::Missing("user")
        );
    }

    #[test]
    fn test_missing_error_message() {
        assert_eq!(
            ArgsError::Missing("directory").to_string(),
            "you must specify a directory"
        );
    }

    #[test]
    fn test_unknown_flag_is_rejected() {
        assert!(Args::try_parse_from(["machine-sync", "--bogus"]).is_err());
    }
}
