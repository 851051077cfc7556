//! Error category classification for unified error handling.
//!
//! This module provides a high-level categorization of errors to enable
//! consistent logging and user messaging.

use std::fmt;

/// High-level categorization of errors for handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Transport could not be established (unreachable host, handshake).
    Network,

    /// Key loading or public key authentication problems.
    Auth,

    /// A remote file operation was rejected by the server.
    Remote,

    /// User action required (missing or invalid command-line input).
    User,

    /// Local system errors (filesystem, permissions, watcher).
    System,

    /// Machine configuration missing or invalid.
    Configuration,
}

impl ErrorCategory {
    /// Returns a short label for the category suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Auth => "auth",
            ErrorCategory::Remote => "remote",
            ErrorCategory::User => "user",
            ErrorCategory::System => "system",
            ErrorCategory::Configuration => "configuration",
        }
    }

    /// Returns a user-friendly description of the category.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "Network connectivity issue",
            ErrorCategory::Auth => "Authentication problem",
            ErrorCategory::Remote => "Remote file operation failed",
            ErrorCategory::User => "User action required",
            ErrorCategory::System => "System error",
            ErrorCategory::Configuration => "Configuration problem",
        }
    }

    /// Returns suggested recovery actions for this category.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "Check that the machine is running and reachable",
            ErrorCategory::Auth => "Check the machine's id_rsa key and the connecting user",
            ErrorCategory::Remote => {
                "Check that the destination directory exists on the machine and is writable"
            }
            ErrorCategory::User => "Run with --help to see the required flags",
            ErrorCategory::System => "Check local file permissions",
            ErrorCategory::Configuration => "Check the machine's config.json",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_as_str() {
        assert_eq!(ErrorCategory::Network.as_str(), "network");
        assert_eq!(ErrorCategory::Auth.as_str(), "auth");
        assert_eq!(ErrorCategory::Remote.as_str(), "remote");
        assert_eq!(ErrorCategory::User.as_str(), "user");
        assert_eq!(ErrorCategory::System.as_str(), "system");
        assert_eq!(ErrorCategory::Configuration.as_str(), "configuration");
    }

    #[test]
    fn test_category_display() {
        assert_eq!(format!("{}", ErrorCategory::Network), "network");
        assert_eq!(format!("{}", ErrorCategory::Auth), "auth");
    }

    #[test]
    fn test_category_description() {
        assert!(ErrorCategory::Network.description().contains("Network"));
        assert!(ErrorCategory::Auth.description().contains("Authentication"));
        assert!(ErrorCategory::Remote.description().contains("Remote"));
    }

    #[test]
    fn test_category_recovery_hint() {
        assert!(ErrorCategory::Network.recovery_hint().contains("reachable"));
        assert!(ErrorCategory::Auth.recovery_hint().contains("id_rsa"));
        assert!(ErrorCategory::User.recovery_hint().contains("--help"));
    }

    #[test]
    fn test_category_hash() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(ErrorCategory::Network);
        set.insert(ErrorCategory::Auth);
        set.insert(ErrorCategory::Network); // Duplicate

        assert_eq!(set.len(), 2);
        assert!(set.contains(&ErrorCategory::Network));
        assert!(set.contains(&ErrorCategory::Auth));
    }
}
