//! Error types for credential resolution.
//!
//! The resolution engine itself never fails: precedence conflicts are reported
//! through `bool` returns and unreadable guess sources contribute nothing.
//! These errors cover the collaborators around it (configuration files,
//! descriptor and file reads, option parsing).
//!
//! SECURITY: Error messages MUST NOT contain passwords.

use thiserror::Error;

/// Credential-related errors.
#[derive(Error, Debug)]
pub enum CredentialError {
    /// Configuration file not found.
    #[error("Configuration file not found: {0}")]
    ConfigNotFound(String),

    /// Configuration file could not be read or written.
    #[error("Failed to read configuration file: {0}")]
    ConfigRead(String),

    /// Configuration file is not valid TOML for this schema.
    #[error("Failed to parse configuration file: {0}")]
    ConfigParse(String),

    /// `PASSWD_FD` did not name a usable descriptor.
    #[error("Invalid password descriptor: {0}")]
    InvalidDescriptor(String),

    /// A password line read from a descriptor or file was too long.
    #[error("Password line exceeds {0} bytes")]
    PasswordTooLong(usize),

    /// Unknown Kerberos usage keyword.
    #[error("Invalid Kerberos state: {0}")]
    InvalidKerberosState(String),

    /// I/O error occurred while reading a guess source.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for credential operations.
pub type Result<T> = std::result::Result<T, CredentialError>;
