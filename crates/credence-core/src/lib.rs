//! Credence Core - provenance-aware credential resolution.
//!
//! This crate resolves the identity a client presents to a remote service
//! (domain, username, password, realm, principal, workstation, Kerberos
//! usage) from several sources while keeping the more authoritative value
//! whenever two sources disagree:
//! - Compact credential strings (`user%pass`, `user@realm`, `%`)
//! - Environment guessing (`USER`, `LOGNAME`, `PASSWD`, `PASSWD_FD`, `PASSWD_FILE`)
//! - Password callbacks such as interactive prompts
//! - Explicit setters
//!
//! The authentication exchange itself is not part of this crate.

pub mod config;
pub mod credentials;
pub mod error;

pub use config::GuessConfig;
pub use credentials::{
    Assignment, CredentialSet, CredentialSummary, EnvironmentGuesser, EnvironmentSource, Field,
    FieldSummary, KerberosUsage, PasswordCallback, ProcessEnvironment, ProvenanceLevel,
    StaticEnvironment,
};
pub use error::{CredentialError, Result};
