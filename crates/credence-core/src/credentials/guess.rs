//! Best-effort credential guessing from the local environment.
//!
//! Everything found here is written at [`ProvenanceLevel::Guessed`], so the
//! guesser never has to check what is already set: the field precedence rule
//! discards guesses for anything obtained more authoritatively.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use tracing::debug;
use zeroize::Zeroize;

use super::level::ProvenanceLevel;
use super::set::{CredentialSet, KerberosUsage};
use crate::config::GuessConfig;
use crate::error::{CredentialError, Result};

/// Environment variables consulted by the guesser.
pub mod vars {
    /// Preferred username source.
    pub const USER: &str = "USER";
    /// Username fallback.
    pub const LOGNAME: &str = "LOGNAME";
    /// Literal password.
    pub const PASSWD: &str = "PASSWD";
    /// Open descriptor to read the password from.
    pub const PASSWD_FD: &str = "PASSWD_FD";
    /// File whose first line is the password.
    pub const PASSWD_FILE: &str = "PASSWD_FILE";
}

/// Where the guesser reads process state from.
///
/// [`ProcessEnvironment`] reads the real process; [`StaticEnvironment`] is a
/// fixed fixture for tests and embedding.
pub trait EnvironmentSource {
    /// Value of an environment variable, if set and valid UTF-8.
    fn var(&self, name: &str) -> Option<String>;

    /// First line readable from an open descriptor.
    fn read_descriptor_line(&self, fd: i32) -> Result<String>;

    /// First line of a file.
    fn read_file_line(&self, path: &Path) -> Result<String>;

    /// Name of the local account running this process.
    fn os_account_name(&self) -> Option<String>;

    /// Host name of this machine.
    fn hostname(&self) -> Option<String>;
}

/// Longest password line accepted from a descriptor or file, in bytes.
pub const MAX_PASSWORD_LEN: usize = 256;

/// Reads the first line from `reader`, without its line terminator.
///
/// At most [`MAX_PASSWORD_LEN`] bytes plus a terminator are consumed. A longer
/// line is rejected rather than truncated.
fn first_line(reader: impl BufRead) -> Result<String> {
    let mut line = String::new();
    // Room for the longest line plus "\r\n", and one byte to detect overflow.
    reader.take(MAX_PASSWORD_LEN as u64 + 2).read_line(&mut line)?;
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    if line.len() > MAX_PASSWORD_LEN {
        line.zeroize();
        return Err(CredentialError::PasswordTooLong(MAX_PASSWORD_LEN));
    }
    Ok(line)
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl EnvironmentSource for ProcessEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        // Allow env::var for credential discovery
        #[allow(clippy::disallowed_methods)]
        let value = std::env::var(name).ok();
        value
    }

    #[cfg(unix)]
    fn read_descriptor_line(&self, fd: i32) -> Result<String> {
        if fd < 0 {
            return Err(CredentialError::InvalidDescriptor(fd.to_string()));
        }
        let file = File::open(format!("/dev/fd/{fd}"))?;
        first_line(BufReader::new(file))
    }

    #[cfg(not(unix))]
    fn read_descriptor_line(&self, fd: i32) -> Result<String> {
        Err(CredentialError::InvalidDescriptor(format!("{fd}: descriptors are not supported on this platform")))
    }

    fn read_file_line(&self, path: &Path) -> Result<String> {
        let file = File::open(path)?;
        first_line(BufReader::new(file))
    }

    #[cfg(unix)]
    fn os_account_name(&self) -> Option<String> {
        use nix::unistd::{Uid, User};

        match User::from_uid(Uid::current()) {
            Ok(user) => user.map(|u| u.name),
            Err(e) => {
                debug!(error = %e, "Local account lookup failed");
                None
            }
        }
    }

    #[cfg(not(unix))]
    fn os_account_name(&self) -> Option<String> {
        None
    }

    #[cfg(unix)]
    fn hostname(&self) -> Option<String> {
        nix::unistd::gethostname().ok().and_then(|name| name.into_string().ok())
    }

    #[cfg(not(unix))]
    fn hostname(&self) -> Option<String> {
        self.var("COMPUTERNAME")
    }
}

/// A fixed environment.
///
/// ```
/// use credence_core::{CredentialSet, StaticEnvironment};
///
/// let env = StaticEnvironment::new().with_var("USER", "alice").with_var("PASSWD", "pw");
/// let mut creds = CredentialSet::new();
/// creds.guess(&env);
/// assert_eq!(creds.username(), "alice");
/// assert_eq!(creds.password(), Some("pw"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticEnvironment {
    vars: HashMap<String, String>,
    descriptors: HashMap<i32, String>,
    files: HashMap<PathBuf, String>,
    os_account: Option<String>,
    hostname: Option<String>,
}

impl StaticEnvironment {
    /// Creates an empty environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an environment variable.
    #[must_use]
    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    /// Makes `contents` readable from descriptor `fd`.
    #[must_use]
    pub fn with_descriptor(mut self, fd: i32, contents: impl Into<String>) -> Self {
        self.descriptors.insert(fd, contents.into());
        self
    }

    /// Makes `contents` readable at `path`.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        self.files.insert(path.into(), contents.into());
        self
    }

    /// Sets the local account name.
    #[must_use]
    pub fn with_os_account(mut self, name: impl Into<String>) -> Self {
        self.os_account = Some(name.into());
        self
    }

    /// Sets the host name.
    #[must_use]
    pub fn with_hostname(mut self, name: impl Into<String>) -> Self {
        self.hostname = Some(name.into());
        self
    }
}

impl EnvironmentSource for StaticEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }

    fn read_descriptor_line(&self, fd: i32) -> Result<String> {
        let contents = self
            .descriptors
            .get(&fd)
            .ok_or_else(|| CredentialError::InvalidDescriptor(fd.to_string()))?;
        first_line(contents.as_bytes())
    }

    fn read_file_line(&self, path: &Path) -> Result<String> {
        let contents = self.files.get(path).ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, path.display().to_string())
        })?;
        first_line(contents.as_bytes())
    }

    fn os_account_name(&self) -> Option<String> {
        self.os_account.clone()
    }

    fn hostname(&self) -> Option<String> {
        self.hostname.clone()
    }
}

/// Treats unset and empty variables alike.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Populates a [`CredentialSet`] from an [`EnvironmentSource`].
///
/// - username: `USER`, then `LOGNAME`, then the local account name
/// - password: `PASSWD`, then one line from `PASSWD_FD`, then the first line
///   of `PASSWD_FILE`; only the first source present is consulted
/// - domain, realm, workstation: from [`GuessConfig`], the workstation
///   falling back to the host name
///
/// Unreadable sources contribute nothing.
#[derive(Debug, Clone, Default)]
pub struct EnvironmentGuesser {
    config: GuessConfig,
}

impl EnvironmentGuesser {
    /// Creates a guesser using `config` for local defaults.
    #[must_use]
    pub fn new(config: GuessConfig) -> Self {
        Self { config }
    }

    /// The local defaults in use.
    #[must_use]
    pub fn config(&self) -> &GuessConfig {
        &self.config
    }

    /// Writes every value found in `env` into `target` at
    /// [`ProvenanceLevel::Guessed`].
    pub fn guess(&self, target: &mut CredentialSet, env: &dyn EnvironmentSource) {
        self.guess_username(target, env);
        Self::guess_password(target, env);
        self.guess_local_defaults(target, env);
        debug!(
            username = target.username(),
            username_level = %target.username_level(),
            password_level = %target.password_level(),
            "Guessed credentials from environment"
        );
    }

    fn os_account_allowed(&self, target: &CredentialSet) -> bool {
        !(self.config.skip_os_account_when_kerberos_required
            && target.kerberos_state() == KerberosUsage::Required)
    }

    fn guess_username(&self, target: &mut CredentialSet, env: &dyn EnvironmentSource) {
        let from_vars = non_empty(env.var(vars::USER)).or_else(|| non_empty(env.var(vars::LOGNAME)));
        let username = match from_vars {
            Some(username) => Some(username),
            None if self.os_account_allowed(target) => env.os_account_name(),
            None => {
                debug!("Kerberos required, not using the local account name");
                None
            }
        };
        if let Some(username) = username {
            target.set_username(&username, ProvenanceLevel::Guessed);
        }
    }

    fn guess_password(target: &mut CredentialSet, env: &dyn EnvironmentSource) {
        if let Some(password) = env.var(vars::PASSWD) {
            target.set_password(Some(&password), ProvenanceLevel::Guessed);
            return;
        }

        let read = if let Some(fd) = non_empty(env.var(vars::PASSWD_FD)) {
            fd.trim()
                .parse::<i32>()
                .map_err(|_| CredentialError::InvalidDescriptor(fd.clone()))
                .and_then(|fd| env.read_descriptor_line(fd))
                .map_err(|e| (vars::PASSWD_FD, e))
        } else if let Some(path) = non_empty(env.var(vars::PASSWD_FILE)) {
            env.read_file_line(Path::new(&path)).map_err(|e| (vars::PASSWD_FILE, e))
        } else {
            return;
        };

        match read {
            Ok(mut password) => {
                target.set_password(Some(&password), ProvenanceLevel::Guessed);
                password.zeroize();
            }
            Err((source, e)) => debug!(source, error = %e, "Password source unreadable, skipping"),
        }
    }

    fn guess_local_defaults(&self, target: &mut CredentialSet, env: &dyn EnvironmentSource) {
        if let Some(domain) = &self.config.domain {
            target.set_domain(domain, ProvenanceLevel::Guessed);
        }
        if let Some(realm) = &self.config.realm {
            target.set_realm(realm, ProvenanceLevel::Guessed);
        }
        let workstation = self.config.workstation.clone().or_else(|| {
            env.hostname()
                .and_then(|host| host.split('.').next().map(str::to_uppercase))
                .filter(|name| !name.is_empty())
        });
        if let Some(workstation) = workstation {
            target.set_workstation(&workstation, ProvenanceLevel::Guessed);
        }
    }
}
