//! The credential set: one provenance-tagged field per identity attribute.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;
use zeroize::Zeroize;

use super::field::Field;
use super::guess::{EnvironmentGuesser, EnvironmentSource};
use super::level::ProvenanceLevel;
use super::normalize;
use super::parse;
use crate::config::GuessConfig;
use crate::error::{CredentialError, Result};

/// Placeholder shown instead of a password in summaries and debug output.
const REDACTED: &str = "********";

/// Whether Kerberos should be used for authentication.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KerberosUsage {
    /// Never use Kerberos.
    Disabled,
    /// Use Kerberos when available.
    #[default]
    Desired,
    /// Only Kerberos is acceptable.
    Required,
}

impl KerberosUsage {
    /// Returns the canonical keyword for this usage.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Disabled => "disabled",
            Self::Desired => "desired",
            Self::Required => "required",
        }
    }

    /// Parses a usage keyword (case-insensitive).
    ///
    /// Accepts the canonical names plus `no`/`off`, `auto` and `yes`/`on`.
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "disabled" | "no" | "off" => Ok(Self::Disabled),
            "desired" | "auto" => Ok(Self::Desired),
            "required" | "yes" | "on" => Ok(Self::Required),
            _ => Err(CredentialError::InvalidKerberosState(s.to_string())),
        }
    }
}

impl fmt::Display for KerberosUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Supplies a password on demand, e.g. by prompting the user.
///
/// Implemented for any `Fn(&CredentialSet) -> Option<String>`. Returning
/// `None` records "no password".
pub trait PasswordCallback: Send + Sync {
    /// Produces the password for `credentials`.
    fn obtain_password(&self, credentials: &CredentialSet) -> Option<String>;
}

impl<F> PasswordCallback for F
where
    F: Fn(&CredentialSet) -> Option<String> + Send + Sync,
{
    fn obtain_password(&self, credentials: &CredentialSet) -> Option<String> {
        self(credentials)
    }
}

/// Identity material used to authenticate a client to a remote service.
///
/// Every write goes through the field's precedence check: a value obtained at
/// a lower [`ProvenanceLevel`] never replaces one obtained at a higher level.
/// Getters never fail; unset text fields read as `""` and an unset password
/// reads as `None`.
///
/// A set is populated and consumed by one authentication attempt. Clone it to
/// reuse it elsewhere.
///
/// # Examples
///
/// ```
/// use credence_core::{CredentialSet, ProvenanceLevel};
///
/// let mut creds = CredentialSet::anonymous();
/// creds.parse_string("somebody%secret", ProvenanceLevel::Specified);
/// assert_eq!(creds.username(), "somebody");
/// assert_eq!(creds.password(), Some("secret"));
///
/// creds.parse_string("prin@styx", ProvenanceLevel::Specified);
/// assert_eq!(creds.realm(), "STYX");
/// assert_eq!(creds.principal().as_deref(), Some("prin@styx"));
/// ```
#[derive(Clone, Default)]
pub struct CredentialSet {
    domain: Field<String>,
    username: Field<String>,
    password: Field<Option<String>>,
    realm: Field<String>,
    principal: Field<String>,
    workstation: Field<String>,
    kerberos_state: Field<KerberosUsage>,
    password_callback: Option<Arc<dyn PasswordCallback>>,
}

impl CredentialSet {
    /// Creates a set with every field unset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an anonymous set: empty domain, username and realm, no
    /// password and no principal, all specified so that guessing cannot
    /// replace them.
    #[must_use]
    pub fn anonymous() -> Self {
        let mut creds = Self::new();
        creds.set_anonymous(ProvenanceLevel::Specified);
        creds
    }

    /// Marks the set anonymous at `level`.
    ///
    /// Any explicit principal and realm are blanked too, so a previously
    /// parsed `user@realm` does not survive. Returns `true` only if every
    /// part of the write was applied.
    pub fn set_anonymous(&mut self, level: ProvenanceLevel) -> bool {
        let domain = self.set_domain("", level);
        let username = self.set_username("", level);
        let password = self.set_password(None, level);
        let realm = self.set_realm("", level);
        let principal = self.set_principal("", level);
        domain && username && password && realm && principal
    }

    /// Domain (workgroup), upper-cased. `""` when unset.
    #[must_use]
    pub fn domain(&self) -> &str {
        self.domain.get().map_or("", String::as_str)
    }

    /// Sets the domain, stored upper-cased.
    pub fn set_domain(&mut self, domain: &str, level: ProvenanceLevel) -> bool {
        self.domain.set_named("domain", normalize::canonical_name(domain), level)
    }

    /// Level the domain was obtained at.
    #[must_use]
    pub fn domain_level(&self) -> ProvenanceLevel {
        self.domain.level()
    }

    /// Username. `""` when unset.
    #[must_use]
    pub fn username(&self) -> &str {
        self.username.get().map_or("", String::as_str)
    }

    /// Sets the username.
    pub fn set_username(&mut self, username: &str, level: ProvenanceLevel) -> bool {
        self.username.set_named("username", username.to_string(), level)
    }

    /// Level the username was obtained at.
    #[must_use]
    pub fn username_level(&self) -> ProvenanceLevel {
        self.username.level()
    }

    /// Password, or `None` when unset or explicitly absent.
    ///
    /// A pending password callback is not invoked here; see
    /// [`CredentialSet::resolve_password`].
    #[must_use]
    pub fn password(&self) -> Option<&str> {
        self.password.get().and_then(Option::as_deref)
    }

    /// Sets the password. `None` records "no password", which is distinct
    /// from both an empty password and a password that was never set.
    pub fn set_password(&mut self, password: Option<&str>, level: ProvenanceLevel) -> bool {
        self.store_password(password.map(str::to_string), level)
    }

    /// Writes the password slot, wiping the buffer it replaces.
    fn store_password(&mut self, password: Option<String>, level: ProvenanceLevel) -> bool {
        if self.password.accepts(level) {
            self.wipe_password();
        }
        self.password.set_named("password", password, level)
    }

    fn wipe_password(&mut self) {
        if let Some(Some(password)) = self.password.get_mut() {
            password.zeroize();
        }
    }

    /// Level the password was obtained at.
    #[must_use]
    pub fn password_level(&self) -> ProvenanceLevel {
        self.password.level()
    }

    /// Kerberos realm, upper-cased. `""` when unset.
    #[must_use]
    pub fn realm(&self) -> &str {
        self.realm.get().map_or("", String::as_str)
    }

    /// Sets the realm, stored upper-cased.
    pub fn set_realm(&mut self, realm: &str, level: ProvenanceLevel) -> bool {
        self.realm.set_named("realm", normalize::canonical_name(realm), level)
    }

    /// Level the realm was obtained at.
    #[must_use]
    pub fn realm_level(&self) -> ProvenanceLevel {
        self.realm.level()
    }

    /// The explicitly set principal, if any. Stored verbatim.
    ///
    /// `Some("")` means the principal was explicitly blanked, as
    /// [`CredentialSet::set_anonymous`] does.
    #[must_use]
    pub fn explicit_principal(&self) -> Option<&str> {
        self.principal.get().map(String::as_str)
    }

    /// Sets an explicit principal, kept exactly as given.
    pub fn set_principal(&mut self, principal: &str, level: ProvenanceLevel) -> bool {
        self.principal.set_named("principal", principal.to_string(), level)
    }

    /// Level the explicit principal was obtained at.
    #[must_use]
    pub fn principal_level(&self) -> ProvenanceLevel {
        self.principal.level()
    }

    /// The principal: the explicit one if set, else `username@REALM` when
    /// both parts are non-empty, else `None`.
    ///
    /// An explicitly blanked principal reads as `None` and is not derived.
    #[must_use]
    pub fn principal(&self) -> Option<String> {
        if let Some(explicit) = self.explicit_principal() {
            return (!explicit.is_empty()).then(|| explicit.to_string());
        }
        normalize::compose_principal(self.username(), self.realm())
    }

    /// Workstation name. `""` when unset.
    #[must_use]
    pub fn workstation(&self) -> &str {
        self.workstation.get().map_or("", String::as_str)
    }

    /// Sets the workstation name.
    pub fn set_workstation(&mut self, workstation: &str, level: ProvenanceLevel) -> bool {
        self.workstation.set_named("workstation", workstation.to_string(), level)
    }

    /// Level the workstation was obtained at.
    #[must_use]
    pub fn workstation_level(&self) -> ProvenanceLevel {
        self.workstation.level()
    }

    /// Kerberos usage. [`KerberosUsage::Desired`] when unset.
    #[must_use]
    pub fn kerberos_state(&self) -> KerberosUsage {
        self.kerberos_state.get().copied().unwrap_or_default()
    }

    /// Sets the Kerberos usage.
    pub fn set_kerberos_state(&mut self, state: KerberosUsage, level: ProvenanceLevel) -> bool {
        self.kerberos_state.set_named("kerberos_state", state, level)
    }

    /// Level the Kerberos usage was obtained at.
    #[must_use]
    pub fn kerberos_state_level(&self) -> ProvenanceLevel {
        self.kerberos_state.level()
    }

    /// Whether this set is an anonymous identity.
    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        normalize::is_anonymous(self.username.get().map(String::as_str), self.password.get())
    }

    /// `DOMAIN\username` when a domain is set, else the bare username.
    #[must_use]
    pub fn unparsed_name(&self) -> String {
        let domain = self.domain();
        if domain.is_empty() {
            self.username().to_string()
        } else {
            format!("{}\\{}", domain, self.username())
        }
    }

    /// Registers a callback that supplies the password later.
    ///
    /// Accepted only while the password is below
    /// [`ProvenanceLevel::Callback`]. Returns whether it was registered.
    pub fn set_password_callback(&mut self, callback: impl PasswordCallback + 'static) -> bool {
        if self.password.level() >= ProvenanceLevel::Callback {
            debug!(current = %self.password.level(), "Password already obtained, callback not registered");
            return false;
        }
        self.password_callback = Some(Arc::new(callback));
        true
    }

    /// Whether a password callback is registered and not yet invoked.
    #[must_use]
    pub fn has_pending_callback(&self) -> bool {
        self.password_callback.is_some()
    }

    /// Invokes a pending password callback and stores its result at
    /// [`ProvenanceLevel::Callback`], then returns the current password.
    ///
    /// The callback runs at most once. If a password was specified after the
    /// callback was registered, the callback is dropped without being called.
    pub fn resolve_password(&mut self) -> Option<&str> {
        if let Some(callback) = self.password_callback.take() {
            if self.password.level() > ProvenanceLevel::Callback {
                debug!("Password specified after callback registration, skipping callback");
            } else {
                let obtained = callback.obtain_password(self);
                self.store_password(obtained, ProvenanceLevel::Callback);
            }
        }
        self.password()
    }

    /// Parses a compact credential string (`user`, `user%pass`,
    /// `user@realm`, `%`) and applies it at `level`.
    pub fn parse_string(&mut self, input: &str, level: ProvenanceLevel) {
        parse::parse_into(input, level, self);
    }

    /// Fills unset fields from `env` at [`ProvenanceLevel::Guessed`] using
    /// the default [`GuessConfig`].
    pub fn guess(&mut self, env: &dyn EnvironmentSource) {
        EnvironmentGuesser::default().guess(self, env);
    }

    /// Like [`CredentialSet::guess`] with explicit local defaults.
    pub fn guess_with(&mut self, env: &dyn EnvironmentSource, config: &GuessConfig) {
        EnvironmentGuesser::new(config.clone()).guess(self, env);
    }

    /// Serializable view of every field and its level.
    ///
    /// The password is replaced by a placeholder unless `reveal_password`.
    #[must_use]
    pub fn summary(&self, reveal_password: bool) -> CredentialSummary {
        let password = match self.password.get() {
            Some(Some(password)) if reveal_password => Some(password.clone()),
            Some(Some(_)) => Some(REDACTED.to_string()),
            _ => None,
        };
        CredentialSummary {
            domain: FieldSummary::of(&self.domain),
            username: FieldSummary::of(&self.username),
            password: FieldSummary { value: password, level: self.password.level() },
            realm: FieldSummary::of(&self.realm),
            principal: self.principal(),
            workstation: FieldSummary::of(&self.workstation),
            kerberos_state: self.kerberos_state(),
            anonymous: self.is_anonymous(),
        }
    }
}

impl fmt::Debug for CredentialSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // SECURITY: Never reveal the password content
        let password = match self.password.get() {
            Some(Some(_)) => Some(REDACTED),
            _ => None,
        };
        f.debug_struct("CredentialSet")
            .field("domain", &self.domain)
            .field("username", &self.username)
            .field("password", &password)
            .field("password_level", &self.password.level())
            .field("realm", &self.realm)
            .field("principal", &self.principal)
            .field("workstation", &self.workstation)
            .field("kerberos_state", &self.kerberos_state)
            .field("password_callback", &self.password_callback.is_some())
            .finish()
    }
}

impl Drop for CredentialSet {
    fn drop(&mut self) {
        self.wipe_password();
    }
}

/// One field of a [`CredentialSummary`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSummary {
    /// Stored value, if any.
    pub value: Option<String>,
    /// Level the value was obtained at.
    pub level: ProvenanceLevel,
}

impl FieldSummary {
    fn of(field: &Field<String>) -> Self {
        Self { value: field.get().cloned(), level: field.level() }
    }
}

/// Snapshot of a [`CredentialSet`] for display and JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CredentialSummary {
    pub domain: FieldSummary,
    pub username: FieldSummary,
    pub password: FieldSummary,
    pub realm: FieldSummary,
    pub principal: Option<String>,
    pub workstation: FieldSummary,
    pub kerberos_state: KerberosUsage,
    pub anonymous: bool,
}
