//! Applies every credential source in order.

use credence_core::{CredentialSet, GuessConfig, ProcessEnvironment, ProvenanceLevel};
use tracing::{debug, info};

use crate::Args;

/// Builds the credential set described by `args`.
///
/// Kerberos usage is applied before guessing so the guesser can honour it.
/// Everything given on the command line is `Specified`; the prompt runs last
/// and only if nothing more authoritative supplied a password.
pub(crate) fn resolve(args: &Args) -> anyhow::Result<CredentialSet> {
    let mut creds = if args.anonymous { CredentialSet::anonymous() } else { CredentialSet::new() };

    if let Some(kerberos) = args.kerberos {
        creds.set_kerberos_state(kerberos, ProvenanceLevel::Specified);
    }

    if args.no_guess {
        debug!("Skipping environment guessing");
    } else {
        let config = GuessConfig::load(args.config.as_deref())?;
        creds.guess_with(&ProcessEnvironment, &config);
    }

    if let Some(domain) = &args.workgroup {
        creds.set_domain(domain, ProvenanceLevel::Specified);
    }
    if let Some(realm) = &args.realm {
        creds.set_realm(realm, ProvenanceLevel::Specified);
    }
    if let Some(workstation) = &args.workstation {
        creds.set_workstation(workstation, ProvenanceLevel::Specified);
    }
    if let Some(user) = &args.user {
        creds.parse_string(user, ProvenanceLevel::Specified);
    }
    if args.no_pass {
        creds.set_password(None, ProvenanceLevel::Specified);
    }

    if args.prompt && creds.set_password_callback(prompt_password) {
        creds.resolve_password();
    }

    info!(name = %creds.unparsed_name(), anonymous = creds.is_anonymous(), "Resolved credentials");
    Ok(creds)
}

fn prompt_password(creds: &CredentialSet) -> Option<String> {
    let prompt = format!("Password for [{}]: ", creds.unparsed_name());
    match rpassword::prompt_password(prompt) {
        Ok(password) => Some(password),
        Err(e) => {
            debug!(error = %e, "Password prompt unavailable");
            None
        }
    }
}
