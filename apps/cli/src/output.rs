//! Human-readable rendering of a credential summary.

use colored::Colorize;
use credence_core::{CredentialSummary, FieldSummary, ProvenanceLevel};

fn level_label(level: ProvenanceLevel) -> colored::ColoredString {
    let label = format!("({})", level);
    match level {
        ProvenanceLevel::Specified => label.green(),
        ProvenanceLevel::Callback => label.cyan(),
        ProvenanceLevel::Guessed => label.yellow(),
        ProvenanceLevel::Uninitialised => label.dimmed(),
    }
}

fn print_field(name: &str, field: &FieldSummary) {
    let value = field.value.as_deref().unwrap_or("<unset>");
    println!("  {:<12} {:<32} {}", format!("{}:", name), value, level_label(field.level));
}

/// Print every field with the level it was obtained at.
pub(crate) fn print_summary(summary: &CredentialSummary) {
    println!("{}", "Resolved credentials".bold().cyan());
    println!();
    print_field("Domain", &summary.domain);
    print_field("Username", &summary.username);
    print_field("Password", &summary.password);
    print_field("Realm", &summary.realm);
    println!("  {:<12} {}", "Principal:", summary.principal.as_deref().unwrap_or("<none>"));
    print_field("Workstation", &summary.workstation);
    println!("  {:<12} {}", "Kerberos:", summary.kerberos_state);
    let anonymous = if summary.anonymous { "yes".yellow() } else { "no".normal() };
    println!("  {:<12} {}", "Anonymous:", anonymous);
}
