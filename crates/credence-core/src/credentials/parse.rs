//! Compact credential string parsing.
//!
//! Grammar:
//!
//! ```text
//! "%"                 anonymous (username "", no password)
//! "<user>"            username
//! "<user>%<pass>"     username and password (password may be empty)
//! "<user>@<realm>"    username, realm and verbatim principal
//! ```
//!
//! Only the first `%` and the first `@` split. The password is separated
//! first, so an `@` inside a password never starts a realm and the password
//! is never copied into the principal.

use super::level::ProvenanceLevel;
use super::normalize;
use super::set::CredentialSet;

/// Separator between the user part and the password.
pub const PASSWORD_SEPARATOR: char = '%';

/// The literal string meaning "explicitly anonymous".
pub const ANONYMOUS: &str = "%";

/// One field write produced by [`parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assignment<'a> {
    /// Empty domain and username with no password.
    Anonymous,
    Username(&'a str),
    /// `None` means explicitly no password.
    Password(Option<&'a str>),
    Realm(&'a str),
    /// Principal as written in the input.
    Principal(&'a str),
}

/// Parses `input` into the ordered field writes it stands for.
#[must_use]
pub fn parse(input: &str) -> Vec<Assignment<'_>> {
    if input == ANONYMOUS {
        return vec![Assignment::Anonymous];
    }

    let (user_part, password) = match input.split_once(PASSWORD_SEPARATOR) {
        Some((user, password)) => (user, Some(password)),
        None => (input, None),
    };

    let mut assignments = Vec::with_capacity(4);
    if let Some((local, realm)) = normalize::split_principal(user_part) {
        assignments.push(Assignment::Realm(realm));
        assignments.push(Assignment::Principal(user_part));
        assignments.push(Assignment::Username(local));
    } else {
        assignments.push(Assignment::Username(user_part));
    }
    if let Some(password) = password {
        assignments.push(Assignment::Password(Some(password)));
    }
    assignments
}

/// Applies `assignments` to `target` at `level`.
///
/// Each write is subject to the usual precedence check; rejected writes are
/// skipped silently.
pub fn apply(assignments: &[Assignment<'_>], level: ProvenanceLevel, target: &mut CredentialSet) {
    for assignment in assignments {
        match *assignment {
            Assignment::Anonymous => {
                target.set_anonymous(level);
            }
            Assignment::Username(username) => {
                target.set_username(username, level);
            }
            Assignment::Password(password) => {
                target.set_password(password, level);
            }
            Assignment::Realm(realm) => {
                target.set_realm(realm, level);
            }
            Assignment::Principal(principal) => {
                target.set_principal(principal, level);
            }
        }
    }
}

/// Parses `input` and applies it to `target` at `level`.
pub fn parse_into(input: &str, level: ProvenanceLevel, target: &mut CredentialSet) {
    apply(&parse(input), level, target);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_anonymous() {
        assert_eq!(parse("%"), vec![Assignment::Anonymous]);
    }

    #[test]
    fn test_parse_bare_username() {
        assert_eq!(parse("alice"), vec![Assignment::Username("alice")]);
    }

    #[test]
    fn test_parse_user_and_password() {
        assert_eq!(
            parse("somebody%secret"),
            vec![Assignment::Username("somebody"), Assignment::Password(Some("secret"))]
        );
    }

    #[test]
    fn test_parse_empty_password_is_present() {
        assert_eq!(
            parse("somebody%"),
            vec![Assignment::Username("somebody"), Assignment::Password(Some(""))]
        );
    }

    #[test]
    fn test_parse_empty_user_with_trailing_percent_differs_from_anonymous() {
        assert_eq!(parse("%x"), vec![Assignment::Username(""), Assignment::Password(Some("x"))]);
        assert_eq!(parse("%%"), vec![Assignment::Username(""), Assignment::Password(Some("%"))]);
    }

    #[test]
    fn test_parse_extra_percent_stays_in_password() {
        assert_eq!(
            parse("user%pa%ss"),
            vec![Assignment::Username("user"), Assignment::Password(Some("pa%ss"))]
        );
    }

    #[test]
    fn test_parse_principal() {
        assert_eq!(
            parse("prin@styx"),
            vec![
                Assignment::Realm("styx"),
                Assignment::Principal("prin@styx"),
                Assignment::Username("prin"),
            ]
        );
    }

    #[test]
    fn test_parse_principal_extra_at_stays_in_realm() {
        assert_eq!(
            parse("a@b@c"),
            vec![Assignment::Realm("b@c"), Assignment::Principal("a@b@c"), Assignment::Username("a")]
        );
    }

    #[test]
    fn test_parse_principal_with_password() {
        assert_eq!(
            parse("prin@styx%pw"),
            vec![
                Assignment::Realm("styx"),
                Assignment::Principal("prin@styx"),
                Assignment::Username("prin"),
                Assignment::Password(Some("pw")),
            ]
        );
    }

    #[test]
    fn test_parse_at_in_password_is_not_a_realm() {
        assert_eq!(
            parse("user%p@ss"),
            vec![Assignment::Username("user"), Assignment::Password(Some("p@ss"))]
        );
    }

    #[test]
    fn test_parse_into_principal_keeps_case() {
        let mut creds = CredentialSet::anonymous();
        parse_into("Prin@styx.example", ProvenanceLevel::Specified, &mut creds);
        assert_eq!(creds.realm(), "STYX.EXAMPLE");
        assert_eq!(creds.username(), "Prin");
        assert_eq!(creds.principal().as_deref(), Some("Prin@styx.example"));
    }

    #[test]
    fn test_parse_into_lower_level_is_ignored() {
        let mut creds = CredentialSet::anonymous();
        parse_into("guess%pw", ProvenanceLevel::Guessed, &mut creds);
        assert_eq!(creds.username(), "");
        assert_eq!(creds.password(), None);
    }

    #[test]
    fn test_parse_into_anonymous_resets_user_and_password() {
        let mut creds = CredentialSet::new();
        parse_into("someone%pw", ProvenanceLevel::Specified, &mut creds);
        parse_into("%", ProvenanceLevel::Specified, &mut creds);
        assert_eq!(creds.username(), "");
        assert_eq!(creds.password(), None);
        assert!(creds.is_anonymous());
    }
}
