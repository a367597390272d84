//! Canonicalization rules and the anonymous-identity predicate.
//!
//! Pure functions only. Canonicalization is applied by the setters at write
//! time so getters return stored values as-is.

/// Separator between the local part and the realm of a principal.
pub const PRINCIPAL_SEPARATOR: char = '@';

/// Canonical form of a domain or realm name.
#[must_use]
pub fn canonical_name(name: &str) -> String {
    name.to_uppercase()
}

/// Builds `username@realm` when both parts are non-empty.
#[must_use]
pub fn compose_principal(username: &str, realm: &str) -> Option<String> {
    if username.is_empty() || realm.is_empty() {
        return None;
    }
    Some(format!("{username}{PRINCIPAL_SEPARATOR}{realm}"))
}

/// Splits a principal on its first `@` into `(local part, realm part)`.
///
/// Any further `@` stays in the realm part.
#[must_use]
pub fn split_principal(principal: &str) -> Option<(&str, &str)> {
    principal.split_once(PRINCIPAL_SEPARATOR)
}

/// Anonymous iff the username is empty or unset and the password is absent.
///
/// `password` is the raw password slot: `None` means never set and
/// `Some(None)` means explicitly no password. Both count as absent; an empty
/// password string does not.
#[must_use]
pub fn is_anonymous(username: Option<&str>, password: Option<&Option<String>>) -> bool {
    let no_user = username.is_none_or(str::is_empty);
    let no_password = password.is_none_or(Option::is_none);
    no_user && no_password
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_name_uppercases() {
        assert_eq!(canonical_name("bla"), "BLA");
        assert_eq!(canonical_name("Samba.Example.COM"), "SAMBA.EXAMPLE.COM");
        assert_eq!(canonical_name(""), "");
    }

    #[test]
    fn test_canonical_name_idempotent() {
        let once = canonical_name("styx");
        assert_eq!(canonical_name(&once), once);
    }

    #[test]
    fn test_compose_principal() {
        assert_eq!(compose_principal("alice", "EXAMPLE.COM"), Some("alice@EXAMPLE.COM".to_string()));
        assert_eq!(compose_principal("", "EXAMPLE.COM"), None);
        assert_eq!(compose_principal("alice", ""), None);
    }

    #[test]
    fn test_split_principal_first_at_only() {
        assert_eq!(split_principal("prin@styx"), Some(("prin", "styx")));
        assert_eq!(split_principal("a@b@c"), Some(("a", "b@c")));
        assert_eq!(split_principal("@realm"), Some(("", "realm")));
        assert_eq!(split_principal("nobody"), None);
    }

    #[test]
    fn test_is_anonymous() {
        assert!(is_anonymous(None, None));
        assert!(is_anonymous(Some(""), Some(&None)));
        assert!(is_anonymous(Some(""), None));
        assert!(!is_anonymous(Some(""), Some(&Some(String::new()))));
        assert!(!is_anonymous(Some("alice"), Some(&None)));
        assert!(!is_anonymous(Some("alice"), None));
    }
}
