//! Property tests for precedence, parsing and guessing.

use credence_core::{CredentialSet, CredentialSummary, Field, ProvenanceLevel, StaticEnvironment};
use proptest::prelude::*;

fn level() -> impl Strategy<Value = ProvenanceLevel> {
    prop_oneof![
        Just(ProvenanceLevel::Guessed),
        Just(ProvenanceLevel::Callback),
        Just(ProvenanceLevel::Specified),
    ]
}

/// Pairs `(lower, higher)`.
fn ordered_levels() -> impl Strategy<Value = (ProvenanceLevel, ProvenanceLevel)> {
    prop_oneof![
        Just((ProvenanceLevel::Guessed, ProvenanceLevel::Callback)),
        Just((ProvenanceLevel::Guessed, ProvenanceLevel::Specified)),
        Just((ProvenanceLevel::Callback, ProvenanceLevel::Specified)),
    ]
}

type State = (
    CredentialSummary,
    Option<String>,
    ProvenanceLevel,
    ProvenanceLevel,
    ProvenanceLevel,
    ProvenanceLevel,
);

fn state(creds: &CredentialSet) -> State {
    (
        creds.summary(true),
        creds.explicit_principal().map(str::to_string),
        creds.username_level(),
        creds.password_level(),
        creds.realm_level(),
        creds.principal_level(),
    )
}

proptest! {
    #[test]
    fn test_later_higher_level_wins(v1 in ".*", v2 in ".*", (l1, l2) in ordered_levels()) {
        let mut field = Field::new();
        field.set(v1, l1);
        field.set(v2.clone(), l2);
        prop_assert_eq!(field.get(), Some(&v2));
        prop_assert_eq!(field.level(), l2);
    }

    #[test]
    fn test_later_lower_level_loses(v1 in ".*", v2 in ".*", (l1, l2) in ordered_levels()) {
        let mut field = Field::new();
        field.set(v1.clone(), l2);
        prop_assert!(!field.set(v2, l1));
        prop_assert_eq!(field.get(), Some(&v1));
        prop_assert_eq!(field.level(), l2);
    }

    #[test]
    fn test_domain_always_uppercase(domain in "[a-zA-Z0-9.]*", l in level()) {
        let mut creds = CredentialSet::new();
        creds.set_domain(&domain, l);
        prop_assert_eq!(creds.domain(), domain.to_uppercase());
    }

    #[test]
    fn test_parse_is_idempotent(input in "[a-z@%]{0,12}", l in level()) {
        let mut once = CredentialSet::new();
        once.parse_string(&input, l);

        let mut twice = CredentialSet::new();
        twice.parse_string(&input, l);
        twice.parse_string(&input, l);

        prop_assert_eq!(state(&once), state(&twice));
    }

    #[test]
    fn test_guess_never_downgrades(user in "[a-z]{1,8}", pass in "[a-z]{0,8}", env_user in "[a-z]{1,8}", env_pass in ".*") {
        let mut creds = CredentialSet::new();
        creds.set_username(&user, ProvenanceLevel::Specified);
        creds.set_password(Some(&pass), ProvenanceLevel::Callback);

        let env = StaticEnvironment::new()
            .with_var("USER", env_user)
            .with_var("PASSWD", env_pass)
            .with_os_account("os");
        creds.guess(&env);

        prop_assert_eq!(creds.username(), user.as_str());
        prop_assert_eq!(creds.username_level(), ProvenanceLevel::Specified);
        prop_assert_eq!(creds.password(), Some(pass.as_str()));
        prop_assert_eq!(creds.password_level(), ProvenanceLevel::Callback);
    }
}
