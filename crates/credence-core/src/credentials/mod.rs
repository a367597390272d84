//! Credential resolution.
//!
//! A [`CredentialSet`] holds one provenance-tagged [`Field`] per identity
//! attribute. Values arrive from several sources, each at a
//! [`ProvenanceLevel`]:
//!
//! - explicit setters and [`CredentialSet::parse_string`], usually at
//!   `Specified`
//! - a [`PasswordCallback`], at `Callback`
//! - [`EnvironmentGuesser`], at `Guessed`
//!
//! A write only lands if its level is at least the level of the value it
//! replaces, so sources can be applied in any order.
//!
//! # Example
//!
//! ```
//! use credence_core::{CredentialSet, ProvenanceLevel, StaticEnvironment};
//!
//! let mut creds = CredentialSet::new();
//! creds.parse_string("alice%secret", ProvenanceLevel::Specified);
//!
//! let env = StaticEnvironment::new().with_var("USER", "bob").with_var("PASSWD", "other");
//! creds.guess(&env);
//!
//! assert_eq!(creds.username(), "alice");
//! assert_eq!(creds.password(), Some("secret"));
//! ```

mod field;
pub mod guess;
mod level;
pub mod normalize;
pub mod parse;
mod set;

pub use field::Field;
pub use guess::{EnvironmentGuesser, EnvironmentSource, ProcessEnvironment, StaticEnvironment};
pub use level::ProvenanceLevel;
pub use parse::Assignment;
pub use set::{CredentialSet, CredentialSummary, FieldSummary, KerberosUsage, PasswordCallback};
