//! Provenance-tagged value slot.

use tracing::{debug, trace};

use super::level::ProvenanceLevel;

/// One credential attribute together with the level it was obtained at.
///
/// Every attribute of a [`CredentialSet`](super::CredentialSet) is stored in
/// a `Field`, and [`Field::set`] is the only way a value is written, so the
/// precedence rule lives in exactly one place.
///
/// Invariant: `get()` is `None` iff `level()` is `Uninitialised`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field<T> {
    value: Option<T>,
    level: ProvenanceLevel,
}

impl<T> Field<T> {
    /// Creates an unset field.
    #[must_use]
    pub const fn new() -> Self {
        Self { value: None, level: ProvenanceLevel::Uninitialised }
    }

    /// Writes `value` if `level` is at least as authoritative as the current one.
    ///
    /// Returns `true` if the write was applied. A rejected write leaves the
    /// field untouched and is not an error. Writes at `Uninitialised` are
    /// always rejected.
    pub fn set(&mut self, value: T, level: ProvenanceLevel) -> bool {
        self.set_named("field", value, level)
    }

    /// Whether a write at `level` would be applied.
    #[must_use]
    pub fn accepts(&self, level: ProvenanceLevel) -> bool {
        level != ProvenanceLevel::Uninitialised && level >= self.level
    }

    /// Same as [`Field::set`], naming the field in log output.
    pub(crate) fn set_named(&mut self, name: &'static str, value: T, level: ProvenanceLevel) -> bool {
        if !self.accepts(level) {
            debug!(field = name, current = %self.level, attempted = %level, "Rejected lower-precedence write");
            return false;
        }
        trace!(field = name, previous = %self.level, level = %level, "Field written");
        self.value = Some(value);
        self.level = level;
        true
    }

    /// Returns the stored value, if any.
    #[must_use]
    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Returns the level the current value was obtained at.
    #[must_use]
    pub fn level(&self) -> ProvenanceLevel {
        self.level
    }

    /// Whether a value has been written.
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.value.is_some()
    }

    pub(crate) fn get_mut(&mut self) -> Option<&mut T> {
        self.value.as_mut()
    }
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Self::new()
    }
}
