//! Field-level validation primitives shared by the editing forms.

use std::collections::BTreeMap;

/// Human-readable messages for the fields currently failing validation.
///
/// A field only has an entry while it is failing; an empty map means the
/// validated fields are acceptable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldErrors<F: Ord> {
    errors: BTreeMap<F, String>,
}

impl<F: Ord> Default for FieldErrors<F> {
    fn default() -> Self {
        Self {
            errors: BTreeMap::new(),
        }
    }
}

impl<F: Ord + Copy> FieldErrors<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: F, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    /// Returns the message for `field`, if it is failing.
    pub fn get(&self, field: F) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: F) -> bool {
        self.errors.contains_key(&field)
    }

    /// Drops the message for `field`. Returns whether one was present.
    pub fn clear(&mut self, field: F) -> bool {
        self.errors.remove(&field).is_some()
    }

    /// Drops every message for the given fields, leaving others untouched.
    pub fn clear_all(&mut self, fields: &[F]) {
        for field in fields {
            self.errors.remove(field);
        }
    }

    /// Adds every entry of `other`, overwriting messages for shared fields.
    pub fn merge(&mut self, other: Self) {
        self.errors.extend(other.errors);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = F> + '_ {
        self.errors.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (F, &str)> + '_ {
        self.errors.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

/// Parses a whole-number form input, treating blank or malformed text as `0`.
pub fn parse_count(input: &str) -> i64 {
    input.trim().parse().unwrap_or(0)
}

/// Parses a decimal form input, treating blank, malformed or non-finite text as `0`.
pub fn parse_amount(input: &str) -> f64 {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}
