//! Schema definition
//!
//! A schema maps field names to validators. Declaration order is kept and
//! is the order in which fields are validated.

use std::fmt;

use super::validator::{BoxedValidator, Validate};

/// Ordered mapping of field name to validator.
#[derive(Default)]
pub struct Schema {
    /// Field validators in declaration order
    fields: Vec<(String, BoxedValidator)>,
}

impl Schema {
    /// Create an empty schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a field.
    ///
    /// Re-declaring a field replaces its validator but keeps its position.
    pub fn field<V: Validate + 'static>(mut self, name: impl Into<String>, validator: V) -> Self {
        self.insert(name, Box::new(validator));
        self
    }

    /// Declares a field with an already boxed validator.
    pub fn insert(&mut self, name: impl Into<String>, validator: BoxedValidator) {
        let name = name.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = validator,
            None => self.fields.push((name, validator)),
        }
    }

    /// Returns the validator of a field
    pub fn get(&self, name: &str) -> Option<&dyn Validate> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, validator)| validator.as_ref())
    }

    /// Returns whether a field is declared
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterates over fields in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &dyn Validate)> {
        self.fields
            .iter()
            .map(|(name, validator)| (name.as_str(), validator.as_ref()))
    }

    /// Returns field names in declaration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// Returns the number of declared fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns whether no field is declared
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("fields", &self.names().collect::<Vec<_>>())
            .finish()
    }
}

impl<S: Into<String>> FromIterator<(S, BoxedValidator)> for Schema {
    fn from_iter<I: IntoIterator<Item = (S, BoxedValidator)>>(iter: I) -> Self {
        let mut schema = Schema::new();
        for (name, validator) in iter {
            schema.insert(name, validator);
        }
        schema
    }
}
