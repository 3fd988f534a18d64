use levenshtein::levenshtein;
use std::collections::BTreeMap;
use crate::domain::Scalar;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A mapping from variable names to values, used to evaluate expressions.
///
/// Binding a name that is already bound replaces its value. Variables are kept sorted by name.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Bindings<T> {
    /// The variables in the context.
    vars: BTreeMap<String, T>,
}

impl<T> Default for Bindings<T> {
    fn default() -> Self {
        Self { vars: BTreeMap::new() }
    }
}

impl<T: Scalar> Bindings<T> {
    /// Creates an empty set of bindings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds a variable and returns the bindings, for chained construction.
    pub fn with(mut self, name: &str, value: T) -> Self {
        self.add_var(name, value);
        self
    }

    /// Binds a variable, replacing any previous value. Returns the previous value, if any.
    pub fn add_var(&mut self, name: &str, value: T) -> Option<T> {
        self.vars.insert(name.to_string(), value)
    }

    /// Get the value of a variable.
    pub fn get_var(&self, name: &str) -> Option<T> {
        self.vars.get(name).copied()
    }

    /// Returns true if the variable is bound.
    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Iterates over the bound variables in order of their names.
    pub fn iter(&self) -> impl Iterator<Item = (&str, T)> + '_ {
        self.vars.iter().map(|(name, value)| (name.as_str(), *value))
    }

    /// Returns all bound variables with a name similar to the given name.
    pub fn get_similar_vars(&self, name: &str) -> Vec<&str> {
        self.vars
            .keys()
            .filter(|n| levenshtein(n, name) < 2)
            .map(|n| n.as_str())
            .collect()
    }
}

impl<'a, T: Scalar> FromIterator<(&'a str, T)> for Bindings<T> {
    fn from_iter<I: IntoIterator<Item = (&'a str, T)>>(iter: I) -> Self {
        let mut bindings = Self::new();
        for (name, value) in iter {
            bindings.add_var(name, value);
        }
        bindings
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn rebinding_replaces() {
        let mut bindings = Bindings::new().with("x", 1.0);
        assert_eq!(bindings.add_var("x", 2.0), Some(1.0));
        assert_eq!(bindings.get_var("x"), Some(2.0));
        assert_eq!(bindings.len(), 1);
    }

    #[test]
    fn iterates_in_name_order() {
        let bindings = [("y", 2.0), ("x", 1.0), ("z", 3.0)].into_iter().collect::<Bindings<f64>>();
        let names = bindings.iter().map(|(name, _)| name).collect::<Vec<_>>();
        assert_eq!(names, vec!["x", "y", "z"]);
    }

    #[test]
    fn similar_names() {
        let bindings = Bindings::new()
            .with("x", 1.0)
            .with("xy", 2.0)
            .with("theta", 3.0);
        assert_eq!(bindings.get_similar_vars("y"), vec!["x", "xy"]);
        assert_eq!(bindings.get_similar_vars("beta"), Vec::<&str>::new());
    }
}
