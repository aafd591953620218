//! Case-conversion helper functions callable from template expressions.
//!
//! The four helpers (`snake`, `usnake`, `camel`, `lcamel`) are pure string
//! transforms over word boundaries (case changes, `_`, `-` and other
//! non-alphanumeric runs). They are collected into an immutable table that
//! the renderer receives at construction time, so separate renders can never
//! observe cross-run mutation of the registry.

use cruet::Inflector;
use indexmap::IndexMap;

/// Signature shared by all template helpers.
pub type HelperFn = fn(&str) -> String;

/// Immutable registry mapping helper names to their implementations.
pub struct Helpers {
    table: IndexMap<&'static str, HelperFn>,
}

impl Helpers {
    /// Builds the registry with the four built-in case-conversion helpers.
    pub fn builtin() -> Self {
        let mut table: IndexMap<&'static str, HelperFn> = IndexMap::new();
        table.insert("snake", snake as HelperFn);
        table.insert("usnake", usnake as HelperFn);
        table.insert("camel", camel as HelperFn);
        table.insert("lcamel", lcamel as HelperFn);
        Self { table }
    }

    /// Looks up a helper by name.
    pub fn get(&self, name: &str) -> Option<HelperFn> {
        self.table.get(name).copied()
    }

    /// Registered helper names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.table.keys().copied()
    }
}

impl Default for Helpers {
    fn default() -> Self {
        Helpers::builtin()
    }
}

/// `someVariableName` -> `some_variable_name`
pub fn snake(input: &str) -> String {
    input.to_snake_case()
}

/// `someVariableName` -> `SOME_VARIABLE_NAME`
pub fn usnake(input: &str) -> String {
    input.to_screaming_snake_case()
}

/// `some_variable_name` -> `SomeVariableName`
pub fn camel(input: &str) -> String {
    input.to_pascal_case()
}

/// `some_variable_name` -> `someVariableName`
pub fn lcamel(input: &str) -> String {
    input.to_camel_case()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snake() {
        assert_eq!(snake("someVariableName"), "some_variable_name");
        assert_eq!(snake("SomeVariableName"), "some_variable_name");
        assert_eq!(snake("some variable name"), "some_variable_name");
        assert_eq!(snake(""), "");
    }

    #[test]
    fn test_usnake() {
        assert_eq!(usnake("someVariableName"), "SOME_VARIABLE_NAME");
        assert_eq!(usnake("some_variable_name"), "SOME_VARIABLE_NAME");
        assert_eq!(usnake(""), "");
    }

    #[test]
    fn test_camel() {
        assert_eq!(camel("some_variable_name"), "SomeVariableName");
        assert_eq!(camel("some-variable-name"), "SomeVariableName");
        assert_eq!(camel(""), "");
    }

    #[test]
    fn test_lcamel() {
        assert_eq!(lcamel("some_variable_name"), "someVariableName");
        assert_eq!(lcamel("SomeVariableName"), "someVariableName");
        assert_eq!(lcamel(""), "");
    }

    #[test]
    fn test_builtin_registry() {
        let helpers = Helpers::builtin();
        let names: Vec<_> = helpers.names().collect();
        assert_eq!(names, vec!["snake", "usnake", "camel", "lcamel"]);
        let f = helpers.get("snake").unwrap();
        assert_eq!(f("someVariableName"), "some_variable_name");
        assert!(helpers.get("kebab").is_none());
    }
}
