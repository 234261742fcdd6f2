//! Open parameter bag threaded through every validation call.

use std::collections::BTreeMap;

use super::Value;

/// Caller-supplied parameters for context-sensitive validation.
///
/// Validators pass the same context unchanged to every child validator and
/// to record hooks. Built-in validators never read it.
///
/// # Examples
///
/// ```
/// use validata::validation::domain::{Context, Value};
///
/// let context = Context::new().with("tenant", "acme");
/// assert_eq!(context.get("tenant"), Some(&Value::from("acme")));
/// assert!(context.get("missing").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
    values: BTreeMap<String, Value>,
}

impl Context {
    /// Creates an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the context with an additional parameter.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Sets a parameter, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    /// Returns a parameter by name.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Returns `true` if no parameters are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
