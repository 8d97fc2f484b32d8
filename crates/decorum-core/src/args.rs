//! Argument lists forwarded through wrapped callables.

use crate::value::Value;

/// The arguments of a single call: ordered positional values plus named
/// values kept in insertion order.
///
/// Wrappers forward `CallArgs` untouched, so a wrapper never needs to know
/// how many arguments the function beneath it takes.
///
/// # Examples
///
/// ```
/// use decorum_core::{CallArgs, Value};
///
/// let args = CallArgs::new().arg(4).arg("x").kwarg("verbose", true);
/// assert_eq!(args.get(0), Some(&Value::Int(4)));
/// assert_eq!(args.named("verbose"), Some(&Value::Bool(true)));
/// assert_eq!(args.render(), "4, 'x', verbose=True");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallArgs {
    positional: Vec<Value>,
    named: Vec<(String, Value)>,
}

impl CallArgs {
    /// Creates an empty argument list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an argument list from positional values only.
    pub fn positional<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            positional: values.into_iter().map(Into::into).collect(),
            named: Vec::new(),
        }
    }

    /// Appends a positional argument.
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Sets a named argument. Setting the same name twice replaces the
    /// earlier value in place.
    pub fn kwarg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.named.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.named.push((name, value)),
        }
        self
    }

    /// Positional arguments in call order.
    pub fn args(&self) -> &[Value] {
        &self.positional
    }

    /// Named arguments in insertion order.
    pub fn kwargs(&self) -> &[(String, Value)] {
        &self.named
    }

    /// Returns the positional argument at `index`.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.positional.get(index)
    }

    /// Returns the named argument called `name`.
    pub fn named(&self, name: &str) -> Option<&Value> {
        self.named.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Total number of arguments, positional and named.
    pub fn len(&self) -> usize {
        self.positional.len() + self.named.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.named.is_empty()
    }

    /// Renders the arguments as they would appear in a call expression.
    pub fn render(&self) -> String {
        self.positional
            .iter()
            .map(Value::repr)
            .chain(self.named.iter().map(|(k, v)| format!("{}={}", k, v.repr())))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
