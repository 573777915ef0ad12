use log::debug;
use std::collections::HashMap;

/// Values of the variables of one program evaluation.
///
/// Variables are created by assignment. Reading a variable that was never
/// assigned gives `0.0`.
///
/// ```
/// # use calcbot::SymbolTable;
/// let mut symbols = SymbolTable::new();
/// assert_eq!(symbols.get("a"), 0.0);
/// symbols.assign("a", 2.5);
/// assert_eq!(symbols.get("a"), 2.5);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SymbolTable {
    values: HashMap<String, f64>,
}

impl SymbolTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of the variable `name`, or `0.0` if it was never assigned
    pub fn get(&self, name: &str) -> f64 {
        self.values.get(name).copied().unwrap_or(0.0)
    }

    /// Set the variable `name` to `value`, and return `value`
    pub fn assign(&mut self, name: &str, value: f64) -> f64 {
        debug!("assign {} = {}", name, value);
        self.values.insert(name.to_owned(), value);
        value
    }

    /// Check whether `name` was assigned
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Number of assigned variables
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check whether no variable was assigned
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over the assigned variables, in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(name, &value)| (name.as_str(), value))
    }
}
