use super::value::Value;
use compact_str::CompactString;
use std::collections::HashMap;

/// The variable mapping of one interpreter.
///
/// There is no scoping and nothing clears it: every run that is handed the same
/// environment sees the bindings left by earlier runs.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    values: HashMap<CompactString, Value>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a binding, defaulting to integer zero when the name was never declared.
    pub fn read(&self, name: &str) -> Value {
        self.values.get(name).cloned().unwrap_or_default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn declare(&mut self, name: CompactString, value: Value) {
        self.values.insert(name, value);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }
}
