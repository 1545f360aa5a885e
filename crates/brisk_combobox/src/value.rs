//! Selection values and the mode-dependent update rule
//!
//! A combobox stores `Option<Value>`. In single mode the value is `None` or a
//! [`Value::Single`]; in multiple mode it is a [`Value::Multiple`] list (possibly
//! empty) whose order is commit order.
//!
//! Values handed in from outside can have the wrong shape for the current mode
//! (a caller switching modes, or an `on_change` handler written for the other
//! mode). Reads go through [`SelectionMode::conforming`], which logs and treats a
//! mismatched value as "nothing selected" instead of failing.

use serde::{Deserialize, Serialize};

/// A committed selection
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Single(String),
    Multiple(Vec<String>),
}

impl Value {
    /// Whether `value` is part of this selection
    pub fn contains(&self, value: &str) -> bool {
        match self {
            Value::Single(current) => current == value,
            Value::Multiple(values) => values.iter().any(|v| v == value),
        }
    }

    /// The shape this value has
    pub fn mode(&self) -> SelectionMode {
        match self {
            Value::Single(_) => SelectionMode::Single,
            Value::Multiple(_) => SelectionMode::Multiple,
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Single(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Single(value)
    }
}

impl From<Vec<String>> for Value {
    fn from(values: Vec<String>) -> Self {
        Value::Multiple(values)
    }
}

impl From<Vec<&str>> for Value {
    fn from(values: Vec<&str>) -> Self {
        Value::Multiple(values.into_iter().map(str::to_string).collect())
    }
}

/// Single or multiple selection
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    #[default]
    Single,
    Multiple,
}

impl SelectionMode {
    pub fn from_multiple(multiple: bool) -> Self {
        if multiple {
            SelectionMode::Multiple
        } else {
            SelectionMode::Single
        }
    }

    pub fn is_multiple(self) -> bool {
        self == SelectionMode::Multiple
    }

    /// The stored value if its shape matches this mode
    pub fn conforming(self, current: &Option<Value>) -> Option<&Value> {
        let value = current.as_ref()?;
        if value.mode() == self {
            Some(value)
        } else {
            tracing::warn!(
                "combobox value {:?} does not match {:?} mode; treating it as empty",
                value,
                self
            );
            None
        }
    }

    /// The committed single value, if any
    pub fn single<'a>(self, current: &'a Option<Value>) -> Option<&'a str> {
        match self.conforming(current) {
            Some(Value::Single(value)) => Some(value.as_str()),
            _ => None,
        }
    }

    /// The committed list (empty in single mode or when nothing is selected)
    pub fn list<'a>(self, current: &'a Option<Value>) -> &'a [String] {
        match self.conforming(current) {
            Some(Value::Multiple(values)) => values.as_slice(),
            _ => &[],
        }
    }

    /// Apply a commit of `incoming` to `current`
    ///
    /// Single mode replaces; multiple mode toggles membership, appending new
    /// entries at the end and keeping the others in place. Returns `None` for an
    /// empty `incoming`, which is a no-op.
    pub fn apply(self, current: &Option<Value>, incoming: &str) -> Option<Value> {
        if incoming.is_empty() {
            return None;
        }

        match self {
            SelectionMode::Single => Some(Value::Single(incoming.to_string())),
            SelectionMode::Multiple => {
                let values = self.list(current);
                let next = if values.iter().any(|v| v == incoming) {
                    values.iter().filter(|v| *v != incoming).cloned().collect()
                } else {
                    let mut next = values.to_vec();
                    next.push(incoming.to_string());
                    next
                };
                Some(Value::Multiple(next))
            }
        }
    }

    /// Drop the most recently committed entry (multiple mode only)
    ///
    /// Returns `None` when there is nothing to remove.
    pub fn pop_last(self, current: &Option<Value>) -> Option<Value> {
        match self {
            SelectionMode::Single => None,
            SelectionMode::Multiple => {
                let values = self.list(current);
                let (_, rest) = values.split_last()?;
                Some(Value::Multiple(rest.to_vec()))
            }
        }
    }

    /// Text the input shows for the committed value
    ///
    /// Multiple mode never mirrors the selection into the input.
    pub fn display_text(self, current: &Option<Value>) -> String {
        self.single(current).map(str::to_string).unwrap_or_default()
    }

    /// Convert a stored value to this mode's shape
    ///
    /// Single → multiple wraps the value in a one-element list (or an empty list).
    /// Multiple → single keeps the most recently committed entry.
    pub fn migrate(self, current: Option<Value>) -> Option<Value> {
        match (self, current) {
            (SelectionMode::Multiple, None) => Some(Value::Multiple(Vec::new())),
            (SelectionMode::Multiple, Some(Value::Single(value))) => {
                Some(Value::Multiple(vec![value]))
            }
            (SelectionMode::Single, Some(Value::Multiple(mut values))) => {
                values.pop().map(Value::Single)
            }
            (_, current) => current,
        }
    }
}
