//! Seams for binding-layer events.
//!
//! The engine works on semantic values only: a field name and a JSON value
//! for changes, and an optional "prevent default" hook for submits. A binding
//! layer implements these traits for its native event types and translates
//! them at the edge.
//!
//! # Example
//!
//! ```rust
//! use formstate::{ChangeEvent, FieldChange};
//! use serde_json::json;
//!
//! let change = FieldChange::new("email", json!("a@b.com"));
//! assert_eq!(change.name(), "email");
//! assert_eq!(change.value(), json!("a@b.com"));
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An input change carrying a field name and its new value.
pub trait ChangeEvent {
    /// Name of the field that changed.
    fn name(&self) -> &str;
    /// New value of the field.
    fn value(&self) -> Value;
}

/// A submit trigger whose default action can be suppressed.
pub trait SubmitEvent {
    /// Suppresses the event's default action (such as navigation).
    fn prevent_default(&mut self);
}

/// Plain change event for callers without a native event type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldChange {
    /// Field name.
    pub name: String,
    /// New field value.
    pub value: Value,
}

impl FieldChange {
    /// Creates a change event for field `name`.
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

impl ChangeEvent for FieldChange {
    fn name(&self) -> &str {
        &self.name
    }

    fn value(&self) -> Value {
        self.value.clone()
    }
}
