//! Form state snapshot.
//!
//! [`FormState`] is the single entity the engine manages. A snapshot is an
//! immutable value: every transition produces a new snapshot through the
//! reducer, and readers receive clones.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Field name to field value.
pub type Values = BTreeMap<String, Value>;

/// Field name to error value (a string or structured JSON).
pub type Errors = BTreeMap<String, Value>;

/// Complete form state at one instant.
///
/// Serializes with camelCase keys so a binding layer can hand the snapshot
/// straight to a renderer.
///
/// # Example
///
/// ```rust
/// use formstate::FormState;
/// use serde_json::json;
///
/// let values = [("email".to_string(), json!(""))].into_iter().collect();
/// let state = FormState::new(values);
///
/// assert_eq!(state.value("email"), Some(&json!("")));
/// assert!(state.is_at_rest());
/// assert!(!state.has_errors());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormState {
    /// Current field values.
    pub values: Values,

    /// True while a validation run is in flight.
    pub is_validating: bool,

    /// True while the caller's submit callback is executing.
    pub is_submitting: bool,

    /// Number of submit attempts since construction or the last reset.
    pub submit_count: u32,

    /// Errors reported by the most recently applied validation run.
    ///
    /// Empty means "no known errors".
    pub errors: Errors,
}

impl FormState {
    /// Creates a resting snapshot holding `values` and nothing else.
    #[must_use]
    pub fn new(values: Values) -> Self {
        Self {
            values,
            ..Self::default()
        }
    }

    /// Returns the value of field `name`, if set.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Returns the error recorded for field `name`, if any.
    #[must_use]
    pub fn error(&self, name: &str) -> Option<&Value> {
        self.errors.get(name)
    }

    /// True when any field has an error.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// True when no validation run or submit callback is in flight.
    #[must_use]
    pub const fn is_at_rest(&self) -> bool {
        !self.is_validating && !self.is_submitting
    }

    /// Everything except `values` and `errors`, as handed to submit callbacks.
    #[must_use]
    pub const fn context(&self) -> SubmitContext {
        SubmitContext {
            is_validating: self.is_validating,
            is_submitting: self.is_submitting,
            submit_count: self.submit_count,
        }
    }
}

/// Lifecycle flags observed when a submit handler started.
///
/// Passed to the submit callback next to the field values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitContext {
    /// A validation run was in flight.
    pub is_validating: bool,
    /// A submit callback was executing.
    pub is_submitting: bool,
    /// Count before this attempt was recorded.
    pub submit_count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_new_is_resting_and_clean() {
        let state = FormState::new(Values::from([("name".to_string(), json!("ada"))]));
        assert!(state.is_at_rest());
        assert!(!state.has_errors());
        assert_eq!(state.submit_count, 0);
        assert_eq!(state.value("name"), Some(&json!("ada")));
        assert_eq!(state.value("missing"), None);
    }

    #[test]
    fn test_context_excludes_values_and_errors() {
        let state = FormState {
            is_validating: true,
            submit_count: 3,
            ..FormState::default()
        };
        assert_eq!(
            state.context(),
            SubmitContext {
                is_validating: true,
                is_submitting: false,
                submit_count: 3,
            }
        );
    }

    #[test]
    fn test_serializes_with_camel_case_keys() {
        let state = FormState {
            errors: Errors::from([("email".to_string(), json!("required"))]),
            submit_count: 2,
            ..FormState::default()
        };
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(
            json,
            json!({
                "values": {},
                "isValidating": false,
                "isSubmitting": false,
                "submitCount": 2,
                "errors": { "email": "required" }
            })
        );
    }

    #[test]
    fn test_structured_error_values() {
        let state = FormState {
            errors: Errors::from([(
                "password".to_string(),
                json!({ "code": "too_short", "min": 8 }),
            )]),
            ..FormState::default()
        };
        assert!(state.has_errors());
        assert_eq!(state.error("password").unwrap()["min"], json!(8));
    }
}
