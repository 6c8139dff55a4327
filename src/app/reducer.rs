//! Pure state transition function.
//!
//! [`Reducer`] maps `(snapshot, action)` to a new snapshot. It has no side
//! effects and knows nothing about validators, callbacks or listeners; the
//! [`Store`](super::Store) owns sequencing and notification.

use super::Action;
use crate::domain::FormState;

/// Transition function bound to one form's initial snapshot.
///
/// The initial snapshot is owned by the reducer and never mutated, so
/// [`Action::Reset`] always restores exactly what the form was built with.
///
/// # Example
///
/// ```rust
/// use formstate::{Action, FormState, Reducer, Values};
/// use serde_json::json;
///
/// let reducer = Reducer::new(FormState::new(Values::new()));
/// let state = reducer.reduce(reducer.initial(), &Action::set_field("age", json!(42)));
///
/// assert_eq!(state.value("age"), Some(&json!(42)));
/// assert_eq!(reducer.reduce(&state, &Action::Reset), *reducer.initial());
/// ```
#[derive(Debug, Clone)]
pub struct Reducer {
    initial: FormState,
}

impl Reducer {
    /// Creates a reducer that resets to `initial`.
    #[must_use]
    pub const fn new(initial: FormState) -> Self {
        Self { initial }
    }

    /// The snapshot [`Action::Reset`] restores.
    #[must_use]
    pub const fn initial(&self) -> &FormState {
        &self.initial
    }

    /// Applies `action` to `state`, returning the next snapshot.
    #[must_use]
    pub fn reduce(&self, state: &FormState, action: &Action) -> FormState {
        match action {
            Action::SetField { name, value } => {
                let mut values = state.values.clone();
                values.insert(name.clone(), value.clone());
                FormState {
                    values,
                    ..state.clone()
                }
            }
            Action::SetErrors(errors) => FormState {
                errors: errors.clone(),
                ..state.clone()
            },
            Action::SetSubmitCount(submit_count) => FormState {
                submit_count: *submit_count,
                ..state.clone()
            },
            Action::SetSubmitting(is_submitting) => FormState {
                is_submitting: *is_submitting,
                ..state.clone()
            },
            Action::SetValidating(is_validating) => FormState {
                is_validating: *is_validating,
                ..state.clone()
            },
            Action::Reset => self.initial.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Errors, Values};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn reducer() -> Reducer {
        Reducer::new(FormState::new(Values::from([
            ("email".to_string(), json!("")),
            ("name".to_string(), json!("ada")),
        ])))
    }

    #[test]
    fn test_set_field_merges_single_field() {
        let reducer = reducer();
        let next = reducer.reduce(reducer.initial(), &Action::set_field("email", json!("a@b.com")));

        assert_eq!(next.value("email"), Some(&json!("a@b.com")));
        assert_eq!(next.value("name"), Some(&json!("ada")));
        assert_eq!(next.errors, Errors::new());
    }

    #[test]
    fn test_set_field_adds_unknown_field() {
        let reducer = reducer();
        let next = reducer.reduce(reducer.initial(), &Action::set_field("age", json!(7)));
        assert_eq!(next.values.len(), 3);
    }

    #[test]
    fn test_set_errors_replaces_wholesale() {
        let reducer = reducer();
        let first = reducer.reduce(
            reducer.initial(),
            &Action::SetErrors(Errors::from([
                ("email".to_string(), json!("required")),
                ("name".to_string(), json!("too short")),
            ])),
        );
        let second = reducer.reduce(
            &first,
            &Action::SetErrors(Errors::from([("name".to_string(), json!("taken"))])),
        );

        assert_eq!(
            second.errors,
            Errors::from([("name".to_string(), json!("taken"))])
        );
    }

    #[test]
    fn test_flag_and_counter_actions() {
        let reducer = reducer();
        let state = reducer.reduce(reducer.initial(), &Action::SetValidating(true));
        assert!(state.is_validating);
        let state = reducer.reduce(&state, &Action::SetSubmitting(true));
        assert!(state.is_submitting);
        let state = reducer.reduce(&state, &Action::SetSubmitCount(5));
        assert_eq!(state.submit_count, 5);
        assert_eq!(state.values, reducer.initial().values);
    }

    #[test]
    fn test_reset_restores_initial_from_any_state() {
        let reducer = reducer();
        let dirty = [
            Action::set_field("email", json!("x")),
            Action::SetErrors(Errors::from([("email".to_string(), json!("bad"))])),
            Action::SetSubmitCount(9),
            Action::SetSubmitting(true),
            Action::SetValidating(true),
        ]
        .iter()
        .fold(reducer.initial().clone(), |state, action| {
            reducer.reduce(&state, action)
        });

        let reset = reducer.reduce(&dirty, &Action::Reset);

        assert_eq!(
            reset,
            FormState {
                values: Values::from([
                    ("email".to_string(), json!("")),
                    ("name".to_string(), json!("ada")),
                ]),
                is_validating: false,
                is_submitting: false,
                submit_count: 0,
                errors: Errors::new(),
            }
        );
    }

    #[test]
    fn test_reduce_does_not_mutate_input() {
        let reducer = reducer();
        let before = reducer.initial().clone();
        let _ = reducer.reduce(&before, &Action::set_field("email", json!("changed")));
        assert_eq!(before, *reducer.initial());
    }
}
