//! Actions describing requested state transitions.
//!
//! This module defines the [`Action`] type, the closed set of messages the
//! [`Store`](super::Store) accepts. Controllers never touch the snapshot
//! directly; they describe each transition as an `Action` and dispatch it.
//!
//! # Example
//!
//! ```rust
//! use formstate::Action;
//! use serde_json::json;
//!
//! let actions = vec![
//!     Action::set_field("email", json!("a@b.com")),
//!     Action::SetValidating(true),
//! ];
//! assert_eq!(actions[0].kind(), "set_field");
//! ```

use crate::domain::Errors;
use serde_json::Value;

/// A single requested transition of the form state.
///
/// Consumed by [`Reducer::reduce`](super::Reducer::reduce) through an
/// exhaustive match, so adding a variant forces every consumer to handle it.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Merges one field value into `values`.
    SetField {
        /// Field name.
        name: String,
        /// New value for the field.
        value: Value,
    },

    /// Replaces `errors` wholesale.
    SetErrors(Errors),

    /// Replaces `submit_count`.
    SetSubmitCount(u32),

    /// Replaces `is_submitting`.
    SetSubmitting(bool),

    /// Replaces `is_validating`.
    SetValidating(bool),

    /// Restores the initial snapshot captured at construction.
    Reset,
}

impl Action {
    /// Builds a [`Action::SetField`] from anything convertible to a name.
    pub fn set_field(name: impl Into<String>, value: Value) -> Self {
        Self::SetField {
            name: name.into(),
            value,
        }
    }

    /// Stable name of the variant, used as a log field.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::SetField { .. } => "set_field",
            Self::SetErrors(_) => "set_errors",
            Self::SetSubmitCount(_) => "set_submit_count",
            Self::SetSubmitting(_) => "set_submitting",
            Self::SetValidating(_) => "set_validating",
            Self::Reset => "reset",
        }
    }
}
