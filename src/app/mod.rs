//! Application layer: dispatch, validation scheduling, and controllers.
//!
//! This module sits between the binding layer (which owns UI events and
//! rendering) and the domain types. All state changes follow one path:
//!
//! ```text
//! Controller → Action → Store::dispatch → Reducer → new FormState → listeners
//!     │                                                  ↑
//!     └──────→ ValidationPipeline ── SetValidating/SetErrors ┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: The closed set of state transitions
//! - [`reducer`]: Pure `(state, action) → state` function
//! - [`store`]: Single-writer dispatch channel with subscriptions
//! - [`validation`]: Validator trait and the sequenced validation pipeline
//! - [`form`]: Form handle with field and reset controllers
//! - [`submit`]: Submission controller
//! - [`events`]: Binding-layer event seams
//! - [`modes`]: Validation ordering and submit guard modes

pub mod actions;
pub mod events;
pub mod form;
pub mod modes;
pub mod reducer;
pub mod store;
pub mod submit;
pub mod validation;

#[cfg(test)]
mod test_support;

pub use actions::Action;
pub use events::{ChangeEvent, FieldChange, SubmitEvent};
pub use form::{create_form, Form};
pub use modes::{SubmitGuard, ValidationOrdering};
pub use reducer::Reducer;
pub use store::{Store, Subscription};
pub use submit::{SubmitCallback, SubmitHandler};
pub use validation::{NoopValidator, SyncValidator, ValidationPipeline, Validator};
