//! Domain layer for the form engine.
//!
//! This module contains the core data types, independent of how state is
//! dispatched or how validation is scheduled.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`state`]: The form state snapshot and its value maps
//!
//! # Examples
//!
//! ```
//! use formstate::domain::{FormState, Result, Values};
//!
//! fn blank_form() -> Result<FormState> {
//!     Ok(FormState::new(Values::new()))
//! }
//! ```

pub mod error;
pub mod state;

pub use error::{FormError, Result};
pub use state::{Errors, FormState, SubmitContext, Values};
