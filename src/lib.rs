//! formstate: a reducer-driven form state engine.
//!
//! formstate tracks the state of one form instance and drives its lifecycle:
//! - Field values and the errors a caller-supplied validator reports for them
//! - Validation and submission in-flight flags
//! - A counter of submit attempts
//! - Asynchronous validation with stale results discarded
//!
//! UI concerns (reading native events, mounting components, rendering) belong
//! to a binding layer that calls into this crate and re-renders from
//! [`Form::subscribe`] notifications.

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Binding layer (not part of this crate)             │  ← UI events
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Form: set_field / on_change / reset              │  ← Controllers
//! │  - SubmitHandler: guarded submit                    │
//! │  - ValidationPipeline: sequenced validator runs     │
//! │  - Store + Reducer: single dispatch channel         │  ← State machine
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain Layer (domain/)                             │
//! │  - FormState snapshot, Values, Errors               │
//! │  - FormError                                        │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - tracing subscriber setup                         │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Actions, reducer, store, validation pipeline and controllers
//! - [`domain`]: Core domain types (`FormState`, errors)
//! - [`observability`]: Tracing subscriber initialization
//!
//! # Configuration
//!
//! Behavior at the two points where concurrent work interleaves is
//! configurable through [`Config`], either built in code or loaded from TOML:
//!
//! ```toml
//! trace_level = "debug"
//! validation_ordering = "latest-wins"   # or "completion-order"
//! submit_guard = "snapshot"             # or "await-validation"
//! ```
//!
//! # Example
//!
//! ```rust
//! use formstate::{Errors, Form, FormError, SubmitContext, SyncValidator, Values};
//! use serde_json::json;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> formstate::Result<()> {
//! let form = Form::new(
//!     Values::from([("email".to_string(), json!(""))]),
//!     SyncValidator::new(|values: &Values| {
//!         (values.get("email") == Some(&json!("")))
//!             .then(|| Errors::from([("email".to_string(), json!("required"))]))
//!     }),
//! );
//!
//! form.set_field("email", json!("ada@example.com")).await?;
//!
//! let submit = form.on_submit(|values: Values, _: SubmitContext| async move {
//!     assert_eq!(values["email"], json!("ada@example.com"));
//!     Ok::<(), FormError>(())
//! });
//! submit.submit().await?;
//!
//! assert_eq!(form.state().submit_count, 1);
//! form.reset();
//! assert_eq!(form.state().value("email"), Some(&json!("")));
//! # Ok(())
//! # }
//! ```
//!
//! # Key Design Decisions
//!
//! ## Single Dispatch Channel
//!
//! Every transition, including the submitting flag, is an [`Action`] applied by
//! the [`Reducer`] inside [`Store::dispatch`]. Nothing writes the snapshot
//! directly, so subscribers observe every change.
//!
//! ## Sequenced Validation
//!
//! Each validation run takes a ticket. By default only the newest run applies
//! its result; an older run that completes late is discarded instead of
//! overwriting fresher errors.
//!
//! ## Single-Threaded Handles
//!
//! [`Form`] is an `Rc` handle and its futures are `!Send`. They run on any
//! single-threaded executor and hold no borrow across an await.

pub mod app;
pub mod domain;
pub mod observability;

pub use app::{
    create_form, Action, ChangeEvent, FieldChange, Form, NoopValidator, Reducer, Store,
    SubmitCallback, SubmitEvent, SubmitGuard, SubmitHandler, Subscription, SyncValidator,
    ValidationOrdering, ValidationPipeline, Validator,
};
pub use domain::{Errors, FormError, FormState, Result, SubmitContext, Values};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Engine configuration.
///
/// # Example
///
/// ```toml
/// trace_level = "debug"
/// validation_ordering = "completion-order"
/// submit_guard = "await-validation"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Tracing level used by [`observability::init_tracing`].
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub trace_level: Option<String>,

    /// Which result wins when validation runs overlap.
    pub validation_ordering: ValidationOrdering,

    /// Which state the submit guard inspects.
    pub submit_guard: SubmitGuard,
}

impl Config {
    /// Parses configuration from a string map, such as host-provided options.
    ///
    /// Parsing is lenient: unrecognized mode names fall back to the default
    /// and are logged.
    ///
    /// # Parsing Rules
    ///
    /// - `trace_level`: String → `Option<String>`
    /// - `validation_ordering`: `latest-wins` | `completion-order`
    /// - `submit_guard`: `snapshot` | `await-validation`
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use formstate::{Config, SubmitGuard, ValidationOrdering};
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("submit_guard".to_string(), "await-validation".to_string());
    /// map.insert("validation_ordering".to_string(), "sideways".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.submit_guard, SubmitGuard::AwaitValidation);
    /// assert_eq!(config.validation_ordering, ValidationOrdering::LatestWins);
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let validation_ordering = map
            .get("validation_ordering")
            .map(|raw| {
                raw.parse().unwrap_or_else(|e| {
                    tracing::debug!(error = %e, "using default validation ordering");
                    ValidationOrdering::default()
                })
            })
            .unwrap_or_default();

        let submit_guard = map
            .get("submit_guard")
            .map(|raw| {
                raw.parse().unwrap_or_else(|e| {
                    tracing::debug!(error = %e, "using default submit guard");
                    SubmitGuard::default()
                })
            })
            .unwrap_or_default();

        Self {
            trace_level: map.get("trace_level").cloned(),
            validation_ordering,
            submit_guard,
        }
    }

    /// Parses a TOML document. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Toml`] for malformed documents or unknown mode
    /// names.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Reads and parses a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Io`] if the file cannot be read, or the errors of
    /// [`from_toml_str`](Self::from_toml_str).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}
