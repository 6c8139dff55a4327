//! Form handle: field and reset controllers.
//!
//! [`Form`] is the public entry point. It owns one [`Store`] and one
//! [`ValidationPipeline`] and exposes the operations a binding layer calls:
//! field changes, submit handlers (see [`super::submit`]), reset, and
//! subscriptions for re-rendering.
//!
//! # Example
//!
//! ```rust
//! use formstate::{Errors, Form, SyncValidator, Values};
//! use serde_json::json;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> formstate::Result<()> {
//! let initial = Values::from([("email".to_string(), json!(""))]);
//! let form = Form::new(
//!     initial,
//!     SyncValidator::new(|values: &Values| {
//!         (values.get("email") == Some(&json!("")))
//!             .then(|| Errors::from([("email".to_string(), json!("required"))]))
//!     }),
//! );
//!
//! form.set_field("email", json!("")).await?;
//! assert_eq!(form.state().error("email"), Some(&json!("required")));
//!
//! form.set_field("email", json!("a@b.com")).await?;
//! assert!(form.state().errors.is_empty());
//! # Ok(())
//! # }
//! ```

use super::events::ChangeEvent;
use super::modes::SubmitGuard;
use super::store::Subscription;
use super::submit::{SubmitCallback, SubmitHandler};
use super::validation::{ValidationPipeline, Validator};
use super::{Action, Store};
use crate::domain::{FormState, Result, Values};
use crate::Config;
use serde_json::Value;
use std::rc::Rc;
use tracing::Instrument;

pub(crate) struct FormInner {
    pub(crate) store: Store,
    pub(crate) pipeline: ValidationPipeline,
    pub(crate) submit_guard: SubmitGuard,
}

/// Cheaply clonable handle to one form instance.
///
/// Clones share the same state. The handle is single-threaded (`!Send`).
#[derive(Clone)]
pub struct Form {
    pub(crate) inner: Rc<FormInner>,
}

impl Form {
    /// Creates a form with the default [`Config`].
    pub fn new(initial_values: Values, validator: impl Validator + 'static) -> Self {
        Self::with_config(initial_values, validator, &Config::default())
    }

    /// Creates a form whose initial snapshot holds `initial_values`.
    ///
    /// The initial snapshot is owned by this form alone and is what
    /// [`reset`](Self::reset) restores.
    pub fn with_config(
        initial_values: Values,
        validator: impl Validator + 'static,
        config: &Config,
    ) -> Self {
        tracing::debug!(
            fields = initial_values.len(),
            ordering = ?config.validation_ordering,
            submit_guard = ?config.submit_guard,
            "creating form"
        );

        Self {
            inner: Rc::new(FormInner {
                store: Store::new(FormState::new(initial_values)),
                pipeline: ValidationPipeline::new(Rc::new(validator), config.validation_ordering),
                submit_guard: config.submit_guard,
            }),
        }
    }

    /// Clone of the current snapshot.
    #[must_use]
    pub fn state(&self) -> FormState {
        self.inner.store.state()
    }

    /// The snapshot [`reset`](Self::reset) restores.
    #[must_use]
    pub fn initial_state(&self) -> &FormState {
        self.inner.store.initial()
    }

    /// Sets one field and validates the resulting values.
    ///
    /// The values handed to the validator are merged locally from the
    /// snapshot read before dispatching, not re-read from the store.
    ///
    /// # Errors
    ///
    /// Returns the validator's error, if it fails.
    pub async fn set_field(&self, name: impl Into<String>, value: Value) -> Result<()> {
        let name = name.into();
        let span = tracing::debug_span!("set_field", field = %name);

        async move {
            let store = &self.inner.store;
            let next_values = store.with_state(|state| {
                let mut values = state.values.clone();
                values.insert(name.clone(), value.clone());
                values
            });

            store.dispatch(Action::SetField { name, value });
            self.inner.pipeline.run(store, next_values).await
        }
        .instrument(span)
        .await
    }

    /// Applies a binding-layer change event.
    ///
    /// # Errors
    ///
    /// Same as [`set_field`](Self::set_field).
    pub async fn on_change(&self, event: &impl ChangeEvent) -> Result<()> {
        self.set_field(event.name(), event.value()).await
    }

    /// Builds a submit handler that runs `callback` when the guard allows.
    pub fn on_submit(&self, callback: impl SubmitCallback + 'static) -> SubmitHandler {
        SubmitHandler::new(self.clone(), Rc::new(callback))
    }

    /// Restores the initial snapshot.
    ///
    /// Under [`LatestWins`](super::modes::ValidationOrdering::LatestWins),
    /// validation runs still in flight are superseded, so their results never
    /// reach the reset form.
    pub fn reset(&self) {
        tracing::debug!("resetting form");
        self.inner.pipeline.invalidate();
        self.inner.store.dispatch(Action::Reset);
    }

    /// Calls `listener` with the new snapshot after every state transition.
    pub fn subscribe(&self, listener: impl Fn(&FormState) + 'static) -> Subscription {
        self.inner.store.subscribe(listener)
    }

    /// Removes a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        self.inner.store.unsubscribe(subscription)
    }
}

impl std::fmt::Debug for Form {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Form")
            .field("store", &self.inner.store)
            .field("pipeline", &self.inner.pipeline)
            .field("submit_guard", &self.inner.submit_guard)
            .finish()
    }
}

/// Creates a form and returns its initial snapshot alongside the handle.
pub fn create_form(
    initial_values: Values,
    validator: impl Validator + 'static,
) -> (FormState, Form) {
    let form = Form::new(initial_values, validator);
    (form.state(), form)
}
