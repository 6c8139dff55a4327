//! Submission controller.
//!
//! A [`SubmitHandler`] is built by [`Form::on_submit`] and runs one submit
//! attempt per call:
//!
//! 1. Suppress the event's default action (when an event is given)
//! 2. Start a validation run over the current values
//! 3. Record the attempt (`submit_count + 1`)
//! 4. Check the guard: no errors and not validating
//! 5. If the guard passes: mark submitting, await the callback, unmark
//!
//! Under [`SubmitGuard::Snapshot`] steps 3–5 run concurrently with the
//! validation run and the guard reads the snapshot taken at step 1, so it
//! cannot see the outcome of the run it just started. Under
//! [`SubmitGuard::AwaitValidation`] the run finishes first and the guard reads
//! the live state.

use super::form::Form;
use super::modes::SubmitGuard;
use super::Action;
use super::events::SubmitEvent;
use crate::domain::{FormState, Result, SubmitContext, Values};
use futures_util::future::{join, LocalBoxFuture};
use futures_util::FutureExt;
use std::future::Future;
use std::rc::Rc;
use tracing::Instrument;

/// Caller-supplied work run when a submit attempt passes the guard.
///
/// Implemented for any `Fn(Values, SubmitContext) -> impl Future<Output = Result<()>>`.
pub trait SubmitCallback {
    /// Runs the submission with the observed values and lifecycle flags.
    fn submit(&self, values: Values, context: SubmitContext) -> LocalBoxFuture<'_, Result<()>>;
}

impl<F, Fut> SubmitCallback for F
where
    F: Fn(Values, SubmitContext) -> Fut,
    Fut: Future<Output = Result<()>> + 'static,
{
    fn submit(&self, values: Values, context: SubmitContext) -> LocalBoxFuture<'_, Result<()>> {
        self(values, context).boxed_local()
    }
}

/// Submit entry point bound to one form and one callback.
#[derive(Clone)]
pub struct SubmitHandler {
    form: Form,
    callback: Rc<dyn SubmitCallback>,
}

impl SubmitHandler {
    pub(crate) fn new(form: Form, callback: Rc<dyn SubmitCallback>) -> Self {
        Self { form, callback }
    }

    /// Suppresses the event's default action, then runs a submit attempt.
    ///
    /// # Errors
    ///
    /// Same as [`submit`](Self::submit).
    pub async fn handle(&self, event: &mut impl SubmitEvent) -> Result<()> {
        event.prevent_default();
        self.submit().await
    }

    /// Runs a submit attempt without an event.
    ///
    /// Resolves once both the validation run and the callback (if invoked)
    /// have finished.
    ///
    /// # Errors
    ///
    /// Returns the validator's error if validation failed, otherwise the
    /// callback's error. Neither failure is recovered from: the flags they
    /// would have cleared stay set.
    pub async fn submit(&self) -> Result<()> {
        let guard = self.form.inner.submit_guard;
        let span = tracing::debug_span!("submit", ?guard);

        match guard {
            SubmitGuard::Snapshot => self.submit_against_snapshot().instrument(span).await,
            SubmitGuard::AwaitValidation => self.submit_after_validation().instrument(span).await,
        }
    }

    async fn submit_against_snapshot(&self) -> Result<()> {
        let inner = &self.form.inner;
        let snapshot = inner.store.state();

        let validation = inner.pipeline.run(&inner.store, snapshot.values.clone());
        let attempt = async {
            self.record_attempt();
            self.invoke_if_clear(&snapshot).await
        };

        let (validated, submitted) = join(validation, attempt).await;
        validated.and(submitted)
    }

    async fn submit_after_validation(&self) -> Result<()> {
        let inner = &self.form.inner;
        let values = inner.store.with_state(|state| state.values.clone());

        let validated = inner.pipeline.run(&inner.store, values).await;
        self.record_attempt();
        validated?;

        let live = inner.store.state();
        self.invoke_if_clear(&live).await
    }

    fn record_attempt(&self) {
        let store = &self.form.inner.store;
        let count = store.with_state(|state| state.submit_count).saturating_add(1);
        tracing::debug!(submit_count = count, "recording submit attempt");
        store.dispatch(Action::SetSubmitCount(count));
    }

    async fn invoke_if_clear(&self, observed: &FormState) -> Result<()> {
        if observed.has_errors() || observed.is_validating {
            tracing::debug!(
                error_count = observed.errors.len(),
                is_validating = observed.is_validating,
                "submit guard blocked callback"
            );
            return Ok(());
        }

        let store = &self.form.inner.store;
        store.dispatch(Action::SetSubmitting(true));
        self.callback
            .submit(observed.values.clone(), observed.context())
            .await?;
        store.dispatch(Action::SetSubmitting(false));
        Ok(())
    }
}

impl std::fmt::Debug for SubmitHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubmitHandler")
            .field("form", &self.form)
            .finish_non_exhaustive()
    }
}
