//! Validation pipeline and the validator abstraction.
//!
//! A [`Validator`] turns field values into an optional [`Errors`] map. The
//! engine never inspects what the validator checks; it only schedules runs
//! and applies results through the store.
//!
//! # Run Lifecycle
//!
//! ```text
//! run(values)
//!   ├─ take ticket
//!   ├─ dispatch SetValidating(true)
//!   ├─ await validator            ← suspension point
//!   ├─ stale ticket? → discard    (LatestWins only, errors included)
//!   ├─ dispatch SetErrors(result or {})
//!   └─ dispatch SetValidating(false)
//! ```
//!
//! # Implementations
//!
//! - Any `Fn(Values) -> impl Future<Output = Result<Option<Errors>>>` closure
//! - [`SyncValidator`]: wraps a plain `Fn(&Values) -> Option<Errors>`
//! - [`NoopValidator`]: reports no errors

use super::modes::ValidationOrdering;
use super::{Action, Store};
use crate::domain::{Errors, Result, Values};
use futures_util::future::{self, LocalBoxFuture};
use futures_util::FutureExt;
use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;
use tracing::Instrument;

/// Produces field errors from a set of values.
///
/// `Ok(None)` and `Ok(Some(empty))` both mean "no errors". `Err` means the
/// validator itself failed; the engine propagates it without recovery.
///
/// # Example
///
/// ```rust
/// use formstate::{Errors, FormError, Values, Validator};
/// use futures_util::future::{FutureExt, LocalBoxFuture};
/// use serde_json::json;
///
/// struct RequiredEmail;
///
/// impl Validator for RequiredEmail {
///     fn validate(
///         &self,
///         values: Values,
///     ) -> LocalBoxFuture<'_, Result<Option<Errors>, FormError>> {
///         async move {
///             let empty = values.get("email").map_or(true, |v| v == &json!(""));
///             Ok(empty.then(|| Errors::from([("email".to_string(), json!("required"))])))
///         }
///         .boxed_local()
///     }
/// }
/// ```
pub trait Validator {
    /// Validates `values`, which are owned by the returned future.
    fn validate(&self, values: Values) -> LocalBoxFuture<'_, Result<Option<Errors>>>;
}

impl<F, Fut> Validator for F
where
    F: Fn(Values) -> Fut,
    Fut: Future<Output = Result<Option<Errors>>> + 'static,
{
    fn validate(&self, values: Values) -> LocalBoxFuture<'_, Result<Option<Errors>>> {
        self(values).boxed_local()
    }
}

/// Adapts a synchronous validation function.
///
/// The result is still delivered through a future, so the pipeline treats
/// synchronous and asynchronous validators identically.
///
/// # Example
///
/// ```rust
/// use formstate::{Errors, SyncValidator, Values};
/// use serde_json::json;
///
/// let validator = SyncValidator::new(|values: &Values| {
///     (values.get("email") == Some(&json!("")))
///         .then(|| Errors::from([("email".to_string(), json!("required"))]))
/// });
/// # let _ = validator;
/// ```
pub struct SyncValidator<F> {
    check: F,
}

impl<F> SyncValidator<F>
where
    F: Fn(&Values) -> Option<Errors>,
{
    /// Wraps `check`, which returns `None` when the values are valid.
    pub const fn new(check: F) -> Self {
        Self { check }
    }
}

impl<F> Validator for SyncValidator<F>
where
    F: Fn(&Values) -> Option<Errors>,
{
    fn validate(&self, values: Values) -> LocalBoxFuture<'_, Result<Option<Errors>>> {
        future::ready(Ok((self.check)(&values))).boxed_local()
    }
}

impl<F> std::fmt::Debug for SyncValidator<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncValidator").finish_non_exhaustive()
    }
}

/// Validator that never reports errors.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopValidator;

impl Validator for NoopValidator {
    fn validate(&self, _values: Values) -> LocalBoxFuture<'_, Result<Option<Errors>>> {
        future::ready(Ok(None)).boxed_local()
    }
}

/// Runs a validator against the store, applying results in ticket order.
pub struct ValidationPipeline {
    validator: Rc<dyn Validator>,
    ordering: ValidationOrdering,
    latest_ticket: Cell<u64>,
}

impl ValidationPipeline {
    /// Creates a pipeline that has started no runs.
    #[must_use]
    pub fn new(validator: Rc<dyn Validator>, ordering: ValidationOrdering) -> Self {
        Self {
            validator,
            ordering,
            latest_ticket: Cell::new(0),
        }
    }

    /// Ticket of the most recently started run; zero before the first run.
    #[must_use]
    pub fn latest_ticket(&self) -> u64 {
        self.latest_ticket.get()
    }

    /// Supersedes every run in flight.
    ///
    /// Under [`ValidationOrdering::LatestWins`] those runs discard their
    /// outcome when the validator completes and dispatch nothing.
    pub(crate) fn invalidate(&self) {
        let ticket = self.latest_ticket.get() + 1;
        tracing::debug!(ticket, "invalidating in-flight validation runs");
        self.latest_ticket.set(ticket);
    }

    /// Validates `values` and applies the outcome to `store`.
    ///
    /// Under [`ValidationOrdering::LatestWins`] a run superseded while its
    /// validator was pending resolves to `Ok(())` whatever the validator
    /// returned, failures included.
    ///
    /// # Errors
    ///
    /// Returns the validator's error unchanged. Nothing further is dispatched
    /// for a failed run, so `is_validating` stays set until a later run
    /// completes.
    pub async fn run(&self, store: &Store, values: Values) -> Result<()> {
        let ticket = self.latest_ticket.get() + 1;
        self.latest_ticket.set(ticket);

        store.dispatch(Action::SetValidating(true));

        let outcome = self
            .validator
            .validate(values)
            .instrument(tracing::debug_span!("validate", ticket))
            .await;

        let latest = self.latest_ticket.get();
        if self.ordering == ValidationOrdering::LatestWins && ticket != latest {
            tracing::debug!(
                ticket,
                latest,
                failed = outcome.is_err(),
                "discarding stale validation result"
            );
            return Ok(());
        }

        let errors = outcome?.unwrap_or_default();

        tracing::debug!(ticket, error_count = errors.len(), "applying validation result");
        store.dispatch(Action::SetErrors(errors));
        store.dispatch(Action::SetValidating(false));
        Ok(())
    }
}

impl std::fmt::Debug for ValidationPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationPipeline")
            .field("ordering", &self.ordering)
            .field("latest_ticket", &self.latest_ticket)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_support::{errors, values, Staged};
    use crate::domain::{FormError, FormState};
    use futures_util::future::join;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::cell::RefCell;

    fn pipeline(
        validator: impl Validator + 'static,
        ordering: ValidationOrdering,
    ) -> ValidationPipeline {
        ValidationPipeline::new(Rc::new(validator), ordering)
    }

    #[tokio::test]
    async fn test_run_dispatches_around_validator() {
        let store = Store::new(FormState::default());
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        store.subscribe(move |state| {
            sink.borrow_mut()
                .push((state.is_validating, state.errors.len()));
        });

        let pipeline = pipeline(
            SyncValidator::new(|_: &Values| Some(errors(&[("email", "required")]))),
            ValidationOrdering::LatestWins,
        );
        pipeline.run(&store, Values::new()).await.unwrap();

        assert_eq!(*seen.borrow(), vec![(true, 0), (true, 1), (false, 1)]);
        assert_eq!(pipeline.latest_ticket(), 1);
    }

    #[tokio::test]
    async fn test_none_result_clears_errors() {
        let store = Store::new(FormState {
            errors: errors(&[("email", "required")]),
            ..FormState::default()
        });

        pipeline(NoopValidator, ValidationOrdering::LatestWins)
            .run(&store, Values::new())
            .await
            .unwrap();

        let state = store.state();
        assert!(state.errors.is_empty());
        assert!(!state.is_validating);
    }

    #[tokio::test]
    async fn test_async_closure_validator() {
        let store = Store::new(FormState::default());
        let validator = |values: Values| async move {
            tokio::task::yield_now().await;
            Ok::<Option<Errors>, FormError>(
                values
                    .get("age")
                    .filter(|age| age.as_i64().unwrap_or(0) < 18)
                    .map(|_| errors(&[("age", "too young")])),
            )
        };

        let pipeline = pipeline(validator, ValidationOrdering::LatestWins);
        pipeline
            .run(&store, values(&[("age", json!(12))]))
            .await
            .unwrap();
        assert_eq!(store.state().error("age"), Some(&json!("too young")));

        pipeline
            .run(&store, values(&[("age", json!(30))]))
            .await
            .unwrap();
        assert!(store.state().errors.is_empty());
    }

    #[tokio::test]
    async fn test_latest_wins_discards_slow_earlier_run() {
        let store = Store::new(FormState::default());
        let pipeline = pipeline(
            Staged::slow_on("name", json!("slow"), 5),
            ValidationOrdering::LatestWins,
        );

        let (first, second) = join(
            pipeline.run(&store, values(&[("name", json!("slow"))])),
            pipeline.run(&store, values(&[("name", json!("fast"))])),
        )
        .await;
        first.unwrap();
        second.unwrap();

        let state = store.state();
        assert_eq!(state.error("name"), Some(&json!("fast")));
        assert!(!state.is_validating);
    }

    #[tokio::test]
    async fn test_completion_order_lets_slow_run_overwrite() {
        let store = Store::new(FormState::default());
        let pipeline = pipeline(
            Staged::slow_on("name", json!("slow"), 5),
            ValidationOrdering::CompletionOrder,
        );

        let (first, second) = join(
            pipeline.run(&store, values(&[("name", json!("slow"))])),
            pipeline.run(&store, values(&[("name", json!("fast"))])),
        )
        .await;
        first.unwrap();
        second.unwrap();

        assert_eq!(store.state().error("name"), Some(&json!("slow")));
    }

    #[tokio::test]
    async fn test_validator_error_propagates_without_recovery() {
        let store = Store::new(FormState::default());
        let validator = |_: Values| async {
            Err::<Option<Errors>, FormError>(FormError::Validator("offline".to_string()))
        };

        let err = pipeline(validator, ValidationOrdering::LatestWins)
            .run(&store, Values::new())
            .await
            .unwrap_err();

        assert!(matches!(err, FormError::Validator(ref msg) if msg == "offline"));
        assert!(store.state().is_validating);
    }

    #[tokio::test]
    async fn test_superseded_failure_is_discarded() {
        let store = Store::new(FormState::default());
        let validator = |values: Values| async move {
            if values.contains_key("slow") {
                tokio::task::yield_now().await;
                tokio::task::yield_now().await;
                return Err(FormError::Validator("offline".to_string()));
            }
            Ok::<Option<Errors>, FormError>(None)
        };
        let pipeline = pipeline(validator, ValidationOrdering::LatestWins);

        let (first, second) = join(
            pipeline.run(&store, values(&[("slow", json!(true))])),
            pipeline.run(&store, Values::new()),
        )
        .await;

        first.unwrap();
        second.unwrap();
        assert!(!store.state().is_validating);
    }

    #[tokio::test]
    async fn test_invalidate_discards_in_flight_run() {
        let store = Store::new(FormState::default());
        let pipeline = pipeline(
            Staged::slow_on("name", json!("slow"), 5),
            ValidationOrdering::LatestWins,
        );

        let (run, ()) = join(
            pipeline.run(&store, values(&[("name", json!("slow"))])),
            async {
                tokio::task::yield_now().await;
                pipeline.invalidate();
            },
        )
        .await;
        run.unwrap();

        assert_eq!(pipeline.latest_ticket(), 2);
        let state = store.state();
        assert!(state.errors.is_empty());
        assert!(state.is_validating);
    }
}
