//! Shared fixtures for the app layer tests.

use super::Validator;
use crate::domain::{Errors, Result, Values};
use futures_util::future::{FutureExt, LocalBoxFuture};
use serde_json::Value;
use std::cell::RefCell;
use std::rc::Rc;

pub fn values(pairs: &[(&str, Value)]) -> Values {
    pairs
        .iter()
        .map(|(name, value)| ((*name).to_string(), value.clone()))
        .collect()
}

pub fn errors(pairs: &[(&str, &str)]) -> Errors {
    pairs
        .iter()
        .map(|(name, message)| ((*name).to_string(), Value::from(*message)))
        .collect()
}

/// Reports `{field: <current value of field>}` and yields to the runtime
/// `yields` times first when the field holds `slow_value`.
pub struct Staged {
    field: &'static str,
    slow_value: Value,
    yields: usize,
}

impl Staged {
    pub const fn slow_on(field: &'static str, slow_value: Value, yields: usize) -> Self {
        Self {
            field,
            slow_value,
            yields,
        }
    }
}

impl Validator for Staged {
    fn validate(&self, values: Values) -> LocalBoxFuture<'_, Result<Option<Errors>>> {
        async move {
            let current = values.get(self.field).cloned().unwrap_or(Value::Null);
            if current == self.slow_value {
                for _ in 0..self.yields {
                    tokio::task::yield_now().await;
                }
            }
            Ok(Some(Errors::from([(self.field.to_string(), current)])))
        }
        .boxed_local()
    }
}

/// Records every call a submit callback receives.
#[derive(Clone)]
pub struct Calls<T> {
    inner: Rc<RefCell<Vec<T>>>,
}

impl<T> Default for Calls<T> {
    fn default() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Vec::new())),
        }
    }
}

impl<T: Clone> Calls<T> {
    pub fn push(&self, item: T) {
        self.inner.borrow_mut().push(item);
    }

    pub fn all(&self) -> Vec<T> {
        self.inner.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }
}
