//! Single-writer dispatch channel.
//!
//! [`Store`] holds the live snapshot and is the only place it changes. Every
//! controller operation routes each transition through [`Store::dispatch`],
//! which runs the reducer and then notifies subscribers.
//!
//! The store is single-threaded: it lives behind an `Rc` and uses interior
//! mutability. Borrows never outlive a single dispatch, so listeners may read
//! the store (or dispatch again) while being notified.

use super::{Action, Reducer};
use crate::domain::FormState;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

type Listener = Rc<dyn Fn(&FormState)>;

/// Handle returned by [`Store::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

/// Live form state plus its dispatch channel.
pub struct Store {
    reducer: Reducer,
    state: RefCell<FormState>,
    listeners: RefCell<Vec<(Subscription, Listener)>>,
    next_subscription: Cell<u64>,
}

impl Store {
    /// Creates a store whose live and initial snapshots are both `initial`.
    #[must_use]
    pub fn new(initial: FormState) -> Self {
        Self {
            state: RefCell::new(initial.clone()),
            reducer: Reducer::new(initial),
            listeners: RefCell::new(Vec::new()),
            next_subscription: Cell::new(0),
        }
    }

    /// Clone of the live snapshot.
    #[must_use]
    pub fn state(&self) -> FormState {
        self.state.borrow().clone()
    }

    /// Reads the live snapshot without cloning it.
    pub fn with_state<R>(&self, f: impl FnOnce(&FormState) -> R) -> R {
        f(&self.state.borrow())
    }

    /// The snapshot a reset restores.
    #[must_use]
    pub const fn initial(&self) -> &FormState {
        self.reducer.initial()
    }

    /// Applies `action` through the reducer and notifies every subscriber.
    pub fn dispatch(&self, action: Action) {
        let snapshot = {
            let mut state = self.state.borrow_mut();
            let next = self.reducer.reduce(&state, &action);
            *state = next;
            state.clone()
        };

        tracing::trace!(
            action = action.kind(),
            submit_count = snapshot.submit_count,
            is_validating = snapshot.is_validating,
            is_submitting = snapshot.is_submitting,
            "dispatched"
        );

        let listeners: Vec<Listener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in listeners {
            listener(&snapshot);
        }
    }

    /// Registers `listener` to be called with the new snapshot after every
    /// dispatch.
    pub fn subscribe(&self, listener: impl Fn(&FormState) + 'static) -> Subscription {
        let id = Subscription(self.next_subscription.get());
        self.next_subscription.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, Rc::new(listener)));
        id
    }

    /// Removes a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(id, _)| *id != subscription);
        listeners.len() != before
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state)
            .field("listeners", &self.listeners.borrow().len())
            .finish_non_exhaustive()
    }
}
