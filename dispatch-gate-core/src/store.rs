//! Centralized state store and the capabilities a gate needs from it
//!
//! A gate never reaches into ambient context for the store. It is handed two
//! capabilities instead: [`StateAccessor`] to read the current state, and
//! [`Dispatcher`] to apply the one action it may produce per cycle.

use crate::Action;
use std::marker::PhantomData;
use tokio::sync::mpsc;

/// A reducer function that handles actions and mutates state
///
/// Returns `true` if the state changed and a re-render is needed.
pub type Reducer<S, A> = fn(&mut S, A) -> bool;

/// Read access to the current state.
pub trait StateAccessor<S> {
    fn state(&self) -> &S;
}

/// Write access to the store: apply an action.
pub trait Dispatcher<A: Action> {
    fn dispatch(&mut self, action: A);
}

/// Queue the action for the host runtime's action loop.
///
/// A closed channel means the runtime is shutting down; the action is dropped.
impl<A: Action> Dispatcher<A> for mpsc::UnboundedSender<A> {
    fn dispatch(&mut self, action: A) {
        let _ = self.send(action);
    }
}

impl<A: Action, D: Dispatcher<A> + ?Sized> Dispatcher<A> for &mut D {
    fn dispatch(&mut self, action: A) {
        (**self).dispatch(action);
    }
}

/// Centralized state store with Redux-like reducer pattern
///
/// # Example
/// ```
/// use dispatch_gate_core::{Action, Store};
///
/// #[derive(Clone, Debug)]
/// enum TodoAction {
///     Load,
/// }
///
/// impl Action for TodoAction {
///     fn name(&self) -> &'static str {
///         "Load"
///     }
/// }
///
/// #[derive(Default)]
/// struct TodoState {
///     todos: Option<Vec<String>>,
/// }
///
/// fn reducer(state: &mut TodoState, action: TodoAction) -> bool {
///     match action {
///         TodoAction::Load => {
///             state.todos = Some(Vec::new());
///             true
///         }
///     }
/// }
///
/// let mut store = Store::new(TodoState::default(), reducer);
/// store.dispatch(TodoAction::Load);
/// assert!(store.state().todos.is_some());
/// ```
pub struct Store<S, A: Action> {
    state: S,
    reducer: Reducer<S, A>,
    _marker: PhantomData<A>,
}

impl<S, A: Action> Store<S, A> {
    /// Create a new store with initial state and reducer
    pub fn new(state: S, reducer: Reducer<S, A>) -> Self {
        Self {
            state,
            reducer,
            _marker: PhantomData,
        }
    }

    /// Dispatch an action to the store
    ///
    /// Returns `true` if the state changed and a re-render is needed.
    pub fn dispatch(&mut self, action: A) -> bool {
        (self.reducer)(&mut self.state, action)
    }

    /// Get a reference to the current state
    pub fn state(&self) -> &S {
        &self.state
    }
}

impl<S, A: Action> StateAccessor<S> for Store<S, A> {
    fn state(&self) -> &S {
        Store::state(self)
    }
}

impl<S, A: Action> Dispatcher<A> for Store<S, A> {
    fn dispatch(&mut self, action: A) {
        Store::dispatch(self, action);
    }
}

/// Store whose dispatches pass through a [`Middleware`]
///
/// Lets a host observe what its gates dispatch, and whether each action
/// actually changed state, without touching the reducer.
pub struct StoreWithMiddleware<S, A: Action, M: Middleware<A>> {
    store: Store<S, A>,
    middleware: M,
}

impl<S, A: Action, M: Middleware<A>> StoreWithMiddleware<S, A, M> {
    /// Create a store with initial state, reducer and middleware
    pub fn new(state: S, reducer: Reducer<S, A>, middleware: M) -> Self {
        Self {
            store: Store::new(state, reducer),
            middleware,
        }
    }

    /// Dispatch an action through the middleware and the store
    ///
    /// Returns `true` if the state changed.
    pub fn dispatch(&mut self, action: A) -> bool {
        self.middleware.before(&action);
        let changed = self.store.dispatch(action.clone());
        self.middleware.after(&action, changed);
        changed
    }

    /// Get a reference to the current state
    pub fn state(&self) -> &S {
        self.store.state()
    }

    /// Get a reference to the middleware
    pub fn middleware(&self) -> &M {
        &self.middleware
    }
}

impl<S, A: Action, M: Middleware<A>> StateAccessor<S> for StoreWithMiddleware<S, A, M> {
    fn state(&self) -> &S {
        StoreWithMiddleware::state(self)
    }
}

impl<S, A: Action, M: Middleware<A>> Dispatcher<A> for StoreWithMiddleware<S, A, M> {
    fn dispatch(&mut self, action: A) {
        StoreWithMiddleware::dispatch(self, action);
    }
}

/// Hooks around each action a [`StoreWithMiddleware`] applies
pub trait Middleware<A: Action> {
    /// Called before the reducer sees the action
    fn before(&mut self, _action: &A) {}

    /// Called after the reducer, with whether state changed
    fn after(&mut self, action: &A, state_changed: bool);
}

/// One applied action, as recorded by [`ActionLog`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoggedAction {
    pub name: &'static str,
    pub state_changed: bool,
}

/// Middleware that records the name of every applied action
///
/// A gate that keeps dispatching without changing state shows up here as a
/// run of entries with `state_changed: false`.
#[derive(Debug, Clone, Default)]
pub struct ActionLog {
    entries: Vec<LoggedAction>,
}

impl ActionLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything applied so far, oldest first
    pub fn entries(&self) -> &[LoggedAction] {
        &self.entries
    }

    /// Names of the applied actions, oldest first
    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|entry| entry.name).collect()
    }

    /// Number of applied actions that left state unchanged
    pub fn unchanged_count(&self) -> usize {
        self.entries.iter().filter(|entry| !entry.state_changed).count()
    }
}

impl<A: Action> Middleware<A> for ActionLog {
    fn after(&mut self, action: &A, state_changed: bool) {
        self.entries.push(LoggedAction {
            name: action.name(),
            state_changed,
        });
    }
}
