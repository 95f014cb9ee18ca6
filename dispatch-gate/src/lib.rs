//! dispatch-gate: dispatch store actions from a component's render cycle
//!
//! Wrap a component in a gate. Each time the host renders it, the gate merges
//! values selected from state over the component's props, and if the declared
//! props are present and a condition holds, dispatches an action built from
//! them. The wrapped component still sees only its own props.
//!
//! # Example
//! ```ignore
//! use dispatch_gate::prelude::*;
//! use serde_json::json;
//!
//! #[derive(Action, Clone, Debug)]
//! enum AppAction {
//!     FetchTodos,
//! }
//!
//! let gate = with_dispatch_on_update(
//!     GateConfig::new(|_| AppAction::FetchTodos)
//!         .select("todos", |state: &AppState, _| json!(state.todos))
//!         .condition(|state, props| {
//!             state.todos.is_none() && props.get("show_todos") == Some(&json!(true))
//!         }),
//! );
//! let mut todos = gate.wrap(TodoList::default(), action_tx.clone());
//! ```

// Re-export everything from core
pub use dispatch_gate_core::*;

// Assertion macros
pub use dispatch_gate_core::{assert_emitted, assert_not_emitted, count_emitted, find_emitted};

// Re-export derive macros
pub use dispatch_gate_macros::Action;

/// Prelude for convenient imports
pub mod prelude {
    // Traits
    pub use dispatch_gate_core::{Action, Component, Dispatcher, StateAccessor};

    // Gate
    pub use dispatch_gate_core::{
        with_dispatch_on_update, ArgSpec, Connector, DispatchGate, GateConfig, Gated, GatedProps,
        Props,
    };

    // Store
    pub use dispatch_gate_core::{ActionLog, Middleware, Reducer, Store, StoreWithMiddleware};

    // Derive macros
    pub use dispatch_gate_macros::Action;

    // Ratatui re-exports
    pub use dispatch_gate_core::{Frame, Rect};
}
