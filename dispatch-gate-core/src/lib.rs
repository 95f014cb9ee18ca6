//! Core types for dispatch-gate
//!
//! A dispatch gate wraps a component so that every time the host renders it,
//! the gate looks at the store's state and the component's props and, when a
//! condition holds, dispatches an action built from those props.
//!
//! # Core Concepts
//!
//! - **Props**: a dynamic, string-keyed record of JSON values
//! - **Connector**: selects values out of state to merge over the props
//! - **ArgSpec**: names a prop, or derives a value, for each action argument
//! - **DispatchGate**: the per-cycle evaluation, pure via `on_cycle`
//! - **Gated**: a component wrapped by a gate
//! - **Store**: the host's reducer-based state container
//!
//! # Basic Example
//!
//! ```ignore
//! use dispatch_gate_core::prelude::*;
//! use serde_json::json;
//!
//! let gate = with_dispatch_on_update(
//!     GateConfig::new(|args| AppAction::FetchPage(args))
//!         .select("todos", |state: &AppState, _| json!(state.todos))
//!         .arg("page")
//!         .condition(|state, props| state.todos.is_none()),
//! );
//!
//! // dispatch into the host runtime's action queue
//! let mut list = gate.wrap(TodoList::default(), action_tx.clone());
//!
//! terminal.draw(|frame| {
//!     list.render(frame, frame.area(), GatedProps::new(store.state(), &props));
//! })?;
//! ```

pub mod action;
pub mod args;
pub mod component;
pub mod connector;
pub mod gate;
pub mod props;
pub mod store;
pub mod testing;

// Core trait exports
pub use action::Action;
pub use component::{Component, Gated, GatedProps};

// Gate exports
pub use args::{ArgSpec, Derivation};
pub use connector::{Connector, Selector};
pub use gate::{with_dispatch_on_update, ActionCreator, Condition, DispatchGate, GateConfig};
pub use props::{Props, PropsError};

// Store exports
pub use store::{
    ActionLog, Dispatcher, LoggedAction, Middleware, Reducer, StateAccessor, Store,
    StoreWithMiddleware,
};

// Re-export ratatui types for convenience
pub use ratatui::{layout::Rect, Frame};

// Testing exports
pub use testing::{buffer_to_string_plain, GateHarness, RenderHarness};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::action::Action;
    pub use crate::args::ArgSpec;
    pub use crate::component::{Component, Gated, GatedProps};
    pub use crate::connector::Connector;
    pub use crate::gate::{with_dispatch_on_update, DispatchGate, GateConfig};
    pub use crate::props::Props;
    pub use crate::store::{
        ActionLog, Dispatcher, Middleware, Reducer, StateAccessor, Store, StoreWithMiddleware,
    };

    pub use ratatui::{layout::Rect, Frame};
}
