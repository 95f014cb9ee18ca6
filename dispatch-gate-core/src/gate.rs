//! The dispatch gate
//!
//! A gate is configured once and then evaluated on every render cycle the
//! host performs. Each cycle it:
//!
//! 1. computes connected props from state through its [`Connector`]
//! 2. merges them over the incoming props (connected props win)
//! 3. checks readiness: every prop-named argument must be present, unless
//!    `require_all_props(false)` was set
//! 4. evaluates the condition over state and merged props
//! 5. if both hold, resolves the arguments in order and calls the action creator
//!
//! [`DispatchGate::on_cycle`] does all of this without side effects and hands
//! the action back. [`DispatchGate::run`] and the [`Gated`] component are the
//! adapters that actually dispatch it.
//!
//! Nothing is cached between cycles. A qualifying cycle dispatches every time;
//! coalescing re-renders is the host's job.
//!
//! # Example
//!
//! ```
//! use dispatch_gate_core::{Action, GateConfig, Props, with_dispatch_on_update};
//! use serde_json::json;
//!
//! #[derive(Clone, Debug, PartialEq)]
//! enum TodoAction {
//!     Fetch,
//! }
//!
//! impl Action for TodoAction {
//!     fn name(&self) -> &'static str {
//!         "Fetch"
//!     }
//! }
//!
//! struct TodoState {
//!     todos: Option<Vec<String>>,
//! }
//!
//! let gate = with_dispatch_on_update(
//!     GateConfig::new(|_args| TodoAction::Fetch)
//!         .select("todos", |state: &TodoState, _| json!(state.todos))
//!         .condition(|state, props| {
//!             state.todos.is_none() && props.get("show_todos") == Some(&json!(true))
//!         }),
//! );
//!
//! let state = TodoState { todos: None };
//! assert_eq!(gate.on_cycle(&state, &Props::new().with("show_todos", false)), None);
//! assert_eq!(
//!     gate.on_cycle(&state, &Props::new().with("show_todos", true)),
//!     Some(TodoAction::Fetch)
//! );
//! ```

use std::fmt;

use serde_json::Value;
use tracing::{debug, trace};

use crate::args::{self, ArgSpec};
use crate::component::Gated;
use crate::connector::Connector;
use crate::props::Props;
use crate::store::{Dispatcher, StateAccessor};
use crate::Action;

/// Builds the action from the resolved argument values.
pub type ActionCreator<A> = Box<dyn Fn(Vec<Value>) -> A>;

/// Predicate over state and merged props.
pub type Condition<S> = Box<dyn Fn(&S, &Props) -> bool>;

/// Configuration captured by the first stage of the gate factory.
///
/// Only the action creator is required. Defaults:
/// - condition: always true
/// - args: none
/// - connector: an empty selector mapping
/// - require all props: `true`
pub struct GateConfig<S, A> {
    action: ActionCreator<A>,
    condition: Condition<S>,
    args: Vec<ArgSpec>,
    connector: Connector<S>,
    should_require_all_props: bool,
}

impl<S, A: Action> GateConfig<S, A> {
    /// Start a configuration around the action creator.
    ///
    /// The creator receives the resolved argument values in declaration order.
    pub fn new<F>(action: F) -> Self
    where
        F: Fn(Vec<Value>) -> A + 'static,
    {
        Self {
            action: Box::new(action),
            condition: Box::new(|_, _| true),
            args: Vec::new(),
            connector: Connector::default(),
            should_require_all_props: true,
        }
    }

    /// Set the predicate that must hold for a cycle to dispatch.
    pub fn condition<F>(mut self, condition: F) -> Self
    where
        F: Fn(&S, &Props) -> bool + 'static,
    {
        self.condition = Box::new(condition);
        self
    }

    /// Append one argument descriptor.
    pub fn arg(mut self, arg: impl Into<ArgSpec>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several argument descriptors, keeping their order.
    pub fn args<I>(mut self, args: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<ArgSpec>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Append a derived argument.
    pub fn derived_arg<F>(self, f: F) -> Self
    where
        F: Fn(&Props) -> Value + 'static,
    {
        self.arg(ArgSpec::derived(f))
    }

    /// Replace the connector wholesale.
    pub fn connector(mut self, connector: Connector<S>) -> Self {
        self.connector = connector;
        self
    }

    /// Add a selector to the connector mapping.
    pub fn select<F>(mut self, key: impl Into<String>, selector: F) -> Self
    where
        F: Fn(&S, &Props) -> Value + 'static,
    {
        self.connector = self.connector.select(key, selector);
        self
    }

    /// Use `value` verbatim as the connected props.
    pub fn passthrough(mut self, value: impl Into<Value>) -> Self {
        self.connector = Connector::Passthrough(value.into());
        self
    }

    /// Whether every named argument must be present before dispatching.
    ///
    /// Derived arguments are never checked.
    pub fn require_all_props(mut self, require: bool) -> Self {
        self.should_require_all_props = require;
        self
    }
}

impl<S, A> fmt::Debug for GateConfig<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GateConfig")
            .field("args", &self.args)
            .field("connector", &self.connector)
            .field("should_require_all_props", &self.should_require_all_props)
            .finish_non_exhaustive()
    }
}

/// A configured gate, ready to wrap a component or to be evaluated directly.
pub struct DispatchGate<S, A> {
    config: GateConfig<S, A>,
}

/// First stage of the two-stage factory: capture the configuration.
///
/// The second stage is [`DispatchGate::wrap`].
pub fn with_dispatch_on_update<S, A: Action>(config: GateConfig<S, A>) -> DispatchGate<S, A> {
    DispatchGate::new(config)
}

impl<S, A: Action> DispatchGate<S, A> {
    /// Create a gate from a finished configuration
    pub fn new(config: GateConfig<S, A>) -> Self {
        Self { config }
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &GateConfig<S, A> {
        &self.config
    }

    /// Incoming props with this cycle's connected props merged over them.
    pub fn merge_props(&self, state: &S, props: &Props) -> Props {
        Props::merged(props, self.config.connector.connect(state, props))
    }

    /// Readiness over already-merged props.
    pub fn is_ready(&self, merged: &Props) -> bool {
        !self.config.should_require_all_props
            || args::has_required_props(&self.config.args, merged)
    }

    /// Evaluate one cycle and return the action to dispatch, if any.
    ///
    /// Pure apart from whatever the caller's selectors, condition and action
    /// creator do. Panics from those propagate unchanged.
    pub fn on_cycle(&self, state: &S, props: &Props) -> Option<A> {
        let merged = self.merge_props(state, props);

        if !self.is_ready(&merged) {
            trace!("gate skipped: required props missing");
            return None;
        }
        if !(self.config.condition)(state, &merged) {
            trace!("gate skipped: condition not met");
            return None;
        }

        let values = args::resolve_all(&self.config.args, &merged);
        let action = (self.config.action)(values);
        debug!(action = %action.name(), "gate dispatching");
        Some(action)
    }

    /// Evaluate one cycle against `host` and dispatch into it.
    ///
    /// Returns whether an action was dispatched.
    pub fn run<H>(&self, host: &mut H, props: &Props) -> bool
    where
        H: StateAccessor<S> + Dispatcher<A>,
    {
        match self.on_cycle(host.state(), props) {
            Some(action) => {
                host.dispatch(action);
                true
            }
            None => false,
        }
    }

    /// Second stage of the factory: wrap `component`, dispatching through
    /// `dispatcher`.
    pub fn wrap<C, D>(self, component: C, dispatcher: D) -> Gated<C, S, A, D>
    where
        D: Dispatcher<A>,
    {
        Gated::new(self, component, dispatcher)
    }
}

impl<S, A> fmt::Debug for DispatchGate<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchGate")
            .field("config", &self.config)
            .finish()
    }
}
