//! Test utilities for gated components
//!
//! - [`GateHarness`]: stands in for the host framework, re-running a gate
//!   whenever its props or store state change
//! - [`RenderHarness`]: renders into a ratatui `TestBackend` and returns text
//! - Assertion macros for verifying dispatched actions
//!
//! # Example
//!
//! ```ignore
//! use dispatch_gate::testing::GateHarness;
//!
//! let mut harness = GateHarness::new(gate, Store::new(AppState::default(), reducer));
//! harness.mount();
//!
//! harness.set_prop("show_todos", true);
//! assert_eq!(harness.dispatch_count(), 1);
//! ```

use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::{Frame, Terminal};
use serde_json::Value;

use crate::gate::DispatchGate;
use crate::props::Props;
use crate::store::Store;
use crate::Action;

/// Upper bound on back-to-back re-renders caused by the gate's own dispatches.
const MAX_SETTLE_CYCLES: usize = 64;

/// Simulated host for a gate.
///
/// Mirrors what a connected component sees: it re-renders (runs a gate cycle)
/// when its props are set and whenever a dispatch changes store state,
/// including dispatches made by the gate itself. Every action the gate
/// produces is recorded.
///
/// # Panics
///
/// A gate that keeps dispatching state-changing actions on every cycle never
/// settles; after a bounded number of consecutive cycles the harness panics.
pub struct GateHarness<S, A: Action> {
    gate: DispatchGate<S, A>,
    store: Store<S, A>,
    props: Props,
    dispatched: Vec<A>,
    cycles: usize,
}

impl<S, A: Action> GateHarness<S, A> {
    /// Create a harness with empty props. Nothing runs until [`mount`](Self::mount).
    pub fn new(gate: DispatchGate<S, A>, store: Store<S, A>) -> Self {
        Self::with_props(gate, store, Props::new())
    }

    /// Start with initial props. Nothing renders until [`mount`](Self::mount).
    pub fn with_props(gate: DispatchGate<S, A>, store: Store<S, A>, props: Props) -> Self {
        Self {
            gate,
            store,
            props,
            dispatched: Vec::new(),
            cycles: 0,
        }
    }

    /// Initial render.
    pub fn mount(&mut self) {
        self.render();
    }

    /// Set one prop and re-render.
    pub fn set_prop(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.props.insert(key, value);
        self.render();
    }

    /// Replace all props and re-render.
    pub fn set_props(&mut self, props: Props) {
        self.props = props;
        self.render();
    }

    /// Dispatch an action from outside the gate. Re-renders if state changed.
    pub fn dispatch(&mut self, action: A) -> bool {
        let changed = self.store.dispatch(action);
        if changed {
            self.render();
        }
        changed
    }

    /// Run gate cycles until one of them does not change state.
    pub fn render(&mut self) {
        for _ in 0..MAX_SETTLE_CYCLES {
            self.cycles += 1;
            let Some(action) = self.gate.on_cycle(self.store.state(), &self.props) else {
                return;
            };
            self.dispatched.push(action.clone());
            if !self.store.dispatch(action) {
                return;
            }
        }
        panic!("gate did not settle after {MAX_SETTLE_CYCLES} consecutive dispatches");
    }

    /// Current store state.
    pub fn state(&self) -> &S {
        self.store.state()
    }

    /// Props the next render will receive.
    pub fn props(&self) -> &Props {
        &self.props
    }

    /// All actions the gate has dispatched, oldest first.
    pub fn dispatched(&self) -> &[A] {
        &self.dispatched
    }

    /// Number of actions the gate has dispatched.
    pub fn dispatch_count(&self) -> usize {
        self.dispatched.len()
    }

    /// Most recent gate action, if any.
    pub fn last_dispatched(&self) -> Option<&A> {
        self.dispatched.last()
    }

    /// Take the recorded actions, leaving the record empty.
    pub fn drain_dispatched(&mut self) -> Vec<A> {
        std::mem::take(&mut self.dispatched)
    }

    /// Number of gate cycles run so far.
    pub fn cycles(&self) -> usize {
        self.cycles
    }
}

/// Renders into an in-memory terminal for assertions on output.
pub struct RenderHarness {
    terminal: Terminal<TestBackend>,
}

impl RenderHarness {
    /// Create a harness with a `width` x `height` test terminal.
    pub fn new(width: u16, height: u16) -> Self {
        let terminal =
            Terminal::new(TestBackend::new(width, height)).expect("TestBackend never fails");
        Self { terminal }
    }

    /// Draw one frame and return the resulting buffer.
    pub fn render<F>(&mut self, draw: F) -> &Buffer
    where
        F: FnOnce(&mut Frame),
    {
        self.terminal
            .draw(draw)
            .expect("TestBackend never fails");
        self.terminal.backend().buffer()
    }

    /// Draw one frame and return its text, one line per row, styles dropped.
    pub fn render_to_string_plain<F>(&mut self, draw: F) -> String
    where
        F: FnOnce(&mut Frame),
    {
        buffer_to_string_plain(self.render(draw))
    }
}

/// Buffer text, one line per row, without styling.
pub fn buffer_to_string_plain(buffer: &Buffer) -> String {
    let width = usize::from(buffer.area.width).max(1);
    buffer
        .content
        .chunks(width)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Assert that a specific action was dispatched.
///
/// # Example
///
/// ```ignore
/// assert_emitted!(harness.dispatched(), Action::Fetch { .. });
/// ```
#[macro_export]
macro_rules! assert_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            $actions.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
            "Expected action matching `{}` to be emitted, but got: {:?}",
            stringify!($pattern),
            $actions
        );
    };
}

/// Assert that a specific action was NOT dispatched.
#[macro_export]
macro_rules! assert_not_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            !$actions.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
            "Expected action matching `{}` NOT to be emitted, but it was: {:?}",
            stringify!($pattern),
            $actions
        );
    };
}

/// Find the first action matching a pattern.
#[macro_export]
macro_rules! find_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        $actions.iter().find(|a| matches!(a, $pattern $(if $guard)?))
    };
}

/// Count how many actions match a pattern.
#[macro_export]
macro_rules! count_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        $actions.iter().filter(|a| matches!(a, $pattern $(if $guard)?)).count()
    };
}
