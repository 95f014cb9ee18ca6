//! Action trait for store messages produced by a gate

use std::fmt::Debug;

/// Marker trait for actions that can be dispatched to the store
///
/// A gate's action creator returns one of these. Actions should be:
/// - Clone: the test harness records every dispatched action
/// - Debug: for logging and assertion messages
/// - Send + 'static: so they can be queued through a channel to the host runtime
///
/// Use `#[derive(Action)]` from `dispatch-gate-macros` to auto-implement this trait.
pub trait Action: Clone + Debug + Send + 'static {
    /// Get the action name for logging
    fn name(&self) -> &'static str;
}
