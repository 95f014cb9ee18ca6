//! Connected props: values selected from store state for a gate's own use

use std::fmt;

use serde_json::{Map, Value};

use crate::props::Props;

/// A selector reading a value out of state and incoming props.
pub type Selector<S> = Box<dyn Fn(&S, &Props) -> Value>;

/// Source of the connected props merged over incoming props each cycle.
pub enum Connector<S> {
    /// Output key to selector. Selectors run in declared order; a repeated
    /// key keeps the last selector's value.
    Select(Vec<(String, Selector<S>)>),
    /// Used verbatim as the connected value, skipping selection entirely.
    Passthrough(Value),
}

impl<S> Connector<S> {
    /// Add a selector, switching a passthrough connector to selection mode.
    pub fn select<F>(self, key: impl Into<String>, selector: F) -> Self
    where
        F: Fn(&S, &Props) -> Value + 'static,
    {
        let mut selectors = match self {
            Connector::Select(selectors) => selectors,
            Connector::Passthrough(_) => Vec::new(),
        };
        selectors.push((key.into(), Box::new(selector)));
        Connector::Select(selectors)
    }

    /// Compute the connected value for one cycle.
    pub fn connect(&self, state: &S, props: &Props) -> Value {
        match self {
            Connector::Select(selectors) => {
                let mut connected = Map::new();
                for (key, selector) in selectors {
                    connected.insert(key.clone(), selector(state, props));
                }
                Value::Object(connected)
            }
            Connector::Passthrough(value) => value.clone(),
        }
    }

    /// Whether this connector returns a fixed value instead of selecting.
    pub fn is_passthrough(&self) -> bool {
        matches!(self, Connector::Passthrough(_))
    }
}

impl<S> Default for Connector<S> {
    fn default() -> Self {
        Connector::Select(Vec::new())
    }
}

impl<S> fmt::Debug for Connector<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Connector::Select(selectors) => f
                .debug_tuple("Select")
                .field(&selectors.iter().map(|(k, _)| k).collect::<Vec<_>>())
                .finish(),
            Connector::Passthrough(value) => f.debug_tuple("Passthrough").field(value).finish(),
        }
    }
}
