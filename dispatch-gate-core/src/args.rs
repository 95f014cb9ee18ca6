//! Argument descriptors for a gate's action creator

use std::fmt;

use serde_json::Value;

use crate::props::Props;

/// A function deriving an argument value from merged props.
pub type Derivation = Box<dyn Fn(&Props) -> Value>;

/// How one action argument is obtained from the merged props.
pub enum ArgSpec {
    /// Read a prop by name. Counts toward readiness.
    Prop(String),
    /// Compute a value from the merged props. Never checked for readiness,
    /// even when it reads keys that are missing.
    Derived(Derivation),
}

impl ArgSpec {
    /// Read the named prop from the merged props.
    pub fn prop(name: impl Into<String>) -> Self {
        ArgSpec::Prop(name.into())
    }

    /// Compute the argument from the merged props.
    pub fn derived<F>(f: F) -> Self
    where
        F: Fn(&Props) -> Value + 'static,
    {
        ArgSpec::Derived(Box::new(f))
    }

    /// Resolve this descriptor against the merged props.
    ///
    /// Derivations see the whole merged record, not the arguments resolved
    /// before them.
    pub fn resolve(&self, merged: &Props) -> Value {
        match self {
            ArgSpec::Prop(name) => merged.lookup(name),
            ArgSpec::Derived(f) => f(merged),
        }
    }

    /// The prop name this descriptor requires, if any.
    pub fn required_prop(&self) -> Option<&str> {
        match self {
            ArgSpec::Prop(name) => Some(name),
            ArgSpec::Derived(_) => None,
        }
    }
}

impl fmt::Debug for ArgSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgSpec::Prop(name) => f.debug_tuple("Prop").field(name).finish(),
            ArgSpec::Derived(_) => f.write_str("Derived(..)"),
        }
    }
}

impl From<&str> for ArgSpec {
    fn from(name: &str) -> Self {
        ArgSpec::Prop(name.to_string())
    }
}

impl From<String> for ArgSpec {
    fn from(name: String) -> Self {
        ArgSpec::Prop(name)
    }
}

/// True when every prop-named descriptor resolves to a present value.
pub fn has_required_props(args: &[ArgSpec], merged: &Props) -> bool {
    args.iter()
        .filter_map(ArgSpec::required_prop)
        .all(|name| merged.is_present(name))
}

/// Resolve all descriptors in declared order.
pub fn resolve_all(args: &[ArgSpec], merged: &Props) -> Vec<Value> {
    args.iter().map(|arg| arg.resolve(merged)).collect()
}
