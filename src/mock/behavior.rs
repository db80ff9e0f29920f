//! Scripted responses attached to a registered call pattern.

#![allow(missing_docs)]

use std::fmt;

use crate::args::{Args, Value};
use crate::core::errors::{Result, UnderstudyError};

/// Boxed transform used by [`Behavior::Custom`].
pub type Transform = Box<dyn FnMut(&Args) -> Result<Args>>;

/// One scripted response.
pub enum Behavior {
    /// Produce a fixed result container.
    Return(Args),
    /// Write `value` through the output slot at `slot` of the live
    /// invocation, then produce `results`.
    Inject {
        value: Value,
        slot: usize,
        results: Args,
    },
    /// Abort the call with a simulated failure carrying `payload`.
    Raise(Value),
    /// Arbitrary function of the invocation arguments.
    Custom(Transform),
}

impl Behavior {
    /// Run against the live invocation arguments.
    pub fn run(&mut self, invocation: &Args) -> Result<Args> {
        match self {
            Self::Return(results) => Ok(results.clone()),
            Self::Inject {
                value,
                slot,
                results,
            } => {
                let target = invocation.get(*slot);
                match target.elem() {
                    Some(Value::Slot(cell)) => {
                        cell.set(value.clone());
                        Ok(results.clone())
                    }
                    _ => Err(UnderstudyError::InjectTarget {
                        index: *slot,
                        found: target.kind(),
                    }),
                }
            }
            Self::Raise(payload) => Err(UnderstudyError::Raised {
                payload: payload.clone(),
            }),
            Self::Custom(transform) => transform(invocation),
        }
    }

    /// Short label used in diagnostics.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Return(_) => "return",
            Self::Inject { .. } => "inject",
            Self::Raise(_) => "raise",
            Self::Custom(_) => "custom",
        }
    }
}

impl fmt::Debug for Behavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Return(results) => f.debug_tuple("Return").field(results).finish(),
            Self::Inject {
                value,
                slot,
                results,
            } => f
                .debug_struct("Inject")
                .field("value", value)
                .field("slot", slot)
                .field("results", results)
                .finish(),
            Self::Raise(payload) => f.debug_tuple("Raise").field(payload).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
