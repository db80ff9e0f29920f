//! Cycling behavior chains.
//!
//! A chain holds the behaviors registered for one pattern plus a cursor. Each
//! execution runs the behavior under the cursor, records the outcome and moves
//! the cursor forward modulo the chain length, so `n` behaviors repeat with
//! period `n`.

#![allow(missing_docs)]

use crate::args::{Args, Value};
use crate::core::errors::{Result, UnderstudyError};
use crate::mock::behavior::Behavior;
use crate::mock::history::{InvocationHistory, Outcome};

/// Ordered behaviors for one registered pattern, with their history.
#[derive(Debug, Default)]
pub struct BehaviorChain {
    behaviors: Vec<Behavior>,
    cursor: usize,
    history: InvocationHistory,
}

impl BehaviorChain {
    /// Append a behavior.
    pub fn push(&mut self, behavior: Behavior) -> &mut Self {
        self.behaviors.push(behavior);
        self
    }

    /// Respond with a fixed result container.
    pub fn returns(&mut self, results: Args) -> &mut Self {
        self.push(Behavior::Return(results))
    }

    /// Write `value` into the output slot at `slot`, then respond with
    /// `results`.
    pub fn inject(&mut self, value: impl Into<Value>, slot: usize, results: Args) -> &mut Self {
        self.push(Behavior::Inject {
            value: value.into(),
            slot,
            results,
        })
    }

    /// Fail the call with a simulated failure carrying `payload`.
    pub fn raises(&mut self, payload: impl Into<Value>) -> &mut Self {
        self.push(Behavior::Raise(payload.into()))
    }

    /// Respond with an arbitrary function of the invocation arguments.
    pub fn then<F>(&mut self, transform: F) -> &mut Self
    where
        F: FnMut(&Args) -> Result<Args> + 'static,
    {
        self.push(Behavior::Custom(Box::new(transform)))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.behaviors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.behaviors.is_empty()
    }

    /// Index of the behavior the next execution will run.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub const fn history(&self) -> &InvocationHistory {
        &self.history
    }

    /// Run the behavior under the cursor against `invocation`.
    ///
    /// The outcome is recorded with the exact arguments before it is
    /// returned. `name` only labels the empty-chain error.
    pub fn execute(&mut self, name: &str, invocation: Args) -> Result<Args> {
        let Some(behavior) = self.behaviors.get_mut(self.cursor) else {
            return Err(UnderstudyError::EmptyChain {
                name: name.to_string(),
            });
        };
        let outcome = behavior.run(&invocation);
        self.cursor = (self.cursor + 1) % self.behaviors.len();

        match outcome {
            Ok(results) => {
                self.history
                    .record(invocation, Outcome::Returned(results.clone()));
                Ok(results)
            }
            Err(err) => {
                let payload = err
                    .payload()
                    .cloned()
                    .unwrap_or_else(|| Value::error(err.to_string()));
                self.history.record(invocation, Outcome::Failed(payload));
                Err(err)
            }
        }
    }
}
