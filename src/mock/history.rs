//! Per-pattern invocation log and count probes.

#![allow(missing_docs)]

use crate::args::{Args, Value};
use crate::core::errors::{Result, UnderstudyError};

/// What one execution produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Returned(Args),
    /// The behavior failed; scripted raises keep their payload, other
    /// failures are recorded as error values carrying their message.
    Failed(Value),
}

/// One recorded execution.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub params: Args,
    pub outcome: Outcome,
}

/// Append-only log of executions, oldest first.
#[derive(Debug, Clone, Default)]
pub struct InvocationHistory {
    entries: Vec<Invocation>,
}

impl InvocationHistory {
    pub(crate) fn record(&mut self, params: Args, outcome: Outcome) {
        self.entries.push(Invocation { params, outcome });
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn count(&self) -> CallCount {
        CallCount {
            count: self.entries.len(),
        }
    }

    pub fn entry(&self, index: usize) -> Result<&Invocation> {
        self.entries
            .get(index)
            .ok_or(UnderstudyError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            })
    }

    /// Arguments of the `index`-th call.
    pub fn params(&self, index: usize) -> Result<&Args> {
        Ok(&self.entry(index)?.params)
    }

    /// Results of the `index`-th call. A call that raised replays its
    /// failure as [`UnderstudyError::Raised`].
    pub fn results(&self, index: usize) -> Result<&Args> {
        match &self.entry(index)?.outcome {
            Outcome::Returned(results) => Ok(results),
            Outcome::Failed(payload) => Err(UnderstudyError::Raised {
                payload: payload.clone(),
            }),
        }
    }

    /// Failure payload of the `index`-th call, `None` if it returned.
    pub fn failure(&self, index: usize) -> Result<Option<&Value>> {
        Ok(match &self.entry(index)?.outcome {
            Outcome::Returned(_) => None,
            Outcome::Failed(payload) => Some(payload),
        })
    }

    #[must_use]
    pub fn last_params(&self) -> Option<&Args> {
        self.entries.last().map(|entry| &entry.params)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Invocation> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a InvocationHistory {
    type Item = &'a Invocation;
    type IntoIter = std::slice::Iter<'a, Invocation>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Execution count of one pattern, with fluent comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallCount {
    count: usize,
}

impl CallCount {
    #[must_use]
    pub const fn count(self) -> usize {
        self.count
    }

    #[must_use]
    pub const fn times(self, times: usize) -> bool {
        self.count == times
    }

    #[must_use]
    pub const fn never(self) -> bool {
        self.times(0)
    }

    #[must_use]
    pub const fn once(self) -> bool {
        self.times(1)
    }

    #[must_use]
    pub const fn twice(self) -> bool {
        self.times(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;

    fn sample() -> InvocationHistory {
        let mut history = InvocationHistory::default();
        history.record(args!["a", 1], Outcome::Returned(args!["First"]));
        history.record(args!["b", 2], Outcome::Failed(Value::from("Second")));
        history
    }

    #[test]
    fn index_queries_return_recorded_entries() {
        let history = sample();
        assert_eq!(history.params(0).unwrap(), &args!["a", 1]);
        assert_eq!(history.results(0).unwrap(), &args!["First"]);
        assert_eq!(history.failure(0).unwrap(), None);
        assert_eq!(history.params(1).unwrap(), &args!["b", 2]);
        assert_eq!(history.failure(1).unwrap(), Some(&Value::from("Second")));
        assert_eq!(history.last_params(), Some(&args!["b", 2]));
    }

    #[test]
    fn raised_results_replay_the_failure() {
        let err = sample().results(1).unwrap_err();
        assert!(err.is_simulated());
        assert_eq!(err.payload(), Some(&Value::from("Second")));
    }

    #[test]
    fn out_of_range_index_is_reported() {
        let history = sample();
        for err in [
            history.params(2).unwrap_err(),
            history.results(2).unwrap_err(),
            history.failure(7).map(|_| ()).unwrap_err(),
        ] {
            assert_eq!(err.code(), "UDY-1003");
        }
    }

    #[test]
    fn count_probes() {
        let history = sample();
        let count = history.count();
        assert!(count.twice());
        assert!(!count.once());
        assert!(count.times(2));
        assert!(InvocationHistory::default().count().never());
    }
}
