//! Argument containers: ordered heterogeneous slot lists with typed access and
//! wildcard-aware prefix matching.

#![allow(missing_docs)]

pub mod coercion;
pub mod value;

use std::fmt;

use crate::core::errors::{Result, UnderstudyError};

pub use coercion::Arg;
pub use value::{ErrorValue, OutSlot, Record, Value, ValueKind, any};

/// Build an [`Args`] container from a list of expressions convertible into
/// [`Value`].
///
/// ```
/// use understudy::args;
/// use understudy::args::any;
///
/// let pattern = args!["Method1", any()];
/// assert_eq!(pattern.len(), 2);
/// ```
#[macro_export]
macro_rules! args {
    () => {
        $crate::args::Args::new()
    };
    ($($value:expr),+ $(,)?) => {
        $crate::args::Args::from(vec![$($crate::args::Value::from($value)),+])
    };
}

/// Ordered list of slot values. Grows and shrinks only at the end.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
    slots: Vec<Value>,
}

impl Args {
    #[must_use]
    pub const fn new() -> Self {
        Self { slots: Vec::new() }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Append one slot.
    pub fn push(&mut self, value: impl Into<Value>) {
        self.slots.push(value.into());
    }

    /// Append every element of a sequence value as its own slot.
    ///
    /// Lists contribute their elements, string sequences one string slot per
    /// entry and byte sequences one `u8` slot per byte.
    pub fn append_all(&mut self, collection: Value) -> Result<()> {
        match collection {
            Value::List(items) => self.slots.extend(items),
            Value::Strings(items) => self.slots.extend(items.into_iter().map(Value::Str)),
            Value::Bytes(items) => self.slots.extend(items.into_iter().map(Value::U8)),
            other => {
                return Err(UnderstudyError::NotACollection {
                    found: other.kind(),
                });
            }
        }
        Ok(())
    }

    /// Remove and return the final slot; `None` when empty.
    pub fn pop_last(&mut self) -> Option<Value> {
        self.slots.pop()
    }

    /// Handle to the slot at `index`; out-of-range yields an absent handle.
    #[must_use]
    pub fn get(&self, index: usize) -> Arg<'_> {
        Arg::new(self.slots.get(index))
    }

    #[must_use]
    pub fn values(&self) -> &[Value] {
        &self.slots
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.slots.iter()
    }

    /// Copy of the slots in `[start, end)`; `end = None` runs to the end.
    pub fn slice(&self, start: usize, end: Option<usize>) -> Result<Self> {
        let len = self.slots.len();
        let end_index = end.unwrap_or(len);
        if start > end_index || end_index > len {
            return Err(UnderstudyError::SliceOutOfRange {
                start,
                end: end_index,
                len,
            });
        }
        Ok(Self {
            slots: self.slots[start..end_index].to_vec(),
        })
    }

    /// Prefix match with `self` as the pattern.
    ///
    /// True iff `self` is no longer than `invocation` and every slot of `self`
    /// is a wildcard or structurally equal to the slot at the same index.
    /// Trailing invocation slots are ignored.
    #[must_use]
    pub fn matches(&self, invocation: &Self) -> bool {
        self.slots.len() <= invocation.slots.len()
            && self
                .slots
                .iter()
                .zip(&invocation.slots)
                .all(|(expected, actual)| expected.is_wildcard() || expected == actual)
    }

    /// Slots for which `keep` returns true, in order.
    #[must_use]
    pub fn filter<F>(&self, mut keep: F) -> Self
    where
        F: FnMut(Arg<'_>, usize) -> bool,
    {
        self.slots
            .iter()
            .enumerate()
            .filter(|&(index, value)| keep(Arg::new(Some(value)), index))
            .map(|(_, value)| value.clone())
            .collect()
    }

    /// New container built from `transform` applied to every slot.
    #[must_use]
    pub fn map<F>(&self, mut transform: F) -> Self
    where
        F: FnMut(Arg<'_>, usize) -> Value,
    {
        self.slots
            .iter()
            .enumerate()
            .map(|(index, value)| transform(Arg::new(Some(value)), index))
            .collect()
    }

    pub fn for_each<F>(&self, mut visit: F)
    where
        F: FnMut(Arg<'_>, usize),
    {
        for (index, value) in self.slots.iter().enumerate() {
            visit(Arg::new(Some(value)), index);
        }
    }

    /// Rendered slots, each truncated to `limit` characters (`0` = unlimited).
    #[must_use]
    pub fn render(&self, limit: usize) -> Vec<String> {
        self.slots.iter().map(|value| value.render(limit)).collect()
    }

    #[must_use]
    pub fn into_values(self) -> Vec<Value> {
        self.slots
    }
}

impl From<Vec<Value>> for Args {
    fn from(slots: Vec<Value>) -> Self {
        Self { slots }
    }
}

impl FromIterator<Value> for Args {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self {
            slots: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Args {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.into_iter()
    }
}

impl<'a> IntoIterator for &'a Args {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.iter()
    }
}

impl fmt::Display for Args {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Value::List(self.slots.clone()))
    }
}
