//! Per-name pattern registry: registration, de-duplication and
//! first-match-wins resolution.

#![allow(missing_docs)]

use crate::args::Args;
use crate::mock::chain::BehaviorChain;

#[derive(Debug)]
struct RegistryEntry {
    pattern: Args,
    chain: BehaviorChain,
}

/// Registered `(pattern, chain)` pairs for one call name, in registration
/// order.
#[derive(Debug, Default)]
pub struct CallRegistry {
    entries: Vec<RegistryEntry>,
}

impl CallRegistry {
    /// Chain for `pattern`, creating an empty one unless a structurally
    /// identical pattern is already registered.
    ///
    /// Identity is plain equality, wildcards included: `(1, any)` and
    /// `(1, 2)` are separate entries even though one matches the other.
    pub fn register(&mut self, pattern: Args) -> &mut BehaviorChain {
        let position = match self.position_of(&pattern) {
            Some(position) => position,
            None => {
                self.entries.push(RegistryEntry {
                    pattern,
                    chain: BehaviorChain::default(),
                });
                self.entries.len() - 1
            }
        };
        &mut self.entries[position].chain
    }

    /// First chain, in registration order, whose pattern matches
    /// `invocation`.
    #[must_use]
    pub fn resolve(&self, invocation: &Args) -> Option<&BehaviorChain> {
        self.entries
            .iter()
            .find(|entry| entry.pattern.matches(invocation))
            .map(|entry| &entry.chain)
    }

    pub fn resolve_mut(&mut self, invocation: &Args) -> Option<&mut BehaviorChain> {
        self.entries
            .iter_mut()
            .find(|entry| entry.pattern.matches(invocation))
            .map(|entry| &mut entry.chain)
    }

    /// Chain for a history query: an identical pattern wins, otherwise the
    /// first matching one.
    #[must_use]
    pub fn lookup(&self, pattern: &Args) -> Option<&BehaviorChain> {
        self.position_of(pattern)
            .map(|position| &self.entries[position].chain)
            .or_else(|| self.resolve(pattern))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn patterns(&self) -> impl Iterator<Item = &Args> {
        self.entries.iter().map(|entry| &entry.pattern)
    }

    fn position_of(&self, pattern: &Args) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.pattern == *pattern)
    }
}
