//! Convenience re-exports for test code.
//!
//! ```rust
//! use understudy::prelude::*;
//! ```

pub use crate::args;

// Core
pub use crate::core::config::Config;
pub use crate::core::errors::{ErrorCategory, Result, UnderstudyError};

// Argument containers
pub use crate::args::{Arg, Args, ErrorValue, OutSlot, Record, Value, ValueKind, any};

// Mock engine
pub use crate::mock::{
    Behavior, BehaviorChain, CallCount, InvocationHistory, Mock, Outcome,
};

// Probes
pub use crate::probe::Listing;
