#![forbid(unsafe_code)]

//! understudy: test doubles for Rust unit tests.
//!
//! Three layers:
//! 1. **Argument containers** ([`args`]): ordered heterogeneous slots with
//!    typed coercion and wildcard-aware prefix matching
//! 2. **Mock engine** ([`mock`]): named call patterns, cycling behavior
//!    chains and per-pattern invocation history
//! 3. **Probes** ([`probe`]): pure predicates for assertion verdicts
//!
//! # Library usage
//!
//! ```rust
//! use understudy::prelude::*;
//!
//! let mut mock = Mock::new();
//! mock.when("Load", args![any()])
//!     .returns(args!["cached"])
//!     .raises("backend down");
//!
//! assert_eq!(mock.called("Load", args!["k1"]).unwrap(), args!["cached"]);
//! let err = mock.called("Load", args!["k2"]).unwrap_err();
//! assert!(err.is_simulated());
//! assert!(mock.has_called("Load", args![any()]).unwrap().twice());
//! ```

pub mod prelude;

pub mod args;
pub mod core;
pub mod logger;
pub mod mock;
pub mod probe;
