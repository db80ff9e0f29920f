//! Mock invocation engine: pattern registries, cycling behavior chains and
//! invocation history.

pub mod behavior;
pub mod chain;
pub mod engine;
pub mod history;
pub mod registry;

pub use behavior::Behavior;
pub use chain::BehaviorChain;
pub use engine::Mock;
pub use history::{CallCount, Invocation, InvocationHistory, Outcome};
pub use registry::CallRegistry;
