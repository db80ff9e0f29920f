//! Opt-in JSONL invocation transcript with graceful degradation.

pub mod transcript;
