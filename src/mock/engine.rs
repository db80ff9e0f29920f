//! The [`Mock`] test double: named call registries, invocation routing and
//! history queries.

#![allow(missing_docs)]

use std::collections::HashMap;

use crate::args::{Args, Value};
use crate::core::config::Config;
use crate::core::errors::{Result, UnderstudyError};
use crate::logger::transcript::{TranscriptEntry, TranscriptEvent, TranscriptWriter};
use crate::mock::chain::BehaviorChain;
use crate::mock::history::{CallCount, InvocationHistory};
use crate::mock::registry::CallRegistry;

/// Test double that records expected calls and replays scripted responses.
///
/// Code under test forwards each call explicitly:
///
/// ```
/// use understudy::args;
/// use understudy::mock::Mock;
///
/// let mut mock = Mock::new();
/// mock.when("Method2", args![]).returns(args!["string value", 5678]);
///
/// let results = mock.called("Method2", args![]).unwrap();
/// assert_eq!(results.get(0).as_string(), "string value");
/// assert_eq!(results.get(1).as_i64().unwrap(), 5678);
/// assert!(mock.has_called("Method2", args![]).unwrap().once());
/// ```
///
/// A `Mock` is single-threaded: it is driven by one test, serially.
#[derive(Debug)]
pub struct Mock {
    calls: HashMap<String, CallRegistry>,
    transcript: Option<TranscriptWriter>,
    render_limit: usize,
}

impl Default for Mock {
    fn default() -> Self {
        Self::new()
    }
}

impl Mock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            calls: HashMap::new(),
            transcript: None,
            render_limit: Config::default().display.max_render_len,
        }
    }

    /// Mock configured from `config`; opens a transcript when enabled.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            calls: HashMap::new(),
            transcript: config
                .transcript
                .enabled
                .then(|| TranscriptWriter::open(&config.transcript)),
            render_limit: config.display.max_render_len,
        }
    }

    /// Attach a transcript writer.
    #[must_use]
    pub fn with_transcript(mut self, writer: TranscriptWriter) -> Self {
        self.transcript = Some(writer);
        self
    }

    /// Register `pattern` for `name` and return its chain for attaching
    /// behaviors. An identical pattern returns the chain already registered.
    pub fn when(&mut self, name: &str, pattern: Args) -> &mut BehaviorChain {
        if let Some(writer) = self.transcript.as_mut() {
            writer.write_entry(&TranscriptEntry::new(
                TranscriptEvent::Register,
                name,
                pattern.render(self.render_limit),
            ));
        }
        self.calls
            .entry(name.to_string())
            .or_default()
            .register(pattern)
    }

    /// Route a live invocation to the first matching pattern and execute its
    /// chain.
    pub fn called(&mut self, name: &str, args: Args) -> Result<Args> {
        let rendered = self
            .transcript
            .is_some()
            .then(|| args.render(self.render_limit));

        let Some(chain) = self
            .calls
            .get_mut(name)
            .and_then(|registry| registry.resolve_mut(&args))
        else {
            let err = UnderstudyError::UnregisteredCall {
                name: name.to_string(),
                args: Value::List(args.into_values()).render(self.render_limit),
            };
            self.log_failure(TranscriptEvent::Unmatched, name, rendered, None, &err);
            return Err(err);
        };

        let cursor = chain.cursor();
        let outcome = chain.execute(name, args);
        match &outcome {
            Ok(results) => {
                if let Some(writer) = self.transcript.as_mut() {
                    let mut entry = TranscriptEntry::new(
                        TranscriptEvent::Invoke,
                        name,
                        rendered.unwrap_or_default(),
                    )
                    .with_cursor(cursor);
                    if writer.include_results() {
                        entry = entry.with_results(results.render(self.render_limit));
                    }
                    writer.write_entry(&entry);
                }
            }
            Err(err) => {
                let event = if err.is_simulated() {
                    TranscriptEvent::Raise
                } else {
                    TranscriptEvent::Error
                };
                self.log_failure(event, name, rendered, Some(cursor), err);
            }
        }
        outcome
    }

    /// Like [`Mock::called`], but a trailing sequence argument is flattened
    /// into individual slots first. A trailing scalar is kept as one slot.
    pub fn called_var_arg(&mut self, name: &str, mut args: Args) -> Result<Args> {
        if let Some(last) = args.pop_last() {
            if last.is_collection() {
                args.append_all(last)?;
            } else {
                args.push(last);
            }
        }
        self.called(name, args)
    }

    /// Execution count of the chain registered for `pattern`.
    pub fn has_called(&self, name: &str, pattern: Args) -> Result<CallCount> {
        Ok(self.get_calls(name, pattern)?.count())
    }

    /// History of the chain registered for `pattern`. An identical pattern
    /// is preferred; otherwise the first registered pattern matching it.
    pub fn get_calls(&self, name: &str, pattern: Args) -> Result<&InvocationHistory> {
        self.calls
            .get(name)
            .and_then(|registry| registry.lookup(&pattern))
            .map(BehaviorChain::history)
            .ok_or_else(|| UnderstudyError::UnregisteredCall {
                name: name.to_string(),
                args: Value::List(pattern.into_values()).render(self.render_limit),
            })
    }

    /// Registered call names, sorted.
    #[must_use]
    pub fn call_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.calls.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of distinct patterns registered for `name`.
    #[must_use]
    pub fn pattern_count(&self, name: &str) -> usize {
        self.calls.get(name).map_or(0, CallRegistry::len)
    }

    pub fn flush_transcript(&mut self) {
        if let Some(writer) = self.transcript.as_mut() {
            writer.flush();
        }
    }

    fn log_failure(
        &mut self,
        event: TranscriptEvent,
        name: &str,
        rendered: Option<Vec<String>>,
        cursor: Option<usize>,
        err: &UnderstudyError,
    ) {
        if let Some(writer) = self.transcript.as_mut() {
            let mut entry =
                TranscriptEntry::new(event, name, rendered.unwrap_or_default()).with_error(err);
            entry.cursor = cursor;
            writer.write_entry(&entry);
        }
    }
}
