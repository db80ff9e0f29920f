#![allow(dead_code)]

use std::fs;
use std::path::Path;

use understudy::args;
use understudy::prelude::*;

/// Collaborator interface used by the end-to-end scenarios.
pub trait Object {
    fn method1(&mut self, arg1: &str, arg2: i32);
    fn method2(&mut self) -> (String, i32, Option<ErrorValue>);
    fn method3(&mut self, params: &[&str]) -> Value;
    fn method4(&mut self, pointer: &OutSlot) -> Option<ErrorValue>;
}

/// Hand-written double that forwards every call into a [`Mock`].
///
/// Trait methods cannot return `Result`, so engine failures abort the test
/// with their message, the same way an unexpected call would in production.
#[derive(Debug, Default)]
pub struct MockObject {
    pub mock: Mock,
}

impl MockObject {
    pub fn new() -> Self {
        Self::default()
    }
}

fn or_fail<T>(result: understudy::core::errors::Result<T>) -> T {
    result.unwrap_or_else(|err| err.into_panic())
}

impl Object for MockObject {
    fn method1(&mut self, arg1: &str, arg2: i32) {
        or_fail(self.mock.called("Method1", args![arg1, arg2]));
    }

    fn method2(&mut self) -> (String, i32, Option<ErrorValue>) {
        let results = or_fail(self.mock.called("Method2", args![]));
        (
            results.get(0).as_string(),
            or_fail(results.get(1).as_i32()),
            or_fail(results.get(2).as_error()).cloned(),
        )
    }

    fn method3(&mut self, params: &[&str]) -> Value {
        let results = or_fail(
            self.mock
                .called_var_arg("Method3", args![params.to_vec()]),
        );
        results.get(0).to_value()
    }

    fn method4(&mut self, pointer: &OutSlot) -> Option<ErrorValue> {
        let results = or_fail(self.mock.called("Method4", args![pointer]));
        or_fail(results.get(0).as_error()).cloned()
    }
}

/// Config with the transcript enabled at `path`.
pub fn transcript_config(path: &Path) -> Config {
    let mut config = Config::default();
    config.transcript.enabled = true;
    config.transcript.path = Some(path.to_path_buf());
    config
}

/// Parsed transcript lines.
pub fn read_transcript(path: &Path) -> Vec<serde_json::Value> {
    fs::read_to_string(path)
        .expect("read transcript")
        .lines()
        .map(|line| serde_json::from_str(line).expect("valid json line"))
        .collect()
}
