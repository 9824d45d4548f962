#![allow(dead_code)]

use opspec::model::{JsonModel, ModelRef};
use serde_json::Value;
use std::io::Write;
use std::sync::{Arc, Mutex};

pub fn model(name: &str, schema: Value) -> ModelRef {
    JsonModel::new(name, schema).into_ref()
}

/// `{a: required string, b: optional integer}`
pub fn ab_model(name: &str) -> ModelRef {
    model(
        name,
        serde_json::json!({
            "type": "object",
            "properties": {
                "a": { "type": "string" },
                "b": { "type": "integer" }
            },
            "required": ["a"]
        }),
    )
}

/// In-memory sink for JSON-formatted log lines.
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl LogCapture {
    pub fn records(&self) -> Vec<Value> {
        let bytes = self.0.lock().unwrap().clone();
        String::from_utf8(bytes)
            .unwrap()
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }
}

/// Run `f` under a JSON subscriber and return every event it emitted.
pub fn capture_logs<F: FnOnce()>(f: F) -> Vec<Value> {
    let capture = LogCapture::default();
    let writer = capture.clone();
    let subscriber = tracing_subscriber::fmt()
        .json()
        .with_max_level(tracing::Level::TRACE)
        .with_writer(move || writer.clone())
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    capture.records()
}
