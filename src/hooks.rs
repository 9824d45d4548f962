//! # Validation Hooks
//!
//! Callbacks the request pipeline runs around a handler once validation has
//! produced a result.
//!
//! - the **before** hook runs after request validation, before the handler
//! - the **after** hook runs after the handler's response was validated
//!
//! Both receive the request, the response, the validation error (if any)
//! and, for handlers bound to an instance, that instance. They observe only:
//! no return value, no effect on control flow. The defaults log the failure
//! through `tracing`; replace them with [`Hooks::with_before`] /
//! [`Hooks::with_after`] for custom reporting.
//!
//! ```rust
//! use opspec::hooks::{Hooks, RequestView, ResponseView, ValidationError};
//! use std::any::Any;
//!
//! let hooks = Hooks::default().with_before(
//!     |_req: &RequestView, _resp: &ResponseView, err: Option<&ValidationError>, _inst: Option<&dyn Any>| {
//!         if let Some(err) = err {
//!             eprintln!("{} failed validation", err.model);
//!         }
//!     },
//! );
//! hooks.before(&RequestView::default(), &ResponseView::default(), None, None);
//! ```

use crate::multidict::MultiDict;
use http::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::info;

/// One field-level failure reported by the validation engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    /// Path to the offending field, outermost first.
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl FieldError {
    pub fn new(loc: &[&str], msg: impl Into<String>, kind: impl Into<String>) -> Self {
        FieldError {
            loc: loc.iter().map(|s| s.to_string()).collect(),
            msg: msg.into(),
            kind: kind.into(),
        }
    }
}

/// Outcome of a failed model validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Name of the model that failed.
    pub model: String,
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    pub fn new(model: impl Into<String>, errors: Vec<FieldError>) -> Self {
        ValidationError {
            model: model.into(),
            errors,
        }
    }

    /// Field errors as a JSON array.
    pub fn errors_json(&self) -> Value {
        serde_json::to_value(&self.errors).unwrap_or(Value::Array(Vec::new()))
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} validation failed with {} error(s)",
            self.model,
            self.errors.len()
        )
    }
}

impl std::error::Error for ValidationError {}

/// Request as the pipeline hands it to hooks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestView {
    pub method: Method,
    pub path: String,
    pub query: MultiDict,
    pub headers: MultiDict,
    pub cookies: MultiDict,
    pub body: Option<Value>,
}

/// Response as the pipeline hands it to hooks.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseView {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: Value,
}

impl Default for ResponseView {
    fn default() -> Self {
        ResponseView {
            status: 200,
            headers: HashMap::new(),
            body: Value::Null,
        }
    }
}

/// A replaceable before/after validation callback.
pub trait ValidationHook: Send + Sync {
    fn call(
        &self,
        req: &RequestView,
        resp: &ResponseView,
        error: Option<&ValidationError>,
        instance: Option<&dyn Any>,
    );
}

impl<F> ValidationHook for F
where
    F: Fn(&RequestView, &ResponseView, Option<&ValidationError>, Option<&dyn Any>) + Send + Sync,
{
    fn call(
        &self,
        req: &RequestView,
        resp: &ResponseView,
        error: Option<&ValidationError>,
        instance: Option<&dyn Any>,
    ) {
        self(req, resp, error, instance)
    }
}

/// Log a failed request validation. Does nothing when `req_validation_error`
/// is `None`.
pub fn default_before_handler(
    _req: &RequestView,
    _resp: &ResponseView,
    req_validation_error: Option<&ValidationError>,
    _instance: Option<&dyn Any>,
) {
    if let Some(err) = req_validation_error {
        info!(
            model = %err.model,
            validation = %err.errors_json(),
            "Validation Error"
        );
    }
}

/// Log a failed response validation. Does nothing when
/// `resp_validation_error` is `None`.
pub fn default_after_handler(
    _req: &RequestView,
    _resp: &ResponseView,
    resp_validation_error: Option<&ValidationError>,
    _instance: Option<&dyn Any>,
) {
    if let Some(err) = resp_validation_error {
        info!(
            model = %err.model,
            validation = %err.errors_json(),
            "500 Response Validation Error"
        );
    }
}

/// The pair of hooks injected into the request pipeline.
#[derive(Clone)]
pub struct Hooks {
    before: Arc<dyn ValidationHook>,
    after: Arc<dyn ValidationHook>,
}

impl Default for Hooks {
    fn default() -> Self {
        Hooks {
            before: Arc::new(default_before_handler),
            after: Arc::new(default_after_handler),
        }
    }
}

impl Hooks {
    pub fn with_before(mut self, hook: impl ValidationHook + 'static) -> Self {
        self.before = Arc::new(hook);
        self
    }

    pub fn with_after(mut self, hook: impl ValidationHook + 'static) -> Self {
        self.after = Arc::new(hook);
        self
    }

    pub fn before(
        &self,
        req: &RequestView,
        resp: &ResponseView,
        error: Option<&ValidationError>,
        instance: Option<&dyn Any>,
    ) {
        self.before.call(req, resp, error, instance);
    }

    pub fn after(
        &self,
        req: &RequestView,
        resp: &ResponseView,
        error: Option<&ValidationError>,
        instance: Option<&dyn Any>,
    ) {
        self.after.call(req, resp, error, instance);
    }
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks").finish_non_exhaustive()
    }
}
