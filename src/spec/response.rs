//! Response containers and the status-code keyed response map.

use crate::model::ModelRef;
use crate::registry::component_ref;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::fmt;

pub const VALIDATION_ERROR_DESCRIPTION: &str = "Validation Error";

/// One entry of an operation's `responses` object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEntry {
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Value>,
}

impl ResponseEntry {
    pub fn new(description: impl Into<String>) -> Self {
        ResponseEntry {
            description: description.into(),
            content: None,
        }
    }

    pub fn validation_error() -> Self {
        Self::new(VALIDATION_ERROR_DESCRIPTION)
    }
}

/// Status code string to response entry.
pub type ResponseMap = BTreeMap<String, ResponseEntry>;

/// The set of responses a handler declares.
///
/// Codes can be declared bare (no body) or bound to a model. A code bound to
/// a model wins over the same code declared bare.
#[derive(Clone, Default)]
pub struct Response {
    codes: Vec<u16>,
    code_models: Vec<(u16, ModelRef)>,
}

impl Response {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a status code without a response body.
    pub fn code(mut self, status: u16) -> Self {
        if !self.codes.contains(&status) {
            self.codes.push(status);
        }
        self
    }

    /// Declare a status code whose body is described by `model`.
    pub fn model(mut self, status: u16, model: ModelRef) -> Self {
        self.code_models.retain(|(code, _)| *code != status);
        self.code_models.push((status, model));
        self
    }

    pub fn has_model(&self) -> bool {
        !self.code_models.is_empty()
    }

    pub fn models(&self) -> impl Iterator<Item = &ModelRef> {
        self.code_models.iter().map(|(_, model)| model)
    }

    pub fn find_model(&self, status: u16) -> Option<&ModelRef> {
        self.code_models
            .iter()
            .find(|(code, _)| *code == status)
            .map(|(_, model)| model)
    }

    pub fn generate_spec(&self) -> ResponseMap {
        let mut responses = ResponseMap::new();
        for &status in &self.codes {
            responses.insert(status.to_string(), ResponseEntry::new(reason_phrase(status)));
        }
        for (status, model) in &self.code_models {
            responses.insert(
                status.to_string(),
                ResponseEntry {
                    description: reason_phrase(*status),
                    content: Some(json!({
                        "application/json": { "schema": component_ref(model.name()) }
                    })),
                },
            );
        }
        responses
    }
}

impl fmt::Debug for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let models: Vec<(u16, &str)> = self
            .code_models
            .iter()
            .map(|(code, model)| (*code, model.name()))
            .collect();
        f.debug_struct("Response")
            .field("codes", &self.codes)
            .field("code_models", &models)
            .finish()
    }
}

fn reason_phrase(status: u16) -> String {
    StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::JsonModel;

    #[test]
    fn test_reason_phrase() {
        assert_eq!(reason_phrase(404), "Not Found");
        assert_eq!(reason_phrase(599), "");
    }

    #[test]
    fn test_model_code_overrides_bare_code() {
        let model = JsonModel::new("Pet", json!({ "type": "object" })).into_ref();
        let resp = Response::new().code(200).model(200, model);
        let spec = resp.generate_spec();
        assert_eq!(spec.len(), 1);
        assert_eq!(
            spec["200"].content,
            Some(json!({
                "application/json": { "schema": { "$ref": "#/components/schemas/Pet" } }
            }))
        );
    }
}
