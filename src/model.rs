//! # Model Module
//!
//! Structured-data models as seen by the spec builders.
//!
//! A [`Model`] is anything that can name itself and describe its fields as a
//! JSON Schema object. Field validation lives elsewhere; the builders only
//! need the schema. [`JsonModel`] is the plain implementation used when the
//! schema is already at hand (hand-written, generated, or derived by another
//! crate).
//!
//! ```rust
//! use opspec::model::{JsonModel, Model};
//! use serde_json::json;
//!
//! let query = JsonModel::new(
//!     "ListQuery",
//!     json!({
//!         "type": "object",
//!         "properties": { "limit": { "type": "integer" } },
//!         "required": ["limit"]
//!     }),
//! );
//! assert_eq!(query.name(), "ListQuery");
//! assert!(query.has_required_fields());
//! ```

use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// A named structured-data model with a JSON Schema description.
pub trait Model: Send + Sync {
    /// Registered name of the model, used as the component key.
    fn name(&self) -> &str;

    /// Full JSON Schema of the model (an object schema).
    fn schema(&self) -> Value;

    /// Whether any field of the model is required.
    fn has_required_fields(&self) -> bool {
        !ModelSchema::from_value(&self.schema()).required.is_empty()
    }
}

/// Shared reference to a model attached to a handler.
pub type ModelRef = Arc<dyn Model>;

impl fmt::Debug for dyn Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model").field("name", &self.name()).finish()
    }
}

/// Structural view of a model: its properties in declaration order and the
/// names of its required fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelSchema {
    pub properties: Map<String, Value>,
    pub required: Vec<String>,
}

impl ModelSchema {
    /// Read `properties` and `required` out of an object schema.
    ///
    /// Missing or malformed keys are treated as empty. Required names that
    /// do not appear in `properties` are dropped so that `required` stays a
    /// subset of the property keys.
    pub fn from_value(schema: &Value) -> Self {
        let properties = schema
            .get("properties")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();
        let required = schema
            .get("required")
            .and_then(Value::as_array)
            .map(|names| {
                names
                    .iter()
                    .filter_map(Value::as_str)
                    .filter(|name| properties.contains_key(*name))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        ModelSchema {
            properties,
            required,
        }
    }

    pub fn is_required(&self, field: &str) -> bool {
        self.required.iter().any(|name| name == field)
    }
}

/// A model whose schema is supplied directly as JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonModel {
    name: String,
    schema: Value,
}

impl JsonModel {
    pub fn new(name: impl Into<String>, schema: Value) -> Self {
        JsonModel {
            name: name.into(),
            schema,
        }
    }

    /// Wrap into the shared reference form handlers carry.
    pub fn into_ref(self) -> ModelRef {
        Arc::new(self)
    }
}

impl Model for JsonModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn schema(&self) -> Value {
        self.schema.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_model_schema_keeps_declaration_order() {
        let schema = ModelSchema::from_value(&json!({
            "properties": {
                "zeta": { "type": "string" },
                "alpha": { "type": "integer" },
                "mid": { "type": "boolean" }
            },
            "required": ["alpha"]
        }));
        let names: Vec<&str> = schema.properties.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
        assert!(schema.is_required("alpha"));
        assert!(!schema.is_required("zeta"));
    }

    #[test]
    fn test_model_schema_drops_unknown_required() {
        let schema = ModelSchema::from_value(&json!({
            "properties": { "a": { "type": "string" } },
            "required": ["a", "ghost"]
        }));
        assert_eq!(schema.required, vec!["a".to_string()]);
    }

    #[test]
    fn test_model_schema_without_properties() {
        let schema = ModelSchema::from_value(&json!({ "type": "object" }));
        assert!(schema.properties.is_empty());
        assert!(schema.required.is_empty());
    }

    #[test]
    fn test_has_required_fields() {
        let optional = JsonModel::new(
            "Optional",
            json!({ "properties": { "a": { "type": "string" } } }),
        );
        assert!(!optional.has_required_fields());
    }
}
