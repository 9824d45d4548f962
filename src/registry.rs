//! # Model Registry
//!
//! Build-time lookup table from model name to schema.
//!
//! The registry is filled once, before any operation is built, and only read
//! afterwards. It is passed explicitly to the builders that need it.
//! Nested `definitions`/`$defs` blocks are hoisted into their own entries so
//! the registry maps one-to-one onto OpenAPI `components.schemas`.

use crate::error::SpecError;
use crate::model::{Model, ModelSchema};
use serde_json::{Map, Value};
use std::collections::HashMap;
use tracing::debug;

const COMPONENT_PREFIX: &str = "#/components/schemas/";
const LOCAL_DEF_PREFIXES: [&str; 2] = ["#/definitions/", "#/$defs/"];

/// Model name to schema mapping, populated once per spec build.
#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    schemas: Map<String, Value>,
    parsed: HashMap<String, ModelSchema>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a model under its own name.
    pub fn register(&mut self, model: &dyn Model) {
        self.register_schema(model.name(), model.schema());
    }

    /// Register a raw schema under `name`, hoisting nested definitions.
    ///
    /// A later registration under the same name replaces the earlier one.
    pub fn register_schema(&mut self, name: &str, mut schema: Value) {
        for (def_name, def) in take_definitions(&mut schema) {
            self.register_schema(&def_name, def);
        }
        rewrite_local_refs(&mut schema);
        debug!(model = %name, "registered model schema");
        self.parsed
            .insert(name.to_string(), ModelSchema::from_value(&schema));
        self.schemas.insert(name.to_string(), schema);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.parsed.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&ModelSchema> {
        self.parsed.get(name)
    }

    /// Look up a model that a handler depends on.
    ///
    /// A miss means the registry was not populated before building; it is
    /// reported as [`SpecError::ModelNotRegistered`].
    pub fn lookup(&self, name: &str, handler: &str) -> Result<&ModelSchema, SpecError> {
        self.get(name).ok_or_else(|| SpecError::ModelNotRegistered {
            model: name.to_string(),
            handler: handler.to_string(),
        })
    }

    /// Full schema as registered (with references rewritten).
    pub fn schema(&self, name: &str) -> Option<&Value> {
        self.schemas.get(name)
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Render as an OpenAPI `components.schemas` object, in registration order.
    pub fn components(&self) -> Value {
        Value::Object(self.schemas.clone())
    }
}

/// Reference to a registered component schema.
pub fn component_ref(name: &str) -> Value {
    serde_json::json!({ "$ref": format!("{COMPONENT_PREFIX}{name}") })
}

fn take_definitions(schema: &mut Value) -> Vec<(String, Value)> {
    let mut hoisted = Vec::new();
    if let Value::Object(obj) = schema {
        for key in ["definitions", "$defs"] {
            if let Some(Value::Object(defs)) = obj.remove(key) {
                hoisted.extend(defs);
            }
        }
    }
    hoisted
}

fn rewrite_local_refs(value: &mut Value) {
    match value {
        Value::Object(obj) => {
            if let Some(Value::String(target)) = obj.get_mut("$ref") {
                let rewritten = LOCAL_DEF_PREFIXES
                    .iter()
                    .find_map(|prefix| target.strip_prefix(prefix))
                    .map(|name| format!("{COMPONENT_PREFIX}{name}"));
                if let Some(rewritten) = rewritten {
                    *target = rewritten;
                }
            }
            for v in obj.values_mut() {
                rewrite_local_refs(v);
            }
        }
        Value::Array(items) => {
            for v in items.iter_mut() {
                rewrite_local_refs(v);
            }
        }
        _ => {}
    }
}
