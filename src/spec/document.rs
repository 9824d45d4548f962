//! # Document Assembly
//!
//! Groups per-handler operations into a full OpenAPI document.
//!
//! [`SpecBuilder`] owns the build order: every model referenced by any route
//! is registered first, then each route's operation is built against the
//! finished registry. Problems are collected and reported together.
//!
//! ```rust
//! use http::Method;
//! use opspec::config::SpecConfig;
//! use opspec::handler::HandlerMeta;
//! use opspec::model::JsonModel;
//! use opspec::spec::document::SpecBuilder;
//! use serde_json::json;
//!
//! let query = JsonModel::new(
//!     "ListQuery",
//!     json!({ "properties": { "limit": { "type": "integer" } } }),
//! )
//! .into_ref();
//! let doc = SpecBuilder::new(SpecConfig::default())
//!     .route("/pets", Method::GET, HandlerMeta::new("list_pets").query(query))
//!     .build()
//!     .unwrap();
//! assert!(doc.operation("/pets", &Method::GET).is_some());
//! ```

use super::build::build_operation;
use super::types::Operation;
use crate::config::SpecConfig;
use crate::handler::HandlerMeta;
use crate::registry::ModelRegistry;
use crate::validator::{issues_to_result, ValidationIssue};
use anyhow::Context;
use http::Method;
use oas3::OpenApiV3Spec;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use tracing::{debug, info};

/// A handler bound to a path and method by the serving layer.
#[derive(Debug, Clone)]
pub struct Route {
    pub path: String,
    pub method: Method,
    pub handler: HandlerMeta,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Info {
    pub title: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Components {
    pub schemas: Value,
}

/// Path to lower-case method to operation.
pub type Paths = BTreeMap<String, BTreeMap<String, Operation>>;

/// A complete API description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiDocument {
    pub openapi: String,
    pub info: Info,
    pub paths: Paths,
    pub components: Components,
}

impl ApiDocument {
    pub fn operation(&self, path: &str, method: &Method) -> Option<&Operation> {
        self.paths
            .get(path)?
            .get(&method.as_str().to_lowercase())
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize API document to JSON")
    }

    pub fn to_yaml(&self) -> anyhow::Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize API document to YAML")
    }

    /// Write the document, as YAML for `.yaml`/`.yml` paths and JSON otherwise.
    pub fn write_to(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        let is_yaml = matches!(
            path.extension().and_then(|ext| ext.to_str()),
            Some("yaml") | Some("yml")
        );
        let content = if is_yaml {
            self.to_yaml()?
        } else {
            self.to_json()?
        };
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write API document to {}", path.display()))?;
        info!(path = %path.display(), "wrote API document");
        Ok(())
    }

    /// Re-parse the document as an OpenAPI spec to check its structure.
    pub fn to_openapi(&self) -> anyhow::Result<OpenApiV3Spec> {
        let value = serde_json::to_value(self).context("Failed to serialize API document")?;
        serde_json::from_value(value).context("API document is not a valid OpenAPI document")
    }
}

/// Collects routes and assembles them into an [`ApiDocument`].
#[derive(Debug, Clone)]
pub struct SpecBuilder {
    config: SpecConfig,
    routes: Vec<Route>,
}

impl SpecBuilder {
    pub fn new(config: SpecConfig) -> Self {
        SpecBuilder {
            config,
            routes: Vec::new(),
        }
    }

    pub fn route(mut self, path: impl Into<String>, method: Method, handler: HandlerMeta) -> Self {
        self.add_route(path, method, handler);
        self
    }

    pub fn add_route(&mut self, path: impl Into<String>, method: Method, handler: HandlerMeta) {
        self.routes.push(Route {
            path: path.into(),
            method,
            handler,
        });
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn config(&self) -> &SpecConfig {
        &self.config
    }

    /// Register every model referenced by any route.
    pub fn build_registry(&self) -> ModelRegistry {
        let mut registry = ModelRegistry::new();
        for route in &self.routes {
            for model in route.handler.models() {
                registry.register(model.as_ref());
            }
        }
        registry
    }

    /// Build the full document.
    ///
    /// # Errors
    ///
    /// Fails when two routes share a path and method, when two handlers share
    /// an operation id, or when a handler's model cannot be resolved.
    pub fn build(&self) -> anyhow::Result<ApiDocument> {
        let registry = self.build_registry();
        let mut issues = Vec::new();
        let mut paths: Paths = BTreeMap::new();
        let mut operation_ids = HashSet::new();

        for route in &self.routes {
            let method = route.method.as_str().to_lowercase();
            let location = format!("{} → {}", route.path, route.method);

            let operation = match build_operation(
                &route.handler,
                &registry,
                self.config.validation_error_status,
            ) {
                Ok(op) => op,
                Err(err) => {
                    issues.push(ValidationIssue::new(&location, "UnregisteredModel", err.to_string()));
                    continue;
                }
            };

            if !operation_ids.insert(operation.operation_id.clone()) {
                issues.push(ValidationIssue::new(
                    &location,
                    "DuplicateOperationId",
                    format!("operationId `{}` is used more than once", operation.operation_id),
                ));
            }

            let methods = paths.entry(route.path.clone()).or_default();
            if methods.contains_key(&method) {
                issues.push(ValidationIssue::new(
                    &location,
                    "DuplicateRoute",
                    "More than one handler is registered for this path and method",
                ));
                continue;
            }
            debug!(path = %route.path, method = %method, handler = %route.handler.name, "built operation");
            methods.insert(method, operation);
        }

        issues_to_result(issues)?;

        Ok(ApiDocument {
            openapi: self.config.openapi_version.clone(),
            info: Info {
                title: self.config.title.clone(),
                version: self.config.version.clone(),
            },
            paths,
            components: Components {
                schemas: registry.components(),
            },
        })
    }
}
