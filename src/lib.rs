//! # opspec
//!
//! **opspec** derives OpenAPI operation fragments from request handlers that
//! carry structured data models for their body, query parameters, headers,
//! cookies and responses.
//!
//! ## Overview
//!
//! Each handler is described once by a [`handler::HandlerMeta`]: its
//! registered name, its documentation text and the models attached to it.
//! At spec-build time the builders turn that record into:
//!
//! - a `summary`/`description` pair taken from the documentation
//! - a `parameters` list, one entry per query, header and cookie model field
//! - a `requestBody` fragment referencing the body model
//! - a `responses` map keyed by status code, with a `Validation Error` entry
//!   documented for handlers that can fail input validation
//!
//! The crate does not validate anything itself. It describes what would be
//! validated, and provides the default [`hooks`] the request pipeline calls
//! once validation has produced a result.
//!
//! ## Architecture
//!
//! - **[`model`]** - The [`model::Model`] trait and its JSON-backed implementation
//! - **[`registry`]** - Build-time model name to schema lookup
//! - **[`handler`]** - Handler metadata attached at registration time
//! - **[`spec`]** - Operation builders, request/response containers, document assembly
//! - **[`hooks`]** - Default before/after validation hooks
//! - **[`multidict`]** - Multi-valued query/header/cookie containers and flattening
//! - **[`config`]** - Document configuration from the environment
//! - **[`otel`]** - Structured logging setup
//!
//! ### Build Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant App
//!     participant Builder as spec::document::SpecBuilder
//!     participant Registry as registry::ModelRegistry
//!     participant Ops as spec::build_operation
//!
//!     App->>Builder: route(path, method, HandlerMeta)
//!     App->>Builder: build()
//!     Builder->>Registry: register every referenced model
//!     loop each route
//!         Builder->>Ops: build_operation(handler, &registry, status)
//!         Ops->>Ops: parse_comments / parse_params / parse_request / parse_resp
//!         Ops-->>Builder: Operation
//!     end
//!     Builder-->>App: ApiDocument
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use http::Method;
//! use opspec::config::SpecConfig;
//! use opspec::handler::HandlerMeta;
//! use opspec::model::JsonModel;
//! use opspec::spec::{document::SpecBuilder, Response};
//! use serde_json::json;
//!
//! let pet = JsonModel::new(
//!     "Pet",
//!     json!({
//!         "type": "object",
//!         "properties": { "name": { "type": "string" } },
//!         "required": ["name"]
//!     }),
//! )
//! .into_ref();
//!
//! let create_pet = HandlerMeta::new("create_pet")
//!     .doc("Create a pet")
//!     .body(pet.clone())
//!     .resp(Response::new().model(201, pet));
//!
//! let doc = SpecBuilder::new(SpecConfig::default())
//!     .route("/pets", Method::POST, create_pet)
//!     .build()
//!     .unwrap();
//!
//! let op = doc.operation("/pets", &Method::POST).unwrap();
//! assert!(op.responses.contains_key("422"));
//! ```

pub mod config;
pub mod error;
pub mod handler;
pub mod hooks;
pub mod model;
pub mod multidict;
pub mod otel;
pub mod registry;
pub mod spec;
pub mod validator;

pub use error::SpecError;
pub use handler::HandlerMeta;
pub use hooks::{default_after_handler, default_before_handler, Hooks, ValidationError};
pub use model::{JsonModel, Model, ModelRef, ModelSchema};
pub use multidict::{parse_multi_dict, MultiDict};
pub use registry::ModelRegistry;
pub use spec::{
    build_operation, has_model, parse_comments, parse_name, parse_params, parse_request,
    parse_resp, Operation, ParameterDescriptor, ParameterLocation, Response, ResponseMap,
};
