//! Request-body descriptions attached to handlers.

use crate::model::{ModelRef, ModelSchema};
use crate::registry::component_ref;
use serde_json::{json, Map, Value};
use std::fmt;
use std::sync::Arc;

pub const JSON_CONTENT_TYPE: &str = "application/json";
pub const OCTET_STREAM_CONTENT_TYPE: &str = "application/octet-stream";
pub const MULTIPART_CONTENT_TYPE: &str = "multipart/form-data";

/// A pre-built request-body description that can render itself.
pub trait RequestBody: Send + Sync {
    /// Body fragment for an operation's `requestBody`.
    fn generate_spec(&self) -> Map<String, Value>;

    /// Model carried by the body, if any. Registered before building.
    fn model(&self) -> Option<&ModelRef>;

    fn has_model(&self) -> bool {
        self.model().is_some()
    }
}

/// Default request-body adapter around a single model.
#[derive(Clone)]
pub struct Request {
    model: Option<ModelRef>,
    content_type: String,
    encoding: String,
}

impl Request {
    pub fn new(model: ModelRef) -> Self {
        Request {
            model: Some(model),
            content_type: JSON_CONTENT_TYPE.to_string(),
            encoding: "binary".to_string(),
        }
    }

    /// Raw binary upload with no model behind it.
    pub fn octet_stream() -> Self {
        Request {
            model: None,
            content_type: OCTET_STREAM_CONTENT_TYPE.to_string(),
            encoding: "binary".to_string(),
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = encoding.into();
        self
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }
}

impl RequestBody for Request {
    fn generate_spec(&self) -> Map<String, Value> {
        let schema = match (&self.model, self.content_type.as_str()) {
            (_, OCTET_STREAM_CONTENT_TYPE) | (None, _) => {
                json!({ "type": "string", "format": self.encoding })
            }
            (Some(model), _) => component_ref(model.name()),
        };
        let mut spec = Map::new();
        spec.insert(
            "content".to_string(),
            json!({ self.content_type.as_str(): { "schema": schema } }),
        );
        spec
    }

    fn model(&self) -> Option<&ModelRef> {
        match self.content_type.as_str() {
            OCTET_STREAM_CONTENT_TYPE => None,
            _ => self.model.as_ref(),
        }
    }
}

impl fmt::Debug for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Request")
            .field("model", &self.model.as_ref().map(|m| m.name().to_string()))
            .field("content_type", &self.content_type)
            .field("encoding", &self.encoding)
            .finish()
    }
}

/// `multipart/form-data` body: optional model fields plus one file part.
#[derive(Clone)]
pub struct MultipartFormRequest {
    model: Option<ModelRef>,
    file_key: String,
    encoding: String,
}

impl MultipartFormRequest {
    pub fn new() -> Self {
        MultipartFormRequest {
            model: None,
            file_key: "file".to_string(),
            encoding: "binary".to_string(),
        }
    }

    pub fn with_model(mut self, model: ModelRef) -> Self {
        self.model = Some(model);
        self
    }

    pub fn with_file_key(mut self, file_key: impl Into<String>) -> Self {
        self.file_key = file_key.into();
        self
    }

    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = encoding.into();
        self
    }
}

impl Default for MultipartFormRequest {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestBody for MultipartFormRequest {
    fn generate_spec(&self) -> Map<String, Value> {
        let fields = self
            .model
            .as_ref()
            .map(|m| ModelSchema::from_value(&m.schema()))
            .unwrap_or_default();

        let mut properties = fields.properties;
        properties.insert(
            self.file_key.clone(),
            json!({ "type": "string", "format": self.encoding }),
        );

        let mut schema = Map::new();
        schema.insert("type".to_string(), json!("object"));
        schema.insert("properties".to_string(), Value::Object(properties));
        if !fields.required.is_empty() {
            schema.insert("required".to_string(), json!(fields.required));
        }

        let mut spec = Map::new();
        spec.insert(
            "content".to_string(),
            json!({ MULTIPART_CONTENT_TYPE: { "schema": schema } }),
        );
        spec
    }

    fn model(&self) -> Option<&ModelRef> {
        self.model.as_ref()
    }
}

impl fmt::Debug for MultipartFormRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultipartFormRequest")
            .field("model", &self.model.as_ref().map(|m| m.name().to_string()))
            .field("file_key", &self.file_key)
            .field("encoding", &self.encoding)
            .finish()
    }
}

/// What a handler's `body` attachment resolved to when it was attached.
#[derive(Clone)]
pub enum BodySpec {
    /// A bare model, rendered through the default [`Request`] adapter.
    RawModel(ModelRef),
    /// A body description that renders itself.
    Wrapped(Arc<dyn RequestBody>),
    /// Something that is neither; renders as an empty body.
    Unrecognized,
}

impl BodySpec {
    pub fn wrapped(body: impl RequestBody + 'static) -> Self {
        BodySpec::Wrapped(Arc::new(body))
    }

    /// Model carried by this body, whichever form it takes.
    pub fn model(&self) -> Option<&ModelRef> {
        match self {
            BodySpec::RawModel(model) => Some(model),
            BodySpec::Wrapped(body) => body.model(),
            BodySpec::Unrecognized => None,
        }
    }

    pub fn has_model(&self) -> bool {
        match self {
            BodySpec::RawModel(_) => true,
            BodySpec::Wrapped(body) => body.has_model(),
            BodySpec::Unrecognized => false,
        }
    }
}

impl From<ModelRef> for BodySpec {
    fn from(model: ModelRef) -> Self {
        BodySpec::RawModel(model)
    }
}

impl From<Arc<dyn RequestBody>> for BodySpec {
    fn from(body: Arc<dyn RequestBody>) -> Self {
        BodySpec::Wrapped(body)
    }
}

impl From<Request> for BodySpec {
    fn from(body: Request) -> Self {
        BodySpec::wrapped(body)
    }
}

impl From<MultipartFormRequest> for BodySpec {
    fn from(body: MultipartFormRequest) -> Self {
        BodySpec::wrapped(body)
    }
}

impl fmt::Debug for BodySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BodySpec::RawModel(model) => f.debug_tuple("RawModel").field(&model.name()).finish(),
            BodySpec::Wrapped(body) => f
                .debug_tuple("Wrapped")
                .field(&body.model().map(|m| m.name()))
                .finish(),
            BodySpec::Unrecognized => f.write_str("Unrecognized"),
        }
    }
}
