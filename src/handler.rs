//! # Handler Metadata
//!
//! The record a decorated handler carries into spec building.
//!
//! Each attachment is optional and fixed once the handler is registered.
//! Builders read it and never change it.
//!
//! ```rust
//! use opspec::handler::HandlerMeta;
//! use opspec::model::JsonModel;
//! use opspec::spec::Response;
//! use serde_json::json;
//!
//! let pet = JsonModel::new("Pet", json!({ "type": "object" })).into_ref();
//! let handler = HandlerMeta::new("create_pet")
//!     .doc("Create a pet\n\nStores a new pet record.")
//!     .body(pet.clone())
//!     .resp(Response::new().model(201, pet));
//! assert!(handler.body.is_some());
//! ```

use crate::model::ModelRef;
use crate::spec::{BodySpec, Response};

/// Models and documentation attached to one handler.
#[derive(Debug, Clone)]
pub struct HandlerMeta {
    /// Name the handler is registered under with the serving layer.
    pub name: String,
    /// Raw documentation text, as written.
    pub doc: Option<String>,
    pub body: Option<BodySpec>,
    pub query: Option<ModelRef>,
    pub headers: Option<ModelRef>,
    pub cookies: Option<ModelRef>,
    pub resp: Option<Response>,
}

impl HandlerMeta {
    pub fn new(name: impl Into<String>) -> Self {
        HandlerMeta {
            name: name.into(),
            doc: None,
            body: None,
            query: None,
            headers: None,
            cookies: None,
            resp: None,
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Attach a body: a bare model, a [`crate::spec::Request`], a
    /// [`crate::spec::MultipartFormRequest`], or an explicit [`BodySpec`].
    pub fn body(mut self, body: impl Into<BodySpec>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn query(mut self, model: ModelRef) -> Self {
        self.query = Some(model);
        self
    }

    pub fn headers(mut self, model: ModelRef) -> Self {
        self.headers = Some(model);
        self
    }

    pub fn cookies(mut self, model: ModelRef) -> Self {
        self.cookies = Some(model);
        self
    }

    pub fn resp(mut self, resp: Response) -> Self {
        self.resp = Some(resp);
        self
    }

    /// Every model this handler references, for registry population.
    pub fn models(&self) -> Vec<&ModelRef> {
        let mut models = Vec::new();
        models.extend(self.body.as_ref().and_then(BodySpec::model));
        models.extend(self.query.iter());
        models.extend(self.headers.iter());
        models.extend(self.cookies.iter());
        if let Some(resp) = &self.resp {
            models.extend(resp.models());
        }
        models
    }
}
