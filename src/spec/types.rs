use crate::spec::response::ResponseMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Where a parameter is carried on the wire.
///
/// Path parameters are derived from the route by the serving layer and never
/// come from a model, so they have no variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Query,
    Header,
    Cookie,
}

impl ParameterLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterLocation::Query => "query",
            ParameterLocation::Header => "header",
            ParameterLocation::Cookie => "cookie",
        }
    }
}

impl std::fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<ParameterLocation> for oas3::spec::ParameterIn {
    fn from(loc: ParameterLocation) -> Self {
        match loc {
            ParameterLocation::Query => oas3::spec::ParameterIn::Query,
            ParameterLocation::Header => oas3::spec::ParameterIn::Header,
            ParameterLocation::Cookie => oas3::spec::ParameterIn::Cookie,
        }
    }
}

impl TryFrom<oas3::spec::ParameterIn> for ParameterLocation {
    /// The rejected location (only `path` is rejected).
    type Error = oas3::spec::ParameterIn;

    fn try_from(loc: oas3::spec::ParameterIn) -> Result<Self, Self::Error> {
        match loc {
            oas3::spec::ParameterIn::Query => Ok(ParameterLocation::Query),
            oas3::spec::ParameterIn::Header => Ok(ParameterLocation::Header),
            oas3::spec::ParameterIn::Cookie => Ok(ParameterLocation::Cookie),
            other => Err(other),
        }
    }
}

/// One entry of an operation's `parameters` list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDescriptor {
    pub name: String,
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    pub schema: Value,
    pub required: bool,
}

/// Operation-level fragment produced for one handler.
///
/// Path and method grouping happen in [`crate::spec::document`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub operation_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub parameters: Vec<ParameterDescriptor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_body: Option<Value>,
    pub responses: ResponseMap,
}
