use super::request::{BodySpec, Request, RequestBody};
use super::response::{ResponseEntry, ResponseMap};
use super::types::{Operation, ParameterDescriptor, ParameterLocation};
use crate::error::SpecError;
use crate::handler::HandlerMeta;
use crate::model::ModelRef;
use crate::registry::ModelRegistry;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::debug;

/// Normalise documentation text the way docstrings are usually cleaned.
///
/// The first line loses its leading whitespace, the common indentation of
/// the remaining lines is removed, and blank lines at either end are dropped.
pub fn clean_doc(doc: &str) -> String {
    let lines: Vec<&str> = doc.lines().collect();
    let indent = lines
        .iter()
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);

    let mut cleaned: Vec<String> = Vec::with_capacity(lines.len());
    if let Some(first) = lines.first() {
        cleaned.push(first.trim().to_string());
    }
    for line in lines.iter().skip(1) {
        let stripped = if line.len() >= indent && line.is_char_boundary(indent) {
            &line[indent..]
        } else {
            line.trim_start()
        };
        cleaned.push(stripped.trim_end().to_string());
    }

    while cleaned.first().is_some_and(|l| l.trim().is_empty()) {
        cleaned.remove(0);
    }
    while cleaned.last().is_some_and(|l| l.trim().is_empty()) {
        cleaned.pop();
    }
    cleaned.join("\n")
}

/// Split a handler's documentation into `(summary, description)`.
///
/// The first line is the summary. Everything after the first line break,
/// trimmed, is the description; there is none for a single-line doc.
pub fn parse_comments(handler: &HandlerMeta) -> (Option<String>, Option<String>) {
    let Some(doc) = handler.doc.as_deref() else {
        return (None, None);
    };
    let doc = clean_doc(doc);
    match doc.split_once('\n') {
        None => (Some(doc), None),
        Some((summary, rest)) => (Some(summary.to_string()), Some(rest.trim().to_string())),
    }
}

/// Request-body fragment for the handler's `body` attachment.
///
/// Empty when the handler has no body or the body was not recognised.
pub fn parse_request(handler: &HandlerMeta) -> Map<String, Value> {
    match &handler.body {
        None | Some(BodySpec::Unrecognized) => Map::new(),
        Some(BodySpec::Wrapped(body)) => body.generate_spec(),
        Some(BodySpec::RawModel(model)) => Request::new(Arc::clone(model)).generate_spec(),
    }
}

/// Append one parameter per model property for query, header and cookie
/// models, in that order.
///
/// # Errors
///
/// [`SpecError::ModelNotRegistered`] when an attached model is missing from
/// `registry`.
pub fn parse_params(
    handler: &HandlerMeta,
    mut params: Vec<ParameterDescriptor>,
    registry: &ModelRegistry,
) -> Result<Vec<ParameterDescriptor>, SpecError> {
    let sources: [(&Option<ModelRef>, ParameterLocation); 3] = [
        (&handler.query, ParameterLocation::Query),
        (&handler.headers, ParameterLocation::Header),
        (&handler.cookies, ParameterLocation::Cookie),
    ];

    for (model, location) in sources {
        let Some(model) = model else {
            continue;
        };
        let schema = registry.lookup(model.name(), &handler.name)?;
        debug!(
            handler = %handler.name,
            model = %model.name(),
            location = %location,
            count = schema.properties.len(),
            "adding parameters from model"
        );
        params.extend(
            schema
                .properties
                .iter()
                .map(|(name, field_schema)| ParameterDescriptor {
                    name: name.clone(),
                    location,
                    schema: field_schema.clone(),
                    required: schema.is_required(name),
                }),
        );
    }

    Ok(params)
}

/// Response map for the handler, plus a `Validation Error` entry under
/// `validation_status` when the handler has a model and no explicit entry
/// for that code.
pub fn parse_resp(handler: &HandlerMeta, validation_status: u16) -> ResponseMap {
    let mut responses = handler
        .resp
        .as_ref()
        .map(|resp| resp.generate_spec())
        .unwrap_or_default();

    let key = validation_status.to_string();
    if !responses.contains_key(&key) && has_model(handler) {
        responses.insert(key, ResponseEntry::validation_error());
    }
    responses
}

/// Whether any input or response model is attached to the handler.
///
/// Cookies alone do not count.
pub fn has_model(handler: &HandlerMeta) -> bool {
    if handler.query.is_some()
        || handler.headers.is_some()
        || handler.body.as_ref().is_some_and(BodySpec::has_model)
    {
        return true;
    }
    handler.resp.as_ref().is_some_and(|resp| resp.has_model())
}

/// Name the handler is registered under.
pub fn parse_name(handler: &HandlerMeta) -> &str {
    &handler.name
}

/// Build the operation fragment for one handler.
///
/// `registry` must already hold every model the handler references.
pub fn build_operation(
    handler: &HandlerMeta,
    registry: &ModelRegistry,
    validation_status: u16,
) -> Result<Operation, SpecError> {
    let (summary, description) = parse_comments(handler);
    let parameters = parse_params(handler, Vec::new(), registry)?;
    let request_body = Some(parse_request(handler))
        .filter(|body| !body.is_empty())
        .map(Value::Object);
    let responses = parse_resp(handler, validation_status);

    Ok(Operation {
        operation_id: parse_name(handler).to_string(),
        summary,
        description,
        parameters,
        request_body,
        responses,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_doc_strips_common_indent() {
        let doc = "Summary here\n        First detail\n          nested\n        Last\n    ";
        assert_eq!(clean_doc(doc), "Summary here\nFirst detail\n  nested\nLast");
    }

    #[test]
    fn test_clean_doc_leading_blank_lines() {
        let doc = "\n    Summary\n    Detail\n";
        assert_eq!(clean_doc(doc), "Summary\nDetail");
    }

    #[test]
    fn test_clean_doc_single_line() {
        assert_eq!(clean_doc("   Solo   "), "Solo");
    }
}
