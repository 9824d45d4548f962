#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{ab_model, model};
use http::Method;
use opspec::config::SpecConfig;
use opspec::handler::HandlerMeta;
use opspec::spec::document::{ApiDocument, SpecBuilder};
use opspec::spec::{ParameterLocation, Response};
use serde_json::json;

fn pet_store() -> SpecBuilder {
    let pet = model(
        "Pet",
        json!({
            "type": "object",
            "properties": {
                "name": { "type": "string" },
                "owner": { "$ref": "#/definitions/Owner" }
            },
            "required": ["name"],
            "definitions": {
                "Owner": { "type": "object", "properties": { "id": { "type": "integer" } } }
            }
        }),
    );

    SpecBuilder::new(SpecConfig {
        title: "Pet Store".to_string(),
        ..SpecConfig::default()
    })
    .route(
        "/pets",
        Method::GET,
        HandlerMeta::new("list_pets")
            .doc("List pets\nNewest first.")
            .query(ab_model("ListQuery"))
            .cookies(model(
                "Session",
                json!({ "properties": { "session": { "type": "string" } }, "required": ["session"] }),
            ))
            .resp(Response::new().model(200, pet.clone())),
    )
    .route(
        "/pets",
        Method::POST,
        HandlerMeta::new("create_pet")
            .body(pet.clone())
            .resp(Response::new().model(201, pet)),
    )
    .route("/health", Method::GET, HandlerMeta::new("health"))
}

#[test]
fn test_document_layout() {
    let doc = pet_store().build().unwrap();
    assert_eq!(doc.openapi, "3.1.0");
    assert_eq!(doc.info.title, "Pet Store");
    assert_eq!(doc.paths.len(), 2);
    assert_eq!(doc.paths["/pets"].len(), 2);

    let list = doc.operation("/pets", &Method::GET).unwrap();
    assert_eq!(list.summary.as_deref(), Some("List pets"));
    let locations: Vec<ParameterLocation> = list.parameters.iter().map(|p| p.location).collect();
    assert_eq!(
        locations,
        vec![
            ParameterLocation::Query,
            ParameterLocation::Query,
            ParameterLocation::Cookie
        ]
    );
    assert!(list.responses.contains_key("422"));

    let health = doc.operation("/health", &Method::GET).unwrap();
    assert!(health.responses.is_empty());
    assert!(health.parameters.is_empty());
}

#[test]
fn test_components_hold_every_model() {
    let doc = pet_store().build().unwrap();
    let schemas = doc.components.schemas.as_object().unwrap();
    for name in ["ListQuery", "Session", "Pet", "Owner"] {
        assert!(schemas.contains_key(name), "missing component {name}");
    }
    assert_eq!(
        schemas["Pet"]["properties"]["owner"]["$ref"],
        json!("#/components/schemas/Owner")
    );
}

#[test]
fn test_validation_status_from_config() {
    let doc = SpecBuilder::new(SpecConfig {
        validation_error_status: 400,
        ..SpecConfig::default()
    })
    .route("/items", Method::GET, HandlerMeta::new("items").query(ab_model("Q")))
    .build()
    .unwrap();
    let op = doc.operation("/items", &Method::GET).unwrap();
    assert_eq!(op.responses["400"].description, "Validation Error");
}

#[test]
fn test_duplicate_route_is_reported() {
    let err = SpecBuilder::new(SpecConfig::default())
        .route("/a", Method::GET, HandlerMeta::new("first"))
        .route("/a", Method::GET, HandlerMeta::new("second"))
        .build()
        .unwrap_err();
    let message = err.to_string();
    assert!(message.contains("DuplicateRoute"), "{message}");
}

#[test]
fn test_duplicate_operation_id_is_reported() {
    let err = SpecBuilder::new(SpecConfig::default())
        .route("/a", Method::GET, HandlerMeta::new("same"))
        .route("/b", Method::GET, HandlerMeta::new("same"))
        .build()
        .unwrap_err();
    assert!(err.to_string().contains("DuplicateOperationId"));
}

#[test]
fn test_document_parses_as_openapi() {
    let doc = pet_store().build().unwrap();
    let spec = doc.to_openapi().unwrap();
    let paths = spec.paths.as_ref().unwrap();
    assert_eq!(paths.len(), 2);

    let get = paths["/pets"].get.as_ref().unwrap();
    assert_eq!(get.operation_id.as_deref(), Some("list_pets"));
    assert_eq!(get.parameters.len(), 3);
}

#[test]
fn test_write_json_and_yaml() {
    let doc = pet_store().build().unwrap();
    let dir = tempfile::tempdir().unwrap();

    let json_path = dir.path().join("openapi.json");
    doc.write_to(&json_path).unwrap();
    let from_json: ApiDocument =
        serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(from_json, doc);

    let yaml_path = dir.path().join("openapi.yaml");
    doc.write_to(&yaml_path).unwrap();
    let yaml = std::fs::read_to_string(&yaml_path).unwrap();
    assert!(yaml.contains("operationId: create_pet"));
}

#[test]
fn test_write_to_missing_directory_fails() {
    let doc = pet_store().build().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let err = doc
        .write_to(dir.path().join("missing").join("openapi.json"))
        .unwrap_err();
    assert!(err.to_string().contains("Failed to write API document"));
}
