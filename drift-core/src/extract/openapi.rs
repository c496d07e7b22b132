//! OpenAPI document extraction: component schemas and endpoints.
//!
//! Documents are read as untyped YAML so that partial or vendor-extended
//! specs still yield whatever they contain. Missing sections are empty,
//! not errors.

use serde_yaml::{Mapping, Value};

use crate::error::Result;
use crate::types::{Catalog, Endpoint, EndpointCatalog, FieldMap};

/// Label for a property without a `type`, typically a `$ref`.
pub const DEFAULT_PROPERTY_TYPE: &str = "object";

/// Tag assigned to operations that declare none.
pub const DEFAULT_TAG: &str = "No Tag";

/// Operation keys of a path item.
pub const HTTP_METHODS: &[&str] = &[
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

fn parse_document(source: &str) -> Result<Value> {
    if source.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_yaml::from_str(source)?)
}

/// Build a catalog from `components.schemas`.
///
/// Each schema becomes a type and each of its `properties` a field labeled by
/// the property's `type`. A list of types (`[string, "null"]`) is joined
/// with `|`.
pub fn extract_schemas(source: &str) -> Result<Catalog> {
    let document = parse_document(source)?;
    let mut catalog = Catalog::new();

    let Some(schemas) = document
        .get("components")
        .and_then(|c| c.get("schemas"))
        .and_then(Value::as_mapping)
    else {
        return Ok(catalog);
    };

    for (name, schema) in schemas {
        let Some(name) = key_to_string(name) else {
            continue;
        };
        let fields = schema
            .get("properties")
            .and_then(Value::as_mapping)
            .map(schema_fields)
            .unwrap_or_default();
        catalog.insert(name, fields);
    }

    tracing::debug!(schemas = catalog.len(), "extracted component schemas");
    Ok(catalog)
}

fn schema_fields(properties: &Mapping) -> FieldMap {
    properties
        .iter()
        .filter_map(|(name, details)| {
            let name = key_to_string(name)?;
            Some((name, property_type(details)))
        })
        .collect()
}

fn property_type(details: &Value) -> String {
    match details.get("type") {
        Some(Value::String(label)) => label.clone(),
        Some(Value::Sequence(labels)) => {
            let labels: Vec<String> = labels.iter().filter_map(key_to_string).collect();
            if labels.is_empty() {
                DEFAULT_PROPERTY_TYPE.to_string()
            } else {
                labels.join("|")
            }
        }
        _ => DEFAULT_PROPERTY_TYPE.to_string(),
    }
}

/// Collect every operation under `paths` with its tags.
///
/// Method keys match case-insensitively. Operations with no (or an empty)
/// `tags` list are filed under [`DEFAULT_TAG`].
pub fn extract_endpoints(source: &str) -> Result<EndpointCatalog> {
    let document = parse_document(source)?;
    let mut endpoints = EndpointCatalog::new();

    let Some(paths) = document.get("paths").and_then(Value::as_mapping) else {
        return Ok(endpoints);
    };

    for (path, item) in paths {
        let (Some(path), Some(item)) = (key_to_string(path), item.as_mapping()) else {
            continue;
        };

        for (method, operation) in item {
            let Some(method) = method.as_str() else {
                continue;
            };
            if !HTTP_METHODS.contains(&method.to_lowercase().as_str()) {
                continue;
            }
            endpoints.insert(Endpoint::new(path.as_str(), method), operation_tags(operation));
        }
    }

    tracing::debug!(endpoints = endpoints.len(), "extracted endpoints");
    Ok(endpoints)
}

fn operation_tags(operation: &Value) -> Vec<String> {
    let tags: Vec<String> = operation
        .get("tags")
        .and_then(Value::as_sequence)
        .map(|tags| tags.iter().filter_map(key_to_string).collect())
        .unwrap_or_default();

    if tags.is_empty() {
        vec![DEFAULT_TAG.to_string()]
    } else {
        tags
    }
}

/// Scalar YAML value as a string; YAML happily keys maps by numbers.
fn key_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT: &str = r#"
openapi: 3.0.1
info:
  title: Case management
  version: "2.0"
paths:
  /cases:
    parameters:
      - name: municipalityId
        in: path
    get:
      tags: [Cases]
      summary: List cases
    POST:
      tags: [Cases, Admin]
  /health:
    get:
      summary: Untagged probe
components:
  schemas:
    Case:
      type: object
      properties:
        id:
          type: string
          format: uuid
        status:
          $ref: '#/components/schemas/Status'
        closedAt:
          type: [string, "null"]
    Status:
      type: string
      enum: [OPEN, CLOSED]
"#;

    #[test]
    fn test_extract_schemas() {
        let catalog = extract_schemas(DOCUMENT).unwrap();

        assert_eq!(catalog.len(), 2);
        let case = &catalog["Case"];
        assert_eq!(case["id"], "string");
        assert_eq!(case["status"], "object");
        assert_eq!(case["closedAt"], "string|null");
        assert!(catalog["Status"].is_empty());
    }

    #[test]
    fn test_extract_endpoints() {
        let endpoints = extract_endpoints(DOCUMENT).unwrap();

        assert_eq!(endpoints.len(), 3);
        assert_eq!(endpoints[&Endpoint::new("/cases", "GET")], vec!["Cases"]);
        assert_eq!(
            endpoints[&Endpoint::new("/cases", "POST")],
            vec!["Cases", "Admin"]
        );
        assert_eq!(endpoints[&Endpoint::new("/health", "GET")], vec![DEFAULT_TAG]);
    }

    #[test]
    fn test_missing_sections_are_empty() {
        let source = "openapi: 3.0.1\ninfo:\n  title: Empty\n";
        assert!(extract_schemas(source).unwrap().is_empty());
        assert!(extract_endpoints(source).unwrap().is_empty());
        assert!(extract_schemas("").unwrap().is_empty());
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        assert!(extract_schemas("components: [unclosed").is_err());
        assert!(extract_endpoints("paths: {").is_err());
    }

    #[test]
    fn test_numeric_keys_are_stringified() {
        let source = "components:\n  schemas:\n    Grid:\n      properties:\n        2024:\n          type: integer\n";
        let catalog = extract_schemas(source).unwrap();
        assert_eq!(catalog["Grid"]["2024"], "integer");
    }
}
