//! Data models for type catalogs.
//!
//! A catalog is the full set of record types for one revision: type name to
//! field map, field name to type label. Labels are opaque strings produced by
//! an extractor and only ever compared for equality.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{DriftError, Result};

/// Field name to type label for a single type.
pub type FieldMap = BTreeMap<String, String>;

/// Type name to field map for one revision.
pub type Catalog = BTreeMap<String, FieldMap>;

/// Parse a catalog from a JSON document.
///
/// The document must be an object of objects of strings. Anything else is a
/// contract violation and is reported with the offending type and field.
pub fn catalog_from_json(source: &str) -> Result<Catalog> {
    let value: Value = serde_json::from_str(source)?;
    catalog_from_value(&value)
}

/// Convert an already-parsed JSON value into a catalog.
pub fn catalog_from_value(value: &Value) -> Result<Catalog> {
    let types = value.as_object().ok_or_else(|| {
        DriftError::invalid_catalog(format!("expected an object of types, got {}", kind(value)))
    })?;

    let mut catalog = Catalog::new();
    for (type_name, fields) in types {
        let fields = fields.as_object().ok_or_else(|| {
            DriftError::invalid_catalog(format!(
                "fields of '{}' must be an object, got {}",
                type_name,
                kind(fields)
            ))
        })?;

        let mut field_map = FieldMap::new();
        for (field_name, label) in fields {
            let label = label.as_str().ok_or_else(|| {
                DriftError::invalid_catalog(format!(
                    "type label of '{}.{}' must be a string, got {}",
                    type_name,
                    field_name,
                    kind(label)
                ))
            })?;
            field_map.insert(field_name.clone(), label.to_string());
        }
        catalog.insert(type_name.clone(), field_map);
    }

    Ok(catalog)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// An HTTP operation declared in an OpenAPI document.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Endpoint {
    pub path: String,
    /// Upper-case HTTP method.
    pub method: String,
}

impl Endpoint {
    pub fn new(path: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method: method.into().to_uppercase(),
        }
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.method, self.path)
    }
}

/// Endpoints of one revision with the tags each is filed under.
pub type EndpointCatalog = BTreeMap<Endpoint, Vec<String>>;
