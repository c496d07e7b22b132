//! JSON format exporter.

use serde::Serialize;

use crate::error::Result;

/// Export any report to JSON.
pub fn export<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<String> {
    let output = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::differ::compare_catalogs;
    use crate::types::Catalog;

    fn changelog_json(pretty: bool) -> String {
        let old: Catalog = serde_json::from_str(r#"{"User": {"age": "int"}}"#).unwrap();
        let new: Catalog = serde_json::from_str(r#"{"User": {"age": "long"}}"#).unwrap();
        export(&compare_catalogs(&old, &new), pretty).unwrap()
    }

    #[test]
    fn test_export_json() {
        let output = changelog_json(false);
        assert!(output.contains("\"status\":\"modified\""));
        assert!(output.contains("\"old_type\":\"int\""));
        assert!(!output.contains('\n'));
    }

    #[test]
    fn test_export_json_pretty() {
        let output = changelog_json(true);
        assert!(output.contains('\n'));

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["entries"]["User"]["status"], "modified");
    }
}
