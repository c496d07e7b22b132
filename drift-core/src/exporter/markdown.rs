//! Markdown changelog exporter.

use crate::differ::{ChangeEntry, ChangeStatus, Changelog, EndpointDiff};
use crate::types::{Endpoint, FieldMap};

/// Heading of the model section.
pub const MODELS_HEADING: &str = "## API-Model updates";

/// Heading of the Java model class section.
pub const CLASSES_HEADING: &str = "## Model class updates";

/// Heading of the endpoint section.
pub const ENDPOINTS_HEADING: &str = "## API-endpoints";

/// Render a model changelog, one bullet per changed type in name order.
pub fn changelog(changelog: &Changelog) -> String {
    section(MODELS_HEADING, changelog)
}

/// Render a model changelog under a custom heading.
pub fn section(heading: &str, changelog: &Changelog) -> String {
    let mut lines = vec![heading.to_string(), String::new()];

    if changelog.is_empty() {
        lines.push("No changes.".to_string());
        lines.push(String::new());
        return lines.join("\n");
    }

    for (name, entry) in changelog.iter() {
        export_entry(name, entry, &mut lines);
        lines.push(String::new());
    }

    lines.join("\n")
}

fn export_entry(name: &str, entry: &ChangeEntry, lines: &mut Vec<String>) {
    match entry.status {
        ChangeStatus::Added | ChangeStatus::Removed => {
            let label = if entry.status == ChangeStatus::Added {
                "Added"
            } else {
                "Removed"
            };
            lines.push(format!("- **{}** *({})*", name, label));
            if entry.fields.is_empty() {
                lines.push("   - No fields".to_string());
            } else {
                push_fields("Fields", &entry.fields, lines);
            }
        }
        ChangeStatus::Modified => {
            lines.push(format!("- **{}**", name));
            push_field_changes(entry, lines);
        }
        ChangeStatus::Renamed => {
            let old_name = entry.old_name.as_deref().unwrap_or(name);
            lines.push(format!("- **{}** *(Renamed to {})*", old_name, name));
            push_field_changes(entry, lines);
        }
    }
}

fn push_field_changes(entry: &ChangeEntry, lines: &mut Vec<String>) {
    if !entry.added_fields.is_empty() {
        push_fields("Added Fields", &entry.added_fields, lines);
    }
    if !entry.removed_fields.is_empty() {
        push_fields("Removed Fields", &entry.removed_fields, lines);
    }
    if !entry.renamed_fields.is_empty() {
        lines.push("   - **Renamed Fields:**".to_string());
        let mut renamed: Vec<_> = entry.renamed_fields.iter().collect();
        renamed.sort_by(|a, b| a.new_name.cmp(&b.new_name));
        for field in renamed {
            lines.push(format!(
                "      - {}: `{}` -> {}: `{}`",
                field.old_name, field.old_type, field.new_name, field.new_type
            ));
        }
    }
    if !entry.changed_type_fields.is_empty() {
        lines.push("   - **Fields with Changed Types:**".to_string());
        let mut changed: Vec<_> = entry.changed_type_fields.iter().collect();
        changed.sort_by(|a, b| a.name.cmp(&b.name));
        for field in changed {
            lines.push(format!(
                "      - {}: `{}` -> `{}`",
                field.name, field.old_type, field.new_type
            ));
        }
    }
}

fn push_fields(title: &str, fields: &FieldMap, lines: &mut Vec<String>) {
    lines.push(format!("   - **{}:**", title));
    for (field, label) in fields {
        lines.push(format!("      - {}: `{}`", field, label));
    }
}

/// Render added and removed endpoints grouped by tag.
pub fn endpoints(diff: &EndpointDiff) -> String {
    let mut output = format!("{}\n\n", ENDPOINTS_HEADING);

    if diff.is_empty() {
        output.push_str("No changes.\n");
        return output;
    }

    for tag in diff.tags() {
        output.push_str(&format!("### {}:\n\n", tag));
        if let Some(added) = diff.added.get(tag) {
            push_endpoint_block("New endpoints", added, &mut output);
        }
        if let Some(removed) = diff.removed.get(tag) {
            push_endpoint_block("Removed endpoints", removed, &mut output);
        }
    }

    output
}

fn push_endpoint_block(title: &str, endpoints: &[Endpoint], output: &mut String) {
    output.push_str(&format!("#### {}:\n\n```\n", title));
    for endpoint in endpoints {
        output.push_str(&format!("- {}\n", endpoint));
    }
    output.push_str("```\n\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::differ::compare_catalogs;
    use crate::types::{Catalog, EndpointCatalog};

    fn catalog(json: &str) -> Catalog {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_empty_changelog() {
        let output = changelog(&Changelog::new());
        assert_eq!(output, "## API-Model updates\n\nNo changes.\n");
    }

    #[test]
    fn test_custom_heading() {
        let output = section(CLASSES_HEADING, &Changelog::new());
        assert!(output.starts_with("## Model class updates\n\n"));
    }

    #[test]
    fn test_added_and_removed_types() {
        let old = catalog(r#"{"Legacy": {}}"#);
        let new = catalog(r#"{"Order": {"id": "int", "amount": "double"}}"#);

        let output = changelog(&compare_catalogs(&old, &new));

        assert!(output.contains("- **Order** *(Added)*\n   - **Fields:**\n      - amount: `double`\n      - id: `int`"));
        assert!(output.contains("- **Legacy** *(Removed)*\n   - No fields"));
    }

    #[test]
    fn test_modified_type() {
        let old = catalog(r#"{"User": {"age": "int", "nickname": "String", "emailAddress": "String"}}"#);
        let new = catalog(r#"{"User": {"age": "String", "emailAddresses": "String", "phone": "String"}}"#);

        let output = changelog(&compare_catalogs(&old, &new));

        assert!(output.contains("- **User**\n"));
        assert!(output.contains("   - **Added Fields:**\n      - phone: `String`"));
        assert!(output.contains("   - **Removed Fields:**\n      - nickname: `String`"));
        assert!(output.contains(
            "   - **Renamed Fields:**\n      - emailAddress: `String` -> emailAddresses: `String`"
        ));
        assert!(output.contains("   - **Fields with Changed Types:**\n      - age: `int` -> `String`"));
    }

    #[test]
    fn test_renamed_type() {
        let old = catalog(r#"{"Customer": {"id": "int", "email": "string"}}"#);
        let new = catalog(r#"{"Client": {"id": "int", "email": "string"}}"#);

        let output = changelog(&compare_catalogs(&old, &new));

        assert!(output.contains("- **Customer** *(Renamed to Client)*"));
    }

    #[test]
    fn test_endpoints_markdown() {
        let old = EndpointCatalog::from([(Endpoint::new("/legacy", "get"), vec!["Ops".to_string()])]);
        let new = EndpointCatalog::from([(Endpoint::new("/users", "post"), vec!["Users".to_string()])]);

        let output = endpoints(&crate::differ::diff_endpoints(&old, &new));

        assert!(output.starts_with("## API-endpoints\n\n### Ops:\n\n#### Removed endpoints:\n\n```\n- [GET] /legacy\n```\n"));
        assert!(output.contains("### Users:\n\n#### New endpoints:\n\n```\n- [POST] /users\n```\n"));
    }

    #[test]
    fn test_endpoints_markdown_no_changes() {
        let output = endpoints(&EndpointDiff::default());
        assert_eq!(output, "## API-endpoints\n\nNo changes.\n");
    }
}
