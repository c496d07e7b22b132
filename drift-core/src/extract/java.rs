//! Java model class extractor using tree-sitter.
//!
//! Every class declaration in a file, nested and local classes included,
//! becomes a catalog entry keyed by its simple name. Its fields are the
//! `field_declaration`s directly in the class body, one entry per declarator.

use tree_sitter::{Node, Parser};

use super::helpers::{compact, get_node_text};
use crate::error::{DriftError, Result};
use crate::types::{Catalog, FieldMap};

/// Label used when a type node has a shape the extractor does not know.
pub const UNKNOWN_TYPE: &str = "UnknownType";

/// Parse Java source code into a catalog of its classes.
///
/// Sources with syntax errors are rejected rather than partially extracted.
pub fn extract(source: &str, file_path: &str) -> Result<Catalog> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_java::LANGUAGE.into())
        .map_err(|e| DriftError::parse(file_path, format!("Failed to set Java language: {}", e)))?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| DriftError::parse(file_path, "Failed to parse Java source"))?;
    let root = tree.root_node();

    if root.has_error() {
        let line = first_error_line(&root).unwrap_or(1);
        return Err(DriftError::parse(
            file_path,
            format!("syntax error near line {}", line),
        ));
    }

    let mut catalog = Catalog::new();
    collect_classes(&root, source, &mut catalog);
    Ok(catalog)
}

/// 1-indexed line of the first error or missing node.
fn first_error_line(node: &Node) -> Option<usize> {
    if node.is_error() || node.is_missing() {
        return Some(node.start_position().row + 1);
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.has_error() {
            if let Some(line) = first_error_line(&child) {
                return Some(line);
            }
        }
    }
    None
}

/// Walk the tree and record every class declaration.
fn collect_classes(node: &Node, source: &str, catalog: &mut Catalog) {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() == "class_declaration" {
            if let Some(name) = child.child_by_field_name("name") {
                let fields = child
                    .child_by_field_name("body")
                    .map(|body| extract_fields(&body, source))
                    .unwrap_or_default();
                catalog.insert(get_node_text(&name, source).to_string(), fields);
            }
        }
        collect_classes(&child, source, catalog);
    }
}

/// Extract the fields declared directly in a class body.
fn extract_fields(body: &Node, source: &str) -> FieldMap {
    let mut fields = FieldMap::new();

    let mut cursor = body.walk();
    for member in body.children(&mut cursor) {
        if member.kind() != "field_declaration" {
            continue;
        }
        let Some(type_node) = member.child_by_field_name("type") else {
            continue;
        };
        let label = type_label(&type_node, source);

        let mut inner_cursor = member.walk();
        for declarator in member.children(&mut inner_cursor) {
            if declarator.kind() != "variable_declarator" {
                continue;
            }
            let Some(name) = declarator.child_by_field_name("name") else {
                continue;
            };
            // `int codes[]` puts the dimensions on the declarator
            let dims = declarator
                .child_by_field_name("dimensions")
                .map(|d| count_dimensions(&d, source))
                .unwrap_or(0);
            fields.insert(
                get_node_text(&name, source).to_string(),
                format!("{}{}", label, "[]".repeat(dims)),
            );
        }
    }

    fields
}

/// Render a type node as a flat label: `int`, `List<String>`, `byte[][]`.
pub fn type_label(node: &Node, source: &str) -> String {
    match node.kind() {
        "integral_type" | "floating_point_type" | "boolean_type" | "void_type"
        | "type_identifier" => get_node_text(node, source).to_string(),
        "scoped_type_identifier" => compact(get_node_text(node, source)),
        "generic_type" => {
            let mut base = String::new();
            let mut args = Vec::new();

            let mut cursor = node.walk();
            for child in node.named_children(&mut cursor) {
                match child.kind() {
                    "type_identifier" | "scoped_type_identifier" => {
                        base = type_label(&child, source);
                    }
                    "type_arguments" => {
                        let mut arg_cursor = child.walk();
                        for arg in child.named_children(&mut arg_cursor) {
                            if !is_comment(&arg) {
                                args.push(type_label(&arg, source));
                            }
                        }
                    }
                    _ => {}
                }
            }

            if args.is_empty() {
                // Empty type argument list
                base
            } else {
                format!("{}<{}>", base, args.join(", "))
            }
        }
        "array_type" => {
            let element = node
                .child_by_field_name("element")
                .map(|e| type_label(&e, source))
                .unwrap_or_else(|| UNKNOWN_TYPE.to_string());
            let dims = node
                .child_by_field_name("dimensions")
                .map(|d| count_dimensions(&d, source))
                .unwrap_or(1);
            format!("{}{}", element, "[]".repeat(dims))
        }
        "annotated_type" => {
            // Annotations precede the annotated type
            let mut cursor = node.walk();
            let inner = node
                .named_children(&mut cursor)
                .filter(|c| !is_annotation(c))
                .last();
            inner
                .map(|inner| type_label(&inner, source))
                .unwrap_or_else(|| UNKNOWN_TYPE.to_string())
        }
        "wildcard" => wildcard_label(node, source),
        _ => UNKNOWN_TYPE.to_string(),
    }
}

fn wildcard_label(node: &Node, source: &str) -> String {
    let mut keyword = None;
    let mut bound = None;

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "extends" => keyword = Some("extends"),
            "super" => keyword = Some("super"),
            _ if child.is_named() && !is_annotation(&child) && !is_comment(&child) => {
                bound = Some(type_label(&child, source));
            }
            _ => {}
        }
    }

    match (keyword, bound) {
        (Some(keyword), Some(bound)) => format!("? {} {}", keyword, bound),
        _ => "?".to_string(),
    }
}

fn count_dimensions(node: &Node, source: &str) -> usize {
    get_node_text(node, source).matches('[').count()
}

fn is_annotation(node: &Node) -> bool {
    matches!(node.kind(), "marker_annotation" | "annotation")
}

fn is_comment(node: &Node) -> bool {
    matches!(node.kind(), "line_comment" | "block_comment")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract_ok(source: &str) -> Catalog {
        extract(source, "Model.java").expect("source should parse")
    }

    #[test]
    fn test_extract_simple_class() {
        let catalog = extract_ok(
            r#"
package se.example.api.model;

public class User {
    private String name;
    private int age;
    private static final long serialVersionUID = 1L;

    public String getName() { return name; }
}
"#,
        );

        let user = &catalog["User"];
        assert_eq!(user.len(), 3);
        assert_eq!(user["name"], "String");
        assert_eq!(user["age"], "int");
        assert_eq!(user["serialVersionUID"], "long");
    }

    #[test]
    fn test_generic_and_array_labels() {
        let catalog = extract_ok(
            r#"
class Errand {
    private List<String> tags;
    private Map<String, List<Long>> index;
    private byte[][] blob;
    private List<? extends Note> notes;
    private java.time.OffsetDateTime created;
    private int codes[];
}
"#,
        );

        let errand = &catalog["Errand"];
        assert_eq!(errand["tags"], "List<String>");
        assert_eq!(errand["index"], "Map<String, List<Long>>");
        assert_eq!(errand["blob"], "byte[][]");
        assert_eq!(errand["notes"], "List<? extends Note>");
        assert_eq!(errand["created"], "java.time.OffsetDateTime");
        assert_eq!(errand["codes"], "int[]");
    }

    #[test]
    fn test_multiple_declarators_share_type() {
        let catalog = extract_ok("class Point { private double x, y; }");
        assert_eq!(catalog["Point"]["x"], "double");
        assert_eq!(catalog["Point"]["y"], "double");
    }

    #[test]
    fn test_nested_classes_are_separate_entries() {
        let catalog = extract_ok(
            r#"
public class Outer {
    private String id;

    public static class Inner {
        private Integer count;
    }
}
"#,
        );

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog["Outer"].len(), 1);
        assert_eq!(catalog["Inner"]["count"], "Integer");
    }

    #[test]
    fn test_annotated_field_type() {
        let catalog = extract_ok(
            r#"
class Stakeholder {
    @NotNull
    @Schema(description = "Type")
    private String type;
}
"#,
        );
        assert_eq!(catalog["Stakeholder"]["type"], "String");
    }

    #[test]
    fn test_interfaces_and_enums_are_not_catalogued() {
        let catalog = extract_ok(
            r#"
interface Named { String NAME = "x"; }
enum Status { OPEN, CLOSED }
"#,
        );
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_class_without_fields() {
        let catalog = extract_ok("class Marker {}");
        assert!(catalog["Marker"].is_empty());
    }

    #[test]
    fn test_syntax_error_is_rejected() {
        let err = extract("class Broken { private int ; ", "Broken.java").unwrap_err();
        assert!(matches!(err, DriftError::Parse { .. }));
        assert!(err.to_string().contains("Broken.java"));
    }
}
