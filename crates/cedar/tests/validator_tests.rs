//! Validation runs over synthetic CEDAR schemas.

use datahub_cedar::general::general_schema_fields;
use datahub_cedar::{validate_general_fields, validate_structure, Severity, ValidationRun};
use pretty_assertions::assert_eq;
use serde_json::{json, Map, Value};

fn field(input_type: &str) -> Value {
    json!({ "type": "object", "_ui": { "inputType": input_type } })
}

fn root(order: &[&str], properties: Value) -> Value {
    json!({ "_ui": { "order": order }, "properties": properties })
}

fn structure_findings(schema: &Value) -> ValidationRun {
    let mut run = ValidationRun::new();
    validate_structure(schema, &mut run).unwrap();
    run
}

/// Builds a schema whose general sections agree with the reference table by
/// construction: every compared key is copied straight out of the table.
fn conforming_general_schema() -> Value {
    let mut properties = Map::new();
    for (section_id, expected) in general_schema_fields() {
        let fields = expected["fields"].clone();
        let element = if expected["type"] == "array" {
            json!({ "type": "array", "items": { "properties": fields } })
        } else {
            json!({ "type": "object", "properties": fields })
        };
        properties.insert(section_id.clone(), element);
    }
    json!({ "properties": properties })
}

fn general_findings(schema: &Value) -> ValidationRun {
    let mut run = ValidationRun::new();
    validate_general_fields(schema, &mut run);
    run
}

#[test]
fn conforming_schema_passes_the_general_cross_check() {
    let run = general_findings(&conforming_general_schema());
    assert!(run.findings().is_empty(), "unexpected findings: {:?}", run.findings());
    assert!(run.is_ok());
}

#[test]
fn missing_title_section_is_exactly_one_error() {
    let mut schema = conforming_general_schema();
    schema["properties"].as_object_mut().unwrap().remove("3_Title");

    let run = general_findings(&schema);
    assert_eq!(run.error_count(), 1);
    assert_eq!(run.warning_count(), 0);
    assert!(!run.is_ok());

    let finding = &run.findings()[0];
    assert_eq!(finding.severity, Severity::Error);
    assert_eq!(finding.node_id, "3_Title");
    assert_eq!(finding.message, "Required element from DataHub General not found");
}

#[test]
fn container_type_mismatch_is_an_error() {
    let mut schema = conforming_general_schema();
    schema["properties"]["1_Identifier"]["type"] = json!("array");

    let run = general_findings(&schema);
    assert_eq!(run.error_count(), 1);
    assert!(run.findings()[0].message.starts_with("Element type not the same as general"));
}

#[test]
fn branch_mismatch_with_matching_uri_downgrades_to_warning() {
    let mut schema = conforming_general_schema();
    // Same first URI, different metadata around it.
    schema["properties"]["12_RelatedIdentifier"]["items"]["properties"]["relationType"]
        ["_valueConstraints"]["branches"][0]["name"] = json!("Another Name");

    let run = general_findings(&schema);
    assert_eq!(run.error_count(), 0);
    assert_eq!(run.warning_count(), 1);
    assert_eq!(
        run.findings()[0].message,
        "Field ontology branches not exactly the same as general, but URI does match"
    );
}

#[test]
fn branch_mismatch_with_different_uri_is_an_error() {
    let mut schema = conforming_general_schema();
    schema["properties"]["12_RelatedIdentifier"]["items"]["properties"]["relationType"]
        ["_valueConstraints"]["branches"][0]["uri"] = json!("http://example.org/other");

    let run = general_findings(&schema);
    assert_eq!(run.error_count(), 1);
    assert_eq!(run.warning_count(), 0);
    assert!(run.findings()[0]
        .message
        .starts_with("Field ontology branches not the same as general"));
}

#[test]
fn required_value_mismatch_is_an_error() {
    let mut schema = conforming_general_schema();
    schema["properties"]["3_Title"]["properties"]["title"]["_valueConstraints"]["requiredValue"] =
        json!(false);

    let run = general_findings(&schema);
    assert_eq!(run.error_count(), 1);
    assert_eq!(
        run.findings()[0].message,
        "Field 'requiredValue' not the same as general: false != true"
    );
}

#[test]
fn missing_structural_key_reports_not_identical() {
    let mut schema = conforming_general_schema();
    schema["properties"]["3_Title"]["properties"]["title"]
        .as_object_mut()
        .unwrap()
        .remove("_ui");

    let run = general_findings(&schema);
    assert_eq!(run.error_count(), 1);
    assert_eq!(run.findings()[0].node_id, "3_Title");
    assert_eq!(
        run.findings()[0].message,
        "Required element from DataHub General not identical '_ui'"
    );
}

#[test]
fn duplicate_node_id_across_nesting_levels_is_an_error() {
    let unique = root(
        &["name", "group"],
        json!({
            "name": field("textfield"),
            "group": {
                "type": "object",
                "_ui": { "order": ["inner"] },
                "properties": { "inner": field("textfield") }
            }
        }),
    );
    assert_eq!(structure_findings(&unique).error_count(), 0);

    let duplicated = root(
        &["name", "group"],
        json!({
            "name": field("textfield"),
            "group": {
                "type": "object",
                "_ui": { "order": ["name"] },
                "properties": { "name": field("textfield") }
            }
        }),
    );
    let run = structure_findings(&duplicated);
    assert_eq!(run.error_count(), 1);
    assert_eq!(run.findings()[0].message, "Duplicate node ID");
}

#[test]
fn only_one_page_break_is_allowed() {
    let single = root(
        &["first"],
        json!({ "first": field("page-break") }),
    );
    assert_eq!(structure_findings(&single).warning_count(), 0);

    let double = root(
        &["first", "second"],
        json!({
            "first": field("page-break"),
            "second": field("page-break")
        }),
    );
    let run = structure_findings(&double);
    assert_eq!(run.warning_count(), 1);
    assert_eq!(run.findings()[0].node_id, "second");
    assert_eq!(run.findings()[0].message, "Only 1 page break is rendered in MDR");
}

#[test]
fn repeatable_textarea_is_an_error() {
    let repeatable = root(
        &["notes"],
        json!({
            "notes": {
                "type": "array",
                "items": { "_ui": { "inputType": "textarea" } }
            }
        }),
    );
    let run = structure_findings(&repeatable);
    assert_eq!(run.error_count(), 1);
    assert_eq!(run.findings()[0].message, "Textarea can not be multiple");

    let singular = root(&["notes"], json!({ "notes": field("textarea") }));
    assert_eq!(structure_findings(&singular).error_count(), 0);
}

#[test]
fn unknown_and_reserved_input_types_are_errors() {
    let schema = root(
        &["a", "b"],
        json!({
            "a": field("hologram"),
            "b": field("list")
        }),
    );
    let run = structure_findings(&schema);
    assert_eq!(run.error_count(), 2);
    assert_eq!(
        run.findings()[0].message,
        "schema_name 'hologram' is not allowed for node"
    );
    assert_eq!(run.findings()[1].message, "schema_name 'list' is not allowed for node");
}

#[test]
fn repeatable_formset_inside_a_formset_is_an_error() {
    let schema = root(
        &["top"],
        json!({
            "top": {
                "type": "object",
                "_ui": { "order": ["inner"] },
                "properties": {
                    "inner": {
                        "type": "array",
                        "items": {
                            "_ui": { "order": ["leaf"] },
                            "properties": { "leaf": field("textfield") }
                        }
                    }
                }
            }
        }),
    );
    let run = structure_findings(&schema);
    assert_eq!(run.error_count(), 1);
    assert_eq!(run.findings()[0].node_id, "inner");
    assert_eq!(run.findings()[0].message, "nested formset for field_id");
}

#[test]
fn singular_formset_inside_a_formset_is_only_a_warning() {
    let schema = root(
        &["top"],
        json!({
            "top": {
                "type": "object",
                "_ui": { "order": ["inner"] },
                "properties": {
                    "inner": {
                        "type": "object",
                        "_ui": { "order": ["leaf"] },
                        "properties": { "leaf": field("textfield") }
                    }
                }
            }
        }),
    );
    let run = structure_findings(&schema);
    assert_eq!(run.error_count(), 0);
    assert_eq!(run.warning_count(), 1);
    assert_eq!(run.findings()[0].node_id, "inner");
}

#[test]
fn unrecognized_node_shape_is_reported() {
    let schema = root(&["odd"], json!({ "odd": { "type": "object", "_ui": {} } }));
    let run = structure_findings(&schema);
    assert_eq!(run.error_count(), 1);
    assert_eq!(run.findings()[0].message, "Unrecognized node shape");
}

#[test]
fn advisory_constraints_and_alt_labels_warn() {
    let schema = root(
        &["age"],
        json!({
            "age": {
                "type": "object",
                "skos:altLabel": ["years"],
                "_ui": { "inputType": "numeric" },
                "_valueConstraints": { "minValue": 0, "maxLength": 3 }
            }
        }),
    );
    let run = structure_findings(&schema);
    assert_eq!(run.error_count(), 0);
    assert_eq!(run.warning_count(), 3);
    let messages: Vec<&str> = run.findings().iter().map(|f| f.message.as_str()).collect();
    assert_eq!(
        messages,
        [
            "Alternative labels are not supported or rendered in MDR",
            "The valueConstraint 'minValue' is not supported or rendered in MDR",
            "The valueConstraint 'maxLength' is not supported or rendered in MDR",
        ]
    );
}

#[test]
fn empty_alt_label_does_not_warn() {
    let schema = root(
        &["age"],
        json!({
            "age": {
                "type": "object",
                "skos:altLabel": [],
                "_ui": { "inputType": "numeric" }
            }
        }),
    );
    assert_eq!(structure_findings(&schema).warning_count(), 0);
}

#[test]
fn schema_without_root_markers_cannot_be_walked() {
    let mut run = ValidationRun::new();
    assert!(validate_structure(&json!({ "properties": {} }), &mut run).is_err());
}
