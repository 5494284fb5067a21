//! The two validation passes over a CEDAR schema document.
//!
//! [`validate_structure`] walks the node tree depth-first, classifying every
//! node and applying the rendering rules; [`validate_general_fields`]
//! cross-checks the well-known top-level sections against the reference
//! table in [`crate::general`]. Findings accumulate in a [`ValidationRun`]
//! and never abort a pass; only a document too malformed to walk at all is
//! an error return.

use serde_json::Value;
use thiserror::Error;

use crate::classify::{classify, NodeKind};
use crate::field::CedarFieldKind;
use crate::general::general_schema_fields;
use crate::report::ValidationRun;

/// Input problems that prevent validation from running at all.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("malformed schema: {0}")]
    Malformed(String),
}

/// Value-constraint keys the rendering application ignores. Their presence
/// is advisory only; the order matters for stable report output.
const UNSUPPORTED_CONSTRAINTS: [&str; 8] = [
    "numberType",
    "minValue",
    "maxValue",
    "decimalPlace",
    "unitOfMeasure",
    "maxLength",
    "minLength",
    "temporalType",
];

/// Walks the whole document, recording structural findings in `run`.
pub fn validate_structure(schema: &Value, run: &mut ValidationRun) -> Result<(), SchemaError> {
    let order = schema
        .pointer("/_ui/order")
        .and_then(Value::as_array)
        .ok_or_else(|| SchemaError::Malformed("root node has no _ui.order".into()))?;
    let properties = schema
        .get("properties")
        .and_then(Value::as_object)
        .ok_or_else(|| SchemaError::Malformed("root node has no properties".into()))?;

    for node_id in order.iter().filter_map(Value::as_str) {
        match properties.get(node_id) {
            Some(node) => {
                walk_node(node, node_id, run);
            }
            None => run.error(node_id, "Node listed in _ui.order is missing from properties"),
        }
    }
    Ok(())
}

/// Validates one node, recursing into formsets. Returns the field kind for
/// single fields so the caller-side checks can dispatch on it.
fn walk_node(node: &Value, node_id: &str, run: &mut ValidationRun) -> Option<CedarFieldKind> {
    run.check_duplicate_node_id(node_id);

    let kind = match classify(node) {
        NodeKind::SingleField { input_type } | NodeKind::SingleArrayField { input_type } => {
            parse_field_kind(input_type, node_id, run)
        }
        NodeKind::NestedObject => {
            walk_formset_children(
                node.pointer("/_ui/order"),
                node.get("properties"),
                node_id,
                run,
            );
            None
        }
        NodeKind::NestedArray => {
            walk_formset_children(
                node.pointer("/items/_ui/order"),
                node.pointer("/items/properties"),
                node_id,
                run,
            );
            None
        }
        NodeKind::Unrecognized => {
            run.error(node_id, "Unrecognized node shape");
            None
        }
    };

    field_specific_checks(kind, node, node_id, run);
    kind
}

fn parse_field_kind(input_type: &str, node_id: &str, run: &mut ValidationRun) -> Option<CedarFieldKind> {
    match CedarFieldKind::from_input_type(input_type) {
        Some(kind) if kind.is_supported() => Some(kind),
        _ => {
            run.error(
                node_id,
                format!("schema_name '{input_type}' is not allowed for node"),
            );
            None
        }
    }
}

fn walk_formset_children(
    order: Option<&Value>,
    properties: Option<&Value>,
    parent_id: &str,
    run: &mut ValidationRun,
) {
    let order = order.and_then(Value::as_array);
    let properties = properties.and_then(Value::as_object);
    let (Some(order), Some(properties)) = (order, properties) else {
        run.error(parent_id, "Formset has no properties for its ordered fields");
        return;
    };

    for field_id in order.iter().filter_map(Value::as_str) {
        match properties.get(field_id) {
            Some(child) => {
                check_nested_formset(child, field_id, run);
                walk_node(child, field_id, run);
            }
            None => run.error(field_id, "Node listed in _ui.order is missing from properties"),
        }
    }
}

/// A formset child must not be a formset itself. A repeatable one (order
/// under `items`) cannot be rendered at all; a singular one still renders,
/// just degraded.
fn check_nested_formset(node: &Value, node_id: &str, run: &mut ValidationRun) {
    if let Some(items) = node.get("items") {
        if items.pointer("/_ui/order").is_some() {
            run.error(node_id, "nested formset for field_id");
        }
    } else if node.pointer("/_ui/order").is_some() {
        run.warning(node_id, "nested formset for field_id, rendering will be degraded");
    }
}

fn field_specific_checks(
    kind: Option<CedarFieldKind>,
    node: &Value,
    node_id: &str,
    run: &mut ValidationRun,
) {
    validate_field_properties(node, node_id, run);
    match kind {
        Some(CedarFieldKind::PageBreak) => {
            if run.note_page_break() {
                run.warning(node_id, "Only 1 page break is rendered in MDR");
            }
        }
        Some(CedarFieldKind::TextArea) => {
            if node.get("type").and_then(Value::as_str) == Some("array") {
                run.error(node_id, "Textarea can not be multiple");
            }
        }
        _ => {}
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
        Value::Number(n) => n.as_f64() != Some(0.0),
    }
}

fn validate_field_properties(node: &Value, node_id: &str, run: &mut ValidationRun) {
    if node.get("skos:altLabel").is_some_and(is_truthy) {
        run.warning(node_id, "Alternative labels are not supported or rendered in MDR");
    }
    if let Some(constraints) = node.get("_valueConstraints").and_then(Value::as_object) {
        for key in UNSUPPORTED_CONSTRAINTS {
            if constraints.contains_key(key) {
                run.warning(
                    node_id,
                    format!("The valueConstraint '{key}' is not supported or rendered in MDR"),
                );
            }
        }
    }
}

/// A structural key that was expected while comparing against the general
/// schema but is absent from the target.
struct MissingKey(String);

fn require<'a>(value: &'a Value, key: &str) -> Result<&'a Value, MissingKey> {
    value.get(key).ok_or_else(|| MissingKey(key.to_string()))
}

fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Cross-checks the target schema against the general schema reference
/// table. Sections and structural keys that are missing are errors; field
/// mismatches are errors except for the ontology-branch relaxation.
pub fn validate_general_fields(schema: &Value, run: &mut ValidationRun) {
    let properties = schema.get("properties").and_then(Value::as_object);
    for (section_id, expected) in general_schema_fields() {
        match properties.and_then(|props| props.get(section_id)) {
            Some(element) => {
                if let Err(MissingKey(key)) = check_element(element, expected, section_id, run) {
                    run.error(
                        section_id,
                        format!("Required element from DataHub General not identical '{key}'"),
                    );
                }
            }
            None => run.error(section_id, "Required element from DataHub General not found"),
        }
    }
}

fn check_element(
    element: &Value,
    expected: &Value,
    section_id: &str,
    run: &mut ValidationRun,
) -> Result<(), MissingKey> {
    let element_type = require(element, "type")?;
    let expected_type = &expected["type"];
    if element_type != expected_type {
        run.error(
            section_id,
            format!(
                "Element type not the same as general: '{}' != '{}'",
                display(element_type),
                display(expected_type)
            ),
        );
        return Ok(());
    }

    let is_array = element_type.as_str() == Some("array");
    let Some(fields) = expected.get("fields").and_then(Value::as_object) else {
        return Ok(());
    };

    for (field_id, general) in fields {
        let container = if is_array {
            require(require(element, "items")?, "properties")?
        } else {
            require(element, "properties")?
        };
        let current = require(container, field_id)?;

        let valid = check_field_type(field_id, current, general, run)?
            && check_field_input_type(field_id, current, general, run)?
            && check_field_hidden(field_id, current, general, run)?
            && check_field_required(field_id, current, general, run)?
            && check_field_default_value(field_id, current, general, run)?
            && check_field_branches(field_id, current, general, run)?;
        if !valid {
            break;
        }
    }

    Ok(())
}

fn check_field_type(
    field_id: &str,
    current: &Value,
    general: &Value,
    run: &mut ValidationRun,
) -> Result<bool, MissingKey> {
    let current_type = require(current, "type")?;
    let general_type = &general["type"];
    let valid = current_type == general_type;
    if !valid {
        run.error(
            field_id,
            format!(
                "Field type not the same as general field type: '{}' != '{}'",
                display(current_type),
                display(general_type)
            ),
        );
    }
    Ok(valid)
}

fn check_field_input_type(
    field_id: &str,
    current: &Value,
    general: &Value,
    run: &mut ValidationRun,
) -> Result<bool, MissingKey> {
    let Some(general_input) = general.pointer("/_ui/inputType") else {
        return Ok(true);
    };
    let current_input = require(require(current, "_ui")?, "inputType")?;
    let valid = current_input == general_input;
    if !valid {
        run.error(
            field_id,
            format!(
                "Field input type not the same as general field type: {} != {}",
                display(current_input),
                display(general_input)
            ),
        );
    }
    Ok(valid)
}

fn check_field_hidden(
    field_id: &str,
    current: &Value,
    general: &Value,
    run: &mut ValidationRun,
) -> Result<bool, MissingKey> {
    let Some(general_hidden) = general.pointer("/_ui/hidden") else {
        return Ok(true);
    };
    let current_hidden = require(require(current, "_ui")?, "hidden")?;
    let valid = current_hidden == general_hidden;
    if !valid {
        run.error(
            field_id,
            format!(
                "Field 'hidden' not the same as general: {} != {}",
                display(current_hidden),
                display(general_hidden)
            ),
        );
    }
    Ok(valid)
}

fn check_field_required(
    field_id: &str,
    current: &Value,
    general: &Value,
    run: &mut ValidationRun,
) -> Result<bool, MissingKey> {
    let Some(general_required) = general.pointer("/_valueConstraints/requiredValue") else {
        return Ok(true);
    };
    let current_required = require(require(current, "_valueConstraints")?, "requiredValue")?;
    let valid = current_required == general_required;
    if !valid {
        run.error(
            field_id,
            format!(
                "Field 'requiredValue' not the same as general: {} != {}",
                display(current_required),
                display(general_required)
            ),
        );
    }
    Ok(valid)
}

fn check_field_default_value(
    field_id: &str,
    current: &Value,
    general: &Value,
    run: &mut ValidationRun,
) -> Result<bool, MissingKey> {
    let Some(general_default) = general.pointer("/_valueConstraints/defaultValue") else {
        return Ok(true);
    };
    let current_default = require(require(current, "_valueConstraints")?, "defaultValue")?;
    let valid = current_default == general_default;
    if !valid {
        run.error(
            field_id,
            format!(
                "Field 'default value' not the same as general: {} != {}",
                display(current_default),
                display(general_default)
            ),
        );
    }
    Ok(valid)
}

fn check_field_branches(
    field_id: &str,
    current: &Value,
    general: &Value,
    run: &mut ValidationRun,
) -> Result<bool, MissingKey> {
    let Some(general_branches) = general.pointer("/_valueConstraints/branches") else {
        return Ok(true);
    };
    let current_branches = require(require(current, "_valueConstraints")?, "branches")?;
    if current_branches == general_branches {
        return Ok(true);
    }

    let current_uri = current_branches.pointer("/0/uri");
    let general_uri = general_branches.pointer("/0/uri");
    if current_uri.is_some() && current_uri == general_uri {
        run.warning(
            field_id,
            "Field ontology branches not exactly the same as general, but URI does match",
        );
        Ok(true)
    } else {
        run.error(
            field_id,
            format!(
                "Field ontology branches not the same as general: {current_branches} != {general_branches}"
            ),
        );
        Ok(false)
    }
}
