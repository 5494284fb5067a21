//! Structural classification of a single template node.

use serde_json::Value;

/// The four shapes a CEDAR template node can take, plus a catch-all for
/// nodes matching none of them.
///
/// Classification looks only at the node's container type and where its
/// `_ui` markers live: a field declares an `inputType`, a formset declares
/// an `order` over its children, and repeatable variants of both wrap the
/// markers inside `items`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind<'a> {
    /// Singular field: object carrying `_ui.inputType`
    SingleField { input_type: &'a str },
    /// Singular formset: object carrying `_ui.order`
    NestedObject,
    /// Repeatable field: array whose `items` carries `_ui.inputType`
    SingleArrayField { input_type: &'a str },
    /// Repeatable formset: array whose `items` carries `_ui.order`
    NestedArray,
    /// None of the above; reported by the validator, skipped by the walk
    Unrecognized,
}

/// Classifies `node` without emitting any diagnostics.
pub fn classify(node: &Value) -> NodeKind<'_> {
    match node.get("type").and_then(Value::as_str) {
        Some("object") => {
            if let Some(input_type) = node.pointer("/_ui/inputType").and_then(Value::as_str) {
                NodeKind::SingleField { input_type }
            } else if node.pointer("/_ui/order").is_some() {
                NodeKind::NestedObject
            } else {
                NodeKind::Unrecognized
            }
        }
        Some("array") => {
            if let Some(input_type) = node.pointer("/items/_ui/inputType").and_then(Value::as_str) {
                NodeKind::SingleArrayField { input_type }
            } else if node.pointer("/items/_ui/order").is_some() {
                NodeKind::NestedArray
            } else {
                NodeKind::Unrecognized
            }
        }
        _ => NodeKind::Unrecognized,
    }
}
