//! Key-based lookup and mutation over nested JSON documents.
//!
//! CEDAR templates and instances are deeply nested JSON trees in which every
//! section and field carries a unique key. The helpers here locate a node by
//! key anywhere in the tree and write a new value into it, which is how the
//! conversion pipeline fills an instance template section by section.

use serde_json::Value;
use tracing::debug;

/// Returns the value of the first node carrying `key`, searching depth-first
/// in document order, or `None` if no node matches.
///
/// Mappings are checked for a direct hit before their values are descended
/// into; sequences are walked element by element. Documents are expected to
/// contain at most one node per key, so first-found-wins is deterministic.
pub fn find_key<'a>(node: &'a Value, key: &str) -> Option<&'a Value> {
    match node {
        Value::Object(map) => {
            if let Some(hit) = map.get(key) {
                return Some(hit);
            }
            map.values().find_map(|child| find_key(child, key))
        }
        Value::Array(items) => items.iter().find_map(|child| find_key(child, key)),
        _ => None,
    }
}

/// Mutable variant of [`find_key`], same traversal order.
pub fn find_key_mut<'a>(node: &'a mut Value, key: &str) -> Option<&'a mut Value> {
    match node {
        Value::Object(map) => {
            // Two passes to keep the borrow checker happy: a direct hit at
            // this level wins over any hit deeper down.
            if map.contains_key(key) {
                return map.get_mut(key);
            }
            map.values_mut().find_map(|child| find_key_mut(child, key))
        }
        Value::Array(items) => items.iter_mut().find_map(|child| find_key_mut(child, key)),
        _ => None,
    }
}

/// Locates `key` via [`find_key_mut`] and writes `new_value` into the node.
///
/// A mapping target has the new value's keys merged into it, overwriting on
/// conflict, so repeated application is idempotent. A sequence target has its
/// contents replaced wholesale; a non-array payload becomes a single element.
/// A missing key or a shape mismatch is a no-op, logged at debug level.
pub fn merge_at_key(node: &mut Value, key: &str, new_value: &Value) {
    let Some(target) = find_key_mut(node, key) else {
        debug!(key, "merge target not found, skipping");
        return;
    };

    match (target, new_value) {
        (Value::Object(map), Value::Object(additions)) => {
            for (k, v) in additions {
                map.insert(k.clone(), v.clone());
            }
        }
        (Value::Array(items), Value::Array(replacement)) => {
            items.clear();
            items.extend(replacement.iter().cloned());
        }
        (Value::Array(items), other) => {
            items.clear();
            items.push(other.clone());
        }
        _ => {
            debug!(key, "merge target shape mismatch, skipping");
        }
    }
}
