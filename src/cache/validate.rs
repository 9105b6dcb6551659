//! Document validation ahead of a cache write.

use serde_json::{Map, Value};

use crate::domain::types::NodeId;

/// Decide whether a document may be stored under the given identifier.
///
/// Passes only when the identifier is numeric, the document's `id` field
/// equals the identifier exactly (JSON value equality, so an integer id never
/// matches its string rendering), and the document carries a non-empty
/// `type` tag. A failed validation is an expected outcome: callers skip the
/// write and move on.
pub fn validate(owner: &NodeId, document: &Map<String, Value>) -> bool {
    if !owner.is_numeric() {
        return false;
    }

    if document.get("id") != Some(&owner.to_value()) {
        return false;
    }

    matches!(document.get("type"), Some(Value::String(tag)) if !tag.is_empty())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn document(id: Value, doc_type: &str) -> Map<String, Value> {
        let mut doc = Map::new();
        doc.insert("id".to_string(), id);
        doc.insert("type".to_string(), json!(doc_type));
        doc.insert("title".to_string(), json!("X"));
        doc
    }

    #[test]
    fn valid_document_passes() {
        assert!(validate(&NodeId::Int(42), &document(json!(42), "article")));
    }

    #[test]
    fn non_numeric_identifier_fails() {
        assert!(!validate(&NodeId::from("abc"), &document(json!("abc"), "article")));
    }

    #[test]
    fn numeric_string_identifier_requires_a_string_id_field() {
        // "42" is numeric, but only matches a document whose id is the same
        // string, not the integer 42.
        assert!(validate(&NodeId::from("42"), &document(json!("42"), "article")));
        assert!(!validate(&NodeId::from("42"), &document(json!(42), "article")));
    }

    #[test]
    fn mismatched_id_fails() {
        assert!(!validate(&NodeId::Int(42), &document(json!(43), "article")));
        assert!(!validate(&NodeId::Int(42), &document(json!("42"), "article")));
    }

    #[test]
    fn missing_or_empty_type_fails() {
        let mut no_type = document(json!(42), "article");
        no_type.remove("type");
        assert!(!validate(&NodeId::Int(42), &no_type));

        assert!(!validate(&NodeId::Int(42), &document(json!(42), "")));
    }

    #[test]
    fn missing_id_field_fails() {
        let mut doc = document(json!(42), "article");
        doc.remove("id");
        assert!(!validate(&NodeId::Int(42), &doc));
    }
}
