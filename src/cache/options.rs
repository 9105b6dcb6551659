//! Request options and their normalization.
//!
//! Options arrive scope-partitioned (the `get` scope carries query-string
//! parameters) and in whatever order the transport produced. Normalization
//! strips the fields that only affect routing, then rebuilds everything into
//! ordered maps so semantically equal requests serialize identically.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Fields in the `get` scope that never change the logical meaning of a
/// request: the resolved path, a custom-path override, the request logging
/// toggle, and the raw query string.
const TRANSPORT_ONLY_FIELDS: [&str; 4] = ["path", "custom_path", "_enable_logging", "q"];

/// Name of the scope holding query-string-like parameters.
pub const GET_SCOPE: &str = "get";

/// One scope of request parameters, as received.
pub type Scope = Map<String, Value>;

/// Request options partitioned by scope, prior to normalization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestOptions {
    scopes: Map<String, Value>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a whole scope.
    pub fn with_scope(mut self, name: impl Into<String>, scope: Scope) -> Self {
        self.scopes.insert(name.into(), Value::Object(scope));
        self
    }

    /// Insert or replace a single field in the `get` scope.
    pub fn with_get_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let entry = self
            .scopes
            .entry(GET_SCOPE.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(scope) = entry {
            scope.insert(name.into(), value.into());
        }
        self
    }

    /// Strip transport-only fields and canonicalize ordering.
    ///
    /// Absent fields and scopes are skipped silently; nothing here can fail.
    /// The `id` field survives normalization — it is dropped only inside key
    /// derivation, so the stored options snapshot still shows what the caller
    /// actually asked for.
    pub fn normalize(&self) -> NormalizedOptions {
        let mut scopes: BTreeMap<String, BTreeMap<String, Value>> = BTreeMap::new();

        for (name, value) in &self.scopes {
            let mut fields: BTreeMap<String, Value> = match value {
                Value::Object(map) => map.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
                // Non-mapping scopes are kept under a sentinel field so the
                // key still reflects them.
                other => BTreeMap::from([("_value".to_string(), other.clone())]),
            };

            if name == GET_SCOPE {
                for field in TRANSPORT_ONLY_FIELDS {
                    fields.remove(field);
                }
            }

            scopes.insert(name.clone(), fields);
        }

        NormalizedOptions { scopes }
    }
}

impl From<Map<String, Value>> for RequestOptions {
    fn from(scopes: Map<String, Value>) -> Self {
        Self { scopes }
    }
}

/// Options after transport-field stripping and canonical ordering.
///
/// Scope and field order is a property of the `BTreeMap` representation, so
/// serialization through `serde_json` is deterministic for equal structures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedOptions {
    scopes: BTreeMap<String, BTreeMap<String, Value>>,
}

impl NormalizedOptions {
    pub fn scope(&self, name: &str) -> Option<&BTreeMap<String, Value>> {
        self.scopes.get(name)
    }

    /// Remove a field from the `get` scope. Used by key derivation to drop
    /// the `id` option.
    pub(crate) fn remove_get_field(&mut self, field: &str) {
        if let Some(scope) = self.scopes.get_mut(GET_SCOPE) {
            scope.remove(field);
        }
    }

    /// Deterministic JSON serialization of the normalized options.
    pub fn canonical_json(&self) -> String {
        serde_json::to_string(&self.scopes).expect("normalized options serialize as JSON")
    }

    /// The normalized options as a JSON value, for the stored snapshot.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(&self.scopes).expect("normalized options serialize as JSON")
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn scope(pairs: &[(&str, Value)]) -> Scope {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn transport_fields_are_stripped_from_the_get_scope() {
        let options = RequestOptions::new().with_scope(
            GET_SCOPE,
            scope(&[
                ("path", json!("/rivers/swim")),
                ("custom_path", json!("/r/swim")),
                ("_enable_logging", json!(true)),
                ("q", json!("rivers/swim?sort=asc")),
                ("sort", json!("asc")),
            ]),
        );

        let normalized = options.normalize();
        let get = normalized.scope(GET_SCOPE).expect("get scope present");
        for field in TRANSPORT_ONLY_FIELDS {
            assert!(!get.contains_key(field), "{field} should be stripped");
        }
        assert_eq!(get.get("sort"), Some(&json!("asc")));
    }

    #[test]
    fn stripping_is_silent_when_fields_are_absent() {
        let options =
            RequestOptions::new().with_scope(GET_SCOPE, scope(&[("sort", json!("asc"))]));
        let normalized = options.normalize();
        assert_eq!(
            normalized.scope(GET_SCOPE).and_then(|s| s.get("sort")),
            Some(&json!("asc"))
        );
    }

    #[test]
    fn transport_fields_survive_in_other_scopes() {
        let options = RequestOptions::new().with_scope("post", scope(&[("q", json!("keep me"))]));
        let normalized = options.normalize();
        assert_eq!(
            normalized.scope("post").and_then(|s| s.get("q")),
            Some(&json!("keep me"))
        );
    }

    #[test]
    fn normalization_keeps_the_id_option() {
        let options = RequestOptions::new()
            .with_get_field("id", 42)
            .with_get_field("sort", "asc");
        let normalized = options.normalize();
        assert_eq!(
            normalized.scope(GET_SCOPE).and_then(|s| s.get("id")),
            Some(&json!(42))
        );
    }

    #[test]
    fn insertion_order_does_not_affect_the_canonical_form() {
        let a = RequestOptions::new()
            .with_scope("zeta", scope(&[("b", json!(2)), ("a", json!(1))]))
            .with_scope(GET_SCOPE, scope(&[("sort", json!("asc")), ("page", json!(3))]));
        let b = RequestOptions::new()
            .with_scope(GET_SCOPE, scope(&[("page", json!(3)), ("sort", json!("asc"))]))
            .with_scope("zeta", scope(&[("a", json!(1)), ("b", json!(2))]));

        assert_eq!(a.normalize(), b.normalize());
        assert_eq!(a.normalize().canonical_json(), b.normalize().canonical_json());
    }

    #[test]
    fn values_are_not_mutated_by_normalization() {
        let nested = json!({"z": [3, 1, 2], "a": {"inner": true}});
        let options =
            RequestOptions::new().with_scope(GET_SCOPE, scope(&[("filter", nested.clone())]));
        let normalized = options.normalize();
        assert_eq!(
            normalized.scope(GET_SCOPE).and_then(|s| s.get("filter")),
            Some(&nested)
        );
    }
}
