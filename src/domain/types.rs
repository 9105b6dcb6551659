//! Shared domain identifiers.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identifier of a content node, as received from a caller.
///
/// Callers hand identifiers over either as real integers (path routing) or as
/// raw request strings. Both forms are carried so the validator can reject
/// non-numeric identifiers as a value-level outcome instead of a parse error
/// at the API boundary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeId {
    Int(i64),
    Raw(String),
}

impl NodeId {
    /// Whether the identifier denotes a number.
    ///
    /// Raw strings count when they parse as a finite number, so `"42"` and
    /// `"42.5"` pass while `"abc"` and `"inf"` do not.
    pub fn is_numeric(&self) -> bool {
        match self {
            NodeId::Int(_) => true,
            NodeId::Raw(raw) => raw.trim().parse::<f64>().is_ok_and(f64::is_finite),
        }
    }

    /// Canonical string form used in key derivation and as the stored owner id.
    pub fn canonical(&self) -> String {
        match self {
            NodeId::Int(id) => id.to_string(),
            NodeId::Raw(raw) => raw.clone(),
        }
    }

    /// The identifier as a JSON value, for exact comparison against a
    /// document's `id` field. An integer id never equals its string form.
    pub fn to_value(&self) -> Value {
        match self {
            NodeId::Int(id) => Value::from(*id),
            NodeId::Raw(raw) => Value::from(raw.clone()),
        }
    }
}

impl From<i64> for NodeId {
    fn from(id: i64) -> Self {
        NodeId::Int(id)
    }
}

impl From<&str> for NodeId {
    fn from(raw: &str) -> Self {
        NodeId::Raw(raw.to_string())
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.canonical())
    }
}
