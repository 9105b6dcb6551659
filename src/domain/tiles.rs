//! Renderable river tiles.
//!
//! A river is an ordered list of tiles. Most tiles point at a single content
//! node; a handful of container kinds group several node tiles into one
//! treatment (a marquee, a top-stories block, and so on). The container set is
//! closed: layouts select a [`ContainerKind`] through configuration and all
//! construction goes through [`Tile::container`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The closed set of container treatments a layout can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerKind {
    Marquee,
    TopStories,
    Lilypad,
    WarTreatment,
}

impl ContainerKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ContainerKind::Marquee => "marquee",
            ContainerKind::TopStories => "top_stories",
            ContainerKind::Lilypad => "lilypad",
            ContainerKind::WarTreatment => "war_treatment",
        }
    }
}

/// A tile backed by a single content node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeTile {
    pub nid: i64,
    pub title: String,
    pub node_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl NodeTile {
    pub fn new(nid: i64, title: impl Into<String>, node_type: impl Into<String>) -> Self {
        Self {
            nid,
            title: title.into(),
            node_type: node_type.into(),
            url: None,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

/// One renderable unit in a river.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tile", rename_all = "snake_case")]
pub enum Tile {
    Node {
        #[serde(flatten)]
        node: NodeTile,
    },
    Container {
        kind: ContainerKind,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        variation: Option<String>,
        tiles: Vec<NodeTile>,
    },
}

impl Tile {
    pub fn node(node: NodeTile) -> Self {
        Tile::Node { node }
    }

    /// Single dispatch point for container construction. The variation names
    /// the layout the container was built for, which renderers use to pick a
    /// treatment variant.
    pub fn container(kind: ContainerKind, tiles: Vec<NodeTile>, variation: Option<String>) -> Self {
        Tile::Container {
            kind,
            variation,
            tiles,
        }
    }

    /// Number of node tiles this tile contributes to the river.
    pub fn node_count(&self) -> usize {
        match self {
            Tile::Node { .. } => 1,
            Tile::Container { tiles, .. } => tiles.len(),
        }
    }
}

/// Anything that can be rendered as part of a river.
pub trait River {
    /// The river as a JSON value.
    fn to_value(&self) -> Value;

    /// Short human-readable description, used in logs.
    fn summary(&self) -> String;

    /// The river serialized as a JSON string.
    fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.to_value())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn node_tile_serializes_flat() {
        let tile = Tile::node(NodeTile::new(7, "Headline", "article"));
        let value = serde_json::to_value(&tile).expect("tile serializes");
        assert_eq!(
            value,
            json!({"tile": "node", "nid": 7, "title": "Headline", "node_type": "article"})
        );
    }

    #[test]
    fn container_carries_kind_and_variation() {
        let tile = Tile::container(
            ContainerKind::Marquee,
            vec![NodeTile::new(1, "A", "article")],
            Some("single".to_string()),
        );
        let value = serde_json::to_value(&tile).expect("tile serializes");
        assert_eq!(value["tile"], "container");
        assert_eq!(value["kind"], "marquee");
        assert_eq!(value["variation"], "single");
        assert_eq!(value["tiles"][0]["nid"], 1);
    }

    #[test]
    fn container_without_variation_omits_the_field() {
        let tile = Tile::container(ContainerKind::TopStories, vec![], None);
        let value = serde_json::to_value(&tile).expect("tile serializes");
        assert!(value.get("variation").is_none());
    }

    #[test]
    fn node_count_sums_container_members() {
        let plain = Tile::node(NodeTile::new(1, "A", "article"));
        let grouped = Tile::container(
            ContainerKind::Lilypad,
            vec![
                NodeTile::new(2, "B", "article"),
                NodeTile::new(3, "C", "article"),
            ],
            None,
        );
        assert_eq!(plain.node_count(), 1);
        assert_eq!(grouped.node_count(), 2);
    }
}
