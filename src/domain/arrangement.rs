//! River arrangements and their layout configuration.
//!
//! An arrangement describes which content fills which slot of a river. The
//! mapping from arrangement fields to container treatments is an immutable
//! [`LayoutConfig`] value handed to the assembly code, never shared mutable
//! state.

use std::collections::BTreeMap;

use serde_json::Value;

use super::tiles::{ContainerKind, River, Tile};

/// Field order used by every layout except the wide-leaderboard one.
const STANDARD_FIELD_ORDER: [&str; 7] = [
    "marquee_articles",
    "leaderboard_tiles",
    "top_stories",
    "priority_1_page_articles",
    "lily_pad_1_articles",
    "priority_2_page_articles",
    "lily_pad_2_articles",
];

/// The wide-leaderboard layout promotes the leaderboard to the first slot.
const LEADERBOARD_FIRST_FIELD_ORDER: [&str; 7] = [
    "leaderboard_tiles",
    "marquee_articles",
    "top_stories",
    "priority_1_page_articles",
    "lily_pad_1_articles",
    "priority_2_page_articles",
    "lily_pad_2_articles",
];

pub const WIDE_LEADERBOARD_LAYOUT: &str = "single_wide_leaderboard";

/// Immutable mapping from layout name to field → container-kind assignments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutConfig {
    layouts: BTreeMap<String, BTreeMap<String, ContainerKind>>,
}

impl LayoutConfig {
    pub fn new(layouts: BTreeMap<String, BTreeMap<String, ContainerKind>>) -> Self {
        Self { layouts }
    }

    /// The stock layout set shipped with the platform. Every layout wraps the
    /// marquee, top-stories and lilypad fields; the war layout swaps the
    /// marquee for a war treatment.
    pub fn standard() -> Self {
        fn stock(marquee: ContainerKind) -> BTreeMap<String, ContainerKind> {
            BTreeMap::from([
                ("marquee_articles".to_string(), marquee),
                ("top_stories".to_string(), ContainerKind::TopStories),
                ("lily_pad_1_articles".to_string(), ContainerKind::Lilypad),
                ("lily_pad_2_articles".to_string(), ContainerKind::Lilypad),
            ])
        }

        let mut layouts = BTreeMap::new();
        for name in [
            "single",
            "double",
            "three",
            "three_leftright",
            "four",
            WIDE_LEADERBOARD_LAYOUT,
        ] {
            layouts.insert(name.to_string(), stock(ContainerKind::Marquee));
        }
        layouts.insert(
            "war_single_image".to_string(),
            stock(ContainerKind::WarTreatment),
        );

        Self { layouts }
    }

    pub fn contains(&self, layout: &str) -> bool {
        self.layouts.contains_key(layout)
    }

    /// Container kind assigned to a field under a layout, if the field is
    /// container-mapped at all.
    pub fn container_kind(&self, layout: &str, field: &str) -> Option<ContainerKind> {
        self.layouts.get(layout)?.get(field).copied()
    }

    /// The order in which arrangement fields are walked for a layout.
    pub fn field_order(&self, layout: &str) -> &'static [&'static str] {
        if layout == WIDE_LEADERBOARD_LAYOUT {
            &LEADERBOARD_FIRST_FIELD_ORDER
        } else {
            &STANDARD_FIELD_ORDER
        }
    }
}

/// Strip the site prefix from a raw marquee-layout field value.
///
/// Stored field values look like `{prefix}_river_marquee_{layout}`; only the
/// trailing layout name selects behavior.
pub fn strip_layout_prefix<'a>(prefix: &str, raw: &'a str) -> &'a str {
    let full = format!("{prefix}_river_marquee_");
    raw.strip_prefix(full.as_str()).unwrap_or(raw)
}

/// A fully assembled river arrangement.
#[derive(Debug, Clone, PartialEq)]
pub struct Arrangement {
    nid: Option<i64>,
    category: Option<String>,
    tiles: Vec<Tile>,
}

impl Arrangement {
    pub fn new(nid: Option<i64>, category: Option<String>) -> Self {
        Self {
            nid,
            category,
            tiles: Vec::new(),
        }
    }

    /// The arrangement node's identifier, when one backed this arrangement.
    pub fn id(&self) -> Option<i64> {
        self.nid
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub(crate) fn push_tile(&mut self, tile: Tile) {
        self.tiles.push(tile);
    }

    pub(crate) fn extend_tiles(&mut self, tiles: impl IntoIterator<Item = Tile>) {
        self.tiles.extend(tiles);
    }
}

impl River for Arrangement {
    fn to_value(&self) -> Value {
        Value::Array(
            self.tiles
                .iter()
                .map(|tile| serde_json::to_value(tile).expect("tiles serialize as JSON"))
                .collect(),
        )
    }

    fn summary(&self) -> String {
        format!(
            "arrangement nid={} tiles={}",
            self.nid.map_or_else(|| "none".to_string(), |n| n.to_string()),
            self.tiles.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::tiles::NodeTile;

    use super::*;

    #[test]
    fn standard_config_covers_the_stock_layouts() {
        let config = LayoutConfig::standard();
        for layout in [
            "single",
            "double",
            "three",
            "three_leftright",
            "four",
            "war_single_image",
            WIDE_LEADERBOARD_LAYOUT,
        ] {
            assert!(config.contains(layout), "missing layout {layout}");
        }
        assert!(!config.contains("hexagonal"));
    }

    #[test]
    fn war_layout_swaps_the_marquee_container() {
        let config = LayoutConfig::standard();
        assert_eq!(
            config.container_kind("single", "marquee_articles"),
            Some(ContainerKind::Marquee)
        );
        assert_eq!(
            config.container_kind("war_single_image", "marquee_articles"),
            Some(ContainerKind::WarTreatment)
        );
        assert_eq!(config.container_kind("single", "leaderboard_tiles"), None);
    }

    #[test]
    fn wide_leaderboard_layout_walks_leaderboard_first() {
        let config = LayoutConfig::standard();
        assert_eq!(
            config.field_order(WIDE_LEADERBOARD_LAYOUT)[0],
            "leaderboard_tiles"
        );
        assert_eq!(config.field_order("single")[0], "marquee_articles");
    }

    #[test]
    fn layout_prefix_is_stripped() {
        assert_eq!(
            strip_layout_prefix("sivault", "sivault_river_marquee_single"),
            "single"
        );
        // Values without the prefix pass through untouched.
        assert_eq!(strip_layout_prefix("sivault", "double"), "double");
    }

    #[test]
    fn arrangement_exposes_id_and_count() {
        let mut arrangement = Arrangement::new(Some(99), Some("swim".to_string()));
        assert_eq!(arrangement.id(), Some(99));
        assert!(arrangement.is_empty());

        arrangement.push_tile(Tile::node(NodeTile::new(1, "A", "article")));
        assert_eq!(arrangement.len(), 1);
    }

    #[test]
    fn arrangement_renders_as_a_json_array() {
        let mut arrangement = Arrangement::new(None, None);
        arrangement.push_tile(Tile::node(NodeTile::new(5, "B", "article")));
        let value = arrangement.to_value();
        assert_eq!(value.as_array().map(Vec::len), Some(1));
        assert_eq!(value[0]["nid"], 5);
    }
}
