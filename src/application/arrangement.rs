//! Arrangement assembly.
//!
//! Turns the fields of an arrangement node into an ordered river of tiles,
//! driven entirely by an immutable [`LayoutConfig`]. Loading the node itself
//! is the caller's concern; the source arrives here as a plain value.

use std::collections::BTreeMap;

use tracing::debug;

use crate::domain::{
    arrangement::{Arrangement, LayoutConfig, strip_layout_prefix},
    error::DomainError,
    tiles::{NodeTile, Tile},
};

/// The parts of an arrangement node the assembly needs: its identity, the
/// raw marquee-layout field value, and the node tiles collected per field.
#[derive(Debug, Clone, Default)]
pub struct ArrangementSource {
    pub nid: Option<i64>,
    pub category: Option<String>,
    pub layout: String,
    pub fields: BTreeMap<String, Vec<NodeTile>>,
}

/// Assemble a river arrangement from an arrangement node's fields.
///
/// Fields are walked in the layout's configured order; container-mapped
/// fields are wrapped in their container kind with the layout name as the
/// variation, all other fields contribute plain node tiles. Fields absent
/// from the source are skipped.
pub fn flow(
    source: ArrangementSource,
    config: &LayoutConfig,
    site_prefix: &str,
) -> Result<Arrangement, DomainError> {
    let layout = strip_layout_prefix(site_prefix, &source.layout).to_string();
    if !config.contains(&layout) {
        return Err(DomainError::unknown_layout(layout));
    }

    let mut arrangement = Arrangement::new(source.nid, source.category);

    for field in config.field_order(&layout).iter().copied() {
        let Some(tiles) = source.fields.get(field) else {
            continue;
        };

        match config.container_kind(&layout, field) {
            Some(kind) => {
                arrangement.push_tile(Tile::container(
                    kind,
                    tiles.clone(),
                    Some(layout.clone()),
                ));
            }
            None => {
                arrangement.extend_tiles(tiles.iter().cloned().map(Tile::node));
            }
        }
    }

    debug!(
        target: "riverbed::arrangement",
        nid = ?arrangement.id(),
        %layout,
        tiles = arrangement.len(),
        "arrangement assembled"
    );

    Ok(arrangement)
}
