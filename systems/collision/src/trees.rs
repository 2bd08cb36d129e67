//! Box-versus-tree intersection test.

use noahs_ark_core::Rect;
use noahs_ark_world::{MultiTileMapGrid, Tree};

/// Returns the collision box of the first tree intersecting `bbox`.
///
/// Only trees on the tile map containing the box's center are considered,
/// and they are tested in planting order. Each tree's box is shrunk by
/// [`noahs_ark_core::TREE_COLLISION_SHRINK_IN_PIXELS`] first so sprites do
/// not catch on the transparent fringe of the canopy.
#[must_use]
pub fn collides_with_tree(bbox: &Rect, grid: &MultiTileMapGrid) -> Option<Rect> {
    let map = grid.tile_map_at(bbox.center())?;
    map.trees()
        .iter()
        .map(Tree::collision_bounds)
        .find(|tree| bbox.intersects(tree))
}
