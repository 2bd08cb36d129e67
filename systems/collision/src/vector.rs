//! Free movement along an arbitrary vector with slide resolution at trees.

use noahs_ark_core::{Rect, TileType, Vec2, TILE_DIMENSION_IN_PIXELS};
use noahs_ark_world::MultiTileMapGrid;

use crate::trees::collides_with_tree;

/// Longest distance covered by a single step.
const MAX_STEP: f32 = TILE_DIMENSION_IN_PIXELS;

/// Sides of a tree that a moving box runs into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct SideContact {
    /// The box meets the tree's left or right edge.
    horizontal: bool,
    /// The box meets the tree's top or bottom edge.
    vertical: bool,
}

/// Moves `bbox` along `move_vector` and returns its final center.
pub(crate) fn move_along_vector(
    bbox: Rect,
    move_vector: Vec2,
    allowed_tile_types: &[TileType],
    allow_movement_over_solid_objects: bool,
    grid: &MultiTileMapGrid,
) -> Vec2 {
    let distance = move_vector.length();
    if !distance.is_finite() || distance <= 0.0 {
        return bbox.center();
    }
    let heading = move_vector / distance;

    let mut current = bbox;
    let mut remaining = distance;
    while remaining > 0.0 {
        let step = remaining.min(MAX_STEP);
        let offset = heading * step;
        let candidate = current.translated(offset);

        if !is_allowed(candidate.center(), allowed_tile_types, grid) {
            log::trace!("vector move from {:?} left allowed ground", current.center());
            return current.center();
        }

        if !allow_movement_over_solid_objects {
            if let Some(tree) = collides_with_tree(&candidate, grid) {
                if heading_toward(&current, offset, &tree) {
                    return resolve_tree_contact(
                        &current,
                        &candidate,
                        offset,
                        &tree,
                        allowed_tile_types,
                        grid,
                    );
                }
            }
        }

        current = candidate;
        remaining -= step;
    }

    current.center()
}

fn is_allowed(position: Vec2, allowed_tile_types: &[TileType], grid: &MultiTileMapGrid) -> bool {
    grid.tile_at(position)
        .is_some_and(|tile| allowed_tile_types.contains(&tile.tile_type()))
}

fn heading_toward(current: &Rect, offset: Vec2, tree: &Rect) -> bool {
    (tree.center() - current.center()).dot(offset) > 0.0
}

/// Classifies which of the tree's edges the step from `current` to
/// `candidate` runs into.
///
/// The box meets a left or right edge when, before the step, it was clear of
/// the tree horizontally while sharing part of its vertical span: centered on
/// it, or reaching in past one of its four corners. Top and bottom edges
/// mirror this. Approaching diagonally from clear of both spans meets a
/// corner, which counts as both. A box that already overlaps the tree meets
/// whichever side it would penetrate less.
fn side_contact(current: &Rect, candidate: &Rect, tree: &Rect) -> SideContact {
    let clear_horizontally = current.right() <= tree.left() || current.left() >= tree.right();
    let clear_vertically = current.bottom() <= tree.top() || current.top() >= tree.bottom();

    if clear_horizontally || clear_vertically {
        return SideContact {
            horizontal: clear_horizontally,
            vertical: clear_vertically,
        };
    }

    let horizontal_depth = candidate.horizontal_overlap(tree);
    let vertical_depth = candidate.vertical_overlap(tree);
    SideContact {
        horizontal: horizontal_depth <= vertical_depth,
        vertical: vertical_depth <= horizontal_depth,
    }
}

fn resolve_tree_contact(
    current: &Rect,
    candidate: &Rect,
    offset: Vec2,
    tree: &Rect,
    allowed_tile_types: &[TileType],
    grid: &MultiTileMapGrid,
) -> Vec2 {
    let contact = side_contact(current, candidate, tree);
    let slide = match (contact.horizontal, contact.vertical) {
        (true, false) => Vec2::new(0.0, offset.y),
        (false, true) => Vec2::new(offset.x, 0.0),
        _ => {
            log::trace!("{:?} wedged against tree corner", current.center());
            return current.center();
        }
    };

    let slid = current.translated(slide);
    if is_allowed(slid.center(), allowed_tile_types, grid) {
        slid.center()
    } else {
        current.center()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TREE: Rect = Rect::new(88.0, 40.0, 30.0, 46.0);

    #[test]
    fn approaching_a_side_edge_is_horizontal() {
        let current = Rect::new(56.0, 40.0, 16.0, 16.0);
        let candidate = current.translated(Vec2::new(16.0, 0.0));
        assert_eq!(
            side_contact(&current, &candidate, &TREE),
            SideContact {
                horizontal: true,
                vertical: false,
            }
        );
    }

    #[test]
    fn approaching_from_below_is_vertical() {
        let current = Rect::new(88.0, 80.0, 16.0, 16.0);
        let candidate = current.translated(Vec2::new(0.0, -16.0));
        assert_eq!(
            side_contact(&current, &candidate, &TREE),
            SideContact {
                horizontal: false,
                vertical: true,
            }
        );
    }

    #[test]
    fn diagonal_corner_approach_is_both() {
        let current = Rect::new(64.0, 76.0, 16.0, 16.0);
        let candidate = current.translated(Vec2::new(8.0, -8.0));
        assert_eq!(
            side_contact(&current, &candidate, &TREE),
            SideContact {
                horizontal: true,
                vertical: true,
            }
        );
    }

    #[test]
    fn overlapping_boxes_use_shallower_penetration() {
        let current = Rect::new(76.0, 40.0, 16.0, 16.0);
        let candidate = current.translated(Vec2::new(2.0, 0.0));
        assert_eq!(
            side_contact(&current, &candidate, &TREE),
            SideContact {
                horizontal: true,
                vertical: false,
            }
        );
    }

    #[test]
    fn heading_toward_uses_direction_to_tree_center() {
        let current = Rect::new(56.0, 40.0, 16.0, 16.0);
        assert!(heading_toward(&current, Vec2::new(4.0, 0.0), &TREE));
        assert!(!heading_toward(&current, Vec2::new(-4.0, 0.0), &TREE));
        assert!(!heading_toward(&current, Vec2::new(0.0, 4.0), &TREE));
    }
}
