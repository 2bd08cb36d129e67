//! Cardinal stepping that probes the leading edge of a box one tile at a time.

use noahs_ark_core::{Direction, Movement, Rect, Vec2};
use noahs_ark_world::{MultiTileMapGrid, Tree};

/// Distance past the leading edge at which tiles are probed.
const EDGE_PROBE_DISTANCE: f32 = 1.0;

/// Smallest advance a single iteration makes.
const MINIMUM_STEP: f32 = 1.0;

/// Controls how far a tree must sit across an object's path before it blocks
/// directional movement.
///
/// A tree only stops an object when the two overlap on the axis
/// perpendicular to travel by at least the required amount, so brushing past
/// the edge of a canopy does not snag. The requirement defaults to half of the
/// tree's perpendicular extent and never exceeds half of the object's.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TreeApproach {
    minimum_overlap: Option<f32>,
}

impl TreeApproach {
    /// Requires a fixed perpendicular overlap in pixels.
    #[must_use]
    pub const fn with_minimum_overlap(minimum_overlap: f32) -> Self {
        Self {
            minimum_overlap: Some(minimum_overlap),
        }
    }

    /// Configured overlap, or `None` when derived from the tree's size.
    #[must_use]
    pub const fn minimum_overlap(&self) -> Option<f32> {
        self.minimum_overlap
    }

    fn required_overlap(&self, object_extent: f32, tree_extent: f32) -> f32 {
        self.minimum_overlap
            .unwrap_or(tree_extent / 2.0)
            .min(object_extent / 2.0)
    }
}

/// Direction expressed as an axis plus a sign, so one stepper serves all four.
#[derive(Clone, Copy, Debug)]
struct Lane {
    vertical: bool,
    sign: f32,
}

impl Lane {
    fn for_direction(direction: Direction) -> Option<Self> {
        let (vertical, sign) = match direction {
            Direction::Up => (true, -1.0),
            Direction::Down => (true, 1.0),
            Direction::Left => (false, -1.0),
            Direction::Right => (false, 1.0),
            Direction::Invalid => return None,
        };
        Some(Self { vertical, sign })
    }

    fn along(self, point: Vec2) -> f32 {
        if self.vertical {
            point.y
        } else {
            point.x
        }
    }

    fn point(self, along: f32, across: f32) -> Vec2 {
        if self.vertical {
            Vec2::new(across, along)
        } else {
            Vec2::new(along, across)
        }
    }

    fn offset(self, distance: f32) -> Vec2 {
        self.point(self.sign * distance, 0.0)
    }

    /// Signed distance from `from` to `to` measured in the direction of travel.
    fn distance_ahead(self, from: f32, to: f32) -> f32 {
        (to - from) * self.sign
    }

    fn leading_edge(self, rect: &Rect) -> f32 {
        match (self.vertical, self.sign > 0.0) {
            (true, false) => rect.top(),
            (true, true) => rect.bottom(),
            (false, false) => rect.left(),
            (false, true) => rect.right(),
        }
    }

    fn trailing_edge(self, rect: &Rect) -> f32 {
        match (self.vertical, self.sign > 0.0) {
            (true, false) => rect.bottom(),
            (true, true) => rect.top(),
            (false, false) => rect.right(),
            (false, true) => rect.left(),
        }
    }

    fn cross_extent(self, rect: &Rect) -> f32 {
        if self.vertical {
            rect.width()
        } else {
            rect.height()
        }
    }

    fn cross_overlap(self, a: &Rect, b: &Rect) -> f32 {
        if self.vertical {
            a.horizontal_overlap(b)
        } else {
            a.vertical_overlap(b)
        }
    }

    /// Perpendicular coordinates sampled along the leading edge: both
    /// corners pulled in by a quarter of the cross extent, plus the middle.
    fn samples(self, rect: &Rect) -> [f32; 3] {
        let extent = self.cross_extent(rect);
        let (low, middle) = if self.vertical {
            (rect.left(), rect.center_x())
        } else {
            (rect.top(), rect.center_y())
        };
        let high = low + extent;
        [low + extent / 4.0, middle, high - extent / 4.0]
    }
}

/// Moves `bbox` along a cardinal direction and returns its final center.
pub(crate) fn step_object(
    bbox: Rect,
    movement: Movement,
    approach: TreeApproach,
    grid: &MultiTileMapGrid,
) -> Vec2 {
    let Some(lane) = Lane::for_direction(movement.direction()) else {
        return bbox.center();
    };

    let mut current = bbox;
    let mut remaining = movement.distance();
    while remaining > 0.0 {
        let lead = lane.leading_edge(&current);
        let probe = lead + lane.sign * EDGE_PROBE_DISTANCE;

        let mut room = f32::INFINITY;
        for across in lane.samples(&current) {
            let Some(tile) = grid.tile_at(lane.point(probe, across)) else {
                log::trace!(
                    "no tile {:?} of {:?}; stopping",
                    movement.direction(),
                    current.center()
                );
                return current.center();
            };
            if !tile.is_walkable() {
                log::trace!(
                    "{:?} tile {:?} of {:?}; stopping",
                    tile.tile_type(),
                    movement.direction(),
                    current.center()
                );
                return current.center();
            }
            room = room.min(lane.distance_ahead(lead, lane.leading_edge(&tile.world_bounding_box())));
        }

        let step = room.max(MINIMUM_STEP).min(remaining);
        let candidate = current.translated(lane.offset(step));

        if let Some(gap) = blocking_tree_gap(&current, &candidate, lane, approach, grid) {
            log::trace!("tree {:?} of {:?}; stopping", movement.direction(), current.center());
            return current.translated(lane.offset(gap.clamp(0.0, step))).center();
        }

        current = candidate;
        if step >= remaining {
            break;
        }
        remaining -= step;
    }

    current.center()
}

/// Distance to the nearest tree ahead that blocks the step from `current`
/// to `candidate`, if any.
fn blocking_tree_gap(
    current: &Rect,
    candidate: &Rect,
    lane: Lane,
    approach: TreeApproach,
    grid: &MultiTileMapGrid,
) -> Option<f32> {
    let swept = current.union(candidate);
    let map = grid.tile_map_at(swept.center())?;
    let lead = lane.leading_edge(current);
    let center = lane.along(current.center());

    map.trees()
        .iter()
        .map(Tree::collision_bounds)
        .filter(|tree| swept.intersects(tree))
        .filter(|tree| lane.distance_ahead(center, lane.along(tree.center())) > 0.0)
        .filter(|tree| {
            let required =
                approach.required_overlap(lane.cross_extent(current), lane.cross_extent(tree));
            lane.cross_overlap(current, tree) >= required
        })
        .map(|tree| lane.distance_ahead(lead, lane.trailing_edge(&tree)))
        .reduce(f32::min)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lanes_mirror_each_other() {
        let rect = Rect::new(40.0, 40.0, 16.0, 8.0);
        let up = Lane::for_direction(Direction::Up).expect("up lane");
        let down = Lane::for_direction(Direction::Down).expect("down lane");
        assert_eq!(up.leading_edge(&rect), 36.0);
        assert_eq!(down.leading_edge(&rect), 44.0);
        assert_eq!(up.trailing_edge(&rect), down.leading_edge(&rect));
        assert_eq!(up.offset(3.0), Vec2::new(0.0, -3.0));
        assert_eq!(up.distance_ahead(36.0, 30.0), 6.0);
        assert!(Lane::for_direction(Direction::Invalid).is_none());
    }

    #[test]
    fn samples_are_inset_by_a_quarter() {
        let rect = Rect::new(40.0, 40.0, 16.0, 8.0);
        let up = Lane::for_direction(Direction::Up).expect("up lane");
        let right = Lane::for_direction(Direction::Right).expect("right lane");
        assert_eq!(up.samples(&rect), [36.0, 40.0, 44.0]);
        assert_eq!(right.samples(&rect), [38.0, 40.0, 42.0]);
    }

    #[test]
    fn required_overlap_defaults_to_half_the_tree() {
        let approach = TreeApproach::default();
        assert_eq!(approach.required_overlap(64.0, 30.0), 15.0);
        assert_eq!(approach.required_overlap(16.0, 30.0), 8.0);

        let fixed = TreeApproach::with_minimum_overlap(4.0);
        assert_eq!(fixed.required_overlap(16.0, 30.0), 4.0);
        assert_eq!(fixed.minimum_overlap(), Some(4.0));
    }
}
