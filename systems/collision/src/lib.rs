#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Collision detection and movement resolution for the overworld.
//!
//! Every entry point borrows the caller's [`MultiTileMapGrid`] for the
//! duration of the call and returns the moved object's new center by value;
//! the engine never owns the objects it moves. Running out of world, stepping
//! onto a disallowed tile, or meeting a tree simply ends movement early.

use std::time::Duration;

use noahs_ark_core::{Direction, Movement, Rect, TileType, Vec2};
use noahs_ark_world::MultiTileMapGrid;

mod axe;
mod directional;
mod trees;
mod vector;

pub use axe::{handle_axe_collisions_with_trees, handle_axe_swings, AxeSwing, SwingPhase};
pub use directional::TreeApproach;
pub use trees::collides_with_tree;

/// Moves `bbox` along an arbitrary vector in tile-sized steps.
///
/// The vector's length is the distance to travel. Movement stops before the
/// first step whose center would leave the world or land on a tile type not
/// listed in `allowed_tile_types`. Unless `allow_movement_over_solid_objects`
/// is set, a step that runs into a tree ends the call: the object slides
/// along the tree's edge for that step, or stays put when wedged on a corner.
#[must_use]
pub fn move_object(
    bbox: Rect,
    move_vector: Vec2,
    allowed_tile_types: &[TileType],
    allow_movement_over_solid_objects: bool,
    grid: &MultiTileMapGrid,
) -> Vec2 {
    vector::move_along_vector(
        bbox,
        move_vector,
        allowed_tile_types,
        allow_movement_over_solid_objects,
        grid,
    )
}

/// Moves `bbox` in `direction` for `elapsed` time at `speed` pixels per second.
#[must_use]
pub fn move_object_in_direction(
    bbox: Rect,
    direction: Direction,
    speed: f32,
    elapsed: Duration,
    grid: &MultiTileMapGrid,
) -> Vec2 {
    move_object_by(bbox, Movement::from_speed(direction, speed, elapsed), grid)
}

/// Applies a cardinal movement using the default tree approach.
#[must_use]
pub fn move_object_by(bbox: Rect, movement: Movement, grid: &MultiTileMapGrid) -> Vec2 {
    move_object_with(bbox, movement, TreeApproach::default(), grid)
}

/// Applies a cardinal movement with an explicit tree approach.
///
/// The object walks tile by tile, checking the ground just past its leading
/// edge at three points, and stops flush against non-walkable ground, the
/// edge of the world, or a blocking tree. Movement with
/// [`Direction::Invalid`] leaves the object where it is.
#[must_use]
pub fn move_object_with(
    bbox: Rect,
    movement: Movement,
    approach: TreeApproach,
    grid: &MultiTileMapGrid,
) -> Vec2 {
    directional::step_object(bbox, movement, approach, grid)
}

/// Moves `bbox` up by `distance` pixels.
#[must_use]
pub fn move_object_up(bbox: Rect, distance: f32, grid: &MultiTileMapGrid) -> Vec2 {
    move_object_by(bbox, Movement::new(Direction::Up, distance), grid)
}

/// Moves `bbox` down by `distance` pixels.
#[must_use]
pub fn move_object_down(bbox: Rect, distance: f32, grid: &MultiTileMapGrid) -> Vec2 {
    move_object_by(bbox, Movement::new(Direction::Down, distance), grid)
}

/// Moves `bbox` left by `distance` pixels.
#[must_use]
pub fn move_object_left(bbox: Rect, distance: f32, grid: &MultiTileMapGrid) -> Vec2 {
    move_object_by(bbox, Movement::new(Direction::Left, distance), grid)
}

/// Moves `bbox` right by `distance` pixels.
#[must_use]
pub fn move_object_right(bbox: Rect, distance: f32, grid: &MultiTileMapGrid) -> Vec2 {
    move_object_by(bbox, Movement::new(Direction::Right, distance), grid)
}
