#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Noah's Ark overworld engine.
//!
//! This crate defines the value types that connect the world model, the
//! collision engine and adapters: geometry, directions, tile kinds, and the
//! collaborator traits through which the engine reaches audio playback and
//! texture lookup without owning either.

use std::time::Duration;

pub use glam::Vec2;
use serde::{Deserialize, Serialize};

mod geometry;

pub use geometry::Rect;

/// Canonical banner emitted when the sandbox boots.
pub const WELCOME_BANNER: &str = "Noah's Ark overworld sandbox.";

/// Side length of a single square tile measured in pixels.
pub const TILE_DIMENSION_IN_PIXELS: f32 = 16.0;

/// Amount removed from each dimension of a tree's box before collision tests.
pub const TREE_COLLISION_SHRINK_IN_PIXELS: f32 = 2.0;

/// Vertical distance between a tree's bottom edge and its trunk center.
pub const TREE_TRUNK_HALF_HEIGHT_IN_PIXELS: f32 = 8.0;

/// Hit points a freshly planted tree starts with.
pub const DEFAULT_TREE_HIT_POINTS: u32 = 3;

/// Duration a tree keeps shaking after being struck.
pub const TREE_SHAKE_DURATION: Duration = Duration::from_millis(400);

/// Speed at which detached food falls toward the ground.
pub const FOOD_FALL_SPEED_IN_PIXELS_PER_SECOND: f32 = 64.0;

/// Duration a dust cloud lingers after a tree is felled.
pub const DUST_CLOUD_LIFETIME: Duration = Duration::from_millis(600);

/// Cardinal movement directions available to overworld objects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing `y` coordinates.
    Up,
    /// Movement toward increasing `y` coordinates.
    Down,
    /// Movement toward decreasing `x` coordinates.
    Left,
    /// Movement toward increasing `x` coordinates.
    Right,
    /// No direction; requests carrying it never move anything.
    Invalid,
}

impl Direction {
    /// Unit offset pointing along the direction, zero for [`Direction::Invalid`].
    #[must_use]
    pub const fn unit_vector(self) -> Vec2 {
        match self {
            Self::Up => Vec2::new(0.0, -1.0),
            Self::Down => Vec2::new(0.0, 1.0),
            Self::Left => Vec2::new(-1.0, 0.0),
            Self::Right => Vec2::new(1.0, 0.0),
            Self::Invalid => Vec2::ZERO,
        }
    }

    /// Direction pointing the other way along the same axis.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Invalid => Self::Invalid,
        }
    }

    /// Dominant cardinal direction of the vector.
    ///
    /// Ties between the axes favour the horizontal direction. A zero or
    /// non-finite vector yields [`Direction::Invalid`].
    #[must_use]
    pub fn from_vector(vector: Vec2) -> Self {
        if !vector.is_finite() || vector == Vec2::ZERO {
            return Self::Invalid;
        }

        if vector.x.abs() >= vector.y.abs() {
            if vector.x > 0.0 {
                Self::Right
            } else {
                Self::Left
            }
        } else if vector.y > 0.0 {
            Self::Down
        } else {
            Self::Up
        }
    }
}

/// Request to move along a cardinal direction by a distance in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Movement {
    direction: Direction,
    distance: f32,
}

impl Movement {
    /// Creates a movement request. Negative or non-finite distances become zero.
    #[must_use]
    pub fn new(direction: Direction, distance: f32) -> Self {
        let distance = if distance.is_finite() {
            distance.max(0.0)
        } else {
            0.0
        };
        Self {
            direction,
            distance,
        }
    }

    /// Derives the distance covered at `speed` pixels per second over `elapsed`.
    #[must_use]
    pub fn from_speed(direction: Direction, speed: f32, elapsed: Duration) -> Self {
        Self::new(direction, speed * elapsed.as_secs_f32())
    }

    /// Direction of travel.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Requested distance in pixels.
    #[must_use]
    pub const fn distance(&self) -> f32 {
        self.distance
    }
}

/// Terrain kinds a tile can carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TileType {
    /// Open grassland.
    Grass,
    /// Beach sand.
    Sand,
    /// Trodden dirt path.
    Dirt,
    /// Open water.
    Water,
    /// Impassable rock.
    Rock,
    /// Black border around the edge of the overworld.
    Border,
}

impl TileType {
    /// Reports whether ordinary walkers may stand on the tile.
    #[must_use]
    pub const fn is_walkable(self) -> bool {
        matches!(self, Self::Grass | Self::Sand | Self::Dirt)
    }

    /// Parses the single-character glyph used by overworld layouts.
    #[must_use]
    pub const fn from_glyph(glyph: char) -> Option<Self> {
        match glyph {
            'G' => Some(Self::Grass),
            'S' => Some(Self::Sand),
            'D' => Some(Self::Dirt),
            'W' => Some(Self::Water),
            'R' => Some(Self::Rock),
            '#' => Some(Self::Border),
            _ => None,
        }
    }

    /// Glyph representing the tile in overworld layouts.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::Grass => 'G',
            Self::Sand => 'S',
            Self::Dirt => 'D',
            Self::Water => 'W',
            Self::Rock => 'R',
            Self::Border => '#',
        }
    }
}

/// Position of a tile map within the overworld grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileMapCoord {
    column: u32,
    row: u32,
}

impl TileMapCoord {
    /// Creates a new tile map coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the map.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the map.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Coordinate one step away in the provided direction, if it exists.
    ///
    /// Steps past column or row zero, and steps toward
    /// [`Direction::Invalid`], produce `None`.
    #[must_use]
    pub fn step(self, direction: Direction) -> Option<Self> {
        match direction {
            Direction::Up => self.row.checked_sub(1).map(|row| Self::new(self.column, row)),
            Direction::Down => self.row.checked_add(1).map(|row| Self::new(self.column, row)),
            Direction::Left => self
                .column
                .checked_sub(1)
                .map(|column| Self::new(column, self.row)),
            Direction::Right => self
                .column
                .checked_add(1)
                .map(|column| Self::new(column, self.row)),
            Direction::Invalid => None,
        }
    }
}

/// Kinds of food that can hang from a tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FoodKind {
    /// Red apple.
    Apple,
    /// Bunch of bananas.
    Banana,
    /// Coconut.
    Coconut,
    /// Bunch of grapes.
    Grapes,
    /// Orange.
    Orange,
}

/// Sound effects the engine asks the audio collaborator to play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// An axe blade striking a tree.
    AxeHitTree,
}

/// Identifiers of textures the engine looks up when spawning effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextureId {
    /// Pile of wood logs left by a felled tree.
    WoodLogs,
    /// Dust cloud shown while a tree falls.
    DustCloud,
}

/// Opaque handle to a loaded texture with its pixel dimensions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Texture {
    /// Identifier the texture was loaded for.
    pub id: TextureId,
    /// Width of the texture in pixels.
    pub width: f32,
    /// Height of the texture in pixels.
    pub height: f32,
}

impl Texture {
    /// Bounding box of the texture when drawn centered on `center`.
    #[must_use]
    pub const fn bounds_at(&self, center: Vec2) -> Rect {
        Rect::from_center(center, self.width, self.height)
    }
}

/// Audio collaborator that plays sound effects on request.
pub trait Speakers {
    /// Starts playback of the provided sound effect.
    fn play(&mut self, effect: SoundEffect);
}

/// Asset collaborator that resolves textures by identifier.
pub trait Assets {
    /// Retrieves the texture, or `None` when it failed to load.
    fn texture(&self, id: TextureId) -> Option<Texture>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{de::DeserializeOwned, Serialize};

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn rect_round_trips_through_bincode() {
        assert_round_trip(&Rect::new(24.0, 40.0, 16.0, 8.0));
    }

    #[test]
    fn movement_round_trips_through_bincode() {
        assert_round_trip(&Movement::new(Direction::Left, 12.5));
    }

    #[test]
    fn opposite_directions_pair_up() {
        for direction in [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ] {
            assert_eq!(direction.opposite().opposite(), direction);
            assert_eq!(
                direction.unit_vector() + direction.opposite().unit_vector(),
                Vec2::ZERO
            );
        }
        assert_eq!(Direction::Invalid.opposite(), Direction::Invalid);
    }

    #[test]
    fn dominant_axis_selects_direction() {
        assert_eq!(Direction::from_vector(Vec2::new(3.0, -1.0)), Direction::Right);
        assert_eq!(Direction::from_vector(Vec2::new(1.0, -3.0)), Direction::Up);
        assert_eq!(Direction::from_vector(Vec2::new(-2.0, 2.0)), Direction::Left);
        assert_eq!(Direction::from_vector(Vec2::ZERO), Direction::Invalid);
    }

    #[test]
    fn movement_rejects_negative_distances() {
        assert_eq!(Movement::new(Direction::Up, -4.0).distance(), 0.0);
        assert_eq!(Movement::new(Direction::Up, f32::NAN).distance(), 0.0);
    }

    #[test]
    fn movement_from_speed_scales_by_elapsed_time() {
        let movement = Movement::from_speed(Direction::Down, 64.0, Duration::from_millis(250));
        assert_eq!(movement.distance(), 16.0);
        assert_eq!(movement.direction(), Direction::Down);
    }

    #[test]
    fn walkability_derives_from_tile_type() {
        assert!(TileType::Grass.is_walkable());
        assert!(TileType::Dirt.is_walkable());
        assert!(!TileType::Water.is_walkable());
        assert!(!TileType::Border.is_walkable());
    }

    #[test]
    fn glyphs_parse_back_to_tile_types() {
        for tile_type in [
            TileType::Grass,
            TileType::Sand,
            TileType::Dirt,
            TileType::Water,
            TileType::Rock,
            TileType::Border,
        ] {
            assert_eq!(TileType::from_glyph(tile_type.glyph()), Some(tile_type));
        }
        assert_eq!(TileType::from_glyph('x'), None);
    }

    #[test]
    fn tile_map_coord_steps_stop_at_origin() {
        let origin = TileMapCoord::new(0, 0);
        assert_eq!(origin.step(Direction::Up), None);
        assert_eq!(origin.step(Direction::Left), None);
        assert_eq!(origin.step(Direction::Right), Some(TileMapCoord::new(1, 0)));
        assert_eq!(origin.step(Direction::Down), Some(TileMapCoord::new(0, 1)));
        assert_eq!(origin.step(Direction::Invalid), None);
    }
}
