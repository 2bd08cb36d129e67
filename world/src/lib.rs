#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Tile, tile map and overworld grid state for the Noah's Ark overworld.
//!
//! The [`MultiTileMapGrid`] is the spatial index the collision engine
//! queries: it resolves world positions to the [`TileMap`] containing them
//! and then to the [`Tile`] underneath. Tile maps also own the trees planted
//! on them and the transient objects produced by chopping those trees.

use std::{
    collections::{btree_map::Entry, BTreeMap},
    time::Duration,
};

use noahs_ark_core::{Direction, Rect, TileMapCoord, TileType, Vec2, TILE_DIMENSION_IN_PIXELS};

mod effects;
mod layout;
mod trees;

pub use effects::{DustCloud, FallingFood, WoodLog};
pub use layout::{LayoutError, OverworldLayout, TileMapLayout, TreeLayout};
pub use trees::{Food, Tree};

/// Smallest addressable cell of a tile map.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tile {
    tile_type: TileType,
    bounds: Rect,
}

impl Tile {
    /// Creates a tile of the provided type occupying `bounds`.
    #[must_use]
    pub const fn new(tile_type: TileType, bounds: Rect) -> Self {
        Self { tile_type, bounds }
    }

    /// Terrain carried by the tile.
    #[must_use]
    pub const fn tile_type(&self) -> TileType {
        self.tile_type
    }

    /// Reports whether walkers may stand on the tile.
    #[must_use]
    pub const fn is_walkable(&self) -> bool {
        self.tile_type.is_walkable()
    }

    /// World-space box covered by the tile.
    #[must_use]
    pub const fn world_bounding_box(&self) -> Rect {
        self.bounds
    }
}

/// Mutable views over the object lists of a single tile map.
///
/// Handing the lists out together lets callers edit trees while appending
/// to the transient lists in the same pass.
#[derive(Debug)]
pub struct TileMapObjectsMut<'a> {
    /// Trees planted on the map.
    pub trees: &'a mut Vec<Tree>,
    /// Food currently falling from chopped trees.
    pub falling_food: &'a mut Vec<FallingFood>,
    /// Log piles left by felled trees.
    pub wood_logs: &'a mut Vec<WoodLog>,
    /// Dust clouds left by felled trees.
    pub dust_clouds: &'a mut Vec<DustCloud>,
}

/// Fixed-size grid of tiles plus the trees and transient objects on it.
#[derive(Clone, Debug)]
pub struct TileMap {
    coord: TileMapCoord,
    columns: u32,
    rows: u32,
    bounds: Rect,
    tiles: Vec<Tile>,
    trees: Vec<Tree>,
    falling_food: Vec<FallingFood>,
    wood_logs: Vec<WoodLog>,
    dust_clouds: Vec<DustCloud>,
    food: Vec<Food>,
}

impl TileMap {
    /// Builds a map at `coord` from row-major tile types.
    ///
    /// Returns `None` when either dimension is zero or when the number of
    /// tile types does not match `columns * rows`.
    #[must_use]
    pub fn new(
        coord: TileMapCoord,
        columns: u32,
        rows: u32,
        tile_types: Vec<TileType>,
    ) -> Option<Self> {
        let width = usize::try_from(columns).ok()?;
        let height = usize::try_from(rows).ok()?;
        let count = width.checked_mul(height)?;
        if count == 0 || tile_types.len() != count {
            return None;
        }

        let map_width = columns as f32 * TILE_DIMENSION_IN_PIXELS;
        let map_height = rows as f32 * TILE_DIMENSION_IN_PIXELS;
        let left = coord.column() as f32 * map_width;
        let top = coord.row() as f32 * map_height;
        let bounds = Rect::from_edges(left, top, left + map_width, top + map_height);

        let tiles = tile_types
            .into_iter()
            .enumerate()
            .map(|(index, tile_type)| {
                let column = (index % width) as f32;
                let row = (index / width) as f32;
                let tile_left = left + column * TILE_DIMENSION_IN_PIXELS;
                let tile_top = top + row * TILE_DIMENSION_IN_PIXELS;
                Tile::new(
                    tile_type,
                    Rect::from_edges(
                        tile_left,
                        tile_top,
                        tile_left + TILE_DIMENSION_IN_PIXELS,
                        tile_top + TILE_DIMENSION_IN_PIXELS,
                    ),
                )
            })
            .collect();

        Some(Self {
            coord,
            columns,
            rows,
            bounds,
            tiles,
            trees: Vec::new(),
            falling_food: Vec::new(),
            wood_logs: Vec::new(),
            dust_clouds: Vec::new(),
            food: Vec::new(),
        })
    }

    /// Builds a map at `coord` where every tile has the same type.
    #[must_use]
    pub fn filled(coord: TileMapCoord, columns: u32, rows: u32, tile_type: TileType) -> Option<Self> {
        let count = usize::try_from(u64::from(columns) * u64::from(rows)).ok()?;
        Self::new(coord, columns, rows, vec![tile_type; count])
    }

    /// Builds a map at `coord` from rows of layout glyphs.
    pub fn from_glyph_rows<S: AsRef<str>>(
        coord: TileMapCoord,
        rows: &[S],
    ) -> Result<Self, LayoutError> {
        let columns = rows
            .first()
            .map_or(0, |row| row.as_ref().chars().count());
        let columns = u32::try_from(columns).unwrap_or(0);
        let row_count = u32::try_from(rows.len()).unwrap_or(0);
        let tile_types = layout::parse_tile_rows(coord, columns, row_count, rows)?;
        Self::new(coord, columns, row_count, tile_types).ok_or(LayoutError::EmptyTileMap {
            columns,
            rows: row_count,
        })
    }

    /// Position of the map within the overworld grid.
    #[must_use]
    pub const fn coord(&self) -> TileMapCoord {
        self.coord
    }

    /// Number of tile columns.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of tile rows.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// World-space box covered by the map.
    #[must_use]
    pub const fn world_bounding_box(&self) -> Rect {
        self.bounds
    }

    /// Tile at the provided column and row within the map.
    #[must_use]
    pub fn tile(&self, column: u32, row: u32) -> Option<&Tile> {
        if column >= self.columns || row >= self.rows {
            return None;
        }
        let index = usize::try_from(row)
            .ok()?
            .checked_mul(usize::try_from(self.columns).ok()?)?
            .checked_add(usize::try_from(column).ok()?)?;
        self.tiles.get(index)
    }

    /// Tile containing the world position, if the position lies on this map.
    #[must_use]
    pub fn tile_at(&self, position: Vec2) -> Option<&Tile> {
        if !self.bounds.contains(position) {
            return None;
        }
        let column = ((position.x - self.bounds.left()) / TILE_DIMENSION_IN_PIXELS).floor();
        let row = ((position.y - self.bounds.top()) / TILE_DIMENSION_IN_PIXELS).floor();
        let column = (column as u32).min(self.columns - 1);
        let row = (row as u32).min(self.rows - 1);
        self.tile(column, row)
    }

    /// Iterator over every tile in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    /// Plants a tree on the map.
    pub fn add_tree(&mut self, tree: Tree) {
        self.trees.push(tree);
    }

    /// Trees planted on the map in planting order.
    #[must_use]
    pub fn trees(&self) -> &[Tree] {
        &self.trees
    }

    /// Food currently falling from chopped trees.
    #[must_use]
    pub fn falling_food(&self) -> &[FallingFood] {
        &self.falling_food
    }

    /// Log piles waiting to be collected.
    #[must_use]
    pub fn wood_logs(&self) -> &[WoodLog] {
        &self.wood_logs
    }

    /// Dust clouds still visible.
    #[must_use]
    pub fn dust_clouds(&self) -> &[DustCloud] {
        &self.dust_clouds
    }

    /// Landed food waiting to be collected.
    #[must_use]
    pub fn food(&self) -> &[Food] {
        &self.food
    }

    /// Borrows the tree list and transient lists mutably at once.
    pub fn objects_mut(&mut self) -> TileMapObjectsMut<'_> {
        TileMapObjectsMut {
            trees: &mut self.trees,
            falling_food: &mut self.falling_food,
            wood_logs: &mut self.wood_logs,
            dust_clouds: &mut self.dust_clouds,
        }
    }

    /// Advances tree shakes, falling food and dust clouds by `elapsed`.
    ///
    /// Food that reaches the ground becomes collectable.
    pub fn update(&mut self, elapsed: Duration) {
        for tree in &mut self.trees {
            tree.update(elapsed);
        }

        let food = &mut self.food;
        self.falling_food.retain_mut(|falling| {
            falling.update(elapsed);
            if falling.has_landed() {
                food.push(falling.into_food());
                false
            } else {
                true
            }
        });

        self.dust_clouds.retain_mut(|cloud| {
            cloud.update(elapsed);
            !cloud.is_finished()
        });
    }

    /// Removes and returns every landed food item touching `collector`.
    pub fn collect_food(&mut self, collector: &Rect) -> Vec<Food> {
        let (collected, remaining): (Vec<_>, Vec<_>) = std::mem::take(&mut self.food)
            .into_iter()
            .partition(|food| food.bounds().intersects(collector));
        self.food = remaining;
        collected
    }

    /// Removes and returns every log pile touching `collector`.
    pub fn collect_wood(&mut self, collector: &Rect) -> Vec<WoodLog> {
        let (collected, remaining): (Vec<_>, Vec<_>) = std::mem::take(&mut self.wood_logs)
            .into_iter()
            .partition(|logs| logs.bounds().intersects(collector));
        self.wood_logs = remaining;
        collected
    }
}

/// Overworld made of equally sized tile maps laid out in a grid.
///
/// Grid slots may be empty; positions over an empty slot resolve to no map.
/// Only loaded maps take up storage, so the grid dimensions are free to be
/// large.
#[derive(Clone, Debug)]
pub struct MultiTileMapGrid {
    columns: u32,
    rows: u32,
    map_columns: u32,
    map_rows: u32,
    maps: BTreeMap<TileMapCoord, TileMap>,
}

impl MultiTileMapGrid {
    /// Creates an empty grid of `columns` by `rows` map slots, each map
    /// holding `map_columns` by `map_rows` tiles.
    #[must_use]
    pub fn new(columns: u32, rows: u32, map_columns: u32, map_rows: u32) -> Self {
        Self {
            columns,
            rows,
            map_columns,
            map_rows,
            maps: BTreeMap::new(),
        }
    }

    /// Number of map columns in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of map rows in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Width of a single tile map in pixels.
    #[must_use]
    pub fn map_width_in_pixels(&self) -> f32 {
        self.map_columns as f32 * TILE_DIMENSION_IN_PIXELS
    }

    /// Height of a single tile map in pixels.
    #[must_use]
    pub fn map_height_in_pixels(&self) -> f32 {
        self.map_rows as f32 * TILE_DIMENSION_IN_PIXELS
    }

    /// World-space box covered by every slot of the grid.
    #[must_use]
    pub fn world_bounding_box(&self) -> Rect {
        Rect::from_edges(
            0.0,
            0.0,
            self.columns as f32 * self.map_width_in_pixels(),
            self.rows as f32 * self.map_height_in_pixels(),
        )
    }

    /// Stores `map` in the slot named by its coordinate, replacing nothing.
    pub fn insert(&mut self, map: TileMap) -> Result<(), LayoutError> {
        let coord = map.coord();
        if map.columns() != self.map_columns || map.rows() != self.map_rows {
            return Err(LayoutError::MapSizeMismatch {
                coord,
                expected_columns: self.map_columns,
                expected_rows: self.map_rows,
                found_columns: map.columns(),
                found_rows: map.rows(),
            });
        }
        if !self.has_slot(coord) {
            return Err(LayoutError::OutsideGrid { coord });
        }
        match self.maps.entry(coord) {
            Entry::Occupied(_) => Err(LayoutError::DuplicateTileMap { coord }),
            Entry::Vacant(slot) => {
                let _ = slot.insert(map);
                Ok(())
            }
        }
    }

    /// Coordinate of the grid slot containing the world position.
    #[must_use]
    pub fn coord_at(&self, position: Vec2) -> Option<TileMapCoord> {
        if !self.world_bounding_box().contains(position) {
            return None;
        }
        let column = (position.x / self.map_width_in_pixels()).floor() as u32;
        let row = (position.y / self.map_height_in_pixels()).floor() as u32;
        Some(TileMapCoord::new(
            column.min(self.columns - 1),
            row.min(self.rows - 1),
        ))
    }

    /// Tile map stored at `coord`.
    #[must_use]
    pub fn tile_map(&self, coord: TileMapCoord) -> Option<&TileMap> {
        self.maps.get(&coord)
    }

    /// Mutable access to the tile map stored at `coord`.
    pub fn tile_map_mut(&mut self, coord: TileMapCoord) -> Option<&mut TileMap> {
        self.maps.get_mut(&coord)
    }

    /// Tile map containing the world position.
    #[must_use]
    pub fn tile_map_at(&self, position: Vec2) -> Option<&TileMap> {
        self.coord_at(position)
            .and_then(|coord| self.tile_map(coord))
    }

    /// Mutable access to the tile map containing the world position.
    pub fn tile_map_at_mut(&mut self, position: Vec2) -> Option<&mut TileMap> {
        let coord = self.coord_at(position)?;
        self.tile_map_mut(coord)
    }

    /// Tile containing the world position, resolved through its tile map.
    #[must_use]
    pub fn tile_at(&self, position: Vec2) -> Option<&Tile> {
        self.tile_map_at(position)
            .and_then(|map| map.tile_at(position))
    }

    /// Loaded map adjacent to `coord` in the provided direction.
    #[must_use]
    pub fn neighbor(&self, coord: TileMapCoord, direction: Direction) -> Option<&TileMap> {
        coord
            .step(direction)
            .and_then(|neighbor| self.tile_map(neighbor))
    }

    /// Iterator over every loaded map, ordered by column and then row.
    pub fn tile_maps(&self) -> impl Iterator<Item = &TileMap> {
        self.maps.values()
    }

    /// Mutable iterator over every loaded map, ordered by column and then row.
    pub fn tile_maps_mut(&mut self) -> impl Iterator<Item = &mut TileMap> {
        self.maps.values_mut()
    }

    /// Advances every loaded map by `elapsed`.
    pub fn update(&mut self, elapsed: Duration) {
        for map in self.tile_maps_mut() {
            map.update(elapsed);
        }
    }

    fn has_slot(&self, coord: TileMapCoord) -> bool {
        coord.column() < self.columns && coord.row() < self.rows
    }
}
