//! TOML description of the overworld and the builder that turns it into a grid.

use std::{fs, path::Path, path::PathBuf};

use noahs_ark_core::{FoodKind, Rect, TileMapCoord, TileType, DEFAULT_TREE_HIT_POINTS};
use serde::Deserialize;
use thiserror::Error;

use crate::{Food, MultiTileMapGrid, TileMap, Tree};

const DEFAULT_TREE_WIDTH: f32 = 32.0;
const DEFAULT_TREE_HEIGHT: f32 = 48.0;
const FOOD_DIMENSION: f32 = 8.0;

/// Reasons an overworld layout can fail to load.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// The layout file could not be read.
    #[error("failed to read overworld layout at {path}")]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The layout is not valid TOML or does not match the expected shape.
    #[error("failed to parse overworld layout: {0}")]
    Parse(#[from] toml::de::Error),
    /// A tile map would contain no tiles.
    #[error("tile maps must contain at least one tile, got {columns}x{rows}")]
    EmptyTileMap {
        /// Requested number of tile columns.
        columns: u32,
        /// Requested number of tile rows.
        rows: u32,
    },
    /// A tile map was placed outside the overworld grid.
    #[error("tile map {coord:?} lies outside the overworld grid")]
    OutsideGrid {
        /// Offending map coordinate.
        coord: TileMapCoord,
    },
    /// Two tile maps share a grid slot.
    #[error("tile map {coord:?} is defined more than once")]
    DuplicateTileMap {
        /// Coordinate defined twice.
        coord: TileMapCoord,
    },
    /// A tile map's dimensions differ from the grid's map dimensions.
    #[error(
        "tile map {coord:?} is {found_columns}x{found_rows} tiles, expected {expected_columns}x{expected_rows}"
    )]
    MapSizeMismatch {
        /// Offending map coordinate.
        coord: TileMapCoord,
        /// Tile columns every map must have.
        expected_columns: u32,
        /// Tile rows every map must have.
        expected_rows: u32,
        /// Tile columns the map has.
        found_columns: u32,
        /// Tile rows the map has.
        found_rows: u32,
    },
    /// A tile map lists the wrong number of tile rows.
    #[error("tile map {coord:?} has {found} tile rows, expected {expected}")]
    RowCount {
        /// Offending map coordinate.
        coord: TileMapCoord,
        /// Rows required by the layout.
        expected: u32,
        /// Rows present.
        found: usize,
    },
    /// A tile row has the wrong number of glyphs.
    #[error("row {row} of tile map {coord:?} has {found} tiles, expected {expected}")]
    RowWidth {
        /// Offending map coordinate.
        coord: TileMapCoord,
        /// Zero-based row index.
        row: usize,
        /// Glyphs required per row.
        expected: u32,
        /// Glyphs present.
        found: usize,
    },
    /// A glyph does not name a tile type.
    #[error("row {row} of tile map {coord:?} contains unknown tile glyph {glyph:?}")]
    UnknownGlyph {
        /// Offending map coordinate.
        coord: TileMapCoord,
        /// Zero-based row index.
        row: usize,
        /// Unrecognised glyph.
        glyph: char,
    },
    /// A tree's trunk tile lies outside its tile map.
    #[error("tree at tile ({column}, {row}) lies outside tile map {coord:?}")]
    TreeOutsideMap {
        /// Map the tree was declared in.
        coord: TileMapCoord,
        /// Declared trunk column.
        column: u32,
        /// Declared trunk row.
        row: u32,
    },
}

/// Root of an overworld layout document.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OverworldLayout {
    /// Tiles per map, horizontally.
    pub tile_map_columns: u32,
    /// Tiles per map, vertically.
    pub tile_map_rows: u32,
    /// Maps per overworld row.
    pub grid_columns: u32,
    /// Maps per overworld column.
    pub grid_rows: u32,
    /// Width of every tree sprite in pixels.
    #[serde(default = "default_tree_width")]
    pub tree_width: f32,
    /// Height of every tree sprite in pixels.
    #[serde(default = "default_tree_height")]
    pub tree_height: f32,
    /// Hit points of trees that do not override them.
    #[serde(default = "default_tree_hit_points")]
    pub tree_hit_points: u32,
    /// Tile maps making up the overworld; missing slots stay empty.
    #[serde(default)]
    pub tile_maps: Vec<TileMapLayout>,
}

/// Layout of a single tile map.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TileMapLayout {
    /// Map column within the overworld grid.
    pub column: u32,
    /// Map row within the overworld grid.
    pub row: u32,
    /// One string of tile glyphs per tile row.
    pub tiles: Vec<String>,
    /// Trees planted on the map.
    #[serde(default)]
    pub trees: Vec<TreeLayout>,
}

/// Layout of a single tree.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TreeLayout {
    /// Tile column of the trunk within the map.
    pub column: u32,
    /// Tile row of the trunk within the map.
    pub row: u32,
    /// Overrides the layout-wide tree hit points.
    #[serde(default)]
    pub hit_points: Option<u32>,
    /// Food hanging from the tree.
    #[serde(default)]
    pub food: Option<FoodKind>,
}

fn default_tree_width() -> f32 {
    DEFAULT_TREE_WIDTH
}

fn default_tree_height() -> f32 {
    DEFAULT_TREE_HEIGHT
}

fn default_tree_hit_points() -> u32 {
    DEFAULT_TREE_HIT_POINTS
}

impl OverworldLayout {
    /// Parses a layout from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self, LayoutError> {
        Ok(toml::from_str(contents)?)
    }

    /// Reads and parses the layout file at `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LayoutError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| LayoutError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Builds the overworld grid described by the layout.
    pub fn build(&self) -> Result<MultiTileMapGrid, LayoutError> {
        if self.tile_map_columns == 0 || self.tile_map_rows == 0 {
            return Err(LayoutError::EmptyTileMap {
                columns: self.tile_map_columns,
                rows: self.tile_map_rows,
            });
        }

        let mut grid = MultiTileMapGrid::new(
            self.grid_columns,
            self.grid_rows,
            self.tile_map_columns,
            self.tile_map_rows,
        );

        for map_layout in &self.tile_maps {
            let map = self.build_tile_map(map_layout)?;
            log::debug!(
                "loaded tile map {:?} with {} trees",
                map.coord(),
                map.trees().len()
            );
            grid.insert(map)?;
        }

        Ok(grid)
    }

    fn build_tile_map(&self, layout: &TileMapLayout) -> Result<TileMap, LayoutError> {
        let coord = TileMapCoord::new(layout.column, layout.row);
        let tile_types =
            parse_tile_rows(coord, self.tile_map_columns, self.tile_map_rows, &layout.tiles)?;
        let mut map = TileMap::new(coord, self.tile_map_columns, self.tile_map_rows, tile_types)
            .ok_or(LayoutError::EmptyTileMap {
                columns: self.tile_map_columns,
                rows: self.tile_map_rows,
            })?;

        for tree_layout in &layout.trees {
            let trunk_tile = map
                .tile(tree_layout.column, tree_layout.row)
                .ok_or(LayoutError::TreeOutsideMap {
                    coord,
                    column: tree_layout.column,
                    row: tree_layout.row,
                })?
                .world_bounding_box();
            map.add_tree(self.plant_tree(trunk_tile, tree_layout));
        }

        Ok(map)
    }

    fn plant_tree(&self, trunk_tile: Rect, layout: &TreeLayout) -> Tree {
        let bounds = Rect::new(
            trunk_tile.center_x(),
            trunk_tile.bottom() - self.tree_height / 2.0,
            self.tree_width,
            self.tree_height,
        );
        let tree = Tree::new(bounds, layout.hit_points.unwrap_or(self.tree_hit_points));
        match layout.food {
            Some(kind) => {
                let canopy = Rect::new(
                    bounds.center_x(),
                    bounds.top() + bounds.height() / 4.0,
                    FOOD_DIMENSION,
                    FOOD_DIMENSION,
                );
                tree.with_food(Food::new(kind, canopy))
            }
            None => tree,
        }
    }
}

/// Parses rows of tile glyphs into row-major tile types.
pub(crate) fn parse_tile_rows<S: AsRef<str>>(
    coord: TileMapCoord,
    columns: u32,
    rows: u32,
    glyph_rows: &[S],
) -> Result<Vec<TileType>, LayoutError> {
    if usize::try_from(rows).ok() != Some(glyph_rows.len()) {
        return Err(LayoutError::RowCount {
            coord,
            expected: rows,
            found: glyph_rows.len(),
        });
    }

    let mut tile_types = Vec::with_capacity(glyph_rows.len() * columns as usize);
    for (row, glyphs) in glyph_rows.iter().enumerate() {
        let glyphs = glyphs.as_ref();
        let found = glyphs.chars().count();
        if usize::try_from(columns).ok() != Some(found) {
            return Err(LayoutError::RowWidth {
                coord,
                row,
                expected: columns,
                found,
            });
        }
        for glyph in glyphs.chars() {
            let tile_type =
                TileType::from_glyph(glyph).ok_or(LayoutError::UnknownGlyph { coord, row, glyph })?;
            tile_types.push(tile_type);
        }
    }

    Ok(tile_types)
}

#[cfg(test)]
mod tests {
    use super::*;
    use noahs_ark_core::Vec2;

    const LAYOUT: &str = r#"
tile_map_columns = 4
tile_map_rows = 3
grid_columns = 2
grid_rows = 1

[[tile_maps]]
column = 0
row = 0
tiles = ["GGGG", "GWWG", "GGGG"]

[[tile_maps.trees]]
column = 3
row = 2
food = "coconut"

[[tile_maps]]
column = 1
row = 0
tiles = ["SSSS", "SSSS", "RRRR"]

[[tile_maps.trees]]
column = 0
row = 1
hit_points = 5
"#;

    #[test]
    fn layout_builds_grid_with_trees() {
        let grid = OverworldLayout::from_toml_str(LAYOUT)
            .and_then(|layout| layout.build())
            .expect("layout builds");

        let west = grid.tile_map(TileMapCoord::new(0, 0)).expect("west map");
        let tree = &west.trees()[0];
        assert_eq!(tree.bounds(), Rect::new(56.0, 24.0, 32.0, 48.0));
        assert_eq!(tree.hit_points(), DEFAULT_TREE_HIT_POINTS);
        assert_eq!(tree.trunk_center(), Vec2::new(56.0, 40.0));
        let food = tree.food().expect("coconut");
        assert_eq!(food.kind(), FoodKind::Coconut);
        assert_eq!(food.bounds().center(), Vec2::new(56.0, 12.0));

        let east = grid.tile_map(TileMapCoord::new(1, 0)).expect("east map");
        assert_eq!(east.trees()[0].hit_points(), 5);
        assert!(east.trees()[0].food().is_none());
        assert_eq!(
            grid.tile_at(Vec2::new(70.0, 40.0)).map(|tile| tile.tile_type()),
            Some(TileType::Rock)
        );
    }

    #[test]
    fn unknown_glyphs_are_reported() {
        let layout = LAYOUT.replace("GWWG", "GWXG");
        let error = OverworldLayout::from_toml_str(&layout)
            .and_then(|layout| layout.build())
            .expect_err("unknown glyph");
        assert!(matches!(
            error,
            LayoutError::UnknownGlyph {
                row: 1,
                glyph: 'X',
                ..
            }
        ));
    }

    #[test]
    fn short_rows_are_reported() {
        let layout = LAYOUT.replace("\"SSSS\", \"SSSS\"", "\"SSSS\", \"SSS\"");
        let error = OverworldLayout::from_toml_str(&layout)
            .and_then(|layout| layout.build())
            .expect_err("short row");
        assert!(matches!(
            error,
            LayoutError::RowWidth {
                row: 1,
                expected: 4,
                found: 3,
                ..
            }
        ));
    }

    #[test]
    fn unknown_fields_fail_to_parse() {
        let layout = LAYOUT.replace("hit_points = 5", "hit_points = 5\ncolumn_offset = 1");
        assert!(matches!(
            OverworldLayout::from_toml_str(&layout),
            Err(LayoutError::Parse(_))
        ));
    }

    #[test]
    fn trees_outside_their_map_are_reported() {
        let layout = LAYOUT.replace("column = 3\nrow = 2", "column = 4\nrow = 2");
        let error = OverworldLayout::from_toml_str(&layout)
            .and_then(|layout| layout.build())
            .expect_err("tree outside map");
        assert!(matches!(
            error,
            LayoutError::TreeOutsideMap { column: 4, .. }
        ));
    }

    #[test]
    fn vast_grid_dimensions_build_without_exhausting_memory() {
        let layout = LAYOUT
            .replace("grid_columns = 2", "grid_columns = 100000")
            .replace("grid_rows = 1", "grid_rows = 100000");
        let grid = OverworldLayout::from_toml_str(&layout)
            .and_then(|layout| layout.build())
            .expect("layout builds");
        assert_eq!(grid.columns(), 100_000);
        assert_eq!(grid.tile_maps().count(), 2);
    }

    #[test]
    fn maps_outside_the_grid_are_reported() {
        let layout = LAYOUT.replace("column = 1\nrow = 0", "column = 2\nrow = 0");
        let error = OverworldLayout::from_toml_str(&layout)
            .and_then(|layout| layout.build())
            .expect_err("map outside grid");
        assert!(matches!(error, LayoutError::OutsideGrid { .. }));
    }

    #[test]
    fn unknown_food_fails_to_parse() {
        let layout = LAYOUT.replace("coconut", "durian");
        assert!(matches!(
            OverworldLayout::from_toml_str(&layout),
            Err(LayoutError::Parse(_))
        ));
    }
}
