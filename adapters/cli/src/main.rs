#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line sandbox that replays a movement script through the
//! Noah's Ark collision engine.

mod script;

use std::{path::PathBuf, time::Duration};

use anyhow::{bail, Context, Result};
use clap::Parser;
use noahs_ark_core::{
    Assets, Rect, SoundEffect, Speakers, Texture, TextureId, TileType, Vec2,
    TILE_DIMENSION_IN_PIXELS, WELCOME_BANNER,
};
use noahs_ark_system_collision::{
    handle_axe_swings, move_object, move_object_by, AxeSwing, SwingPhase,
};
use noahs_ark_world::{MultiTileMapGrid, OverworldLayout};

use crate::script::{parse_point, parse_size, Step};

/// Edge length of the blade used by `chop` steps.
const BLADE_SIZE_IN_PIXELS: f32 = 8.0;

/// Tile types `vec` steps may cross.
const WALKABLE: [TileType; 3] = [TileType::Grass, TileType::Sand, TileType::Dirt];

/// Time allowed to pass after a chop so dropped food lands and dust settles.
const SETTLE_TIME: Duration = Duration::from_secs(1);

#[derive(Parser, Debug)]
#[command(name = "noahs-ark")]
#[command(about = "Replay movement scripts through the Noah's Ark collision engine")]
struct Args {
    /// TOML overworld layout to load
    #[arg(long, default_value = "assets/overworld.toml")]
    layout: PathBuf,

    /// Starting centre of the moving object (format: X,Y)
    #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
    start: Vec2,

    /// Size of the moving object's bounding box (format: WxH)
    #[arg(long, value_parser = parse_size, default_value = "16x16")]
    size: Vec2,

    /// Steps to replay: up:<px>, down:<px>, left:<px>, right:<px>, vec:<dx>,<dy> or chop:<x>,<y>
    #[arg(required = true)]
    steps: Vec<Step>,
}

/// Speakers that report sound effects on standard output.
#[derive(Debug)]
struct ConsoleSpeakers;

impl Speakers for ConsoleSpeakers {
    fn play(&mut self, effect: SoundEffect) {
        match effect {
            SoundEffect::AxeHitTree => println!("  *thwack*"),
        }
    }
}

/// Assets with one tile-sized placeholder texture per identifier.
#[derive(Debug)]
struct PlaceholderAssets;

impl Assets for PlaceholderAssets {
    fn texture(&self, id: TextureId) -> Option<Texture> {
        Some(Texture {
            id,
            width: TILE_DIMENSION_IN_PIXELS,
            height: TILE_DIMENSION_IN_PIXELS,
        })
    }
}

/// Entry point for the Noah's Ark command-line sandbox.
fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let layout = OverworldLayout::from_path(&args.layout)
        .with_context(|| format!("failed to load layout {}", args.layout.display()))?;
    let mut grid = layout
        .build()
        .with_context(|| format!("layout {} is inconsistent", args.layout.display()))?;

    let mut bbox = Rect::from_center(args.start, args.size.x, args.size.y);
    if grid.tile_at(bbox.center()).is_none() {
        bail!("start position {} is outside the overworld", describe(bbox.center()));
    }

    println!("{WELCOME_BANNER}");
    println!("start: {}", describe(bbox.center()));

    let mut speakers = ConsoleSpeakers;
    let assets = PlaceholderAssets;
    for step in &args.steps {
        bbox = replay(*step, bbox, &mut grid, &mut speakers, &assets);
        println!("{step}: {}", describe(bbox.center()));
    }

    print_summary(&grid, &bbox);
    Ok(())
}

fn replay(
    step: Step,
    bbox: Rect,
    grid: &mut MultiTileMapGrid,
    speakers: &mut ConsoleSpeakers,
    assets: &PlaceholderAssets,
) -> Rect {
    log::debug!("replaying {step} from {}", describe(bbox.center()));
    match step {
        Step::Move(movement) => bbox.with_center(move_object_by(bbox, movement, grid)),
        Step::Vector(offset) => {
            bbox.with_center(move_object(bbox, offset, &WALKABLE, false, grid))
        }
        Step::Chop(point) => {
            let blade = Rect::from_center(point, BLADE_SIZE_IN_PIXELS, BLADE_SIZE_IN_PIXELS);
            let mut swings = vec![AxeSwing::new(blade, SwingPhase::FullyExtended)];
            handle_axe_swings(grid, &mut swings, speakers, assets);
            grid.update(SETTLE_TIME);
            bbox
        }
    }
}

fn print_summary(grid: &MultiTileMapGrid, bbox: &Rect) {
    let (trees, wood, food) = grid.tile_maps().fold((0, 0, 0), |(trees, wood, food), map| {
        (
            trees + map.trees().len(),
            wood + map.wood_logs().len(),
            food + map.food().len(),
        )
    });
    println!("final: {}", describe(bbox.center()));
    println!("trees standing: {trees}, wood piles: {wood}, food on the ground: {food}");
}

fn describe(point: Vec2) -> String {
    format!("({:.2}, {:.2})", point.x, point.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_accepts_negative_coordinates() {
        let args = Args::try_parse_from(["noahs-ark", "--start", "-40,-8", "up:1"])
            .expect("arguments parse");
        assert_eq!(args.start, Vec2::new(-40.0, -8.0));
        assert_eq!(args.size, Vec2::new(16.0, 16.0));
        assert_eq!(args.steps.len(), 1);
    }

    #[test]
    fn replay_moves_and_chops_through_the_grid() {
        let layout = OverworldLayout::from_toml_str(
            r#"
tile_map_columns = 4
tile_map_rows = 3
grid_columns = 1
grid_rows = 1

[[tile_maps]]
column = 0
row = 0
tiles = ["GGGG", "GGGG", "GGGG"]

[[tile_maps.trees]]
column = 3
row = 2
hit_points = 1
"#,
        )
        .expect("layout parses");
        let mut grid = layout.build().expect("layout builds");
        let bbox = Rect::new(8.0, 8.0, 8.0, 8.0);

        let moved = replay(
            "down:4".parse().expect("step"),
            bbox,
            &mut grid,
            &mut ConsoleSpeakers,
            &PlaceholderAssets,
        );
        assert_eq!(moved.center(), Vec2::new(8.0, 12.0));

        let unchanged = replay(
            "chop:56,40".parse().expect("step"),
            moved,
            &mut grid,
            &mut ConsoleSpeakers,
            &PlaceholderAssets,
        );
        assert_eq!(unchanged, moved);
        let map = grid.tile_maps().next().expect("map");
        assert!(map.trees().is_empty());
        assert_eq!(map.wood_logs().len(), 1);
    }
}
