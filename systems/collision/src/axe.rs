//! Resolution of axe swings against the trees they strike.

use noahs_ark_core::{Assets, Rect, SoundEffect, Speakers, TextureId, Vec2};
use noahs_ark_world::{
    DustCloud, FallingFood, MultiTileMapGrid, TileMapObjectsMut, Tree, WoodLog,
};

/// Animation phase of a queued axe swing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SwingPhase {
    /// The axe is still being swung out and cannot hit anything yet.
    WindingUp,
    /// The axe reached its maximum extension; the blade can strike.
    FullyExtended,
    /// The swing was abandoned before resolving and should be discarded.
    Expired,
}

/// Pending axe swing waiting to reach full extension.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxeSwing {
    blade: Rect,
    phase: SwingPhase,
}

impl AxeSwing {
    /// Queues a swing whose blade occupies `blade` at full extension.
    #[must_use]
    pub const fn new(blade: Rect, phase: SwingPhase) -> Self {
        Self { blade, phase }
    }

    /// World-space box of the blade.
    #[must_use]
    pub const fn blade(&self) -> Rect {
        self.blade
    }

    /// Current animation phase.
    #[must_use]
    pub const fn phase(&self) -> SwingPhase {
        self.phase
    }

    /// Updates the animation phase.
    pub fn set_phase(&mut self, phase: SwingPhase) {
        self.phase = phase;
    }
}

/// Drains the swing queue, resolving every fully extended swing.
///
/// Swings still winding up stay queued in order. Fully extended swings are
/// resolved through [`handle_axe_collisions_with_trees`] and removed, and
/// expired swings are removed without effect.
pub fn handle_axe_swings<S, A>(
    grid: &mut MultiTileMapGrid,
    swings: &mut Vec<AxeSwing>,
    speakers: &mut S,
    assets: &A,
) where
    S: Speakers + ?Sized,
    A: Assets + ?Sized,
{
    swings.retain(|swing| match swing.phase() {
        SwingPhase::WindingUp => true,
        SwingPhase::FullyExtended => {
            handle_axe_collisions_with_trees(&swing.blade(), grid, speakers, assets);
            false
        }
        SwingPhase::Expired => {
            log::debug!("discarding expired axe swing at {:?}", swing.blade().center());
            false
        }
    });
}

/// Applies one axe strike to every tree whose sprite intersects `blade`.
///
/// Each struck tree plays the hit sound, loses a hit point, starts shaking,
/// and drops its food. Trees left without hit points are removed and
/// replaced by wood logs and a dust cloud at the trunk; either replacement is
/// skipped when its texture is unavailable.
pub fn handle_axe_collisions_with_trees<S, A>(
    blade: &Rect,
    grid: &mut MultiTileMapGrid,
    speakers: &mut S,
    assets: &A,
) where
    S: Speakers + ?Sized,
    A: Assets + ?Sized,
{
    let Some(map) = grid.tile_map_at_mut(blade.center()) else {
        log::warn!("axe blade at {:?} is not over any tile map", blade.center());
        return;
    };

    let TileMapObjectsMut {
        trees,
        falling_food,
        wood_logs,
        dust_clouds,
    } = map.objects_mut();

    trees.retain_mut(|tree| {
        if !tree.bounds().intersects(blade) {
            return true;
        }

        speakers.play(SoundEffect::AxeHitTree);
        let remaining = tree.take_hit();
        tree.start_shaking();
        log::debug!(
            "axe struck tree at {:?}, {remaining} hit points left",
            tree.trunk_center()
        );

        if let Some(food) = tree.take_food() {
            falling_food.push(FallingFood::new(food, landing_spot(tree, food.bounds())));
        }

        if remaining > 0 {
            return true;
        }

        let trunk = tree.trunk_center();
        match assets.texture(TextureId::WoodLogs) {
            Some(texture) => wood_logs.push(WoodLog::new(texture, trunk)),
            None => log::warn!("wood log texture unavailable; skipping logs at {trunk:?}"),
        }
        match assets.texture(TextureId::DustCloud) {
            Some(texture) => dust_clouds.push(DustCloud::new(texture, trunk)),
            None => log::warn!("dust cloud texture unavailable; skipping cloud at {trunk:?}"),
        }
        log::debug!("tree at {trunk:?} felled");
        false
    });
}

/// Point where food detached from `tree` comes to rest: straight below its
/// current position, resting on the tree's bottom edge.
fn landing_spot(tree: &Tree, food: Rect) -> Vec2 {
    Vec2::new(food.center_x(), tree.bounds().bottom() + food.height() / 2.0)
}
