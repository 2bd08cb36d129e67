//! Trees that block movement and yield food and wood when chopped.

use std::time::Duration;

use noahs_ark_core::{
    FoodKind, Rect, Vec2, TREE_COLLISION_SHRINK_IN_PIXELS, TREE_SHAKE_DURATION,
    TREE_TRUNK_HALF_HEIGHT_IN_PIXELS,
};

/// Edible item hanging from a tree or lying on the ground.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Food {
    kind: FoodKind,
    bounds: Rect,
}

impl Food {
    /// Creates a food item occupying the provided sprite box.
    #[must_use]
    pub const fn new(kind: FoodKind, bounds: Rect) -> Self {
        Self { kind, bounds }
    }

    /// Kind of food.
    #[must_use]
    pub const fn kind(&self) -> FoodKind {
        self.kind
    }

    /// World-space sprite box of the food.
    #[must_use]
    pub const fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Moves the food so its sprite is centered on `center`.
    pub fn move_to(&mut self, center: Vec2) {
        self.bounds = self.bounds.with_center(center);
    }
}

/// Stateful obstacle planted in a tile map.
#[derive(Clone, Debug, PartialEq)]
pub struct Tree {
    bounds: Rect,
    hit_points: u32,
    food: Option<Food>,
    shake_remaining: Duration,
}

impl Tree {
    /// Plants a tree whose sprite occupies `bounds`.
    #[must_use]
    pub const fn new(bounds: Rect, hit_points: u32) -> Self {
        Self {
            bounds,
            hit_points,
            food: None,
            shake_remaining: Duration::ZERO,
        }
    }

    /// Hangs a food item from the tree.
    #[must_use]
    pub fn with_food(mut self, food: Food) -> Self {
        self.food = Some(food);
        self
    }

    /// World-space sprite box of the tree.
    #[must_use]
    pub const fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Box used for movement collisions, slightly smaller than the sprite.
    #[must_use]
    pub fn collision_bounds(&self) -> Rect {
        self.bounds.shrunk(
            TREE_COLLISION_SHRINK_IN_PIXELS,
            TREE_COLLISION_SHRINK_IN_PIXELS,
        )
    }

    /// Anchor used when spawning the effects left behind by a felled tree.
    #[must_use]
    pub fn trunk_center(&self) -> Vec2 {
        Vec2::new(
            self.bounds.center_x(),
            self.bounds.bottom() - TREE_TRUNK_HALF_HEIGHT_IN_PIXELS,
        )
    }

    /// Remaining hit points.
    #[must_use]
    pub const fn hit_points(&self) -> u32 {
        self.hit_points
    }

    /// Reports whether the tree has run out of hit points.
    #[must_use]
    pub const fn is_felled(&self) -> bool {
        self.hit_points == 0
    }

    /// Food currently hanging from the tree, if any.
    #[must_use]
    pub const fn food(&self) -> Option<&Food> {
        self.food.as_ref()
    }

    /// Detaches the hanging food item.
    pub fn take_food(&mut self) -> Option<Food> {
        self.food.take()
    }

    /// Removes one hit point and returns how many remain.
    pub fn take_hit(&mut self) -> u32 {
        self.hit_points = self.hit_points.saturating_sub(1);
        self.hit_points
    }

    /// Restarts the shake animation.
    pub fn start_shaking(&mut self) {
        self.shake_remaining = TREE_SHAKE_DURATION;
    }

    /// Reports whether the shake animation is playing.
    #[must_use]
    pub fn is_shaking(&self) -> bool {
        !self.shake_remaining.is_zero()
    }

    /// Advances the shake animation by `elapsed`.
    pub fn update(&mut self, elapsed: Duration) {
        self.shake_remaining = self.shake_remaining.saturating_sub(elapsed);
    }
}
