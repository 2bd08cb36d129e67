//! Short-lived objects spawned into a tile map by chopping trees.

use std::time::Duration;

use noahs_ark_core::{
    Rect, Texture, Vec2, DUST_CLOUD_LIFETIME, FOOD_FALL_SPEED_IN_PIXELS_PER_SECOND,
};

use crate::trees::Food;

/// Food dropping from a tree toward the ground.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FallingFood {
    food: Food,
    destination: Vec2,
}

impl FallingFood {
    /// Starts a fall from the food's current position toward `destination`.
    #[must_use]
    pub const fn new(food: Food, destination: Vec2) -> Self {
        Self { food, destination }
    }

    /// Food item in flight.
    #[must_use]
    pub const fn food(&self) -> &Food {
        &self.food
    }

    /// Point the food's center comes to rest on.
    #[must_use]
    pub const fn destination(&self) -> Vec2 {
        self.destination
    }

    /// Reports whether the food reached its destination.
    #[must_use]
    pub fn has_landed(&self) -> bool {
        self.food.bounds().center() == self.destination
    }

    /// Moves the food toward its destination at the constant fall speed.
    pub fn update(&mut self, elapsed: Duration) {
        let center = self.food.bounds().center();
        let remaining = self.destination - center;
        let travel = FOOD_FALL_SPEED_IN_PIXELS_PER_SECOND * elapsed.as_secs_f32();
        if travel >= remaining.length() {
            self.food.move_to(self.destination);
        } else {
            self.food
                .move_to(center + remaining.normalize_or_zero() * travel);
        }
    }

    /// Consumes the fall, yielding the food item.
    #[must_use]
    pub const fn into_food(self) -> Food {
        self.food
    }
}

/// Pile of logs left behind by a felled tree, collectable as wood.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WoodLog {
    texture: Texture,
    bounds: Rect,
}

impl WoodLog {
    /// Places a log pile centered on `center`.
    #[must_use]
    pub const fn new(texture: Texture, center: Vec2) -> Self {
        Self {
            texture,
            bounds: texture.bounds_at(center),
        }
    }

    /// Texture drawn for the log pile.
    #[must_use]
    pub const fn texture(&self) -> Texture {
        self.texture
    }

    /// World-space sprite box of the log pile.
    #[must_use]
    pub const fn bounds(&self) -> Rect {
        self.bounds
    }
}

/// Dust cloud shown briefly where a tree fell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DustCloud {
    texture: Texture,
    bounds: Rect,
    remaining: Duration,
}

impl DustCloud {
    /// Places a dust cloud centered on `center`.
    #[must_use]
    pub const fn new(texture: Texture, center: Vec2) -> Self {
        Self {
            texture,
            bounds: texture.bounds_at(center),
            remaining: DUST_CLOUD_LIFETIME,
        }
    }

    /// Texture drawn for the cloud.
    #[must_use]
    pub const fn texture(&self) -> Texture {
        self.texture
    }

    /// World-space sprite box of the cloud.
    #[must_use]
    pub const fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Reports whether the cloud has dissipated.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.remaining.is_zero()
    }

    /// Advances the cloud's lifetime by `elapsed`.
    pub fn update(&mut self, elapsed: Duration) {
        self.remaining = self.remaining.saturating_sub(elapsed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use noahs_ark_core::{FoodKind, TextureId};

    fn apple_at(center: Vec2) -> Food {
        Food::new(FoodKind::Apple, Rect::from_center(center, 8.0, 8.0))
    }

    #[test]
    fn falling_food_lands_at_destination() {
        let mut falling = FallingFood::new(apple_at(Vec2::new(40.0, 20.0)), Vec2::new(40.0, 52.0));

        falling.update(Duration::from_millis(250));
        assert_eq!(falling.food().bounds().center(), Vec2::new(40.0, 36.0));
        assert!(!falling.has_landed());

        falling.update(Duration::from_secs(1));
        assert!(falling.has_landed());
        assert_eq!(falling.into_food().bounds().center(), Vec2::new(40.0, 52.0));
    }

    #[test]
    fn dust_cloud_expires_after_lifetime() {
        let texture = Texture {
            id: TextureId::DustCloud,
            width: 32.0,
            height: 16.0,
        };
        let mut cloud = DustCloud::new(texture, Vec2::new(10.0, 10.0));
        assert_eq!(cloud.bounds(), Rect::new(10.0, 10.0, 32.0, 16.0));

        cloud.update(DUST_CLOUD_LIFETIME / 2);
        assert!(!cloud.is_finished());
        cloud.update(DUST_CLOUD_LIFETIME);
        assert!(cloud.is_finished());
    }
}
