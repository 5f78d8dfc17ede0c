#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

use crate::{
    objects::{Category, GameObject, ObjectId, PowerUpKind},
    player::Player,
    shop::Skin,
};

// ============================================================================
// Scene Graph
// ============================================================================

// Rendering side of the game. The core owns the object state and tells the
// scene when handles appear, disappear or change look.
pub trait Scene {
    // Build the visual for a freshly constructed pool slot. Expensive; only
    // called when the pool grows.
    fn build(&mut self, _id: ObjectId, _category: Category) {}

    fn show(&mut self, _object: &GameObject) {}

    fn hide(&mut self, _id: ObjectId) {}

    fn place_player(&mut self, _player: &Player) {}

    fn apply_tint(&mut self, _kind: PowerUpKind) {}

    fn clear_tint(&mut self) {}

    fn set_skin(&mut self, _skin: Skin) {}
}

// Scene that draws nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NullScene;

impl Scene for NullScene {}

// ============================================================================
// HUD
// ============================================================================

// Plain values pushed to the display; formatting is up to the sink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct HudSnapshot {
    pub score: u32,
    pub coins: u32,
    pub power_up: Option<PowerUpKind>,
    pub high_score: u32,
}

impl HudSnapshot {
    #[must_use]
    pub fn power_up_name(&self) -> &'static str {
        self.power_up.map_or("None", PowerUpKind::display_name)
    }
}

pub trait Hud {
    fn show(&mut self, snapshot: &HudSnapshot);
}

// ============================================================================
// Best Score Store
// ============================================================================

// Single integer cell read at startup and written on change
pub trait ScoreStore {
    fn get(&self) -> Option<u32>;
    fn set(&mut self, value: u32);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct MemoryStore(pub Option<u32>);

impl ScoreStore for MemoryStore {
    fn get(&self) -> Option<u32> {
        self.0
    }

    fn set(&mut self, value: u32) {
        self.0 = Some(value);
    }
}
