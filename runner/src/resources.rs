use bevy_ecs::prelude::*;
use rand::{SeedableRng, rngs::StdRng};
use serde::Serialize;

use common::{GameEvent, HudSnapshot, InputEvent, ShopItem};

use crate::constants::DEFAULT_RESTART_DELAY_TICKS;

// ============================================================================
// Bevy Resources
// ============================================================================

// Seeded source for every game roll
#[derive(Resource, Debug)]
pub struct GameRng(pub StdRng);

impl GameRng {
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

// Inputs collected for the coming frame, drained by the session tick
#[derive(Resource, Debug, Default)]
pub struct PendingInputs(pub Vec<InputEvent>);

// Events produced by the last frame
#[derive(Resource, Debug, Default)]
pub struct FrameEvents(pub Vec<GameEvent>);

// Limits and options of a headless session
#[derive(Resource, Debug, Clone)]
pub struct RunConfig {
    pub runs: u32,
    pub max_ticks: u64,
    // Frames the game-over phase is held before the next run starts
    pub restart_delay: u64,
    // Items bought between runs, in order, whenever affordable
    pub shopping_list: Vec<ShopItem>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            runs: 1,
            max_ticks: u64::MAX,
            restart_delay: DEFAULT_RESTART_DELAY_TICKS,
            shopping_list: Vec::new(),
        }
    }
}

// Results gathered across runs
#[derive(Resource, Debug, Default, Clone, Serialize)]
pub struct RunStats {
    pub runs_finished: u32,
    pub scores: Vec<u32>,
    pub new_records: u32,
    pub shields_consumed: u32,
    pub power_ups_collected: u32,
    pub purchases: Vec<ShopItem>,
    pub finished: bool,
    // Tick of the last game over, cleared on restart
    #[serde(skip)]
    pub game_over_at: Option<u64>,
    pub last_hud: Option<HudSnapshot>,
}

impl RunStats {
    #[must_use]
    pub fn best(&self) -> Option<u32> {
        self.scores.iter().copied().max()
    }
}
