// ============================================================================
// Runner Loop
// ============================================================================

pub const DEFAULT_TICK_RATE: u32 = common::constants::TICKS_PER_SECOND; // frames per second
pub const DEFAULT_LOG_FILTER: &str = "info";
pub const DEFAULT_RESTART_DELAY_TICKS: u64 = 120; // game-over screen held before the next run

// ============================================================================
// Autopilot
// ============================================================================

pub const AUTOPILOT_LOOKAHEAD: f32 = 12.0; // meters ahead the autopilot watches
pub const AUTOPILOT_BEHIND_MARGIN: f32 = 1.0; // objects this far past still block a lane
pub const AUTOPILOT_JUMP_DISTANCE: f32 = 2.5; // jump when an unavoidable obstacle is this close
