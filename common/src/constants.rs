// ============================================================================
// Timing
// ============================================================================

pub const TICKS_PER_SECOND: u32 = 60; // nominal frame rate the tuning below assumes

// ============================================================================
// Lanes & Track
// ============================================================================

pub const LANE_WIDTH: f32 = 3.0; // x distance between lane centers (meters)
pub const LANE_MIN: i8 = -1;
pub const LANE_MAX: i8 = 1;
pub const LANE_COUNT: usize = 3;

// ============================================================================
// Player
// ============================================================================

// Dimensions (meters)
pub const PLAYER_WIDTH: f32 = 0.8; // side to side
pub const PLAYER_HEIGHT: f32 = 1.8; // up/down, standing
pub const PLAYER_DEPTH: f32 = 0.6; // front to back
pub const PLAYER_SLIDE_HEIGHT_RATIO: f32 = 0.5; // body height while sliding
pub const PLAYER_Z: f32 = -1.0; // fixed depth of the player on the track

// Jump follows sin(phase) * JUMP_HEIGHT for phase in [0, PI)
pub const JUMP_HEIGHT: f32 = 2.0;
pub const JUMP_PHASE_STEP: f32 = 0.05; // radians per tick

pub const SLIDE_DURATION_TICKS: u32 = 60;
pub const LANE_SWITCH_DELAY_TICKS: u64 = 9; // ~150ms at 60Hz

// ============================================================================
// Objects
// ============================================================================

pub const SPAWN_DEPTH: f32 = -70.0;
pub const RETIRE_DEPTH: f32 = 10.0; // objects past this depth go back to the pool
pub const OBJECT_BASE_HEIGHT: f32 = 0.5; // y of object centers
pub const SPAWN_CHECK_SIZE: f32 = 1.0; // edge of the cube tested for spawn overlap

pub const POOL_PREWARM: usize = 10; // slots built per category up front

// Per-tick spawn probabilities
pub const OBSTACLE_SPAWN_CHANCE: f64 = 0.004;
pub const COLLECTIBLE_SPAWN_CHANCE: f64 = 0.006;
pub const POWER_UP_SPAWN_CHANCE: f64 = 0.0002;

// Depth advanced per tick
pub const OBSTACLE_SPEED: f32 = 0.08;
pub const COLLECTIBLE_SPEED: f32 = 0.08;
pub const POWER_UP_SPEED: f32 = 0.08;

// Half extents of the collision boxes (meters)
pub const OBSTACLE_HALF_EXTENT: f32 = 0.5; // 1x1x1 crate
pub const COLLECTIBLE_HALF_EXTENT: f32 = 0.5; // coin glow shell
pub const POWER_UP_HALF_EXTENT: f32 = 0.7; // power-up glow shell

// ============================================================================
// Scoring
// ============================================================================

pub const SCORE_PER_TICK: f32 = 0.02;
pub const COIN_VALUE: u32 = 1;
pub const DOUBLE_COIN_MULTIPLIER: u32 = 2;

// ============================================================================
// Power-Ups
// ============================================================================

pub const POWER_UP_DURATION_TICKS: u64 = 300;
pub const BASE_SCROLL_SPEED: f32 = 0.1;
pub const SPEED_POWER_UP_SCROLL_SPEED: f32 = 0.15;

// ============================================================================
// Shop Prices (coins)
// ============================================================================

pub const PRICE_BLUE_CHARACTER: u32 = 100;
pub const PRICE_RED_CHARACTER: u32 = 150;
pub const PRICE_EXTRA_SHIELD: u32 = 50;
pub const PRICE_DOUBLE_COINS: u32 = 200;

// ============================================================================
// Scenery
// ============================================================================

pub const BUILDINGS_PER_SIDE: usize = 10;
pub const BUILDING_SPACING: f32 = 20.0;
pub const BUILDING_WIDTH: f32 = 4.0;
pub const BUILDING_SPEED: f32 = 0.1;
pub const BUILDING_WRAP_DEPTH: f32 = 10.0;
pub const BUILDING_RESET_DEPTH: f32 = -200.0;
pub const BUILDING_START_HEIGHT: f32 = 10.0;
pub const BUILDING_MIN_HEIGHT: f32 = 5.0;
pub const BUILDING_MAX_HEIGHT: f32 = 15.0;
pub const CITY_WIDTH: f32 = 40.0;

// Whole-city drift used only once the run is over
pub const CITY_GAME_OVER_SPEED: f32 = 0.05;
pub const CITY_GAME_OVER_RESET: f32 = -100.0;

pub const LANE_MARKER_WRAP: f32 = 2.0;

pub const CLOUD_COUNT: usize = 10;
pub const CLOUD_WRAP_X: f32 = 60.0;
pub const CLOUD_MIN_SPEED: f32 = 0.01;
pub const CLOUD_MAX_SPEED: f32 = 0.03;
