#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

use bevy_math::Vec3;
use rand::Rng;

use crate::{collision::Aabb, constants::*};

// ============================================================================
// Lanes
// ============================================================================

// Lane index, always one of -1 (left), 0 (center), 1 (right)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct Lane(i8);

impl Lane {
    pub const LEFT: Self = Self(LANE_MIN);
    pub const CENTER: Self = Self(0);
    pub const RIGHT: Self = Self(LANE_MAX);
    pub const ALL: [Self; LANE_COUNT] = [Self::LEFT, Self::CENTER, Self::RIGHT];

    // Returns None for indices outside the track
    #[must_use]
    pub const fn new(index: i8) -> Option<Self> {
        if index >= LANE_MIN && index <= LANE_MAX {
            Some(Self(index))
        } else {
            None
        }
    }

    #[must_use]
    pub const fn index(self) -> i8 {
        self.0
    }

    // Lane center on the x axis (meters)
    #[must_use]
    pub fn x(self) -> f32 {
        f32::from(self.0) * LANE_WIDTH
    }

    // Neighbouring lane, or None when the step would leave the track
    #[must_use]
    pub fn step(self, delta: i8) -> Option<Self> {
        self.0.checked_add(delta).and_then(Self::new)
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(rng.random_range(LANE_MIN..=LANE_MAX))
    }
}

// ============================================================================
// Object Categories
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub enum Category {
    Obstacle,
    Collectible,
    PowerUp,
}

impl Category {
    // Spawn and collision order
    pub const ALL: [Self; 3] = [Self::Obstacle, Self::Collectible, Self::PowerUp];

    // Index into per-category arrays
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Obstacle => 0,
            Self::Collectible => 1,
            Self::PowerUp => 2,
        }
    }

    #[must_use]
    pub const fn spawn_chance(self) -> f64 {
        match self {
            Self::Obstacle => OBSTACLE_SPAWN_CHANCE,
            Self::Collectible => COLLECTIBLE_SPAWN_CHANCE,
            Self::PowerUp => POWER_UP_SPAWN_CHANCE,
        }
    }

    // Depth advanced per tick
    #[must_use]
    pub const fn speed(self) -> f32 {
        match self {
            Self::Obstacle => OBSTACLE_SPEED,
            Self::Collectible => COLLECTIBLE_SPEED,
            Self::PowerUp => POWER_UP_SPEED,
        }
    }

    #[must_use]
    pub const fn half_extent(self) -> f32 {
        match self {
            Self::Obstacle => OBSTACLE_HALF_EXTENT,
            Self::Collectible => COLLECTIBLE_HALF_EXTENT,
            Self::PowerUp => POWER_UP_HALF_EXTENT,
        }
    }
}

// ============================================================================
// Power-Up Kinds
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub enum PowerUpKind {
    Shield,
    Speed,
    Magnet,
}

impl PowerUpKind {
    pub const ALL: [Self; 3] = [Self::Shield, Self::Speed, Self::Magnet];

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Shield => "Shield",
            Self::Speed => "Speed Boost",
            Self::Magnet => "Magnet",
        }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

// ============================================================================
// Game Objects
// ============================================================================

// Slot index into the object pool arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct ObjectId(pub u32);

impl ObjectId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    Pooled,
    Active,
}

#[derive(Debug, Clone)]
pub struct GameObject {
    pub id: ObjectId,
    pub category: Category,
    pub lane: Lane,
    pub depth: f32,
    pub state: SlotState,
    // Only set for the PowerUp category
    pub power_up: Option<PowerUpKind>,
}

impl GameObject {
    #[must_use]
    pub const fn new(id: ObjectId, category: Category) -> Self {
        Self {
            id,
            category,
            lane: Lane::CENTER,
            depth: SPAWN_DEPTH,
            state: SlotState::Pooled,
            power_up: None,
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state == SlotState::Active
    }

    #[must_use]
    pub fn position(&self) -> Vec3 {
        Vec3::new(self.lane.x(), OBJECT_BASE_HEIGHT, self.depth)
    }

    #[must_use]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.position(), Vec3::splat(self.category.half_extent()))
    }
}
