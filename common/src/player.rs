use std::f32::consts::PI;

use bevy_math::Vec3;

use crate::{
    collision::Aabb,
    constants::*,
    input::InputEvent,
    objects::Lane,
};

// ============================================================================
// Vertical State
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VerticalState {
    Grounded,
    // Phase runs from 0 to PI; height is sin(phase) * JUMP_HEIGHT
    Jumping { phase: f32 },
    // Ticks left before standing back up
    Sliding { remaining: u32 },
}

// ============================================================================
// Player
// ============================================================================

#[derive(Debug, Clone)]
pub struct Player {
    lane: Lane,
    vertical: VerticalState,
    // Tick at which the next lane switch is accepted
    lane_ready_at: u64,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            lane: Lane::CENTER,
            vertical: VerticalState::Grounded,
            lane_ready_at: 0,
        }
    }

    #[must_use]
    pub const fn lane(&self) -> Lane {
        self.lane
    }

    #[must_use]
    pub const fn vertical(&self) -> VerticalState {
        self.vertical
    }

    #[must_use]
    pub fn is_grounded(&self) -> bool {
        self.vertical == VerticalState::Grounded
    }

    // Feet height above the ground
    #[must_use]
    pub fn height(&self) -> f32 {
        match self.vertical {
            VerticalState::Jumping { phase } => phase.sin() * JUMP_HEIGHT,
            _ => 0.0,
        }
    }

    #[must_use]
    pub fn body_height(&self) -> f32 {
        match self.vertical {
            VerticalState::Sliding { .. } => PLAYER_HEIGHT * PLAYER_SLIDE_HEIGHT_RATIO,
            _ => PLAYER_HEIGHT,
        }
    }

    // Feet position
    #[must_use]
    pub fn position(&self) -> Vec3 {
        Vec3::new(self.lane.x(), self.height(), PLAYER_Z)
    }

    #[must_use]
    pub fn bounds(&self) -> Aabb {
        let body = self.body_height();
        let center = self.position() + Vec3::new(0.0, body / 2.0, 0.0);
        Aabb::from_center(center, Vec3::new(PLAYER_WIDTH / 2.0, body / 2.0, PLAYER_DEPTH / 2.0))
    }

    // Apply one input; returns whether it changed anything
    pub fn handle_input(&mut self, input: InputEvent, now: u64) -> bool {
        match input {
            InputEvent::LaneLeft => self.switch_lane(-1, now),
            InputEvent::LaneRight => self.switch_lane(1, now),
            InputEvent::Jump => self.jump(),
            InputEvent::SlideStart => self.start_slide(),
            InputEvent::SlideEnd => self.end_slide(),
        }
    }

    // Step one lane; off-track steps and steps inside the cooldown are no-ops
    pub fn switch_lane(&mut self, delta: i8, now: u64) -> bool {
        if now < self.lane_ready_at {
            return false;
        }
        let Some(lane) = self.lane.step(delta) else {
            return false;
        };
        self.lane = lane;
        self.lane_ready_at = now + LANE_SWITCH_DELAY_TICKS;
        true
    }

    pub fn jump(&mut self) -> bool {
        if !self.is_grounded() {
            return false;
        }
        self.vertical = VerticalState::Jumping { phase: 0.0 };
        true
    }

    pub fn start_slide(&mut self) -> bool {
        if !self.is_grounded() {
            return false;
        }
        self.vertical = VerticalState::Sliding {
            remaining: SLIDE_DURATION_TICKS,
        };
        true
    }

    pub fn end_slide(&mut self) -> bool {
        if !matches!(self.vertical, VerticalState::Sliding { .. }) {
            return false;
        }
        self.vertical = VerticalState::Grounded;
        true
    }

    // Advance the jump arc or the slide countdown by one tick
    pub fn advance(&mut self) {
        self.vertical = match self.vertical {
            VerticalState::Grounded => VerticalState::Grounded,
            VerticalState::Jumping { phase } => {
                let phase = phase + JUMP_PHASE_STEP;
                if phase >= PI {
                    VerticalState::Grounded
                } else {
                    VerticalState::Jumping { phase }
                }
            }
            VerticalState::Sliding { remaining } => {
                if remaining <= 1 {
                    VerticalState::Grounded
                } else {
                    VerticalState::Sliding { remaining: remaining - 1 }
                }
            }
        };
    }
}
