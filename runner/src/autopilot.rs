use bevy_ecs::prelude::*;
use rand::{Rng, SeedableRng, rngs::StdRng};

use common::{
    Category, GameSession, InputEvent, Lane, Phase,
    constants::PLAYER_Z,
};

use crate::constants::{AUTOPILOT_BEHIND_MARGIN, AUTOPILOT_JUMP_DISTANCE, AUTOPILOT_LOOKAHEAD};

// ============================================================================
// Autopilot
// ============================================================================

// Scripted input source for headless runs. Each tick it gets a chance to
// react (the skill level); when it does, it dodges the nearest obstacle in
// its lane, jumps when boxed in, and otherwise drifts toward pick-ups.
#[derive(Resource, Debug)]
pub struct Autopilot {
    skill: f64,
    rng: StdRng,
}

impl Autopilot {
    // Skill outside 0..=1 is clamped; a non-finite skill never reacts
    #[must_use]
    pub fn new(skill: f64, seed: u64) -> Self {
        Self {
            skill: if skill.is_finite() { skill.clamp(0.0, 1.0) } else { 0.0 },
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn decide(&mut self, session: &GameSession) -> Vec<InputEvent> {
        if session.phase() != Phase::Running || !self.rng.random_bool(self.skill) {
            return Vec::new();
        }

        let lane = session.player().lane();

        if let Some(distance) = nearest_ahead(session, Category::Obstacle, lane) {
            // Prefer a clear neighbour; jump only once there is no way around
            let escape = [-1, 1]
                .into_iter()
                .filter_map(|delta| lane.step(delta).map(|target| (delta, target)))
                .find(|(_, target)| nearest_ahead(session, Category::Obstacle, *target).is_none());

            return match escape {
                Some((delta, _)) => vec![step_input(delta)],
                None if distance <= AUTOPILOT_JUMP_DISTANCE => vec![InputEvent::Jump],
                None => Vec::new(),
            };
        }

        // No threat in this lane: head for the closest pick-up in a safe lane
        let target = Lane::ALL
            .into_iter()
            .filter(|candidate| nearest_ahead(session, Category::Obstacle, *candidate).is_none())
            .filter_map(|candidate| {
                let pickup = [Category::PowerUp, Category::Collectible]
                    .into_iter()
                    .filter_map(|category| nearest_ahead(session, category, candidate))
                    .reduce(f32::min)?;
                Some((candidate, pickup))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(candidate, _)| candidate);

        match target {
            Some(target) if target.index() < lane.index() => vec![InputEvent::LaneLeft],
            Some(target) if target.index() > lane.index() => vec![InputEvent::LaneRight],
            _ => Vec::new(),
        }
    }
}

const fn step_input(delta: i8) -> InputEvent {
    if delta < 0 { InputEvent::LaneLeft } else { InputEvent::LaneRight }
}

// Distance to the closest object of `category` in `lane` that is still
// approaching or has not fully cleared the player
fn nearest_ahead(session: &GameSession, category: Category, lane: Lane) -> Option<f32> {
    session
        .pool()
        .active_objects(category)
        .filter(|object| object.lane == lane)
        .map(|object| PLAYER_Z - object.depth)
        .filter(|distance| *distance >= -AUTOPILOT_BEHIND_MARGIN && *distance <= AUTOPILOT_LOOKAHEAD)
        .reduce(f32::min)
}
