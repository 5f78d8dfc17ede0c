use rand::Rng;

use crate::constants::*;

// ============================================================================
// Scenery
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Building {
    pub x: f32,
    pub z: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cloud {
    pub x: f32,
    pub speed: f32,
    // +1.0 or -1.0
    pub direction: f32,
}

// Background state the renderer draws from. Purely cosmetic; nothing here
// takes part in collision.
#[derive(Debug, Clone)]
pub struct Scenery {
    pub buildings: Vec<Building>,
    // Whole-city offset, only moved after the run is over
    pub city_offset: f32,
    pub lane_offset: f32,
    pub clouds: Vec<Cloud>,
}

impl Scenery {
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut buildings = Vec::with_capacity(BUILDINGS_PER_SIDE * 2);
        for i in 0..BUILDINGS_PER_SIDE {
            let z = -(i as f32) * BUILDING_SPACING;
            for side in [-1.0, 1.0] {
                buildings.push(Building {
                    x: side * LANE_WIDTH * 2.0,
                    z,
                    height: BUILDING_START_HEIGHT,
                });
            }
        }

        let clouds = (0..CLOUD_COUNT)
            .map(|_| Cloud {
                x: rng.random_range(-CLOUD_WRAP_X..CLOUD_WRAP_X),
                speed: rng.random_range(CLOUD_MIN_SPEED..CLOUD_MAX_SPEED),
                direction: if rng.random_bool(0.5) { 1.0 } else { -1.0 },
            })
            .collect();

        Self {
            buildings,
            city_offset: 0.0,
            lane_offset: 0.0,
            clouds,
        }
    }

    // Per-tick scroll while a run is live. Buildings wrap individually.
    pub fn scroll_running<R: Rng + ?Sized>(&mut self, scroll_speed: f32, rng: &mut R) {
        for building in &mut self.buildings {
            building.z += BUILDING_SPEED;
            if building.z > BUILDING_WRAP_DEPTH {
                building.z = BUILDING_RESET_DEPTH;
                building.x = side_position(building.x < 0.0, rng);
                building.height = rng.random_range(BUILDING_MIN_HEIGHT..BUILDING_MAX_HEIGHT);
            }
        }

        self.lane_offset += scroll_speed;
        if self.lane_offset > LANE_MARKER_WRAP {
            self.lane_offset = 0.0;
        }

        for cloud in &mut self.clouds {
            cloud.x += cloud.speed * cloud.direction;
            if cloud.x > CLOUD_WRAP_X {
                cloud.x = -CLOUD_WRAP_X;
            } else if cloud.x < -CLOUD_WRAP_X {
                cloud.x = CLOUD_WRAP_X;
            }
        }
    }

    // Per-tick scroll after game over. Moves the city as one group at its own
    // speed; kept apart from `scroll_running` on purpose.
    pub fn scroll_game_over(&mut self) {
        self.city_offset += CITY_GAME_OVER_SPEED;
        if self.city_offset > 0.0 {
            self.city_offset = CITY_GAME_OVER_RESET;
        }
    }

    // Put the scrolled layers back at their origin for a new run
    pub fn reset(&mut self) {
        self.city_offset = 0.0;
        self.lane_offset = 0.0;
    }
}

// Random x beside the track on the requested side
fn side_position<R: Rng + ?Sized>(left: bool, rng: &mut R) -> f32 {
    let playable = LANE_WIDTH * 3.0;
    let spread = rng.random_range(0.0..(CITY_WIDTH / 2.0 - playable / 2.0));
    let x = playable / 2.0 + BUILDING_WIDTH / 2.0 + spread;
    if left { -x } else { x }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn buildings_wrap_on_their_side() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut scenery = Scenery::new(&mut rng);
        let sides: Vec<bool> = scenery.buildings.iter().map(|b| b.x < 0.0).collect();

        for _ in 0..5000 {
            scenery.scroll_running(BASE_SCROLL_SPEED, &mut rng);
        }

        for (building, left) in scenery.buildings.iter().zip(sides) {
            assert_eq!(building.x < 0.0, left);
            assert!(building.x.abs() >= LANE_WIDTH * 1.5);
            assert!(building.z <= BUILDING_WRAP_DEPTH);
            assert!(building.height >= BUILDING_MIN_HEIGHT && building.height < BUILDING_MAX_HEIGHT);
        }
        assert!(scenery.lane_offset <= LANE_MARKER_WRAP);
        assert!(scenery.clouds.iter().all(|c| c.x.abs() <= CLOUD_WRAP_X));
    }

    #[test]
    fn game_over_scroll_leaves_buildings_alone() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut scenery = Scenery::new(&mut rng);
        let before = scenery.buildings.clone();
        scenery.scroll_game_over();
        assert_eq!(scenery.buildings, before);
        assert!((scenery.city_offset - CITY_GAME_OVER_RESET).abs() < f32::EPSILON);
        scenery.scroll_game_over();
        assert!(scenery.city_offset > CITY_GAME_OVER_RESET);
        assert!(scenery.city_offset < 0.0);
    }
}
