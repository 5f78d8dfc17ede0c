use rand::Rng;
use tracing::debug;

use crate::{
    collision::{overlaps_any, spawn_probe},
    constants::SPAWN_DEPTH,
    objects::{Category, Lane, ObjectId, PowerUpKind},
    pool::ObjectPool,
    presentation::Scene,
};

// ============================================================================
// Object Spawning
// ============================================================================

// Roll every category once and spawn the winners. Returns the new ids.
//
// All randomness comes from `rng`, so a seeded generator gives the same
// spawns in the same lanes on every run.
pub fn spawn_objects<R: Rng + ?Sized>(pool: &mut ObjectPool, rng: &mut R, scene: &mut dyn Scene) -> Vec<ObjectId> {
    let mut spawned = Vec::new();
    for category in Category::ALL {
        if let Some(id) = try_spawn(category, pool, rng, scene) {
            spawned.push(id);
        }
    }
    spawned
}

// Roll a single category
pub fn try_spawn<R: Rng + ?Sized>(
    category: Category,
    pool: &mut ObjectPool,
    rng: &mut R,
    scene: &mut dyn Scene,
) -> Option<ObjectId> {
    if rng.random::<f64>() >= category.spawn_chance() {
        return None;
    }

    let lane = Lane::random(rng);
    spawn_in_lane(category, lane, pool, rng, scene)
}

// Place an object of `category` at the spawn depth of `lane` unless something
// already occupies that spot
pub fn spawn_in_lane<R: Rng + ?Sized>(
    category: Category,
    lane: Lane,
    pool: &mut ObjectPool,
    rng: &mut R,
    scene: &mut dyn Scene,
) -> Option<ObjectId> {
    if is_position_occupied(pool, lane) {
        debug!(?category, ?lane, "spawn skipped, lane occupied");
        return None;
    }

    let power_up = (category == Category::PowerUp).then(|| PowerUpKind::random(rng));

    let id = pool.acquire(category, scene);
    let object = pool.get_mut(id)?;
    object.lane = lane;
    object.depth = SPAWN_DEPTH;
    object.power_up = power_up;
    scene.show(object);

    debug!(?id, ?category, ?lane, ?power_up, "spawned");
    Some(id)
}

// Brute-force check of the spawn point against every active object
#[must_use]
pub fn is_position_occupied(pool: &ObjectPool, lane: Lane) -> bool {
    let probe = spawn_probe(lane.x(), SPAWN_DEPTH);
    overlaps_any(&probe, pool.all_active())
}
