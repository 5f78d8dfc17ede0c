use tracing::trace;

use crate::{
    constants::RETIRE_DEPTH,
    objects::{Category, ObjectId},
    pool::ObjectPool,
    presentation::Scene,
};

// ============================================================================
// Object Movement
// ============================================================================

// Advance every active object toward the camera and send the ones past the
// retirement depth back to the pool. Returns the retired ids.
pub fn move_objects(pool: &mut ObjectPool, scene: &mut dyn Scene) -> Vec<ObjectId> {
    let mut retired = Vec::new();

    for category in Category::ALL {
        let speed = category.speed();
        let mut i = 0;
        while let Some(&id) = pool.active(category).get(i) {
            let Some(object) = pool.get_mut(id) else {
                i += 1;
                continue;
            };
            object.depth += speed;

            if object.depth > RETIRE_DEPTH {
                // Release removes the id from the active list, so `i` already
                // points at the next object
                scene.hide(id);
                pool.release(id);
                trace!(?id, ?category, "retired");
                retired.push(id);
            } else {
                i += 1;
            }
        }
    }

    retired
}
