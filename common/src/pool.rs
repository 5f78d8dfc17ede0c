use tracing::debug;

use crate::{
    objects::{Category, GameObject, ObjectId, SlotState},
    presentation::Scene,
};

// ============================================================================
// Object Pool
// ============================================================================

// Arena of object slots. Every slot is either on its category's free list or
// on its category's active list, never both and never neither.
#[derive(Debug, Default)]
pub struct ObjectPool {
    slots: Vec<GameObject>,
    free: [Vec<ObjectId>; 3],
    active: [Vec<ObjectId>; 3],
}

impl ObjectPool {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // Build `per_category` slots for every category so play never has to
    pub fn prewarm(&mut self, per_category: usize, scene: &mut dyn Scene) {
        for category in Category::ALL {
            for _ in 0..per_category {
                let id = self.construct(category, scene);
                self.free[category.index()].push(id);
            }
        }
    }

    // Take a slot off the free list, or build one if the list is empty. The
    // slot comes back active, appended to its category's active list.
    pub fn acquire(&mut self, category: Category, scene: &mut dyn Scene) -> ObjectId {
        let id = match self.free[category.index()].pop() {
            Some(id) => id,
            None => {
                let id = self.construct(category, scene);
                debug!(?id, ?category, "pool grew");
                id
            }
        };

        let slot = &mut self.slots[id.index()];
        slot.state = SlotState::Active;
        slot.power_up = None;
        self.active[category.index()].push(id);
        id
    }

    // Return an active slot to its free list. Releasing anything else is a no-op.
    pub fn release(&mut self, id: ObjectId) -> bool {
        let Some(slot) = self.slots.get_mut(id.index()) else {
            debug!(?id, "release of unknown slot ignored");
            return false;
        };
        if slot.state != SlotState::Active {
            debug!(?id, "release of pooled slot ignored");
            return false;
        }

        let category = slot.category;
        slot.state = SlotState::Pooled;
        slot.power_up = None;

        let active = &mut self.active[category.index()];
        if let Some(pos) = active.iter().position(|other| *other == id) {
            active.remove(pos);
        }
        self.free[category.index()].push(id);
        true
    }

    // Release every active slot, hiding each one
    pub fn release_all(&mut self, scene: &mut dyn Scene) {
        for category in Category::ALL {
            while let Some(&id) = self.active[category.index()].last() {
                scene.hide(id);
                self.release(id);
            }
        }
    }

    #[must_use]
    pub fn get(&self, id: ObjectId) -> Option<&GameObject> {
        self.slots.get(id.index())
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut GameObject> {
        self.slots.get_mut(id.index())
    }

    // Active ids of one category in spawn order
    #[must_use]
    pub fn active(&self, category: Category) -> &[ObjectId] {
        &self.active[category.index()]
    }

    pub fn active_objects(&self, category: Category) -> impl Iterator<Item = &GameObject> {
        self.active[category.index()].iter().map(|id| &self.slots[id.index()])
    }

    // All active objects of every category
    pub fn all_active(&self) -> impl Iterator<Item = &GameObject> {
        Category::ALL.into_iter().flat_map(|category| self.active_objects(category))
    }

    #[must_use]
    pub fn active_count(&self, category: Category) -> usize {
        self.active[category.index()].len()
    }

    #[must_use]
    pub fn free_count(&self, category: Category) -> usize {
        self.free[category.index()].len()
    }

    // Total slots ever built, pooled or not
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_pooled(&self, id: ObjectId) -> bool {
        self.get(id).is_some_and(|slot| slot.state == SlotState::Pooled)
    }

    fn construct(&mut self, category: Category, scene: &mut dyn Scene) -> ObjectId {
        let id = ObjectId(u32::try_from(self.slots.len()).unwrap_or(u32::MAX));
        self.slots.push(GameObject::new(id, category));
        scene.build(id, category);
        id
    }
}
