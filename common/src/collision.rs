use bevy_math::Vec3;

use crate::{
    constants::{OBJECT_BASE_HEIGHT, SPAWN_CHECK_SIZE},
    objects::GameObject,
};

// ============================================================================
// Axis-Aligned Bounding Boxes
// ============================================================================

// Axis-aligned box given by its min and max corners (meters)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    #[must_use]
    pub fn from_center(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    // Touching faces count as an intersection
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        ranges_overlap_1d(self.min.x, self.max.x, other.min.x, other.max.x)
            && ranges_overlap_1d(self.min.y, self.max.y, other.min.y, other.max.y)
            && ranges_overlap_1d(self.min.z, self.max.z, other.min.z, other.max.z)
    }

    // Overlap along the track only, ignoring lane and height
    #[must_use]
    pub fn overlaps_depth(&self, other: &Self) -> bool {
        ranges_overlap_1d(self.min.z, self.max.z, other.min.z, other.max.z)
    }
}

// Check if two 1D ranges overlap.
#[must_use]
pub fn ranges_overlap_1d(a_min: f32, a_max: f32, b_min: f32, b_max: f32) -> bool {
    a_max >= b_min && a_min <= b_max
}

// ============================================================================
// Object Queries
// ============================================================================

// Box used to probe a prospective spawn point
#[must_use]
pub fn spawn_probe(x: f32, z: f32) -> Aabb {
    Aabb::from_center(Vec3::new(x, OBJECT_BASE_HEIGHT, z), Vec3::splat(SPAWN_CHECK_SIZE / 2.0))
}

// Brute-force scan of the given objects against a box
#[must_use]
pub fn overlaps_any<'a>(probe: &Aabb, objects: impl IntoIterator<Item = &'a GameObject>) -> bool {
    objects.into_iter().any(|object| probe.intersects(&object.bounds()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::{Category, Lane, ObjectId};

    fn object_at(category: Category, lane: Lane, depth: f32) -> GameObject {
        let mut object = GameObject::new(ObjectId(0), category);
        object.lane = lane;
        object.depth = depth;
        object
    }

    #[test]
    fn boxes_in_different_lanes_do_not_touch() {
        let a = object_at(Category::Obstacle, Lane::LEFT, -10.0).bounds();
        let b = object_at(Category::Obstacle, Lane::CENTER, -10.0).bounds();
        assert!(!a.intersects(&b));
        assert!(a.overlaps_depth(&b));
    }

    #[test]
    fn touching_faces_intersect() {
        let a = Aabb::from_center(Vec3::ZERO, Vec3::splat(0.5));
        let b = Aabb::from_center(Vec3::new(0.0, 0.0, 1.0), Vec3::splat(0.5));
        assert!(a.intersects(&b));
        let c = Aabb::from_center(Vec3::new(0.0, 0.0, 1.01), Vec3::splat(0.5));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn spawn_probe_hits_object_at_spawn_point() {
        let existing = object_at(Category::PowerUp, Lane::RIGHT, -69.5);
        let probe = spawn_probe(Lane::RIGHT.x(), -70.0);
        assert!(overlaps_any(&probe, [&existing]));
        assert!(!overlaps_any(&spawn_probe(Lane::LEFT.x(), -70.0), [&existing]));
    }
}
