use bevy_ecs::prelude::*;
use std::collections::HashSet;
use tracing::trace;

use common::{Category, GameObject, ObjectId, PowerUpKind, Scene, Skin, player::Player};

// ============================================================================
// Headless Scene
// ============================================================================

// Stand-in for the renderer: keeps the visible set and counters instead of
// meshes so runs can be checked and summarised.
#[derive(Resource, Debug, Default)]
pub struct HeadlessScene {
    pub built: usize,
    pub visible: HashSet<ObjectId>,
    pub tint: Option<PowerUpKind>,
    pub skin: Skin,
    pub player_x: f32,
    pub player_y: f32,
}

impl Scene for HeadlessScene {
    fn build(&mut self, id: ObjectId, category: Category) {
        self.built += 1;
        trace!(?id, ?category, "built");
    }

    fn show(&mut self, object: &GameObject) {
        self.visible.insert(object.id);
    }

    fn hide(&mut self, id: ObjectId) {
        self.visible.remove(&id);
    }

    fn place_player(&mut self, player: &Player) {
        let position = player.position();
        self.player_x = position.x;
        self.player_y = position.y;
    }

    fn apply_tint(&mut self, kind: PowerUpKind) {
        self.tint = Some(kind);
    }

    fn clear_tint(&mut self) {
        self.tint = None;
    }

    fn set_skin(&mut self, skin: Skin) {
        self.skin = skin;
    }
}
