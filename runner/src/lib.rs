pub mod autopilot;
pub mod config;
pub mod constants;
pub mod hud;
pub mod resources;
pub mod scene;
pub mod store;
pub mod systems;

use bevy_app::{App, Startup, Update};
use bevy_ecs::prelude::*;

use common::{GameSession, ScoreStore};

pub use autopilot::Autopilot;
pub use config::init_tracing;
pub use hud::LogHud;
pub use resources::{FrameEvents, GameRng, PendingInputs, RunConfig, RunStats};
pub use scene::HeadlessScene;
pub use store::JsonScoreFile;

use systems::*;

// ============================================================================
// App Assembly
// ============================================================================

// Build the headless app: one `update` is one game frame. Without a skill
// the player never gives input.
pub fn build_app(config: RunConfig, seed: u64, skill: Option<f64>, store: JsonScoreFile) -> App {
    let mut rng = GameRng::seeded(seed);
    let mut scene = HeadlessScene::default();
    let session = GameSession::new(store.get().unwrap_or(0), &mut rng.0, &mut scene);

    let mut app = App::new();
    app.insert_resource(session)
        .insert_resource(rng)
        .insert_resource(scene)
        .insert_resource(store)
        .insert_resource(config)
        .insert_resource(LogHud::default())
        .insert_resource(PendingInputs::default())
        .insert_resource(FrameEvents::default())
        .insert_resource(RunStats::default())
        .add_systems(Startup, start_run_system)
        .add_systems(
            Update,
            (
                autopilot_input_system,
                session_tick_system,
                stats_system,
                hud_system,
                run_end_system,
            )
                .chain(),
        );

    if let Some(skill) = skill {
        app.insert_resource(Autopilot::new(skill, seed.wrapping_add(1)));
    }

    app
}
