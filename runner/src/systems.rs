use bevy_ecs::prelude::*;
use tracing::{debug, info, warn};

use common::{GameEvent, GameSession, Hud, Phase};

use crate::{
    autopilot::Autopilot,
    hud::LogHud,
    resources::{FrameEvents, GameRng, PendingInputs, RunConfig, RunStats},
    scene::HeadlessScene,
    store::JsonScoreFile,
};

// ============================================================================
// Startup
// ============================================================================

pub fn start_run_system(mut session: ResMut<GameSession>, mut scene: ResMut<HeadlessScene>) {
    session.start(&mut *scene);
}

// ============================================================================
// Frame Systems
// ============================================================================

// Let the autopilot (when present) queue this frame's inputs
pub fn autopilot_input_system(
    autopilot: Option<ResMut<Autopilot>>,
    session: Res<GameSession>,
    mut pending: ResMut<PendingInputs>,
) {
    if let Some(mut autopilot) = autopilot {
        let inputs = autopilot.decide(&session);
        pending.0.extend(inputs);
    }
}

pub fn session_tick_system(
    mut session: ResMut<GameSession>,
    mut rng: ResMut<GameRng>,
    mut scene: ResMut<HeadlessScene>,
    mut pending: ResMut<PendingInputs>,
    mut events: ResMut<FrameEvents>,
) {
    let inputs = std::mem::take(&mut pending.0);
    events.0 = session.tick(&inputs, &mut rng.0, &mut *scene);
}

pub fn stats_system(events: Res<FrameEvents>, mut stats: ResMut<RunStats>) {
    for event in &events.0 {
        match event {
            GameEvent::ShieldConsumed { .. } => stats.shields_consumed += 1,
            GameEvent::PowerUpActivated { kind, superseded } => {
                stats.power_ups_collected += 1;
                debug!(?kind, ?superseded, "power-up collected");
            }
            _ => {}
        }
    }
}

pub fn hud_system(session: Res<GameSession>, mut hud: ResMut<LogHud>, mut stats: ResMut<RunStats>) {
    let snapshot = session.hud();
    hud.show(&snapshot);
    stats.last_hud = Some(snapshot);
}

// Book-keeping once a run ends: save the best score, hold the game-over
// phase for the restart delay, shop, then either restart or mark the
// session finished
pub fn run_end_system(
    mut session: ResMut<GameSession>,
    mut scene: ResMut<HeadlessScene>,
    mut store: ResMut<JsonScoreFile>,
    config: Res<RunConfig>,
    events: Res<FrameEvents>,
    mut stats: ResMut<RunStats>,
) {
    if stats.finished {
        return;
    }

    for event in &events.0 {
        if let GameEvent::GameOver {
            final_score,
            new_record,
            ..
        } = *event
        {
            stats.runs_finished += 1;
            stats.scores.push(final_score);
            stats.game_over_at = Some(session.current_tick());
            if new_record {
                stats.new_records += 1;
            }
            if session.persist_high_score(&mut *store) {
                info!(high_score = session.high_score(), path = %store.path().display(), "best score saved");
            }
        }
    }

    if session.current_tick() >= config.max_ticks {
        if session.phase() == Phase::Running {
            warn!(tick = session.current_tick(), "tick limit reached mid-run");
        }
        stats.finished = true;
        return;
    }

    if session.phase() != Phase::GameOver {
        return;
    }

    if stats.runs_finished >= config.runs {
        stats.finished = true;
        return;
    }

    let ended = stats.game_over_at.unwrap_or_else(|| session.current_tick());
    if session.current_tick().saturating_sub(ended) < config.restart_delay {
        return;
    }

    for item in &config.shopping_list {
        if session.shop().can_buy(*item, session.coins()) {
            session.buy(*item, &mut *scene);
            stats.purchases.push(*item);
        } else {
            debug!(?item, coins = session.coins(), "purchase skipped");
        }
    }

    stats.game_over_at = None;
    session.restart(&mut *scene);
}
