use bevy_ecs::prelude::*;
use tracing::{debug, info};

use common::{Hud, HudSnapshot};

// ============================================================================
// Log HUD
// ============================================================================

// Writes the HUD values to the log whenever one of them changes. Score ticks
// are frequent, so plain score changes go to debug and everything else to info.
#[derive(Resource, Debug, Default)]
pub struct LogHud {
    last: Option<HudSnapshot>,
}

impl LogHud {
    #[must_use]
    pub const fn last(&self) -> Option<HudSnapshot> {
        self.last
    }
}

impl Hud for LogHud {
    fn show(&mut self, snapshot: &HudSnapshot) {
        if self.last.as_ref() == Some(snapshot) {
            return;
        }

        let score_only = self.last.is_some_and(|last| {
            last.coins == snapshot.coins && last.power_up == snapshot.power_up && last.high_score == snapshot.high_score
        });

        if score_only {
            debug!(score = snapshot.score, "hud");
        } else {
            info!(
                score = snapshot.score,
                coins = snapshot.coins,
                power_up = snapshot.power_up_name(),
                high_score = snapshot.high_score,
                "hud"
            );
        }
        self.last = Some(*snapshot);
    }
}
