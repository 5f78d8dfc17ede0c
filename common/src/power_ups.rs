use tracing::debug;

use crate::{
    constants::{BASE_SCROLL_SPEED, POWER_UP_DURATION_TICKS, SPEED_POWER_UP_SCROLL_SPEED},
    objects::PowerUpKind,
    presentation::Scene,
};

// ============================================================================
// Power-Up Slot
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivePowerUp {
    pub kind: PowerUpKind,
    pub expires_at: u64,
}

// Single active power-up. Whatever clears the slot (expiry, a replacement, a
// consumed shield, a reset) reverts the effect; an empty slot has nothing
// left to revert, so each activation is reverted exactly once.
#[derive(Debug, Clone, Default)]
pub struct PowerUpSlot {
    active: Option<ActivePowerUp>,
}

impl PowerUpSlot {
    #[must_use]
    pub const fn active(&self) -> Option<ActivePowerUp> {
        self.active
    }

    #[must_use]
    pub fn kind(&self) -> Option<PowerUpKind> {
        self.active.map(|active| active.kind)
    }

    #[must_use]
    pub fn is_active(&self, kind: PowerUpKind) -> bool {
        self.kind() == Some(kind)
    }

    // Current track scroll speed, raised while Speed is held
    #[must_use]
    pub fn scroll_speed(&self) -> f32 {
        if self.is_active(PowerUpKind::Speed) {
            SPEED_POWER_UP_SCROLL_SPEED
        } else {
            BASE_SCROLL_SPEED
        }
    }

    // Start `kind`, reverting whatever was held before. Returns the
    // superseded kind.
    pub fn activate(&mut self, kind: PowerUpKind, now: u64, scene: &mut dyn Scene) -> Option<PowerUpKind> {
        let superseded = self.clear(scene);
        self.active = Some(ActivePowerUp {
            kind,
            expires_at: now + POWER_UP_DURATION_TICKS,
        });
        scene.apply_tint(kind);
        debug!(?kind, ?superseded, expires_at = now + POWER_UP_DURATION_TICKS, "power-up activated");
        superseded
    }

    // Revert the held power-up once its time is up
    pub fn expire(&mut self, now: u64, scene: &mut dyn Scene) -> Option<PowerUpKind> {
        match self.active {
            Some(active) if now >= active.expires_at => self.clear(scene),
            _ => None,
        }
    }

    // Use up the held power-up if it is `kind`
    pub fn consume(&mut self, kind: PowerUpKind, scene: &mut dyn Scene) -> bool {
        if self.is_active(kind) {
            self.clear(scene);
            true
        } else {
            false
        }
    }

    // Revert and empty the slot
    pub fn clear(&mut self, scene: &mut dyn Scene) -> Option<PowerUpKind> {
        let active = self.active.take()?;
        scene.clear_tint();
        Some(active.kind)
    }
}
