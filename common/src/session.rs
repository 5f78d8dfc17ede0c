use bevy_ecs::prelude::Resource;
use rand::Rng;
use tracing::{debug, info};

use crate::{
    collision::Aabb,
    constants::*,
    input::InputEvent,
    movement::move_objects,
    objects::{Category, ObjectId, PowerUpKind},
    player::Player,
    pool::ObjectPool,
    power_ups::PowerUpSlot,
    presentation::{HudSnapshot, Scene, ScoreStore},
    scenery::Scenery,
    shop::{PurchaseOutcome, Shop, ShopItem},
    spawning::spawn_objects,
};

// ============================================================================
// Session Types
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Ready,
    Running,
    GameOver,
}

// Everything observable that happened during one tick
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Spawned { id: ObjectId, category: Category },
    Retired { id: ObjectId },
    CoinsCollected { id: ObjectId, amount: u32 },
    PowerUpActivated { kind: PowerUpKind, superseded: Option<PowerUpKind> },
    PowerUpExpired { kind: PowerUpKind },
    ShieldConsumed { obstacle: ObjectId },
    GameOver { final_score: u32, high_score: u32, new_record: bool },
}

// ============================================================================
// Game Session
// ============================================================================

// All state of the game: the player, the object pool, counters and the shop.
// One `tick` call is one frame.
#[derive(Resource, Debug)]
pub struct GameSession {
    phase: Phase,
    tick: u64,
    score: f32,
    high_score: f32,
    coins: u32,
    player: Player,
    pool: ObjectPool,
    power_up: PowerUpSlot,
    shop: Shop,
    scenery: Scenery,
}

impl GameSession {
    // New session waiting on the start screen. The pool is prewarmed here so
    // no object is ever built mid-run under normal load.
    pub fn new<R: Rng + ?Sized>(high_score: u32, rng: &mut R, scene: &mut dyn Scene) -> Self {
        let mut pool = ObjectPool::new();
        pool.prewarm(POOL_PREWARM, scene);

        Self {
            phase: Phase::Ready,
            tick: 0,
            score: 0.0,
            high_score: high_score as f32,
            coins: 0,
            player: Player::new(),
            pool,
            power_up: PowerUpSlot::default(),
            shop: Shop::default(),
            scenery: Scenery::new(rng),
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub const fn current_tick(&self) -> u64 {
        self.tick
    }

    #[must_use]
    pub const fn score(&self) -> f32 {
        self.score
    }

    // Score as displayed
    #[must_use]
    pub fn display_score(&self) -> u32 {
        self.score.floor() as u32
    }

    #[must_use]
    pub fn high_score(&self) -> u32 {
        self.high_score.floor() as u32
    }

    #[must_use]
    pub const fn coins(&self) -> u32 {
        self.coins
    }

    #[must_use]
    pub const fn player(&self) -> &Player {
        &self.player
    }

    #[must_use]
    pub const fn pool(&self) -> &ObjectPool {
        &self.pool
    }

    #[must_use]
    pub fn power_up(&self) -> Option<PowerUpKind> {
        self.power_up.kind()
    }

    #[must_use]
    pub const fn shop(&self) -> &Shop {
        &self.shop
    }

    #[must_use]
    pub const fn scenery(&self) -> &Scenery {
        &self.scenery
    }

    #[must_use]
    pub fn hud(&self) -> HudSnapshot {
        HudSnapshot {
            score: self.display_score(),
            coins: self.coins,
            power_up: self.power_up(),
            high_score: self.high_score(),
        }
    }

    // ========================================================================
    // Run Control
    // ========================================================================

    // First run from the start screen; coins start from zero
    pub fn start(&mut self, scene: &mut dyn Scene) {
        self.coins = 0;
        self.begin_run(scene);
    }

    // Another run after game over; coins carry over so they can be spent
    pub fn restart(&mut self, scene: &mut dyn Scene) {
        self.begin_run(scene);
    }

    fn begin_run(&mut self, scene: &mut dyn Scene) {
        self.pool.release_all(scene);
        self.power_up.clear(scene);
        self.player = Player::new();
        self.score = 0.0;
        self.scenery.reset();
        self.phase = Phase::Running;

        scene.set_skin(self.shop.skin());
        if self.shop.owns(ShopItem::ExtraShield) {
            self.power_up.activate(PowerUpKind::Shield, self.tick, scene);
        }
        scene.place_player(&self.player);

        info!(tick = self.tick, coins = self.coins, power_up = ?self.power_up(), "run started");
    }

    pub fn buy(&mut self, item: ShopItem, scene: &mut dyn Scene) -> PurchaseOutcome {
        let outcome = self.shop.buy(item, &mut self.coins);
        if outcome == PurchaseOutcome::Purchased {
            scene.set_skin(self.shop.skin());
        }
        outcome
    }

    // Write the best score to `store` when it beats what is stored there
    pub fn persist_high_score(&self, store: &mut dyn ScoreStore) -> bool {
        let best = self.high_score();
        if store.get().is_none_or(|stored| best > stored) {
            store.set(best);
            true
        } else {
            false
        }
    }

    // ========================================================================
    // Frame Update
    // ========================================================================

    // Run one frame. Inputs are ignored unless a run is live.
    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        inputs: &[InputEvent],
        rng: &mut R,
        scene: &mut dyn Scene,
    ) -> Vec<GameEvent> {
        self.tick += 1;
        let mut events = Vec::new();

        match self.phase {
            Phase::Ready => {}
            Phase::GameOver => self.scenery.scroll_game_over(),
            Phase::Running => self.run_frame(inputs, rng, scene, &mut events),
        }

        events
    }

    fn run_frame<R: Rng + ?Sized>(
        &mut self,
        inputs: &[InputEvent],
        rng: &mut R,
        scene: &mut dyn Scene,
        events: &mut Vec<GameEvent>,
    ) {
        let now = self.tick;

        for input in inputs {
            self.player.handle_input(*input, now);
        }
        self.player.advance();
        scene.place_player(&self.player);

        // Expire before collisions so a pick-up this frame is never cleared
        // by the previous power-up's deadline
        if let Some(kind) = self.power_up.expire(now, scene) {
            events.push(GameEvent::PowerUpExpired { kind });
        }

        self.scenery.scroll_running(self.power_up.scroll_speed(), rng);

        for id in move_objects(&mut self.pool, scene) {
            events.push(GameEvent::Retired { id });
        }

        for id in spawn_objects(&mut self.pool, rng, scene) {
            if let Some(object) = self.pool.get(id) {
                events.push(GameEvent::Spawned { id, category: object.category });
            }
        }

        if !self.check_collisions(now, scene, events) {
            return;
        }

        self.score += SCORE_PER_TICK;
    }

    // Returns false once the run is over
    fn check_collisions(&mut self, now: u64, scene: &mut dyn Scene, events: &mut Vec<GameEvent>) -> bool {
        let player_box = self.player.bounds();

        for id in hits(&self.pool, Category::Obstacle, |bounds| player_box.intersects(bounds)) {
            if self.power_up.consume(PowerUpKind::Shield, scene) {
                self.remove(id, scene);
                debug!(?id, "shield absorbed obstacle");
                events.push(GameEvent::ShieldConsumed { obstacle: id });
            } else {
                events.push(self.end_run());
                return false;
            }
        }

        // A magnet pulls in coins from every lane at the player's depth
        let magnet = self.power_up.is_active(PowerUpKind::Magnet);
        let collected = hits(&self.pool, Category::Collectible, |bounds| {
            if magnet {
                player_box.overlaps_depth(bounds)
            } else {
                player_box.intersects(bounds)
            }
        });
        for id in collected {
            self.remove(id, scene);
            let amount = COIN_VALUE * self.shop.coin_multiplier();
            self.coins = self.coins.saturating_add(amount);
            events.push(GameEvent::CoinsCollected { id, amount });
        }

        for id in hits(&self.pool, Category::PowerUp, |bounds| player_box.intersects(bounds)) {
            let kind = self.pool.get(id).and_then(|object| object.power_up);
            self.remove(id, scene);
            if let Some(kind) = kind {
                let superseded = self.power_up.activate(kind, now, scene);
                events.push(GameEvent::PowerUpActivated { kind, superseded });
            }
        }

        true
    }

    fn remove(&mut self, id: ObjectId, scene: &mut dyn Scene) {
        scene.hide(id);
        self.pool.release(id);
    }

    fn end_run(&mut self) -> GameEvent {
        self.phase = Phase::GameOver;
        let new_record = self.score > self.high_score;
        if new_record {
            self.high_score = self.score;
        }

        info!(
            final_score = self.display_score(),
            high_score = self.high_score(),
            coins = self.coins,
            new_record,
            "run over"
        );

        GameEvent::GameOver {
            final_score: self.display_score(),
            high_score: self.high_score(),
            new_record,
        }
    }
}

// Ids of active objects in `category` whose boxes pass `test`
fn hits(pool: &ObjectPool, category: Category, test: impl Fn(&Aabb) -> bool) -> Vec<ObjectId> {
    pool.active_objects(category)
        .filter(|object| test(&object.bounds()))
        .map(|object| object.id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        objects::Lane,
        presentation::{MemoryStore, NullScene},
    };
    use rand::{SeedableRng, rngs::StdRng};

    fn running_session(rng: &mut StdRng) -> GameSession {
        let mut session = GameSession::new(0, rng, &mut NullScene);
        session.start(&mut NullScene);
        session
    }

    // Put an object right on top of the player, bypassing the spawner
    fn place(session: &mut GameSession, category: Category, lane: Lane) -> ObjectId {
        let id = session.pool.acquire(category, &mut NullScene);
        if let Some(object) = session.pool.get_mut(id) {
            object.lane = lane;
            object.depth = PLAYER_Z;
        }
        id
    }

    fn place_at_player(session: &mut GameSession, category: Category) -> ObjectId {
        let lane = session.player.lane();
        place(session, category, lane)
    }

    fn place_power_up(session: &mut GameSession, kind: PowerUpKind) -> ObjectId {
        let id = place_at_player(session, Category::PowerUp);
        if let Some(object) = session.pool.get_mut(id) {
            object.power_up = Some(kind);
        }
        id
    }

    #[test]
    fn obstacle_without_shield_ends_run_and_keeps_higher_record() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut session = GameSession::new(50, &mut rng, &mut NullScene);
        session.start(&mut NullScene);
        place_at_player(&mut session, Category::Obstacle);

        let events = session.tick(&[], &mut rng, &mut NullScene);

        assert_eq!(session.phase(), Phase::GameOver);
        assert_eq!(session.high_score(), 50);
        assert!(events.contains(&GameEvent::GameOver {
            final_score: 0,
            high_score: 50,
            new_record: false,
        }));
    }

    #[test]
    fn obstacle_without_shield_sets_new_record() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut session = GameSession::new(10, &mut rng, &mut NullScene);
        session.start(&mut NullScene);
        session.score = 12.7;
        place_at_player(&mut session, Category::Obstacle);

        let events = session.tick(&[], &mut rng, &mut NullScene);

        assert_eq!(session.high_score(), 12);
        assert!(events.contains(&GameEvent::GameOver {
            final_score: 12,
            high_score: 12,
            new_record: true,
        }));

        let mut store = MemoryStore(Some(10));
        assert!(session.persist_high_score(&mut store));
        assert_eq!(store.get(), Some(12));
        assert!(!session.persist_high_score(&mut store));
    }

    #[test]
    fn shield_absorbs_exactly_one_obstacle() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut session = running_session(&mut rng);
        session.power_up.activate(PowerUpKind::Shield, 0, &mut NullScene);
        let obstacle = place_at_player(&mut session, Category::Obstacle);
        let before = session.pool.active_count(Category::Obstacle);

        let events = session.tick(&[], &mut rng, &mut NullScene);

        assert_eq!(session.phase(), Phase::Running);
        assert_eq!(session.power_up(), None);
        assert!(session.pool.is_pooled(obstacle));
        let spawned = events
            .iter()
            .filter(|e| matches!(e, GameEvent::Spawned { category: Category::Obstacle, .. }))
            .count();
        assert_eq!(session.pool.active_count(Category::Obstacle), before - 1 + spawned);
        assert!(events.contains(&GameEvent::ShieldConsumed { obstacle }));
    }

    #[test]
    fn coins_respect_double_coins_upgrade() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut session = running_session(&mut rng);
        place_at_player(&mut session, Category::Collectible);
        session.tick(&[], &mut rng, &mut NullScene);
        assert_eq!(session.coins(), 1);

        session.coins = PRICE_DOUBLE_COINS;
        assert_eq!(session.buy(ShopItem::DoubleCoins, &mut NullScene), PurchaseOutcome::Purchased);
        assert_eq!(session.coins(), 0);

        place_at_player(&mut session, Category::Collectible);
        session.tick(&[], &mut rng, &mut NullScene);
        assert_eq!(session.coins(), 2);
    }

    #[test]
    fn purchase_rejected_without_enough_coins() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut session = running_session(&mut rng);
        session.coins = 40;
        assert_eq!(
            session.buy(ShopItem::ExtraShield, &mut NullScene),
            PurchaseOutcome::InsufficientCoins
        );
        assert_eq!(session.coins(), 40);
    }

    #[test]
    fn magnet_collects_from_neighbouring_lane() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut session = running_session(&mut rng);
        session.power_up.activate(PowerUpKind::Magnet, 0, &mut NullScene);

        let id = place(&mut session, Category::Collectible, Lane::LEFT);

        let events = session.tick(&[], &mut rng, &mut NullScene);
        assert!(events.contains(&GameEvent::CoinsCollected { id, amount: 1 }));
    }

    #[test]
    fn new_power_up_replaces_the_old_one() {
        let mut rng = StdRng::seed_from_u64(6);
        let mut session = running_session(&mut rng);
        session.power_up.activate(PowerUpKind::Speed, 0, &mut NullScene);
        place_power_up(&mut session, PowerUpKind::Magnet);

        let events = session.tick(&[], &mut rng, &mut NullScene);

        assert_eq!(session.power_up(), Some(PowerUpKind::Magnet));
        assert!(events.contains(&GameEvent::PowerUpActivated {
            kind: PowerUpKind::Magnet,
            superseded: Some(PowerUpKind::Speed),
        }));
    }

    #[test]
    fn pick_up_on_deadline_tick_survives_old_expiry() {
        let mut rng = StdRng::seed_from_u64(12);
        let mut session = running_session(&mut rng);
        session.tick = 500;
        // Expires on the very next frame
        session.power_up.activate(PowerUpKind::Speed, 501 - POWER_UP_DURATION_TICKS, &mut NullScene);
        place_power_up(&mut session, PowerUpKind::Magnet);

        let events = session.tick(&[], &mut rng, &mut NullScene);

        assert_eq!(session.current_tick(), 501);
        assert!(events.contains(&GameEvent::PowerUpExpired { kind: PowerUpKind::Speed }));
        assert!(events.contains(&GameEvent::PowerUpActivated {
            kind: PowerUpKind::Magnet,
            superseded: None,
        }));
        assert_eq!(session.power_up(), Some(PowerUpKind::Magnet));
        assert_eq!(
            session.power_up.active().map(|active| active.expires_at),
            Some(501 + POWER_UP_DURATION_TICKS)
        );
    }

    #[test]
    fn lane_inputs_are_clamped_and_rate_limited() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut session = running_session(&mut rng);
        session.tick(&[InputEvent::LaneLeft, InputEvent::LaneRight], &mut rng, &mut NullScene);
        assert_eq!(session.player().lane(), Lane::LEFT);
        for _ in 0..LANE_SWITCH_DELAY_TICKS {
            session.tick(&[InputEvent::LaneLeft], &mut rng, &mut NullScene);
        }
        assert_eq!(session.player().lane(), Lane::LEFT);
    }

    #[test]
    fn inputs_ignored_outside_a_run() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut session = GameSession::new(0, &mut rng, &mut NullScene);
        session.tick(&[InputEvent::LaneRight, InputEvent::Jump], &mut rng, &mut NullScene);
        assert_eq!(session.player().lane(), Lane::CENTER);
        assert!(session.player().is_grounded());
        assert!(session.score().abs() < f32::EPSILON);
    }

    #[test]
    fn restart_keeps_coins_and_start_clears_them() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut session = running_session(&mut rng);
        session.coins = 30;
        place_at_player(&mut session, Category::Obstacle);
        session.tick(&[], &mut rng, &mut NullScene);
        assert_eq!(session.phase(), Phase::GameOver);

        session.restart(&mut NullScene);
        assert_eq!(session.phase(), Phase::Running);
        assert_eq!(session.coins(), 30);
        assert_eq!(session.pool().all_active().count(), 0);

        session.start(&mut NullScene);
        assert_eq!(session.coins(), 0);
    }

    #[test]
    fn extra_shield_starts_each_run_shielded() {
        let mut rng = StdRng::seed_from_u64(10);
        let mut session = GameSession::new(0, &mut rng, &mut NullScene);
        session.coins = PRICE_EXTRA_SHIELD;
        assert_eq!(session.buy(ShopItem::ExtraShield, &mut NullScene), PurchaseOutcome::Purchased);
        session.restart(&mut NullScene);
        assert_eq!(session.power_up(), Some(PowerUpKind::Shield));
    }

    #[test]
    fn score_accumulates_per_running_tick() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut session = running_session(&mut rng);
        // Obstacles can spawn, but none reach the player within 75 ticks
        for _ in 0..75 {
            session.tick(&[], &mut rng, &mut NullScene);
        }
        assert_eq!(session.phase(), Phase::Running);
        assert_eq!(session.display_score(), 1);
        assert_eq!(session.hud().score, 1);
    }
}
