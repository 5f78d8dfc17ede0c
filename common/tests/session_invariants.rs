use std::collections::{HashMap, HashSet};

use common::{
    Category, GameEvent, GameObject, GameSession, InputEvent, Lane, ObjectId, Phase, PowerUpKind, Scene,
    constants::POOL_PREWARM,
};
use rand::{Rng, SeedableRng, rngs::StdRng};

// Scene that mirrors what a renderer would hold and flags bad transitions
#[derive(Default)]
struct RecordingScene {
    built: usize,
    built_per_category: [usize; 3],
    visible: HashMap<ObjectId, Category>,
    shown_per_category: [usize; 3],
    peak_per_category: [usize; 3],
    tints_applied: usize,
    tints_cleared: usize,
}

impl Scene for RecordingScene {
    fn build(&mut self, _id: ObjectId, category: Category) {
        self.built += 1;
        self.built_per_category[category.index()] += 1;
    }

    fn show(&mut self, object: &GameObject) {
        let previous = self.visible.insert(object.id, object.category);
        assert!(previous.is_none(), "{:?} shown twice", object.id);
        let index = object.category.index();
        self.shown_per_category[index] += 1;
        self.peak_per_category[index] = self.peak_per_category[index].max(self.shown_per_category[index]);
    }

    fn hide(&mut self, id: ObjectId) {
        let Some(category) = self.visible.remove(&id) else {
            panic!("{id:?} hidden while not shown");
        };
        self.shown_per_category[category.index()] -= 1;
    }

    fn apply_tint(&mut self, _kind: PowerUpKind) {
        self.tints_applied += 1;
    }

    fn clear_tint(&mut self) {
        self.tints_cleared += 1;
    }
}

fn random_inputs(rng: &mut StdRng) -> Vec<InputEvent> {
    const ALL: [InputEvent; 5] = [
        InputEvent::LaneLeft,
        InputEvent::LaneRight,
        InputEvent::Jump,
        InputEvent::SlideStart,
        InputEvent::SlideEnd,
    ];
    (0..rng.random_range(0..3))
        .map(|_| ALL[rng.random_range(0..ALL.len())])
        .collect()
}

// Play `ticks` frames, restarting after every game over, checking invariants
// along the way. Returns the full event log.
fn play(seed: u64, ticks: usize) -> Vec<GameEvent> {
    let mut game_rng = StdRng::seed_from_u64(seed);
    let mut input_rng = StdRng::seed_from_u64(seed ^ 0xA5A5);
    let mut scene = RecordingScene::default();
    let mut session = GameSession::new(0, &mut game_rng, &mut scene);
    session.start(&mut scene);

    let mut log = Vec::new();
    for _ in 0..ticks {
        let inputs = random_inputs(&mut input_rng);
        let events = session.tick(&inputs, &mut game_rng, &mut scene);

        let lane = session.player().lane().index();
        assert!((-1..=1).contains(&lane));
        assert!(Lane::new(lane).is_some());

        let pool = session.pool();
        let active: HashSet<ObjectId> = pool.all_active().map(|object| object.id).collect();
        for id in &active {
            assert!(!pool.is_pooled(*id));
        }
        let visible: HashSet<ObjectId> = scene.visible.keys().copied().collect();
        assert_eq!(active, visible);
        let listed: usize = Category::ALL
            .iter()
            .map(|category| pool.active_count(*category) + pool.free_count(*category))
            .sum();
        assert_eq!(listed, pool.capacity());
        assert_eq!(scene.built, pool.capacity());

        // Slots are only built to cover a new peak of simultaneous objects
        for category in Category::ALL {
            let slots = pool.active_count(category) + pool.free_count(category);
            let peak = scene.peak_per_category[category.index()];
            assert_eq!(slots, POOL_PREWARM.max(peak), "{category:?} grew past its peak");
            assert_eq!(scene.built_per_category[category.index()], slots);
        }

        let outstanding = scene.tints_applied - scene.tints_cleared;
        assert_eq!(outstanding, usize::from(session.power_up().is_some()));

        if session.phase() == Phase::GameOver {
            session.restart(&mut scene);
        }
        log.extend(events);
    }
    log
}

#[test]
fn seeded_sessions_replay_identically() {
    let a = play(1234, 20_000);
    let b = play(1234, 20_000);
    assert!(a.iter().any(|event| matches!(event, GameEvent::Spawned { .. })));
    assert_eq!(a, b);
}

#[test]
fn long_play_keeps_pool_and_scene_consistent() {
    let log = play(99, 60_000);
    assert!(log.iter().any(|event| matches!(event, GameEvent::Retired { .. })));
}

#[test]
fn pool_stops_growing_once_peaks_are_covered() {
    let mut game_rng = StdRng::seed_from_u64(3);
    let mut scene = RecordingScene::default();
    let mut session = GameSession::new(0, &mut game_rng, &mut scene);
    session.start(&mut scene);

    let mut grew_at = Vec::new();
    let mut capacity = session.pool().capacity();
    for tick in 0..200_000_u64 {
        session.tick(&[], &mut game_rng, &mut scene);
        if session.phase() == Phase::GameOver {
            session.restart(&mut scene);
        }

        let now = session.pool().capacity();
        if now != capacity {
            grew_at.push(tick);
            capacity = now;
        }
    }

    // Every construction raised some category's peak, and the number of
    // growth steps is bounded by how far the peaks rose above the prewarm
    let excess: usize = Category::ALL
        .iter()
        .map(|category| scene.peak_per_category[category.index()].saturating_sub(POOL_PREWARM))
        .sum();
    assert_eq!(capacity, Category::ALL.len() * POOL_PREWARM + excess);
    assert!(grew_at.len() <= excess);
}

#[test]
fn high_score_only_moves_up() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut scene = RecordingScene::default();
    let mut session = GameSession::new(0, &mut rng, &mut scene);
    session.start(&mut scene);

    let mut best = 0;
    for _ in 0..50_000 {
        for event in session.tick(&[], &mut rng, &mut scene) {
            if let GameEvent::GameOver {
                final_score,
                high_score,
                new_record,
            } = event
            {
                assert!(high_score >= best);
                assert!(high_score >= final_score);
                if new_record {
                    assert_eq!(high_score, final_score);
                } else {
                    assert_eq!(high_score, best);
                }
                best = high_score;
            }
        }
        if session.phase() == Phase::GameOver {
            session.restart(&mut scene);
        }
    }
    assert_eq!(session.high_score(), best);
}
