use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use tokio::time::{self, Duration, Instant, MissedTickBehavior};
use tracing::{info, warn};

use common::{GameSession, ShopItem};
use runner::{
    JsonScoreFile, RunConfig, RunStats, build_app,
    config::parse_skill,
    constants::{DEFAULT_RESTART_DELAY_TICKS, DEFAULT_TICK_RATE},
    init_tracing,
};

// ============================================================================
// CLI Argument Parsing
// ============================================================================

#[derive(Parser)]
#[command(author, version, about = "Headless endless runner", long_about = None)]
struct Args {
    // Seed for all game rolls; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    // Number of runs to play before exiting
    #[arg(short, long, default_value_t = 1)]
    runs: u32,

    // Stop after this many frames even if runs remain
    #[arg(long)]
    max_ticks: Option<u64>,

    // Frames the game-over phase is held before the next run
    #[arg(long, default_value_t = DEFAULT_RESTART_DELAY_TICKS)]
    restart_delay: u64,

    // Frames per second
    #[arg(long, default_value_t = DEFAULT_TICK_RATE)]
    hz: u32,

    // Run frames back to back instead of at `hz`
    #[arg(long, default_value_t = false)]
    unthrottled: bool,

    // Chance per frame that the autopilot reacts (0 to 1)
    #[arg(long, default_value_t = 0.9, value_parser = parse_skill)]
    skill: f64,

    // Play without any input
    #[arg(long, default_value_t = false)]
    idle: bool,

    // Shop items to buy between runs: blue, red, shield, double-coins
    #[arg(long = "buy", value_parser = parse_shop_item)]
    shopping_list: Vec<ShopItem>,

    // Best score file
    #[arg(long, default_value = "best_score.json")]
    store: PathBuf,

    // Write a JSON summary here when done
    #[arg(long)]
    summary: Option<PathBuf>,

    // Log filter used when RUST_LOG is not set
    #[arg(long)]
    log: Option<String>,
}

fn parse_shop_item(value: &str) -> Result<ShopItem, String> {
    match value {
        "blue" => Ok(ShopItem::BlueCharacter),
        "red" => Ok(ShopItem::RedCharacter),
        "shield" => Ok(ShopItem::ExtraShield),
        "double-coins" => Ok(ShopItem::DoubleCoins),
        other => Err(format!("unknown shop item '{other}'")),
    }
}

#[derive(Serialize)]
struct RunSummary<'a> {
    seed: u64,
    ticks: u64,
    high_score: u32,
    coins: u32,
    stats: &'a RunStats,
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log.as_deref());

    let seed = args.seed.unwrap_or_else(rand::random);
    let config = RunConfig {
        runs: args.runs.max(1),
        max_ticks: args.max_ticks.unwrap_or(u64::MAX),
        restart_delay: args.restart_delay,
        shopping_list: args.shopping_list,
    };
    let skill = (!args.idle).then_some(args.skill);
    let store = JsonScoreFile::open(&args.store);

    let mut app = build_app(config, seed, skill, store);
    app.finish();
    app.cleanup();

    info!(seed, runs = args.runs, hz = args.hz, "starting runner loop...");

    // Run the app in a loop manually at `hz`
    let tick_duration = Duration::from_nanos(1_000_000_000 / u64::from(args.hz.max(1)));
    let mut interval = time::interval(tick_duration);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut frame: u64 = 0;
    loop {
        if !args.unthrottled {
            interval.tick().await;
        }

        let update_start = Instant::now();
        app.update();
        let update_elapsed = update_start.elapsed();

        if !args.unthrottled && update_elapsed > tick_duration {
            warn!(
                "tick {} took {:.2}ms (exceeded {:.2}ms budget)",
                frame,
                update_elapsed.as_secs_f64() * 1000.0,
                tick_duration.as_secs_f64() * 1000.0
            );
        }

        frame += 1;
        if app.world().resource::<RunStats>().finished {
            break;
        }
    }

    let world = app.world();
    let session = world.resource::<GameSession>();
    let stats = world.resource::<RunStats>();
    info!(
        runs = stats.runs_finished,
        best = ?stats.best(),
        high_score = session.high_score(),
        coins = session.coins(),
        frames = frame,
        "done"
    );

    if let Some(path) = &args.summary {
        let summary = RunSummary {
            seed,
            ticks: session.current_tick(),
            high_score: session.high_score(),
            coins: session.coins(),
            stats,
        };
        let text = serde_json::to_string_pretty(&summary)?;
        std::fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))?;
        info!(path = %path.display(), "summary written");
    }

    Ok(())
}
