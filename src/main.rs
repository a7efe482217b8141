//! Paddle Duel headless driver
//!
//! Walks the menu flow with synthetic key presses, then lets the autopilot
//! play both paddles at a fixed timestep. Useful for soak-testing tuning files.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use paddle_duel::input::{Action, KeyCode, KeyEvent};
use paddle_duel::sim::{Difficulty, GameEvent, Side, autopilot};
use paddle_duel::{Game, Settings, TickOutcome};

#[derive(Parser)]
#[command(name = "paddle-duel")]
#[command(about = "Run a headless Paddle Duel match between two autopilots")]
struct Args {
    /// JSON settings file (tuning and key bindings)
    #[arg(short, long)]
    settings: Option<PathBuf>,

    #[arg(short, long, default_value = "medium")]
    difficulty: Difficulty,

    /// Ticks to simulate
    #[arg(short, long, default_value_t = 3600)]
    ticks: u32,

    /// Stop once either side reaches this many points
    #[arg(short, long)]
    points: Option<u32>,

    /// Print the default settings as JSON and exit
    #[arg(long)]
    dump_settings: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.dump_settings {
        println!("{}", Settings::default().to_json()?);
        return Ok(());
    }

    let settings = match &args.settings {
        Some(path) => Settings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };
    let tuning = settings.tuning;
    let (width, height, dt) = (tuning.viewport_width, tuning.viewport_height, tuning.tick_dt);

    log::info!("Paddle Duel (headless) starting on {}", args.difficulty);
    let mut game = Game::new(settings);

    // Title screen takes any key, select screen starts on Easy
    tap(&mut game, KeyCode::Space, dt, width, height);
    let nav_right = bound_key(&game, Action::NavRight)?;
    for _ in 0..args.difficulty.index() {
        tap(&mut game, nav_right, dt, width, height);
    }
    let confirm = bound_key(&game, Action::Confirm)?;
    tap(&mut game, confirm, dt, width, height);

    let mut ticks = 0;
    while ticks < args.ticks {
        for side in Side::BOTH {
            let state = game.state();
            let steer = autopilot::steer(state.paddle(side), side, &state.ball, height);
            game.apply_steer(side, steer);
        }
        if game.advance(dt, width, height) == TickOutcome::Quit {
            break;
        }
        ticks += 1;

        let scored = game
            .events()
            .iter()
            .any(|e| matches!(e, GameEvent::Scored { .. }));
        if let (true, Some(limit)) = (scored, args.points) {
            if Side::BOTH.iter().any(|&s| game.state().score.get(s) >= limit) {
                log::info!("Point limit {} reached after {} ticks", limit, ticks);
                break;
            }
        }
    }

    let snapshot = game.snapshot();
    log::info!(
        "Final score {} - {} after {} ticks",
        snapshot.score_left,
        snapshot.score_right,
        ticks
    );
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

fn bound_key(game: &Game, action: Action) -> Result<KeyCode> {
    game.settings()
        .bindings
        .key_for(action)
        .with_context(|| format!("no key bound to {action:?}"))
}

fn tap(game: &mut Game, code: KeyCode, dt: f32, width: f32, height: f32) {
    game.handle_key(KeyEvent::Pressed(code));
    game.handle_key(KeyEvent::Released(code));
    game.advance(dt, width, height);
}
