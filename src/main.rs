//! Foldy Bird driver
//!
//! Invoked by the outer display script once per tick cycle. Subcommands:
//! - `init`: fresh run (best score carried over from a prior snapshot)
//! - `tick <selection_count>`: advance one tick and present the frame
//! - `sleep`: hold the target tick rate and report the pace signal
//!
//! The simulation core is pure; everything here is the driver's side of
//! the contract: snapshot persistence, the directory sink, frame pacing.

use std::fmt;
use std::path::Path;
use std::process::ExitCode;
use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use foldy_bird::consts::{FRAME_CAP, TARGET_FPS};
use foldy_bird::persistence::{Snapshot, load_snapshot, save_snapshot};
use foldy_bird::render::compose;
use foldy_bird::sim::{GameState, Lifecycle, TickInput, tick};
use foldy_bird::sink::DirectorySink;
use foldy_bird::swap::SwapChain;

const STATE_FILE: &str = "state.json";

/// What the outer script should do next, derived from exposed state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PaceSignal {
    Continue,
    Dead,
    MaxFrame,
}

impl PaceSignal {
    fn for_state(state: &GameState) -> Self {
        if state.lifecycle == Lifecycle::Dead {
            PaceSignal::Dead
        } else if state.frame >= FRAME_CAP {
            PaceSignal::MaxFrame
        } else {
            PaceSignal::Continue
        }
    }
}

impl fmt::Display for PaceSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let word = match self {
            PaceSignal::Continue => "continue",
            PaceSignal::Dead => "dead",
            PaceSignal::MaxFrame => "max-frame",
        };
        f.write_str(word)
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

fn init_command() -> Result<(), Box<dyn std::error::Error>> {
    let path = Path::new(STATE_FILE);
    // the best score survives re-init when a prior snapshot exists
    let high_score = load_snapshot(path)
        .map(|snap| snap.state.high_score)
        .unwrap_or(0);

    let seed = now_ms();
    let mut state = GameState::with_high_score(seed, high_score);
    log::info!("init: seed {seed}, carried high score {high_score}");

    let sink = DirectorySink::new(".");
    sink.initialize()?;

    // draw frame 0 without ticking
    let frame = compose(&state, &[]);
    let mut chain = SwapChain::new();
    let live = chain.present(&mut state, &frame);
    sink.write_surface(chain.surface(live))?;

    save_snapshot(path, &Snapshot::new(state))?;
    Ok(())
}

fn tick_command(selection_count: u32) -> Result<(), Box<dyn std::error::Error>> {
    let path = Path::new(STATE_FILE);
    let mut snap = load_snapshot(path)?;

    let input = TickInput::from_selection_count(selection_count);
    let frame = tick(&mut snap.state, &input);

    let sink = DirectorySink::new(".");
    let mut chain = SwapChain::new();
    let live = chain.present(&mut snap.state, &frame);
    sink.write_surface(chain.surface(live))?;

    // the outer script flips the viewer to whichever buffer we name
    println!("{}", DirectorySink::buffer_name(live));
    save_snapshot(path, &snap)?;
    Ok(())
}

fn sleep_command() -> Result<(), Box<dyn std::error::Error>> {
    let path = Path::new(STATE_FILE);
    let mut snap = load_snapshot(path)?;

    if let Some(start) = snap.tick_start_ms {
        let spent = Duration::from_millis(now_ms().saturating_sub(start));
        let target = Duration::from_secs(1) / TARGET_FPS;
        log::info!("frametime: {:.3}s", spent.as_secs_f64());
        if let Some(remaining) = target.checked_sub(spent) {
            thread::sleep(remaining);
        }
    }

    snap.tick_start_ms = Some(now_ms());
    save_snapshot(path, &snap)?;

    println!("{}", PaceSignal::for_state(&snap.state));
    Ok(())
}

fn usage() -> ExitCode {
    eprintln!("usage: foldy-bird <init | tick <selection_count> | sleep>");
    ExitCode::FAILURE
}

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let result = match args.get(1).map(String::as_str) {
        Some("init") => init_command(),
        Some("tick") => match args.get(2).and_then(|raw| raw.parse().ok()) {
            Some(count) => tick_command(count),
            None => return usage(),
        },
        Some("sleep") => sleep_command(),
        _ => return usage(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            eprintln!("foldy-bird: {err}");
            ExitCode::FAILURE
        }
    }
}
