use std::{
    thread,
    time::{Duration, Instant},
};

use glyphlife::{
    Engine, Playback, PositionEncoder, Result, RunLengthEncoded, Sequence, Tick, TickHandle,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod console;
mod options;
mod stats;

use console::{ConsoleCommand, ConsoleRender};
use stats::{PlaybackRecorder, SwitchRecorder};

/// How often the console checks for keys while nothing is scheduled
const IDLE_POLL: Duration = Duration::from_millis(50);

type Stats = PlaybackRecorder<SwitchRecorder>;

fn build_engine(args: &options::Args) -> Result<Engine> {
    let config = args.config()?;
    if let Some(file_name) = args.target_file() {
        let encoded = std::fs::read_to_string(file_name)?;
        let alive = RunLengthEncoded::default().decode(&encoded)?;
        return Engine::with_pattern(config, alive);
    }
    match args.message() {
        Some(message) => Engine::with_message(config, message),
        None => Engine::new(config),
    }
}

fn generate(engine: &Engine, parallel: bool) -> Sequence {
    if parallel {
        engine.generate_states_parallel()
    } else {
        engine.generate_states()
    }
}

/// Regenerates the animation for a `cols` x `rows` terminal
///
/// Returns `false`, leaving everything as it was, when the size is unchanged
/// or too small to hold a grid. Otherwise playback is stopped on the first
/// frame of the new sequence and every earlier handle is stale.
fn resize(
    engine: &mut Engine,
    playback: &mut Playback,
    parallel: bool,
    cols: u16,
    rows: u16,
) -> bool {
    let update = options::console_size(cols, rows);
    let config = engine.config();
    if update.width == Some(config.width) && update.height == Some(config.height) {
        return false;
    }
    if engine.update_config(update).is_err() {
        return false;
    }
    let config = *engine.config();
    info!(width = config.width, height = config.height, "terminal resized, regenerating");
    playback.replace_sequence(generate(engine, parallel), config.frame_interval());
    true
}

fn advance(playback: &mut Playback, handle: TickHandle) -> Option<TickHandle> {
    match playback.tick(handle) {
        Tick::Scheduled(next) => Some(next),
        Tick::Completed | Tick::Stale => None,
    }
}

/// A tick handle together with the moment it becomes due
fn due(handle: Option<TickHandle>) -> Option<(TickHandle, Instant)> {
    handle.map(|handle| (handle, Instant::now() + handle.delay()))
}

/// Plays in the terminal until the user exits
fn run_console(
    args: &options::Args,
    engine: &mut Engine,
    playback: &mut Playback,
    stats: &mut Stats,
) -> Result<()> {
    let mut console = ConsoleRender::new()?;
    let mut pending = due(playback.start());
    let mut redraw = true;
    loop {
        // only a new frame index is recorded; pans and resizes just redraw
        if let Some(report) = stats.observe(playback) {
            console.set_report(report);
            redraw = true;
        }
        if redraw {
            if let Some(frame) = playback.current_frame() {
                console.render(&frame.grid)?;
            }
            redraw = false;
        }

        // waiting on keys doubles as the timer for the next step
        let timeout = pending.map_or(IDLE_POLL, |(_, at)| {
            at.saturating_duration_since(Instant::now())
        });
        match console.poll_events(timeout)? {
            Some(ConsoleCommand::Exit) => break,
            Some(ConsoleCommand::Start) => {
                if let Some(next) = due(playback.start()) {
                    pending = Some(next);
                }
            }
            Some(ConsoleCommand::Stop) => {
                playback.stop();
                pending = None;
            }
            Some(ConsoleCommand::Reset) => {
                playback.reset();
                pending = None;
            }
            Some(ConsoleCommand::Resize(cols, rows)) => {
                if args.follows_terminal()
                    && resize(engine, playback, args.multithreading(), cols, rows)
                {
                    stats.restart();
                    pending = due(playback.start());
                }
                redraw = true;
            }
            Some(ConsoleCommand::Handled) => redraw = true,
            None => {}
        }

        if let Some((handle, at)) = pending {
            if Instant::now() >= at {
                pending = due(advance(playback, handle));
            }
        }
    }
    Ok(())
}

/// Plays without drawing, reporting every frame and printing the final grid
fn run_headless(playback: &mut Playback, stats: &mut Stats) {
    let mut pending = playback.start();
    while let Some(handle) = pending {
        if let Some(report) = stats.observe(playback) {
            println!("{report}");
        }
        thread::sleep(handle.delay());
        pending = advance(playback, handle);
    }
    if let Some(frame) = playback.current_frame() {
        println!("{}", frame.grid);
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let Some(args) = options::Args::from_env()? else {
        return Ok(());
    };

    let mut engine = build_engine(&args)?;
    let config = *engine.config();
    info!(
        width = config.width,
        height = config.height,
        generations = config.generation_count,
        "generating states"
    );
    let sequence = generate(&engine, args.multithreading());

    if let Some(file_name) = args.output_file() {
        if let Some(seed) = sequence.first() {
            let encoder = RunLengthEncoded::default().set_name("glyphlife seed pattern");
            std::fs::write(&file_name, encoder.encode(&seed.grid))?;
            info!(file = %file_name, "wrote seed pattern");
        }
    }

    let mut stats = PlaybackRecorder::new(SwitchRecorder::new(args.stats_file().is_some()));
    let mut playback = Playback::new(sequence, config.frame_interval());
    if args.console() {
        run_console(&args, &mut engine, &mut playback, &mut stats)?;
    } else {
        run_headless(&mut playback, &mut stats);
    }

    if let Some(file_name) = args.stats_file() {
        stats.recorder().save(&file_name)?;
        info!(file = %file_name, "wrote stats");
    }

    Ok(())
}
