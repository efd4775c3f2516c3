#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that drives the Pursuit Maze simulation.
//!
//! The binary owns the tick loop: it boots a world from a scenario, ticks it
//! at its own cadence and prints text frames to stdout. Logs go to stderr and
//! honour `RUST_LOG`.

use std::{io, path::PathBuf, thread, time::Duration};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use pursuit_maze_core::{ActivationOrder, Command, Event};
use pursuit_maze_rendering::{Color, Presentation, Presenter, Scene, TextPresenter};
use pursuit_maze_system_bootstrap::{Bootstrap, Scenario};
use pursuit_maze_world::{self as world, query, World};
use tracing::{debug, info, trace};
use tracing_subscriber::EnvFilter;

const TITLE: &str = "Pursuit Maze";
/// Side length of the square canvas the maze is fitted into by default.
const CANVAS_SIZE: f32 = 450.0;

#[derive(Debug, Parser)]
#[command(name = "pursuit-maze", about = "Runs a pursuit maze scenario in the terminal")]
struct Args {
    /// Scenario file to load; the reference layout is used when omitted.
    #[arg(long)]
    scenario: Option<PathBuf>,
    /// Number of ticks to run; runs until every pursuer is idle when omitted.
    #[arg(long)]
    ticks: Option<u64>,
    /// Delay between ticks in milliseconds.
    #[arg(long, default_value_t = 0)]
    interval_ms: u64,
    /// Replaces the scenario's activation order with a shuffle seeded by this value.
    #[arg(long)]
    seed: Option<u64>,
    /// Render-space side length of one cell; fits the maze into a 450 unit canvas when omitted.
    #[arg(long)]
    cell_length: Option<f32>,
    /// Which frames to print.
    #[arg(long, value_enum, default_value_t = FrameMode::Every)]
    frames: FrameMode,
    /// Enables debug logging when RUST_LOG is unset.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum FrameMode {
    /// The initial frame and one frame after every tick.
    Every,
    /// Only the frame after the last tick.
    Final,
    /// No frames at all.
    None,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);
    run(&args)
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();
}

fn run(args: &Args) -> Result<()> {
    let mut scenario = match &args.scenario {
        Some(path) => Scenario::load(path)
            .with_context(|| format!("failed to load scenario {}", path.display()))?,
        None => Scenario::reference(),
    };
    if let Some(seed) = args.seed {
        scenario = scenario.with_activation(ActivationOrder::Shuffled { seed });
    }

    let mut launch = Bootstrap::default()
        .build(&scenario)
        .context("failed to bootstrap world")?;
    info!(
        pursuer = %launch.pursuer,
        target = %launch.target,
        route_length = launch.report.route_length,
        reachable_cells = launch.report.reachable_cells,
        obstacles = launch.report.obstacles,
        "simulation ready"
    );

    let (columns, rows) = query::grid(&launch.world).dimensions();
    let cell_length = args
        .cell_length
        .unwrap_or(CANVAS_SIZE / columns.max(rows) as f32);
    let interval = Duration::from_millis(args.interval_ms);
    let mut presenter = TextPresenter::new(io::stdout().lock());

    if args.frames == FrameMode::Every {
        present(&mut presenter, &launch.world, cell_length)?;
    }

    let mut events = Vec::new();
    let mut executed: u64 = 0;
    while keep_ticking(args.ticks, executed, &launch.world) {
        events.clear();
        world::apply(&mut launch.world, Command::Tick, &mut events);
        executed += 1;
        events.iter().for_each(log_event);

        if args.frames == FrameMode::Every {
            present(&mut presenter, &launch.world, cell_length)?;
        }
        if !interval.is_zero() {
            thread::sleep(interval);
        }
    }

    if args.frames == FrameMode::Final {
        present(&mut presenter, &launch.world, cell_length)?;
    }

    info!(
        ticks = executed,
        position = ?query::position(&launch.world, launch.pursuer),
        settled = query::is_settled(&launch.world),
        frames = presenter.frames(),
        "simulation finished"
    );
    Ok(())
}

fn keep_ticking(limit: Option<u64>, executed: u64, world: &World) -> bool {
    match limit {
        Some(limit) => executed < limit,
        None => !query::is_settled(world),
    }
}

fn present<P: Presenter>(presenter: &mut P, world: &World, cell_length: f32) -> Result<()> {
    let scene = Scene::capture(world, cell_length).context("failed to capture scene")?;
    presenter.present(&Presentation::new(TITLE, Color::from_rgb_u8(0, 0, 0), scene))
}

fn log_event(event: &Event) {
    match *event {
        Event::TimeAdvanced { tick } => trace!(tick, "tick"),
        Event::EntityPlaced { entity, kind, cell } => debug!(%entity, ?kind, %cell, "placed"),
        Event::PlacementRejected { kind, cell, reason } => {
            info!(?kind, %cell, %reason, "placement rejected");
        }
        Event::EntityMoved { entity, from, to } => debug!(%entity, %from, %to, "moved"),
        Event::MoveRejected { entity, to, reason } => {
            info!(%entity, %to, %reason, "move rejected");
        }
        Event::TargetReached {
            pursuer,
            target,
            cell,
        } => info!(%pursuer, %target, %cell, "target reached"),
        Event::PursuerIdle { entity, cell } => info!(%entity, %cell, "pursuer idle"),
    }
}
