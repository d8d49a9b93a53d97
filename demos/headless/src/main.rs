//! headless — run one Tjostball match without a renderer.
//!
//! Loads a `MatchConfig` (JSON, missing fields take their defaults), runs the
//! match with the FSM behavior, optionally records the run, and prints the
//! match statistics.  SQLite and Parquet recording need the `sqlite` and
//! `parquet` features.
//!
//! ```text
//! cargo run -p headless -- --ticks 3000 --seed 7 --output ./out
//! RUST_LOG=tj_physics=debug cargo run -p headless
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;

use tj_behavior::FsmBehavior;
use tj_core::{MatchConfig, Team, Tick};
use tj_output::{CsvWriter, OutputWriter, SimOutputObserver};
use tj_sim::{MatchStatistics, SimBuilder, SimObserver, TickOutcome, World};

/// Run one headless Tjostball match.
#[derive(Parser, Debug)]
#[command(name = "headless")]
#[command(version, about, long_about = None)]
struct Args {
    /// Match configuration (JSON).  Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the tick budget.
    #[arg(short, long)]
    ticks: Option<u64>,

    /// Override the RNG seed.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Directory to record agent snapshots and tick summaries into.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Recording backend.
    #[arg(short, long, value_enum, default_value_t = Format::Csv)]
    format: Format,

    /// Log a progress line every N ticks (0 disables).
    #[arg(long, default_value = "100")]
    progress: u64,

    /// Print the final statistics as JSON instead of a table.
    #[arg(long)]
    json: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Csv,
    Sqlite,
    Parquet,
}

fn open_writer(format: Format, dir: &Path) -> Result<Box<dyn OutputWriter>> {
    let writer: Box<dyn OutputWriter> = match format {
        Format::Csv => Box::new(CsvWriter::new(dir)?),
        #[cfg(feature = "sqlite")]
        Format::Sqlite => Box::new(tj_output::SqliteWriter::new(dir)?),
        #[cfg(feature = "parquet")]
        Format::Parquet => Box::new(tj_output::ParquetWriter::new(dir)?),
        #[allow(unreachable_patterns)]
        other => anyhow::bail!("{other:?} output is not compiled in; rebuild with its feature"),
    };
    Ok(writer)
}

// ── Observer ──────────────────────────────────────────────────────────────────

/// Progress logging plus an optional recorder.
struct Runner<W: OutputWriter> {
    recorder: Option<SimOutputObserver<W>>,
    progress: u64,
}

impl<W: OutputWriter> SimObserver for Runner<W> {
    fn on_tick_start(&mut self, tick: Tick) {
        if let Some(r) = self.recorder.as_mut() {
            r.on_tick_start(tick);
        }
    }

    fn on_tick_end(&mut self, outcome: &TickOutcome) {
        if let Some(r) = self.recorder.as_mut() {
            r.on_tick_end(outcome);
        }
    }

    fn on_snapshot(&mut self, world: &World) {
        if let Some(r) = self.recorder.as_mut() {
            r.on_snapshot(world);
        }
        if self.progress > 0 && world.tick().0.is_multiple_of(self.progress) {
            let (min, sec) = world.clock.elapsed_ms();
            info!(
                tick = %world.tick(),
                clock = %format!("{min:02}:{sec:04.1}"),
                possessor = ?world.ball.possessor,
                "progress"
            );
        }
    }

    fn on_sim_end(&mut self, world: &World) {
        if let Some(r) = self.recorder.as_mut() {
            r.on_sim_end(world);
        }
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str::<MatchConfig>(&text)
                .with_context(|| format!("parsing {}", path.display()))?
        }
        None => MatchConfig::default(),
    };
    if let Some(ticks) = args.ticks {
        config.total_ticks = ticks;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    // Progress lines ride on the snapshot hook.
    if args.progress > 0 && config.output_interval_ticks == 0 {
        config.output_interval_ticks = args.progress;
    }

    let recorder = match &args.output {
        Some(dir) => {
            fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
            Some(SimOutputObserver::new(open_writer(args.format, dir)?))
        }
        None => None,
    };

    let mut sim = SimBuilder::new(config, FsmBehavior).build()?;
    info!(
        agents = sim.world.agents.count,
        ticks = sim.world.config.total_ticks,
        seed = sim.world.config.seed,
        "match configured"
    );

    let mut runner = Runner { recorder, progress: args.progress };
    let started = Instant::now();
    sim.run(&mut runner)?;
    let wall = started.elapsed();

    if let Some(mut recorder) = runner.recorder.take() {
        if let Some(e) = recorder.take_error() {
            return Err(e).context("writing match output");
        }
    }

    let stats = sim.statistics();
    if args.json {
        println!("{}", serde_json::to_string_pretty(stats)?);
    } else {
        print_summary(stats, sim.world.clock.elapsed_secs());
    }
    info!(wall_ms = wall.as_millis() as u64, "done");
    Ok(())
}

fn print_summary(stats: &MatchStatistics, match_secs: f64) {
    println!("=== Tjostball — headless match ===");
    println!("Ticks: {}  |  Match time: {match_secs:.1} s", stats.ticks);
    println!();
    for team in Team::ALL {
        println!(
            "{:<5} possession {:>5.1}%  ({:.1} s)",
            team.as_str(),
            stats.possession_share(team) * 100.0,
            stats.possession_secs[team.index()],
        );
    }
    println!("Loose ball ticks:   {}", stats.free_ball_ticks);
    println!("Possession changes: {}", stats.possession_changes);
    println!("Strips / releases:  {} / {}", stats.strips, stats.releases);
    println!("Total distance:     {:.1}", stats.total_distance());
}
