//! Headless CLI runner for the citysim tick engine.
//!
//! Builds a small demo city (or loads a config/behavior set from disk),
//! drives it for `--ticks` phases, and writes CSV output alongside an
//! optional weekly digest on stderr.

mod demo_behaviors;
mod demo_world;

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use cs_behavior::BehaviorRegistry;
use cs_core::{Config, Phase};
use cs_econ::WeeklyOutcome;
use cs_output::{CsvWriter, OutputWriter, SimOutputObserver};
use cs_sim::{SimBuilder, SimObserver};
use cs_world::{OrgId, World};
use tracing::info;

/// Run the citysim tick engine headlessly and write CSV output.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Number of phases to simulate.
    #[arg(long, default_value_t = 1000)]
    ticks: u32,

    /// Deterministic seed for every RNG stream. Defaults to a value
    /// derived from wall-clock time, so unseeded runs still vary but a
    /// fixed seed reproduces exactly.
    #[arg(long)]
    seed: Option<u64>,

    /// Print a one-line digest to stderr at the end of every weekly cycle.
    #[arg(long)]
    verbose: bool,

    /// Directory to write activity_log.csv / transactions.csv / metrics.csv into.
    #[arg(long, default_value = "./output")]
    output: PathBuf,

    /// Optional path to a JSON `Config` document. Defaults to a built-in
    /// fixture sized for the demo city.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Optional path to a JSON array of behavior definitions. Defaults to
    /// a small built-in set (housing, employment, hunger, rest, commerce).
    #[arg(long)]
    behaviors: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::try_new(filter).unwrap())
        .init();

    let config = match &cli.config {
        Some(path) => Config::from_path(path).with_context(|| format!("loading config from {}", path.display()))?,
        None => demo_world::demo_config(),
    };
    config.validate().context("configuration failed validation")?;

    let behaviors = match &cli.behaviors {
        Some(path) => {
            let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
            BehaviorRegistry::from_json(&text).context("parsing behavior definitions")?
        }
        None => BehaviorRegistry::from_defs(demo_behaviors::default_defs()).expect("built-in behaviors are well-formed"),
    };

    let seed = cli.seed.unwrap_or_else(default_seed);
    info!(seed, ticks = cli.ticks, "starting simulation");

    let (world, interner) = demo_world::build();
    let population = world.agents.len();

    let mut sim = SimBuilder::new(config, world, interner)
        .behaviors(behaviors)
        .seed(seed)
        .build()
        .context("initial world snapshot failed validation")?;

    std::fs::create_dir_all(&cli.output).with_context(|| format!("creating output directory {}", cli.output.display()))?;
    let writer = CsvWriter::new(&cli.output).context("opening CSV output files")?;
    let mut observer = DigestObserver::new(SimOutputObserver::new(writer), cli.verbose);

    let initial_wallets = sim.total_wallets();
    sim.run_ticks(cli.ticks, &mut observer);

    if let Some(err) = observer.take_error() {
        anyhow::bail!("output write failed: {err}");
    }
    if let Some(drift) = sim.check_money_conservation(initial_wallets) {
        tracing::warn!(drift, "money conservation drifted outside tolerance");
    }

    let alive = sim.world.agents.iter().filter(|a| a.is_alive()).count();
    println!("ran {} phases, seed {seed}", cli.ticks);
    println!("population: {population} initial, {alive} alive at phase {}", sim.current_phase().0);
    println!("transactions recorded: {}", sim.world.transactions.len());
    println!("output written to {}", cli.output.display());

    Ok(())
}

fn default_seed() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_nanos() as u64).unwrap_or(0)
}

/// Wraps a [`SimOutputObserver`] to additionally log a weekly digest when
/// `--verbose` is set, mirroring the CSV writes without touching them.
struct DigestObserver<W: OutputWriter> {
    inner: SimOutputObserver<W>,
    verbose: bool,
    weeks_seen: u32,
}

impl<W: OutputWriter> DigestObserver<W> {
    fn new(inner: SimOutputObserver<W>, verbose: bool) -> Self {
        Self { inner, verbose, weeks_seen: 0 }
    }

    fn take_error(&mut self) -> Option<cs_output::OutputError> {
        self.inner.take_error()
    }
}

impl<W: OutputWriter> SimObserver for DigestObserver<W> {
    fn on_phase_start(&mut self, phase: Phase, world: &World) {
        self.inner.on_phase_start(phase, world);
    }

    fn on_phase_end(&mut self, phase: Phase, world: &World) {
        self.inner.on_phase_end(phase, world);
    }

    fn on_death(&mut self, phase: Phase, agent: cs_world::AgentId, world: &World) {
        self.inner.on_death(phase, agent, world);
    }

    fn on_org_dissolved(&mut self, phase: Phase, org: OrgId, reason: &str) {
        self.inner.on_org_dissolved(phase, org, reason);
    }

    fn on_weekly_cycle(&mut self, phase: Phase, org: OrgId, outcome: &WeeklyOutcome) {
        self.inner.on_weekly_cycle(phase, org, outcome);
        if self.verbose {
            self.weeks_seen += 1;
            info!(
                week = self.weeks_seen,
                phase = phase.0,
                org = org.0,
                salaries_paid = outcome.salaries_paid,
                released = outcome.employees_released,
                dividend_paid = outcome.dividend_paid,
                evictions = outcome.evictions,
                "weekly cycle"
            );
        }
    }

    fn on_immigrant(&mut self, phase: Phase, agent: cs_world::AgentId) {
        self.inner.on_immigrant(phase, agent);
    }

    fn on_sim_end(&mut self, final_phase: Phase, world: &World) {
        self.inner.on_sim_end(final_phase, world);
    }
}
