mod layout;
mod render;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use firefly_core::{
    classify_grid, Coordinate, FireScenario, FireSimulation, GridShape, HazardMask, Marker,
    NeighbourCounting, Route, Router, SpreadParams,
};
use layout::BuildingLayout;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Evacuation routing and fire spread demo
#[derive(Parser, Debug)]
#[command(name = "firefly-demo")]
#[command(about = "Evacuation routing under a spreading building fire", long_about = None)]
struct Cli {
    /// Log at debug level unless RUST_LOG is set
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Route one occupant to the nearest target on a building layout
    Route(RouteArgs),
    /// Run the fire spread automaton on an empty grid
    Simulate(SimulateArgs),
    /// Spread fire over a layout and route occupants against one frame
    Evacuate(EvacuateArgs),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Target {
    Exit,
    MedKit,
    Extinguisher,
}

impl From<Target> for Marker {
    fn from(target: Target) -> Self {
        match target {
            Target::Exit => Marker::FireExit,
            Target::MedKit => Marker::MedKit,
            Target::Extinguisher => Marker::Extinguisher,
        }
    }
}

#[derive(Args, Debug)]
struct SpreadArgs {
    /// Exponent scale
    #[arg(long, default_value_t = 1.0)]
    alpha: f64,

    /// Outer-ring weight
    #[arg(long, default_value_t = 0.5)]
    beta: f64,

    /// Spread speed factor
    #[arg(long, default_value_t = 0.1)]
    gamma: f64,

    /// Frame budget including the unreturned initial state
    #[arg(long, default_value_t = 50)]
    steps: usize,

    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Count inner burning neighbours once instead of twice
    #[arg(long)]
    exclusive: bool,
}

impl SpreadArgs {
    fn params(&self) -> SpreadParams {
        let counting = if self.exclusive {
            NeighbourCounting::Exclusive
        } else {
            NeighbourCounting::Reference
        };
        SpreadParams::new(self.alpha, self.beta, self.gamma).with_counting(counting)
    }
}

#[derive(Args, Debug)]
struct RouteArgs {
    /// Building layout JSON
    #[arg(short, long)]
    layout: PathBuf,

    /// Starting cell as ROW,COL
    #[arg(short, long, value_parser = parse_coord)]
    entry: Coordinate,

    #[arg(short, long, value_enum, default_value_t = Target::Exit)]
    target: Target,

    /// Keep every cell instead of collapsing straight runs
    #[arg(long)]
    raw: bool,

    /// Print a map instead of JSON
    #[arg(long)]
    ascii: bool,
}

#[derive(Args, Debug)]
struct SimulateArgs {
    #[arg(long)]
    rows: usize,

    #[arg(long)]
    cols: usize,

    /// Ignition cell as ROW,COL
    #[arg(short, long, value_parser = parse_coord)]
    ignite: Coordinate,

    #[command(flatten)]
    spread: SpreadArgs,

    /// Print a map per frame instead of JSON
    #[arg(long)]
    ascii: bool,
}

#[derive(Args, Debug)]
struct EvacuateArgs {
    /// Building layout JSON
    #[arg(short, long)]
    layout: PathBuf,

    /// Occupant cell as ROW,COL; repeat for several occupants
    #[arg(short, long = "entry", value_parser = parse_coord, required = true)]
    entries: Vec<Coordinate>,

    #[arg(short, long, value_enum, default_value_t = Target::Exit)]
    target: Target,

    /// Ignition cell as ROW,COL
    #[arg(short, long, value_parser = parse_coord)]
    ignite: Coordinate,

    /// Zero-based frame to route against
    #[arg(short, long, default_value_t = 0)]
    frame: usize,

    #[command(flatten)]
    spread: SpreadArgs,

    #[arg(long)]
    raw: bool,

    #[arg(long)]
    ascii: bool,
}

fn parse_coord(s: &str) -> Result<Coordinate, String> {
    let (row, col) = s
        .split_once(',')
        .ok_or_else(|| format!("expected ROW,COL, got '{s}'"))?;
    let row = row
        .trim()
        .parse()
        .map_err(|e| format!("bad row '{row}': {e}"))?;
    let col = col
        .trim()
        .parse()
        .map_err(|e| format!("bad column '{col}': {e}"))?;
    Ok(Coordinate::new(row, col))
}

#[derive(Serialize)]
struct RouteReport {
    entry: Coordinate,
    target: Marker,
    #[serde(flatten)]
    route: Route,
}

#[derive(Serialize)]
struct SimulationReport<'a> {
    scenario: &'a FireScenario,
    frames: &'a [HazardMask],
}

#[derive(Serialize)]
struct EvacuationReport {
    frame: usize,
    burning: usize,
    occupants: Vec<OccupantReport>,
}

#[derive(Debug, PartialEq, Serialize)]
struct OccupantReport {
    entry: Coordinate,
    /// `None` when the occupant's own cell is burning.
    route: Option<Route>,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run_route(args: &RouteArgs) -> Result<()> {
    let layout = BuildingLayout::load(&args.layout)?;
    let plan = classify_grid(&layout.floor_map);
    let router = Router::default().with_simplify(!args.raw);
    let target = Marker::from(args.target);
    let route = router
        .route(&plan, target, args.entry, layout.fire.as_ref())
        .with_context(|| format!("routing from {} failed", args.entry))?;

    if args.ascii {
        print!(
            "{}",
            render::render(
                plan.grid.shape(),
                Some(&layout.floor_map),
                layout.fire.as_ref(),
                &route.cells
            )
        );
        if route.is_unreachable() {
            println!("no safe route to any {}", target.name());
        } else {
            println!("{} hops, {} waypoints", route.hops(), route.waypoints.len());
        }
        return Ok(());
    }
    print_json(&RouteReport {
        entry: args.entry,
        target,
        route,
    })
}

fn run_simulate(args: &SimulateArgs) -> Result<()> {
    let mut scenario = FireScenario::new(args.ignite, GridShape::new(args.rows, args.cols))
        .with_params(args.spread.params())
        .with_steps(args.spread.steps);
    scenario.seed = args.spread.seed;
    let frames = scenario.run().context("fire simulation failed")?;

    if args.ascii {
        for (i, frame) in frames.iter().enumerate() {
            println!("frame {i}: {} burning", frame.burning_count());
            print!("{}", render::render(scenario.shape, None, Some(frame), &[]));
        }
        return Ok(());
    }
    print_json(&SimulationReport {
        scenario: &scenario,
        frames: &frames,
    })
}

/// Burning mask at `args.frame`, simulated once for the whole evacuation.
fn evacuation_hazard(layout: &BuildingLayout, args: &EvacuateArgs) -> Result<HazardMask> {
    let shape = layout.floor_map.shape();
    let params = args.spread.params();
    if args.frame + 1 >= args.spread.steps {
        bail!(
            "frame {} is past the last frame of a {}-step run",
            args.frame,
            args.spread.steps
        );
    }

    let frames = match &layout.tti {
        Some(tti) => {
            let rng = match args.spread.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_os_rng(),
            };
            let mut sim = FireSimulation::with_tti(args.ignite, tti.clone(), params, rng)?;
            sim.run(args.frame + 1)
        }
        None => {
            let mut scenario = FireScenario::new(args.ignite, shape)
                .with_params(params)
                .with_steps(args.frame + 2);
            scenario.seed = args.spread.seed;
            scenario.run()?
        }
    };
    frames
        .into_iter()
        .nth(args.frame)
        .context("fire simulation returned too few frames")
}

/// Route every occupant against one shared hazard mask.
fn evacuate(layout: &BuildingLayout, args: &EvacuateArgs) -> Result<(HazardMask, Vec<OccupantReport>)> {
    let plan = classify_grid(&layout.floor_map);
    let hazard = evacuation_hazard(layout, args)?;
    let router = Router::default().with_simplify(!args.raw);
    let target = Marker::from(args.target);

    let mut occupants = Vec::with_capacity(args.entries.len());
    for &entry in &args.entries {
        let route = if hazard.is_burning(entry) {
            None
        } else {
            Some(
                router
                    .route(&plan, target, entry, Some(&hazard))
                    .with_context(|| format!("routing from {entry} failed"))?,
            )
        };
        occupants.push(OccupantReport { entry, route });
    }
    Ok((hazard, occupants))
}

fn run_evacuate(args: &EvacuateArgs) -> Result<()> {
    let layout = BuildingLayout::load(&args.layout)?;
    let shape = layout.floor_map.shape();
    let (hazard, occupants) = evacuate(&layout, args)?;
    info!(
        "Evacuated {} occupants against frame {} ({} cells burning)",
        occupants.len(),
        args.frame,
        hazard.burning_count()
    );

    if args.ascii {
        for occupant in &occupants {
            let cells = occupant.route.as_ref().map_or(&[][..], |r| &r.cells[..]);
            println!("occupant at {}", occupant.entry);
            print!(
                "{}",
                render::render(shape, Some(&layout.floor_map), Some(&hazard), cells)
            );
            match &occupant.route {
                None => println!("caught by fire"),
                Some(route) if route.is_unreachable() => println!("cut off"),
                Some(route) => println!("{} hops", route.hops()),
            }
        }
        return Ok(());
    }
    print_json(&EvacuationReport {
        frame: args.frame,
        burning: hazard.burning_count(),
        occupants,
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Command::Route(args) => run_route(args),
        Command::Simulate(args) => run_simulate(args),
        Command::Evacuate(args) => run_evacuate(args),
    }
}
