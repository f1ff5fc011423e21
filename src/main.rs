//! Command-line front end for scan planning.
//!
//! ```text
//! xafs_plan check scan.ini
//! xafs_plan grid scan.ini --e0 8979
//! xafs_plan plan scan.ini --crystal 311 --json
//! ```

use std::path::PathBuf;
use std::process;

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;

use xafs_plan::mono::{Crystal, DoubleCrystalMono};
use xafs_plan::parameters::{self, Overrides, ScanParameters};
use xafs_plan::{grid, logging, validate, ScanError, ScanPlan};

#[derive(Parser, Debug)]
#[command(name = "xafs_plan", version, about = "Plan XAFS step scans from INI files")]
struct Cli {
    /// Default log level when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve parameters and report required keys missing from the file
    Check(ScanArgs),
    /// Print the energy and dwell-time grid
    Grid(ScanArgs),
    /// Print the full plan summary
    Plan {
        #[command(flatten)]
        scan: ScanArgs,
        /// Monochromator crystal used for the channel-cut estimate (111 or 311)
        #[arg(long, default_value = "111")]
        crystal: Crystal,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug)]
struct ScanArgs {
    /// INI file with a [scan] section
    inifile: PathBuf,
    #[arg(long)]
    e0: Option<f64>,
    #[arg(long)]
    element: Option<String>,
    #[arg(long)]
    edge: Option<String>,
    #[arg(long)]
    folder: Option<String>,
    #[arg(long)]
    filename: Option<String>,
    #[arg(long)]
    start: Option<u32>,
    #[arg(long)]
    nscans: Option<u32>,
    #[arg(long)]
    mode: Option<String>,
}

impl ScanArgs {
    fn overrides(&self) -> Overrides {
        Overrides {
            e0: self.e0,
            element: self.element.clone(),
            edge: self.edge.clone(),
            folder: self.folder.clone(),
            filename: self.filename.clone(),
            start: self.start,
            nscans: self.nscans,
            mode: self.mode.clone(),
            ..Overrides::default()
        }
    }
}

fn check(args: &ScanArgs) -> Result<()> {
    let (_, provenance) =
        parameters::resolve(&args.inifile, &args.overrides(), &ScanParameters::default())?;
    let (ok, missing) = validate::check_required(&provenance);
    if ok {
        println!("{}: all required keywords present", args.inifile.display());
        return Ok(());
    }
    Err(ScanError::MissingRequiredParameters(missing).into())
}

fn print_grid(args: &ScanArgs) -> Result<()> {
    let (params, provenance) =
        parameters::resolve(&args.inifile, &args.overrides(), &ScanParameters::default())?;
    validate::require_from_file(&provenance)?;
    let grid = grid::compile(&params.bounds, &params.steps, &params.times, params.e0)
        .context("compiling energy grid")?;

    println!("# energy(eV)  dwell(s)");
    for (energy, dwell) in grid.points() {
        println!("{energy:>11.2}  {dwell:>8.2}");
    }
    println!("# {} points, approximately {:.1} minutes", grid.len(), grid.approx_minutes);
    Ok(())
}

fn plan(args: &ScanArgs, crystal: Crystal, json: bool) -> Result<()> {
    let mono = DoubleCrystalMono::new(crystal);
    let plan = ScanPlan::prepare(&args.inifile, &args.overrides(), &mono)?;
    info!(crystal = %crystal, "Using ideal Bragg geometry for channel-cut estimate");

    if json {
        let repetitions: Vec<_> = plan.repetitions().collect();
        let doc = serde_json::json!({
            "plan": &plan,
            "crystal": crystal.to_string(),
            "repetitions": repetitions,
            "total_minutes": plan.total_minutes(),
        });
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        println!("{plan}");
    }
    plan.ensure_outputs_available()?;
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    logging::init(&cli.log_level).map_err(|e| anyhow!(e))?;
    match &cli.command {
        Commands::Check(args) => check(args),
        Commands::Grid(args) => print_grid(args),
        Commands::Plan {
            scan,
            crystal,
            json,
        } => plan(scan, *crystal, *json),
    }
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
