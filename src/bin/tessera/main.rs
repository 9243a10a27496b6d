//! Tessera CLI - randomized grid UV packing from the command line.
//!
//! Usage: tessera <COMMAND> [OPTIONS] <INPUT> [OUTPUT]
//!
//! Run `tessera --help` for available commands.

use std::path::PathBuf;
use std::time::Instant;

use clap::{Args, Parser, Subcommand};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use tessera::algo::pack::{pack_with_layout, FrameKind, PackOptions, PackOutput};
use tessera::io::{self, UvFile};

#[derive(Parser)]
#[command(name = "tessera")]
#[command(author, version, about = "Randomized grid UV packing", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pack the polygons of a job file and write their UVs
    Pack {
        /// Input job file (JSON)
        input: PathBuf,

        /// Output UV file (JSON)
        output: PathBuf,

        #[command(flatten)]
        grid: GridArgs,
    },

    /// Show where each polygon of a job file would be placed
    Layout {
        /// Input job file (JSON)
        input: PathBuf,

        #[command(flatten)]
        grid: GridArgs,
    },
}

/// Flags that override the job file's options.
#[derive(Args)]
struct GridArgs {
    /// Random seed (drawn from entropy if omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Grid rows
    #[arg(long)]
    rows: Option<usize>,

    /// Grid columns
    #[arg(long)]
    cols: Option<usize>,

    /// Cell edge length in UV space
    #[arg(long)]
    scale_uv: Option<f64>,

    /// Fraction of each cell kept as margin
    #[arg(long)]
    cell_padding: Option<f64>,

    /// Fraction of each sub-cell kept as margin
    #[arg(long)]
    subcell_padding: Option<f64>,

    /// Use single-threaded execution (for benchmarking)
    #[arg(long)]
    sequential: bool,
}

impl GridArgs {
    fn apply(&self, mut options: PackOptions) -> PackOptions {
        if let Some(rows) = self.rows {
            options.rows = rows;
        }
        if let Some(cols) = self.cols {
            options.cols = cols;
        }
        if let Some(scale) = self.scale_uv {
            options.scale_uv = scale;
        }
        if let Some(padding) = self.cell_padding {
            options.cell_padding = padding;
        }
        if let Some(padding) = self.subcell_padding {
            options.subcell_padding = padding;
        }
        if self.sequential {
            options.parallel = false;
        }
        options
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Pack {
            input,
            output,
            grid,
        } => {
            cmd_pack(&input, &output, &grid)?;
        }

        Commands::Layout { input, grid } => {
            cmd_layout(&input, &grid)?;
        }
    }

    Ok(())
}

/// Load the job, merge flags over its options, and pack it.
fn load_and_pack(
    input: &PathBuf,
    grid: &GridArgs,
) -> Result<(u64, PackOptions, PackOutput), Box<dyn std::error::Error>> {
    let job = io::load_job(input)?;
    let options = grid.apply(job.options.clone());
    let polygons = job.to_polygons();

    let seed = grid.seed.unwrap_or_else(rand::random);
    log::info!("packing {} polygons with seed {}", polygons.len(), seed);

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let output = pack_with_layout(&polygons, &options, &mut rng)?;
    Ok((seed, options, output))
}

fn cmd_pack(
    input: &PathBuf,
    output: &PathBuf,
    grid: &GridArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let start = Instant::now();
    let (seed, options, packed) = load_and_pack(input, grid)?;
    let elapsed = start.elapsed();

    println!(
        "Packed: {} polygons, {} loops into {} of {} cells (seed {})",
        packed.placements.len(),
        packed.uvs.len(),
        packed.occupied_cells(),
        options.num_cells(),
        seed
    );
    if let Some((min, max)) = packed.uvs.bounding_box() {
        println!(
            "UV bounds: ({:.4}, {:.4}) to ({:.4}, {:.4})",
            min.x, min.y, max.x, max.y
        );
    }

    io::save_uvs(&UvFile::new(Some(seed), &packed.uvs), output)?;
    println!("Saved: {} ({:.2?})", output.display(), elapsed);

    Ok(())
}

fn cmd_layout(input: &PathBuf, grid: &GridArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (seed, options, packed) = load_and_pack(input, grid)?;

    println!("Seed: {}", seed);
    println!(
        "Grid: {} x {} cells of {:.4} (padding {:.3} / {:.3})",
        options.rows, options.cols, options.scale_uv, options.cell_padding, options.subcell_padding
    );
    println!();

    for p in &packed.placements {
        let tag = if p.frame == FrameKind::TopDown {
            "  [top-down]"
        } else {
            ""
        };
        println!(
            "polygon {:>4}: cell ({}, {}) slot ({}, {}) of {}x{}  \
             origin ({:.4}, {:.4})  size {:.4} x {:.4}{}",
            p.polygon,
            p.slot.cell.0,
            p.slot.cell.1,
            p.slot.slot.0,
            p.slot.slot.1,
            p.slot.subdiv,
            p.slot.subdiv,
            p.slot.origin.x,
            p.slot.origin.y,
            p.footprint.x,
            p.footprint.y,
            tag
        );
    }

    // Occupancy, top row first so it reads like UV space.
    let mut counts = vec![0usize; options.num_cells()];
    for p in &packed.placements {
        counts[p.slot.cell.0 * options.cols + p.slot.cell.1] += 1;
    }
    println!();
    println!("Occupancy ({} of {} cells used):", packed.occupied_cells(), counts.len());
    for row in (0..options.rows).rev() {
        let line: Vec<String> = (0..options.cols)
            .map(|col| match counts[row * options.cols + col] {
                0 => "  .".to_string(),
                n => format!("{:>3}", n),
            })
            .collect();
        println!("{}", line.join(""));
    }

    Ok(())
}
