mod obstacles;

use anyhow::{Context, Result};
use boidsim_core::spawn::spawn_flock;
use boidsim_core::{Flock, FlockConfig, NeighborIndexKind, OpenField};
use clap::{Parser, Subcommand};
use obstacles::{Circle, CircleField};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

const WARMUP_STEPS: usize = 10;
const BENCHMARK_STEPS: usize = 200;
const SAMPLE_EVERY: usize = 100;

#[derive(Parser)]
#[command(name = "boidsim")]
#[command(about = "Flocking Simulation CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single simulation from a scene file
    Run {
        /// Path to scene file (JSON)
        #[arg(long)]
        config: PathBuf,

        /// Output directory for results (optional)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Number of simulation steps to run (default: 10000)
        #[arg(long, default_value_t = 10000)]
        steps: usize,
    },
    /// Run the performance benchmark suite
    Benchmark,
    /// Dump the default scene to stdout
    DumpDefaultConfig,
}

/// A flock configuration plus the static obstacles it flies among.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct SceneConfig {
    flock: FlockConfig,
    obstacles: Vec<Circle>,
}

fn load_scene(path: &PathBuf) -> Result<SceneConfig> {
    let file = File::open(path).context("failed to open scene file")?;
    let reader = BufReader::new(file);
    let scene: SceneConfig = serde_json::from_reader(reader).context("failed to parse scene")?;
    scene.flock.validate().context("Scene validation error")?;
    Ok(scene)
}

fn run_benchmark(num_boids: usize, seed: u64, neighbor_index: NeighborIndexKind) -> Result<()> {
    let config = FlockConfig {
        num_boids,
        seed,
        neighbor_index,
        ..FlockConfig::default()
    };
    config
        .validate()
        .context("Benchmark config validation error")?;

    let boids = spawn_flock(&config);
    let mut flock = Flock::new(boids, config).context("Failed to initialize flock")?;

    // Warmup
    for _ in 0..WARMUP_STEPS {
        flock.step(&OpenField);
    }

    // Benchmark
    let mut total_spatial = 0u64;
    let mut total_force = 0u64;
    let mut total_integrate = 0u64;
    let mut total_time = 0u64;

    for _ in 0..BENCHMARK_STEPS {
        let timings = flock.step(&OpenField);
        total_spatial += timings.spatial_build_us;
        total_force += timings.force_us;
        total_integrate += timings.integrate_us;
        total_time += timings.total_us;
    }

    let avg_step_us = total_time as f64 / BENCHMARK_STEPS as f64;
    let steps_per_sec = 1_000_000.0 / avg_step_us;

    println!("--- {num_boids} boids ---");
    println!("  Avg step:      {avg_step_us:.0} us ({steps_per_sec:.1} steps/sec)");
    println!(
        "  Breakdown:     spatial={:.0} us, force={:.0} us, integrate={:.0} us",
        total_spatial as f64 / BENCHMARK_STEPS as f64,
        total_force as f64 / BENCHMARK_STEPS as f64,
        total_integrate as f64 / BENCHMARK_STEPS as f64,
    );

    let metrics = flock.step_metrics();
    println!(
        "  Flock state:   polarization={:.2}, mean speed={:.2}",
        metrics.polarization, metrics.mean_speed
    );
    println!();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::DumpDefaultConfig => {
            let scene = SceneConfig::default();
            println!("{}", serde_json::to_string_pretty(&scene)?);
        }
        Commands::Benchmark => {
            if cfg!(debug_assertions) {
                eprintln!("WARNING: running in debug mode. Results are not representative.");
                eprintln!("         Use: cargo run -p boidsim-cli --release -- benchmark");
                eprintln!();
            }
            println!("=== Flocking Benchmark ===");
            println!("Warmup: {WARMUP_STEPS} steps, Benchmark: {BENCHMARK_STEPS} steps");
            println!();

            let populations = [256, 1024, 4096, 16384];
            let indexes = [NeighborIndexKind::Exhaustive, NeighborIndexKind::RTree];
            for index in indexes {
                println!("=== Neighbor index: {:?} ===", index);
                for num_boids in populations {
                    run_benchmark(num_boids, 42, index)?;
                }
            }
        }
        Commands::Run { config, out, steps } => {
            let scene = load_scene(&config)?;

            println!("Loaded scene from {:?}", config);
            println!("Simulating {} boids for {} steps...", scene.flock.num_boids, steps);

            let boids = spawn_flock(&scene.flock);
            let obstacles =
                CircleField::new(scene.obstacles, scene.flock.collision_radius);
            let mut flock =
                Flock::new(boids, scene.flock).context("Failed to initialize flock")?;

            let summary = flock
                .try_run_experiment(steps, SAMPLE_EVERY, &obstacles)
                .context("Experiment failed")?;

            if let Some(out_dir) = out {
                std::fs::create_dir_all(&out_dir).context("failed to create output directory")?;
                let summary_path = out_dir.join("summary.json");
                let file = File::create(summary_path).context("failed to create summary file")?;
                serde_json::to_writer_pretty(file, &summary).context("failed to write summary")?;
                println!("Run complete. Results saved to {:?}", out_dir);
            } else if let Some(last) = summary.samples.last() {
                println!(
                    "Run complete. polarization={:.2}, mean speed={:.2}",
                    last.polarization, last.mean_speed
                );
            } else {
                println!("Run complete.");
            }
        }
    }
    Ok(())
}
