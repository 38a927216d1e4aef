//! # Toroid Life - headless runner
//!
//! Seeds a grid, runs it for a number of generations through the frame-paced
//! simulation manager, presents the result and writes it out as a TGA image.
//!
//! ## Usage
//!
//! ```text
//! toroid-life [--width N] [--height N] [--seed N] [--generations N]
//!             [--frames-per-generation N] [--output PATH]
//! ```
//!
//! Set `RUST_LOG=info` (or `debug` for per-generation output) to see progress.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use toroid_life::{GpuContext, LifeConfig, LifeSimulation, SimulationManager};

#[derive(Debug, Clone, PartialEq, Eq)]
struct RunOptions {
    config: LifeConfig,
    generations: u64,
    output: PathBuf,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            config: LifeConfig::default(),
            generations: 100,
            output: PathBuf::from("life.tga"),
        }
    }
}

impl RunOptions {
    fn parse<I: IntoIterator<Item = String>>(args: I) -> Result<Self> {
        let mut options = Self::default();
        let mut args = args.into_iter();

        while let Some(flag) = args.next() {
            let mut value = || {
                args.next()
                    .with_context(|| format!("missing value for {}", flag))
            };
            match flag.as_str() {
                "--width" => options.config.width = parse_number(&flag, value()?)?,
                "--height" => options.config.height = parse_number(&flag, value()?)?,
                "--seed" => options.config.seed_half_width = parse_number(&flag, value()?)?,
                "--frames-per-generation" => {
                    options.config.frames_per_generation = parse_number(&flag, value()?)?
                }
                "--generations" => options.generations = parse_number(&flag, value()?)?,
                "--output" => options.output = PathBuf::from(value()?),
                other => bail!("unknown option '{}'", other),
            }
        }

        Ok(options)
    }
}

fn parse_number<T: std::str::FromStr>(flag: &str, value: String) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .parse()
        .with_context(|| format!("invalid value '{}' for {}", value, flag))
}

fn run(options: RunOptions) -> Result<()> {
    let gpu = GpuContext::headless().context("failed to set up a GPU device")?;
    let (device, queue) = (gpu.device(), gpu.queue());

    let simulation =
        LifeSimulation::new(device, options.config).context("failed to allocate the grid")?;

    let mut manager = SimulationManager::new();
    manager
        .attach_simulation(simulation, device, queue)
        .context("failed to initialize the grid")?;

    while manager.generation() < options.generations {
        manager.update(device, queue).context("failed to advance")?;
    }

    let simulation = manager
        .detach_simulation()
        .context("simulation detached unexpectedly")?;
    let live = simulation.live_cells(device, queue)?;
    log::info!(
        "Generation {} after {} frames: {} live cells",
        simulation.generation(),
        manager.frames(),
        live
    );

    simulation
        .save_snapshot(device, queue, &options.output)
        .with_context(|| format!("failed to write {}", options.output.display()))?;

    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let options = RunOptions::parse(std::env::args().skip(1))?;
    log::info!(
        "Running {} generations on a {} grid",
        options.generations,
        options.config.grid()
    );

    run(options)
}
