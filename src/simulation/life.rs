//! Conway's Game of Life with ping-pong cell images
//!
//! [`LifeSimulation`] owns both generation images, the display image and the
//! [`ActiveBuffer`] designation. Kernels never read and write the same image in
//! one dispatch: a step always goes from the active image to the other one, and
//! only then is the designation flipped.

use std::path::Path;

use wgpu::{BindGroup, Device, Queue};

use super::images::{CellImage, DisplayImage};
use super::kernels::{GridParams, GridParamsUBO, Kernel, LifeKernels};
use super::traits::Simulation;
use crate::config::LifeConfig;
use crate::error::Result;
use crate::grid::{GridSize, ALIVE};
use crate::snapshot;

/// Which generation image holds the current state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActiveBuffer {
    A,
    B,
}

impl ActiveBuffer {
    /// The image the next step writes into
    pub fn other(self) -> Self {
        match self {
            ActiveBuffer::A => ActiveBuffer::B,
            ActiveBuffer::B => ActiveBuffer::A,
        }
    }
}

/// Bind groups for every dispatch the simulation issues, built once
struct LifeBindGroups {
    init_a: BindGroup,
    step_a_to_b: BindGroup,
    step_b_to_a: BindGroup,
    present_a: BindGroup,
    present_b: BindGroup,
}

pub struct LifeSimulation {
    config: LifeConfig,
    kernels: LifeKernels,
    params: GridParamsUBO,
    buffer_a: CellImage,
    buffer_b: CellImage,
    display: DisplayImage,
    bind_groups: LifeBindGroups,
    active: ActiveBuffer,
    generation: u64,
}

impl LifeSimulation {
    /// Allocates both generation images and the display image.
    ///
    /// Nothing is dispatched yet; call [`LifeSimulation::initialize`] or
    /// [`LifeSimulation::load_cells`] before stepping.
    pub fn new(device: &Device, config: LifeConfig) -> Result<Self> {
        config.validate(&device.limits())?;
        let grid = config.grid();

        warn_if_seed_empty(grid, config.seed_half_width);

        let kernels = LifeKernels::new(device);
        let params =
            GridParamsUBO::new_with_data(device, &GridParams::new(grid, config.seed_half_width));

        let buffer_a = CellImage::new(device, grid, "Life Buffer A");
        let buffer_b = CellImage::new(device, grid, "Life Buffer B");
        let display = DisplayImage::new(device, grid, "Life Display");

        let bind_groups = LifeBindGroups {
            init_a: kernels.init_bind_group(device, &params, &buffer_a)?,
            step_a_to_b: kernels.step_bind_group(device, &params, &buffer_a, &buffer_b)?,
            step_b_to_a: kernels.step_bind_group(device, &params, &buffer_b, &buffer_a)?,
            present_a: kernels.present_bind_group(device, &buffer_a, &display)?,
            present_b: kernels.present_bind_group(device, &buffer_b, &display)?,
        };

        log::info!(
            "Allocated {} Game of Life grid ({} cells)",
            grid,
            grid.cell_count()
        );

        Ok(Self {
            config,
            kernels,
            params,
            buffer_a,
            buffer_b,
            display,
            bind_groups,
            active: ActiveBuffer::A,
            generation: 0,
        })
    }

    pub fn config(&self) -> &LifeConfig {
        &self.config
    }

    pub fn grid(&self) -> GridSize {
        self.config.grid()
    }

    pub fn active(&self) -> ActiveBuffer {
        self.active
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn kernels(&self) -> &LifeKernels {
        &self.kernels
    }

    pub fn buffer(&self, which: ActiveBuffer) -> &CellImage {
        match which {
            ActiveBuffer::A => &self.buffer_a,
            ActiveBuffer::B => &self.buffer_b,
        }
    }

    /// The image holding the current generation
    pub fn current_image(&self) -> &CellImage {
        self.buffer(self.active)
    }

    /// The image the front end draws
    pub fn display_image(&self) -> &DisplayImage {
        &self.display
    }

    /// Runs the initializer into buffer A and makes A the active generation
    pub fn initialize(&mut self, device: &Device, queue: &Queue) -> Result<()> {
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Life Init Encoder"),
        });
        self.kernels
            .dispatch(&mut encoder, Kernel::Init, &self.bind_groups.init_a, self.grid());
        queue.submit(std::iter::once(encoder.finish()));

        self.active = ActiveBuffer::A;
        self.generation = 0;
        log::info!(
            "Seeded {} grid with a square of half-width {}",
            self.grid(),
            self.config.seed_half_width
        );
        Ok(())
    }

    /// Changes the seed square used by the next [`LifeSimulation::initialize`]
    pub fn set_seed_half_width(&mut self, queue: &Queue, seed_half_width: u32) {
        self.config.seed_half_width = seed_half_width;
        warn_if_seed_empty(self.grid(), seed_half_width);
        let params = GridParams::new(self.grid(), seed_half_width);
        if self.params.update_content(queue, params) {
            log::debug!("Seed half-width set to {}", seed_half_width);
        }
    }

    /// Reseeds buffer A and restarts the generation count
    pub fn reset(&mut self, device: &Device, queue: &Queue) -> Result<()> {
        self.initialize(device, queue)
    }

    /// Replaces the initializer's pattern with an explicit one, row-major
    pub fn load_cells(&mut self, queue: &Queue, cells: &[u32]) -> Result<()> {
        self.buffer_a.upload(queue, cells)?;
        self.active = ActiveBuffer::A;
        self.generation = 0;
        Ok(())
    }

    /// Advances one generation
    pub fn step(&mut self, device: &Device, queue: &Queue) -> Result<()> {
        self.step_n(device, queue, 1)
    }

    /// Advances `count` generations in a single submission.
    ///
    /// Each generation is its own compute pass, so every step sees the
    /// completed output of the one before it.
    pub fn step_n(&mut self, device: &Device, queue: &Queue, count: u32) -> Result<()> {
        if count == 0 {
            return Ok(());
        }

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Life Step Encoder"),
        });
        let grid = self.grid();
        for _ in 0..count {
            let bind_group = match self.active {
                ActiveBuffer::A => &self.bind_groups.step_a_to_b,
                ActiveBuffer::B => &self.bind_groups.step_b_to_a,
            };
            self.kernels
                .dispatch(&mut encoder, Kernel::Step, bind_group, grid);
            self.active = self.active.other();
        }
        queue.submit(std::iter::once(encoder.finish()));

        self.generation += u64::from(count);
        log::debug!(
            "Generation {} (active buffer {:?})",
            self.generation,
            self.active
        );
        Ok(())
    }

    /// Writes the active generation into the display image
    pub fn present(&self, device: &Device, queue: &Queue) -> Result<()> {
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Life Present Encoder"),
        });
        let bind_group = match self.active {
            ActiveBuffer::A => &self.bind_groups.present_a,
            ActiveBuffer::B => &self.bind_groups.present_b,
        };
        self.kernels
            .dispatch(&mut encoder, Kernel::Present, bind_group, self.grid());
        queue.submit(std::iter::once(encoder.finish()));
        Ok(())
    }

    /// Current generation as row-major 0/1 values
    pub fn read_cells(&self, device: &Device, queue: &Queue) -> Result<Vec<u32>> {
        self.current_image().read(device, queue)
    }

    /// Display image as RGBA bytes
    pub fn read_display(&self, device: &Device, queue: &Queue) -> Result<Vec<u8>> {
        self.display.read(device, queue)
    }

    pub fn live_cells(&self, device: &Device, queue: &Queue) -> Result<usize> {
        Ok(self
            .read_cells(device, queue)?
            .iter()
            .filter(|&&cell| cell == ALIVE)
            .count())
    }

    /// Writes the display image to a TGA file
    pub fn save_snapshot(&self, device: &Device, queue: &Queue, path: &Path) -> Result<()> {
        let rgba = self.read_display(device, queue)?;
        snapshot::save(path, self.grid(), rgba)?;
        log::info!(
            "Saved generation {} to {}",
            self.generation,
            path.display()
        );
        Ok(())
    }
}

impl Simulation for LifeSimulation {
    fn initialize(&mut self, device: &Device, queue: &Queue) -> Result<()> {
        LifeSimulation::initialize(self, device, queue)
    }

    fn advance(&mut self, device: &Device, queue: &Queue) -> Result<()> {
        self.step(device, queue)
    }

    fn present(&mut self, device: &Device, queue: &Queue) -> Result<()> {
        LifeSimulation::present(self, device, queue)
    }

    fn name(&self) -> &str {
        "Conway's Game of Life"
    }

    fn generation(&self) -> u64 {
        self.generation
    }

    fn frames_per_generation(&self) -> u32 {
        self.config.frames_per_generation
    }

    fn reset(&mut self, device: &Device, queue: &Queue) -> Result<()> {
        LifeSimulation::reset(self, device, queue)
    }
}

/// Logs when the seed square wraps past the grid and `init` would write nothing
fn warn_if_seed_empty(grid: GridSize, seed_half_width: u32) -> bool {
    let empty = !grid.seed_fits(seed_half_width);
    if empty {
        log::warn!(
            "Seed square of half-width {} does not fit a {} grid; the initial pattern will be empty",
            seed_half_width,
            grid
        );
    }
    empty
}
