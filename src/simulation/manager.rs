//! Simulation manager
//!
//! Drives an attached simulation from a frame loop: pausing, manual single
//! steps and the frame-to-generation cadence all live here, so the simulation
//! itself only ever sees "advance one generation" and "present".

use super::cadence::StepCadence;
use super::traits::Simulation;
use crate::error::Result;
use wgpu::{Device, Queue};

/// Runs a simulation at a fixed number of frames per generation
pub struct SimulationManager<S: Simulation> {
    simulation: Option<S>,
    cadence: StepCadence,
    is_paused: bool,
    frames: u64,
}

impl<S: Simulation> SimulationManager<S> {
    /// Create a new simulation manager
    pub fn new() -> Self {
        Self {
            simulation: None,
            cadence: StepCadence::new(1),
            is_paused: false,
            frames: 0,
        }
    }

    /// Attach a simulation, initialize it and present its first generation
    ///
    /// # Arguments
    /// * `simulation` - Simulation to drive
    /// * `device` - Device the simulation's resources live on
    /// * `queue` - Queue used for all dispatches
    ///
    /// # Returns
    /// The previously attached simulation, if any
    pub fn attach_simulation(
        &mut self,
        mut simulation: S,
        device: &Device,
        queue: &Queue,
    ) -> Result<Option<S>> {
        simulation.initialize(device, queue)?;
        simulation.present(device, queue)?;

        self.cadence = StepCadence::new(simulation.frames_per_generation());
        self.is_paused = false;
        self.frames = 0;
        log::info!(
            "Attached simulation '{}' ({} frame(s) per generation)",
            simulation.name(),
            self.cadence.frames_per_generation()
        );

        Ok(self.simulation.replace(simulation))
    }

    /// Remove the current simulation and hand it back
    pub fn detach_simulation(&mut self) -> Option<S> {
        self.simulation.take()
    }

    /// Register one rendered frame (called every frame)
    ///
    /// # Returns
    /// `true` if a generation was advanced and presented during this frame
    pub fn update(&mut self, device: &Device, queue: &Queue) -> Result<bool> {
        if self.is_paused {
            return Ok(false);
        }
        let Some(simulation) = &mut self.simulation else {
            return Ok(false);
        };

        self.frames += 1;
        if !self.cadence.tick() {
            return Ok(false);
        }

        simulation.advance(device, queue)?;
        simulation.present(device, queue)?;
        Ok(true)
    }

    /// Advance and present one generation regardless of pause state or cadence
    pub fn step_once(&mut self, device: &Device, queue: &Queue) -> Result<()> {
        if let Some(simulation) = &mut self.simulation {
            simulation.advance(device, queue)?;
            simulation.present(device, queue)?;
        }
        Ok(())
    }

    /// Reinitialize the attached simulation and restart the cadence
    pub fn reset(&mut self, device: &Device, queue: &Queue) -> Result<()> {
        if let Some(simulation) = &mut self.simulation {
            log::debug!("Resetting simulation '{}'", simulation.name());
            simulation.reset(device, queue)?;
            simulation.present(device, queue)?;
        }
        self.cadence.reset();
        Ok(())
    }

    pub fn simulation(&self) -> Option<&S> {
        self.simulation.as_ref()
    }

    pub fn simulation_mut(&mut self) -> Option<&mut S> {
        self.simulation.as_mut()
    }

    /// Get current simulation name
    pub fn current_simulation_name(&self) -> Option<&str> {
        self.simulation.as_ref().map(|s| s.name())
    }

    /// Generation of the attached simulation, 0 when none is attached
    pub fn generation(&self) -> u64 {
        self.simulation.as_ref().map_or(0, |s| s.generation())
    }

    /// Frames registered through [`SimulationManager::update`] since attaching
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Check if simulation is running
    ///
    /// # Returns
    /// `true` if simulation exists and is not paused
    pub fn is_running(&self) -> bool {
        !self.is_paused && self.simulation.is_some()
    }

    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.is_paused = paused;
    }

    pub fn has_simulation(&self) -> bool {
        self.simulation.is_some()
    }
}

impl<S: Simulation> Default for SimulationManager<S> {
    fn default() -> Self {
        Self::new()
    }
}
