//! The three Game of Life compute kernels
//!
//! Each kernel handles exactly one cell per invocation and keeps no state
//! between dispatches:
//!
//! - **init** writes the centered seed square into a cell image
//! - **step** reads one generation and writes the next into another image
//! - **present** broadcasts a generation into the RGBA display image
//!
//! Every dispatch is recorded as its own compute pass. wgpu orders passes that
//! touch the same texture, which gives the full barrier the kernels rely on
//! between a write and the next read.

use crate::error::{LifeError, Result};
use crate::grid::{
    GridSize, CELL_FORMAT, DISPLAY_FORMAT, INPUT_BINDING, OUTPUT_BINDING, PARAMS_BINDING,
};
use crate::wgpu_utils::{
    binding_types, BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc,
    UniformBuffer,
};
use wgpu::{BindGroup, CommandEncoder, ComputePipeline, Device};

use super::images::{CellImage, DisplayImage};

pub const INIT_SHADER: &str = include_str!("shaders/init.wgsl");
pub const STEP_SHADER: &str = include_str!("shaders/step.wgsl");
pub const PRESENT_SHADER: &str = include_str!("shaders/present.wgsl");

/// Grid parameters bound at slot 0 of the init and step kernels
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GridParams {
    pub width: u32,
    pub height: u32,
    pub seed_half_width: u32,
    pub _padding: u32,
}

impl GridParams {
    pub fn new(grid: GridSize, seed_half_width: u32) -> Self {
        Self {
            width: grid.width,
            height: grid.height,
            seed_half_width,
            _padding: 0,
        }
    }

    pub fn grid(&self) -> GridSize {
        GridSize::new(self.width, self.height)
    }
}

pub type GridParamsUBO = UniformBuffer<GridParams>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kernel {
    Init,
    Step,
    Present,
}

impl Kernel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Kernel::Init => "Life Init",
            Kernel::Step => "Life Step",
            Kernel::Present => "Life Present",
        }
    }
}

struct KernelPipeline {
    bind_group_layout: BindGroupLayoutWithDesc,
    pipeline: ComputePipeline,
}

/// Compiled pipelines and bind group layouts for all three kernels
pub struct LifeKernels {
    init: KernelPipeline,
    step: KernelPipeline,
    present: KernelPipeline,
}

impl LifeKernels {
    pub fn new(device: &Device) -> Self {
        let init_layout = BindGroupLayoutBuilder::new()
            .binding_compute(PARAMS_BINDING, binding_types::uniform())
            .binding_compute(OUTPUT_BINDING, binding_types::image_2d_write_only(CELL_FORMAT))
            .create(device, "Life Init Bind Group Layout");

        let step_layout = BindGroupLayoutBuilder::new()
            .binding_compute(PARAMS_BINDING, binding_types::uniform())
            .binding_compute(INPUT_BINDING, binding_types::utexture_2d())
            .binding_compute(OUTPUT_BINDING, binding_types::image_2d_write_only(CELL_FORMAT))
            .create(device, "Life Step Bind Group Layout");

        let present_layout = BindGroupLayoutBuilder::new()
            .binding_compute(INPUT_BINDING, binding_types::utexture_2d())
            .binding_compute(OUTPUT_BINDING, binding_types::image_2d_write_only(DISPLAY_FORMAT))
            .create(device, "Life Present Bind Group Layout");

        log::debug!("Compiling Game of Life kernels");

        Self {
            init: Self::create_kernel(device, Kernel::Init, INIT_SHADER, init_layout),
            step: Self::create_kernel(device, Kernel::Step, STEP_SHADER, step_layout),
            present: Self::create_kernel(device, Kernel::Present, PRESENT_SHADER, present_layout),
        }
    }

    fn create_kernel(
        device: &Device,
        kernel: Kernel,
        shader_source: &str,
        bind_group_layout: BindGroupLayoutWithDesc,
    ) -> KernelPipeline {
        let label = kernel.as_str();
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Wgsl(shader_source.into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(label),
            bind_group_layouts: &[&bind_group_layout.layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
            label: Some(label),
            layout: Some(&pipeline_layout),
            module: &shader,
            entry_point: Some("main"),
            compilation_options: Default::default(),
            cache: None,
        });

        KernelPipeline {
            bind_group_layout,
            pipeline,
        }
    }

    fn kernel(&self, kernel: Kernel) -> &KernelPipeline {
        match kernel {
            Kernel::Init => &self.init,
            Kernel::Step => &self.step,
            Kernel::Present => &self.present,
        }
    }

    /// Binds `target` as the initializer's output
    pub fn init_bind_group(
        &self,
        device: &Device,
        params: &GridParamsUBO,
        target: &CellImage,
    ) -> Result<BindGroup> {
        check_size("init target", params.content().grid(), target.size())?;

        Ok(BindGroupBuilder::new(&self.init.bind_group_layout)
            .resource(params.binding_resource())
            .texture(target.view())
            .create(device, "Life Init Bind Group"))
    }

    /// Binds `current` as input and `next` as output of one generation
    pub fn step_bind_group(
        &self,
        device: &Device,
        params: &GridParamsUBO,
        current: &CellImage,
        next: &CellImage,
    ) -> Result<BindGroup> {
        // Two wrappers around one host texture alias just like one image passed twice
        if current.texture() == next.texture() {
            return Err(LifeError::AliasedImages);
        }
        let grid = params.content().grid();
        check_size("step current", grid, current.size())?;
        check_size("step next", grid, next.size())?;

        Ok(BindGroupBuilder::new(&self.step.bind_group_layout)
            .resource(params.binding_resource())
            .texture(current.view())
            .texture(next.view())
            .create(device, "Life Step Bind Group"))
    }

    /// Binds `current` as the presenter's input and `display` as its output
    pub fn present_bind_group(
        &self,
        device: &Device,
        current: &CellImage,
        display: &DisplayImage,
    ) -> Result<BindGroup> {
        check_size("display", current.size(), display.size())?;

        Ok(BindGroupBuilder::new(&self.present.bind_group_layout)
            .texture(current.view())
            .texture(display.view())
            .create(device, "Life Present Bind Group"))
    }

    /// Records one dispatch of `kernel`: one 1x1x1 workgroup per cell of `grid`
    pub fn dispatch(
        &self,
        encoder: &mut CommandEncoder,
        kernel: Kernel,
        bind_group: &BindGroup,
        grid: GridSize,
    ) {
        let (x, y, z) = grid.dispatch_size();
        let mut compute_pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
            label: Some(kernel.as_str()),
            timestamp_writes: None,
        });

        compute_pass.set_pipeline(&self.kernel(kernel).pipeline);
        compute_pass.set_bind_group(0, bind_group, &[]);
        compute_pass.dispatch_workgroups(x, y, z);
    }

    /// Records `init(width, height, target)`
    pub fn init(
        &self,
        device: &Device,
        encoder: &mut CommandEncoder,
        params: &GridParamsUBO,
        target: &CellImage,
    ) -> Result<()> {
        let bind_group = self.init_bind_group(device, params, target)?;
        self.dispatch(encoder, Kernel::Init, &bind_group, target.size());
        Ok(())
    }

    /// Records `step(width, height, current, next)`
    pub fn step(
        &self,
        device: &Device,
        encoder: &mut CommandEncoder,
        params: &GridParamsUBO,
        current: &CellImage,
        next: &CellImage,
    ) -> Result<()> {
        let bind_group = self.step_bind_group(device, params, current, next)?;
        self.dispatch(encoder, Kernel::Step, &bind_group, current.size());
        Ok(())
    }

    /// Records `present(current, display)`
    pub fn present(
        &self,
        device: &Device,
        encoder: &mut CommandEncoder,
        current: &CellImage,
        display: &DisplayImage,
    ) -> Result<()> {
        let bind_group = self.present_bind_group(device, current, display)?;
        self.dispatch(encoder, Kernel::Present, &bind_group, current.size());
        Ok(())
    }
}

fn check_size(role: &'static str, expected: GridSize, actual: GridSize) -> Result<()> {
    if expected != actual {
        return Err(LifeError::DimensionMismatch {
            role,
            expected,
            actual,
        });
    }
    Ok(())
}
