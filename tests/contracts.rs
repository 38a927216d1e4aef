//! Host-boundary checks around the kernels and the frame-driven manager

#[macro_use]
mod common;

use common::live_coords;
use toroid_life::grid::{GridSize, CELL_FORMAT, DISPLAY_FORMAT};
use toroid_life::simulation::{
    CellImage, DisplayImage, GridParams, GridParamsUBO, LifeKernels, SimulationManager,
};
use toroid_life::{LifeConfig, LifeError, LifeSimulation};

fn encoder(device: &wgpu::Device) -> wgpu::CommandEncoder {
    device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("Test Encoder"),
    })
}

#[test]
fn test_kernel_contracts_compose() {
    let gpu = require_gpu!();
    let (device, queue) = (gpu.device(), gpu.queue());
    let grid = GridSize::new(7, 7);

    let kernels = LifeKernels::new(device);
    let params = GridParamsUBO::new_with_data(device, &GridParams::new(grid, 1));
    let a = CellImage::new(device, grid, "A");
    let b = CellImage::new(device, grid, "B");
    let display = DisplayImage::new(device, grid, "Display");

    // The 3x3 seed block evolves into a ring of eight with a dead center
    let mut encoder = encoder(device);
    kernels.init(device, &mut encoder, &params, &a).unwrap();
    kernels.step(device, &mut encoder, &params, &a, &b).unwrap();
    kernels.present(device, &mut encoder, &b, &display).unwrap();
    queue.submit(std::iter::once(encoder.finish()));

    let cells = b.read(device, queue).unwrap();
    let expected = vec![
        (3, 1),
        (2, 2),
        (4, 2),
        (1, 3),
        (5, 3),
        (2, 4),
        (4, 4),
        (3, 5),
    ];
    assert_eq!(live_coords(grid, &cells), expected);

    let rgba = display.read(device, queue).unwrap();
    let lit = rgba.chunks_exact(4).filter(|p| p[0] == 255).count();
    assert_eq!(lit, expected.len());
}

#[test]
fn test_step_rejects_aliased_images() {
    let gpu = require_gpu!();
    let device = gpu.device();
    let grid = GridSize::new(4, 4);

    let kernels = LifeKernels::new(device);
    let params = GridParamsUBO::new_with_data(device, &GridParams::new(grid, 1));
    let a = CellImage::new(device, grid, "A");

    let mut encoder = encoder(device);
    let err = kernels
        .step(device, &mut encoder, &params, &a, &a)
        .unwrap_err();
    assert!(matches!(err, LifeError::AliasedImages));
}

#[test]
fn test_step_rejects_two_views_of_one_texture() {
    let gpu = require_gpu!();
    let device = gpu.device();
    let grid = GridSize::new(4, 4);

    let kernels = LifeKernels::new(device);
    let params = GridParamsUBO::new_with_data(device, &GridParams::new(grid, 1));
    let shared = CellImage::new(device, grid, "Shared").texture().clone();
    let current = CellImage::from_texture(shared.clone()).unwrap();
    let next = CellImage::from_texture(shared).unwrap();

    let mut encoder = encoder(device);
    let err = kernels
        .step(device, &mut encoder, &params, &current, &next)
        .unwrap_err();
    assert!(matches!(err, LifeError::AliasedImages));
}

#[test]
fn test_step_rejects_dimension_mismatch() {
    let gpu = require_gpu!();
    let device = gpu.device();

    let kernels = LifeKernels::new(device);
    let params = GridParamsUBO::new_with_data(device, &GridParams::new(GridSize::new(8, 8), 1));
    let current = CellImage::new(device, GridSize::new(8, 8), "Current");
    let next = CellImage::new(device, GridSize::new(8, 9), "Next");

    let mut encoder = encoder(device);
    let err = kernels
        .step(device, &mut encoder, &params, &current, &next)
        .unwrap_err();
    assert!(matches!(
        err,
        LifeError::DimensionMismatch { role: "step next", actual, .. } if actual == GridSize::new(8, 9)
    ));
}

#[test]
fn test_present_rejects_display_mismatch() {
    let gpu = require_gpu!();
    let device = gpu.device();

    let kernels = LifeKernels::new(device);
    let cells = CellImage::new(device, GridSize::new(8, 8), "Cells");
    let display = DisplayImage::new(device, GridSize::new(4, 4), "Display");

    let mut encoder = encoder(device);
    assert!(kernels
        .present(device, &mut encoder, &cells, &display)
        .is_err());
}

#[test]
fn test_host_textures_are_checked() {
    let gpu = require_gpu!();
    let device = gpu.device();
    let grid = GridSize::new(8, 8);

    let descriptor = |format: wgpu::TextureFormat, usage: wgpu::TextureUsages| wgpu::TextureDescriptor {
        label: Some("Host Texture"),
        size: grid.extent(),
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage,
        view_formats: &[],
    };
    let texture = |format: wgpu::TextureFormat, usage: wgpu::TextureUsages| {
        device.create_texture(&descriptor(format, usage))
    };

    let wrong_format = texture(wgpu::TextureFormat::R32Float, CellImage::USAGE);
    assert!(matches!(
        CellImage::from_texture(wrong_format),
        Err(LifeError::FormatMismatch { .. })
    ));

    let not_storage = texture(CELL_FORMAT, wgpu::TextureUsages::TEXTURE_BINDING);
    assert!(matches!(
        CellImage::from_texture(not_storage),
        Err(LifeError::MissingUsage { .. })
    ));

    let mipmapped = device.create_texture(&wgpu::TextureDescriptor {
        mip_level_count: 2,
        ..descriptor(CELL_FORMAT, CellImage::USAGE)
    });
    assert!(matches!(
        CellImage::from_texture(mipmapped),
        Err(LifeError::UnsupportedTexture { role: "cell", .. })
    ));

    let layered = device.create_texture(&wgpu::TextureDescriptor {
        size: wgpu::Extent3d {
            depth_or_array_layers: 2,
            ..grid.extent()
        },
        ..descriptor(CELL_FORMAT, CellImage::USAGE)
    });
    assert!(matches!(
        CellImage::from_texture(layered),
        Err(LifeError::UnsupportedTexture { .. })
    ));

    let volume = device.create_texture(&wgpu::TextureDescriptor {
        dimension: wgpu::TextureDimension::D3,
        ..descriptor(CELL_FORMAT, CellImage::USAGE)
    });
    assert!(matches!(
        CellImage::from_texture(volume),
        Err(LifeError::UnsupportedTexture { .. })
    ));

    let display_mipmapped = device.create_texture(&wgpu::TextureDescriptor {
        mip_level_count: 2,
        ..descriptor(DISPLAY_FORMAT, DisplayImage::USAGE)
    });
    assert!(matches!(
        DisplayImage::from_texture(display_mipmapped),
        Err(LifeError::UnsupportedTexture { role: "display", .. })
    ));

    let good = CellImage::from_texture(texture(CELL_FORMAT, CellImage::USAGE)).unwrap();
    assert_eq!(good.size(), grid);
}

#[test]
fn test_pattern_length_checked() {
    let gpu = require_gpu!();
    let mut sim = LifeSimulation::new(gpu.device(), LifeConfig::new(4, 4)).unwrap();
    let err = sim.load_cells(gpu.queue(), &[1, 0, 1]).unwrap_err();
    assert!(matches!(
        err,
        LifeError::PatternLength {
            expected: 16,
            actual: 3
        }
    ));
}

#[test]
fn test_upload_normalizes_values() {
    let gpu = require_gpu!();
    let grid = GridSize::new(3, 1);
    let image = CellImage::new(gpu.device(), grid, "Normalized");
    image.upload(gpu.queue(), &[0, 7, 1]).unwrap();
    assert_eq!(image.read(gpu.device(), gpu.queue()).unwrap(), vec![0, 1, 1]);
}

#[test]
fn test_zero_sized_grid_rejected() {
    let gpu = require_gpu!();
    let result = LifeSimulation::new(gpu.device(), LifeConfig::new(0, 10));
    assert!(matches!(result, Err(LifeError::InvalidConfig(_))));
}

#[test]
fn test_manager_follows_cadence() {
    let gpu = require_gpu!();
    let (device, queue) = (gpu.device(), gpu.queue());
    let config = LifeConfig::new(5, 5).with_frames_per_generation(4);
    let sim = LifeSimulation::new(device, config).unwrap();

    let mut manager = SimulationManager::new();
    manager.attach_simulation(sim, device, queue).unwrap();

    let stepped: Vec<bool> = (0..8)
        .map(|_| manager.update(device, queue).unwrap())
        .collect();
    assert_eq!(
        stepped,
        vec![false, false, false, true, false, false, false, true]
    );
    assert_eq!(manager.generation(), 2);
    assert_eq!(manager.frames(), 8);

    manager.set_paused(true);
    assert!(!manager.update(device, queue).unwrap());
    manager.step_once(device, queue).unwrap();
    assert_eq!(manager.generation(), 3);

    manager.reset(device, queue).unwrap();
    assert_eq!(manager.generation(), 0);
}

#[test]
fn test_manager_presents_after_each_generation() {
    let gpu = require_gpu!();
    let (device, queue) = (gpu.device(), gpu.queue());
    let config = LifeConfig::new(9, 9)
        .with_seed_half_width(1)
        .with_frames_per_generation(1);
    let sim = LifeSimulation::new(device, config).unwrap();

    let mut manager = SimulationManager::new();
    manager.attach_simulation(sim, device, queue).unwrap();
    assert!(manager.update(device, queue).unwrap());

    let sim = manager.simulation().unwrap();
    let live = sim.live_cells(device, queue).unwrap();
    let rgba = sim.read_display(device, queue).unwrap();
    let lit = rgba.chunks_exact(4).filter(|p| p[0] == 255).count();
    assert_eq!(live, 8);
    assert_eq!(lit, live);
}

#[test]
fn test_snapshot_written() {
    let gpu = require_gpu!();
    let (device, queue) = (gpu.device(), gpu.queue());
    let config = LifeConfig::new(6, 4).with_seed_half_width(1);
    let mut sim = LifeSimulation::new(device, config).unwrap();
    sim.initialize(device, queue).unwrap();
    sim.present(device, queue).unwrap();

    let path = std::env::temp_dir().join(format!("toroid-life-{}.tga", std::process::id()));
    sim.save_snapshot(device, queue, &path).unwrap();

    let saved = image::open(&path).unwrap().to_rgba8();
    let _ = std::fs::remove_file(&path);
    assert_eq!(saved.dimensions(), (6, 4));

    // 6x4 grid: center (3, 2), seed covers x 2..=4, y 1..=3
    for (x, y, pixel) in saved.enumerate_pixels() {
        let lit = (2..=4).contains(&x) && (1..=3).contains(&y);
        let expected = if lit { [255; 4] } else { [0; 4] };
        assert_eq!(pixel.0, expected, "pixel ({}, {})", x, y);
    }
}
