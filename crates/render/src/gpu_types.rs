//! GPU-compatible uniform block
//!
//! The named uniform snapshot packed into one `Pod` struct, ready to be
//! copied into a uniform buffer. Double precision matrices are split into
//! a high and a low `f32` half; a shader recovers them as `hi + lo`.

use bytemuck::{Pod, Zeroable};
use geometry::{Isometry, Position};
use glam::DMat3;
use lattice::MAX_GENERATORS;

use crate::scene::MAX_LIGHTS;
use crate::uniforms::{narrow, UniformSource};

/// Split double precision isometry
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct SplitMatrix {
    pub hi: [[f32; 4]; 4],
    pub lo: [[f32; 4]; 4],
}

impl From<&Isometry> for SplitMatrix {
    fn from(g: &Isometry) -> Self {
        let (hi, lo) = g.split_f32();
        Self { hi, lo }
    }
}

/// Observer or eye: split boost plus facing, padded to a `mat4`
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct PositionGpu {
    pub boost: SplitMatrix,
    pub facing: [[f32; 4]; 4],
}

impl From<&Position> for PositionGpu {
    fn from(position: &Position) -> Self {
        Self {
            boost: SplitMatrix::from(&position.boost),
            facing: facing_cols(&position.facing),
        }
    }
}

fn facing_cols(m: &DMat3) -> [[f32; 4]; 4] {
    let mut cols = [[0.0; 4]; 4];
    for (i, col) in m.to_cols_array_2d().iter().enumerate() {
        cols[i] = [narrow(col[0]), narrow(col[1]), narrow(col[2]), 0.0];
    }
    cols[3][3] = 1.0;
    cols
}

/// Everything the ray marching shader reads, in one buffer
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct GpuUniforms {
    pub observer: PositionGpu,
    pub left_eye: PositionGpu,
    pub right_eye: PositionGpu,
    pub cell_boost: SplitMatrix,
    pub inv_cell_boost: SplitMatrix,
    pub inv_generators: [[[f32; 4]; 4]; MAX_GENERATORS],
    pub light_positions: [[f32; 4]; MAX_LIGHTS],
    /// Colour in `rgb`, intensity in `w`
    pub light_intensities: [[f32; 4]; MAX_LIGHTS],
    pub resolution: [f32; 2],
    pub fov: f32,
    pub min_dist: f32,
    pub max_dist: f32,
    pub marching_threshold: f32,
    pub max_marching_steps: u32,
    pub is_stereo: u32,
    pub generator_count: u32,
    pub light_count: u32,
    pub _pad: [u32; 2],
}

impl GpuUniforms {
    /// The block as raw bytes, in the layout a uniform buffer expects.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

fn count(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

impl From<&UniformSource<'_>> for GpuUniforms {
    fn from(source: &UniformSource<'_>) -> Self {
        let snapshot = source.snapshot;
        let config = source.config;

        let mut inv_generators = [[[0.0; 4]; 4]; MAX_GENERATORS];
        let generators = source.lattice.inverse_generators();
        for (slot, g) in inv_generators.iter_mut().zip(generators) {
            *slot = g.to_f32_cols();
        }

        let mut light_positions = [[0.0; 4]; MAX_LIGHTS];
        let mut light_intensities = [[0.0; 4]; MAX_LIGHTS];
        let lights = source.scene.lights();
        for ((position, intensity), light) in light_positions.iter_mut().zip(light_intensities.iter_mut()).zip(lights) {
            *position = light.position.coords.as_vec4().to_array();
            *intensity = light.color.extend(light.intensity).as_vec4().to_array();
        }

        let [width, height] = snapshot.resolution;
        Self {
            observer: PositionGpu::from(&snapshot.observer),
            left_eye: PositionGpu::from(&snapshot.left_eye),
            right_eye: PositionGpu::from(&snapshot.right_eye),
            cell_boost: SplitMatrix::from(&snapshot.cell.boost),
            inv_cell_boost: SplitMatrix::from(&snapshot.cell.inverse),
            inv_generators,
            light_positions,
            light_intensities,
            resolution: [narrow(f64::from(width)), narrow(f64::from(height))],
            fov: narrow(config.fov),
            min_dist: narrow(config.min_dist),
            max_dist: narrow(config.max_dist),
            marching_threshold: narrow(config.marching_threshold),
            max_marching_steps: count(config.max_marching_steps),
            is_stereo: u32::from(snapshot.stereo),
            generator_count: count(generators.len().min(MAX_GENERATORS)),
            light_count: count(lights.len().min(MAX_LIGHTS)),
            _pad: [0; 2],
        }
    }
}
