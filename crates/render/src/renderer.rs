//! # Frame renderer
//!
//! Data-parallel CPU rendering of one frame. Rows are handed to `rayon`
//! workers; every pixel is a pure function of its coordinates and the
//! shared, read-only snapshot, scene, lattice and geometry.

use std::path::Path;

use anyhow::{Context, Result};
use geometry::GeometryModel;
use glam::DVec3;
use image::{Rgba, RgbaImage};
use lattice::Lattice;
use rayon::prelude::*;

use crate::camera::Camera;
use crate::config::RenderConfig;
use crate::context::FrameSnapshot;
use crate::lighting::{shade, Attenuation};
use crate::march::{march, MarchSettings, RayHit};
use crate::scene::Scene;

/// Everything needed to colour a pixel, borrowed for one frame.
pub struct PixelShader<'a, G: GeometryModel + ?Sized> {
    geom: &'a G,
    scene: &'a Scene,
    lattice: &'a Lattice,
    snapshot: &'a FrameSnapshot,
    camera: Camera,
    settings: MarchSettings,
    attenuation: Attenuation,
}

impl<'a, G: GeometryModel + ?Sized> PixelShader<'a, G> {
    #[must_use]
    pub fn new(
        geom: &'a G,
        scene: &'a Scene,
        lattice: &'a Lattice,
        snapshot: &'a FrameSnapshot,
        config: &RenderConfig,
    ) -> Self {
        let [width, height] = snapshot.resolution;
        Self {
            geom,
            scene,
            lattice,
            snapshot,
            camera: Camera {
                width,
                height,
                fov: config.fov,
                stereo: snapshot.stereo,
            },
            settings: config.march_settings(),
            attenuation: config.attenuation_for(geom.kind()),
        }
    }

    /// March the ray through pixel `(x, y)`.
    #[must_use]
    pub fn trace(&self, x: u32, y: u32) -> RayHit {
        let ray = self.camera.ray_for_pixel(self.geom, self.snapshot, x, y);
        march(self.geom, self.scene, self.lattice, &self.snapshot.cell, &self.settings, &ray)
    }

    #[must_use]
    pub fn color(&self, x: u32, y: u32) -> DVec3 {
        let hit = self.trace(x, y);
        shade(
            self.geom,
            self.scene,
            &hit,
            &self.snapshot.cell,
            self.attenuation,
            self.settings.threshold,
        )
    }

    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        let c = self.color(x, y);
        Rgba([to_byte(c.x), to_byte(c.y), to_byte(c.z), u8::MAX])
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_byte(channel: f64) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Colour of a single pixel. Pixels whose ray finds nothing are opaque black.
#[must_use]
pub fn render_pixel<G: GeometryModel + ?Sized>(
    geom: &G,
    scene: &Scene,
    lattice: &Lattice,
    snapshot: &FrameSnapshot,
    config: &RenderConfig,
    x: u32,
    y: u32,
) -> Rgba<u8> {
    PixelShader::new(geom, scene, lattice, snapshot, config).pixel(x, y)
}

/// Render the frame described by `snapshot`.
#[must_use]
pub fn render_frame<G: GeometryModel + ?Sized>(
    geom: &G,
    scene: &Scene,
    lattice: &Lattice,
    snapshot: &FrameSnapshot,
    config: &RenderConfig,
) -> RgbaImage {
    let [width, height] = snapshot.resolution;
    let shader = PixelShader::new(geom, scene, lattice, snapshot, config);
    let mut image = RgbaImage::new(width, height);
    let row_bytes = 4 * width as usize;
    if row_bytes == 0 {
        return image;
    }
    let buffer: &mut [u8] = &mut image;
    buffer
        .par_chunks_mut(row_bytes)
        .zip(0..height)
        .for_each(|(row, y)| {
            for (pixel, x) in row.chunks_exact_mut(4).zip(0..width) {
                pixel.copy_from_slice(&shader.pixel(x, y).0);
            }
        });
    image
}

/// Write a frame as PNG.
///
/// # Errors
///
/// Fails if the file cannot be created or encoded.
pub fn save_frame(image: &RgbaImage, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory {}", parent.display()))?;
    }
    image
        .save(path)
        .with_context(|| format!("failed to write frame to {}", path.display()))?;
    Ok(())
}
