//! # Render context
//!
//! Owns everything a frame needs: the geometry, lattice and scene fixed at
//! setup, plus the observer and the cell boost that change every frame.
//! There is exactly one writer. [`RenderContext::update`] finishes moving,
//! renormalizing and folding the observer before
//! [`RenderContext::snapshot`] hands out an immutable copy to the pixels.
//!
//! ## Key Components
//!
//! -   **`RenderContext`:** Frame-synchronous state and the update step.
//! -   **`FrameSnapshot`:** The per-frame values every pixel reads.
//! -   **`FrameReport`:** What one update did, for logging.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let mut context = RenderContext::new(geometry, lattice, scene, config)?;
//! context.controls_mut().press(Action::TranslateZNeg);
//! let report = context.update(1.0 / 60.0);
//! let frame = render_frame(context.geometry(), context.scene(), context.lattice(), &context.snapshot(), context.config());
//! ```

use geometry::{apply_to_point, Geometry, GeometryModel, Point, Position};
use glam::{DMat3, DQuat, DVec3};
use lattice::Lattice;

use crate::camera::eye_positions;
use crate::config::RenderConfig;
use crate::controls::Controls;
use crate::error::ConfigError;
use crate::gpu_types::GpuUniforms;
use crate::march::CellFrame;
use crate::scene::Scene;
use crate::uniforms::{UniformSchema, UniformSource};

/// The immutable per-frame state read by every pixel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameSnapshot {
    pub frame: u64,
    pub observer: Position,
    pub left_eye: Position,
    pub right_eye: Position,
    pub cell: CellFrame,
    pub resolution: [u32; 2],
    pub stereo: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameReport {
    pub frame: u64,
    pub folds: usize,
    pub converged: bool,
    /// Geodesic distance moved by the observer this frame.
    pub distance: f64,
}

pub struct RenderContext<G: GeometryModel = Geometry> {
    geometry: G,
    lattice: Lattice,
    scene: Scene,
    config: RenderConfig,
    schema: UniformSchema,
    position: Position,
    cell: CellFrame,
    controls: Controls,
    frame: u64,
}

impl<G: GeometryModel> RenderContext<G> {
    /// # Errors
    ///
    /// Any config validation error, or [`ConfigError::Invalid`] when the
    /// scene was built for another geometry.
    pub fn new(geometry: G, lattice: Lattice, scene: Scene, config: RenderConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        if scene.kind() != geometry.kind() {
            return Err(ConfigError::Invalid {
                field: "scene",
                reason: format!("scene is for {} space but the geometry is {}", scene.kind(), geometry.kind()),
            });
        }
        let controls = Controls::new(config.key_bindings()?);
        let schema = UniformSchema::build(&scene, &lattice);
        tracing::info!(
            geometry = geometry.name(),
            solids = scene.solids().len(),
            lights = scene.lights().len(),
            generators = lattice.generator_count(),
            "render context ready"
        );
        Ok(Self {
            geometry,
            lattice,
            scene,
            config,
            schema,
            position: Position::IDENTITY,
            cell: CellFrame::IDENTITY,
            controls,
            frame: 0,
        })
    }

    /// Place the observer, folding it into the cell.
    pub fn set_position(&mut self, position: Position) {
        self.position = position.renormalize(&self.geometry);
        self.fold();
    }

    #[must_use]
    pub fn with_position(mut self, position: Position) -> Self {
        self.set_position(position);
        self
    }

    /// Advance one frame of `dt` seconds with the current controls.
    pub fn update(&mut self, dt: f64) -> FrameReport {
        let before = self.absolute_observer();
        let translation = self.controls.translation();
        let rotation = self.controls.rotation();

        let mut position = self.position;
        if translation != DVec3::ZERO {
            position = position.local_flow(&self.geometry, translation * (self.config.speed_translation * dt));
        }
        if rotation != DVec3::ZERO {
            let angle = 0.5 * self.config.speed_rotation * dt;
            let turn = DMat3::from_quat(DQuat::from_axis_angle(rotation.normalize(), angle));
            position = position.apply_facing(&turn);
        }
        self.position = position.renormalize(&self.geometry);
        let (folds, converged) = self.fold();

        self.frame += 1;
        let distance = self.geometry.distance(&before, &self.absolute_observer());
        tracing::debug!(frame = self.frame, folds, converged, distance, "updated observer");
        FrameReport {
            frame: self.frame,
            folds,
            converged,
            distance,
        }
    }

    fn fold(&mut self) -> (usize, bool) {
        let outcome = self
            .lattice
            .fold_repeatedly(&self.geometry, &self.position, self.config.max_fold_iterations);
        self.position = outcome.position;
        if outcome.folds > 0 {
            // Absolute boost = cell.boost * boost must not change across the fold
            let g = &self.geometry;
            self.cell = CellFrame::new(
                g.renormalize_isometry(&self.cell.boost.multiply(&g.invert(&outcome.correction))),
                g.renormalize_isometry(&outcome.correction.multiply(&self.cell.inverse)),
            );
        }
        (outcome.folds, outcome.converged)
    }

    /// Observer location in absolute (unfolded) coordinates.
    #[must_use]
    pub fn absolute_observer(&self) -> Point {
        apply_to_point(&self.geometry, &self.cell.boost, &self.position.observer_point(&self.geometry))
    }

    #[must_use]
    pub fn snapshot(&self) -> FrameSnapshot {
        let (left_eye, right_eye) = eye_positions(&self.geometry, &self.position, self.config.ipd);
        FrameSnapshot {
            frame: self.frame,
            observer: self.position,
            left_eye,
            right_eye,
            cell: self.cell,
            resolution: [self.config.width, self.config.height],
            stereo: self.config.stereo,
        }
    }

    #[must_use]
    pub fn uniform_source<'a>(&'a self, snapshot: &'a FrameSnapshot) -> UniformSource<'a> {
        UniformSource {
            snapshot,
            scene: &self.scene,
            lattice: &self.lattice,
            config: &self.config,
        }
    }

    /// The snapshot packed for a GPU uniform buffer.
    #[must_use]
    pub fn gpu_uniforms(&self, snapshot: &FrameSnapshot) -> GpuUniforms {
        GpuUniforms::from(&self.uniform_source(snapshot))
    }

    #[must_use]
    pub fn geometry(&self) -> &G {
        &self.geometry
    }

    #[must_use]
    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    #[must_use]
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    #[must_use]
    pub fn schema(&self) -> &UniformSchema {
        &self.schema
    }

    #[must_use]
    pub fn position(&self) -> &Position {
        &self.position
    }

    #[must_use]
    pub fn cell(&self) -> &CellFrame {
        &self.cell
    }

    #[must_use]
    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    pub fn controls_mut(&mut self) -> &mut Controls {
        &mut self.controls
    }

    #[must_use]
    pub fn frame(&self) -> u64 {
        self.frame
    }
}
