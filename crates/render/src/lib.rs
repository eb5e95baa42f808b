#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! # Ray-marching renderer for Thurston geometries
//!
//! Scenes of signed distance functions, marched directly in a curved model
//! of space that is tiled by a lattice. The observer moves along geodesics
//! and is folded back into the fundamental cell every frame; rays fold the
//! same way while they march, so a single cell's worth of solids fills the
//! whole view.
//!
//! ## Key Components
//!
//! -   **Scene:** [`Scene`] registers [`Solid`]s (a [`Shape`] with a
//!     [`Material`], local or global) and [`Light`]s.
//! -   **Marching:** [`march`] runs the local (folded) and global phases and
//!     returns a [`RayHit`]; [`shade`] applies Phong lighting to it.
//! -   **Frame loop:** [`RenderContext`] owns the observer and cell boost,
//!     applies [`Controls`] in [`RenderContext::update`], and produces the
//!     immutable [`FrameSnapshot`] that [`render_frame`] reads in parallel.
//! -   **Uniforms:** [`UniformSchema`] lists the named per-frame values and
//!     [`GpuUniforms`] packs them into one `Pod` block.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use geometry::{Geometry, GeometryKind, Point};
//! use lattice::{Lattice, LatticeSpec};
//! use render::{Material, RenderConfig, RenderContext, Scene, Shape, Solid};
//!
//! let geom = Geometry::from(GeometryKind::Euclidean);
//! let lattice = Lattice::build(&geom, &LatticeSpec::Cubic { half_width: 1.0 })?;
//! let mut scene = Scene::new(GeometryKind::Euclidean);
//! scene.add_solid(Solid::local(Shape::ball(Point::ORIGIN, 0.3), Material::default()))?;
//! let mut context = RenderContext::new(geom, lattice, scene, RenderConfig::default())?;
//! context.update(1.0 / 60.0);
//! let image = render::render_frame(context.geometry(), context.scene(), context.lattice(), &context.snapshot(), context.config());
//! ```

pub mod camera;
pub mod config;
pub mod context;
pub mod controls;
pub mod error;
pub mod gpu_types;
pub mod lighting;
pub mod march;
pub mod material;
pub mod renderer;
pub mod scene;
pub mod shapes;
pub mod uniforms;

pub use camera::{eye_positions, Camera, Eye};
pub use config::RenderConfig;
pub use context::{FrameReport, FrameSnapshot, RenderContext};
pub use controls::{Action, Controls, KeyBindings};
pub use error::{ConfigError, SceneError};
pub use gpu_types::GpuUniforms;
pub use lighting::{shade, surface_normal, Attenuation};
pub use march::{march, CellFrame, HitKind, MarchSettings, RayHit};
pub use material::Material;
pub use renderer::{render_frame, render_pixel, save_frame, PixelShader};
pub use scene::{Light, Scene, Solid, Target, MAX_LIGHTS, MAX_SOLIDS};
pub use shapes::Shape;
pub use uniforms::{NamedUniform, UniformSchema, UniformSource, UniformType, UniformValue};
