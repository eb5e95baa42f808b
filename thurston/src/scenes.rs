//! # Demo scenes
//!
//! One ready-made manifold per geometry: a lattice, the solids and lights
//! that live in it, and where the observer starts.
//!
//! ## Key Components
//!
//! -   **`euclidean_torus`:** The cubic 3-torus with one ball per cell.
//! -   **`hyperbolic_cube`:** The ideal-vertex cube cell, its centre and
//!     corners carved out, with a global ball and three lights.
//! -   **`nil_unit`, `sol_unit`:** Unit translation lattices with a small
//!     ball per cell. Sol is tiled in the horizontal directions only.

use anyhow::{Context, Result};
use geometry::{Geometry, GeometryKind, GeometryModel, Position};
use glam::{DMat3, DVec3};
use lattice::{Lattice, LatticeSpec};
use render::{Light, Material, Scene, Shape, Solid};

/// Klein half-width of the cube whose vertices are ideal points.
pub const IDEAL_CUBE_HALF_WIDTH: f64 = 0.577_350_269_2;
const IDEAL_CUBE_CENTRE_RADIUS: f64 = 0.996_216;
const IDEAL_CUBE_HOROBALL_OFFSET: f64 = -0.951_621;

/// A scene together with the lattice it tiles and the starting position.
#[derive(Debug)]
pub struct Demo {
    pub lattice: Lattice,
    pub scene: Scene,
    pub start: Position,
}

/// The demo for `geom`'s kind.
///
/// # Errors
///
/// Fails only if a demo no longer passes lattice or scene validation.
pub fn demo(geom: &Geometry) -> Result<Demo> {
    let demo = match geom.kind() {
        GeometryKind::Euclidean => euclidean_torus(geom),
        GeometryKind::Hyperbolic => hyperbolic_cube(geom),
        GeometryKind::Nil => nil_unit(geom),
        GeometryKind::Sol => sol_unit(geom),
    }
    .with_context(|| format!("failed to build the {} demo", geom.name()))?;
    tracing::info!(
        geometry = geom.name(),
        solids = demo.scene.solids().len(),
        lights = demo.scene.lights().len(),
        "built demo scene"
    );
    Ok(demo)
}

fn start_at<G: GeometryModel + ?Sized>(geom: &G, v: DVec3) -> Position {
    Position::new(geom.translation_to(&geom.exp_origin(v)), DMat3::IDENTITY)
}

/// # Errors
///
/// See [`demo`].
pub fn euclidean_torus<G: GeometryModel + ?Sized>(geom: &G) -> Result<Demo> {
    let lattice = Lattice::build(geom, &LatticeSpec::Cubic { half_width: 1.0 })?;
    let mut scene = Scene::new(geom.kind());
    scene.add_solid(Solid::local(
        Shape::ball(geom.origin(), 0.3),
        Material::phong(DVec3::new(1.0, 0.2, 0.2)),
    ))?;
    scene.add_light(Light::at(geom, DVec3::new(0.6, 0.6, 0.6), DVec3::new(1.0, 1.0, 0.0)))?;
    scene.add_light(Light::at(geom, DVec3::new(-0.6, 0.6, -0.6), DVec3::new(0.0, 1.0, 1.0)))?;
    Ok(Demo {
        lattice,
        scene,
        start: start_at(geom, DVec3::new(0.0, 0.0, 0.7)),
    })
}

/// # Errors
///
/// See [`demo`].
pub fn hyperbolic_cube<G: GeometryModel + ?Sized>(geom: &G) -> Result<Demo> {
    let lattice = Lattice::build(geom, &LatticeSpec::Cubic { half_width: IDEAL_CUBE_HALF_WIDTH })?;
    let mut scene = Scene::new(geom.kind());

    // Everything but a central ball and a horoball at each ideal vertex
    let centre = Shape::ball(geom.origin(), IDEAL_CUBE_CENTRE_RADIUS);
    let corners = Shape::horoball(DVec3::ONE, IDEAL_CUBE_HOROBALL_OFFSET).mirrored();
    scene.add_solid(Solid::local(
        centre.union(corners).complement(),
        Material::phong(DVec3::new(1.0, 0.2, 0.2)).with_shininess(5.0),
    ))?;
    scene.add_solid(Solid::global(
        Shape::ball(geom.exp_origin(DVec3::new(0.0, 0.0, -0.5)), 0.2),
        Material::phong(DVec3::new(0.2, 0.2, 1.0)),
    ))?;

    for (v, color) in [
        (DVec3::new(1.0, 0.0, 0.0), DVec3::new(1.0, 1.0, 0.0)),
        (DVec3::new(0.0, 1.0, -1.0), DVec3::new(0.0, 1.0, 1.0)),
        (DVec3::new(-1.0, -1.0, 1.0), DVec3::new(1.0, 0.0, 1.0)),
    ] {
        scene.add_light(Light::at(geom, v, color).with_marker())?;
    }

    Ok(Demo {
        lattice,
        scene,
        start: Position::IDENTITY,
    })
}

fn unit_ball_demo<G: GeometryModel + ?Sized>(geom: &G, spec: &LatticeSpec, color: DVec3) -> Result<Demo> {
    let lattice = Lattice::build(geom, spec)?;
    let mut scene = Scene::new(geom.kind());
    scene.add_solid(Solid::local(Shape::ball(geom.origin(), 0.2), Material::phong(color)))?;
    scene.add_light(Light::at(geom, DVec3::new(0.3, 0.3, 0.3), DVec3::ONE))?;
    Ok(Demo {
        lattice,
        scene,
        start: start_at(geom, DVec3::new(0.0, 0.0, 0.4)),
    })
}

/// # Errors
///
/// See [`demo`].
pub fn nil_unit<G: GeometryModel + ?Sized>(geom: &G) -> Result<Demo> {
    unit_ball_demo(geom, &LatticeSpec::Cubic { half_width: 0.5 }, DVec3::new(0.2, 1.0, 0.4))
}

/// # Errors
///
/// See [`demo`].
pub fn sol_unit<G: GeometryModel + ?Sized>(geom: &G) -> Result<Demo> {
    // Unit x and y translations commute and generate a discrete subgroup.
    // A z translation would rescale them into a dense one, so the cell is
    // an unbounded slab in z.
    let spec = LatticeSpec::Translations {
        vectors: vec![[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
        twists: Vec::new(),
    };
    unit_ball_demo(geom, &spec, DVec3::new(1.0, 0.6, 0.1))
}
