//! # Scene registration
//!
//! A [`Scene`] owns every solid and light. Items are validated against the
//! geometry when they are added and receive an id from a counter shared by
//! solids and lights. After setup the scene is only read.
//!
//! Local solids live in the fundamental cell and repeat with the lattice.
//! Global solids and light markers exist once, in absolute coordinates.

use geometry::{GeometryKind, GeometryModel, Point};
use glam::DVec3;

use crate::error::SceneError;
use crate::material::Material;
use crate::shapes::Shape;

pub const MAX_LIGHTS: usize = 8;
pub const MAX_SOLIDS: usize = 64;

#[derive(Clone, Debug, PartialEq)]
pub struct Solid {
    /// Assigned by [`Scene::add_solid`].
    pub id: usize,
    pub shape: Shape,
    pub material: Material,
    pub is_global: bool,
}

impl Solid {
    /// A solid repeated in every cell.
    #[must_use]
    pub fn local(shape: Shape, material: Material) -> Self {
        Self {
            id: 0,
            shape,
            material,
            is_global: false,
        }
    }

    /// A solid placed once in absolute coordinates.
    #[must_use]
    pub fn global(shape: Shape, material: Material) -> Self {
        Self {
            id: 0,
            shape,
            material,
            is_global: true,
        }
    }

    /// Union of two solids; keeps the material of `self`.
    ///
    /// # Errors
    ///
    /// [`SceneError::MixedComposite`] if one operand is local and the other global.
    pub fn union(self, other: Solid) -> Result<Solid, SceneError> {
        self.combine(other, Shape::union)
    }

    /// Intersection of two solids; keeps the material of `self`.
    ///
    /// # Errors
    ///
    /// [`SceneError::MixedComposite`] if one operand is local and the other global.
    pub fn intersection(self, other: Solid) -> Result<Solid, SceneError> {
        self.combine(other, Shape::intersection)
    }

    #[must_use]
    pub fn complement(self) -> Solid {
        Solid {
            shape: self.shape.complement(),
            ..self
        }
    }

    fn combine(self, other: Solid, op: fn(Shape, Shape) -> Shape) -> Result<Solid, SceneError> {
        if self.is_global != other.is_global {
            return Err(SceneError::MixedComposite);
        }
        Ok(Solid {
            id: self.id,
            shape: op(self.shape, other.shape),
            material: self.material,
            is_global: self.is_global,
        })
    }
}

/// A point light, stored in absolute coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Light {
    /// Assigned by [`Scene::add_light`].
    pub id: usize,
    pub position: Point,
    pub color: DVec3,
    pub intensity: f64,
    /// When set, the light is drawn as a global ball of this radius.
    pub marker_radius: Option<f64>,
}

impl Light {
    #[must_use]
    pub fn new(position: Point, color: DVec3) -> Self {
        Self {
            id: 0,
            position,
            color,
            intensity: 1.0,
            marker_radius: None,
        }
    }

    /// A light at the end of the geodesic from the origin along `v`.
    #[must_use]
    pub fn at<G: GeometryModel + ?Sized>(geom: &G, v: DVec3, color: DVec3) -> Self {
        Self::new(geom.exp_origin(v), color)
    }

    #[must_use]
    pub fn with_intensity(mut self, intensity: f64) -> Self {
        self.intensity = intensity;
        self
    }

    /// Draw the light as a small ball, sized inversely to its intensity.
    #[must_use]
    pub fn with_marker(mut self) -> Self {
        self.marker_radius = Some(1.0 / (10.0 * self.intensity.max(f64::EPSILON)));
        self
    }
}

/// What a distance evaluation found closest, by index into the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    Solid(usize),
    Light(usize),
}

#[derive(Clone, Debug)]
pub struct Scene {
    kind: GeometryKind,
    solids: Vec<Solid>,
    lights: Vec<Light>,
    next_id: usize,
}

impl Scene {
    #[must_use]
    pub fn new(kind: GeometryKind) -> Self {
        Self {
            kind,
            solids: Vec::new(),
            lights: Vec::new(),
            next_id: 0,
        }
    }

    #[must_use]
    pub fn kind(&self) -> GeometryKind {
        self.kind
    }

    /// Validate and register a solid, returning its id.
    ///
    /// # Errors
    ///
    /// Any [`Shape::validate`] error, or [`SceneError::TooManySolids`].
    pub fn add_solid(&mut self, mut solid: Solid) -> Result<usize, SceneError> {
        if self.solids.len() >= MAX_SOLIDS {
            return Err(SceneError::TooManySolids(MAX_SOLIDS));
        }
        solid.shape.validate(self.kind)?;
        solid.id = self.issue_id();
        tracing::info!(
            id = solid.id,
            shape = solid.shape.name(),
            global = solid.is_global,
            "added solid"
        );
        let id = solid.id;
        self.solids.push(solid);
        Ok(id)
    }

    /// Register a light, returning its id.
    ///
    /// # Errors
    ///
    /// [`SceneError::TooManyLights`] past [`MAX_LIGHTS`], or
    /// [`SceneError::InvalidRadius`] for a degenerate marker.
    pub fn add_light(&mut self, mut light: Light) -> Result<usize, SceneError> {
        if self.lights.len() >= MAX_LIGHTS {
            return Err(SceneError::TooManyLights(MAX_LIGHTS));
        }
        if let Some(radius) = light.marker_radius {
            if !(radius > 0.0 && radius.is_finite()) {
                return Err(SceneError::InvalidRadius(radius));
            }
        }
        light.id = self.issue_id();
        tracing::info!(id = light.id, "added light");
        let id = light.id;
        self.lights.push(light);
        Ok(id)
    }

    fn issue_id(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    #[must_use]
    pub fn solids(&self) -> &[Solid] {
        &self.solids
    }

    #[must_use]
    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    #[must_use]
    pub fn solid(&self, id: usize) -> Option<&Solid> {
        self.solids.iter().find(|s| s.id == id)
    }

    #[must_use]
    pub fn has_global_items(&self) -> bool {
        self.solids.iter().any(|s| s.is_global) || self.lights.iter().any(|l| l.marker_radius.is_some())
    }

    /// Distance to the nearest local solid at a point of the cell.
    pub fn local_sdf<G: GeometryModel + ?Sized>(&self, geom: &G, p: &Point) -> (f64, Option<Target>) {
        let mut best = (f64::INFINITY, None);
        for (index, solid) in self.solids.iter().enumerate().filter(|(_, s)| !s.is_global) {
            let d = solid.shape.sdf(geom, p);
            if d < best.0 {
                best = (d, Some(Target::Solid(index)));
            }
        }
        best
    }

    /// Distance to the nearest global solid or light marker at a point in
    /// absolute coordinates.
    pub fn global_sdf<G: GeometryModel + ?Sized>(&self, geom: &G, p: &Point) -> (f64, Option<Target>) {
        let mut best = (f64::INFINITY, None);
        for (index, light) in self.lights.iter().enumerate() {
            if let Some(radius) = light.marker_radius {
                let d = geom.distance(&light.position, p) - radius;
                if d < best.0 {
                    best = (d, Some(Target::Light(index)));
                }
            }
        }
        for (index, solid) in self.solids.iter().enumerate().filter(|(_, s)| s.is_global) {
            let d = solid.shape.sdf(geom, p);
            if d < best.0 {
                best = (d, Some(Target::Solid(index)));
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geometry::Euclidean;

    #[test]
    fn test_ids_are_shared_between_solids_and_lights() {
        let mut scene = Scene::new(GeometryKind::Euclidean);
        let a = scene.add_solid(Solid::local(Shape::ball(Point::ORIGIN, 0.3), Material::Normal)).unwrap();
        let b = scene.add_light(Light::new(Point::ORIGIN, DVec3::ONE)).unwrap();
        let c = scene.add_solid(Solid::global(Shape::ball(Point::ORIGIN, 0.1), Material::Normal)).unwrap();
        assert_eq!((a, b, c), (0, 1, 2));
        assert_eq!(scene.solid(2).map(|s| s.is_global), Some(true));
    }

    #[test]
    fn test_local_and_global_sdf_are_separate() {
        let mut scene = Scene::new(GeometryKind::Euclidean);
        scene.add_solid(Solid::local(Shape::ball(Point::ORIGIN, 0.3), Material::Normal)).unwrap();
        scene
            .add_solid(Solid::global(Shape::ball(Point::new(5.0, 0.0, 0.0, 1.0), 1.0), Material::Normal))
            .unwrap();
        let p = Point::new(1.0, 0.0, 0.0, 1.0);
        let (local, target) = scene.local_sdf(&Euclidean, &p);
        assert!((local - 0.7).abs() < 1e-12);
        assert_eq!(target, Some(Target::Solid(0)));
        let (global, target) = scene.global_sdf(&Euclidean, &p);
        assert!((global - 3.0).abs() < 1e-12);
        assert_eq!(target, Some(Target::Solid(1)));
    }
}
