//! # Lighting
//!
//! Phong shading at a ray hit. Lights are stored in absolute coordinates
//! and are not tiled. Each one is carried into the hit's folded frame
//! through the inverse cell boost and the hit's accumulated correction
//! before any direction or distance is measured.

use geometry::{apply_to_point, direction_to, gradient, GeometryModel, Vector};
use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::march::{CellFrame, HitKind, RayHit};
use crate::material::Material;
use crate::scene::{Scene, Solid};

/// Keeps the falloff finite at the light itself.
const ATTENUATION_OFFSET: f64 = 0.01;

/// Light falloff as a function of geodesic distance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attenuation {
    Linear,
    InverseSquare,
    /// Area of the hyperbolic sphere, the physically correct falloff in H3.
    SinhSquared,
}

impl Attenuation {
    #[must_use]
    pub fn falloff(self, distance: f64) -> f64 {
        match self {
            Attenuation::Linear => distance,
            Attenuation::InverseSquare => distance * distance,
            Attenuation::SinhSquared => distance.sinh().powi(2),
        }
    }

    /// Scale applied to a light of the given intensity at `distance`.
    #[must_use]
    pub fn factor(self, intensity: f64, distance: f64) -> f64 {
        intensity / (ATTENUATION_OFFSET + self.falloff(distance))
    }
}

/// Outward unit normal of the solid hit by `hit`.
///
/// Global solids are evaluated in absolute coordinates, so their distance
/// function is pulled back through the cell boost.
pub fn surface_normal<G: GeometryModel + ?Sized>(
    geom: &G,
    solid: &Solid,
    hit: &RayHit,
    cell: &CellFrame,
    eps: f64,
) -> Vector {
    if solid.is_global {
        gradient(geom, &hit.vector.pos, eps, |q| {
            solid.shape.sdf(geom, &apply_to_point(geom, &cell.boost, q))
        })
    } else {
        solid.shape.gradient(geom, &hit.vector.pos, eps)
    }
}

/// Colour of the pixel whose ray produced `hit`. NOTHING is black.
pub fn shade<G: GeometryModel + ?Sized>(
    geom: &G,
    scene: &Scene,
    hit: &RayHit,
    cell: &CellFrame,
    attenuation: Attenuation,
    threshold: f64,
) -> DVec3 {
    let solid = match hit.kind {
        HitKind::Nothing => return DVec3::ZERO,
        HitKind::Light => {
            return hit
                .solid
                .and_then(|id| scene.lights().iter().find(|l| l.id == id))
                .map_or(DVec3::ONE, |l| l.color.clamp(DVec3::ZERO, DVec3::ONE));
        }
        HitKind::Local | HitKind::Global => match hit.solid.and_then(|id| scene.solid(id)) {
            Some(solid) => solid,
            None => return DVec3::ZERO,
        },
    };

    let color = match solid.material {
        Material::Basic { color } => color,
        Material::Normal => {
            let n = surface_normal(geom, solid, hit, cell, 10.0 * threshold);
            0.5 * (n.dir + DVec3::ONE)
        }
        Material::Phong {
            color,
            ambient,
            diffuse,
            specular,
            shininess,
        } => {
            let normal = surface_normal(geom, solid, hit, cell, 10.0 * threshold).dir;
            let sample = hit.vector.pos;
            let view = -hit.vector.dir;
            let to_cell = hit.total_fix.multiply(&cell.inverse);
            let mut total = ambient * color;
            for light in scene.lights() {
                let translated = apply_to_point(geom, &to_cell, &light.position);
                let l = direction_to(geom, &sample, &translated);
                let r = 2.0 * l.dot(normal) * normal - l;
                let n_dot_l = l.dot(normal).max(0.0);
                let r_dot_v = r.dot(view).max(0.0);
                let att = attenuation.factor(light.intensity, geom.distance(&sample, &translated));
                total += att * light.color * (diffuse * n_dot_l * color + specular * r_dot_v.powf(shininess));
            }
            total
        }
    };
    color.clamp(DVec3::ZERO, DVec3::ONE)
}
