//! # Ray marcher
//!
//! Marches one ray through a tiled scene in two phases.
//!
//! The local phase walks the ray inside the fundamental cell. Whenever the
//! sample point leaves the cell it is folded back through the matching
//! inverse generator, which is also accumulated into `total_fix`, and the
//! walk restarts from the folded point. Local solids are therefore seen in
//! every copy of the cell.
//!
//! The global phase then walks the unfolded ray from the eye up to the
//! depth the local phase reached, looking for solids that exist only once.
//! A global hit in front of the local one replaces it.
//!
//! Both phases are bounded by `max_steps` and `max_dist`, which are all
//! that stop a ray that never finds a surface.

use geometry::{apply_to_point, apply_to_vector, geodesic, GeometryModel, Isometry, Vector};
use lattice::Lattice;

use crate::scene::{Scene, Target};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarchSettings {
    pub max_steps: usize,
    /// Depth at which marching starts, and restarts after a fold.
    pub min_dist: f64,
    pub max_dist: f64,
    /// A sample closer than this to a surface is a hit.
    pub threshold: f64,
    /// Largest single local step, so that folding is not skipped over.
    pub step_cap: f64,
}

impl Default for MarchSettings {
    fn default() -> Self {
        Self {
            max_steps: 50,
            min_dist: 0.0,
            max_dist: 30.0,
            threshold: 0.001,
            step_cap: 0.5,
        }
    }
}

/// Where the cell sits in absolute coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellFrame {
    /// Sends cell coordinates to absolute coordinates.
    pub boost: Isometry,
    pub inverse: Isometry,
}

impl Default for CellFrame {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl CellFrame {
    pub const IDENTITY: Self = Self {
        boost: Isometry::IDENTITY,
        inverse: Isometry::IDENTITY,
    };

    #[must_use]
    pub const fn new(boost: Isometry, inverse: Isometry) -> Self {
        Self { boost, inverse }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitKind {
    Nothing,
    Local,
    Global,
    /// The marker ball of a light.
    Light,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    pub kind: HitKind,
    /// Id of the solid (or light, for [`HitKind::Light`]) that was hit.
    pub solid: Option<usize>,
    /// Hit point and the ray's unit tangent there. For local hits this is
    /// in folded coordinates.
    pub vector: Vector,
    /// Product of the fold isometries applied along the ray, newest on the
    /// left. Identity for global hits.
    pub total_fix: Isometry,
    /// Distance travelled along the ray.
    pub depth: f64,
    /// Marching steps used by both phases together.
    pub steps: usize,
}

impl RayHit {
    fn nothing(ray: &Vector, depth: f64, steps: usize) -> Self {
        Self {
            kind: HitKind::Nothing,
            solid: None,
            vector: *ray,
            total_fix: Isometry::IDENTITY,
            depth,
            steps,
        }
    }

    #[must_use]
    pub fn is_hit(&self) -> bool {
        self.kind != HitKind::Nothing
    }
}

fn advance<G: GeometryModel + ?Sized>(geom: &G, v: &Vector, t: f64) -> Vector {
    if t == 0.0 {
        *v
    } else {
        geodesic(geom, v, t)
    }
}

fn target_id(scene: &Scene, target: Option<Target>) -> (HitKind, Option<usize>) {
    match target {
        Some(Target::Solid(index)) => {
            let solid = &scene.solids()[index];
            let kind = if solid.is_global { HitKind::Global } else { HitKind::Local };
            (kind, Some(solid.id))
        }
        Some(Target::Light(index)) => (HitKind::Light, Some(scene.lights()[index].id)),
        None => (HitKind::Nothing, None),
    }
}

/// March `ray`, given in cell coordinates, through `scene`.
pub fn march<G: GeometryModel + ?Sized>(
    geom: &G,
    scene: &Scene,
    lattice: &Lattice,
    cell: &CellFrame,
    settings: &MarchSettings,
    ray: &Vector,
) -> RayHit {
    let mut best = RayHit::nothing(ray, settings.max_dist, 0);
    let mut steps = 0;

    // Local phase
    let mut local = advance(geom, ray, settings.min_dist);
    let mut total_fix = Isometry::IDENTITY;
    let mut global_depth = settings.min_dist;
    while steps < settings.max_steps && global_depth < settings.max_dist {
        steps += 1;
        if let Some(index) = lattice.outside_face(geom, &local.pos) {
            let fix = &lattice.inverse_generators()[index];
            total_fix = geom.compose(fix, &total_fix);
            local = advance(geom, &apply_to_vector(geom, fix, &local), settings.min_dist);
            global_depth += settings.min_dist;
            continue;
        }
        let (distance, target) = scene.local_sdf(geom, &local.pos);
        if distance < settings.threshold {
            let (kind, solid) = target_id(scene, target);
            best = RayHit {
                kind,
                solid,
                vector: local,
                total_fix: geom.renormalize_isometry(&total_fix),
                depth: global_depth,
                steps,
            };
            break;
        }
        let step = distance.min(settings.step_cap);
        local = geodesic(geom, &local, step);
        global_depth += step;
    }

    // Global phase
    let budget = global_depth.min(settings.max_dist);
    if scene.has_global_items() {
        let mut global = advance(geom, ray, settings.min_dist);
        let mut depth = settings.min_dist;
        for _ in 0..settings.max_steps {
            steps += 1;
            let absolute = apply_to_point(geom, &cell.boost, &global.pos);
            let (distance, target) = scene.global_sdf(geom, &absolute);
            if distance < settings.threshold {
                let (kind, solid) = target_id(scene, target);
                best = RayHit {
                    kind,
                    solid,
                    vector: global,
                    total_fix: Isometry::IDENTITY,
                    depth,
                    steps,
                };
                break;
            }
            depth += distance;
            if depth >= budget {
                break;
            }
            global = geodesic(geom, &global, distance);
        }
    }

    best.steps = steps;
    if !best.is_hit() {
        best.depth = budget;
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use geometry::{Euclidean, GeometryKind, Point};
    use glam::DVec3;

    use crate::material::Material;
    use crate::scene::Solid;
    use crate::shapes::Shape;

    #[test]
    fn test_starting_inside_a_solid_is_an_immediate_hit() {
        let mut scene = Scene::new(GeometryKind::Euclidean);
        scene.add_solid(Solid::local(Shape::ball(Point::ORIGIN, 0.5), Material::Normal)).unwrap();
        let ray = Vector::at_origin(DVec3::NEG_Z);
        let hit = march(&Euclidean, &scene, &Lattice::trivial(), &CellFrame::IDENTITY, &MarchSettings::default(), &ray);
        assert_eq!(hit.kind, HitKind::Local);
        assert_eq!(hit.steps, 1);
        assert!(hit.depth.abs() < 1e-12);
    }

    #[test]
    fn test_empty_scene_spends_the_step_budget() {
        let scene = Scene::new(GeometryKind::Euclidean);
        let settings = MarchSettings {
            max_steps: 8,
            ..MarchSettings::default()
        };
        let ray = Vector::at_origin(DVec3::X);
        let hit = march(&Euclidean, &scene, &Lattice::trivial(), &CellFrame::IDENTITY, &settings, &ray);
        assert_eq!(hit.kind, HitKind::Nothing);
        assert_eq!(hit.steps, 8);
        assert!((hit.depth - 4.0).abs() < 1e-12, "depth {}", hit.depth);
    }
}
