use geometry::{Euclidean, Geometry, GeometryKind, GeometryModel, Hyperbolic, Point, Position};
use glam::{DMat3, DVec3};
use lattice::{Lattice, LatticeSpec};
use render::{Action, ConfigError, Material, RenderConfig, RenderContext, Scene, Shape, Solid};

fn config() -> RenderConfig {
    RenderConfig {
        speed_translation: 1.0,
        ..RenderConfig::default()
    }
}

fn ball_scene(kind: GeometryKind) -> Scene {
    let mut scene = Scene::new(kind);
    scene
        .add_solid(Solid::local(Shape::ball(Point::ORIGIN, 0.3), Material::default()))
        .unwrap();
    scene
}

#[test]
fn idle_update_only_counts_the_frame() {
    let mut context = RenderContext::new(Euclidean, Lattice::trivial(), ball_scene(GeometryKind::Euclidean), config()).unwrap();
    let report = context.update(0.016);
    assert_eq!(report.frame, 1);
    assert_eq!(report.folds, 0);
    assert!(report.converged);
    assert!(report.distance.abs() < 1e-12);
    assert_eq!(*context.position(), Position::IDENTITY);
}

#[test]
fn forward_key_moves_along_the_view() {
    let mut context = RenderContext::new(Euclidean, Lattice::trivial(), ball_scene(GeometryKind::Euclidean), config()).unwrap();
    assert!(context.controls_mut().press(Action::TranslateZNeg));
    let report = context.update(0.5);
    assert!((report.distance - 0.5).abs() < 1e-12, "moved {}", report.distance);
    let p = context.position().observer_point(&Euclidean);
    assert!((p.xyz() - DVec3::new(0.0, 0.0, -0.5)).length() < 1e-12, "p={p:?}");
}

#[test]
fn rotation_turns_the_facing_by_half_the_speed() {
    let mut context = RenderContext::new(Euclidean, Lattice::trivial(), ball_scene(GeometryKind::Euclidean), config()).unwrap();
    context.controls_mut().press(Action::RotateYPos);
    context.update(1.0);
    // speed_rotation 0.4 over one second turns by 0.2 radians
    let expected = DMat3::from_rotation_y(0.2);
    let facing = context.position().facing;
    assert!(facing.abs_diff_eq(expected, 1e-12), "facing={facing:?}");
}

#[test]
fn crossing_a_face_folds_and_tracks_the_cell() {
    let lattice = Lattice::build(&Euclidean, &LatticeSpec::Cubic { half_width: 1.0 }).unwrap();
    let mut context = RenderContext::new(Euclidean, lattice, ball_scene(GeometryKind::Euclidean), config()).unwrap();
    context.controls_mut().press(Action::TranslateXPos);
    let folds: usize = (0..15).map(|_| context.update(0.1).folds).sum();
    assert_eq!(folds, 1);
    let folded = context.position().observer_point(&Euclidean);
    assert!((folded.xyz().x + 0.5).abs() < 1e-9, "folded={folded:?}");
    let absolute = context.absolute_observer();
    assert!((absolute.xyz() - DVec3::new(1.5, 0.0, 0.0)).length() < 1e-9, "absolute={absolute:?}");
    let cell = context.cell();
    assert!(cell.boost.multiply(&cell.inverse).abs_diff_eq(&geometry::Isometry::IDENTITY, 1e-9));
}

#[test]
fn hyperbolic_cell_boost_keeps_absolute_distance() {
    let geom = Geometry::from(GeometryKind::Hyperbolic);
    let lattice = Lattice::build(&geom, &LatticeSpec::Cubic { half_width: 0.5 }).unwrap();
    let mut context = RenderContext::new(geom, lattice, ball_scene(GeometryKind::Hyperbolic), config()).unwrap();
    context.controls_mut().press(Action::TranslateXPos);
    let mut folds = 0;
    for _ in 0..30 {
        folds += context.update(0.1).folds;
    }
    assert!(folds >= 2, "expected to cross at least two faces, folded {folds} times");
    let travelled = Hyperbolic.distance(&Point::ORIGIN, &context.absolute_observer());
    assert!((travelled - 3.0).abs() < 1e-6, "travelled {travelled}");
    let k = Hyperbolic.project_to_model(&context.position().observer_point(&Hyperbolic));
    assert!(k.abs().max_element() <= 0.5 + 1e-9, "observer left the cell: {k:?}");
}

#[test]
fn set_position_folds_into_the_cell() {
    let lattice = Lattice::build(&Euclidean, &LatticeSpec::Cubic { half_width: 1.0 }).unwrap();
    let start = Position::new(Euclidean.translation_to(&Point::new(4.2, 0.0, 0.0, 1.0)), DMat3::IDENTITY);
    let context = RenderContext::new(Euclidean, lattice, ball_scene(GeometryKind::Euclidean), config())
        .unwrap()
        .with_position(start);
    let folded = context.position().observer_point(&Euclidean);
    assert!((folded.xyz().x - 0.2).abs() < 1e-9, "folded={folded:?}");
    assert!((context.absolute_observer().xyz().x - 4.2).abs() < 1e-9);
}

#[test]
fn scene_for_another_geometry_is_rejected() {
    let result = RenderContext::new(Euclidean, Lattice::trivial(), ball_scene(GeometryKind::Hyperbolic), config());
    assert!(matches!(result, Err(ConfigError::Invalid { field: "scene", .. })));
}

#[test]
fn snapshot_places_eyes_an_ipd_apart() {
    let config = RenderConfig {
        stereo: true,
        ipd: 0.1,
        ..config()
    };
    let context = RenderContext::new(Euclidean, Lattice::trivial(), ball_scene(GeometryKind::Euclidean), config).unwrap();
    let snapshot = context.snapshot();
    assert!(snapshot.stereo);
    let left = snapshot.left_eye.observer_point(&Euclidean);
    let right = snapshot.right_eye.observer_point(&Euclidean);
    assert!((right.xyz() - left.xyz() - DVec3::new(0.1, 0.0, 0.0)).length() < 1e-12);
    assert_eq!(snapshot.resolution, [320, 240]);
}
