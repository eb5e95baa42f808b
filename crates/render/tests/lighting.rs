use geometry::{apply_to_vector, Euclidean, GeometryKind, GeometryModel, Hyperbolic, Point, Vector};
use glam::DVec3;
use lattice::{Lattice, LatticeSpec};
use render::{march, shade, Attenuation, CellFrame, HitKind, Light, MarchSettings, Material, Scene, Shape, Solid};

fn lit_ball(material: Material) -> Scene {
    let mut scene = Scene::new(GeometryKind::Euclidean);
    scene.add_solid(Solid::local(Shape::ball(Point::ORIGIN, 0.3), material)).unwrap();
    scene.add_light(Light::new(Point::new(0.0, 0.0, 2.0, 1.0), DVec3::ONE)).unwrap();
    scene
}

fn head_on_hit(scene: &Scene, lattice: &Lattice) -> render::RayHit {
    let ray = Vector::new(Point::new(0.0, 0.0, 2.0, 1.0), DVec3::NEG_Z);
    march(&Euclidean, scene, lattice, &CellFrame::IDENTITY, &MarchSettings::default(), &ray)
}

#[test]
fn phong_head_on_matches_closed_form() {
    let scene = lit_ball(Material::phong(DVec3::ONE));
    let hit = head_on_hit(&scene, &Lattice::trivial());
    assert_eq!(hit.kind, HitKind::Local);
    let color = shade(&Euclidean, &scene, &hit, &CellFrame::IDENTITY, Attenuation::InverseSquare, 0.001);
    // ambient + att * (diffuse + specular), with the light 1.7 away on the normal
    let expected = 0.1 + (0.7 + 0.4) / (0.01 + 1.7 * 1.7);
    for channel in color.to_array() {
        assert!((channel - expected).abs() < 1e-2, "color {color:?}, expected {expected}");
    }
}

#[test]
fn normal_material_shows_outward_normal() {
    let scene = lit_ball(Material::Normal);
    let hit = head_on_hit(&scene, &Lattice::trivial());
    let color = shade(&Euclidean, &scene, &hit, &CellFrame::IDENTITY, Attenuation::Linear, 0.001);
    assert!((color - DVec3::new(0.5, 0.5, 1.0)).length() < 1e-3, "color {color:?}");
}

#[test]
fn nothing_is_black_and_markers_take_light_colour() {
    let mut scene = Scene::new(GeometryKind::Euclidean);
    scene
        .add_light(Light::new(Point::new(0.0, 0.0, -2.0, 1.0), DVec3::new(1.0, 0.5, 0.0)).with_marker())
        .unwrap();
    let cell = CellFrame::IDENTITY;
    let lattice = Lattice::trivial();

    let away = Vector::at_origin(DVec3::Z);
    let miss = march(&Euclidean, &scene, &lattice, &cell, &MarchSettings::default(), &away);
    assert_eq!(shade(&Euclidean, &scene, &miss, &cell, Attenuation::Linear, 0.001), DVec3::ZERO);

    let towards = Vector::at_origin(DVec3::NEG_Z);
    let hit = march(&Euclidean, &scene, &lattice, &cell, &MarchSettings::default(), &towards);
    assert_eq!(hit.kind, HitKind::Light);
    let color = shade(&Euclidean, &scene, &hit, &cell, Attenuation::Linear, 0.001);
    assert_eq!(color, DVec3::new(1.0, 0.5, 0.0));
}

#[test]
fn light_behind_surface_leaves_only_ambient() {
    let mut scene = Scene::new(GeometryKind::Euclidean);
    scene
        .add_solid(Solid::local(Shape::ball(Point::ORIGIN, 0.3), Material::phong(DVec3::ONE)))
        .unwrap();
    scene.add_light(Light::new(Point::new(0.0, 0.0, -2.0, 1.0), DVec3::ONE)).unwrap();
    let hit = head_on_hit(&scene, &Lattice::trivial());
    let color = shade(&Euclidean, &scene, &hit, &CellFrame::IDENTITY, Attenuation::Linear, 0.001);
    assert!((color - DVec3::splat(0.1)).length() < 1e-6, "color {color:?}");
}

#[test]
fn folded_hit_measures_distance_to_the_real_light() {
    // The hit lands in the neighbouring cell; total_fix carries the one
    // light (absolute x = 0.5) into the hit's folded frame
    let mut scene = Scene::new(GeometryKind::Euclidean);
    scene
        .add_solid(Solid::local(Shape::ball(Point::ORIGIN, 0.3), Material::phong(DVec3::ONE)))
        .unwrap();
    scene.add_light(Light::new(Point::new(0.5, 0.0, 0.0, 1.0), DVec3::ONE)).unwrap();
    let lattice = Lattice::build(&Euclidean, &LatticeSpec::Cubic { half_width: 1.0 }).unwrap();
    let ray = Vector::new(Point::new(0.5, 0.0, 0.0, 1.0), DVec3::X);
    let hit = march(&Euclidean, &scene, &lattice, &CellFrame::IDENTITY, &MarchSettings::default(), &ray);
    assert_eq!(hit.kind, HitKind::Local);
    let color = shade(&Euclidean, &scene, &hit, &CellFrame::IDENTITY, Attenuation::InverseSquare, 0.001);
    // The translated light sits at x = -1.5, right behind the lit -x side
    let expected = 0.1 + (0.7 + 0.4) / (0.01 + 1.2 * 1.2);
    assert!((color.x - expected).abs() < 1e-2, "color {color:?}, expected {expected}");
}

#[test]
fn hyperbolic_shading_stays_in_range() {
    let mut scene = Scene::new(GeometryKind::Hyperbolic);
    scene
        .add_solid(Solid::local(Shape::ball(Point::ORIGIN, 0.3), Material::phong(DVec3::new(0.2, 0.6, 1.0))))
        .unwrap();
    scene.add_light(Light::at(&Hyperbolic, DVec3::new(0.3, 0.4, 1.5), DVec3::ONE)).unwrap();
    let boost = Hyperbolic.translation_to(&Hyperbolic.exp_origin(DVec3::new(0.0, 0.0, 2.0)));
    let ray = apply_to_vector(&Hyperbolic, &boost, &Vector::at_origin(DVec3::NEG_Z));
    let cell = CellFrame::IDENTITY;
    let hit = march(&Hyperbolic, &scene, &Lattice::trivial(), &cell, &MarchSettings::default(), &ray);
    assert_eq!(hit.kind, HitKind::Local);
    let color = shade(&Hyperbolic, &scene, &hit, &cell, Attenuation::SinhSquared, 0.001);
    assert!(color.min_element() >= 0.0 && color.max_element() <= 1.0);
    assert!(color.z > 0.1, "lit side should exceed ambient, got {color:?}");
}
