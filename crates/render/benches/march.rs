use criterion::{criterion_group, criterion_main, Criterion};
use geometry::{Euclidean, GeometryKind, GeometryModel, Hyperbolic, Point, Position};
use glam::{DMat3, DVec3};
use lattice::{Lattice, LatticeSpec};
use render::{march, render_frame, CellFrame, Light, MarchSettings, Material, RenderConfig, RenderContext, Scene, Shape, Solid};

fn ball_scene(kind: GeometryKind) -> Scene {
    let mut scene = Scene::new(kind);
    scene
        .add_solid(Solid::local(Shape::ball(Point::ORIGIN, 0.3), Material::phong(DVec3::ONE)))
        .unwrap();
    scene.add_light(Light::new(Point::new(0.0, 0.5, 0.5, 1.0), DVec3::ONE)).unwrap();
    scene
}

fn bench_single_ray(c: &mut Criterion) {
    let scene = ball_scene(GeometryKind::Euclidean);
    let lattice = Lattice::build(&Euclidean, &LatticeSpec::Cubic { half_width: 1.0 }).unwrap();
    let settings = MarchSettings::default();
    let ray = Position::IDENTITY.push_forward(&Euclidean, DVec3::new(0.3, 0.2, -1.0).normalize());
    c.bench_function("march_euclidean_torus", |b| {
        b.iter(|| march(&Euclidean, &scene, &lattice, &CellFrame::IDENTITY, &settings, &ray))
    });

    let scene = ball_scene(GeometryKind::Hyperbolic);
    let lattice = Lattice::build(&Hyperbolic, &LatticeSpec::Cubic { half_width: 0.5 }).unwrap();
    let ray = Position::IDENTITY.push_forward(&Hyperbolic, DVec3::new(0.3, 0.2, -1.0).normalize());
    c.bench_function("march_hyperbolic", |b| {
        b.iter(|| march(&Hyperbolic, &scene, &lattice, &CellFrame::IDENTITY, &settings, &ray))
    });
}

fn bench_frame(c: &mut Criterion) {
    let config = RenderConfig {
        width: 64,
        height: 48,
        ..RenderConfig::default()
    };
    let lattice = Lattice::build(&Euclidean, &LatticeSpec::Cubic { half_width: 1.0 }).unwrap();
    let start = Position::new(Euclidean.translation_to(&Point::new(0.0, 0.0, 0.7, 1.0)), DMat3::IDENTITY);
    let context = RenderContext::new(Euclidean, lattice, ball_scene(GeometryKind::Euclidean), config)
        .unwrap()
        .with_position(start);
    let snapshot = context.snapshot();
    c.bench_function("render_frame_64x48", |b| {
        b.iter(|| render_frame(context.geometry(), context.scene(), context.lattice(), &snapshot, context.config()))
    });
}

criterion_group!(benches, bench_single_ray, bench_frame);
criterion_main!(benches);
