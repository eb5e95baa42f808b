use geometry::{Euclidean, GeometryKind, GeometryModel, Point, Position};
use glam::{DMat3, DVec3};
use lattice::Lattice;
use render::{render_frame, render_pixel, save_frame, Light, Material, RenderConfig, RenderContext, Scene, Shape, Solid};

fn small_config() -> RenderConfig {
    RenderConfig {
        width: 16,
        height: 12,
        ..RenderConfig::default()
    }
}

fn ball_in_front(config: RenderConfig) -> RenderContext<Euclidean> {
    let mut scene = Scene::new(GeometryKind::Euclidean);
    scene
        .add_solid(Solid::local(Shape::ball(Point::ORIGIN, 0.3), Material::phong(DVec3::new(1.0, 0.2, 0.2))))
        .unwrap();
    scene.add_light(Light::new(Point::new(0.0, 0.0, 2.0, 1.0), DVec3::ONE)).unwrap();
    let start = Position::new(Euclidean.translation_to(&Point::new(0.0, 0.0, 2.0, 1.0)), DMat3::IDENTITY);
    RenderContext::new(Euclidean, Lattice::trivial(), scene, config)
        .unwrap()
        .with_position(start)
}

#[test]
fn ball_fills_the_centre_and_misses_the_corner() {
    let context = ball_in_front(small_config());
    let snapshot = context.snapshot();
    let image = render_frame(context.geometry(), context.scene(), context.lattice(), &snapshot, context.config());
    assert_eq!(image.dimensions(), (16, 12));

    let centre = image.get_pixel(8, 6);
    assert!(centre[0] > 100, "centre {centre:?}");
    assert_eq!(centre[3], 255);
    assert_eq!(image.get_pixel(0, 0).0, [0, 0, 0, 255]);
}

#[test]
fn single_pixel_matches_the_frame() {
    let context = ball_in_front(small_config());
    let snapshot = context.snapshot();
    let image = render_frame(context.geometry(), context.scene(), context.lattice(), &snapshot, context.config());
    for (x, y) in [(8, 6), (7, 5), (0, 11), (15, 0)] {
        let pixel = render_pixel(context.geometry(), context.scene(), context.lattice(), &snapshot, context.config(), x, y);
        assert_eq!(pixel, *image.get_pixel(x, y), "pixel ({x}, {y})");
    }
}

#[test]
fn stereo_frame_shows_the_ball_in_both_halves() {
    let config = RenderConfig {
        width: 32,
        stereo: true,
        ..small_config()
    };
    let context = ball_in_front(config);
    let snapshot = context.snapshot();
    let image = render_frame(context.geometry(), context.scene(), context.lattice(), &snapshot, context.config());
    assert!(image.get_pixel(8, 6)[0] > 100);
    assert!(image.get_pixel(24, 6)[0] > 100);
}

#[test]
fn empty_resolution_renders_nothing() {
    // Validation rejects a zero width, so edit the snapshot by hand
    let context = ball_in_front(small_config());
    let mut snapshot = context.snapshot();
    snapshot.resolution = [0, 12];
    let image = render_frame(context.geometry(), context.scene(), context.lattice(), &snapshot, context.config());
    assert_eq!(image.dimensions(), (0, 12));
}

#[test]
fn saved_frame_reopens_as_png() {
    let context = ball_in_front(small_config());
    let snapshot = context.snapshot();
    let image = render_frame(context.geometry(), context.scene(), context.lattice(), &snapshot, context.config());

    let dir = std::env::temp_dir().join(format!("render-save-{}", std::process::id()));
    let path = dir.join("nested").join("frame_0000.png");
    save_frame(&image, &path).unwrap();
    let reopened = image::open(&path).unwrap().to_rgba8();
    assert_eq!(reopened, image);
    std::fs::remove_dir_all(&dir).unwrap();
}
