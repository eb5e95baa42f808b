use geometry::{Euclidean, GeometryKind, Isometry, Point, Position};
use glam::{DMat3, DMat4, DVec3};
use lattice::{Lattice, LatticeSpec};
use render::{
    GpuUniforms, Light, Material, RenderConfig, RenderContext, Scene, Shape, Solid, UniformType, UniformValue,
};

fn context(lattice: Lattice) -> RenderContext<Euclidean> {
    let mut scene = Scene::new(GeometryKind::Euclidean);
    scene
        .add_solid(Solid::local(Shape::ball(Point::ORIGIN, 0.3), Material::phong(DVec3::X)))
        .unwrap();
    scene.add_light(Light::new(Point::new(0.0, 1.0, 1.0, 1.0), DVec3::ONE)).unwrap();
    RenderContext::new(Euclidean, lattice, scene, RenderConfig::default()).unwrap()
}

#[test]
fn schema_names_every_frame_value() {
    let lattice = Lattice::build(&Euclidean, &LatticeSpec::Cubic { half_width: 1.0 }).unwrap();
    let context = context(lattice);
    let schema = context.schema();
    for name in [
        "boostRawA",
        "boostRawB",
        "facing",
        "leftBoostRawA",
        "rightFacing",
        "cellBoostRawA",
        "invCellBoostRawB",
        "invGenerators",
        "lightPositions",
        "lightIntensities",
        "screenResolution",
        "isStereo",
        "maxMarchingSteps",
        "minDist",
        "maxDist",
        "marchingThreshold",
        "fov",
        "solid0_isGlobal",
        "solid0_center",
        "solid0_radius",
        "material0_color",
        "material0_shininess",
    ] {
        assert!(schema.entry(name).is_some(), "missing uniform {name}");
    }
    assert_eq!(schema.entry("invGenerators").unwrap().ty, UniformType::Mat4Array);
}

#[test]
fn trivial_lattice_has_no_generator_uniform() {
    let context = context(Lattice::trivial());
    assert!(context.schema().entry("invGenerators").is_none());
}

#[test]
fn split_boost_recovers_double_precision() {
    let offset = DVec3::new(1.0 / 3.0, 0.0, 0.0);
    let boost = Isometry::from_matrix(DMat4::from_translation(offset));
    let context = context(Lattice::trivial()).with_position(Position::new(boost, DMat3::IDENTITY));
    let snapshot = context.snapshot();
    let source = context.uniform_source(&snapshot);
    let schema = context.schema();

    let (UniformValue::Mat4(hi), UniformValue::Mat4(lo)) = (
        schema.entry("boostRawA").unwrap().evaluate(&source),
        schema.entry("boostRawB").unwrap().evaluate(&source),
    ) else {
        panic!("boost halves should be mat4");
    };
    let recovered = f64::from(hi[3][0]) + f64::from(lo[3][0]);
    assert!((recovered - 1.0 / 3.0).abs() < 1e-12, "recovered {recovered}");
}

#[test]
fn evaluated_snapshot_serializes_to_json() {
    let lattice = Lattice::build(&Euclidean, &LatticeSpec::Cubic { half_width: 1.0 }).unwrap();
    let context = context(lattice);
    let snapshot = context.snapshot();
    let source = context.uniform_source(&snapshot);

    let named = context.schema().evaluate(&source);
    assert_eq!(named.len(), context.schema().len());
    let generators = named.iter().find(|u| u.name == "invGenerators").unwrap();
    match &generators.value {
        UniformValue::Mat4Array(mats) => assert_eq!(mats.len(), 6),
        other => panic!("unexpected value {other:?}"),
    }

    let json: serde_json::Value = serde_json::from_str(&context.schema().to_json(&source).unwrap()).unwrap();
    let entries = json.as_array().unwrap();
    let steps = entries.iter().find(|e| e["name"] == "maxMarchingSteps").unwrap();
    assert_eq!(steps["type"], "int");
    assert_eq!(steps["value"], 50);
}

#[test]
fn gpu_block_packs_counts_and_is_aligned() {
    let lattice = Lattice::build(&Euclidean, &LatticeSpec::Cubic { half_width: 1.0 }).unwrap();
    let context = context(lattice);
    let snapshot = context.snapshot();
    let block = GpuUniforms::from(&context.uniform_source(&snapshot));

    assert_eq!(block.generator_count, 6);
    assert_eq!(block.light_count, 1);
    assert_eq!(block.max_marching_steps, 50);
    assert_eq!(block.resolution, [320.0, 240.0]);
    assert_eq!(block.light_intensities[0], [1.0, 1.0, 1.0, 1.0]);
    // Translation by -2 along x undoes the +x face
    assert!((block.inv_generators[0][3][0] + 2.0).abs() < 1e-6);

    let bytes = block.as_bytes();
    assert_eq!(bytes.len(), std::mem::size_of::<GpuUniforms>());
    assert_eq!(bytes.len() % 16, 0);
}

#[test]
fn context_packs_the_same_block_as_its_uniform_source() {
    let lattice = Lattice::build(&Euclidean, &LatticeSpec::Cubic { half_width: 1.0 }).unwrap();
    let context = context(lattice);
    let snapshot = context.snapshot();
    let packed = context.gpu_uniforms(&snapshot);
    let expected = GpuUniforms::from(&context.uniform_source(&snapshot));
    assert_eq!(packed.as_bytes(), expected.as_bytes());
    assert_eq!(packed.generator_count, 6);
}
