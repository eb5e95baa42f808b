//! # Uniform schema
//!
//! The per-frame state the shading stage reads, as an explicit list of
//! named entries. The list is fixed when the scene is set up; every frame
//! it is evaluated against a [`UniformSource`] to produce a named snapshot.
//!
//! ## Key Components
//!
//! -   **`UniformValue`:** A single value in shader-friendly `f32` form.
//! -   **`UniformEntry`:** Name, type and accessor of one uniform.
//! -   **`UniformSchema`:** The enumerated entries for a scene and lattice.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let schema = UniformSchema::build(&scene, &lattice);
//! let named = schema.evaluate(&UniformSource { snapshot: &snap, scene: &scene, lattice: &lattice, config: &config });
//! ```

use std::fmt;

use geometry::Isometry;
use lattice::Lattice;
use serde::Serialize;

use crate::config::RenderConfig;
use crate::context::FrameSnapshot;
use crate::scene::Scene;

/// Narrow a double to the precision the shading stage works in.
#[allow(clippy::cast_possible_truncation)]
#[must_use]
pub fn narrow(x: f64) -> f32 {
    x as f32
}

fn int(x: usize) -> i32 {
    i32::try_from(x).unwrap_or(i32::MAX)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UniformType {
    Bool,
    Int,
    Float,
    Vec2,
    Vec3,
    Vec4,
    Mat3,
    Mat4,
    Mat4Array,
    Vec4Array,
}

impl UniformType {
    /// Type name as written in GLSL declarations.
    #[must_use]
    pub fn glsl_name(self) -> &'static str {
        match self {
            UniformType::Bool => "bool",
            UniformType::Int => "int",
            UniformType::Float => "float",
            UniformType::Vec2 => "vec2",
            UniformType::Vec3 => "vec3",
            UniformType::Vec4 => "vec4",
            UniformType::Mat3 => "mat3",
            UniformType::Mat4 | UniformType::Mat4Array => "mat4",
            UniformType::Vec4Array => "vec4",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum UniformValue {
    Bool(bool),
    Int(i32),
    Float(f32),
    Vec2([f32; 2]),
    Vec3([f32; 3]),
    Vec4([f32; 4]),
    Mat3([[f32; 3]; 3]),
    Mat4([[f32; 4]; 4]),
    Mat4Array(Vec<[[f32; 4]; 4]>),
    Vec4Array(Vec<[f32; 4]>),
}

impl UniformValue {
    #[must_use]
    pub fn ty(&self) -> UniformType {
        match self {
            UniformValue::Bool(_) => UniformType::Bool,
            UniformValue::Int(_) => UniformType::Int,
            UniformValue::Float(_) => UniformType::Float,
            UniformValue::Vec2(_) => UniformType::Vec2,
            UniformValue::Vec3(_) => UniformType::Vec3,
            UniformValue::Vec4(_) => UniformType::Vec4,
            UniformValue::Mat3(_) => UniformType::Mat3,
            UniformValue::Mat4(_) => UniformType::Mat4,
            UniformValue::Mat4Array(_) => UniformType::Mat4Array,
            UniformValue::Vec4Array(_) => UniformType::Vec4Array,
        }
    }
}

/// Everything a uniform accessor may read.
#[derive(Clone, Copy)]
pub struct UniformSource<'a> {
    pub snapshot: &'a FrameSnapshot,
    pub scene: &'a Scene,
    pub lattice: &'a Lattice,
    pub config: &'a RenderConfig,
}

type Accessor = Box<dyn Fn(&UniformSource<'_>) -> UniformValue + Send + Sync>;

pub struct UniformEntry {
    pub name: String,
    pub ty: UniformType,
    source: Accessor,
}

impl UniformEntry {
    fn new<F>(name: impl Into<String>, ty: UniformType, source: F) -> Self
    where
        F: Fn(&UniformSource<'_>) -> UniformValue + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            ty,
            source: Box::new(source),
        }
    }

    fn constant(name: String, value: UniformValue) -> Self {
        let ty = value.ty();
        Self::new(name, ty, move |_| value.clone())
    }

    #[must_use]
    pub fn evaluate(&self, source: &UniformSource<'_>) -> UniformValue {
        (self.source)(source)
    }
}

impl fmt::Debug for UniformEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UniformEntry")
            .field("name", &self.name)
            .field("ty", &self.ty)
            .finish_non_exhaustive()
    }
}

/// One evaluated uniform, as written to JSON dumps.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NamedUniform {
    pub name: String,
    #[serde(flatten)]
    pub value: UniformValue,
}

#[derive(Debug, Default)]
pub struct UniformSchema {
    entries: Vec<UniformEntry>,
}

fn split_pair(name: &str, pick: fn(&FrameSnapshot) -> Isometry) -> [UniformEntry; 2] {
    [
        UniformEntry::new(format!("{name}RawA"), UniformType::Mat4, move |s| {
            UniformValue::Mat4(pick(s.snapshot).split_f32().0)
        }),
        UniformEntry::new(format!("{name}RawB"), UniformType::Mat4, move |s| {
            UniformValue::Mat4(pick(s.snapshot).split_f32().1)
        }),
    ]
}

impl UniformSchema {
    /// Enumerate the uniforms for `scene` and `lattice`.
    ///
    /// Per-solid and per-material constants are captured here, since the
    /// scene does not change after setup.
    #[must_use]
    pub fn build(scene: &Scene, lattice: &Lattice) -> Self {
        let mut entries = Vec::new();

        entries.extend(split_pair("boost", |s| s.observer.boost));
        entries.push(UniformEntry::new("facing", UniformType::Mat3, |s| {
            UniformValue::Mat3(s.snapshot.observer.facing.as_mat3().to_cols_array_2d())
        }));
        entries.extend(split_pair("leftBoost", |s| s.left_eye.boost));
        entries.push(UniformEntry::new("leftFacing", UniformType::Mat3, |s| {
            UniformValue::Mat3(s.snapshot.left_eye.facing.as_mat3().to_cols_array_2d())
        }));
        entries.extend(split_pair("rightBoost", |s| s.right_eye.boost));
        entries.push(UniformEntry::new("rightFacing", UniformType::Mat3, |s| {
            UniformValue::Mat3(s.snapshot.right_eye.facing.as_mat3().to_cols_array_2d())
        }));
        entries.extend(split_pair("cellBoost", |s| s.cell.boost));
        entries.extend(split_pair("invCellBoost", |s| s.cell.inverse));

        if !lattice.is_trivial() {
            entries.push(UniformEntry::new("invGenerators", UniformType::Mat4Array, |s| {
                UniformValue::Mat4Array(s.lattice.inverse_generators().iter().map(Isometry::to_f32_cols).collect())
            }));
        }
        if !scene.lights().is_empty() {
            entries.push(UniformEntry::new("lightPositions", UniformType::Vec4Array, |s| {
                UniformValue::Vec4Array(
                    s.scene
                        .lights()
                        .iter()
                        .map(|l| l.position.coords.as_vec4().to_array())
                        .collect(),
                )
            }));
            entries.push(UniformEntry::new("lightIntensities", UniformType::Vec4Array, |s| {
                UniformValue::Vec4Array(
                    s.scene
                        .lights()
                        .iter()
                        .map(|l| l.color.extend(l.intensity).as_vec4().to_array())
                        .collect(),
                )
            }));
        }

        entries.push(UniformEntry::new("screenResolution", UniformType::Vec2, |s| {
            let [w, h] = s.snapshot.resolution;
            UniformValue::Vec2([narrow(f64::from(w)), narrow(f64::from(h))])
        }));
        entries.push(UniformEntry::new("isStereo", UniformType::Bool, |s| {
            UniformValue::Bool(s.snapshot.stereo)
        }));
        entries.push(UniformEntry::new("maxMarchingSteps", UniformType::Int, |s| {
            UniformValue::Int(int(s.config.max_marching_steps))
        }));
        entries.push(UniformEntry::new("minDist", UniformType::Float, |s| {
            UniformValue::Float(narrow(s.config.min_dist))
        }));
        entries.push(UniformEntry::new("maxDist", UniformType::Float, |s| {
            UniformValue::Float(narrow(s.config.max_dist))
        }));
        entries.push(UniformEntry::new("marchingThreshold", UniformType::Float, |s| {
            UniformValue::Float(narrow(s.config.marching_threshold))
        }));
        entries.push(UniformEntry::new("fov", UniformType::Float, |s| {
            UniformValue::Float(narrow(s.config.fov))
        }));

        for solid in scene.solids() {
            let mut constants = Vec::new();
            let prefix = format!("solid{}", solid.id);
            constants.push((format!("{prefix}_isGlobal"), UniformValue::Bool(solid.is_global)));
            solid.shape.collect_uniforms(&prefix, &mut constants);
            constants.extend(solid.material.uniforms(&format!("material{}", solid.id)));
            entries.extend(constants.into_iter().map(|(name, value)| UniformEntry::constant(name, value)));
        }

        tracing::debug!(entries = entries.len(), "built uniform schema");
        Self { entries }
    }

    #[must_use]
    pub fn entries(&self) -> &[UniformEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn entry(&self, name: &str) -> Option<&UniformEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Evaluate every entry, in schema order.
    #[must_use]
    pub fn evaluate(&self, source: &UniformSource<'_>) -> Vec<NamedUniform> {
        self.entries
            .iter()
            .map(|e| NamedUniform {
                name: e.name.clone(),
                value: e.evaluate(source),
            })
            .collect()
    }

    /// The evaluated snapshot as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Fails only if serialization itself fails.
    pub fn to_json(&self, source: &UniformSource<'_>) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.evaluate(source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_reports_its_type() {
        assert_eq!(UniformValue::Float(1.0).ty(), UniformType::Float);
        assert_eq!(UniformValue::Mat4Array(Vec::new()).ty(), UniformType::Mat4Array);
        assert_eq!(UniformType::Mat4Array.glsl_name(), "mat4");
    }

    #[test]
    fn test_named_uniform_serializes_flat() {
        let named = NamedUniform {
            name: "fov".to_string(),
            value: UniformValue::Float(90.0),
        };
        let json = serde_json::to_string(&named).unwrap();
        assert_eq!(json, r#"{"name":"fov","type":"float","value":90.0}"#);
    }
}
