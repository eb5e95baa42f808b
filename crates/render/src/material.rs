//! Surface materials.

use glam::DVec3;

use crate::uniforms::{narrow, UniformValue};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Material {
    /// Phong reflection with the scene's lights.
    Phong {
        color: DVec3,
        ambient: f64,
        diffuse: f64,
        specular: f64,
        shininess: f64,
    },
    /// Colour from the surface normal, `0.5 (n + 1)`.
    Normal,
    /// Flat colour, unaffected by lights.
    Basic { color: DVec3 },
}

impl Default for Material {
    fn default() -> Self {
        Self::phong(DVec3::ONE)
    }
}

impl Material {
    /// Phong material with the usual reflection constants.
    #[must_use]
    pub fn phong(color: DVec3) -> Self {
        Material::Phong {
            color,
            ambient: 0.1,
            diffuse: 0.7,
            specular: 0.4,
            shininess: 10.0,
        }
    }

    #[must_use]
    pub fn with_shininess(self, value: f64) -> Self {
        match self {
            Material::Phong {
                color,
                ambient,
                diffuse,
                specular,
                ..
            } => Material::Phong {
                color,
                ambient,
                diffuse,
                specular,
                shininess: value,
            },
            other => other,
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Material::Phong { .. } => "phong",
            Material::Normal => "normal",
            Material::Basic { .. } => "basic",
        }
    }

    /// Constants the shading snippet of this material reads.
    #[must_use]
    pub fn uniforms(&self, prefix: &str) -> Vec<(String, UniformValue)> {
        match self {
            Material::Phong {
                color,
                ambient,
                diffuse,
                specular,
                shininess,
            } => vec![
                (format!("{prefix}_color"), UniformValue::Vec3(color.as_vec3().to_array())),
                (format!("{prefix}_ambient"), UniformValue::Float(narrow(*ambient))),
                (format!("{prefix}_diffuse"), UniformValue::Float(narrow(*diffuse))),
                (format!("{prefix}_specular"), UniformValue::Float(narrow(*specular))),
                (format!("{prefix}_shininess"), UniformValue::Float(narrow(*shininess))),
            ],
            Material::Normal => Vec::new(),
            Material::Basic { color } => {
                vec![(format!("{prefix}_color"), UniformValue::Vec3(color.as_vec3().to_array()))]
            }
        }
    }
}
