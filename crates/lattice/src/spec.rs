//! Serializable description of a lattice, as written in scene files.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::error::LatticeError;
use crate::lattice::FacePair;

/// Shape of the fundamental domain, in the model coordinates of the
/// geometry it will be built for.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LatticeSpec {
    /// No tiling: the whole space is one cell.
    #[default]
    Trivial,
    /// Axis-aligned cube `[-w, w]^3`.
    Cubic { half_width: f64 },
    /// Axis-aligned box with independent half-widths.
    Box { half_widths: [f64; 3] },
    /// One face pair per vector: the normal is the vector's direction and
    /// the half-width half its length. `twists` optionally turns the
    /// matching generator about its normal by the given angle in radians.
    Translations {
        vectors: Vec<[f64; 3]>,
        #[serde(default)]
        twists: Vec<f64>,
    },
}

impl LatticeSpec {
    /// Face pairs in check order.
    ///
    /// # Errors
    ///
    /// Returns [`LatticeError::DegenerateFace`] for a zero translation vector.
    pub fn faces(&self) -> Result<Vec<FacePair>, LatticeError> {
        match self {
            LatticeSpec::Trivial => Ok(Vec::new()),
            LatticeSpec::Cubic { half_width } => Ok(axis_faces([*half_width; 3])),
            LatticeSpec::Box { half_widths } => Ok(axis_faces(*half_widths)),
            LatticeSpec::Translations { vectors, twists } => vectors
                .iter()
                .enumerate()
                .map(|(i, v)| {
                    let v = DVec3::from_array(*v);
                    let length = v.length();
                    if length == 0.0 || !length.is_finite() {
                        return Err(LatticeError::DegenerateFace(i));
                    }
                    let twist = twists.get(i).copied().unwrap_or(0.0);
                    Ok(FacePair::new(v / length, 0.5 * length).with_twist(twist))
                })
                .collect(),
        }
    }
}

fn axis_faces(half_widths: [f64; 3]) -> Vec<FacePair> {
    [DVec3::X, DVec3::Y, DVec3::Z]
        .into_iter()
        .zip(half_widths)
        .map(|(normal, half_width)| FacePair::new(normal, half_width))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cubic_faces_are_axis_aligned() {
        let faces = LatticeSpec::Cubic { half_width: 0.5 }.faces().unwrap();
        assert_eq!(faces.len(), 3);
        assert_eq!(faces[1].normal, DVec3::Y);
        assert!((faces[2].half_width - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_translation_vectors_are_halved() {
        let spec = LatticeSpec::Translations {
            vectors: vec![[0.0, 0.0, 3.0]],
            twists: vec![],
        };
        let faces = spec.faces().unwrap();
        assert_eq!(faces[0].normal, DVec3::Z);
        assert!((faces[0].half_width - 1.5).abs() < 1e-12);
        assert!(faces[0].twist.abs() < f64::EPSILON);
    }

    #[test]
    fn test_zero_vector_is_rejected() {
        let spec = LatticeSpec::Translations {
            vectors: vec![[1.0, 0.0, 0.0], [0.0, 0.0, 0.0]],
            twists: vec![],
        };
        assert_eq!(spec.faces(), Err(LatticeError::DegenerateFace(1)));
    }
}
