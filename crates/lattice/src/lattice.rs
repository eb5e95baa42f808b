//! # Generator sets
//!
//! A [`Lattice`] is built once from a list of [`FacePair`]s and never
//! changes afterwards. Face pair `i` owns two generators:
//!
//! - `generators[2i]` glues the face at `-w n` onto the face at `+w n`;
//! - `generators[2i + 1]` is its inverse.
//!
//! Folding a point that left through the `+n` face therefore applies
//! `inverse_generators[2i]`, which is stored alongside so the hot path never
//! inverts a matrix.

use geometry::{GeometryKind, GeometryModel, Isometry, Point};
use glam::{DMat4, DQuat, DVec3};

use crate::error::LatticeError;
use crate::spec::LatticeSpec;

/// Generators the packed uniform block has room for.
pub const MAX_GENERATORS: usize = 16;

/// Largest `|g g^-1 - id|` entry accepted for a generator pair.
const PAIRING_TOLERANCE: f64 = 1e-8;

/// Two opposite faces of the fundamental domain.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FacePair {
    /// Outward unit normal of the positive face, in model coordinates.
    pub normal: DVec3,
    /// Offset of both faces from the origin along `normal`.
    pub half_width: f64,
    /// Rotation about `normal` applied by the gluing, in radians.
    pub twist: f64,
}

impl FacePair {
    #[must_use]
    pub fn new(normal: DVec3, half_width: f64) -> Self {
        Self {
            normal,
            half_width,
            twist: 0.0,
        }
    }

    #[must_use]
    pub fn with_twist(mut self, twist: f64) -> Self {
        self.twist = twist;
        self
    }
}

#[derive(Clone, Debug, Default)]
pub struct Lattice {
    faces: Vec<FacePair>,
    generators: Vec<Isometry>,
    inverse_generators: Vec<Isometry>,
}

impl Lattice {
    /// The lattice with no faces: nothing is ever folded.
    #[must_use]
    pub fn trivial() -> Self {
        Self::default()
    }

    /// Build the generators described by `spec` for `geom`.
    ///
    /// # Errors
    ///
    /// Fails if a face is degenerate or out of range for the model, if the
    /// lattice needs more than [`MAX_GENERATORS`] generators, or if a
    /// generator pair does not compose to the identity.
    pub fn build<G: GeometryModel + ?Sized>(geom: &G, spec: &LatticeSpec) -> Result<Self, LatticeError> {
        Self::from_faces(geom, spec.faces()?)
    }

    /// Build the generators for an explicit list of face pairs.
    ///
    /// # Errors
    ///
    /// See [`Lattice::build`].
    pub fn from_faces<G: GeometryModel + ?Sized>(geom: &G, faces: Vec<FacePair>) -> Result<Self, LatticeError> {
        let count = 2 * faces.len();
        if count > MAX_GENERATORS {
            return Err(LatticeError::TooManyGenerators {
                count,
                max: MAX_GENERATORS,
            });
        }

        let mut normalized = Vec::with_capacity(faces.len());
        for (i, face) in faces.iter().enumerate() {
            normalized.push(validate_face(geom.kind(), i, face)?);
        }

        let mut generators = Vec::with_capacity(count);
        for (i, face) in normalized.iter().enumerate() {
            let pairing = geom.face_pairing(face.normal, face.half_width);
            let twist = DMat4::from_quat(DQuat::from_axis_angle(face.normal, face.twist));
            let forward = geom.renormalize_isometry(&pairing.multiply(&Isometry::from_matrix(twist)));
            let backward = geom.invert(&forward);
            let error = geom.compose(&forward, &backward).max_abs_diff(&Isometry::IDENTITY);
            if error.is_nan() || error > PAIRING_TOLERANCE {
                return Err(LatticeError::UnpairedGenerators {
                    forward: 2 * i,
                    backward: 2 * i + 1,
                    error,
                });
            }
            generators.push(forward);
            generators.push(backward);
        }

        let inverse_generators = (0..count).map(|k| generators[k ^ 1]).collect();
        tracing::debug!(faces = normalized.len(), model = geom.name(), "built lattice generators");

        Ok(Self {
            faces: normalized,
            generators,
            inverse_generators,
        })
    }

    #[must_use]
    pub fn faces(&self) -> &[FacePair] {
        &self.faces
    }

    #[must_use]
    pub fn generators(&self) -> &[Isometry] {
        &self.generators
    }

    #[must_use]
    pub fn inverse_generators(&self) -> &[Isometry] {
        &self.inverse_generators
    }

    #[must_use]
    pub fn generator_count(&self) -> usize {
        self.generators.len()
    }

    #[must_use]
    pub fn is_trivial(&self) -> bool {
        self.faces.is_empty()
    }

    /// Index of the generator whose face `point` lies beyond, if any.
    ///
    /// Faces are checked in order and a later match replaces an earlier one,
    /// so a point beyond several faces reports the last of them. Comparisons
    /// involving NaN are false, so a non-finite point counts as inside.
    #[must_use]
    pub fn outside_face<G: GeometryModel + ?Sized>(&self, geom: &G, point: &Point) -> Option<usize> {
        let k = geom.project_to_model(point);
        let mut selected = None;
        for (i, face) in self.faces.iter().enumerate() {
            let offset = k.dot(face.normal);
            if offset > face.half_width {
                selected = Some(2 * i);
            }
            if offset < -face.half_width {
                selected = Some(2 * i + 1);
            }
        }
        selected
    }
}

fn validate_face(kind: GeometryKind, index: usize, face: &FacePair) -> Result<FacePair, LatticeError> {
    let length = face.normal.length();
    if length == 0.0 || !length.is_finite() {
        return Err(LatticeError::DegenerateFace(index));
    }
    let normal = face.normal / length;

    let in_model = match kind {
        GeometryKind::Hyperbolic => face.half_width < 1.0,
        _ => face.half_width.is_finite(),
    };
    if !(face.half_width > 0.0 && in_model) {
        return Err(LatticeError::InvalidHalfWidth {
            face: index,
            half_width: face.half_width,
            geometry: kind,
        });
    }

    if face.twist != 0.0 {
        // Only rotations about the vertical axis are Nil isometries; Sol has none.
        let supported = match kind {
            GeometryKind::Euclidean | GeometryKind::Hyperbolic => true,
            GeometryKind::Nil => normal.cross(DVec3::Z).length() < 1e-12,
            GeometryKind::Sol => false,
        };
        if !supported {
            return Err(LatticeError::UnsupportedTwist {
                face: index,
                geometry: kind,
            });
        }
    }

    Ok(FacePair {
        normal,
        half_width: face.half_width,
        twist: face.twist,
    })
}
