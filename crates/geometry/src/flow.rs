//! Numeric integration of the geodesic flow.
//!
//! Used by models without a closed form (Sol) and by models whose preferred
//! translations do not carry frames parallel along geodesics (Nil).

use glam::{DMat3, DVec3};

use crate::isometry::Isometry;
use crate::model::GeometryModel;

/// Flow `boost` and `facing` along the tangent vector `v` (in the frame at
/// the boost's base point) with explicit Euler steps of at most `step`.
///
/// Returns the new boost, the transported facing and the unit tangent at the
/// end point. A zero `v` returns the inputs unchanged.
pub fn euler_flow<G: GeometryModel + ?Sized>(
    geom: &G,
    boost: &Isometry,
    facing: &DMat3,
    v: DVec3,
    step: f64,
) -> (Isometry, DMat3, DVec3) {
    let length = v.length();
    if length == 0.0 || !length.is_finite() {
        return (*boost, *facing, DVec3::ZERO);
    }
    let step = if step > 0.0 { step } else { length };

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let count = (length / step).ceil().max(1.0) as usize;
    #[allow(clippy::cast_precision_loss)]
    let h = length / count as f64;

    let mut boost = *boost;
    let mut facing = *facing;
    let mut u = v / length;
    for _ in 0..count {
        let generator = geom.transport_generator(u);
        let shift = geom.translation_to(&geom.point_from_model(u * h));
        boost = geom.renormalize_isometry(&boost.multiply(&shift));
        facing = gram_schmidt(&(facing + generator * facing * h));
        u = normalize_or(u + generator * u * h, u);
    }
    (boost, facing, u)
}

/// Orthonormalize the columns of `m`, keeping the direction of the first.
#[must_use]
pub fn gram_schmidt(m: &DMat3) -> DMat3 {
    let x = normalize_or(m.x_axis, DVec3::X);
    let y = normalize_or(m.y_axis - x * x.dot(m.y_axis), x.any_orthonormal_vector());
    let z = x.cross(y);
    // Keep the handedness the columns had
    let z = if z.dot(m.z_axis) < 0.0 { -z } else { z };
    DMat3::from_cols(x, y, z)
}

fn normalize_or(v: DVec3, fallback: DVec3) -> DVec3 {
    let n = v.normalize_or_zero();
    if n == DVec3::ZERO {
        fallback
    } else {
        n
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gram_schmidt_restores_orthonormality() {
        let drifted = DMat3::from_cols(
            DVec3::new(1.01, 0.02, 0.0),
            DVec3::new(-0.01, 0.98, 0.03),
            DVec3::new(0.0, -0.02, 1.02),
        );
        let m = gram_schmidt(&drifted);
        let product = m.transpose() * m;
        assert!(product.abs_diff_eq(DMat3::IDENTITY, 1e-12), "not orthonormal: {product:?}");
        assert!(m.determinant() > 0.0);
    }
}
