//! Camera rays for the observer and, in stereo, its two eyes
//!
//! Pixel directions are computed in the observer's own frame and pushed to
//! the observer's location through its boost, so they never depend on the
//! absolute position in the tiling.

use geometry::{GeometryModel, Position, Vector};
use glam::DVec3;

use crate::config::RenderConfig;
use crate::context::FrameSnapshot;

/// Which eye a pixel belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Eye {
    Mono,
    Left,
    Right,
}

/// Pinhole camera over a `width × height` image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub width: u32,
    pub height: u32,
    /// Field of view in degrees
    pub fov: f64,
    /// Left half of the image renders the left eye, right half the right eye
    pub stereo: bool,
}

impl Camera {
    #[must_use]
    pub fn new(width: u32, height: u32, fov: f64) -> Self {
        Self {
            width,
            height,
            fov,
            stereo: false,
        }
    }

    #[must_use]
    pub fn from_config(config: &RenderConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
            fov: config.fov,
            stereo: config.stereo,
        }
    }

    #[must_use]
    pub fn eye_for_column(&self, x: u32) -> Eye {
        if !self.stereo {
            Eye::Mono
        } else if 2 * x < self.width {
            Eye::Left
        } else {
            Eye::Right
        }
    }

    /// Unit direction through the centre of pixel `(x, y)` in the eye's own
    /// frame. Row 0 is the top of the image; the view looks down `-z`.
    #[must_use]
    pub fn pixel_direction(&self, x: u32, y: u32) -> (Eye, DVec3) {
        let eye = self.eye_for_column(x);
        let mut res_x = f64::from(self.width);
        let mut frag_x = f64::from(x) + 0.5;
        if self.stereo {
            res_x *= 0.5;
            if eye == Eye::Right {
                frag_x -= res_x;
            }
        }
        let res_y = f64::from(self.height);
        let frag_y = f64::from(self.height.saturating_sub(1).saturating_sub(y)) + 0.5;

        let xy = DVec3::new(frag_x - 0.5 * res_x, frag_y - 0.5 * res_y, 0.0) / res_x;
        let z = 0.5 / (0.5 * self.fov.to_radians()).tan();
        (eye, DVec3::new(xy.x, xy.y, -z).normalize())
    }

    /// Tangent vector at the eye's location along which pixel `(x, y)` looks.
    #[must_use]
    pub fn ray_for_pixel<G: GeometryModel + ?Sized>(
        &self,
        geom: &G,
        snapshot: &FrameSnapshot,
        x: u32,
        y: u32,
    ) -> Vector {
        let (eye, dir) = self.pixel_direction(x, y);
        let position = match eye {
            Eye::Mono => &snapshot.observer,
            Eye::Left => &snapshot.left_eye,
            Eye::Right => &snapshot.right_eye,
        };
        position.push_forward(geom, dir)
    }
}

/// Eye positions `ipd / 2` to either side of the observer, along its right
/// vector.
#[must_use]
pub fn eye_positions<G: GeometryModel + ?Sized>(geom: &G, observer: &Position, ipd: f64) -> (Position, Position) {
    let half = 0.5 * ipd;
    (
        observer.local_flow(geom, DVec3::new(-half, 0.0, 0.0)),
        observer.local_flow(geom, DVec3::new(half, 0.0, 0.0)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centre_pixel_looks_forward() {
        let camera = Camera::new(3, 3, 90.0);
        let (eye, dir) = camera.pixel_direction(1, 1);
        assert_eq!(eye, Eye::Mono);
        assert!((dir - DVec3::NEG_Z).length() < 1e-12, "dir={dir:?}");
    }

    #[test]
    fn test_top_row_looks_up() {
        let camera = Camera::new(4, 4, 90.0);
        let (_, top) = camera.pixel_direction(0, 0);
        let (_, bottom) = camera.pixel_direction(0, 3);
        assert!(top.y > 0.0 && bottom.y < 0.0);
        assert!(top.x < 0.0);
    }

    #[test]
    fn test_stereo_halves_share_directions() {
        let camera = Camera {
            stereo: true,
            ..Camera::new(8, 4, 90.0)
        };
        let (left, a) = camera.pixel_direction(1, 2);
        let (right, b) = camera.pixel_direction(5, 2);
        assert_eq!((left, right), (Eye::Left, Eye::Right));
        assert!((a - b).length() < 1e-12);
    }

    #[test]
    fn test_edge_of_view_matches_fov() {
        // With a 90 degree view the image's left edge is 45 degrees off axis
        let camera = Camera::new(1000, 2, 90.0);
        let (_, dir) = camera.pixel_direction(0, 0);
        let angle = dir.x.abs().atan2(-dir.z);
        assert!((angle - std::f64::consts::FRAC_PI_4).abs() < 2e-3, "angle={angle}");
    }
}
