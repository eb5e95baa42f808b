use geometry::GeometryKind;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LatticeError {
    #[error("face {face}: half-width {half_width} is not valid in {geometry} space")]
    InvalidHalfWidth {
        face: usize,
        half_width: f64,
        geometry: GeometryKind,
    },
    #[error("face {0} has a zero normal")]
    DegenerateFace(usize),
    #[error("face {face}: a twist about this normal is not an isometry of {geometry} space")]
    UnsupportedTwist { face: usize, geometry: GeometryKind },
    #[error("{count} generators requested, at most {max} are supported")]
    TooManyGenerators { count: usize, max: usize },
    #[error("generators {forward} and {backward} are not mutually inverse (error {error:.3e})")]
    UnpairedGenerators {
        forward: usize,
        backward: usize,
        error: f64,
    },
}
