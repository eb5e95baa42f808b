use std::path::PathBuf;

use geometry::GeometryKind;
use thiserror::Error;

/// Problems detected while building a scene. These are raised at setup and
/// never retried.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("cannot combine a local solid with a global solid in one composite")]
    MixedComposite,
    #[error("{shape} is not available in {geometry} space")]
    UnsupportedShape {
        shape: &'static str,
        geometry: GeometryKind,
    },
    #[error("ball radius must be positive and finite, got {0}")]
    InvalidRadius(f64),
    #[error("scene already holds the maximum of {0} lights")]
    TooManyLights(usize),
    #[error("scene already holds the maximum of {0} solids")]
    TooManySolids(usize),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unknown keyboard layout '{0}' (expected 'us' or 'fr')")]
    UnknownKeyboard(String),
    #[error("invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}
