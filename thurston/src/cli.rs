//! Command-line arguments for the `thurston` binary

use std::path::PathBuf;

use clap::Parser;
use geometry::GeometryKind;
use render::{Action, RenderConfig};

/// Fly through a closed Thurston manifold and write the frames as PNG.
#[derive(Parser, Debug, Clone)]
#[command(name = "thurston", author, version, about, long_about = None)]
pub struct Cli {
    /// Geometry of the demo scene: euclidean, hyperbolic, nil or sol
    #[arg(short, long, default_value = "euclidean")]
    pub geometry: GeometryKind,

    /// JSON render configuration; missing keys keep their defaults
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Number of frames to render
    #[arg(short, long, default_value_t = 1)]
    pub frames: u32,

    /// Seconds of navigation per frame
    #[arg(long, default_value_t = 1.0 / 30.0)]
    pub dt: f64,

    /// Output directory (defaults to a timestamped `frames-*` directory)
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    #[arg(long)]
    pub width: Option<u32>,

    #[arg(long)]
    pub height: Option<u32>,

    /// Render side-by-side stereo
    #[arg(long)]
    pub stereo: bool,

    /// Navigation actions held down for the whole run, e.g. `translate-z-neg`
    #[arg(long, value_name = "ACTION", num_args = 1..)]
    pub hold: Vec<Action>,

    /// Also write the uniform snapshot of every frame, as named JSON and as
    /// the packed GPU block
    #[arg(long)]
    pub dump_uniforms: bool,
}

impl Cli {
    /// Apply the command line overrides on top of a loaded config.
    pub fn apply_overrides(&self, config: &mut RenderConfig) {
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if self.stereo {
            config.stereo = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["thurston"]);
        assert_eq!(cli.geometry, GeometryKind::Euclidean);
        assert_eq!(cli.frames, 1);
        assert!(cli.hold.is_empty());
        assert!(!cli.dump_uniforms);
    }

    #[test]
    fn test_hold_and_overrides() {
        let cli = Cli::parse_from([
            "thurston",
            "--geometry",
            "h3",
            "--hold",
            "translate-z-neg",
            "rotate_y_pos",
            "--width",
            "64",
            "--stereo",
        ]);
        assert_eq!(cli.geometry, GeometryKind::Hyperbolic);
        assert_eq!(cli.hold, vec![Action::TranslateZNeg, Action::RotateYPos]);

        let mut config = RenderConfig::default();
        cli.apply_overrides(&mut config);
        assert_eq!((config.width, config.height, config.stereo), (64, 240, true));
    }

    #[test]
    fn test_unknown_action_is_rejected() {
        assert!(Cli::try_parse_from(["thurston", "--hold", "jump"]).is_err());
    }
}
