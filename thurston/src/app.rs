//! # Thurston Application Logic
//!
//! The headless frame loop. [`run`] loads the configuration, builds the demo
//! scene for the chosen geometry, holds the requested navigation actions and
//! then, once per frame, updates the observer, renders the snapshot on every
//! core and writes `frame_NNNN.png` (plus, on request, `uniforms_NNNN.json`)
//! to the output directory. The uniform dump comes with `uniforms_NNNN.bin`,
//! the same values packed as the GPU uniform block.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use geometry::{Geometry, GeometryModel};
use render::{render_frame, save_frame, RenderConfig, RenderContext};

use crate::cli::Cli;
use crate::scenes;

/// Run the frame loop described by `cli`.
///
/// # Errors
///
/// Returns any error from loading the configuration, building the demo
/// scene or writing the output files.
pub fn run(cli: &Cli) -> Result<()> {
    tracing_subscriber::fmt::init();

    let mut config = match &cli.config {
        Some(path) => RenderConfig::load(path)?,
        None => RenderConfig::default(),
    };
    cli.apply_overrides(&mut config);

    let output = cli.output.clone().unwrap_or_else(default_output_dir);
    let mut context = build_context(cli, config)?;
    tracing::info!(
        geometry = context.geometry().name(),
        frames = cli.frames,
        output = %output.display(),
        "starting frame loop"
    );

    for _ in 0..cli.frames {
        render_one(&mut context, cli, &output)?;
    }

    let observer = context.absolute_observer();
    tracing::info!(frames = context.frame(), observer = ?observer.coords, "finished");
    Ok(())
}

/// The render context for `cli`'s demo scene, with its held actions pressed.
///
/// # Errors
///
/// Fails if the demo scene cannot be built or `config` is invalid.
pub fn build_context(cli: &Cli, config: RenderConfig) -> Result<RenderContext> {
    let geometry = Geometry::new(cli.geometry, config.euler_step);
    let demo = scenes::demo(&geometry)?;
    let mut context = RenderContext::new(geometry, demo.lattice, demo.scene, config)
        .context("invalid render configuration")?
        .with_position(demo.start);
    for action in &cli.hold {
        context.controls_mut().press(*action);
        tracing::debug!(%action, "holding action");
    }
    Ok(context)
}

/// Update, render and write one frame.
///
/// # Errors
///
/// Fails if the frame or the uniform dump cannot be written.
pub fn render_one(context: &mut RenderContext, cli: &Cli, output: &Path) -> Result<PathBuf> {
    let started = Instant::now();
    let report = context.update(cli.dt);
    let snapshot = context.snapshot();
    let image = render_frame(
        context.geometry(),
        context.scene(),
        context.lattice(),
        &snapshot,
        context.config(),
    );
    let path = output.join(format!("frame_{:04}.png", report.frame));
    save_frame(&image, &path)?;

    if cli.dump_uniforms {
        let json = context
            .schema()
            .to_json(&context.uniform_source(&snapshot))
            .context("failed to serialize uniforms")?;
        let dump = output.join(format!("uniforms_{:04}.json", report.frame));
        std::fs::write(&dump, json).with_context(|| format!("failed to write {}", dump.display()))?;

        let packed = output.join(format!("uniforms_{:04}.bin", report.frame));
        std::fs::write(&packed, context.gpu_uniforms(&snapshot).as_bytes())
            .with_context(|| format!("failed to write {}", packed.display()))?;
    }

    if !report.converged {
        tracing::warn!(frame = report.frame, folds = report.folds, "observer left the cell");
    }
    tracing::info!(
        frame = report.frame,
        folds = report.folds,
        distance = report.distance,
        elapsed_ms = started.elapsed().as_millis(),
        path = %path.display(),
        "rendered frame"
    );
    Ok(path)
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(format!("frames-{}", chrono::Local::now().format("%Y%m%d-%H%M%S")))
}
