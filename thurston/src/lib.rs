#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! # Thurston
//!
//! Real-time style ray marching inside closed 3-manifolds modelled on the
//! Euclidean, hyperbolic, Nil and Sol Thurston geometries, driven from the
//! command line and rendered headlessly to PNG frames.
//!
//! ## Project Architecture
//!
//! -   **`thurston`:** This crate. Command line parsing, the demo scenes and
//!     the frame loop that writes images to disk.
//! -   **[`geometry`]:** The four geometry models, isometries, points,
//!     tangent vectors and observer positions with their geodesic flow.
//! -   **[`lattice`]:** Fundamental domains, their generators and the folding
//!     that keeps the observer (and every ray) inside one cell.
//! -   **[`render`]:** Scenes, the two-phase ray marcher, Phong lighting,
//!     navigation controls, the uniform schema and the parallel CPU renderer.
//!
//! ## Usage
//!
//! ```text
//! thurston --geometry hyperbolic --frames 60 --hold translate-z-neg --output frames/
//! ```

pub mod app;
pub mod cli;
pub mod scenes;
