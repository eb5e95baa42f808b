#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! # Lattices and fundamental domains
//!
//! A lattice tiles a geometry with copies of one fundamental cell. This
//! crate builds the face-pairing generators of such a cell and folds
//! positions that leave it back inside.
//!
//! ## Key Components
//!
//! -   **Specification:** [`LatticeSpec`] is the serializable description
//!     (cube, box, arbitrary translation vectors).
//! -   **Generators:** [`Lattice`] holds the validated [`FacePair`]s with
//!     their generators and inverse generators, in inverse-paired order.
//! -   **Folding:** [`Lattice::outside_face`], [`Lattice::fold_once`] and
//!     [`Lattice::fold_repeatedly`], the last returning a [`FoldOutcome`]
//!     with the accumulated correction.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use geometry::{Euclidean, Position};
//! use lattice::{Lattice, LatticeSpec};
//!
//! let lattice = Lattice::build(&Euclidean, &LatticeSpec::Cubic { half_width: 1.0 })?;
//! let outcome = lattice.fold_repeatedly(&Euclidean, &Position::IDENTITY, 32);
//! assert!(outcome.converged);
//! ```

pub mod error;
pub mod folding;
pub mod lattice;
pub mod spec;

pub use error::LatticeError;
pub use folding::FoldOutcome;
pub use lattice::{FacePair, Lattice, MAX_GENERATORS};
pub use spec::LatticeSpec;
