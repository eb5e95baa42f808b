//! # Cell folding
//!
//! Teleports an observer that wandered out of the fundamental domain back
//! into it, one face at a time, and records the isometry that did it so
//! the caller can keep absolute (unfolded) coordinates in sync.

use geometry::{GeometryModel, Isometry, Position};

use crate::lattice::Lattice;

/// Result of [`Lattice::fold_repeatedly`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FoldOutcome {
    pub position: Position,
    /// Product of the applied inverse generators, newest on the left, so
    /// that `position.boost = correction * original.boost`.
    pub correction: Isometry,
    pub folds: usize,
    /// False when the iteration cap was reached with the observer still
    /// outside the cell. The position is then the best effort so far.
    pub converged: bool,
}

impl Lattice {
    /// Fold through at most one face.
    ///
    /// Returns the folded position and the index of the generator whose
    /// face was crossed, or the unchanged position and `None` when the
    /// observer is already inside.
    #[must_use]
    pub fn fold_once<G: GeometryModel + ?Sized>(&self, geom: &G, position: &Position) -> (Position, Option<usize>) {
        let point = position.observer_point(geom);
        match self.outside_face(geom, &point) {
            Some(index) => {
                let fix = &self.inverse_generators()[index];
                let boost = geom.renormalize_isometry(&geom.compose(fix, &position.boost));
                (Position::new(boost, position.facing), Some(index))
            }
            None => (*position, None),
        }
    }

    /// Fold until the observer is inside the cell or `cap` folds were made.
    #[must_use]
    pub fn fold_repeatedly<G: GeometryModel + ?Sized>(&self, geom: &G, position: &Position, cap: usize) -> FoldOutcome {
        let mut current = *position;
        let mut correction = Isometry::IDENTITY;
        let mut folds = 0;

        while folds < cap {
            let (next, index) = self.fold_once(geom, &current);
            let Some(index) = index else {
                return FoldOutcome {
                    position: current,
                    correction,
                    folds,
                    converged: true,
                };
            };
            correction = geom.compose(&self.inverse_generators()[index], &correction);
            current = next;
            folds += 1;
        }

        let converged = self.outside_face(geom, &current.observer_point(geom)).is_none();
        if !converged {
            tracing::warn!(
                folds,
                model = geom.name(),
                "fold did not converge, keeping best-effort position"
            );
        }
        FoldOutcome {
            position: current,
            correction: geom.renormalize_isometry(&correction),
            folds,
            converged,
        }
    }
}
