//! Direct solution of the constrained system with a conditioning guard.

use nalgebra::{DMatrix, DVector};

use crate::assembly::GlobalSystem;
use crate::errors::{DimensionError, TrussError};

/// Check that `system` is square and sized for `dofs` degrees of freedom.
///
/// # Errors
///
/// Returns the [`DimensionError`] describing the first mismatch.
pub fn validate_dimensions(system: &GlobalSystem, dofs: usize) -> Result<(), DimensionError> {
    let (rows, cols) = system.stiffness.shape();
    if rows != cols {
        return Err(DimensionError::NonSquare { rows, cols });
    }
    if rows != dofs {
        return Err(DimensionError::Stiffness {
            expected: dofs,
            found: rows,
        });
    }
    if system.force.len() != dofs {
        return Err(DimensionError::Force {
            expected: dofs,
            found: system.force.len(),
        });
    }
    if dofs == 0 {
        return Err(DimensionError::Empty);
    }
    Ok(())
}

/// 2-norm condition number `σmax / σmin` of `matrix`.
///
/// A singular matrix, or one holding non-finite entries, reports `f64::INFINITY`.
///
/// # Examples
/// ```
/// use nalgebra::DMatrix;
/// use trussfem::solver::condition_number;
///
/// let matrix = DMatrix::from_row_slice(2, 2, &[4.0, 0.0, 0.0, 0.5]);
/// assert!((condition_number(&matrix) - 8.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn condition_number(matrix: &DMatrix<f64>) -> f64 {
    if matrix.is_empty() || matrix.iter().any(|value| !value.is_finite()) {
        return f64::INFINITY;
    }
    let singular_values = matrix.singular_values();
    let largest = singular_values.max();
    let smallest = singular_values.min();
    if smallest <= 0.0 {
        f64::INFINITY
    } else {
        largest / smallest
    }
}

/// Solve `K·u = F` for the nodal displacements.
///
/// The system is consumed: once solved only the displacements remain.
///
/// # Errors
///
/// Returns [`TrussError::Dimension`] when the system is not sized for `dofs`, and
/// [`TrussError::Conditioning`] when the condition number reaches
/// `max_condition_number` or the factorisation breaks down.
pub fn solve(
    system: GlobalSystem,
    dofs: usize,
    max_condition_number: f64,
) -> Result<DVector<f64>, TrussError> {
    validate_dimensions(&system, dofs)?;

    let condition = condition_number(&system.stiffness);
    if !(condition < max_condition_number) {
        return Err(TrussError::Conditioning {
            condition_number: condition,
            threshold: max_condition_number,
        });
    }

    let GlobalSystem { stiffness, force } = system;
    stiffness
        .lu()
        .solve(&force)
        .ok_or(TrussError::Conditioning {
            condition_number: f64::INFINITY,
            threshold: max_condition_number,
        })
}
