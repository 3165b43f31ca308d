//! Global stiffness matrix and load vector assembly.

use nalgebra::{DMatrix, DVector, Matrix2, Matrix4, Matrix4x2, Vector2};

use crate::errors::{TrussError, ValidationError};
use crate::model::{Element, Model, Node};

/// Assembled linear system `K·u = F`.
#[derive(Clone, Debug, PartialEq)]
pub struct GlobalSystem {
    /// Global stiffness matrix `K`, `2N × 2N`.
    pub stiffness: DMatrix<f64>,
    /// Global load vector `F`, length `2N`.
    pub force: DVector<f64>,
}

impl GlobalSystem {
    /// Create a zero system with `dofs` degrees of freedom.
    #[must_use]
    pub fn zeros(dofs: usize) -> Self {
        Self {
            stiffness: DMatrix::zeros(dofs, dofs),
            force: DVector::zeros(dofs),
        }
    }

    /// Number of rows of the stiffness matrix.
    #[must_use]
    pub fn dof_count(&self) -> usize {
        self.stiffness.nrows()
    }

    /// Add an element contribution into the stiffness matrix at the given global DOFs.
    ///
    /// Entries are accumulated, never overwritten, so elements sharing a node superpose.
    pub fn scatter(&mut self, dofs: &[usize; 4], contribution: &Matrix4<f64>) {
        for (row_local, global_row) in dofs.iter().enumerate() {
            for (col_local, global_col) in dofs.iter().enumerate() {
                self.stiffness[(*global_row, *global_col)] += contribution[(row_local, col_local)];
            }
        }
    }

    /// Whether `K` equals its transpose to within the relative `tolerance` on every entry.
    #[must_use]
    pub fn is_symmetric(&self, tolerance: f64) -> bool {
        let k = &self.stiffness;
        k.is_square()
            && (0..k.nrows()).all(|i| {
                (0..i).all(|j| {
                    let (a, b) = (k[(i, j)], k[(j, i)]);
                    (a - b).abs() <= tolerance * a.abs().max(b.abs()).max(1.0)
                })
            })
    }
}

/// Length and orientation of an element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ElementGeometry {
    /// Distance between the two end nodes.
    pub length: f64,
    /// Orientation `atan2(δy, δx)` of `δ = first − second`.
    pub angle: f64,
    /// Unit vector pointing from the first node to the second.
    pub direction: Vector2<f64>,
}

impl ElementGeometry {
    /// Measure `element` from its resolved end nodes.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::ZeroLengthElement`] when the end nodes coincide and
    /// [`ValidationError::NonFiniteLength`] when their distance overflows or is NaN.
    pub fn measure(element: &Element, nodes: [&Node; 2]) -> Result<Self, ValidationError> {
        let delta = nodes[0].position.to_vector() - nodes[1].position.to_vector();
        let length = delta.norm();
        if !length.is_finite() {
            return Err(ValidationError::NonFiniteLength {
                element: element.id,
            });
        }
        if length == 0.0 {
            return Err(ValidationError::ZeroLengthElement {
                element: element.id,
            });
        }
        Ok(Self {
            length,
            angle: delta.y.atan2(delta.x),
            direction: -delta / length,
        })
    }
}

/// Global 4×4 stiffness of a link with axial stiffness `k` at orientation `angle`.
///
/// The axial pair `[[k, −k], [−k, k]]` is rotated into the DOF order
/// `(first.x, first.y, second.x, second.y)` as `T·local·Tᵗ`.
#[must_use]
pub fn element_stiffness(k: f64, angle: f64) -> Matrix4<f64> {
    let (s, c) = angle.sin_cos();
    let local = Matrix2::new(k, -k, -k, k);
    #[rustfmt::skip]
    let transform = Matrix4x2::new(
        c, 0.0,
        s, 0.0,
        0.0, c,
        0.0, s,
    );
    transform * local * transform.transpose()
}

/// Assemble the global stiffness matrix and load vector of `model`.
///
/// # Errors
///
/// Returns [`TrussError::Reference`] when an element names a missing material or node,
/// and [`TrussError::Validation`] when an element has zero length.
pub fn assemble(model: &Model) -> Result<GlobalSystem, TrussError> {
    let mut system = GlobalSystem::zeros(model.dof_count());

    for element in model.elements() {
        let material = model.element_material(element)?;
        let nodes = model.element_nodes(element)?;
        let geometry = ElementGeometry::measure(element, nodes)?;
        let k = material.axial_rigidity() / geometry.length;

        let [first, second] = nodes.map(Node::dofs);
        let dofs = [first[0], first[1], second[0], second[1]];
        system.scatter(&dofs, &element_stiffness(k, geometry.angle));
    }

    for node in model.nodes() {
        let [x, y] = node.dofs();
        system.force[x] = node.load.x;
        system.force[y] = node.load.y;
    }

    Ok(system)
}
