//! Penalty enforcement of fixed degrees of freedom.
//!
//! A very stiff spring of stiffness `penalty` is added to the diagonal entry of
//! every fixed DOF. The system keeps its full size and the support moves by
//! roughly `reaction / penalty` instead of exactly zero.

use crate::assembly::GlobalSystem;
use crate::model::Model;

/// Add `penalty` to the diagonal of every fixed degree of freedom in `system`.
///
/// The load vector is left untouched, so every support is held at zero displacement.
/// Returns the number of constrained degrees of freedom.
pub fn apply_penalty(system: &mut GlobalSystem, model: &Model, penalty: f64) -> usize {
    let mut constrained = 0;
    for node in model.nodes() {
        for (dof, fixed) in node.dofs().into_iter().zip(node.support) {
            if fixed {
                system.stiffness[(dof, dof)] += penalty;
                constrained += 1;
            }
        }
    }
    constrained
}
