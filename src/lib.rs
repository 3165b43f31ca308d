#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]
#![doc = include_str!("../README.md")]

pub mod assembly;
pub mod constraints;
mod errors;
mod geometry;
mod model;
pub mod output;
pub mod postprocess;
pub mod report;
mod settings;
pub mod solver;
mod table;
pub mod topology;

pub use assembly::{assemble, GlobalSystem};
pub use errors::{
    DimensionError, FormatError, ReferenceError, TableKind, TrussError, ValidationError,
};
pub use geometry::{force, point, Displacement, Force, Point};
pub use model::{dof_index, BoundaryCondition, Element, Material, Model, Node, DOF_PER_NODE};
pub use postprocess::{ElementResults, NodeResults, Solution};
pub use settings::{AnalysisSettings, DEFAULT_MAX_CONDITION_NUMBER, DEFAULT_PENALTY_STIFFNESS};
pub use table::{build_model, ProblemFiles, Table};

/// Run the full linear analysis of `model`.
///
/// The stages run strictly in order and the first failure aborts the run:
/// assembly, penalty constraints, conditioning-guarded solve, and strain and
/// stress recovery.
///
/// # Errors
///
/// Returns the [`TrussError`] raised by the first failing stage.
///
/// # Examples
/// ```
/// use trussfem::{analyse, force, point, AnalysisSettings, BoundaryCondition, Model};
///
/// let mut model = Model::new();
/// model.add_node(1, point(0.0, 0.0));
/// model.add_node(2, point(2.0, 0.0));
/// model.add_material(1, 1.0e-4, 70.0e9)?;
/// model.add_element(1, [1, 2], 1);
/// model.apply_boundary_condition(1, BoundaryCondition::Constraint { x: true, y: true })?;
/// model.apply_boundary_condition(2, BoundaryCondition::Constraint { x: false, y: true })?;
/// model.apply_boundary_condition(2, BoundaryCondition::Load(force(500.0, 0.0)))?;
///
/// let solution = analyse(&model, &AnalysisSettings::default())?;
/// let stress = solution.element(1).map(|element| element.stress).unwrap_or_default();
/// assert!((stress - 5.0e6).abs() < 1.0);
/// # Ok::<(), trussfem::TrussError>(())
/// ```
pub fn analyse(model: &Model, settings: &AnalysisSettings) -> Result<Solution, TrussError> {
    settings.validate()?;
    let mut system = assemble(model)?;
    constraints::apply_penalty(&mut system, model, settings.penalty_stiffness);
    let displacements = solver::solve(system, model.dof_count(), settings.max_condition_number)?;
    postprocess::recover(model, displacements)
}
