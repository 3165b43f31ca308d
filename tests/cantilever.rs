#![warn(clippy::pedantic)]

use trussfem::{
    analyse, assemble, force, point, AnalysisSettings, BoundaryCondition, Model, TrussError,
};

#[derive(Debug, Clone, Copy)]
struct CantileverGeometry {
    fixed_node: i64,
    loaded_node: i64,
    element: i64,
    length: f64,
}

#[derive(Debug, Clone, Copy)]
struct CantileverProperties {
    area: f64,
    elastic_modulus: f64,
    axial_load: f64,
}

impl Default for CantileverProperties {
    fn default() -> Self {
        Self {
            area: 1.0e-4,
            elastic_modulus: 70.0e9,
            axial_load: 1_000.0,
        }
    }
}

fn build_cantilever_truss() -> (Model, CantileverGeometry) {
    let mut model = Model::new();
    let geometry = CantileverGeometry {
        fixed_node: 1,
        loaded_node: 2,
        element: 1,
        length: 1.5,
    };
    model.add_node(geometry.fixed_node, point(0.0, 0.0));
    model.add_node(geometry.loaded_node, point(geometry.length, 0.0));
    model.add_element(
        geometry.element,
        [geometry.fixed_node, geometry.loaded_node],
        1,
    );
    (model, geometry)
}

fn apply_cantilever_conditions(
    model: &mut Model,
    geometry: &CantileverGeometry,
) -> CantileverProperties {
    let properties = CantileverProperties::default();

    model
        .add_material(1, properties.area, properties.elastic_modulus)
        .expect("material accepted");
    model
        .apply_boundary_condition(
            geometry.fixed_node,
            BoundaryCondition::Constraint { x: true, y: true },
        )
        .expect("fixed node support assignment succeeds");
    // A single horizontal bar has no vertical stiffness at its tip, so the tip
    // rides on a roller.
    model
        .apply_boundary_condition(
            geometry.loaded_node,
            BoundaryCondition::Constraint { x: false, y: true },
        )
        .expect("loaded node support assignment succeeds");
    model
        .apply_boundary_condition(
            geometry.loaded_node,
            BoundaryCondition::Load(force(properties.axial_load, 0.0)),
        )
        .expect("axial load assignment succeeds");

    properties
}

#[test]
fn builds_expected_topology() {
    let (model, geometry) = build_cantilever_truss();

    assert_eq!(model.node_count(), 2);
    assert_eq!(model.element_count(), 1);
    assert_eq!(model.dof_count(), 4);
    assert_eq!(model.node(geometry.fixed_node).map(|n| n.index), Some(0));
    assert_eq!(model.node(geometry.loaded_node).map(|n| n.index), Some(1));
}

#[test]
fn stiffness_stays_symmetric_through_constraints() {
    let (mut model, geometry) = build_cantilever_truss();
    apply_cantilever_conditions(&mut model, &geometry);

    let mut system = assemble(&model).expect("assembly succeeds");
    assert!(system.is_symmetric(1.0e-12));
    trussfem::constraints::apply_penalty(&mut system, &model, 1.0e8);
    assert!(system.is_symmetric(1.0e-12));
}

#[test]
fn cantilever_response_matches_closed_form_solution() {
    let (mut model, geometry) = build_cantilever_truss();
    let properties = apply_cantilever_conditions(&mut model, &geometry);
    let settings = AnalysisSettings::default();

    let solution = analyse(&model, &settings).expect("cantilever analysis produces results");

    let displacement = solution
        .node(geometry.loaded_node)
        .expect("cantilever tip results available")
        .displacement;
    let element = solution
        .element(geometry.element)
        .expect("cantilever element results available");

    let expected_displacement =
        properties.axial_load * geometry.length / (properties.area * properties.elastic_modulus);
    let tolerance = 2.0 * properties.axial_load / settings.penalty_stiffness;

    assert!((displacement.x - expected_displacement).abs() < tolerance);
    assert!(displacement.y.abs() < tolerance);
    assert!(
        (element.stress - properties.axial_load / properties.area).abs()
            < 1.0e-6 * properties.axial_load / properties.area
    );
    assert!(
        (element.strain - properties.axial_load / (properties.area * properties.elastic_modulus))
            .abs()
            < 1.0e-12
    );
}

#[test]
fn stiffer_penalty_tightens_the_support() {
    let (mut model, geometry) = build_cantilever_truss();
    let properties = apply_cantilever_conditions(&mut model, &geometry);
    let exact =
        properties.axial_load * geometry.length / (properties.area * properties.elastic_modulus);

    let error_for = |penalty: f64| {
        let settings = AnalysisSettings {
            penalty_stiffness: penalty,
            max_condition_number: 1.0e9,
        };
        let solution = analyse(&model, &settings).expect("analysis succeeds");
        let tip = solution.node(geometry.loaded_node).expect("tip results");
        (tip.displacement.x - exact).abs()
    };

    assert!(error_for(1.0e10) < error_for(1.0e8));
}

#[test]
fn removing_supports_trips_the_conditioning_guard() {
    let (mut model, geometry) = build_cantilever_truss();
    model.add_material(1, 1.0e-4, 70.0e9).expect("material accepted");
    model
        .apply_boundary_condition(geometry.loaded_node, BoundaryCondition::Load(force(1.0, 0.0)))
        .expect("load applied");

    let error = analyse(&model, &AnalysisSettings::default()).expect_err("free-free rejected");
    match error {
        TrussError::Conditioning {
            condition_number,
            threshold,
        } => assert!(condition_number >= threshold),
        other => panic!("unexpected error: {other:?}"),
    }
}
