//! Element strain and stress recovery with nodal averaging.

use std::collections::BTreeMap;

use nalgebra::{DVector, Vector2};
use serde::Serialize;

use crate::assembly::ElementGeometry;
use crate::errors::TrussError;
use crate::geometry::Displacement;
use crate::model::{Model, Node};

/// Axial response of one element.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ElementResults {
    /// Axial strain, positive in tension.
    pub strain: f64,
    /// Axial stress `E·ε`.
    pub stress: f64,
    /// Orientation of the element in radians, as used during assembly.
    pub angle: f64,
}

/// Averaged response at a node touched by at least one element.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct NodeResults {
    /// Mean axial strain of the contributing elements.
    pub strain: f64,
    /// Mean axial stress of the contributing elements.
    pub stress: f64,
    /// Number of elements that meet at the node.
    pub contributing_elements: usize,
    /// Solved nodal translation.
    pub displacement: Displacement,
}

/// Outcome of a successful analysis.
///
/// Only nodes with at least one contributing element have [`NodeResults`]; the
/// others are left out of every report.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Solution {
    /// Global displacement vector `u`, indexed by degree of freedom.
    #[serde(skip)]
    displacements: DVector<f64>,
    /// Element results keyed by element id.
    elements: BTreeMap<i64, ElementResults>,
    /// Node results keyed by node id.
    nodes: BTreeMap<i64, NodeResults>,
}

impl Solution {
    /// Global displacement vector, two entries per node in local index order.
    #[must_use]
    pub fn displacements(&self) -> &DVector<f64> {
        &self.displacements
    }

    /// Results for element `id`.
    #[must_use]
    pub fn element(&self, id: i64) -> Option<&ElementResults> {
        self.elements.get(&id)
    }

    /// Results for node `id`, absent when no element touches the node.
    #[must_use]
    pub fn node(&self, id: i64) -> Option<&NodeResults> {
        self.nodes.get(&id)
    }

    /// Element results in ascending id order.
    pub fn elements(&self) -> impl Iterator<Item = (i64, &ElementResults)> {
        self.elements.iter().map(|(id, results)| (*id, results))
    }

    /// Node results in ascending id order.
    pub fn nodes(&self) -> impl Iterator<Item = (i64, &NodeResults)> {
        self.nodes.iter().map(|(id, results)| (*id, results))
    }
}

/// Running sums for one node while elements are processed.
#[derive(Clone, Copy, Debug, Default)]
struct NodalSum {
    /// Sum of element strains.
    strain: f64,
    /// Sum of element stresses.
    stress: f64,
    /// Number of elements added.
    count: usize,
}

/// Displacement of `node` read out of the global vector.
fn node_displacement(displacements: &DVector<f64>, node: &Node) -> Vector2<f64> {
    let [x, y] = node.dofs();
    Vector2::new(displacements[x], displacements[y])
}

/// Recover element and nodal strain and stress from the solved displacements.
///
/// # Errors
///
/// Returns [`TrussError::Reference`] or [`TrussError::Validation`] when an element no
/// longer resolves against `model`; a model that assembled cleanly never does.
pub fn recover(model: &Model, displacements: DVector<f64>) -> Result<Solution, TrussError> {
    let mut sums = vec![NodalSum::default(); model.node_count()];
    let mut elements = BTreeMap::new();

    for element in model.elements() {
        let material = model.element_material(element)?;
        let nodes = model.element_nodes(element)?;
        let geometry = ElementGeometry::measure(element, nodes)?;

        let [start, end] = nodes.map(|node| node_displacement(&displacements, node));
        let elongation = geometry.direction.dot(&end) - geometry.direction.dot(&start);
        let strain = elongation / geometry.length;
        let stress = material.elastic_modulus * strain;

        elements.insert(
            element.id,
            ElementResults {
                strain,
                stress,
                angle: geometry.angle,
            },
        );
        for node in nodes {
            let sum = &mut sums[node.index];
            sum.strain += strain;
            sum.stress += stress;
            sum.count += 1;
        }
    }

    let nodes = model
        .nodes()
        .filter_map(|node| {
            let sum = sums[node.index];
            (sum.count > 0).then(|| {
                let count = sum.count as f64;
                let results = NodeResults {
                    strain: sum.strain / count,
                    stress: sum.stress / count,
                    contributing_elements: sum.count,
                    displacement: node_displacement(&displacements, node).into(),
                };
                (node.id, results)
            })
        })
        .collect();

    Ok(Solution {
        displacements,
        elements,
        nodes,
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::geometry::point;

    #[test]
    fn stretched_bar_reports_axial_strain_regardless_of_node_order() {
        let mut model = Model::new();
        model.add_node(1, point(0.0, 0.0));
        model.add_node(2, point(3.0, 4.0));
        model.add_material(1, 2.0, 100.0).expect("valid material");
        model.add_element(1, [1, 2], 1);
        model.add_element(2, [2, 1], 1);

        // Node 2 moves 0.01 along the bar axis (3/5, 4/5).
        let displacements = DVector::from_vec(vec![0.0, 0.0, 0.006, 0.008]);
        let solution = recover(&model, displacements).expect("recovery succeeds");

        for id in [1, 2] {
            let element = solution.element(id).expect("element results");
            assert_relative_eq!(element.strain, 0.002, epsilon = 1.0e-15);
            assert_relative_eq!(element.stress, 0.2, epsilon = 1.0e-13);
        }
        let node = solution.node(2).expect("node results");
        assert_eq!(node.contributing_elements, 2);
        assert_relative_eq!(node.displacement.x, 0.006);
        assert_relative_eq!(node.displacement.y, 0.008);
    }

    #[test]
    fn shared_node_averages_equal_stresses_exactly() {
        let mut model = Model::new();
        model.add_node(1, point(0.0, 0.0));
        model.add_node(2, point(1.0, 0.0));
        model.add_node(3, point(2.0, 0.0));
        model.add_material(1, 1.0, 50.0).expect("valid material");
        model.add_element(1, [1, 2], 1);
        model.add_element(2, [2, 3], 1);

        // Uniform stretch: both elements see strain 0.25.
        let displacements = DVector::from_vec(vec![0.0, 0.0, 0.25, 0.0, 0.5, 0.0]);
        let solution = recover(&model, displacements).expect("recovery succeeds");

        let element_stress = solution.element(1).expect("element results").stress;
        assert_eq!(solution.element(2).expect("element results").stress, element_stress);
        let node = solution.node(2).expect("node results");
        assert_eq!(node.contributing_elements, 2);
        assert_eq!(node.stress, element_stress);
        assert_eq!(node.strain, 0.25);
    }

    #[test]
    fn unconnected_node_has_no_results() {
        let mut model = Model::new();
        model.add_node(1, point(0.0, 0.0));
        model.add_node(2, point(1.0, 0.0));
        model.add_node(3, point(5.0, 5.0));
        model.add_material(1, 1.0, 1.0).expect("valid material");
        model.add_element(1, [1, 2], 1);

        let solution = recover(&model, DVector::zeros(6)).expect("recovery succeeds");
        assert!(solution.node(3).is_none());
        let reported: Vec<i64> = solution.nodes().map(|(id, _)| id).collect();
        assert_eq!(reported, vec![1, 2]);
        assert_eq!(solution.displacements().len(), 6);
    }

    #[test]
    fn nodal_values_are_the_mean_of_different_elements() {
        let mut model = Model::new();
        model.add_node(1, point(0.0, 0.0));
        model.add_node(2, point(1.0, 0.0));
        model.add_node(3, point(0.0, 1.0));
        model.add_material(1, 1.0, 10.0).expect("valid material");
        model.add_element(1, [1, 2], 1);
        model.add_element(2, [1, 3], 1);

        // Element 1 stretches by 0.1, element 2 is unstrained.
        let displacements = DVector::from_vec(vec![0.0, 0.0, 0.1, 0.0, 0.0, 0.0]);
        let solution = recover(&model, displacements).expect("recovery succeeds");

        let node = solution.node(1).expect("node results");
        assert_relative_eq!(node.strain, 0.05, epsilon = 1.0e-15);
        assert_relative_eq!(node.stress, 0.5, epsilon = 1.0e-14);
        assert_relative_eq!(
            solution.node(3).expect("node results").stress,
            0.0,
            epsilon = 1.0e-15
        );
    }
}
