//! In-memory problem model: nodes, materials, elements and boundary conditions.
//!
//! Every table is keyed by its integer id. Repeating an id replaces the earlier
//! entry. Nodes additionally receive a zero-based local index in order of first
//! appearance which fixes their position in the global system.

use std::collections::BTreeMap;

use crate::errors::{ReferenceError, ValidationError};
use crate::geometry::{Force, Point};

/// Number of degrees of freedom carried by each node.
pub const DOF_PER_NODE: usize = 2;

/// Global degree-of-freedom index for a node's local index and axis (`0` = x, `1` = y).
#[must_use]
pub const fn dof_index(local_index: usize, axis: usize) -> usize {
    DOF_PER_NODE * local_index + axis
}

/// A truss joint.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    /// User-facing id from the node table.
    pub id: i64,
    /// Position in the plane.
    pub position: Point,
    /// Contiguous local index, assigned in order of first appearance.
    pub index: usize,
    /// Fixed state of the x and y translations.
    pub support: [bool; 2],
    /// Applied point load.
    pub load: Force,
}

impl Node {
    /// Global degree-of-freedom indices of the x and y translations.
    #[must_use]
    pub const fn dofs(&self) -> [usize; 2] {
        [dof_index(self.index, 0), dof_index(self.index, 1)]
    }
}

/// Axial section and elastic properties shared by elements.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    /// User-facing id from the material table.
    pub id: i64,
    /// Cross-sectional area.
    pub area: f64,
    /// Young's modulus.
    pub elastic_modulus: f64,
}

impl Material {
    /// Axial rigidity `A·E`.
    #[must_use]
    pub fn axial_rigidity(&self) -> f64 {
        self.area * self.elastic_modulus
    }
}

/// A two-node link element carrying axial load only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Element {
    /// User-facing id from the element table.
    pub id: i64,
    /// Ids of the two end nodes.
    pub nodes: [i64; 2],
    /// Id of the element's material.
    pub material: i64,
}

/// One row of the boundary condition table.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BoundaryCondition {
    /// Type 1: fix the x and/or y translation at zero.
    Constraint {
        /// Whether the x translation is fixed.
        x: bool,
        /// Whether the y translation is fixed.
        y: bool,
    },
    /// Type 2: apply a point load.
    Load(Force),
}

impl BoundaryCondition {
    /// Interpret a raw `[type, v1, v2]` triple for `node`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownBoundaryType`] for a type other than 1 or 2,
    /// and [`ValidationError::NonBinaryConstraint`] when a type 1 value is not exactly
    /// `0` or `1`.
    ///
    /// # Examples
    /// ```
    /// use trussfem::BoundaryCondition;
    ///
    /// let fixed = BoundaryCondition::from_values(3, 1.0, 1.0, 0.0).unwrap();
    /// assert_eq!(fixed, BoundaryCondition::Constraint { x: true, y: false });
    /// assert!(BoundaryCondition::from_values(3, 1.0, 2.0, 0.0).is_err());
    /// ```
    pub fn from_values(node: i64, kind: f64, v1: f64, v2: f64) -> Result<Self, ValidationError> {
        if kind == 1.0 {
            Ok(BoundaryCondition::Constraint {
                x: binary_flag(node, v1)?,
                y: binary_flag(node, v2)?,
            })
        } else if kind == 2.0 {
            Ok(BoundaryCondition::Load(Force::new(v1, v2)))
        } else {
            Err(ValidationError::UnknownBoundaryType { node, kind })
        }
    }
}

/// Read a displacement constraint flag, which must be exactly 0 or 1.
fn binary_flag(node: i64, value: f64) -> Result<bool, ValidationError> {
    if value == 0.0 {
        Ok(false)
    } else if value == 1.0 {
        Ok(true)
    } else {
        Err(ValidationError::NonBinaryConstraint { node, value })
    }
}

/// Container for a planar truss problem.
#[derive(Clone, Debug, Default)]
pub struct Model {
    /// Nodes keyed by id.
    nodes: BTreeMap<i64, Node>,
    /// Materials keyed by id.
    materials: BTreeMap<i64, Material>,
    /// Elements keyed by id.
    elements: BTreeMap<i64, Element>,
}

impl Model {
    /// Create an empty model.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of distinct elements.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Number of distinct materials.
    #[must_use]
    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    /// Size of the global system, two translations per node.
    #[must_use]
    pub fn dof_count(&self) -> usize {
        DOF_PER_NODE * self.node_count()
    }

    /// Add a node, or replace the node with the same id.
    ///
    /// A new id takes the next free local index. A repeated id keeps the index of
    /// its first appearance; every other field is reset as if the node were new.
    /// Returns the node's local index.
    ///
    /// # Examples
    /// ```
    /// use trussfem::{point, Model};
    ///
    /// let mut model = Model::new();
    /// assert_eq!(model.add_node(10, point(0.0, 0.0)), 0);
    /// assert_eq!(model.add_node(4, point(1.0, 0.0)), 1);
    /// assert_eq!(model.add_node(10, point(2.0, 0.0)), 0);
    /// assert_eq!(model.node_count(), 2);
    /// ```
    pub fn add_node(&mut self, id: i64, position: Point) -> usize {
        let index = self
            .nodes
            .get(&id)
            .map_or(self.nodes.len(), |existing| existing.index);
        self.nodes.insert(
            id,
            Node {
                id,
                position,
                index,
                support: [false, false],
                load: Force::default(),
            },
        );
        index
    }

    /// Add a material, or replace the material with the same id.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the area or modulus is not strictly positive.
    pub fn add_material(
        &mut self,
        id: i64,
        area: f64,
        elastic_modulus: f64,
    ) -> Result<(), ValidationError> {
        if !(area > 0.0) {
            return Err(ValidationError::NonPositiveArea { material: id, area });
        }
        if !(elastic_modulus > 0.0) {
            return Err(ValidationError::NonPositiveElasticModulus {
                material: id,
                elastic_modulus,
            });
        }
        self.materials.insert(
            id,
            Material {
                id,
                area,
                elastic_modulus,
            },
        );
        Ok(())
    }

    /// Add an element, or replace the element with the same id.
    ///
    /// Node and material references are resolved during assembly.
    pub fn add_element(&mut self, id: i64, nodes: [i64; 2], material: i64) {
        self.elements.insert(
            id,
            Element {
                id,
                nodes,
                material,
            },
        );
    }

    /// Apply a boundary condition to an existing node.
    ///
    /// Constraints and loads are stored separately, so a node may carry both. A
    /// second condition of the same kind replaces the first.
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceError::UnknownBoundaryNode`] when `node` is not in the model.
    pub fn apply_boundary_condition(
        &mut self,
        node: i64,
        condition: BoundaryCondition,
    ) -> Result<(), ReferenceError> {
        let target = self
            .nodes
            .get_mut(&node)
            .ok_or(ReferenceError::UnknownBoundaryNode { node })?;
        match condition {
            BoundaryCondition::Constraint { x, y } => target.support = [x, y],
            BoundaryCondition::Load(load) => target.load = load,
        }
        Ok(())
    }

    /// Look up a node by id.
    #[must_use]
    pub fn node(&self, id: i64) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Look up a material by id.
    #[must_use]
    pub fn material(&self, id: i64) -> Option<&Material> {
        self.materials.get(&id)
    }

    /// Look up an element by id.
    #[must_use]
    pub fn element(&self, id: i64) -> Option<&Element> {
        self.elements.get(&id)
    }

    /// Nodes in ascending id order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Materials in ascending id order.
    pub fn materials(&self) -> impl Iterator<Item = &Material> {
        self.materials.values()
    }

    /// Elements in ascending id order.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.values()
    }

    /// Resolve both end nodes of `element`.
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceError::MissingNode`] naming the first end node that is not
    /// in the model.
    pub fn element_nodes(&self, element: &Element) -> Result<[&Node; 2], ReferenceError> {
        let lookup = |node: i64| {
            self.node(node).ok_or(ReferenceError::MissingNode {
                element: element.id,
                node,
            })
        };
        Ok([lookup(element.nodes[0])?, lookup(element.nodes[1])?])
    }

    /// Resolve the material of `element`.
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceError::MissingMaterial`] when the material id is not in the model.
    pub fn element_material(&self, element: &Element) -> Result<&Material, ReferenceError> {
        self.material(element.material)
            .ok_or(ReferenceError::MissingMaterial {
                element: element.id,
                material: element.material,
            })
    }
}
