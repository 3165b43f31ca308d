//! Error types produced while loading, solving or reporting a truss problem.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Identifies one of the four input definition tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableKind {
    /// Node table with columns `[id, x, y]`.
    Nodes,
    /// Material table with columns `[id, A, E]`.
    Materials,
    /// Element table with columns `[id, node1, node2, material]`.
    Elements,
    /// Boundary condition table with columns `[node, type, v1, v2]`.
    BoundaryConditions,
}

impl TableKind {
    /// Number of columns each row of the table must carry.
    #[must_use]
    pub const fn width(self) -> usize {
        match self {
            TableKind::Nodes | TableKind::Materials => 3,
            TableKind::Elements | TableKind::BoundaryConditions => 4,
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TableKind::Nodes => "node",
            TableKind::Materials => "material",
            TableKind::Elements => "element",
            TableKind::BoundaryConditions => "boundary condition",
        };
        f.write_str(name)
    }
}

/// Reason a definition table could not be read.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum FormatError {
    /// The table does not carry the expected number of columns.
    #[error("expected {expected} columns but found {found}")]
    ColumnCount {
        /// Width required for this table.
        expected: usize,
        /// Width found in the file.
        found: usize,
    },
    /// A row has a different width from the first row.
    #[error("line {line} has {found} columns, earlier rows have {expected}")]
    RaggedRow {
        /// 1-based line number in the file.
        line: usize,
        /// Width established by the first row.
        expected: usize,
        /// Width of the offending row.
        found: usize,
    },
    /// A field is not a number.
    #[error("line {line}: `{field}` is not a number")]
    NotANumber {
        /// 1-based line number in the file.
        line: usize,
        /// Offending text.
        field: String,
    },
    /// A field parses as a number but is NaN or infinite.
    #[error("line {line}: `{field}` is not a finite number")]
    NonFinite {
        /// 1-based line number in the file.
        line: usize,
        /// Offending text.
        field: String,
    },
    /// An id column holds a value that is not an integer.
    #[error("line {line}: `{value}` is not a valid integer id")]
    InvalidId {
        /// 1-based line number in the file.
        line: usize,
        /// Offending value.
        value: f64,
    },
    /// The table has no rows.
    #[error("table is empty")]
    Empty,
}

/// Input that is well formed but physically or semantically invalid.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ValidationError {
    /// Boundary condition row with a type other than 1 or 2.
    #[error("node {node}: unknown boundary condition type {kind}")]
    UnknownBoundaryType {
        /// Node the row applies to.
        node: i64,
        /// Rejected type value.
        kind: f64,
    },
    /// Displacement constraint value other than exactly 0 or 1.
    #[error("node {node}: displacement constraint values must be 0 or 1 (received {value})")]
    NonBinaryConstraint {
        /// Node the row applies to.
        node: i64,
        /// Rejected value.
        value: f64,
    },
    /// Element whose end nodes coincide.
    #[error("element {element} has zero length")]
    ZeroLengthElement {
        /// Offending element id.
        element: i64,
    },
    /// Element whose end nodes lie at a non-finite distance.
    #[error("element {element} has a non-finite length")]
    NonFiniteLength {
        /// Offending element id.
        element: i64,
    },
    /// Material with a cross-sectional area that is not strictly positive.
    #[error("material {material}: area must be positive (received {area})")]
    NonPositiveArea {
        /// Offending material id.
        material: i64,
        /// Rejected area.
        area: f64,
    },
    /// Material with a Young's modulus that is not strictly positive.
    #[error("material {material}: elastic modulus must be positive (received {elastic_modulus})")]
    NonPositiveElasticModulus {
        /// Offending material id.
        material: i64,
        /// Rejected modulus.
        elastic_modulus: f64,
    },
    /// Analysis setting that is not a finite positive number.
    #[error("setting `{name}` must be a finite positive number (received {value})")]
    InvalidSetting {
        /// Name of the setting.
        name: &'static str,
        /// Rejected value.
        value: f64,
    },
}

/// Reference to an id that is not defined in its table.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ReferenceError {
    /// Element refers to a material that does not exist.
    #[error("element {element} refers to unknown material {material}")]
    MissingMaterial {
        /// Referring element.
        element: i64,
        /// Missing material id.
        material: i64,
    },
    /// Element refers to a node that does not exist.
    #[error("element {element} refers to unknown node {node}")]
    MissingNode {
        /// Referring element.
        element: i64,
        /// Missing node id.
        node: i64,
    },
    /// Boundary condition row names a node that does not exist.
    #[error("boundary condition refers to unknown node {node}")]
    UnknownBoundaryNode {
        /// Missing node id.
        node: i64,
    },
}

/// Shape mismatch between the assembled system and the model.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DimensionError {
    /// The stiffness matrix is not square.
    #[error("stiffness matrix is {rows}x{cols}, expected a square matrix")]
    NonSquare {
        /// Number of rows.
        rows: usize,
        /// Number of columns.
        cols: usize,
    },
    /// The stiffness matrix does not match the degree-of-freedom count.
    #[error("stiffness matrix has dimension {found}, expected {expected} degrees of freedom")]
    Stiffness {
        /// Expected degree-of-freedom count.
        expected: usize,
        /// Dimension found.
        found: usize,
    },
    /// The force vector does not match the degree-of-freedom count.
    #[error("force vector has length {found}, expected {expected} degrees of freedom")]
    Force {
        /// Expected degree-of-freedom count.
        expected: usize,
        /// Length found.
        found: usize,
    },
    /// There is nothing to solve.
    #[error("system has no degrees of freedom")]
    Empty,
}

/// Error returned by any stage of a truss analysis.
#[derive(Debug, Error)]
pub enum TrussError {
    /// A definition table is malformed.
    #[error("invalid {table} definition file: {reason}")]
    Format {
        /// Table that failed to parse.
        table: TableKind,
        /// What was wrong with it.
        #[source]
        reason: FormatError,
    },
    /// Input values are not acceptable.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// An id refers to an entity that does not exist.
    #[error(transparent)]
    Reference(#[from] ReferenceError),
    /// The assembled system has the wrong shape.
    #[error(transparent)]
    Dimension(#[from] DimensionError),
    /// The stiffness matrix is too badly conditioned to solve.
    #[error(
        "stiffness matrix condition number {condition_number:e} reaches the limit of \
         {threshold:e}; check supports and connectivity"
    )]
    Conditioning {
        /// Computed condition number.
        condition_number: f64,
        /// Threshold it was compared against.
        threshold: f64,
    },
    /// A file could not be read or written.
    #[error("{}: {source}", .path.display())]
    Io {
        /// File being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// JSON settings or output could not be processed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TrussError {
    /// Wrap a [`FormatError`] with the table it occurred in.
    #[must_use]
    pub fn format(table: TableKind, reason: FormatError) -> Self {
        TrussError::Format { table, reason }
    }

    /// Wrap an I/O error with the path being accessed.
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TrussError::Io {
            path: path.into(),
            source,
        }
    }
}
