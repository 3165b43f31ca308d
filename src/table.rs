//! Reading the four numeric definition tables into a [`Model`].
//!
//! Each table is plain text with one row per line and fields separated by
//! whitespace or commas. Blank lines and lines starting with `#` are ignored.

use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{FormatError, TableKind, TrussError};
use crate::geometry::point;
use crate::model::{BoundaryCondition, Model};

/// Largest magnitude an id may have and still be represented exactly by `f64`.
const MAX_EXACT_ID: f64 = 9_007_199_254_740_992.0;

/// A parsed numeric table.
#[derive(Clone, Debug, PartialEq)]
pub struct Table {
    /// Which definition file this table came from.
    kind: TableKind,
    /// Row values together with their 1-based line numbers.
    rows: Vec<(usize, Vec<f64>)>,
}

impl Table {
    /// Parse `text` as a table of `kind`, checking that every row has the table's width.
    ///
    /// # Errors
    ///
    /// Returns [`TrussError::Format`] naming `kind` when the text is empty, contains a
    /// non-numeric or non-finite field, has rows of unequal width, or has the wrong number of columns.
    ///
    /// # Examples
    /// ```
    /// use trussfem::{Table, TableKind};
    ///
    /// let table = Table::parse(TableKind::Nodes, "1 0.0 0.0\n2 1.0 0.0\n").unwrap();
    /// assert_eq!(table.len(), 2);
    /// assert!(Table::parse(TableKind::Nodes, "1 0.0\n").is_err());
    /// ```
    pub fn parse(kind: TableKind, text: &str) -> Result<Self, TrussError> {
        let fail = |reason| TrussError::format(kind, reason);
        let mut rows: Vec<(usize, Vec<f64>)> = Vec::new();
        for (offset, line) in text.lines().enumerate() {
            let line_number = offset + 1;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let values = trimmed
                .split(|c: char| c.is_whitespace() || c == ',')
                .filter(|field| !field.is_empty())
                .map(|field| match field.parse::<f64>() {
                    Ok(value) if value.is_finite() => Ok(value),
                    Ok(_) => Err(fail(FormatError::NonFinite {
                        line: line_number,
                        field: field.to_owned(),
                    })),
                    Err(_) => Err(fail(FormatError::NotANumber {
                        line: line_number,
                        field: field.to_owned(),
                    })),
                })
                .collect::<Result<Vec<f64>, TrussError>>()?;
            if let Some((_, first)) = rows.first() {
                if values.len() != first.len() {
                    return Err(fail(FormatError::RaggedRow {
                        line: line_number,
                        expected: first.len(),
                        found: values.len(),
                    }));
                }
            }
            rows.push((line_number, values));
        }

        let found = match rows.first() {
            Some((_, first)) => first.len(),
            None => return Err(fail(FormatError::Empty)),
        };
        if found != kind.width() {
            return Err(fail(FormatError::ColumnCount {
                expected: kind.width(),
                found,
            }));
        }
        Ok(Self { kind, rows })
    }

    /// Read and parse the table stored at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`TrussError::Io`] when the file cannot be read, and the errors of
    /// [`Table::parse`] otherwise.
    pub fn load(kind: TableKind, path: impl AsRef<Path>) -> Result<Self, TrussError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| TrussError::io(path, source))?;
        Self::parse(kind, &text)
    }

    /// Which definition file the table came from.
    #[must_use]
    pub fn kind(&self) -> TableKind {
        self.kind
    }

    /// Number of data rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no data rows. Parsed tables never are.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Interpret `value`, read on `line`, as an integer id.
    fn id(&self, line: usize, value: f64) -> Result<i64, TrussError> {
        if value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_EXACT_ID {
            Ok(value as i64)
        } else {
            Err(TrussError::format(
                self.kind,
                FormatError::InvalidId { line, value },
            ))
        }
    }
}

/// Paths of the four definition files that describe a problem.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProblemFiles {
    /// Material table `[id, A, E]`.
    pub materials: PathBuf,
    /// Node table `[id, x, y]`.
    pub nodes: PathBuf,
    /// Element table `[id, node1, node2, material]`.
    pub elements: PathBuf,
    /// Boundary condition table `[node, type, v1, v2]`.
    pub boundary_conditions: PathBuf,
}

impl ProblemFiles {
    /// Read all four tables and build the model.
    ///
    /// # Errors
    ///
    /// Returns the first I/O, format, validation or reference error encountered.
    pub fn load(&self) -> Result<Model, TrussError> {
        let nodes = Table::load(TableKind::Nodes, &self.nodes)?;
        let materials = Table::load(TableKind::Materials, &self.materials)?;
        let elements = Table::load(TableKind::Elements, &self.elements)?;
        let boundary_conditions =
            Table::load(TableKind::BoundaryConditions, &self.boundary_conditions)?;
        build_model(&nodes, &materials, &elements, &boundary_conditions)
    }
}

/// Build a model from already parsed tables.
///
/// Tables are applied in the order nodes, materials, elements, boundary conditions.
///
/// # Errors
///
/// Returns [`TrussError::Format`] for non-integral ids, [`TrussError::Validation`] for
/// invalid materials or boundary rows and [`TrussError::Reference`] for boundary rows
/// naming unknown nodes.
pub fn build_model(
    nodes: &Table,
    materials: &Table,
    elements: &Table,
    boundary_conditions: &Table,
) -> Result<Model, TrussError> {
    let mut model = Model::new();

    for (line, row) in &nodes.rows {
        let id = nodes.id(*line, row[0])?;
        model.add_node(id, point(row[1], row[2]));
    }

    for (line, row) in &materials.rows {
        let id = materials.id(*line, row[0])?;
        model.add_material(id, row[1], row[2])?;
    }

    for (line, row) in &elements.rows {
        let id = elements.id(*line, row[0])?;
        let first = elements.id(*line, row[1])?;
        let second = elements.id(*line, row[2])?;
        let material = elements.id(*line, row[3])?;
        model.add_element(id, [first, second], material);
    }

    for (line, row) in &boundary_conditions.rows {
        let node = boundary_conditions.id(*line, row[0])?;
        let condition = BoundaryCondition::from_values(node, row[1], row[2], row[3])?;
        model.apply_boundary_condition(node, condition)?;
    }

    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{ReferenceError, ValidationError};
    use crate::geometry::force;

    fn parse(kind: TableKind, text: &str) -> Table {
        Table::parse(kind, text).expect("table parses")
    }

    #[test]
    fn accepts_whitespace_commas_comments_and_blank_lines() {
        let table = parse(
            TableKind::Elements,
            "# id n1 n2 mat\n1 1 2 1\n\n2,\t2, 3 ,1\n",
        );
        assert_eq!(table.kind(), TableKind::Elements);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[1], (4, vec![2.0, 2.0, 3.0, 1.0]));
    }

    #[test]
    fn wrong_column_count_names_the_table() {
        let error = Table::parse(TableKind::Materials, "1 0.01 200e9 5\n")
            .expect_err("four columns rejected");
        assert!(matches!(
            error,
            TrussError::Format {
                table: TableKind::Materials,
                reason: FormatError::ColumnCount {
                    expected: 3,
                    found: 4
                }
            }
        ));
        assert!(error.to_string().starts_with("invalid material definition file"));
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let error = Table::parse(TableKind::Nodes, "1 0 0\n2 1\n").expect_err("ragged");
        assert!(matches!(
            error,
            TrussError::Format {
                reason: FormatError::RaggedRow {
                    line: 2,
                    expected: 3,
                    found: 2
                },
                ..
            }
        ));
    }

    #[test]
    fn non_numeric_and_empty_tables_are_rejected() {
        let error = Table::parse(TableKind::Nodes, "1 zero 0\n").expect_err("text field");
        assert!(matches!(
            error,
            TrussError::Format {
                reason: FormatError::NotANumber { line: 1, .. },
                ..
            }
        ));

        let error = Table::parse(TableKind::BoundaryConditions, "\n# nothing\n")
            .expect_err("empty table");
        assert!(matches!(
            error,
            TrussError::Format {
                table: TableKind::BoundaryConditions,
                reason: FormatError::Empty
            }
        ));
    }

    #[test]
    fn non_finite_fields_are_rejected() {
        let error = Table::parse(TableKind::BoundaryConditions, "1 1 1 1\n3 2 NaN -1000\n")
            .expect_err("NaN load");
        assert!(matches!(
            error,
            TrussError::Format {
                table: TableKind::BoundaryConditions,
                reason: FormatError::NonFinite { line: 2, ref field },
            } if field == "NaN"
        ));

        let error =
            Table::parse(TableKind::Nodes, "1 0 0\n2 inf 0\n").expect_err("inf coordinate");
        assert!(matches!(
            error,
            TrussError::Format {
                table: TableKind::Nodes,
                reason: FormatError::NonFinite { line: 2, .. },
            }
        ));
        assert_eq!(
            error.to_string(),
            "invalid node definition file: line 2: `inf` is not a finite number"
        );
    }

    #[test]
    fn builds_model_from_tables() {
        let nodes = parse(TableKind::Nodes, "1 0 0\n2 3 0\n3 0 4\n");
        let materials = parse(TableKind::Materials, "7 0.5 100\n");
        let elements = parse(TableKind::Elements, "1 1 2 7\n2 2 3 7\n");
        let bcs = parse(
            TableKind::BoundaryConditions,
            "1 1 1 1\n3 1 1 0\n2 2 0 -10\n3 2 5 0\n",
        );

        let model = build_model(&nodes, &materials, &elements, &bcs).expect("model builds");
        assert_eq!(model.node_count(), 3);
        assert_eq!(model.element_count(), 2);
        assert_eq!(model.material(7).expect("material").elastic_modulus, 100.0);

        let node3 = model.node(3).expect("node 3");
        assert_eq!(node3.support, [true, false]);
        assert_eq!(node3.load, force(5.0, 0.0));
        let node2 = model.node(2).expect("node 2");
        assert_eq!(node2.support, [false, false]);
        assert_eq!(node2.load, force(0.0, -10.0));
    }

    #[test]
    fn invalid_boundary_rows_fail_validation() {
        let nodes = parse(TableKind::Nodes, "1 0 0\n2 1 0\n");
        let materials = parse(TableKind::Materials, "1 1 1\n");
        let elements = parse(TableKind::Elements, "1 1 2 1\n");

        let non_binary = parse(TableKind::BoundaryConditions, "1 1 2 0\n");
        let error = build_model(&nodes, &materials, &elements, &non_binary)
            .expect_err("non-binary constraint rejected");
        assert!(matches!(
            error,
            TrussError::Validation(ValidationError::NonBinaryConstraint { node: 1, .. })
        ));

        let unknown_type = parse(TableKind::BoundaryConditions, "1 3 0 0\n");
        let error = build_model(&nodes, &materials, &elements, &unknown_type)
            .expect_err("unknown type rejected");
        assert!(matches!(
            error,
            TrussError::Validation(ValidationError::UnknownBoundaryType { node: 1, .. })
        ));

        let unknown_node = parse(TableKind::BoundaryConditions, "5 1 1 1\n");
        let error = build_model(&nodes, &materials, &elements, &unknown_node)
            .expect_err("unknown node rejected");
        assert!(matches!(
            error,
            TrussError::Reference(ReferenceError::UnknownBoundaryNode { node: 5 })
        ));
    }

    #[test]
    fn fractional_ids_are_rejected() {
        let nodes = parse(TableKind::Nodes, "1.5 0 0\n");
        let materials = parse(TableKind::Materials, "1 1 1\n");
        let elements = parse(TableKind::Elements, "1 1 2 1\n");
        let bcs = parse(TableKind::BoundaryConditions, "1 1 1 1\n");
        let error = build_model(&nodes, &materials, &elements, &bcs).expect_err("fractional id");
        assert!(matches!(
            error,
            TrussError::Format {
                table: TableKind::Nodes,
                reason: FormatError::InvalidId { line: 1, .. }
            }
        ));
    }
}
