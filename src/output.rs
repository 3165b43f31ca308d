//! Result files written after a successful analysis.
//!
//! Element and node results go to two plain tables, `<prefix>_element_results.txt`
//! and `<prefix>_node_results.txt`, with one `id strain stress` row per entry.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::errors::TrussError;
use crate::postprocess::Solution;

/// Paths of the two result tables for an output prefix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultPaths {
    /// Element results table.
    pub elements: PathBuf,
    /// Node results table.
    pub nodes: PathBuf,
}

impl ResultPaths {
    /// Derive both table paths from `prefix`.
    ///
    /// # Examples
    /// ```
    /// use std::path::PathBuf;
    /// use trussfem::output::ResultPaths;
    ///
    /// let paths = ResultPaths::from_prefix("out/bridge");
    /// assert_eq!(paths.elements, PathBuf::from("out/bridge_element_results.txt"));
    /// assert_eq!(paths.nodes, PathBuf::from("out/bridge_node_results.txt"));
    /// ```
    #[must_use]
    pub fn from_prefix(prefix: impl AsRef<Path>) -> Self {
        let prefix = prefix.as_ref().as_os_str();
        let with_suffix = |suffix: &str| {
            let mut path = prefix.to_owned();
            path.push(suffix);
            PathBuf::from(path)
        };
        Self {
            elements: with_suffix("_element_results.txt"),
            nodes: with_suffix("_node_results.txt"),
        }
    }
}

/// Write `rows` as `id strain stress` lines to `path`.
fn write_table(
    path: &Path,
    rows: impl Iterator<Item = (i64, f64, f64)>,
) -> Result<(), TrussError> {
    let file = File::create(path).map_err(|source| TrussError::io(path, source))?;
    let mut writer = BufWriter::new(file);
    for (id, strain, stress) in rows {
        writeln!(writer, "{id} {strain:.12e} {stress:.12e}")
            .map_err(|source| TrussError::io(path, source))?;
    }
    writer.flush().map_err(|source| TrussError::io(path, source))
}

/// Write the element and node result tables under `prefix`.
///
/// Returns the paths that were written.
///
/// # Errors
///
/// Returns [`TrussError::Io`] when either file cannot be created or written.
pub fn write_results(
    prefix: impl AsRef<Path>,
    solution: &Solution,
) -> Result<ResultPaths, TrussError> {
    let paths = ResultPaths::from_prefix(prefix);
    write_table(
        &paths.elements,
        solution
            .elements()
            .map(|(id, results)| (id, results.strain, results.stress)),
    )?;
    write_table(
        &paths.nodes,
        solution
            .nodes()
            .map(|(id, results)| (id, results.strain, results.stress)),
    )?;
    Ok(paths)
}

/// Dump the full solution as pretty-printed JSON.
///
/// # Errors
///
/// Returns [`TrussError::Io`] when the file cannot be written and
/// [`TrussError::Json`] when serialisation fails.
pub fn write_json(path: impl AsRef<Path>, solution: &Solution) -> Result<(), TrussError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| TrussError::io(path, source))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, solution)?;
    writer.flush().map_err(|source| TrussError::io(path, source))
}
