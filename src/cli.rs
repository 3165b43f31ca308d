use std::path::PathBuf;

use clap::Parser;
use trussfem::{AnalysisSettings, ProblemFiles, TrussError};

/// Linear static analysis of 2D pin-jointed trusses.
#[derive(Debug, Parser)]
#[command(name = "trussfem", version, about)]
pub struct Cli {
    /// Material table with rows `id A E`
    pub materials: PathBuf,
    /// Node table with rows `id x y`
    pub nodes: PathBuf,
    /// Element table with rows `id node1 node2 material`
    pub elements: PathBuf,
    /// Boundary condition table with rows `node type v1 v2`
    pub boundary_conditions: PathBuf,
    /// Prefix of the `_element_results.txt` and `_node_results.txt` output files
    pub output_prefix: PathBuf,
    /// JSON file with `penalty_stiffness` and `max_condition_number`
    #[arg(long, value_name = "FILE")]
    pub settings: Option<PathBuf>,
    /// Penalty stiffness added to fixed degrees of freedom
    #[arg(long, value_name = "VALUE")]
    pub penalty: Option<f64>,
    /// Refuse systems whose condition number reaches this value
    #[arg(long = "max-condition", value_name = "VALUE")]
    pub max_condition: Option<f64>,
    /// Also write the full solution as JSON
    #[arg(long, value_name = "FILE")]
    pub json: Option<PathBuf>,
    /// Skip the console summary and progress messages
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// The four definition files named on the command line.
    pub fn problem_files(&self) -> ProblemFiles {
        ProblemFiles {
            materials: self.materials.clone(),
            nodes: self.nodes.clone(),
            elements: self.elements.clone(),
            boundary_conditions: self.boundary_conditions.clone(),
        }
    }

    /// Settings from the optional file, overridden by explicit flags.
    pub fn analysis_settings(&self) -> Result<AnalysisSettings, TrussError> {
        let mut settings = match &self.settings {
            Some(path) => AnalysisSettings::from_json_file(path)?,
            None => AnalysisSettings::default(),
        };
        if let Some(penalty) = self.penalty {
            settings.penalty_stiffness = penalty;
        }
        if let Some(max_condition) = self.max_condition {
            settings.max_condition_number = max_condition;
        }
        settings.validate()?;
        Ok(settings)
    }
}
