mod cli;

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use cli::Cli;
use trussfem::output::{write_json, write_results};
use trussfem::report::render_summary;
use trussfem::topology::Connectivity;
use trussfem::{analyse, TrussError};

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            eprintln!("{}", Cli::command().render_usage());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), TrussError> {
    let settings = cli.analysis_settings()?;
    let model = cli.problem_files().load()?;
    if !cli.quiet {
        eprintln!(
            "info: loaded {} nodes, {} materials and {} elements",
            model.node_count(),
            model.material_count(),
            model.element_count()
        );
    }

    // Unattached parts are the usual cause of a conditioning failure, so say so first.
    let connectivity = Connectivity::from_model(&model);
    let isolated = connectivity.isolated_nodes();
    for node in &isolated {
        eprintln!("warning: node {node} is not connected to any element");
    }
    let structures = connectivity.component_count() - isolated.len();
    if structures > 1 {
        eprintln!("warning: elements form {structures} disconnected sub-structures");
    }

    let solution = analyse(&model, &settings)?;

    let paths = write_results(&cli.output_prefix, &solution)?;
    if !cli.quiet {
        eprintln!(
            "info: wrote output to {} and {}",
            paths.elements.display(),
            paths.nodes.display()
        );
    }
    if let Some(json) = &cli.json {
        write_json(json, &solution)?;
        if !cli.quiet {
            eprintln!("info: wrote solution to {}", json.display());
        }
    }

    if !cli.quiet {
        print!("{}", render_summary(&model, &solution));
    }
    Ok(())
}
