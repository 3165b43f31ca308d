//! Human-readable console summary of a solved truss.

use std::fmt::Write;

use crate::model::Model;
use crate::postprocess::Solution;

/// Render the element results, the averaged node results and the displacement of
/// every reported node.
///
/// Nodes without contributing elements are left out.
#[must_use]
pub fn render_summary(model: &Model, solution: &Solution) -> String {
    let mut output = String::new();

    writeln!(
        &mut output,
        "Truss analysis: {} nodes, {} elements, {} degrees of freedom",
        model.node_count(),
        model.element_count(),
        model.dof_count()
    )
    .expect("writing to string cannot fail");

    output.push_str("\nElement results\n");
    writeln!(
        &mut output,
        "{:>10} {:>14} {:>14} {:>10}",
        "element", "strain", "stress", "angle"
    )
    .expect("writing to string cannot fail");
    for (id, results) in solution.elements() {
        writeln!(
            &mut output,
            "{:>10} {:>+14.6e} {:>+14.6e} {:>+10.2}",
            id,
            results.strain,
            results.stress,
            results.angle.to_degrees()
        )
        .expect("writing to string cannot fail");
    }

    output.push_str("\nNode results (average of contributing elements)\n");
    writeln!(
        &mut output,
        "{:>10} {:>14} {:>14} {:>14} {:>14}",
        "node", "strain", "stress", "ux", "uy"
    )
    .expect("writing to string cannot fail");
    for (id, results) in solution.nodes() {
        writeln!(
            &mut output,
            "{:>10} {:>+14.6e} {:>+14.6e} {:>+14.6e} {:>+14.6e}",
            id,
            results.strain,
            results.stress,
            results.displacement.x,
            results.displacement.y
        )
        .expect("writing to string cannot fail");
    }

    output
}
