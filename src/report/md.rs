use crate::rubric::format::format_points;
use crate::types::report::RubricSummary;

pub fn to_markdown(summary: &RubricSummary) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "# Rubric: {} ({})\n\n",
        summary.project_name, summary.project_id
    ));

    output.push_str("## Points\n\n");
    output.push_str("| Component | Obtained | Possible |\n");
    output.push_str("|---|---|---|\n");
    for component in &summary.components {
        output.push_str(&format!(
            "| {} | {} | {} |\n",
            component.name,
            component
                .points_obtained
                .map(format_points)
                .unwrap_or_else(|| "-".to_string()),
            format_points(component.points_possible)
        ));
    }
    output.push('\n');

    if !summary.penalties.is_empty() {
        output.push_str("## Penalties\n\n");
        for penalty in &summary.penalties {
            output.push_str(&format!(
                "- {}: {}\n",
                penalty.description,
                format_points(penalty.points)
            ));
        }
        output.push('\n');
    }

    output.push_str(&format!(
        "Total: {} / {}\n",
        format_points(summary.total_points),
        format_points(summary.total_points_possible)
    ));
    if !summary.ungraded.is_empty() {
        output.push_str(&format!("Ungraded: {}\n", summary.ungraded.join(", ")));
    }

    if let Some(comments) = &summary.comments {
        output.push_str("\n## Comments\n\n");
        output.push_str(comments);
        output.push('\n');
    }

    output
}
