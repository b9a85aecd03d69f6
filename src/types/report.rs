use crate::rubric::RubricDocument;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ComponentLine {
    pub name: String,
    pub points_possible: f64,
    pub points_obtained: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PenaltyLine {
    pub description: String,
    pub points: f64,
}

/// Read-only view of a rubric for reporting.
#[derive(Debug, Clone, Serialize)]
pub struct RubricSummary {
    pub project_id: String,
    pub project_name: String,
    pub components: Vec<ComponentLine>,
    pub penalties: Vec<PenaltyLine>,
    pub total_points_obtained: f64,
    pub penalty_points: f64,
    pub total_points: f64,
    pub total_points_possible: f64,
    pub ungraded: Vec<String>,
    pub comments: Option<String>,
}

impl RubricSummary {
    pub fn from_document(document: &RubricDocument<'_>) -> Self {
        let project = document.project();
        let components = project
            .grade_components
            .iter()
            .map(|component| ComponentLine {
                name: component.name.clone(),
                points_possible: component.points,
                points_obtained: document.points_for(&component.name),
            })
            .collect();
        let penalties = document
            .penalties()
            .unwrap_or_default()
            .iter()
            .map(|penalty| PenaltyLine {
                description: penalty.description.clone(),
                points: penalty.points,
            })
            .collect();

        Self {
            project_id: project.id.clone(),
            project_name: project.name.clone(),
            components,
            penalties,
            total_points_obtained: document.total_points_obtained(),
            penalty_points: document.penalty_points(),
            total_points: document.total_points(),
            total_points_possible: document.total_points_possible(),
            ungraded: document
                .ungraded_components()
                .into_iter()
                .map(str::to_string)
                .collect(),
            comments: document.comments().map(str::to_string),
        }
    }
}
