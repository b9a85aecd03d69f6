//! Rubric files: the per-team record of points obtained, penalties, and
//! grader comments for one project.
//!
//! A [`RubricDocument`] is built either from a project (optionally seeded
//! with recorded team grades) or by parsing a previously written file.
//! Either way the document always agrees with the project's grade
//! components: one entry per component, obtained points within
//! `0..=possible`, and strictly negative penalties.

pub mod format;
pub mod parser;
pub mod writer;

use crate::error::RubricError;
use crate::rubric::format::normalize_comment;
use crate::types::project::{Project, TeamProject};
use std::collections::BTreeMap;

pub use writer::WriteOptions;

pub const FIELD_COMMENTS: &str = "Comments";
pub const FIELD_PENALTIES: &str = "Penalties";
pub const FIELD_POINTS: &str = "Points";
pub const FIELD_TOTAL_POINTS: &str = "Total Points";
pub const FIELD_POINTS_POSSIBLE: &str = "Points Possible";
pub const FIELD_POINTS_OBTAINED: &str = "Points Obtained";

/// Written in place of an empty comments block.
pub const BLANK_COMMENTS: &str = "None";

#[derive(Debug, Clone, PartialEq)]
pub struct Penalty {
    pub description: String,
    pub points: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RubricDocument<'p> {
    project: &'p Project,
    points: BTreeMap<String, Option<f64>>,
    penalties: Option<Vec<Penalty>>,
    comments: Option<String>,
}

impl<'p> RubricDocument<'p> {
    /// Starts a grading pass: every component ungraded unless `team_project`
    /// already recorded a value for it.
    pub fn from_project(
        project: &'p Project,
        team_project: Option<&TeamProject>,
    ) -> Result<Self, RubricError> {
        let points = project
            .grade_components
            .iter()
            .map(|component| (component.name.clone(), None))
            .collect();
        let mut document = Self {
            project,
            points,
            penalties: None,
            comments: None,
        };

        if let Some(team_project) = team_project {
            for (name, value) in &team_project.grades {
                document.set_points(name, *value)?;
            }
            tracing::debug!(
                team = team_project.team.as_deref().unwrap_or("-"),
                recorded = team_project.grades.len(),
                "seeded rubric from recorded grades"
            );
        }

        Ok(document)
    }

    pub(crate) fn from_parts(
        project: &'p Project,
        points: BTreeMap<String, Option<f64>>,
        penalties: Option<Vec<Penalty>>,
        comments: Option<String>,
    ) -> Self {
        Self {
            project,
            points,
            penalties,
            comments,
        }
    }

    pub fn project(&self) -> &'p Project {
        self.project
    }

    pub fn points(&self) -> &BTreeMap<String, Option<f64>> {
        &self.points
    }

    pub fn points_for(&self, component: &str) -> Option<f64> {
        self.points.get(component).copied().flatten()
    }

    pub fn penalties(&self) -> Option<&[Penalty]> {
        self.penalties.as_deref()
    }

    pub fn comments(&self) -> Option<&str> {
        self.comments.as_deref()
    }

    pub fn set_points(&mut self, component: &str, value: Option<f64>) -> Result<(), RubricError> {
        let grade_component = self
            .project
            .grade_component(component)
            .ok_or_else(|| RubricError::UnknownComponent(component.to_string()))?;
        if let Some(value) = value {
            check_obtained(component, value, grade_component.points)?;
        }
        self.points.insert(component.to_string(), value);
        Ok(())
    }

    pub fn add_penalty(
        &mut self,
        description: impl Into<String>,
        points: f64,
    ) -> Result<(), RubricError> {
        let description = description.into();
        check_penalty(&description, points)?;
        let penalties = self.penalties.get_or_insert_with(Vec::new);
        if penalties
            .iter()
            .any(|penalty| penalty.description == description)
        {
            return Err(RubricError::DuplicatePenalty(description));
        }
        penalties.push(Penalty {
            description,
            points,
        });
        Ok(())
    }

    pub fn set_comments(&mut self, comments: Option<String>) {
        self.comments = comments.as_deref().and_then(normalize_comment);
    }

    pub fn total_points_possible(&self) -> f64 {
        self.project.total_points()
    }

    /// Sum of recorded points; ungraded components count as zero.
    pub fn total_points_obtained(&self) -> f64 {
        self.project
            .grade_components
            .iter()
            .filter_map(|component| self.points_for(&component.name))
            .sum()
    }

    pub fn penalty_points(&self) -> f64 {
        self.penalties
            .iter()
            .flatten()
            .map(|penalty| penalty.points)
            .sum()
    }

    pub fn total_points(&self) -> f64 {
        self.total_points_obtained() + self.penalty_points()
    }

    pub fn ungraded_components(&self) -> Vec<&str> {
        self.project
            .grade_components
            .iter()
            .filter(|component| self.points_for(&component.name).is_none())
            .map(|component| component.name.as_str())
            .collect()
    }

    pub fn is_fully_graded(&self) -> bool {
        self.ungraded_components().is_empty()
    }
}

pub(crate) fn check_obtained(component: &str, points: f64, possible: f64) -> Result<(), RubricError> {
    if !points.is_finite() {
        return Err(RubricError::InvalidNumber {
            field: format!("{FIELD_POINTS}.{component}.{FIELD_POINTS_OBTAINED}"),
            value: points.to_string(),
        });
    }
    if points < 0.0 {
        return Err(RubricError::NegativePoints {
            component: component.to_string(),
            points,
        });
    }
    if points > possible {
        return Err(RubricError::ExcessPoints {
            component: component.to_string(),
            points,
            possible,
        });
    }
    Ok(())
}

pub(crate) fn check_penalty(description: &str, points: f64) -> Result<(), RubricError> {
    if !points.is_finite() {
        return Err(RubricError::InvalidNumber {
            field: format!("{FIELD_PENALTIES}.{description}"),
            value: points.to_string(),
        });
    }
    // Sign is judged on the written two-decimal value.
    if (points * 100.0).round() >= 0.0 {
        return Err(RubricError::NonNegativePenalty {
            description: description.to_string(),
            points,
        });
    }
    Ok(())
}
