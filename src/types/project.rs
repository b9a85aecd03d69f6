use crate::error::{AppError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeComponent {
    pub name: String,
    pub points: f64,
}

impl GradeComponent {
    pub fn new(name: impl Into<String>, points: f64) -> Self {
        Self {
            name: name.into(),
            points,
        }
    }
}

/// An assignment and its ordered list of grade components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(default)]
    pub grade_components: Vec<GradeComponent>,
}

impl Project {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            deadline: None,
            grade_components: Vec::new(),
        }
    }

    pub fn with_components(mut self, components: Vec<GradeComponent>) -> Result<Self> {
        for component in components {
            self.add_grade_component(component)?;
        }
        Ok(self)
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(AppError::PathNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path).map_err(|source| AppError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let project: Project = toml::from_str(&content).map_err(|e| {
            AppError::InvalidProject(format!("{}: {}", path.display(), e))
        })?;
        project.validate()?;
        tracing::debug!(
            project = %project.id,
            components = project.grade_components.len(),
            "loaded project"
        );
        Ok(project)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|source| AppError::Save {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for component in &self.grade_components {
            validate_component(component)?;
            if !seen.insert(component.name.as_str()) {
                return Err(AppError::InvalidProject(format!(
                    "duplicate grade component: {}",
                    component.name
                )));
            }
        }
        Ok(())
    }

    pub fn add_grade_component(&mut self, component: GradeComponent) -> Result<()> {
        validate_component(&component)?;
        if self.grade_component(&component.name).is_some() {
            return Err(AppError::InvalidProject(format!(
                "duplicate grade component: {}",
                component.name
            )));
        }
        self.grade_components.push(component);
        Ok(())
    }

    pub fn grade_component(&self, name: &str) -> Option<&GradeComponent> {
        self.grade_components
            .iter()
            .find(|component| component.name == name)
    }

    pub fn total_points(&self) -> f64 {
        self.grade_components
            .iter()
            .map(|component| component.points)
            .sum()
    }

    pub fn deadline_status(&self, now: DateTime<Utc>) -> Option<DeadlineStatus> {
        self.deadline
            .map(|deadline| DeadlineStatus::between(deadline, now))
    }
}

fn validate_component(component: &GradeComponent) -> Result<()> {
    if component.name.trim().is_empty() {
        return Err(AppError::InvalidProject(
            "grade component name cannot be empty".to_string(),
        ));
    }
    if !component.points.is_finite() || component.points < 0.0 {
        return Err(AppError::InvalidProject(format!(
            "grade component '{}' must have non-negative points (found {})",
            component.name, component.points
        )));
    }
    Ok(())
}

/// Previously recorded grades for one team on one project.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TeamProject {
    pub team: Option<String>,
    #[serde(default)]
    pub grades: BTreeMap<String, Option<f64>>,
}

impl TeamProject {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(AppError::PathNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path).map_err(|source| AppError::Read {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&content)
            .map_err(|e| AppError::ConfigParse(format!("{}: {}", path.display(), e)))
    }
}

/// Time left before a deadline, or time elapsed since it passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeadlineStatus {
    pub passed: bool,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl DeadlineStatus {
    pub fn between(deadline: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let passed = now > deadline;
        let diff = if passed { now - deadline } else { deadline - now };
        let total = diff.num_seconds();
        Self {
            passed,
            days: total / 86_400,
            hours: (total % 86_400) / 3_600,
            minutes: (total % 3_600) / 60,
            seconds: total % 60,
        }
    }
}

impl fmt::Display for DeadlineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.passed {
            write!(
                f,
                "The deadline passed {} days, {} hours, {} minutes, {} seconds ago",
                self.days, self.hours, self.minutes, self.seconds
            )
        } else {
            write!(
                f,
                "The deadline has not yet passed: {} days, {} hours, {} minutes, {} seconds left",
                self.days, self.hours, self.minutes, self.seconds
            )
        }
    }
}
