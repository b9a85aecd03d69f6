use super::format::same_points;
use super::{
    check_obtained, check_penalty, Penalty, RubricDocument, BLANK_COMMENTS, FIELD_COMMENTS,
    FIELD_PENALTIES, FIELD_POINTS, FIELD_POINTS_OBTAINED, FIELD_POINTS_POSSIBLE,
    FIELD_TOTAL_POINTS,
};
use crate::error::{AppError, Result, RubricError};
use crate::rubric::format::normalize_comment;
use crate::types::project::Project;
use serde_yaml::{Mapping, Value};
use std::collections::BTreeMap;
use std::path::Path;

const TOP_LEVEL_FIELDS: [&str; 4] = [
    FIELD_POINTS,
    FIELD_PENALTIES,
    FIELD_TOTAL_POINTS,
    FIELD_COMMENTS,
];
const COMPONENT_FIELDS: [&str; 2] = [FIELD_POINTS_POSSIBLE, FIELD_POINTS_OBTAINED];

impl<'p> RubricDocument<'p> {
    /// Reads a rubric and checks it against `project`. Any structural or
    /// numeric inconsistency rejects the whole document.
    #[tracing::instrument(skip(text, project), fields(project = %project.id))]
    pub fn parse(text: &str, project: &'p Project) -> std::result::Result<Self, RubricError> {
        let root: Value = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_yaml::from_str(text)?
        };
        let root = mapping_or_empty(&root, "document")?;

        let points_section =
            lookup(&root, FIELD_POINTS).ok_or(RubricError::MissingField(FIELD_POINTS))?;
        let total_field = lookup(&root, FIELD_TOTAL_POINTS)
            .ok_or(RubricError::MissingField(FIELD_TOTAL_POINTS))?;
        reject_unknown_keys(&root, &TOP_LEVEL_FIELDS, None)?;

        let points_section = mapping_or_empty(points_section, FIELD_POINTS)?;
        let mut points = BTreeMap::new();
        let mut total_points_obtained = 0.0;
        let mut total_points_possible = 0.0;
        for grade_component in &project.grade_components {
            let name = grade_component.name.as_str();
            let entry = lookup(&points_section, name)
                .ok_or_else(|| RubricError::MissingComponent(name.to_string()))?;
            let entry_path = format!("{FIELD_POINTS}.{name}");
            let entry = mapping_or_empty(entry, &entry_path)?;

            let possible = lookup(&entry, FIELD_POINTS_POSSIBLE).ok_or_else(|| {
                RubricError::MissingComponentField {
                    component: name.to_string(),
                    field: FIELD_POINTS_POSSIBLE,
                }
            })?;
            let obtained = lookup(&entry, FIELD_POINTS_OBTAINED).ok_or_else(|| {
                RubricError::MissingComponentField {
                    component: name.to_string(),
                    field: FIELD_POINTS_OBTAINED,
                }
            })?;
            reject_unknown_keys(&entry, &COMPONENT_FIELDS, Some(&entry_path))?;

            let possible = number(possible, &format!("{entry_path}.{FIELD_POINTS_POSSIBLE}"))?;
            if !same_points(possible, grade_component.points) {
                return Err(RubricError::PossiblePointsMismatch {
                    component: name.to_string(),
                    expected: grade_component.points,
                    got: possible,
                });
            }

            let obtained =
                optional_number(obtained, &format!("{entry_path}.{FIELD_POINTS_OBTAINED}"))?;
            if let Some(obtained) = obtained {
                check_obtained(name, obtained, grade_component.points)?;
                total_points_obtained += obtained;
            }

            points.insert(name.to_string(), obtained);
            total_points_possible += grade_component.points;
        }

        for (key, _) in points_section.iter() {
            let name = key_name(key);
            if project.grade_component(&name).is_none() {
                return Err(RubricError::UnknownComponent(name));
            }
        }

        let penalties = match lookup(&root, FIELD_PENALTIES) {
            None | Some(Value::Null) => None,
            Some(Value::Mapping(section)) => Some(parse_penalties(section)?),
            Some(_) => {
                return Err(RubricError::InvalidStructure {
                    field: FIELD_PENALTIES.to_string(),
                    expected: "a mapping of descriptions to negative points",
                })
            }
        };
        let penalty_points: f64 = penalties
            .iter()
            .flatten()
            .map(|penalty: &Penalty| penalty.points)
            .sum();

        let (declared_total, declared_possible) = parse_total(total_field)?;
        let expected_total = total_points_obtained + penalty_points;
        if !same_points(declared_total, expected_total) {
            return Err(RubricError::ObtainedTotalMismatch {
                expected: expected_total,
                got: declared_total,
            });
        }
        if !same_points(declared_possible, total_points_possible) {
            return Err(RubricError::PossibleTotalMismatch {
                expected: total_points_possible,
                got: declared_possible,
            });
        }

        let comments = parse_comments(lookup(&root, FIELD_COMMENTS))?;

        tracing::debug!(
            components = points.len(),
            penalties = penalties.as_ref().map_or(0, Vec::len),
            "rubric validated"
        );
        Ok(Self::from_parts(project, points, penalties, comments))
    }

    pub fn from_file(path: &Path, project: &'p Project) -> Result<Self> {
        if !path.exists() {
            return Err(AppError::PathNotFound(path.display().to_string()));
        }
        let text = std::fs::read_to_string(path).map_err(|source| AppError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&text, project).map_err(|source| AppError::InvalidRubric {
            path: path.display().to_string(),
            source,
        })
    }
}

fn parse_penalties(section: &Mapping) -> std::result::Result<Vec<Penalty>, RubricError> {
    let mut penalties = Vec::with_capacity(section.len());
    for (key, value) in section.iter() {
        let description = key_name(key);
        let points = number(value, &format!("{FIELD_PENALTIES}.{description}"))?;
        check_penalty(&description, points)?;
        penalties.push(Penalty {
            description,
            points,
        });
    }
    Ok(penalties)
}

fn parse_total(value: &Value) -> std::result::Result<(f64, f64), RubricError> {
    let Value::String(total) = value else {
        return Err(RubricError::TotalNotString(describe(value)));
    };

    let parts: Vec<&str> = total.split(" / ").collect();
    let [obtained, possible] = parts.as_slice() else {
        return Err(RubricError::MalformedTotal(total.clone()));
    };
    let parse = |part: &str| {
        part.trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| RubricError::MalformedTotal(total.clone()))
    };
    Ok((parse(*obtained)?, parse(*possible)?))
}

fn parse_comments(value: Option<&Value>) -> std::result::Result<Option<String>, RubricError> {
    let text = match value {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::String(text)) => normalize_comment(text).unwrap_or_default(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(_) => {
            return Err(RubricError::InvalidStructure {
                field: FIELD_COMMENTS.to_string(),
                expected: "a block of text",
            })
        }
    };
    if text.is_empty() || text == BLANK_COMMENTS {
        Ok(None)
    } else {
        Ok(Some(text))
    }
}

fn mapping_or_empty(value: &Value, field: &str) -> std::result::Result<Mapping, RubricError> {
    match value {
        Value::Mapping(mapping) => Ok(mapping.clone()),
        Value::Null => Ok(Mapping::new()),
        _ => Err(RubricError::InvalidStructure {
            field: field.to_string(),
            expected: "a mapping",
        }),
    }
}

/// Finds a key by its scalar text, so `1:` and `"1":` both match "1".
fn lookup<'a>(mapping: &'a Mapping, name: &str) -> Option<&'a Value> {
    mapping
        .iter()
        .find(|(key, _)| key_name(key) == name)
        .map(|(_, value)| value)
}

fn reject_unknown_keys(
    mapping: &Mapping,
    allowed: &[&str],
    parent: Option<&str>,
) -> std::result::Result<(), RubricError> {
    for (key, _) in mapping.iter() {
        let name = key_name(key);
        if !allowed.contains(&name.as_str()) {
            let path = match parent {
                Some(parent) => format!("{parent}.{name}"),
                None => name,
            };
            return Err(RubricError::UnknownField(path));
        }
    }
    Ok(())
}

fn key_name(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        other => describe(other),
    }
}

fn number(value: &Value, field: &str) -> std::result::Result<f64, RubricError> {
    match value.as_f64() {
        Some(n) if n.is_finite() => Ok(n),
        _ => Err(RubricError::InvalidNumber {
            field: field.to_string(),
            value: describe(value),
        }),
    }
}

fn optional_number(value: &Value, field: &str) -> std::result::Result<Option<f64>, RubricError> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        other => number(other, field).map(Some),
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::String(s) => format!("'{s}'"),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Sequence(_) => "a list".to_string(),
        Value::Mapping(_) => "a mapping".to_string(),
        _ => "an unsupported value".to_string(),
    }
}
