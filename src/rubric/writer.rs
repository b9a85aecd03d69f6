use super::format::{format_points, wrap_comment, yaml_key, DEFAULT_COMMENT_WIDTH, INDENT};
use super::{
    RubricDocument, BLANK_COMMENTS, FIELD_COMMENTS, FIELD_PENALTIES, FIELD_POINTS,
    FIELD_POINTS_OBTAINED, FIELD_POINTS_POSSIBLE, FIELD_TOTAL_POINTS,
};
use crate::error::{AppError, Result};
use crate::types::config::RubricSettings;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    pub include_blank_comments: bool,
    pub comment_width: usize,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            include_blank_comments: false,
            comment_width: DEFAULT_COMMENT_WIDTH,
        }
    }
}

impl WriteOptions {
    pub fn from_settings(settings: &RubricSettings) -> Self {
        Self {
            include_blank_comments: settings.include_blank_comments,
            comment_width: settings.comment_width,
        }
    }
}

impl RubricDocument<'_> {
    pub fn serialize(&self, include_blank_comments: bool) -> String {
        self.serialize_with(&WriteOptions {
            include_blank_comments,
            ..WriteOptions::default()
        })
    }

    /// Writes the document by hand so the output stays readable and diffable
    /// while remaining valid YAML.
    pub fn serialize_with(&self, options: &WriteOptions) -> String {
        let mut output = String::new();
        output.push_str(&format!("{FIELD_POINTS}:\n"));

        let mut total_points_possible = 0.0;
        let mut total_points_obtained = 0.0;
        for component in &self.project().grade_components {
            output.push_str(&format!("{INDENT}{}:\n", yaml_key(&component.name)));
            output.push_str(&format!(
                "{INDENT}{INDENT}{FIELD_POINTS_POSSIBLE}: {}\n",
                format_points(component.points)
            ));
            total_points_possible += component.points;

            match self.points_for(&component.name) {
                Some(obtained) => {
                    total_points_obtained += obtained;
                    output.push_str(&format!(
                        "{INDENT}{INDENT}{FIELD_POINTS_OBTAINED}: {}\n",
                        format_points(obtained)
                    ));
                }
                None => output.push_str(&format!("{INDENT}{INDENT}{FIELD_POINTS_OBTAINED}:\n")),
            }
            output.push('\n');
        }

        let mut penalty_points = 0.0;
        if let Some(penalties) = self.penalties().filter(|penalties| !penalties.is_empty()) {
            output.push_str(&format!("{FIELD_PENALTIES}:\n"));
            for penalty in penalties {
                penalty_points += penalty.points;
                output.push_str(&format!(
                    "{INDENT}{}: {}\n",
                    yaml_key(&penalty.description),
                    format_points(penalty.points)
                ));
            }
            output.push('\n');
        }

        output.push_str(&format!(
            "{FIELD_TOTAL_POINTS}: {} / {}\n",
            format_points(total_points_obtained + penalty_points),
            format_points(total_points_possible)
        ));

        let comments = self.comments().filter(|text| !text.trim().is_empty());
        if comments.is_some() || options.include_blank_comments {
            output.push('\n');
            output.push_str(&format!("{FIELD_COMMENTS}: >\n"));
            match comments {
                Some(text) => {
                    for line in wrap_comment(text, options.comment_width) {
                        output.push_str(&line);
                        output.push('\n');
                    }
                }
                None => output.push_str(&format!("{INDENT}{BLANK_COMMENTS}\n")),
            }
        }

        output
    }

    pub fn save(&self, path: &Path, options: &WriteOptions) -> Result<()> {
        fs::write(path, self.serialize_with(options)).map_err(|source| AppError::Save {
            path: path.display().to_string(),
            source,
        })?;
        tracing::info!(path = %path.display(), "saved rubric");
        Ok(())
    }
}
