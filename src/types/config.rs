use crate::error::AppError;
use crate::rubric::format::DEFAULT_COMMENT_WIDTH;
use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub rubric: RubricSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RubricSettings {
    pub comment_width: usize,
    pub include_blank_comments: bool,
    pub extension: String,
}

impl Default for RubricSettings {
    fn default() -> Self {
        Self {
            comment_width: DEFAULT_COMMENT_WIDTH,
            include_blank_comments: false,
            extension: default_extension(),
        }
    }
}

fn default_extension() -> String {
    "yaml".to_string()
}

impl Settings {
    pub fn validate(&self) -> Result<(), AppError> {
        if !(20..=200).contains(&self.rubric.comment_width) {
            return Err(AppError::ConfigParse(format!(
                "rubric.comment_width must be between 20 and 200 (found {})",
                self.rubric.comment_width
            )));
        }

        let extension = self.rubric.extension.trim();
        if extension.is_empty() {
            return Err(AppError::ConfigParse(
                "rubric.extension cannot be empty".to_string(),
            ));
        }
        if extension.starts_with('.') {
            return Err(AppError::ConfigParse(format!(
                "rubric.extension must not start with a dot: {extension}"
            )));
        }

        Ok(())
    }
}
