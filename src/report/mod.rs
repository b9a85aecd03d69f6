pub mod json;
pub mod md;

use crate::error::AppError;
use crate::types::report::RubricSummary;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Md,
}

pub fn render(summary: &RubricSummary, format: OutputFormat) -> Result<String, AppError> {
    match format {
        OutputFormat::Json => json::to_json(summary).map_err(AppError::Json),
        OutputFormat::Md => Ok(md::to_markdown(summary)),
    }
}
