use crate::types::report::RubricSummary;

pub fn to_json(summary: &RubricSummary) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(summary)
}
