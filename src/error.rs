use crate::rubric::format::format_points;
use thiserror::Error;

fn display_points(value: &f64) -> String {
    format_points(*value)
}

/// Reasons a rubric document is rejected, on read or while editing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RubricError {
    #[error("rubric file doesn't have a '{0}' field")]
    MissingField(&'static str),

    #[error("rubric is missing '{0}' points")]
    MissingComponent(String),

    #[error("grade component '{component}' is missing '{field}' field")]
    MissingComponentField {
        component: String,
        field: &'static str,
    },

    #[error("rubric has a grade component that is not part of the project: '{0}'")]
    UnknownComponent(String),

    #[error("rubric has an unknown field: '{0}'")]
    UnknownField(String),

    #[error("'{field}' must be {expected}")]
    InvalidStructure {
        field: String,
        expected: &'static str,
    },

    #[error("'{field}' is not a valid number: {value}")]
    InvalidNumber { field: String, value: String },

    #[error(
        "grade component '{component}' in rubric has incorrect possible points (expected {}, got {})",
        display_points(.expected),
        display_points(.got)
    )]
    PossiblePointsMismatch {
        component: String,
        expected: f64,
        got: f64,
    },

    #[error("grade component '{component}' in rubric has negative points ({})", display_points(.points))]
    NegativePoints { component: String, points: f64 },

    #[error(
        "grade component '{component}' in rubric has more than allowed points ({} > {})",
        display_points(.points),
        display_points(.possible)
    )]
    ExcessPoints {
        component: String,
        points: f64,
        possible: f64,
    },

    #[error("rubric file has a non-negative penalty: {} ({description})", display_points(.points))]
    NonNegativePenalty { description: String, points: f64 },

    #[error("rubric already has a penalty named '{0}'")]
    DuplicatePenalty(String),

    #[error("total points is not a string: {0}")]
    TotalNotString(String),

    #[error("improperly formatted total points: {0}")]
    MalformedTotal(String),

    #[error(
        "incorrect number of total points obtained (expected {}, got {})",
        display_points(.expected),
        display_points(.got)
    )]
    ObtainedTotalMismatch { expected: f64, got: f64 },

    #[error(
        "incorrect number of total points possible (expected {}, got {})",
        display_points(.expected),
        display_points(.got)
    )]
    PossibleTotalMismatch { expected: f64, got: f64 },

    #[error("rubric is not valid YAML: {0}")]
    Syntax(String),
}

impl From<serde_yaml::Error> for RubricError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Syntax(err.to_string())
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("invalid rubric {path}: {source}")]
    InvalidRubric {
        path: String,
        #[source]
        source: RubricError,
    },

    #[error(transparent)]
    Rubric(#[from] RubricError),

    #[error("error when saving rubric to file {path}: {source}")]
    Save {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("error when reading {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("path does not exist: {0}")]
    PathNotFound(String),

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("invalid project: {0}")]
    InvalidProject(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("toml write error: {0}")]
    TomlWrite(#[from] toml::ser::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;
