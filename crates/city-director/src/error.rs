//! Director boundary errors.
//!
//! Only whole-payload failures are errors.  Individual malformed items
//! (unknown action, unparsable agent id) are dropped with a warning.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DirectorError {
    #[error("no JSON object found in planner response")]
    NoJson,

    #[error("planner response is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("planner unavailable: {0}")]
    Unavailable(String),
}

pub type DirectorResult<T> = Result<T, DirectorError>;
