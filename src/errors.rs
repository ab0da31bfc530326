use thiserror::Error;
use warp::reject;

use crate::validation::ValidationErrors;

/// Enumerates high-level errors returned by this library.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Represents an SQL error.
    #[error("SQLx error")]
    Sqlx { source: sqlx::Error },

    /// Represents an error with the request.
    #[error("Bad request")]
    BadRequest,

    /// Represents a submission that failed field-level validation.
    #[error("La demande contient des champs invalides")]
    InvalidSubmission { errors: ValidationErrors },
}

impl reject::Reject for BackendError {}
