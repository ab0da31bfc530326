use serde::Serialize;
use warp::reject;

use crate::errors::BackendError;
use crate::validation::ValidationErrors;

#[derive(Debug)]
pub struct Rejection {
    pub(crate) context: Context,
    pub(crate) error: BackendError,
}

impl Rejection {
    pub fn new(context: Context, error: BackendError) -> Self {
        Rejection { context, error }
    }

    pub fn flatten(&self) -> FlattenedRejection {
        let fields = match &self.error {
            BackendError::InvalidSubmission { errors } => Some(errors.clone()),
            _ => None,
        };

        FlattenedRejection {
            context: self.context.clone(),
            message: format!("{}", self.error),
            fields,
        }
    }
}

impl reject::Reject for Rejection {}

#[derive(Debug, Serialize)]
pub struct FlattenedRejection {
    #[serde(flatten)]
    pub(crate) context: Context,
    pub(crate) message: String,
    /// Field-level detail, present for validation failures only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) fields: Option<ValidationErrors>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(untagged)]
pub enum Context {
    Create { operation: &'static str },
    List { operation: &'static str },
}

impl Context {
    pub fn create() -> Context {
        Context::Create {
            operation: "create",
        }
    }

    pub fn list() -> Context {
        Context::List { operation: "list" }
    }
}
