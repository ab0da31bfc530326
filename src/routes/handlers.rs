use std::time::{Duration, Instant};

use slog::debug;
use warp::{
    http::StatusCode,
    reject,
    reply::{json, with_header, with_status, Reply},
};

use crate::environment::Environment;
use crate::errors::BackendError;
use crate::routes::rejection::{Context, Rejection};
use crate::submission::SubmissionBody;
use crate::validation;

const SERVER_TIMING_HEADER: &str = "server-timing";
type RouteResult = Result<Box<dyn Reply>, reject::Rejection>;

macro_rules! timed {
    ($($expression:stmt);+) => {
        let start = Instant::now();

        let result = { $($expression)+ };

        Ok(Box::new(with_header(
            result,
            SERVER_TIMING_HEADER,
            format_server_timing(start.elapsed()),
        )) as Box<dyn Reply>)
    };
}

pub async fn create(environment: Environment, body: SubmissionBody) -> RouteResult {
    timed! {
        let error_handler = |e: BackendError| Rejection::new(Context::create(), e);

        debug!(environment.logger, "Validating submission...");
        let contact = validation::validate(body)
            .map_err(|errors| BackendError::InvalidSubmission { errors })
            .map_err(error_handler)?;

        debug!(environment.logger, "Writing submission to database...");
        let created = environment
            .db
            .insert(contact)
            .await
            .map_err(error_handler)?;

        with_status(json(&created), StatusCode::CREATED)
    }
}

pub async fn list(environment: Environment) -> RouteResult {
    timed! {
        let error_handler = |e: BackendError| Rejection::new(Context::list(), e);

        debug!(environment.logger, "Listing submissions...");
        let contacts = environment.db.list().await.map_err(error_handler)?;

        json(&contacts)
    }
}

fn format_server_timing(seconds: Duration) -> String {
    format!("handler;dur={}", seconds.as_secs_f64() * 1000.0)
}
