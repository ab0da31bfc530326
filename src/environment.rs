use std::sync::Arc;

use slog::Logger;

use crate::db::Db;

/// Shared handles passed to every request handler.
#[derive(Clone)]
pub struct Environment {
    pub logger: Arc<Logger>,
    pub db: Arc<dyn Db + Send + Sync>,
}

impl Environment {
    pub fn new(logger: Arc<Logger>, db: Arc<dyn Db + Send + Sync>) -> Self {
        Self { logger, db }
    }
}
