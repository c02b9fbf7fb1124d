use std::sync::Arc;

use crate::{config::Config, services::session::SessionOracle};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub sessions: Arc<dyn SessionOracle>,
}

impl AppState {
    pub fn new(config: Config, sessions: Arc<dyn SessionOracle>) -> Self {
        Self { config, sessions }
    }
}
