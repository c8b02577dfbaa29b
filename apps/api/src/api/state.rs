use std::sync::Arc;

use crate::domain::repositories::TeamRepository;
use crate::services::TeamService;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub team_service: Arc<TeamService>,
}

impl AppState {
    pub fn new(teams: Arc<dyn TeamRepository>) -> Self {
        Self {
            team_service: Arc::new(TeamService::new(teams)),
        }
    }
}
