use async_trait::async_trait;

use crate::domain::errors::TeamResult;
use crate::domain::pagination::{Page, PageRequest};
use crate::domain::team::Team;

/// Repository trait for the Team aggregate
///
/// Defines the contract for persisting and retrieving teams together with
/// their rosters. Implementations should handle database-specific details.
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Find one page of teams, ordered as requested
    ///
    /// Ties are broken by ascending team id. Requests with a negative page or a
    /// non-positive size yield an empty page rather than an error. Only the
    /// rows of the requested page are loaded.
    async fn find_all(&self, request: &PageRequest) -> TeamResult<Page<Team>>;

    /// Save a team and its roster (insert, or upsert when the team has an id)
    ///
    /// The team and all of its players are written in one unit of work, and
    /// players no longer on the roster are removed. Returns the team with
    /// identities populated.
    async fn save(&self, team: Team) -> TeamResult<Team>;
}
