use std::sync::Arc;

use rust_decimal::Decimal;

use crate::domain::errors::{TeamError, TeamResult};
use crate::domain::pagination::{Page, PageRequest, Sort};
use crate::domain::repositories::TeamRepository;
use crate::domain::team::{Player, SortDirection, SortField, Team};

/// Fields of a player to be created along with its team
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPlayer {
    pub name: String,
    pub position: i32,
}

/// Fields of a team to be created
///
/// Scalar fields are optional so that a missing value is reported as invalid
/// input rather than a decoding failure. `players: None` and an empty roster
/// are equivalent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewTeam {
    pub name: Option<String>,
    pub acronym: Option<String>,
    pub budget: Option<Decimal>,
    pub players: Option<Vec<NewPlayer>>,
}

/// Team listing and creation on top of a [`TeamRepository`]
///
/// Every call is attempted exactly once; storage errors are returned as-is.
pub struct TeamService {
    teams: Arc<dyn TeamRepository>,
}

impl TeamService {
    pub fn new(teams: Arc<dyn TeamRepository>) -> Self {
        Self { teams }
    }

    /// Returns one page of teams ordered by `sort`
    ///
    /// # Arguments
    /// * `page` - Page index (0-based)
    /// * `size` - Page size
    /// * `sort` - Sort field (`name`, `acronym` or `budget`)
    /// * `sort_desc` - `true` for descending order
    ///
    /// A negative `page` or non-positive `size` yields an empty page.
    ///
    /// # Errors
    /// * `TeamError::InvalidSortField` - If `sort` names no team property
    /// * `TeamError::Persistence` - If storage fails
    pub async fn get_teams(
        &self,
        page: i64,
        size: i64,
        sort: &str,
        sort_desc: bool,
    ) -> TeamResult<Page<Team>> {
        let field: SortField = sort.parse()?;
        let direction = SortDirection::from_descending(sort_desc);
        let request = PageRequest::new(page, size, Sort::new(field, direction));

        tracing::debug!(page, size, sort = %field, ?direction, "Listing teams");

        self.teams.find_all(&request).await
    }

    /// Creates a team together with its roster
    ///
    /// Players are appended in the given order and linked to the new team.
    ///
    /// # Errors
    /// * `TeamError::InvalidInput` - If a field is missing or violates a team
    ///   or player invariant
    /// * `TeamError::Persistence` - If storage fails; nothing is persisted
    pub async fn add_team(&self, new_team: NewTeam) -> TeamResult<Team> {
        let name = new_team.name.ok_or_else(|| missing("name"))?;
        let acronym = new_team.acronym.ok_or_else(|| missing("acronym"))?;
        let budget = new_team.budget.ok_or_else(|| missing("budget"))?;

        let mut team = Team::new(name, acronym, budget)?;

        for player in new_team.players.unwrap_or_default() {
            team.add_player(Player::new(player.name, player.position)?);
        }

        let team = self.teams.save(team).await?;

        tracing::info!(
            team_id = ?team.id(),
            players = team.players().len(),
            "Team created"
        );

        Ok(team)
    }
}

fn missing(field: &str) -> TeamError {
    TeamError::InvalidInput(format!("Team {} is required", field))
}
