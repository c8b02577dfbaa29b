use std::cmp::Ordering;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::errors::TeamResult;
use crate::domain::pagination::{Page, PageRequest, Sort};
use crate::domain::repositories::TeamRepository;
use crate::domain::team::{SortDirection, SortField, Team};

#[derive(Debug, Default)]
struct Store {
    teams: Vec<Team>,
    next_team_id: i64,
    next_player_id: i64,
}

impl Store {
    fn team_id(&mut self) -> i64 {
        self.next_team_id += 1;
        self.next_team_id
    }

    fn player_id(&mut self) -> i64 {
        self.next_player_id += 1;
        self.next_player_id
    }
}

/// Process-local implementation of TeamRepository
///
/// Orders and pages exactly like [`PostgresTeamRepository`](super::PostgresTeamRepository)
/// and hands out increasing identities starting at 1. Nothing survives a restart.
///
/// The service binary never wires this in. It backs the unit tests and the
/// HTTP suites under `tests/`, which link against the library and so need it
/// exported from here rather than from a `#[cfg(test)]` module.
#[derive(Debug, Default)]
pub struct InMemoryTeamRepository {
    store: RwLock<Store>,
}

impl InMemoryTeamRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored team, in identity order
    pub async fn all(&self) -> Vec<Team> {
        self.store.read().await.teams.clone()
    }
}

fn compare(a: &Team, b: &Team, sort: Sort) -> Ordering {
    let by_field = match sort.field {
        SortField::Name => a.name().cmp(b.name()),
        SortField::Acronym => a.acronym().cmp(b.acronym()),
        SortField::Budget => a.budget().cmp(&b.budget()),
    };

    let by_field = match sort.direction {
        SortDirection::Asc => by_field,
        SortDirection::Desc => by_field.reverse(),
    };

    by_field.then_with(|| a.id().cmp(&b.id()))
}

#[async_trait]
impl TeamRepository for InMemoryTeamRepository {
    async fn find_all(&self, request: &PageRequest) -> TeamResult<Page<Team>> {
        if !request.is_satisfiable() {
            return Ok(Page::empty(request));
        }

        let store = self.store.read().await;

        let mut ordered: Vec<&Team> = store.teams.iter().collect();
        ordered.sort_by(|a, b| compare(a, b, request.sort));

        let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(request.limit()).unwrap_or(usize::MAX);
        let content = ordered
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();

        Ok(Page::new(content, request, store.teams.len() as i64))
    }

    async fn save(&self, mut team: Team) -> TeamResult<Team> {
        let mut store = self.store.write().await;

        let team_id = match team.id() {
            Some(id) => id,
            None => store.team_id(),
        };
        team.assign_identity(team_id)?;

        for player in team.players_mut() {
            if player.id().is_none() {
                let player_id = store.player_id();
                player.assign_id(player_id);
            }
        }

        match store.teams.iter_mut().find(|t| t.id() == Some(team_id)) {
            Some(existing) => *existing = team.clone(),
            None => store.teams.push(team.clone()),
        }

        Ok(team)
    }
}
