use std::collections::HashMap;

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};

use crate::domain::errors::{TeamError, TeamResult};
use crate::domain::pagination::{Page, PageRequest};
use crate::domain::repositories::TeamRepository;
use crate::domain::team::{Player, Team};

#[derive(Debug, FromRow)]
struct TeamRow {
    id: i64,
    name: String,
    acronym: String,
    budget: Decimal,
}

#[derive(Debug, FromRow)]
struct PlayerRow {
    id: i64,
    name: String,
    position: i32,
    team_id: i64,
}

/// PostgreSQL implementation of TeamRepository
///
/// Persists Team aggregates in the `teams` table and their rosters in the
/// `players` table (see `migrations/`).
pub struct PostgresTeamRepository {
    pool: PgPool,
}

impl PostgresTeamRepository {
    /// Creates a new PostgresTeamRepository
    ///
    /// # Arguments
    /// * `pool` - SQLx connection pool for PostgreSQL
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Applies the schema migrations bundled with the crate
    pub async fn migrate(pool: &PgPool) -> TeamResult<()> {
        sqlx::migrate!("./migrations").run(pool).await?;
        Ok(())
    }

    /// Loads the rosters of the given teams, keyed by team id
    async fn find_players(&self, team_ids: &[i64]) -> TeamResult<HashMap<i64, Vec<Player>>> {
        let rows: Vec<PlayerRow> = sqlx::query_as(
            r#"
            SELECT id, name, position, team_id
            FROM players
            WHERE team_id = ANY($1)
            ORDER BY id
            "#,
        )
        .bind(team_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| TeamError::Persistence(format!("Failed to load players: {}", e)))?;

        let mut rosters: HashMap<i64, Vec<Player>> = HashMap::new();
        for r in rows {
            rosters
                .entry(r.team_id)
                .or_default()
                .push(Player::from_persistence(r.id, r.name, r.position, r.team_id));
        }

        Ok(rosters)
    }
}

#[async_trait]
impl TeamRepository for PostgresTeamRepository {
    async fn find_all(&self, request: &PageRequest) -> TeamResult<Page<Team>> {
        if !request.is_satisfiable() {
            return Ok(Page::empty(request));
        }

        let total: i64 = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM teams")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| TeamError::Persistence(format!("Failed to count teams: {}", e)))?;

        // Column and direction come from closed enums, never from raw input.
        let sql = format!(
            "SELECT id, name, acronym, budget FROM teams ORDER BY {} {}, id ASC LIMIT $1 OFFSET $2",
            request.sort.field.column(),
            request.sort.direction.keyword(),
        );

        let rows: Vec<TeamRow> = sqlx::query_as(&sql)
            .bind(request.limit())
            .bind(request.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| TeamError::Persistence(format!("Failed to find teams: {}", e)))?;

        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        let mut rosters = self.find_players(&ids).await?;

        let teams = rows
            .into_iter()
            .map(|r| {
                let players = rosters.remove(&r.id).unwrap_or_default();
                Team::from_persistence(r.id, r.name, r.acronym, r.budget, players)
            })
            .collect();

        Ok(Page::new(teams, request, total))
    }

    async fn save(&self, mut team: Team) -> TeamResult<Team> {
        let mut tx = self.pool.begin().await?;

        let team_id: i64 = match team.id() {
            None => sqlx::query_scalar::<_, i64>(
                r#"
                INSERT INTO teams (name, acronym, budget)
                VALUES ($1, $2, $3)
                RETURNING id
                "#,
            )
            .bind(team.name())
            .bind(team.acronym())
            .bind(team.budget()),
            Some(id) => sqlx::query_scalar::<_, i64>(
                r#"
                INSERT INTO teams (id, name, acronym, budget)
                VALUES ($4, $1, $2, $3)
                ON CONFLICT (id) DO UPDATE SET
                    name = EXCLUDED.name,
                    acronym = EXCLUDED.acronym,
                    budget = EXCLUDED.budget
                RETURNING id
                "#,
            )
            .bind(team.name())
            .bind(team.acronym())
            .bind(team.budget())
            .bind(id),
        }
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| TeamError::Persistence(format!("Failed to save team: {}", e)))?;

        team.assign_identity(team_id)?;

        let mut kept = Vec::with_capacity(team.players().len());
        for player in team.players_mut() {
            let player_id: i64 = match player.id() {
                None => sqlx::query_scalar::<_, i64>(
                    r#"
                    INSERT INTO players (name, position, team_id)
                    VALUES ($1, $2, $3)
                    RETURNING id
                    "#,
                )
                .bind(player.name())
                .bind(player.position())
                .bind(team_id),
                Some(id) => sqlx::query_scalar::<_, i64>(
                    r#"
                    INSERT INTO players (id, name, position, team_id)
                    VALUES ($4, $1, $2, $3)
                    ON CONFLICT (id) DO UPDATE SET
                        name = EXCLUDED.name,
                        position = EXCLUDED.position,
                        team_id = EXCLUDED.team_id
                    RETURNING id
                    "#,
                )
                .bind(player.name())
                .bind(player.position())
                .bind(team_id)
                .bind(id),
            }
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| TeamError::Persistence(format!("Failed to save player: {}", e)))?;

            player.assign_id(player_id);
            kept.push(player_id);
        }

        // Orphan removal
        sqlx::query("DELETE FROM players WHERE team_id = $1 AND NOT (id = ANY($2))")
            .bind(team_id)
            .bind(&kept)
            .execute(&mut *tx)
            .await
            .map_err(|e| TeamError::Persistence(format!("Failed to remove players: {}", e)))?;

        tx.commit().await?;

        Ok(team)
    }
}
