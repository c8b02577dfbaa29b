//! Integration tests for the PostgreSQL repository
//!
//! These tests verify that the repository persists team aggregates with
//! their rosters in one unit of work and pages them back in order.
//! They need `DATABASE_URL` and are skipped when it is not set.

use football_service_api::domain::errors::TeamError;
use football_service_api::domain::pagination::{PageRequest, Sort};
use football_service_api::domain::repositories::TeamRepository;
use football_service_api::domain::team::{Player, SortDirection, SortField, Team};
use football_service_api::infrastructure::repositories::PostgresTeamRepository;
use rust_decimal::Decimal;
use sqlx::PgPool;

/// Set up test database connection pool, or `None` when no database is configured
async fn setup_test_db() -> Option<PgPool> {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set, skipping repository integration test");
        return None;
    };

    let pool = PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to test database");

    PostgresTeamRepository::migrate(&pool)
        .await
        .expect("Failed to run migrations");

    Some(pool)
}

/// Clean up a test team; its players go with it
async fn cleanup_team(pool: &PgPool, team_id: i64) {
    sqlx::query("DELETE FROM teams WHERE id = $1")
        .bind(team_id)
        .execute(pool)
        .await
        .expect("Failed to cleanup test team");
}

fn team_with_players(name: &str, players: &[(&str, i32)]) -> Team {
    let mut team = Team::new(name, "TST", Decimal::new(123, 1)).expect("valid team");
    for (player_name, position) in players {
        team.add_player(Player::new(*player_name, *position).expect("valid player"));
    }
    team
}

#[tokio::test]
async fn test_save_persists_team_and_players() {
    let Some(pool) = setup_test_db().await else {
        return;
    };
    let repo = PostgresTeamRepository::new(pool.clone());

    let saved = repo
        .save(team_with_players("Repo Save", &[("John", 4), ("Adam", 1)]))
        .await
        .expect("Failed to save team");

    let team_id = saved.id().expect("team id");
    assert_eq!(saved.players().len(), 2);
    assert!(saved.players().iter().all(|p| p.id().is_some()));

    // Verify the back-reference directly in the database
    let rows: Vec<(String, i32, i64)> = sqlx::query_as(
        "SELECT name, position, team_id FROM players WHERE team_id = $1 ORDER BY id",
    )
    .bind(team_id)
    .fetch_all(&pool)
    .await
    .expect("Failed to read players");

    assert_eq!(
        rows,
        vec![
            ("John".to_string(), 4, team_id),
            ("Adam".to_string(), 1, team_id),
        ]
    );

    cleanup_team(&pool, team_id).await;
}

#[tokio::test]
async fn test_save_with_identity_removes_orphaned_players() {
    let Some(pool) = setup_test_db().await else {
        return;
    };
    let repo = PostgresTeamRepository::new(pool.clone());

    let saved = repo
        .save(team_with_players("Repo Orphans", &[("John", 4), ("Adam", 1)]))
        .await
        .expect("Failed to save team");
    let team_id = saved.id().expect("team id");

    let kept = saved.players()[0].clone();
    let mut updated = Team::from_persistence(
        team_id,
        "Repo Orphans".to_string(),
        "TST".to_string(),
        Decimal::TEN,
        vec![kept],
    );
    updated.add_player(Player::new("Zed", 9).expect("valid player"));
    let updated = repo.save(updated).await.expect("Failed to update team");

    assert_eq!(updated.id(), Some(team_id));

    let names: Vec<String> =
        sqlx::query_scalar("SELECT name FROM players WHERE team_id = $1 ORDER BY id")
            .bind(team_id)
            .fetch_all(&pool)
            .await
            .expect("Failed to read players");
    assert_eq!(names, vec!["John".to_string(), "Zed".to_string()]);

    cleanup_team(&pool, team_id).await;
}

#[tokio::test]
async fn test_save_failure_rolls_back_team() {
    let Some(pool) = setup_test_db().await else {
        return;
    };
    let repo = PostgresTeamRepository::new(pool.clone());

    // Postgres refuses NUL in text, so the second player insert fails
    // after the team row has already been written in the transaction.
    let team = team_with_players("Repo Rollback", &[("John", 4), ("Bad\0Name", 1)]);
    let result = repo.save(team).await;

    assert!(
        matches!(result, Err(TeamError::Persistence(_))),
        "Expected a persistence error, got {:?}",
        result
    );

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM teams WHERE name = $1")
        .bind("Repo Rollback")
        .fetch_one(&pool)
        .await
        .expect("Failed to count teams");
    assert_eq!(count, 0, "No team row should survive a failed save");
}

#[tokio::test]
async fn test_find_all_orders_and_round_trips() {
    let Some(pool) = setup_test_db().await else {
        return;
    };
    let repo = PostgresTeamRepository::new(pool.clone());

    // Largest budget in the table, so the team leads a descending page
    let mut team = Team::new("Repo Round Trip", "RRT", Decimal::new(99_999_999_999, 2))
        .expect("valid team");
    team.add_player(Player::new("John", 4).expect("valid player"));
    team.add_player(Player::new("Adam", 1).expect("valid player"));
    let saved = repo.save(team).await.expect("Failed to save team");
    let team_id = saved.id().expect("team id");

    let sort = Sort::new(SortField::Budget, SortDirection::Desc);
    let page = repo
        .find_all(&PageRequest::new(0, 5, sort))
        .await
        .expect("Failed to find teams");

    assert!(page.content.len() <= 5);
    assert!(page.total_elements >= 1);
    assert_eq!(page.number, 0);
    assert_eq!(page.size, 5);

    let budgets: Vec<Decimal> = page.content.iter().map(|t| t.budget()).collect();
    assert!(
        budgets.windows(2).all(|w| w[0] >= w[1]),
        "Page should be ordered by descending budget"
    );

    assert_eq!(page.content[0], saved);
    let names: Vec<&str> = page.content[0].players().iter().map(|p| p.name()).collect();
    assert_eq!(names, vec!["John", "Adam"]);

    cleanup_team(&pool, team_id).await;
}

#[tokio::test]
async fn test_find_all_with_negative_paging_is_empty() {
    let Some(pool) = setup_test_db().await else {
        return;
    };
    let repo = PostgresTeamRepository::new(pool);

    let result = repo
        .find_all(&PageRequest::new(-1, -1, Sort::default()))
        .await
        .expect("Negative paging should not fail");

    assert!(result.content.is_empty());
}
