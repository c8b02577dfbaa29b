use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use rust_decimal::Decimal;
use serde::{de, Deserialize, Deserializer, Serialize};
use std::str::FromStr;

use crate::api::errors::ApiError;
use crate::api::state::AppState;
use crate::domain::pagination::Page;
use crate::domain::team::{Player, Team};
use crate::services::{NewPlayer, NewTeam};

/// Query parameters for listing teams
///
/// A blank value (`page=`) counts as absent and falls back to the default.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTeamsQuery {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub size: Option<i64>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub sort: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub sort_desc: Option<Flag>,
}

impl ListTeamsQuery {
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(0)
    }

    pub fn size(&self) -> i64 {
        self.size.unwrap_or(10)
    }

    pub fn sort(&self) -> &str {
        self.sort.as_deref().unwrap_or("name")
    }

    pub fn sort_desc(&self) -> bool {
        self.sort_desc.map(|Flag(flag)| flag).unwrap_or(false)
    }
}

/// Boolean query flag
///
/// Accepts `true`/`false`, `on`/`off`, `yes`/`no` and `1`/`0`, ignoring case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flag(pub bool);

impl FromStr for Flag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "true" | "on" | "yes" | "1" => Ok(Flag(true)),
            "false" | "off" | "no" | "0" => Ok(Flag(false)),
            _ => Err(format!("Invalid boolean value '{}'", s)),
        }
    }
}

fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(de::Error::custom),
    }
}

/// Player entry of a team creation request
#[derive(Debug, Deserialize)]
pub struct CreatePlayerRequest {
    pub name: String,
    pub position: i32,
}

/// Request body for creating a team
#[derive(Debug, Deserialize)]
pub struct CreateTeamRequest {
    pub name: Option<String>,
    pub acronym: Option<String>,
    #[serde(default, with = "rust_decimal::serde::arbitrary_precision_option")]
    pub budget: Option<Decimal>,
    #[serde(default)]
    pub players: Option<Vec<CreatePlayerRequest>>,
}

impl From<CreateTeamRequest> for NewTeam {
    fn from(req: CreateTeamRequest) -> Self {
        Self {
            name: req.name,
            acronym: req.acronym,
            budget: req.budget,
            players: req.players.map(|players| {
                players
                    .into_iter()
                    .map(|p| NewPlayer {
                        name: p.name,
                        position: p.position,
                    })
                    .collect()
            }),
        }
    }
}

/// Player as returned to clients
///
/// The owning team is implied by nesting and never serialized.
#[derive(Debug, Serialize)]
pub struct PlayerResponse {
    pub id: Option<i64>,
    pub name: String,
    pub position: i32,
}

impl From<&Player> for PlayerResponse {
    fn from(player: &Player) -> Self {
        Self {
            id: player.id(),
            name: player.name().to_string(),
            position: player.position(),
        }
    }
}

/// Team as returned to clients
#[derive(Debug, Serialize)]
pub struct TeamResponse {
    pub id: Option<i64>,
    pub name: String,
    pub acronym: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub budget: Decimal,
    pub players: Vec<PlayerResponse>,
}

impl From<&Team> for TeamResponse {
    fn from(team: &Team) -> Self {
        Self {
            id: team.id(),
            name: team.name().to_string(),
            acronym: team.acronym().to_string(),
            budget: team.budget(),
            players: team.players().iter().map(PlayerResponse::from).collect(),
        }
    }
}

/// List teams, one page at a time
///
/// GET /api/teams?page=0&size=10&sort=name&sortDesc=false
///
/// Every failure, including an unknown sort field, is reported as a 500.
pub async fn get_teams(
    State(state): State<AppState>,
    query: Result<Query<ListTeamsQuery>, QueryRejection>,
) -> Result<Json<Page<TeamResponse>>, ApiError> {
    let Query(params) = query.map_err(|e| ApiError::internal_server_error(e.body_text()))?;

    let page = state
        .team_service
        .get_teams(params.page(), params.size(), params.sort(), params.sort_desc())
        .await
        .map_err(|e| ApiError::internal_server_error(e.to_string()))?;

    Ok(Json(page.map(|team| TeamResponse::from(&team))))
}

/// Create a team with its roster
///
/// POST /api/teams
///
/// Every failure, including storage errors, is reported as a 400.
pub async fn create_team(
    State(state): State<AppState>,
    body: Result<Json<CreateTeamRequest>, JsonRejection>,
) -> Result<Json<TeamResponse>, ApiError> {
    let Json(req) = body.map_err(|e| invalid_input(e.body_text()))?;

    let team = state
        .team_service
        .add_team(req.into())
        .await
        .map_err(invalid_input)?;

    Ok(Json(TeamResponse::from(&team)))
}

fn invalid_input(cause: impl std::fmt::Display) -> ApiError {
    ApiError::bad_request(format!("Invalid input: {}", cause))
}
