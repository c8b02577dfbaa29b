use super::player::Player;
use crate::domain::errors::{TeamError, TeamResult};
use rust_decimal::Decimal;

/// Team aggregate root
///
/// A football team together with the roster it owns. Players cannot outlive
/// their team and are always persisted and loaded with it.
///
/// # Invariants
/// - Name and acronym cannot be blank
/// - Budget cannot be negative
/// - Identity is assigned once, by storage, and never changes afterwards
/// - Every rostered player's `team_id` equals the team's identity once the
///   team has one
///
/// # Example
/// ```
/// use football_service_api::domain::team::{Player, Team};
/// use rust_decimal::Decimal;
///
/// let mut team = Team::new("Team 1", "T1", Decimal::new(123, 1)).expect("valid team");
/// team.add_player(Player::new("John", 4).expect("valid player"));
///
/// assert_eq!(team.acronym(), "T1");
/// assert_eq!(team.players().len(), 1);
/// assert!(team.id().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    id: Option<i64>,
    name: String,
    acronym: String,
    budget: Decimal,
    players: Vec<Player>,
}

impl Team {
    /// Creates a new, not yet persisted Team with an empty roster
    ///
    /// # Arguments
    /// * `name` - Team name (cannot be blank)
    /// * `acronym` - Short team code (cannot be blank)
    /// * `budget` - Team budget (cannot be negative)
    ///
    /// # Errors
    /// * `TeamError::InvalidInput` - If any invariant is violated
    pub fn new(
        name: impl Into<String>,
        acronym: impl Into<String>,
        budget: Decimal,
    ) -> TeamResult<Self> {
        let name = name.into();
        let acronym = acronym.into();

        if name.trim().is_empty() {
            return Err(TeamError::InvalidInput("Team name cannot be empty".to_string()));
        }

        if acronym.trim().is_empty() {
            return Err(TeamError::InvalidInput(
                "Team acronym cannot be empty".to_string(),
            ));
        }

        if budget < Decimal::ZERO {
            return Err(TeamError::InvalidInput(
                "Team budget cannot be negative".to_string(),
            ));
        }

        Ok(Self {
            id: None,
            name,
            acronym,
            budget,
            players: Vec::new(),
        })
    }

    /// Appends a player to the roster and points it back at this team
    pub fn add_player(&mut self, mut player: Player) {
        player.link_team(self.id);
        self.players.push(player);
    }

    /// Records the identity storage generated for this team
    ///
    /// The identity is pushed down to every rostered player's back-reference.
    ///
    /// # Errors
    /// * `TeamError::Persistence` - If the team already has a different identity
    pub fn assign_identity(&mut self, id: i64) -> TeamResult<()> {
        match self.id {
            Some(existing) if existing != id => {
                return Err(TeamError::Persistence(format!(
                    "Team {} cannot be re-identified as {}",
                    existing, id
                )));
            }
            _ => self.id = Some(id),
        }

        for player in &mut self.players {
            player.link_team(Some(id));
        }

        Ok(())
    }

    // ===== Getters =====

    /// Returns the team's ID, if it has been persisted
    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn acronym(&self) -> &str {
        &self.acronym
    }

    pub fn budget(&self) -> Decimal {
        self.budget
    }

    /// Returns the roster in insertion order
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub(crate) fn players_mut(&mut self) -> &mut [Player] {
        &mut self.players
    }

    /// Reconstructs a Team from persistence layer data
    ///
    /// This method bypasses business rules validation since the data
    /// is already validated and stored in the database.
    ///
    /// # Note
    /// Only to be used by repository implementations for data reconstruction.
    pub fn from_persistence(
        id: i64,
        name: String,
        acronym: String,
        budget: Decimal,
        players: Vec<Player>,
    ) -> Self {
        Self {
            id: Some(id),
            name,
            acronym,
            budget,
            players,
        }
    }
}
