use crate::domain::errors::{TeamError, TeamResult};

/// Player on a team's roster
///
/// A player is owned by exactly one [`Team`](super::Team). The owning team is
/// referenced by identity only (`team_id`), never by a live reference, so the
/// team/player graph stays acyclic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    id: Option<i64>,
    name: String,
    position: i32,
    team_id: Option<i64>,
}

impl Player {
    /// Creates a player that is not yet attached to a team
    ///
    /// # Errors
    /// * `TeamError::InvalidInput` - If the name is blank
    pub fn new(name: impl Into<String>, position: i32) -> TeamResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(TeamError::InvalidInput(
                "Player name cannot be empty".to_string(),
            ));
        }

        Ok(Self {
            id: None,
            name,
            position,
            team_id: None,
        })
    }

    /// Reconstructs a Player from persistence layer data
    pub fn from_persistence(id: i64, name: String, position: i32, team_id: i64) -> Self {
        Self {
            id: Some(id),
            name,
            position,
            team_id: Some(team_id),
        }
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Role or jersey number
    pub fn position(&self) -> i32 {
        self.position
    }

    /// Identity of the owning team, once that team has been persisted
    pub fn team_id(&self) -> Option<i64> {
        self.team_id
    }

    pub(crate) fn assign_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    pub(crate) fn link_team(&mut self, team_id: Option<i64>) {
        self.team_id = team_id;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_player_with_valid_name() {
        let player = Player::new("John", 4).unwrap();

        assert_eq!(player.name(), "John");
        assert_eq!(player.position(), 4);
        assert_eq!(player.id(), None);
        assert_eq!(player.team_id(), None);
    }

    #[test]
    fn create_player_with_blank_name_fails() {
        let result = Player::new("  ", 1);

        assert!(matches!(result, Err(TeamError::InvalidInput(_))));
    }

    #[test]
    fn from_persistence_keeps_identity_and_team() {
        let player = Player::from_persistence(7, "Adam".to_string(), 1, 3);

        assert_eq!(player.id(), Some(7));
        assert_eq!(player.team_id(), Some(3));
    }
}
