use std::str::FromStr;

use crate::domain::errors::TeamError;

/// Team property a page of teams can be ordered by
///
/// Parsed verbatim from the `sort` query parameter, so the accepted
/// spellings are exactly the serialized field names.
///
/// # Example
/// ```
/// use football_service_api::domain::team::SortField;
///
/// let field: SortField = "budget".parse().expect("known field");
/// assert_eq!(field, SortField::Budget);
/// assert!("Budget".parse::<SortField>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    /// Team name
    #[default]
    Name,
    /// Team acronym
    Acronym,
    /// Team budget
    Budget,
}

impl SortField {
    /// Column backing this property in the `teams` table
    pub fn column(&self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::Acronym => "acronym",
            SortField::Budget => "budget",
        }
    }
}

impl FromStr for SortField {
    type Err = TeamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(SortField::Name),
            "acronym" => Ok(SortField::Acronym),
            "budget" => Ok(SortField::Budget),
            other => Err(TeamError::InvalidSortField(other.to_string())),
        }
    }
}

impl std::fmt::Display for SortField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.column())
    }
}

/// Ordering direction applied to a [`SortField`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Maps the `sortDesc` flag onto a direction
    pub fn from_descending(descending: bool) -> Self {
        if descending {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }

    /// SQL keyword for this direction
    pub fn keyword(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}
