//! The two sides of a match.

/// One of the two teams.
///
/// `Home` defends the x = 0 goal line, `Away` defends x = width.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Team {
    #[default]
    Home,
    Away,
}

impl Team {
    pub const ALL: [Team; 2] = [Team::Home, Team::Away];

    /// `0` for home, `1` for away.  Indexes per-team arrays.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Team::Home => 0,
            Team::Away => 1,
        }
    }

    #[inline]
    pub fn opponent(self) -> Team {
        match self {
            Team::Home => Team::Away,
            Team::Away => Team::Home,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Team::Home => "home",
            Team::Away => "away",
        }
    }
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
