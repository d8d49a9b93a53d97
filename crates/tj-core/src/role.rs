//! Player roles.
//!
//! Roles are data, not behaviour: the FSM is identical for every agent and a
//! role only selects a row of the attribute / initial-state tables in
//! [`TeamConfig`][crate::TeamConfig].

/// A player's position on the team sheet.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Role {
    /// Strong, slow line-breaker.
    FrontFighter,
    /// Strong all-rounder with the heaviest kick.
    HeavyHitter,
    /// Fast, aware ball carrier.  Takes the kickoff when present.
    Runner,
    /// Balanced player that holds shape behind the play.
    Supporter,
}

impl Role {
    pub const ALL: [Role; 4] = [
        Role::FrontFighter,
        Role::HeavyHitter,
        Role::Runner,
        Role::Supporter,
    ];

    /// Label used in CSV output and log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::FrontFighter => "front_fighter",
            Role::HeavyHitter  => "heavy_hitter",
            Role::Runner       => "runner",
            Role::Supporter    => "supporter",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
