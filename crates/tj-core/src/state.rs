//! Finite-state-machine states shared by the behavior, simulation and output
//! crates.

/// The behavioural mode an agent is in for the current tick.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PlayerState {
    /// Closing down the ball while an opponent holds it.
    Defending,
    /// Carrying the ball, or chasing a loose one.
    Attacking,
    /// Moving into space ahead of a teammate who has the ball.
    Supporting,
    /// Drifting back to the role's home point.
    #[default]
    Positioning,
}

impl PlayerState {
    pub const COUNT: usize = 4;

    pub const ALL: [PlayerState; Self::COUNT] = [
        PlayerState::Defending,
        PlayerState::Attacking,
        PlayerState::Supporting,
        PlayerState::Positioning,
    ];

    /// Dense index into `[_; PlayerState::COUNT]` arrays.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            PlayerState::Defending   => 0,
            PlayerState::Attacking   => 1,
            PlayerState::Supporting  => 2,
            PlayerState::Positioning => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PlayerState::Defending   => "defending",
            PlayerState::Attacking   => "attacking",
            PlayerState::Supporting  => "supporting",
            PlayerState::Positioning => "positioning",
        }
    }
}

impl std::fmt::Display for PlayerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
