//! Agent decisions: what an agent wants to happen this tick.

use tj_core::{PlayerState, Vec2};

/// One agent's output from the decision phase.
///
/// Decisions are produced by [`BehaviorModel::decide`][crate::BehaviorModel::decide]
/// and applied by tj-sim in ascending id order.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Decision {
    /// Intended velocity, units / second.  tj-sim caps its magnitude at the
    /// agent's effective speed.
    pub velocity: Vec2,

    /// FSM state for the next tick.  `None` keeps the current state.
    pub state: Option<PlayerState>,

    /// Ball velocity for a pass or kick.
    ///
    /// Honoured only if the agent possessed the ball in the snapshot;
    /// ignored otherwise.
    pub release: Option<Vec2>,
}

impl Decision {
    /// Stand still, keep the current state, keep the ball.
    pub const IDLE: Decision = Decision { velocity: Vec2::ZERO, state: None, release: None };

    /// Move with `velocity` and switch to `state`.
    #[inline]
    pub fn moving(velocity: Vec2, state: PlayerState) -> Self {
        Self { velocity, state: Some(state), release: None }
    }

    /// Attach a ball release.
    #[inline]
    pub fn with_release(mut self, ball_velocity: Vec2) -> Self {
        self.release = Some(ball_velocity);
        self
    }
}

impl Default for Decision {
    fn default() -> Self {
        Self::IDLE
    }
}
