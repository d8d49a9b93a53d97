//! What happened during a tick.

use tj_core::{AgentId, PlayerState, Team, Tick, Vec2};
use tj_physics::{LossCause, PossessionEvent};

/// A discrete occurrence a rule layer (scoring, fouls, commentary) can
/// consume.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "event", rename_all = "snake_case"))]
pub enum SimEvent {
    PossessionGained {
        agent: AgentId,
        team:  Team,
    },
    PossessionLost {
        agent: AgentId,
        team:  Team,
        cause: LossCause,
    },
    StateChanged {
        agent: AgentId,
        from:  PlayerState,
        to:    PlayerState,
    },
}

impl From<PossessionEvent> for SimEvent {
    fn from(e: PossessionEvent) -> Self {
        match e {
            PossessionEvent::Gained { agent, team } => SimEvent::PossessionGained { agent, team },
            PossessionEvent::Lost { agent, team, cause } => {
                SimEvent::PossessionLost { agent, team, cause }
            }
        }
    }
}

/// Result of one [`advance`][crate::advance].
///
/// Events are ordered: state changes in ascending agent id, then a release,
/// then a strip, then a capture.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickOutcome {
    /// The tick that was processed.  The returned world is at `tick + 1`.
    pub tick: Tick,

    /// Seconds the tick covered.
    pub tick_duration: f32,

    pub events: Vec<SimEvent>,

    /// Possessor after arbitration.
    pub possessor:       Option<AgentId>,
    pub possessing_team: Option<Team>,

    /// Distance each agent covered this tick, indexed by `AgentId`.
    pub moved: Vec<f32>,

    /// Number of agents in each FSM state after the tick, indexed by
    /// `PlayerState::index`.
    pub state_counts: [usize; PlayerState::COUNT],

    pub ball_position: Vec2,
    pub ball_speed:    f32,
}

impl TickOutcome {
    /// `true` if the ball was gained or lost this tick.
    pub fn possession_changed(&self) -> bool {
        self.events.iter().any(|e| {
            matches!(e, SimEvent::PossessionGained { .. } | SimEvent::PossessionLost { .. })
        })
    }

    /// Possession events only.
    pub fn possession_events(&self) -> impl Iterator<Item = &SimEvent> + '_ {
        self.events.iter().filter(|e| !matches!(e, SimEvent::StateChanged { .. }))
    }
}
