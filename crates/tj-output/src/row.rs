//! Plain data row types written by output backends.

use tj_core::{PlayerState, Role, Team};

/// One agent at a snapshot tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentSnapshotRow {
    pub agent_id: u32,
    pub tick:     u64,
    pub team:     Team,
    pub role:     Role,
    pub x:        f32,
    pub y:        f32,
    pub state:    PlayerState,
    pub stamina:  f32,
    pub has_ball: bool,
}

/// Summary of one committed tick.
///
/// `tick` is the tick the world reached, matching the snapshot rows written
/// for the same instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSummaryRow {
    pub tick:            u64,
    pub elapsed_secs:    f64,
    /// Possessing agent after arbitration; `None` for a loose ball.
    pub possessor:       Option<u32>,
    pub possessing_team: Option<Team>,
    pub ball_x:          f32,
    pub ball_y:          f32,
    pub ball_speed:      f32,
    /// Number of events emitted during the tick.
    pub events:          u32,
}
