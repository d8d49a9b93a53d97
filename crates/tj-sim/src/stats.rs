//! Match statistics.
//!
//! Purely additive: fed one [`TickOutcome`] per committed tick and never read
//! by decision logic.

use tj_core::{PlayerState, Team};

use crate::{SimEvent, TickOutcome, World};

/// Running totals for one match.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchStatistics {
    /// Committed ticks recorded.
    pub ticks: u64,

    /// Ticks each team ended in possession, indexed by `Team::index`.
    pub possession_ticks: [u64; 2],
    /// Seconds each team ended in possession.
    pub possession_secs:  [f64; 2],
    /// Ticks that ended with a loose ball.
    pub free_ball_ticks:  u64,

    /// Cumulative distance per agent, indexed by `AgentId`.
    pub distance: Vec<f64>,

    /// Agent-ticks spent in each state, indexed by `PlayerState::index`.
    pub state_ticks:         [u64; PlayerState::COUNT],
    /// Agents in each state after the most recent tick.
    pub latest_state_counts: [usize; PlayerState::COUNT],

    /// Number of times the ball was gained.
    pub possession_changes: u64,
    pub strips:             u64,
    pub releases:           u64,
}

impl MatchStatistics {
    pub fn new(agent_count: usize) -> Self {
        Self { distance: vec![0.0; agent_count], ..Self::default() }
    }

    /// Fold one tick into the totals.
    pub fn record(&mut self, outcome: &TickOutcome) {
        self.ticks += 1;

        match outcome.possessing_team {
            Some(team) => {
                self.possession_ticks[team.index()] += 1;
                self.possession_secs[team.index()] += f64::from(outcome.tick_duration);
            }
            None => self.free_ball_ticks += 1,
        }

        if self.distance.len() < outcome.moved.len() {
            self.distance.resize(outcome.moved.len(), 0.0);
        }
        for (total, &d) in self.distance.iter_mut().zip(&outcome.moved) {
            *total += f64::from(d);
        }

        for (total, &n) in self.state_ticks.iter_mut().zip(&outcome.state_counts) {
            *total += n as u64;
        }
        self.latest_state_counts = outcome.state_counts;

        for event in &outcome.events {
            match event {
                SimEvent::PossessionGained { .. } => self.possession_changes += 1,
                SimEvent::PossessionLost { cause, .. } => match cause {
                    tj_physics::LossCause::Stripped { .. } => self.strips += 1,
                    tj_physics::LossCause::Released => self.releases += 1,
                },
                SimEvent::StateChanged { .. } => {}
            }
        }
    }

    /// `team`'s share of the possessed ticks, in `[0, 1]`.  Zero before
    /// anyone has had the ball.
    pub fn possession_share(&self, team: Team) -> f64 {
        let held: u64 = self.possession_ticks.iter().sum();
        if held == 0 {
            0.0
        } else {
            self.possession_ticks[team.index()] as f64 / held as f64
        }
    }

    /// Total distance covered by all agents.
    pub fn total_distance(&self) -> f64 {
        self.distance.iter().sum()
    }
}

/// The statistics accumulated by `world` so far.
#[inline]
pub fn statistics(world: &World) -> &MatchStatistics {
    &world.stats
}
