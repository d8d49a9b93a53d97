//! Read-only simulation state passed to every behavior callback.

use tj_agent::AgentStore;
use tj_core::{AgentId, BehaviorConfig, Field, Team, Tick, Vec2};
use tj_spatial::NeighborIndex;

// ── BallView ──────────────────────────────────────────────────────────────────

/// The externally visible ball state.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BallView {
    pub position:  Vec2,
    pub velocity:  Vec2,
    pub possessor: Option<AgentId>,
}

// ── Snapshot ──────────────────────────────────────────────────────────────────

/// A point-in-time view of the world shared (immutably) by every agent
/// during one tick's decision phase.
///
/// `Snapshot` borrows the agent arrays of the last committed world; tj-sim
/// writes the tick's results into a separate copy, so nothing an agent reads
/// here can change until the next tick.
///
/// Built once per tick.  Construction bulk-loads a [`NeighborIndex`] over
/// all agent positions and precomputes each team's nearest agent to the
/// ball.
pub struct Snapshot<'a> {
    /// The tick being decided.
    pub tick: Tick,

    /// Seconds this tick advances the world by.
    pub tick_duration: f32,

    pub field: &'a Field,

    /// Read-only view of every agent's SoA state arrays.
    pub agents: &'a AgentStore,

    pub ball: BallView,

    /// Decision parameters (perception radii, ranges, speeds).
    pub config: &'a BehaviorConfig,

    /// Radius-query index over `agents.position`.
    pub index: NeighborIndex,

    /// Per team: the agent closest to the ball, possessor excluded.
    nearest_to_ball: [Option<AgentId>; 2],
}

impl<'a> Snapshot<'a> {
    /// Build the snapshot for a single tick.
    pub fn new(
        tick:          Tick,
        tick_duration: f32,
        field:         &'a Field,
        agents:        &'a AgentStore,
        ball:          BallView,
        config:        &'a BehaviorConfig,
    ) -> Self {
        let index = NeighborIndex::build(
            agents.agent_ids().map(|a| (a, agents.position[a.index()])),
        );

        let mut nearest_to_ball: [Option<(f32, AgentId)>; 2] = [None, None];
        for agent in agents.agent_ids() {
            if ball.possessor == Some(agent) {
                continue;
            }
            let d = agents.position[agent.index()].distance(ball.position);
            let slot = &mut nearest_to_ball[agents.team[agent.index()].index()];
            // Ascending-id scan: a later agent only wins on strictly smaller
            // distance, so ties keep the lower id.
            if slot.is_none_or(|(best, _)| d < best) {
                *slot = Some((d, agent));
            }
        }

        Self {
            tick,
            tick_duration,
            field,
            agents,
            ball,
            config,
            index,
            nearest_to_ball: nearest_to_ball.map(|n| n.map(|(_, a)| a)),
        }
    }

    /// `team`'s agent nearest to the ball, not counting the possessor.
    ///
    /// `None` only if the team has no such agent.
    #[inline]
    pub fn nearest_to_ball(&self, team: Team) -> Option<AgentId> {
        self.nearest_to_ball[team.index()]
    }

    /// Team of the current possessor, if any.  `None` also when the
    /// possessor id is not in the store.
    #[inline]
    pub fn possessor_team(&self) -> Option<Team> {
        self.ball.possessor.and_then(|p| self.agents.team.get(p.index()).copied())
    }

    /// How far `agent` can see other players.
    #[inline]
    pub fn perception_radius(&self, agent: AgentId) -> f32 {
        self.config.perception_radius(self.agents.awareness[agent.index()])
    }
}
