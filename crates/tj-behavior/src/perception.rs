//! Local perception: what one agent can see of the snapshot.
//!
//! The ball is always visible.  Other players are visible when their
//! distance is at most the observer's perception radius
//! (`perception_base + perception_per_awareness × awareness`).

use tj_core::{AgentId, Vec2};
use tj_spatial::Neighbor;

use crate::Snapshot;

/// The ball as seen from one agent.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BallSight {
    pub position:  Vec2,
    pub velocity:  Vec2,
    pub possessor: Option<AgentId>,
    /// Distance from the observer.
    pub distance:  f32,
    /// Unit vector from the observer toward the ball (zero if coincident).
    pub direction: Vec2,
}

/// Everything one agent perceives this tick.
///
/// `teammates` and `opponents` are sorted by ascending distance, then id,
/// and never include the observer.
#[derive(Clone, Debug, PartialEq)]
pub struct Perception {
    pub ball:      BallSight,
    pub teammates: Vec<Neighbor>,
    pub opponents: Vec<Neighbor>,
}

/// Build `agent`'s view of `snapshot`.
///
/// Never fails: an agent that sees nobody gets empty lists.
pub fn perceive(snapshot: &Snapshot<'_>, agent: AgentId) -> Perception {
    let agents = snapshot.agents;
    let me = agents.position[agent.index()];
    let my_team = agents.team[agent.index()];

    let mut teammates = Vec::new();
    let mut opponents = Vec::new();
    for n in snapshot.index.within(me, snapshot.perception_radius(agent)) {
        if n.id == agent {
            continue;
        }
        if agents.team[n.id.index()] == my_team {
            teammates.push(n);
        } else {
            opponents.push(n);
        }
    }

    let ball = snapshot.ball;
    Perception {
        ball: BallSight {
            position:  ball.position,
            velocity:  ball.velocity,
            possessor: ball.possessor,
            distance:  me.distance(ball.position),
            direction: me.direction_to(ball.position),
        },
        teammates,
        opponents,
    }
}
