//! Owned, read-only copies of world state for renderers and recorders.

use tj_behavior::BallView;
use tj_core::{AgentId, PlayerState, Role, Team, Tick, Vec2};

use crate::World;

/// One agent as a renderer sees it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentView {
    pub id:       AgentId,
    pub team:     Team,
    pub role:     Role,
    pub position: Vec2,
    pub velocity: Vec2,
    pub state:    PlayerState,
    pub stamina:  f32,
    pub has_ball: bool,
}

/// Everything needed to draw one committed tick.
///
/// Holds no borrows, so it can be handed to another thread while the
/// simulation keeps advancing.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderView {
    pub tick:         Tick,
    pub elapsed_secs: f64,
    pub field_width:  f32,
    pub field_height: f32,
    pub agents:       Vec<AgentView>,
    pub ball:         BallView,
}

/// Copy out the render-relevant parts of `world`.
pub fn snapshot_for_rendering(world: &World) -> RenderView {
    let a = &world.agents;
    let agents = a
        .agent_ids()
        .map(|id| {
            let i = id.index();
            AgentView {
                id,
                team:     a.team[i],
                role:     a.role[i],
                position: a.position[i],
                velocity: a.velocity[i],
                state:    a.state[i],
                stamina:  a.stamina[i],
                has_ball: world.ball.possessor == Some(id),
            }
        })
        .collect();

    RenderView {
        tick:         world.clock.current_tick,
        elapsed_secs: world.clock.elapsed_secs(),
        field_width:  world.field.width(),
        field_height: world.field.height(),
        agents,
        ball:         world.ball.view(),
    }
}
