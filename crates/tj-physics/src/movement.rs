//! Agent movement for one tick.

use tj_agent::AgentStore;
use tj_core::{AgentId, Field, PhysicsConfig, Vec2};

/// Move `agent` by `requested` (units / second) for `dt` seconds.
///
/// - The requested velocity is capped at the agent's effective speed.
/// - The new position is clamped to the field.
/// - A move that would end within `collision_radius` of another agent, and
///   closer to it than before, is refused: the agent stays put this tick.
/// - Stamina drops by `stamina_cost_per_unit` per unit actually travelled,
///   never below zero.
/// - `velocity` is set to the displacement actually achieved per second.
///
/// Returns the distance travelled.
pub fn apply_move(
    agents:    &mut AgentStore,
    agent:     AgentId,
    requested: Vec2,
    dt:        f32,
    field:     &Field,
    physics:   &PhysicsConfig,
) -> f32 {
    let i = agent.index();
    let velocity = requested.clamp_length(agents.effective_speed(agent));
    let from = agents.position[i];
    let mut to = field.clamp(from + velocity * dt);
    if to != from && collides(agents, agent, from, to, physics.collision_radius) {
        to = from;
    }
    let moved = from.distance(to);

    agents.position[i] = to;
    agents.velocity[i] = if dt > 0.0 { (to - from) * (1.0 / dt) } else { Vec2::ZERO };
    agents.stamina[i] = (agents.stamina[i] - moved * physics.stamina_cost_per_unit).max(0.0);
    agents.distance[i] += moved;
    moved
}

/// Whether `agent` moving `from -> to` closes on someone inside `radius`.
///
/// Reads positions as they stand mid-apply: lower ids have already moved.
fn collides(agents: &AgentStore, agent: AgentId, from: Vec2, to: Vec2, radius: f32) -> bool {
    if radius <= 0.0 {
        return false;
    }
    agents
        .position
        .iter()
        .enumerate()
        .filter(|&(j, _)| j != agent.index())
        .any(|(_, &other)| {
            let after = to.distance(other);
            after < radius && after < from.distance(other)
        })
}
