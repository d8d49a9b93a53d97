//! The `BehaviorModel` trait — the extension point for decision logic.

use tj_core::{AgentId, AgentRng};

use crate::{Decision, Snapshot};

/// Pluggable agent behavior.
///
/// Called once per agent per tick with the shared read-only [`Snapshot`] and
/// the agent's own [`AgentRng`], so results are identical regardless of
/// which thread (or in which order) agents are decided.
///
/// # Thread safety
///
/// tj-sim may call `decide` for many agents in parallel via Rayon, so
/// implementations must be `Send + Sync`.  Per-agent state belongs in the
/// `AgentStore` (read through `snapshot.agents`), not in the model.
///
/// # Example
///
/// ```rust,ignore
/// struct ChaseBall;
///
/// impl BehaviorModel for ChaseBall {
///     fn decide(&self, agent: AgentId, snapshot: &Snapshot<'_>, _rng: &mut AgentRng) -> Decision {
///         let me = snapshot.agents.position[agent.index()];
///         let speed = snapshot.agents.effective_speed(agent);
///         Decision::moving(me.direction_to(snapshot.ball.position) * speed, PlayerState::Attacking)
///     }
/// }
/// ```
pub trait BehaviorModel: Send + Sync + 'static {
    /// Decide what `agent` does this tick.
    fn decide(
        &self,
        agent:    AgentId,
        snapshot: &Snapshot<'_>,
        rng:      &mut AgentRng,
    ) -> Decision;
}
