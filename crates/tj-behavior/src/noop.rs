//! A no-op behavior model — agents never move.

use tj_core::{AgentId, AgentRng};

use crate::{BehaviorModel, Decision, Snapshot};

/// A [`BehaviorModel`] that always returns [`Decision::IDLE`].
///
/// Useful in tests that drive the ball or possession by hand.
pub struct NoopBehavior;

impl BehaviorModel for NoopBehavior {
    fn decide(
        &self,
        _agent:    AgentId,
        _snapshot: &Snapshot<'_>,
        _rng:      &mut AgentRng,
    ) -> Decision {
        Decision::IDLE
    }
}
