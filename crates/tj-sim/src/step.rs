//! The pure state-advance operation.

use tracing::{trace, warn};

use tj_agent::AgentRngs;
use tj_behavior::{BehaviorModel, Decision, Snapshot};
use tj_core::{AgentId, ConfigError, PlayerState};
use tj_physics::apply_move;

use crate::{SimEvent, SimResult, TickOutcome, World};

/// Advance `world` by one tick of `tick_duration` seconds.
///
/// Returns the next committed world and what happened.  `world` itself is
/// never modified: on any error (an invariant violation in the input or in
/// the computed world included) the caller still holds the last committed
/// state.
///
/// Identical inputs produce bit-identical outputs, with or without the
/// `parallel` feature.
pub fn advance<B: BehaviorModel>(
    world:         &World,
    behavior:      &B,
    tick_duration: f32,
) -> SimResult<(World, TickOutcome)> {
    if !(tick_duration.is_finite() && tick_duration > 0.0) {
        return Err(ConfigError::InvalidParameter { name: "tick_duration", value: tick_duration }.into());
    }
    if let Err(e) = world.check_invariants() {
        warn!(tick = %world.clock.current_tick, error = %e, "input world rejected");
        return Err(e);
    }

    let tick = world.clock.current_tick;
    let physics = &world.config.physics;
    let field = &world.field;

    // ── ① Snapshot ────────────────────────────────────────────────────────
    let snapshot = Snapshot::new(
        tick,
        tick_duration,
        field,
        &world.agents,
        world.ball.view(),
        &world.config.behavior,
    );
    let mut next = world.clone();

    // ── ② Decision phase ──────────────────────────────────────────────────
    let decisions = decide_all(&snapshot, behavior, &mut next.rngs);

    // ── ③ Apply phase (ascending AgentId) ─────────────────────────────────
    let mut events = Vec::new();
    let mut moved = vec![0.0_f32; world.agents.count];
    for (i, decision) in decisions.iter().enumerate() {
        let agent = AgentId(i as u32);
        moved[i] = apply_move(&mut next.agents, agent, decision.velocity, tick_duration, field, physics);

        if let Some(to) = decision.state {
            let from = next.agents.state[i];
            if from != to {
                next.agents.state[i] = to;
                events.push(SimEvent::StateChanged { agent, from, to });
            }
        }
    }

    // Only the possessor at snapshot time may release.
    if let Some(holder) = snapshot.ball.possessor {
        if let Some(velocity) = decisions.get(holder.index()).and_then(|d| d.release) {
            let event =
                next.arbiter.release(&mut next.ball, &next.agents, holder, velocity, physics, tick)?;
            events.push(event.into());
        }
    }

    // ── ④ Ball ────────────────────────────────────────────────────────────
    next.ball.integrate(field, physics, tick_duration);
    next.ball.follow(&next.agents, field, physics.carry_offset)?;

    // ── ⑤ Possession ──────────────────────────────────────────────────────
    let possession = next.arbiter.resolve(&mut next.ball, &next.agents, field, physics, tick)?;
    events.extend(possession.into_iter().map(SimEvent::from));

    // ── ⑥ Commit ──────────────────────────────────────────────────────────
    next.clock.advance();
    if let Err(e) = next.check_invariants() {
        warn!(%tick, error = %e, "tick rolled back");
        return Err(e);
    }

    let mut state_counts = [0usize; PlayerState::COUNT];
    for s in &next.agents.state {
        state_counts[s.index()] += 1;
    }
    let possessor = next.ball.possessor;
    let outcome = TickOutcome {
        tick,
        tick_duration,
        events,
        possessor,
        possessing_team: possessor.and_then(|p| next.agents.team.get(p.index()).copied()),
        moved,
        state_counts,
        ball_position: next.ball.position,
        ball_speed: next.ball.speed(),
    };
    next.stats.record(&outcome);

    trace!(
        %tick,
        events = outcome.events.len(),
        possessor = ?outcome.possessor,
        ball_speed = outcome.ball_speed,
        "tick committed"
    );
    Ok((next, outcome))
}

/// Run the decision phase.  Output is indexed by `AgentId`.
///
/// Each agent reads only the shared snapshot and writes only its own RNG,
/// so the parallel and sequential paths agree exactly.
fn decide_all<B: BehaviorModel>(
    snapshot: &Snapshot<'_>,
    behavior: &B,
    rngs:     &mut AgentRngs,
) -> Vec<Decision> {
    #[cfg(not(feature = "parallel"))]
    {
        rngs.inner
            .iter_mut()
            .enumerate()
            .map(|(i, rng)| behavior.decide(AgentId(i as u32), snapshot, rng))
            .collect()
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        rngs.inner
            .par_iter_mut()
            .enumerate()
            .map(|(i, rng)| behavior.decide(AgentId(i as u32), snapshot, rng))
            .collect()
    }
}
