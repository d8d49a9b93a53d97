//! The possession arbiter.
//!
//! Runs once per tick against post-move positions, single-threaded:
//!
//! 1. **Contest**: while the ball is held, every opponent with strictly
//!    greater effective strength within `contest_radius` of the holder
//!    accumulates a consecutive-tick contact count.  Breaking contact (or
//!    losing the strength edge) resets it.  Once a count exceeds
//!    `contact_threshold_ticks` the ball is knocked loose where it lies
//!    with zero velocity, and the stripped holder is put on cooldown.
//! 2. **Capture**: a loose ball goes to the agent with the smallest distance
//!    strictly below `capture_radius`; exact ties go to the lowest id.  The
//!    last releaser is skipped while its cooldown runs.
//! 3. The cooldown counts down by one.
//!
//! Capture runs in the same tick as a strip, so a stronger challenger
//! standing on the ball takes it over immediately.

#[cfg(not(feature = "fx-hash"))]
use std::collections::HashMap;

#[cfg(feature = "fx-hash")]
use rustc_hash::FxHashMap as HashMap;

use tracing::debug;

use tj_agent::AgentStore;
use tj_core::{AgentId, Field, PhysicsConfig, Team, Tick, Vec2};

use crate::{Ball, PhysicsError, PhysicsResult};

// ── Events ────────────────────────────────────────────────────────────────────

/// Why a holder lost the ball.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum LossCause {
    /// A stronger opponent held contact past the threshold.
    Stripped { by: AgentId },
    /// The holder passed or kicked.
    Released,
}

/// A change of ball possession.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PossessionEvent {
    Gained { agent: AgentId, team: Team },
    Lost   { agent: AgentId, team: Team, cause: LossCause },
}

// ── PossessionArbiter ─────────────────────────────────────────────────────────

/// Possession rules plus the contact counters they need across ticks.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PossessionArbiter {
    /// Challenger → consecutive ticks in qualifying contact with the
    /// current holder.
    contacts: HashMap<AgentId, u32>,
}

impl PossessionArbiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consecutive contact ticks `challenger` has against the current holder.
    pub fn contact_ticks(&self, challenger: AgentId) -> u32 {
        self.contacts.get(&challenger).copied().unwrap_or(0)
    }

    /// The holder lets go with `velocity` (pass or kick).
    pub fn release(
        &mut self,
        ball:     &mut Ball,
        agents:   &AgentStore,
        agent:    AgentId,
        velocity: Vec2,
        physics:  &PhysicsConfig,
        tick:     Tick,
    ) -> PhysicsResult<PossessionEvent> {
        if ball.possessor != Some(agent) {
            return Err(PhysicsError::NotPossessor { agent });
        }
        let team = team_of(agents, agent)?;

        ball.possessor = None;
        ball.velocity = velocity;
        ball.last_releaser = Some(agent);
        ball.cooldown = physics.recapture_cooldown_ticks;
        self.contacts.clear();

        debug!(%tick, %agent, %team, speed = velocity.length(), "ball released");
        Ok(PossessionEvent::Lost { agent, team, cause: LossCause::Released })
    }

    /// Apply the contest and capture rules for this tick.
    ///
    /// Events come out in the order they happened: a strip before the
    /// capture that follows it.
    pub fn resolve(
        &mut self,
        ball:    &mut Ball,
        agents:  &AgentStore,
        field:   &Field,
        physics: &PhysicsConfig,
        tick:    Tick,
    ) -> PhysicsResult<Vec<PossessionEvent>> {
        let mut events = Vec::new();

        if let Some(holder) = ball.possessor {
            let team = team_of(agents, holder)?;
            if let Some(by) = self.update_contacts(holder, team, agents, physics) {
                ball.possessor = None;
                ball.velocity = Vec2::ZERO;
                ball.last_releaser = Some(holder);
                ball.cooldown = physics.recapture_cooldown_ticks;
                self.contacts.clear();

                debug!(%tick, agent = %holder, %team, %by, "ball stripped");
                events.push(PossessionEvent::Lost {
                    agent: holder,
                    team,
                    cause: LossCause::Stripped { by },
                });
            }
        }

        if ball.possessor.is_none() {
            if let Some(winner) = capture_candidate(ball, agents, physics) {
                let team = team_of(agents, winner)?;
                ball.possessor = Some(winner);
                ball.velocity = Vec2::ZERO;
                ball.position = field.clamp(agents.position[winner.index()] + physics.carry_offset);
                ball.cooldown = 0;
                self.contacts.clear();

                debug!(%tick, agent = %winner, %team, "possession gained");
                events.push(PossessionEvent::Gained { agent: winner, team });
            }
        }

        ball.cooldown = ball.cooldown.saturating_sub(1);
        Ok(events)
    }

    /// Refresh the contact counters for `holder` and return the challenger
    /// that has now held contact past the threshold, if any.
    ///
    /// With several qualifying challengers the longest contact wins, then
    /// the lowest id.
    fn update_contacts(
        &mut self,
        holder:  AgentId,
        team:    Team,
        agents:  &AgentStore,
        physics: &PhysicsConfig,
    ) -> Option<AgentId> {
        let holder_pos = agents.position[holder.index()];
        let holder_strength = agents.effective_strength(holder);

        let mut next = HashMap::default();
        for challenger in agents.team_ids(team.opponent()) {
            let close = agents.position[challenger.index()].distance(holder_pos)
                <= physics.contest_radius;
            if close && agents.effective_strength(challenger) > holder_strength {
                next.insert(challenger, self.contact_ticks(challenger) + 1);
            }
        }
        self.contacts = next;

        self.contacts
            .iter()
            .filter(|&(_, &ticks)| ticks > physics.contact_threshold_ticks)
            .max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(a.0)))
            .map(|(&id, _)| id)
    }
}

/// Closest eligible agent strictly inside the capture radius; ties go to the
/// lowest id.
fn capture_candidate(ball: &Ball, agents: &AgentStore, physics: &PhysicsConfig) -> Option<AgentId> {
    let mut best: Option<(f32, AgentId)> = None;
    for agent in agents.agent_ids() {
        if !ball.can_capture(agent) {
            continue;
        }
        let d = agents.position[agent.index()].distance(ball.position);
        if d < physics.capture_radius && best.is_none_or(|(bd, _)| d < bd) {
            best = Some((d, agent));
        }
    }
    best.map(|(_, a)| a)
}

fn team_of(agents: &AgentStore, agent: AgentId) -> PhysicsResult<Team> {
    agents
        .team
        .get(agent.index())
        .copied()
        .ok_or(PhysicsError::UnknownAgent(agent))
}
