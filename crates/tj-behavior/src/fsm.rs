//! The four-state player machine.
//!
//! # Transitions
//!
//! Evaluated once per tick from snapshot data; the first rule that matches
//! wins.
//!
//! | # | Condition                                                        | Next          |
//! |---|------------------------------------------------------------------|---------------|
//! | 1 | this agent possesses the ball                                    | `Attacking`   |
//! | 2 | an opponent possesses it and the ball is inside perception range | `Defending`   |
//! | 3 | a teammate possesses it and this agent is not the nearest other teammate | `Supporting` |
//! | 4 | the ball is loose, in range, and this agent is its team's nearest | `Attacking`  |
//! | 5 | otherwise                                                        | `Positioning` |
//!
//! # Movement
//!
//! | State         | Target                                         |
//! |---------------|------------------------------------------------|
//! | `Attacking`   | attacking goal with the ball, the ball without |
//! | `Defending`   | the ball                                       |
//! | `Supporting`  | `ball + (goal − ball) × support_fraction`      |
//! | `Positioning` | home point; still within `arrival_tolerance`   |
//!
//! Speed is `min(effective_speed, distance / tick_duration)` so agents stop
//! on their target instead of overshooting it.
//!
//! # Ball actions
//!
//! The possessor shoots when within `kick_range` of the attacking goal;
//! otherwise it passes to its nearest visible teammate when that teammate is
//! within `pass_range` and at least `pass_advantage` closer to goal.  Every
//! release carries an angular error of up to
//! `(1 − kicking / 10) × max_release_error` radians, drawn from the agent's
//! own RNG.

use tj_core::{AgentId, AgentRng, PlayerState, Vec2};

use crate::{BehaviorModel, Decision, Perception, Snapshot, perceive};

/// The standard player behavior.
#[derive(Copy, Clone, Debug, Default)]
pub struct FsmBehavior;

impl BehaviorModel for FsmBehavior {
    fn decide(
        &self,
        agent:    AgentId,
        snapshot: &Snapshot<'_>,
        rng:      &mut AgentRng,
    ) -> Decision {
        let perception = perceive(snapshot, agent);
        let state = next_state(snapshot, agent, &perception);
        let target = target_for(snapshot, agent, state);
        let velocity = match target {
            Some(t) => steer(snapshot, agent, t),
            None => Vec2::ZERO,
        };

        let mut decision = Decision::moving(velocity, state);
        if perception.ball.possessor == Some(agent) {
            if let Some(release) = choose_release(snapshot, agent, &perception, rng) {
                decision = decision.with_release(release);
            }
        }
        decision
    }
}

// ── Transitions ───────────────────────────────────────────────────────────────

/// Apply the transition table for `agent`.
pub fn next_state(snapshot: &Snapshot<'_>, agent: AgentId, perception: &Perception) -> PlayerState {
    let agents = snapshot.agents;
    let my_team = agents.team[agent.index()];
    let ball = &perception.ball;
    let radius = snapshot.perception_radius(agent);

    match ball.possessor {
        Some(p) if p == agent => PlayerState::Attacking,
        Some(_) => {
            if snapshot.possessor_team() != Some(my_team) {
                if ball.distance < radius {
                    PlayerState::Defending
                } else {
                    PlayerState::Positioning
                }
            } else if snapshot.nearest_to_ball(my_team) != Some(agent) {
                PlayerState::Supporting
            } else {
                PlayerState::Positioning
            }
        }
        None => {
            if ball.distance <= radius && snapshot.nearest_to_ball(my_team) == Some(agent) {
                PlayerState::Attacking
            } else {
                PlayerState::Positioning
            }
        }
    }
}

// ── Movement ──────────────────────────────────────────────────────────────────

/// Where `agent` heads in `state`.  `None` means stand still.
pub fn target_for(snapshot: &Snapshot<'_>, agent: AgentId, state: PlayerState) -> Option<Vec2> {
    let agents = snapshot.agents;
    let i = agent.index();
    let goal = snapshot.field.attacking_goal(agents.team[i]);
    let ball = snapshot.ball.position;

    match state {
        PlayerState::Attacking if snapshot.ball.possessor == Some(agent) => Some(goal),
        PlayerState::Attacking | PlayerState::Defending => Some(ball),
        PlayerState::Supporting => Some(ball.lerp(goal, snapshot.config.support_fraction)),
        PlayerState::Positioning => {
            let home = agents.home[i];
            if agents.position[i].distance(home) <= snapshot.config.arrival_tolerance {
                None
            } else {
                Some(home)
            }
        }
    }
}

/// Velocity toward `target`, capped so one tick never overshoots it.
pub fn steer(snapshot: &Snapshot<'_>, agent: AgentId, target: Vec2) -> Vec2 {
    let from = snapshot.agents.position[agent.index()];
    let dist = from.distance(target);
    if dist <= 0.0 || snapshot.tick_duration <= 0.0 {
        return Vec2::ZERO;
    }
    let speed = snapshot.agents.effective_speed(agent).min(dist / snapshot.tick_duration);
    from.direction_to(target) * speed
}

// ── Ball actions ──────────────────────────────────────────────────────────────

/// Kick or pass velocity for the possessor, if it chooses to release.
fn choose_release(
    snapshot:   &Snapshot<'_>,
    agent:      AgentId,
    perception: &Perception,
    rng:        &mut AgentRng,
) -> Option<Vec2> {
    let agents = snapshot.agents;
    let cfg = snapshot.config;
    let i = agent.index();
    let me = agents.position[i];
    let goal = snapshot.field.attacking_goal(agents.team[i]);
    let goal_distance = me.distance(goal);

    let (direction, speed) = if goal_distance < cfg.kick_range {
        (me.direction_to(goal), cfg.kick_speed_base + cfg.kick_speed_per_skill * agents.kicking[i])
    } else {
        let mate = perception.teammates.first()?;
        let mate_pos = agents.position[mate.id.index()];
        let better_placed = mate_pos.distance(goal) < goal_distance - cfg.pass_advantage;
        if !better_placed || mate.distance >= cfg.pass_range {
            return None;
        }
        (me.direction_to(mate_pos), cfg.pass_speed)
    };
    if direction == Vec2::ZERO {
        return None;
    }

    let spread = (1.0 - agents.kicking[i] / 10.0).clamp(0.0, 1.0) * cfg.max_release_error;
    let direction = if spread > 0.0 {
        direction.rotated(rng.gen_range(-spread..=spread))
    } else {
        direction
    };
    Some(direction * speed)
}
