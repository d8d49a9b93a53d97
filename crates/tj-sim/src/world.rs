//! The committed simulation state.

use tj_agent::{AgentRngs, AgentStore, AgentStoreBuilder};
use tj_core::{Field, MatchConfig, SimClock, Tick, Vec2};
use tj_physics::{Ball, PossessionArbiter};

use crate::{MatchStatistics, SimError, SimResult};

/// Everything the simulation knows at one committed tick.
///
/// The tick counter (`clock`) and all RNG state (`rngs`) are plain fields, so
/// cloning a `World` and advancing both copies yields identical results.
#[derive(Clone, Debug, PartialEq)]
pub struct World {
    pub config: MatchConfig,
    pub field:  Field,
    pub clock:  SimClock,

    /// Player SoA arrays.
    pub agents: AgentStore,
    /// Per-agent RNGs, kept apart from `agents` for the decision-phase split
    /// borrow.
    pub rngs:   AgentRngs,

    pub ball:    Ball,
    pub arbiter: PossessionArbiter,
    pub stats:   MatchStatistics,
}

/// Validate `config` and build the kickoff world: both teams laid out, ball
/// at rest on the centre spot, tick 0.
pub fn initialize(config: &MatchConfig) -> SimResult<World> {
    config.validate()?;
    let field = config.field.build()?;
    let (agents, rngs) = AgentStoreBuilder::kickoff(config, &field)?.build();
    World::from_parts(config.clone(), agents, rngs)
}

impl World {
    /// Assemble a world from explicitly built agents.
    ///
    /// The ball starts at rest on the centre spot.  Fails if `config` is
    /// invalid, if the agent arrays disagree in length, or if any agent
    /// starts outside the field.
    pub fn from_parts(config: MatchConfig, agents: AgentStore, rngs: AgentRngs) -> SimResult<Self> {
        config.validate()?;
        let field = config.field.build()?;
        if rngs.len() != agents.count {
            return Err(SimError::AgentCountMismatch {
                expected: agents.count,
                got:      rngs.len(),
                what:     "agent RNGs",
            });
        }

        let world = World {
            clock: config.make_clock(),
            ball: Ball::at_rest(field.center()),
            arbiter: PossessionArbiter::new(),
            stats: MatchStatistics::new(agents.count),
            field,
            agents,
            rngs,
            config,
        };
        world.check_invariants()?;
        Ok(world)
    }

    /// The next tick to be processed.
    #[inline]
    pub fn tick(&self) -> Tick {
        self.clock.current_tick
    }

    /// Verify every structural and physical invariant.
    ///
    /// - every SoA array and the RNG table hold exactly `count` entries
    /// - agent and ball positions are finite and inside the field
    /// - velocities are finite
    /// - `0 <= stamina <= max_stamina`
    /// - the possessor, if any, is a real agent
    pub fn check_invariants(&self) -> SimResult<()> {
        let a = &self.agents;
        let n = a.count;
        let lengths = [
            ("team", a.team.len()),
            ("role", a.role.len()),
            ("speed", a.speed.len()),
            ("strength", a.strength.len()),
            ("max_stamina", a.max_stamina.len()),
            ("awareness", a.awareness.len()),
            ("kicking", a.kicking.len()),
            ("home", a.home.len()),
            ("stamina", a.stamina.len()),
            ("position", a.position.len()),
            ("velocity", a.velocity.len()),
            ("state", a.state.len()),
            ("distance", a.distance.len()),
            ("agent RNGs", self.rngs.len()),
        ];
        for (what, got) in lengths {
            if got != n {
                return Err(SimError::AgentCountMismatch { expected: n, got, what });
            }
        }

        for agent in a.agent_ids() {
            let i = agent.index();
            self.check_point(&format!("{agent} position"), a.position[i])?;
            if !a.velocity[i].is_finite() {
                return Err(self.violation(format!("{agent} velocity {} is not finite", a.velocity[i])));
            }
            let stamina = a.stamina[i];
            if !(0.0..=a.max_stamina[i]).contains(&stamina) {
                return Err(self.violation(format!(
                    "{agent} stamina {stamina} outside [0, {}]",
                    a.max_stamina[i]
                )));
            }
        }

        self.check_point("ball position", self.ball.position)?;
        if !self.ball.velocity.is_finite() {
            return Err(self.violation(format!("ball velocity {} is not finite", self.ball.velocity)));
        }
        if let Some(p) = self.ball.possessor {
            if p.index() >= n {
                return Err(self.violation(format!("possessor {p} is not an agent")));
            }
        }
        Ok(())
    }

    fn check_point(&self, what: &str, p: Vec2) -> SimResult<()> {
        if p.is_finite() && self.field.contains(p) {
            Ok(())
        } else {
            Err(self.violation(format!("{what} {p} outside the field")))
        }
    }

    fn violation(&self, detail: String) -> SimError {
        SimError::InvariantViolation { tick: self.clock.current_tick, detail }
    }
}
