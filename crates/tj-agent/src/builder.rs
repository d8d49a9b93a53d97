//! Builders for `AgentStore` + `AgentRngs`.
//!
//! Two ways in:
//!
//! - [`AgentStoreBuilder::kickoff`] lays out both teams from a
//!   [`MatchConfig`] (the normal path, used by `tj_sim::initialize`).
//! - [`AgentStoreBuilder::new`] + [`agent`](AgentStoreBuilder::agent) places
//!   hand-written agents, which is what scenario tests want.
//!
//! # Usage
//!
//! ```rust
//! use tj_agent::{AgentSpec, AgentStoreBuilder};
//! use tj_core::{Role, RoleAttributes, Team, Vec2};
//!
//! let (store, rngs) = AgentStoreBuilder::new(/*seed=*/ 42)
//!     .agent(AgentSpec::new(Team::Home, Role::Runner, Vec2::new(10.0, 10.0)))
//!     .agent(AgentSpec::new(Team::Away, Role::HeavyHitter, Vec2::new(20.0, 10.0)))
//!     .build();
//!
//! assert_eq!(store.count, 2);
//! assert_eq!(rngs.len(),  2);
//! ```

use tj_core::{
    ConfigError, ConfigResult, Field, MatchConfig, PlayerState, Role, RoleAttributes, SimRng,
    Team, Vec2,
};

use crate::{AgentRngs, AgentStore};

/// Salt separating the kickoff variation stream from the per-agent streams.
const KICKOFF_SALT: u64 = 0x6b69_636b_6f66_6621;

// ── AgentSpec ─────────────────────────────────────────────────────────────────

/// Everything needed to place one agent.
#[derive(Clone, Debug, PartialEq)]
pub struct AgentSpec {
    pub team:       Team,
    pub role:       Role,
    pub attributes: RoleAttributes,
    pub position:   Vec2,
    pub state:      PlayerState,
    pub home:       Vec2,
}

impl AgentSpec {
    /// An agent with its role's preset attributes, positioned at `position`
    /// with its home point at the same spot.
    pub fn new(team: Team, role: Role, position: Vec2) -> Self {
        Self {
            team,
            role,
            attributes: RoleAttributes::preset(role),
            position,
            state: PlayerState::default(),
            home: position,
        }
    }

    pub fn with_attributes(mut self, attributes: RoleAttributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn with_state(mut self, state: PlayerState) -> Self {
        self.state = state;
        self
    }

    pub fn with_home(mut self, home: Vec2) -> Self {
        self.home = home;
        self
    }
}

// ── AgentStoreBuilder ─────────────────────────────────────────────────────────

/// Builder for [`AgentStore`] + [`AgentRngs`].
///
/// Agents receive ids in push order.
pub struct AgentStoreBuilder {
    seed:  u64,
    specs: Vec<AgentSpec>,
}

impl AgentStoreBuilder {
    /// Empty builder using `seed` as the global RNG seed.
    pub fn new(seed: u64) -> Self {
        Self { seed, specs: Vec::new() }
    }

    /// Append one agent.
    pub fn agent(mut self, spec: AgentSpec) -> Self {
        self.specs.push(spec);
        self
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Kickoff layout for both teams.
    ///
    /// - Home agents take ids `0..n`, away agents `n..2n`.
    /// - Home lines up at `x = 0.25 × width`, away at `0.75 × width`; the
    ///   i-th agent of a team stands at `y = (i + 1) × height / (n + 1)`.
    /// - Each team's kickoff taker (its first Runner, else its first agent)
    ///   instead starts `kickoff_distance` in front of the centre spot on
    ///   its own side.
    /// - Home points sit at the layout y, `home_depth × width` in front of
    ///   the agent's own goal line.
    /// - Attributes vary around the role presets, drawn from a `SimRng`
    ///   seeded from `config.seed`, and are clamped to their valid ranges.
    pub fn kickoff(config: &MatchConfig, field: &Field) -> ConfigResult<Self> {
        let teams = &config.teams;
        let n = teams.agents_per_team;
        if n == 0 {
            return Err(ConfigError::NoAgents);
        }

        let mut rng = SimRng::new(config.seed ^ KICKOFF_SALT);
        let mut builder = Self::new(config.seed);
        let centre = field.center();

        for team in Team::ALL {
            let dir = field.attack_direction(team);
            let line_x = match team {
                Team::Home => 0.25 * field.width(),
                Team::Away => 0.75 * field.width(),
            };

            let roles: Vec<Role> = (0..n)
                .map(|slot| teams.role_for(slot).ok_or(ConfigError::EmptyRoleAssignment))
                .collect::<ConfigResult<_>>()?;
            let taker = roles.iter().position(|&r| r == Role::Runner).unwrap_or(0);

            for (slot, &role) in roles.iter().enumerate() {
                let base = teams
                    .role_attributes
                    .get(&role)
                    .copied()
                    .ok_or(ConfigError::MissingRole { role, table: "role attribute" })?;
                let state = teams
                    .initial_states
                    .get(&role)
                    .copied()
                    .ok_or(ConfigError::MissingRole { role, table: "initial state" })?;

                let y = (slot + 1) as f32 * field.height() / (n + 1) as f32;
                let position = if slot == taker {
                    field.clamp(Vec2::new(centre.x - dir * teams.kickoff_distance, centre.y))
                } else {
                    Vec2::new(line_x, y)
                };
                let home_x = field.own_goal_x(team) + dir * base.home_depth * field.width();

                let attributes = vary_attributes(
                    &mut rng,
                    base,
                    teams.attribute_variation,
                    teams.stamina_variation,
                );

                builder.specs.push(AgentSpec {
                    team,
                    role,
                    attributes,
                    position,
                    state,
                    home: field.clamp(Vec2::new(home_x, y)),
                });
            }
        }

        Ok(builder)
    }

    /// Construct `AgentStore` and `AgentRngs`.
    ///
    /// Every agent starts at rest with full stamina and zero distance.
    pub fn build(self) -> (AgentStore, AgentRngs) {
        let count = self.specs.len();
        let mut store = AgentStore::with_capacity(count);

        for spec in self.specs {
            let a = spec.attributes;
            store.team.push(spec.team);
            store.role.push(spec.role);
            store.speed.push(a.speed);
            store.strength.push(a.strength);
            store.max_stamina.push(a.stamina);
            store.awareness.push(a.awareness);
            store.kicking.push(a.kicking);
            store.home.push(spec.home);
            store.stamina.push(a.stamina);
            store.position.push(spec.position);
            store.velocity.push(Vec2::ZERO);
            store.state.push(spec.state);
            store.distance.push(0.0);
        }
        store.count = count;

        let rngs = AgentRngs::new(count, self.seed);
        (store, rngs)
    }
}

/// Seeded variation around a role preset.
///
/// Draw order is fixed (speed, strength, awareness, kicking, stamina) so the
/// same seed always yields the same squad.
fn vary_attributes(
    rng:               &mut SimRng,
    base:              RoleAttributes,
    spread:            f32,
    stamina_spread:    f32,
) -> RoleAttributes {
    let skill = |v: f32| v.clamp(0.0, 10.0);
    RoleAttributes {
        speed:      rng.vary(base.speed, spread).max(0.0),
        strength:   skill(rng.vary(base.strength, spread)),
        awareness:  skill(rng.vary(base.awareness, spread)),
        kicking:    skill(rng.vary(base.kicking, spread)),
        stamina:    rng.vary(base.stamina, stamina_spread).max(1.0),
        home_depth: base.home_depth,
    }
}
