//! Match configuration.
//!
//! Every numeric constant the simulation uses lives here with a default.  The
//! field size, friction, possession and tackle radii and role presets follow
//! the Tjostball rules; the rest are tuning choices.
//!
//! Typically loaded from a JSON file by the runner (`serde` feature) and passed
//! to `tj_sim::initialize`.  Missing fields fall back to their defaults.

use std::collections::BTreeMap;

use crate::{
    BoundaryPolicy, ConfigError, ConfigResult, Field, PlayerState, Role, SimClock, Vec2,
};

// ── FieldConfig ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FieldConfig {
    pub width:  f32,
    pub height: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self { width: 100.0, height: 70.0 }
    }
}

impl FieldConfig {
    /// Validate the dimensions and build the [`Field`].
    pub fn build(&self) -> ConfigResult<Field> {
        Field::new(self.width, self.height)
    }
}

// ── RoleAttributes ────────────────────────────────────────────────────────────

/// Base attribute row for one role.  Individual agents receive a seeded
/// variation around these values at kickoff.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoleAttributes {
    /// Top running speed, field units per second.
    pub speed:      f32,
    /// Physical strength, `0..=10`.  Decides ball contests.
    pub strength:   f32,
    /// Maximum stamina.  Drains with distance covered.
    pub stamina:    f32,
    /// Game awareness, `0..=10`.  Widens the perception radius.
    pub awareness:  f32,
    /// Kicking skill, `0..=10`.  Release power and accuracy.
    pub kicking:    f32,
    /// Depth of the role's home point, as a fraction of the field width
    /// measured from the agent's own goal line.
    pub home_depth: f32,
}

impl RoleAttributes {
    /// Preset attributes for `role`.
    pub fn preset(role: Role) -> Self {
        match role {
            Role::FrontFighter => Self {
                speed: 4.5, strength: 7.5, stamina: 95.0,
                awareness: 5.0, kicking: 4.0, home_depth: 0.40,
            },
            Role::HeavyHitter => Self {
                speed: 5.5, strength: 7.0, stamina: 90.0,
                awareness: 5.0, kicking: 7.5, home_depth: 0.30,
            },
            Role::Runner => Self {
                speed: 8.0, strength: 4.0, stamina: 85.0,
                awareness: 7.0, kicking: 5.0, home_depth: 0.45,
            },
            Role::Supporter => Self {
                speed: 5.5, strength: 5.5, stamina: 100.0,
                awareness: 6.5, kicking: 5.5, home_depth: 0.25,
            },
        }
    }

    fn validate(&self, role: Role) -> ConfigResult<()> {
        let checks: [(&'static str, f32, bool); 6] = [
            ("speed",      self.speed,      self.speed >= 0.0),
            ("strength",   self.strength,   (0.0..=10.0).contains(&self.strength)),
            ("stamina",    self.stamina,    self.stamina > 0.0),
            ("awareness",  self.awareness,  (0.0..=10.0).contains(&self.awareness)),
            ("kicking",    self.kicking,    (0.0..=10.0).contains(&self.kicking)),
            ("home_depth", self.home_depth, (0.0..=1.0).contains(&self.home_depth)),
        ];
        for (attribute, value, ok) in checks {
            if !ok || !value.is_finite() {
                return Err(ConfigError::InvalidAttribute { role, attribute, value });
            }
        }
        Ok(())
    }
}

// ── TeamConfig ────────────────────────────────────────────────────────────────

/// Team composition.  Both teams use the same table.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TeamConfig {
    /// Agents per team.  Default 7.
    pub agents_per_team: usize,

    /// Role of the i-th agent of each team; cycled if shorter than
    /// `agents_per_team`.
    pub role_assignment: Vec<Role>,

    /// Base attributes per role.
    pub role_attributes: BTreeMap<Role, RoleAttributes>,

    /// FSM state each role starts the match in.
    pub initial_states: BTreeMap<Role, PlayerState>,

    /// Full width of the uniform spread applied to speed, strength,
    /// awareness and kicking at kickoff.  `0` disables variation.
    pub attribute_variation: f32,

    /// Full width of the uniform spread applied to stamina at kickoff.
    pub stamina_variation: f32,

    /// Distance from the centre spot at which each team's kickoff taker
    /// starts.
    pub kickoff_distance: f32,
}

impl Default for TeamConfig {
    fn default() -> Self {
        // 2 front fighters, 3 heavy hitters, 1 runner, 6 supporters.
        let mut role_assignment = vec![Role::FrontFighter; 2];
        role_assignment.extend([Role::HeavyHitter; 3]);
        role_assignment.push(Role::Runner);
        role_assignment.extend([Role::Supporter; 6]);

        Self {
            agents_per_team: 7,
            role_assignment,
            role_attributes: Role::ALL
                .iter()
                .map(|&r| (r, RoleAttributes::preset(r)))
                .collect(),
            initial_states: BTreeMap::from([
                (Role::FrontFighter, PlayerState::Defending),
                (Role::HeavyHitter,  PlayerState::Defending),
                (Role::Runner,       PlayerState::Attacking),
                (Role::Supporter,    PlayerState::Positioning),
            ]),
            attribute_variation: 1.0,
            stamina_variation:   10.0,
            kickoff_distance:    2.0,
        }
    }
}

impl TeamConfig {
    /// Role of the agent at `slot` (0-based position within its team).
    ///
    /// Returns `None` only if `role_assignment` is empty.
    pub fn role_for(&self, slot: usize) -> Option<Role> {
        if self.role_assignment.is_empty() {
            return None;
        }
        Some(self.role_assignment[slot % self.role_assignment.len()])
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.agents_per_team == 0 {
            return Err(ConfigError::NoAgents);
        }
        if self.role_assignment.is_empty() {
            return Err(ConfigError::EmptyRoleAssignment);
        }
        for &role in &self.role_assignment {
            let attrs = self.role_attributes.get(&role).ok_or(ConfigError::MissingRole {
                role,
                table: "role attribute",
            })?;
            attrs.validate(role)?;
            if !self.initial_states.contains_key(&role) {
                return Err(ConfigError::MissingRole { role, table: "initial state" });
            }
        }
        non_negative("attribute_variation", self.attribute_variation)?;
        non_negative("stamina_variation", self.stamina_variation)?;
        non_negative("kickoff_distance", self.kickoff_distance)?;
        Ok(())
    }
}

// ── PhysicsConfig ─────────────────────────────────────────────────────────────

/// Ball physics, possession and stamina parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PhysicsConfig {
    /// Multiplicative velocity factor applied to a free ball each tick, in
    /// `(0, 1)`.  A free ball always comes to rest.
    pub friction: f32,

    /// A free ball slower than this (units / second) is stopped.
    pub stop_epsilon: f32,

    /// An agent strictly closer than this may capture a loose ball.
    pub capture_radius: f32,

    /// A stronger opponent within this distance of the possessor is in
    /// contact for the purpose of the contact rule.
    pub contest_radius: f32,

    /// Consecutive contact ticks a stronger opponent must exceed to strip
    /// the ball.  50 ticks = 5 s at the default tick duration.
    pub contact_threshold_ticks: u32,

    /// Ticks after a release (or strip) during which the releasing agent
    /// cannot recapture the ball.
    pub recapture_cooldown_ticks: u32,

    /// Behaviour of a free ball at the touchlines.
    pub boundary: BoundaryPolicy,

    /// Ball position relative to its possessor.
    pub carry_offset: Vec2,

    /// Stamina lost per field unit travelled.
    pub stamina_cost_per_unit: f32,

    /// Personal space: an agent will not step closer than this to another
    /// agent.  Must stay below `contest_radius` so challengers can still
    /// reach a possessor.  0 disables the check.
    pub collision_radius: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            friction:                 0.95,
            stop_epsilon:             0.1,
            capture_radius:           2.0,
            contest_radius:           3.0,
            contact_threshold_ticks:  50,
            recapture_cooldown_ticks: 5,
            boundary:                 BoundaryPolicy::default(),
            carry_offset:             Vec2::new(0.5, 0.0),
            stamina_cost_per_unit:    0.05,
            collision_radius:         1.0,
        }
    }
}

impl PhysicsConfig {
    fn validate(&self) -> ConfigResult<()> {
        if !(self.friction > 0.0 && self.friction < 1.0) {
            return Err(ConfigError::InvalidParameter { name: "friction", value: self.friction });
        }
        non_negative("stop_epsilon", self.stop_epsilon)?;
        positive("capture_radius", self.capture_radius)?;
        non_negative("contest_radius", self.contest_radius)?;
        non_negative("stamina_cost_per_unit", self.stamina_cost_per_unit)?;
        non_negative("collision_radius", self.collision_radius)?;
        if self.collision_radius > 0.0 && self.collision_radius >= self.contest_radius {
            return Err(ConfigError::InvalidParameter {
                name:  "collision_radius",
                value: self.collision_radius,
            });
        }
        if let BoundaryPolicy::Reflect { restitution } = self.boundary {
            if !(0.0..=1.0).contains(&restitution) {
                return Err(ConfigError::InvalidParameter { name: "restitution", value: restitution });
            }
        }
        if !self.carry_offset.is_finite() {
            return Err(ConfigError::InvalidParameter {
                name:  "carry_offset",
                value: self.carry_offset.length(),
            });
        }
        Ok(())
    }
}

// ── BehaviorConfig ────────────────────────────────────────────────────────────

/// Decision-making parameters for the FSM behavior.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BehaviorConfig {
    /// Perception radius of an agent with zero awareness.
    pub perception_base: f32,
    /// Extra perception radius per awareness point.
    pub perception_per_awareness: f32,
    /// The possessor shoots when this close to the attacking goal.
    pub kick_range: f32,
    /// Maximum distance to a pass target.
    pub pass_range: f32,
    /// A pass target must be at least this much closer to goal than the
    /// possessor.
    pub pass_advantage: f32,
    /// Supporting agents aim this fraction of the way from ball to goal.
    pub support_fraction: f32,
    /// Positioning agents within this distance of home stand still.
    pub arrival_tolerance: f32,
    /// Kick speed (units / second) at zero kicking skill.
    pub kick_speed_base: f32,
    /// Additional kick speed per kicking point.
    pub kick_speed_per_skill: f32,
    /// Pass speed (units / second).
    pub pass_speed: f32,
    /// Largest angular error (radians) of a release at zero kicking skill.
    pub max_release_error: f32,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            perception_base:          10.0,
            perception_per_awareness: 2.0,
            kick_range:               20.0,
            pass_range:               20.0,
            pass_advantage:           10.0,
            support_fraction:         0.4,
            arrival_tolerance:        5.0,
            kick_speed_base:          10.0,
            kick_speed_per_skill:     1.0,
            pass_speed:               12.0,
            max_release_error:        0.25,
        }
    }
}

impl BehaviorConfig {
    /// Perception radius for an agent with the given awareness.
    #[inline]
    pub fn perception_radius(&self, awareness: f32) -> f32 {
        self.perception_base + self.perception_per_awareness * awareness
    }

    fn validate(&self) -> ConfigResult<()> {
        for (name, value) in [
            ("perception_base",          self.perception_base),
            ("perception_per_awareness", self.perception_per_awareness),
            ("kick_range",               self.kick_range),
            ("pass_range",               self.pass_range),
            ("pass_advantage",           self.pass_advantage),
            ("arrival_tolerance",        self.arrival_tolerance),
            ("kick_speed_base",          self.kick_speed_base),
            ("kick_speed_per_skill",     self.kick_speed_per_skill),
            ("pass_speed",               self.pass_speed),
            ("max_release_error",        self.max_release_error),
        ] {
            non_negative(name, value)?;
        }
        if !(0.0..=1.0).contains(&self.support_fraction) {
            return Err(ConfigError::InvalidParameter {
                name:  "support_fraction",
                value: self.support_fraction,
            });
        }
        Ok(())
    }
}

// ── MatchConfig ───────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MatchConfig {
    pub field:    FieldConfig,
    pub teams:    TeamConfig,
    pub physics:  PhysicsConfig,
    pub behavior: BehaviorConfig,

    /// Seconds of match time per tick.  Default: 0.1.
    pub tick_duration_secs: f32,

    /// Tick budget for `Sim::run`.  The core itself never stops on its own.
    pub total_ticks: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Worker thread count for the parallel decision phase.  `None` uses all
    /// logical cores.  Ignored without the `parallel` feature.
    pub num_threads: Option<usize>,

    /// Call `SimObserver::on_snapshot` every N ticks.  0 disables snapshots.
    pub output_interval_ticks: u64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            field:                 FieldConfig::default(),
            teams:                 TeamConfig::default(),
            physics:               PhysicsConfig::default(),
            behavior:              BehaviorConfig::default(),
            tick_duration_secs:    0.1,
            total_ticks:           600,
            seed:                  42,
            num_threads:           None,
            output_interval_ticks: 10,
        }
    }
}

impl MatchConfig {
    /// Check every section.  Returns the first problem found.
    pub fn validate(&self) -> ConfigResult<()> {
        self.field.build()?;
        self.teams.validate()?;
        self.physics.validate()?;
        self.behavior.validate()?;
        positive("tick_duration_secs", self.tick_duration_secs)?;
        Ok(())
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.tick_duration_secs)
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn non_negative(name: &'static str, value: f32) -> ConfigResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter { name, value })
    }
}

fn positive(name: &'static str, value: f32) -> ConfigResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter { name, value })
    }
}
