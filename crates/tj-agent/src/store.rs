//! Core agent storage: `AgentStore` (SoA data) and `AgentRngs` (per-agent RNG).
//!
//! # Why two structs?
//!
//! The decision phase needs `&mut AgentRngs` (exclusive access to each
//! agent's RNG) while every agent reads the shared `&AgentStore` snapshot.
//! Keeping RNGs in their own struct lets `tj-sim` hand out both borrows at
//! once:
//!
//! ```ignore
//! // tj-sim decision phase (simplified):
//! let decisions = next.rngs.inner
//!     .par_iter_mut()
//!     .enumerate()
//!     .map(|(i, rng)| behavior.decide(AgentId(i as u32), &snapshot, rng))
//!     .collect::<Vec<_>>();
//! ```

use tj_core::{AgentId, AgentRng, PlayerState, Role, Team, Vec2};

// ── AgentRngs ─────────────────────────────────────────────────────────────────

/// Per-agent deterministic RNG state, separated from [`AgentStore`] so the
/// decision phase can borrow both at once.
///
/// Cloned with the world, so replaying a cloned world draws the same values.
#[derive(Clone, Debug, PartialEq)]
pub struct AgentRngs {
    pub inner: Vec<AgentRng>,
}

impl AgentRngs {
    /// Allocate and seed `count` per-agent RNGs from `global_seed`.
    pub fn new(count: usize, global_seed: u64) -> Self {
        let inner = (0..count as u32)
            .map(|i| AgentRng::new(global_seed, AgentId(i)))
            .collect();
        Self { inner }
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

// ── AgentStore ────────────────────────────────────────────────────────────────

/// Structure-of-Arrays storage for every player on the field.
///
/// Every `Vec` field has exactly `count` elements; the `AgentId` value is the
/// index into all of them:
///
/// ```ignore
/// let pos = store.position[agent.index()];
/// ```
///
/// Home-team agents occupy the low ids, so ascending-id iteration (the
/// tie-break order everywhere in the core) visits the home team first.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentStore {
    /// Number of agents.  Equals the length of every SoA `Vec`.
    pub count: usize,

    // ── Identity ──────────────────────────────────────────────────────────
    pub team: Vec<Team>,
    pub role: Vec<Role>,

    // ── Attributes (fixed after kickoff) ──────────────────────────────────
    /// Top speed at full stamina, units / second.
    pub speed:       Vec<f32>,
    /// Base strength, `0..=10`.
    pub strength:    Vec<f32>,
    pub max_stamina: Vec<f32>,
    /// Awareness, `0..=10`.  Drives the perception radius.
    pub awareness:   Vec<f32>,
    /// Kicking skill, `0..=10`.  Drives release power and accuracy.
    pub kicking:     Vec<f32>,
    /// Positioning anchor.
    pub home:        Vec<Vec2>,

    // ── Dynamic state ─────────────────────────────────────────────────────
    /// Current stamina in `[0, max_stamina]`.
    pub stamina:  Vec<f32>,
    pub position: Vec<Vec2>,
    /// Velocity actually applied during the last tick.
    pub velocity: Vec<Vec2>,
    pub state:    Vec<PlayerState>,
    /// Cumulative distance covered since kickoff.
    pub distance: Vec<f32>,
}

impl AgentStore {
    /// `true` if there are no agents.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Iterator over all `AgentId`s in ascending index order.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        (0..self.count as u32).map(AgentId)
    }

    /// Agents of `team`, ascending id.
    pub fn team_ids(&self, team: Team) -> impl Iterator<Item = AgentId> + '_ {
        self.agent_ids().filter(move |a| self.team[a.index()] == team)
    }

    /// `stamina / max_stamina`, in `[0, 1]`.
    #[inline]
    pub fn stamina_fraction(&self, agent: AgentId) -> f32 {
        let i = agent.index();
        if self.max_stamina[i] > 0.0 {
            (self.stamina[i] / self.max_stamina[i]).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Stamina-scaled top speed.  Zero when exhausted, never above `speed`.
    #[inline]
    pub fn effective_speed(&self, agent: AgentId) -> f32 {
        self.speed[agent.index()] * self.stamina_fraction(agent)
    }

    /// Strength used in ball contests: half of it is always available, the
    /// other half scales with stamina.
    #[inline]
    pub fn effective_strength(&self, agent: AgentId) -> f32 {
        self.strength[agent.index()] * (0.5 + 0.5 * self.stamina_fraction(agent))
    }

    // ── Package-private constructor used by AgentStoreBuilder ─────────────

    pub(crate) fn with_capacity(count: usize) -> Self {
        Self {
            count:       0,
            team:        Vec::with_capacity(count),
            role:        Vec::with_capacity(count),
            speed:       Vec::with_capacity(count),
            strength:    Vec::with_capacity(count),
            max_stamina: Vec::with_capacity(count),
            awareness:   Vec::with_capacity(count),
            kicking:     Vec::with_capacity(count),
            home:        Vec::with_capacity(count),
            stamina:     Vec::with_capacity(count),
            position:    Vec::with_capacity(count),
            velocity:    Vec::with_capacity(count),
            state:       Vec::with_capacity(count),
            distance:    Vec::with_capacity(count),
        }
    }
}
