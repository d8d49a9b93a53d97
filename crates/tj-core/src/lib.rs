//! `tj-core` — foundational types for the Tjostball simulation core.
//!
//! This crate is a dependency of every other `tj-*` crate.  It has no `tj-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`ids`]     | `AgentId`                                                 |
//! | [`geo`]     | `Vec2`, `Field`, `BoundaryPolicy`                         |
//! | [`team`]    | `Team` (home / away)                                      |
//! | [`role`]    | `Role` enum (Front Fighter, Heavy Hitter, …)              |
//! | [`state`]   | `PlayerState` FSM states                                  |
//! | [`time`]    | `Tick`, `SimClock`                                        |
//! | [`rng`]     | `AgentRng` (per-agent), `SimRng` (global)                 |
//! | [`config`]  | `MatchConfig` and its sections, with validated defaults   |
//! | [`error`]   | `ConfigError`, `ConfigResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |
//!           | Required to load a `MatchConfig` from JSON.                |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod role;
pub mod state;
pub mod team;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{
    BehaviorConfig, FieldConfig, MatchConfig, PhysicsConfig, RoleAttributes, TeamConfig,
};
pub use error::{ConfigError, ConfigResult};
pub use geo::{BoundaryPolicy, Field, Vec2};
pub use ids::AgentId;
pub use rng::{AgentRng, SimRng};
pub use role::Role;
pub use state::PlayerState;
pub use team::Team;
pub use time::{SimClock, Tick};
