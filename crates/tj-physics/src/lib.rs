//! `tj-physics` — movement, the ball, and who holds it.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                     |
//! |----------------|--------------------------------------------------------------|
//! | [`movement`]   | `apply_move` — clamp, stamina drain, distance accounting     |
//! | [`ball`]       | `Ball` — free-ball integration and carry                     |
//! | [`possession`] | `PossessionArbiter`, `PossessionEvent`, `LossCause`          |
//! | [`error`]      | `PhysicsError`, `PhysicsResult<T>`                           |
//!
//! # Ball model
//!
//! A free ball moves by `velocity × dt`, is resolved against the field's
//! [`BoundaryPolicy`][tj_core::BoundaryPolicy], then loses speed by the
//! friction factor and snaps to rest below `stop_epsilon`.  A possessed
//! ball sits at the possessor's position plus a fixed carry offset.
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                     |
//! |-----------|------------------------------------------------------------|
//! | `fx-hash` | FxHash for the arbiter's contact map.                      |
//! | `serde`   | Derives `Serialize`/`Deserialize` on `Ball` and events.    |

pub mod ball;
pub mod error;
pub mod movement;
pub mod possession;

#[cfg(test)]
mod tests;

pub use ball::Ball;
pub use error::{PhysicsError, PhysicsResult};
pub use movement::apply_move;
pub use possession::{LossCause, PossessionArbiter, PossessionEvent};
