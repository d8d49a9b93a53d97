//! `tj-behavior` — what an agent sees and what it decides.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                      |
//! |----------------|---------------------------------------------------------------|
//! | [`snapshot`]   | `Snapshot<'a>` (read-only tick view), `BallView`              |
//! | [`perception`] | `perceive` → `Perception` (ball + visible players)            |
//! | [`decision`]   | `Decision` (velocity, next state, optional ball release)      |
//! | [`model`]      | `BehaviorModel` trait                                         |
//! | [`fsm`]        | `FsmBehavior` — the four-state player machine                 |
//! | [`noop`]       | `NoopBehavior` — agents stand still and keep their state      |
//!
//! # Design notes
//!
//! The tick in tj-sim works in two phases:
//!
//! 1. **Decision phase** (parallel with tj-sim's `parallel` feature): every
//!    agent calls `BehaviorModel::decide` against the same `&Snapshot`.
//!    Nothing is mutated except the agent's own `AgentRng`.
//!
//! 2. **Apply phase** (sequential, ascending id): tj-sim consumes the
//!    collected `Vec<Decision>` and writes positions, states, ball and
//!    possession into the next world.
//!
//! Because decisions only read the snapshot, no agent can observe another
//! agent's post-tick position, and iteration order cannot leak into results.

pub mod decision;
pub mod fsm;
pub mod model;
pub mod noop;
pub mod perception;
pub mod snapshot;


pub use decision::Decision;
pub use fsm::FsmBehavior;
pub use model::BehaviorModel;
pub use noop::NoopBehavior;
pub use perception::{BallSight, Perception, perceive};
pub use snapshot::{BallView, Snapshot};
