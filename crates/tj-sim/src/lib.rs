//! `tj-sim` — tick scheduler and run loop for the Tjostball core.
//!
//! # One tick
//!
//! ```text
//! advance(world, behavior, dt):
//!   ① Snapshot  — freeze agent + ball state, bulk-load the neighbour index.
//!   ② Decide    — BehaviorModel::decide for every agent against the
//!                 snapshot (parallel with the `parallel` feature).
//!   ③ Apply     — ascending AgentId: move (clamp, stamina, distance),
//!                 switch FSM state, honour the possessor's release.
//!   ④ Ball      — integrate a free ball, carry a held one.
//!   ⑤ Arbitrate — contest, strip, capture.
//!   ⑥ Commit    — validate invariants, record statistics.
//! ```
//!
//! All writes go to a copy of the world.  If validation fails the copy is
//! dropped and the caller's world is untouched.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`world`]    | `World`, `initialize`                                     |
//! | [`step`]     | `advance`                                                 |
//! | [`event`]    | `SimEvent`, `TickOutcome`                                 |
//! | [`stats`]    | `MatchStatistics`, `statistics`                           |
//! | [`view`]     | `RenderView`, `snapshot_for_rendering`                    |
//! | [`observer`] | `SimObserver`, `NoopObserver`                             |
//! | [`sim`]      | `Sim` — owns a world and drives it                        |
//! | [`builder`]  | `SimBuilder`                                              |
//! | [`error`]    | `SimError`, `SimResult<T>`                                |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the decision phase on Rayon's thread pool.        |
//! | `fx-hash`  | FxHash for the possession contact map.                 |
//! | `serde`    | Derives `Serialize` on views, events and statistics.   |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use tj_behavior::FsmBehavior;
//! use tj_core::MatchConfig;
//! use tj_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(MatchConfig::default(), FsmBehavior).build()?;
//! sim.run(&mut NoopObserver)?;
//! println!("{:?}", sim.statistics().possession_ticks);
//! ```

pub mod builder;
pub mod error;
pub mod event;
pub mod observer;
pub mod sim;
pub mod stats;
pub mod step;
pub mod view;
pub mod world;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use event::{SimEvent, TickOutcome};
pub use observer::{NoopObserver, SimObserver};
pub use sim::Sim;
pub use stats::{MatchStatistics, statistics};
pub use step::advance;
pub use view::{AgentView, RenderView, snapshot_for_rendering};
pub use world::{World, initialize};
