//! Simulation observer trait for progress reporting and data collection.

use tj_core::Tick;

use crate::{TickOutcome, World};

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] and
/// [`Sim::run_ticks`][crate::Sim::run_ticks] at key points in the tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.  Observers see committed state only; a tick
/// that fails validation produces `on_tick_start` and nothing else.
///
/// # Example: possession printer
///
/// ```rust,ignore
/// struct PossessionPrinter;
///
/// impl SimObserver for PossessionPrinter {
///     fn on_tick_end(&mut self, outcome: &TickOutcome) {
///         if outcome.possession_changed() {
///             println!("tick {}: {:?}", outcome.tick, outcome.possessor);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once the tick has been committed.
    fn on_tick_end(&mut self, _outcome: &TickOutcome) {}

    /// Called at snapshot intervals (every `config.output_interval_ticks`
    /// committed ticks) with the world as it now stands.
    fn on_snapshot(&mut self, _world: &World) {}

    /// Called once after the final tick of [`Sim::run`][crate::Sim::run].
    fn on_sim_end(&mut self, _world: &World) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
