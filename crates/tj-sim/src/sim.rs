//! The `Sim` struct and its run loop.

use tracing::{debug, info};

use tj_behavior::BehaviorModel;
use tj_core::Tick;

use crate::{
    MatchStatistics, RenderView, SimObserver, SimResult, TickOutcome, World, advance,
    snapshot_for_rendering,
};

/// Owns a [`World`] and a behavior model and drives them tick by tick.
///
/// Every tick goes through [`advance`], so a `Sim` is never left half-way
/// through a tick: if a step fails, `world` still holds the last committed
/// state and the caller may inspect, patch, or abandon it.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<B: BehaviorModel> {
    /// The last committed state.
    pub world: World,

    /// The behavior model.  Called once per agent per tick.
    pub behavior: B,

    /// Dedicated decision-phase pool when `config.num_threads` is set.
    #[cfg(feature = "parallel")]
    pub(crate) pool: Option<rayon::ThreadPool>,
}

impl<B: BehaviorModel> Sim<B> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Advance one tick and commit it.
    pub fn step(&mut self) -> SimResult<TickOutcome> {
        let dt = self.world.config.tick_duration_secs;

        #[cfg(feature = "parallel")]
        let (next, outcome) = match &self.pool {
            Some(pool) => pool.install(|| advance(&self.world, &self.behavior, dt))?,
            None => advance(&self.world, &self.behavior, dt)?,
        };
        #[cfg(not(feature = "parallel"))]
        let (next, outcome) = advance(&self.world, &self.behavior, dt)?;

        self.world = next;
        Ok(outcome)
    }

    /// Run until the clock reaches `config.total_ticks`, then call
    /// `on_sim_end`.
    ///
    /// Use [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let end = Tick(self.world.config.total_ticks);
        info!(
            agents = self.world.agents.count,
            start = %self.world.tick(),
            %end,
            "match started"
        );
        while self.world.tick() < end {
            self.observed_step(observer)?;
        }
        observer.on_sim_end(&self.world);

        let stats = &self.world.stats;
        info!(
            ticks = stats.ticks,
            home_possession = stats.possession_ticks[0],
            away_possession = stats.possession_ticks[1],
            changes = stats.possession_changes,
            "match finished"
        );
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores
    /// `total_ticks`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.observed_step(observer)?;
        }
        Ok(())
    }

    /// Running statistics for the match so far.
    pub fn statistics(&self) -> &MatchStatistics {
        &self.world.stats
    }

    /// Owned render view of the committed world.
    pub fn render_view(&self) -> RenderView {
        snapshot_for_rendering(&self.world)
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn observed_step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        observer.on_tick_start(self.world.tick());
        let outcome = self.step()?;
        if outcome.possession_changed() {
            debug!(tick = %outcome.tick, possessor = ?outcome.possessor, "possession changed");
        }
        observer.on_tick_end(&outcome);

        let interval = self.world.config.output_interval_ticks;
        if interval > 0 && self.world.tick().0.is_multiple_of(interval) {
            observer.on_snapshot(&self.world);
        }
        Ok(())
    }
}
