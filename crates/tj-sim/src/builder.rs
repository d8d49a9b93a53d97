//! Fluent builder for constructing a [`Sim`].

use tj_agent::{AgentRngs, AgentStore};
use tj_behavior::BehaviorModel;
use tj_core::MatchConfig;

use crate::{Sim, SimResult, World, initialize};

/// Fluent builder for [`Sim<B>`].
///
/// # Required inputs
///
/// - [`MatchConfig`]: field, teams, physics, behavior, seed, tick budget
/// - `B: BehaviorModel`: usually [`tj_behavior::FsmBehavior`]
///
/// # Optional inputs
///
/// | Method               | Default                                        |
/// |----------------------|------------------------------------------------|
/// | `.agents(store, r)`  | Kickoff layout from `config.teams`             |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, FsmBehavior).build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<B: BehaviorModel> {
    config:   MatchConfig,
    agents:   Option<(AgentStore, AgentRngs)>,
    behavior: B,
}

impl<B: BehaviorModel> SimBuilder<B> {
    pub fn new(config: MatchConfig, behavior: B) -> Self {
        Self { config, agents: None, behavior }
    }

    /// Start from an explicit roster instead of the kickoff layout.
    ///
    /// Built with [`tj_agent::AgentStoreBuilder`]; `rngs` must hold one
    /// entry per agent.
    pub fn agents(mut self, store: AgentStore, rngs: AgentRngs) -> Self {
        self.agents = Some((store, rngs));
        self
    }

    /// Validate inputs, place the ball, and return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<B>> {
        let world = match self.agents {
            Some((store, rngs)) => World::from_parts(self.config, store, rngs)?,
            None => initialize(&self.config)?,
        };

        #[cfg(feature = "parallel")]
        let pool = match world.config.num_threads {
            Some(n) => Some(rayon::ThreadPoolBuilder::new().num_threads(n).build()?),
            None => None,
        };

        Ok(Sim {
            world,
            behavior: self.behavior,
            #[cfg(feature = "parallel")]
            pool,
        })
    }
}
