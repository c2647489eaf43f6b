//! Fluent construction of a [`Sim`] from the pieces a generator produces:
//! a validated initial [`World`], a pre-populated [`StringInterner`], and
//! the declarative [`BehaviorRegistry`].

use cs_core::{Config, StringInterner};
use cs_world::World;

use crate::error::{SimError, SimResult};
use crate::sim::Sim;

/// Builds a [`Sim`], validating the initial snapshot before it ever sees a
/// tick (§7 category 1: a bad snapshot is a startup-fatal error, not a
/// per-phase one).
pub struct SimBuilder {
    config: Config,
    world: World,
    interner: StringInterner,
    behaviors: Option<cs_behavior::BehaviorRegistry>,
    seed: u64,
}

impl SimBuilder {
    pub fn new(config: Config, world: World, interner: StringInterner) -> Self {
        Self { config, world, interner, behaviors: None, seed: 0 }
    }

    pub fn behaviors(mut self, behaviors: cs_behavior::BehaviorRegistry) -> Self {
        self.behaviors = Some(behaviors);
        self
    }

    /// The global seed every `AgentRng`/`SimRng` stream derives from.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn build(self) -> SimResult<Sim> {
        cs_world::validate_initial_snapshot(&self.world, &self.config)?;

        let behaviors = self
            .behaviors
            .ok_or_else(|| SimError::Config("no BehaviorRegistry supplied".to_string()))?;

        Ok(Sim::new(self.config, behaviors, self.interner, self.world, self.seed))
    }
}
