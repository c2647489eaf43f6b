//! Per-agent RNG storage, separated from `cs_world::World` (§4.1's
//! determinism contract: "one per-agent RNG stream mirroring the reference
//! workspace's `AgentRng`/`SimRng` split").
//!
//! Unlike the reference workspace's fixed-population `AgentRngs`, this
//! table grows as immigration injects fresh agent IDs mid-run; `get_mut`
//! lazily seeds a stream the first time an ID is seen, which also makes
//! the table trivially correct in tests that construct agents directly
//! rather than through a builder.

use cs_core::{AgentId, AgentRng};

pub struct AgentRngs {
    global_seed: u64,
    inner: Vec<Option<AgentRng>>,
}

impl AgentRngs {
    pub fn new(global_seed: u64) -> Self {
        Self { global_seed, inner: Vec::new() }
    }

    /// The (possibly newly seeded) RNG stream for `agent`.
    pub fn get_mut(&mut self, agent: AgentId) -> &mut AgentRng {
        let idx = agent.index();
        if self.inner.len() <= idx {
            self.inner.resize_with(idx + 1, || None);
        }
        self.inner[idx].get_or_insert_with(|| AgentRng::new(self.global_seed, agent))
    }
}
