//! Hooks the tick loop fires into, so that `cs-output` can drive logging
//! and metrics without `cs-sim` knowing anything about CSVs or `tracing`
//! subscribers.

use cs_core::Phase;
use cs_econ::WeeklyOutcome;
use cs_world::{AgentId, OrgId, World};

/// All methods default to no-ops; implementors override only the events
/// they care about.
pub trait SimObserver {
    fn on_phase_start(&mut self, _phase: Phase, _world: &World) {}
    fn on_phase_end(&mut self, _phase: Phase, _world: &World) {}
    fn on_death(&mut self, _phase: Phase, _agent: AgentId, _world: &World) {}
    fn on_org_dissolved(&mut self, _phase: Phase, _org: OrgId, _reason: &str) {}
    fn on_weekly_cycle(&mut self, _phase: Phase, _org: OrgId, _outcome: &WeeklyOutcome) {}
    fn on_immigrant(&mut self, _phase: Phase, _agent: AgentId) {}
    fn on_sim_end(&mut self, _final_phase: Phase, _world: &World) {}
}

/// The default observer: records nothing, costs nothing.
#[derive(Default)]
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
