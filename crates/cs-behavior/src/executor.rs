//! The executor trait and the registry of standard executors (§4.3).

use std::collections::HashMap;

use cs_core::{AgentRng, Config, Phase, StringInterner};
use cs_world::{AgentId, Task, World};

/// One step of a behavior's state machine.
///
/// `task` has already been detached from the agent (taken out of
/// `Agent::current_task`) before the scheduler calls this, so an
/// executor is free to hand `world` to the travel/economy helpers
/// without fighting the borrow checker over a task that otherwise lives
/// inside the very agent it's mutating. The scheduler re-attaches `task`
/// to the agent afterward unless this returns `true`.
pub trait Executor: Send + Sync {
    fn step(
        &self,
        world: &mut World,
        config: &Config,
        interner: &StringInterner,
        agent: AgentId,
        phase: Phase,
        rng: &mut AgentRng,
        task: &mut Task,
    ) -> bool;
}

/// Maps an executor-id string (a behavior definition's `executor` field)
/// to its implementation.
#[derive(Default)]
pub struct ExecutorRegistry {
    executors: HashMap<String, Box<dyn Executor>>,
}

impl ExecutorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, id: impl Into<String>, executor: Box<dyn Executor>) {
        self.executors.insert(id.into(), executor);
    }

    pub fn get(&self, id: &str) -> Option<&dyn Executor> {
        self.executors.get(id).map(|b| b.as_ref())
    }

    /// The full set of executors named in §4.3, registered under their
    /// spec ids.
    pub fn standard() -> Self {
        let mut reg = Self::new();
        reg.register("travel", Box::new(crate::executors::travel::Travel));
        reg.register("work", Box::new(crate::executors::work::Work));
        reg.register("rest", Box::new(crate::executors::rest::Rest));
        reg.register("purchase", Box::new(crate::executors::purchase::Purchase));
        reg.register("leisure", Box::new(crate::executors::leisure::Leisure));
        reg.register("seek_job", Box::new(crate::executors::seek_job::SeekJob));
        reg.register("seek_housing", Box::new(crate::executors::seek_housing::SeekHousing));
        reg.register("emergency_food", Box::new(crate::executors::emergency_food::EmergencyFood));
        reg.register("restock", Box::new(crate::executors::restock::Restock));
        reg.register("wander", Box::new(crate::executors::wander::Wander));
        reg.register("entrepreneur", Box::new(crate::executors::entrepreneur::Entrepreneur));
        reg.register(
            "purchase_orphaned",
            Box::new(crate::executors::purchase_orphaned::PurchaseOrphaned),
        );
        reg.register(
            "consume_luxury",
            Box::new(crate::executors::consume::ConsumeLuxury),
        );
        reg.register(
            "consume_entertainment",
            Box::new(crate::executors::consume::ConsumeEntertainment),
        );
        reg.register("relax_home", Box::new(crate::executors::consume::RelaxHome));
        reg.register("visit_pub", Box::new(crate::executors::visit_pub::VisitPub));
        reg.register(
            "deliver_goods",
            Box::new(crate::executors::deliver_goods::DeliverGoods),
        );
        reg.register(
            "collect_corpses",
            Box::new(crate::executors::collect_corpses::CollectCorpses),
        );
        reg
    }
}
