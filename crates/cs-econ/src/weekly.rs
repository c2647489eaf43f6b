//! The per-org weekly cycle (§4.4): payroll, dividend, rent, insolvency
//! check — triggered once per `phasesPerWeek` phases, staggered by each
//! org's `weekly_phase_offset` so the load doesn't land on every org at
//! once (§4.1 step 6).

use cs_core::{Config, Phase};
use cs_world::{helpers, OrgId, World};

use crate::transact::{pay_dividend, pay_rent, pay_salary};

/// What happened during one org's weekly cycle, for the caller to turn
/// into activity-log entries and metrics (§6).
#[derive(Debug, Default, Clone)]
pub struct WeeklyOutcome {
    pub salaries_paid: u32,
    pub employees_released: u32,
    pub dividend_paid: bool,
    pub rents_paid: u32,
    pub evictions: u32,
    pub dissolved: bool,
}

/// `true` on phases where `org`'s weekly cycle fires (§4.1 step 6).
pub fn is_weekly_cycle_phase(phase: Phase, config: &Config, org: &cs_world::Org) -> bool {
    (phase.0 % config.simulation.phases_per_week as u64) == org.weekly_phase_offset as u64
}

/// Run one org's weekly cycle. Operating costs are currently zero per the
/// config contract (§9 open question) — no transfer is made for them, only
/// payroll, dividend, rent, and the insolvency check.
pub fn run_weekly_cycle(world: &mut World, config: &Config, phase: Phase, org: OrgId) -> WeeklyOutcome {
    let mut outcome = WeeklyOutcome::default();

    // 2. Payroll — every employee of every owned location, in ID order.
    let mut employees: Vec<(cs_core::AgentId, f64)> = Vec::new();
    for &loc in &world.org(org).locations {
        for &agent in &world.location(loc).employees {
            employees.push((agent, world.agent(agent).employment.salary));
        }
    }
    employees.sort_unstable_by_key(|(a, _)| *a);
    for (agent, salary) in employees {
        if world.org(org).wallet + 1e-9 >= salary {
            if pay_salary(world, phase, org, agent, salary).is_ok() {
                outcome.salaries_paid += 1;
            }
        } else {
            helpers::clear_employment(world, agent);
            outcome.employees_released += 1;
            tracing::warn!(org = org.0, agent = agent.0, salary, "payroll shortfall, releasing employee");
        }
    }

    // 3. Owner dividend.
    let leader = world.org(org).leader;
    let dividend = config.thresholds.dividend_amount;
    if world.org(org).wallet + 1e-9 >= dividend && pay_dividend(world, phase, org, leader, dividend).is_ok() {
        outcome.dividend_paid = true;
    }

    // 4. Rent — every resident of every owned residential location, in ID order.
    let mut residents: Vec<(cs_core::AgentId, cs_core::LocationId, f64)> = Vec::new();
    for &loc in &world.org(org).locations {
        if let Some(residency) = world.location(loc).residency.as_ref() {
            for &agent in &residency.residents {
                residents.push((agent, loc, residency.rent_cost));
            }
        }
    }
    residents.sort_unstable_by_key(|(a, _, _)| *a);
    for (agent, loc, rent) in residents {
        if world.agent(agent).wallet + 1e-9 >= rent {
            if pay_rent(world, phase, agent, org, rent).is_ok() {
                outcome.rents_paid += 1;
            }
        } else {
            helpers::evict_resident(world, agent, loc);
            outcome.evictions += 1;
            tracing::warn!(org = org.0, agent = agent.0, rent, "rent shortfall, evicting resident");
        }
    }

    // 5. Insolvency check.
    if world.org(org).wallet < config.thresholds.insolvency_threshold {
        helpers::dissolve_org(world, org);
        outcome.dissolved = true;
        tracing::info!(org = org.0, "org dissolved: insolvent at weekly cycle");
    }

    outcome
}
