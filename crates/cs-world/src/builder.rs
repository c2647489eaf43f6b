//! Initial-snapshot validation (§3): the generator-produced world must
//! already satisfy every invariant before the first tick runs.

use cs_core::Config;

use crate::invariants::check_all;
use crate::{World, WorldError, WorldResult};

/// Validate `world` against every §3/§8 invariant. Returns a single
/// aggregated [`WorldError::InvariantViolation`] listing every failure
/// found, or `Ok(())` if the snapshot is clean — this is a startup-time
/// fatal check (§7 category 1), not the per-phase warning-tolerant pass.
pub fn validate_initial_snapshot(world: &World, config: &Config) -> WorldResult<()> {
    let violations = check_all(world, config);
    if violations.is_empty() {
        return Ok(());
    }
    let detail = violations
        .iter()
        .map(|v| format!("[{}] {}", v.rule, v.detail))
        .collect::<Vec<_>>()
        .join("; ");
    Err(WorldError::InvariantViolation(detail))
}
