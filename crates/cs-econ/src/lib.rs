//! `cs-econ` — the atomic transaction primitive, the goods/logistics order
//! lifecycle, and the weekly org cycle (§4.4).
//!
//! Everything here operates on a `&mut cs_world::World` that the caller
//! (`cs-behavior`'s executors, `cs-sim`'s tick loop) already holds; this
//! crate owns no state of its own.

pub mod error;
pub mod orders;
pub mod transact;
pub mod weekly;

#[cfg(test)]
mod tests;

pub use error::{EconError, EconResult};
pub use orders::{expire_stale_orders, fail_delivery_with_parent, place_goods_orders, sweep_goods_orders};
pub use transact::{
    good_size, goods_qty, move_goods, pay_delivery_fee, pay_dividend, pay_rent, pay_salary,
    retail_price, retail_sale, settle_goods_order, transfer_credits, wholesale_price,
    wholesale_transfer, GoodsHolder,
};
pub use weekly::{is_weekly_cycle_phase, run_weekly_cycle, WeeklyOutcome};
