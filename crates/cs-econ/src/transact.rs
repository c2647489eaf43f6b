//! The atomic money/goods transaction primitive (§4.4): every exchange in
//! the economy — retail sale, wholesale transfer, salary, dividend, rent,
//! delivery fee — funnels through [`transfer_credits`] and/or
//! [`move_goods`], and every successful transfer appends one
//! [`cs_world::Transaction`] to the world's history.

use std::collections::HashMap;

use cs_core::{Config, Phase};
use cs_world::{
    AgentId, EntityRef, LocationId, Transaction, TransactionKind, VehicleId, World,
};

use crate::{EconError, EconResult};

/// A good's configured price/size, defaulted for goods absent from
/// `economy.goods` (the config contract allows partial good lists; an
/// unconfigured good trades at zero price and the default size).
pub fn good_size(config: &Config, good: &str) -> f64 {
    config
        .economy
        .good(good)
        .map(|g| g.size)
        .unwrap_or(config.economy.default_goods_size)
}

pub fn retail_price(config: &Config, good: &str) -> f64 {
    config.economy.good(good).map(|g| g.retail_price).unwrap_or(0.0)
}

pub fn wholesale_price(config: &Config, good: &str) -> f64 {
    config.economy.good(good).map(|g| g.wholesale_price).unwrap_or(0.0)
}

fn wallet_value(world: &World, entity: EntityRef) -> Option<f64> {
    match entity {
        EntityRef::Agent(a) => Some(world.agent(a).wallet),
        EntityRef::Org(o) => Some(world.org(o).wallet),
        EntityRef::External => None,
    }
}

fn wallet_mut(world: &mut World, entity: EntityRef) -> Option<&mut f64> {
    match entity {
        EntityRef::Agent(a) => Some(&mut world.agent_mut(a).wallet),
        EntityRef::Org(o) => Some(&mut world.org_mut(o).wallet),
        EntityRef::External => None,
    }
}

/// Move `amount` credits from `from` to `to`, validating non-negativity and
/// sufficiency (unless `from` is [`EntityRef::External`], a money source
/// with no ledger balance of its own), then append the transaction record.
/// This is the one legal path for a wallet to change (§4.4).
#[allow(clippy::too_many_arguments)]
pub fn transfer_credits(
    world: &mut World,
    phase: Phase,
    kind: TransactionKind,
    from: EntityRef,
    to: EntityRef,
    amount: f64,
    location: Option<LocationId>,
    good: Option<String>,
) -> EconResult<()> {
    if let Some(available) = wallet_value(world, from) {
        if available + 1e-9 < amount {
            return Err(EconError::InsufficientFunds { required: amount, available });
        }
    }
    if let Some(w) = wallet_mut(world, from) {
        *w -= amount;
    }
    if let Some(w) = wallet_mut(world, to) {
        *w += amount;
    }
    world.transactions.push(Transaction { phase, kind, from, to, amount, location, good });
    Ok(())
}

/// Whoever holds the physical goods in a [`move_goods`] call.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GoodsHolder {
    Agent(AgentId),
    Location(LocationId),
    Vehicle(VehicleId),
}

fn goods_map<'w>(world: &'w World, holder: GoodsHolder) -> &'w HashMap<String, u32> {
    match holder {
        GoodsHolder::Agent(a) => &world.agent(a).inventory,
        GoodsHolder::Location(l) => &world.location(l).inventory,
        GoodsHolder::Vehicle(v) => &world.vehicle(v).cargo,
    }
}

fn goods_map_mut<'w>(world: &'w mut World, holder: GoodsHolder) -> &'w mut HashMap<String, u32> {
    match holder {
        GoodsHolder::Agent(a) => &mut world.agent_mut(a).inventory,
        GoodsHolder::Location(l) => &mut world.location_mut(l).inventory,
        GoodsHolder::Vehicle(v) => &mut world.vehicle_mut(v).cargo,
    }
}

fn goods_capacity(world: &World, holder: GoodsHolder) -> f64 {
    match holder {
        GoodsHolder::Agent(a) => world.agent(a).inventory_capacity,
        GoodsHolder::Location(l) => world.location(l).inventory_capacity,
        GoodsHolder::Vehicle(v) => world.vehicle(v).cargo_capacity,
    }
}

fn goods_used(world: &World, holder: GoodsHolder, size: impl Fn(&str) -> f64) -> f64 {
    goods_map(world, holder).iter().map(|(g, q)| *q as f64 * size(g)).sum()
}

/// Location of `holder`, used only for the `location` field of the
/// transaction-adjacent goods move (goods moves themselves are not
/// ledgered — only money is; see §3's Transaction record shape).
pub fn goods_qty(world: &World, holder: GoodsHolder, good: &str) -> u32 {
    goods_map(world, holder).get(good).copied().unwrap_or(0)
}

/// Move `qty` units of `good` from `from` to `to`, validating that `from`
/// holds enough and that `to` has capacity, then mutating both maps in one
/// step. This is the goods half of the atomic transaction helper (§4.4);
/// callers pair it with [`transfer_credits`] for the money half when a
/// trade involves both (retail sale, wholesale transfer, delivery legs).
pub fn move_goods(
    world: &mut World,
    config: &Config,
    good: &str,
    qty: u32,
    from: GoodsHolder,
    to: GoodsHolder,
) -> EconResult<()> {
    if qty == 0 {
        return Ok(());
    }
    let size = good_size(config, good);
    let available = goods_qty(world, from, good);
    if available < qty {
        let location = match from {
            GoodsHolder::Location(l) => l,
            _ => LocationId::INVALID,
        };
        return Err(EconError::InsufficientStock {
            good: good.to_string(),
            location,
            required: qty,
            available,
        });
    }
    let used_after = goods_used(world, to, |g| good_size(config, g)) + qty as f64 * size;
    let capacity = goods_capacity(world, to);
    if used_after > capacity + 1e-6 {
        return Err(EconError::CapacityExceeded { used: used_after, capacity });
    }

    {
        let map = goods_map_mut(world, from);
        let entry = map.entry(good.to_string()).or_insert(0);
        *entry -= qty;
        if *entry == 0 {
            map.remove(good);
        }
    }
    *goods_map_mut(world, to).entry(good.to_string()).or_insert(0) += qty;
    Ok(())
}

/// Retail sale (§4.3 `purchase`, §8 scenario 2): `agent` buys `qty` of
/// `good` from `shop`, owned by `seller_org`, at the configured retail
/// price. Credits move agent → org; goods move shop → agent.
pub fn retail_sale(
    world: &mut World,
    config: &Config,
    phase: Phase,
    agent: AgentId,
    shop: LocationId,
    seller_org: cs_world::OrgId,
    good: &str,
    qty: u32,
) -> EconResult<()> {
    let price = retail_price(config, good) * qty as f64;
    transfer_credits(
        world,
        phase,
        TransactionKind::Sale,
        EntityRef::Agent(agent),
        EntityRef::Org(seller_org),
        price,
        Some(shop),
        Some(good.to_string()),
    )?;
    move_goods(world, config, good, qty, GoodsHolder::Location(shop), GoodsHolder::Agent(agent))
}

/// Wholesale transfer (§4.3 `restock`): a shop-owning org buys `qty` of
/// `good` from a wholesaler location at the configured wholesale price.
#[allow(clippy::too_many_arguments)]
pub fn wholesale_transfer(
    world: &mut World,
    config: &Config,
    phase: Phase,
    buyer_org: cs_world::OrgId,
    buyer_location: LocationId,
    seller_org: cs_world::OrgId,
    seller_location: LocationId,
    good: &str,
    qty: u32,
) -> EconResult<()> {
    let price = wholesale_price(config, good) * qty as f64;
    transfer_credits(
        world,
        phase,
        TransactionKind::Wholesale,
        EntityRef::Org(buyer_org),
        EntityRef::Org(seller_org),
        price,
        Some(buyer_location),
        Some(good.to_string()),
    )?;
    move_goods(
        world,
        config,
        good,
        qty,
        GoodsHolder::Location(seller_location),
        GoodsHolder::Location(buyer_location),
    )
}

/// Weekly payroll leg (§4.4 step 2).
pub fn pay_salary(
    world: &mut World,
    phase: Phase,
    org: cs_world::OrgId,
    agent: AgentId,
    amount: f64,
) -> EconResult<()> {
    transfer_credits(
        world,
        phase,
        TransactionKind::Salary,
        EntityRef::Org(org),
        EntityRef::Agent(agent),
        amount,
        None,
        None,
    )
}

/// Weekly owner dividend (§4.4 step 3).
pub fn pay_dividend(
    world: &mut World,
    phase: Phase,
    org: cs_world::OrgId,
    leader: AgentId,
    amount: f64,
) -> EconResult<()> {
    transfer_credits(
        world,
        phase,
        TransactionKind::Dividend,
        EntityRef::Org(org),
        EntityRef::Agent(leader),
        amount,
        None,
        None,
    )
}

/// Weekly rent leg (§4.4 step 4).
pub fn pay_rent(
    world: &mut World,
    phase: Phase,
    resident: AgentId,
    landlord: cs_world::OrgId,
    amount: f64,
) -> EconResult<()> {
    transfer_credits(
        world,
        phase,
        TransactionKind::Rent,
        EntityRef::Agent(resident),
        EntityRef::Org(landlord),
        amount,
        None,
        None,
    )
}

/// Delivery fee, paid by the goods buyer to the logistics company on
/// unload (§4.3 `deliver_goods` state 6).
pub fn pay_delivery_fee(
    world: &mut World,
    phase: Phase,
    payer_org: cs_world::OrgId,
    logistics_org: cs_world::OrgId,
    amount: f64,
) -> EconResult<()> {
    transfer_credits(
        world,
        phase,
        TransactionKind::DeliveryFee,
        EntityRef::Org(payer_org),
        EntityRef::Org(logistics_org),
        amount,
        None,
        None,
    )
}

/// Goods-order settlement on parent completion (§4.3 `deliver_goods` state
/// 6): the buyer pays the wholesaler the order's total price.
pub fn settle_goods_order(
    world: &mut World,
    phase: Phase,
    buyer_org: cs_world::OrgId,
    seller_org: cs_world::OrgId,
    total_price: f64,
    good: &str,
) -> EconResult<()> {
    transfer_credits(
        world,
        phase,
        TransactionKind::Wholesale,
        EntityRef::Org(buyer_org),
        EntityRef::Org(seller_org),
        total_price,
        None,
        Some(good.to_string()),
    )
}
