//! Goods-order placement, fulfillment, and expiration (§4.4, §4.1 step 5).

use cs_core::{Config, Phase};
use cs_world::{Location, OrderStatus, OrderType, Urgency, World};

use crate::transact::{good_size, wholesale_price};

/// Each phase, for every retail location and every configured good below
/// the restock floor with no existing pending order for that good, emit a
/// `goods` order against the nearest-by-id wholesaler with stock. Returns
/// the number of orders placed.
pub fn place_goods_orders(world: &mut World, config: &Config, phase: Phase) -> usize {
    let mut placed = 0;

    let retail_tag_locations: Vec<cs_core::LocationId> = world
        .locations
        .iter()
        .filter(|l| l.owner.is_some())
        .map(|l| l.id)
        .collect();

    let mut goods: Vec<String> = config.economy.goods.keys().cloned().collect();
    goods.sort();

    for shop_id in retail_tag_locations {
        let Some(buyer_org) = world.location(shop_id).owner else { continue };
        for good in &goods {
            let shop = world.location(shop_id);
            if shop.inventory_qty(good) >= config.thresholds.goods_order_stock_floor {
                continue;
            }
            let has_pending = world.orders.iter().any(|o| {
                o.order_type == OrderType::Goods
                    && o.status == OrderStatus::Pending
                    && o.delivery_location == shop_id
                    && o.good == *good
            });
            if has_pending {
                continue;
            }

            let Some(seller_id) = find_wholesaler(world, good) else { continue };
            let seller_org = world.location(seller_id).owner;

            let size = good_size(config, good);
            let shop = world.location(shop_id);
            let capacity_gap =
                ((shop.inventory_capacity - shop.inventory_used(|g| good_size(config, g))) / size)
                    .floor()
                    .max(0.0) as u32;
            let price = wholesale_price(config, good);
            let affordable = if price > 0.0 {
                (world.org(buyer_org).wallet / price).floor().max(0.0) as u32
            } else {
                u32::MAX
            };
            let qty = capacity_gap
                .min(affordable)
                .min(config.thresholds.goods_order_max_qty)
                .min(world.location(seller_id).inventory_qty(good));
            if qty == 0 {
                continue;
            }

            let total_price = qty as f64 * price;
            world.push_order(|id| cs_world::Order {
                id,
                order_type: OrderType::Goods,
                status: OrderStatus::Pending,
                good: good.clone(),
                quantity: qty,
                buyer_org,
                seller_org,
                pickup_location: seller_id,
                delivery_location: shop_id,
                payment: total_price,
                urgency: Urgency::Medium,
                parent_order_id: None,
                driver: None,
                vehicle: None,
                created_phase: phase,
            });
            placed += 1;
        }
    }
    placed
}

fn find_wholesaler(world: &World, good: &str) -> Option<cs_core::LocationId> {
    world
        .locations
        .iter()
        .filter(|l: &&Location| l.owner.is_some() && l.inventory_qty(good) > 0)
        .min_by_key(|l| l.id.0)
        .map(|l| l.id)
}

/// Advance every `pending` goods order (§4.1 step 5): if the seller now
/// holds enough stock, transition to `ready` and spawn the linked
/// logistics order; if stuck pending past the expiration window, cancel it
/// (§7 category 3 "Failed sellers").
pub fn sweep_goods_orders(world: &mut World, config: &Config, phase: Phase) {
    let pending_goods: Vec<cs_core::OrderId> = world
        .orders
        .iter()
        .filter(|o| o.order_type == OrderType::Goods && o.status == OrderStatus::Pending)
        .map(|o| o.id)
        .collect();

    for order_id in pending_goods {
        let order = world.order(order_id).clone();
        let stock = world.location(order.pickup_location).inventory_qty(&order.good);
        if stock >= order.quantity {
            world.order_mut(order_id).status = OrderStatus::Ready;
            let distance = cs_travel::location_distance(world, order.pickup_location, order.delivery_location);
            let payment = (order.quantity as f64 + (distance as f64 * 0.5).floor())
                .max(config.business.delivery_fee_min);
            world.push_order(|id| cs_world::Order {
                id,
                order_type: OrderType::Logistics,
                status: OrderStatus::Pending,
                good: order.good.clone(),
                quantity: order.quantity,
                buyer_org: order.buyer_org,
                seller_org: None,
                pickup_location: order.pickup_location,
                delivery_location: order.delivery_location,
                payment,
                urgency: Urgency::Medium,
                parent_order_id: Some(order.id),
                driver: None,
                vehicle: None,
                created_phase: phase,
            });
        } else if phase.since(order.created_phase) > config.thresholds.order_expiration_phases as u64 {
            world.order_mut(order_id).status = OrderStatus::Cancelled;
        }
    }
}

/// Cancel any order (goods or logistics) still `pending` past the
/// configured expiration window (§7 category 3).
pub fn expire_stale_orders(world: &mut World, config: &Config, phase: Phase) {
    for order in world.orders.iter_mut() {
        if order.status == OrderStatus::Pending
            && phase.since(order.created_phase) > config.thresholds.order_expiration_phases as u64
        {
            order.status = OrderStatus::Cancelled;
        }
    }
}

/// Fail an in-flight delivery (§4.3 `deliver_goods`'s
/// `failDeliveryWithParent`): the logistics order and its linked goods
/// parent (if any) both transition to `failed`.
pub fn fail_delivery_with_parent(world: &mut World, logistics_order: cs_core::OrderId) {
    let parent = world.order(logistics_order).parent_order_id;
    world.order_mut(logistics_order).status = OrderStatus::Failed;
    if let Some(parent_id) = parent {
        if !world.order(parent_id).is_terminal() {
            world.order_mut(parent_id).status = OrderStatus::Failed;
        }
    }
}
