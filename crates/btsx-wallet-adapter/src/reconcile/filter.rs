/*
[INPUT]:  Open orders for one market, a side, a price predicate, scale and precision
[OUTPUT]: Matching order ids (discovery order) and their summed balance
[POS]:    Reconciliation layer - stale order selection
[UPDATE]: When adding predicates or changing comparison semantics
*/

use serde::{Deserialize, Serialize};

use super::units::scale_amount;
use crate::http::{BtsxError, Result};
use crate::types::{OpenOrder, OrderMatches, Side};

/// Comparison applied to each order's scaled ratio
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PricePredicate {
    /// `scaled_ratio < price`
    Below { price: f64 },
    /// `|price - scaled_ratio| > tolerance`, strict
    OutOfRange { price: f64, tolerance: f64 },
}

impl PricePredicate {
    pub fn matches(&self, scaled_ratio: f64) -> bool {
        match *self {
            PricePredicate::Below { price } => scaled_ratio < price,
            PricePredicate::OutOfRange { price, tolerance } => {
                (price - scaled_ratio).abs() > tolerance
            }
        }
    }
}

/// Which orders to pick: one side plus a price predicate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrderSelector {
    pub side: Side,
    pub predicate: PricePredicate,
}

impl OrderSelector {
    pub fn bids_below(price: f64) -> Self {
        Self {
            side: Side::Bid,
            predicate: PricePredicate::Below { price },
        }
    }

    pub fn bids_out_of_range(price: f64, tolerance: f64) -> Self {
        Self {
            side: Side::Bid,
            predicate: PricePredicate::OutOfRange { price, tolerance },
        }
    }

    pub fn asks_out_of_range(price: f64, tolerance: f64) -> Self {
        Self {
            side: Side::Ask,
            predicate: PricePredicate::OutOfRange { price, tolerance },
        }
    }
}

/// Pick the orders the selector matches.
///
/// `price_scale` converts node ratios into caller price units and `precision`
/// is the divisor of the asset the selected side's balances are held in.
pub fn select_orders(
    orders: &[OpenOrder],
    selector: &OrderSelector,
    price_scale: f64,
    precision: u64,
) -> Result<OrderMatches> {
    let mut order_ids = Vec::new();
    let mut raw_total: i64 = 0;

    for open in orders {
        if !selector.side.matches(&open.order.kind) {
            continue;
        }
        let scaled = open.order.ratio() * price_scale;
        if !selector.predicate.matches(scaled) {
            continue;
        }
        raw_total = raw_total
            .checked_add(open.order.state.balance)
            .ok_or_else(|| {
                BtsxError::InvalidResponse("order balance total overflows i64".to_string())
            })?;
        order_ids.push(open.id.clone());
    }

    Ok(OrderMatches {
        order_ids,
        total_balance: scale_amount(raw_total, precision)?,
    })
}
