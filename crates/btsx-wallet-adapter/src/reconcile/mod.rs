/*
[INPUT]:  Listed open orders, reference prices, asset precisions
[OUTPUT]: Stale-order selections and display-unit amounts
[POS]:    Reconciliation layer - pure order filtering and unit conversion
[UPDATE]: When selection predicates or scaling conventions change
*/

pub mod filter;
pub mod units;

pub use filter::{OrderSelector, PricePredicate, select_orders};
pub use units::{price_scale, scale_amount};
