/*
[INPUT]:  Raw integer amounts and asset precisions
[OUTPUT]: Exact decimal amounts and price scale factors
[POS]:    Reconciliation layer - fixed-point conversion
[UPDATE]: When precision conventions change
*/

use rust_decimal::Decimal;

use crate::http::{BtsxError, Result};

/// Convert a raw integer amount into display units: `raw / precision`.
pub fn scale_amount(raw: i64, precision: u64) -> Result<Decimal> {
    if precision == 0 {
        return Err(BtsxError::InvalidResponse(
            "asset precision must be non-zero".to_string(),
        ));
    }
    Ok(Decimal::from(raw) / Decimal::from(precision))
}

/// Factor that brings a node ratio into caller price units.
///
/// A listed ratio multiplied by `base_precision / quote_precision` is comparable
/// with a human-readable price of the base asset in the quote asset.
pub fn price_scale(base_precision: u64, quote_precision: u64) -> Result<f64> {
    if base_precision == 0 || quote_precision == 0 {
        return Err(BtsxError::InvalidResponse(
            "asset precision must be non-zero".to_string(),
        ));
    }
    Ok(base_precision as f64 / quote_precision as f64)
}
