/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public BTSX wallet adapter crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod http;
pub mod reconcile;
pub mod types;

// Re-export commonly used types from http
pub use http::{
    BtsxClient,
    BtsxError,
    ClientConfig,
    RawResponse,
    Result,
    RpcCredentials,
};

// Re-export the order selection surface
pub use reconcile::{OrderSelector, PricePredicate, price_scale, scale_amount, select_orders};

// Re-export all types
pub use types::*;
