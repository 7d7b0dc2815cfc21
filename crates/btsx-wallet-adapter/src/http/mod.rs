/*
[INPUT]:  Wallet RPC configuration and method calls
[OUTPUT]: HTTP responses and typed wallet results
[POS]:    HTTP layer - JSON-RPC communication with the wallet daemon
[UPDATE]: When adding new RPC methods or changing client behavior
*/

pub mod chain;
pub mod client;
pub mod error;
pub mod market;
pub mod rpc;
pub mod wallet;

pub use error::{BtsxError, Result};
pub use rpc::RawResponse;

pub use client::{BtsxClient, ClientConfig, RpcCredentials};
