/*
[INPUT]:  Public API exports for btsx-mm-strategy crate
[OUTPUT]: Module declarations and public re-exports
[POS]:    Crate root - library entry point
[UPDATE]: When adding new modules or public exports
*/

pub mod config;
pub mod strategy;

// Re-export main types for convenience
pub use config::StrategyConfig;
pub use strategy::{CycleReport, MarketMaker, QuoteInputs, QuotePlan, plan_quotes, stale_selectors};
