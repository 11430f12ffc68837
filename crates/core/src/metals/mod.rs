//! Precious metals module - purchase records and the metal calculation engine.

mod metals_calculator;
mod metals_model;

pub use metals_calculator::*;
pub use metals_model::{MetalLedger, MetalStats, MetalType, PreciousMetalRecord};
