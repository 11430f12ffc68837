//! Time deposits module - fixed-term deposit valuation.

mod deposits_calculator;

pub use deposits_calculator::*;

#[cfg(test)]
mod deposits_calculator_tests;
