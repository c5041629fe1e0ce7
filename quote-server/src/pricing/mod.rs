//! Pricing & Conversion Engine
//!
//! Pure, synchronous computations over brand/profile snapshots. Nothing in
//! this module touches storage.

mod item_calculator;
mod quote_calculator;
pub mod resolver;

pub use item_calculator::*;
pub use quote_calculator::*;
pub use resolver::{PricingContext, ResolvedWeights, WeightRow};
