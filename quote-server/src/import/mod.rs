//! Vendor bill import
//!
//! Post-processes the text an extraction model returned for a vendor bill
//! into quote draft lines. The model call itself happens elsewhere.

mod planner;
mod sanitizer;

pub use planner::{ImportPlan, PlannedProduct, match_size, plan_import};
pub use sanitizer::{ExtractedItem, VendorExtraction, parse_extraction, sanitize_json};
