//! Intent domain module.
//!
//! # Module Structure
//!
//! - `model`: the closed intent vocabulary
//! - `slots`: named slot values attached to an intent
//! - `response`: the decoded `{ intent, slots }` object

mod model;
mod response;
mod slots;

// Re-export public API
pub use model::Intent;
pub use response::NluResponse;
pub use slots::{SlotValue, Slots, slot_keys};
