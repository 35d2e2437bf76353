//! Decoded NLU response.

use serde::{Deserialize, Serialize};

use super::model::Intent;
use super::slots::{SlotValue, Slots};

/// The `{ intent, slots? }` object returned by the NLU model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NluResponse {
    pub intent: Intent,
    #[serde(default, skip_serializing_if = "Slots::is_empty")]
    pub slots: Slots,
}

impl NluResponse {
    pub fn new(intent: Intent) -> Self {
        Self {
            intent,
            slots: Slots::new(),
        }
    }

    /// The response every failure path collapses to.
    pub fn unknown() -> Self {
        Self::new(Intent::Unknown)
    }

    pub fn with_slot(mut self, key: impl Into<String>, value: impl Into<SlotValue>) -> Self {
        self.slots.insert(key, value);
        self
    }

    pub fn is_unknown(&self) -> bool {
        self.intent == Intent::Unknown
    }
}
