//! Named parameters attached to an intent.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Slot keys the NLU vocabulary uses.
pub mod slot_keys {
    pub const TARGET_NAME: &str = "target_name";
    pub const INDEX: &str = "index";
    pub const FIELD: &str = "field";
    pub const VALUE: &str = "value";
    pub const SETTING: &str = "setting";
    pub const THEME_NAME: &str = "theme_name";
    pub const PROMPT: &str = "prompt";
    pub const SPONSOR_NAME: &str = "sponsor_name";
    pub const CAPTION_TEXT: &str = "caption_text";
    pub const BUDGET_AMOUNT: &str = "budget_amount";
    pub const MEDIA_TYPE: &str = "media_type";
}

/// A single slot value as produced by the model.
///
/// Only strings and numbers are meaningful. Anything else is kept as
/// `Other` so one odd slot does not discard the whole response, but no
/// accessor ever hands it out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SlotValue {
    Text(String),
    Number(serde_json::Number),
    Other(serde_json::Value),
}

impl From<&str> for SlotValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for SlotValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<u64> for SlotValue {
    fn from(value: u64) -> Self {
        Self::Number(value.into())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Slots(BTreeMap<String, SlotValue>);

impl Slots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<SlotValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&SlotValue> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns a text slot, trimmed. Blank strings count as absent.
    pub fn text(&self, key: &str) -> Option<&str> {
        match self.0.get(key) {
            Some(SlotValue::Text(text)) => {
                let trimmed = text.trim();
                (!trimmed.is_empty()).then_some(trimmed)
            }
            _ => None,
        }
    }

    /// Returns a text or numeric slot rendered as a string.
    pub fn string(&self, key: &str) -> Option<String> {
        match self.0.get(key) {
            Some(SlotValue::Number(number)) => Some(number.to_string()),
            Some(SlotValue::Text(_)) => self.text(key).map(str::to_string),
            _ => None,
        }
    }

    /// Returns a non-negative integer slot, accepting `2` as well as `"2"`.
    pub fn index(&self, key: &str) -> Option<usize> {
        match self.0.get(key) {
            Some(SlotValue::Number(number)) => number.as_u64().map(|n| n as usize),
            Some(SlotValue::Text(text)) => text.trim().parse().ok(),
            _ => None,
        }
    }
}

impl<K: Into<String>, V: Into<SlotValue>> FromIterator<(K, V)> for Slots {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}
