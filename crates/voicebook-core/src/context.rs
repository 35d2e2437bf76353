//! Contextual entity list passed along with a transcript.

use serde::{Deserialize, Serialize};

/// Display names visible on the active screen.
///
/// The model is asked to pick `target_name` values from this list verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NluContext {
    user_names: Vec<String>,
}

impl NluContext {
    /// Builds a context, dropping blank names and duplicates (first one wins).
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut context = Self::default();
        context.extend(names);
        context
    }

    /// Appends names that are not already present.
    pub fn extend<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            let name: String = name.into();
            let name = name.trim();
            if name.is_empty() || self.user_names.iter().any(|known| known == name) {
                continue;
            }
            self.user_names.push(name.to_string());
        }
    }

    pub fn user_names(&self) -> &[String] {
        &self.user_names
    }

    pub fn is_empty(&self) -> bool {
        self.user_names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_deduplicates_in_order() {
        let context = NluContext::new(["Sumi Ahmed", "Shojib Khan", "Sumi Ahmed", " ", "Rohan"]);
        assert_eq!(context.user_names(), &["Sumi Ahmed", "Shojib Khan", "Rohan"]);
    }

    #[test]
    fn test_extend_keeps_existing_entries() {
        let mut context = NluContext::new(["Sumi Ahmed"]);
        context.extend(vec!["Rohan Mahmud".to_string(), "Sumi Ahmed".to_string()]);
        assert_eq!(context.user_names(), &["Sumi Ahmed", "Rohan Mahmud"]);
    }

    #[test]
    fn test_default_is_empty() {
        assert!(NluContext::default().is_empty());
        assert!(!NluContext::new(["Shojib Khan"]).is_empty());
    }
}
