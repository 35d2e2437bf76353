//! Offline keyword matcher.
//!
//! Used only when no NLU credential is configured, so the app can be demoed
//! without network access. It knows a handful of phrases and nothing else.

use voicebook_core::intent::slot_keys;
use voicebook_core::{Intent, NluContext, NluResponse};

use crate::resolver::IntentResolver;

/// Ordered substring rules; the first rule that matches wins.
const RULES: &[(&[&str], Intent)] = &[
    (&["login"], Intent::Login),
    (&["signup"], Intent::Signup),
    (&["next"], Intent::NextPost),
    (&["back"], Intent::GoBack),
    (&["scroll up", "opore scroll"], Intent::ScrollUp),
    (&["scroll off", "stop scroll"], Intent::StopScroll),
    (&["scroll"], Intent::ScrollDown),
    (&["block"], Intent::BlockUser),
    (&["friends"], Intent::OpenFriendsPage),
    (&["messages"], Intent::OpenMessages),
    (&["my profile"], Intent::OpenProfile),
    (&["reward", "coin"], Intent::ClaimReward),
    (&["sponsor"], Intent::OpenSponsorCenter),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordIntentMatcher;

impl KeywordIntentMatcher {
    pub fn new() -> Self {
        Self
    }

    pub fn match_command(&self, transcript: &str) -> NluResponse {
        let lower = transcript.to_lowercase();

        let Some(intent) = RULES
            .iter()
            .find(|(phrases, _)| phrases.iter().any(|phrase| lower.contains(phrase)))
            .map(|(_, intent)| *intent)
        else {
            return NluResponse::unknown();
        };

        let response = NluResponse::new(intent);
        if intent == Intent::BlockUser {
            let target = lower.replacen("block", "", 1);
            let target = target.trim();
            if !target.is_empty() {
                return response.with_slot(slot_keys::TARGET_NAME, target);
            }
        }
        response
    }
}

#[async_trait::async_trait]
impl IntentResolver for KeywordIntentMatcher {
    async fn resolve(&self, transcript: &str, _context: &NluContext) -> NluResponse {
        let response = self.match_command(transcript);
        tracing::debug!("[KeywordMatcher] '{}' -> {}", transcript, response.intent);
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intent_of(text: &str) -> Intent {
        KeywordIntentMatcher::new().match_command(text).intent
    }

    #[test]
    fn test_common_phrases() {
        assert_eq!(intent_of("Login please"), Intent::Login);
        assert_eq!(intent_of("signup"), Intent::Signup);
        assert_eq!(intent_of("next post"), Intent::NextPost);
        assert_eq!(intent_of("go back"), Intent::GoBack);
        assert_eq!(intent_of("open my friends"), Intent::OpenFriendsPage);
        assert_eq!(intent_of("show messages"), Intent::OpenMessages);
        assert_eq!(intent_of("open my profile"), Intent::OpenProfile);
        assert_eq!(intent_of("claim my coin"), Intent::ClaimReward);
        assert_eq!(intent_of("sponsor center"), Intent::OpenSponsorCenter);
    }

    #[test]
    fn test_scroll_rule_order() {
        assert_eq!(intent_of("scroll up"), Intent::ScrollUp);
        assert_eq!(intent_of("opore scroll koro"), Intent::ScrollUp);
        assert_eq!(intent_of("scroll off"), Intent::StopScroll);
        assert_eq!(intent_of("stop scroll"), Intent::StopScroll);
        assert_eq!(intent_of("scroll"), Intent::ScrollDown);
        assert_eq!(intent_of("scroll down"), Intent::ScrollDown);
    }

    #[test]
    fn test_block_extracts_target() {
        let response = KeywordIntentMatcher::new().match_command("Block Rohan Mahmud");
        assert_eq!(response.intent, Intent::BlockUser);
        assert_eq!(response.slots.text(slot_keys::TARGET_NAME), Some("rohan mahmud"));

        let response = KeywordIntentMatcher::new().match_command("block");
        assert!(response.slots.is_empty());
    }

    #[test]
    fn test_unmatched_is_unknown() {
        assert!(KeywordIntentMatcher::new().match_command("like this post").is_unknown());
    }
}
