//! Sponsor center: the campaign draft.

use voicebook_core::intent::slot_keys;
use voicebook_core::social::MediaType;
use voicebook_core::Slots;

use super::IntentDispatcher;
use crate::effect::{DispatchOutcome, Effect};
use crate::prompts;
use crate::screen::{CampaignDraft, Screen, ScreenState, SponsorCenterState, SponsorTab};
use crate::session_state::SessionState;

fn sponsor_mut(state: &mut SessionState) -> Option<&mut SponsorCenterState> {
    match &mut state.screen {
        ScreenState::SponsorCenter(sponsor) => Some(sponsor),
        _ => None,
    }
}

fn updated(status: impl Into<String>) -> DispatchOutcome {
    DispatchOutcome::new(Effect::ScreenUpdated(Screen::SponsorCenter)).with_status(status)
}

/// Spoken budgets like "5,000 taka" keep only their digits.
fn budget_digits(spoken: &str) -> String {
    spoken.chars().filter(char::is_ascii_digit).collect()
}

impl IntentDispatcher {
    pub(super) fn show_campaign_form(&self, state: &mut SessionState) -> DispatchOutcome {
        self.switch_sponsor_tab(state, SponsorTab::CreateCampaign, prompts::CAMPAIGN_FORM_OPENED)
    }

    pub(super) fn show_campaign_dashboard(&self, state: &mut SessionState) -> DispatchOutcome {
        self.switch_sponsor_tab(
            state,
            SponsorTab::Dashboard,
            prompts::CAMPAIGN_DASHBOARD_OPENED,
        )
    }

    fn switch_sponsor_tab(
        &self,
        state: &mut SessionState,
        tab: SponsorTab,
        status: &str,
    ) -> DispatchOutcome {
        let Some(sponsor) = sponsor_mut(state) else {
            return DispatchOutcome::noop();
        };
        sponsor.tab = tab;
        updated(status)
    }

    pub(super) fn set_sponsor_name(&self, state: &mut SessionState, slots: &Slots) -> DispatchOutcome {
        self.edit_campaign(state, slots, slot_keys::SPONSOR_NAME, "sponsor name", |draft, value| {
            draft.sponsor_name = value.to_string();
        })
    }

    pub(super) fn set_campaign_caption(
        &self,
        state: &mut SessionState,
        slots: &Slots,
    ) -> DispatchOutcome {
        self.edit_campaign(state, slots, slot_keys::CAPTION_TEXT, "caption", |draft, value| {
            draft.caption = value.to_string();
        })
    }

    fn edit_campaign(
        &self,
        state: &mut SessionState,
        slots: &Slots,
        key: &str,
        label: &str,
        apply: impl FnOnce(&mut CampaignDraft, &str),
    ) -> DispatchOutcome {
        let Some(sponsor) = sponsor_mut(state) else {
            return DispatchOutcome::noop();
        };
        let Some(value) = slots.text(key) else {
            return DispatchOutcome::noop();
        };

        apply(&mut sponsor.campaign, value);
        updated(prompts::campaign_field_set(label, value))
    }

    pub(super) fn set_campaign_budget(
        &self,
        state: &mut SessionState,
        slots: &Slots,
    ) -> DispatchOutcome {
        let Some(sponsor) = sponsor_mut(state) else {
            return DispatchOutcome::noop();
        };
        let budget = slots
            .string(slot_keys::BUDGET_AMOUNT)
            .map(|spoken| budget_digits(&spoken))
            .unwrap_or_default();
        if budget.is_empty() {
            return DispatchOutcome::noop();
        }

        let status = prompts::budget_set(&budget);
        sponsor.campaign.budget = budget;
        updated(status)
    }

    pub(super) fn set_media_type(&self, state: &mut SessionState, slots: &Slots) -> DispatchOutcome {
        let Some(sponsor) = sponsor_mut(state) else {
            return DispatchOutcome::noop();
        };
        let Some(media_type) = slots
            .text(slot_keys::MEDIA_TYPE)
            .and_then(|value| value.to_lowercase().parse::<MediaType>().ok())
        else {
            return DispatchOutcome::noop();
        };

        sponsor.campaign.media_type = Some(media_type);
        updated(prompts::campaign_field_set("media type", &media_type.to_string()))
    }

    /// Requests a launch once the draft has a sponsor name, caption and budget.
    pub(super) fn launch_campaign(&self, state: &mut SessionState) -> DispatchOutcome {
        let Some(sponsor) = sponsor_mut(state) else {
            return DispatchOutcome::noop();
        };
        if let Some(field) = sponsor.campaign.missing_field() {
            return DispatchOutcome::noop_with(prompts::campaign_missing(field));
        }

        sponsor.campaign.launch_requested = true;
        tracing::info!(
            "[Dispatcher] Campaign launch requested for {}",
            sponsor.campaign.sponsor_name
        );
        updated(prompts::CAMPAIGN_LAUNCHING)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_digits() {
        assert_eq!(budget_digits("5,000 taka"), "5000");
        assert_eq!(budget_digits("৳ 1500"), "1500");
        assert_eq!(budget_digits("a lot"), "");
    }
}
