//! Settings screen: the profile draft, privacy and blocked users.

use voicebook_core::intent::slot_keys;
use voicebook_core::social::{PrivacyUpdate, ProfileField, ProfileUpdate, RelationshipStatus};
use voicebook_core::{Result, Slots};

use super::IntentDispatcher;
use crate::effect::{DispatchOutcome, Effect};
use crate::prompts;
use crate::screen::{ProfileDraft, Screen, ScreenState, SettingsState};
use crate::session_state::SessionState;

fn settings_mut(state: &mut SessionState) -> Option<&mut SettingsState> {
    match &mut state.screen {
        ScreenState::Settings(settings) => Some(settings),
        _ => None,
    }
}

impl IntentDispatcher {
    /// Edits one field of the draft. Unknown fields and relationship
    /// statuses outside the fixed list are ignored.
    pub(super) fn update_profile_field(
        &self,
        state: &mut SessionState,
        slots: &Slots,
    ) -> DispatchOutcome {
        let Some(settings) = settings_mut(state) else {
            return DispatchOutcome::noop();
        };
        let Some(field) = slots
            .text(slot_keys::FIELD)
            .and_then(|field| field.parse::<ProfileField>().ok())
        else {
            return DispatchOutcome::noop();
        };
        let Some(value) = slots.text(slot_keys::VALUE) else {
            return DispatchOutcome::noop();
        };

        let draft = &mut settings.draft;
        let value = match field {
            ProfileField::RelationshipStatus => match RelationshipStatus::from_spoken(value) {
                Some(status) => status.to_string(),
                None => return DispatchOutcome::noop(),
            },
            _ => value.to_string(),
        };
        let target = match field {
            ProfileField::Name => &mut draft.name,
            ProfileField::Bio => &mut draft.bio,
            ProfileField::Work => &mut draft.work,
            ProfileField::Education => &mut draft.education,
            ProfileField::Hometown => &mut draft.hometown,
            ProfileField::CurrentCity => &mut draft.current_city,
            ProfileField::RelationshipStatus => &mut draft.relationship_status,
        };
        let status = prompts::profile_field_updated(&field.to_string(), &value);
        *target = value;
        DispatchOutcome::new(Effect::ScreenUpdated(Screen::Settings)).with_status(status)
    }

    /// Changes a privacy setting in the draft after checking the value
    /// belongs to that setting.
    pub(super) fn update_privacy(&self, state: &mut SessionState, slots: &Slots) -> DispatchOutcome {
        let Some(settings) = settings_mut(state) else {
            return DispatchOutcome::noop();
        };
        let update = match (slots.text(slot_keys::SETTING), slots.text(slot_keys::VALUE)) {
            (Some(setting), Some(value)) => PrivacyUpdate::parse(setting, value),
            _ => None,
        };
        let Some(update) = update else {
            return DispatchOutcome::noop();
        };

        update.apply(&mut settings.privacy);
        DispatchOutcome::new(Effect::ScreenUpdated(Screen::Settings)).with_status(
            prompts::privacy_setting_updated(update.label(), &update.value_label()),
        )
    }

    pub(super) async fn save_settings(&self, state: &mut SessionState) -> Result<DispatchOutcome> {
        let Some(settings) = settings_mut(state) else {
            return Ok(DispatchOutcome::noop());
        };
        let update = profile_update(settings);
        let Some(user_id) = state.user_id().map(str::to_string) else {
            return Ok(DispatchOutcome::noop());
        };

        let user = self.repository.update_profile(&user_id, update).await?;
        if let Some(settings) = settings_mut(state) {
            settings.draft = ProfileDraft::from_user(&user);
            settings.privacy = user.privacy_settings;
        }
        state.current_user = Some(user.clone());
        tracing::info!("[Dispatcher] Saved settings for {}", user.id);
        Ok(DispatchOutcome::new(Effect::ProfileSaved(user)).with_status(prompts::SETTINGS_SAVED))
    }

    /// Unblocks one of the users listed on the settings screen.
    pub(super) async fn unblock_user(
        &self,
        state: &mut SessionState,
        slots: &Slots,
    ) -> Result<DispatchOutcome> {
        let Some(settings) = settings_mut(state) else {
            return Ok(DispatchOutcome::noop());
        };
        let Some(target_name) = slots.text(slot_keys::TARGET_NAME) else {
            return Ok(DispatchOutcome::noop());
        };
        let Some(target) = settings
            .blocked_users
            .iter()
            .find(|user| user.name.eq_ignore_ascii_case(target_name))
            .cloned()
        else {
            return Ok(DispatchOutcome::noop_with(prompts::user_not_found(target_name)));
        };
        let Some(user_id) = state.user_id().map(str::to_string) else {
            return Ok(DispatchOutcome::noop());
        };

        let user = self.repository.unblock_user(&user_id, &target.id).await?;
        if let Some(settings) = settings_mut(state) {
            settings.blocked_users.retain(|blocked| blocked.id != target.id);
        }
        state.current_user = Some(user);

        let status = prompts::user_unblocked(&target.name);
        Ok(DispatchOutcome::new(Effect::UserUnblocked(target)).with_status(status))
    }
}

fn profile_update(settings: &SettingsState) -> ProfileUpdate {
    let draft = &settings.draft;
    let mut fields = vec![
        (ProfileField::Name, draft.name.clone()),
        (ProfileField::Bio, draft.bio.clone()),
        (ProfileField::Work, draft.work.clone()),
        (ProfileField::Education, draft.education.clone()),
        (ProfileField::Hometown, draft.hometown.clone()),
        (ProfileField::CurrentCity, draft.current_city.clone()),
    ];
    if !draft.relationship_status.is_empty() {
        fields.push((
            ProfileField::RelationshipStatus,
            draft.relationship_status.clone(),
        ));
    }
    ProfileUpdate {
        fields,
        privacy_settings: Some(settings.privacy),
    }
}
