//! Friend requests, search results and messaging from a profile.

use voicebook_core::intent::slot_keys;
use voicebook_core::social::{FriendRequestOutcome, User};
use voicebook_core::{Result, Slots};

use super::IntentDispatcher;
use crate::effect::{DispatchOutcome, Effect};
use crate::prompts;
use crate::screen::ScreenState;
use crate::session_state::SessionState;

impl IntentDispatcher {
    /// Sends a friend request to the profile's owner, or to a user listed on
    /// the friends page.
    pub(super) async fn add_friend(
        &self,
        state: &mut SessionState,
        slots: &Slots,
    ) -> Result<DispatchOutcome> {
        let target = match &state.screen {
            ScreenState::Profile(profile) => profile.user.clone(),
            ScreenState::Friends(friends) => {
                match listed_user(friends.active_list(), slots) {
                    Some(user) => user,
                    None => return Ok(DispatchOutcome::noop()),
                }
            }
            _ => return Ok(DispatchOutcome::noop()),
        };
        let Some(user_id) = state.user_id().map(str::to_string) else {
            return Ok(DispatchOutcome::noop());
        };
        if target.id == user_id {
            return Ok(DispatchOutcome::noop());
        }

        match self
            .repository
            .send_friend_request(&user_id, &target.id)
            .await?
        {
            FriendRequestOutcome::Sent(user) => {
                update_listed_user(state, &user);
                let status = prompts::friend_request_sent(&user.name);
                Ok(DispatchOutcome::new(Effect::FriendRequestSent(user)).with_status(status))
            }
            FriendRequestOutcome::RestrictedByPrivacy(user) => Ok(DispatchOutcome::noop_with(
                prompts::friend_request_privacy_block(&user.name),
            )),
        }
    }

    /// Opens a chat with the profile's owner.
    pub(super) fn send_message(&self, state: &mut SessionState) -> DispatchOutcome {
        let ScreenState::Profile(profile) = &state.screen else {
            return DispatchOutcome::noop();
        };
        let peer = profile.user.clone();
        self.open_chat_with(state, peer)
    }

    pub(super) async fn accept_request(
        &self,
        state: &mut SessionState,
        slots: &Slots,
    ) -> Result<DispatchOutcome> {
        let Some((user_id, requester)) = pending_requester(state, slots) else {
            return Ok(DispatchOutcome::noop());
        };

        let friend = self
            .repository
            .accept_friend_request(&user_id, &requester.id)
            .await?;
        self.refresh_friends_page(state).await?;

        let status = prompts::friend_request_accepted(&friend.name);
        Ok(DispatchOutcome::new(Effect::FriendRequestAccepted(friend)).with_status(status))
    }

    pub(super) async fn decline_request(
        &self,
        state: &mut SessionState,
        slots: &Slots,
    ) -> Result<DispatchOutcome> {
        let Some((user_id, requester)) = pending_requester(state, slots) else {
            return Ok(DispatchOutcome::noop());
        };

        let declined = self
            .repository
            .decline_friend_request(&user_id, &requester.id)
            .await?;
        self.refresh_friends_page(state).await?;

        let status = prompts::friend_request_declined(&declined.name);
        Ok(DispatchOutcome::new(Effect::FriendRequestDeclined(declined)).with_status(status))
    }

    /// Opens the profile of a search result. The index is 1-based, as spoken.
    pub(super) async fn select_result(
        &self,
        state: &mut SessionState,
        slots: &Slots,
    ) -> Result<DispatchOutcome> {
        let ScreenState::SearchResults(search) = &state.screen else {
            return Ok(DispatchOutcome::noop());
        };
        let selected = slots
            .index(slot_keys::INDEX)
            .and_then(|index| index.checked_sub(1))
            .and_then(|index| search.results.get(index))
            .cloned();

        match selected {
            Some(user) => self.show_profile(state, user).await,
            None => Ok(DispatchOutcome::noop()),
        }
    }

    async fn refresh_friends_page(&self, state: &mut SessionState) -> Result<()> {
        let ScreenState::Friends(current) = &state.screen else {
            return Ok(());
        };
        let tab = current.tab;
        if let Some(friends) = self.load_friends(state, tab).await? {
            state.replace(ScreenState::Friends(friends));
        }
        Ok(())
    }
}

/// The user on `users` whose name is exactly `target_name`.
fn listed_user(users: &[User], slots: &Slots) -> Option<User> {
    let target = slots.text(slot_keys::TARGET_NAME)?;
    users.iter().find(|user| user.name == target).cloned()
}

/// Resolves `target_name` against the friends page's active list, keeping it
/// only if that user has actually sent a request.
fn pending_requester(state: &SessionState, slots: &Slots) -> Option<(String, User)> {
    let ScreenState::Friends(friends) = &state.screen else {
        return None;
    };
    let user = listed_user(friends.active_list(), slots)?;
    if !friends.requests.iter().any(|request| request.id == user.id) {
        return None;
    }
    Some((state.user_id()?.to_string(), user))
}

/// Mirrors a changed friendship status onto whatever list shows the user.
fn update_listed_user(state: &mut SessionState, updated: &User) {
    match &mut state.screen {
        ScreenState::Profile(profile) if profile.user.id == updated.id => {
            profile.user.friendship_status = updated.friendship_status;
        }
        ScreenState::Friends(friends) => {
            for user in friends
                .suggestions
                .iter_mut()
                .chain(friends.friends.iter_mut())
                .filter(|user| user.id == updated.id)
            {
                user.friendship_status = updated.friendship_status;
            }
        }
        _ => {}
    }
}
