//! Global intents: they work from any screen.

use voicebook_core::intent::slot_keys;
use voicebook_core::social::User;
use voicebook_core::{Result, Slots};

use super::IntentDispatcher;
use crate::effect::{DispatchOutcome, Effect, ScrollState};
use crate::prompts;
use crate::screen::{
    ChatState, FriendsState, FriendsTab, PostPlayback, ProfileDraft, ProfileState, RecordingState,
    Screen, ScreenState, SearchResultsState, SettingsState, SponsorCenterState,
};
use crate::session_state::SessionState;

impl IntentDispatcher {
    pub(super) fn go_back(&self, state: &mut SessionState) -> DispatchOutcome {
        match state.go_back() {
            Some(screen) => DispatchOutcome::new(Effect::WentBack(screen)),
            None => DispatchOutcome::noop(),
        }
    }

    pub(super) fn scroll(&self, state: &mut SessionState, scroll: ScrollState) -> DispatchOutcome {
        state.scroll = scroll;
        DispatchOutcome::new(Effect::Scrolled(scroll))
    }

    pub(super) async fn open_settings(&self, state: &mut SessionState) -> Result<DispatchOutcome> {
        if state.is_on(Screen::Settings) {
            return Ok(DispatchOutcome::noop());
        }
        let Some(user) = state.current_user.clone() else {
            return Ok(DispatchOutcome::noop());
        };

        let mut blocked_users = Vec::with_capacity(user.blocked_user_ids.len());
        for id in &user.blocked_user_ids {
            if let Some(blocked) = self.repository.get_user(id).await? {
                blocked_users.push(blocked);
            }
        }

        let screen = state.navigate(ScreenState::Settings(SettingsState {
            draft: ProfileDraft::from_user(&user),
            privacy: user.privacy_settings,
            blocked_users,
        }));
        Ok(DispatchOutcome::new(Effect::Navigated(screen)).with_status(prompts::SETTINGS_OPENED))
    }

    pub(super) fn open_sponsor_center(&self, state: &mut SessionState) -> DispatchOutcome {
        if state.is_on(Screen::SponsorCenter) {
            return DispatchOutcome::noop();
        }
        let screen = state.navigate(ScreenState::SponsorCenter(SponsorCenterState::default()));
        DispatchOutcome::new(Effect::Navigated(screen)).with_status(prompts::SPONSOR_CENTER_OPENED)
    }

    pub(super) async fn open_friends(
        &self,
        state: &mut SessionState,
        tab: FriendsTab,
    ) -> Result<DispatchOutcome> {
        if state.is_on(Screen::Friends) {
            return Ok(DispatchOutcome::noop());
        }
        let Some(friends) = self.load_friends(state, tab).await? else {
            return Ok(DispatchOutcome::noop());
        };

        let status = prompts::friends_loaded(friends.requests.len());
        let screen = state.navigate(ScreenState::Friends(friends));
        Ok(DispatchOutcome::new(Effect::Navigated(screen)).with_status(status))
    }

    /// Opens the friends page on the requests tab, or switches to that tab.
    pub(super) async fn open_friend_requests(
        &self,
        state: &mut SessionState,
    ) -> Result<DispatchOutcome> {
        if let ScreenState::Friends(friends) = &mut state.screen {
            if friends.tab == FriendsTab::Requests {
                return Ok(DispatchOutcome::noop());
            }
            friends.tab = FriendsTab::Requests;
            let status = prompts::friends_loaded(friends.requests.len());
            return Ok(DispatchOutcome::new(Effect::ScreenUpdated(Screen::Friends)).with_status(status));
        }
        self.open_friends(state, FriendsTab::Requests).await
    }

    /// Loads the three friend lists and refreshes the session's friends.
    pub(super) async fn load_friends(
        &self,
        state: &mut SessionState,
        tab: FriendsTab,
    ) -> Result<Option<FriendsState>> {
        let Some(user_id) = state.user_id().map(str::to_string) else {
            return Ok(None);
        };
        let requests = self.repository.friend_requests(&user_id).await?;
        let suggestions = self.repository.friend_suggestions(&user_id).await?;
        let friends = self.repository.friends_of(&user_id).await?;
        state.friends = friends.clone();

        Ok(Some(FriendsState {
            tab,
            requests,
            suggestions,
            friends,
        }))
    }

    pub(super) async fn open_conversations(
        &self,
        state: &mut SessionState,
    ) -> Result<DispatchOutcome> {
        if state.is_on(Screen::Conversations) {
            return Ok(DispatchOutcome::noop());
        }
        let Some(user_id) = state.user_id().map(str::to_string) else {
            return Ok(DispatchOutcome::noop());
        };

        let peers = self.repository.friends_of(&user_id).await?;
        state.friends = peers.clone();
        let status = if peers.is_empty() {
            prompts::NO_CONVERSATIONS.to_string()
        } else {
            prompts::conversations_loaded(peers.len())
        };
        let screen = state.navigate(ScreenState::Conversations(peers));
        Ok(DispatchOutcome::new(Effect::Navigated(screen)).with_status(status))
    }

    /// Opens a chat. On the conversations screen the name must be one of the
    /// listed peers; elsewhere it is looked up by fuzzy match.
    pub(super) async fn open_chat(
        &self,
        state: &mut SessionState,
        slots: &Slots,
    ) -> Result<DispatchOutcome> {
        let Some(target) = slots.text(slot_keys::TARGET_NAME) else {
            return Ok(DispatchOutcome::noop());
        };

        let peer = match &state.screen {
            ScreenState::Conversations(peers) => {
                match peers.iter().find(|peer| peer.name == target) {
                    Some(peer) => peer.clone(),
                    None => {
                        return Ok(DispatchOutcome::noop_with(prompts::conversation_not_found(
                            target,
                        )));
                    }
                }
            }
            _ => match self.repository.find_user_by_name(target).await? {
                Some(peer) => peer,
                None => return Ok(DispatchOutcome::noop_with(prompts::user_not_found(target))),
            },
        };
        Ok(self.open_chat_with(state, peer))
    }

    pub(super) fn open_chat_with(&self, state: &mut SessionState, peer: User) -> DispatchOutcome {
        if state.user_id() == Some(peer.id.as_str()) {
            return DispatchOutcome::noop();
        }
        let status = prompts::message_screen_loaded(&peer.name);
        let screen = state.navigate(ScreenState::Messages(ChatState {
            peer,
            recording: RecordingState::Idle,
            theme: Default::default(),
        }));
        DispatchOutcome::new(Effect::Navigated(screen)).with_status(status)
    }

    pub(super) async fn search_user(
        &self,
        state: &mut SessionState,
        slots: &Slots,
    ) -> Result<DispatchOutcome> {
        let Some(query) = slots.text(slot_keys::TARGET_NAME) else {
            return Ok(DispatchOutcome::noop());
        };

        let results = self.repository.search_users(query).await?;
        let status = prompts::search_results(query, results.len());
        let search = SearchResultsState {
            query: query.to_string(),
            results,
        };
        // A new search replaces the results screen instead of stacking on it
        let screen = if state.is_on(Screen::SearchResults) {
            state.replace(ScreenState::SearchResults(search))
        } else {
            state.navigate(ScreenState::SearchResults(search))
        };
        Ok(DispatchOutcome::new(Effect::Navigated(screen)).with_status(status))
    }

    /// Opens a profile.
    ///
    /// With a `target_name` the user is looked up by name. Without one, the
    /// feed opens the current post's author and other screens open the
    /// signed-in user's own profile.
    pub(super) async fn open_profile(
        &self,
        state: &mut SessionState,
        slots: &Slots,
    ) -> Result<DispatchOutcome> {
        if let Some(target) = slots.text(slot_keys::TARGET_NAME) {
            return match self.repository.find_user_by_name(target).await? {
                Some(user) => self.show_profile(state, user).await,
                None => Ok(DispatchOutcome::noop_with(prompts::user_not_found(target))),
            };
        }

        let user = match &state.screen {
            ScreenState::Feed(playback) => {
                let Some(post) = playback.current().filter(|post| !post.is_sponsored) else {
                    return Ok(DispatchOutcome::noop());
                };
                let author_id = post.author_id.clone();
                self.repository.get_user(&author_id).await?
            }
            _ => state.current_user.clone(),
        };
        match user {
            Some(user) => self.show_profile(state, user).await,
            None => Ok(DispatchOutcome::noop()),
        }
    }

    pub(super) async fn show_profile(
        &self,
        state: &mut SessionState,
        user: User,
    ) -> Result<DispatchOutcome> {
        if let ScreenState::Profile(profile) = &state.screen
            && profile.user.id == user.id
        {
            return Ok(DispatchOutcome::noop());
        }

        let posts = self.repository.posts_by(&user.id).await?;
        let status = prompts::profile_loaded(&user.name);
        let screen = state.navigate(ScreenState::Profile(ProfileState {
            user,
            playback: PostPlayback::starting_at_first(posts),
        }));
        Ok(DispatchOutcome::new(Effect::Navigated(screen)).with_status(status))
    }

    /// Blocks a user by name. On a profile without a name, the profile's
    /// owner is blocked.
    pub(super) async fn block_user(
        &self,
        state: &mut SessionState,
        slots: &Slots,
    ) -> Result<DispatchOutcome> {
        let target = match (slots.text(slot_keys::TARGET_NAME), &state.screen) {
            (Some(name), _) => match self.repository.find_user_by_name(name).await? {
                Some(user) => user,
                None => return Ok(DispatchOutcome::noop_with(prompts::user_not_found(name))),
            },
            (None, ScreenState::Profile(profile)) => profile.user.clone(),
            (None, ScreenState::Messages(chat)) => chat.peer.clone(),
            (None, _) => return Ok(DispatchOutcome::noop()),
        };

        let Some(user_id) = state.user_id().map(str::to_string) else {
            return Ok(DispatchOutcome::noop());
        };
        if target.id == user_id {
            return Ok(DispatchOutcome::noop());
        }

        let updated = self.repository.block_user(&user_id, &target.id).await?;
        state.current_user = Some(updated);
        state.friends.retain(|friend| friend.id != target.id);
        tracing::info!("[Dispatcher] Blocked user {}", target.id);

        let status = prompts::user_blocked(&target.name);
        // Nothing left to show on the blocked user's pages
        let leaving = match &state.screen {
            ScreenState::Profile(profile) => profile.user.id == target.id,
            ScreenState::Messages(chat) => chat.peer.id == target.id,
            _ => false,
        };
        if leaving {
            state.go_back();
        }
        Ok(DispatchOutcome::new(Effect::UserBlocked(target)).with_status(status))
    }

    /// Opens the create-post screen; on that screen it starts recording.
    pub(super) fn create_post(&self, state: &mut SessionState) -> DispatchOutcome {
        if let ScreenState::CreatePost(compose) = &mut state.screen {
            if compose.recording == RecordingState::Recording {
                return DispatchOutcome::noop();
            }
            compose.recording = RecordingState::Recording;
            return DispatchOutcome::new(Effect::ScreenUpdated(Screen::CreatePost))
                .with_status(prompts::RECORD_START);
        }

        let screen = state.navigate(ScreenState::CreatePost(Default::default()));
        DispatchOutcome::new(Effect::Navigated(screen)).with_status(prompts::CREATE_POST_PROMPT)
    }
}
