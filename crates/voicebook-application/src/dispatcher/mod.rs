//! Intent dispatch.
//!
//! Maps a decoded [`NluResponse`] onto exactly one [`Effect`] against the
//! session's active screen.
//!
//! # Module Structure
//!
//! - `auth`: login and signup, driven by the raw transcript
//! - `navigation`: global intents that open screens, search or block from anywhere
//! - `posts`: feed/profile playback, likes and comments
//! - `social`: friend requests, search results and chatting from a profile
//! - `settings`: profile and privacy drafts
//! - `compose`: the voice recorder on post, comment and chat screens
//! - `sponsor`: the campaign draft in the sponsor center

mod auth;
mod compose;
mod navigation;
mod posts;
mod settings;
mod social;
mod sponsor;

use std::sync::Arc;

use voicebook_core::{Intent, NluResponse, Result, SocialRepository};

use crate::effect::{DispatchOutcome, Effect, ScrollState};
use crate::prompts;
use crate::screen::{FriendsTab, Screen};
use crate::session_state::SessionState;

/// Routes intents to their handlers.
///
/// Global intents are tried first; screen intents only run while their
/// screen is active and are a no-op everywhere else. Slot values are
/// validated here before anything is applied.
pub struct IntentDispatcher {
    repository: Arc<dyn SocialRepository>,
}

impl IntentDispatcher {
    pub fn new(repository: Arc<dyn SocialRepository>) -> Self {
        Self { repository }
    }

    /// Applies one decoded intent to the session.
    ///
    /// Unmet preconditions (no signed-in user, empty feed, wrong recorder
    /// state, a target outside the screen's list) yield [`Effect::NoOp`].
    /// Errors are repository failures only.
    pub async fn dispatch(
        &self,
        response: &NluResponse,
        state: &mut SessionState,
    ) -> Result<DispatchOutcome> {
        let intent = response.intent;
        let slots = &response.slots;
        tracing::debug!(
            "[Dispatcher] {} on {} screen",
            intent,
            state.current_screen()
        );

        if state.current_user.is_none() || state.is_on(Screen::Auth) {
            let outcome = if intent == Intent::Help {
                DispatchOutcome::announce(prompts::HELP)
            } else if intent == Intent::Unknown {
                DispatchOutcome::noop_with(prompts::NOT_UNDERSTOOD)
            } else {
                DispatchOutcome::noop_with(prompts::NOT_SIGNED_IN)
            };
            return Ok(outcome);
        }

        let outcome = match intent {
            // Signing in goes through `dispatch_auth`
            Intent::Signup | Intent::Login => DispatchOutcome::noop(),

            // Global
            Intent::GoBack => self.go_back(state),
            Intent::OpenSettings | Intent::EditProfile => self.open_settings(state).await?,
            Intent::OpenSponsorCenter => self.open_sponsor_center(state),
            Intent::OpenFriendsPage => self.open_friends(state, FriendsTab::Requests).await?,
            Intent::OpenFriendRequests => self.open_friend_requests(state).await?,
            Intent::OpenMessages => self.open_conversations(state).await?,
            Intent::OpenChat => self.open_chat(state, slots).await?,
            Intent::SearchUser => self.search_user(state, slots).await?,
            Intent::OpenProfile => self.open_profile(state, slots).await?,
            Intent::BlockUser => self.block_user(state, slots).await?,
            Intent::CreatePost => self.create_post(state),
            Intent::ScrollUp => self.scroll(state, ScrollState::Up),
            Intent::ScrollDown => self.scroll(state, ScrollState::Down),
            Intent::StopScroll => self.scroll(state, ScrollState::Stopped),
            Intent::ClaimReward => DispatchOutcome::announce(prompts::CLAIM_REWARD),
            Intent::Help => DispatchOutcome::announce(prompts::HELP),

            // Feed, profile and post details
            Intent::NextPost => self.next_post(state),
            Intent::PreviousPost => self.previous_post(state),
            Intent::PlayPost => self.play_post(state),
            Intent::PausePost => self.pause_post(state),
            Intent::Like => self.like(state).await?,
            Intent::Comment => self.comment(state),
            Intent::ViewComments => self.view_comments(state),
            Intent::ViewCommentsByAuthor => self.view_comments_by_author(state, slots),
            Intent::PlayCommentByAuthor => self.play_comment_by_author(state, slots),

            // Profile, friends and search results
            Intent::AddFriend => self.add_friend(state, slots).await?,
            Intent::SendMessage => self.send_message(state),
            Intent::AcceptRequest => self.accept_request(state, slots).await?,
            Intent::DeclineRequest => self.decline_request(state, slots).await?,
            Intent::SelectResult => self.select_result(state, slots).await?,

            // Settings
            Intent::UpdateProfile => self.update_profile_field(state, slots),
            Intent::UpdatePrivacy => self.update_privacy(state, slots),
            Intent::SaveSettings => self.save_settings(state).await?,
            Intent::UnblockUser => self.unblock_user(state, slots).await?,

            // Recorder
            Intent::StopRecording => self.stop_recording(state),
            Intent::ReRecord => self.re_record(state),
            Intent::PostConfirm => self.publish_post(state).await?,
            Intent::PostComment => self.publish_comment(state).await?,
            Intent::GenerateImage => self.generate_image(state, slots),
            Intent::ClearImage => self.clear_image(state),
            Intent::RecordMessage => self.record_message(state),
            Intent::SendChatMessage => self.send_chat_message(state),
            Intent::ChangeChatTheme => self.change_chat_theme(state, slots),
            Intent::DeleteChat => self.delete_chat(state),

            // Sponsor center
            Intent::CreateCampaign => self.show_campaign_form(state),
            Intent::ViewCampaignDashboard => self.show_campaign_dashboard(state),
            Intent::SetSponsorName => self.set_sponsor_name(state, slots),
            Intent::SetCampaignCaption => self.set_campaign_caption(state, slots),
            Intent::SetCampaignBudget => self.set_campaign_budget(state, slots),
            Intent::SetMediaType => self.set_media_type(state, slots),
            Intent::LaunchCampaign => self.launch_campaign(state),

            // Recognised but not voice-controlled
            Intent::Share | Intent::ChangeAvatar => DispatchOutcome::noop(),

            Intent::Unknown => DispatchOutcome::noop_with(prompts::NOT_UNDERSTOOD),
        };

        if outcome.effect.is_noop() {
            tracing::debug!("[Dispatcher] {} had no effect", intent);
        } else {
            tracing::info!("[Dispatcher] {} -> {}", intent, effect_label(&outcome.effect));
        }
        Ok(outcome)
    }
}

fn effect_label(effect: &Effect) -> String {
    match effect {
        Effect::Navigated(screen) => format!("navigated to {screen}"),
        Effect::WentBack(screen) => format!("back to {screen}"),
        Effect::ScreenUpdated(screen) => format!("{screen} updated"),
        Effect::Scrolled(scroll) => format!("scroll {scroll:?}"),
        Effect::SignedIn(user)
        | Effect::FriendRequestSent(user)
        | Effect::FriendRequestAccepted(user)
        | Effect::FriendRequestDeclined(user)
        | Effect::UserBlocked(user)
        | Effect::UserUnblocked(user)
        | Effect::ProfileSaved(user) => format!("user {}", user.id),
        Effect::PostLiked(post) | Effect::PostPublished(post) | Effect::CommentPosted(post) => {
            format!("post {}", post.id)
        }
        Effect::Announced => "announced".to_string(),
        Effect::NoOp => "no-op".to_string(),
    }
}
