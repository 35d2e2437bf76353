//! Feed, profile and post-detail intents.

use voicebook_core::intent::slot_keys;
use voicebook_core::social::Post;
use voicebook_core::{Result, Slots};

use super::IntentDispatcher;
use crate::effect::{DispatchOutcome, Effect};
use crate::prompts;
use crate::screen::{
    CreateCommentState, PostDetailState, PostPlayback, RecordingState, Screen, ScreenState,
};
use crate::session_state::SessionState;

/// The playback list of the feed or a profile, whichever is active.
fn playback_mut(state: &mut SessionState) -> Option<(Screen, &mut PostPlayback)> {
    match &mut state.screen {
        ScreenState::Feed(playback) => Some((Screen::Feed, playback)),
        ScreenState::Profile(profile) => Some((Screen::Profile, &mut profile.playback)),
        _ => None,
    }
}

fn playback(state: &SessionState) -> Option<&PostPlayback> {
    match &state.screen {
        ScreenState::Feed(playback) => Some(playback),
        ScreenState::Profile(profile) => Some(&profile.playback),
        _ => None,
    }
}

/// The selected post, unless it is an ad.
fn current_organic_post(state: &SessionState) -> Option<&Post> {
    playback(state)?.current().filter(|post| !post.is_sponsored)
}

impl IntentDispatcher {
    pub(super) fn next_post(&self, state: &mut SessionState) -> DispatchOutcome {
        let Some((screen, playback)) = playback_mut(state) else {
            return DispatchOutcome::noop();
        };
        match playback.next() {
            Some(_) => DispatchOutcome::new(Effect::ScreenUpdated(screen)),
            None => DispatchOutcome::noop(),
        }
    }

    pub(super) fn previous_post(&self, state: &mut SessionState) -> DispatchOutcome {
        let Some((screen, playback)) = playback_mut(state) else {
            return DispatchOutcome::noop();
        };
        match playback.previous() {
            Some(_) => DispatchOutcome::new(Effect::ScreenUpdated(screen)),
            None => DispatchOutcome::noop(),
        }
    }

    pub(super) fn play_post(&self, state: &mut SessionState) -> DispatchOutcome {
        let Some((screen, playback)) = playback_mut(state) else {
            return DispatchOutcome::noop();
        };
        if playback.play() {
            DispatchOutcome::new(Effect::ScreenUpdated(screen))
        } else if screen == Screen::Feed {
            DispatchOutcome::noop_with(prompts::FEED_EMPTY)
        } else {
            DispatchOutcome::noop()
        }
    }

    pub(super) fn pause_post(&self, state: &mut SessionState) -> DispatchOutcome {
        match playback_mut(state) {
            Some((screen, playback)) if playback.is_playing => {
                playback.is_playing = false;
                DispatchOutcome::new(Effect::ScreenUpdated(screen))
            }
            _ => DispatchOutcome::noop(),
        }
    }

    /// Likes the selected post, or the post being viewed in detail.
    /// Sponsored posts cannot be liked.
    pub(super) async fn like(&self, state: &mut SessionState) -> Result<DispatchOutcome> {
        let post_id = match &state.screen {
            ScreenState::PostDetails(detail) if !detail.post.is_sponsored => detail.post.id.clone(),
            _ => match current_organic_post(state) {
                Some(post) => post.id.clone(),
                None => return Ok(DispatchOutcome::noop()),
            },
        };
        let Some(user_id) = state.user_id().map(str::to_string) else {
            return Ok(DispatchOutcome::noop());
        };

        let post = self.repository.like_post(&post_id, &user_id).await?;
        if let ScreenState::PostDetails(detail) = &mut state.screen {
            detail.post = post.clone();
        } else if let Some((_, playback)) = playback_mut(state) {
            playback.replace(post.clone());
        }
        Ok(DispatchOutcome::new(Effect::PostLiked(post)).with_status(prompts::LIKE_SUCCESS))
    }

    /// On the feed or a profile, opens the selected post's comments; on the
    /// post details screen, starts recording a comment.
    pub(super) fn comment(&self, state: &mut SessionState) -> DispatchOutcome {
        if let ScreenState::PostDetails(detail) = &state.screen {
            let post = detail.post.clone();
            let screen = state.navigate(ScreenState::CreateComment(CreateCommentState {
                post,
                recording: RecordingState::Recording,
            }));
            return DispatchOutcome::new(Effect::Navigated(screen))
                .with_status(prompts::COMMENT_RECORD_START);
        }
        self.view_comments(state)
    }

    pub(super) fn view_comments(&self, state: &mut SessionState) -> DispatchOutcome {
        match current_organic_post(state).cloned() {
            Some(post) => self.show_post_details(state, post),
            None => DispatchOutcome::noop(),
        }
    }

    /// Opens the first organic post in the feed written by `target_name`.
    /// The name must match an author exactly.
    pub(super) fn view_comments_by_author(
        &self,
        state: &mut SessionState,
        slots: &Slots,
    ) -> DispatchOutcome {
        let ScreenState::Feed(playback) = &state.screen else {
            return DispatchOutcome::noop();
        };
        let Some(target) = slots.text(slot_keys::TARGET_NAME) else {
            return DispatchOutcome::noop();
        };

        let found = playback
            .posts
            .iter()
            .find(|post| !post.is_sponsored && post.author_name == target)
            .cloned();
        match found {
            Some(post) => self.show_post_details(state, post),
            None => DispatchOutcome::noop_with(prompts::no_post_by(target)),
        }
    }

    /// Plays the first comment whose author name contains `target_name`.
    pub(super) fn play_comment_by_author(
        &self,
        state: &mut SessionState,
        slots: &Slots,
    ) -> DispatchOutcome {
        let ScreenState::PostDetails(detail) = &mut state.screen else {
            return DispatchOutcome::noop();
        };
        let Some(target) = slots.text(slot_keys::TARGET_NAME) else {
            return DispatchOutcome::noop();
        };

        let needle = target.to_lowercase();
        let Some(comment) = detail
            .post
            .comments
            .iter()
            .find(|comment| comment.author_name.to_lowercase().contains(&needle))
        else {
            return DispatchOutcome::noop_with(prompts::no_comments_from(target));
        };

        let status = prompts::playing_comment_from(&comment.author_name);
        detail.playing_comment_id = Some(comment.id.clone());
        DispatchOutcome::new(Effect::ScreenUpdated(Screen::PostDetails)).with_status(status)
    }

    fn show_post_details(&self, state: &mut SessionState, post: Post) -> DispatchOutcome {
        let status = prompts::post_details_loaded(post.display_name(), post.comments.len());
        let screen = state.navigate(ScreenState::PostDetails(PostDetailState {
            post,
            playing_comment_id: None,
        }));
        DispatchOutcome::new(Effect::Navigated(screen)).with_status(status)
    }
}
