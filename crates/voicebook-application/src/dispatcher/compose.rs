//! The voice recorder on the create-post, create-comment and chat screens.

use voicebook_core::intent::slot_keys;
use voicebook_core::social::ChatTheme;
use voicebook_core::{Result, Slots};

use super::IntentDispatcher;
use crate::effect::{DispatchOutcome, Effect};
use crate::prompts;
use crate::screen::{RecordingState, Screen, ScreenState};
use crate::session_state::SessionState;

fn recorder_mut(state: &mut SessionState) -> Option<(Screen, &mut RecordingState)> {
    match &mut state.screen {
        ScreenState::CreatePost(compose) => Some((Screen::CreatePost, &mut compose.recording)),
        ScreenState::CreateComment(compose) => {
            Some((Screen::CreateComment, &mut compose.recording))
        }
        ScreenState::Messages(chat) => Some((Screen::Messages, &mut chat.recording)),
        _ => None,
    }
}

/// Moves the recorder from `from` to `to`, or reports that it was elsewhere.
fn transition(
    state: &mut SessionState,
    from: RecordingState,
    to: RecordingState,
) -> Option<Screen> {
    let (screen, recording) = recorder_mut(state)?;
    if *recording != from {
        return None;
    }
    *recording = to;
    Some(screen)
}

impl IntentDispatcher {
    pub(super) fn stop_recording(&self, state: &mut SessionState) -> DispatchOutcome {
        let Some(screen) = transition(state, RecordingState::Recording, RecordingState::Preview)
        else {
            return DispatchOutcome::noop();
        };
        let status = match screen {
            Screen::CreateComment => prompts::COMMENT_STOPPED,
            Screen::Messages => prompts::MESSAGE_RECORD_STOPPED,
            _ => prompts::RECORD_STOPPED,
        };
        DispatchOutcome::new(Effect::ScreenUpdated(screen)).with_status(status)
    }

    pub(super) fn re_record(&self, state: &mut SessionState) -> DispatchOutcome {
        let Some(screen) = transition(state, RecordingState::Preview, RecordingState::Recording)
        else {
            return DispatchOutcome::noop();
        };
        DispatchOutcome::new(Effect::ScreenUpdated(screen)).with_status(record_start(screen))
    }

    pub(super) fn record_message(&self, state: &mut SessionState) -> DispatchOutcome {
        if !state.is_on(Screen::Messages) {
            return DispatchOutcome::noop();
        }
        match transition(state, RecordingState::Idle, RecordingState::Recording) {
            Some(screen) => {
                DispatchOutcome::new(Effect::ScreenUpdated(screen)).with_status(record_start(screen))
            }
            None => DispatchOutcome::noop(),
        }
    }

    pub(super) fn send_chat_message(&self, state: &mut SessionState) -> DispatchOutcome {
        if !state.is_on(Screen::Messages) {
            return DispatchOutcome::noop();
        }
        match transition(state, RecordingState::Preview, RecordingState::Idle) {
            Some(screen) => {
                DispatchOutcome::new(Effect::ScreenUpdated(screen)).with_status(prompts::MESSAGE_SENT)
            }
            None => DispatchOutcome::noop(),
        }
    }

    /// Applies a theme from the fixed theme table; other names are ignored.
    pub(super) fn change_chat_theme(
        &self,
        state: &mut SessionState,
        slots: &Slots,
    ) -> DispatchOutcome {
        let ScreenState::Messages(chat) = &mut state.screen else {
            return DispatchOutcome::noop();
        };
        let Some(theme) = slots
            .text(slot_keys::THEME_NAME)
            .and_then(|name| name.to_lowercase().parse::<ChatTheme>().ok())
        else {
            return DispatchOutcome::noop();
        };

        chat.theme = theme;
        DispatchOutcome::new(Effect::ScreenUpdated(Screen::Messages))
            .with_status(prompts::chat_theme_changed(theme.display_name()))
    }

    pub(super) fn delete_chat(&self, state: &mut SessionState) -> DispatchOutcome {
        if !state.is_on(Screen::Messages) {
            return DispatchOutcome::noop();
        }
        match state.go_back() {
            Some(screen) => {
                DispatchOutcome::new(Effect::WentBack(screen)).with_status(prompts::CHAT_DELETED)
            }
            None => DispatchOutcome::announce(prompts::CHAT_DELETED),
        }
    }

    pub(super) fn generate_image(&self, state: &mut SessionState, slots: &Slots) -> DispatchOutcome {
        let ScreenState::CreatePost(compose) = &mut state.screen else {
            return DispatchOutcome::noop();
        };
        let Some(prompt) = slots.text(slot_keys::PROMPT) else {
            return DispatchOutcome::noop();
        };

        compose.image_prompt = Some(prompt.to_string());
        DispatchOutcome::new(Effect::ScreenUpdated(Screen::CreatePost))
            .with_status(prompts::image_prompt_set(prompt))
    }

    pub(super) fn clear_image(&self, state: &mut SessionState) -> DispatchOutcome {
        match &mut state.screen {
            ScreenState::CreatePost(compose) if compose.image_prompt.is_some() => {
                compose.image_prompt = None;
                DispatchOutcome::new(Effect::ScreenUpdated(Screen::CreatePost))
                    .with_status(prompts::IMAGE_CLEARED)
            }
            _ => DispatchOutcome::noop(),
        }
    }

    /// Publishes the recorded post (or the generated image) and returns to
    /// the previous screen, putting the post at the top of the feed.
    pub(super) async fn publish_post(&self, state: &mut SessionState) -> Result<DispatchOutcome> {
        let Some(user_id) = state.user_id().map(str::to_string) else {
            return Ok(DispatchOutcome::noop());
        };
        let ScreenState::CreatePost(compose) = &mut state.screen else {
            return Ok(DispatchOutcome::noop());
        };
        let ready = compose.recording == RecordingState::Preview
            || (compose.recording == RecordingState::Idle && compose.image_prompt.is_some());
        if !ready {
            return Ok(DispatchOutcome::noop_with(prompts::NOTHING_TO_POST));
        }
        let previous = std::mem::replace(&mut compose.recording, RecordingState::Uploading);
        let image_prompt = compose.image_prompt.clone();

        let created = self
            .repository
            .create_post(&user_id, "", image_prompt.as_deref())
            .await;
        let post = match created {
            Ok(post) => post,
            Err(err) => {
                if let ScreenState::CreatePost(compose) = &mut state.screen {
                    compose.recording = previous;
                }
                return Err(err);
            }
        };
        tracing::info!("[Dispatcher] Published post {}", post.id);

        if let ScreenState::CreatePost(compose) = &mut state.screen {
            compose.recording = RecordingState::Posted;
        }
        state.go_back();
        if let ScreenState::Feed(playback) = &mut state.screen {
            playback.posts.insert(0, post.clone());
            playback.current_index = None;
        }
        Ok(DispatchOutcome::new(Effect::PostPublished(post)).with_status(prompts::POST_SUCCESS))
    }

    pub(super) async fn publish_comment(
        &self,
        state: &mut SessionState,
    ) -> Result<DispatchOutcome> {
        let Some(user_id) = state.user_id().map(str::to_string) else {
            return Ok(DispatchOutcome::noop());
        };
        let ScreenState::CreateComment(compose) = &mut state.screen else {
            return Ok(DispatchOutcome::noop());
        };
        if compose.recording != RecordingState::Preview {
            return Ok(DispatchOutcome::noop());
        }
        compose.recording = RecordingState::Uploading;
        let post_id = compose.post.id.clone();

        let post = match self.repository.add_comment(&post_id, &user_id).await {
            Ok(post) => post,
            Err(err) => {
                if let ScreenState::CreateComment(compose) = &mut state.screen {
                    compose.recording = RecordingState::Preview;
                }
                return Err(err);
            }
        };

        if let ScreenState::CreateComment(compose) = &mut state.screen {
            compose.recording = RecordingState::Posted;
        }
        state.go_back();
        if let ScreenState::PostDetails(detail) = &mut state.screen
            && detail.post.id == post.id
        {
            detail.post = post.clone();
        }
        Ok(DispatchOutcome::new(Effect::CommentPosted(post))
            .with_status(prompts::COMMENT_POST_SUCCESS))
    }
}

fn record_start(screen: Screen) -> &'static str {
    match screen {
        Screen::CreateComment => prompts::COMMENT_RECORD_START,
        Screen::Messages => prompts::MESSAGE_RECORD_START,
        _ => prompts::RECORD_START,
    }
}
