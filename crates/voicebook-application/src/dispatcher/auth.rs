//! Login and signup by voice.
//!
//! The auth screen never calls the NLU model: the raw transcript either
//! switches between login and signup or is taken as the spoken name.

use voicebook_core::social::User;
use voicebook_core::Result;

use super::IntentDispatcher;
use crate::effect::{DispatchOutcome, Effect};
use crate::prompts;
use crate::screen::{AuthMode, PostPlayback, ScreenState};
use crate::session_state::SessionState;

fn mode_switch(transcript: &str) -> Option<AuthMode> {
    let lowered = transcript.to_lowercase();
    if lowered.contains("sign up") || lowered.contains("signup") {
        Some(AuthMode::Signup)
    } else if lowered.contains("log in") || lowered.contains("login") {
        Some(AuthMode::Login)
    } else {
        None
    }
}

impl IntentDispatcher {
    /// Handles one utterance on the auth screen.
    pub async fn dispatch_auth(
        &self,
        transcript: &str,
        state: &mut SessionState,
    ) -> Result<DispatchOutcome> {
        let ScreenState::Auth(mode) = &mut state.screen else {
            return Ok(DispatchOutcome::noop());
        };

        if let Some(requested) = mode_switch(transcript) {
            *mode = requested;
            let status = match requested {
                AuthMode::Login => prompts::LOGIN_MODE,
                AuthMode::Signup => prompts::SIGNUP_MODE,
            };
            return Ok(DispatchOutcome::announce(status));
        }

        let mode = *mode;
        let name = transcript.trim();
        if name.is_empty() {
            return Ok(DispatchOutcome::noop_with(prompts::NAME_REQUIRED));
        }

        match mode {
            AuthMode::Login => match self.repository.authenticate(name).await? {
                Some(user) => {
                    let status = prompts::welcome(&user.name);
                    self.sign_in(state, user, status).await
                }
                None => {
                    tracing::info!("[Dispatcher] Login failed for spoken name");
                    Ok(DispatchOutcome::noop_with(prompts::login_failed(name)))
                }
            },
            AuthMode::Signup => match self.repository.sign_up(name).await? {
                Some(user) => {
                    let status = prompts::signup_success(&user.name);
                    self.sign_in(state, user, status).await
                }
                None => Ok(DispatchOutcome::noop_with(prompts::name_taken(name))),
            },
        }
    }

    /// Makes `user` current and lands on a fresh feed.
    async fn sign_in(
        &self,
        state: &mut SessionState,
        user: User,
        status: String,
    ) -> Result<DispatchOutcome> {
        let friends = self.repository.friends_of(&user.id).await?;
        let feed = self.repository.feed_for(&user.id).await?;
        tracing::info!(
            "[Dispatcher] Signed in {} ({} friends, {} posts)",
            user.id,
            friends.len(),
            feed.len()
        );

        state.current_user = Some(user.clone());
        state.friends = friends;
        state.replace(ScreenState::Feed(PostPlayback::new(feed)));
        state.reset_history();
        Ok(DispatchOutcome::new(Effect::SignedIn(user)).with_status(status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_switch() {
        assert_eq!(mode_switch("I want to sign up"), Some(AuthMode::Signup));
        assert_eq!(mode_switch("Signup"), Some(AuthMode::Signup));
        assert_eq!(mode_switch("log in please"), Some(AuthMode::Login));
        assert_eq!(mode_switch("Sumi Ahmed"), None);
    }
}
