//! One user's voice loop: listen, resolve, dispatch.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use voicebook_core::{NluResponse, Result, SpeechError, VoiceState, VoicebookError};
use voicebook_interaction::IntentResolver;

use crate::dispatcher::IntentDispatcher;
use crate::effect::{DispatchOutcome, ScrollState};
use crate::prompts;
use crate::screen::Screen;
use crate::session_state::SessionState;

/// What happened to one transcript.
#[derive(Debug, Clone)]
pub struct TurnReport {
    pub transcript: String,
    /// The resolved intent; `unknown` on the auth screen, which skips NLU.
    pub response: NluResponse,
    pub outcome: DispatchOutcome,
    pub started_at: DateTime<Utc>,
}

impl TurnReport {
    /// Status line for the user, if the turn produced one.
    pub fn status(&self) -> Option<&str> {
        self.outcome.status.as_deref()
    }
}

/// Drives voice turns for a single session.
///
/// Turns are serialised: a transcript is resolved and dispatched to
/// completion before the next one starts, so two quick utterances never
/// interleave their resolve and dispatch steps.
pub struct VoiceSession {
    resolver: Arc<dyn IntentResolver>,
    dispatcher: IntentDispatcher,
    state: Mutex<SessionState>,
    voice: RwLock<VoiceState>,
    turn_lock: Mutex<()>,
}

impl VoiceSession {
    pub fn new(resolver: Arc<dyn IntentResolver>, dispatcher: IntentDispatcher) -> Self {
        Self::with_state(resolver, dispatcher, SessionState::new())
    }

    /// Starts from an existing session, e.g. one that is already signed in.
    pub fn with_state(
        resolver: Arc<dyn IntentResolver>,
        dispatcher: IntentDispatcher,
        state: SessionState,
    ) -> Self {
        Self {
            resolver,
            dispatcher,
            state: Mutex::new(state),
            voice: RwLock::new(VoiceState::Idle),
            turn_lock: Mutex::new(()),
        }
    }

    pub async fn voice_state(&self) -> VoiceState {
        *self.voice.read().await
    }

    pub async fn screen(&self) -> Screen {
        self.state.lock().await.current_screen()
    }

    /// A copy of the session state.
    pub async fn snapshot(&self) -> SessionState {
        self.state.lock().await.clone()
    }

    /// Opens the microphone.
    ///
    /// # Errors
    ///
    /// Returns [`VoicebookError::Busy`] while a command is being processed.
    pub async fn start_listening(&self) -> Result<()> {
        let mut voice = self.voice.write().await;
        match *voice {
            VoiceState::Processing => Err(VoicebookError::busy(prompts::BUSY)),
            VoiceState::Listening => Ok(()),
            VoiceState::Idle => {
                *voice = VoiceState::Listening;
                tracing::debug!("[VoiceSession] Listening");
                Ok(())
            }
        }
    }

    pub async fn stop_listening(&self) {
        let mut voice = self.voice.write().await;
        if *voice == VoiceState::Listening {
            *voice = VoiceState::Idle;
        }
    }

    /// Reports a capture error and closes the microphone. Nothing is retried.
    ///
    /// A turn already in `Processing` keeps that state until it finishes.
    pub async fn on_speech_error(&self, error: SpeechError) -> String {
        tracing::warn!("[VoiceSession] Speech recognition error: {}", error);
        self.stop_listening().await;
        prompts::speech_error(&error)
    }

    /// Resolves and dispatches one final transcript.
    pub async fn handle_transcript(&self, transcript: &str) -> TurnReport {
        let _turn = self.turn_lock.lock().await;
        let started_at = Utc::now();
        *self.voice.write().await = VoiceState::Processing;

        let (response, outcome) = self.run_turn(transcript).await;

        let mut voice = self.voice.write().await;
        if *voice == VoiceState::Processing {
            *voice = VoiceState::Idle;
        }
        drop(voice);
        TurnReport {
            transcript: transcript.to_string(),
            response,
            outcome,
            started_at,
        }
    }

    async fn run_turn(&self, transcript: &str) -> (NluResponse, DispatchOutcome) {
        let context = {
            let mut state = self.state.lock().await;
            state.scroll = ScrollState::Stopped;
            if state.is_on(Screen::Auth) {
                let result = self.dispatcher.dispatch_auth(transcript, &mut state).await;
                return (NluResponse::unknown(), settle(result));
            }
            state.nlu_context()
        };

        tracing::debug!(
            "[VoiceSession] Resolving with {} candidate names",
            context.user_names().len()
        );
        let response = self.resolver.resolve(transcript, &context).await;

        let mut state = self.state.lock().await;
        let result = self.dispatcher.dispatch(&response, &mut state).await;
        (response, settle(result))
    }
}

fn settle(result: Result<DispatchOutcome>) -> DispatchOutcome {
    result.unwrap_or_else(|err| {
        tracing::error!("[VoiceSession] Dispatch failed: {}", err);
        DispatchOutcome::noop_with(prompts::DISPATCH_FAILED)
    })
}
