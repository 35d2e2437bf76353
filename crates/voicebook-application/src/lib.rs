//! Application layer for VoiceBook.
//!
//! Ties the NLU client to the intent dispatcher and keeps per-session state:
//! which screen is active, who is signed in, and where the voice turn is.

pub mod dispatcher;
pub mod effect;
pub mod in_memory_repository;
pub mod prompts;
pub mod screen;
pub mod session_state;
pub mod voice_session;

pub use dispatcher::IntentDispatcher;
pub use effect::{DispatchOutcome, Effect, ScrollState};
pub use in_memory_repository::InMemorySocialRepository;
pub use screen::{Screen, ScreenState};
pub use session_state::SessionState;
pub use voice_session::{TurnReport, VoiceSession};
