//! What a dispatched intent did.

use voicebook_core::social::{Post, User};

use crate::screen::Screen;

/// Auto-scroll state of the active list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollState {
    #[default]
    Stopped,
    Up,
    Down,
}

/// The single observable effect of one dispatch.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Nothing happened: unknown intent, wrong screen or unmet precondition.
    NoOp,
    Navigated(Screen),
    WentBack(Screen),
    Scrolled(ScrollState),
    /// Local state of the active screen changed.
    ScreenUpdated(Screen),
    /// Only a status message was produced.
    Announced,
    SignedIn(User),
    PostLiked(Post),
    PostPublished(Post),
    CommentPosted(Post),
    FriendRequestSent(User),
    FriendRequestAccepted(User),
    FriendRequestDeclined(User),
    UserBlocked(User),
    UserUnblocked(User),
    ProfileSaved(User),
}

impl Effect {
    pub fn is_noop(&self) -> bool {
        matches!(self, Self::NoOp)
    }
}

/// Result of [`crate::IntentDispatcher::dispatch`].
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchOutcome {
    pub effect: Effect,
    /// Status line to show (or speak) to the user.
    pub status: Option<String>,
}

impl DispatchOutcome {
    pub fn new(effect: Effect) -> Self {
        Self {
            effect,
            status: None,
        }
    }

    pub fn noop() -> Self {
        Self::new(Effect::NoOp)
    }

    /// A no-op that still tells the user why.
    pub fn noop_with(status: impl Into<String>) -> Self {
        Self::noop().with_status(status)
    }

    pub fn announce(status: impl Into<String>) -> Self {
        Self::new(Effect::Announced).with_status(status)
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }
}
