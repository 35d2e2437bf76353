//! Per-session state the dispatcher reads and mutates.

use voicebook_core::NluContext;
use voicebook_core::social::User;

use crate::effect::ScrollState;
use crate::screen::{Screen, ScreenState};

/// Everything one signed-in (or signing-in) user has on screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub current_user: Option<User>,
    pub friends: Vec<User>,
    pub screen: ScreenState,
    pub scroll: ScrollState,
    history: Vec<ScreenState>,
}

impl SessionState {
    /// A fresh session on the login screen.
    pub fn new() -> Self {
        Self::default()
    }

    /// A session that is already signed in and looking at `screen`.
    pub fn signed_in(user: User, friends: Vec<User>, screen: ScreenState) -> Self {
        Self {
            current_user: Some(user),
            friends,
            screen,
            ..Self::default()
        }
    }

    pub fn current_screen(&self) -> Screen {
        self.screen.screen()
    }

    pub fn is_on(&self, screen: Screen) -> bool {
        self.current_screen() == screen
    }

    pub fn user_id(&self) -> Option<&str> {
        self.current_user.as_ref().map(|user| user.id.as_str())
    }

    /// Shows `screen`, remembering the current one for [`Self::go_back`].
    pub fn navigate(&mut self, screen: ScreenState) -> Screen {
        let previous = std::mem::replace(&mut self.screen, screen);
        self.history.push(previous);
        self.scroll = ScrollState::Stopped;
        self.current_screen()
    }

    /// Replaces the current screen without touching history.
    pub fn replace(&mut self, screen: ScreenState) -> Screen {
        self.screen = screen;
        self.current_screen()
    }

    /// Returns to the previous screen, if any.
    pub fn go_back(&mut self) -> Option<Screen> {
        let previous = self.history.pop()?;
        self.screen = previous;
        self.scroll = ScrollState::Stopped;
        Some(self.current_screen())
    }

    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }

    /// Clears history, e.g. after signing in.
    pub fn reset_history(&mut self) {
        self.history.clear();
    }

    /// Candidate names for this turn: friends first, then the screen's names.
    pub fn nlu_context(&self) -> NluContext {
        let mut context = NluContext::new(self.friends.iter().map(|friend| friend.name.clone()));
        context.extend(self.screen.context_names());
        context
    }
}
