//! Screens and their local state.
//!
//! Each variant of [`ScreenState`] carries what the matching screen would
//! keep in memory: the playback cursor on the feed, the draft on the settings
//! screen, the recorder on the create-post screen, and so on. Intents that
//! belong to a screen only ever touch that screen's state.

use std::fmt;

use voicebook_core::social::{ChatTheme, MediaType, Post, PrivacySettings, User};

/// Screen identifiers, without their state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Auth,
    Feed,
    Profile,
    Settings,
    CreatePost,
    CreateComment,
    Messages,
    Conversations,
    PostDetails,
    Friends,
    SearchResults,
    SponsorCenter,
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Auth => "auth",
            Self::Feed => "feed",
            Self::Profile => "profile",
            Self::Settings => "settings",
            Self::CreatePost => "create post",
            Self::CreateComment => "create comment",
            Self::Messages => "messages",
            Self::Conversations => "conversations",
            Self::PostDetails => "post details",
            Self::Friends => "friends",
            Self::SearchResults => "search results",
            Self::SponsorCenter => "sponsor center",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    Login,
    Signup,
}

/// Voice recorder used by posts, comments and chat messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordingState {
    #[default]
    Idle,
    Recording,
    Preview,
    Uploading,
    Posted,
}

/// A list of posts with a playback cursor.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PostPlayback {
    pub posts: Vec<Post>,
    pub current_index: Option<usize>,
    pub is_playing: bool,
}

impl PostPlayback {
    pub fn new(posts: Vec<Post>) -> Self {
        Self {
            posts,
            current_index: None,
            is_playing: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Playback positioned on the first post, as on a profile page.
    pub fn starting_at_first(posts: Vec<Post>) -> Self {
        let current_index = (!posts.is_empty()).then_some(0);
        Self {
            posts,
            current_index,
            is_playing: false,
        }
    }

    /// The post under the cursor. `None` until a post has been selected.
    pub fn current(&self) -> Option<&Post> {
        self.posts.get(self.current_index?)
    }

    /// Starts playback, selecting the first post if none is selected yet.
    pub fn play(&mut self) -> bool {
        if self.posts.is_empty() {
            return false;
        }
        self.current_index.get_or_insert(0);
        self.is_playing = true;
        true
    }

    /// Moves to the next post, wrapping around, and starts playback.
    pub fn next(&mut self) -> Option<&Post> {
        if self.posts.is_empty() {
            return None;
        }
        let index = match self.current_index {
            None => 0,
            Some(index) => (index + 1) % self.posts.len(),
        };
        self.current_index = Some(index);
        self.is_playing = true;
        self.posts.get(index)
    }

    /// Moves to the previous post, wrapping around, and starts playback.
    pub fn previous(&mut self) -> Option<&Post> {
        if self.posts.is_empty() {
            return None;
        }
        let len = self.posts.len();
        let index = match self.current_index {
            Some(index) if index > 0 => index - 1,
            _ => len - 1,
        };
        self.current_index = Some(index);
        self.is_playing = true;
        self.posts.get(index)
    }

    /// Replaces a post in place after it changed in the repository.
    pub fn replace(&mut self, post: Post) {
        if let Some(slot) = self.posts.iter_mut().find(|p| p.id == post.id) {
            *slot = post;
        }
    }

    /// Author and sponsor names, in feed order.
    pub fn names(&self) -> Vec<String> {
        self.posts
            .iter()
            .map(|post| post.display_name().to_string())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProfileState {
    pub user: User,
    pub playback: PostPlayback,
}

/// Editable copy of the profile; saved only on `intent_save_settings`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProfileDraft {
    pub name: String,
    pub bio: String,
    pub work: String,
    pub education: String,
    pub hometown: String,
    pub current_city: String,
    pub relationship_status: String,
}

impl ProfileDraft {
    pub fn from_user(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            bio: user.bio.clone(),
            work: user.work.clone().unwrap_or_default(),
            education: user.education.clone().unwrap_or_default(),
            hometown: user.hometown.clone().unwrap_or_default(),
            current_city: user.current_city.clone().unwrap_or_default(),
            relationship_status: user
                .relationship_status
                .map(|status| status.to_string())
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SettingsState {
    pub draft: ProfileDraft,
    pub privacy: PrivacySettings,
    pub blocked_users: Vec<User>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CreatePostState {
    pub recording: RecordingState,
    pub image_prompt: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateCommentState {
    pub post: Post,
    pub recording: RecordingState,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatState {
    pub peer: User,
    pub recording: RecordingState,
    pub theme: ChatTheme,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PostDetailState {
    pub post: Post,
    pub playing_comment_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FriendsTab {
    #[default]
    Requests,
    Suggestions,
    AllFriends,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FriendsState {
    pub tab: FriendsTab,
    pub requests: Vec<User>,
    pub suggestions: Vec<User>,
    pub friends: Vec<User>,
}

impl FriendsState {
    /// Users listed on the active tab.
    pub fn active_list(&self) -> &[User] {
        match self.tab {
            FriendsTab::Requests => &self.requests,
            FriendsTab::Suggestions => &self.suggestions,
            FriendsTab::AllFriends => &self.friends,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchResultsState {
    pub query: String,
    pub results: Vec<User>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SponsorTab {
    #[default]
    Dashboard,
    CreateCampaign,
}

/// Campaign being composed by voice.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CampaignDraft {
    pub sponsor_name: String,
    pub caption: String,
    /// Digits only.
    pub budget: String,
    pub media_type: Option<MediaType>,
    pub launch_requested: bool,
}

impl CampaignDraft {
    /// Names the first required field still missing.
    pub fn missing_field(&self) -> Option<&'static str> {
        if self.sponsor_name.trim().is_empty() {
            Some("sponsor name")
        } else if self.caption.trim().is_empty() {
            Some("caption")
        } else if self.budget.is_empty() {
            Some("budget")
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SponsorCenterState {
    pub tab: SponsorTab,
    pub campaign: CampaignDraft,
}

fn names_of(users: &[User]) -> Vec<String> {
    users.iter().map(|user| user.name.clone()).collect()
}

/// The active screen together with its local state.
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenState {
    Auth(AuthMode),
    Feed(PostPlayback),
    Profile(ProfileState),
    Settings(SettingsState),
    CreatePost(CreatePostState),
    CreateComment(CreateCommentState),
    Messages(ChatState),
    Conversations(Vec<User>),
    PostDetails(PostDetailState),
    Friends(FriendsState),
    SearchResults(SearchResultsState),
    SponsorCenter(SponsorCenterState),
}

impl Default for ScreenState {
    fn default() -> Self {
        Self::Auth(AuthMode::default())
    }
}

impl ScreenState {
    pub fn screen(&self) -> Screen {
        match self {
            Self::Auth(_) => Screen::Auth,
            Self::Feed(_) => Screen::Feed,
            Self::Profile(_) => Screen::Profile,
            Self::Settings(_) => Screen::Settings,
            Self::CreatePost(_) => Screen::CreatePost,
            Self::CreateComment(_) => Screen::CreateComment,
            Self::Messages(_) => Screen::Messages,
            Self::Conversations(_) => Screen::Conversations,
            Self::PostDetails(_) => Screen::PostDetails,
            Self::Friends(_) => Screen::Friends,
            Self::SearchResults(_) => Screen::SearchResults,
            Self::SponsorCenter(_) => Screen::SponsorCenter,
        }
    }

    /// Display names visible on this screen, offered to the NLU model as
    /// candidates for `target_name`.
    pub fn context_names(&self) -> Vec<String> {
        match self {
            Self::Feed(playback) => playback.names(),
            Self::Profile(profile) => vec![profile.user.name.clone()],
            Self::Settings(settings) => names_of(&settings.blocked_users),
            Self::Messages(chat) => vec![chat.peer.name.clone()],
            Self::Conversations(peers) => names_of(peers),
            Self::PostDetails(detail) => {
                let mut names = vec![detail.post.display_name().to_string()];
                names.extend(detail.post.comments.iter().map(|c| c.author_name.clone()));
                names
            }
            Self::Friends(friends) => names_of(friends.active_list()),
            Self::SearchResults(search) => names_of(&search.results),
            Self::Auth(_)
            | Self::CreatePost(_)
            | Self::CreateComment(_)
            | Self::SponsorCenter(_) => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: &str, author: &str) -> Post {
        Post {
            id: id.to_string(),
            author_id: format!("id_{author}"),
            author_name: author.to_string(),
            caption: String::new(),
            like_count: 0,
            liked_by: vec![],
            comments: vec![],
            is_sponsored: false,
            sponsor_name: None,
        }
    }

    #[test]
    fn test_playback_wraps_both_ways() {
        let mut playback = PostPlayback::new(vec![post("a", "A"), post("b", "B"), post("c", "C")]);

        assert_eq!(playback.next().map(|p| p.id.as_str()), Some("a"));
        assert!(playback.is_playing);
        playback.next();
        playback.next();
        assert_eq!(playback.next().map(|p| p.id.as_str()), Some("a"));

        assert_eq!(playback.previous().map(|p| p.id.as_str()), Some("c"));
    }

    #[test]
    fn test_previous_before_any_navigation_goes_to_last() {
        let mut playback = PostPlayback::new(vec![post("a", "A"), post("b", "B")]);
        assert_eq!(playback.previous().map(|p| p.id.as_str()), Some("b"));
    }

    #[test]
    fn test_current_requires_selection() {
        let mut playback = PostPlayback::new(vec![post("a", "A")]);
        assert!(playback.current().is_none());
        assert!(playback.play());
        assert_eq!(playback.current().map(|p| p.id.as_str()), Some("a"));

        let profile = PostPlayback::starting_at_first(vec![post("b", "B")]);
        assert_eq!(profile.current().map(|p| p.id.as_str()), Some("b"));
        assert_eq!(PostPlayback::starting_at_first(vec![]).current_index, None);
    }

    #[test]
    fn test_empty_playback_does_not_move() {
        let mut playback = PostPlayback::default();
        assert!(playback.next().is_none());
        assert!(playback.previous().is_none());
        assert!(!playback.play());
        assert!(!playback.is_playing);
        assert_eq!(playback.current_index, None);
    }

    #[test]
    fn test_context_names_per_screen() {
        let feed = ScreenState::Feed(PostPlayback::new(vec![post("a", "Sumi"), post("b", "Rohan")]));
        assert_eq!(feed.context_names(), vec!["Sumi", "Rohan"]);

        let mut detail_post = post("a", "Sumi");
        detail_post.comments.push(voicebook_core::social::Comment {
            id: "c".into(),
            post_id: "a".into(),
            author_id: "id_Rohan".into(),
            author_name: "Rohan".into(),
        });
        let detail = ScreenState::PostDetails(PostDetailState {
            post: detail_post,
            playing_comment_id: None,
        });
        assert_eq!(detail.context_names(), vec!["Sumi", "Rohan"]);

        assert!(ScreenState::default().context_names().is_empty());
        assert_eq!(ScreenState::default().screen(), Screen::Auth);
    }

    #[test]
    fn test_campaign_missing_field() {
        let mut draft = CampaignDraft::default();
        assert_eq!(draft.missing_field(), Some("sponsor name"));
        draft.sponsor_name = "Travel Bangladesh".into();
        draft.caption = "Visit".into();
        assert_eq!(draft.missing_field(), Some("budget"));
        draft.budget = "5000".into();
        assert_eq!(draft.missing_field(), None);
    }
}
