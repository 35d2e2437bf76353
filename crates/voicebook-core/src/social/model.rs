//! Social domain models.
//!
//! The enums here double as the local validation tables for slot values: a
//! slot is only applied when it parses into one of them.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FriendshipStatus {
    #[default]
    NotFriends,
    Friends,
    RequestSent,
    PendingApproval,
}

/// Who can see a user's posts.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PostVisibility {
    #[default]
    Public,
    Friends,
}

/// Who can send a user friend requests.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FriendRequestPrivacy {
    #[default]
    Everyone,
    FriendsOfFriends,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrivacySettings {
    pub post_visibility: PostVisibility,
    pub friend_request_privacy: FriendRequestPrivacy,
}

/// A privacy setting change, validated against the setting it targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrivacyUpdate {
    PostVisibility(PostVisibility),
    FriendRequestPrivacy(FriendRequestPrivacy),
}

impl PrivacyUpdate {
    /// Parses a `setting`/`value` slot pair. Values that do not belong to
    /// the named setting are rejected.
    pub fn parse(setting: &str, value: &str) -> Option<Self> {
        match setting {
            "postVisibility" => value.parse().ok().map(Self::PostVisibility),
            "friendRequestPrivacy" => value.parse().ok().map(Self::FriendRequestPrivacy),
            _ => None,
        }
    }

    pub fn apply(self, settings: &mut PrivacySettings) {
        match self {
            Self::PostVisibility(value) => settings.post_visibility = value,
            Self::FriendRequestPrivacy(value) => settings.friend_request_privacy = value,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::PostVisibility(_) => "Post visibility",
            Self::FriendRequestPrivacy(_) => "Friend request privacy",
        }
    }

    pub fn value_label(self) -> String {
        match self {
            Self::PostVisibility(value) => value.to_string(),
            Self::FriendRequestPrivacy(value) => value.to_string(),
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
pub enum RelationshipStatus {
    #[strum(serialize = "Single")]
    #[serde(rename = "Single")]
    Single,
    #[strum(serialize = "In a relationship")]
    #[serde(rename = "In a relationship")]
    InARelationship,
    #[strum(serialize = "Engaged")]
    #[serde(rename = "Engaged")]
    Engaged,
    #[strum(serialize = "Married")]
    #[serde(rename = "Married")]
    Married,
    #[strum(serialize = "It's complicated")]
    #[serde(rename = "It's complicated")]
    ItsComplicated,
    #[strum(serialize = "Prefer not to say")]
    #[serde(rename = "Prefer not to say")]
    PreferNotToSay,
}

impl RelationshipStatus {
    /// Matches a spoken status against the fixed labels, ignoring case.
    pub fn from_spoken(value: &str) -> Option<Self> {
        use strum::IntoEnumIterator;

        let value = value.trim();
        Self::iter().find(|status| status.to_string().eq_ignore_ascii_case(value))
    }
}

/// Profile fields that can be edited by voice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "camelCase")]
pub enum ProfileField {
    Name,
    Bio,
    Work,
    Education,
    Hometown,
    CurrentCity,
    RelationshipStatus,
}

/// Fixed chat theme table.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ChatTheme {
    #[default]
    Default,
    Sunset,
    Ocean,
    Forest,
    Classic,
}

impl ChatTheme {
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::Sunset => "Sunset",
            Self::Ocean => "Ocean",
            Self::Forest => "Forest",
            Self::Classic => "Classic",
        }
    }
}

/// Media attached to a sponsored campaign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
    Audio,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub work: Option<String>,
    #[serde(default)]
    pub education: Option<String>,
    #[serde(default)]
    pub hometown: Option<String>,
    #[serde(default)]
    pub current_city: Option<String>,
    #[serde(default)]
    pub relationship_status: Option<RelationshipStatus>,
    #[serde(default)]
    pub privacy_settings: PrivacySettings,
    #[serde(default)]
    pub blocked_user_ids: Vec<String>,
    #[serde(default)]
    pub friendship_status: FriendshipStatus,
    #[serde(default)]
    pub is_banned: bool,
    #[serde(default)]
    pub voice_coins: u32,
}

impl User {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            bio: String::new(),
            work: None,
            education: None,
            hometown: None,
            current_city: None,
            relationship_status: None,
            privacy_settings: PrivacySettings::default(),
            blocked_user_ids: Vec::new(),
            friendship_status: FriendshipStatus::default(),
            is_banned: false,
            voice_coins: 0,
        }
    }

    pub fn has_blocked(&self, user_id: &str) -> bool {
        self.blocked_user_ids.iter().any(|id| id == user_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub post_id: String,
    pub author_id: String,
    pub author_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub author_id: String,
    pub author_name: String,
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub like_count: u32,
    #[serde(default)]
    pub liked_by: Vec<String>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub is_sponsored: bool,
    #[serde(default)]
    pub sponsor_name: Option<String>,
}

impl Post {
    /// Name shown for the post: the sponsor for ads, the author otherwise.
    pub fn display_name(&self) -> &str {
        match (&self.sponsor_name, self.is_sponsored) {
            (Some(sponsor), true) => sponsor,
            _ => &self.author_name,
        }
    }
}

/// Result of sending a friend request.
#[derive(Debug, Clone, PartialEq)]
pub enum FriendRequestOutcome {
    Sent(User),
    /// The target only accepts requests from friends of friends.
    RestrictedByPrivacy(User),
}
