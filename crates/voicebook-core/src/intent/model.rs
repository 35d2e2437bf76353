//! Intent vocabulary.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use super::slots::slot_keys;

/// A user-requested action decoded from a spoken command.
///
/// The wire names (`intent_like`, `unknown`, ...) are the closed vocabulary the
/// NLU model is instructed to answer with. Any other string decodes to
/// [`Intent::Unknown`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr,
)]
pub enum Intent {
    // Authentication
    #[strum(serialize = "intent_signup")]
    Signup,
    #[strum(serialize = "intent_login")]
    Login,

    // Feed playback
    #[strum(serialize = "intent_play_post")]
    PlayPost,
    #[strum(serialize = "intent_pause_post")]
    PausePost,
    #[strum(serialize = "intent_next_post")]
    NextPost,
    #[strum(serialize = "intent_previous_post")]
    PreviousPost,

    // Post creation
    #[strum(serialize = "intent_create_post")]
    CreatePost,
    #[strum(serialize = "intent_stop_recording")]
    StopRecording,
    #[strum(serialize = "intent_post_confirm")]
    PostConfirm,
    #[strum(serialize = "intent_re_record")]
    ReRecord,
    #[strum(serialize = "intent_generate_image")]
    GenerateImage,
    #[strum(serialize = "intent_clear_image")]
    ClearImage,

    // Comments
    #[strum(serialize = "intent_comment")]
    Comment,
    #[strum(serialize = "intent_post_comment")]
    PostComment,
    #[strum(serialize = "intent_view_comments")]
    ViewComments,
    #[strum(serialize = "intent_view_comments_by_author")]
    ViewCommentsByAuthor,
    #[strum(serialize = "intent_play_comment_by_author")]
    PlayCommentByAuthor,

    // Search
    #[strum(serialize = "intent_search_user")]
    SearchUser,
    #[strum(serialize = "intent_select_result")]
    SelectResult,

    // Post reactions
    #[strum(serialize = "intent_like")]
    Like,
    #[strum(serialize = "intent_share")]
    Share,

    // Profile and settings
    #[strum(serialize = "intent_open_profile")]
    OpenProfile,
    #[strum(serialize = "intent_change_avatar")]
    ChangeAvatar,
    #[strum(serialize = "intent_go_back")]
    GoBack,
    #[strum(serialize = "intent_open_settings")]
    OpenSettings,
    #[strum(serialize = "intent_edit_profile")]
    EditProfile,
    #[strum(serialize = "intent_save_settings")]
    SaveSettings,
    #[strum(serialize = "intent_update_profile")]
    UpdateProfile,
    #[strum(serialize = "intent_update_privacy")]
    UpdatePrivacy,
    #[strum(serialize = "intent_block_user")]
    BlockUser,
    #[strum(serialize = "intent_unblock_user")]
    UnblockUser,

    // Friends
    #[strum(serialize = "intent_add_friend")]
    AddFriend,
    #[strum(serialize = "intent_open_friend_requests")]
    OpenFriendRequests,
    #[strum(serialize = "intent_accept_request")]
    AcceptRequest,
    #[strum(serialize = "intent_decline_request")]
    DeclineRequest,
    #[strum(serialize = "intent_open_friends_page")]
    OpenFriendsPage,

    // Messaging
    #[strum(serialize = "intent_send_message")]
    SendMessage,
    #[strum(serialize = "intent_open_messages")]
    OpenMessages,
    #[strum(serialize = "intent_open_chat")]
    OpenChat,
    #[strum(serialize = "intent_record_message")]
    RecordMessage,
    #[strum(serialize = "intent_send_chat_message")]
    SendChatMessage,
    #[strum(serialize = "intent_change_chat_theme")]
    ChangeChatTheme,
    #[strum(serialize = "intent_delete_chat")]
    DeleteChat,

    // Scrolling
    #[strum(serialize = "intent_scroll_up")]
    ScrollUp,
    #[strum(serialize = "intent_scroll_down")]
    ScrollDown,
    #[strum(serialize = "intent_stop_scroll")]
    StopScroll,

    // Monetization
    #[strum(serialize = "intent_claim_reward")]
    ClaimReward,
    #[strum(serialize = "intent_open_sponsor_center")]
    OpenSponsorCenter,
    #[strum(serialize = "intent_create_campaign")]
    CreateCampaign,
    #[strum(serialize = "intent_view_campaign_dashboard")]
    ViewCampaignDashboard,
    #[strum(serialize = "intent_set_sponsor_name")]
    SetSponsorName,
    #[strum(serialize = "intent_set_campaign_caption")]
    SetCampaignCaption,
    #[strum(serialize = "intent_set_campaign_budget")]
    SetCampaignBudget,
    #[strum(serialize = "intent_set_media_type")]
    SetMediaType,
    #[strum(serialize = "intent_launch_campaign")]
    LaunchCampaign,

    #[strum(serialize = "intent_help")]
    Help,
    #[strum(serialize = "unknown")]
    Unknown,
}

impl Intent {
    /// Returns the wire name of this intent.
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Parses a wire name, mapping anything outside the vocabulary to `Unknown`.
    pub fn from_wire(name: &str) -> Self {
        Self::from_str(name).unwrap_or(Self::Unknown)
    }

    /// Slots the model is asked to extract for this intent.
    pub fn slot_names(self) -> &'static [&'static str] {
        use slot_keys::*;

        match self {
            Self::ViewCommentsByAuthor
            | Self::PlayCommentByAuthor
            | Self::SearchUser
            | Self::OpenProfile
            | Self::BlockUser
            | Self::UnblockUser
            | Self::OpenChat
            | Self::AddFriend
            | Self::AcceptRequest
            | Self::DeclineRequest => &[TARGET_NAME],
            Self::SelectResult => &[INDEX],
            Self::UpdateProfile => &[FIELD, VALUE],
            Self::UpdatePrivacy => &[SETTING, VALUE],
            Self::ChangeChatTheme => &[THEME_NAME],
            Self::GenerateImage => &[PROMPT],
            Self::SetSponsorName => &[SPONSOR_NAME],
            Self::SetCampaignCaption => &[CAPTION_TEXT],
            Self::SetCampaignBudget => &[BUDGET_AMOUNT],
            Self::SetMediaType => &[MEDIA_TYPE],
            _ => &[],
        }
    }

    /// Extra wording shown to the model next to the intent name.
    pub fn hint(self) -> Option<&'static str> {
        match self {
            Self::OpenProfile => Some("optional; if no name, it's the current user"),
            Self::UpdateProfile => Some(
                "'field' is one of name, bio, work, education, hometown, currentCity, relationshipStatus",
            ),
            Self::UpdatePrivacy => Some(
                "'setting' is postVisibility or friendRequestPrivacy; 'value' is public, friends, everyone or friends_of_friends",
            ),
            Self::SetMediaType => Some("'media_type' is image, video or audio"),
            _ => None,
        }
    }
}

impl Default for Intent {
    fn default() -> Self {
        Self::Unknown
    }
}

impl Serialize for Intent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Intent {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::from_wire(name.trim()))
    }
}
