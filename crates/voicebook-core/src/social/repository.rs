//! Social repository trait.
//!
//! Defines the data operations voice commands can trigger.

use super::model::{FriendRequestOutcome, Post, PrivacySettings, ProfileField, User};
use crate::error::Result;

/// Profile edits collected on the settings screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileUpdate {
    pub fields: Vec<(ProfileField, String)>,
    pub privacy_settings: Option<PrivacySettings>,
}

/// An abstract repository for users, posts and friendships.
///
/// This decouples dispatch from the storage mechanism (in-memory demo data,
/// a remote API, ...).
///
/// # Implementation Notes
///
/// Name lookups are fuzzy: they score candidates with
/// [`crate::similarity::similarity`] and require at least
/// [`crate::similarity::SIMILARITY_THRESHOLD`]. Search is looser and keeps
/// anything above [`crate::similarity::SEARCH_THRESHOLD`].
#[async_trait::async_trait]
pub trait SocialRepository: Send + Sync {
    /// Retrieves a user by id.
    async fn get_user(&self, user_id: &str) -> Result<Option<User>>;

    /// Finds the user whose name best matches a spoken name.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(user))`: best candidate above the threshold
    /// - `Ok(None)`: nobody scored high enough
    async fn find_user_by_name(&self, name: &str) -> Result<Option<User>>;

    /// Returns every user matching `query`, best match first.
    async fn search_users(&self, query: &str) -> Result<Vec<User>>;

    /// Logs in with a spoken name. Banned users are refused.
    async fn authenticate(&self, spoken_name: &str) -> Result<Option<User>>;

    /// Creates a user. Returns `None` if the name is already taken.
    async fn sign_up(&self, name: &str) -> Result<Option<User>>;

    /// Lists the friends of a user.
    async fn friends_of(&self, user_id: &str) -> Result<Vec<User>>;

    /// Users with a pending request to `user_id`.
    async fn friend_requests(&self, user_id: &str) -> Result<Vec<User>>;

    /// Users who are neither friends nor blocked.
    async fn friend_suggestions(&self, user_id: &str) -> Result<Vec<User>>;

    /// Builds the feed for a user.
    ///
    /// Posts by blocked or banned authors are skipped, and friends-only
    /// posts are shown to friends and the author.
    async fn feed_for(&self, user_id: &str) -> Result<Vec<Post>>;

    async fn posts_by(&self, author_id: &str) -> Result<Vec<Post>>;

    async fn get_post(&self, post_id: &str) -> Result<Option<Post>>;

    /// Publishes a voice post at the top of the feed.
    async fn create_post(
        &self,
        user_id: &str,
        caption: &str,
        image_prompt: Option<&str>,
    ) -> Result<Post>;

    /// Attaches a voice comment to a post.
    async fn add_comment(&self, post_id: &str, user_id: &str) -> Result<Post>;

    /// Applies profile and privacy edits, returning the updated user.
    async fn update_profile(&self, user_id: &str, update: ProfileUpdate) -> Result<User>;

    /// Records a like. Liking twice leaves the count unchanged.
    async fn like_post(&self, post_id: &str, user_id: &str) -> Result<Post>;

    async fn send_friend_request(
        &self,
        user_id: &str,
        target_id: &str,
    ) -> Result<FriendRequestOutcome>;

    async fn accept_friend_request(&self, user_id: &str, requester_id: &str) -> Result<User>;

    async fn decline_friend_request(&self, user_id: &str, requester_id: &str) -> Result<User>;

    async fn block_user(&self, user_id: &str, target_id: &str) -> Result<User>;

    async fn unblock_user(&self, user_id: &str, target_id: &str) -> Result<User>;
}
