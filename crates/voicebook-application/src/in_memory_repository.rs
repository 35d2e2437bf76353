//! In-memory social repository.
//!
//! Backs the demo binary and the tests. All collections live behind a single
//! `RwLock` so a repository can be shared between sessions.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;
use voicebook_core::similarity::{best_match, ranked_matches};
use voicebook_core::social::{
    Comment, FriendRequestOutcome, FriendRequestPrivacy, FriendshipStatus, Post, PostVisibility,
    ProfileField, ProfileUpdate, RelationshipStatus, SocialRepository, User,
};
use voicebook_core::{Result, VoicebookError};

const DEFAULT_BIO: &str = "Just joined VoiceBook!";
const DEFAULT_CAPTION: &str = "A new voice post.";
const WELCOME_COINS: u32 = 5;

#[derive(Debug, Default)]
struct Store {
    users: Vec<User>,
    posts: Vec<Post>,
    /// Unordered pairs, stored with the smaller id first.
    friendships: HashSet<(String, String)>,
    /// `(from, to)` pairs awaiting an answer.
    requests: Vec<(String, String)>,
}

fn friendship_key(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

impl Store {
    fn user(&self, user_id: &str) -> Option<&User> {
        self.users.iter().find(|user| user.id == user_id)
    }

    fn user_mut(&mut self, user_id: &str) -> Result<&mut User> {
        self.users
            .iter_mut()
            .find(|user| user.id == user_id)
            .ok_or_else(|| VoicebookError::not_found("user", user_id))
    }

    fn post_mut(&mut self, post_id: &str) -> Result<&mut Post> {
        self.posts
            .iter_mut()
            .find(|post| post.id == post_id)
            .ok_or_else(|| VoicebookError::not_found("post", post_id))
    }

    fn are_friends(&self, a: &str, b: &str) -> bool {
        self.friendships.contains(&friendship_key(a, b))
    }

    fn has_request(&self, from: &str, to: &str) -> bool {
        self.requests.iter().any(|(f, t)| f == from && t == to)
    }

    /// Copy of `user` with the friendship status as seen by `viewer_id`.
    fn as_seen_by(&self, user: &User, viewer_id: &str) -> User {
        let mut user = user.clone();
        user.friendship_status = if self.are_friends(viewer_id, &user.id) {
            FriendshipStatus::Friends
        } else if self.has_request(viewer_id, &user.id) {
            FriendshipStatus::RequestSent
        } else if self.has_request(&user.id, viewer_id) {
            FriendshipStatus::PendingApproval
        } else {
            FriendshipStatus::NotFriends
        };
        user
    }

    fn existing_user(&self, user_id: &str) -> Result<&User> {
        self.user(user_id)
            .ok_or_else(|| VoicebookError::not_found("user", user_id))
    }
}

/// `SocialRepository` kept entirely in memory.
#[derive(Clone, Default)]
pub struct InMemorySocialRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemorySocialRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository filled with the sample community.
    pub fn seeded() -> Self {
        let mut users = vec![
            User::new("u_1", "Sumi Ahmed"),
            User::new("u_2", "Shojib Khan"),
            User::new("u_3", "Sharmin Chowdhury"),
            User::new("u_4", "Rohan Mahmud"),
            User::new("u_5", "Nadia Islam"),
            User::new("u_6", "Karim Uddin"),
        ];
        users[0].bio = "Teacher, reader, tea lover.".to_string();
        users[0].current_city = Some("Dhaka".to_string());
        users[0].voice_coins = 12;
        users[1].work = Some("Software engineer".to_string());
        users[1].hometown = Some("Sylhet".to_string());
        users[2].privacy_settings.friend_request_privacy = FriendRequestPrivacy::FriendsOfFriends;
        users[2].privacy_settings.post_visibility = PostVisibility::Friends;
        users[3].relationship_status = Some(RelationshipStatus::Married);
        users[4].work = Some("Travel Bangladesh".to_string());
        users[5].is_banned = true;

        let comment = |id: &str, post_id: &str, author: &User| Comment {
            id: id.to_string(),
            post_id: post_id.to_string(),
            author_id: author.id.clone(),
            author_name: author.name.clone(),
        };
        let post = |id: &str, author: &User, caption: &str| Post {
            id: id.to_string(),
            author_id: author.id.clone(),
            author_name: author.name.clone(),
            caption: caption.to_string(),
            like_count: 0,
            liked_by: Vec::new(),
            comments: Vec::new(),
            is_sponsored: false,
            sponsor_name: None,
        };

        let mut morning = post("p_1", &users[1], "Morning rain in Sylhet");
        morning.comments = vec![
            comment("c_1", "p_1", &users[3]),
            comment("c_2", "p_1", &users[0]),
        ];
        morning.like_count = 1;
        morning.liked_by = vec![users[3].id.clone()];

        let mut campaign = post("camp_1", &users[4], "Discover Cox's Bazar this winter");
        campaign.is_sponsored = true;
        campaign.sponsor_name = Some("Travel Bangladesh".to_string());

        let posts = vec![
            morning,
            post("p_2", &users[3], "Cricket practice was intense today"),
            campaign,
            post("p_3", &users[2], "Family dinner recipes"),
            post("p_4", &users[5], "You will not see this"),
            post("p_5", &users[0], "My first voice post"),
        ];

        let mut friendships = HashSet::new();
        friendships.insert(friendship_key("u_1", "u_2"));
        friendships.insert(friendship_key("u_1", "u_4"));
        friendships.insert(friendship_key("u_2", "u_4"));

        let store = Store {
            users,
            posts,
            friendships,
            requests: vec![("u_5".to_string(), "u_1".to_string())],
        };
        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }

    pub async fn make_friends(&self, a: &str, b: &str) {
        let mut store = self.store.write().await;
        store.friendships.insert(friendship_key(a, b));
    }
}

#[async_trait::async_trait]
impl SocialRepository for InMemorySocialRepository {
    async fn get_user(&self, user_id: &str) -> Result<Option<User>> {
        let store = self.store.read().await;
        Ok(store.user(user_id).cloned())
    }

    async fn find_user_by_name(&self, name: &str) -> Result<Option<User>> {
        let store = self.store.read().await;
        Ok(best_match(name, store.users.iter(), |user| user.name.as_str())
            .map(|found| found.item.clone()))
    }

    async fn search_users(&self, query: &str) -> Result<Vec<User>> {
        let store = self.store.read().await;
        Ok(
            ranked_matches(query, store.users.iter(), |user| user.name.as_str())
                .into_iter()
                .filter(|found| !found.item.is_banned)
                .map(|found| found.item.clone())
                .collect(),
        )
    }

    async fn authenticate(&self, spoken_name: &str) -> Result<Option<User>> {
        let store = self.store.read().await;
        let Some(found) = best_match(spoken_name, store.users.iter(), |user| user.name.as_str())
        else {
            tracing::info!("[Repository] No user close enough to '{}'", spoken_name);
            return Ok(None);
        };

        if found.item.is_banned {
            tracing::info!("[Repository] Login refused for banned user {}", found.item.id);
            return Ok(None);
        }
        tracing::debug!(
            "[Repository] '{}' matched '{}' (score {:.2})",
            spoken_name,
            found.item.name,
            found.score
        );
        Ok(Some(found.item.clone()))
    }

    async fn sign_up(&self, name: &str) -> Result<Option<User>> {
        let name = name.trim();
        let mut store = self.store.write().await;
        if store
            .users
            .iter()
            .any(|user| user.name.trim().to_lowercase() == name.to_lowercase())
        {
            return Ok(None);
        }

        let mut user = User::new(format!("u_{}", Uuid::new_v4().simple()), name);
        user.bio = DEFAULT_BIO.to_string();
        user.voice_coins = WELCOME_COINS;
        store.users.push(user.clone());
        Ok(Some(user))
    }

    async fn friends_of(&self, user_id: &str) -> Result<Vec<User>> {
        let store = self.store.read().await;
        Ok(store
            .users
            .iter()
            .filter(|user| store.are_friends(user_id, &user.id))
            .map(|user| store.as_seen_by(user, user_id))
            .collect())
    }

    async fn friend_requests(&self, user_id: &str) -> Result<Vec<User>> {
        let store = self.store.read().await;
        Ok(store
            .requests
            .iter()
            .filter(|(_, to)| to == user_id)
            .filter_map(|(from, _)| store.user(from))
            .map(|user| store.as_seen_by(user, user_id))
            .collect())
    }

    async fn friend_suggestions(&self, user_id: &str) -> Result<Vec<User>> {
        let store = self.store.read().await;
        let me = store.existing_user(user_id)?;
        Ok(store
            .users
            .iter()
            .filter(|user| user.id != user_id && !user.is_banned)
            .filter(|user| !me.has_blocked(&user.id) && !user.has_blocked(user_id))
            .filter(|user| !store.are_friends(user_id, &user.id))
            .filter(|user| !store.has_request(&user.id, user_id))
            .map(|user| store.as_seen_by(user, user_id))
            .collect())
    }

    async fn feed_for(&self, user_id: &str) -> Result<Vec<Post>> {
        let store = self.store.read().await;
        let Some(me) = store.user(user_id) else {
            return Ok(Vec::new());
        };

        let visible = |post: &&Post| {
            if me.has_blocked(&post.author_id) {
                return false;
            }
            let Some(author) = store.user(&post.author_id) else {
                return false;
            };
            if author.is_banned || author.has_blocked(user_id) {
                return false;
            }
            match author.privacy_settings.post_visibility {
                PostVisibility::Public => true,
                PostVisibility::Friends => {
                    author.id == user_id || store.are_friends(user_id, &author.id)
                }
            }
        };
        Ok(store.posts.iter().filter(visible).cloned().collect())
    }

    async fn posts_by(&self, author_id: &str) -> Result<Vec<Post>> {
        let store = self.store.read().await;
        Ok(store
            .posts
            .iter()
            .filter(|post| post.author_id == author_id && !post.is_sponsored)
            .cloned()
            .collect())
    }

    async fn get_post(&self, post_id: &str) -> Result<Option<Post>> {
        let store = self.store.read().await;
        Ok(store.posts.iter().find(|post| post.id == post_id).cloned())
    }

    async fn create_post(
        &self,
        user_id: &str,
        caption: &str,
        image_prompt: Option<&str>,
    ) -> Result<Post> {
        let mut store = self.store.write().await;
        let author = store.existing_user(user_id)?;
        let caption = match (optional(caption), image_prompt.and_then(optional)) {
            (Some(caption), _) => caption,
            (None, Some(prompt)) => prompt,
            (None, None) => DEFAULT_CAPTION.to_string(),
        };
        let post = Post {
            id: format!("p_{}", Uuid::new_v4().simple()),
            author_id: author.id.clone(),
            author_name: author.name.clone(),
            caption,
            like_count: 0,
            liked_by: Vec::new(),
            comments: Vec::new(),
            is_sponsored: false,
            sponsor_name: None,
        };
        store.posts.insert(0, post.clone());
        Ok(post)
    }

    async fn add_comment(&self, post_id: &str, user_id: &str) -> Result<Post> {
        let mut store = self.store.write().await;
        let author = store.existing_user(user_id)?.clone();
        let post = store.post_mut(post_id)?;
        post.comments.push(Comment {
            id: format!("c_{}", Uuid::new_v4().simple()),
            post_id: post_id.to_string(),
            author_id: author.id,
            author_name: author.name,
        });
        Ok(post.clone())
    }

    async fn update_profile(&self, user_id: &str, update: ProfileUpdate) -> Result<User> {
        let mut store = self.store.write().await;
        let user = store.user_mut(user_id)?;

        for (field, value) in update.fields {
            match field {
                ProfileField::Name => {
                    if let Some(name) = optional(&value) {
                        user.name = name;
                    }
                }
                ProfileField::Bio => user.bio = value.trim().to_string(),
                ProfileField::Work => user.work = optional(&value),
                ProfileField::Education => user.education = optional(&value),
                ProfileField::Hometown => user.hometown = optional(&value),
                ProfileField::CurrentCity => user.current_city = optional(&value),
                ProfileField::RelationshipStatus => {
                    if let Some(status) = RelationshipStatus::from_spoken(&value) {
                        user.relationship_status = Some(status);
                    }
                }
            }
        }
        if let Some(privacy) = update.privacy_settings {
            user.privacy_settings = privacy;
        }
        Ok(user.clone())
    }

    async fn like_post(&self, post_id: &str, user_id: &str) -> Result<Post> {
        let mut store = self.store.write().await;
        let post = store.post_mut(post_id)?;
        if !post.liked_by.iter().any(|id| id == user_id) {
            post.liked_by.push(user_id.to_string());
            post.like_count += 1;
        }
        Ok(post.clone())
    }

    async fn send_friend_request(
        &self,
        user_id: &str,
        target_id: &str,
    ) -> Result<FriendRequestOutcome> {
        let mut store = self.store.write().await;
        let target = store.existing_user(target_id)?.clone();

        if target.privacy_settings.friend_request_privacy == FriendRequestPrivacy::FriendsOfFriends
        {
            let mutual = store
                .friendships
                .iter()
                .filter_map(|(a, b)| match (a.as_str(), b.as_str()) {
                    (a, b) if a == target_id => Some(b),
                    (a, b) if b == target_id => Some(a),
                    _ => None,
                })
                .any(|friend| store.are_friends(user_id, friend));
            if !mutual {
                return Ok(FriendRequestOutcome::RestrictedByPrivacy(target));
            }
        }

        if !store.are_friends(user_id, target_id) && !store.has_request(user_id, target_id) {
            store
                .requests
                .push((user_id.to_string(), target_id.to_string()));
        }
        Ok(FriendRequestOutcome::Sent(store.as_seen_by(&target, user_id)))
    }

    async fn accept_friend_request(&self, user_id: &str, requester_id: &str) -> Result<User> {
        let mut store = self.store.write().await;
        if !store.has_request(requester_id, user_id) {
            return Err(VoicebookError::not_found("friend request", requester_id));
        }
        store
            .requests
            .retain(|(from, to)| !(from == requester_id && to == user_id));
        store
            .friendships
            .insert(friendship_key(user_id, requester_id));

        let requester = store.existing_user(requester_id)?;
        Ok(store.as_seen_by(requester, user_id))
    }

    async fn decline_friend_request(&self, user_id: &str, requester_id: &str) -> Result<User> {
        let mut store = self.store.write().await;
        if !store.has_request(requester_id, user_id) {
            return Err(VoicebookError::not_found("friend request", requester_id));
        }
        store
            .requests
            .retain(|(from, to)| !(from == requester_id && to == user_id));

        let requester = store.existing_user(requester_id)?;
        Ok(store.as_seen_by(requester, user_id))
    }

    async fn block_user(&self, user_id: &str, target_id: &str) -> Result<User> {
        let mut store = self.store.write().await;
        store.existing_user(target_id)?;
        store.friendships.remove(&friendship_key(user_id, target_id));
        store.requests.retain(|(from, to)| {
            !((from == user_id && to == target_id) || (from == target_id && to == user_id))
        });

        let user = store.user_mut(user_id)?;
        if !user.has_blocked(target_id) {
            user.blocked_user_ids.push(target_id.to_string());
        }
        Ok(user.clone())
    }

    async fn unblock_user(&self, user_id: &str, target_id: &str) -> Result<User> {
        let mut store = self.store.write().await;
        let user = store.user_mut(user_id)?;
        user.blocked_user_ids.retain(|id| id != target_id);
        Ok(user.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_authenticate_is_fuzzy_and_refuses_banned_users() {
        let repo = InMemorySocialRepository::seeded();

        let user = repo.authenticate("sumi ahmad").await.unwrap().unwrap();
        assert_eq!(user.id, "u_1");

        assert!(repo.authenticate("karim uddin").await.unwrap().is_none());
        assert!(repo.authenticate("zzz").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_search_by_first_name() {
        let repo = InMemorySocialRepository::seeded();

        let found = repo.search_users("rohan").await.unwrap();
        assert_eq!(found.first().map(|u| u.id.as_str()), Some("u_4"));

        let found = repo.search_users("karim").await.unwrap();
        assert!(found.iter().all(|u| !u.is_banned));
        assert!(repo.search_users("zzz").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_sign_up_rejects_taken_names() {
        let repo = InMemorySocialRepository::seeded();

        assert!(repo.sign_up("  sumi AHMED ").await.unwrap().is_none());

        let user = repo.sign_up("Tanvir Hasan").await.unwrap().unwrap();
        assert!(user.id.starts_with("u_"));
        assert_eq!(user.bio, DEFAULT_BIO);
        assert_eq!(user.voice_coins, WELCOME_COINS);
        assert_eq!(repo.get_user(&user.id).await.unwrap(), Some(user));
    }

    #[tokio::test]
    async fn test_like_is_idempotent_per_user() {
        let repo = InMemorySocialRepository::seeded();

        let post = repo.like_post("p_2", "u_1").await.unwrap();
        assert_eq!(post.like_count, 1);
        let post = repo.like_post("p_2", "u_1").await.unwrap();
        assert_eq!(post.like_count, 1);

        let err = repo.like_post("missing", "u_1").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_feed_hides_banned_and_friends_only_posts() {
        let repo = InMemorySocialRepository::seeded();

        let ids: Vec<String> = repo
            .feed_for("u_1")
            .await
            .unwrap()
            .into_iter()
            .map(|post| post.id)
            .collect();
        assert_eq!(ids, vec!["p_1", "p_2", "camp_1", "p_5"]);

        repo.block_user("u_1", "u_4").await.unwrap();
        let feed = repo.feed_for("u_1").await.unwrap();
        assert!(feed.iter().all(|post| post.author_id != "u_4"));
    }

    #[tokio::test]
    async fn test_friend_request_privacy() {
        let repo = InMemorySocialRepository::seeded();

        // Sharmin only accepts requests from friends of friends
        let outcome = repo.send_friend_request("u_1", "u_3").await.unwrap();
        assert!(matches!(outcome, FriendRequestOutcome::RestrictedByPrivacy(ref u) if u.id == "u_3"));

        repo.make_friends("u_3", "u_2").await;
        let outcome = repo.send_friend_request("u_1", "u_3").await.unwrap();
        match outcome {
            FriendRequestOutcome::Sent(user) => {
                assert_eq!(user.friendship_status, FriendshipStatus::RequestSent)
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_accept_and_decline_requests() {
        let repo = InMemorySocialRepository::seeded();

        let requests = repo.friend_requests("u_1").await.unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].friendship_status, FriendshipStatus::PendingApproval);

        let nadia = repo.accept_friend_request("u_1", "u_5").await.unwrap();
        assert_eq!(nadia.friendship_status, FriendshipStatus::Friends);
        assert!(repo.friend_requests("u_1").await.unwrap().is_empty());

        let err = repo.decline_friend_request("u_1", "u_5").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_update_profile_applies_fields_and_privacy() {
        let repo = InMemorySocialRepository::seeded();
        let mut privacy = voicebook_core::social::PrivacySettings::default();
        privacy.post_visibility = PostVisibility::Friends;

        let user = repo
            .update_profile(
                "u_1",
                ProfileUpdate {
                    fields: vec![
                        (ProfileField::Work, "Headteacher".to_string()),
                        (ProfileField::RelationshipStatus, "engaged".to_string()),
                        (ProfileField::Hometown, "  ".to_string()),
                    ],
                    privacy_settings: Some(privacy),
                },
            )
            .await
            .unwrap();

        assert_eq!(user.work.as_deref(), Some("Headteacher"));
        assert_eq!(user.relationship_status, Some(RelationshipStatus::Engaged));
        assert_eq!(user.hometown, None);
        assert_eq!(user.privacy_settings.post_visibility, PostVisibility::Friends);
    }

    #[tokio::test]
    async fn test_block_and_unblock() {
        let repo = InMemorySocialRepository::seeded();

        let me = repo.block_user("u_1", "u_2").await.unwrap();
        assert!(me.has_blocked("u_2"));
        assert!(repo.friends_of("u_1").await.unwrap().iter().all(|u| u.id != "u_2"));

        let me = repo.unblock_user("u_1", "u_2").await.unwrap();
        assert!(!me.has_blocked("u_2"));
    }

    #[tokio::test]
    async fn test_create_post_goes_to_top() {
        let repo = InMemorySocialRepository::seeded();

        let post = repo.create_post("u_1", "", Some("a sunset")).await.unwrap();
        assert_eq!(post.caption, "a sunset");
        assert_eq!(repo.feed_for("u_1").await.unwrap()[0].id, post.id);

        let post = repo.add_comment(&post.id, "u_2").await.unwrap();
        assert_eq!(post.comments[0].author_name, "Shojib Khan");
    }
}
