//! Social domain module.
//!
//! # Module Structure
//!
//! - `model`: users, posts, privacy and the fixed enumerations slots are
//!   validated against
//! - `repository`: the repository trait dispatch runs against

mod model;
mod repository;

// Re-export public API
pub use model::{
    ChatTheme, Comment, FriendRequestOutcome, FriendRequestPrivacy, FriendshipStatus, MediaType,
    Post, PostVisibility, PrivacySettings, PrivacyUpdate, ProfileField, RelationshipStatus, User,
};
pub use repository::{ProfileUpdate, SocialRepository};
