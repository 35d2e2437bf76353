use std::sync::Arc;

use voicebook_application::prompts;
use voicebook_application::screen::{AuthMode, PostPlayback, RecordingState};
use voicebook_application::{
    DispatchOutcome, Effect, InMemorySocialRepository, IntentDispatcher, Screen, ScreenState,
    SessionState,
};
use voicebook_core::intent::slot_keys;
use voicebook_core::social::{ChatTheme, FriendRequestPrivacy, MediaType, PostVisibility};
use voicebook_core::{Intent, NluResponse, SocialRepository};

fn dispatcher() -> IntentDispatcher {
    IntentDispatcher::new(Arc::new(InMemorySocialRepository::seeded()))
}

async fn signed_in_as_sumi() -> (IntentDispatcher, SessionState) {
    let dispatcher = dispatcher();
    let mut state = SessionState::new();
    let outcome = dispatcher
        .dispatch_auth("Sumi Ahmed", &mut state)
        .await
        .unwrap();
    assert!(matches!(outcome.effect, Effect::SignedIn(ref user) if user.id == "u_1"));
    (dispatcher, state)
}

async fn run(
    dispatcher: &IntentDispatcher,
    state: &mut SessionState,
    response: NluResponse,
) -> DispatchOutcome {
    dispatcher.dispatch(&response, state).await.unwrap()
}

fn say(intent: Intent) -> NluResponse {
    NluResponse::new(intent)
}

fn say_with(intent: Intent, key: &str, value: &str) -> NluResponse {
    NluResponse::new(intent).with_slot(key, value)
}

#[tokio::test]
async fn test_auth_switches_modes_and_signs_in() {
    let dispatcher = dispatcher();
    let mut state = SessionState::new();

    let outcome = dispatcher.dispatch_auth("I want to sign up", &mut state).await.unwrap();
    assert_eq!(outcome.effect, Effect::Announced);
    assert_eq!(outcome.status.as_deref(), Some(prompts::SIGNUP_MODE));
    assert_eq!(state.screen, ScreenState::Auth(AuthMode::Signup));

    let outcome = dispatcher.dispatch_auth("Sumi Ahmed", &mut state).await.unwrap();
    assert!(outcome.effect.is_noop());
    assert_eq!(outcome.status, Some(prompts::name_taken("Sumi Ahmed")));

    dispatcher.dispatch_auth("login", &mut state).await.unwrap();
    assert_eq!(state.screen, ScreenState::Auth(AuthMode::Login));

    let outcome = dispatcher.dispatch_auth("   ", &mut state).await.unwrap();
    assert_eq!(outcome.status.as_deref(), Some(prompts::NAME_REQUIRED));

    let outcome = dispatcher.dispatch_auth("sumi ahmad", &mut state).await.unwrap();
    assert!(matches!(outcome.effect, Effect::SignedIn(ref user) if user.name == "Sumi Ahmed"));
    assert!(state.is_on(Screen::Feed));
    assert!(!state.can_go_back());
    let friends: Vec<_> = state.friends.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(friends, vec!["Shojib Khan", "Rohan Mahmud"]);
}

#[tokio::test]
async fn test_banned_user_cannot_log_in() {
    let dispatcher = dispatcher();
    let mut state = SessionState::new();
    let outcome = dispatcher.dispatch_auth("Karim Uddin", &mut state).await.unwrap();
    assert!(outcome.effect.is_noop());
    assert!(state.current_user.is_none());
    assert!(state.is_on(Screen::Auth));
}

#[tokio::test]
async fn test_sign_up_creates_account_and_lands_on_feed() {
    let dispatcher = dispatcher();
    let mut state = SessionState::new();
    dispatcher.dispatch_auth("sign up", &mut state).await.unwrap();

    let outcome = dispatcher.dispatch_auth("Tanvir Hasan", &mut state).await.unwrap();
    assert!(matches!(outcome.effect, Effect::SignedIn(ref user) if user.name == "Tanvir Hasan"));
    assert_eq!(outcome.status, Some(prompts::signup_success("Tanvir Hasan")));
    assert!(state.is_on(Screen::Feed));
}

#[tokio::test]
async fn test_intents_before_sign_in_are_noops() {
    let dispatcher = dispatcher();
    let mut state = SessionState::new();

    let outcome = run(&dispatcher, &mut state, say(Intent::OpenMessages)).await;
    assert!(outcome.effect.is_noop());
    assert_eq!(outcome.status.as_deref(), Some(prompts::NOT_SIGNED_IN));

    let outcome = run(&dispatcher, &mut state, say(Intent::Help)).await;
    assert_eq!(outcome.effect, Effect::Announced);
}

#[tokio::test]
async fn test_like_requires_a_selected_organic_post() {
    let (dispatcher, mut state) = signed_in_as_sumi().await;

    // Nothing selected yet
    let outcome = run(&dispatcher, &mut state, say(Intent::Like)).await;
    assert!(outcome.effect.is_noop());

    let outcome = run(&dispatcher, &mut state, say(Intent::NextPost)).await;
    assert_eq!(outcome.effect, Effect::ScreenUpdated(Screen::Feed));
    let outcome = run(&dispatcher, &mut state, say(Intent::Like)).await;
    match outcome.effect {
        Effect::PostLiked(post) => {
            assert_eq!(post.id, "p_1");
            assert_eq!(post.like_count, 2);
        }
        other => panic!("expected a like, got {other:?}"),
    }

    // p_2, then the sponsored camp_1
    run(&dispatcher, &mut state, say(Intent::NextPost)).await;
    run(&dispatcher, &mut state, say(Intent::NextPost)).await;
    let ScreenState::Feed(playback) = &state.screen else {
        panic!("expected the feed");
    };
    assert_eq!(playback.current().map(|p| p.id.as_str()), Some("camp_1"));
    let outcome = run(&dispatcher, &mut state, say(Intent::Like)).await;
    assert!(outcome.effect.is_noop());
}

#[tokio::test]
async fn test_empty_feed_is_a_noop() {
    let repository = Arc::new(InMemorySocialRepository::seeded());
    let user = repository.get_user("u_1").await.unwrap().unwrap();
    let dispatcher = IntentDispatcher::new(repository);
    let mut state =
        SessionState::signed_in(user, vec![], ScreenState::Feed(PostPlayback::new(vec![])));

    let outcome = run(&dispatcher, &mut state, say(Intent::PlayPost)).await;
    assert!(outcome.effect.is_noop());
    assert_eq!(outcome.status.as_deref(), Some(prompts::FEED_EMPTY));

    let outcome = run(&dispatcher, &mut state, say(Intent::NextPost)).await;
    assert!(outcome.effect.is_noop());
}

#[tokio::test]
async fn test_screen_intents_on_other_screens_are_noops() {
    let (dispatcher, mut state) = signed_in_as_sumi().await;

    for intent in [
        Intent::StopRecording,
        Intent::SendChatMessage,
        Intent::SaveSettings,
        Intent::LaunchCampaign,
        Intent::PostComment,
        Intent::ClearImage,
    ] {
        let outcome = run(&dispatcher, &mut state, say(intent)).await;
        assert!(outcome.effect.is_noop(), "{intent} should not apply on the feed");
    }
    let outcome = run(
        &dispatcher,
        &mut state,
        say_with(Intent::SelectResult, slot_keys::INDEX, "1"),
    )
    .await;
    assert!(outcome.effect.is_noop());
    assert!(state.is_on(Screen::Feed));
}

#[tokio::test]
async fn test_open_navigation_is_noop_on_same_screen_and_go_back_returns() {
    let (dispatcher, mut state) = signed_in_as_sumi().await;

    let outcome = run(&dispatcher, &mut state, say(Intent::OpenMessages)).await;
    assert_eq!(outcome.effect, Effect::Navigated(Screen::Conversations));
    let outcome = run(&dispatcher, &mut state, say(Intent::OpenMessages)).await;
    assert!(outcome.effect.is_noop());

    let outcome = run(&dispatcher, &mut state, say(Intent::GoBack)).await;
    assert_eq!(outcome.effect, Effect::WentBack(Screen::Feed));
    let outcome = run(&dispatcher, &mut state, say(Intent::GoBack)).await;
    assert!(outcome.effect.is_noop());
}

#[tokio::test]
async fn test_chat_theme_must_be_in_theme_table() {
    let (dispatcher, mut state) = signed_in_as_sumi().await;
    run(&dispatcher, &mut state, say(Intent::OpenMessages)).await;

    // Conversations only accept a listed peer, spelled exactly
    let outcome = run(
        &dispatcher,
        &mut state,
        say_with(Intent::OpenChat, slot_keys::TARGET_NAME, "Nadia Islam"),
    )
    .await;
    assert!(outcome.effect.is_noop());
    let outcome = run(
        &dispatcher,
        &mut state,
        say_with(Intent::OpenChat, slot_keys::TARGET_NAME, "Shojib Khan"),
    )
    .await;
    assert_eq!(outcome.effect, Effect::Navigated(Screen::Messages));

    let outcome = run(
        &dispatcher,
        &mut state,
        say_with(Intent::ChangeChatTheme, slot_keys::THEME_NAME, "Sunset"),
    )
    .await;
    assert_eq!(outcome.effect, Effect::ScreenUpdated(Screen::Messages));
    assert_eq!(outcome.status, Some(prompts::chat_theme_changed("Sunset")));

    let outcome = run(
        &dispatcher,
        &mut state,
        say_with(Intent::ChangeChatTheme, slot_keys::THEME_NAME, "neon"),
    )
    .await;
    assert!(outcome.effect.is_noop());
    let ScreenState::Messages(chat) = &state.screen else {
        panic!("expected the chat screen");
    };
    assert_eq!(chat.theme, ChatTheme::Sunset);
}

#[tokio::test]
async fn test_chat_recorder_follows_its_states() {
    let (dispatcher, mut state) = signed_in_as_sumi().await;
    run(
        &dispatcher,
        &mut state,
        say_with(Intent::OpenChat, slot_keys::TARGET_NAME, "Rohan Mahmud"),
    )
    .await;
    assert!(state.is_on(Screen::Messages));

    let outcome = run(&dispatcher, &mut state, say(Intent::SendChatMessage)).await;
    assert!(outcome.effect.is_noop());
    let outcome = run(&dispatcher, &mut state, say(Intent::ReRecord)).await;
    assert!(outcome.effect.is_noop());

    let outcome = run(&dispatcher, &mut state, say(Intent::RecordMessage)).await;
    assert_eq!(outcome.status.as_deref(), Some(prompts::MESSAGE_RECORD_START));
    let outcome = run(&dispatcher, &mut state, say(Intent::RecordMessage)).await;
    assert!(outcome.effect.is_noop());

    let outcome = run(&dispatcher, &mut state, say(Intent::StopRecording)).await;
    assert_eq!(outcome.status.as_deref(), Some(prompts::MESSAGE_RECORD_STOPPED));
    let outcome = run(&dispatcher, &mut state, say(Intent::SendChatMessage)).await;
    assert_eq!(outcome.status.as_deref(), Some(prompts::MESSAGE_SENT));
    let ScreenState::Messages(chat) = &state.screen else {
        panic!("expected the chat screen");
    };
    assert_eq!(chat.recording, RecordingState::Idle);

    let outcome = run(&dispatcher, &mut state, say(Intent::DeleteChat)).await;
    assert_eq!(outcome.effect, Effect::WentBack(Screen::Feed));
    assert_eq!(outcome.status.as_deref(), Some(prompts::CHAT_DELETED));
}

#[tokio::test]
async fn test_privacy_values_are_validated_per_setting() {
    let (dispatcher, mut state) = signed_in_as_sumi().await;
    let outcome = run(&dispatcher, &mut state, say(Intent::OpenSettings)).await;
    assert_eq!(outcome.effect, Effect::Navigated(Screen::Settings));

    let update = |setting: &str, value: &str| {
        NluResponse::new(Intent::UpdatePrivacy)
            .with_slot(slot_keys::SETTING, setting)
            .with_slot(slot_keys::VALUE, value)
    };

    let outcome = run(&dispatcher, &mut state, update("postVisibility", "everyone")).await;
    assert!(outcome.effect.is_noop());
    let outcome = run(&dispatcher, &mut state, update("postVisibility", "friends")).await;
    assert_eq!(outcome.effect, Effect::ScreenUpdated(Screen::Settings));
    let outcome = run(
        &dispatcher,
        &mut state,
        update("friendRequestPrivacy", "friends_of_friends"),
    )
    .await;
    assert_eq!(outcome.effect, Effect::ScreenUpdated(Screen::Settings));

    // Nothing is stored until the draft is saved
    assert_eq!(
        state.current_user.as_ref().unwrap().privacy_settings.post_visibility,
        PostVisibility::Public
    );
    let outcome = run(&dispatcher, &mut state, say(Intent::SaveSettings)).await;
    let Effect::ProfileSaved(user) = outcome.effect else {
        panic!("expected the profile to be saved");
    };
    assert_eq!(user.privacy_settings.post_visibility, PostVisibility::Friends);
    assert_eq!(
        user.privacy_settings.friend_request_privacy,
        FriendRequestPrivacy::FriendsOfFriends
    );
    assert_eq!(state.current_user, Some(user));
}

#[tokio::test]
async fn test_profile_fields_and_relationship_status() {
    let (dispatcher, mut state) = signed_in_as_sumi().await;
    run(&dispatcher, &mut state, say(Intent::EditProfile)).await;

    let field = |field: &str, value: &str| {
        NluResponse::new(Intent::UpdateProfile)
            .with_slot(slot_keys::FIELD, field)
            .with_slot(slot_keys::VALUE, value)
    };

    let outcome = run(&dispatcher, &mut state, field("work", "Librarian")).await;
    assert_eq!(outcome.effect, Effect::ScreenUpdated(Screen::Settings));
    let outcome = run(&dispatcher, &mut state, field("relationshipStatus", "it's a mystery")).await;
    assert!(outcome.effect.is_noop());
    let outcome = run(&dispatcher, &mut state, field("favouriteColour", "green")).await;
    assert!(outcome.effect.is_noop());

    let outcome = run(&dispatcher, &mut state, say(Intent::SaveSettings)).await;
    let Effect::ProfileSaved(user) = outcome.effect else {
        panic!("expected the profile to be saved");
    };
    assert_eq!(user.work.as_deref(), Some("Librarian"));
}

#[tokio::test]
async fn test_friend_request_targets_must_be_listed_exactly() {
    let (dispatcher, mut state) = signed_in_as_sumi().await;
    let outcome = run(&dispatcher, &mut state, say(Intent::OpenFriendsPage)).await;
    assert_eq!(outcome.effect, Effect::Navigated(Screen::Friends));
    assert_eq!(outcome.status, Some(prompts::friends_loaded(1)));

    let outcome = run(
        &dispatcher,
        &mut state,
        say_with(Intent::AcceptRequest, slot_keys::TARGET_NAME, "Nadia"),
    )
    .await;
    assert!(outcome.effect.is_noop());

    let outcome = run(
        &dispatcher,
        &mut state,
        say_with(Intent::AcceptRequest, slot_keys::TARGET_NAME, "Nadia Islam"),
    )
    .await;
    assert!(matches!(outcome.effect, Effect::FriendRequestAccepted(ref u) if u.id == "u_5"));
    let ScreenState::Friends(friends) = &state.screen else {
        panic!("expected the friends page");
    };
    assert!(friends.requests.is_empty());
    assert!(state.friends.iter().any(|friend| friend.id == "u_5"));
}

#[tokio::test]
async fn test_privacy_restricted_friend_request_is_reported() {
    let (dispatcher, mut state) = signed_in_as_sumi().await;
    run(
        &dispatcher,
        &mut state,
        say_with(Intent::OpenProfile, slot_keys::TARGET_NAME, "Sharmin Chowdhury"),
    )
    .await;
    assert!(state.is_on(Screen::Profile));

    let outcome = run(&dispatcher, &mut state, say(Intent::AddFriend)).await;
    assert!(outcome.effect.is_noop());
    assert_eq!(
        outcome.status,
        Some(prompts::friend_request_privacy_block("Sharmin Chowdhury"))
    );
}

#[tokio::test]
async fn test_search_results_are_selected_by_spoken_position() {
    let (dispatcher, mut state) = signed_in_as_sumi().await;
    let outcome = run(
        &dispatcher,
        &mut state,
        say_with(Intent::SearchUser, slot_keys::TARGET_NAME, "Rohan Mahmud"),
    )
    .await;
    assert_eq!(outcome.effect, Effect::Navigated(Screen::SearchResults));

    let outcome = run(
        &dispatcher,
        &mut state,
        say_with(Intent::SelectResult, slot_keys::INDEX, "0"),
    )
    .await;
    assert!(outcome.effect.is_noop());

    let outcome = run(
        &dispatcher,
        &mut state,
        NluResponse::new(Intent::SelectResult).with_slot(slot_keys::INDEX, 1u64),
    )
    .await;
    assert_eq!(outcome.effect, Effect::Navigated(Screen::Profile));
    let ScreenState::Profile(profile) = &state.screen else {
        panic!("expected a profile");
    };
    assert_eq!(profile.user.id, "u_4");
}

#[tokio::test]
async fn test_voice_post_is_published_to_the_top_of_the_feed() {
    let (dispatcher, mut state) = signed_in_as_sumi().await;

    let outcome = run(&dispatcher, &mut state, say(Intent::CreatePost)).await;
    assert_eq!(outcome.effect, Effect::Navigated(Screen::CreatePost));
    let outcome = run(&dispatcher, &mut state, say(Intent::PostConfirm)).await;
    assert!(outcome.effect.is_noop());
    assert_eq!(outcome.status.as_deref(), Some(prompts::NOTHING_TO_POST));

    let outcome = run(&dispatcher, &mut state, say(Intent::CreatePost)).await;
    assert_eq!(outcome.status.as_deref(), Some(prompts::RECORD_START));
    run(&dispatcher, &mut state, say(Intent::StopRecording)).await;
    let outcome = run(&dispatcher, &mut state, say(Intent::PostConfirm)).await;
    let Effect::PostPublished(post) = outcome.effect else {
        panic!("expected a published post");
    };
    assert_eq!(post.author_id, "u_1");

    let ScreenState::Feed(playback) = &state.screen else {
        panic!("expected to be back on the feed");
    };
    assert_eq!(playback.posts[0].id, post.id);
}

#[tokio::test]
async fn test_generated_image_can_be_posted_and_cleared() {
    let (dispatcher, mut state) = signed_in_as_sumi().await;
    run(&dispatcher, &mut state, say(Intent::CreatePost)).await;

    let outcome = run(&dispatcher, &mut state, say(Intent::ClearImage)).await;
    assert!(outcome.effect.is_noop());
    run(
        &dispatcher,
        &mut state,
        say_with(Intent::GenerateImage, slot_keys::PROMPT, "tea garden at dawn"),
    )
    .await;
    let outcome = run(&dispatcher, &mut state, say(Intent::ClearImage)).await;
    assert_eq!(outcome.status.as_deref(), Some(prompts::IMAGE_CLEARED));

    run(
        &dispatcher,
        &mut state,
        say_with(Intent::GenerateImage, slot_keys::PROMPT, "tea garden at dawn"),
    )
    .await;
    let outcome = run(&dispatcher, &mut state, say(Intent::PostConfirm)).await;
    assert!(matches!(outcome.effect, Effect::PostPublished(_)));
}

#[tokio::test]
async fn test_comment_flow_from_post_details() {
    let (dispatcher, mut state) = signed_in_as_sumi().await;

    let outcome = run(
        &dispatcher,
        &mut state,
        say_with(Intent::ViewCommentsByAuthor, slot_keys::TARGET_NAME, "Shojib Khan"),
    )
    .await;
    assert_eq!(outcome.effect, Effect::Navigated(Screen::PostDetails));

    let outcome = run(
        &dispatcher,
        &mut state,
        say_with(Intent::PlayCommentByAuthor, slot_keys::TARGET_NAME, "rohan"),
    )
    .await;
    assert_eq!(outcome.status, Some(prompts::playing_comment_from("Rohan Mahmud")));

    let outcome = run(&dispatcher, &mut state, say(Intent::Comment)).await;
    assert_eq!(outcome.effect, Effect::Navigated(Screen::CreateComment));
    let outcome = run(&dispatcher, &mut state, say(Intent::PostComment)).await;
    assert!(outcome.effect.is_noop());

    run(&dispatcher, &mut state, say(Intent::StopRecording)).await;
    let outcome = run(&dispatcher, &mut state, say(Intent::PostComment)).await;
    let Effect::CommentPosted(post) = outcome.effect else {
        panic!("expected a posted comment");
    };
    assert_eq!(post.comments.len(), 3);
    let ScreenState::PostDetails(detail) = &state.screen else {
        panic!("expected to be back on the post");
    };
    assert_eq!(detail.post.comments.len(), 3);
}

#[tokio::test]
async fn test_campaign_launch_requires_required_fields() {
    let (dispatcher, mut state) = signed_in_as_sumi().await;
    run(&dispatcher, &mut state, say(Intent::OpenSponsorCenter)).await;
    run(&dispatcher, &mut state, say(Intent::CreateCampaign)).await;

    let outcome = run(&dispatcher, &mut state, say(Intent::LaunchCampaign)).await;
    assert!(outcome.effect.is_noop());
    assert_eq!(outcome.status, Some(prompts::campaign_missing("sponsor name")));

    run(
        &dispatcher,
        &mut state,
        say_with(Intent::SetSponsorName, slot_keys::SPONSOR_NAME, "Dhaka Tea House"),
    )
    .await;
    run(
        &dispatcher,
        &mut state,
        say_with(Intent::SetCampaignCaption, slot_keys::CAPTION_TEXT, "Fresh tea daily"),
    )
    .await;
    let outcome = run(
        &dispatcher,
        &mut state,
        say_with(Intent::SetCampaignBudget, slot_keys::BUDGET_AMOUNT, "five thousand"),
    )
    .await;
    assert!(outcome.effect.is_noop());
    run(
        &dispatcher,
        &mut state,
        say_with(Intent::SetCampaignBudget, slot_keys::BUDGET_AMOUNT, "5,000 taka"),
    )
    .await;
    let outcome = run(
        &dispatcher,
        &mut state,
        say_with(Intent::SetMediaType, slot_keys::MEDIA_TYPE, "hologram"),
    )
    .await;
    assert!(outcome.effect.is_noop());
    run(
        &dispatcher,
        &mut state,
        say_with(Intent::SetMediaType, slot_keys::MEDIA_TYPE, "Video"),
    )
    .await;

    let outcome = run(&dispatcher, &mut state, say(Intent::LaunchCampaign)).await;
    assert_eq!(outcome.status.as_deref(), Some(prompts::CAMPAIGN_LAUNCHING));
    let ScreenState::SponsorCenter(sponsor) = &state.screen else {
        panic!("expected the sponsor center");
    };
    assert_eq!(sponsor.campaign.budget, "5000");
    assert_eq!(sponsor.campaign.media_type, Some(MediaType::Video));
    assert!(sponsor.campaign.launch_requested);
}

#[tokio::test]
async fn test_blocking_from_a_profile_leaves_it() {
    let (dispatcher, mut state) = signed_in_as_sumi().await;
    run(
        &dispatcher,
        &mut state,
        say_with(Intent::OpenProfile, slot_keys::TARGET_NAME, "Shojib Khan"),
    )
    .await;

    let outcome = run(&dispatcher, &mut state, say(Intent::BlockUser)).await;
    assert!(matches!(outcome.effect, Effect::UserBlocked(ref u) if u.id == "u_2"));
    assert!(state.is_on(Screen::Feed));
    assert!(state.friends.iter().all(|friend| friend.id != "u_2"));
    assert!(state.current_user.as_ref().unwrap().has_blocked("u_2"));

    run(&dispatcher, &mut state, say(Intent::OpenSettings)).await;
    let outcome = run(
        &dispatcher,
        &mut state,
        say_with(Intent::UnblockUser, slot_keys::TARGET_NAME, "shojib khan"),
    )
    .await;
    assert!(matches!(outcome.effect, Effect::UserUnblocked(ref u) if u.id == "u_2"));
}
