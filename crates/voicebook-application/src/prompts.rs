//! Status lines shown (or spoken) after a voice turn.

use voicebook_core::SpeechError;

pub const NOT_UNDERSTOOD: &str = "Sorry, I didn't catch that. Say \"help\" to hear what you can do.";
pub const NOT_SIGNED_IN: &str = "Please log in first.";
pub const BUSY: &str = "Still working on your last command.";
pub const DISPATCH_FAILED: &str = "Something went wrong. Please try again.";
pub const MIC_PERMISSION_DENIED: &str =
    "Microphone access was denied. Please allow microphone access to use voice commands.";

pub const LOGIN_MODE: &str = "Okay, say your name to log in.";
pub const SIGNUP_MODE: &str = "Okay, let's create your account. Say your full name.";
pub const NAME_REQUIRED: &str = "Please say your name.";

pub const FEED_EMPTY: &str = "Your feed is empty.";
pub const SETTINGS_OPENED: &str =
    "Settings opened. You can update your profile, privacy or blocked users.";
pub const SETTINGS_SAVED: &str = "Your settings have been saved.";
pub const SPONSOR_CENTER_OPENED: &str = "Welcome to the Sponsor Center.";
pub const CAMPAIGN_FORM_OPENED: &str =
    "Let's create a campaign. Tell me the sponsor name, caption and budget.";
pub const CAMPAIGN_DASHBOARD_OPENED: &str = "Here is your campaign dashboard.";
pub const CAMPAIGN_LAUNCHING: &str = "Launching your campaign. It will go live after review.";
pub const CREATE_POST_PROMPT: &str = "Say \"start recording\" when you're ready.";
pub const RECORD_START: &str = "Recording started. Say \"stop recording\" when you're done.";
pub const RECORD_STOPPED: &str = "Recording stopped. Say \"post\" to publish or \"re-record\" to try again.";
pub const POST_SUCCESS: &str = "Your voice post is live!";
pub const NOTHING_TO_POST: &str = "Please record audio or generate an image before posting.";
pub const IMAGE_CLEARED: &str = "Image removed.";
pub const COMMENT_RECORD_START: &str =
    "Recording your comment. Say \"stop recording\" when you're done.";
pub const COMMENT_STOPPED: &str = "Comment recorded. Say \"post comment\" to publish it.";
pub const COMMENT_POST_SUCCESS: &str = "Your comment has been posted.";
pub const MESSAGE_RECORD_START: &str = "Recording your message.";
pub const MESSAGE_RECORD_STOPPED: &str = "Message recorded. Say \"send\" to send it.";
pub const MESSAGE_SENT: &str = "Message sent.";
pub const CHAT_DELETED: &str = "Chat history deleted.";
pub const LIKE_SUCCESS: &str = "Post liked!";
pub const CLAIM_REWARD: &str = "Please click the 'Watch Ad & Earn' button to claim your reward.";
pub const NO_CONVERSATIONS: &str = "You don't have any conversations yet.";

pub const HELP: &str = "You can say things like \"next post\", \"like\", \"open my profile\", \
\"search for Sumi\", \"open messages\", \"scroll down\" or \"go back\".";

pub fn welcome(name: &str) -> String {
    format!("Welcome back, {name}!")
}

pub fn signup_success(name: &str) -> String {
    format!("Welcome to VoiceBook, {name}!")
}

pub fn login_failed(spoken_name: &str) -> String {
    format!("Sorry, I couldn't log in \"{spoken_name}\". Try again or say \"sign up\".")
}

pub fn name_taken(name: &str) -> String {
    format!("An account named {name} already exists. Say \"login\" to sign in instead.")
}

pub fn user_not_found(name: &str) -> String {
    format!("I couldn't find anyone named {name}.")
}

pub fn conversation_not_found(name: &str) -> String {
    format!("I couldn't find a conversation with {name}.")
}

pub fn profile_loaded(name: &str) -> String {
    format!("Showing {name}'s profile.")
}

pub fn friends_loaded(requests: usize) -> String {
    match requests {
        0 => "Here are your friends.".to_string(),
        1 => "You have 1 friend request.".to_string(),
        n => format!("You have {n} friend requests."),
    }
}

pub fn conversations_loaded(count: usize) -> String {
    format!("You have {count} conversations. Say a name to open one.")
}

pub fn message_screen_loaded(name: &str) -> String {
    format!("Chat with {name}. Say \"record message\" to start.")
}

pub fn post_details_loaded(author: &str, comments: usize) -> String {
    format!("Post by {author} with {comments} comments.")
}

pub fn search_results(query: &str, count: usize) -> String {
    match count {
        0 => format!("No one matched \"{query}\"."),
        1 => format!("Found 1 person for \"{query}\"."),
        n => format!("Found {n} people for \"{query}\". Say \"select result\" and a number."),
    }
}

pub fn friend_request_sent(name: &str) -> String {
    format!("Friend request sent to {name}.")
}

pub fn friend_request_privacy_block(name: &str) -> String {
    format!("{name} only accepts friend requests from friends of friends.")
}

pub fn friend_request_accepted(name: &str) -> String {
    format!("You are now friends with {name}.")
}

pub fn friend_request_declined(name: &str) -> String {
    format!("Declined the request from {name}.")
}

pub fn user_blocked(name: &str) -> String {
    format!("{name} has been blocked.")
}

pub fn user_unblocked(name: &str) -> String {
    format!("{name} has been unblocked.")
}

pub fn profile_field_updated(field: &str, value: &str) -> String {
    format!("{field} set to \"{value}\". Say \"save settings\" to keep it.")
}

pub fn privacy_setting_updated(setting: &str, value: &str) -> String {
    format!("{setting} set to {value}. Say \"save settings\" to keep it.")
}

pub fn chat_theme_changed(theme: &str) -> String {
    format!("Chat theme changed to {theme}.")
}

pub fn image_prompt_set(prompt: &str) -> String {
    format!("Generating an image of \"{prompt}\".")
}

pub fn no_comments_from(name: &str) -> String {
    format!("Sorry, I couldn't find a comment from {name} on this post.")
}

pub fn playing_comment_from(name: &str) -> String {
    format!("Playing comment from {name}.")
}

pub fn no_post_by(name: &str) -> String {
    format!("Sorry, I couldn't find a post by {name} in your feed.")
}

pub fn campaign_field_set(field: &str, value: &str) -> String {
    format!("Campaign {field} set to {value}.")
}

pub fn budget_set(amount: &str) -> String {
    format!("Budget set to {amount} Taka.")
}

pub fn campaign_missing(field: &str) -> String {
    format!("Please set the campaign {field} before launching.")
}

pub fn speech_error(error: &SpeechError) -> String {
    if error.is_permission_denied() {
        return MIC_PERMISSION_DENIED.to_string();
    }
    format!("Speech recognition error: {error}. Please try again.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speech_error_messages() {
        assert_eq!(speech_error(&SpeechError::from_code("not-allowed")), MIC_PERMISSION_DENIED);
        assert_eq!(
            speech_error(&SpeechError::from_code("service-not-allowed")),
            MIC_PERMISSION_DENIED
        );
        assert!(speech_error(&SpeechError::NoSpeech).starts_with("Speech recognition error"));
    }

    #[test]
    fn test_counted_messages() {
        assert_eq!(friends_loaded(1), "You have 1 friend request.");
        assert_eq!(search_results("x", 0), "No one matched \"x\".");
    }
}
