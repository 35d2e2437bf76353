//! Prompt construction for the NLU model.

use once_cell::sync::Lazy;
use strum::IntoEnumIterator;
use voicebook_core::{Intent, NluContext};

const INSTRUCTION_HEADER: &str = r#"You are an NLU engine for a voice-controlled app called VoiceBook. Your task is to identify the user's intent and extract any relevant entities from their command.
The user can speak in English or Bengali. Understand Bengali slang and different ways of phrasing a command.
Respond ONLY with a valid JSON object with the shape: { "intent": "INTENT_NAME", "slots": { "slot_name": "value" } }.
If the intent cannot be determined, use "unknown".

CONTEXTUAL AWARENESS:
If a list of 'available_user_names' is provided in the prompt, you MUST use it as the primary source for matching the 'target_name' slot.
Find the best possible match from that list, even if the user's pronunciation is slightly off. The 'target_name' you return in the slot MUST be an exact name from the provided 'available_user_names' list.
"#;

const FEW_SHOT_EXAMPLES: &str = r#"Examples:
// With Context
User command: "go to shojib's profile"
available_user_names: ["Sumi Ahmed", "Shojib Khan", "Sharmin Chowdhury"]
-> {"intent": "intent_open_profile", "slots": {"target_name": "Shojib Khan"}}

User command: "accept sumi"
available_user_names: ["Sumi Ahmed", "Rohan Mahmud"]
-> {"intent": "intent_accept_request", "slots": {"target_name": "Sumi Ahmed"}}

// Without Context
User command: "go to shojib khan's profile" -> {"intent": "intent_open_profile", "slots": {"target_name": "shojib khan"}}
User command: "shojib er profile dekhao" -> {"intent": "intent_open_profile", "slots": {"target_name": "shojib"}}
User command: "open my profile" -> {"intent": "intent_open_profile"}
User command: "change the theme to ocean" -> {"intent": "intent_change_chat_theme", "slots": {"theme_name": "ocean"}}
"#;

/// Fixed system instruction sent with every command.
///
/// The vocabulary section is generated from [`Intent`] so the model can only
/// be told about intents the dispatcher knows.
pub static NLU_SYSTEM_INSTRUCTION: Lazy<String> = Lazy::new(|| {
    let mut instruction = String::from(INSTRUCTION_HEADER);
    instruction.push_str("\nAvailable intents:\n");
    for intent in Intent::iter().filter(|intent| *intent != Intent::Unknown) {
        instruction.push_str(&vocabulary_line(intent));
        instruction.push('\n');
    }
    instruction.push_str("- unknown\n\n");
    instruction.push_str(FEW_SHOT_EXAMPLES);
    instruction
});

fn vocabulary_line(intent: Intent) -> String {
    let slots = intent.slot_names();
    let mut notes: Vec<String> = Vec::new();
    if !slots.is_empty() {
        let quoted: Vec<String> = slots.iter().map(|slot| format!("'{slot}'")).collect();
        notes.push(format!("extracts {}", quoted.join(" and ")));
    }
    if let Some(hint) = intent.hint() {
        notes.push(hint.to_string());
    }

    if notes.is_empty() {
        format!("- {}", intent.as_str())
    } else {
        format!("- {} ({})", intent.as_str(), notes.join("; "))
    }
}

fn quote(text: &str) -> String {
    // JSON string escaping keeps stray quotes in a transcript from breaking the line
    serde_json::to_string(text).unwrap_or_else(|_| format!("\"{text}\""))
}

/// Builds the user prompt: the command, plus the candidate names if any.
pub fn build_user_prompt(transcript: &str, context: &NluContext) -> String {
    let mut prompt = format!("User command: {}", quote(transcript.trim()));
    if !context.is_empty() {
        let names: Vec<String> = context.user_names().iter().map(|n| quote(n)).collect();
        prompt.push_str(&format!("\navailable_user_names: [{}]", names.join(", ")));
    }
    prompt
}
