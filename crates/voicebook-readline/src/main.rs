use std::borrow::Cow::{self, Borrowed, Owned};
use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use tracing_subscriber::EnvFilter;

use voicebook_application::{
    Effect, InMemorySocialRepository, IntentDispatcher, TurnReport, VoiceSession,
};
use voicebook_core::config::VoicebookConfig;
use voicebook_core::SpeechError;
use voicebook_interaction::resolver_from_settings;

/// Slash commands and what they do, shown as hints while typing.
static COMMANDS: [(&str, &str); 3] = [
    ("/deny", "simulate a denied microphone"),
    ("/screen", "show the active screen"),
    ("/quit", "exit"),
];

/// Completes and hints the slash commands; everything else is a transcript.
#[derive(Clone, Copy, Default)]
struct VoiceHelper;

impl VoiceHelper {
    fn matching(prefix: &str) -> impl Iterator<Item = &'static (&'static str, &'static str)> {
        COMMANDS
            .iter()
            .filter(move |(command, _)| prefix.starts_with('/') && command.starts_with(prefix))
    }
}

impl Helper for VoiceHelper {}

impl Completer for VoiceHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let candidates = Self::matching(&line[..pos])
            .map(|(command, _)| Pair {
                display: command.to_string(),
                replacement: command.to_string(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Highlighter for VoiceHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Owned(hint.bright_black().to_string())
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for VoiceHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let typed = &line[..pos];
        if typed.contains(' ') {
            return None;
        }
        Self::matching(typed)
            .next()
            .map(|(command, about)| format!("{}  ({about})", &command[typed.len()..]))
    }
}

impl Validator for VoiceHelper {}

fn print_turn(report: &TurnReport) {
    if !report.response.is_unknown() {
        println!(
            "{}",
            format!("  intent: {}", report.response.intent).bright_black()
        );
    }
    if let Some(status) = report.status() {
        println!("{}", status.bright_blue());
    }
    match &report.outcome.effect {
        Effect::NoOp => {}
        effect => println!("{}", format!("  {effect:?}").bright_black()),
    }
}

/// Text REPL standing in for the microphone: each line is one final
/// transcript.
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = VoicebookConfig::load()?;
    let resolver = resolver_from_settings(&config.nlu);
    let repository = Arc::new(InMemorySocialRepository::seeded());
    let session = VoiceSession::new(resolver, IntentDispatcher::new(repository));
    tracing::info!("[Repl] Session ready on the {} screen", session.screen().await);

    let mut rl = Editor::new()?;
    rl.set_helper(Some(VoiceHelper));

    println!("{}", "=== VoiceBook ===".bright_magenta().bold());
    println!(
        "{}",
        "Say your name to log in (try \"Sumi Ahmed\"), or \"sign up\". '/quit' exits."
            .bright_black()
    );
    println!();

    loop {
        let prompt = format!("[{}] >> ", session.screen().await);
        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(trimmed);

                match trimmed {
                    "/quit" | "quit" | "exit" => {
                        println!("{}", "Goodbye!".bright_green());
                        break;
                    }
                    "/screen" => {
                        let state = session.snapshot().await;
                        let user = state
                            .current_user
                            .as_ref()
                            .map_or("nobody", |user| user.name.as_str());
                        println!(
                            "{}",
                            format!(
                                "{} screen, signed in as {}, voice {}",
                                state.current_screen(),
                                user,
                                session.voice_state().await
                            )
                            .bright_black()
                        );
                        continue;
                    }
                    "/deny" => {
                        let status = session
                            .on_speech_error(SpeechError::from_code("not-allowed"))
                            .await;
                        println!("{}", status.yellow());
                        continue;
                    }
                    _ => {}
                }

                if let Err(err) = session.start_listening().await {
                    println!("{}", err.to_string().yellow());
                    continue;
                }
                let report = session.handle_transcript(trimmed).await;
                tracing::debug!(
                    "[Repl] '{}' resolved to {} ({:?})",
                    report.transcript,
                    report.response.intent,
                    report.outcome.effect
                );
                print_turn(&report);
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type '/quit' to exit.".yellow());
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                tracing::error!("[Repl] Readline failed: {:?}", err);
                eprintln!("{}", format!("Error: {err:?}").red());
                break;
            }
        }
    }

    Ok(())
}
