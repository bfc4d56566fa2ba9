#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;

use std::sync::Arc;

use anyhow::Result;
use tokio::io::AsyncBufReadExt;
use tokio::io::BufReader;
use tokio::sync::mpsc;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use yansi::Paint;

use crate::domain::models::Event;
use crate::domain::models::Language;
use crate::domain::models::Message;
use crate::domain::models::Sender;
use crate::domain::models::SlashCommand;
use crate::domain::services::AppState;
use crate::domain::services::LanguageStore;
use crate::domain::services::TypingIndicator;

pub fn help_text() -> String {
    let text = r#"
COMMANDS:
- /simplify (/s) TEXT - Explains TEXT in friendly, everyday language.
- /analyze (/a) TEXT - Breaks down a research paper or scientific passage.
- /translate (/t) [bn,en] TEXT - Translates TEXT to Bengali (default) or English.
- /research (/r) TEXT - Runs a deeper research answer on a topic.
- /bilingual (/b) - Toggles asking for a Bengali translation of every reply.
- /lang (/l) - Switches the display language between English and Bengali.
- /history (/hi) - Loads your earlier conversations.
- /quit /exit (/q) - Exit Curio.
- /help (/h) - Provides this help menu.

Anything else you type is sent to Curio as a question.
        "#;

    return text.trim().to_string();
}

pub fn sender_label(sender: Sender, language: Language) -> &'static str {
    match (sender, language) {
        (Sender::User, Language::English) => return "You",
        (Sender::User, Language::Bengali) => return "তুমি",
        (Sender::Assistant, Language::English) => return "Curio",
        (Sender::Assistant, Language::Bengali) => return "কিউরিও",
    }
}

pub fn typing_text(language: Language) -> &'static str {
    if language == Language::English {
        return "Curio is typing...";
    }

    return "কিউরিও লিখছে...";
}

pub fn format_message(message: &Message, language: Language) -> String {
    let mut res = format!(
        "{}: {}",
        sender_label(message.sender, language),
        message.text.trim_end()
    );

    if let Some(translation) = &message.translation {
        res = format!("{res}\n  ({})", translation.trim_end());
    }

    return res;
}

fn print_message(message: &Message, language: Language) {
    let formatted = format_message(message, language);
    if message.is_failure() {
        println!("{}", Paint::red(formatted));
    } else if message.sender == Sender::User {
        println!("{}", Paint::cyan(formatted));
    } else {
        println!("{}", Paint::green(formatted));
    }
}

/// Mirrors store changes and the typing indicator onto the terminal. Every
/// appended message is printed as it lands, which keeps the newest entry at
/// the bottom of the screen.
async fn render_loop(
    mut events: mpsc::UnboundedReceiver<Event>,
    mut indicator: TypingIndicator,
    mut languages: mpsc::UnboundedReceiver<Language>,
    mut shutdown: oneshot::Receiver<()>,
    mut language: Language,
) -> Result<()> {
    loop {
        tokio::select! {
            biased;

            event = events.recv() => match event {
                Some(Event::MessageAppended(message)) => print_message(&message, language),
                Some(Event::TranscriptReplaced(messages)) => {
                    println!("{}", Paint::new("--- history ---").dimmed());
                    for message in messages.iter() {
                        print_message(message, language);
                    }
                }
                None => return Ok(()),
            },
            visible = indicator.changed() => match visible {
                Ok(true) => println!("{}", Paint::new(typing_text(language)).dimmed().italic()),
                Ok(false) => {}
                Err(_) => return Ok(()),
            },
            Some(next) = languages.recv() => {
                language = next;
            }
            _ = &mut shutdown => return Ok(()),
        }
    }
}

async fn load_history(app_state: Arc<AppState>, language: Language) {
    let loaded = app_state.load_history().await;

    // Merged history is printed by the render loop; anything loaded after the
    // user started talking is only shown, never merged.
    if loaded.is_late() {
        println!("{}", Paint::new("--- earlier messages ---").dimmed());
        for message in loaded.messages.iter() {
            println!("{}", Paint::new(format_message(message, language)).dimmed());
        }
    }
}

pub async fn start(app_state: Arc<AppState>, mut language_store: LanguageStore) -> Result<()> {
    let language = language_store.language();
    for message in app_state.conversation.all().iter() {
        print_message(message, language);
    }

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let render = tokio::spawn(render_loop(
        app_state.conversation.subscribe(),
        app_state.dispatcher.indicator(),
        language_store.subscribe(),
        shutdown_rx,
        language,
    ));

    tokio::spawn(load_history(app_state.clone(), language));

    let mut translate_reply = false;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    // Lazy default.
    let mut worker: JoinHandle<()> = tokio::spawn(async {});

    while let Some(line) = lines.next_line().await? {
        let language = language_store.language();
        let mut request_type = None;
        let mut translation_direction = None;
        let mut text = line.clone();

        if let Some(command) = SlashCommand::parse(&line) {
            if command.is_quit() {
                break;
            }
            if command.is_help() {
                println!("{}", help_text());
                continue;
            }
            if command.is_history() {
                tokio::spawn(load_history(app_state.clone(), language));
                continue;
            }
            if command.is_language_toggle() {
                let next = language_store.toggle().await;
                println!(
                    "{}",
                    language_store.translate("Switched to English.", "বাংলায় পরিবর্তন করা হয়েছে।")
                );
                tracing::debug!(language = next.to_string(), "Toggled language");
                continue;
            }
            if command.is_bilingual_toggle() {
                translate_reply = !translate_reply;
                let state = if translate_reply { "on" } else { "off" };
                println!("Bengali translations of replies are {state}.");
                continue;
            }

            request_type = command.request_type();
            translation_direction = command.translation_direction();
            text = command.text();
        }

        if text.trim().is_empty() {
            continue;
        }

        // The dispatcher is the authority, this only spares a round of
        // rejected input while a reply is pending.
        if app_state.dispatcher.is_busy() || !worker.is_finished() {
            println!(
                "{}",
                Paint::yellow(language_store.translate(
                    "Curio is still answering, please wait.",
                    "কিউরিও এখনো উত্তর দিচ্ছে, একটু অপেক্ষা করো।",
                ))
            );
            continue;
        }

        let worker_state = app_state.clone();
        worker = tokio::spawn(async move {
            let res = worker_state
                .submit(&text, request_type, translation_direction, translate_reply)
                .await;
            if let Err(err) = res {
                tracing::debug!(error = ?err, "Submission rejected");
            }
        });
    }

    // Let a pending reply land before leaving.
    worker.await?;
    // The render task may already have stopped on a closed channel.
    shutdown_tx.send(()).ok();
    render.await??;

    return Ok(());
}
