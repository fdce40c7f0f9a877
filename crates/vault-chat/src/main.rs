//! Terminal chat that saves every conversation as a markdown transcript.

#[macro_use]
extern crate tracing;

use std::io::Write as _;
use std::process::ExitCode;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use tokio::io::{self, AsyncBufReadExt};
use vault_chat::command::HELP;
use vault_chat::core::transcript::{Role, TranscriptStore};
use vault_chat::core::{Chat, ChatBuilder, ChatError};
use vault_chat::{Command, Config, LoadTarget, model_error_hint};
use vault_chat_openai_model::{OpenAIConfigBuilder, OpenAIProvider};

const BAR_CHAR: &str = "▎";

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let mut provider_config = OpenAIConfigBuilder::with_api_key(config.api_key);
    if let Some(base_url) = config.base_url {
        provider_config = provider_config.with_base_url(base_url);
    }
    if let Some(model) = config.model {
        provider_config = provider_config.with_model(model);
    }
    let model_provider = OpenAIProvider::new(provider_config.build());

    let store = TranscriptStore::new(config.transcript_dir);
    let mut chat = ChatBuilder::new(model_provider, store)
        .with_system_prompt(config.system_prompt)
        .with_temperature(config.temperature)
        .build();

    println!(
        "{} {} · transcripts in {}",
        "vault-chat".bright_white().bold(),
        chat.model_name().bright_cyan(),
        chat.store().directory().display()
    );
    println!("{}", "Type /help for commands.".dimmed());

    loop {
        print!("> ");
        std::io::stdout().flush().ok();

        let Some(line) = read_line().await else {
            break;
        };
        let Some(command) = Command::parse(&line) else {
            continue;
        };

        match command {
            Command::Say(text) => send(&mut chat, &text).await,
            Command::New => {
                chat.new_conversation();
                println!("{}", "Started a new conversation.".dimmed());
            }
            Command::List => list(&chat),
            Command::Load(target) => load(&mut chat, target),
            Command::Help => println!("{HELP}"),
            Command::Quit => break,
            Command::Unknown(line) => {
                print_error(&format!("Unknown command: {line}"));
            }
        }
    }
    ExitCode::SUCCESS
}

async fn send(chat: &mut Chat, text: &str) {
    let progress_style = ProgressStyle::with_template("{spinner} {wide_msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");
    let progress_bar = ProgressBar::new_spinner();
    progress_bar.set_style(progress_style);
    progress_bar.set_message("🤔 Thinking...");
    progress_bar.enable_steady_tick(Duration::from_millis(100));

    let result = chat.send_message(text).await;

    // Finish the progress bar before printing anything else.
    progress_bar.finish_and_clear();

    match result {
        Ok(outcome) => {
            print_turn(Role::Assistant, &outcome.reply);
            if outcome.truncated {
                println!("{}", "(reply was cut off)".dimmed());
            }
            match outcome.saved {
                Ok(path) => {
                    let name = path
                        .file_name()
                        .map(|name| name.to_string_lossy().into_owned())
                        .unwrap_or_default();
                    println!("{}", format!("Saved to: {name}").dimmed());
                }
                Err(err) => print_error(&format!("Failed to save: {err}")),
            }
        }
        Err(err @ ChatError::Model(_)) => {
            if let Some(kind) = err.model_error_kind() {
                print_error(model_error_hint(kind));
            }
            print_error(&err.to_string());
        }
        Err(err) => print_error(&err.to_string()),
    }
}

fn list(chat: &Chat) {
    let names = match chat.list_transcripts() {
        Ok(names) => names,
        Err(err) => return print_error(&err.to_string()),
    };
    if names.is_empty() {
        println!("{}", "No previous chats found.".dimmed());
        return;
    }
    for (idx, name) in names.iter().enumerate() {
        let marker = if chat.current_file() == Some(name.as_str()) {
            "*"
        } else {
            " "
        };
        println!("{marker}{:>3}  {name}", idx + 1);
    }
}

fn load(chat: &mut Chat, target: LoadTarget) {
    let name = match target {
        LoadTarget::Name(name) => name,
        LoadTarget::Index(idx) => {
            let names = match chat.list_transcripts() {
                Ok(names) => names,
                Err(err) => return print_error(&err.to_string()),
            };
            let Some(name) = idx.checked_sub(1).and_then(|i| names.get(i))
            else {
                return print_error(&format!("No transcript #{idx}."));
            };
            name.clone()
        }
    };

    if let Err(err) = chat.load_transcript(&name) {
        return print_error(&err.to_string());
    }
    info!("resumed {name}");
    println!("{}", format!("Current chat: {name}").dimmed());
    for msg in chat.messages() {
        print_turn(msg.role(), msg.content());
    }
}

fn print_turn(role: Role, content: &str) {
    match role {
        Role::User => {
            println!("{}🧑 {}", BAR_CHAR.bright_green(), content.white())
        }
        Role::Assistant => println!(
            "{}🤖 {}",
            BAR_CHAR.bright_cyan(),
            content.bright_white()
        ),
    }
}

fn print_error(message: &str) {
    eprintln!("{}⚠️  {}", BAR_CHAR.bright_red(), message.red());
}

async fn read_line() -> Option<String> {
    let mut stdin = io::BufReader::new(io::stdin());
    let mut line = String::new();

    match stdin.read_line(&mut line).await {
        Ok(count) => {
            if count == 0 {
                return None;
            }
            Some(line)
        }
        Err(err) => {
            error!("error reading input: {}", err);
            None
        }
    }
}
