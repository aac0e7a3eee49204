use anyhow::Result;
use colored::Colorize;
use inquire::{Editor, InquireError, Select, Text};
use std::fmt;
use std::path::PathBuf;

use crate::clipboard::SystemClipboard;
use crate::commands::{self, print_summary, styled_counter};
use crate::config::Config;
use crate::ingest;
use crate::llm::HuggingFaceClient;
use crate::session::{ClearOutcome, CopyOutcome, Session};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Edit,
    Import,
    Summarize,
    Clear(&'static str),
    Copy,
    Settings,
    Exit,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Action::Edit => "✏️   Edit text",
            Action::Import => "📥  Import file      │ .txt or .docx",
            Action::Summarize => "✨  Summarize",
            Action::Clear(label) => return write!(f, "🧹  {}", label),
            Action::Copy => "📋  Copy to Clipboard",
            Action::Settings => "⚙️   Settings",
            Action::Exit => "🚪  Exit",
        };
        f.write_str(label)
    }
}

/// Actions offered for the current state. Summarize and copy only show up
/// while they would do something.
fn available_actions(session: &Session) -> Vec<Action> {
    let mut actions = vec![Action::Edit, Action::Import];
    if session.can_submit() {
        actions.push(Action::Summarize);
    }
    actions.push(Action::Clear(session.clear_label()));
    if !session.summary().is_empty() {
        actions.push(Action::Copy);
    }
    actions.push(Action::Settings);
    actions.push(Action::Exit);
    actions
}

/// Turn a path typed or dropped onto the terminal into a path.
///
/// Terminals paste dropped files either quoted or with backslash-escaped
/// spaces.
fn parse_dropped_path(input: &str) -> PathBuf {
    let trimmed = input.trim();
    let unquoted = trimmed
        .strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
        .or_else(|| {
            trimmed
                .strip_prefix('"')
                .and_then(|s| s.strip_suffix('"'))
        });

    match unquoted {
        Some(s) => PathBuf::from(s),
        None => PathBuf::from(trimmed.replace("\\ ", " ")),
    }
}

fn client_from_config() -> Result<HuggingFaceClient> {
    let config = Config::load()?;
    Ok(HuggingFaceClient::new(
        config.get_api_token(),
        Some(config.endpoint().to_string()),
    ))
}

pub async fn run() -> Result<()> {
    let mut client = client_from_config()?;
    let mut session = Session::new();

    loop {
        println!(
            "  {} {}",
            "Words:".dimmed(),
            styled_counter(session.word_count())
        );
        print_summary(&session);
        println!();

        let selection = Select::new("What would you like to do?", available_actions(&session))
            .with_help_message("Use arrow keys to navigate, Enter to select")
            .prompt();

        let action = match selection {
            Ok(a) => a,
            Err(InquireError::OperationCanceled) | Err(InquireError::OperationInterrupted) => {
                break;
            }
            Err(e) => return Err(e.into()),
        };

        match action {
            Action::Edit => edit_text(&mut session)?,
            Action::Import => import_file(&mut session).await?,
            Action::Summarize => {
                commands::submit(&mut session, &client).await;
            }
            Action::Clear(_) => {
                if session.clear() == ClearOutcome::Cleared {
                    println!("{} Text cleared.", "✓".green());
                }
            }
            Action::Copy => copy_summary(&session),
            Action::Settings => {
                commands::config::run().await?;
                client = client_from_config()?;
            }
            Action::Exit => break,
        }

        println!();
    }

    println!("{}", "👋 Thanks for using Compactify!".cyan());
    Ok(())
}

fn edit_text(session: &mut Session) -> Result<()> {
    let edited = Editor::new("Edit your text:")
        .with_predefined_text(session.text())
        .with_help_message("Enter your text here to summarize... (max 1000 words)")
        .prompt();

    match edited {
        Ok(text) => {
            session.on_text_change(text);
        }
        Err(InquireError::OperationCanceled) | Err(InquireError::OperationInterrupted) => {}
        Err(e) => return Err(e.into()),
    }

    Ok(())
}

async fn import_file(session: &mut Session) -> Result<()> {
    let input = Text::new("Drag and drop a .txt or .docx file here, or type its path:")
        .with_help_message("Only .txt and .docx files are accepted")
        .prompt();

    let input = match input {
        Ok(i) if !i.trim().is_empty() => i,
        Ok(_) => return Ok(()),
        Err(InquireError::OperationCanceled) | Err(InquireError::OperationInterrupted) => {
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let paths = [parse_dropped_path(&input)];
    let result = ingest::import_selection(&paths).await;
    match commands::apply_import(session, result) {
        Ok(Some(imported)) => {
            println!(
                "{} Imported {} ({} words)",
                "✓".green(),
                imported.source,
                session.word_count()
            );
        }
        Ok(None) => {}
        Err(e) => {
            tracing::error!("Error extracting file content: {}", e);
            eprintln!("{} {}", "Warning:".yellow(), e);
        }
    }

    Ok(())
}

fn copy_summary(session: &Session) {
    let mut clipboard = SystemClipboard;
    if session.copy_summary(&mut clipboard) == CopyOutcome::Copied {
        println!("{} Summary copied to clipboard!", "✓".green());
    }
}
