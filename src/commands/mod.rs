pub mod config;
pub mod interactive;
pub mod summarize;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use crate::ingest::{ImportError, ImportedText};
use crate::llm::HuggingFaceClient;
use crate::session::{MAX_WORDS, Session};

/// Create a spinner for indeterminate progress
fn create_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
        .template("{spinner:.cyan} {msg}")
    {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner
}

/// Submit the session's text if the submit control is enabled.
///
/// Returns `false` without touching the session when it is not.
pub async fn submit(session: &mut Session, client: &HuggingFaceClient) -> bool {
    let Some(pending) = session.begin_submit() else {
        return false;
    };

    let spinner = create_spinner("Summarizing... Please wait!");
    let outcome = client.summarize(pending.text()).await;
    spinner.finish_and_clear();

    session.complete(pending, outcome);
    true
}

/// Commit a finished import into the session.
///
/// Only a successful extraction replaces the buffer; errors and skipped
/// selections leave it exactly as it was.
pub fn apply_import(
    session: &mut Session,
    result: Result<Option<ImportedText>, ImportError>,
) -> Result<Option<ImportedText>, ImportError> {
    if let Ok(Some(imported)) = &result {
        session.import(&imported.text);
    }
    result
}

/// Word counter, red once past the cap
pub fn styled_counter(words: usize) -> String {
    let counter = format!("{}/{}", words, MAX_WORDS);
    if words > MAX_WORDS {
        counter.red().to_string()
    } else {
        counter.cyan().to_string()
    }
}

/// The summary block is on screen whenever there is a summary and no
/// request is in flight.
fn summary_visible(session: &Session) -> bool {
    !session.summary().is_empty() && !session.is_loading()
}

/// Show the summary block, unless there is nothing to show yet
pub fn print_summary(session: &Session) {
    if !summary_visible(session) {
        return;
    }

    println!("{}", "─".repeat(50).dimmed());
    println!("{}", "AI Generated Summarized Text".bold().underline());
    println!();
    termimad::MadSkin::default().print_text(session.summary());
    println!("{}", "─".repeat(50).dimmed());
}
