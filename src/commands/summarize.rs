use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;
use tokio::io::AsyncReadExt;

use crate::clipboard::SystemClipboard;
use crate::commands::{self, print_summary, styled_counter};
use crate::config::Config;
use crate::ingest;
use crate::llm::HuggingFaceClient;
use crate::session::{CopyOutcome, EditOutcome, MAX_WORDS, Session, count_words};

async fn read_stdin() -> Result<String> {
    let mut input = String::new();
    tokio::io::stdin()
        .read_to_string(&mut input)
        .await
        .context("Failed to read standard input")?;
    Ok(input)
}

/// Import the first acceptable file, failing if none of `paths` qualifies
async fn import_into(session: &mut Session, paths: &[PathBuf]) -> Result<()> {
    let result = ingest::import_selection(paths).await;
    let imported = commands::apply_import(session, result)?
        .with_context(|| "No .txt or .docx file among the given paths")?;

    println!(
        "{} {} ({})",
        "Imported:".dimmed(),
        imported.source,
        imported.kind.mime().dimmed()
    );
    Ok(())
}

/// Summarize a file, or standard input when no paths are given
pub async fn run(paths: Vec<PathBuf>, copy: bool) -> Result<()> {
    let mut session = Session::new();

    if paths.is_empty() {
        let input = read_stdin().await?;
        if session.on_text_change(input) == EditOutcome::Rejected {
            anyhow::bail!("Input exceeds {} words, nothing was submitted", MAX_WORDS);
        }
    } else {
        import_into(&mut session, &paths).await?;
    }

    println!(
        "{} {}",
        "Words:".dimmed(),
        styled_counter(session.word_count())
    );

    if session.word_count() == 0 {
        anyhow::bail!("Nothing to summarize");
    }
    if session.word_count() > MAX_WORDS {
        anyhow::bail!(
            "Text has {} words, the limit for summarizing is {}",
            session.word_count(),
            MAX_WORDS
        );
    }

    let config = Config::load()?;
    if !config.has_api_token() {
        println!(
            "{} No API token configured. Run {} to set one.",
            "Note:".yellow(),
            "compactify config".cyan()
        );
    }
    let client = HuggingFaceClient::new(
        config.get_api_token(),
        Some(config.endpoint().to_string()),
    );

    commands::submit(&mut session, &client).await;
    print_summary(&session);

    if copy {
        let mut clipboard = SystemClipboard;
        if session.copy_summary(&mut clipboard) == CopyOutcome::Copied {
            println!("{} Summary copied to clipboard!", "✓".green());
        }
    }

    Ok(())
}

/// Print the word count of a file or of standard input
pub async fn count(path: Option<PathBuf>) -> Result<()> {
    let words = match path {
        Some(path) => {
            let mut session = Session::new();
            import_into(&mut session, &[path]).await?;
            session.word_count()
        }
        None => count_words(&read_stdin().await?),
    };

    println!("{}", styled_counter(words));
    Ok(())
}
