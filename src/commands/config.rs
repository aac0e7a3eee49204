use anyhow::Result;
use colored::Colorize;
use inquire::{Password, Select, Text};

use crate::config::{Config, TOKEN_ENV_VAR};
use crate::llm::DEFAULT_ENDPOINT;

pub async fn run() -> Result<()> {
    println!();
    println!(
        "    {}",
        "╭──────────────────────────────────────────────────────╮".bright_black()
    );
    println!(
        "    {}                 {}                 {}",
        "│".bright_black(),
        "⚙️  SETTINGS ⚙️".bold().white(),
        "│".bright_black()
    );
    println!(
        "    {}",
        "╰──────────────────────────────────────────────────────╯".bright_black()
    );
    println!();

    let mut config = Config::load()?;

    let options = vec![
        "🔑  Set API Token      │ Hugging Face inference access",
        "🌐  Set Endpoint       │ Use a different model URL",
        "↺   Reset Endpoint     │ Back to the default model",
        "📋  View Settings      │ See current configuration",
        "←   Back",
    ];

    loop {
        let selection =
            Select::new("What would you like to configure?", options.clone()).prompt();

        let selection = match selection {
            Ok(s) => s,
            Err(inquire::InquireError::OperationCanceled)
            | Err(inquire::InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e.into()),
        };

        let result = match selection {
            s if s.contains("Set API Token") => set_api_token(&mut config),
            s if s.contains("Set Endpoint") => set_endpoint(&mut config),
            s if s.contains("Reset Endpoint") => reset_endpoint(&mut config),
            s if s.contains("View Settings") => {
                view_config(&config);
                Ok(())
            }
            s if s.contains("Back") => break,
            _ => Ok(()),
        };

        if let Err(e) = result {
            if !matches!(
                e.downcast_ref::<inquire::InquireError>(),
                Some(inquire::InquireError::OperationCanceled)
            ) {
                eprintln!("{} {}", "Error:".red(), e);
            }
        }

        println!();
    }

    Ok(())
}

fn set_api_token(config: &mut Config) -> Result<()> {
    println!(
        "\n{} Get a token from {}",
        "Tip:".yellow(),
        "https://huggingface.co/settings/tokens".cyan()
    );

    let token = Password::new("Enter your Hugging Face API token:")
        .without_confirmation()
        .prompt()?;

    if token.is_empty() {
        println!("{}", "Cancelled.".dimmed());
        return Ok(());
    }

    config.api_token = Some(token);
    config.save()?;

    println!("{} API token saved!", "✓".green());

    Ok(())
}

fn set_endpoint(config: &mut Config) -> Result<()> {
    let endpoint = Text::new("Inference endpoint URL:")
        .with_default(config.endpoint())
        .prompt()?;

    config.set_endpoint(endpoint.trim())?;
    config.save()?;

    println!("{} Endpoint set to {}", "✓".green(), config.endpoint().yellow());

    Ok(())
}

fn reset_endpoint(config: &mut Config) -> Result<()> {
    config.endpoint = None;
    config.save()?;

    println!("{} Endpoint reset to {}", "✓".green(), DEFAULT_ENDPOINT.yellow());

    Ok(())
}

fn view_config(config: &Config) {
    println!("\n{}", "Current Configuration:".bold());
    println!("{}", "─".repeat(30).dimmed());

    let token_status = if config.api_token.as_ref().is_some_and(|t| !t.is_empty()) {
        "configured".green().to_string()
    } else if config.has_api_token() {
        format!("set via {} env", TOKEN_ENV_VAR).yellow().to_string()
    } else {
        "not set".red().to_string()
    };

    println!("  API Token: {}", token_status);
    println!("  Endpoint: {}", config.endpoint());

    if let Ok(path) = Config::config_path() {
        println!("  Config file: {}", path.display().to_string().dimmed());
    }
}
