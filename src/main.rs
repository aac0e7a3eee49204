use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use colored::Colorize;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod clipboard;
mod commands;
mod config;
mod ingest;
mod llm;
mod session;

/// ASCII art banner for the application
const BANNER: &str = r#"
   ____                                  _   _  __         _
  / ___|___  _ __ ___  _ __   __ _  ___| |_(_)/ _|_   _  (_) ___
 | |   / _ \| '_ ` _ \| '_ \ / _` |/ __| __| | |_| | | | | |/ _ \
 | |__| (_) | | | | | | |_) | (_| | (__| |_| |  _| |_| |_| | (_) |
  \____\___/|_| |_| |_| .__/ \__,_|\___|\__|_|_|  \__, (_)_|\___/
                      |_|                         |___/
"#;

/// Print the application banner
fn print_banner() {
    println!("{}", BANNER.cyan().bold());
}

/// Print a styled status line
fn print_status(label: &str, value: &str, icon: &str) {
    println!(
        "  {} {} {}",
        icon,
        format!("{}:", label).dimmed(),
        value.cyan()
    );
}

#[derive(Parser)]
#[command(name = "compactify")]
#[command(about = "Summarize pasted text or .txt/.docx files with a hosted AI model")]
#[command(version)]
struct Cli {
    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize a file, or standard input when no file is given
    Summarize {
        /// Files to import; the first .txt or .docx is used
        paths: Vec<PathBuf>,
        /// Copy the summary to the clipboard
        #[arg(short, long)]
        copy: bool,
    },
    /// Count the words in a file or standard input
    Count {
        /// .txt or .docx file
        path: Option<PathBuf>,
    },
    /// Configure settings (API token, endpoint)
    Config,
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("compactify=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("compactify=warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Some(Commands::Summarize { paths, copy }) => {
            commands::summarize::run(paths, copy).await?;
        }
        Some(Commands::Count { path }) => {
            commands::summarize::count(path).await?;
        }
        Some(Commands::Config) => {
            commands::config::run().await?;
        }
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(shell, &mut cmd, name, &mut io::stdout());
        }
        None => {
            print_header();
            commands::interactive::run().await?;
        }
    }

    Ok(())
}

fn print_header() {
    print_banner();

    println!(
        "  {} {}",
        "Version:".dimmed(),
        env!("CARGO_PKG_VERSION").cyan()
    );
    println!("{}", "─".repeat(50).dimmed());

    let config = config::Config::load().unwrap_or_default();

    let token_status = if config.has_api_token() {
        "Configured".green().to_string()
    } else {
        "Not set (run 'config')".red().to_string()
    };

    print_status("Model", config.endpoint(), "🤖");
    print_status("API Token", &token_status, "🔑");

    println!("{}\n", "─".repeat(50).dimmed());
}
