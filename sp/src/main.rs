//! sp - inspect and render the sarcasm prompt registry

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use tracing::{debug, info};

use sarcasm_prompts::cli::{Cli, Command, OutputFormat, collect_vars};
use sarcasm_prompts::config::Config;
use sarcasm_prompts::prompts::{Message, Prompt, PromptKind, PromptLoader, embedded};

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("sarcasm-prompts")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Priority: CLI --log-level > config file > default (INFO)
    let level = match cli_log_level.or(config_log_level).map(str::to_uppercase).as_deref() {
        Some("TRACE") => tracing::Level::TRACE,
        Some("DEBUG") => tracing::Level::DEBUG,
        Some("INFO") | None => tracing::Level::INFO,
        Some("WARN") | Some("WARNING") => tracing::Level::WARN,
        Some("ERROR") => tracing::Level::ERROR,
        Some(other) => {
            eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", other);
            tracing::Level::INFO
        }
    };

    let log_file = fs::File::create(log_dir.join("sp.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    Ok(())
}

fn print_prompt(kind: PromptKind, prompt: &Prompt) {
    println!("{}", kind.name().cyan().bold());
    for template in prompt.templates() {
        let role = format!("[{}]", template.role()).yellow();
        if template.variables().is_empty() {
            println!("{}", role);
        } else {
            let vars: Vec<&str> = template.variables().iter().map(String::as_str).collect();
            println!("{} {}", role, vars.join(", ").dimmed());
        }
        println!("{}", template.text().trim_end());
    }
}

fn print_messages(messages: &[Message]) {
    for message in messages {
        println!("{}", format!("[{}]", message.role).yellow());
        println!("{}", message.content.trim_end());
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load log level from config file early (before full config load)
    let config_log_level = Config::load_log_level(cli.config.as_ref());

    // Setup logging with priority: CLI > config > INFO default
    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    info!("sp starting");
    embedded::validate_all().context("Embedded prompt registry is inconsistent")?;

    let loader = PromptLoader::from_config(&config.prompts);
    debug!(?loader, "prompt loader ready");

    match cli.command {
        Command::List => {
            for kind in PromptKind::ALL {
                let prompt = loader.load(kind)?;
                let vars: Vec<&str> = prompt.human().variables().iter().map(String::as_str).collect();
                println!("{:<32} {}", kind.name().cyan(), vars.join(", "));
            }
        }
        Command::Show { kind, format } => {
            let prompt = loader.load(kind)?;
            match format {
                OutputFormat::Text => print_prompt(kind, &prompt),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&prompt)?),
            }
        }
        Command::Render { kind, vars, format } => {
            let prompt = loader.load(kind)?;
            let vars = collect_vars(vars);
            let messages = prompt
                .render(&vars)
                .context(format!("Failed to render prompt '{}'", kind))?;
            info!(%kind, variables = vars.len(), "rendered prompt");
            match format {
                OutputFormat::Text => print_messages(&messages),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&messages)?),
            }
        }
        Command::Validate => {
            let prompts = loader.load_all()?;
            for (kind, _) in &prompts {
                println!("{} {}", "✓".green(), kind);
            }
            println!("{} prompts valid", prompts.len());
        }
    }

    Ok(())
}
