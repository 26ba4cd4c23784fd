//! CLI argument parsing for sp

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::prompts::{PromptKind, Variables};

#[derive(Parser, Debug)]
#[command(name = "sp")]
#[command(author, version, about = "Prompt templates for sarcastic / non-sarcastic text", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(short = 'l', long = "log-level", global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List available prompts and the variables they expect
    List,

    /// Show a prompt's templates without substitution
    Show {
        /// Prompt name (e.g. annotate, taxonomy-generation)
        #[arg(required = true)]
        kind: PromptKind,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Substitute variables into a prompt and print the messages
    Render {
        /// Prompt name (e.g. annotate, taxonomy-generation)
        #[arg(required = true)]
        kind: PromptKind,

        /// Variable assignment, repeatable: --var direction=sarcastic
        #[arg(short, long = "var", value_name = "NAME=VALUE", value_parser = parse_var)]
        vars: Vec<(String, String)>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Load every prompt, including overrides, and check its variables
    Validate,
}

/// Output format for show/render
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown format: {}. Use: text or json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Parse a `NAME=VALUE` assignment; the value may itself contain `=`
pub fn parse_var(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("Invalid variable '{}': expected NAME=VALUE", s))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("Invalid variable '{}': name is empty", s));
    }
    Ok((name.to_string(), value.to_string()))
}

/// Collect assignments into a variable map; a repeated name keeps its last value
pub fn collect_vars(pairs: Vec<(String, String)>) -> Variables {
    pairs.into_iter().collect()
}
