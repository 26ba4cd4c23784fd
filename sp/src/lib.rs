//! sarcasm-prompts - prompt templates for a sarcasm generation/annotation pipeline
//!
//! Each prompt in the registry is a system instruction followed by a human
//! instruction. Constructors take no arguments; the caller substitutes the
//! declared variables and passes the messages to an LLM client.
//!
//! # Example
//!
//! ```
//! use sarcasm_prompts::prompts::{Variables, embedded};
//!
//! let prompt = embedded::simple_generation();
//! let vars = Variables::from([
//!     ("num_generations".to_string(), "3".to_string()),
//!     ("direction".to_string(), "sarcastic".to_string()),
//! ]);
//! let messages = prompt.render(&vars).unwrap();
//! assert_eq!(
//!     messages[1].content,
//!     "Generate 3 sarcastic texts. Ensure diversity in the generated texts."
//! );
//! ```
//!
//! # Modules
//!
//! - [`prompts`] - Templates, the embedded registry and the override loader
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface

pub mod cli;
pub mod config;
pub mod prompts;

pub use prompts::{Message, Prompt, PromptKind, PromptLoader, Role, Template, TemplateError, Variables};
