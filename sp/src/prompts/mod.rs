//! Prompt Template System
//!
//! Every prompt is an ordered system + human template pair with `{name}`
//! placeholders, filled in later by the caller.
//!
//! Template loading chain:
//! 1. `.sarcasm-prompts/prompts/{kind}.{role}.pmt` (user override)
//! 2. `prompts/{kind}.{role}.pmt` (repo default)
//! 3. Embedded registry in code
//!
//! An override must use exactly the placeholders the embedded template declares.

pub mod embedded;
mod error;
mod loader;
mod template;

pub use embedded::PromptKind;
pub use error::TemplateError;
pub use loader::PromptLoader;
pub use template::{Message, Prompt, Role, Template, Variables, placeholders};
