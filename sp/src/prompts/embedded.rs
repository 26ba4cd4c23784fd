//! Embedded prompt registry
//!
//! Every prompt the pipeline uses is compiled into the binary from the
//! `prompts/{kind}.{role}.pmt` files, the same layout overrides use. Each
//! constructor returns a fresh system + human pair; placeholder values are
//! supplied later through [`Prompt::render`].

use tracing::debug;

use super::error::TemplateError;
use super::template::{Prompt, Role, Template};

/// Shared system instruction for all generation prompts
pub const GENERATOR_SYSTEM: &str = include_str!("../../prompts/simple-generation.system.pmt");

/// System instruction for the annotation prompt
pub const ANNOTATOR_SYSTEM: &str = include_str!("../../prompts/annotate.system.pmt");

/// System instruction for the taxonomy brainstorm
pub const TAXONOMY_SYSTEM: &str = include_str!("../../prompts/taxonomy-creation.system.pmt");

const GROUNDED_REWRITE_SYSTEM: &str = include_str!("../../prompts/grounded-rewrite.system.pmt");
const GROUNDED_REWRITE_NO_SOURCE_EDIT_SYSTEM: &str =
    include_str!("../../prompts/grounded-rewrite-no-source-edit.system.pmt");
const TAXONOMY_GENERATION_SYSTEM: &str = include_str!("../../prompts/taxonomy-generation.system.pmt");

pub const SIMPLE_GENERATION: &str = include_str!("../../prompts/simple-generation.human.pmt");
pub const ANNOTATE: &str = include_str!("../../prompts/annotate.human.pmt");
pub const GROUNDED_REWRITE: &str = include_str!("../../prompts/grounded-rewrite.human.pmt");
pub const GROUNDED_REWRITE_NO_SOURCE_EDIT: &str = include_str!("../../prompts/grounded-rewrite-no-source-edit.human.pmt");
pub const TAXONOMY_CREATION: &str = include_str!("../../prompts/taxonomy-creation.human.pmt");
pub const TAXONOMY_GENERATION: &str = include_str!("../../prompts/taxonomy-generation.human.pmt");

/// The prompts in the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromptKind {
    /// N diverse texts in a direction
    SimpleGeneration,
    /// Sarcastic / Non-sarcastic label for one text
    Annotate,
    /// Minimal-edit rewrites of a source text
    GroundedRewrite,
    /// New texts in the tone of an example, which itself is left alone
    GroundedRewriteNoSourceEdit,
    /// Brainstorm ways a text can carry a direction
    TaxonomyCreation,
    /// Rewrites that each apply one taxonomy entry
    TaxonomyGeneration,
}

impl PromptKind {
    pub const ALL: [PromptKind; 6] = [
        Self::SimpleGeneration,
        Self::Annotate,
        Self::GroundedRewrite,
        Self::GroundedRewriteNoSourceEdit,
        Self::TaxonomyCreation,
        Self::TaxonomyGeneration,
    ];

    /// Kebab-case name, also the stem of override file names
    pub fn name(&self) -> &'static str {
        match self {
            Self::SimpleGeneration => "simple-generation",
            Self::Annotate => "annotate",
            Self::GroundedRewrite => "grounded-rewrite",
            Self::GroundedRewriteNoSourceEdit => "grounded-rewrite-no-source-edit",
            Self::TaxonomyCreation => "taxonomy-creation",
            Self::TaxonomyGeneration => "taxonomy-generation",
        }
    }

    /// Construct this kind's prompt
    pub fn build(&self) -> Prompt {
        match self {
            Self::SimpleGeneration => simple_generation(),
            Self::Annotate => annotate(),
            Self::GroundedRewrite => grounded_rewrite(),
            Self::GroundedRewriteNoSourceEdit => grounded_rewrite_no_source_edit(),
            Self::TaxonomyCreation => taxonomy_creation(),
            Self::TaxonomyGeneration => taxonomy_generation(),
        }
    }
}

impl std::fmt::Display for PromptKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for PromptKind {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| TemplateError::UnknownPrompt(s.to_string()))
    }
}

fn pair(system: &str, human: &str, variables: &[&str]) -> Prompt {
    Prompt::from_registry(
        Template::unchecked(Role::System, system, &[]),
        Template::unchecked(Role::Human, human, variables),
    )
}

pub fn simple_generation() -> Prompt {
    pair(GENERATOR_SYSTEM, SIMPLE_GENERATION, &["num_generations", "direction"])
}

pub fn annotate() -> Prompt {
    pair(ANNOTATOR_SYSTEM, ANNOTATE, &["text"])
}

pub fn grounded_rewrite() -> Prompt {
    pair(GROUNDED_REWRITE_SYSTEM, GROUNDED_REWRITE, &["text", "num_generations", "direction"])
}

pub fn grounded_rewrite_no_source_edit() -> Prompt {
    pair(
        GROUNDED_REWRITE_NO_SOURCE_EDIT_SYSTEM,
        GROUNDED_REWRITE_NO_SOURCE_EDIT,
        &["text", "num_generations", "direction"],
    )
}

pub fn taxonomy_creation() -> Prompt {
    pair(TAXONOMY_SYSTEM, TAXONOMY_CREATION, &["num_ideas", "direction"])
}

pub fn taxonomy_generation() -> Prompt {
    pair(
        TAXONOMY_GENERATION_SYSTEM,
        TAXONOMY_GENERATION,
        &["taxonomy", "num_generations", "direction", "text"],
    )
}

/// Get the embedded prompt by name
pub fn get_embedded(name: &str) -> Option<Prompt> {
    name.parse::<PromptKind>().ok().map(|kind| kind.build())
}

/// Check every registry entry's declared variables against its text
pub fn validate_all() -> Result<(), TemplateError> {
    for kind in PromptKind::ALL {
        debug!(%kind, "validate_all: checking");
        kind.build().validate()?;
    }
    Ok(())
}
