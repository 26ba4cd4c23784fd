//! Prompt Loader
//!
//! Loads prompt template text from override files or falls back to the embedded registry.

use std::path::{Path, PathBuf};

use eyre::{Result, WrapErr, eyre};
use tracing::{debug, info};

use super::embedded::{self, PromptKind};
use super::template::{Prompt, Role, Template};
use crate::config::PromptsConfig;

/// Resolves each template's text, checking overrides against the embedded declaration
#[derive(Debug, Clone, Default)]
pub struct PromptLoader {
    /// User override directory (e.g., `.sarcasm-prompts/prompts/`)
    user_dir: Option<PathBuf>,
    /// Repo default directory (e.g., `prompts/`)
    repo_dir: Option<PathBuf>,
}

impl PromptLoader {
    /// Create a loader over the given directories; directories that do not exist are skipped
    pub fn new(user_dir: impl AsRef<Path>, repo_dir: impl AsRef<Path>) -> Self {
        let existing = |p: &Path| p.is_dir().then(|| p.to_path_buf());
        Self {
            user_dir: existing(user_dir.as_ref()),
            repo_dir: existing(repo_dir.as_ref()),
        }
    }

    pub fn from_config(config: &PromptsConfig) -> Self {
        Self::new(&config.user_dir, &config.repo_dir)
    }

    /// Create a loader that only uses embedded prompts
    pub fn embedded_only() -> Self {
        Self::default()
    }

    /// File name an override for `kind`'s `role` template must use
    pub fn override_file_name(kind: PromptKind, role: Role) -> String {
        format!("{}.{}.pmt", kind.name(), role)
    }

    /// Find the override file for one template
    ///
    /// Checks in order:
    /// 1. User override: `{user_dir}/{kind}.{role}.pmt`
    /// 2. Repo default: `{repo_dir}/{kind}.{role}.pmt`
    fn find_override(&self, kind: PromptKind, role: Role) -> Option<PathBuf> {
        let file_name = Self::override_file_name(kind, role);
        [self.user_dir.as_ref(), self.repo_dir.as_ref()]
            .into_iter()
            .flatten()
            .map(|dir| dir.join(&file_name))
            .find(|path| path.is_file())
    }

    fn resolve(&self, kind: PromptKind, embedded: &Template) -> Result<Template> {
        let Some(path) = self.find_override(kind, embedded.role()) else {
            debug!(%kind, role = %embedded.role(), "Using embedded template");
            return Ok(embedded.clone());
        };

        debug!("Loading template override: {:?}", path);
        let text =
            std::fs::read_to_string(&path).map_err(|e| eyre!("Failed to read prompt {}: {}", path.display(), e))?;

        Template::new(embedded.role(), text, embedded.variables().iter().cloned())
            .wrap_err_with(|| format!("Invalid prompt override {}", path.display()))
    }

    /// Load one prompt, applying any overrides
    pub fn load(&self, kind: PromptKind) -> Result<Prompt> {
        let embedded = kind.build();
        let system = self.resolve(kind, embedded.system())?;
        let human = self.resolve(kind, embedded.human())?;
        Ok(Prompt::new(system, human)?)
    }

    /// Load every prompt, failing on the first invalid override
    pub fn load_all(&self) -> Result<Vec<(PromptKind, Prompt)>> {
        embedded::validate_all().wrap_err("Embedded prompt registry is inconsistent")?;

        let prompts = PromptKind::ALL
            .into_iter()
            .map(|kind| self.load(kind).map(|prompt| (kind, prompt)))
            .collect::<Result<Vec<_>>>()?;
        info!("Loaded {} prompts", prompts.len());
        Ok(prompts)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::prompts::error::TemplateError;
    use tempfile::TempDir;

    #[test]
    fn test_override_file_name() {
        assert_eq!(
            PromptLoader::override_file_name(PromptKind::TaxonomyGeneration, Role::Human),
            "taxonomy-generation.human.pmt"
        );
        assert_eq!(
            PromptLoader::override_file_name(PromptKind::Annotate, Role::System),
            "annotate.system.pmt"
        );
    }

    #[test]
    fn test_embedded_only_matches_registry() {
        let loader = PromptLoader::embedded_only();
        for kind in PromptKind::ALL {
            assert_eq!(loader.load(kind).unwrap(), kind.build());
        }
    }

    #[test]
    fn test_shipped_pmt_files_match_embedded() {
        let shipped = Path::new(env!("CARGO_MANIFEST_DIR")).join("prompts");
        let loader = PromptLoader::new("/nonexistent/user", &shipped);
        for kind in PromptKind::ALL {
            for role in [Role::System, Role::Human] {
                assert!(loader.find_override(kind, role).is_some(), "{kind} {role}");
            }
            assert_eq!(loader.load(kind).unwrap(), kind.build(), "{kind}");
        }
    }

    #[test]
    fn test_missing_dirs_are_ignored() {
        let loader = PromptLoader::new("/nonexistent/user", "/nonexistent/repo");
        assert!(loader.user_dir.is_none());
        assert!(loader.repo_dir.is_none());
        assert_eq!(loader.load_all().unwrap().len(), PromptKind::ALL.len());
    }

    #[test]
    fn test_valid_override_replaces_text() {
        let repo = TempDir::new().unwrap();
        fs::write(
            repo.path().join("annotate.human.pmt"),
            "Is this sarcastic? Answer 'Sarcastic' or 'Non-sarcastic'.\n{text}\n",
        )
        .unwrap();

        let loader = PromptLoader::new("/nonexistent/user", repo.path());
        let prompt = loader.load(PromptKind::Annotate).unwrap();
        assert!(prompt.human().text().starts_with("Is this sarcastic?"));
        assert_eq!(prompt.system().text(), embedded::ANNOTATOR_SYSTEM);
    }

    #[test]
    fn test_user_dir_wins_over_repo_dir() {
        let user = TempDir::new().unwrap();
        let repo = TempDir::new().unwrap();
        fs::write(user.path().join("annotate.system.pmt"), "user system").unwrap();
        fs::write(repo.path().join("annotate.system.pmt"), "repo system").unwrap();

        let loader = PromptLoader::new(user.path(), repo.path());
        let prompt = loader.load(PromptKind::Annotate).unwrap();
        assert_eq!(prompt.system().text(), "user system");
    }

    #[test]
    fn test_override_with_typo_is_rejected() {
        let repo = TempDir::new().unwrap();
        fs::write(
            repo.path().join("simple-generation.human.pmt"),
            "Generate {num_generation} {direction} texts.",
        )
        .unwrap();

        let loader = PromptLoader::new("/nonexistent/user", repo.path());
        let err = loader.load(PromptKind::SimpleGeneration).unwrap_err();
        assert!(err.to_string().contains("simple-generation.human.pmt"));

        let cause = err.downcast_ref::<TemplateError>().unwrap();
        assert!(matches!(cause, TemplateError::VariableMismatch { undeclared, .. } if undeclared == &["num_generation"]));
        assert!(loader.load_all().is_err());
    }

    #[test]
    fn test_system_override_must_not_add_placeholders() {
        let user = TempDir::new().unwrap();
        fs::write(user.path().join("taxonomy-creation.system.pmt"), "You brainstorm {direction} styles.").unwrap();

        let loader = PromptLoader::new(user.path(), "/nonexistent/repo");
        assert!(loader.load(PromptKind::TaxonomyCreation).is_err());
        assert!(loader.load(PromptKind::Annotate).is_ok());
    }
}
