//! Role-tagged templates and the two-message prompt they form

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::TemplateError;

/// `{{` and `}}` are escapes; `{identifier}` is a placeholder
static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{|\}\}|\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("placeholder regex is valid"));

/// Values to substitute, keyed by placeholder name
pub type Variables = BTreeMap<String, String>;

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    Human,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::Human => "human",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Collect the placeholder names present in `text`
pub fn placeholders(text: &str) -> BTreeSet<String> {
    PLACEHOLDER_RE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// One message template: a role, a text, and the placeholders it declares
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Template {
    role: Role,
    text: String,
    variables: BTreeSet<String>,
}

impl Template {
    /// Build a template, checking that `variables` matches the placeholders in `text`
    pub fn new<I, S>(role: Role, text: impl Into<String>, variables: I) -> Result<Self, TemplateError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let template = Self {
            role,
            text: text.into(),
            variables: variables.into_iter().map(Into::into).collect(),
        };
        template.validate()?;
        Ok(template)
    }

    /// Build a registry template whose declaration is checked by `validate_all` at startup
    pub(crate) fn unchecked(role: Role, text: &str, variables: &[&str]) -> Self {
        let template = Self {
            role,
            text: text.to_string(),
            variables: variables.iter().map(|v| v.to_string()).collect(),
        };
        debug_assert!(template.validate().is_ok(), "{:?}", template.validate());
        template
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn variables(&self) -> &BTreeSet<String> {
        &self.variables
    }

    /// Check the declared variables against the placeholders actually in the text
    pub fn validate(&self) -> Result<(), TemplateError> {
        let found = placeholders(&self.text);
        if found == self.variables {
            return Ok(());
        }

        let undeclared: Vec<String> = found.difference(&self.variables).cloned().collect();
        let unused: Vec<String> = self.variables.difference(&found).cloned().collect();
        debug!(role = %self.role, ?undeclared, ?unused, "Template::validate: mismatch");
        Err(TemplateError::VariableMismatch {
            role: self.role,
            undeclared,
            unused,
        })
    }

    /// Substitute every placeholder. Names in `vars` that this template does not use are ignored.
    pub fn render(&self, vars: &Variables) -> Result<String, TemplateError> {
        let mut out = String::with_capacity(self.text.len());
        let mut last = 0;

        for caps in PLACEHOLDER_RE.captures_iter(&self.text) {
            let Some(whole) = caps.get(0) else { continue };
            out.push_str(&self.text[last..whole.start()]);
            match caps.get(1) {
                Some(name) => {
                    let value = vars.get(name.as_str()).ok_or_else(|| TemplateError::MissingValue {
                        name: name.as_str().to_string(),
                    })?;
                    out.push_str(value);
                }
                // escape pair collapses to a single brace
                None => out.push_str(&whole.as_str()[..1]),
            }
            last = whole.end();
        }
        out.push_str(&self.text[last..]);

        Ok(out)
    }
}

/// A rendered message, ready to hand to an LLM client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

/// Ordered system + human template pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Prompt {
    system: Template,
    human: Template,
}

impl Prompt {
    /// Pair two templates; they must be a system template followed by a human template
    pub fn new(system: Template, human: Template) -> Result<Self, TemplateError> {
        if system.role != Role::System {
            return Err(TemplateError::RoleMismatch {
                expected: Role::System,
                actual: system.role,
            });
        }
        if human.role != Role::Human {
            return Err(TemplateError::RoleMismatch {
                expected: Role::Human,
                actual: human.role,
            });
        }
        Ok(Self { system, human })
    }

    pub(crate) fn from_registry(system: Template, human: Template) -> Self {
        debug_assert_eq!((system.role, human.role), (Role::System, Role::Human));
        Self { system, human }
    }

    pub fn system(&self) -> &Template {
        &self.system
    }

    pub fn human(&self) -> &Template {
        &self.human
    }

    /// Both templates, system first
    pub fn templates(&self) -> [&Template; 2] {
        [&self.system, &self.human]
    }

    /// Union of the placeholder names declared by both templates
    pub fn variables(&self) -> BTreeSet<&str> {
        self.templates()
            .into_iter()
            .flat_map(|t| t.variables.iter().map(String::as_str))
            .collect()
    }

    pub fn validate(&self) -> Result<(), TemplateError> {
        self.system.validate()?;
        self.human.validate()
    }

    /// Render both templates into messages. Every name in `vars` must be declared by some template.
    pub fn render(&self, vars: &Variables) -> Result<Vec<Message>, TemplateError> {
        let declared = self.variables();
        if let Some(name) = vars.keys().find(|k| !declared.contains(k.as_str())) {
            return Err(TemplateError::UnexpectedVariable { name: name.clone() });
        }

        self.templates()
            .into_iter()
            .map(|t| -> Result<Message, TemplateError> {
                Ok(Message {
                    role: t.role,
                    content: t.render(vars)?,
                })
            })
            .collect()
    }
}
