//! Compiler options and `quill.json` project files.

use crate::SessionError;
use quill_ast::types::LanguageVariant;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the project file looked up by default.
pub const PROJECT_FILE_NAME: &str = "quill.json";

/// Options controlling how files are parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompilerOptions {
    /// Parse every file with the Strict language variant.
    pub strict: Option<bool>,
    /// Parse all files against one identifier interner so that equal
    /// spellings share a key across files. Defaults to `true`.
    pub shared_interner: Option<bool>,
}

impl CompilerOptions {
    pub fn language_variant(&self) -> LanguageVariant {
        if self.strict.unwrap_or(false) {
            LanguageVariant::Strict
        } else {
            LanguageVariant::Standard
        }
    }

    pub fn uses_shared_interner(&self) -> bool {
        self.shared_interner.unwrap_or(true)
    }

    /// Overlay `other` on top of `self`: fields set in `other` win.
    pub fn merged_with(&self, other: &CompilerOptions) -> CompilerOptions {
        CompilerOptions {
            strict: other.strict.or(self.strict),
            shared_interner: other.shared_interner.or(self.shared_interner),
        }
    }
}

/// The `quill.json` file structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    pub compiler_options: Option<CompilerOptions>,
    pub include: Option<Vec<String>>,
    pub exclude: Option<Vec<String>>,
    pub files: Option<Vec<String>>,
}

impl ProjectConfig {
    pub fn default_include() -> Vec<String> {
        vec!["src/**/*".to_string()]
    }

    pub fn default_exclude() -> Vec<String> {
        vec!["target".to_string()]
    }

    pub fn compiler_options(&self) -> CompilerOptions {
        self.compiler_options.clone().unwrap_or_default()
    }

    pub fn include_patterns(&self) -> Vec<String> {
        self.include.clone().unwrap_or_else(Self::default_include)
    }

    pub fn exclude_patterns(&self) -> Vec<String> {
        self.exclude.clone().unwrap_or_else(Self::default_exclude)
    }
}

/// Parse a project file from a string.
pub fn parse_project_config(content: &str) -> Result<ProjectConfig, serde_json::Error> {
    serde_json::from_str(content)
}

/// Read and parse a project file.
pub fn parse_project_file(path: &Path) -> Result<ProjectConfig, SessionError> {
    let content = std::fs::read_to_string(path).map_err(|source| SessionError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_project_config(&content).map_err(|source| SessionError::Config {
        path: path.display().to_string(),
        source,
    })
}
