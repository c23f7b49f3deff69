//! A compile session: a set of source files parsed together.

use crate::discover::{discover_source_files, resolve_listed_files};
use crate::options::{CompilerOptions, ProjectConfig};
use crate::SessionError;
use quill_ast::source_file::SourceFile;
use quill_core::intern::StringInterner;
use quill_diagnostics::{messages, Diagnostic, DiagnosticCollection};
use quill_parser::Parser;
use rayon::prelude::*;
use std::path::Path;
use tracing::{debug, warn};

/// Owns the inputs of one compilation and the files parsed from them.
///
/// Files are parsed independently. With a shared interner (the default) all
/// files intern identifiers into the session's interner.
#[derive(Debug)]
pub struct CompileSession {
    /// Compiler options.
    pub options: CompilerOptions,
    /// The root file names.
    pub root_files: Vec<String>,
    interner: StringInterner,
    /// Loaded sources as (file name, text), in insertion order.
    sources: Vec<(String, String)>,
    /// Diagnostics not tied to a parsed file (unreadable files, empty projects).
    session_diagnostics: DiagnosticCollection,
    parsed: Vec<SourceFile>,
}

impl CompileSession {
    pub fn new(options: CompilerOptions) -> Self {
        Self {
            options,
            root_files: Vec::new(),
            interner: StringInterner::new(),
            sources: Vec::new(),
            session_diagnostics: DiagnosticCollection::new(),
            parsed: Vec::new(),
        }
    }

    pub fn with_root_files(mut self, root_files: Vec<String>) -> Self {
        self.root_files = root_files;
        self
    }

    /// Build a session from a project file.
    ///
    /// `overrides` are applied on top of the project's compiler options. An
    /// empty file list is reported as a diagnostic, not an error.
    pub fn from_project(project_path: &Path, overrides: &CompilerOptions) -> Result<Self, SessionError> {
        let config = crate::options::parse_project_file(project_path)?;
        let root_dir = project_path.parent().unwrap_or_else(|| Path::new("."));
        let root_dir = if root_dir.as_os_str().is_empty() {
            Path::new(".")
        } else {
            root_dir
        };

        let files = project_root_files(root_dir, &config);
        debug!(project = %project_path.display(), files = files.len(), "resolved project files");

        let options = config.compiler_options().merged_with(overrides);
        let mut session = Self::new(options).with_root_files(files);
        if session.root_files.is_empty() {
            let project = project_path.display().to_string();
            session.session_diagnostics.add(
                Diagnostic::new(&messages::NO_INPUTS_WERE_FOUND, &[project.as_str()]).with_file(project),
            );
        }
        Ok(session)
    }

    /// The interner shared by parsed files when sharing is enabled.
    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    /// Add an in-memory source file to the session.
    pub fn add_source(&mut self, file_name: impl Into<String>, source_text: impl Into<String>) {
        self.sources.push((file_name.into(), source_text.into()));
    }

    /// Read all root files from disk.
    ///
    /// A file that cannot be read is reported as a diagnostic and skipped.
    /// Returns the number of files loaded.
    pub fn load_root_files(&mut self) -> usize {
        let mut loaded = 0;
        for file in &self.root_files {
            match std::fs::read_to_string(file) {
                Ok(content) => {
                    self.sources.push((file.clone(), content));
                    loaded += 1;
                }
                Err(e) => {
                    warn!(file = %file, error = %e, "cannot read source file");
                    let reason = e.to_string();
                    self.session_diagnostics.add(
                        Diagnostic::new(&messages::CANNOT_READ_FILE_0_COLON_1, &[file.as_str(), reason.as_str()])
                            .with_file(file.clone()),
                    );
                }
            }
        }
        loaded
    }

    /// Parse every loaded source in parallel.
    ///
    /// Results keep the order in which sources were added. A fatal error in
    /// any file fails the whole call.
    pub fn parse_all(&mut self) -> Result<&[SourceFile], SessionError> {
        let variant = self.options.language_variant();
        let shared = self.options.uses_shared_interner().then(|| self.interner.clone());

        let parsed = self
            .sources
            .par_iter()
            .map(|(file_name, text)| {
                let interner = shared.clone().unwrap_or_default();
                Parser::new(file_name, text, variant)
                    .with_interner(interner)
                    .parse_source_file()
                    .map_err(|source| SessionError::Fatal {
                        file: file_name.clone(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            files = parsed.len(),
            shared_interner = shared.is_some(),
            "parsed session sources"
        );
        self.parsed = parsed;
        Ok(&self.parsed)
    }

    /// Files produced by the last [`CompileSession::parse_all`].
    pub fn source_files(&self) -> &[SourceFile] {
        &self.parsed
    }

    pub fn source_file(&self, file_name: &str) -> Option<&SourceFile> {
        self.parsed.iter().find(|f| f.file_name() == file_name)
    }

    /// Diagnostics not tied to a parsed file.
    pub fn session_diagnostics(&self) -> &[Diagnostic] {
        self.session_diagnostics.diagnostics()
    }

    /// Session diagnostics followed by each parsed file's diagnostics, in
    /// file order.
    pub fn diagnostics(&self) -> DiagnosticCollection {
        let mut all = self.session_diagnostics.clone();
        for file in &self.parsed {
            all.extend_from_slice(file.parse_diagnostics());
        }
        all
    }
}

/// Root files named by a project: its `files` list if present, otherwise
/// the include/exclude discovery.
pub fn project_root_files(root_dir: &Path, config: &ProjectConfig) -> Vec<String> {
    let paths = match &config.files {
        Some(files) => resolve_listed_files(root_dir, files),
        None => discover_source_files(root_dir, &config.include_patterns(), &config.exclude_patterns()),
    };
    paths.into_iter().map(|p| p.display().to_string()).collect()
}
