//! Compile session integration tests.
//!
//! End-to-end tests for options, project discovery and parallel parsing.

use quill_ast::types::LanguageVariant;
use quill_compiler::*;
use std::fs;
use std::path::{Path, PathBuf};

/// A scratch directory removed on drop.
struct TempProject {
    root: PathBuf,
}

impl TempProject {
    fn new(name: &str) -> Self {
        let root = std::env::temp_dir().join(format!("quill-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&root);
        fs::create_dir_all(&root).unwrap();
        Self { root }
    }

    fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    fn path(&self) -> &Path {
        &self.root
    }
}

impl Drop for TempProject {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.root);
    }
}

fn file_names(paths: &[PathBuf], root: &Path) -> Vec<String> {
    paths
        .iter()
        .map(|p| {
            p.strip_prefix(root)
                .unwrap()
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/")
        })
        .collect()
}

// ============================================================================
// Parsing
// ============================================================================

#[test]
fn test_session_parses_in_memory_sources() {
    let mut session = CompileSession::new(CompilerOptions::default());
    session.add_source("one.ql", "let x = 1;");
    session.add_source("two.ql", "let = 2;");
    session.add_source("three.ql", "// nothing here");

    let files = session.parse_all().unwrap();
    assert_eq!(files.len(), 3);
    assert_eq!(files[0].statements().len(), 1);
    assert_eq!(files[2].statements().len(), 0);

    let diagnostics = session.diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics.diagnostics()[0].code, 1003);
    assert_eq!(diagnostics.diagnostics()[0].file.as_deref(), Some("two.ql"));
    assert!(diagnostics.has_errors());
}

#[test]
fn test_shared_interner_is_used_by_all_files() {
    let mut session = CompileSession::new(CompilerOptions::default());
    session.add_source("a.ql", "alpha + beta;");
    session.add_source("b.ql", "beta + gamma;");
    session.parse_all().unwrap();

    let interner = session.interner().clone();
    for file in session.source_files() {
        assert!(file.identifiers().interner().ptr_eq(&interner));
    }
    assert_eq!(interner.len(), 3);

    let a = session.source_file("a.ql").unwrap();
    let b = session.source_file("b.ql").unwrap();
    assert_eq!(a.identifiers().get("beta"), b.identifiers().get("beta"));
    assert!(!a.identifiers().contains("gamma"));
}

#[test]
fn test_unshared_interners_are_independent() {
    let options = CompilerOptions {
        strict: None,
        shared_interner: Some(false),
    };
    let mut session = CompileSession::new(options);
    session.add_source("a.ql", "alpha;");
    session.add_source("b.ql", "beta;");
    session.parse_all().unwrap();

    let files = session.source_files();
    assert!(!files[0].identifiers().interner().ptr_eq(session.interner()));
    assert!(!files[0].identifiers().interner().ptr_eq(files[1].identifiers().interner()));
    assert!(session.interner().is_empty());
}

#[test]
fn test_strict_option_selects_variant() {
    let options = CompilerOptions {
        strict: Some(true),
        shared_interner: None,
    };
    let mut session = CompileSession::new(options);
    session.add_source("strict.ql", "let yield = 1;");
    let files = session.parse_all().unwrap();
    assert_eq!(files[0].language_variant(), LanguageVariant::Strict);
    let codes: Vec<u32> = session.diagnostics().diagnostics().iter().map(|d| d.code).collect();
    assert_eq!(codes, vec![1212]);
}

#[test]
fn test_many_files_parse_in_order() {
    let mut session = CompileSession::new(CompilerOptions::default());
    for i in 0..64 {
        session.add_source(format!("f{i}.ql"), format!("let v{i} = {i};"));
    }
    let files = session.parse_all().unwrap();
    for (i, file) in files.iter().enumerate() {
        assert_eq!(file.file_name(), format!("f{i}.ql"));
        assert!(file.parse_diagnostics().is_empty());
    }
}

// ============================================================================
// Projects and discovery
// ============================================================================

#[test]
fn test_discover_source_files() {
    let project = TempProject::new("discover");
    project.write("src/main.ql", "let a = 1;");
    project.write("src/lib/util.ql", "let b = 2;");
    project.write("src/lib/types.d.ql", "let c;");
    project.write("src/notes.txt", "not source");
    project.write("src/vendor/dep.ql", "let d = 4;");
    project.write("target/out.ql", "let e = 5;");
    project.write("top.ql", "let f = 6;");

    let include = vec!["src/**/*".to_string()];
    let exclude = vec!["src/vendor".to_string()];
    let found = discover_source_files(project.path(), &include, &exclude);
    assert_eq!(
        file_names(&found, project.path()),
        vec!["src/lib/types.d.ql", "src/lib/util.ql", "src/main.ql"]
    );

    let top_level = discover_source_files(project.path(), &["*.ql".to_string()], &[]);
    assert_eq!(file_names(&top_level, project.path()), vec!["top.ql"]);

    let declarations = discover_source_files(project.path(), &["src/**/*.d.ql".to_string()], &[]);
    assert_eq!(file_names(&declarations, project.path()), vec!["src/lib/types.d.ql"]);
}

#[test]
fn test_project_with_include_patterns() {
    let project = TempProject::new("include");
    project.write("src/a.ql", "let a = 1;");
    project.write("src/b.ql", "let b = ;");
    let config = project.write(
        "quill.json",
        r#"{ "compilerOptions": { "strict": false }, "include": ["src/**/*"] }"#,
    );

    let mut session = CompileSession::from_project(&config, &CompilerOptions::default()).unwrap();
    assert_eq!(session.root_files.len(), 2);
    assert_eq!(session.load_root_files(), 2);
    let files = session.parse_all().unwrap();
    assert_eq!(files.len(), 2);

    let diagnostics = session.diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics.diagnostics()[0].code, 1109);
    assert!(diagnostics.diagnostics()[0]
        .file
        .as_deref()
        .is_some_and(|f| f.ends_with("b.ql")));
}

#[test]
fn test_project_files_list_wins_over_include() {
    let project = TempProject::new("files");
    project.write("main.ql", "let m = 1;");
    project.write("src/other.ql", "let o = 1;");
    let config = project.write("quill.json", r#"{ "files": ["main.ql", "absent.ql"] }"#);

    let session = CompileSession::from_project(&config, &CompilerOptions::default()).unwrap();
    assert_eq!(session.root_files.len(), 1);
    assert!(session.root_files[0].ends_with("main.ql"));
}

#[test]
fn test_cli_overrides_project_options() {
    let project = TempProject::new("overrides");
    project.write("src/a.ql", "let a = 1;");
    let config = project.write("quill.json", r#"{ "compilerOptions": { "strict": false } }"#);

    let overrides = CompilerOptions {
        strict: Some(true),
        shared_interner: None,
    };
    let session = CompileSession::from_project(&config, &overrides).unwrap();
    assert_eq!(session.options.language_variant(), LanguageVariant::Strict);
}

#[test]
fn test_empty_project_reports_no_inputs() {
    let project = TempProject::new("empty");
    let config = project.write("quill.json", "{}");

    let mut session = CompileSession::from_project(&config, &CompilerOptions::default()).unwrap();
    assert!(session.root_files.is_empty());
    session.parse_all().unwrap();
    let diagnostics = session.diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics.diagnostics()[0].code, 18003);
}

#[test]
fn test_invalid_project_file_is_an_error() {
    let project = TempProject::new("invalid");
    let config = project.write("quill.json", "{ \"compilerOptions\": 5 }");

    let err = CompileSession::from_project(&config, &CompilerOptions::default()).unwrap_err();
    assert!(matches!(err, SessionError::Config { .. }));
    assert!(err.to_string().starts_with("invalid project file"));
}
