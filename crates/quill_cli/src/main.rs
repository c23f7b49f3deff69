//! qlc: The Quill parser CLI.
//!
//! Usage:
//!   qlc [options] [file...]
//!
//! Parses the given files (or the files named by a `quill.json` project),
//! reports diagnostics, and optionally dumps the syntax trees.

use clap::{Parser as ClapParser, ValueEnum};
use miette::{LabeledSpan, NamedSource, Severity, SourceCode, SourceSpan};
use quill_ast::source_file::SourceFile;
use quill_compiler::{CompileSession, CompilerOptions, SessionError, PROJECT_FILE_NAME};
use quill_core::text::TextSpan;
use quill_diagnostics::{Diagnostic, DiagnosticCategory};
use std::io::IsTerminal;
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;
use thiserror::Error;
use tracing::debug;

#[derive(ClapParser, Debug)]
#[command(name = "qlc", version, about = "qlc - the Quill source parser")]
struct Cli {
    /// Quill files to parse.
    #[arg(value_name = "FILE")]
    files: Vec<String>,

    /// Path to a quill.json project file.
    #[arg(short = 'p', long = "project")]
    project: Option<String>,

    /// Parse with the Strict language variant.
    #[arg(long)]
    strict: bool,

    /// List all files that are part of the session.
    #[arg(long = "list-files")]
    list_files: bool,

    /// Print each parsed file's syntax tree.
    #[arg(long, value_enum)]
    dump: Option<DumpFormat>,

    /// Render diagnostics with source excerpts and pretty-print JSON dumps.
    #[arg(long)]
    pretty: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DumpFormat {
    /// Indented one-node-per-line tree.
    Tree,
    /// JSON document per file.
    Json,
}

// ANSI color codes
const RED: &str = "\x1b[31m";
const GRAY: &str = "\x1b[90m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Some file had an error diagnostic.
const EXIT_DIAGNOSTICS: u8 = 2;
/// Inputs could not be read, the project file was invalid, or a parse hit a
/// fatal error.
const EXIT_FAILURE: u8 = 1;

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run_parse(&cli) {
        Ok(code) => code,
        Err(e) => {
            print_error(&e.to_string());
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

/// Install a `tracing` subscriber when `RUST_LOG` is set.
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if std::env::var("RUST_LOG").is_ok() {
        let filter = EnvFilter::from_default_env();
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
            .with(filter)
            .init();
    }
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("No input files found.")]
    NoInputs,

    #[error("cannot serialize '{file}': {source}")]
    Dump {
        file: String,
        #[source]
        source: serde_json::Error,
    },
}

fn run_parse(cli: &Cli) -> Result<ExitCode, CliError> {
    let start = Instant::now();
    let overrides = CompilerOptions {
        strict: cli.strict.then_some(true),
        shared_interner: None,
    };

    let mut session = build_session(cli, &overrides)?;

    if cli.list_files {
        for f in &session.root_files {
            println!("{}", f);
        }
    }

    session.load_root_files();
    let files = session.parse_all()?;

    if let Some(format) = cli.dump {
        for file in files {
            match format {
                DumpFormat::Tree => {
                    println!("// {}", file.file_name());
                    print!("{}", file.dump_tree());
                }
                DumpFormat::Json => {
                    let json = file.to_json(cli.pretty).map_err(|source| CliError::Dump {
                        file: file.file_name().to_string(),
                        source,
                    })?;
                    println!("{}", json);
                }
            }
        }
    }

    let use_color = cli.pretty && std::io::stderr().is_terminal();
    for diag in session.session_diagnostics() {
        eprintln!("{}", diag);
    }
    for file in session.source_files() {
        for diag in file.parse_diagnostics() {
            print_diagnostic(file, diag, cli.pretty);
        }
    }

    let diagnostics = session.diagnostics();
    let session_failed = session.session_diagnostics().iter().any(Diagnostic::is_error);
    debug!(
        files = session.source_files().len(),
        diagnostics = diagnostics.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "parse finished"
    );

    if diagnostics.has_errors() {
        let count = diagnostics.error_count();
        let plural = if count == 1 { "" } else { "s" };
        if use_color {
            eprintln!("\n{}Found {} error{}.{}", RED, count, plural, RESET);
        } else {
            eprintln!("\nFound {} error{}.", count, plural);
        }
        let code = if session_failed { EXIT_FAILURE } else { EXIT_DIAGNOSTICS };
        return Ok(ExitCode::from(code));
    }

    if use_color {
        eprintln!(
            "{}Parsed {} file{} in {:.2}s.{}",
            GRAY,
            session.source_files().len(),
            if session.source_files().len() == 1 { "" } else { "s" },
            start.elapsed().as_secs_f64(),
            RESET
        );
    }
    Ok(ExitCode::SUCCESS)
}

/// Pick the session inputs: an explicit project, explicit files, or a
/// `quill.json` in the working directory.
fn build_session(cli: &Cli, overrides: &CompilerOptions) -> Result<CompileSession, CliError> {
    if let Some(ref project) = cli.project {
        let path = Path::new(project);
        let path = if path.is_dir() {
            path.join(PROJECT_FILE_NAME)
        } else {
            path.to_path_buf()
        };
        return Ok(CompileSession::from_project(&path, overrides)?);
    }
    if !cli.files.is_empty() {
        return Ok(CompileSession::new(overrides.clone()).with_root_files(cli.files.clone()));
    }
    let default_project = Path::new(PROJECT_FILE_NAME);
    if default_project.exists() {
        return Ok(CompileSession::from_project(default_project, overrides)?);
    }
    Err(CliError::NoInputs)
}

// ============================================================================
// Diagnostic rendering
// ============================================================================

/// A parse diagnostic attached to its file's text for miette rendering.
#[derive(Debug, Error)]
#[error("{message}")]
struct ParseReport {
    message: String,
    code: String,
    severity: Severity,
    source_code: NamedSource<String>,
    span: Option<SourceSpan>,
}

impl ParseReport {
    fn new(file: &SourceFile, diag: &Diagnostic) -> Self {
        Self {
            message: diag.message_text.clone(),
            code: format!("QL{}", diag.code),
            severity: match diag.category {
                DiagnosticCategory::Error => Severity::Error,
                DiagnosticCategory::Warning => Severity::Warning,
            },
            source_code: NamedSource::new(file.file_name(), file.text().to_string()),
            span: diag.span.map(to_source_span),
        }
    }
}

impl miette::Diagnostic for ParseReport {
    fn code<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        Some(Box::new(&self.code))
    }

    fn severity(&self) -> Option<Severity> {
        Some(self.severity)
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        Some(&self.source_code)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.span?;
        Some(Box::new(std::iter::once(LabeledSpan::new_with_span(
            Some(self.message.clone()),
            span,
        ))))
    }
}

fn to_source_span(span: TextSpan) -> SourceSpan {
    SourceSpan::from((span.start as usize, span.length as usize))
}

fn print_diagnostic(file: &SourceFile, diag: &Diagnostic, pretty: bool) {
    if pretty {
        let report = miette::Report::new(ParseReport::new(file, diag));
        eprintln!("{:?}", report);
    } else {
        eprintln!("{}", diag.display_with(file.text(), file.line_map()));
    }
}

fn print_error(msg: &str) {
    if std::io::stderr().is_terminal() {
        eprintln!("{}{}error{}: {}", BOLD, RED, RESET, msg);
    } else {
        eprintln!("error: {}", msg);
    }
}
