//! Source file discovery for projects.
//!
//! Include patterns are a small glob dialect: leading literal segments name
//! a base directory, `**` walks it recursively, and the last segment is a
//! file name pattern with at most one `*`. A trailing `*` or `**` matches
//! any Quill source file.

use quill_ast::source_file::SOURCE_EXTENSION;
use std::path::{Path, PathBuf};

/// Directories never descended into.
const SKIPPED_DIRECTORIES: &[&str] = &[".git", "target", "node_modules"];

/// Find the files under `root_dir` matched by `include` and not by `exclude`.
///
/// The result is sorted and free of duplicates.
pub fn discover_source_files(root_dir: &Path, include: &[String], exclude: &[String]) -> Vec<PathBuf> {
    let mut result = Vec::new();
    for pattern in include {
        collect_matching_files(root_dir, pattern, exclude, &mut result);
    }
    result.sort();
    result.dedup();
    result
}

/// Resolve an explicit `files` list against `root_dir`, keeping entries that
/// exist.
pub fn resolve_listed_files(root_dir: &Path, files: &[String]) -> Vec<PathBuf> {
    files
        .iter()
        .map(|f| {
            let path = Path::new(f);
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                root_dir.join(path)
            }
        })
        .filter(|path| path.is_file())
        .collect()
}

/// Whether `path` has a Quill source extension (`.ql` or `.d.ql`).
pub fn is_source_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|name| name.ends_with(SOURCE_EXTENSION))
}

fn collect_matching_files(root_dir: &Path, pattern: &str, exclude: &[String], result: &mut Vec<PathBuf>) {
    let segments: Vec<&str> = pattern
        .trim_start_matches("./")
        .split('/')
        .filter(|s| !s.is_empty())
        .collect();
    let literal_len = segments.iter().take_while(|s| !s.contains('*')).count();

    let mut base = root_dir.to_path_buf();
    for segment in &segments[..literal_len] {
        base.push(segment);
    }

    let rest = &segments[literal_len..];
    let Some(file_pattern) = rest.last() else {
        // Literal path
        if base.is_file() && !is_excluded(root_dir, &base, exclude) {
            result.push(base);
        } else if base.is_dir() {
            walk_directory(root_dir, &base, "*", true, exclude, result);
        }
        return;
    };
    let recursive = rest.len() > 1 || *file_pattern == "**";
    walk_directory(root_dir, &base, file_pattern, recursive, exclude, result);
}

fn walk_directory(
    root_dir: &Path,
    dir: &Path,
    file_pattern: &str,
    recursive: bool,
    exclude: &[String],
    result: &mut Vec<PathBuf>,
) {
    let entries = match std::fs::read_dir(dir) {
        Ok(e) => e,
        Err(_) => return,
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if is_excluded(root_dir, &path, exclude) {
            continue;
        }

        if path.is_dir() {
            let dir_name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
            if recursive && !SKIPPED_DIRECTORIES.contains(&dir_name) {
                walk_directory(root_dir, &path, file_pattern, recursive, exclude, result);
            }
        } else if path.is_file() && matches_file_pattern(&path, file_pattern) {
            result.push(path);
        }
    }
}

fn matches_file_pattern(path: &Path, pattern: &str) -> bool {
    if pattern == "*" || pattern == "**" {
        return is_source_file(path);
    }
    let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    match pattern.find('*') {
        Some(star_pos) => {
            let prefix = &pattern[..star_pos];
            let suffix = &pattern[star_pos + 1..];
            file_name.len() >= prefix.len() + suffix.len()
                && file_name.starts_with(prefix)
                && file_name.ends_with(suffix)
        }
        None => file_name == pattern,
    }
}

/// Whether `path`, taken relative to `root_dir`, falls under an exclude
/// pattern. Patterns match whole path segments.
fn is_excluded(root_dir: &Path, path: &Path, exclude: &[String]) -> bool {
    let relative = path.strip_prefix(root_dir).unwrap_or(path);
    let relative = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");

    exclude.iter().any(|pattern| {
        let pattern = pattern
            .trim_start_matches("./")
            .trim_start_matches("**/")
            .trim_end_matches("/**")
            .trim_end_matches("/*")
            .trim_end_matches('/');
        if pattern.is_empty() {
            return false;
        }
        relative == pattern
            || relative.starts_with(&format!("{pattern}/"))
            || relative.ends_with(&format!("/{pattern}"))
            || relative.contains(&format!("/{pattern}/"))
    })
}
