//! Architectural Enforcement Integration Tests
//!
//! This package contains integration tests that enforce architectural principles:
//! - No sleep() calls in production code
//! - No blocking I/O inside async code in the core crate
//! - No UI framework dependencies in the core crate
//!
//! These tests are designed to catch violations early in the development cycle.
//! This library holds the source-scanning helpers they share.

use std::fs;
use std::path::{Path, PathBuf};

/// Production source directories, relative to the workspace root
pub const PRODUCTION_DIRS: &[&str] = &["chat/core/src", "tui/src"];

/// Workspace root (two levels above this crate)
pub fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../..")
}

/// A line of production code
#[derive(Debug, Clone)]
pub struct CodeLine {
    /// 1-based line number
    pub number: usize,
    /// Line with any trailing `//` comment removed
    pub code: String,
}

/// All `.rs` files under a directory, sorted
pub fn rust_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| p.extension().and_then(|s| s.to_str()) == Some("rs"))
        .collect();
    files.sort();
    files
}

/// Lines of a source file that belong to production code
///
/// Everything from the first `#[cfg(test)]` on is treated as test code;
/// modules in this workspace keep their tests at the bottom. Comment-only
/// lines are dropped.
pub fn production_lines(content: &str) -> Vec<CodeLine> {
    content
        .lines()
        .enumerate()
        .take_while(|(_, line)| !line.trim_start().starts_with("#[cfg(test)]"))
        .filter_map(|(idx, line)| {
            let code = line.split("//").next().unwrap_or(line);
            if code.trim().is_empty() {
                None
            } else {
                Some(CodeLine {
                    number: idx + 1,
                    code: code.to_string(),
                })
            }
        })
        .collect()
}

/// Read a file's production lines (empty if unreadable)
pub fn production_lines_of(path: &Path) -> Vec<CodeLine> {
    fs::read_to_string(path)
        .map(|content| production_lines(&content))
        .unwrap_or_default()
}

/// Whether the nearest enclosing `fn` above `idx` is `async`
///
/// Returns `None` outside any function.
pub fn enclosing_fn_is_async(lines: &[CodeLine], idx: usize) -> Option<bool> {
    lines[..=idx.min(lines.len().saturating_sub(1))]
        .iter()
        .rev()
        .find(|l| l.code.contains("fn ") && !l.code.contains("Fn("))
        .map(|l| l.code.contains("async fn"))
}

/// Names of the normal (non-dev, non-build) dependencies in a Cargo.toml
pub fn dependency_names(manifest: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut in_deps = false;

    for line in manifest.lines() {
        let line = line.trim();
        if line.starts_with('[') {
            let section = line.trim_matches(|c| c == '[' || c == ']');
            in_deps = section == "dependencies" || section.ends_with(".dependencies");
            continue;
        }
        if !in_deps || line.starts_with('#') {
            continue;
        }
        if let Some((name, _)) = line.split_once('=') {
            let name = name.trim();
            if !name.is_empty() {
                names.push(name.to_string());
            }
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_production_lines_stop_at_tests() {
        let src = "fn a() {}\n// note\nfn b() {} // trailing\n#[cfg(test)]\nfn c() {}\n";
        let lines = production_lines(src);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].number, 3);
        assert_eq!(lines[1].code.trim(), "fn b() {}");
    }

    #[test]
    fn test_enclosing_fn_detection() {
        let lines = production_lines(
            "pub fn load() {\n    std::fs::read(p);\n}\npub async fn fetch() {\n    x().await;\n}\n",
        );
        assert_eq!(enclosing_fn_is_async(&lines, 1), Some(false));
        assert_eq!(enclosing_fn_is_async(&lines, 4), Some(true));
    }

    #[test]
    fn test_dependency_names_skip_dev_deps() {
        let manifest = r#"
[package]
name = "x"

[dependencies]
# UI
tokio = { version = "1" }
serde = "1.0"

[dev-dependencies]
ratatui = "0.29"

[target.'cfg(unix)'.dependencies]
libc = "0.2"
"#;
        assert_eq!(dependency_names(manifest), vec!["tokio", "serde", "libc"]);
    }
}
