//! Integration Test: Headless Core
//!
//! **Policy**: `chat-core` holds widget state and the assistant client only.
//! It MUST NOT depend on a UI framework; surfaces depend on it, never the
//! other way round.

use std::fs;

use architectural_enforcement::{
    dependency_names, production_lines_of, rust_files, workspace_root,
};

const UI_CRATES: &[&str] = &["ratatui", "crossterm", "tui", "saathi-tui"];

#[test]
fn test_core_manifest_has_no_ui_dependencies() {
    let manifest = fs::read_to_string(workspace_root().join("chat/core/Cargo.toml"))
        .expect("chat/core/Cargo.toml should be readable");

    let offending: Vec<String> = dependency_names(&manifest)
        .into_iter()
        .filter(|name| UI_CRATES.contains(&name.as_str()))
        .collect();

    assert!(
        offending.is_empty(),
        "chat-core depends on UI crates: {offending:?}"
    );
}

#[test]
fn test_core_sources_do_not_import_ui_crates() {
    let mut violations = Vec::new();

    for path in rust_files(&workspace_root().join("chat/core/src")) {
        for line in production_lines_of(&path) {
            if line.code.contains("ratatui::")
                || line.code.contains("crossterm::")
                || line.code.contains("saathi_tui::")
            {
                violations.push(format!("{}:{}", path.display(), line.number));
            }
        }
    }

    assert!(
        violations.is_empty(),
        "UI imports in chat-core:\n  {}",
        violations.join("\n  ")
    );
}

#[test]
fn test_tui_depends_on_core() {
    let manifest = fs::read_to_string(workspace_root().join("tui/Cargo.toml"))
        .expect("tui/Cargo.toml should be readable");
    assert!(dependency_names(&manifest).contains(&"chat-core".to_string()));
}
