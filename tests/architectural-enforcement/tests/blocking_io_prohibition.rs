//! Integration Test: Blocking I/O Prohibition
//!
//! **Policy**: The core crate runs inside the UI's tokio runtime, so async
//! code there MUST NOT use blocking I/O.
//! **Required**: `tokio::fs`, `tokio::net`, async `reqwest`
//! **Acceptable**: blocking calls in plain (non-async) functions, such as
//! loading the config file before the event loop starts

use architectural_enforcement::{
    enclosing_fn_is_async, production_lines_of, rust_files, workspace_root, PRODUCTION_DIRS,
};

/// Test that async core code does not use blocking I/O
#[test]
fn test_no_blocking_io_in_async_core_code() {
    let root = workspace_root();
    let mut violations = Vec::new();

    for path in rust_files(&root.join("chat/core/src")) {
        let lines = production_lines_of(&path);
        for (idx, line) in lines.iter().enumerate() {
            let blocking = line.code.contains("std::fs::")
                || line.code.contains("std::net::")
                || line.code.contains("std::io::stdin()")
                || line.code.contains("std::process::Command");
            if blocking && enclosing_fn_is_async(&lines, idx) == Some(true) {
                violations.push(format!(
                    "{}:{} - {}",
                    path.display(),
                    line.number,
                    line.code.trim()
                ));
            }
        }
    }

    assert!(
        violations.is_empty(),
        "Blocking I/O in async code:\n  {}",
        violations.join("\n  ")
    );
}

/// Test that nobody reaches for the blocking HTTP client
#[test]
fn test_no_blocking_http_client() {
    let root = workspace_root();
    let mut violations = Vec::new();

    for dir in PRODUCTION_DIRS {
        for path in rust_files(&root.join(dir)) {
            for line in production_lines_of(&path) {
                if line.code.contains("reqwest::blocking") {
                    violations.push(format!("{}:{}", path.display(), line.number));
                }
            }
        }
    }

    assert!(
        violations.is_empty(),
        "reqwest::blocking used in:\n  {}",
        violations.join("\n  ")
    );
}
