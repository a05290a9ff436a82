//! Integration Test: Sleep Prohibition
//!
//! **Policy**: Production code in the core and the TUI MUST NOT call sleep
//! methods. Waiting happens on I/O, channels, or `tokio::time::interval`
//! frame ticks.
//! **Exceptions**: test code

use architectural_enforcement::{production_lines_of, rust_files, workspace_root, PRODUCTION_DIRS};

/// Test that production code does not contain sleep() calls
#[test]
fn test_no_sleep_in_production_code() {
    let violations = find_sleep_violations();

    if !violations.is_empty() {
        eprintln!("\nSleep calls found in production code:\n");
        for violation in &violations {
            eprintln!("  {violation}");
        }
        eprintln!("\nACCEPTABLE:");
        eprintln!("  - tokio::time::interval() for frame ticks");
        eprintln!("  - awaiting channels (ChatWidget::wait_for_reply) or network I/O");
        eprintln!("  - Test code (#[cfg(test)] modules, tests/ directories)");

        panic!(
            "\nFound {} sleep violation(s) in production code.\nFix these before merging!",
            violations.len()
        );
    }
}

/// Find all sleep() calls in production code
fn find_sleep_violations() -> Vec<String> {
    let root = workspace_root();
    let mut violations = Vec::new();

    for dir in PRODUCTION_DIRS {
        for path in rust_files(&root.join(dir)) {
            for line in production_lines_of(&path) {
                if is_sleep_call(&line.code) {
                    violations.push(format!(
                        "{}:{} - {}",
                        path.display(),
                        line.number,
                        line.code.trim()
                    ));
                }
            }
        }
    }

    violations
}

fn is_sleep_call(code: &str) -> bool {
    code.contains("::sleep(") || code.contains(".sleep(") || code.contains("sleep_until(")
}

#[test]
fn test_sleep_detection() {
    assert!(is_sleep_call("    tokio::time::sleep(Duration::from_millis(10)).await;"));
    assert!(is_sleep_call("    std::thread::sleep(d);"));
    assert!(!is_sleep_call("    frames.tick().await;"));
}

#[test]
fn test_production_dirs_exist() {
    let root = workspace_root();
    for dir in PRODUCTION_DIRS {
        assert!(
            !rust_files(&root.join(dir)).is_empty(),
            "no sources found under {dir}"
        );
    }
}
