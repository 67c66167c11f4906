//! External command tests. Unix-only: they rely on `sh`.
#![cfg(unix)]

use authgraph_core::errors::{ErrorCode, StageError};
use authgraph_pipeline::external::{which, which_in, ExternalCommand};

#[test]
fn test_nonzero_exit_reports_command_and_code() {
    let err = ExternalCommand::new("sh")
        .arg("-c")
        .arg("exit 3")
        .run()
        .unwrap_err();
    match &err {
        StageError::CommandFailed { command, code } => {
            assert_eq!(command, "sh -c exit 3");
            assert_eq!(*code, Some(3));
        }
        other => panic!("expected CommandFailed, got {other:?}"),
    }
    assert_eq!(err.to_string(), "sh -c exit 3 exitcode: 3");
    assert_eq!(err.error_code(), "COMMAND_FAILED");
}

#[test]
fn test_stdout_redirect() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.txt");
    ExternalCommand::new("sh")
        .arg("-c")
        .arg("printf 'a\\tb\\n'")
        .stdout_to(&out)
        .run()
        .unwrap();
    assert_eq!(std::fs::read_to_string(&out).unwrap(), "a\tb\n");
}

#[test]
fn test_spawn_failure() {
    let err = ExternalCommand::new("authgraph-definitely-missing").run().unwrap_err();
    assert!(matches!(err, StageError::Spawn { .. }));
}

#[test]
fn test_which() {
    assert!(which("sh").is_some());
    assert!(which("authgraph-definitely-missing").is_none());
}

#[test]
fn test_which_in_explicit_path() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let tool = dir.path().join("pagerank");
    std::fs::write(&tool, "#!/bin/sh\n").unwrap();
    let search = std::env::join_paths([dir.path()]).unwrap();

    // Not executable yet.
    assert_eq!(which_in("pagerank", &search), None);

    std::fs::set_permissions(&tool, std::fs::Permissions::from_mode(0o755)).unwrap();
    assert_eq!(which_in("pagerank", &search), Some(tool.clone()));
    assert_eq!(which_in(tool.to_str().unwrap(), &search), Some(tool));
}
