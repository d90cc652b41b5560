//! CLI-level integration tests. Exercises `um::cli::run_file`, the function
//! factored out of `main.rs`'s body so these scenarios don't need to spawn
//! the compiled binary as a subprocess.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use um::cli;
use um::error::{LoaderError, UmError};

#[test]
fn nonexistent_path_fails_without_panicking() {
    let result = cli::run_file(Path::new("/definitely/does/not/exist/um-cli-test.um"));
    assert!(result.is_err());
}

#[test]
fn truncated_file_reports_truncated_program() {
    let path = std::env::temp_dir().join(format!("um_cli_truncated_{}.um", std::process::id()));
    {
        let mut f = File::create(&path).unwrap();
        f.write_all(&[0x70, 0x00, 0x00]).unwrap();
    }

    let result = cli::run_file(&path);
    let _ = std::fs::remove_file(&path);

    match result {
        Err(UmError::Loader(LoaderError::TruncatedProgram { bytes })) => assert_eq!(bytes, 3),
        other => panic!("expected TruncatedProgram, got {other:?}"),
    }
}
