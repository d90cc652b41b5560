//! Thin CLI front end: opens a `.um` binary, loads it into segment 0, and
//! runs the fetch-decode-execute loop against the process's real stdin and
//! stdout. Factored out of `main.rs` so the nonexistent-path and
//! truncated-file failure paths are reachable from integration tests
//! without spawning the compiled binary as a subprocess.

use std::fs::File;
use std::io::{stdin, stdout};
use std::path::Path;

use crate::engine::Um;
use crate::error::{LoaderError, UmError};
use crate::memory::SegmentedMemory;

/// Opens `path`, loads it as a UM program, and runs it to completion
/// against the process's stdin/stdout.
pub fn run_file(path: &Path) -> Result<(), UmError> {
    let file = File::open(path).map_err(LoaderError::Io)?;
    let memory = SegmentedMemory::load(file)?;

    let stdin = stdin();
    let stdout = stdout();
    let mut engine = Um::new(memory, stdin.lock(), stdout.lock());
    engine.run()
}
