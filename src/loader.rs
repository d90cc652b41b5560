//! Turns a byte stream into segment 0's word vector.
//!
//! The wire format is a flat sequence of 32-bit words in big-endian byte
//! order: no header, no trailer, no padding beyond the word boundary
//! itself. A stream whose length is not a multiple of 4 is truncated and
//! fails to load.

use std::io::Read;

use log::debug;

use crate::error::LoaderError;

/// Reads `input` to completion and assembles it into a vector of
/// big-endian 32-bit words.
pub fn load_words<R: Read>(mut input: R) -> Result<Vec<u32>, LoaderError> {
    let mut bytes = Vec::new();
    input.read_to_end(&mut bytes)?;

    if bytes.len() % 4 != 0 {
        return Err(LoaderError::TruncatedProgram { bytes: bytes.len() });
    }

    let words: Vec<u32> = bytes
        .chunks_exact(4)
        .map(|chunk| u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect();

    debug!("loaded program: {} words ({} bytes)", words.len(), bytes.len());
    Ok(words)
}
