//! Error taxonomy for every fallible subsystem, composed into a single
//! top-level error the binary reports.

use thiserror::Error;

/// Errors raised by bit-aligned field extraction and insertion.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BitpackError {
    /// `width > 64` or `width + lsb > 64`.
    #[error("invalid field geometry: width={width}, lsb={lsb} (word is 64 bits)")]
    InvalidWidth { width: u32, lsb: u32 },
    /// A write received a value that does not fit the requested field.
    #[error("value {value} does not fit in {width} bits")]
    Overflow { value: i64, width: u32 },
}

/// Errors raised while assembling a program binary into segment 0.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// The byte count of the input stream was not a multiple of 4.
    #[error("program is truncated: {bytes} bytes is not a multiple of 4")]
    TruncatedProgram { bytes: usize },
    /// The underlying byte stream failed for a reason other than clean EOF.
    #[error("failed to read program: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by the segmented memory subsystem.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MemoryError {
    /// A segment allocation could not be satisfied.
    #[error("out of memory requesting a segment of {size} words")]
    OutOfMemory { size: u32 },
    /// An operation referenced an identifier that is not currently mapped.
    #[error("segment {id} is not mapped")]
    UnmappedSegment { id: u32 },
    /// An UNMAP instruction targeted segment 0.
    #[error("cannot unmap segment 0")]
    UnmapZero,
    /// A read/write/fetch referenced an offset past a segment's length.
    #[error("offset {offset} is out of bounds for segment {id} (length {len})")]
    OutOfBounds { id: u32, offset: u32, len: usize },
}

/// Top-level error for the execution engine, composing every subsystem error.
#[derive(Debug, Error)]
pub enum UmError {
    #[error(transparent)]
    Bitpack(#[from] BitpackError),
    #[error(transparent)]
    Loader(#[from] LoaderError),
    #[error(transparent)]
    Memory(#[from] MemoryError),
    /// The decoded opcode was 14 or 15 (reserved).
    #[error("illegal instruction {word:#010x} at ip={ip}: opcode {opcode} is reserved")]
    BadOpcode { word: u32, ip: u32, opcode: u32 },
    /// DIV with a zero divisor.
    #[error("division by zero at ip={ip}")]
    DivisionByZero { ip: u32 },
    /// OUT with a register value outside [0, 255].
    #[error("OUT value {value} at ip={ip} is out of byte range")]
    OutOfByteRange { ip: u32, value: u32 },
    /// The host's input or output stream failed mid-execution.
    #[error("I/O error at ip={ip}: {source}")]
    Io { ip: u32, source: std::io::Error },
}

pub type Result<T> = std::result::Result<T, UmError>;
