//! Segmented memory: the active code segment, the pool of mapped data
//! segments, and the free-identifier stack that lets `map` reuse
//! identifiers freed by `unmap` in LIFO order.

use std::collections::HashMap;
use std::io::Read;

use log::trace;

use crate::error::{LoaderError, MemoryError};
use crate::loader;

const PROGRAM_ADDRESS: u32 = 0;

#[derive(Debug)]
pub struct SegmentedMemory {
    segments: HashMap<u32, Vec<u32>>,
    /// LIFO stack of identifiers previously mapped and since unmapped.
    free_ids: Vec<u32>,
    /// The next identifier to hand out when `free_ids` is empty.
    next_fresh_id: u32,
    ip: u32,
}

impl SegmentedMemory {
    /// Reads `input` to completion and installs the result as segment 0.
    pub fn load<R: Read>(input: R) -> Result<SegmentedMemory, LoaderError> {
        let program = loader::load_words(input)?;
        Ok(SegmentedMemory::from_words(program))
    }

    /// Installs `program` directly as segment 0, IP at 0.
    pub fn from_words(program: Vec<u32>) -> SegmentedMemory {
        let mut segments = HashMap::new();
        segments.insert(PROGRAM_ADDRESS, program);
        SegmentedMemory { segments, free_ids: Vec::new(), next_fresh_id: 1, ip: 0 }
    }

    /// The word at segment 0's current IP; IP is then post-incremented.
    pub fn fetch_next(&mut self) -> Result<u32, MemoryError> {
        let seg0 = self.segments.get(&PROGRAM_ADDRESS).expect("segment 0 is always mapped");
        let word = *seg0.get(self.ip as usize).ok_or(MemoryError::OutOfBounds {
            id: PROGRAM_ADDRESS,
            offset: self.ip,
            len: seg0.len(),
        })?;
        self.ip += 1;
        Ok(word)
    }

    pub fn ip(&self) -> u32 {
        self.ip
    }

    /// Allocates a new zero-filled segment of `size` words, reusing the
    /// top of the free-identifier stack if one is available.
    pub fn map(&mut self, size: u32) -> Result<u32, MemoryError> {
        let id = match self.free_ids.pop() {
            Some(id) => id,
            None => {
                let id = self.next_fresh_id;
                self.next_fresh_id =
                    self.next_fresh_id.checked_add(1).ok_or(MemoryError::OutOfMemory { size })?;
                id
            }
        };
        self.segments.insert(id, vec![0; size as usize]);
        trace!("mapped segment {id} ({size} words)");
        Ok(id)
    }

    /// Destroys the segment at `id`, pushing it onto the free-identifier
    /// stack. Unmapping segment 0 is a programming error.
    pub fn unmap(&mut self, id: u32) -> Result<(), MemoryError> {
        if id == PROGRAM_ADDRESS {
            return Err(MemoryError::UnmapZero);
        }
        self.segments.remove(&id).ok_or(MemoryError::UnmappedSegment { id })?;
        self.free_ids.push(id);
        trace!("unmapped segment {id}");
        Ok(())
    }

    pub fn read(&self, id: u32, offset: u32) -> Result<u32, MemoryError> {
        let seg = self.segments.get(&id).ok_or(MemoryError::UnmappedSegment { id })?;
        seg.get(offset as usize).copied().ok_or(MemoryError::OutOfBounds {
            id,
            offset,
            len: seg.len(),
        })
    }

    pub fn write(&mut self, id: u32, offset: u32, value: u32) -> Result<(), MemoryError> {
        let seg = self.segments.get_mut(&id).ok_or(MemoryError::UnmappedSegment { id })?;
        let len = seg.len();
        let slot = seg.get_mut(offset as usize).ok_or(MemoryError::OutOfBounds { id, offset, len })?;
        *slot = value;
        Ok(())
    }

    /// Replaces segment 0's contents with a deep copy of segment `id` and
    /// sets IP to `new_ip`. `id == 0` is a mandatory fast path: only IP
    /// changes, with no allocation or copy.
    pub fn load_program(&mut self, id: u32, new_ip: u32) -> Result<(), MemoryError> {
        if id != PROGRAM_ADDRESS {
            let program =
                self.segments.get(&id).ok_or(MemoryError::UnmappedSegment { id })?.clone();
            self.segments.insert(PROGRAM_ADDRESS, program);
            trace!("loaded segment {id} as the active program");
        }
        self.ip = new_ip;
        Ok(())
    }
}
