//! Segment Table.
//!
//! This module owns every segment buffer and hands out integer handles. It performs:
//! 1. **Allocation:** Scans from a rotating candidate cursor for an unused handle; when a full
//!    sweep finds none, the table doubles and the first new handle is used.
//! 2. **Reuse:** `free` makes the released handle the next candidate, so it is handed out first.
//! 3. **Checked Access:** Reads and writes fail on unused handles and out-of-range offsets.
//! 4. **Program Replacement:** Copies another segment over handle 0.
//!
//! Handle 0 always holds the running program. It is never returned by `allocate` and never freed.

use tracing::debug;

use crate::common::{PROGRAM_HANDLE, Result, VmError};
use crate::config::MemoryConfig;

use super::segment::Segment;

const PROGRAM: usize = PROGRAM_HANDLE as usize;

/// Counters describing table activity over a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TableStats {
    /// Successful `allocate` calls.
    pub allocations: u64,
    /// Successful `free` calls.
    pub frees: u64,
    /// Number of times the handle table doubled.
    pub growths: u64,
    /// Segments currently in use, excluding the program segment.
    pub live: u64,
    /// Highest value `live` reached.
    pub peak_live: u64,
    /// Program replacements from a non-zero handle.
    pub program_loads: u64,
}

/// Handle-indexed table of segments.
///
/// The table only grows. Freed slots keep their handle and become eligible for reuse.
#[derive(Debug)]
pub struct SegmentTable {
    slots: Vec<Segment>,
    candidate: usize,
    max_segment_words: u32,
    stats: TableStats,
}

impl SegmentTable {
    /// Creates a table with `config.initial_handles` unused slots (at least one).
    ///
    /// Slot 0 stays empty until `install_program` is called.
    ///
    /// # Arguments
    ///
    /// * `config` - Memory configuration (segment cap, initial handle count).
    pub fn new(config: &MemoryConfig) -> Self {
        let count = config.initial_handles.max(1) as usize;
        let mut slots = Vec::with_capacity(count);
        slots.resize_with(count, Segment::default);
        Self {
            slots,
            candidate: PROGRAM,
            max_segment_words: config.segment_cap(),
            stats: TableStats::default(),
        }
    }

    /// Installs `words` as the program segment, replacing any previous contents.
    ///
    /// # Errors
    ///
    /// Returns `VmError::SegmentTooLarge` if the program exceeds the segment cap.
    pub fn install_program(&mut self, words: Vec<u32>) -> Result<()> {
        self.check_len(words.len())?;
        self.slots[PROGRAM] = Segment::from_words(words);
        Ok(())
    }

    /// Number of handle slots, used or not.
    pub fn handle_count(&self) -> usize {
        self.slots.len()
    }

    /// Handle the next allocation scan starts from.
    pub const fn candidate(&self) -> usize {
        self.candidate
    }

    /// Activity counters.
    pub const fn stats(&self) -> &TableStats {
        &self.stats
    }

    /// Per-segment cap in words.
    pub const fn max_segment_words(&self) -> u32 {
        self.max_segment_words
    }

    /// Looks up a segment regardless of whether it is in use.
    pub fn segment(&self, handle: u32) -> Option<&Segment> {
        self.slots.get(handle as usize)
    }

    /// The program segment.
    #[inline(always)]
    pub fn program(&self) -> &Segment {
        &self.slots[PROGRAM]
    }

    /// Whether `handle` names an in-use segment.
    pub fn is_active(&self, handle: u32) -> bool {
        self.segment(handle).is_some_and(Segment::in_use)
    }

    /// Allocates a zero-filled segment of exactly `len` words.
    ///
    /// # Arguments
    ///
    /// * `len` - Requested length in words.
    ///
    /// # Returns
    ///
    /// A non-zero handle naming the new segment.
    ///
    /// # Errors
    ///
    /// Returns `VmError::SegmentTooLarge` if `len` exceeds the cap, or
    /// `VmError::HandlesExhausted` if the table cannot grow any further.
    pub fn allocate(&mut self, len: u32) -> Result<u32> {
        self.check_len(len as usize)?;
        let handle = self.find_free_handle()?;
        self.slots[handle].activate(len as usize);

        self.stats.allocations += 1;
        self.stats.live += 1;
        self.stats.peak_live = self.stats.peak_live.max(self.stats.live);
        debug!(handle, len, "allocated segment");
        Ok(handle as u32)
    }

    /// Frees an in-use segment and makes its handle the next allocation candidate.
    ///
    /// # Errors
    ///
    /// Returns `VmError::FreeProgramSegment` for handle 0 and
    /// `VmError::InactiveSegment` for unknown or already-free handles.
    pub fn free(&mut self, handle: u32) -> Result<()> {
        if handle == PROGRAM_HANDLE {
            return Err(VmError::FreeProgramSegment);
        }
        let slot = self.active_mut(handle)?;
        slot.release();
        self.candidate = handle as usize;

        self.stats.frees += 1;
        self.stats.live -= 1;
        debug!(handle, "freed segment");
        Ok(())
    }

    /// Reads the word at `offset` in segment `handle`.
    ///
    /// # Errors
    ///
    /// Returns `VmError::InactiveSegment` or `VmError::OffsetOutOfBounds`.
    #[inline]
    pub fn read(&self, handle: u32, offset: u32) -> Result<u32> {
        let slot = self.active(handle)?;
        slot.words()
            .get(offset as usize)
            .copied()
            .ok_or(VmError::OffsetOutOfBounds {
                handle,
                offset,
                len: slot.len() as u32,
            })
    }

    /// Writes `value` at `offset` in segment `handle`.
    ///
    /// # Errors
    ///
    /// Returns `VmError::InactiveSegment` or `VmError::OffsetOutOfBounds`.
    #[inline]
    pub fn write(&mut self, handle: u32, offset: u32, value: u32) -> Result<()> {
        let slot = self.active_mut(handle)?;
        let len = slot.len() as u32;
        let cell = slot
            .words_mut()
            .get_mut(offset as usize)
            .ok_or(VmError::OffsetOutOfBounds {
                handle,
                offset,
                len,
            })?;
        *cell = value;
        Ok(())
    }

    /// Fetches the instruction word at `pc` from the program segment.
    ///
    /// # Errors
    ///
    /// Returns `VmError::PcOutOfBounds` if `pc` is past the end of the program.
    #[inline(always)]
    pub fn fetch(&self, pc: u32) -> Result<u32> {
        let program = self.program();
        program
            .words()
            .get(pc as usize)
            .copied()
            .ok_or(VmError::PcOutOfBounds {
                pc,
                len: program.len() as u32,
            })
    }

    /// Grows segment `handle` to hold at least `len` words without changing its contents.
    ///
    /// # Errors
    ///
    /// Returns `VmError::InactiveSegment` or `VmError::SegmentTooLarge`.
    pub fn ensure_capacity(&mut self, handle: u32, len: u32) -> Result<()> {
        self.check_len(len as usize)?;
        self.active_mut(handle)?.reserve_total(len as usize);
        Ok(())
    }

    /// Replaces the program segment with a copy of segment `handle`.
    ///
    /// Handle 0 is a no-op. Otherwise the source must be in use and non-empty; segment 0
    /// is grown to fit and its length becomes the source length.
    ///
    /// # Errors
    ///
    /// Returns `VmError::InactiveSegment` or `VmError::EmptySegment`.
    pub fn replace_program(&mut self, handle: u32) -> Result<()> {
        if handle == PROGRAM_HANDLE {
            return Ok(());
        }
        let src_len = {
            let src = self.active(handle)?;
            if src.is_empty() {
                return Err(VmError::EmptySegment(handle));
            }
            src.len()
        };
        self.ensure_capacity(PROGRAM_HANDLE, src_len as u32)?;

        let (program, rest) = self.slots.split_at_mut(1);
        program[PROGRAM].copy_from(rest[handle as usize - 1].words());

        self.stats.program_loads += 1;
        debug!(handle, len = src_len, "replaced program segment");
        Ok(())
    }

    /// Scans from the candidate cursor for an unused, non-program slot, doubling the table
    /// after one unsuccessful sweep.
    fn find_free_handle(&mut self) -> Result<usize> {
        let count = self.slots.len();
        for _ in 0..count {
            if self.candidate != PROGRAM && !self.slots[self.candidate].in_use() {
                return Ok(self.candidate);
            }
            self.candidate = (self.candidate + 1) % count;
        }
        self.grow()?;
        Ok(self.candidate)
    }

    /// Doubles the handle count and points the candidate at the first new slot.
    fn grow(&mut self) -> Result<()> {
        let old = self.slots.len();
        let new = old
            .checked_mul(2)
            .filter(|&n| n - 1 <= u32::MAX as usize)
            .ok_or(VmError::HandlesExhausted(old))?;
        self.slots.resize_with(new, Segment::default);
        self.candidate = old;
        self.stats.growths += 1;
        debug!(from = old, to = new, "grew segment table");
        Ok(())
    }

    fn check_len(&self, len: usize) -> Result<()> {
        if len > self.max_segment_words as usize {
            return Err(VmError::SegmentTooLarge {
                requested: len,
                max: self.max_segment_words,
            });
        }
        Ok(())
    }

    #[inline(always)]
    fn active(&self, handle: u32) -> Result<&Segment> {
        self.slots
            .get(handle as usize)
            .filter(|s| s.in_use())
            .ok_or(VmError::InactiveSegment(handle))
    }

    #[inline(always)]
    fn active_mut(&mut self, handle: u32) -> Result<&mut Segment> {
        self.slots
            .get_mut(handle as usize)
            .filter(|s| s.in_use())
            .ok_or(VmError::InactiveSegment(handle))
    }
}
