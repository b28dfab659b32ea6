//! Segmented memory.
//!
//! The machine's only addressable memory is a table of independently sized word
//! segments, addressed by integer handle. This module provides:
//! 1. **Segments:** Owned, growable word buffers with a logical length and an in-use flag.
//! 2. **Segment Table:** Handle allocation with reuse, doubling growth, and checked access.

/// A single segment.
pub mod segment;

/// The handle-indexed segment table.
pub mod table;

pub use segment::Segment;
pub use table::{SegmentTable, TableStats};
