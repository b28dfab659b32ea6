//! Segment storage.

/// A handle-addressed block of 32-bit words.
///
/// The logical length is the length of `words`; the capacity is the allocation
/// behind it. A segment that is not in use owns no buffer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Segment {
    words: Vec<u32>,
    in_use: bool,
}

impl Segment {
    /// Creates an in-use segment holding `words`.
    pub const fn from_words(words: Vec<u32>) -> Self {
        Self {
            words,
            in_use: true,
        }
    }

    /// Whether the segment is currently allocated.
    #[inline(always)]
    pub const fn in_use(&self) -> bool {
        self.in_use
    }

    /// Logical length in words.
    #[inline(always)]
    pub const fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the logical length is zero.
    pub const fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Allocated capacity in words.
    pub fn capacity(&self) -> usize {
        self.words.capacity()
    }

    /// Borrows the logically valid words.
    #[inline(always)]
    pub fn words(&self) -> &[u32] {
        &self.words
    }

    /// Mutably borrows the logically valid words.
    #[inline(always)]
    pub fn words_mut(&mut self) -> &mut [u32] {
        &mut self.words
    }

    /// Marks the segment in use with `len` zeroed words, reusing any existing buffer.
    pub(crate) fn activate(&mut self, len: usize) {
        self.words.clear();
        self.words.resize(len, 0);
        self.in_use = true;
    }

    /// Releases the buffer and marks the segment unused.
    pub(crate) fn release(&mut self) {
        self.words = Vec::new();
        self.in_use = false;
    }

    /// Grows the capacity to at least `len` words without touching existing data.
    pub(crate) fn reserve_total(&mut self, len: usize) {
        if len > self.words.capacity() {
            self.words.reserve_exact(len - self.words.len());
        }
    }

    /// Overwrites the contents with `src`, setting the length to `src.len()`.
    pub(crate) fn copy_from(&mut self, src: &[u32]) {
        self.reserve_total(src.len());
        self.words.clear();
        self.words.extend_from_slice(src);
        self.in_use = true;
    }
}
