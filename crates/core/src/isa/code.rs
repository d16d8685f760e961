//! Word-level views of generated code.
//!
//! Code buffers are little-endian byte slices; instructions sit at 4-byte
//! aligned offsets. The views here read and patch whole instruction words and
//! report offsets that are unaligned or run past the buffer.

use tracing::trace;

use crate::common::error::EncodingError;
use crate::isa::instruction::{BREAK_INSTRUCTION_FILLER, INSTR_SIZE};

fn word_range(offset: usize, len: usize) -> Result<std::ops::Range<usize>, EncodingError> {
    if offset % INSTR_SIZE != 0 {
        return Err(EncodingError::UnalignedCodeOffset { offset });
    }
    match offset.checked_add(INSTR_SIZE) {
        Some(end) if end <= len => Ok(offset..end),
        _ => Err(EncodingError::CodeOutOfBounds { offset, len }),
    }
}

fn read_word(bytes: &[u8], offset: usize) -> Result<u32, EncodingError> {
    let range = word_range(offset, bytes.len())?;
    let raw: [u8; INSTR_SIZE] = bytes[range]
        .try_into()
        .map_err(|_| EncodingError::CodeOutOfBounds {
            offset,
            len: bytes.len(),
        })?;
    Ok(u32::from_le_bytes(raw))
}

/// Read-only view of a code buffer.
#[derive(Debug, Clone, Copy)]
pub struct CodeView<'a> {
    bytes: &'a [u8],
}

impl<'a> CodeView<'a> {
    /// Wraps `bytes`.
    pub const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    /// Buffer length in bytes.
    pub const fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns whether the buffer is empty.
    pub const fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Reads the instruction at `offset`.
    ///
    /// # Errors
    ///
    /// Fails if `offset` is unaligned or the word extends past the buffer.
    pub fn word_at(&self, offset: usize) -> Result<u32, EncodingError> {
        read_word(self.bytes, offset)
    }

    /// Iterates `(offset, word)` over every whole instruction in the buffer.
    pub fn words(&self) -> impl Iterator<Item = (usize, u32)> + 'a {
        self.bytes
            .chunks_exact(INSTR_SIZE)
            .enumerate()
            .map(|(i, chunk)| {
                let mut raw = [0u8; INSTR_SIZE];
                raw.copy_from_slice(chunk);
                (i * INSTR_SIZE, u32::from_le_bytes(raw))
            })
    }
}

/// Mutable view of a code buffer, used to emit and patch instructions.
#[derive(Debug)]
pub struct CodeViewMut<'a> {
    bytes: &'a mut [u8],
}

impl<'a> CodeViewMut<'a> {
    /// Wraps `bytes`.
    pub const fn new(bytes: &'a mut [u8]) -> Self {
        Self { bytes }
    }

    /// Read-only view of the same buffer.
    pub fn as_view(&self) -> CodeView<'_> {
        CodeView::new(self.bytes)
    }

    /// Reads the instruction at `offset`.
    ///
    /// # Errors
    ///
    /// Fails if `offset` is unaligned or the word extends past the buffer.
    pub fn word_at(&self, offset: usize) -> Result<u32, EncodingError> {
        read_word(self.bytes, offset)
    }

    /// Writes `word` at `offset`.
    ///
    /// # Errors
    ///
    /// Fails if `offset` is unaligned or the word extends past the buffer.
    pub fn set_word_at(&mut self, offset: usize, word: u32) -> Result<(), EncodingError> {
        let range = word_range(offset, self.bytes.len())?;
        trace!(offset, word = format_args!("{word:#010x}"), "write instruction");
        self.bytes[range].copy_from_slice(&word.to_le_bytes());
        Ok(())
    }

    /// Rewrites the instruction at `offset` with `patch`.
    ///
    /// # Errors
    ///
    /// Fails if the offset is invalid or `patch` fails; the buffer is left
    /// unchanged on failure.
    pub fn patch<F>(&mut self, offset: usize, patch: F) -> Result<u32, EncodingError>
    where
        F: FnOnce(u32) -> Result<u32, EncodingError>,
    {
        let old = self.word_at(offset)?;
        let new = patch(old)?;
        trace!(
            offset,
            old = format_args!("{old:#010x}"),
            new = format_args!("{new:#010x}"),
            "patch instruction"
        );
        self.set_word_at(offset, new)?;
        Ok(new)
    }

    /// Fills the whole buffer with break instructions.
    ///
    /// A trailing partial word, if any, is left as is.
    pub fn fill_with_breaks(&mut self) {
        let filler = BREAK_INSTRUCTION_FILLER.to_le_bytes();
        for chunk in self.bytes.chunks_exact_mut(INSTR_SIZE) {
            chunk.copy_from_slice(&filler[..INSTR_SIZE]);
        }
    }
}
