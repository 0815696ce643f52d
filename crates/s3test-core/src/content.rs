//! Random-access object content.
//!
//! Stored objects hold their body behind the [`ContentAt`] trait so that a
//! test can seed multi-gigabyte objects without allocating them:
//! [`ByteContent`] wraps an in-memory buffer and [`GeneratedContent`]
//! computes every byte from its offset. Reads hand out an [`ObjectBody`]
//! window that goes through [`ContentAt::read_at`] only as it is consumed.

pub use s3test_model::content::{ByteContent, ContentAt, ObjectBody};

/// Deterministic content of any size whose bytes are derived from their
/// offset and a seed. Nothing is allocated up front.
///
/// ```
/// use s3test_core::content::{ContentAt, GeneratedContent};
///
/// let content = GeneratedContent::new(1 << 40, 7);
/// let mut buf = [0u8; 4];
/// assert_eq!(content.read_at(&mut buf, (1 << 40) - 2), 2);
/// assert_eq!(buf[0], content.byte_at((1 << 40) - 2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratedContent {
    size: u64,
    seed: u8,
}

impl GeneratedContent {
    /// Create generated content of `size` bytes.
    #[must_use]
    pub fn new(size: u64, seed: u8) -> Self {
        Self { size, seed }
    }

    /// The byte stored at `offset`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn byte_at(&self, offset: u64) -> u8 {
        // 251 is prime, so the pattern never lines up with power-of-two part sizes.
        ((offset % 251) as u8).wrapping_add(self.seed)
    }
}

impl ContentAt for GeneratedContent {
    fn size(&self) -> u64 {
        self.size
    }

    fn read_at(&self, buf: &mut [u8], offset: u64) -> usize {
        if offset >= self.size {
            return 0;
        }
        let remaining = self.size - offset;
        let n = usize::try_from(remaining).map_or(buf.len(), |r| buf.len().min(r));
        for (i, b) in buf[..n].iter_mut().enumerate() {
            *b = self.byte_at(offset + i as u64);
        }
        n
    }
}
