//! Random-access content and the lazily read bodies served from it.
//!
//! A stored object keeps its bytes behind [`ContentAt`]. Reads hand out an
//! [`ObjectBody`], a window over that content which copies bytes only as
//! they are read, so a multi-gigabyte fixture costs nothing until a caller
//! actually consumes it.

use std::fmt;
use std::io;
use std::sync::Arc;

use bytes::{Bytes, BytesMut};

/// Content that supports reads at arbitrary offsets.
pub trait ContentAt: Send + Sync + fmt::Debug {
    /// Total size of the content in bytes.
    fn size(&self) -> u64;

    /// Copy bytes starting at `offset` into `buf`.
    ///
    /// Returns the number of bytes copied, which is less than `buf.len()`
    /// only when the end of the content is reached.
    fn read_at(&self, buf: &mut [u8], offset: u64) -> usize;
}

// ---------------------------------------------------------------------------
// ByteContent
// ---------------------------------------------------------------------------

/// Content backed by an in-memory buffer.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ByteContent {
    data: Bytes,
}

impl ByteContent {
    /// Wrap a buffer.
    #[must_use]
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self { data: data.into() }
    }

    /// The underlying bytes.
    #[must_use]
    pub fn bytes(&self) -> &Bytes {
        &self.data
    }
}

impl fmt::Debug for ByteContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteContent")
            .field("size", &self.data.len())
            .finish()
    }
}

impl ContentAt for ByteContent {
    fn size(&self) -> u64 {
        self.data.len() as u64
    }

    fn read_at(&self, buf: &mut [u8], offset: u64) -> usize {
        let Ok(offset) = usize::try_from(offset) else {
            return 0;
        };
        if offset >= self.data.len() {
            return 0;
        }
        let n = buf.len().min(self.data.len() - offset);
        buf[..n].copy_from_slice(&self.data[offset..offset + n]);
        n
    }
}

// ---------------------------------------------------------------------------
// ObjectBody
// ---------------------------------------------------------------------------

/// A window of shared content, read on demand.
///
/// Implements [`io::Read`]; [`ObjectBody::read_all`] buffers the rest of
/// the window when the caller wants it in one piece.
///
/// ```
/// use std::io::Read;
/// use std::sync::Arc;
///
/// use s3test_model::content::{ByteContent, ObjectBody};
///
/// let content = Arc::new(ByteContent::new("hello world"));
/// let mut body = ObjectBody::new(content, 6, 5);
/// let mut out = String::new();
/// body.read_to_string(&mut out).unwrap();
/// assert_eq!(out, "world");
/// ```
#[derive(Clone)]
pub struct ObjectBody {
    content: Arc<dyn ContentAt>,
    pos: u64,
    end: u64,
}

impl ObjectBody {
    /// A window of `len` bytes of `content` starting at `start`, clamped to
    /// the content size.
    #[must_use]
    pub fn new(content: Arc<dyn ContentAt>, start: u64, len: u64) -> Self {
        let end = start.saturating_add(len).min(content.size());
        Self {
            content,
            pos: start.min(end),
            end,
        }
    }

    /// A window over all of `content`.
    #[must_use]
    pub fn full(content: Arc<dyn ContentAt>) -> Self {
        let size = content.size();
        Self::new(content, 0, size)
    }

    /// Bytes left to read.
    #[must_use]
    pub fn remaining(&self) -> u64 {
        self.end - self.pos
    }

    /// Returns true if nothing is left to read.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pos == self.end
    }

    /// Read the rest of the window into one buffer.
    ///
    /// # Errors
    ///
    /// Fails if the window does not fit in memory or the content ends
    /// before the window does.
    pub fn read_all(self) -> io::Result<Bytes> {
        let len = usize::try_from(self.remaining()).map_err(|_| {
            io::Error::other(format!(
                "window of {} bytes does not fit in memory",
                self.remaining()
            ))
        })?;
        let mut buf = BytesMut::zeroed(len);
        let n = self.content.read_at(&mut buf, self.pos);
        if n != len {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("short read at offset {}: got {n} of {len} bytes", self.pos),
            ));
        }
        Ok(buf.freeze())
    }
}

impl Default for ObjectBody {
    fn default() -> Self {
        Self::full(Arc::new(ByteContent::default()))
    }
}

impl fmt::Debug for ObjectBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectBody")
            .field("content", &self.content)
            .field("pos", &self.pos)
            .field("end", &self.end)
            .finish()
    }
}

impl From<Bytes> for ObjectBody {
    fn from(data: Bytes) -> Self {
        Self::full(Arc::new(ByteContent::new(data)))
    }
}

impl io::Read for ObjectBody {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let want = usize::try_from(self.remaining()).map_or(buf.len(), |r| buf.len().min(r));
        if want == 0 {
            return Ok(0);
        }
        let n = self.content.read_at(&mut buf[..want], self.pos);
        self.pos += n as u64;
        Ok(n)
    }
}
