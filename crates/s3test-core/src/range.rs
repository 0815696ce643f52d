//! Byte-range parsing for ranged reads and part copies.
//!
//! Supported formats:
//! - `bytes=A-B` -- bytes `A` through `B` inclusive, `B` clamped to the end
//! - `bytes=A-` -- from byte `A` to the end
//! - `bytes=-N` -- the last `N` bytes, all of them if `N` exceeds the length
//!
//! Callers never fail a request because of a bad range. [`resolve_range`]
//! logs the parse failure and falls back to the whole content.

use std::fmt;

use tracing::warn;

/// An inclusive byte window `[start, last]` within a piece of content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    /// Offset of the first byte.
    pub start: u64,
    /// Offset of the last byte, inclusive.
    pub last: u64,
}

impl ByteRange {
    /// Create a range, or `None` when `start > last`.
    #[must_use]
    pub fn new(start: u64, last: u64) -> Option<Self> {
        (start <= last).then_some(Self { start, last })
    }

    /// Number of bytes covered by the range.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.last - self.start + 1
    }

    /// A valid range always covers at least one byte.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Format the `Content-Range` header value for content of `total` bytes.
    ///
    /// ```
    /// use s3test_core::range::ByteRange;
    ///
    /// let range = ByteRange::new(90, 99).unwrap();
    /// assert_eq!(range.content_range(100), "bytes 90-99/100");
    /// ```
    #[must_use]
    pub fn content_range(&self, total: u64) -> String {
        format!("bytes {}-{}/{total}", self.start, self.last)
    }
}

impl fmt::Display for ByteRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bytes={}-{}", self.start, self.last)
    }
}

/// Failure to turn a range specifier into a [`ByteRange`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeParseError {
    /// The specifier does not start with `bytes=`.
    #[error("parse byte range {spec}: range must start with bytes=")]
    MissingPrefix {
        /// The raw specifier.
        spec: String,
    },

    /// A numeric component is missing or not an unsigned integer.
    #[error("parse byte range {spec}: could not parse {component}")]
    InvalidNumber {
        /// The raw specifier.
        spec: String,
        /// Which component failed (`start`, `end`, or `suffix length`).
        component: &'static str,
    },

    /// The range selects no bytes of the content.
    #[error("parse byte range {spec}: not satisfiable for content of {length} bytes")]
    Unsatisfiable {
        /// The raw specifier.
        spec: String,
        /// The content length the range was resolved against.
        length: u64,
    },
}

/// Parse a range specifier against content of `length` bytes.
///
/// # Errors
///
/// Returns [`RangeParseError`] if the specifier is malformed or selects no
/// bytes.
///
/// # Examples
///
/// ```
/// use s3test_core::range::{parse_byte_range, ByteRange};
///
/// assert_eq!(parse_byte_range("bytes=0-499", 1000).unwrap(), ByteRange::new(0, 499).unwrap());
/// assert_eq!(parse_byte_range("bytes=-10", 100).unwrap(), ByteRange::new(90, 99).unwrap());
/// assert!(parse_byte_range("0-499", 1000).is_err());
/// ```
pub fn parse_byte_range(spec: &str, length: u64) -> Result<ByteRange, RangeParseError> {
    let body = spec
        .strip_prefix("bytes=")
        .ok_or_else(|| RangeParseError::MissingPrefix {
            spec: spec.to_owned(),
        })?;

    let number = |s: &str, component: &'static str| {
        s.parse::<u64>()
            .map_err(|_| RangeParseError::InvalidNumber {
                spec: spec.to_owned(),
                component,
            })
    };
    let unsatisfiable = || RangeParseError::Unsatisfiable {
        spec: spec.to_owned(),
        length,
    };

    let (start, end) = if let Some(prefix) = body.strip_suffix('-') {
        (number(prefix, "start")?, None)
    } else if let Some(suffix) = body.strip_prefix('-') {
        let n = number(suffix, "suffix length")?;
        if n == 0 {
            return Err(unsatisfiable());
        }
        (length.saturating_sub(n), None)
    } else {
        let (first, last) = body.split_once('-').ok_or_else(|| RangeParseError::InvalidNumber {
            spec: spec.to_owned(),
            component: "end",
        })?;
        (number(first, "start")?, Some(number(last, "end")?))
    };

    if length == 0 || start >= length {
        return Err(unsatisfiable());
    }
    let last = end.map_or(length - 1, |end| end.min(length - 1));
    ByteRange::new(start, last).ok_or_else(unsatisfiable)
}

/// Resolve an optional range specifier, degrading to the whole content.
///
/// Returns `None` when no range was given or the given one could not be
/// applied; in both cases the caller serves the entire content.
#[must_use]
pub fn resolve_range(spec: Option<&str>, length: u64) -> Option<ByteRange> {
    let spec = spec?;
    match parse_byte_range(spec, length) {
        Ok(range) => Some(range),
        Err(e) => {
            warn!(range = spec, length, error = %e, "ignoring unusable byte range");
            None
        }
    }
}
