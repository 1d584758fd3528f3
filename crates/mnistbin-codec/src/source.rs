//! Line-oriented text source

use std::io::BufRead;

/// Buffered line reader that tracks the current line number
///
/// Lines are returned without their terminator. End of input is `None`;
/// a blank line is `Some("")`.
#[derive(Debug)]
pub struct LineSource<R> {
    inner: R,
    buf: String,
    line: u64,
}

impl<R: BufRead> LineSource<R> {
    /// Wrap a buffered reader positioned at the start of a record
    #[inline]
    #[must_use]
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            buf: String::new(),
            line: 0,
        }
    }

    /// Read the next line
    ///
    /// # Errors
    /// Returns the underlying I/O error, including invalid UTF-8.
    pub fn next_line(&mut self) -> std::io::Result<Option<&str>> {
        self.buf.clear();
        if self.inner.read_line(&mut self.buf)? == 0 {
            return Ok(None);
        }
        self.line += 1;
        let trimmed = self
            .buf
            .strip_suffix('\n')
            .map_or(self.buf.as_str(), |s| s.strip_suffix('\r').unwrap_or(s));
        Ok(Some(trimmed))
    }

    /// Number of lines consumed so far (1-based number of the last line)
    #[inline]
    #[must_use]
    pub fn line_number(&self) -> u64 {
        self.line
    }

    /// Unwrap the inner reader
    #[inline]
    #[must_use]
    pub fn into_inner(self) -> R {
        self.inner
    }
}
