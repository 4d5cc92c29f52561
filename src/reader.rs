//! Lazy, single-pass line reader.
//!
//! Yields raw lines without interpreting them. The underlying reader is
//! dropped as soon as the input is exhausted or fails, and also when the
//! `LineReader` itself is dropped before reaching the end.

use crate::error::DataQualityError;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

/// One raw input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// 1-based physical line number; a header counts as line 1.
    pub number: usize,

    /// Line bytes with the trailing `\n` or `\r\n` removed.
    pub raw: Vec<u8>,
}

impl Line {
    /// Decodes the line as UTF-8.
    pub fn text(&self) -> Result<&str, DataQualityError> {
        std::str::from_utf8(&self.raw).map_err(|e| DataQualityError::Encoding(e.to_string()))
    }

    /// Splits the line on the literal comma delimiter.
    pub fn fields(&self) -> Result<Vec<&str>, DataQualityError> {
        Ok(self.text()?.split(',').collect())
    }
}

/// Forward-only iterator over the lines of a source.
pub struct LineReader<R> {
    inner: Option<BufReader<R>>,
    skip_header: bool,
    line_number: usize,
}

impl LineReader<File> {
    /// Opens a file for line reading.
    pub fn open<P: AsRef<Path>>(path: P, skip_header: bool) -> io::Result<Self> {
        let file = File::open(path)?;
        Ok(LineReader::new(file, skip_header))
    }
}

impl<R: Read> LineReader<R> {
    /// Wraps a reader. When `skip_header` is set the first line is consumed
    /// and discarded before anything is yielded.
    pub fn new(reader: R, skip_header: bool) -> Self {
        LineReader {
            inner: Some(BufReader::new(reader)),
            skip_header,
            line_number: 0,
        }
    }

    /// Returns `true` once the underlying reader has been released.
    pub fn is_released(&self) -> bool {
        self.inner.is_none()
    }

    fn read_raw(&mut self) -> Option<io::Result<Vec<u8>>> {
        let inner = self.inner.as_mut()?;
        let mut buf = Vec::new();

        match inner.read_until(b'\n', &mut buf) {
            Ok(0) => {
                self.inner = None;
                None
            }
            Ok(_) => {
                self.line_number += 1;
                if buf.ends_with(b"\n") {
                    buf.pop();
                    if buf.ends_with(b"\r") {
                        buf.pop();
                    }
                }
                Some(Ok(buf))
            }
            Err(e) => {
                self.inner = None;
                Some(Err(e))
            }
        }
    }
}

impl<R: Read> Iterator for LineReader<R> {
    type Item = io::Result<Line>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.skip_header {
            self.skip_header = false;
            if let Err(e) = self.read_raw()? {
                return Some(Err(e));
            }
        }

        let raw = match self.read_raw()? {
            Ok(raw) => raw,
            Err(e) => return Some(Err(e)),
        };

        Some(Ok(Line {
            number: self.line_number,
            raw,
        }))
    }
}
