//! Block splitter over a line stream.
//!
//! A record is a maximal run of non-blank lines. Lines are trimmed and
//! re-joined with `\n`. The first line must match the subject pattern;
//! blocks that do not are skipped and counted. Bytes that are not valid
//! UTF-8 are replaced with U+FFFD and the affected lines counted.

use std::borrow::Cow;
use std::io::BufRead;

use authgraph_core::errors::ParseError;
use authgraph_core::types::Record;
use regex::Regex;

use crate::pattern;

/// Lazy, single-pass iterator of records over a `BufRead`.
pub struct RecordParser<R> {
    reader: R,
    buf: Vec<u8>,
    subject: Regex,
    line: usize,
    skipped: usize,
    lossy: usize,
    finished: bool,
}

impl<R: BufRead> RecordParser<R> {
    pub fn new(reader: R, subject: Regex) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            subject,
            line: 0,
            skipped: 0,
            lossy: 0,
            finished: false,
        }
    }

    /// Build a parser from a subject pattern whose group 1 is the id.
    pub fn with_pattern(reader: R, subject_pattern: &str) -> Result<Self, ParseError> {
        Ok(Self::new(reader, pattern::compile(subject_pattern, 1)?))
    }

    /// Blocks dropped so far because their first line had no subject id.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Lines that held invalid UTF-8 and were decoded lossily.
    pub fn lossy_lines(&self) -> usize {
        self.lossy
    }

    /// Lines consumed so far.
    pub fn lines_read(&self) -> usize {
        self.line
    }

    /// Next run of non-blank lines, trimmed. `None` at end of input.
    fn next_block(&mut self) -> Option<Result<Vec<String>, ParseError>> {
        let mut block = Vec::new();
        loop {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => break,
                Ok(_) => self.line += 1,
                Err(source) => {
                    self.finished = true;
                    return Some(Err(ParseError::Io {
                        line: self.line + 1,
                        source,
                    }));
                }
            }
            let line = String::from_utf8_lossy(&self.buf);
            if matches!(line, Cow::Owned(_)) {
                self.lossy += 1;
                tracing::debug!(line = self.line, "invalid UTF-8 replaced");
            }
            let trimmed = line.trim();
            if trimmed.is_empty() {
                if block.is_empty() {
                    continue;
                }
                return Some(Ok(block));
            }
            block.push(trimmed.to_string());
        }
        self.finished = true;
        if block.is_empty() {
            None
        } else {
            Some(Ok(block))
        }
    }
}

impl<R: BufRead> Iterator for RecordParser<R> {
    type Item = Result<Record, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.finished {
            let block = match self.next_block()? {
                Ok(block) => block,
                Err(e) => return Some(Err(e)),
            };
            let id = self
                .subject
                .captures(&block[0])
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().to_string());
            match id {
                Some(id) => return Some(Ok(Record::new(id, block.join("\n")))),
                None => {
                    self.skipped += 1;
                    tracing::trace!(line = self.line, "record block without subject id");
                }
            }
        }
        None
    }
}
