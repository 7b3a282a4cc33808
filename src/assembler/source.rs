//! Byte-level character source with line/column tracking
//! and a single slot of pushback.
use std::fmt;
use std::io::{BufReader, Bytes, Read};

use super::error::AsmError;

/// Where a character or token sits in the source.
/// Lines start at 1; columns reset to 0 at every newline, so the
/// first character of a line is at column 1.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Position { line, column }
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::new(1, 0)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

pub struct Source<R: Read> {
    bytes: Bytes<BufReader<R>>,
    // `Some(None)` is a pushed back end of input.
    pending: Option<Option<u8>>,
    position: Position,
    // Column the last newline was read from, before the line was bumped.
    line_end_column: usize,
}

impl<R: Read> Source<R> {
    pub fn new(reader: R) -> Self {
        Source {
            bytes: BufReader::new(reader).bytes(),
            pending: None,
            position: Position::default(),
            line_end_column: 0,
        }
    }

    /// Returns the next character, or `None` at end of input.
    pub fn next(&mut self) -> Result<Option<u8>, AsmError> {
        let ch = match self.pending.take() {
            Some(ch) => ch,
            None => match self.bytes.next() {
                Some(Ok(b)) => Some(b),
                Some(Err(e)) => return Err(AsmError::io(self.position, e)),
                None => None,
            },
        };

        if ch == Some(b'\n') {
            self.line_end_column = self.position.column;
            self.position.line += 1;
            self.position.column = 0;
        } else {
            self.position.column += 1;
        }
        Ok(ch)
    }

    /// Pushes `ch` back so the following `next` returns it again.
    /// Only one character may be pending at a time.
    pub fn unget(&mut self, ch: Option<u8>) {
        debug_assert!(self.pending.is_none(), "unget called twice without next");
        if ch == Some(b'\n') {
            self.position.line -= 1;
            self.position.column = self.line_end_column;
        } else {
            self.position.column = self.position.column.saturating_sub(1);
        }
        self.pending = Some(ch);
    }

    /// Position of the most recently read character.
    pub fn position(&self) -> Position {
        self.position
    }
}
