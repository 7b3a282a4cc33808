//! The single error type every stage of the assembler reports through.
use std::fmt;
use std::io;

use super::source::Position;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum AsmErrorKind {
    /// A character outside the source alphabet.
    Lex,
    /// An alphanumeric run that is neither an opcode nor a number.
    UnknownSymbol,
    /// Operands not shaped `NUMBER , NUMBER`.
    OperandShape,
    NegativeArgument,
    /// A token the driver cannot dispatch on.
    UnknownToken,
    Io,
}

#[derive(Debug)]
pub struct AsmError {
    kind: AsmErrorKind,
    position: Position,
    message: String,
}

impl AsmError {
    pub fn new(kind: AsmErrorKind, position: Position, message: String) -> Self {
        AsmError { kind, position, message }
    }

    pub fn io(position: Position, err: io::Error) -> Self {
        AsmError::new(AsmErrorKind::Io, position, err.to_string())
    }

    pub fn kind(&self) -> AsmErrorKind {
        self.kind
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for AsmError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "error occurred at line: {}, column: {}\n{}",
            self.position.line, self.position.column, self.message
        )
    }
}

impl std::error::Error for AsmError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = AsmError::new(
            AsmErrorKind::OperandShape,
            Position::new(3, 5),
            "illegal operand".to_owned(),
        );
        assert_eq!(err.to_string(), "error occurred at line: 3, column: 5\nillegal operand");
        assert_eq!(err.kind(), AsmErrorKind::OperandShape);
        assert_eq!(err.position(), Position::new(3, 5));
        assert_eq!(err.message(), "illegal operand");
    }
}
