//! This lexer tokenizes hyeong pseudo assembly straight off a
//! character `Source`, one token per call.
use std::ascii;
use std::fmt;
use std::io::Read;

use super::ast::Opcode;
use super::error::{AsmError, AsmErrorKind};
use super::source::{Position, Source};

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Token {
    Op(Opcode),
    /// A run of decimal digits, kept as written. May be empty when a
    /// blank run is directly followed by `,`, `;` or end of input.
    Num(String),
    Sep,
    Comment,
    Eof,
}

impl Token {
    /// The source text the token was read from.
    pub fn lexeme(&self) -> &str {
        match self {
            Token::Op(op) => op.mnemonic(),
            Token::Num(digits) => digits,
            Token::Sep => ",",
            Token::Comment => ";",
            Token::Eof => "",
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::Op(_) => write!(f, "opcode"),
            Token::Num(_) => write!(f, "number"),
            Token::Sep => write!(f, "separator"),
            Token::Comment => write!(f, "comment"),
            Token::Eof => write!(f, "end of input"),
        }
    }
}

// CR is not blank: it is dropped wherever it shows up.
fn is_blank(c: u8) -> bool {
    c == b' ' || c == b'\t' || c == b'\n'
}

pub struct Lexer<R: Read> {
    src: Source<R>,
    token_start: Position,
}

impl<R: Read> Lexer<R> {
    pub fn new(reader: R) -> Self {
        Lexer {
            src: Source::new(reader),
            token_start: Position::default(),
        }
    }

    /// Where the most recent token began.
    pub fn token_start(&self) -> Position {
        self.token_start
    }

    /// Reads the next token.
    pub fn lex(&mut self) -> Result<Token, AsmError> {
        // Single character tokens are recognized before any run.
        let first = self.src.next()?;
        match first {
            None => {
                self.token_start = self.src.position();
                return Ok(Token::Eof);
            }
            Some(b',') => {
                self.token_start = self.src.position();
                return Ok(Token::Sep);
            }
            Some(b';') => {
                self.token_start = self.src.position();
                return Ok(Token::Comment);
            }
            Some(c) if is_blank(c) || c == b'\r' => self.skip_blanks()?,
            Some(_) => self.src.unget(first),
        }

        let mut lexeme = String::new();
        loop {
            let ch = self.src.next()?;
            match ch {
                None | Some(b',') | Some(b';') => {
                    self.src.unget(ch);
                    break;
                }
                Some(b'\r') => {}
                // Trailing blanks belong to this token.
                Some(c) if is_blank(c) => {
                    self.skip_blanks()?;
                    break;
                }
                Some(c) if c.is_ascii_alphanumeric() => {
                    if lexeme.is_empty() {
                        self.token_start = self.src.position();
                    }
                    lexeme.push(c.to_ascii_lowercase() as char);
                }
                // Reported at the token start; the message carries
                // the offending byte's own position.
                Some(c) => {
                    let at = self.src.position();
                    return Err(AsmError::new(
                        AsmErrorKind::Lex,
                        self.token_start,
                        format!(
                            "[line {}, col {}] unknown character '{}'({})",
                            at.line, at.column, ascii::escape_default(c), c
                        ),
                    ));
                }
            }
        }

        trace!("lexeme \"{}\" at {}", lexeme, self.token_start);
        if let Some(op) = Opcode::from_mnemonic(&lexeme) {
            Ok(Token::Op(op))
        } else if lexeme.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Token::Num(lexeme))
        } else {
            Err(AsmError::new(
                AsmErrorKind::UnknownSymbol,
                self.token_start,
                format!("unknown symbol \"{}\"", lexeme),
            ))
        }
    }

    /// Discards the rest of a comment, up to and including the newline.
    /// End of input is left in place for the next `lex`.
    pub fn skip_comment(&mut self) -> Result<(), AsmError> {
        loop {
            match self.src.next()? {
                Some(b'\n') => return Ok(()),
                None => {
                    self.src.unget(None);
                    return Ok(());
                }
                Some(_) => {}
            }
        }
    }

    fn skip_blanks(&mut self) -> Result<(), AsmError> {
        loop {
            let ch = self.src.next()?;
            match ch {
                Some(b'\r') => {}
                Some(c) if is_blank(c) => {}
                _ => {
                    self.src.unget(ch);
                    return Ok(());
                }
            }
        }
    }
}
