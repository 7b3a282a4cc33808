//! The Parser pulls tokens from the Lexer on demand and turns
//! them into validated instructions, one per `next` call.
use std::convert::TryFrom;
use std::io::Read;

use super::ast::{Instruction, Opcode};
use super::error::{AsmError, AsmErrorKind};
use super::lexer::{Lexer, Token};
use super::source::Position;

pub struct Parser<R: Read> {
    lexer: Lexer<R>,
    finished: bool,
}

impl<R: Read> Parser<R> {
    pub fn new(reader: R) -> Self {
        Parser { lexer: Lexer::new(reader), finished: false }
    }

    /// Consumes tokens until one instruction has been read.
    /// Returns `None` once the end of input is reached.
    fn instruction(&mut self) -> Result<Option<Instruction>, AsmError> {
        loop {
            match self.lexer.lex()? {
                Token::Comment => self.lexer.skip_comment()?,
                Token::Op(op) => return self.operation(op).map(Some),
                // Stray numbers outside an operand list are dropped.
                Token::Num(_) => {}
                Token::Eof => return Ok(None),
                tok => {
                    return Err(AsmError::new(
                        AsmErrorKind::UnknownToken,
                        self.lexer.token_start(),
                        format!("unknown token \"{}\"({})", tok.lexeme(), tok),
                    ));
                }
            }
        }
    }

    fn operation(&mut self, op: Opcode) -> Result<Instruction, AsmError> {
        let at = self.lexer.token_start();
        let (arg1, arg2) = self.operand(at)?;

        let arg1 = self.argument(arg1)?;
        let arg2 = self.argument(arg2)?;

        let ins = Instruction::new(op, arg1, arg2);
        debug!("{}: {}", at, ins);
        Ok(ins)
    }

    /// Reads `NUMBER , NUMBER`. Shape errors are reported at `at`,
    /// the start of the opcode the operands belong to.
    fn operand(&mut self, at: Position) -> Result<(i64, i64), AsmError> {
        let a = self.number(at)?;
        match self.lexer.lex()? {
            Token::Sep => {}
            _ => return Err(illegal_operand(at)),
        }
        let b = self.number(at)?;
        Ok((a, b))
    }

    fn number(&mut self, at: Position) -> Result<i64, AsmError> {
        match self.lexer.lex()? {
            Token::Num(digits) => digits.parse::<i64>().map_err(|_| illegal_operand(at)),
            _ => Err(illegal_operand(at)),
        }
    }

    fn argument(&self, value: i64) -> Result<u64, AsmError> {
        u64::try_from(value).map_err(|_| {
            AsmError::new(
                AsmErrorKind::NegativeArgument,
                self.lexer.token_start(),
                format!("{} is illegal argument", value),
            )
        })
    }
}

impl<R: Read> Iterator for Parser<R> {
    type Item = Result<Instruction, AsmError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.instruction() {
            Ok(Some(ins)) => Some(Ok(ins)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

fn illegal_operand(at: Position) -> AsmError {
    AsmError::new(AsmErrorKind::OperandShape, at, "illegal operand".to_owned())
}
