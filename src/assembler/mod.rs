//! The Assembler module is in charge of taking a
//! hyeong pseudo assembly file and producing the
//! glyph line of every instruction in it.
//!
//! It does this with a pull-based tokenizer over a
//! one-character-pushback source, feeding a small
//! recursive descent parser. Translation stops at
//! the first error.

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod source;
