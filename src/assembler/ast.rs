//! Instructions of the hyeong pseudo assembly and their glyph encoding.
//!
//! A source file is a sequence of instructions and comments:
//!
//! ```nasm
//! push 2, 0   ; opcode, then two unsigned decimal operands
//! DUP  5,1    ; opcodes are case-insensitive
//! ```
//!
//! Every instruction assembles to exactly one output line. The first
//! operand picks the shape of the hyeong word: `0` and `1` produce the
//! single `head` glyph, any `n >= 2` produces `body_start`, then
//! `body_repeat` `n - 2` times, then `body_end`, so the word is `n` glyphs
//! long. The second operand is the number of trailing `TERMINATOR` glyphs.
use std::fmt;
use std::io::{self, Write};

/// The glyph shared by every instruction to encode the second operand.
pub const TERMINATOR: &str = ".";

/// One row of the encoding table.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Glyphs {
    pub head: &'static str,
    pub body_start: &'static str,
    pub body_repeat: &'static str,
    pub body_end: &'static str,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Opcode {
    Push,
    Popa,
    Popm,
    Neg,
    Rcp,
    Dup,
}

impl Opcode {
    pub const ALL: [Opcode; 6] = [
        Opcode::Push,
        Opcode::Popa,
        Opcode::Popm,
        Opcode::Neg,
        Opcode::Rcp,
        Opcode::Dup,
    ];

    /// Looks up an opcode by its lowercase mnemonic.
    pub fn from_mnemonic(s: &str) -> Option<Opcode> {
        use Opcode::*;
        match s {
            "push" => Some(Push),
            "popa" => Some(Popa),
            "popm" => Some(Popm),
            "neg"  => Some(Neg),
            "rcp"  => Some(Rcp),
            "dup"  => Some(Dup),
            _ => None,
        }
    }

    pub fn mnemonic(&self) -> &'static str {
        use Opcode::*;
        match self {
            Push => "push",
            Popa => "popa",
            Popm => "popm",
            Neg  => "neg",
            Rcp  => "rcp",
            Dup  => "dup",
        }
    }

    pub fn glyphs(&self) -> &'static Glyphs {
        use Opcode::*;
        match self {
            Push => &Glyphs { head: "형", body_start: "혀", body_repeat: "어", body_end: "엉" },
            Popa => &Glyphs { head: "항", body_start: "하", body_repeat: "아", body_end: "앙" },
            Popm => &Glyphs { head: "핫", body_start: "하", body_repeat: "아", body_end: "앗" },
            Neg  => &Glyphs { head: "흣", body_start: "흐", body_repeat: "으", body_end: "읏" },
            Rcp  => &Glyphs { head: "흡", body_start: "흐", body_repeat: "으", body_end: "읍" },
            Dup  => &Glyphs { head: "흑", body_start: "흐", body_repeat: "으", body_end: "윽" },
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.mnemonic())
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Instruction {
    pub opcode: Opcode,
    pub arg1: u64,
    pub arg2: u64,
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}, {}", self.opcode, self.arg1, self.arg2)
    }
}

impl Instruction {
    pub fn new(opcode: Opcode, arg1: u64, arg2: u64) -> Self {
        Instruction { opcode, arg1, arg2 }
    }

    /// Writes the instruction's output line, newline included.
    pub fn assemble<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        let glyphs = self.opcode.glyphs();

        if self.arg1 < 2 {
            out.write_all(glyphs.head.as_bytes())?;
        } else {
            out.write_all(glyphs.body_start.as_bytes())?;
            for _ in 0..self.arg1 - 2 {
                out.write_all(glyphs.body_repeat.as_bytes())?;
            }
            out.write_all(glyphs.body_end.as_bytes())?;
        }
        for _ in 0..self.arg2 {
            out.write_all(TERMINATOR.as_bytes())?;
        }
        out.write_all(b"\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn line(opcode: Opcode, arg1: u64, arg2: u64) -> String {
        let mut buf = Vec::new();
        Instruction::new(opcode, arg1, arg2).assemble(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_mnemonics() {
        for op in Opcode::ALL.iter() {
            assert_eq!(Opcode::from_mnemonic(op.mnemonic()), Some(*op));
        }
        assert_eq!(Opcode::from_mnemonic("PUSH"), None);
        assert_eq!(Opcode::from_mnemonic("pop"), None);
        assert_eq!(Opcode::from_mnemonic(""), None);
    }

    #[test]
    fn test_head_for_small_arg1() {
        for op in Opcode::ALL.iter() {
            let head = op.glyphs().head;
            assert_eq!(line(*op, 0, 0), format!("{}\n", head));
            assert_eq!(line(*op, 1, 0), format!("{}\n", head));
        }
    }

    #[test]
    fn test_body_for_large_arg1() {
        assert_eq!(line(Opcode::Push, 2, 0), "혀엉\n");
        assert_eq!(line(Opcode::Push, 3, 0), "혀어엉\n");
        assert_eq!(line(Opcode::Dup, 5, 1), "흐으으으윽.\n");
        assert_eq!(line(Opcode::Popm, 4, 2), "하아아앗..\n");

        for op in Opcode::ALL.iter() {
            for k in 2..40 {
                let word = line(*op, k, 0);
                let word = word.trim_end_matches('\n');
                assert_eq!(word.chars().count() as u64, k);
                assert!(word.starts_with(op.glyphs().body_start));
                assert!(word.ends_with(op.glyphs().body_end));
            }
        }
    }

    #[test]
    fn test_terminator_run() {
        assert_eq!(line(Opcode::Neg, 0, 0), "흣\n");
        assert_eq!(line(Opcode::Neg, 0, 3), "흣...\n");

        let long = line(Opcode::Rcp, 1, 1000);
        assert_eq!(long.matches(TERMINATOR).count(), 1000);
        assert!(long.starts_with("흡."));
    }

    #[test]
    fn test_lines_are_unique() {
        let mut seen: HashMap<String, Instruction> = HashMap::new();
        for op in Opcode::ALL.iter() {
            // 0 and 1 share the head glyph, so only one of them is distinct.
            for arg1 in 1..12 {
                for arg2 in 0..12 {
                    let ins = Instruction::new(*op, arg1, arg2);
                    let text = line(*op, arg1, arg2);
                    if let Some(prev) = seen.insert(text.clone(), ins) {
                        panic!("{} and {} both assemble to {:?}", prev, ins, text);
                    }
                }
            }
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Instruction::new(Opcode::Rcp, 7, 0).to_string(), "rcp 7, 0");
    }
}
