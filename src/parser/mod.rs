//! Instruction listings
//!
//! A listing is the textual form of a method body: one instruction per line,
//! operands separated by blanks, `#` starting a comment. Method calls read
//! `invokevirtual owner name descriptor`, optionally followed by `itf`.

pub mod error;
pub mod lexer;
pub mod parser;
pub mod span;

pub use error::{ListingError, ListingResult};
pub use lexer::Lexer;
pub use parser::Parser;
pub use span::Location;

use crate::codegen::insn::Insn;
use crate::common::error::Result;
use std::path::Path;

/// Parse a listing into instructions
pub fn parse_listing(source: &str) -> ListingResult<Vec<Insn>> {
    Parser::new(source)?.parse()
}

/// Read and parse a listing file
pub fn parse_listing_file(path: impl AsRef<Path>) -> Result<Vec<Insn>> {
    let source = std::fs::read_to_string(path.as_ref())?;
    log::debug!("parsing listing {}", path.as_ref().display());
    Ok(parse_listing(&source)?)
}

/// Render instructions as a listing, one per line
pub fn print_listing(insns: &[Insn]) -> String {
    let mut out = String::new();
    for insn in insns {
        out.push_str(&insn.to_string());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_parses_back() {
        let source = "aload_0\n\
                      invokespecial p/Base <init> ()V\n\
                      invokestatic p/I helper (J)I itf\n\
                      bipush 7\n\
                      return\n";
        let insns = parse_listing(source).unwrap();
        assert_eq!(print_listing(&insns), source);
    }

    #[test]
    fn test_empty_listing() {
        assert!(parse_listing("").unwrap().is_empty());
        assert_eq!(print_listing(&[]), "");
    }
}
