use super::error::{ListingError, ListingResult};
use super::lexer::{LexicalToken, Lexer, Token};
use crate::codegen::insn::{Insn, InvokeKind, MethodInsn};
use crate::codegen::opcodes;

const INTERFACE_FLAG: &str = "itf";

/// Parser over the tokens of a listing, one instruction per line
pub struct Parser {
    tokens: Vec<LexicalToken>,
    current: usize,
}

impl Parser {
    pub fn new(source: &str) -> ListingResult<Self> {
        let tokens = Lexer::new(source).tokenize()?;
        Ok(Self { tokens, current: 0 })
    }

    pub fn parse(mut self) -> ListingResult<Vec<Insn>> {
        let mut insns = Vec::new();
        while let Some(line) = self.next_line() {
            if let Some((head, operands)) = line.split_first() {
                insns.push(parse_instruction(head, operands)?);
            }
        }
        Ok(insns)
    }

    /// Words up to the next newline; `None` at end of input
    fn next_line(&mut self) -> Option<Vec<LexicalToken>> {
        if self.current >= self.tokens.len() {
            return None;
        }
        let mut words = Vec::new();
        while let Some(token) = self.tokens.get(self.current) {
            self.current += 1;
            if token.is(Token::Newline) {
                break;
            }
            words.push(token.clone());
        }
        Some(words)
    }
}

fn parse_instruction(head: &LexicalToken, operands: &[LexicalToken]) -> ListingResult<Insn> {
    let mnemonic = head.lexeme.as_str();

    if let Some(kind) = InvokeKind::from_mnemonic(mnemonic) {
        return parse_invoke(kind, head, operands).map(Insn::Method);
    }

    match opcodes::opcode_from_name(mnemonic) {
        Some(op) if opcodes::is_zero_operand(op) => {
            if operands.is_empty() {
                Ok(Insn::simple(op))
            } else {
                Err(ListingError::operand_count(mnemonic, "no", operands.len(), head.location))
            }
        }
        _ => Ok(Insn::other(
            mnemonic,
            operands.iter().map(|t| t.lexeme.clone()).collect(),
        )),
    }
}

fn parse_invoke(
    kind: InvokeKind,
    head: &LexicalToken,
    operands: &[LexicalToken],
) -> ListingResult<MethodInsn> {
    let (owner, name, descriptor, flag) = match operands {
        [owner, name, descriptor] => (owner, name, descriptor, None),
        [owner, name, descriptor, flag] => (owner, name, descriptor, Some(flag)),
        _ => {
            return Err(ListingError::operand_count(
                &head.lexeme,
                "3 or 4",
                operands.len(),
                head.location,
            ))
        }
    };

    let call = MethodInsn::new(kind, &owner.lexeme, &name.lexeme, &descriptor.lexeme);
    match flag {
        None => Ok(call),
        Some(flag) if flag.lexeme == INTERFACE_FLAG => Ok(call.with_interface(true)),
        Some(flag) => Err(ListingError::UnexpectedOperand {
            mnemonic: head.lexeme.clone(),
            found: flag.lexeme.clone(),
            location: flag.location,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::opcodes::*;
    use crate::parser::span::Location;

    fn parse(source: &str) -> ListingResult<Vec<Insn>> {
        Parser::new(source)?.parse()
    }

    #[test]
    fn test_parse_simple_and_invoke() {
        let insns = parse(
            "aload_0\n\
             iload_1\n\
             invokevirtual com/example/Foo bar (I)Lcom/example/Foo;\n\
             areturn\n",
        )
        .unwrap();
        assert_eq!(insns.len(), 4);
        assert_eq!(insns[0], Insn::simple(ALOAD_0));
        assert_eq!(
            insns[2],
            Insn::invoke(InvokeKind::Virtual, "com/example/Foo", "bar", "(I)Lcom/example/Foo;")
        );
        assert_eq!(insns[3], Insn::simple(ARETURN));
    }

    #[test]
    fn test_blank_lines_and_comments() {
        let insns = parse("# body\n\n   \nnop # keep\n\npop").unwrap();
        assert_eq!(insns, vec![Insn::simple(NOP), Insn::simple(POP)]);
    }

    #[test]
    fn test_interface_flag() {
        let insns = parse("invokestatic p/I helper ()V itf").unwrap();
        let call = insns[0].as_method().unwrap();
        assert!(call.is_interface);
        assert_eq!(call.kind, InvokeKind::Static);

        let iface = parse("invokeinterface java/util/List size ()I").unwrap();
        assert!(iface[0].as_method().unwrap().is_interface);
    }

    #[test]
    fn test_unknown_instructions_are_kept() {
        let insns = parse("bipush 10\ngetfield p/A x I").unwrap();
        assert_eq!(insns[0], Insn::other("bipush", vec!["10".to_string()]));
        assert_eq!(insns[1].to_string(), "getfield p/A x I");
    }

    #[test]
    fn test_invoke_operand_count() {
        let err = parse("nop\ninvokestatic p/A f").unwrap_err();
        assert!(matches!(err, ListingError::OperandCount { found: 2, .. }));
        assert_eq!(err.location(), Location::new(2, 1, 4));
    }

    #[test]
    fn test_bad_trailing_flag() {
        let err = parse("invokevirtual p/A f ()V static").unwrap_err();
        assert!(matches!(err, ListingError::UnexpectedOperand { .. }));
    }

    #[test]
    fn test_zero_operand_with_operand() {
        let err = parse("pop 1").unwrap_err();
        assert!(matches!(err, ListingError::OperandCount { found: 1, .. }));
    }
}
