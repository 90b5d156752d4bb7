use super::error::{ListingError, ListingResult};
use super::span::Location;
use logos::Logos;

/// Token types for instruction listings
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
pub enum Token {
    /// Mnemonic or operand: any run of non-blank characters
    #[regex(r"[^ \t\r\n\f#]+")]
    Word,

    #[token("\n")]
    Newline,

    #[regex(r"[ \t\r\f]+")]
    Whitespace,

    #[regex(r"#[^\n]*")]
    Comment,
}

impl Token {
    /// Tokens with no meaning to the parser
    pub fn is_trivia(&self) -> bool {
        matches!(self, Token::Whitespace | Token::Comment)
    }
}

/// Lexical token with location information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexicalToken {
    pub token: Token,
    pub lexeme: String,
    pub location: Location,
}

impl LexicalToken {
    pub fn new(token: Token, lexeme: String, location: Location) -> Self {
        Self { token, lexeme, location }
    }

    pub fn is(&self, token: Token) -> bool {
        self.token == token
    }
}

/// Lexer for instruction listings
pub struct Lexer<'a> {
    lexer: logos::Lexer<'a, Token>,
    position: Location,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            lexer: Token::lexer(source),
            position: Location::start(),
        }
    }

    /// Get the next token
    pub fn next_token(&mut self) -> Option<ListingResult<LexicalToken>> {
        let token = self.lexer.next()?;
        let lexeme = self.lexer.slice().to_string();
        let location = self.position;
        self.position.advance_str(&lexeme);

        Some(match token {
            Ok(token) => Ok(LexicalToken::new(token, lexeme, location)),
            Err(()) => Err(ListingError::Lexical { text: lexeme, location }),
        })
    }

    /// Get all meaningful tokens from the source
    pub fn tokenize(self) -> ListingResult<Vec<LexicalToken>> {
        let mut tokens = Vec::new();
        for result in self {
            let token = result?;
            if !token.token.is_trivia() {
                tokens.push(token);
            }
        }
        Ok(tokens)
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = ListingResult<LexicalToken>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexer_words_and_lines() {
        let tokens = Lexer::new("aload_0\ninvokestatic p/A f (I)V\n")
            .tokenize()
            .expect("Failed to tokenize");

        let kinds: Vec<Token> = tokens.iter().map(|t| t.token).collect();
        assert_eq!(
            kinds,
            vec![
                Token::Word,
                Token::Newline,
                Token::Word,
                Token::Word,
                Token::Word,
                Token::Word,
                Token::Newline,
            ]
        );
        assert_eq!(tokens[4].lexeme, "f");
        assert_eq!(tokens[4].location, Location::new(2, 18, 25));
    }

    #[test]
    fn test_lexer_comments() {
        let tokens = Lexer::new("# header\npop # trailing\n")
            .tokenize()
            .expect("Failed to tokenize");
        assert_eq!(tokens.len(), 3);
        assert!(tokens[0].is(Token::Newline));
        assert_eq!(tokens[1].lexeme, "pop");
        assert!(tokens[2].is(Token::Newline));
    }

    #[test]
    fn test_descriptor_is_one_word() {
        let tokens = Lexer::new("(Ljava/lang/String;[J)V").tokenize().unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].lexeme, "(Ljava/lang/String;[J)V");
    }
}
