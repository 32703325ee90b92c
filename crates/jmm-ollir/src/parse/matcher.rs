use crate::lex::Token;

pub trait Matcher {
    fn matches(&self, tok: &Token) -> bool;
}

impl Matcher for Token {
    fn matches(&self, tok: &Token) -> bool {
        match (self, tok) {
            (_, Token::Invalid) => true,
            (Token::Name(..), Token::Name(..)) => true,
            (Token::Param(..), Token::Param(..)) => true,
            (Token::Number(..), Token::Number(..)) => true,
            (Token::Str(..), Token::Str(..)) => true,
            (t, u) => t == u,
        }
    }
}

impl Matcher for &[Token] {
    fn matches(&self, tok: &Token) -> bool {
        self.iter().any(|other| other.matches(tok))
    }
}

/// Matches a name token with exactly the given text.
pub struct Keyword<'a>(pub &'a str);

impl Matcher for Keyword<'_> {
    fn matches(&self, tok: &Token) -> bool {
        matches!(tok, Token::Name(name) if name == self.0)
    }
}
