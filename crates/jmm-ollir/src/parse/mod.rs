mod class;
mod element;
mod matcher;
mod stmt;


use jmm_common::ir::ClassUnit;
use jmm_common::message::{File, Messages, Span};
use jmm_common::Driver;
use log::{info, trace};

use crate::lex::Token;
use matcher::{Keyword, Matcher};

pub fn parse(
    driver: &mut impl Driver,
    tokens: impl IntoIterator<Item = (Token, Span)>,
    file: File,
) -> Option<ClassUnit> {
    info!("parsing file with id {file}");

    let mut parser = Parser::new(tokens, file);
    let class = parser.parse_program();

    driver.report(parser.msgs);

    trace!("done parsing file {file}");

    class
}

#[derive(Debug)]
struct Parser {
    tokens: Vec<(Token, Span)>,
    pos: usize,
    msgs: Messages,
    default_span: Span,
}

impl Parser {
    pub fn new(tokens: impl IntoIterator<Item = (Token, Span)>, file: File) -> Self {
        Self {
            tokens: tokens.into_iter().collect(),
            pos: 0,
            msgs: Messages::new(),
            default_span: Span::new(file, 0, 0),
        }
    }

    fn is_done(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn advance(&mut self) {
        if !self.is_done() {
            self.pos += 1;
        }
    }

    fn peek(&self, matcher: impl Matcher) -> bool {
        self.peek_nth(0, matcher)
    }

    fn peek_nth(&self, n: usize, matcher: impl Matcher) -> bool {
        self.tokens
            .get(self.pos + n)
            .map(|(tok, _)| matcher.matches(tok))
            .unwrap_or(false)
    }

    fn consume(&mut self, matcher: impl Matcher) -> bool {
        self.matches(matcher).is_some()
    }

    fn matches(&mut self, matcher: impl Matcher) -> Option<Span> {
        if self.peek(matcher) {
            let span = self.span();
            self.advance();
            Some(span)
        } else {
            None
        }
    }

    fn keyword(&self, keyword: &str) -> bool {
        self.peek(Keyword(keyword))
    }

    /// The span of the current token, or the end of the last one when out of
    /// tokens.
    fn span(&self) -> Span {
        match self.tokens.get(self.pos) {
            Some((_, span)) => *span,
            None => self
                .tokens
                .last()
                .map(|(_, span)| Span::new(span.file, span.end, span.end))
                .unwrap_or(self.default_span),
        }
    }

    fn found(&self) -> String {
        match self.tokens.get(self.pos) {
            Some((tok, _)) => tok.to_string(),
            None => String::from("end of input"),
        }
    }

    /// Consume the given token, or report that it is missing.
    fn expect(&mut self, tok: Token, expected: &str) -> Option<Span> {
        match self.matches(tok) {
            Some(span) => Some(span),
            None => {
                let found = self.found();
                self.msgs.at(self.span()).parse_expected(expected, &found);
                None
            }
        }
    }

    fn expect_name(&mut self, expected: &str) -> Option<(String, Span)> {
        match self.tokens.get(self.pos) {
            Some((Token::Name(name), span)) => {
                let res = (name.clone(), *span);
                self.advance();
                Some(res)
            }

            _ => {
                let found = self.found();
                self.msgs.at(self.span()).parse_expected(expected, &found);
                None
            }
        }
    }

    fn expect_keyword(&mut self, keyword: &str) -> Option<Span> {
        match self.matches(Keyword(keyword)) {
            Some(span) => Some(span),
            None => {
                let found = self.found();
                self.msgs
                    .at(self.span())
                    .parse_expected(&format!("`{keyword}`"), &found);
                None
            }
        }
    }

    /// Skip ahead past the next `;`, stopping early at a `}` so that an
    /// error does not swallow the rest of the method.
    fn recover(&mut self) {
        while !self.is_done() {
            if self.consume(Token::Semicolon) || self.peek(Token::RBrace) {
                break;
            }
            self.advance();
        }
    }
}
