mod token;


use std::fmt;

use jmm_common::message::{File, Messages, Span};
use jmm_common::Driver;
use log::{info, trace};
use logos::Logos;

use token::FreeToken;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Token {
    Dot,
    Comma,
    Semicolon,
    Colon,
    ColonEqual,

    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,

    Equal,
    Plus,
    Minus,
    Star,
    Slash,
    AndAnd,
    PipePipe,
    Bang,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
    EqualEqual,
    BangEqual,

    Name(String),

    /// A parameter prefix like `$1`.
    Param(usize),
    Number(u64),
    Str(String),

    Invalid,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dot => write!(f, "`.`"),
            Self::Comma => write!(f, "`,`"),
            Self::Semicolon => write!(f, "`;`"),
            Self::Colon => write!(f, "`:`"),
            Self::ColonEqual => write!(f, "`:=`"),
            Self::LParen => write!(f, "`(`"),
            Self::RParen => write!(f, "`)`"),
            Self::LBrace => write!(f, "`{{`"),
            Self::RBrace => write!(f, "`}}`"),
            Self::LBracket => write!(f, "`[`"),
            Self::RBracket => write!(f, "`]`"),
            Self::Equal => write!(f, "`=`"),
            Self::Plus => write!(f, "`+`"),
            Self::Minus => write!(f, "`-`"),
            Self::Star => write!(f, "`*`"),
            Self::Slash => write!(f, "`/`"),
            Self::AndAnd => write!(f, "`&&`"),
            Self::PipePipe => write!(f, "`||`"),
            Self::Bang => write!(f, "`!`"),
            Self::Less => write!(f, "`<`"),
            Self::Greater => write!(f, "`>`"),
            Self::LessEqual => write!(f, "`<=`"),
            Self::GreaterEqual => write!(f, "`>=`"),
            Self::EqualEqual => write!(f, "`==`"),
            Self::BangEqual => write!(f, "`!=`"),
            Self::Name(name) => write!(f, "`{name}`"),
            Self::Param(index) => write!(f, "`${index}`"),
            Self::Number(value) => write!(f, "`{value}`"),
            Self::Str(value) => write!(f, "\"{value}\""),
            Self::Invalid => write!(f, "an invalid token"),
        }
    }
}

pub fn lex(driver: &mut impl Driver, src: impl AsRef<str>, file: File) -> Vec<(Token, Span)> {
    info!("lexing file with id {file}");

    let mut msgs = Messages::new();
    let mut res = Vec::new();

    for (tok, span) in FreeToken::lexer(src.as_ref()).spanned() {
        let span = Span::new(file, span.start, span.end);
        let tok = match tok {
            FreeToken::Dot => Token::Dot,
            FreeToken::Comma => Token::Comma,
            FreeToken::Semicolon => Token::Semicolon,
            FreeToken::Colon => Token::Colon,
            FreeToken::ColonEqual => Token::ColonEqual,
            FreeToken::LParen => Token::LParen,
            FreeToken::RParen => Token::RParen,
            FreeToken::LBrace => Token::LBrace,
            FreeToken::RBrace => Token::RBrace,
            FreeToken::LBracket => Token::LBracket,
            FreeToken::RBracket => Token::RBracket,
            FreeToken::Equal => Token::Equal,
            FreeToken::Plus => Token::Plus,
            FreeToken::Minus => Token::Minus,
            FreeToken::Star => Token::Star,
            FreeToken::Slash => Token::Slash,
            FreeToken::AndAnd => Token::AndAnd,
            FreeToken::PipePipe => Token::PipePipe,
            FreeToken::Bang => Token::Bang,
            FreeToken::Less => Token::Less,
            FreeToken::Greater => Token::Greater,
            FreeToken::LessEqual => Token::LessEqual,
            FreeToken::GreaterEqual => Token::GreaterEqual,
            FreeToken::EqualEqual => Token::EqualEqual,
            FreeToken::BangEqual => Token::BangEqual,
            FreeToken::Name(name) => Token::Name(name.into()),
            FreeToken::Str(value) => Token::Str(value.into()),

            FreeToken::Param(param) => match param[1..].parse() {
                Ok(index) => Token::Param(index),
                Err(_) => {
                    msgs.at(span).parse_literal_out_of_range(param);
                    Token::Invalid
                }
            },

            FreeToken::DecNumber(number) => match number.parse() {
                Ok(value) => Token::Number(value),
                Err(_) => {
                    msgs.at(span).parse_literal_out_of_range(number);
                    Token::Invalid
                }
            },

            FreeToken::Error => {
                msgs.at(span).parse_invalid_token();
                Token::Invalid
            }
        };

        res.push((tok, span));
    }

    driver.report(msgs);
    trace!("done lexing {file}");

    res
}
