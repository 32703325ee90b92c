use logos::Logos;

#[derive(Logos, Debug)]
pub enum FreeToken<'src> {
    #[token(".")]
    Dot,

    #[token(",")]
    Comma,

    #[token(";")]
    Semicolon,

    #[token(":")]
    Colon,

    #[token(":=")]
    ColonEqual,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("{")]
    LBrace,

    #[token("}")]
    RBrace,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token("=")]
    Equal,

    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("*")]
    Star,

    #[token("/")]
    Slash,

    #[token("&&")]
    AndAnd,

    #[token("||")]
    PipePipe,

    #[token("!")]
    Bang,

    #[token("<")]
    Less,

    #[token(">")]
    Greater,

    #[token("<=")]
    LessEqual,

    #[token(">=")]
    GreaterEqual,

    #[token("==")]
    EqualEqual,

    #[token("!=")]
    BangEqual,

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Name(&'src str),

    #[regex(r"\$[0-9]+")]
    Param(&'src str),

    #[regex(r"[0-9]+")]
    DecNumber(&'src str),

    #[regex(r#""[^"\n\r]*""#, |lex| { let s = lex.slice(); &s[1..s.len() - 1] })]
    Str(&'src str),

    #[error]
    #[regex(r"[ \t\n\r\v\f]+", logos::skip)]
    #[regex(r"//[^\n\r]*", logos::skip)]
    Error,
}
