use std::fmt;

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Token {
    // Literals.
    Number(i64),
    Id(String),
    String(String),
    Char(char),

    // Keywords.
    Class,
    Return,
    If,
    Else,
    Def,
    Print,
    And,
    Or,
    Not,
    None,
    True,
    False,

    // Two-character operators.
    Eq,
    NotEq,
    LessOrEq,
    GreaterOrEq,

    // Tokens synthesized from layout; none corresponds to a single
    // character of the input.
    Newline,
    Indent,
    Dedent,
    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::Number(value) => write!(f, "Number{{{}}}", value),
            Token::Id(name) => write!(f, "Id{{{}}}", name),
            Token::String(value) => write!(f, "String{{{}}}", value),
            Token::Char(ch) => write!(f, "Char{{{}}}", ch),
            other => write!(f, "{:?}", other),
        }
    }
}
