use super::token::Token;

use std::fmt;

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum LexerError {
    UnterminatedString(usize),
    MalformedNumber(usize, String),
    ExpectedToken(Token, usize, Token),
    ExpectedIdentifier(usize, Token),
}

pub type LexResult<T> = Result<T, LexerError>;

impl fmt::Display for LexerError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LexerError::UnterminatedString(line) => {
                write!(f, "Unterminated string literal on line {}.", line)
            }
            LexerError::MalformedNumber(line, text) => {
                write!(f, "Number `{}` on line {} is out of range.", text, line)
            }
            LexerError::ExpectedToken(expected, line, got) => {
                write!(
                    f,
                    "Expected {} on line {}, but instead got {}.",
                    expected, line, got
                )
            }
            LexerError::ExpectedIdentifier(line, got) => {
                write!(
                    f,
                    "Expected identifier on line {}, but instead got {}.",
                    line, got
                )
            }
        }
    }
}
