use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    MissingOpenParen,
    MissingCloseParen,
    MissingName,
    EmptyLabel,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParseError::MissingOpenParen => {
                write!(f, "Expected a directive call `name(args)` or a target label `name:`")
            }
            ParseError::MissingCloseParen => write!(f, "Missing closing parenthesis"),
            ParseError::MissingName => write!(f, "Missing directive name before `(`"),
            ParseError::EmptyLabel => write!(f, "Empty target label"),
        }
    }
}

impl core::error::Error for ParseError {}
