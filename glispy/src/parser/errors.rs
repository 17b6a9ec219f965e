// Parse errors for the glispy token stream and expression builder

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    /// Input ended where an expression or a closing paren was expected.
    #[error("Unexpected end of input")]
    UnexpectedEOF,

    #[error("Unexpected ')' with no open list")]
    UnexpectedCloseParen,

    #[error("Unexpected input after expression ({remaining} token(s) left)")]
    TrailingInput { remaining: usize },

    #[error("Lists nested deeper than {limit} levels")]
    TooDeep { limit: usize },

    #[error("Invalid escape sequence: {sequence}")]
    InvalidEscapeSequence { sequence: String },

    #[error("Lex error: {message}")]
    Lex { message: String },
}

impl From<pest::error::Error<super::Rule>> for ParseError {
    fn from(error: pest::error::Error<super::Rule>) -> Self {
        ParseError::Lex {
            message: error.to_string(),
        }
    }
}
