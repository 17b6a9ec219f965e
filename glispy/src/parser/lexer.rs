// Token stream consumed by the recursive-descent parser

use super::utils::unescape;
use super::{GlispyParser, ParseError, Rule};
use pest::Parser;
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Open,
    Close,
    /// A double-quoted string literal, escapes already decoded.
    Str(String),
    /// Any other run of characters: a number or a symbol.
    Atom(String),
}

/// An ordered sequence of tokens with a "take next" operation.
#[derive(Debug, Clone, Default)]
pub struct Tokens {
    tokens: VecDeque<Token>,
}

impl Tokens {
    /// Tokenize the whole source up front.
    pub fn new(source: &str) -> Result<Self, ParseError> {
        let mut pairs = GlispyParser::parse(Rule::tokens, source)?;
        let mut tokens = VecDeque::new();

        let Some(stream) = pairs.next() else {
            return Ok(Tokens { tokens });
        };

        for pair in stream.into_inner() {
            match pair.as_rule() {
                Rule::open => tokens.push_back(Token::Open),
                Rule::close => tokens.push_back(Token::Close),
                Rule::string => {
                    let inner = pair.into_inner().next().map(|p| p.as_str()).unwrap_or("");
                    tokens.push_back(Token::Str(unescape(inner)?));
                }
                Rule::atom => tokens.push_back(Token::Atom(pair.as_str().to_string())),
                Rule::EOI => {}
                other => {
                    return Err(ParseError::Lex {
                        message: format!("unexpected token rule {:?}", other),
                    })
                }
            }
        }

        Ok(Tokens { tokens })
    }

    /// Takes the next token, or `None` at end of input.
    pub fn take_next(&mut self) -> Option<Token> {
        self.tokens.pop_front()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl From<Vec<Token>> for Tokens {
    fn from(tokens: Vec<Token>) -> Self {
        Tokens {
            tokens: tokens.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lex(source: &str) -> Vec<Token> {
        let mut tokens = Tokens::new(source).expect("Should tokenize");
        std::iter::from_fn(|| tokens.take_next()).collect()
    }

    #[test]
    fn test_tokenizes_parens_atoms_and_strings() {
        assert_eq!(
            lex("(set-value foo \"bar\" 1337)"),
            vec![
                Token::Open,
                Token::Atom("set-value".to_string()),
                Token::Atom("foo".to_string()),
                Token::Str("bar".to_string()),
                Token::Atom("1337".to_string()),
                Token::Close,
            ]
        );
    }

    #[test]
    fn test_atoms_stop_at_parens_and_comments() {
        assert_eq!(
            lex("(f(x)) ; trailing comment\n y"),
            vec![
                Token::Open,
                Token::Atom("f".to_string()),
                Token::Open,
                Token::Atom("x".to_string()),
                Token::Close,
                Token::Close,
                Token::Atom("y".to_string()),
            ]
        );
    }

    #[test]
    fn test_string_escapes_are_decoded() {
        assert_eq!(lex(r#""a\"b\n""#), vec![Token::Str("a\"b\n".to_string())]);
        assert_eq!(lex(r#""""#), vec![Token::Str(String::new())]);
    }

    #[test]
    fn test_unterminated_string_is_a_lex_error() {
        assert!(matches!(
            Tokens::new("(println \"oops)"),
            Err(ParseError::Lex { .. })
        ));
    }

    #[test]
    fn test_empty_source_has_no_tokens() {
        assert!(Tokens::new("   ; only a comment").unwrap().is_empty());
    }
}
