// Recursive-descent parser: token stream in, expression tree out

use crate::ast::{Expression, Symbol};

pub mod errors;
pub mod lexer;
mod utils;

pub use errors::ParseError;
pub use lexer::{Token, Tokens};

// Define the token parser struct using the grammar file
#[derive(pest_derive::Parser)]
#[grammar = "glispy.pest"] // Path relative to src/
pub struct GlispyParser;

/// Deepest list nesting the parser accepts.
pub const MAX_NESTING_DEPTH: usize = 1024;

/// Parse one top-level expression from the token stream.
///
/// Callers loop on this to read several top-level forms from one stream.
pub fn parse_next(tokens: &mut Tokens) -> Result<Expression, ParseError> {
    let token = tokens.take_next().ok_or(ParseError::UnexpectedEOF)?;
    build_expression(tokens, token, 0)
}

fn build_expression(
    tokens: &mut Tokens,
    token: Token,
    depth: usize,
) -> Result<Expression, ParseError> {
    match token {
        Token::Open => build_list(tokens, depth + 1),
        Token::Close => Err(ParseError::UnexpectedCloseParen),
        Token::Str(text) => Ok(Expression::String(text)),
        Token::Atom(text) => Ok(classify_atom(&text)),
    }
}

fn build_list(tokens: &mut Tokens, depth: usize) -> Result<Expression, ParseError> {
    if depth > MAX_NESTING_DEPTH {
        return Err(ParseError::TooDeep {
            limit: MAX_NESTING_DEPTH,
        });
    }
    let mut items = Vec::new();
    loop {
        match tokens.take_next() {
            None => return Err(ParseError::UnexpectedEOF),
            Some(Token::Close) => return Ok(Expression::List(items)),
            Some(token) => items.push(build_expression(tokens, token, depth)?),
        }
    }
}

/// Numbers are atoms that read as an `f64` literal and contain a digit
/// (`inf`/`nan` stay symbols). Everything else is a symbol.
fn classify_atom(text: &str) -> Expression {
    if text.bytes().any(|b| b.is_ascii_digit()) {
        if let Ok(n) = text.parse::<f64>() {
            return Expression::Number(n);
        }
    }
    Expression::Symbol(Symbol::new(text))
}

/// Parse exactly one expression.
pub fn parse_expression(input: &str) -> Result<Expression, ParseError> {
    let mut tokens = Tokens::new(input)?;
    let expression = parse_next(&mut tokens)?;
    if !tokens.is_empty() {
        return Err(ParseError::TrailingInput {
            remaining: tokens.len(),
        });
    }
    Ok(expression)
}

/// Parse every top-level expression in the input.
pub fn parse_program(input: &str) -> Result<Vec<Expression>, ParseError> {
    let mut tokens = Tokens::new(input)?;
    let mut program = Vec::new();
    while !tokens.is_empty() {
        program.push(parse_next(&mut tokens)?);
    }
    Ok(program)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sym(name: &str) -> Expression {
        Expression::symbol(name)
    }

    #[test]
    fn test_classify_atoms() {
        assert_eq!(classify_atom("42"), Expression::Number(42.0));
        assert_eq!(classify_atom("-3.5"), Expression::Number(-3.5));
        assert_eq!(classify_atom("1e3"), Expression::Number(1000.0));
        assert_eq!(classify_atom("-"), sym("-"));
        assert_eq!(classify_atom("inf"), sym("inf"));
        assert_eq!(classify_atom("nan"), sym("nan"));
        assert_eq!(classify_atom("x1"), sym("x1"));
    }

    #[test]
    fn test_parse_next_reads_forms_one_at_a_time() {
        let mut tokens = Tokens::new("(define r 10) r").unwrap();
        assert_eq!(
            parse_next(&mut tokens),
            Ok(Expression::List(vec![
                sym("define"),
                sym("r"),
                Expression::Number(10.0)
            ]))
        );
        assert_eq!(parse_next(&mut tokens), Ok(sym("r")));
        assert_eq!(parse_next(&mut tokens), Err(ParseError::UnexpectedEOF));
    }

    #[test]
    fn test_parse_from_prebuilt_token_stream() {
        let mut tokens = Tokens::from(vec![
            Token::Open,
            Token::Atom("+".to_string()),
            Token::Atom("1".to_string()),
            Token::Str("x".to_string()),
            Token::Close,
        ]);
        assert_eq!(
            parse_next(&mut tokens),
            Ok(Expression::List(vec![
                sym("+"),
                Expression::Number(1.0),
                Expression::string("x"),
            ]))
        );
    }

    #[test]
    fn test_unclosed_list_is_unexpected_eof() {
        assert_eq!(parse_expression("(+ 1 (+ 2 3)"), Err(ParseError::UnexpectedEOF));
    }

    #[test]
    fn test_stray_close_paren() {
        assert_eq!(parse_expression(")"), Err(ParseError::UnexpectedCloseParen));
    }

    #[test]
    fn test_nesting_limit() {
        let at_limit = format!("{}{}", "(".repeat(MAX_NESTING_DEPTH), ")".repeat(MAX_NESTING_DEPTH));
        assert!(parse_expression(&at_limit).is_ok());

        let too_deep = format!(
            "{}{}",
            "(".repeat(MAX_NESTING_DEPTH + 1),
            ")".repeat(MAX_NESTING_DEPTH + 1)
        );
        assert_eq!(
            parse_expression(&too_deep),
            Err(ParseError::TooDeep {
                limit: MAX_NESTING_DEPTH
            })
        );
    }

    #[test]
    fn test_trailing_input_is_rejected() {
        assert_eq!(
            parse_expression("(+ 1 2) 3"),
            Err(ParseError::TrailingInput { remaining: 1 })
        );
    }
}
