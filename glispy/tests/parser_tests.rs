use glispy::ast::Expression;
use glispy::parser::{parse_next, Tokens};
use glispy::{parse_expression, parse_program, ParseError};
use pretty_assertions::assert_eq;

fn sym(name: &str) -> Expression {
    Expression::symbol(name)
}

fn num(n: f64) -> Expression {
    Expression::Number(n)
}

fn list(items: Vec<Expression>) -> Expression {
    Expression::List(items)
}

#[test]
fn test_nested_lists() {
    assert_eq!(
        parse_expression("(+ 1 3 (+ 2 5))"),
        Ok(list(vec![
            sym("+"),
            num(1.0),
            num(3.0),
            list(vec![sym("+"), num(2.0), num(5.0)]),
        ]))
    );
}

#[test]
fn test_defun_shape() {
    assert_eq!(
        parse_expression("(defun square (x) (* x x))"),
        Ok(list(vec![
            sym("defun"),
            sym("square"),
            list(vec![sym("x")]),
            list(vec![sym("*"), sym("x"), sym("x")]),
        ]))
    );
}

#[test]
fn test_strings_are_not_symbols() {
    assert_eq!(
        parse_expression("(get-value foo \"bar\")"),
        Ok(list(vec![sym("get-value"), sym("foo"), Expression::string("bar")]))
    );
    // A quoted string that looks like a number stays a string.
    assert_eq!(parse_expression("\"42\""), Ok(Expression::string("42")));
}

#[test]
fn test_string_with_spaces_and_parens() {
    assert_eq!(
        parse_expression("\"hello (world)\""),
        Ok(Expression::string("hello (world)"))
    );
}

#[test]
fn test_number_forms() {
    assert_eq!(parse_expression("1337"), Ok(num(1337.0)));
    assert_eq!(parse_expression("-2.5"), Ok(num(-2.5)));
    assert_eq!(parse_expression("+7"), Ok(num(7.0)));
    assert_eq!(parse_expression(".5"), Ok(num(0.5)));
    assert_eq!(parse_expression("2e-3"), Ok(num(0.002)));
}

#[test]
fn test_symbol_forms() {
    assert_eq!(parse_expression("+"), Ok(sym("+")));
    assert_eq!(parse_expression("make-hash-map"), Ok(sym("make-hash-map")));
    assert_eq!(parse_expression("infinity"), Ok(sym("infinity")));
    assert_eq!(parse_expression("1+"), Ok(sym("1+")));
}

#[test]
fn test_empty_list() {
    assert_eq!(parse_expression("()"), Ok(Expression::empty()));
    assert_eq!(parse_expression("( )"), Ok(Expression::empty()));
}

#[test]
fn test_comments_and_whitespace_are_skipped() {
    let source = "; leading comment\n(+ 1 ; inline\n   2)\n";
    assert_eq!(
        parse_expression(source),
        Ok(list(vec![sym("+"), num(1.0), num(2.0)]))
    );
}

#[test]
fn test_empty_input_is_unexpected_eof() {
    assert_eq!(parse_expression(""), Err(ParseError::UnexpectedEOF));
    assert_eq!(parse_expression("  ; nothing here"), Err(ParseError::UnexpectedEOF));
}

#[test]
fn test_unbalanced_parens() {
    assert_eq!(parse_expression("(+ 1 2"), Err(ParseError::UnexpectedEOF));
    assert_eq!(parse_expression(")"), Err(ParseError::UnexpectedCloseParen));
    assert_eq!(
        parse_expression("(+ 1 2))"),
        Err(ParseError::TrailingInput { remaining: 1 })
    );
}

#[test]
fn test_pathological_nesting_is_an_error() {
    let depth = 200_000;
    let source = format!("{}{}", "(".repeat(depth), ")".repeat(depth));
    assert!(matches!(
        parse_expression(&source),
        Err(ParseError::TooDeep { .. })
    ));
}

#[test]
fn test_unterminated_string() {
    assert!(matches!(
        parse_expression("(println \"no end)"),
        Err(ParseError::Lex { .. })
    ));
}

#[test]
fn test_unknown_escape() {
    assert!(matches!(
        parse_expression(r#""bad \q escape""#),
        Err(ParseError::InvalidEscapeSequence { .. })
    ));
}

#[test]
fn test_program_with_several_forms() {
    let program = parse_program("(define r 10)\n(* pi (* r r))\nr").unwrap();
    assert_eq!(program.len(), 3);
    assert_eq!(program[2], sym("r"));
    assert_eq!(parse_program(""), Ok(vec![]));
}

#[test]
fn test_token_stream_reads_forms_incrementally() {
    let mut tokens = Tokens::new("(a) (b c) d").unwrap();
    assert_eq!(parse_next(&mut tokens), Ok(list(vec![sym("a")])));
    assert_eq!(parse_next(&mut tokens), Ok(list(vec![sym("b"), sym("c")])));
    assert_eq!(parse_next(&mut tokens), Ok(sym("d")));
    assert!(tokens.is_empty());
}
