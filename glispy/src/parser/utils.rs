use super::ParseError;

// Decode the escapes allowed inside string literals.
pub(crate) fn unescape(s: &str) -> Result<String, ParseError> {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some('r') => result.push('\r'),
            Some('\\') => result.push('\\'),
            Some('"') => result.push('"'),
            Some(other) => {
                return Err(ParseError::InvalidEscapeSequence {
                    sequence: format!("\\{}", other),
                })
            }
            None => {
                return Err(ParseError::InvalidEscapeSequence {
                    sequence: "\\".to_string(),
                })
            }
        }
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unescape_known_sequences() {
        assert_eq!(unescape(r#"a\n\t\"b\\"#), Ok("a\n\t\"b\\".to_string()));
    }

    #[test]
    fn test_unescape_rejects_unknown_sequence() {
        assert_eq!(
            unescape(r"\q"),
            Err(ParseError::InvalidEscapeSequence {
                sequence: r"\q".to_string()
            })
        );
    }
}
