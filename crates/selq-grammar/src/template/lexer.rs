//! Template lexer splitting macro and rule templates into literal text and
//! `#{name}` references.

use crate::errors::GrammarError;

use super::placeholder::{ReferenceSpec, opens_reference, parse_reference};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token {
    Literal(String),
    Reference(String),
}

pub(crate) fn lex_template(template: &str) -> Result<Vec<Token>, GrammarError> {
    let bytes = template.as_bytes();
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut chars = template.char_indices().peekable();

    let flush_literal = |literal: &mut String, tokens: &mut Vec<Token>| {
        if !literal.is_empty() {
            tokens.push(Token::Literal(std::mem::take(literal)));
        }
    };

    while let Some((pos, ch)) = chars.next() {
        if ch == '#' && opens_reference(bytes, pos) {
            flush_literal(&mut literal, &mut tokens);
            let ReferenceSpec { name, end } = parse_reference(bytes, pos)?;
            tokens.push(Token::Reference(name));
            while chars.next_if(|&(index, _)| index < end).is_some() {}
            continue;
        }
        literal.push(ch);
    }

    flush_literal(&mut literal, &mut tokens);
    Ok(tokens)
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "tests exercise lexing fallibility")]
mod tests {
    use super::*;

    #[test]
    fn tokenises_literals_and_references() {
        let tokens = lex_template(r"#{ident}\.#{ident}").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Reference("ident".into()),
                Token::Literal(r"\.".into()),
                Token::Reference("ident".into()),
            ]
        );
    }

    #[test]
    fn keeps_leading_hash_literal() {
        let tokens = lex_template("##{ident}").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Literal("#".into()),
                Token::Reference("ident".into()),
            ]
        );
    }

    #[test]
    fn leaves_regex_quantifiers_alone() {
        let tokens = lex_template(r"\\[0-9A-Fa-f]{1,6}").unwrap();
        assert_eq!(tokens, vec![Token::Literal(r"\\[0-9A-Fa-f]{1,6}".into())]);
    }

    #[test]
    fn preserves_non_ascii_literals() {
        let tokens = lex_template("é#{x}ü").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Literal("é".into()),
                Token::Reference("x".into()),
                Token::Literal("ü".into()),
            ]
        );
    }

    #[test]
    fn surfaces_malformed_references() {
        let err = lex_template("[a-z]#{open").unwrap_err();
        assert!(err.to_string().contains("missing closing '}'"));
    }
}
