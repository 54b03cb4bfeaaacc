//! Macro reference parsing used by the template lexer.

use crate::errors::{GrammarError, placeholder_error};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ReferenceSpec {
    pub name: String,
    pub end: usize,
}

/// Whether the `#` at `start` opens a `#{name}` reference.
///
/// Only `#{` followed by an identifier start counts, so regex quantifiers such
/// as `#{1,6}` stay literal.
pub(crate) fn opens_reference(bytes: &[u8], start: usize) -> bool {
    bytes.get(start) == Some(&b'#')
        && bytes.get(start + 1) == Some(&b'{')
        && bytes
            .get(start + 2)
            .is_some_and(|b| b.is_ascii_alphabetic() || *b == b'_')
}

pub(crate) fn parse_reference(bytes: &[u8], start: usize) -> Result<ReferenceSpec, GrammarError> {
    let mut index = start + 2;
    let mut name = String::new();
    while let Some(&b) = bytes.get(index) {
        if b.is_ascii_alphanumeric() || b == b'_' {
            name.push(b as char);
            index += 1;
        } else {
            break;
        }
    }

    match bytes.get(index) {
        Some(b'}') => Ok(ReferenceSpec {
            name,
            end: index + 1,
        }),
        Some(_) => Err(placeholder_error(
            "invalid macro reference in template",
            start,
            Some(name),
        )),
        None => Err(placeholder_error(
            "missing closing '}' for macro reference",
            start,
            Some(name),
        )),
    }
}

#[cfg(test)]
#[expect(
    clippy::unwrap_used,
    reason = "tests exercise reference parser fallibility"
)]
mod tests {
    use super::*;

    #[test]
    fn parses_basic_reference() {
        let template = "#{ident}";
        let spec = parse_reference(template.as_bytes(), 0).unwrap();
        assert_eq!(spec.end, template.len());
        assert_eq!(spec.name, "ident");
    }

    #[test]
    fn parses_reference_mid_template() {
        let template = r"\.#{ident}";
        let spec = parse_reference(template.as_bytes(), 2).unwrap();
        assert_eq!(spec.end, template.len());
        assert_eq!(spec.name, "ident");
    }

    #[test]
    fn quantifiers_do_not_open_references() {
        assert!(!opens_reference(b"#{1,6}", 0));
        assert!(!opens_reference(b"##", 0));
        assert!(opens_reference(b"##{ident}", 1));
    }

    #[test]
    fn errors_on_missing_closing_brace() {
        let err = parse_reference(b"#{ident", 0).unwrap_err();
        assert!(err.to_string().contains("missing closing"));
    }

    #[test]
    fn errors_on_whitespace_inside_reference() {
        let err = parse_reference(b"#{ident }", 0).unwrap_err();
        assert!(
            err.to_string()
                .contains("invalid macro reference in template")
        );
    }
}
