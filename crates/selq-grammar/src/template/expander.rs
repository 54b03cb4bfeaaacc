//! Expand `#{name}` references into flat regular-expression sources.
//!
//! Expansion runs in two passes. Macros are first resolved against each other
//! until none holds a reference, then rule templates are expanded against the
//! resolved macros. Every substituted macro body is isolated in a
//! non-capturing group so an alternation inside the macro cannot split the
//! surrounding fragment.

use std::collections::BTreeMap;

use crate::errors::GrammarError;

use super::lexer::{Token, lex_template};

struct MacroExpander<'m> {
    raw: &'m BTreeMap<String, String>,
    expanded: BTreeMap<String, String>,
    in_progress: Vec<&'m str>,
}

impl<'m> MacroExpander<'m> {
    fn resolve(&mut self, name: &'m str, template: &'m str) -> Result<String, GrammarError> {
        if let Some(done) = self.expanded.get(name) {
            return Ok(done.clone());
        }
        if self.in_progress.contains(&name) {
            return Err(GrammarError::MacroCycle(name.to_string()));
        }

        let raw = self.raw;
        self.in_progress.push(name);
        let mut out = String::with_capacity(template.len());
        for token in lex_template(template)? {
            match token {
                Token::Literal(text) => out.push_str(&text),
                Token::Reference(inner) => {
                    let (key, body) = raw.get_key_value(inner.as_str()).ok_or_else(|| {
                        GrammarError::UnknownMacro {
                            name: inner.clone(),
                            template: name.to_string(),
                        }
                    })?;
                    let text = self.resolve(key, body)?;
                    push_group(&mut out, &text);
                }
            }
        }
        self.in_progress.pop();

        log::trace!("expanded macro `{name}` to `{out}`");
        self.expanded.insert(name.to_string(), out.clone());
        Ok(out)
    }
}

fn push_group(out: &mut String, text: &str) {
    out.push_str("(?:");
    out.push_str(text);
    out.push(')');
}

/// Resolve every macro against the others.
///
/// # Errors
/// Returns [`GrammarError`] when a template is malformed, references an
/// undefined macro, or takes part in a reference cycle.
///
/// # Examples
/// ```
/// use std::collections::BTreeMap;
/// use selq_grammar::expand_macros;
///
/// let macros = BTreeMap::from([
///     ("digit".to_string(), "[0-9]".to_string()),
///     ("num".to_string(), "#{digit}+".to_string()),
/// ]);
/// let expanded = expand_macros(&macros).expect("macros resolve");
/// assert_eq!(expanded["num"], "(?:[0-9])+");
/// ```
pub fn expand_macros(
    macros: &BTreeMap<String, String>,
) -> Result<BTreeMap<String, String>, GrammarError> {
    let mut expander = MacroExpander {
        raw: macros,
        expanded: BTreeMap::new(),
        in_progress: Vec::new(),
    };
    for (name, template) in macros {
        expander.resolve(name, template)?;
    }
    Ok(expander.expanded)
}

/// Expand one template against already-resolved macros.
///
/// `owner` names the template in error messages.
///
/// # Errors
/// Returns [`GrammarError`] when the template is malformed or references a
/// macro missing from `macros`.
pub fn expand_template(
    owner: &str,
    template: &str,
    macros: &BTreeMap<String, String>,
) -> Result<String, GrammarError> {
    let mut out = String::with_capacity(template.len().saturating_mul(4));
    for token in lex_template(template)? {
        match token {
            Token::Literal(text) => out.push_str(&text),
            Token::Reference(name) => {
                let body = macros.get(&name).ok_or_else(|| GrammarError::UnknownMacro {
                    name: name.clone(),
                    template: owner.to_string(),
                })?;
                push_group(&mut out, body);
            }
        }
    }
    Ok(out)
}
