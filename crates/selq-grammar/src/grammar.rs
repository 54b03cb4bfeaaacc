//! The compiled selector grammar.
//!
//! A [`Grammar`] is built once from macro and rule templates and is read-only
//! afterwards. Share it behind an `Arc` or a plain reference; nothing in it
//! changes after [`GrammarBuilder::build`] returns.

use std::collections::BTreeMap;

use crate::errors::GrammarError;
use crate::rule::Rule;
use crate::scanner::Scanner;
use crate::template::{expand_macros, expand_template};

/// Macro templates of the standard grammar.
///
/// `nl`, `w`, `num`, `name` and the string macros are not referenced by any
/// rule yet but are kept so rule templates can grow into them.
pub const STANDARD_MACROS: [(&str, &str); 13] = [
    ("nl", r"\n|\r\n|\r|\f"),
    ("w", r"[ \t\r\n\f]*"),
    ("nonascii", r"[^\x00-\x7F]"),
    ("num", r"-?(?:[0-9]+|[0-9]*\.[0-9]+)"),
    ("unicode", r"\\[0-9A-Fa-f]{1,6}(?:\r\n|[ \t\r\n\f])?"),
    ("escape", r"#{unicode}|\\[^\n\r\f0-9A-Fa-f]"),
    ("nmchar", r"[_A-Za-z0-9-]|#{nonascii}|#{escape}"),
    ("nmstart", r"[_A-Za-z]|#{nonascii}|#{escape}"),
    ("ident", r"[-@]?#{nmstart}#{nmchar}*"),
    ("name", r"#{nmchar}+"),
    ("string1", r#""(?:[^\n\r\f"]|#{nl}|#{nonascii}|#{escape})*""#),
    ("string2", r"'(?:[^\n\r\f']|#{nl}|#{nonascii}|#{escape})*'"),
    ("string", r"#{string1}|#{string2}"),
];

/// Rule templates of the standard grammar, in [`Rule::ALL`] order.
pub const STANDARD_RULES: [(Rule, &str); 6] = [
    (Rule::NameAndId, r"#{ident}##{ident}"),
    (Rule::Id, r"##{ident}"),
    (Rule::Class, r"\.#{ident}"),
    (Rule::NameAndClass, r"#{ident}\.#{ident}"),
    (Rule::Name, r"#{ident}"),
    (Rule::PseudoClass, r":#{ident}"),
];

/// Collects macro and rule templates before compiling them.
#[derive(Debug, Clone, Default)]
pub struct GrammarBuilder {
    macros: BTreeMap<String, String>,
    rules: BTreeMap<Rule, String>,
}

impl GrammarBuilder {
    /// Start from an empty set of templates.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from the standard macro and rule templates.
    #[must_use]
    pub fn standard() -> Self {
        STANDARD_RULES.iter().fold(
            STANDARD_MACROS
                .iter()
                .fold(Self::new(), |builder, (name, template)| {
                    builder.with_macro(*name, *template)
                }),
            |builder, (rule, template)| builder.with_rule(*rule, *template),
        )
    }

    /// Define or replace a macro template.
    #[must_use]
    pub fn with_macro(mut self, name: impl Into<String>, template: impl Into<String>) -> Self {
        self.macros.insert(name.into(), template.into());
        self
    }

    /// Define or replace the template for `rule`.
    #[must_use]
    pub fn with_rule(mut self, rule: Rule, template: impl Into<String>) -> Self {
        self.rules.insert(rule, template.into());
        self
    }

    /// Expand all templates and compile the scanner.
    ///
    /// Rules are joined in [`Rule::ALL`] order whatever order they were added
    /// in.
    ///
    /// # Errors
    /// Returns [`GrammarError`] when a template is malformed, references an
    /// unknown macro, macros form a cycle, a rule has no template, or the
    /// joined pattern fails to compile.
    pub fn build(self) -> Result<Grammar, GrammarError> {
        let macros = expand_macros(&self.macros)?;
        let fragments = Rule::ALL
            .iter()
            .map(|rule| {
                let template = self
                    .rules
                    .get(rule)
                    .ok_or(GrammarError::MissingRule(*rule))?;
                let fragment = expand_template(rule.as_str(), template, &macros)?;
                log::trace!("rule `{rule}` expands to `{fragment}`");
                Ok((*rule, fragment))
            })
            .collect::<Result<Vec<_>, GrammarError>>()?;
        let scanner = Scanner::new(&fragments)?;
        Ok(Grammar {
            macros,
            fragments,
            scanner,
        })
    }
}

/// Expanded macros, rule fragments and the scanner built from them.
#[derive(Debug, Clone)]
pub struct Grammar {
    macros: BTreeMap<String, String>,
    fragments: Vec<(Rule, String)>,
    scanner: Scanner,
}

impl Grammar {
    /// Compile the standard selector grammar.
    ///
    /// # Errors
    /// Returns [`GrammarError`] if the built-in templates fail to compile.
    ///
    /// # Examples
    /// ```
    /// use selq_grammar::{Grammar, Rule};
    ///
    /// let grammar = Grammar::standard().expect("standard grammar compiles");
    /// assert!(grammar.fragment(Rule::Id).is_some_and(|f| f.starts_with('#')));
    /// ```
    pub fn standard() -> Result<Self, GrammarError> {
        GrammarBuilder::standard().build()
    }

    /// A fully expanded macro by name.
    #[must_use]
    pub fn expanded_macro(&self, name: &str) -> Option<&str> {
        self.macros.get(name).map(String::as_str)
    }

    /// The expanded fragment of `rule`.
    #[must_use]
    pub fn fragment(&self, rule: Rule) -> Option<&str> {
        self.fragments
            .iter()
            .find(|(candidate, _)| *candidate == rule)
            .map(|(_, fragment)| fragment.as_str())
    }

    /// All rule fragments in scanner order.
    #[must_use]
    pub fn fragments(&self) -> &[(Rule, String)] {
        &self.fragments
    }

    /// The compiled scanner.
    #[must_use]
    pub fn scanner(&self) -> &Scanner {
        &self.scanner
    }
}
