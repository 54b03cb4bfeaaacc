//! Single-pattern scanner over expanded rule fragments.

use regex::{CaptureMatches, Captures, Regex};

use crate::errors::GrammarError;
use crate::rule::Rule;

/// One non-overlapping scanner hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawMatch<'s> {
    /// The matched text.
    pub text: &'s str,
    /// Byte offset where the match starts.
    pub start: usize,
    /// Byte offset one past the end of the match.
    pub end: usize,
    /// The alternation branch that fired.
    pub rule: Rule,
}

/// Compiled alternation of every rule fragment.
///
/// Each fragment is wrapped in a named group taken from
/// [`Rule::group_name`], so classification never depends on counting capture
/// groups inside the fragments.
#[derive(Debug, Clone)]
pub struct Scanner {
    regex: Regex,
    rules: Vec<Rule>,
}

impl Scanner {
    /// Join `fragments` into one pattern, keeping their order.
    ///
    /// # Errors
    /// Returns [`GrammarError::Regex`] when the joined pattern does not
    /// compile.
    pub fn new(fragments: &[(Rule, String)]) -> Result<Self, GrammarError> {
        let source = fragments
            .iter()
            .map(|(rule, fragment)| format!("(?P<{}>{fragment})", rule.group_name()))
            .collect::<Vec<_>>()
            .join("|");
        let regex = Regex::new(&source)?;
        log::debug!(
            "compiled selector scanner with {} rules ({} bytes)",
            fragments.len(),
            source.len()
        );
        Ok(Self {
            regex,
            rules: fragments.iter().map(|(rule, _)| *rule).collect(),
        })
    }

    /// The joined pattern source.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Rules in alternation order.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Scan `subject` from its start, yielding matches left to right.
    ///
    /// # Examples
    /// ```
    /// use selq_grammar::{Grammar, Rule};
    ///
    /// let grammar = Grammar::standard().expect("standard grammar compiles");
    /// let rules: Vec<_> = grammar.scanner().scan("ul#list li").map(|m| m.rule).collect();
    /// assert_eq!(rules, [Rule::NameAndId, Rule::Name]);
    /// ```
    #[must_use]
    pub fn scan<'s>(&'s self, subject: &'s str) -> Scan<'s> {
        Scan {
            rules: &self.rules,
            captures: self.regex.captures_iter(subject),
        }
    }
}

/// Iterator returned by [`Scanner::scan`].
#[derive(Debug)]
pub struct Scan<'s> {
    rules: &'s [Rule],
    captures: CaptureMatches<'s, 's>,
}

fn classify<'s>(rules: &[Rule], caps: &Captures<'s>) -> Option<RawMatch<'s>> {
    rules.iter().find_map(|rule| {
        caps.name(rule.group_name()).map(|m| RawMatch {
            text: m.as_str(),
            start: m.start(),
            end: m.end(),
            rule: *rule,
        })
    })
}

impl<'s> Iterator for Scan<'s> {
    type Item = RawMatch<'s>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let caps = self.captures.next()?;
            if let Some(hit) = classify(self.rules, &caps) {
                return Some(hit);
            }
        }
    }
}
