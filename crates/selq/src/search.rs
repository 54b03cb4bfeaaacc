//! Evaluate a token sequence against a tree.
//!
//! The right-most token is the key: its finder produces the candidates. The
//! remaining tokens are ancestor constraints, checked nearest first while
//! walking up from each candidate's parent. A constraint that fails on an
//! ancestor is retried on the next one up, so intermediate elements not named
//! in the selector are skipped.

use selq_grammar::TokenSequence;

use crate::finder::Criterion;
use crate::node::Node;

/// A parsed selector ready to run against any root.
#[derive(Debug, Clone)]
pub struct Searcher<'t> {
    key: Criterion<'t>,
    ancestors: Vec<Criterion<'t>>,
}

impl<'t> Searcher<'t> {
    /// Build a searcher from `tokens`; `None` when the sequence is empty.
    #[must_use]
    pub fn new(tokens: &'t TokenSequence) -> Option<Self> {
        let (key, ancestors) = tokens.split_key()?;
        Some(Self {
            key: Criterion::from_token(key),
            ancestors: ancestors.iter().map(Criterion::from_token).collect(),
        })
    }

    /// The key criterion.
    #[must_use]
    pub const fn key(&self) -> &Criterion<'t> {
        &self.key
    }

    /// Ancestor constraints in textual order, farthest first.
    #[must_use]
    pub fn ancestors(&self) -> &[Criterion<'t>] {
        &self.ancestors
    }

    /// Nodes below `root` matching the whole selector, in key-finder order.
    ///
    /// Results are not de-duplicated.
    #[must_use]
    pub fn search<N: Node>(&self, root: Option<&N>) -> Vec<N> {
        let candidates = self.key.find(root);
        log::trace!(
            "key {:?} produced {} candidates, {} ancestor constraints",
            self.key,
            candidates.len(),
            self.ancestors.len()
        );
        candidates
            .into_iter()
            .filter(|candidate| {
                if self.ancestors.is_empty() {
                    self.key.matches(candidate)
                } else {
                    self.matches_ancestors(candidate.parent())
                }
            })
            .collect()
    }

    /// Whether `node` matches the key and its ancestors satisfy every
    /// constraint.
    #[must_use]
    pub fn matches<N: Node>(&self, node: &N) -> bool {
        self.key.matches(node) && self.matches_ancestors(node.parent())
    }

    /// Walk up from `start`, consuming constraints nearest first.
    ///
    /// Succeeds once every constraint has matched some node on the way up.
    #[must_use]
    pub fn matches_ancestors<N: Node>(&self, start: Option<N>) -> bool {
        let mut pending = self.ancestors.iter().rev();
        let mut constraint = pending.next();
        let mut current = start;
        while let Some(wanted) = constraint {
            let Some(node) = current else {
                return false;
            };
            if wanted.matches(&node) {
                constraint = pending.next();
            }
            current = node.parent();
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Document, ElementSpec, NodeRef};
    use selq_grammar::{SelectorKind, Token};

    fn sequence(parts: &[(&str, SelectorKind)]) -> TokenSequence {
        parts
            .iter()
            .map(|(text, kind)| Token::new(*text, *kind))
            .collect::<Vec<_>>()
            .into()
    }

    fn nested() -> Document {
        Document::from_spec(
            ElementSpec::new("div").with_id("a").with_child(
                ElementSpec::new("p").with_class("b").with_child(
                    ElementSpec::new("em")
                        .with_child(ElementSpec::new("span").with_class("c").with_text("hit")),
                ),
            ),
        )
    }

    fn run<'d>(document: &'d Document, tokens: &TokenSequence) -> Vec<NodeRef<'d>> {
        Searcher::new(tokens)
            .map(|s| s.search(Some(&document.root())))
            .unwrap_or_default()
    }

    #[test]
    fn empty_sequence_has_no_searcher() {
        assert!(Searcher::new(&TokenSequence::default()).is_none());
    }

    #[test]
    fn key_only_selector_rechecks_candidates() {
        let document = nested();
        let found = run(&document, &sequence(&[("span", SelectorKind::Name)]));
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn ancestors_may_skip_intermediate_nodes() {
        let document = nested();
        let tokens = sequence(&[("div", SelectorKind::Name), ("span", SelectorKind::Name)]);
        let found = run(&document, &tokens);
        assert_eq!(found.first().and_then(NodeRef::text), Some("hit"));
    }

    #[test]
    fn constraints_must_appear_in_order() {
        let document = nested();
        let in_order = sequence(&[
            ("div#a", SelectorKind::NameAndId),
            ("p.b", SelectorKind::NameAndClass),
            ("span.c", SelectorKind::NameAndClass),
        ]);
        assert_eq!(run(&document, &in_order).len(), 1);

        let reversed = sequence(&[
            ("p.b", SelectorKind::NameAndClass),
            ("div#a", SelectorKind::NameAndId),
            ("span.c", SelectorKind::NameAndClass),
        ]);
        assert!(run(&document, &reversed).is_empty());
    }

    #[test]
    fn key_node_does_not_satisfy_its_own_constraint() {
        let document = nested();
        let tokens = sequence(&[("span", SelectorKind::Name), ("span", SelectorKind::Name)]);
        assert!(run(&document, &tokens).is_empty());
    }

    #[test]
    fn matches_checks_key_and_chain() {
        let document = nested();
        let tokens = sequence(&[("p", SelectorKind::Name), ("em", SelectorKind::Name)]);
        let Some(searcher) = Searcher::new(&tokens) else {
            panic!("searcher should build");
        };
        let em = document
            .root()
            .find_by_tag_name("em")
            .into_iter()
            .next()
            .unwrap_or_else(|| panic!("em should exist"));
        assert!(searcher.matches(&em));
        assert!(!searcher.matches(&document.root()));
    }
}
