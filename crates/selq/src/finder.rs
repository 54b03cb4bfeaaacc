//! Finder and matcher table keyed by [`SelectorKind`].
//!
//! For every kind there are two operations: `find` scans a subtree for
//! candidates and `matches` tests one node on its own. For any node below
//! `root`, `find(root)` returns the node exactly when `matches(node)` holds,
//! provided id attributes are unique within the tree.

use selq_grammar::{SelectorKind, Token};

use crate::node::Node;

/// The criterion a single selector token imposes on a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criterion<'t> {
    /// `tag#id`
    NameAndId {
        /// Tag name.
        name: &'t str,
        /// Id attribute value.
        id: &'t str,
    },
    /// `#id`
    Id(&'t str),
    /// `tag`
    Name(&'t str),
    /// `.class`
    Class(&'t str),
    /// `tag.class`
    NameAndClass {
        /// Tag name.
        name: &'t str,
        /// Class token.
        class: &'t str,
    },
}

impl<'t> Criterion<'t> {
    /// Split token text of the given kind into its parts.
    ///
    /// Only unescaped `#` and `.` separate parts, so `a\.b.c` names tag
    /// `a\.b` with class `c`. Escapes are kept as written and compared
    /// literally against the tree.
    ///
    /// # Examples
    /// ```
    /// use selq::Criterion;
    /// use selq_grammar::SelectorKind;
    ///
    /// assert_eq!(
    ///     Criterion::parse(SelectorKind::NameAndClass, "li.item"),
    ///     Criterion::NameAndClass { name: "li", class: "item" },
    /// );
    /// assert_eq!(Criterion::parse(SelectorKind::Id, "#main"), Criterion::Id("main"));
    /// ```
    #[must_use]
    pub fn parse(kind: SelectorKind, text: &'t str) -> Self {
        match kind {
            SelectorKind::NameAndId => {
                let (name, id) = split_unescaped(text, '#').unwrap_or((text, ""));
                Self::NameAndId { name, id }
            }
            SelectorKind::Id => Self::Id(after(text, '#')),
            SelectorKind::Name => Self::Name(text),
            SelectorKind::Class => Self::Class(after(text, '.')),
            SelectorKind::NameAndClass => {
                let (name, class) = split_unescaped(text, '.').unwrap_or((text, ""));
                Self::NameAndClass { name, class }
            }
        }
    }

    /// The criterion of a tokenizer token.
    #[must_use]
    pub fn from_token(token: &'t Token) -> Self {
        Self::parse(token.kind(), token.text())
    }

    /// Nodes below `root` satisfying the criterion, in the order the host
    /// scan returns them. A `None` root yields nothing.
    #[must_use]
    pub fn find<N: Node>(&self, root: Option<&N>) -> Vec<N> {
        let Some(root) = root else {
            return Vec::new();
        };
        match *self {
            Self::NameAndId { name, id } => root
                .find_by_id(id)
                .into_iter()
                .filter(|node| node.has_tag_name(name))
                .collect(),
            Self::Id(id) => root.find_by_id(id).into_iter().collect(),
            Self::Name(name) => root.find_by_tag_name(name),
            Self::Class(class) => root.find_by_class_token(class),
            Self::NameAndClass { name, class } => root
                .find_by_class_token(class)
                .into_iter()
                .filter(|node| node.has_tag_name(name))
                .collect(),
        }
    }

    /// Whether `node` alone satisfies the criterion.
    #[must_use]
    pub fn matches<N: Node>(&self, node: &N) -> bool {
        match *self {
            Self::NameAndId { name, id } => node.id() == Some(id) && node.has_tag_name(name),
            Self::Id(id) => node.id() == Some(id),
            Self::Name(name) => node.has_tag_name(name),
            Self::Class(class) => node.has_class_token(class),
            Self::NameAndClass { name, class } => {
                node.has_class_token(class) && node.has_tag_name(name)
            }
        }
    }
}

/// Split around the first `marker` not preceded by a backslash escape.
fn split_unescaped(text: &str, marker: char) -> Option<(&str, &str)> {
    let mut escaped = false;
    for (index, ch) in text.char_indices() {
        if escaped {
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
        } else if ch == marker {
            return Some((text.get(..index)?, text.get(index + ch.len_utf8()..)?));
        }
    }
    None
}

fn after(text: &str, marker: char) -> &str {
    split_unescaped(text, marker).map_or(text, |(_, rest)| rest)
}

/// Find nodes below `root` matching `text` read as `kind`.
#[must_use]
pub fn find<N: Node>(kind: SelectorKind, root: Option<&N>, text: &str) -> Vec<N> {
    Criterion::parse(kind, text).find(root)
}

/// Test whether `node` matches `text` read as `kind`.
#[must_use]
pub fn matches<N: Node>(kind: SelectorKind, node: &N, text: &str) -> bool {
    Criterion::parse(kind, text).matches(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Document, ElementSpec, NodeRef};
    use rstest::{fixture, rstest};

    #[fixture]
    fn document() -> Document {
        Document::from_spec(
            ElementSpec::new("ul")
                .with_id("list")
                .with_class("menu")
                .with_child(ElementSpec::new("li").with_class("item first").with_text("A"))
                .with_child(ElementSpec::new("LI").with_class("item").with_text("B"))
                .with_child(ElementSpec::new("div").with_class("item").with_id("extra")),
        )
    }

    fn texts(nodes: &[NodeRef<'_>]) -> Vec<String> {
        nodes
            .iter()
            .map(|n| n.text().unwrap_or_else(|| n.tag_name()).to_string())
            .collect()
    }

    #[rstest]
    #[case(SelectorKind::NameAndId, "ul#list", &["ul"])]
    #[case(SelectorKind::NameAndId, "div#list", &[])]
    #[case(SelectorKind::Id, "#extra", &["div"])]
    #[case(SelectorKind::Id, "#missing", &[])]
    #[case(SelectorKind::Name, "li", &["A", "B"])]
    #[case(SelectorKind::Class, ".item", &["A", "B", "div"])]
    #[case(SelectorKind::Class, ".ite", &[])]
    #[case(SelectorKind::NameAndClass, "li.item", &["A", "B"])]
    #[case(SelectorKind::NameAndClass, "li.first", &["A"])]
    fn finds_expected_nodes(
        document: Document,
        #[case] kind: SelectorKind,
        #[case] text: &str,
        #[case] expected: &[&str],
    ) {
        let found = find(kind, Some(&document.root()), text);
        assert_eq!(texts(&found), expected);
    }

    #[rstest]
    #[case(SelectorKind::NameAndId, "ul#list")]
    #[case(SelectorKind::NameAndId, "li#list")]
    #[case(SelectorKind::Id, "#extra")]
    #[case(SelectorKind::Name, "li")]
    #[case(SelectorKind::Name, "Ul")]
    #[case(SelectorKind::Class, ".item")]
    #[case(SelectorKind::Class, ".menu")]
    #[case(SelectorKind::NameAndClass, "li.item")]
    #[case(SelectorKind::NameAndClass, "div.first")]
    fn find_and_matches_agree(document: Document, #[case] kind: SelectorKind, #[case] text: &str) {
        let root = document.root();
        let found = find(kind, Some(&root), text);
        for node in root.descendants() {
            assert_eq!(
                found.contains(&node),
                matches(kind, &node, text),
                "{text} disagrees on {}",
                node.path()
            );
        }
    }

    #[test]
    fn missing_root_finds_nothing() {
        assert!(find::<NodeRef<'_>>(SelectorKind::Name, None, "li").is_empty());
    }

    #[rstest]
    #[case(SelectorKind::NameAndClass, r"a\.b.c", Criterion::NameAndClass { name: r"a\.b", class: "c" })]
    #[case(SelectorKind::NameAndId, r"x\#y#z", Criterion::NameAndId { name: r"x\#y", id: "z" })]
    #[case(SelectorKind::Class, r".a\.b", Criterion::Class(r"a\.b"))]
    #[case(SelectorKind::Id, r"#a\#b", Criterion::Id(r"a\#b"))]
    #[case(SelectorKind::NameAndClass, r"a\\.b", Criterion::NameAndClass { name: r"a\\", class: "b" })]
    fn escaped_markers_stay_inside_their_part(
        #[case] kind: SelectorKind,
        #[case] text: &str,
        #[case] expected: Criterion<'_>,
    ) {
        assert_eq!(Criterion::parse(kind, text), expected);
    }

    #[test]
    fn escaped_names_match_literally() {
        let document = Document::from_spec(
            ElementSpec::new("ul")
                .with_child(ElementSpec::new(r"a\.b").with_class("c"))
                .with_child(ElementSpec::new("a").with_class(r"b.c")),
        );
        let found = find(SelectorKind::NameAndClass, Some(&document.root()), r"a\.b.c");
        let tags: Vec<_> = found.iter().map(|n| n.tag_name().to_string()).collect();
        assert_eq!(tags, [r"a\.b"]);
    }

    #[test]
    fn builds_criterion_from_token() {
        let token = Token::new("a#home", SelectorKind::NameAndId);
        assert_eq!(
            Criterion::from_token(&token),
            Criterion::NameAndId {
                name: "a",
                id: "home"
            }
        );
    }
}
