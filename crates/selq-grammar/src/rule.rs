//! Grammar rules and the selector kinds they classify to.
//!
//! A [`Rule`] names one alternation branch of the scanner pattern. The
//! declaration order in [`Rule::ALL`] is the order the branches are joined in,
//! so it decides which branch wins when several could match at the same
//! position. A [`SelectorKind`] is the closed set of rules that the finder and
//! matcher table knows how to evaluate.

use std::fmt;

/// One named fragment of the selector grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rule {
    /// `tag#id`
    NameAndId,
    /// `#id`
    Id,
    /// `.class`
    Class,
    /// `tag.class`
    NameAndClass,
    /// `tag`
    Name,
    /// `:pseudo`
    PseudoClass,
}

impl Rule {
    /// Every rule in scanner declaration order.
    pub const ALL: [Self; 6] = [
        Self::NameAndId,
        Self::Id,
        Self::Class,
        Self::NameAndClass,
        Self::Name,
        Self::PseudoClass,
    ];

    /// Return the human-readable rule name.
    ///
    /// # Examples
    ///
    /// ```
    /// use selq_grammar::Rule;
    ///
    /// assert_eq!(Rule::NameAndId.as_str(), "name and id");
    /// assert_eq!(Rule::PseudoClass.as_str(), "pseudo class");
    /// ```
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NameAndId => "name and id",
            Self::Id => "id",
            Self::Class => "class",
            Self::NameAndClass => "name and class",
            Self::Name => "name",
            Self::PseudoClass => "pseudo class",
        }
    }

    /// Name of the capture group wrapping this rule in the scanner pattern.
    #[must_use]
    pub const fn group_name(&self) -> &'static str {
        match self {
            Self::NameAndId => "name_and_id",
            Self::Id => "id",
            Self::Class => "class",
            Self::NameAndClass => "name_and_class",
            Self::Name => "name",
            Self::PseudoClass => "pseudo_class",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of a selector token that can be searched for and matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectorKind {
    /// Tag name and id attribute, `tag#id`.
    NameAndId,
    /// Id attribute, `#id`.
    Id,
    /// Tag name, `tag`.
    Name,
    /// Class token, `.class`.
    Class,
    /// Tag name and class token, `tag.class`.
    NameAndClass,
}

impl SelectorKind {
    /// Return the human-readable kind name, shared with [`Rule::as_str`].
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        self.rule().as_str()
    }

    /// The grammar rule that produces this kind.
    #[must_use]
    pub const fn rule(&self) -> Rule {
        match self {
            Self::NameAndId => Rule::NameAndId,
            Self::Id => Rule::Id,
            Self::Name => Rule::Name,
            Self::Class => Rule::Class,
            Self::NameAndClass => Rule::NameAndClass,
        }
    }
}

impl fmt::Display for SelectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error raised when a [`Rule`] has no corresponding [`SelectorKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnsupportedRule(pub Rule);

impl fmt::Display for UnsupportedRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported selector rule: {}", self.0)
    }
}

impl std::error::Error for UnsupportedRule {}

impl TryFrom<Rule> for SelectorKind {
    type Error = UnsupportedRule;

    fn try_from(rule: Rule) -> Result<Self, Self::Error> {
        match rule {
            Rule::NameAndId => Ok(Self::NameAndId),
            Rule::Id => Ok(Self::Id),
            Rule::Class => Ok(Self::Class),
            Rule::NameAndClass => Ok(Self::NameAndClass),
            Rule::Name => Ok(Self::Name),
            Rule::PseudoClass => Err(UnsupportedRule(rule)),
        }
    }
}
