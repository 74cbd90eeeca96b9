use crate::class::CharClass;

use thiserror::Error;

/// A node in the syntax tree of a regular expression.
///
/// Trees are plain values: every child is owned by exactly one parent, and
/// rewrites that need to reuse a subtree under a new parent clone it.
/// Equality is structural.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Ast {
    /// Matches the empty string.
    Empty,
    /// Matches the exact sequence of runes.
    Literal(Vec<char>),
    /// Matches any rune in the union of the ranges.
    Class(CharClass),
    /// Matches any single rune, including newline.
    AnyChar,
    /// Matches the concatenation of the children.
    Concat(Vec<Ast>),
    /// Matches any one of the children.
    Alternate(Vec<Ast>),
    /// Zero or one.
    Quest(Box<Ast>),
    /// Zero or more.
    Star(Box<Ast>),
    /// One or more.
    Plus(Box<Ast>),
    /// Bounded repetition. Carried through rewrites opaquely.
    Repeat {
        sub: Box<Ast>,
        min: u32,
        max: Option<u32>,
    },
}

impl Ast {
    /// Whether this node is one of the three unbounded quantifiers.
    #[inline]
    pub fn is_quantifier(&self) -> bool {
        matches!(self, Ast::Quest(_) | Ast::Star(_) | Ast::Plus(_))
    }

    /// Whether this node is a literal with no runes. Smart constructors
    /// eliminate this transient form; it never appears in a finished tree.
    #[inline]
    pub fn is_empty_literal(&self) -> bool {
        matches!(self, Ast::Literal(runes) if runes.is_empty())
    }

    /// The first child of a concatenation, or the node itself.
    #[inline]
    pub fn head(&self) -> &Ast {
        match self {
            Ast::Concat(sub) => &sub[0],
            _ => self,
        }
    }

    /// Verify the structural invariants of a finished tree. `Err` here
    /// means a rewrite produced a malformed node; no valid input does.
    pub fn check(&self) -> Result<(), InvariantViolation> {
        match self {
            Ast::Empty | Ast::AnyChar => Ok(()),
            Ast::Literal(runes) => {
                if runes.is_empty() {
                    return Err(InvariantViolation("empty literal"));
                }
                Ok(())
            }
            Ast::Class(class) => class.check(),
            Ast::Concat(sub) => {
                if sub.len() < 2 {
                    return Err(InvariantViolation("concat with fewer than two children"));
                }
                if sub.iter().any(|r| matches!(r, Ast::Concat(_))) {
                    return Err(InvariantViolation("concat nested within concat"));
                }
                sub.iter().try_for_each(Ast::check)
            }
            Ast::Alternate(sub) => {
                if sub.len() < 2 {
                    return Err(InvariantViolation("alternate with fewer than two children"));
                }
                sub.iter().try_for_each(Ast::check)
            }
            Ast::Quest(sub) | Ast::Star(sub) | Ast::Plus(sub) | Ast::Repeat { sub, .. } => {
                sub.check()
            }
        }
    }
}

/// A structural invariant did not hold. Exists for the test suite; the
/// rewriter itself cannot fail.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("invariant violation: {0}")]
pub struct InvariantViolation(pub &'static str);
