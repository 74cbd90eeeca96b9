//! Smart constructors. Each builder applies one local simplification so
//! that the returned node already satisfies the structural invariants.

use crate::ast::Ast;
use crate::class::{CharClass, CharRange};

/// Wrap a rune sequence. The empty literal is a transient value that the
/// other constructors eliminate.
#[inline]
pub(crate) fn literal(runes: Vec<char>) -> Ast {
    Ast::Literal(runes)
}

/// Concatenate, dropping a trailing empty literal and unwrapping a single
/// remaining child.
pub(crate) fn concat(mut sub: Vec<Ast>) -> Ast {
    if matches!(sub.last(), Some(r) if r.is_empty_literal()) {
        sub.pop();
    }
    match sub.len() {
        0 => Ast::Empty,
        1 => sub.swap_remove(0),
        _ => Ast::Concat(sub),
    }
}

#[inline]
pub(crate) fn concat2(a: Ast, b: Ast) -> Ast {
    concat(vec![a, b])
}

/// Alternate over the children. Two children get the full pairwise
/// simplification; three or more are taken as-is.
pub(crate) fn alternate(mut sub: Vec<Ast>) -> Ast {
    match sub.len() {
        0 => Ast::Empty,
        1 => sub.swap_remove(0),
        2 => {
            let b = sub.remove(1);
            let a = sub.remove(0);
            alternate2(a, b)
        }
        _ => Ast::Alternate(sub),
    }
}

pub(crate) fn alternate2(a: Ast, b: Ast) -> Ast {
    match (a, b) {
        // a|b => [ab]
        (Ast::Literal(x), Ast::Literal(y)) if x.len() == 1 && y.len() == 1 => {
            let (lo, hi) = if x[0] <= y[0] { (x[0], y[0]) } else { (y[0], x[0]) };
            if lo == hi {
                return Ast::Literal(vec![lo]);
            }
            chars(CharClass {
                ranges: vec![CharRange::new_single(lo), CharRange::new_single(hi)],
            })
        }
        // (?:)|x*y* => (?:x*y*)?
        (a, b) if a.is_empty_literal() => quest(b),
        (a, b) if b.is_empty_literal() => quest(a),
        // (?:x*|y*)|z* => x*|y*|z*
        (Ast::Alternate(mut sub), b) => {
            sub.push(b);
            Ast::Alternate(sub)
        }
        // x?|y* => (?:x|y*)?
        (Ast::Quest(a), b) => quest(alternate2(*a, b)),
        // d|[a-c] => [a-d]
        (Ast::Literal(x), Ast::Class(mut cc)) if x.len() == 1 => {
            cc.add(x[0]);
            chars(cc)
        }
        // [a-c]|d => [a-d]
        (Ast::Class(mut cc), Ast::Literal(y)) if y.len() == 1 => {
            cc.add(y[0]);
            chars(cc)
        }
        (a, b) => Ast::Alternate(vec![a, b]),
    }
}

/// Zero-or-one. Absorbs into an existing quantifier rather than nesting.
pub(crate) fn quest(r: Ast) -> Ast {
    match r {
        // (?:x?)? => x?, (?:x*)? => x*
        Ast::Quest(_) | Ast::Star(_) => r,
        // (?:x+)? => x*
        Ast::Plus(sub) => Ast::Star(sub),
        _ => Ast::Quest(Box::new(r)),
    }
}

/// Wrap a character class, collapsing the degenerate forms: a single rune
/// becomes a literal and the full codespace becomes the any-rune node.
pub(crate) fn chars(cc: CharClass) -> Ast {
    if let Some(c) = cc.as_single() {
        return Ast::Literal(vec![c]);
    }
    if cc.is_any() {
        return Ast::AnyChar;
    }
    Ast::Class(cc)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(s: &str) -> Ast {
        literal(s.chars().collect())
    }

    #[test]
    fn concat_trims_trailing_empty_literal() {
        assert_eq!(concat2(lit("ab"), lit("")), lit("ab"));
        assert_eq!(
            concat(vec![lit("a"), lit("b"), lit("")]),
            Ast::Concat(vec![lit("a"), lit("b")])
        );
        assert_eq!(concat(vec![lit("a")]), lit("a"));
    }

    #[test]
    fn alternate_of_single_runes_builds_a_class() {
        let r = alternate2(lit("b"), lit("a"));
        match r {
            Ast::Class(cc) => assert_eq!(
                cc.ranges,
                vec![CharRange::new_single('a'), CharRange::new_single('b')]
            ),
            r => panic!("expected class, got {:?}", r),
        }
        assert_eq!(alternate2(lit("a"), lit("a")), lit("a"));
    }

    #[test]
    fn alternate_with_empty_side_is_quest() {
        assert_eq!(alternate2(lit(""), lit("ab")), quest(lit("ab")));
        assert_eq!(alternate2(lit("ab"), lit("")), quest(lit("ab")));
    }

    #[test]
    fn alternate_flattens_and_lifts_quest() {
        let a = Ast::Alternate(vec![lit("ab"), lit("cd")]);
        assert_eq!(
            alternate2(a, lit("ef")),
            Ast::Alternate(vec![lit("ab"), lit("cd"), lit("ef")])
        );

        let q = quest(lit("ab"));
        assert_eq!(
            alternate2(q, Ast::Star(Box::new(lit("c")))),
            quest(Ast::Alternate(vec![lit("ab"), Ast::Star(Box::new(lit("c")))]))
        );
    }

    #[test]
    fn alternate_absorbs_single_rune_into_class() {
        let cc = CharClass::from(CharRange::new('a', 'c'));
        let r = alternate2(lit("d"), Ast::Class(cc));
        match r {
            Ast::Class(cc) => assert_eq!(cc.ranges, vec![CharRange::new('a', 'd')]),
            r => panic!("expected class, got {:?}", r),
        }
    }

    #[test]
    fn quest_absorbs_quantifiers() {
        assert_eq!(quest(quest(lit("a"))), quest(lit("a")));
        let star = Ast::Star(Box::new(lit("a")));
        assert_eq!(quest(star.clone()), star);
        assert_eq!(quest(Ast::Plus(Box::new(lit("a")))), star);
    }

    #[test]
    fn chars_collapses_degenerate_classes() {
        assert_eq!(chars(CharClass::from('a')), lit("a"));
        assert_eq!(
            chars(CharClass::from(CharRange::new('\u{0}', '\u{10ffff}'))),
            Ast::AnyChar
        );
    }
}
