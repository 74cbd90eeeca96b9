//! Pairwise fusion of one alternative into another. `merge0` covers the
//! direct and algebraic fusions; `merge1` covers the lower-priority ones
//! that trade shape for coverage. Both return `None` when the pair is not
//! fusible, and the driver then tries the next slot.
//!
//! Dispatch keys on the pair of node kinds. Swapping the operands of a
//! merge can produce a different result, or none: the incoming tree is
//! folded into the existing one, never the reverse.

use crate::ast::Ast;
use crate::build::{alternate, alternate2, chars, concat, concat2, literal, quest};

/// Direct fusions: empty-match absorption, literal and concatenation
/// folding, class widening, and shared-head factoring.
pub(crate) fn merge0(r1: &Ast, r2: &Ast) -> Option<Ast> {
    if r1 == r2 {
        // x|x => x
        return Some(r1.clone());
    }
    match r2 {
        Ast::Empty => match r1 {
            // x+|(?:) => x*
            Ast::Plus(sub) => return Some(Ast::Star(sub.clone())),
            // x?|(?:) => x?, x*|(?:) => x*
            Ast::Quest(_) | Ast::Star(_) => return Some(r1.clone()),
            _ => {}
        },
        // (?:)|x+ => x*
        Ast::Plus(sub) if *r1 == Ast::Empty => return Some(Ast::Star(sub.clone())),
        // (?:)|x? => x?, (?:)|x* => x*
        Ast::Quest(_) | Ast::Star(_) if *r1 == Ast::Empty => return Some(r2.clone()),
        Ast::Literal(runes) => return merge_literal(r1, runes),
        Ast::Class(cc) => {
            if let Ast::Literal(runes) = r1 {
                if runes.len() == 1 {
                    // a|[bc] => [a-c]
                    let mut cc = cc.clone();
                    cc.add(runes[0]);
                    return Some(chars(cc));
                }
            }
        }
        Ast::Concat(sub) => return merge_concat(r1, sub),
        _ => {}
    }
    if let Ast::Concat(sub) = r1 {
        if sub[0] == *r2 {
            // x*y*z*|x* => x*(?:y*z*)?
            return Some(concat2(r2.clone(), quest(concat(sub[1..].to_vec()))));
        }
    }
    None
}

/// Loss-bearing fusions, tried only after `merge0` has failed against
/// every slot: questing a literal or class against the empty match, and
/// splitting a single out of a class to extend it.
pub(crate) fn merge1(r1: &Ast, r2: &Ast) -> Option<Ast> {
    match r2 {
        Ast::Empty => match r1 {
            // abc|(?:) => (?:abc)?, [a-c]|(?:) => [a-c]?
            Ast::Literal(_) | Ast::Class(_) => return Some(quest(r1.clone())),
            _ => {}
        },
        // (?:)|[a-c] => [a-c]?
        Ast::Class(_) if *r1 == Ast::Empty => return Some(quest(r2.clone())),
        Ast::Literal(runes) => match r1 {
            // (?:)|abc => (?:abc)?
            Ast::Empty => return Some(quest(r2.clone())),
            Ast::Class(cc) => {
                for (j, range) in cc.ranges.iter().enumerate() {
                    if range.is_single() && range.start == runes[0] {
                        // [acd]|ab => ab?|[cd]
                        let merged = merge_literal(&literal(vec![runes[0]]), runes)?;
                        let mut rest = cc.clone();
                        rest.ranges.remove(j);
                        if rest.is_empty() {
                            return Some(merged);
                        }
                        return Some(alternate2(merged, chars(rest)));
                    }
                }
            }
            _ => {}
        },
        _ => {}
    }
    None
}

/// Fold a literal into `r`, dispatching on the kind of `r`.
fn merge_literal(r: &Ast, runes: &[char]) -> Option<Ast> {
    match r {
        Ast::Literal(rs) => {
            let i = common_prefix(rs, runes);
            if i > 0 {
                if i == rs.len() && i == runes.len() {
                    // abc|abc => abc
                    return Some(r.clone());
                }
                // abcd|ab => ab(?:cd)?, abcd|abce => abc[de],
                // abcd|abef => ab(?:cd|ef)
                return Some(concat2(
                    literal(runes[..i].to_vec()),
                    alternate2(literal(rs[i..].to_vec()), literal(runes[i..].to_vec())),
                ));
            }
            if rs.len() == 1 && runes.len() == 1 {
                // a|b => [ab]
                return Some(alternate2(r.clone(), literal(runes.to_vec())));
            }
            None
        }
        Ast::Class(cc) if runes.len() == 1 => {
            // [a-c]|d => [a-d]
            let mut cc = cc.clone();
            cc.add(runes[0]);
            Some(chars(cc))
        }
        Ast::Concat(sub) => {
            let rs0 = match &sub[0] {
                Ast::Literal(rs0) => rs0,
                _ => return None,
            };
            let i = common_prefix(rs0, runes);
            if i == 0 {
                return None;
            }
            if i == rs0.len() {
                if i == runes.len() {
                    if sub.len() == 2 {
                        match &sub[1] {
                            // abcx?|abc => abcx?, abcx*|abc => abcx*
                            Ast::Quest(_) | Ast::Star(_) => return Some(r.clone()),
                            // abcx+|abc => abcx*
                            Ast::Plus(body) => {
                                return Some(concat2(
                                    literal(runes.to_vec()),
                                    Ast::Star(body.clone()),
                                ))
                            }
                            _ => {}
                        }
                    }
                    // abcx*y*|abc => abc(?:x*y*)?
                    return Some(concat2(
                        literal(runes.to_vec()),
                        quest(concat(sub[1..].to_vec())),
                    ));
                }
                if sub.len() == 2 {
                    match &sub[1] {
                        Ast::Alternate(alts) => {
                            for (j, rr) in alts.iter().enumerate() {
                                if let Some(s) = merge_literal(rr, &runes[i..]) {
                                    // abc(?:de|fg)|abcd => abc(?:de?|fg)
                                    let mut alts = alts.clone();
                                    alts[j] = s;
                                    return Some(concat2(
                                        literal(rs0.clone()),
                                        Ast::Alternate(alts),
                                    ));
                                }
                            }
                        }
                        Ast::Class(cc) if i + 1 == runes.len() => {
                            // ab[cd]|abe => ab[c-e]
                            let mut cc = cc.clone();
                            cc.add(runes[i]);
                            return Some(concat2(literal(rs0.clone()), chars(cc)));
                        }
                        Ast::Quest(body) => {
                            if let Some(s) = merge_literal(body, &runes[i..]) {
                                // abc(?:d)?|abcde => abc(?:de?)?
                                return Some(concat2(literal(rs0.clone()), quest(s)));
                            }
                        }
                        Ast::Plus(body) | Ast::Star(body) => {
                            if **body == Ast::Literal(runes[i..].to_vec()) {
                                // abc(?:de)+|abcde => abc(?:de)+
                                return Some(r.clone());
                            }
                        }
                        _ => {}
                    }
                }
                // abcx*y*|abcde => abc(?:x*y*|de)
                return Some(concat2(
                    literal(rs0.clone()),
                    alternate2(concat(sub[1..].to_vec()), literal(runes[i..].to_vec())),
                ));
            }
            // abcdx*y*|abef => ab(?:cdx*y*|ef)
            // (and abcdx*|ab => ab(?:cdx*)? through the empty remainder)
            let mut left = vec![literal(rs0[i..].to_vec())];
            left.extend_from_slice(&sub[1..]);
            Some(concat2(
                literal(runes[..i].to_vec()),
                alternate2(concat(left), literal(runes[i..].to_vec())),
            ))
        }
        Ast::Alternate(alts) => {
            for (j, rr) in alts.iter().enumerate() {
                if let Some(s) = merge_literal(rr, runes) {
                    // (?:ab|cd)|cdef => ab|cd(?:ef)?
                    let mut alts = alts.clone();
                    alts[j] = s;
                    return Some(Ast::Alternate(alts));
                }
            }
            let mut alts = alts.clone();
            alts.push(literal(runes.to_vec()));
            Some(alternate(alts))
        }
        Ast::Quest(body) if runes.len() == 1 => match &**body {
            // [a-c]?|d => [a-d]?
            Ast::Class(cc) => {
                let mut cc = cc.clone();
                cc.add(runes[0]);
                Some(quest(chars(cc)))
            }
            _ => None,
        },
        _ => None,
    }
}

/// Fold one concatenation into `r1` by peeling shared leading subtrees.
fn merge_concat(r1: &Ast, rs: &[Ast]) -> Option<Ast> {
    if *r1 == rs[0] {
        // x*|x*y*z* => x*(?:y*z*)?
        return Some(concat2(r1.clone(), quest(concat(rs[1..].to_vec()))));
    }
    let sub = match r1 {
        Ast::Concat(sub) => sub,
        _ => return None,
    };
    let mut i = 0;
    while i < sub.len() && i < rs.len() {
        if sub[i] != rs[i] {
            if i > 0 {
                // x*y*z*w*|x*y*u*v* => x*y*(?:z*w*|u*v*)
                let mut out = rs[..i].to_vec();
                out.push(alternate2(
                    concat(sub[i..].to_vec()),
                    concat(rs[i..].to_vec()),
                ));
                return Some(concat(out));
            }
            break;
        }
        i += 1;
    }
    if i == sub.len() {
        if i == rs.len() {
            // x*y*|x*y* => x*y*
            return Some(r1.clone());
        }
        // x*y*|x*y*z*w* => x*y*(?:z*w*)?
        let mut out = sub.clone();
        out.push(quest(concat(rs[i..].to_vec())));
        return Some(concat(out));
    } else if i == rs.len() {
        // x*y*z*w*|x*y* => x*y*(?:z*w*)?
        let mut out = rs.to_vec();
        out.push(quest(concat(sub[i..].to_vec())));
        return Some(concat(out));
    }
    if let (Ast::Literal(rs1), Ast::Literal(rs2)) = (&sub[0], &rs[0]) {
        let i = common_prefix(rs1, rs2);
        if i > 0 {
            // abcdx*|abefy* => ab(?:cdx*|efy*)
            let mut left = Vec::with_capacity(sub.len());
            if i < rs1.len() {
                left.push(literal(rs1[i..].to_vec()));
            }
            left.extend_from_slice(&sub[1..]);
            let mut right = Vec::with_capacity(rs.len());
            if i < rs2.len() {
                right.push(literal(rs2[i..].to_vec()));
            }
            right.extend_from_slice(&rs[1..]);
            return Some(concat2(
                literal(rs1[..i].to_vec()),
                alternate2(concat(left), concat(right)),
            ));
        }
    }
    None
}

/// Length of the shared rune prefix.
pub(crate) fn common_prefix(xs: &[char], ys: &[char]) -> usize {
    xs.iter().zip(ys).take_while(|(x, y)| x == y).count()
}

/// Length of the shared rune suffix.
pub(crate) fn common_suffix(xs: &[char], ys: &[char]) -> usize {
    xs.iter()
        .rev()
        .zip(ys.iter().rev())
        .take_while(|(x, y)| x == y)
        .count()
}
