//! Final pass over the assembled alternation: factor common trailing
//! material out of alternation children, then pool leftover single-rune
//! alternatives into one character class.

use crate::ast::Ast;
use crate::build::{alternate, alternate2, chars, concat, concat2, literal, quest};
use crate::class::CharClass;
use crate::merge::common_suffix;

use std::cmp;

use tracing::trace;

/// Recursively factor common suffixes below `r`.
pub(crate) fn merge_suffix(r: Ast) -> Ast {
    match r {
        Ast::Alternate(sub) => alternate(merge_suffices(sub)),
        Ast::Quest(body) => match *body {
            Ast::Alternate(mut sub) => {
                // (?:ab?|b)? => (?:ab?|b?) => a?b?
                //
                // A literal alternative that also closes another quested
                // alternative can itself be quested, making every branch
                // nullable and the outer quest redundant.
                for j in 0..sub.len() {
                    let runes = match &sub[j] {
                        Ast::Literal(runes) => runes.clone(),
                        _ => continue,
                    };
                    let s = quest(literal(runes));
                    if sub
                        .iter()
                        .any(|rr| matches!(rr, Ast::Concat(c) if c.last() == Some(&s)))
                    {
                        sub[j] = s;
                        return merge_suffix(Ast::Alternate(sub));
                    }
                }
                quest(merge_suffix(Ast::Alternate(sub)))
            }
            body => quest(merge_suffix(body)),
        },
        Ast::Concat(sub) => {
            let mut out = Vec::with_capacity(sub.len());
            for rr in sub {
                // Tail factoring leaves nested concatenations behind.
                match merge_suffix(rr) {
                    Ast::Concat(inner) => out.extend(inner),
                    rr => out.push(rr),
                }
            }
            concat(out)
        }
        Ast::Star(body) => Ast::Star(Box::new(merge_suffix(*body))),
        Ast::Plus(body) => Ast::Plus(Box::new(merge_suffix(*body))),
        Ast::Repeat { sub, min, max } => Ast::Repeat {
            sub: Box::new(merge_suffix(*sub)),
            min,
            max,
        },
        r => r,
    }
}

/// The quadratic pairwise pass over the children of one alternation.
/// Scans each later child against the current one; the first compatible
/// fusion per pair fires, the fused child keeps scanning, and a reworked
/// child is suffix-merged again before moving on.
fn merge_suffices(rs: Vec<Ast>) -> Vec<Ast> {
    let mut rs: Vec<Ast> = rs.into_iter().map(merge_suffix).collect();
    let mut i = 0;
    while i + 1 < rs.len() {
        let mut r1 = rs[i].clone();
        let mut changed = false;
        let mut j = i + 1;
        while j < rs.len() {
            match fuse_suffix(&r1, &rs[j]) {
                Some(fused) => {
                    trace!(slot = i, other = j, "factored common suffix");
                    r1 = fused;
                    rs.remove(j);
                    changed = true;
                }
                None => j += 1,
            }
        }
        if changed {
            rs[i] = merge_suffix(r1);
        }
        i += 1;
    }
    pool_classes(rs)
}

/// One row of the tail-factoring table, or `None`.
fn fuse_suffix(r1: &Ast, r2: &Ast) -> Option<Ast> {
    if r1 == r2 {
        // x|x => x
        return Some(r1.clone());
    }
    match r1 {
        Ast::Literal(xs) => match r2 {
            Ast::Literal(ys) => {
                let k = common_suffix(xs, ys);
                if k > 0 {
                    // abcd|cdcd => (?:ab|cd)cd
                    return Some(concat2(
                        alternate2(
                            literal(xs[..xs.len() - k].to_vec()),
                            literal(ys[..ys.len() - k].to_vec()),
                        ),
                        literal(xs[xs.len() - k..].to_vec()),
                    ));
                }
                None
            }
            Ast::Concat(sub2) if sub2.last() == Some(r1) => {
                // cd|x*cd => (?:x*)?cd
                Some(concat2(
                    quest(concat(sub2[..sub2.len() - 1].to_vec())),
                    r1.clone(),
                ))
            }
            _ => None,
        },
        Ast::Concat(sub) => match r2 {
            Ast::Literal(ys) => {
                let rs1 = match sub.last() {
                    Some(Ast::Literal(rs1)) => rs1,
                    _ => return None,
                };
                let k = common_suffix(rs1, ys);
                if k > 0 {
                    // x*cd|abcd => (?:x*|ab)cd
                    let mut left = sub[..sub.len() - 1].to_vec();
                    left.push(literal(rs1[..rs1.len() - k].to_vec()));
                    return Some(concat2(
                        alternate2(concat(left), literal(ys[..ys.len() - k].to_vec())),
                        literal(ys[ys.len() - k..].to_vec()),
                    ));
                }
                None
            }
            Ast::Concat(sub2) => {
                let max = cmp::min(sub.len(), sub2.len());
                let mut m = 0;
                while m < max && sub[sub.len() - 1 - m] == sub2[sub2.len() - 1 - m] {
                    m += 1;
                }
                if m > 0 && m < max {
                    // abx*y*z*|cdw*y*z* => (?:abx*|cdw*)y*z*
                    let mut out = vec![alternate2(
                        concat(sub[..sub.len() - m].to_vec()),
                        concat(sub2[..sub2.len() - m].to_vec()),
                    )];
                    out.extend_from_slice(&sub[sub.len() - m..]);
                    return Some(concat(out));
                }
                if let (Some(Ast::Literal(rs1)), Some(Ast::Literal(rs2))) =
                    (sub.last(), sub2.last())
                {
                    let k = common_suffix(rs1, rs2);
                    if k > 0 {
                        // x*abcd|y*cdcd => (?:x*ab|y*cd)cd
                        let mut left = sub[..sub.len() - 1].to_vec();
                        left.push(literal(rs1[..rs1.len() - k].to_vec()));
                        let mut right = sub2[..sub2.len() - 1].to_vec();
                        right.push(literal(rs2[..rs2.len() - k].to_vec()));
                        return Some(concat2(
                            alternate2(concat(left), concat(right)),
                            literal(rs1[rs1.len() - k..].to_vec()),
                        ));
                    }
                }
                None
            }
            _ if sub.last() == Some(r2) => {
                // x*y*z*|z* => (?:x*y*)?z*
                Some(concat2(
                    quest(concat(sub[..sub.len() - 1].to_vec())),
                    r2.clone(),
                ))
            }
            _ => None,
        },
        _ => match r2 {
            Ast::Concat(sub2) if sub2.last() == Some(r1) => {
                // z*|x*y*z* => (?:x*y*)?z*
                Some(concat2(
                    quest(concat(sub2[..sub2.len() - 1].to_vec())),
                    r1.clone(),
                ))
            }
            _ => None,
        },
    }
}

/// Pool the single-rune literals and character classes of one alternation
/// into a single class. Children that took part in tail factoring are
/// concatenations by then, so nothing already factored is lost.
fn pool_classes(rs: Vec<Ast>) -> Vec<Ast> {
    let poolable = |r: &Ast| {
        matches!(r, Ast::Class(_)) || matches!(r, Ast::Literal(runes) if runes.len() == 1)
    };
    if rs.iter().filter(|r| poolable(r)).count() < 2 {
        return rs;
    }
    let mut cc = CharClass::new();
    let mut out: Vec<Ast> = Vec::with_capacity(rs.len());
    let mut slot = None;
    for r in rs {
        match r {
            Ast::Literal(runes) if runes.len() == 1 => {
                cc.add(runes[0]);
                slot.get_or_insert(out.len());
            }
            Ast::Class(other) => {
                cc.add_class(&other);
                slot.get_or_insert(out.len());
            }
            r => out.push(r),
        }
    }
    if let Some(slot) = slot {
        out.insert(slot, chars(cc));
    }
    out
}
