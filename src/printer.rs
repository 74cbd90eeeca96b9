//! Canonical rendering of syntax trees back to surface syntax, with
//! minimal non-capturing grouping.

use crate::ast::Ast;
use crate::class::CharClass;

use std::fmt::{self, Write};

impl fmt::Display for Ast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ast::Empty => f.write_str("(?:)"),
            Ast::AnyChar => f.write_str("."),
            Ast::Literal(runes) => {
                for &c in runes {
                    write_literal_rune(f, c)?;
                }
                Ok(())
            }
            Ast::Class(cc) => write_class(f, cc),
            Ast::Concat(sub) => {
                for r in sub {
                    write_grouped_if_alternate(f, r)?;
                }
                Ok(())
            }
            Ast::Alternate(sub) => {
                for (i, r) in sub.iter().enumerate() {
                    if i > 0 {
                        f.write_char('|')?;
                    }
                    write_grouped_if_alternate(f, r)?;
                }
                Ok(())
            }
            Ast::Quest(sub) => {
                write_quantified(f, sub)?;
                f.write_char('?')
            }
            Ast::Star(sub) => {
                write_quantified(f, sub)?;
                f.write_char('*')
            }
            Ast::Plus(sub) => {
                write_quantified(f, sub)?;
                f.write_char('+')
            }
            Ast::Repeat { sub, min, max } => {
                write_quantified(f, sub)?;
                match *max {
                    Some(max) if max == *min => write!(f, "{{{}}}", min),
                    Some(max) => write!(f, "{{{},{}}}", min, max),
                    None => write!(f, "{{{},}}", min),
                }
            }
        }
    }
}

/// A nested alternation is the only child that needs a group for
/// precedence inside a sequence or another alternation.
fn write_grouped_if_alternate(f: &mut fmt::Formatter<'_>, r: &Ast) -> fmt::Result {
    match r {
        Ast::Alternate(_) => write!(f, "(?:{})", r),
        r => write!(f, "{}", r),
    }
}

/// A quantifier operand groups unless it is a single-rune literal, a
/// class, the any-rune node, or the empty match (which prints as its own
/// group already).
fn write_quantified(f: &mut fmt::Formatter<'_>, r: &Ast) -> fmt::Result {
    let group = match r {
        Ast::Literal(runes) => runes.len() > 1,
        Ast::Empty | Ast::Class(_) | Ast::AnyChar => false,
        _ => true,
    };
    if group {
        write!(f, "(?:{})", r)
    } else {
        write!(f, "{}", r)
    }
}

fn write_class(f: &mut fmt::Formatter<'_>, cc: &CharClass) -> fmt::Result {
    f.write_char('[')?;
    for r in cc {
        write_class_rune(f, r.start)?;
        if !r.is_single() {
            f.write_char('-')?;
            write_class_rune(f, r.end)?;
        }
    }
    f.write_char(']')
}

fn write_literal_rune(f: &mut fmt::Formatter<'_>, c: char) -> fmt::Result {
    match c {
        '.' | '+' | '*' | '?' | '(' | ')' | '|' | '[' | ']' | '{' | '}' | '^' | '$' | '\\' => {
            write!(f, "\\{}", c)
        }
        c => write_rune(f, c),
    }
}

fn write_class_rune(f: &mut fmt::Formatter<'_>, c: char) -> fmt::Result {
    match c {
        '[' | ']' | '^' | '-' | '\\' => write!(f, "\\{}", c),
        c => write_rune(f, c),
    }
}

fn write_rune(f: &mut fmt::Formatter<'_>, c: char) -> fmt::Result {
    match c {
        '\n' => f.write_str("\\n"),
        '\t' => f.write_str("\\t"),
        '\r' => f.write_str("\\r"),
        c if c.is_control() => write!(f, "\\x{{{:x}}}", c as u32),
        c => f.write_char(c),
    }
}
