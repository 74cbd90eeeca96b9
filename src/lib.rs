#![deny(rust_2018_idioms)]
#![deny(future_incompatible)]

//! Assemble a set of regular expressions into a single pattern matching
//! the union of their languages.
//!
//! Each input is parsed into a syntax tree and folded into an ordered
//! accumulator of alternatives, fusing with an existing alternative where
//! a rewrite preserves the combined language: shared literal prefixes are
//! factored, single runes pool into character classes, and quantified
//! tails absorb their own expansions. A final pass factors common
//! suffixes out of the top-level alternation. The result matches exactly
//! the union of the inputs, shaped to stay compact.
//!
//! ```
//! let pattern = reunion::join(&["abcd", "abcf", "abc", "abce"]).unwrap();
//! assert_eq!(pattern, "abc[d-f]?");
//! ```

mod ast;
mod build;
mod class;
mod merge;
mod printer;
mod suffix;

pub mod parser;

pub use crate::ast::{Ast, InvariantViolation};
pub use crate::class::{CharClass, CharRange};
pub use crate::parser::ParseError;

use crate::merge::{merge0, merge1};
use crate::suffix::merge_suffix;

use thiserror::Error;
use tracing::debug;

/// Error returned by [join].
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum Error {
    /// A pattern failed to parse. The rewrite itself cannot fail: an
    /// input that fuses with nothing is carried as its own alternative.
    #[error("pattern `{pattern}`: {source}")]
    Parse {
        pattern: String,
        source: ParseError,
    },
    /// A rewrite produced a tree violating the structural invariants.
    /// Not reachable from any input; see [Ast::check].
    #[error(transparent)]
    Invariant(#[from] InvariantViolation),
}

/// Join patterns into a single pattern matching the union of their
/// languages. Patterns are folded in order; the first parse failure
/// terminates the call.
pub fn join<I, S>(patterns: I) -> Result<String, Error>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut rs = Vec::new();
    for pattern in patterns {
        add(&mut rs, pattern.as_ref())?;
    }
    if rs.is_empty() {
        return Ok(String::new());
    }
    let merged = merge_suffix(build::alternate(rs));
    merged.check()?;
    Ok(merged.to_string())
}

/// Parse one pattern and fold it into the accumulator: try the direct
/// fusions against every slot, then the quantifying ones, and otherwise
/// append the tree as a new alternative.
fn add(rs: &mut Vec<Ast>, pattern: &str) -> Result<(), Error> {
    let r2 = parser::parse(pattern).map_err(|source| Error::Parse {
        pattern: pattern.to_owned(),
        source,
    })?;
    for i in 0..rs.len() {
        if let Some(r) = merge0(&rs[i], &r2) {
            debug!(pattern, slot = i, "merged");
            insert(rs, r, i);
            return Ok(());
        }
    }
    for i in 0..rs.len() {
        if let Some(r) = merge1(&rs[i], &r2) {
            debug!(pattern, slot = i, "merged with loss of shape");
            insert(rs, r, i);
            return Ok(());
        }
    }
    debug!(pattern, "appended");
    match r2 {
        Ast::Alternate(sub) => rs.extend(sub),
        r2 => rs.push(r2),
    }
    Ok(())
}

/// Replace slot `i` with the merged node, splicing in the children of a
/// top-level alternation so later inputs can fuse with each of them.
fn insert(rs: &mut Vec<Ast>, r: Ast, i: usize) {
    match r {
        Ast::Alternate(sub) => {
            rs.splice(i..=i, sub);
        }
        r => rs[i] = r,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulator_splices_alternate_results() {
        let mut rs = vec![Ast::Literal(vec!['a', 'b'])];
        // ab|cd merges into neither slot and carries both branches.
        add(&mut rs, "cd|ef").unwrap();
        assert_eq!(rs.len(), 3);

        // [acd]|ab splits the class, replacing slot 0 with two slots.
        let mut rs = vec![Ast::Class(CharClass {
            ranges: vec![
                CharRange::new_single('a'),
                CharRange::new_single('c'),
                CharRange::new_single('x'),
            ],
        })];
        add(&mut rs, "ab").unwrap();
        assert_eq!(rs.len(), 2);
        assert!(matches!(rs[0], Ast::Concat(_)));
        assert!(matches!(rs[1], Ast::Class(_)));
    }

    #[test]
    fn parse_failure_identifies_the_pattern() {
        let err = join(&["abc", "a("]).unwrap_err();
        match err {
            Error::Parse { pattern, source } => {
                assert_eq!(pattern, "a(");
                assert_eq!(source, ParseError::UnbalancedParentheses);
            }
            err => panic!("expected parse error, got {:?}", err),
        }
    }
}
