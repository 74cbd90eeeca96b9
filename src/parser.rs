//! Shift-reduce parser for the Perl-extended pattern dialect, producing
//! the syntax tree consumed by the rewriter.

use crate::ast::Ast;
use crate::class::{CharClass, CharRange};

use std::result;

use thiserror::Error;

/// Alias for [std::result::Result] for [ParseError].
pub type Result<T> = result::Result<T, ParseError>;

/// Parse a pattern into a syntax tree.
///
/// Groups are non-capturing; adjacent literal runes coalesce into a
/// single multi-rune literal; the empty pattern parses to [Ast::Empty].
#[inline]
pub fn parse(expr: &str) -> Result<Ast> {
    ParserState::new(expr).parse()
}

/// Set of operators that may wait on the operator stack. Quantifiers are
/// not among them: a postfix operator applies to the finished operand on
/// top of the node stack as soon as it is seen.
#[derive(Debug, PartialEq)]
enum Operator {
    Union,
    Concatenation,
    LeftParen,
    EmptyPlaceholder,
}

/// A resolved escape sequence or shorthand.
enum Escaped {
    Rune(char),
    Class(CharClass),
}

#[derive(Debug)]
struct ParserState {
    chars: Vec<char>,
    pos: usize,

    stack: Vec<Ast>,
    op_stack: Vec<Operator>,
    paren_count_stack: Vec<usize>,

    insert_concat: bool,

    in_char_class: bool,
    char_class_buf: (CharClass, bool),
    char_range_buf: CharRangeBuf,
}

/// Pending symbols of an in-class range: the start rune and the dash. A
/// third symbol completes the range.
#[derive(Debug)]
struct CharRangeBuf(Option<char>, Option<char>);

impl CharRangeBuf {
    #[inline]
    fn new() -> Self {
        CharRangeBuf(None, None)
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    #[inline]
    fn clear(&mut self) {
        self.0 = None;
        self.1 = None;
    }
}

impl ParserState {
    fn new(expr: &str) -> Self {
        Self {
            chars: expr.chars().collect(),
            pos: 0,

            stack: Vec::new(),
            op_stack: Vec::new(),
            paren_count_stack: Vec::new(),

            insert_concat: false,

            in_char_class: false,
            char_class_buf: (CharClass::new(), false),
            char_range_buf: CharRangeBuf::new(),
        }
    }

    #[inline]
    fn next(&mut self) -> Option<char> {
        let c = self.chars.get(self.pos).copied();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    #[inline]
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn parse(mut self) -> Result<Ast> {
        if self.chars.is_empty() {
            self.op_stack.push(Operator::EmptyPlaceholder);
        }

        while let Some(c) = self.next() {
            if self.in_char_class {
                self.handle_class_char(c)?;
                continue;
            }
            match c {
                '|' => self.handle_union()?,
                '*' => self.handle_kleene_star()?,
                '+' => self.handle_plus()?,
                '?' => self.handle_optional()?,
                '(' => self.handle_left_paren()?,
                ')' => self.handle_right_paren()?,
                '[' => {
                    self.in_char_class = true;
                    self.clear_char_class_buf();
                }
                '{' => self.handle_left_brace()?,
                '.' => self.handle_atom(Ast::AnyChar)?,
                '\\' => match self.handle_escape()? {
                    Escaped::Rune(c) => self.handle_literal_char(c)?,
                    Escaped::Class(cc) => self.handle_atom(Ast::Class(cc))?,
                },
                _ => self.handle_literal_char(c)?,
            }
        }

        if self.in_char_class {
            return Err(ParseError::UnbalancedBrackets);
        }

        while !self.op_stack.is_empty() {
            self.reduce_stack()?;
        }

        let head = self.stack.pop().ok_or(ParseError::UnbalancedOperators)?;
        if !self.stack.is_empty() {
            return Err(ParseError::UnbalancedOperators);
        }
        Ok(head)
    }

    /// One symbol inside `[...]`.
    fn handle_class_char(&mut self, c: char) -> Result<()> {
        match c {
            ']' => self.handle_right_bracket(),
            '\\' => match self.handle_escape()? {
                // An escaped dash never acts as a range dash.
                Escaped::Rune(c) => self.append_char_range_buf(c, true),
                Escaped::Class(cc) => {
                    // A shorthand ends any range under construction.
                    self.handle_incomplete_char_range_buf();
                    self.char_class_buf.0.add_class(&cc);
                    Ok(())
                }
            },
            '^' => {
                // Only the first symbol of the class negates it.
                if self.char_range_buf.is_empty() && self.char_class_buf.0.is_empty() {
                    self.char_class_buf.1 = true;
                    Ok(())
                } else {
                    self.append_char_range_buf(c, false)
                }
            }
            _ => self.append_char_range_buf(c, false),
        }
    }

    #[inline]
    fn handle_literal_char(&mut self, c: char) -> Result<()> {
        self.handle_atom(Ast::Literal(vec![c]))
    }

    /// Shift a completed atom, inserting the implicit concatenation
    /// operator where one operand already precedes it.
    fn handle_atom(&mut self, r: Ast) -> Result<()> {
        while self.precedence_reduce_stack(&Operator::Concatenation)? {}

        if self.insert_concat {
            self.op_stack.push(Operator::Concatenation);
        }

        self.stack.push(r);
        self.insert_concat = true;

        Ok(())
    }

    fn handle_union(&mut self) -> Result<()> {
        let op = Operator::Union;
        self.precedence_reduce_stack(&op)?;

        self.op_stack.push(op);
        self.insert_concat = false;

        Ok(())
    }

    #[inline]
    fn handle_kleene_star(&mut self) -> Result<()> {
        self.wrap_postfix(|r| Ast::Star(Box::new(r)))
    }

    #[inline]
    fn handle_plus(&mut self) -> Result<()> {
        self.wrap_postfix(|r| Ast::Plus(Box::new(r)))
    }

    #[inline]
    fn handle_optional(&mut self) -> Result<()> {
        self.wrap_postfix(|r| Ast::Quest(Box::new(r)))
    }

    /// Apply a postfix operator to the operand that just finished. A
    /// quantifier with nothing before it is malformed.
    fn wrap_postfix<F>(&mut self, wrap: F) -> Result<()>
    where
        F: FnOnce(Ast) -> Ast,
    {
        if !self.insert_concat {
            return Err(ParseError::UnbalancedOperators);
        }
        if self.peek() == Some('?') {
            // A lazy quantifier has no carrier in the tree.
            return Err(ParseError::BadRepetition);
        }
        let r = self.stack.pop().ok_or(ParseError::UnbalancedOperators)?;
        self.stack.push(wrap(r));
        Ok(())
    }

    /// `{` opens a bounded repetition when well-formed, and is otherwise
    /// an ordinary literal.
    fn handle_left_brace(&mut self) -> Result<()> {
        let start = self.pos;
        match self.scan_repeat() {
            Some((min, max)) => {
                if let Some(max) = max {
                    if max < min {
                        return Err(ParseError::BadRepetition);
                    }
                }
                self.wrap_postfix(|r| Ast::Repeat {
                    sub: Box::new(r),
                    min,
                    max,
                })
            }
            None => {
                self.pos = start;
                self.handle_literal_char('{')
            }
        }
    }

    /// Scan `d+}`, `d+,}`, or `d+,d+}` after an opening brace.
    fn scan_repeat(&mut self) -> Option<(u32, Option<u32>)> {
        let min = self.scan_decimal()?;
        match self.next()? {
            '}' => Some((min, Some(min))),
            ',' => match self.peek()? {
                '}' => {
                    self.next();
                    Some((min, None))
                }
                _ => {
                    let max = self.scan_decimal()?;
                    match self.next()? {
                        '}' => Some((min, Some(max))),
                        _ => None,
                    }
                }
            },
            _ => None,
        }
    }

    fn scan_decimal(&mut self) -> Option<u32> {
        let mut value: u32 = 0;
        let mut any = false;
        while let Some(c) = self.peek() {
            let d = match c.to_digit(10) {
                Some(d) => d,
                None => break,
            };
            self.next();
            value = value.checked_mul(10)?.checked_add(d)?;
            any = true;
        }
        if any {
            Some(value)
        } else {
            None
        }
    }

    /// `(` opens a group. Both `(...)` and `(?:...)` are non-capturing;
    /// other `(?` forms have no carrier in the tree and are rejected.
    fn handle_left_paren(&mut self) -> Result<()> {
        if self.peek() == Some('?') {
            self.next();
            match self.next() {
                Some(':') => {}
                _ => return Err(ParseError::UnsupportedGroup),
            }
        }

        if self.insert_concat {
            self.op_stack.push(Operator::Concatenation);
        }

        self.op_stack.push(Operator::LeftParen);
        self.paren_count_stack.push(self.stack.len());
        self.insert_concat = false;

        Ok(())
    }

    fn handle_right_paren(&mut self) -> Result<()> {
        let last_op = self
            .op_stack
            .last()
            .ok_or(ParseError::UnbalancedOperators)?;
        let prev_node_count = self
            .paren_count_stack
            .pop()
            .ok_or(ParseError::UnbalancedParentheses)?;

        if *last_op == Operator::LeftParen && prev_node_count == self.stack.len() {
            // `()` matches the empty string.
            self.op_stack.pop().ok_or(ParseError::UnbalancedOperators)?;
            self.op_stack.push(Operator::EmptyPlaceholder);
            self.reduce_stack()?;
        } else {
            while matches!(self.op_stack.last(), Some(op) if *op != Operator::LeftParen) {
                self.reduce_stack()?;
            }
            self.op_stack.pop().ok_or(ParseError::UnbalancedOperators)?;
        }

        self.insert_concat = true;

        Ok(())
    }

    fn handle_right_bracket(&mut self) -> Result<()> {
        self.in_char_class = false;

        if self.char_range_buf.is_empty() && self.char_class_buf.0.is_empty() {
            return Err(ParseError::EmptyCharacterClass);
        }

        self.handle_incomplete_char_range_buf();

        let char_class = if self.char_class_buf.1 {
            self.char_class_buf.0.complement()
        } else {
            self.char_class_buf.0.clone()
        };
        if char_class.is_empty() {
            return Err(ParseError::EmptyCharacterClass);
        }
        self.clear_char_class_buf();

        self.handle_atom(Ast::Class(char_class))
    }

    /// Flush a partial range: a pending start (and a pending dash) become
    /// single-rune ranges of their own.
    fn handle_incomplete_char_range_buf(&mut self) {
        if let Some(s) = self.char_range_buf.0 {
            self.char_class_buf.0.add(s);
            if self.char_range_buf.1.is_some() {
                self.char_class_buf.0.add('-');
            }
        }
        self.char_range_buf.clear();
    }

    /// Feed one rune of class content through the range buffer. `verbatim`
    /// marks runes that came from escapes.
    fn append_char_range_buf(&mut self, c: char, verbatim: bool) -> Result<()> {
        match (self.char_range_buf.0, self.char_range_buf.1) {
            (None, _) => self.char_range_buf.0 = Some(c),
            (Some(_), None) => {
                if c == '-' && !verbatim {
                    self.char_range_buf.1 = Some(c);
                } else {
                    // Not a range; the pending rune stands alone.
                    self.handle_incomplete_char_range_buf();
                    self.char_range_buf.0 = Some(c);
                }
            }
            (Some(start), Some(_)) => {
                if start > c {
                    return Err(ParseError::InvertedCharRange);
                }
                self.char_class_buf.0.add_range(CharRange::new(start, c));
                self.char_range_buf.clear();
            }
        }
        Ok(())
    }

    #[inline]
    fn clear_char_class_buf(&mut self) {
        self.char_class_buf = (CharClass::new(), false);
    }

    /// Resolve the sequence after a backslash.
    fn handle_escape(&mut self) -> Result<Escaped> {
        let c = self.next().ok_or(ParseError::TrailingBackslash)?;
        let escaped = match c {
            'n' => Escaped::Rune('\n'),
            't' => Escaped::Rune('\t'),
            'r' => Escaped::Rune('\r'),
            'f' => Escaped::Rune('\u{c}'),
            'v' => Escaped::Rune('\u{b}'),
            'a' => Escaped::Rune('\u{7}'),
            '0' => Escaped::Rune('\u{0}'),
            'x' => Escaped::Rune(self.scan_hex_escape()?),
            'd' => Escaped::Class(CharClass::decimal_number()),
            'D' => Escaped::Class(CharClass::decimal_number().complement()),
            'w' => Escaped::Class(CharClass::word()),
            'W' => Escaped::Class(CharClass::word().complement()),
            's' => Escaped::Class(CharClass::whitespace()),
            'S' => Escaped::Class(CharClass::whitespace().complement()),
            c if c.is_ascii_alphanumeric() => return Err(ParseError::BadEscape(c)),
            c => Escaped::Rune(c),
        };
        Ok(escaped)
    }

    /// `\xHH` or `\x{HEX}`.
    fn scan_hex_escape(&mut self) -> Result<char> {
        let bad = ParseError::BadEscape('x');
        let mut value: u32 = 0;
        if self.peek() == Some('{') {
            self.next();
            let mut any = false;
            loop {
                match self.next().ok_or(bad.clone())? {
                    '}' => break,
                    c => {
                        let d = c.to_digit(16).ok_or(bad.clone())?;
                        value = value
                            .checked_mul(16)
                            .and_then(|v| v.checked_add(d))
                            .ok_or(bad.clone())?;
                        any = true;
                    }
                }
            }
            if !any {
                return Err(bad);
            }
        } else {
            for _ in 0..2 {
                let c = self.next().ok_or(bad.clone())?;
                let d = c.to_digit(16).ok_or(bad.clone())?;
                value = value * 16 + d;
            }
        }
        std::char::from_u32(value).ok_or(bad)
    }

    fn reduce_stack(&mut self) -> Result<()> {
        let op = self.op_stack.pop().ok_or(ParseError::UnbalancedOperators)?;
        match op {
            Operator::Union => {
                let c2 = self.stack.pop().ok_or(ParseError::UnbalancedOperators)?;
                let c1 = self.stack.pop().ok_or(ParseError::UnbalancedOperators)?;
                self.stack.push(union_node(c1, c2));
            }
            Operator::Concatenation => {
                let c2 = self.stack.pop().ok_or(ParseError::UnbalancedOperators)?;
                let c1 = self.stack.pop().ok_or(ParseError::UnbalancedOperators)?;
                self.stack.push(concat_node(c1, c2));
            }
            Operator::EmptyPlaceholder => self.stack.push(Ast::Empty),
            Operator::LeftParen => return Err(ParseError::UnbalancedParentheses),
        }
        Ok(())
    }

    /// Collapse the stack ahead of `op` where precedence demands it: an
    /// operator collapses a pending operator of the same kind, and a
    /// union collapses a pending concatenation.
    fn precedence_reduce_stack(&mut self, op: &Operator) -> Result<bool> {
        let reduce = match self.op_stack.last() {
            Some(last_op) => {
                if last_op == op && *last_op != Operator::LeftParen {
                    true
                } else {
                    *op == Operator::Union && *last_op == Operator::Concatenation
                }
            }
            None => false,
        };

        if reduce {
            self.reduce_stack()?;
        }

        Ok(reduce)
    }
}

/// Concatenate two parsed nodes, splicing nested concatenations, merging
/// adjacent literals, and dropping empty-match children.
fn concat_node(c1: Ast, c2: Ast) -> Ast {
    let mut sub = match c1 {
        Ast::Concat(sub) => sub,
        Ast::Empty => Vec::new(),
        r => vec![r],
    };
    let rest = match c2 {
        Ast::Concat(rest) => rest,
        Ast::Empty => Vec::new(),
        r => vec![r],
    };
    for r in rest {
        match (sub.last_mut(), r) {
            (Some(Ast::Literal(runes)), Ast::Literal(more)) => runes.extend(more),
            (_, r) => sub.push(r),
        }
    }
    match sub.len() {
        0 => Ast::Empty,
        1 => sub.swap_remove(0),
        _ => Ast::Concat(sub),
    }
}

/// Union of two parsed nodes, splicing nested alternations.
fn union_node(c1: Ast, c2: Ast) -> Ast {
    let mut sub = match c1 {
        Ast::Alternate(sub) => sub,
        r => vec![r],
    };
    match c2 {
        Ast::Alternate(rest) => sub.extend(rest),
        r => sub.push(r),
    }
    Ast::Alternate(sub)
}

/// Error returned when attempting to parse an invalid regular expression.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ParseError {
    /// There are an invalid number of operators, or operands are missing.
    #[error("unbalanced operators")]
    UnbalancedOperators,
    /// There are one or more sets of unclosed parentheses.
    #[error("unbalanced parentheses")]
    UnbalancedParentheses,
    /// A character class was not closed.
    #[error("unbalanced brackets")]
    UnbalancedBrackets,
    /// Bracketed character classes may not be empty.
    #[error("empty character class")]
    EmptyCharacterClass,
    /// A class range runs from a higher rune to a lower one.
    #[error("inverted character range")]
    InvertedCharRange,
    /// The pattern ends in a bare backslash.
    #[error("trailing backslash")]
    TrailingBackslash,
    /// An escape sequence with no assigned meaning.
    #[error("invalid escape sequence `\\{0}`")]
    BadEscape(char),
    /// A malformed or inverted repetition count, or a lazy quantifier.
    #[error("invalid repetition")]
    BadRepetition,
    /// Group syntax other than `(...)` and `(?:...)`.
    #[error("unsupported group syntax")]
    UnsupportedGroup,
}
