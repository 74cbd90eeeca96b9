use crate::ast::InvariantViolation;

use std::char;
use std::cmp;
use std::iter;
use std::slice;
use std::vec;

/// The last Unicode scalar value.
const USV_END: char = '\u{10ffff}';

/// A character class: an ordered list of inclusive rune ranges.
///
/// The list is kept sorted by lower bound with all ranges disjoint. Runs
/// that touch or overlap are coalesced as they are inserted, with one
/// deliberate exception inherited from [`CharClass::add`]: two adjacent
/// single-rune ranges stay separate until a third adjacent rune collapses
/// the triple into one run.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct CharClass {
    /// The ranges included in the character class.
    pub ranges: Vec<CharRange>,
}

impl CharClass {
    /// Create an empty character class.
    #[inline]
    pub fn new() -> Self {
        Self { ranges: Vec::new() }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Determine if the given rune is within any of the ranges.
    #[inline]
    pub fn contains(&self, c: char) -> bool {
        self.ranges.iter().any(|r| r.contains(c))
    }

    /// The single rune this class matches, if it matches exactly one.
    #[inline]
    pub fn as_single(&self) -> Option<char> {
        match self.ranges.as_slice() {
            [r] if r.is_single() => Some(r.start),
            _ => None,
        }
    }

    /// Whether the class covers every Unicode scalar value.
    #[inline]
    pub fn is_any(&self) -> bool {
        matches!(self.ranges.as_slice(), [r] if r.start == '\u{0}' && r.end == USV_END)
    }

    /// Insert a single rune, preserving sortedness and disjointness.
    ///
    /// A rune touching the lower bound of an existing range extends it
    /// downward and coalesces with any now-touching neighbors. A rune
    /// touching the upper bound of a true run extends it upward, absorbing
    /// following ranges while they continue the run. A rune adjacent to a
    /// lone single stays a separate single until a third adjacent rune
    /// arrives, at which point the three singles collapse into one run.
    pub fn add(&mut self, r: char) {
        let rs = &mut self.ranges;
        let mut i = 0;
        while i < rs.len() {
            if r < rs[i].start {
                if succ(r) == Some(rs[i].start) {
                    rs[i].start = r;
                    if i + 1 < rs.len() && succ(rs[i].end) == Some(rs[i + 1].start) {
                        rs[i].end = rs[i + 1].end;
                        rs.remove(i + 1);
                    }
                    while i >= 1 && succ(rs[i - 1].end) == Some(rs[i].start) {
                        rs[i - 1].end = rs[i].end;
                        rs.remove(i);
                        i -= 1;
                    }
                } else {
                    rs.insert(i, CharRange::new_single(r));
                    if i >= 2 && Self::singleton_triple(&rs[i - 2], &rs[i - 1], r) {
                        rs[i - 2].end = r;
                        rs.drain(i - 1..=i);
                    }
                }
                return;
            } else if r <= rs[i].end {
                return;
            } else if rs[i].start < rs[i].end && succ(rs[i].end) == Some(r) {
                rs[i].end = r;
                while i + 1 < rs.len() && succ(rs[i].end) == Some(rs[i + 1].start) {
                    rs[i].end = rs[i + 1].end;
                    rs.remove(i + 1);
                }
                return;
            }
            i += 1;
        }
        rs.push(CharRange::new_single(r));
        let n = rs.len();
        if n >= 3 && Self::singleton_triple(&rs[n - 3], &rs[n - 2], r) {
            rs[n - 3].end = r;
            rs.truncate(n - 2);
        }
    }

    // [x,x][x+1,x+1] followed by x+2 collapses to [x,x+2].
    #[inline]
    fn singleton_triple(a: &CharRange, b: &CharRange, r: char) -> bool {
        a.is_single() && b.is_single() && succ(a.start) == Some(b.start) && succ(b.start) == Some(r)
    }

    /// Insert a range as an interval union: overlapping and touching
    /// ranges are coalesced into one run.
    pub fn add_range(&mut self, range: CharRange) {
        let rs = &mut self.ranges;
        let mut i = 0;
        while i < rs.len() && rs[i].end < range.start && succ(rs[i].end) != Some(range.start) {
            i += 1;
        }
        if i == rs.len() || (range.end < rs[i].start && succ(range.end) != Some(rs[i].start)) {
            rs.insert(i, range);
            return;
        }
        let start = cmp::min(rs[i].start, range.start);
        let mut end = cmp::max(rs[i].end, range.end);
        let mut j = i + 1;
        while j < rs.len() && (rs[j].start <= end || succ(end) == Some(rs[j].start)) {
            end = cmp::max(end, rs[j].end);
            j += 1;
        }
        rs[i] = CharRange::new(start, end);
        rs.drain(i + 1..j);
    }

    /// Fold every range of `other` into this class: single runes through
    /// [`CharClass::add`], runs through interval union.
    #[inline]
    pub fn add_class(&mut self, other: &CharClass) {
        for r in other {
            if r.is_single() {
                self.add(r.start);
            } else {
                self.add_range(*r);
            }
        }
    }

    /// Return the complement of the union of the ranges. Surrogate code
    /// points are never included.
    pub fn complement(&self) -> Self {
        let mut out = Self::new();
        let mut next = Some('\u{0}');
        for r in &self.ranges {
            if let (Some(start), Some(end)) = (next, pred(r.start)) {
                if start <= end {
                    out.add_range(CharRange::new(start, end));
                }
            }
            next = succ(r.end);
        }
        if let Some(start) = next {
            out.add_range(CharRange::new(start, USV_END));
        }
        out
    }

    /// Verify sortedness, disjointness, and coalescing. Two neighbors may
    /// touch only while both are singles.
    pub fn check(&self) -> Result<(), InvariantViolation> {
        if self.ranges.is_empty() {
            return Err(InvariantViolation("empty character class"));
        }
        for r in &self.ranges {
            if r.start > r.end {
                return Err(InvariantViolation("inverted character range"));
            }
        }
        for w in self.ranges.windows(2) {
            if w[1].start <= w[0].end {
                return Err(InvariantViolation("overlapping character ranges"));
            }
            if succ(w[0].end) == Some(w[1].start) && !(w[0].is_single() && w[1].is_single()) {
                return Err(InvariantViolation("touching character runs"));
            }
        }
        Ok(())
    }
}

impl CharClass {
    /// The decimal digits.
    #[inline]
    pub fn decimal_number() -> Self {
        CharRange::new('0', '9').into()
    }

    /// Alphanumerics and the underscore.
    #[inline]
    pub fn word() -> Self {
        let ranges = vec![
            CharRange::new('0', '9'),
            CharRange::new('A', 'Z'),
            CharRange::new('_', '_'),
            CharRange::new('a', 'z'),
        ];
        ranges.into()
    }

    /// Whitespace characters.
    #[inline]
    pub fn whitespace() -> Self {
        let ranges = vec![
            CharRange::new('\t', '\n'),
            CharRange::new('\u{c}', '\r'),
            CharRange::new(' ', ' '),
        ];
        ranges.into()
    }
}

impl Default for CharClass {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl From<CharRange> for CharClass {
    /// Create a character class with a single range.
    #[inline]
    fn from(range: CharRange) -> Self {
        let mut class = CharClass::new();
        class.add_range(range);
        class
    }
}

impl From<char> for CharClass {
    /// Create a character class matching one rune.
    #[inline]
    fn from(c: char) -> Self {
        CharRange::from(c).into()
    }
}

impl From<Vec<CharRange>> for CharClass {
    #[inline]
    fn from(vec: Vec<CharRange>) -> Self {
        let mut class = CharClass::new();
        class.extend(vec);
        class
    }
}

impl Extend<CharRange> for CharClass {
    #[inline]
    fn extend<I: IntoIterator<Item = CharRange>>(&mut self, iter: I) {
        for r in iter {
            if r.is_single() {
                self.add(r.start);
            } else {
                self.add_range(r);
            }
        }
    }
}

impl iter::FromIterator<CharRange> for CharClass {
    #[inline]
    fn from_iter<I: IntoIterator<Item = CharRange>>(iter: I) -> Self {
        let mut class = Self::new();
        class.extend(iter);
        class
    }
}

impl CharClass {
    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, CharRange> {
        self.ranges.iter()
    }
}

impl<'a> IntoIterator for &'a CharClass {
    type Item = &'a CharRange;
    type IntoIter = slice::Iter<'a, CharRange>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.ranges.iter()
    }
}

impl IntoIterator for CharClass {
    type Item = CharRange;
    type IntoIter = vec::IntoIter<CharRange>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.ranges.into_iter()
    }
}

/// A range of runes from the lower bound to the upper bound, inclusive.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct CharRange {
    pub start: char,
    pub end: char,
}

impl CharRange {
    /// Create a new character range with the given bounds.
    #[inline]
    pub fn new(start: char, end: char) -> Self {
        CharRange { start, end }
    }

    /// Create a single-rune character range.
    #[inline]
    pub fn new_single(c: char) -> Self {
        CharRange { start: c, end: c }
    }

    /// Determine if the given rune is within the range.
    #[inline]
    pub fn contains(&self, c: char) -> bool {
        self.start <= c && c <= self.end
    }

    #[inline]
    pub fn is_single(&self) -> bool {
        self.start == self.end
    }
}

impl From<char> for CharRange {
    #[inline]
    fn from(c: char) -> Self {
        Self::new_single(c)
    }
}

impl From<(char, char)> for CharRange {
    #[inline]
    fn from(range: (char, char)) -> Self {
        Self::new(range.0, range.1)
    }
}

/// The next Unicode scalar value, skipping the surrogate block.
#[inline]
pub(crate) fn succ(c: char) -> Option<char> {
    match c {
        '\u{d7ff}' => Some('\u{e000}'),
        USV_END => None,
        _ => char::from_u32(c as u32 + 1),
    }
}

/// The previous Unicode scalar value, skipping the surrogate block.
#[inline]
pub(crate) fn pred(c: char) -> Option<char> {
    match c {
        '\u{0}' => None,
        '\u{e000}' => Some('\u{d7ff}'),
        _ => char::from_u32(c as u32 - 1),
    }
}
