//! Character sets and the range syntax used by `add` / `remove`.

use std::collections::BTreeSet;
use std::fmt;

/// Inclusive range of characters, endpoints always ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharRange {
    start: char,
    end: char,
}

impl CharRange {
    pub fn new(a: char, b: char) -> Self {
        if a > b {
            Self { start: b, end: a }
        } else {
            Self { start: a, end: b }
        }
    }

    /// Parse `all`, `space`, a single character, or `a-b`.
    ///
    /// Reversed endpoints are swapped, so `z-a` is the same as `a-z`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "all" => return Some(Self::new(' ', '~')),
            "space" => return Some(Self::new(' ', ' ')),
            _ => {}
        }

        let chars: Vec<char> = s.chars().collect();
        match chars.as_slice() {
            [c] => Some(Self::new(*c, *c)),
            [a, '-', b] => Some(Self::new(*a, *b)),
            _ => None,
        }
    }

    pub fn start(&self) -> char {
        self.start
    }

    pub fn end(&self) -> char {
        self.end
    }

    pub fn iter(&self) -> impl Iterator<Item = char> {
        self.start..=self.end
    }
}

/// Distinct characters kept in code-point order.
///
/// Iteration order is the order the glyph table is built in, which makes
/// normalization and nearest-match tie breaking reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacterSet {
    chars: BTreeSet<char>,
}

impl CharacterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_chars(chars: impl IntoIterator<Item = char>) -> Self {
        Self { chars: chars.into_iter().collect() }
    }

    pub fn insert(&mut self, c: char) -> bool {
        self.chars.insert(c)
    }

    pub fn remove(&mut self, c: char) -> bool {
        self.chars.remove(&c)
    }

    pub fn insert_range(&mut self, range: CharRange) {
        self.chars.extend(range.iter());
    }

    pub fn remove_range(&mut self, range: CharRange) {
        for c in range.iter() {
            self.chars.remove(&c);
        }
    }

    pub fn contains(&self, c: char) -> bool {
        self.chars.contains(&c)
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Characters in ascending code-point order.
    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.chars.iter().copied()
    }
}

impl From<CharRange> for CharacterSet {
    fn from(range: CharRange) -> Self {
        Self::from_chars(range.iter())
    }
}

impl fmt::Display for CharacterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for c in self.iter() {
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "{}", c)?;
            first = false;
        }
        Ok(())
    }
}
