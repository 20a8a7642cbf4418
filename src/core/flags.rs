//! Modifier flags
//!
//! The registry of flag letters understood by the compiler, and the
//! per-expression [`Flags`] set built on top of it.

use std::fmt;

/// Known modifier letters, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flag {
    /// `g`: replace and match every occurrence instead of the first
    Global,
    /// `i`: case-insensitive matching
    IgnoreCase,
    /// `m`: `^` and `$` match at line boundaries
    Multiline,
    /// `s`: `.` also matches `\n`
    DotAll,
    /// `u`: Unicode mode (both engines are Unicode-aware already)
    Unicode,
    /// `x`: whitespace and `#` comments in the pattern are ignored
    Extended,
    /// `y`: a match must begin at the start of the input
    Sticky,
}

impl Flag {
    /// Every registered flag, in display order
    pub const ALL: [Flag; 7] = [
        Flag::Global,
        Flag::IgnoreCase,
        Flag::Multiline,
        Flag::DotAll,
        Flag::Unicode,
        Flag::Extended,
        Flag::Sticky,
    ];

    pub fn letter(self) -> char {
        match self {
            Flag::Global => 'g',
            Flag::IgnoreCase => 'i',
            Flag::Multiline => 'm',
            Flag::DotAll => 's',
            Flag::Unicode => 'u',
            Flag::Extended => 'x',
            Flag::Sticky => 'y',
        }
    }

    pub fn from_letter(letter: char) -> Option<Flag> {
        Flag::ALL.into_iter().find(|flag| flag.letter() == letter)
    }

    /// Inline group letter the engines understand, if the flag maps to one
    pub fn inline(self) -> Option<char> {
        match self {
            Flag::IgnoreCase => Some('i'),
            Flag::Multiline => Some('m'),
            Flag::DotAll => Some('s'),
            Flag::Extended => Some('x'),
            Flag::Global | Flag::Unicode | Flag::Sticky => None,
        }
    }

    fn rank(self) -> usize {
        Flag::ALL
            .iter()
            .position(|flag| *flag == self)
            .unwrap_or(Flag::ALL.len())
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Returns true if `letter` is in the registry
pub fn is_known(letter: char) -> bool {
    Flag::from_letter(letter).is_some()
}

/// The modifier set carried by an expression.
///
/// Letters outside the registry are accepted and kept; the compiler
/// ignores them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flags {
    letters: Vec<char>,
}

impl Flags {
    /// An empty set
    pub fn empty() -> Self {
        Self {
            letters: Vec::new(),
        }
    }

    /// Adds `letter` unless already present
    pub fn insert(&mut self, letter: char) {
        if !self.contains(letter) {
            self.letters.push(letter);
        }
    }

    /// Removes `letter`; absent letters are a no-op
    pub fn remove(&mut self, letter: char) {
        self.letters.retain(|c| *c != letter);
    }

    /// Inserts or removes depending on `enable`
    pub fn set(&mut self, flag: Flag, enable: bool) {
        if enable {
            self.insert(flag.letter());
        } else {
            self.remove(flag.letter());
        }
    }

    pub fn contains(&self, letter: char) -> bool {
        self.letters.contains(&letter)
    }

    pub fn has(&self, flag: Flag) -> bool {
        self.contains(flag.letter())
    }

    pub fn is_global(&self) -> bool {
        self.has(Flag::Global)
    }

    pub fn is_sticky(&self) -> bool {
        self.has(Flag::Sticky)
    }

    /// Letters in display order: registry order, then unknown letters as inserted
    pub fn letters(&self) -> Vec<char> {
        let mut known: Vec<Flag> = self
            .letters
            .iter()
            .filter_map(|c| Flag::from_letter(*c))
            .collect();
        known.sort_by_key(|flag| flag.rank());

        known
            .into_iter()
            .map(Flag::letter)
            .chain(self.unknown())
            .collect()
    }

    /// Letters that are not in the registry
    pub fn unknown(&self) -> impl Iterator<Item = char> + '_ {
        self.letters.iter().copied().filter(|c| !is_known(*c))
    }

    /// Inline group prefix such as `(?im)`, or an empty string
    pub fn inline_prefix(&self) -> String {
        let inline: String = self
            .letters()
            .into_iter()
            .filter_map(Flag::from_letter)
            .filter_map(Flag::inline)
            .collect();

        if inline.is_empty() {
            String::new()
        } else {
            format!("(?{})", inline)
        }
    }
}

impl Default for Flags {
    /// Global and multiline
    fn default() -> Self {
        let mut flags = Flags::empty();
        flags.insert(Flag::Global.letter());
        flags.insert(Flag::Multiline.letter());
        flags
    }
}

impl fmt::Display for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for letter in self.letters() {
            write!(f, "{}", letter)?;
        }
        Ok(())
    }
}

impl From<&str> for Flags {
    fn from(letters: &str) -> Self {
        let mut flags = Flags::empty();
        for letter in letters.chars() {
            flags.insert(letter);
        }
        flags
    }
}
