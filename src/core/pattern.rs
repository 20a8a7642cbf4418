//! Compiled patterns
//!
//! [`Pattern`] is what an expression compiles into: the native pattern plus
//! the source and flags it was built from.

use std::borrow::Cow;
use std::fmt;

use super::engine::{CompiledPattern, CompiledRegex, EngineError, Match};
use super::flags::Flags;
use super::sanitize::Literal;

/// A compiled expression
#[derive(Debug)]
pub struct Pattern<C = CompiledRegex> {
    source: String,
    flags: Flags,
    compiled: C,
}

impl<C: CompiledPattern> Pattern<C> {
    pub(crate) fn new(source: String, flags: Flags, compiled: C) -> Self {
        Self {
            source,
            flags,
            compiled,
        }
    }

    /// Pattern text, without flags
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn flags(&self) -> &Flags {
        &self.flags
    }

    /// Name of the engine the pattern was compiled with
    pub fn engine(&self) -> String {
        self.compiled.engine_name()
    }

    pub fn compiled(&self) -> &C {
        &self.compiled
    }

    /// Returns true if the pattern matches anywhere in `input`
    pub fn test(&self, input: &str) -> Result<bool, EngineError> {
        self.compiled.is_match(input)
    }

    /// First match and its groups
    pub fn exec(&self, input: &str) -> Result<Option<Match>, EngineError> {
        self.compiled.exec(input)
    }

    /// Every match when the global flag is set, otherwise at most the first
    pub fn matches(&self, input: &str) -> Result<Vec<Match>, EngineError> {
        if self.flags.is_global() {
            self.compiled.find_all(input)
        } else {
            Ok(self.compiled.exec(input)?.into_iter().collect())
        }
    }

    /// Replaces every match when the global flag is set, otherwise the first
    pub fn replace(&self, input: &str, replacement: &str) -> Result<String, EngineError> {
        self.compiled.replace(input, replacement, self.flags.is_global())
    }
}

/// Writes `/source/flags`, with `(?:)` standing in for an empty source
pub(crate) fn write_literal(
    f: &mut fmt::Formatter<'_>,
    source: &str,
    flags: &Flags,
) -> fmt::Result {
    let source = if source.is_empty() { "(?:)" } else { source };
    write!(f, "/{}/{}", source, flags)
}

impl<C> fmt::Display for Pattern<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_literal(f, &self.source, &self.flags)
    }
}

impl<'a, C> From<&'a Pattern<C>> for Literal<'a> {
    fn from(pattern: &'a Pattern<C>) -> Self {
        Literal::Source(Cow::Borrowed(&pattern.source))
    }
}
