//! The expression builder
//!
//! An [`Expression`] accumulates pattern text from chained calls. Anchors
//! live in a separate prefix and suffix so they can be toggled at any point
//! in the chain; everything else is appended to the body.
//!
//! ```
//! use verex::verex;
//!
//! let mut url = verex();
//! url.start_of_line()
//!     .then("http")
//!     .maybe("s")
//!     .then("://")
//!     .maybe("www.")
//!     .anything_but(" ")
//!     .end_of_line();
//!
//! assert!(url.test("https://www.example.com")?);
//! assert!(!url.test("ftp://example.com")?);
//! # Ok::<(), verex::EngineError>(())
//! ```

use std::borrow::Cow;
use std::fmt;

use super::engine::{
    AutoEngine, CompiledRegex, Engine, EngineError, EngineType, ForcedEngine, Match,
};
use super::flags::{Flag, Flags};
use super::pattern::{write_literal, Pattern};
use super::sanitize::{CharSet, Literal};

/// A regular expression under construction.
///
/// Chain methods mutate in place and return `&mut Self`. Nothing is
/// validated while building; an invalid pattern is reported by the engine
/// when the expression is compiled.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    prefix: String,
    /// Finished branches of an alternation, oldest first
    alternatives: Vec<String>,
    /// Branch currently being appended to
    current: String,
    suffix: String,
    flags: Flags,
    open_captures: usize,
}

/// Creates an empty expression with the default `gm` flags
pub fn verex() -> Expression {
    Expression::new()
}

impl Default for Expression {
    fn default() -> Self {
        Self::new()
    }
}

impl Expression {
    pub fn new() -> Self {
        Self {
            prefix: String::new(),
            alternatives: Vec::new(),
            current: String::new(),
            suffix: String::new(),
            flags: Flags::default(),
            open_captures: 0,
        }
    }

    /// Escapes `value` for literal insertion
    pub fn sanitize<'a>(value: impl Into<Literal<'a>>) -> String {
        super::sanitize::sanitize(value)
    }

    // Accessors

    /// `^` or empty
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// `$` or empty
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// The body between the anchors
    pub fn source(&self) -> Cow<'_, str> {
        if self.alternatives.is_empty() {
            return Cow::Borrowed(&self.current);
        }

        let mut body = String::from("(?:");
        for branch in &self.alternatives {
            body.push_str(branch);
            body.push('|');
        }
        body.push_str(&self.current);
        body.push(')');
        Cow::Owned(body)
    }

    /// Prefix, body and suffix
    pub fn pattern(&self) -> String {
        format!("{}{}{}", self.prefix, self.source(), self.suffix)
    }

    pub fn flags(&self) -> &Flags {
        &self.flags
    }

    /// Captures opened by [`begin_capture`](Self::begin_capture) and not yet closed
    pub fn open_captures(&self) -> usize {
        self.open_captures
    }

    // Building

    /// Appends a sanitized value
    pub fn add<'a>(&mut self, value: impl Into<Literal<'a>>) -> &mut Self {
        let fragment = value.into().sanitize();
        self.push(&fragment)
    }

    /// Appends pattern text as-is
    pub fn add_raw(&mut self, fragment: &str) -> &mut Self {
        self.push(fragment)
    }

    pub fn start_of_line(&mut self) -> &mut Self {
        self.start_of_line_if(true)
    }

    pub fn start_of_line_if(&mut self, enable: bool) -> &mut Self {
        self.prefix = if enable { "^" } else { "" }.to_string();
        self
    }

    pub fn end_of_line(&mut self) -> &mut Self {
        self.end_of_line_if(true)
    }

    pub fn end_of_line_if(&mut self, enable: bool) -> &mut Self {
        self.suffix = if enable { "$" } else { "" }.to_string();
        self
    }

    /// Appends `value` as a non-capturing group
    pub fn then<'a>(&mut self, value: impl Into<Literal<'a>>) -> &mut Self {
        self.group(&value.into().sanitize(), "")
    }

    /// Same as [`then`](Self::then)
    pub fn find<'a>(&mut self, value: impl Into<Literal<'a>>) -> &mut Self {
        self.then(value)
    }

    /// Appends `value` as an optional group
    pub fn maybe<'a>(&mut self, value: impl Into<Literal<'a>>) -> &mut Self {
        self.group(&value.into().sanitize(), "?")
    }

    /// Closes the current branch and starts a new alternative.
    ///
    /// The finished branches and the new one render as a single
    /// non-capturing alternation, so the anchors apply to all of them.
    pub fn or(&mut self) -> &mut Self {
        let branch = std::mem::take(&mut self.current);
        self.alternatives.push(branch);
        self
    }

    /// [`or`](Self::or) followed by [`then`](Self::then)
    pub fn or_then<'a>(&mut self, value: impl Into<Literal<'a>>) -> &mut Self {
        self.or().then(value)
    }

    /// Zero or more of any character
    pub fn anything(&mut self) -> &mut Self {
        self.push("(?:.*)")
    }

    /// Zero or more characters not in `chars`
    pub fn anything_but<'a>(&mut self, chars: impl Into<CharSet<'a>>) -> &mut Self {
        let class = chars.into().sanitize();
        self.group(&format!("[^{}]*", class), "")
    }

    /// One or more of any character
    pub fn something(&mut self) -> &mut Self {
        self.push("(?:.+)")
    }

    /// One or more characters not in `chars`
    pub fn something_but<'a>(&mut self, chars: impl Into<CharSet<'a>>) -> &mut Self {
        let class = chars.into().sanitize();
        self.group(&format!("[^{}]+", class), "")
    }

    /// Exactly one character from `chars`
    pub fn any_of<'a>(&mut self, chars: impl Into<CharSet<'a>>) -> &mut Self {
        let class = chars.into().sanitize();
        self.group(&format!("[{}]", class), "")
    }

    /// Same as [`any_of`](Self::any_of)
    pub fn any<'a>(&mut self, chars: impl Into<CharSet<'a>>) -> &mut Self {
        self.any_of(chars)
    }

    /// Fails if `value` is at the current position, otherwise matches anything
    pub fn not<'a>(&mut self, value: impl Into<Literal<'a>>) -> &mut Self {
        let value = value.into().sanitize();
        self.group(&format!("(?!{}).*", value), "")
    }

    /// Character class built from `from, to` pairs; a trailing unpaired
    /// bound is dropped.
    pub fn range<'a, I, L>(&mut self, bounds: I) -> &mut Self
    where
        I: IntoIterator<Item = L>,
        L: Into<Literal<'a>>,
    {
        let bounds: Vec<String> = bounds.into_iter().map(|b| b.into().sanitize()).collect();

        let mut class = String::from("[");
        for pair in bounds.chunks_exact(2) {
            class.push_str(&pair[0]);
            class.push('-');
            class.push_str(&pair[1]);
        }
        class.push(']');
        self.push(&class)
    }

    // Special characters

    /// A single `\r\n`, `\r` or `\n`
    pub fn line_break(&mut self) -> &mut Self {
        self.push(r"(?:\r\n|\r|\n)")
    }

    /// Same as [`line_break`](Self::line_break)
    pub fn br(&mut self) -> &mut Self {
        self.line_break()
    }

    pub fn tab(&mut self) -> &mut Self {
        self.push(r"(?:\t)")
    }

    /// One or more word characters
    pub fn word(&mut self) -> &mut Self {
        self.push(r"(?:\w+)")
    }

    pub fn digit(&mut self) -> &mut Self {
        self.push(r"(?:\d)")
    }

    pub fn whitespace(&mut self) -> &mut Self {
        self.push(r"(?:\s)")
    }

    // Modifiers

    /// Adds a flag letter; adding one that is already set does nothing
    pub fn add_modifier(&mut self, letter: char) -> &mut Self {
        self.flags.insert(letter);
        self
    }

    /// Removes a flag letter if present
    pub fn remove_modifier(&mut self, letter: char) -> &mut Self {
        self.flags.remove(letter);
        self
    }

    pub fn with_any_case(&mut self) -> &mut Self {
        self.with_any_case_if(true)
    }

    pub fn with_any_case_if(&mut self, enable: bool) -> &mut Self {
        self.flags.set(Flag::IgnoreCase, enable);
        self
    }

    /// Only the first match is found or replaced
    pub fn stop_at_first(&mut self) -> &mut Self {
        self.stop_at_first_if(true)
    }

    pub fn stop_at_first_if(&mut self, enable: bool) -> &mut Self {
        self.flags.set(Flag::Global, !enable);
        self
    }

    /// `^` and `$` match only at the start and end of the whole input
    pub fn search_one_line(&mut self) -> &mut Self {
        self.search_one_line_if(true)
    }

    pub fn search_one_line_if(&mut self, enable: bool) -> &mut Self {
        self.flags.set(Flag::Multiline, !enable);
        self
    }

    // Loops

    /// Repeats the previous unit one or more times
    pub fn one_or_more(&mut self) -> &mut Self {
        self.push("+")
    }

    /// Repeats the previous unit zero or more times
    pub fn multiple(&mut self) -> &mut Self {
        self.multiple_with(None, None, None)
    }

    /// Zero or more repetitions of `value`
    pub fn multiple_of<'a>(&mut self, value: impl Into<Literal<'a>>) -> &mut Self {
        self.multiple_with(Some(value.into()), None, None)
    }

    /// At least `lower` repetitions of `value`
    pub fn multiple_at_least<'a>(
        &mut self,
        value: impl Into<Literal<'a>>,
        lower: usize,
    ) -> &mut Self {
        self.multiple_with(Some(value.into()), Some(lower), None)
    }

    /// Between `lower` and `upper` repetitions of `value`
    pub fn multiple_between<'a>(
        &mut self,
        value: impl Into<Literal<'a>>,
        lower: usize,
        upper: usize,
    ) -> &mut Self {
        self.multiple_with(Some(value.into()), Some(lower), Some(upper))
    }

    /// Appends `value` as a group when given, then a quantifier: `*` with
    /// no bounds, `{lower,}` with only a lower bound, `{lower,upper}` with
    /// both. An upper bound alone appends no quantifier.
    pub fn multiple_with(
        &mut self,
        value: Option<Literal<'_>>,
        lower: Option<usize>,
        upper: Option<usize>,
    ) -> &mut Self {
        if let Some(value) = value {
            self.group(&value.sanitize(), "");
        }

        match (lower, upper) {
            (None, None) => self.push("*"),
            (Some(lower), None) => self.push(&format!("{{{},}}", lower)),
            (Some(lower), Some(upper)) => self.push(&format!("{{{},{}}}", lower, upper)),
            (None, Some(_)) => self,
        }
    }

    /// Quantifies the previous unit: `{n}` for one bound, `{lower,upper}`
    /// for two. Any other number of bounds leaves the pattern unchanged.
    pub fn repeat_previous(&mut self, bounds: &[usize]) -> &mut Self {
        match bounds {
            [n] => self.push(&format!("{{{}}}", n)),
            [lower, upper] => self.push(&format!("{{{},{}}}", lower, upper)),
            _ => self,
        }
    }

    // Capture groups

    pub fn begin_capture(&mut self) -> &mut Self {
        self.open_captures += 1;
        self.push("(")
    }

    /// Closes a capture group; not checked against `begin_capture`
    pub fn end_capture(&mut self) -> &mut Self {
        self.open_captures = self.open_captures.saturating_sub(1);
        self.push(")")
    }

    // Compilation and matching

    /// Compiles with automatic engine selection
    pub fn to_regex(&self) -> Result<Pattern, EngineError> {
        self.compile_with(&AutoEngine)
    }

    /// Compiles with the given engine only
    pub fn to_regex_with(&self, engine: EngineType) -> Result<Pattern, EngineError> {
        self.compile_with(&ForcedEngine(engine))
    }

    /// Compiles with a caller-supplied engine
    pub fn compile_with<E: Engine>(
        &self,
        engine: &E,
    ) -> Result<Pattern<E::Compiled>, EngineError> {
        let source = self.pattern();
        let compiled = engine.compile(&source, &self.flags)?;
        Ok(Pattern::new(source, self.flags.clone(), compiled))
    }

    pub fn test(&self, input: &str) -> Result<bool, EngineError> {
        self.to_regex()?.test(input)
    }

    pub fn exec(&self, input: &str) -> Result<Option<Match>, EngineError> {
        self.to_regex()?.exec(input)
    }

    /// All matches when global, otherwise at most the first
    pub fn matches(&self, input: &str) -> Result<Vec<Match>, EngineError> {
        self.to_regex()?.matches(input)
    }

    pub fn replace(&self, input: &str, replacement: &str) -> Result<String, EngineError> {
        self.to_regex()?.replace(input, replacement)
    }

    fn push(&mut self, fragment: &str) -> &mut Self {
        self.current.push_str(fragment);
        self
    }

    fn group(&mut self, inner: &str, quantifier: &str) -> &mut Self {
        self.current.push_str("(?:");
        self.current.push_str(inner);
        self.current.push(')');
        self.current.push_str(quantifier);
        self
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_literal(f, &self.pattern(), &self.flags)
    }
}

impl<'a> From<&'a Expression> for Literal<'a> {
    fn from(expression: &'a Expression) -> Self {
        Literal::Source(Cow::Owned(expression.pattern()))
    }
}

impl TryFrom<&Expression> for Pattern<CompiledRegex> {
    type Error = EngineError;

    fn try_from(expression: &Expression) -> Result<Self, Self::Error> {
        expression.to_regex()
    }
}
